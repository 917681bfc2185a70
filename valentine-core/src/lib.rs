pub mod config;
pub mod confetti;
pub mod constants;
pub mod evasion;
pub mod geometry;
pub mod glyphs;
pub mod session;

pub use config::Config;
pub use confetti::{Celebration, FrameStatus, Particle, Surface};
pub use evasion::{ButtonSize, Evader, Position};
pub use geometry::{Point, Rect};
pub use glyphs::{DecorativeGlyph, generate_glyphs};
pub use session::{Phase, Session};
