/// Default tuning values for the widget.
/// Distances are CSS pixels, times are milliseconds unless noted otherwise.
pub const PROXIMITY_RADIUS: f64 = 200.0;
/// Minimum gap between two relocations of the runaway button.
pub const RELOCATION_THROTTLE_MS: f64 = 100.0;
/// Margin kept between the runaway button and the container edge.
pub const PADDING: f64 = 20.0;
pub const PARTICLE_COUNT: usize = 150;
/// Upper bound accepted from external config.
pub const MAX_PARTICLE_COUNT: usize = 2_000;
pub const SPAWN_INTERVAL_MS: f64 = 5.0;
/// Particles start just above the visible top edge.
pub const PARTICLE_START_Y: f64 = -20.0;
/// Rotation added to every particle per frame (degrees).
pub const ROTATION_STEP_DEG: f64 = 2.0;
pub const GLYPH_COUNT: usize = 15;
pub const MAX_GLYPH_COUNT: usize = 200;

pub const PALETTE: [&str; 5] = ["#ff4d6d", "#ff758f", "#ffb3c1", "#ffd6ff", "#e0aaff"];
pub const GLYPH_SYMBOLS: [&str; 4] = ["❤", "💖", "💕", "💗"];
