use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::Config;

/// Floating heart in the page background. Generated once, never mutated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecorativeGlyph {
    pub symbol: String,
    /// Horizontal offset in viewport-width units.
    pub left: f64,
    /// Seconds.
    pub animation_duration: f64,
    /// Seconds.
    pub animation_delay: f64,
}

impl DecorativeGlyph {
    pub fn random<R: Rng + ?Sized>(symbols: &[String], rng: &mut R) -> Self {
        let symbol = if symbols.is_empty() {
            String::new()
        } else {
            symbols[rng.random_range(0..symbols.len())].clone()
        };
        DecorativeGlyph {
            symbol,
            left: rng.random::<f64>() * 100.0,
            animation_duration: rng.random::<f64>() * 3.0 + 4.0,
            animation_delay: rng.random::<f64>() * 5.0,
        }
    }

    /// Inline CSS for the glyph element.
    pub fn style(&self) -> String {
        format!(
            "left:{}vw;animation-duration:{}s;animation-delay:{}s",
            self.left, self.animation_duration, self.animation_delay
        )
    }
}

pub fn generate_glyphs<R: Rng + ?Sized>(cfg: &Config, rng: &mut R) -> Vec<DecorativeGlyph> {
    (0..cfg.glyph_count)
        .map(|_| DecorativeGlyph::random(&cfg.glyph_symbols, rng))
        .collect()
}
