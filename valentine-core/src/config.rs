use serde::{Deserialize, Serialize};

use crate::constants::{
    GLYPH_COUNT, GLYPH_SYMBOLS, MAX_GLYPH_COUNT, MAX_PARTICLE_COUNT, PADDING, PALETTE,
    PARTICLE_COUNT, PARTICLE_START_Y, PROXIMITY_RADIUS, RELOCATION_THROTTLE_MS,
    ROTATION_STEP_DEG, SPAWN_INTERVAL_MS,
};

/// Tunables for one widget session. Every field is optional in JSON and
/// falls back to the value in `constants`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub proximity_radius: f64,
    pub relocation_throttle_ms: f64,
    pub padding: f64,
    pub particle_count: usize,
    pub spawn_interval_ms: f64,
    pub particle_start_y: f64,
    pub rotation_step_deg: f64,
    pub glyph_count: usize,
    pub palette: Vec<String>,
    pub glyph_symbols: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            proximity_radius: PROXIMITY_RADIUS,
            relocation_throttle_ms: RELOCATION_THROTTLE_MS,
            padding: PADDING,
            particle_count: PARTICLE_COUNT,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            particle_start_y: PARTICLE_START_Y,
            rotation_step_deg: ROTATION_STEP_DEG,
            glyph_count: GLYPH_COUNT,
            palette: PALETTE.iter().map(|c| c.to_string()).collect(),
            glyph_symbols: GLYPH_SYMBOLS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Config {
    pub fn from_json(text: &str) -> serde_json::Result<Config> {
        serde_json::from_str::<Config>(text).map(Config::sanitized)
    }

    /// Replace values that would break the simulation with the defaults.
    pub fn sanitized(mut self) -> Config {
        let d = Config::default();
        if !self.proximity_radius.is_finite() || self.proximity_radius < 0.0 {
            self.proximity_radius = d.proximity_radius;
        }
        if !self.relocation_throttle_ms.is_finite() || self.relocation_throttle_ms < 0.0 {
            self.relocation_throttle_ms = d.relocation_throttle_ms;
        }
        if !self.padding.is_finite() || self.padding < 0.0 {
            self.padding = d.padding;
        }
        if !self.spawn_interval_ms.is_finite() || self.spawn_interval_ms < 0.0 {
            self.spawn_interval_ms = d.spawn_interval_ms;
        }
        // Spawning above the top edge keeps the "enters from above" look.
        if !self.particle_start_y.is_finite() || self.particle_start_y > 0.0 {
            self.particle_start_y = d.particle_start_y;
        }
        if !self.rotation_step_deg.is_finite() {
            self.rotation_step_deg = d.rotation_step_deg;
        }
        self.particle_count = self.particle_count.min(MAX_PARTICLE_COUNT);
        self.glyph_count = self.glyph_count.min(MAX_GLYPH_COUNT);
        if self.palette.is_empty() {
            self.palette = d.palette;
        }
        if self.glyph_symbols.is_empty() {
            self.glyph_symbols = d.glyph_symbols;
        }
        self
    }
}
