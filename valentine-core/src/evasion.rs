//! Runaway "No" button.
//!
//! The button jumps to a random spot inside its container whenever the
//! pointer gets close to it or touches it directly. All inputs are measured
//! rectangles handed in by the caller; a missing rectangle means the element
//! is not laid out yet and the call does nothing.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::geometry::{Point, Rect};
use crate::session::Phase;

/// Placement of the runaway button.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Position {
    /// Normal layout flow, before the first jump.
    #[default]
    Relative,
    /// Offset in pixels from the container's top-left corner.
    Absolute { left: f64, top: f64 },
}

impl Position {
    pub fn is_absolute(&self) -> bool {
        matches!(self, Position::Absolute { .. })
    }
}

/// Size of the button captured on its first jump. Used to reserve its old
/// slot in the layout so the rest of the row does not collapse.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ButtonSize {
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Debug)]
pub struct Evader {
    proximity_radius: f64,
    throttle_ms: f64,
    padding: f64,
    position: Position,
    button_size: Option<ButtonSize>,
    last_relocation_ms: Option<f64>,
}

impl Evader {
    pub fn new(cfg: &Config) -> Self {
        Evader {
            proximity_radius: cfg.proximity_radius,
            throttle_ms: cfg.relocation_throttle_ms,
            padding: cfg.padding,
            position: Position::Relative,
            button_size: None,
            last_relocation_ms: None,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn button_size(&self) -> Option<ButtonSize> {
        self.button_size
    }

    pub fn last_relocation_ms(&self) -> Option<f64> {
        self.last_relocation_ms
    }

    /// Size of the placeholder that should stand in for the button, if any.
    pub fn placeholder(&self) -> Option<ButtonSize> {
        if self.position.is_absolute() {
            self.button_size
        } else {
            None
        }
    }

    fn throttled(&self, now_ms: f64) -> bool {
        match self.last_relocation_ms {
            Some(last) => now_ms - last <= self.throttle_ms,
            None => false,
        }
    }

    /// Pointer moved somewhere on the page. Returns the new position when the
    /// button had to flee.
    pub fn on_pointer_activity<R: Rng + ?Sized>(
        &mut self,
        phase: Phase,
        pointer: Point,
        button: Option<Rect>,
        container: Option<Rect>,
        now_ms: f64,
        rng: &mut R,
    ) -> Option<Position> {
        if phase == Phase::Celebrating {
            return None;
        }
        let btn = button?;
        let distance = pointer.distance(btn.center());
        if distance < self.proximity_radius && !self.throttled(now_ms) {
            self.relocate(button, container, now_ms, rng)
        } else {
            None
        }
    }

    /// Move the button to a random spot inside the container, keeping
    /// `padding` clear of the top-left edges. A container too small for the
    /// button pins it at `(padding, padding)`.
    pub fn relocate<R: Rng + ?Sized>(
        &mut self,
        button: Option<Rect>,
        container: Option<Rect>,
        now_ms: f64,
        rng: &mut R,
    ) -> Option<Position> {
        let (btn, cont) = match (button, container) {
            (Some(b), Some(c)) => (b, c),
            _ => return None,
        };
        self.last_relocation_ms = Some(now_ms);
        if self.button_size.is_none() {
            self.button_size = Some(ButtonSize {
                width: btn.width,
                height: btn.height,
            });
        }

        let max_left = cont.width - btn.width - self.padding;
        let max_top = cont.height - btn.height - self.padding;
        let left = self.padding.max(rng.random::<f64>() * max_left);
        let top = self.padding.max(rng.random::<f64>() * max_top);

        self.position = Position::Absolute { left, top };
        Some(self.position)
    }
}
