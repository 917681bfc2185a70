use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::confetti::{Celebration, FrameStatus, Surface};
use crate::evasion::{Evader, Position};
use crate::geometry::{Point, Rect};
use crate::glyphs::{DecorativeGlyph, generate_glyphs};

/// Which view the widget shows. Only ever moves forward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Prompting,
    Celebrating,
}

/// Everything the widget remembers for the lifetime of one page.
pub struct Session {
    cfg: Config,
    seed: u64,
    rng: Pcg64Mcg,
    phase: Phase,
    evader: Evader,
    celebration: Option<Celebration>,
}

impl Session {
    pub fn new(cfg: Config, seed: u64) -> Self {
        let evader = Evader::new(&cfg);
        Session {
            cfg,
            seed,
            rng: Pcg64Mcg::seed_from_u64(seed),
            phase: Phase::Prompting,
            evader,
            celebration: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn evader(&self) -> &Evader {
        &self.evader
    }

    pub fn celebration(&self) -> Option<&Celebration> {
        self.celebration.as_ref()
    }

    pub fn glyphs(&mut self) -> Vec<DecorativeGlyph> {
        generate_glyphs(&self.cfg, &mut self.rng)
    }

    pub fn on_pointer_activity(
        &mut self,
        pointer: Point,
        button: Option<Rect>,
        container: Option<Rect>,
        now_ms: f64,
    ) -> Option<Position> {
        self.evader
            .on_pointer_activity(self.phase, pointer, button, container, now_ms, &mut self.rng)
    }

    /// Hover, touch or click landed on the button itself.
    pub fn evade(
        &mut self,
        button: Option<Rect>,
        container: Option<Rect>,
        now_ms: f64,
    ) -> Option<Position> {
        if self.phase != Phase::Prompting {
            return None;
        }
        self.evader.relocate(button, container, now_ms, &mut self.rng)
    }

    /// The "Yes" button was pressed. Returns true on the one real transition.
    pub fn accept(&mut self) -> bool {
        if self.phase == Phase::Celebrating {
            return false;
        }
        self.phase = Phase::Celebrating;
        true
    }

    pub fn start_celebration(&mut self, width: f64, height: f64, now_ms: f64) -> bool {
        if self.phase != Phase::Celebrating || self.celebration.is_some() {
            return false;
        }
        self.celebration = Some(Celebration::new(&self.cfg, width, height, now_ms));
        true
    }

    pub fn resize_surface(&mut self, width: f64, height: f64) {
        if let Some(c) = self.celebration.as_mut() {
            c.resize(width, height);
        }
    }

    pub fn frame<S: Surface + ?Sized>(&mut self, now_ms: f64, surface: &mut S) -> FrameStatus {
        match self.celebration.as_mut() {
            Some(c) => c.frame(now_ms, &mut self.rng, surface),
            None => FrameStatus::Finished,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sink(usize);

    impl Surface for Sink {
        fn clear(&mut self, _width: f64, _height: f64) {}

        fn fill_square(&mut self, _x: f64, _y: f64, _size: f64, _rot: f64, _color: &str) {
            self.0 += 1;
        }
    }

    const CONTAINER: Rect = Rect {
        left: 0.0,
        top: 0.0,
        width: 500.0,
        height: 500.0,
    };
    const BUTTON: Rect = Rect {
        left: 200.0,
        top: 200.0,
        width: 80.0,
        height: 40.0,
    };

    #[test]
    fn accept_is_one_way() {
        let mut s = Session::new(Config::default(), 1);
        assert_eq!(s.phase(), Phase::Prompting);
        assert!(s.accept());
        assert_eq!(s.phase(), Phase::Celebrating);
        assert!(!s.accept());
        assert_eq!(s.phase(), Phase::Celebrating);
    }

    #[test]
    fn direct_contact_always_relocates_while_prompting() {
        let mut s = Session::new(Config::default(), 2);
        // no throttle on direct contact
        for t in [0.0, 1.0, 2.0] {
            assert!(s.evade(Some(BUTTON), Some(CONTAINER), t).is_some());
        }
        s.accept();
        assert!(s.evade(Some(BUTTON), Some(CONTAINER), 500.0).is_none());
    }

    #[test]
    fn pointer_evasion_stops_after_accept() {
        let mut s = Session::new(Config::default(), 3);
        assert!(
            s.on_pointer_activity(BUTTON.center(), Some(BUTTON), Some(CONTAINER), 0.0)
                .is_some()
        );
        s.accept();
        assert!(
            s.on_pointer_activity(BUTTON.center(), Some(BUTTON), Some(CONTAINER), 1_000.0)
                .is_none()
        );
    }

    #[test]
    fn celebration_requires_accept_and_starts_once() {
        let mut s = Session::new(Config::default(), 4);
        assert!(!s.start_celebration(800.0, 600.0, 0.0));
        assert!(s.celebration().is_none());
        assert_eq!(s.frame(0.0, &mut Sink(0)), FrameStatus::Finished);
        s.accept();
        assert!(s.start_celebration(800.0, 600.0, 0.0));
        assert!(!s.start_celebration(800.0, 600.0, 10.0));
        s.resize_surface(1024.0, 768.0);
        assert_eq!(s.celebration().map(|c| c.size()), Some((1024.0, 768.0)));
    }

    #[test]
    fn full_run_spawns_every_particle_once() {
        let mut s = Session::new(Config::default(), 5);
        s.accept();
        s.start_celebration(640.0, 480.0, 0.0);
        let mut sink = Sink(0);
        let mut now = 0.0;
        while s.frame(now, &mut sink) == FrameStatus::Continue {
            now += 16.0;
        }
        let c = s.celebration().unwrap();
        assert_eq!(c.spawned(), 150);
        assert!(c.particles().is_empty());
        assert!(sink.0 > 0);
    }

    #[test]
    fn seed_reproduces_session() {
        let mut a = Session::new(Config::default(), 42);
        let mut b = Session::new(Config::default(), 42);
        assert_eq!(a.glyphs(), b.glyphs());
        assert_eq!(
            a.evade(Some(BUTTON), Some(CONTAINER), 0.0),
            b.evade(Some(BUTTON), Some(CONTAINER), 0.0)
        );
        assert_eq!(a.seed(), 42);
    }
}
