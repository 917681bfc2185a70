//! Confetti shower shown after the "Yes" click.
//!
//! The simulation is frame-stepped: every frame spawns whatever particles
//! have become due, clears the surface, moves and draws each particle, then
//! drops the ones that fell past the bottom edge.

use rand::Rng;

use crate::config::Config;

/// Drawing target for the confetti. The browser runtime implements this on
/// top of a 2D canvas context.
pub trait Surface {
    fn clear(&mut self, width: f64, height: f64);
    /// Filled square of side `size`, centered at `(x, y)` and rotated by
    /// `rotation_deg` around its center.
    fn fill_square(&mut self, x: f64, y: f64, size: f64, rotation_deg: f64, color: &str);
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub speed_x: f64,
    pub speed_y: f64,
    pub color: String,
    pub rotation: f64,
}

impl Particle {
    pub fn random<R: Rng + ?Sized>(
        width: f64,
        start_y: f64,
        palette: &[String],
        rng: &mut R,
    ) -> Self {
        let color = if palette.is_empty() {
            String::new()
        } else {
            palette[rng.random_range(0..palette.len())].clone()
        };
        Particle {
            x: rng.random::<f64>() * width,
            y: start_y,
            size: rng.random::<f64>() * 8.0 + 4.0,
            speed_y: rng.random::<f64>() * 3.0 + 2.0,
            speed_x: rng.random::<f64>() * 2.0 - 1.0,
            color,
            rotation: rng.random::<f64>() * 360.0,
        }
    }

    pub fn update(&mut self, rotation_step: f64) {
        self.y += self.speed_y;
        self.x += self.speed_x;
        self.rotation += rotation_step;
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.fill_square(self.x, self.y, self.size, self.rotation, &self.color);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStatus {
    /// More frames are needed.
    Continue,
    /// Every particle was spawned and has left the surface.
    Finished,
}

#[derive(Clone, Debug)]
pub struct Celebration {
    particles: Vec<Particle>,
    palette: Vec<String>,
    total: usize,
    spawned: usize,
    spawn_interval_ms: f64,
    start_y: f64,
    rotation_step: f64,
    started_ms: f64,
    width: f64,
    height: f64,
}

impl Celebration {
    pub fn new(cfg: &Config, width: f64, height: f64, now_ms: f64) -> Self {
        Celebration {
            particles: Vec::new(),
            palette: cfg.palette.clone(),
            total: cfg.particle_count,
            spawned: 0,
            spawn_interval_ms: cfg.spawn_interval_ms,
            start_y: cfg.particle_start_y,
            rotation_step: cfg.rotation_step_deg,
            started_ms: now_ms,
            width,
            height,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn spawned(&self) -> usize {
        self.spawned
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Window resized; the next clear and bounds check use the new size.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn is_finished(&self) -> bool {
        self.spawned >= self.total && self.particles.is_empty()
    }

    /// Number of particles that should exist by `now_ms`. Particle `i` is due
    /// at `started_ms + i * spawn_interval_ms`.
    fn due_count(&self, now_ms: f64) -> usize {
        let elapsed = now_ms - self.started_ms;
        if elapsed < 0.0 {
            return 0;
        }
        if self.spawn_interval_ms <= 0.0 {
            return self.total;
        }
        let due = (elapsed / self.spawn_interval_ms).floor() + 1.0;
        if due >= self.total as f64 {
            self.total
        } else {
            due as usize
        }
    }

    /// Spawn every particle that has become due. Returns how many were added.
    pub fn spawn_due<R: Rng + ?Sized>(&mut self, now_ms: f64, rng: &mut R) -> usize {
        let due = self.due_count(now_ms);
        let fresh = due.saturating_sub(self.spawned);
        for _ in 0..fresh {
            let p = Particle::random(self.width, self.start_y, &self.palette, rng);
            self.particles.push(p);
        }
        self.spawned += fresh;
        fresh
    }

    /// Clear, move, draw and cull once. Returns how many particles left.
    pub fn step<S: Surface + ?Sized>(&mut self, surface: &mut S) -> usize {
        surface.clear(self.width, self.height);
        for p in self.particles.iter_mut() {
            p.update(self.rotation_step);
            p.draw(surface);
        }
        let before = self.particles.len();
        let height = self.height;
        self.particles.retain(|p| p.y <= height);
        before - self.particles.len()
    }

    /// One animation frame.
    pub fn frame<R: Rng + ?Sized, S: Surface + ?Sized>(
        &mut self,
        now_ms: f64,
        rng: &mut R,
        surface: &mut S,
    ) -> FrameStatus {
        if self.is_finished() {
            return FrameStatus::Finished;
        }
        self.spawn_due(now_ms, rng);
        self.step(surface);
        if self.is_finished() {
            FrameStatus::Finished
        } else {
            FrameStatus::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    #[derive(Default)]
    struct Recorder {
        clears: Vec<(f64, f64)>,
        squares: Vec<(f64, f64, f64, f64, String)>,
    }

    impl Surface for Recorder {
        fn clear(&mut self, width: f64, height: f64) {
            self.clears.push((width, height));
        }

        fn fill_square(&mut self, x: f64, y: f64, size: f64, rotation_deg: f64, color: &str) {
            self.squares.push((x, y, size, rotation_deg, color.to_string()));
        }
    }

    fn run_to_end(c: &mut Celebration, rng: &mut Pcg64Mcg, surface: &mut Recorder) -> usize {
        let mut frames = 0;
        let mut now = 0.0;
        while c.frame(now, rng, surface) == FrameStatus::Continue {
            frames += 1;
            now += 16.0;
            assert!(frames < 10_000, "animation never finished");
        }
        frames + 1
    }

    #[test]
    fn particle_attributes_in_range() {
        let mut rng = Pcg64Mcg::seed_from_u64(11);
        let palette = Config::default().palette;
        for _ in 0..1_000 {
            let p = Particle::random(800.0, -20.0, &palette, &mut rng);
            assert!((0.0..800.0).contains(&p.x));
            assert_eq!(p.y, -20.0);
            assert!((4.0..12.0).contains(&p.size));
            assert!((2.0..5.0).contains(&p.speed_y));
            assert!((-1.0..1.0).contains(&p.speed_x));
            assert!((0.0..360.0).contains(&p.rotation));
            assert!(palette.contains(&p.color));
        }
    }

    #[test]
    fn update_integrates_speed_and_rotation() {
        let mut p = Particle {
            x: 10.0,
            y: -20.0,
            size: 6.0,
            speed_x: -0.5,
            speed_y: 3.0,
            color: "#ff4d6d".into(),
            rotation: 359.0,
        };
        p.update(2.0);
        assert_eq!((p.x, p.y, p.rotation), (9.5, -17.0, 361.0));
    }

    #[test]
    fn spawning_is_staggered() {
        let mut rng = Pcg64Mcg::seed_from_u64(12);
        let mut c = Celebration::new(&Config::default(), 800.0, 600.0, 1_000.0);
        assert_eq!(c.spawn_due(999.0, &mut rng), 0);
        assert_eq!(c.spawn_due(1_000.0, &mut rng), 1);
        assert_eq!(c.spawn_due(1_004.9, &mut rng), 0);
        assert_eq!(c.spawn_due(1_016.0, &mut rng), 3);
        assert_eq!(c.spawned(), 4);
        assert_eq!(c.spawn_due(5_000.0, &mut rng), 146);
        assert_eq!(c.spawn_due(9_000.0, &mut rng), 0);
        assert_eq!(c.spawned(), 150);
    }

    #[test]
    fn exactly_all_particles_spawn_and_leave() {
        let mut rng = Pcg64Mcg::seed_from_u64(13);
        let mut c = Celebration::new(&Config::default(), 800.0, 600.0, 0.0);
        let mut rec = Recorder::default();
        let frames = run_to_end(&mut c, &mut rng, &mut rec);
        assert_eq!(c.spawned(), 150);
        assert!(c.particles().is_empty());
        assert!(c.is_finished());
        assert_eq!(rec.clears.len(), frames);
    }

    #[test]
    fn particles_removed_only_after_passing_bottom() {
        let mut rng = Pcg64Mcg::seed_from_u64(14);
        let mut c = Celebration::new(&Config::default(), 300.0, 200.0, 0.0);
        let mut rec = Recorder::default();
        c.spawn_due(f64::MAX, &mut rng);
        while !c.is_finished() {
            let before: Vec<f64> = c.particles().iter().map(|p| p.y + p.speed_y).collect();
            let removed = c.step(&mut rec);
            let gone = before.iter().filter(|y| **y > 200.0).count();
            assert_eq!(removed, gone);
            assert!(c.particles().iter().all(|p| p.y <= 200.0));
        }
    }

    #[test]
    fn no_drawing_after_finish() {
        let mut rng = Pcg64Mcg::seed_from_u64(15);
        let mut c = Celebration::new(&Config::default(), 400.0, 300.0, 0.0);
        let mut rec = Recorder::default();
        run_to_end(&mut c, &mut rng, &mut rec);
        let clears = rec.clears.len();
        let squares = rec.squares.len();
        assert_eq!(c.frame(1e9, &mut rng, &mut rec), FrameStatus::Finished);
        assert_eq!(rec.clears.len(), clears);
        assert_eq!(rec.squares.len(), squares);
    }

    #[test]
    fn first_frame_does_not_finish_before_spawning_completes() {
        let mut rng = Pcg64Mcg::seed_from_u64(16);
        let mut c = Celebration::new(&Config::default(), 400.0, 300.0, 0.0);
        let mut rec = Recorder::default();
        assert_eq!(c.frame(0.0, &mut rng, &mut rec), FrameStatus::Continue);
        assert_eq!(c.particles().len(), 1);
    }

    #[test]
    fn resize_changes_clear_and_cull_bounds() {
        let mut rng = Pcg64Mcg::seed_from_u64(17);
        let mut c = Celebration::new(&Config::default(), 400.0, 1_000.0, 0.0);
        let mut rec = Recorder::default();
        c.spawn_due(1_000.0, &mut rng);
        for _ in 0..5 {
            c.step(&mut rec);
        }
        assert_eq!(c.particles().len(), 150);
        c.resize(640.0, 0.0);
        c.step(&mut rec);
        assert_eq!(rec.clears.last(), Some(&(640.0, 0.0)));
        assert!(c.particles().iter().all(|p| p.y <= 0.0));
        assert!(c.particles().len() < 150);
    }

    #[test]
    fn unchecked_count_does_not_allocate_up_front() {
        let cfg = Config {
            particle_count: usize::MAX,
            ..Config::default()
        };
        let mut rng = Pcg64Mcg::seed_from_u64(19);
        let mut c = Celebration::new(&cfg, 400.0, 300.0, 0.0);
        assert_eq!(c.spawn_due(10.0, &mut rng), 3);
        assert!(!c.is_finished());
    }

    #[test]
    fn draws_every_active_particle_each_step() {
        let mut rng = Pcg64Mcg::seed_from_u64(18);
        let mut c = Celebration::new(&Config::default(), 400.0, 300.0, 0.0);
        let mut rec = Recorder::default();
        c.spawn_due(50.0, &mut rng);
        let n = c.particles().len();
        c.step(&mut rec);
        assert_eq!(rec.squares.len(), n);
        let (x, y, size, rot, color) = &rec.squares[0];
        let p = &c.particles()[0];
        assert_eq!((*x, *y, *size, *rot), (p.x, p.y, p.size, p.rotation));
        assert_eq!(color, &p.color);
    }
}
