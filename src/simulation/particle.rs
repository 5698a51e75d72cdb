//! A single node of the particle network

use cgmath::{InnerSpace, Vector2};
use rand::Rng;

use super::config::NetworkSettings;

/// Point mass with a fixed radius and opacity
///
/// Radius and opacity are chosen at creation and never change; position and
/// velocity are mutated in place every frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Vector2<f32>,
    pub velocity: Vector2<f32>,
    pub radius: f32,
    pub opacity: f32,
}

impl Particle {
    pub fn new(position: Vector2<f32>, velocity: Vector2<f32>, radius: f32, opacity: f32) -> Self {
        Self {
            position,
            velocity,
            radius,
            opacity,
        }
    }

    /// Places a particle uniformly inside `bounds` with a small random drift
    pub fn random<R: Rng>(bounds: Vector2<f32>, settings: &NetworkSettings, rng: &mut R) -> Self {
        let spread = settings.initial_speed_spread;
        let opacity_span = settings.max_opacity - settings.min_opacity;

        Self {
            position: Vector2::new(rng.random::<f32>() * bounds.x, rng.random::<f32>() * bounds.y),
            velocity: Vector2::new(
                (rng.random::<f32>() - 0.5) * spread,
                (rng.random::<f32>() - 0.5) * spread,
            ),
            radius: settings.particle_radius,
            opacity: settings.min_opacity + rng.random::<f32>() * opacity_span,
        }
    }

    /// Advances the particle by one frame
    ///
    /// Order matters: move, flip the velocity component whose axis left the
    /// bounds, clamp back inside, then apply friction. The flip is tested
    /// against the moved position, so the clamp is what keeps the particle
    /// inside `[0, bounds]`.
    pub fn step(&mut self, bounds: Vector2<f32>, friction: f32) {
        self.position += self.velocity;

        if self.position.x < 0.0 || self.position.x > bounds.x {
            self.velocity.x = -self.velocity.x;
        }
        if self.position.y < 0.0 || self.position.y > bounds.y {
            self.velocity.y = -self.velocity.y;
        }

        self.position.x = self.position.x.clamp(0.0, bounds.x.max(0.0));
        self.position.y = self.position.y.clamp(0.0, bounds.y.max(0.0));

        self.velocity *= friction;
    }

    /// Pushes the particle away from `pointer` if it lies within `radius`
    ///
    /// The push has constant magnitude regardless of distance. Returns
    /// whether the velocity changed.
    pub fn repel_from(&mut self, pointer: Vector2<f32>, radius: f32, strength: f32) -> bool {
        let delta = pointer - self.position;
        if delta.magnitude() >= radius {
            return false;
        }

        let angle = delta.y.atan2(delta.x);
        self.velocity.x -= angle.cos() * strength;
        self.velocity.y -= angle.sin() * strength;
        true
    }

    pub fn speed(&self) -> f32 {
        self.velocity.magnitude()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn resting(x: f32, y: f32) -> Particle {
        Particle::new(Vector2::new(x, y), Vector2::new(0.0, 0.0), 2.0, 0.5)
    }

    #[test]
    fn test_random_particle_within_ranges() {
        let settings = NetworkSettings::default();
        let bounds = Vector2::new(640.0, 480.0);
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..200 {
            let p = Particle::random(bounds, &settings, &mut rng);
            assert!(p.position.x >= 0.0 && p.position.x <= bounds.x);
            assert!(p.position.y >= 0.0 && p.position.y <= bounds.y);
            assert!(p.velocity.x.abs() <= 0.25 && p.velocity.y.abs() <= 0.25);
            assert!(p.opacity >= 0.3 && p.opacity <= 0.8);
            assert_eq!(p.radius, 2.0);
        }
    }

    #[test]
    fn test_step_bounces_and_clamps() {
        let bounds = Vector2::new(100.0, 100.0);
        let mut p = Particle::new(Vector2::new(99.0, 50.0), Vector2::new(3.0, 0.0), 2.0, 0.5);

        p.step(bounds, 1.0);
        assert_eq!(p.position.x, 100.0);
        assert_eq!(p.velocity.x, -3.0);

        p.step(bounds, 1.0);
        assert_eq!(p.position.x, 97.0);
        assert_eq!(p.velocity.x, -3.0);
    }

    #[test]
    fn test_step_keeps_particles_in_bounds() {
        let bounds = Vector2::new(50.0, 30.0);
        let mut p = Particle::new(Vector2::new(25.0, 15.0), Vector2::new(7.3, -11.9), 2.0, 0.5);

        for _ in 0..500 {
            p.step(bounds, 0.998);
            assert!(p.position.x >= 0.0 && p.position.x <= bounds.x);
            assert!(p.position.y >= 0.0 && p.position.y <= bounds.y);
        }
    }

    #[test]
    fn test_friction_converges() {
        let bounds = Vector2::new(10_000.0, 10_000.0);
        let mut p = Particle::new(Vector2::new(100.0, 100.0), Vector2::new(1.0, 0.0), 2.0, 0.5);

        let mut last = p.speed();
        for _ in 0..4000 {
            p.step(bounds, 0.998);
            assert!(p.speed() < last);
            last = p.speed();
        }
        assert!(last < 0.001);
    }

    #[test]
    fn test_repel_inside_radius_pushes_away() {
        let mut p = resting(150.0, 100.0);
        let changed = p.repel_from(Vector2::new(100.0, 100.0), 100.0, 0.3);

        assert!(changed);
        assert!((p.velocity.x - 0.3).abs() < 1e-6);
        assert!(p.velocity.y.abs() < 1e-6);
    }

    #[test]
    fn test_repel_outside_radius_is_ignored() {
        let mut p = resting(250.0, 100.0);
        assert!(!p.repel_from(Vector2::new(100.0, 100.0), 100.0, 0.3));
        assert_eq!(p.velocity, Vector2::new(0.0, 0.0));
    }

    #[test]
    fn test_repel_at_exact_radius_is_ignored() {
        let mut p = resting(200.0, 100.0);
        assert!(!p.repel_from(Vector2::new(100.0, 100.0), 100.0, 0.3));
    }
}
