use glam::Vec3;

use crate::Params;

/// Angular state of a ball.
///
/// Spin is tracked from off-centre impulses but never converted back into
/// linear motion by this crate.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Spin {
    angular_velocity: Vec3, // rad/s
}

impl Spin {
    pub fn from_angular_velocity(angular_velocity: Vec3) -> Self {
        Self { angular_velocity }
    }

    pub fn angular_velocity(&self) -> Vec3 {
        self.angular_velocity
    }

    /// Moment of inertia of a solid sphere
    pub fn moment_of_inertia(mass: f32, radius: f32) -> f32 {
        0.4 * mass * radius * radius
    }

    /// Apply an impulse acting at `lever` from the ball centre
    pub fn apply_impulse(&mut self, lever: Vec3, impulse: Vec3, mass: f32, radius: f32) {
        let inertia = Self::moment_of_inertia(mass, radius);
        self.angular_velocity += lever.cross(impulse) / inertia;
    }

    /// Scale spin by `factor`, snapping to rest once negligible
    pub fn damp(&mut self, factor: f32) {
        self.angular_velocity *= factor.max(0.0);
        if self.angular_velocity.length() < Params::STOP_SPEED {
            self.angular_velocity = Vec3::ZERO;
        }
    }

    pub fn clear(&mut self) {
        self.angular_velocity = Vec3::ZERO;
    }

    pub fn is_spinning(&self) -> bool {
        self.angular_velocity != Vec3::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_central_impulse_adds_no_spin() {
        let mut spin = Spin::default();
        // Lever parallel to impulse
        spin.apply_impulse(Vec3::new(0.05, 0.0, 0.0), Vec3::new(-2.0, 0.0, 0.0), 1.0, 0.05);
        assert!(!spin.is_spinning(), "Head-on impulse should not spin the ball");
    }

    #[test]
    fn test_off_centre_impulse_spins_about_vertical() {
        let mut spin = Spin::default();
        let mass = 1.0;
        let radius = 0.05;
        spin.apply_impulse(Vec3::new(0.0, 0.0, radius), Vec3::new(1.0, 0.0, 0.0), mass, radius);

        // r x J = (0,0,r) x (1,0,0) = (0, r, 0)
        let expected = radius / Spin::moment_of_inertia(mass, radius);
        assert_relative_eq!(spin.angular_velocity().y, expected, epsilon = 1e-3);
        assert_eq!(spin.angular_velocity().x, 0.0);
        assert_eq!(spin.angular_velocity().z, 0.0);
    }

    #[test]
    fn test_impulse_is_additive() {
        let mut once = Spin::default();
        let mut twice = Spin::default();
        let lever = Vec3::new(0.0, 0.0, 0.05);
        let impulse = Vec3::new(0.5, 0.0, 0.0);
        once.apply_impulse(lever, impulse * 2.0, 1.0, 0.05);
        twice.apply_impulse(lever, impulse, 1.0, 0.05);
        twice.apply_impulse(lever, impulse, 1.0, 0.05);
        assert_relative_eq!(
            once.angular_velocity().y,
            twice.angular_velocity().y,
            epsilon = 1e-3
        );
    }

    #[test]
    fn test_damp_snaps_to_rest() {
        let mut spin = Spin::from_angular_velocity(Vec3::new(0.0, 1.0, 0.0));
        spin.damp(0.5);
        assert_relative_eq!(spin.angular_velocity().y, 0.5);
        spin.damp(1.0e-4);
        assert!(!spin.is_spinning(), "Tiny spin should snap to zero");
    }
}
