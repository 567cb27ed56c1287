use glam::Vec3;

use crate::{Params, Spin};

/// Progress of a ball dropping into a pocket
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fall {
    pub origin: Vec3, // Position when the pocket was entered
    pub offset: Vec3, // From origin to the pocket centre
    pub elapsed: f32, // Seconds since the fall started
}

impl Fall {
    fn new(origin: Vec3, offset: Vec3) -> Self {
        Self {
            origin,
            offset,
            elapsed: 0.0,
        }
    }

    /// Fraction of the fall completed, in [0, 1]
    pub fn progress(&self) -> f32 {
        (self.elapsed / Params::FALL_DURATION).clamp(0.0, 1.0)
    }

    fn position(&self) -> Vec3 {
        let t = self.progress();
        Vec3::new(
            self.origin.x + self.offset.x * t,
            self.origin.y - Params::FALL_DEPTH * t * t,
            self.origin.z + self.offset.z * t,
        )
    }
}

/// Lifecycle of a ball. Transitions only run Free -> Falling -> Pocketed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BallState {
    Free,
    Falling(Fall),
    Pocketed,
}

/// A ball on the table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    position: Vec3,
    velocity: Vec3,
    spin: Spin,
    radius: f32,
    mass: f32,
    state: BallState,
}

impl Ball {
    pub fn new(position: Vec3, radius: f32, mass: f32) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            spin: Spin::default(),
            radius,
            mass,
            state: BallState::Free,
        }
    }

    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Rebuild a ball from previously captured state (replays, snapshots)
    pub fn restore(
        position: Vec3,
        velocity: Vec3,
        angular_velocity: Vec3,
        radius: f32,
        mass: f32,
        state: BallState,
    ) -> Self {
        Self {
            position,
            velocity,
            spin: Spin::from_angular_velocity(angular_velocity),
            radius,
            mass,
            state,
        }
    }

    /// Advance the ball by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        match self.state {
            BallState::Free => {
                self.position += self.velocity * dt;
            }
            BallState::Falling(mut fall) => {
                fall.elapsed += dt;
                self.position = fall.position();
                if fall.progress() >= 1.0 {
                    log::debug!("Ball at {:?} pocketed", self.position);
                    self.state = BallState::Pocketed;
                } else {
                    self.state = BallState::Falling(fall);
                }
            }
            BallState::Pocketed => {}
        }
    }

    /// Slow a free ball down. Never reverses direction and stops the ball
    /// outright once it drops below `Params::STOP_SPEED`.
    pub fn apply_friction(&mut self, coefficient: f32, dt: f32) {
        if !self.is_free() {
            return;
        }

        let factor = (1.0 - coefficient * dt).max(0.0);
        self.velocity *= factor;
        if self.velocity.length() < Params::STOP_SPEED {
            self.velocity = Vec3::ZERO;
        }
        self.spin.damp(factor);
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn spin(&self) -> &Spin {
        &self.spin
    }

    pub fn angular_velocity(&self) -> Vec3 {
        self.spin.angular_velocity()
    }

    pub fn state(&self) -> BallState {
        self.state
    }

    /// Instantaneous change in linear velocity: dv = impulse / mass
    pub fn apply_impulse(&mut self, impulse: Vec3) {
        self.velocity += impulse / self.mass;
    }

    /// Record the rotational effect of `impulse` acting at a world-space point
    pub fn apply_angular_impulse(&mut self, contact_point: Vec3, impulse: Vec3) {
        let lever = contact_point - self.position;
        self.spin.apply_impulse(lever, impulse, self.mass, self.radius);
    }

    /// Commit the ball to a pocket. `direction` runs from the ball to the pocket centre.
    pub fn start_falling(&mut self, direction: Vec3) {
        if !self.is_free() {
            return;
        }

        self.velocity = Vec3::ZERO;
        self.spin.clear();
        self.state = BallState::Falling(Fall::new(self.position, direction));
    }

    pub fn is_free(&self) -> bool {
        matches!(self.state, BallState::Free)
    }

    pub fn is_falling(&self) -> bool {
        matches!(self.state, BallState::Falling(_))
    }

    pub fn is_pocketed(&self) -> bool {
        matches!(self.state, BallState::Pocketed)
    }

    /// True while the ball still has something to animate
    pub fn is_moving(&self) -> bool {
        match self.state {
            BallState::Free => self.velocity != Vec3::ZERO,
            BallState::Falling(_) => true,
            BallState::Pocketed => false,
        }
    }
}
