use glam::Vec3;

use crate::{Ball, Config, Events, Params};

/// Table physics: integration, cushions, ball contacts, friction and pocket entry.
///
/// Holds configuration only. Balls are owned by the caller and lent to the
/// engine for the duration of each call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Physics {
    table_width: f32,
    table_height: f32,
    friction: f32,
    restitution: f32,
}

impl Physics {
    /// Dimensions must be positive and friction non-negative; not checked here
    /// (see `Config::validate`).
    pub fn new(table_width: f32, table_height: f32, friction: f32) -> Self {
        Self {
            table_width,
            table_height,
            friction,
            restitution: Params::RESTITUTION,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.table_width, config.table_height, config.friction)
            .with_restitution(config.restitution)
    }

    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution;
        self
    }

    pub fn table_width(&self) -> f32 {
        self.table_width
    }

    pub fn table_height(&self) -> f32 {
        self.table_height
    }

    pub fn friction(&self) -> f32 {
        self.friction
    }

    pub fn restitution(&self) -> f32 {
        self.restitution
    }

    /// Advance every ball by `dt` seconds
    pub fn update(&self, balls: &mut [Ball], dt: f32) {
        let mut events = Events::new();
        self.update_with_events(balls, dt, &mut events);
    }

    /// Same as `update`, recording cushion and ball contacts in `events`
    pub fn update_with_events(&self, balls: &mut [Ball], dt: f32, events: &mut Events) {
        // 1. Integrate, bounce off cushions, then slow down
        for ball in balls.iter_mut() {
            ball.update(dt);

            if self.handle_wall_collisions(ball) {
                events.ball_hit_wall = true;
            }

            ball.apply_friction(self.friction, dt);
        }

        // 2. One all-pairs pass on the integrated positions
        for i in 0..balls.len() {
            let (head, tail) = balls.split_at_mut(i + 1);
            let ball_a = &mut head[i];
            for ball_b in tail.iter_mut() {
                if self.handle_ball_collision(ball_a, ball_b) {
                    events.ball_hit_ball = true;
                }
            }
        }

        // 3. Contact correction may have pushed a ball into a cushion
        for i in 0..balls.len() {
            if !self.contain(&mut balls[i]) {
                continue;
            }
            events.ball_hit_wall = true;

            // The cushion holds the clamped ball; its partners take the leftover overlap
            let pinned = balls[i];
            for (j, other) in balls.iter_mut().enumerate() {
                if j != i && Self::push_clear_of(&pinned, other) {
                    self.contain(other);
                }
            }
        }
    }

    /// Start the ball falling if its centre is inside the pocket.
    /// Returns true only on the frame the ball enters the pocket.
    pub fn check_pocket_collision(
        &self,
        ball: &mut Ball,
        pocket_pos: Vec3,
        pocket_radius: f32,
    ) -> bool {
        if !ball.is_free() {
            return false;
        }

        let distance = ball.position().distance(pocket_pos);
        if distance < pocket_radius {
            let direction = pocket_pos - ball.position();
            log::debug!(
                "Ball at {:?} entered pocket at {:?} (distance {:.4})",
                ball.position(),
                pocket_pos,
                distance
            );
            ball.start_falling(direction);
            return true;
        }
        false
    }

    /// Clamp a ball back onto the playing surface. Returns true if it touched a cushion.
    fn handle_wall_collisions(&self, ball: &mut Ball) -> bool {
        if !ball.is_free() {
            return false;
        }

        let mut position = ball.position();
        let mut velocity = ball.velocity();
        let radius = ball.radius();

        let left = -self.table_width / 2.0 + radius;
        let right = self.table_width / 2.0 - radius;
        let bottom = -self.table_height / 2.0 + radius;
        let top = self.table_height / 2.0 - radius;

        let mut changed = false;

        if position.x < left {
            position.x = left;
            velocity.x = -velocity.x;
            changed = true;
        } else if position.x > right {
            position.x = right;
            velocity.x = -velocity.x;
            changed = true;
        }

        if position.z < bottom {
            position.z = bottom;
            velocity.z = -velocity.z;
            changed = true;
        } else if position.z > top {
            position.z = top;
            velocity.z = -velocity.z;
            changed = true;
        }

        if changed {
            ball.set_position(position);
            ball.set_velocity(velocity);
        }
        changed
    }

    /// Pull a ball back inside the cushions without bouncing it twice: only a
    /// velocity component still heading into the cushion is reflected.
    fn contain(&self, ball: &mut Ball) -> bool {
        if !ball.is_free() {
            return false;
        }

        let radius = ball.radius();
        let half_x = self.table_width / 2.0 - radius;
        let half_z = self.table_height / 2.0 - radius;
        let mut position = ball.position();
        let mut velocity = ball.velocity();
        let mut changed = false;

        // Half extents go negative on a table narrower than the ball
        if position.x > half_x {
            position.x = half_x;
            velocity.x = -velocity.x.abs();
            changed = true;
        } else if position.x < -half_x {
            position.x = -half_x;
            velocity.x = velocity.x.abs();
            changed = true;
        }

        if position.z > half_z {
            position.z = half_z;
            velocity.z = -velocity.z.abs();
            changed = true;
        } else if position.z < -half_z {
            position.z = -half_z;
            velocity.z = velocity.z.abs();
            changed = true;
        }

        if changed {
            ball.set_position(position);
            ball.set_velocity(velocity);
        }
        changed
    }

    /// Move `other` straight out of `fixed`. Returns true if it had to move.
    fn push_clear_of(fixed: &Ball, other: &mut Ball) -> bool {
        if !fixed.is_free() || !other.is_free() {
            return false;
        }

        let delta = other.position() - fixed.position();
        let distance = delta.length();
        let penetration = fixed.radius() + other.radius() - distance;
        if penetration <= 0.0 || distance <= 0.0 {
            return false;
        }

        other.set_position(other.position() + delta / distance * penetration);
        true
    }

    /// Separate an overlapping pair and exchange momentum along the contact normal.
    /// Returns true if the balls were in contact.
    fn handle_ball_collision(&self, ball_a: &mut Ball, ball_b: &mut Ball) -> bool {
        if !ball_a.is_free() || !ball_b.is_free() {
            return false;
        }

        let delta = ball_b.position() - ball_a.position();
        let distance = delta.length();
        let penetration = ball_a.radius() + ball_b.radius() - distance;

        if penetration <= 0.0 {
            return false;
        }
        if distance <= 0.0 {
            // Coincident centres have no normal; left unresolved this frame
            log::trace!("Skipping coincident balls at {:?}", ball_a.position());
            return false;
        }

        let normal = delta / distance;
        let mass_a = ball_a.mass();
        let mass_b = ball_b.mass();
        let total_mass = mass_a + mass_b;

        // Push apart by the full overlap; the heavier ball moves less
        ball_a.set_position(ball_a.position() - normal * penetration * (mass_b / total_mass));
        ball_b.set_position(ball_b.position() + normal * penetration * (mass_a / total_mass));

        let relative_velocity = ball_b.velocity() - ball_a.velocity();
        let velocity_along_normal = relative_velocity.dot(normal);

        // Already separating
        if velocity_along_normal > 0.0 {
            return true;
        }

        let impulse_magnitude =
            -(1.0 + self.restitution) * velocity_along_normal / (1.0 / mass_a + 1.0 / mass_b);
        let impulse = normal * impulse_magnitude;

        ball_a.apply_impulse(-impulse);
        ball_b.apply_impulse(impulse);

        let contact_a = ball_a.position() + normal * ball_a.radius();
        let contact_b = ball_b.position() - normal * ball_b.radius();
        ball_a.apply_angular_impulse(contact_a, -impulse);
        ball_b.apply_angular_impulse(contact_b, impulse);

        true
    }
}
