use glam::Vec3;
use rand::Rng;

use crate::{Ball, Config, GameRng, Params};

pub const CUE_BALL: usize = 0;
pub const OBJECT_BALLS: usize = 15;
const ROWS: usize = 5;

/// Cue ball on the head spot followed by fifteen object balls racked in a
/// triangle on the foot spot, apex first.
pub fn rack_balls(config: &Config, rng: &mut GameRng) -> Vec<Ball> {
    let radius = config.ball_radius;
    let mass = config.ball_mass;
    let head_spot = Vec3::new(-config.table_width / 4.0, 0.0, 0.0);
    let foot_spot = Vec3::new(config.table_width / 4.0, 0.0, 0.0);

    let spacing = 2.0 * radius + Params::RACK_GAP * radius;
    let row_spacing = spacing * 3.0_f32.sqrt() / 2.0;
    let jitter = Params::RACK_JITTER * radius;

    let mut balls = Vec::with_capacity(OBJECT_BALLS + 1);
    balls.push(Ball::new(head_spot, radius, mass));

    for row in 0..ROWS {
        for slot in 0..=row {
            let offset = Vec3::new(
                row as f32 * row_spacing + rng.0.gen_range(-jitter..=jitter),
                0.0,
                (slot as f32 - row as f32 / 2.0) * spacing + rng.0.gen_range(-jitter..=jitter),
            );
            balls.push(Ball::new(foot_spot + offset, radius, mass));
        }
    }

    balls
}

/// Send the cue ball at the apex ball with the given speed
pub fn break_shot(balls: &mut [Ball], speed: f32) {
    if balls.len() <= CUE_BALL + 1 || !balls[CUE_BALL].is_free() {
        return;
    }

    let mut aim = balls[CUE_BALL + 1].position() - balls[CUE_BALL].position();
    aim.y = 0.0;
    let direction = aim.normalize_or_zero();
    balls[CUE_BALL].set_velocity(direction * speed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Table;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_rack_has_cue_and_fifteen_balls() {
        let balls = rack_balls(&Config::new(), &mut GameRng::default());
        assert_eq!(balls.len(), OBJECT_BALLS + 1);
        assert!(balls[CUE_BALL].position().x < 0.0, "Cue ball on the head side");
        assert!(balls.iter().all(|b| b.is_free() && !b.is_moving()));
    }

    #[test]
    fn test_racked_balls_do_not_overlap() {
        let config = Config::new();
        let balls = rack_balls(&config, &mut GameRng::new(99));
        for i in 0..balls.len() {
            for j in (i + 1)..balls.len() {
                let distance = balls[i].position().distance(balls[j].position());
                assert!(
                    distance >= 2.0 * config.ball_radius,
                    "Balls {} and {} overlap ({})",
                    i,
                    j,
                    distance
                );
            }
        }
    }

    #[test]
    fn test_rack_fits_on_table() {
        let config = Config::new();
        let table = Table::from_config(&config);
        let balls = rack_balls(&config, &mut GameRng::default());
        for ball in &balls {
            assert!(table.contains(ball.position(), ball.radius()));
        }
    }

    #[test]
    fn test_rack_is_reproducible_per_seed() {
        let config = Config::new();
        let a = rack_balls(&config, &mut GameRng::new(1));
        let b = rack_balls(&config, &mut GameRng::new(1));
        let c = rack_balls(&config, &mut GameRng::new(2));
        assert_eq!(a, b);
        assert_ne!(a, c, "Different seeds should jitter differently");
    }

    #[test]
    fn test_break_shot_aims_at_apex() {
        let mut balls = rack_balls(&Config::new(), &mut GameRng::default());
        break_shot(&mut balls, 5.0);

        let velocity = balls[CUE_BALL].velocity();
        assert_abs_diff_eq!(velocity.length(), 5.0, epsilon = 1e-4);
        let aim = (balls[1].position() - balls[CUE_BALL].position()).normalize();
        assert!(velocity.normalize().dot(aim) > 0.9999);
    }

    #[test]
    fn test_break_shot_without_object_balls() {
        let mut balls = vec![Ball::new(Vec3::ZERO, 0.03, 0.17)];
        break_shot(&mut balls, 5.0);
        assert_eq!(balls[0].velocity(), Vec3::ZERO);
    }
}
