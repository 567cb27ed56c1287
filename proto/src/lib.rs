//! Replay protocol for the billiards table
//!
//! Uses postcard for compact binary serialization of table snapshots and shots

use billiards_core::{Ball, BallState, Fall};
use glam::Vec3;
use postcard::{from_bytes, to_allocvec};

// ============================================================================
// Snapshots
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum BallStateSnapshot {
    Free,
    Falling {
        origin: [f32; 3],
        offset: [f32; 3],
        elapsed: f32,
    },
    Pocketed,
}

impl From<BallState> for BallStateSnapshot {
    fn from(state: BallState) -> Self {
        match state {
            BallState::Free => Self::Free,
            BallState::Falling(fall) => Self::Falling {
                origin: fall.origin.to_array(),
                offset: fall.offset.to_array(),
                elapsed: fall.elapsed,
            },
            BallState::Pocketed => Self::Pocketed,
        }
    }
}

impl From<BallStateSnapshot> for BallState {
    fn from(state: BallStateSnapshot) -> Self {
        match state {
            BallStateSnapshot::Free => Self::Free,
            BallStateSnapshot::Falling {
                origin,
                offset,
                elapsed,
            } => Self::Falling(Fall {
                origin: Vec3::from_array(origin),
                offset: Vec3::from_array(offset),
                elapsed,
            }),
            BallStateSnapshot::Pocketed => Self::Pocketed,
        }
    }
}

/// Full state of one ball
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BallSnapshot {
    pub position: [f32; 3],
    pub velocity: [f32; 3],
    pub angular_velocity: [f32; 3],
    pub radius: f32,
    pub mass: f32,
    pub state: BallStateSnapshot,
}

impl From<&Ball> for BallSnapshot {
    fn from(ball: &Ball) -> Self {
        Self {
            position: ball.position().to_array(),
            velocity: ball.velocity().to_array(),
            angular_velocity: ball.angular_velocity().to_array(),
            radius: ball.radius(),
            mass: ball.mass(),
            state: ball.state().into(),
        }
    }
}

impl BallSnapshot {
    pub fn restore(&self) -> Ball {
        Ball::restore(
            Vec3::from_array(self.position),
            Vec3::from_array(self.velocity),
            Vec3::from_array(self.angular_velocity),
            self.radius,
            self.mass,
            self.state.into(),
        )
    }
}

/// Every ball on the table at a given tick
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TableSnapshot {
    pub tick: u32,
    pub balls: Vec<BallSnapshot>,
}

impl TableSnapshot {
    pub fn capture(tick: u32, balls: &[Ball]) -> Self {
        Self {
            tick,
            balls: balls.iter().map(BallSnapshot::from).collect(),
        }
    }

    pub fn restore(&self) -> Vec<Ball> {
        self.balls.iter().map(BallSnapshot::restore).collect()
    }
}

// ============================================================================
// Shots
// ============================================================================

/// Cue strike: an impulse applied to one ball
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Shot {
    pub tick: u32,
    pub ball: u8,
    pub impulse: [f32; 3],
}

impl Shot {
    /// Apply the shot. Returns false if the ball does not exist or is off the table.
    pub fn apply(&self, balls: &mut [Ball]) -> bool {
        match balls.get_mut(self.ball as usize) {
            Some(ball) if ball.is_free() => {
                ball.apply_impulse(Vec3::from_array(self.impulse));
                true
            }
            _ => false,
        }
    }
}

// ============================================================================
// Replay stream
// ============================================================================

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum ReplayMessage {
    /// Keyframe to resume simulation from
    Snapshot(TableSnapshot),

    /// Shot taken at a given tick
    Shot(Shot),
}

impl ReplayMessage {
    /// Serialize replay message to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, postcard::Error> {
        to_allocvec(self)
    }

    /// Deserialize replay message from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, postcard::Error> {
        from_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use billiards_core::*;

    fn setup_table() -> (Physics, Table, Vec<Ball>) {
        let config = Config::new();
        let balls = rack_balls(&config, &mut GameRng::new(3));
        (Physics::from_config(&config), Table::from_config(&config), balls)
    }

    fn run(physics: &Physics, table: &Table, balls: &mut [Ball], frames: u32) {
        let mut time = Time::new(1.0 / 60.0, 0.0);
        let mut events = Events::new();
        for _ in 0..frames {
            step(physics, table, balls, &mut time, &mut events);
        }
    }

    #[test]
    fn test_snapshot_restores_every_ball_state() {
        let mut balls = vec![
            Ball::new(Vec3::new(0.1, 0.0, 0.2), 0.03, 0.17).with_velocity(Vec3::X),
            Ball::new(Vec3::ZERO, 0.03, 0.17),
            Ball::new(Vec3::new(1.2, 0.0, 0.6), 0.03, 0.17),
        ];
        balls[0].apply_angular_impulse(Vec3::new(0.0, 0.0, 0.03), Vec3::new(0.1, 0.0, 0.0));
        balls[1].start_falling(Vec3::new(0.02, 0.0, 0.0));
        balls[1].update(0.1);
        balls[2].start_falling(Vec3::ZERO);
        balls[2].update(1.0);

        let restored = TableSnapshot::capture(7, &balls).restore();
        assert_eq!(restored, balls);
        assert!(restored[1].is_falling());
        assert!(restored[2].is_pocketed());
    }

    #[test]
    fn test_replay_from_snapshot_matches_live_run() {
        let (physics, table, mut live) = setup_table();
        break_shot(&mut live, 6.0);
        run(&physics, &table, &mut live, 30);

        let bytes = ReplayMessage::Snapshot(TableSnapshot::capture(30, &live))
            .to_bytes()
            .expect("Serialization should succeed");
        let mut replayed = match ReplayMessage::from_bytes(&bytes) {
            Ok(ReplayMessage::Snapshot(snapshot)) => {
                assert_eq!(snapshot.tick, 30);
                snapshot.restore()
            }
            other => panic!("Message type mismatch: {:?}", other),
        };

        run(&physics, &table, &mut live, 120);
        run(&physics, &table, &mut replayed, 120);
        assert_eq!(live, replayed, "Replay must continue bit-identically");
    }

    #[test]
    fn test_shot_round_trip_and_apply() {
        let shot = Shot {
            tick: 12,
            ball: 0,
            impulse: [0.85, 0.0, 0.0],
        };
        let bytes = ReplayMessage::Shot(shot).to_bytes().expect("Serialization should succeed");
        let decoded = ReplayMessage::from_bytes(&bytes).expect("Deserialization should succeed");
        assert_eq!(decoded, ReplayMessage::Shot(shot));

        let (_, _, mut balls) = setup_table();
        assert!(shot.apply(&mut balls));
        approx::assert_relative_eq!(balls[0].velocity().x, 0.85 / balls[0].mass());
    }

    #[test]
    fn test_shot_on_missing_or_pocketed_ball_is_rejected() {
        let (_, _, mut balls) = setup_table();
        let missing = Shot {
            tick: 0,
            ball: 200,
            impulse: [1.0, 0.0, 0.0],
        };
        assert!(!missing.apply(&mut balls));

        balls[3].start_falling(Vec3::ZERO);
        let pocketed = Shot {
            tick: 0,
            ball: 3,
            impulse: [1.0, 0.0, 0.0],
        };
        assert!(!pocketed.apply(&mut balls));
        assert_eq!(balls[3].velocity(), Vec3::ZERO);
    }

    #[test]
    fn test_truncated_bytes_fail_to_decode() {
        let ball = Ball::new(Vec3::ZERO, 0.03, 0.17);
        let bytes = ReplayMessage::Snapshot(TableSnapshot::capture(1, &[ball]))
            .to_bytes()
            .expect("Serialization should succeed");
        assert!(ReplayMessage::from_bytes(&bytes[..bytes.len() / 2]).is_err());
    }
}
