pub mod ball;
pub mod config;
pub mod params;
pub mod physics;
pub mod rack;
pub mod resources;
pub mod spin;
pub mod table;

pub use ball::*;
pub use config::*;
pub use params::*;
pub use physics::*;
pub use rack::{break_shot, rack_balls};
pub use resources::*;
pub use spin::*;
pub use table::*;

/// Run the deterministic table simulation for one frame
pub fn step(
    physics: &Physics,
    table: &Table,
    balls: &mut [Ball],
    time: &mut Time,
    events: &mut Events,
) {
    // Clamp dt to prevent large jumps
    let clamped_dt = time.dt.min(Params::MAX_DT);

    // Events accumulate over the whole frame
    events.clear();

    // Fixed micro-steps for stable physics
    let mut remaining_dt = clamped_dt;
    while remaining_dt > 0.0 {
        let step_dt = remaining_dt.min(Params::FIXED_DT);
        remaining_dt -= step_dt;

        // 1. Move, cushion, friction, ball contacts
        physics.update_with_events(balls, step_dt, events);

        // 2. Pocket entry
        let entered = table.check_pockets(physics, balls);
        events.pocketed.extend(entered);
    }

    // Update time
    time.now += clamped_dt;
}

/// True once nothing on the table is moving or dropping into a pocket
pub fn is_settled(balls: &[Ball]) -> bool {
    balls.iter().all(|ball| !ball.is_moving())
}
