/// Tuning parameters for the table simulation (SI units)
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Table (9-foot playing surface)
    pub const TABLE_WIDTH: f32 = 2.54;
    pub const TABLE_HEIGHT: f32 = 1.27;
    pub const POCKET_RADIUS: f32 = 0.06;

    // Ball
    pub const BALL_RADIUS: f32 = 0.028575;
    pub const BALL_MASS: f32 = 0.17;

    // Contact
    pub const FRICTION: f32 = 0.6; // fraction of velocity lost per second
    pub const RESTITUTION: f32 = 0.9;
    pub const STOP_SPEED: f32 = 1.0e-3; // below this a ball (or its spin) is at rest

    // Pocket fall animation
    pub const FALL_DURATION: f32 = 0.4; // seconds
    pub const FALL_DEPTH: f32 = 0.1;

    // Rack layout, both relative to ball radius
    pub const RACK_GAP: f32 = 0.02;
    pub const RACK_JITTER: f32 = 0.004;

    // Stepping
    pub const FIXED_DT: f32 = 1.0 / 120.0;
    pub const MAX_DT: f32 = 0.1; // Clamp to prevent large jumps
}
