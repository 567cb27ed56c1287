use glam::Vec3;

use crate::{Ball, Config, Physics};

/// A pocket opening on the table rim
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pocket {
    pub center: Vec3,
    pub radius: f32,
}

impl Pocket {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// Playing surface centred on the origin, long axis along X
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub width: f32,  // Extent along X
    pub height: f32, // Extent along Z
    pub pockets: Vec<Pocket>,
}

impl Table {
    /// Table with the usual six pockets: four corners and the middle of each long rail
    pub fn new(width: f32, height: f32, pocket_radius: f32) -> Self {
        let half_w = width / 2.0;
        let half_h = height / 2.0;
        let pockets = [
            Vec3::new(-half_w, 0.0, -half_h),
            Vec3::new(0.0, 0.0, -half_h),
            Vec3::new(half_w, 0.0, -half_h),
            Vec3::new(-half_w, 0.0, half_h),
            Vec3::new(0.0, 0.0, half_h),
            Vec3::new(half_w, 0.0, half_h),
        ]
        .into_iter()
        .map(|center| Pocket::new(center, pocket_radius))
        .collect();

        Self {
            width,
            height,
            pockets,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.table_width, config.table_height, config.pocket_radius)
    }

    /// True if a ball of `radius` centred at `position` lies fully on the surface
    pub fn contains(&self, position: Vec3, radius: f32) -> bool {
        position.x.abs() <= self.width / 2.0 - radius
            && position.z.abs() <= self.height / 2.0 - radius
    }

    /// Run the pocket test for every (ball, pocket) pair.
    /// Returns the indices of balls that started falling.
    pub fn check_pockets(&self, physics: &Physics, balls: &mut [Ball]) -> Vec<usize> {
        let mut entered = Vec::new();
        for (index, ball) in balls.iter_mut().enumerate() {
            for pocket in &self.pockets {
                if physics.check_pocket_collision(ball, pocket.center, pocket.radius) {
                    entered.push(index);
                }
            }
        }
        entered
    }
}
