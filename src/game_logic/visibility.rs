//! Line-of-sight probe against the target block and the dwell timer it drives

use crate::game_logic::bounds::{ray_box_distance, TARGET_BLOCK_SIZE};
use crate::game_logic::forest::sample_field_coordinate;
use bevy::math::bounding::Aabb3d;
use bevy::prelude::*;
use rand::Rng;

/// What the dwell timer decided this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DwellOutcome {
    /// Target not in view
    Idle,
    /// Target in view, count is the consecutive frames so far
    Watching(u32),
    /// Threshold reached; the target must move
    Relocate,
}

/// Consecutive frames the target has been looked at
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DwellTimer {
    pub frames: u32,
    pub observed: bool,
}

impl DwellTimer {
    /// Feed one frame's probe result.
    ///
    /// ```
    /// use darkwood::game_logic::visibility::{DwellOutcome, DwellTimer};
    ///
    /// let mut timer = DwellTimer::default();
    /// assert_eq!(timer.observe(true, 2), DwellOutcome::Watching(1));
    /// assert_eq!(timer.observe(true, 2), DwellOutcome::Relocate);
    /// assert_eq!(timer, DwellTimer::default());
    /// ```
    pub fn observe(&mut self, hit: bool, threshold: u32) -> DwellOutcome {
        if !hit {
            *self = Self::default();
            return DwellOutcome::Idle;
        }

        if !self.observed {
            self.observed = true;
            self.frames = 0;
        }
        self.frames += 1;

        if self.frames >= threshold {
            *self = Self::default();
            return DwellOutcome::Relocate;
        }

        DwellOutcome::Watching(self.frames)
    }
}

/// Bounds of the target block centred at `position`
pub fn target_bounds(position: Vec3) -> Aabb3d {
    Aabb3d::new(position, TARGET_BLOCK_SIZE * 0.5)
}

/// True if a ray from the eye along `forward` touches the target block
pub fn probe_target(eye: Vec3, forward: Vec3, target: Vec3) -> bool {
    ray_box_distance(eye, forward, &target_bounds(target)).is_some()
}

/// Uniform position inside the play area, resting on the ground
pub fn random_target_position<R: Rng + ?Sized>(rng: &mut R, field_half_extent: f32) -> Vec3 {
    let x = sample_field_coordinate(rng, field_half_extent);
    let z = sample_field_coordinate(rng, field_half_extent);
    Vec3::new(x, TARGET_BLOCK_SIZE.y * 0.5, z)
}
