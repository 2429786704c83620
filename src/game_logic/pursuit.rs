use crate::game_logic::collision::CollisionIndex;
use crate::game_logic::movement::{try_move, MoveOutcome};
use bevy::prelude::*;

/// Advance the pursuer straight at the player by `speed * frame_scale`.
///
/// The direction is the full 3D offset, so a pursuer standing on the ground
/// also rises toward eye height. A blocked step is dropped and the pursuer
/// waits; there is no steering around obstacles.
pub fn step_pursuer(
    pursuer: Vec3,
    player: Vec3,
    speed: f32,
    frame_scale: f32,
    index: &CollisionIndex,
) -> (Vec3, MoveOutcome) {
    let direction = (player - pursuer).normalize_or_zero();
    try_move(pursuer, direction * speed * frame_scale, index)
}

/// Yaw that turns a model to face `target` on the horizontal plane
pub fn facing_yaw(from: Vec3, target: Vec3) -> Option<f32> {
    let offset = Vec2::new(target.x - from.x, target.z - from.z);
    if offset.length_squared() <= f32::EPSILON {
        return None;
    }
    Some(offset.x.atan2(offset.y))
}
