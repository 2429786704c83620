use crate::game_logic::forest::ObstacleKind;
use bevy::prelude::*;

/// First-person camera; its transform mirrors the player state
#[derive(Component)]
pub struct PlayerCamera;

/// Tree trunk or rock. `index` is its slot in the collision index.
#[derive(Component, Debug, Clone, Copy)]
pub struct ObstacleMarker {
    pub kind: ObstacleKind,
    pub index: usize,
}

/// Leaf cluster; purely decorative
#[derive(Component)]
pub struct Foliage;

/// The glowing block that moves once it has been watched long enough
#[derive(Component)]
pub struct TargetBlock;

/// Root of the loaded pursuer model
#[derive(Component)]
pub struct Pursuer;

#[derive(Component)]
pub struct Ground;

#[derive(Component)]
pub struct SceneLight;
