use crate::components::TargetBlock;
use crate::game_logic::bounds::TARGET_BLOCK_SIZE;
use crate::game_logic::frame::WorldState;
use crate::plugins::world::{generate_world, FrameSet};
use bevy::prelude::*;

pub struct TargetPlugin;

impl Plugin for TargetPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_target_block.after(generate_world))
            .add_systems(Update, sync_target_block.in_set(FrameSet::Sync));
    }
}

fn spawn_target_block(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    world: Res<WorldState>,
) {
    let purple = Color::srgb_u8(0xa5, 0x00, 0xff);

    commands.spawn((
        Mesh3d(meshes.add(Cuboid::from_size(TARGET_BLOCK_SIZE))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: purple,
            // Glows through the fog
            emissive: purple.to_linear() * 2.0,
            ..default()
        })),
        Transform::from_translation(world.target_block),
        TargetBlock,
        Name::new("Target Block"),
    ));
}

fn sync_target_block(
    world: Res<WorldState>,
    mut target_query: Query<&mut Transform, With<TargetBlock>>,
) {
    if !world.is_changed() {
        return;
    }

    for mut transform in target_query.iter_mut() {
        if transform.translation != world.target_block {
            debug!("Target block moved to {}", world.target_block);
            transform.translation = world.target_block;
        }
    }
}
