use crate::components::{Foliage, ObstacleMarker};
use crate::game_logic::bounds::{
    dodecahedron_faces, ROCK_RADIUS, TRUNK_BOTTOM_RADIUS, TRUNK_HEIGHT, TRUNK_TOP_RADIUS,
};
use crate::game_logic::{CollisionIndex, ObstacleKind};
use crate::plugins::world::{generate_world, FrameSet, LeafClusters};
use bevy::math::primitives::ConicalFrustum;
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};

const LEAF_RADIUS: f32 = 1.5;

pub struct EnvironmentPlugin;

impl Plugin for EnvironmentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_forest.after(generate_world))
            .add_systems(
                Update,
                (
                    toggle_obstacles.in_set(FrameSet::Input),
                    sync_obstacle_visibility.in_set(FrameSet::Sync),
                ),
            );
    }
}

fn spawn_forest(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    index: Res<CollisionIndex>,
    leaves: Res<LeafClusters>,
) {
    let trunk_mesh = meshes.add(ConicalFrustum {
        radius_top: TRUNK_TOP_RADIUS,
        radius_bottom: TRUNK_BOTTOM_RADIUS,
        height: TRUNK_HEIGHT,
    });
    let rock_mesh = meshes.add(dodecahedron_mesh(ROCK_RADIUS));
    let leaf_mesh = meshes.add(Sphere::new(LEAF_RADIUS).mesh().uv(16, 16));

    let trunk_material = materials.add(Color::srgb_u8(0x65, 0x43, 0x21));
    let rock_material = materials.add(Color::srgb_u8(0x55, 0x55, 0x55));
    let leaf_material = materials.add(Color::srgb_u8(0x00, 0x7a, 0x33));

    for (slot, obstacle) in index.obstacles().iter().enumerate() {
        let (mesh, material) = match obstacle.kind {
            ObstacleKind::Tree => (trunk_mesh.clone(), trunk_material.clone()),
            ObstacleKind::Rock => (rock_mesh.clone(), rock_material.clone()),
        };

        commands.spawn((
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::from_translation(obstacle.position).with_scale(obstacle.scale),
            visibility_for(obstacle.visible),
            ObstacleMarker {
                kind: obstacle.kind,
                index: slot,
            },
            Name::new(format!("{:?} {slot}", obstacle.kind)),
        ));
    }

    for &position in &leaves.0 {
        commands.spawn((
            Mesh3d(leaf_mesh.clone()),
            MeshMaterial3d(leaf_material.clone()),
            Transform::from_translation(position),
            Foliage,
        ));
    }

    info!(
        "Spawned {} obstacles and {} leaf clusters",
        index.len(),
        leaves.0.len()
    );
}

/// Flat-shaded rock; each face gets its own five vertices
fn dodecahedron_mesh(radius: f32) -> Mesh {
    let faces = dodecahedron_faces(radius);
    let mut positions = Vec::with_capacity(faces.len() * 5);
    let mut normals = Vec::with_capacity(faces.len() * 5);
    let mut uvs = Vec::with_capacity(faces.len() * 5);
    let mut indices = Vec::with_capacity(faces.len() * 9);

    for (normal, corners) in faces {
        let base = positions.len() as u32;
        for (i, corner) in corners.into_iter().enumerate() {
            let angle = i as f32 * std::f32::consts::TAU / 5.0;
            positions.push(corner.to_array());
            normals.push(normal.to_array());
            uvs.push([0.5 + 0.5 * angle.cos(), 0.5 + 0.5 * angle.sin()]);
        }
        for i in 1..4 {
            indices.extend([base, base + i, base + i + 1]);
        }
    }

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        bevy::render::render_asset::RenderAssetUsages::RENDER_WORLD
            | bevy::render::render_asset::RenderAssetUsages::MAIN_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

fn visibility_for(visible: bool) -> Visibility {
    if visible {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    }
}

/// H flips trees and rocks together. Collision is untouched.
fn toggle_obstacles(keys: Res<ButtonInput<KeyCode>>, mut index: ResMut<CollisionIndex>) {
    if !keys.just_pressed(KeyCode::KeyH) {
        return;
    }

    match index.toggle_visibility() {
        Some(visible) => info!(
            "Trees and rocks are now {}",
            if visible { "visible" } else { "hidden" }
        ),
        None => debug!("No trees to toggle"),
    }
}

fn sync_obstacle_visibility(
    index: Res<CollisionIndex>,
    mut obstacle_query: Query<(&ObstacleMarker, &mut Visibility)>,
) {
    if !index.is_changed() {
        return;
    }

    for (marker, mut visibility) in obstacle_query.iter_mut() {
        if let Some(obstacle) = index.get(marker.index) {
            visibility.set_if_neq(visibility_for(obstacle.visible));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_logic::bounds::ObstacleShape;
    use bevy::render::mesh::MeshAabb;

    #[test]
    fn test_rock_mesh_matches_collision_bounds() {
        let mesh = dodecahedron_mesh(ROCK_RADIUS);
        let Some(aabb) = mesh.compute_aabb() else {
            panic!("rock mesh has no positions");
        };

        let half = Vec3::from(aabb.half_extents);
        assert!((half - ObstacleShape::ROCK.half_extents()).abs().max_element() < 1e-5);
        assert_eq!(mesh.count_vertices(), 60);
        assert_eq!(mesh.indices().map(|indices| indices.len()), Some(108));
    }
}
