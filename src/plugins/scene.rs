use crate::components::*;
use crate::game_logic::frame::WorldState;
use crate::plugins::world::FrameSet;
use crate::resources::GameConfig;
use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

const GROUND_SIZE: f32 = 2000.0;
const CAMERA_FOV_DEGREES: f32 = 75.0;

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::BLACK))
            .add_systems(Startup, (setup_scene, apply_window_settings))
            .add_systems(Update, follow_player.in_set(FrameSet::Sync));
    }
}

fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    game_config: Res<GameConfig>,
) {
    let settings = &game_config.settings;

    // Dirt ground
    commands.spawn((
        Mesh3d(
            meshes.add(
                Plane3d::default()
                    .mesh()
                    .size(GROUND_SIZE, GROUND_SIZE),
            ),
        ),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb_u8(0x4b, 0x2e, 0x1a),
            perceptual_roughness: 1.0,
            ..default()
        })),
        Transform::from_xyz(0.0, 0.0, 0.0),
        Ground,
    ));

    // Dim lantern glow
    commands.spawn((
        PointLight {
            color: Color::srgb_u8(0xff, 0xa5, 0x00),
            intensity: 400_000.0,
            range: 50.0,
            ..default()
        },
        Transform::from_xyz(5.0, 10.0, 5.0),
        SceneLight,
    ));

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: settings.ambient_light_brightness,
        affects_lightmapped_meshes: false,
    });

    let spawn = settings.player_spawn();
    info!(
        "Spawning camera at: ({}, {}, {}), facing -Z",
        spawn.x, spawn.y, spawn.z
    );

    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            near: 0.1,
            far: 1000.0,
            ..default()
        }),
        Transform::from_translation(spawn),
        DistanceFog {
            color: Color::BLACK,
            falloff: FogFalloff::Linear {
                start: settings.fog_start,
                end: settings.fog_end,
            },
            ..default()
        },
        PlayerCamera,
    ));
}

fn apply_window_settings(
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    game_config: Res<GameConfig>,
) {
    if let Ok(mut window) = windows.single_mut() {
        window.resolution.set(
            game_config.settings.window_width,
            game_config.settings.window_height,
        );
    }
}

fn follow_player(
    world: Res<WorldState>,
    mut camera_query: Query<&mut Transform, With<PlayerCamera>>,
) {
    for mut camera_transform in camera_query.iter_mut() {
        camera_transform.translation = world.player.position;
        camera_transform.rotation = Quat::from_rotation_y(world.player.yaw);
    }
}
