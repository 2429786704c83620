use crate::components::Pursuer;
use crate::game_logic::errors::DarkwoodError;
use crate::game_logic::frame::WorldState;
use crate::game_logic::pursuit::facing_yaw;
use crate::plugins::world::{generate_world, FrameSet};
use crate::resources::GameConfig;
use bevy::asset::RecursiveDependencyLoadState;
use bevy::gltf::Gltf;
use bevy::prelude::*;
use std::path::PathBuf;

pub struct PursuerPlugin;

impl Plugin for PursuerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, request_pursuer_model.after(generate_world))
            .add_systems(
                Update,
                (
                    poll_pursuer_model.in_set(FrameSet::Input),
                    sync_pursuer.in_set(FrameSet::Sync),
                ),
            );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PursuerStatus {
    Pending,
    Ready,
    /// The pursuer never appears; the rest of the game carries on
    Failed,
}

/// Tracks the single asynchronous model load
#[derive(Resource, Debug)]
pub struct PursuerAsset {
    pub path: PathBuf,
    pub handle: Handle<Gltf>,
    pub status: PursuerStatus,
}

/// Load progress of the model and everything it depends on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadProgress {
    Loading,
    Loaded,
    Failed(String),
}

impl From<&RecursiveDependencyLoadState> for LoadProgress {
    fn from(state: &RecursiveDependencyLoadState) -> Self {
        match state {
            RecursiveDependencyLoadState::NotLoaded | RecursiveDependencyLoadState::Loading => {
                LoadProgress::Loading
            }
            RecursiveDependencyLoadState::Loaded => LoadProgress::Loaded,
            RecursiveDependencyLoadState::Failed(err) => LoadProgress::Failed(err.to_string()),
        }
    }
}

/// What the poll should do this frame
#[derive(Debug, Clone, PartialEq)]
pub enum LoadResolution {
    Wait,
    Spawn(Handle<Scene>),
    Fail(String),
}

/// Decide the next step of the model load. Only a pending load is ever resolved,
/// so a failure is reported once and never retried.
pub fn resolve_load(
    status: PursuerStatus,
    progress: &LoadProgress,
    scene: Option<Handle<Scene>>,
) -> LoadResolution {
    if status != PursuerStatus::Pending {
        return LoadResolution::Wait;
    }

    match progress {
        LoadProgress::Loading => LoadResolution::Wait,
        LoadProgress::Loaded => match scene {
            Some(scene) => LoadResolution::Spawn(scene),
            None => LoadResolution::Fail("model contains no scenes".to_string()),
        },
        LoadProgress::Failed(reason) => LoadResolution::Fail(reason.clone()),
    }
}

fn request_pursuer_model(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    game_config: Res<GameConfig>,
) {
    let path = PathBuf::from(&game_config.settings.pursuer_model_path);
    info!("Loading pursuer model from {}", path.display());

    let handle = asset_server.load::<Gltf>(path.clone());
    commands.insert_resource(PursuerAsset {
        path,
        handle,
        status: PursuerStatus::Pending,
    });
}

fn first_scene(gltf: &Gltf) -> Option<Handle<Scene>> {
    gltf.default_scene
        .clone()
        .or_else(|| gltf.scenes.first().cloned())
}

fn poll_pursuer_model(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    gltfs: Res<Assets<Gltf>>,
    game_config: Res<GameConfig>,
    pursuer_asset: Option<ResMut<PursuerAsset>>,
    mut world: ResMut<WorldState>,
) {
    let Some(mut pursuer_asset) = pursuer_asset else {
        return;
    };
    if pursuer_asset.status != PursuerStatus::Pending {
        return;
    }

    let progress = LoadProgress::from(
        &asset_server.recursive_dependency_load_state(pursuer_asset.handle.id()),
    );
    let scene = gltfs.get(&pursuer_asset.handle).and_then(first_scene);

    match resolve_load(pursuer_asset.status, &progress, scene) {
        LoadResolution::Wait => {}
        LoadResolution::Spawn(scene) => {
            let settings = &game_config.settings;
            let spawn = settings.pursuer_spawn();

            commands.spawn((
                SceneRoot(scene),
                Transform::from_translation(spawn).with_scale(Vec3::splat(settings.pursuer_scale)),
                Pursuer,
                Name::new("Pursuer"),
            ));
            world.pursuer = Some(spawn);
            pursuer_asset.status = PursuerStatus::Ready;
            info!("Pursuer spawned at {spawn}");
        }
        LoadResolution::Fail(reason) => {
            let err = DarkwoodError::AssetLoadFailed {
                path: pursuer_asset.path.clone(),
                reason,
            };
            error!("{err}");
            warn!("Continuing without a pursuer");
            pursuer_asset.status = PursuerStatus::Failed;
        }
    }
}

fn sync_pursuer(
    world: Res<WorldState>,
    mut pursuer_query: Query<&mut Transform, With<Pursuer>>,
) {
    let Some(position) = world.pursuer else {
        return;
    };

    for mut transform in pursuer_query.iter_mut() {
        transform.translation = position;
        if let Some(yaw) = facing_yaw(position, world.player.position) {
            transform.rotation = Quat::from_rotation_y(yaw);
        }
    }
}
