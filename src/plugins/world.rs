use crate::game_logic::frame::{advance_frame, FrameConfig, FrameInput, WorldState};
use crate::game_logic::movement::{frame_scale, MoveOutcome};
use crate::game_logic::visibility::random_target_position;
use crate::game_logic::{generate_forest, CollisionIndex, ForestConfig, ForestLayout};
use crate::resources::{ForestRng, GameConfig, PlayerInput, WorldSeed};
use bevy::prelude::*;

/// Per-frame ordering: input is gathered, the world advances, then the scene mirrors it
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FrameSet {
    Input,
    Advance,
    Sync,
}

/// Leaf cluster positions produced alongside the obstacle field
#[derive(Resource, Debug, Default)]
pub struct LeafClusters(pub Vec<Vec3>);

pub struct WorldPlugin {
    pub seed: u64,
}

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(WorldSeed(self.seed))
            .insert_resource(ForestRng::from_seed(self.seed))
            .init_resource::<PlayerInput>()
            .configure_sets(
                Update,
                (FrameSet::Input, FrameSet::Advance, FrameSet::Sync).chain(),
            )
            .add_systems(Startup, generate_world)
            .add_systems(Update, advance_world.in_set(FrameSet::Advance));
    }
}

pub fn generate_world(
    mut commands: Commands,
    game_config: Res<GameConfig>,
    seed: Res<WorldSeed>,
    mut rng: ResMut<ForestRng>,
) {
    let settings = &game_config.settings;
    let forest_config = ForestConfig::from(settings);

    let layout = match generate_forest(&forest_config, &mut rng.0) {
        Ok(layout) => layout,
        Err(err) => {
            warn!("Forest generation failed: {err}");
            warn!("Falling back to the default forest layout");
            generate_forest(&ForestConfig::default(), &mut rng.0).unwrap_or_else(|err| {
                error!("Default forest generation failed too: {err}");
                ForestLayout::default()
            })
        }
    };

    info!(
        "Generated forest with seed {}: {} trees, {} rocks, {} leaf clusters",
        seed.0,
        layout.tree_count(),
        layout.rock_count(),
        layout.leaf_clusters.len()
    );

    let target = random_target_position(&mut rng.0, settings.field_half_extent.get());
    debug!("Target block starts at {target}");

    let index: CollisionIndex = layout.obstacles.into_iter().collect();
    commands.insert_resource(index);
    commands.insert_resource(LeafClusters(layout.leaf_clusters));
    commands.insert_resource(WorldState::new(settings.player_spawn(), target));
}

fn advance_world(
    mut world: ResMut<WorldState>,
    mut input: ResMut<PlayerInput>,
    index: Res<CollisionIndex>,
    mut rng: ResMut<ForestRng>,
    game_config: Res<GameConfig>,
    time: Res<Time>,
) {
    let frame_input = FrameInput {
        intent: input.intent,
        look_delta_x: input.pending_look_x,
        frame_scale: frame_scale(time.delta_secs()),
    };
    input.pending_look_x = 0.0;

    let config = FrameConfig::from(&game_config.settings);
    let report = advance_frame(&world, &frame_input, &config, &index, &mut rng.0);

    if let MoveOutcome::Blocked { candidate } = report.player_move {
        debug!("Player move to {candidate} blocked");
    }
    if report.target_relocated() {
        info!(
            "Target block watched for {} frames, moved to {}",
            config.dwell_threshold, report.state.target_block
        );
    }

    *world = report.state;
}
