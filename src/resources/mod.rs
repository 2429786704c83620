use crate::config::range_types::*;
use crate::game_logic::movement::MovementIntent;
use bevy::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

#[derive(Resource, Serialize, Deserialize, Clone, Debug, Default, Validate)]
#[serde(default)]
pub struct GameConfig {
    #[validate(nested)]
    pub settings: GameSettings,
}

#[derive(Serialize, Deserialize, Clone, Debug, Validate)]
#[validate(schema(function = "validate_clearing"))]
#[serde(default)]
// NOTE: When adding new fields, remember to update the Default impl below
pub struct GameSettings {
    // Player settings
    pub player_spawn: [f32; 3],
    #[validate(custom(function = "validate_bounded"))]
    pub walk_speed: MovementSpeed,
    #[validate(custom(function = "validate_bounded"))]
    pub run_speed: MovementSpeed,
    #[validate(custom(function = "validate_bounded"))]
    pub look_sensitivity: LookSensitivity,

    // Forest settings
    #[validate(range(min = 1, max = 5000))]
    pub tree_count: u32,
    #[validate(custom(function = "validate_bounded"))]
    pub rock_chance: Probability,
    #[validate(custom(function = "validate_bounded"))]
    pub rock_jitter: Extent,
    #[validate(custom(function = "validate_bounded"))]
    pub field_half_extent: Extent,
    pub clearing_center: [f32; 2],
    #[validate(custom(function = "validate_bounded"))]
    pub clearing_half_extent: Extent,
    #[validate(range(min = 1, max = 1_000_000))]
    pub max_placement_attempts: u32,

    // Target block settings
    #[validate(custom(function = "validate_bounded"))]
    pub dwell_threshold: DwellFrames,

    // Pursuer settings
    #[validate(length(min = 1))]
    pub pursuer_model_path: String,
    pub pursuer_spawn: [f32; 3],
    #[validate(range(min = 0.01, max = 100.0))]
    pub pursuer_scale: f32,
    #[validate(custom(function = "validate_bounded"))]
    pub pursuer_speed: MovementSpeed,

    // Window and visual settings
    pub window_width: f32,
    pub window_height: f32,
    pub ambient_light_brightness: f32,
    pub fog_start: f32,
    pub fog_end: f32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            // Player settings
            player_spawn: [0.0, 1.6, 20.0],
            walk_speed: MovementSpeed::new(0.05),
            run_speed: MovementSpeed::new(0.1),
            look_sensitivity: LookSensitivity::new(0.002),

            // Forest settings
            tree_count: 400,
            rock_chance: Probability::new(0.5),
            rock_jitter: Extent::new(2.5),
            field_half_extent: Extent::new(80.0),
            clearing_center: [0.0, -30.0],
            clearing_half_extent: Extent::new(10.0),
            max_placement_attempts: 10_000,

            // Target block settings
            dwell_threshold: DwellFrames::new(100),

            // Pursuer settings
            pursuer_model_path: "models/Bob.glb".to_string(),
            pursuer_spawn: [0.0, 0.0, 0.0],
            pursuer_scale: 2.0,
            pursuer_speed: MovementSpeed::new(0.02),

            // Window and visual settings
            window_width: 1280.0,
            window_height: 720.0,
            ambient_light_brightness: 80.0,
            fog_start: 10.0,
            fog_end: 200.0,
        }
    }
}

impl GameSettings {
    pub fn player_spawn(&self) -> Vec3 {
        Vec3::from_array(self.player_spawn)
    }

    pub fn pursuer_spawn(&self) -> Vec3 {
        Vec3::from_array(self.pursuer_spawn)
    }

    pub fn clearing_center(&self) -> Vec2 {
        Vec2::from_array(self.clearing_center)
    }
}

fn validate_bounded<T: Bounded>(value: &T) -> Result<(), ValidationError> {
    if value.in_range() {
        Ok(())
    } else {
        Err(ValidationError::new("out_of_range"))
    }
}

/// The clearing may not swallow the whole field, otherwise tree placement can never succeed.
fn validate_clearing(settings: &GameSettings) -> Result<(), ValidationError> {
    let field = settings.field_half_extent.get();
    let clearing = settings.clearing_half_extent.get();
    let center = settings.clearing_center();

    let covers_x = center.x - clearing <= -field && center.x + clearing >= field;
    let covers_z = center.y - clearing <= -field && center.y + clearing >= field;
    if covers_x && covers_z {
        return Err(ValidationError::new("clearing_covers_field"));
    }

    if settings.fog_end <= settings.fog_start {
        return Err(ValidationError::new("fog_range_inverted"));
    }

    Ok(())
}

/// Seeded RNG shared by world generation and target relocation.
#[derive(Resource)]
pub struct ForestRng(pub Pcg64);

impl ForestRng {
    pub fn from_seed(seed: u64) -> Self {
        Self(Pcg64::seed_from_u64(seed))
    }
}

/// Seed chosen at startup, kept so a run can be reproduced.
#[derive(Resource, Debug, Clone, Copy)]
pub struct WorldSeed(pub u64);

/// Input collected since the last frame update. Only the input systems write here.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct PlayerInput {
    pub intent: MovementIntent,
    pub pending_look_x: f32,
    pub pointer_locked: bool,
}
