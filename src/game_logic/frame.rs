//! One explicit world update per rendered frame.
//!
//! `advance_frame` reads an input snapshot and the current state and produces
//! the next state, so the whole loop can be driven without an engine.

use crate::game_logic::collision::CollisionIndex;
use crate::game_logic::movement::{
    apply_look, forward_vector, proposed_displacement, try_move, MoveOutcome, MovementConfig,
    MovementIntent,
};
use crate::game_logic::pursuit::step_pursuer;
use crate::game_logic::visibility::{probe_target, random_target_position, DwellOutcome, DwellTimer};
use crate::resources::GameSettings;
use bevy::prelude::*;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerState {
    pub position: Vec3,
    pub yaw: f32,
}

/// Everything the frame update owns
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct WorldState {
    pub player: PlayerState,
    pub target_block: Vec3,
    pub dwell: DwellTimer,
    /// `None` until the pursuer model has loaded
    pub pursuer: Option<Vec3>,
}

impl WorldState {
    pub fn new(player_spawn: Vec3, target_block: Vec3) -> Self {
        Self {
            player: PlayerState {
                position: player_spawn,
                yaw: 0.0,
            },
            target_block,
            dwell: DwellTimer::default(),
            pursuer: None,
        }
    }
}

/// Input snapshot for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    pub intent: MovementIntent,
    /// Horizontal pointer motion since the last frame, already filtered by pointer lock
    pub look_delta_x: f32,
    /// Elapsed time in reference frames
    pub frame_scale: f32,
}

/// Tunables the frame update needs
#[derive(Debug, Clone, Copy)]
pub struct FrameConfig {
    pub movement: MovementConfig,
    pub pursuer_speed: f32,
    pub dwell_threshold: u32,
    pub field_half_extent: f32,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self::from(&GameSettings::default())
    }
}

impl From<&GameSettings> for FrameConfig {
    fn from(settings: &GameSettings) -> Self {
        Self {
            movement: MovementConfig {
                walk_speed: settings.walk_speed.get(),
                run_speed: settings.run_speed.get(),
                look_sensitivity: settings.look_sensitivity.get(),
            },
            pursuer_speed: settings.pursuer_speed.get(),
            dwell_threshold: settings.dwell_threshold.get(),
            field_half_extent: settings.field_half_extent.get(),
        }
    }
}

/// Next state plus what happened on the way there
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub state: WorldState,
    pub player_move: MoveOutcome,
    pub dwell: DwellOutcome,
    pub pursuer_move: Option<MoveOutcome>,
}

impl FrameReport {
    pub fn target_relocated(&self) -> bool {
        self.dwell == DwellOutcome::Relocate
    }
}

/// Run one frame: look, move the player, probe the target, then advance the pursuer.
pub fn advance_frame<R: Rng + ?Sized>(
    current: &WorldState,
    input: &FrameInput,
    config: &FrameConfig,
    index: &CollisionIndex,
    rng: &mut R,
) -> FrameReport {
    let mut state = current.clone();

    state.player.yaw = apply_look(
        state.player.yaw,
        input.look_delta_x,
        config.movement.look_sensitivity,
    );

    let displacement = proposed_displacement(
        &input.intent,
        state.player.yaw,
        &config.movement,
        input.frame_scale,
    );
    let (position, player_move) = try_move(state.player.position, displacement, index);
    state.player.position = position;

    let forward = forward_vector(state.player.yaw);
    let hit = probe_target(state.player.position, forward, state.target_block);
    let dwell = state.dwell.observe(hit, config.dwell_threshold);
    if dwell == DwellOutcome::Relocate {
        state.target_block = random_target_position(rng, config.field_half_extent);
    }

    let pursuer_move = match state.pursuer {
        Some(pursuer) => {
            let (next, outcome) = step_pursuer(
                pursuer,
                state.player.position,
                config.pursuer_speed,
                input.frame_scale,
                index,
            );
            state.pursuer = Some(next);
            Some(outcome)
        }
        None => None,
    };

    FrameReport {
        state,
        player_move,
        dwell,
        pursuer_move,
    }
}
