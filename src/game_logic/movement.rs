use crate::game_logic::collision::CollisionIndex;
use bevy::prelude::*;

/// Speeds are tuned per frame at this rate
pub const REFERENCE_FPS: f32 = 60.0;
/// Longest frame we integrate in one step, so a hitch cannot tunnel through a trunk
pub const MAX_FRAME_SCALE: f32 = 4.0;

/// Movement-intent flags set by input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementIntent {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub running: bool,
}

impl MovementIntent {
    pub fn is_idle(&self) -> bool {
        !(self.forward || self.backward || self.left || self.right)
    }
}

/// Per-frame speeds, in world units per reference frame
#[derive(Debug, Clone, Copy)]
pub struct MovementConfig {
    pub walk_speed: f32,
    pub run_speed: f32,
    pub look_sensitivity: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            walk_speed: 0.05,
            run_speed: 0.1,
            look_sensitivity: 0.002,
        }
    }
}

/// Outcome of one movement attempt
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveOutcome {
    Idle,
    Moved { from: Vec3, to: Vec3 },
    Blocked { candidate: Vec3 },
}

impl MoveOutcome {
    pub fn is_blocked(&self) -> bool {
        matches!(self, MoveOutcome::Blocked { .. })
    }
}

/// Convert elapsed seconds into reference frames, clamped to `[0, MAX_FRAME_SCALE]`
pub fn frame_scale(delta_seconds: f32) -> f32 {
    if !delta_seconds.is_finite() {
        return 0.0;
    }
    (delta_seconds * REFERENCE_FPS).clamp(0.0, MAX_FRAME_SCALE)
}

/// Horizon-locked forward vector; yaw zero looks down -Z
pub fn forward_vector(yaw: f32) -> Vec3 {
    Quat::from_rotation_y(yaw) * Vec3::NEG_Z
}

/// Horizon-locked right vector; yaw zero points along +X
pub fn right_vector(yaw: f32) -> Vec3 {
    Quat::from_rotation_y(yaw) * Vec3::X
}

/// Pointer motion to the right turns the view right
pub fn apply_look(yaw: f32, pointer_delta_x: f32, sensitivity: f32) -> f32 {
    yaw - pointer_delta_x * sensitivity
}

/// Sum of the active intents scaled by the current speed.
///
/// Intents add without normalization, so a diagonal covers more ground than a
/// straight line.
///
/// ```
/// use darkwood::game_logic::movement::{proposed_displacement, MovementConfig, MovementIntent};
///
/// let intent = MovementIntent { forward: true, ..Default::default() };
/// let step = proposed_displacement(&intent, 0.0, &MovementConfig::default(), 1.0);
/// assert!((step.z + 0.05).abs() < 1e-6);
/// ```
pub fn proposed_displacement(
    intent: &MovementIntent,
    yaw: f32,
    config: &MovementConfig,
    frame_scale: f32,
) -> Vec3 {
    let forward = forward_vector(yaw);
    let right = right_vector(yaw);
    let speed = if intent.running {
        config.run_speed
    } else {
        config.walk_speed
    } * frame_scale;

    let mut displacement = Vec3::ZERO;
    if intent.forward {
        displacement += forward * speed;
    }
    if intent.backward {
        displacement += forward * -speed;
    }
    if intent.left {
        displacement += right * -speed;
    }
    if intent.right {
        displacement += right * speed;
    }
    displacement
}

/// Apply a displacement unless the destination lies inside an obstacle.
/// A blocked move is discarded whole; there is no sliding.
pub fn try_move(position: Vec3, displacement: Vec3, index: &CollisionIndex) -> (Vec3, MoveOutcome) {
    if displacement == Vec3::ZERO {
        return (position, MoveOutcome::Idle);
    }

    let candidate = position + displacement;
    if index.would_collide(candidate) {
        return (position, MoveOutcome::Blocked { candidate });
    }

    (
        candidate,
        MoveOutcome::Moved {
            from: position,
            to: candidate,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_logic::forest::ForestObstacle;
    use std::f32::consts::FRAC_PI_2;

    fn approx_eq(a: Vec3, b: Vec3) -> bool {
        a.abs_diff_eq(b, 1e-5)
    }

    #[test]
    fn test_forward_and_right_vectors() {
        assert!(approx_eq(forward_vector(0.0), Vec3::NEG_Z));
        assert!(approx_eq(right_vector(0.0), Vec3::X));

        // A quarter turn to the left faces -X
        assert!(approx_eq(forward_vector(FRAC_PI_2), Vec3::NEG_X));
        assert!(approx_eq(right_vector(FRAC_PI_2), Vec3::NEG_Z));
    }

    #[test]
    fn test_look_has_no_clamp() {
        let mut yaw = 0.0;
        for _ in 0..10 {
            yaw = apply_look(yaw, -1000.0, 0.002);
        }
        assert!((yaw - 20.0).abs() < 1e-4);
        assert!(approx_eq(forward_vector(yaw), forward_vector(yaw - std::f32::consts::TAU)));
    }

    #[test]
    fn test_walk_and_run_speeds() {
        let config = MovementConfig::default();
        let walk = MovementIntent {
            forward: true,
            ..Default::default()
        };
        let run = MovementIntent {
            running: true,
            ..walk
        };

        assert!(approx_eq(
            proposed_displacement(&walk, 0.0, &config, 1.0),
            Vec3::new(0.0, 0.0, -0.05)
        ));
        assert!(approx_eq(
            proposed_displacement(&run, 0.0, &config, 1.0),
            Vec3::new(0.0, 0.0, -0.1)
        ));
    }

    #[test]
    fn test_diagonal_is_not_normalized() {
        let config = MovementConfig::default();
        let intent = MovementIntent {
            forward: true,
            right: true,
            ..Default::default()
        };

        let step = proposed_displacement(&intent, 0.0, &config, 1.0);
        assert!(approx_eq(step, Vec3::new(0.05, 0.0, -0.05)));
        assert!(step.length() > config.walk_speed);
    }

    #[test]
    fn test_opposing_intents_cancel() {
        let config = MovementConfig::default();
        let intent = MovementIntent {
            forward: true,
            backward: true,
            ..Default::default()
        };

        assert!(approx_eq(
            proposed_displacement(&intent, 1.0, &config, 1.0),
            Vec3::ZERO
        ));
    }

    #[test]
    fn test_frame_scale_clamps() {
        assert_eq!(frame_scale(1.0 / 60.0), 1.0);
        assert_eq!(frame_scale(0.0), 0.0);
        assert_eq!(frame_scale(2.0), MAX_FRAME_SCALE);
        assert_eq!(frame_scale(-1.0), 0.0);
        assert_eq!(frame_scale(f32::NAN), 0.0);
    }

    #[test]
    fn test_blocked_move_leaves_position_exactly() {
        let index: CollisionIndex = [ForestObstacle::tree(0.0, 0.0)].into_iter().collect();
        let start = Vec3::new(0.0, 1.6, 0.55);

        let (position, outcome) = try_move(start, Vec3::new(0.0, 0.0, -0.1), &index);

        assert_eq!(position, start);
        assert!(outcome.is_blocked());
    }

    #[test]
    fn test_free_move_applies_full_displacement() {
        let index: CollisionIndex = [ForestObstacle::tree(0.0, 0.0)].into_iter().collect();
        let start = Vec3::new(5.0, 1.6, 5.0);
        let displacement = Vec3::new(0.07, 0.0, -0.07);

        let (position, outcome) = try_move(start, displacement, &index);

        assert_eq!(position, start + displacement);
        assert_eq!(
            outcome,
            MoveOutcome::Moved {
                from: start,
                to: start + displacement
            }
        );
    }

    #[test]
    fn test_idle_move() {
        let index = CollisionIndex::new();
        let (position, outcome) = try_move(Vec3::ONE, Vec3::ZERO, &index);

        assert_eq!(position, Vec3::ONE);
        assert_eq!(outcome, MoveOutcome::Idle);
    }
}
