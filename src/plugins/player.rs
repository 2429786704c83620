use crate::game_logic::movement::MovementIntent;
use crate::plugins::world::FrameSet;
use crate::resources::PlayerInput;
use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (read_movement_keys, manage_pointer_lock, accumulate_look)
                .chain()
                .in_set(FrameSet::Input),
        );
    }
}

fn intent_from_keys(keys: &ButtonInput<KeyCode>) -> MovementIntent {
    MovementIntent {
        forward: keys.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]),
        backward: keys.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]),
        left: keys.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]),
        right: keys.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]),
        running: keys.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]),
    }
}

fn read_movement_keys(keys: Res<ButtonInput<KeyCode>>, mut input: ResMut<PlayerInput>) {
    input.intent = intent_from_keys(&keys);
}

/// Click grabs the pointer, Escape releases it
fn manage_pointer_lock(
    mouse_button: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    mut input: ResMut<PlayerInput>,
) {
    let Ok(mut window) = windows.single_mut() else {
        return;
    };

    if mouse_button.just_pressed(MouseButton::Left) && !input.pointer_locked {
        window.cursor_options.grab_mode = CursorGrabMode::Locked;
        window.cursor_options.visible = false;
        input.pointer_locked = true;
        debug!("Pointer locked");
    } else if keys.just_pressed(KeyCode::Escape) && input.pointer_locked {
        window.cursor_options.grab_mode = CursorGrabMode::None;
        window.cursor_options.visible = true;
        input.pointer_locked = false;
        debug!("Pointer released");
    }
}

fn accumulate_look(motion: Res<AccumulatedMouseMotion>, mut input: ResMut<PlayerInput>) {
    if input.pointer_locked {
        input.pending_look_x += motion.delta.x;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_keys_mirror_wasd() {
        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::ArrowUp);
        keys.press(KeyCode::KeyD);

        let intent = intent_from_keys(&keys);

        assert!(intent.forward);
        assert!(intent.right);
        assert!(!intent.backward);
        assert!(!intent.left);
        assert!(!intent.running);
    }

    #[test]
    fn test_either_shift_runs() {
        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::ShiftRight);

        assert!(intent_from_keys(&keys).running);
    }

    #[test]
    fn test_no_keys_is_idle() {
        let keys = ButtonInput::<KeyCode>::default();

        assert!(intent_from_keys(&keys).is_idle());
    }
}
