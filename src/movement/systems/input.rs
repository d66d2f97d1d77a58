//! Movement domain: input sampling for locomotion.

use bevy::prelude::*;

use crate::movement::MotionInput;

pub(crate) fn read_input(keyboard: Res<ButtonInput<KeyCode>>, mut input: ResMut<MotionInput>) {
    // Horizontal axis; right wins when both are held
    let mut x = 0.0;
    if keyboard.pressed(KeyCode::KeyA)
        || keyboard.pressed(KeyCode::KeyQ)
        || keyboard.pressed(KeyCode::ArrowLeft)
    {
        x = -1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        x = 1.0;
    }

    input.move_dir_x = x;
    input.jump_pressed =
        keyboard.just_pressed(KeyCode::Space) || keyboard.just_pressed(KeyCode::KeyK);
    input.jump_held = keyboard.pressed(KeyCode::Space) || keyboard.pressed(KeyCode::KeyK);
    input.dash_pressed =
        keyboard.just_pressed(KeyCode::ShiftLeft) || keyboard.just_pressed(KeyCode::KeyJ);
}
