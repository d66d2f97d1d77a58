//! Core domain: camera and pause systems.

use bevy::prelude::*;

use crate::core::resources::GameplayPaused;
use crate::movement::{FollowAnchor, Player};

pub(crate) fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Place the camera on the player's follow anchor.
/// Framing and damping belong to a camera profile layer this crate does not carry.
pub(crate) fn follow_anchor(
    anchor_query: Query<&FollowAnchor, With<Player>>,
    mut camera_query: Query<&mut Transform, With<Camera2d>>,
) {
    let Some(anchor) = anchor_query.iter().next() else {
        return;
    };
    for mut transform in &mut camera_query {
        transform.translation.x = anchor.position.x;
        transform.translation.y = anchor.position.y;
    }
}

/// Toggle a user pause with P. Virtual time stops too, which halts fixed steps and physics.
pub(crate) fn toggle_user_pause(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut paused: ResMut<GameplayPaused>,
    mut time: ResMut<Time<Virtual>>,
) {
    if !keyboard.just_pressed(KeyCode::KeyP) {
        return;
    }

    if paused.toggle("user") {
        time.pause();
        info!("Simulation paused");
    } else if !paused.is_paused() {
        time.unpause();
        info!("Simulation resumed");
    }
}
