//! Debug domain: overlay and trace systems.

use bevy::prelude::*;

use crate::debug::state::DebugState;
use crate::debug::trace::MotionSnapshot;
use crate::debug::ui::{DebugInfoOverlay, spawn_debug_info_overlay};
use crate::movement::{MotionController, Player};

/// F3 toggles the overlay, F4 toggles the per-step trace
pub(crate) fn handle_debug_hotkeys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
) {
    if keyboard.just_pressed(KeyCode::F3) {
        debug_state.show_info = !debug_state.show_info;
        info!("[DEBUG] Motion overlay {}", on_off(debug_state.show_info));
    }
    if keyboard.just_pressed(KeyCode::F4) {
        debug_state.trace = !debug_state.trace;
        info!("[DEBUG] Motion trace {}", on_off(debug_state.trace));
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "ON" } else { "OFF" }
}

pub(crate) fn update_debug_info_overlay(
    mut commands: Commands,
    debug_state: Res<DebugState>,
    player_query: Query<&MotionController, With<Player>>,
    mut overlay_query: Query<&mut Text, With<DebugInfoOverlay>>,
    existing_overlay: Query<Entity, With<DebugInfoOverlay>>,
) {
    if !debug_state.show_info {
        // Cleanup overlay if it exists
        for entity in &existing_overlay {
            commands.entity(entity).despawn();
        }
        return;
    }

    // Ensure overlay exists
    if existing_overlay.is_empty() {
        spawn_debug_info_overlay(&mut commands);
        return;
    }

    if let (Some(controller), Ok(mut text)) =
        (player_query.iter().next(), overlay_query.single_mut())
    {
        **text = MotionSnapshot::capture(controller).overlay_text();
    }
}

/// Log one JSON line per fixed step after the controller has run.
pub(crate) fn trace_motion(
    debug_state: Res<DebugState>,
    player_query: Query<&MotionController, With<Player>>,
) {
    if !debug_state.trace {
        return;
    }
    for controller in &player_query {
        match serde_json::to_string(&MotionSnapshot::capture(controller)) {
            Ok(line) => info!(target: "motion_trace", "{}", line),
            Err(e) => warn!("Failed to serialize motion snapshot: {}", e),
        }
    }
}
