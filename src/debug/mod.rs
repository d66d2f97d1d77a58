//! Debug tooling for tuning character motion.
//!
//! Features:
//! - F3: overlay with intent, orientation, speeds, jump and dash state
//! - F4: JSON trace of the controller state every fixed step

mod state;
mod systems;
mod trace;
mod ui;

use bevy::prelude::*;

pub use state::DebugState;
pub use trace::MotionSnapshot;

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>()
            .add_systems(
                Update,
                (
                    systems::handle_debug_hotkeys,
                    systems::update_debug_info_overlay,
                )
                    .chain(),
            )
            .add_systems(FixedPostUpdate, systems::trace_motion);
    }
}
