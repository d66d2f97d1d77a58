//! Debug domain: state for motion debug tooling.

use bevy::prelude::*;

/// Resource tracking debug tooling state
#[derive(Resource, Debug, Default)]
pub struct DebugState {
    /// Whether the motion overlay is visible
    pub show_info: bool,
    /// Whether a JSON trace line is logged every fixed step
    pub trace: bool,
}
