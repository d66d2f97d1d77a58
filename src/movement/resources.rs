//! Movement domain: per-frame input intent.

use bevy::prelude::*;

/// Abstract intent sampled once per frame.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct MotionInput {
    /// Horizontal intent in [-1, 1]; values outside are clamped by the controller.
    pub move_dir_x: f32,
    pub jump_pressed: bool,
    pub jump_held: bool,
    pub dash_pressed: bool,
}
