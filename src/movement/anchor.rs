//! Movement domain: camera follow anchor published by the controller.

use bevy::prelude::*;

/// Point the camera follows.
///
/// X tracks the character every fixed step. Y only tracks while the
/// character stands on ground outside a jump, so the camera does not bob.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct FollowAnchor {
    pub position: Vec2,
}

impl FollowAnchor {
    pub fn new(position: Vec2) -> Self {
        Self { position }
    }

    pub fn publish(&mut self, position: Vec2, grounded: bool, jumping: bool) {
        self.position.x = position.x;
        if grounded && !jumping {
            self.position.y = position.y;
        }
    }
}
