//! Core domain: shared resources for simulation flow.

use bevy::prelude::*;
use std::collections::HashSet;

/// Resource tracking if gameplay should be paused.
/// Gameplay is paused if any source is active.
#[derive(Resource, Debug, Default)]
pub struct GameplayPaused {
    pub sources: HashSet<String>,
}

impl GameplayPaused {
    pub fn is_paused(&self) -> bool {
        !self.sources.is_empty()
    }

    /// Flip one source; returns whether it is now pausing.
    pub fn toggle(&mut self, source: impl Into<String>) -> bool {
        let source = source.into();
        if self.sources.remove(&source) {
            false
        } else {
            self.sources.insert(source);
            true
        }
    }
}

/// Run condition: returns true only when gameplay is not paused
pub fn gameplay_active(paused: Res<GameplayPaused>) -> bool {
    !paused.is_paused()
}
