//! Core domain: camera collaborator and simulation pause.

mod resources;
mod systems;

use bevy::prelude::*;

pub use resources::*;

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameplayPaused>()
            .add_systems(Startup, systems::setup_camera)
            .add_systems(
                Update,
                (systems::toggle_user_pause, systems::follow_anchor),
            );
    }
}
