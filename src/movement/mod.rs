//! Movement domain: character motion controller and its engine plumbing.
//!
//! The controller itself ([`MotionController`]) is engine-independent state
//! plus two tick functions. Systems here feed it keyboard intent and ray-cast
//! contact facts, and write its output to the rigid body and camera anchor.

mod anchor;
mod bootstrap;
mod controller;
mod dash;
mod dev;
mod horizontal;
mod jump;
mod profiles;
mod sensors;
mod systems;

mod components;
mod resources;

#[cfg(test)]
mod tests;

use bevy::prelude::*;

pub use anchor::*;
pub use bootstrap::{SpawnError, build_motion};
pub use components::*;
pub use controller::*;
pub use dash::*;
pub use horizontal::{HorizontalStep, apply_wall_stop, intent_facing, resolve_horizontal};
pub use jump::{ImpulseEnd, JumpPhase, JumpSource, JumpState, integrate_fall};
pub use profiles::*;
pub use resources::*;
pub use sensors::*;

use crate::core::gameplay_active;

/// World pixels per motion unit. Profiles are authored in units.
pub const PIXELS_PER_UNIT: f32 = 48.0;

/// Slack for duration checks on timers accumulated from f32 steps.
pub const TIMER_EPSILON: f32 = 1e-5;

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MotionInput>()
            .add_systems(Startup, dev::spawn_test_room)
            .add_systems(PostStartup, bootstrap::spawn_player)
            .add_systems(
                Update,
                (systems::read_input, systems::tick_frame)
                    .chain()
                    .run_if(gameplay_active),
            )
            .add_systems(Update, systems::sync_facing_visual)
            .add_systems(
                FixedUpdate,
                (systems::sense_contacts, systems::tick_fixed)
                    .chain()
                    .run_if(gameplay_active),
            );
    }
}
