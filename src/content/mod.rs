//! Content domain: load-time motion configuration.
//!
//! Tuning is read from `assets/data/motion.ron`, validated, and inserted as
//! the [`MotionTuning`] resource. Any failure here is fatal: the character
//! cannot be initialized from a bad configuration.

mod data;
mod loader;
mod validation;


use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use std::path::Path;

pub use data::*;
pub use loader::*;
pub use validation::*;

/// Location of the motion tuning file, relative to the working directory.
pub const MOTION_FILE: &str = "assets/data/motion.ron";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_motion_content);
    }
}

fn load_motion_content(
    mut commands: Commands,
    mut fixed_time: ResMut<Time<Fixed>>,
    mut app_exit: MessageWriter<AppExit>,
) {
    let tuning = match load_motion_tuning(Path::new(MOTION_FILE)) {
        Ok(tuning) => tuning,
        Err(e) => {
            error!("{}", e);
            app_exit.write(AppExit::error());
            return;
        }
    };

    if let Err(errors) = tuning.validate() {
        for e in &errors {
            error!("Motion tuning invalid: {}", e);
        }
        app_exit.write(AppExit::error());
        return;
    }

    fixed_time.set_timestep_hz(tuning.fixed_hz);
    info!("Motion tuning loaded: {}", tuning.summary());
    commands.insert_resource(tuning);
}
