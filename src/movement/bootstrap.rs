//! Movement domain: player bootstrap from loaded motion tuning.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::content::ConfigError;
use crate::movement::{
    Contacts, FollowAnchor, GameLayer, MotionController, MotionTuning, PIXELS_PER_UNIT, Player,
    SensorError, SensorRig,
};

/// Player collider size in pixels.
const PLAYER_SIZE: Vec2 = Vec2::new(24.0, 48.0);
const PLAYER_SPAWN: Vec2 = Vec2::new(0.0, -100.0);

/// Why the player could not be initialized.
#[derive(Debug)]
pub enum SpawnError {
    Config(Vec<ConfigError>),
    Sensor(SensorError),
}

impl std::fmt::Display for SpawnError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpawnError::Config(errors) => {
                write!(f, "invalid motion tuning:")?;
                for e in errors {
                    write!(f, "\n  - {}", e)?;
                }
                Ok(())
            }
            SpawnError::Sensor(e) => write!(f, "sensor unavailable: {}", e),
        }
    }
}

impl std::error::Error for SpawnError {}

/// Build the controller and sensor rig for a character collider.
pub fn build_motion(
    tuning: &MotionTuning,
    collider: &Collider,
    spawn: Vec2,
) -> Result<(MotionController, SensorRig), SpawnError> {
    let controller = MotionController::new(tuning.clone(), spawn / PIXELS_PER_UNIT)
        .map_err(SpawnError::Config)?;
    let rig = SensorRig::from_collider(
        collider,
        tuning.ground_detection_distance * PIXELS_PER_UNIT,
        tuning.wall_detection_distance * PIXELS_PER_UNIT,
    )
    .map_err(SpawnError::Sensor)?;
    Ok((controller, rig))
}

/// Spawn the player once the motion tuning resource exists.
/// Initialization failures are fatal.
pub(crate) fn spawn_player(
    mut commands: Commands,
    tuning: Option<Res<MotionTuning>>,
    existing_player: Query<Entity, With<Player>>,
    mut app_exit: MessageWriter<AppExit>,
) {
    // Don't spawn if player already exists
    if !existing_player.is_empty() {
        info!("Player already exists, skipping spawn");
        return;
    }

    let Some(tuning) = tuning else {
        warn!("MotionTuning not available, player not spawned");
        return;
    };

    let collider = Collider::rectangle(PLAYER_SIZE.x, PLAYER_SIZE.y);
    let (controller, rig) = match build_motion(&tuning, &collider, PLAYER_SPAWN) {
        Ok(parts) => parts,
        Err(e) => {
            error!("Cannot initialize player: {}", e);
            app_exit.write(AppExit::error());
            return;
        }
    };

    info!(
        "Spawning player at ({}, {}): charges={}, jump_height~{:.2}",
        PLAYER_SPAWN.x,
        PLAYER_SPAWN.y,
        tuning.max_charges(),
        tuning.single_jump_height()
    );

    commands.spawn((
        // Identity & Movement
        (
            Player,
            controller,
            rig,
            Contacts::default(),
            FollowAnchor::new(PLAYER_SPAWN),
        ),
        // Rendering
        Sprite {
            color: Color::srgb(0.9, 0.9, 0.9),
            custom_size: Some(PLAYER_SIZE),
            ..default()
        },
        Transform::from_xyz(PLAYER_SPAWN.x, PLAYER_SPAWN.y, 0.0),
        // Physics
        (
            RigidBody::Dynamic,
            collider,
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            GravityScale(0.0), // The controller integrates gravity itself
            Friction::new(0.0),
            CollisionLayers::new(GameLayer::Player, [GameLayer::Ground, GameLayer::Wall]),
        ),
    ));
}
