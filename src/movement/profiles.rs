//! Movement domain: motion profiles injected into the controller at spawn.
//!
//! Profiles are plain data. The controller selects one per tick (ground vs
//! air locomotion, normal vs post-jump fall, jump charge by index) and feeds
//! it to a single resolver function.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::content::{ConfigError, validate_tuning};

/// Horizontal acceleration parameters for one locomotion context.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct LocomotionProfile {
    pub acceleration: f32,
    pub deceleration: f32,
    pub turn_back_friction: f32,
    pub speed_max: f32,
}

impl Default for LocomotionProfile {
    fn default() -> Self {
        Self {
            acceleration: 20.0,
            deceleration: 15.0,
            turn_back_friction: 25.0,
            speed_max: 5.0,
        }
    }
}

/// Parameters for one jump charge. Index 0 is the ground jump.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct JumpChargeProfile {
    pub jump_speed: f32,
    pub jump_min_duration: f32,
    pub jump_max_duration: f32,
}

impl Default for JumpChargeProfile {
    fn default() -> Self {
        Self {
            jump_speed: 10.0,
            jump_min_duration: 0.05,
            jump_max_duration: 0.15,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct FallProfile {
    pub fall_gravity: f32,
    pub fall_speed_max: f32,
}

impl Default for FallProfile {
    fn default() -> Self {
        Self {
            fall_gravity: 40.0,
            fall_speed_max: 20.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct DashProfile {
    pub speed: f32,
    pub duration: f32,
    pub cooldown: f32,
}

impl Default for DashProfile {
    fn default() -> Self {
        Self {
            speed: 40.0,
            duration: 0.2,
            cooldown: 2.0,
        }
    }
}

/// Full motion configuration for one character.
/// Fields missing from a content file fall back to [`MotionTuning::default`].
#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MotionTuning {
    pub ground: LocomotionProfile,
    pub air: LocomotionProfile,
    /// Ordered jump charges (ground jump, then air jumps).
    pub jumps: Vec<JumpChargeProfile>,
    /// Gravity while not jumping (walked off a ledge, knocked down).
    pub fall: FallProfile,
    /// Gravity after a jump impulse has ended.
    pub jump_fall: FallProfile,
    pub dash: DashProfile,
    pub coyote_time: f32,
    pub jump_buffer_time: f32,
    /// Ray length in front of the collider for the wall sensor.
    pub wall_detection_distance: f32,
    /// Ray length below the collider for the ground sensor.
    pub ground_detection_distance: f32,
    /// Fixed step rate in Hz.
    pub fixed_hz: f64,
}

impl Default for MotionTuning {
    fn default() -> Self {
        Self {
            ground: LocomotionProfile::default(),
            air: LocomotionProfile {
                acceleration: 12.0,
                deceleration: 6.0,
                turn_back_friction: 18.0,
                speed_max: 5.0,
            },
            jumps: vec![
                JumpChargeProfile::default(),
                JumpChargeProfile {
                    jump_speed: 8.0,
                    jump_min_duration: 0.05,
                    jump_max_duration: 0.1,
                },
            ],
            fall: FallProfile::default(),
            jump_fall: FallProfile {
                fall_gravity: 60.0,
                fall_speed_max: 20.0,
            },
            dash: DashProfile::default(),
            coyote_time: 0.1,
            jump_buffer_time: 0.12,
            wall_detection_distance: 0.1,
            ground_detection_distance: 0.1,
            fixed_hz: 60.0,
        }
    }
}

impl MotionTuning {
    /// Check every field; reports all violations at once.
    pub fn validate(&self) -> Result<(), Vec<ConfigError>> {
        let errors = validate_tuning(self);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn max_charges(&self) -> usize {
        self.jumps.len()
    }

    pub fn locomotion(&self, grounded: bool) -> &LocomotionProfile {
        if grounded { &self.ground } else { &self.air }
    }

    /// Estimated apex height of a fully held ground jump.
    /// Sustained impulse height plus the ballistic rise under post-jump gravity.
    pub fn single_jump_height(&self) -> f32 {
        let Some(first) = self.jumps.first() else {
            return 0.0;
        };
        let impulse = first.jump_speed * first.jump_max_duration;
        let rise = if self.jump_fall.fall_gravity > 0.0 {
            first.jump_speed * first.jump_speed / (2.0 * self.jump_fall.fall_gravity)
        } else {
            0.0
        };
        impulse + rise
    }

    /// One-line profile summary for logging.
    pub fn summary(&self) -> String {
        format!(
            "ground(max={}, accel={}) air(max={}, accel={}) jumps={} dash(speed={}, dur={}, cd={}) coyote={} buffer={} fixed_hz={}",
            self.ground.speed_max,
            self.ground.acceleration,
            self.air.speed_max,
            self.air.acceleration,
            self.jumps.len(),
            self.dash.speed,
            self.dash.duration,
            self.dash.cooldown,
            self.coyote_time,
            self.jump_buffer_time,
            self.fixed_hz,
        )
    }
}
