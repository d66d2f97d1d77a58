//! Validation for motion tuning loaded from content files.

use crate::movement::{FallProfile, LocomotionProfile, MotionTuning};

/// A configuration value that makes the character impossible to initialize.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The jump list is empty; at least the ground jump is required.
    NoJumpCharges,
    Negative {
        field: String,
        value: f32,
    },
    NonPositive {
        field: String,
        value: f64,
    },
    NotFinite {
        field: String,
    },
    JumpDurationOrder {
        charge: usize,
        min: f32,
        max: f32,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NoJumpCharges => write!(f, "jumps must contain at least one charge"),
            ConfigError::Negative { field, value } => {
                write!(f, "'{}' must be non-negative, got {}", field, value)
            }
            ConfigError::NonPositive { field, value } => {
                write!(f, "'{}' must be greater than zero, got {}", field, value)
            }
            ConfigError::NotFinite { field } => write!(f, "'{}' must be a finite number", field),
            ConfigError::JumpDurationOrder { charge, min, max } => write!(
                f,
                "jumps[{}]: jump_min_duration ({}) exceeds jump_max_duration ({})",
                charge, min, max
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Helper macro for checking a value is finite and non-negative
macro_rules! check_non_negative {
    ($errors:expr, $field:expr, $value:expr) => {{
        let value: f32 = $value;
        if !value.is_finite() {
            $errors.push(ConfigError::NotFinite {
                field: $field.to_string(),
            });
        } else if value < 0.0 {
            $errors.push(ConfigError::Negative {
                field: $field.to_string(),
                value,
            });
        }
    }};
}

fn check_locomotion(errors: &mut Vec<ConfigError>, name: &str, profile: &LocomotionProfile) {
    check_non_negative!(errors, format!("{name}.acceleration"), profile.acceleration);
    check_non_negative!(errors, format!("{name}.deceleration"), profile.deceleration);
    check_non_negative!(
        errors,
        format!("{name}.turn_back_friction"),
        profile.turn_back_friction
    );
    check_non_negative!(errors, format!("{name}.speed_max"), profile.speed_max);
}

fn check_fall(errors: &mut Vec<ConfigError>, name: &str, profile: &FallProfile) {
    check_non_negative!(errors, format!("{name}.fall_gravity"), profile.fall_gravity);
    check_non_negative!(errors, format!("{name}.fall_speed_max"), profile.fall_speed_max);
}

/// Validate every field of the tuning.
/// Returns a list of validation errors, empty if the tuning is usable.
pub fn validate_tuning(tuning: &MotionTuning) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    check_locomotion(&mut errors, "ground", &tuning.ground);
    check_locomotion(&mut errors, "air", &tuning.air);

    if tuning.jumps.is_empty() {
        errors.push(ConfigError::NoJumpCharges);
    }
    for (index, charge) in tuning.jumps.iter().enumerate() {
        check_non_negative!(errors, format!("jumps[{index}].jump_speed"), charge.jump_speed);
        check_non_negative!(
            errors,
            format!("jumps[{index}].jump_min_duration"),
            charge.jump_min_duration
        );
        check_non_negative!(
            errors,
            format!("jumps[{index}].jump_max_duration"),
            charge.jump_max_duration
        );
        if charge.jump_min_duration > charge.jump_max_duration {
            errors.push(ConfigError::JumpDurationOrder {
                charge: index,
                min: charge.jump_min_duration,
                max: charge.jump_max_duration,
            });
        }
    }

    check_fall(&mut errors, "fall", &tuning.fall);
    check_fall(&mut errors, "jump_fall", &tuning.jump_fall);

    check_non_negative!(errors, "dash.speed", tuning.dash.speed);
    check_non_negative!(errors, "dash.duration", tuning.dash.duration);
    check_non_negative!(errors, "dash.cooldown", tuning.dash.cooldown);

    check_non_negative!(errors, "coyote_time", tuning.coyote_time);
    check_non_negative!(errors, "jump_buffer_time", tuning.jump_buffer_time);
    // Probe rays need a real length
    for (field, value) in [
        ("wall_detection_distance", tuning.wall_detection_distance),
        ("ground_detection_distance", tuning.ground_detection_distance),
    ] {
        if !value.is_finite() {
            errors.push(ConfigError::NotFinite {
                field: field.to_string(),
            });
        } else if value <= 0.0 {
            errors.push(ConfigError::NonPositive {
                field: field.to_string(),
                value: f64::from(value),
            });
        }
    }

    if !tuning.fixed_hz.is_finite() || tuning.fixed_hz <= 0.0 {
        errors.push(ConfigError::NonPositive {
            field: "fixed_hz".to_string(),
            value: tuning.fixed_hz,
        });
    }

    errors
}
