//! Movement domain: horizontal speed resolution (turn-back, accelerate, decelerate).

use crate::movement::{Facing, LocomotionProfile};

/// Result of one horizontal resolver step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalStep {
    pub speed: f32,
    pub facing: Facing,
}

/// Sign of an intent value, `None` for zero.
pub fn intent_facing(move_dir_x: f32) -> Option<Facing> {
    if move_dir_x > 0.0 {
        Some(Facing::Right)
    } else if move_dir_x < 0.0 {
        Some(Facing::Left)
    } else {
        None
    }
}

/// Advance horizontal speed by one fixed step using the active profile.
///
/// `speed` is a magnitude; the signed velocity is `speed * facing.sign()`.
pub fn resolve_horizontal(
    speed: f32,
    facing: Facing,
    move_dir_x: f32,
    profile: &LocomotionProfile,
    dt: f32,
) -> HorizontalStep {
    let Some(wanted) = intent_facing(move_dir_x) else {
        // No intent: bleed speed, keep facing
        return HorizontalStep {
            speed: (speed - profile.deceleration * dt).max(0.0),
            facing,
        };
    };

    if wanted != facing {
        let speed = (speed - profile.turn_back_friction * dt).max(0.0);
        let facing = if speed <= 0.0 { wanted } else { facing };
        return HorizontalStep { speed, facing };
    }

    HorizontalStep {
        speed: (speed + profile.acceleration * dt).min(profile.speed_max),
        facing: wanted,
    }
}

/// Wall-stop rule: pushing into a wall outside of a jump kills horizontal speed.
pub fn apply_wall_stop(speed: f32, touching_wall: bool, jumping: bool) -> f32 {
    if touching_wall && !jumping { 0.0 } else { speed }
}
