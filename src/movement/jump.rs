//! Movement domain: multi-charge jump state machine and fall integration.

use serde::Serialize;

use crate::movement::{FallProfile, JumpChargeProfile, TIMER_EPSILON};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum JumpPhase {
    #[default]
    NotJumping,
    /// Sustained upward impulse; vertical speed is pinned to the charge's jump speed.
    Impulsing,
    /// Impulse ended, post-jump gravity applies until landing.
    Falling,
}

/// What allowed a jump to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpSource {
    Ground,
    Coyote,
    Air,
    Buffered,
}

/// Why an impulse ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImpulseEnd {
    /// Max duration reached while still held.
    Forced,
    /// Hold released after the min duration.
    Released,
}

/// Jump phase plus the transient fields that only matter while jumping.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct JumpState {
    pub phase: JumpPhase,
    /// Time spent in the current impulse.
    pub timer: f32,
    pub charges_used: usize,
    /// Index into the charge list for the active jump.
    pub charge_index: usize,
}

impl JumpState {
    pub fn is_jumping(&self) -> bool {
        self.phase != JumpPhase::NotJumping
    }

    pub fn min_duration_reached(&self, charges: &[JumpChargeProfile]) -> bool {
        charges
            .get(self.charge_index)
            .is_some_and(|charge| self.timer + TIMER_EPSILON >= charge.jump_min_duration)
    }

    /// Whether a jump may start now.
    ///
    /// The first charge needs ground contact (or coyote grace); later charges
    /// are air jumps and only need a charge left.
    pub fn can_jump(&self, charges: &[JumpChargeProfile], grounded_or_coyote: bool) -> bool {
        if self.charges_used >= charges.len() {
            return false;
        }
        if self.charges_used == 0 && !grounded_or_coyote {
            return false;
        }
        match self.phase {
            JumpPhase::Impulsing => self.min_duration_reached(charges),
            JumpPhase::NotJumping | JumpPhase::Falling => true,
        }
    }

    /// Enter the impulse with the next charge.
    pub fn started(self) -> Self {
        let charges_used = self.charges_used + 1;
        Self {
            phase: JumpPhase::Impulsing,
            timer: 0.0,
            charges_used,
            charge_index: charges_used - 1,
        }
    }

    /// Advance an impulse by one fixed step.
    /// Returns the next state and, if the impulse ended, why.
    pub fn impulse_step(
        self,
        charge: &JumpChargeProfile,
        held: bool,
        dt: f32,
    ) -> (Self, Option<ImpulseEnd>) {
        if self.phase != JumpPhase::Impulsing {
            return (self, None);
        }

        let timer = self.timer + dt;
        let end = if timer + TIMER_EPSILON >= charge.jump_max_duration {
            Some(ImpulseEnd::Forced)
        } else if !held && timer + TIMER_EPSILON >= charge.jump_min_duration {
            Some(ImpulseEnd::Released)
        } else {
            None
        };

        let phase = if end.is_some() {
            JumpPhase::Falling
        } else {
            JumpPhase::Impulsing
        };
        (Self { phase, timer, ..self }, end)
    }

    /// Cut the impulse short (dash start).
    pub fn interrupted(self) -> Self {
        if self.phase == JumpPhase::Impulsing {
            Self {
                phase: JumpPhase::Falling,
                ..self
            }
        } else {
            self
        }
    }

    /// Ground contact ends the jump and refills every charge.
    pub fn landed(self) -> Self {
        Self::default()
    }
}

/// Accumulate downward speed, clamped to the profile's terminal speed.
pub fn integrate_fall(vertical_speed: f32, profile: &FallProfile, dt: f32) -> f32 {
    (vertical_speed - profile.fall_gravity * dt).max(-profile.fall_speed_max)
}
