//! Movement domain: timed dash state machine.

use serde::Serialize;

use crate::movement::{DashProfile, TIMER_EPSILON};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum DashPhase {
    #[default]
    Idle,
    Active,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashEnd {
    Timeout,
    Wall,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct DashState {
    pub phase: DashPhase,
    /// Remaining dash time while active.
    pub timer: f32,
    /// Controller clock value when the last dash ended.
    pub last_end: Option<f32>,
}

impl DashState {
    pub fn is_active(&self) -> bool {
        self.phase == DashPhase::Active
    }

    pub fn ready(&self, now: f32, profile: &DashProfile) -> bool {
        self.phase == DashPhase::Idle
            && self
                .last_end
                .is_none_or(|ended| now - ended >= profile.cooldown)
    }

    /// Start a dash if idle and off cooldown. Returns whether it started.
    pub fn try_start(&mut self, now: f32, profile: &DashProfile) -> bool {
        if !self.ready(now, profile) {
            return false;
        }
        self.phase = DashPhase::Active;
        self.timer = profile.duration;
        true
    }

    /// Advance an active dash by one fixed step. A wall ends it before the timer.
    pub fn step(&mut self, dt: f32, touching_wall: bool, now: f32) -> Option<DashEnd> {
        if self.phase != DashPhase::Active {
            return None;
        }

        let end = if touching_wall {
            Some(DashEnd::Wall)
        } else {
            self.timer = (self.timer - dt).max(0.0);
            (self.timer <= TIMER_EPSILON).then_some(DashEnd::Timeout)
        };

        if end.is_some() {
            self.phase = DashPhase::Idle;
            self.timer = 0.0;
            self.last_end = Some(now);
        }
        end
    }
}
