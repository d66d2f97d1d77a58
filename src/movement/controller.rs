//! Movement domain: the motion controller.
//!
//! The controller owns all mutable motion state and is driven by two tick
//! sources in a fixed order:
//!
//! 1. [`MotionController::frame_tick`] once per rendered frame (variable dt):
//!    samples intent, decays the jump-buffer and coyote countdowns, starts
//!    jumps and dashes.
//! 2. [`MotionController::fixed_tick`] once per physics step (fixed dt):
//!    consumes the sampled intent and contact facts, runs the horizontal
//!    resolver, the jump and dash machines, and produces a velocity.
//!
//! A frame tick always completes before the next fixed tick reads its output.

use bevy::prelude::*;

use crate::content::ConfigError;
use crate::movement::horizontal::{apply_wall_stop, resolve_horizontal};
use crate::movement::jump::{ImpulseEnd, JumpSource, integrate_fall};
use crate::movement::{
    Contacts, DashEnd, DashState, Facing, FollowAnchor, JumpPhase, JumpState, MotionInput,
    MotionTuning,
};

/// Mutable motion state. Only the controller writes it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MotionState {
    /// Horizontal speed magnitude; the signed velocity is `speed * facing`.
    pub horizontal_speed: f32,
    pub vertical_speed: f32,
    pub facing: Facing,
    pub move_dir_x: f32,
    pub jump_held: bool,
    pub jump: JumpState,
    pub dash: DashState,
    pub jump_buffer: f32,
    pub coyote: f32,
    pub grounded: bool,
    pub touching_wall: bool,
    /// Controller clock, advanced by frame dt. Dash cooldown is measured on it.
    pub clock: f32,
    pub anchor: FollowAnchor,
}

/// What the controller hands to the physics body and the camera each fixed step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionOutput {
    pub velocity: Vec2,
    pub facing: Facing,
    pub anchor: Vec2,
}

#[derive(Component, Debug, Clone)]
pub struct MotionController {
    tuning: MotionTuning,
    state: MotionState,
}

/// Non-finite or negative elapsed time counts as no time.
fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() { dt.max(0.0) } else { 0.0 }
}

fn clamp_intent(move_dir_x: f32) -> f32 {
    if move_dir_x.is_finite() {
        move_dir_x.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

impl MotionController {
    /// Build a controller for a character spawned at `spawn`.
    /// Invalid tuning is refused.
    pub fn new(tuning: MotionTuning, spawn: Vec2) -> Result<Self, Vec<ConfigError>> {
        tuning.validate()?;
        Ok(Self {
            tuning,
            state: MotionState {
                anchor: FollowAnchor::new(spawn),
                ..default()
            },
        })
    }

    pub fn state(&self) -> &MotionState {
        &self.state
    }

    pub fn facing(&self) -> Facing {
        self.state.facing
    }

    pub fn velocity(&self) -> Vec2 {
        let state = &self.state;
        if state.dash.is_active() {
            Vec2::new(state.facing.sign() * self.tuning.dash.speed, 0.0)
        } else {
            Vec2::new(
                state.horizontal_speed * state.facing.sign(),
                state.vertical_speed,
            )
        }
    }

    pub fn output(&self) -> MotionOutput {
        MotionOutput {
            velocity: self.velocity(),
            facing: self.state.facing,
            anchor: self.state.anchor.position,
        }
    }

    // ------------------------------------------------------------------
    // Frame tick
    // ------------------------------------------------------------------

    pub fn frame_tick(&mut self, input: &MotionInput, dt: f32) {
        let dt = sanitize_dt(dt);
        let state = &mut self.state;

        state.clock += dt;
        state.move_dir_x = clamp_intent(input.move_dir_x);
        state.jump_held = input.jump_held;
        state.jump_buffer = (state.jump_buffer - dt).max(0.0);
        state.coyote = (state.coyote - dt).max(0.0);

        if input.dash_pressed {
            self.request_dash();
        }

        // Jump presses are dropped outright while dashing
        if input.jump_pressed && !self.state.dash.is_active() {
            self.request_jump();
        }
    }

    fn grounded_or_coyote(&self) -> bool {
        self.state.grounded || self.state.coyote > 0.0
    }

    pub fn can_jump(&self) -> bool {
        self.state
            .jump
            .can_jump(&self.tuning.jumps, self.grounded_or_coyote())
    }

    fn request_jump(&mut self) {
        if self.can_jump() {
            let source = if self.state.jump.charges_used > 0 {
                JumpSource::Air
            } else if self.state.grounded {
                JumpSource::Ground
            } else {
                JumpSource::Coyote
            };
            self.start_jump(source);
        } else {
            self.state.jump_buffer = self.tuning.jump_buffer_time;
            debug!(
                "Jump buffered: charges_used={}, phase={:?}",
                self.state.jump.charges_used, self.state.jump.phase
            );
        }
    }

    fn start_jump(&mut self, source: JumpSource) {
        let state = &mut self.state;
        state.jump = state.jump.started();
        state.jump_buffer = 0.0;
        state.coyote = 0.0;
        debug!(
            "Jump start: source={:?}, charge={}, charges_used={}/{}",
            source,
            state.jump.charge_index,
            state.jump.charges_used,
            self.tuning.jumps.len()
        );
    }

    fn request_dash(&mut self) {
        let state = &mut self.state;
        if !state.dash.try_start(state.clock, &self.tuning.dash) {
            return;
        }
        state.jump = state.jump.interrupted();
        state.vertical_speed = 0.0;
        debug!(
            "Dash start: facing={:?}, speed={}, duration={}",
            state.facing, self.tuning.dash.speed, self.tuning.dash.duration
        );
    }

    // ------------------------------------------------------------------
    // Fixed tick
    // ------------------------------------------------------------------

    pub fn fixed_tick(&mut self, contacts: Contacts, position: Vec2, dt: f32) -> MotionOutput {
        let dt = sanitize_dt(dt);
        self.sense(contacts);

        if self.state.dash.is_active() {
            self.step_dash(dt);
        } else {
            self.step_horizontal(dt);
            self.step_vertical(dt);
            let state = &mut self.state;
            state.horizontal_speed = apply_wall_stop(
                state.horizontal_speed,
                state.touching_wall,
                state.jump.is_jumping(),
            );
        }

        let state = &mut self.state;
        state
            .anchor
            .publish(position, state.grounded, state.jump.is_jumping());

        self.output()
    }

    fn sense(&mut self, contacts: Contacts) {
        let state = &mut self.state;
        let was_grounded = state.grounded;
        state.grounded = contacts.ground;
        state.touching_wall = contacts.wall;

        // Coyote grace only on the ground -> air edge of a walk-off
        if was_grounded && !state.grounded && !state.jump.is_jumping() {
            state.coyote = self.tuning.coyote_time;
            debug!("Left ground: coyote={}", state.coyote);
        }
    }

    fn step_dash(&mut self, dt: f32) {
        let state = &mut self.state;
        if let Some(end) = state.dash.step(dt, state.touching_wall, state.clock) {
            state.vertical_speed = 0.0;
            match end {
                DashEnd::Timeout => debug!("Dash end: timeout"),
                DashEnd::Wall => debug!("Dash end: wall contact"),
            }
        }
    }

    fn step_horizontal(&mut self, dt: f32) {
        let state = &mut self.state;
        let profile = self.tuning.locomotion(state.grounded);
        let step = resolve_horizontal(
            state.horizontal_speed,
            state.facing,
            state.move_dir_x,
            profile,
            dt,
        );
        state.horizontal_speed = step.speed;
        state.facing = step.facing;
    }

    fn step_vertical(&mut self, dt: f32) {
        match self.state.jump.phase {
            JumpPhase::Impulsing => self.step_impulse(dt),
            JumpPhase::Falling => self.step_jump_fall(dt),
            JumpPhase::NotJumping => self.step_idle_fall(dt),
        }

        if self.state.jump_buffer > 0.0 && self.can_jump() {
            self.start_jump(JumpSource::Buffered);
        }
    }

    fn step_impulse(&mut self, dt: f32) {
        let Some(charge) = self.tuning.jumps.get(self.state.jump.charge_index).copied() else {
            self.state.jump = self.state.jump.interrupted();
            return;
        };

        let state = &mut self.state;
        let (jump, end) = state.jump.impulse_step(&charge, state.jump_held, dt);
        state.jump = jump;

        match end {
            None => state.vertical_speed = charge.jump_speed,
            Some(end) => {
                match end {
                    ImpulseEnd::Forced => debug!("Jump impulse ended: max duration"),
                    ImpulseEnd::Released => debug!("Jump impulse ended: released"),
                }
                self.step_jump_fall(dt);
            }
        }
    }

    fn step_jump_fall(&mut self, dt: f32) {
        let state = &mut self.state;
        if state.grounded {
            state.vertical_speed = 0.0;
            state.jump = state.jump.landed();
            debug!("Landed: charges refilled");
        } else {
            state.vertical_speed = integrate_fall(state.vertical_speed, &self.tuning.jump_fall, dt);
        }
    }

    fn step_idle_fall(&mut self, dt: f32) {
        let state = &mut self.state;
        if state.grounded {
            state.vertical_speed = 0.0;
        } else {
            state.vertical_speed = integrate_fall(state.vertical_speed, &self.tuning.fall, dt);
        }
    }
}
