//! Movement domain: tests for the motion controller and its parts.

use avian2d::prelude::Collider;
use bevy::prelude::*;

use super::{
    Contacts, DashPhase, DashProfile, DashState, Facing, FallProfile, FollowAnchor,
    JumpChargeProfile, JumpPhase, JumpState, LocomotionProfile, MotionController, MotionInput,
    MotionOutput, MotionTuning, SensorError, SensorRig, apply_wall_stop, integrate_fall,
    resolve_horizontal,
};

const DT: f32 = 1.0 / 60.0;

// -----------------------------------------------------------------------------
// Harness
// -----------------------------------------------------------------------------

fn test_tuning() -> MotionTuning {
    MotionTuning {
        ground: LocomotionProfile {
            acceleration: 20.0,
            deceleration: 15.0,
            turn_back_friction: 25.0,
            speed_max: 5.0,
        },
        air: LocomotionProfile {
            acceleration: 12.0,
            deceleration: 6.0,
            turn_back_friction: 18.0,
            speed_max: 5.0,
        },
        jumps: vec![JumpChargeProfile {
            jump_speed: 10.0,
            jump_min_duration: 0.05,
            jump_max_duration: 0.15,
        }],
        fall: FallProfile {
            fall_gravity: 40.0,
            fall_speed_max: 20.0,
        },
        jump_fall: FallProfile {
            fall_gravity: 60.0,
            fall_speed_max: 20.0,
        },
        dash: DashProfile {
            speed: 40.0,
            duration: 0.2,
            cooldown: 2.0,
        },
        coyote_time: 0.1,
        jump_buffer_time: 0.12,
        ..MotionTuning::default()
    }
}

fn double_jump_tuning() -> MotionTuning {
    let mut tuning = test_tuning();
    tuning.jumps.push(JumpChargeProfile {
        jump_speed: 8.0,
        jump_min_duration: 0.05,
        jump_max_duration: 0.1,
    });
    tuning
}

/// Frame tick then fixed tick at the same dt, integrating position.
struct Sim {
    controller: MotionController,
    contacts: Contacts,
    position: Vec2,
}

impl Sim {
    fn airborne(tuning: MotionTuning) -> Self {
        Self {
            controller: MotionController::new(tuning, Vec2::ZERO).unwrap(),
            contacts: Contacts::default(),
            position: Vec2::ZERO,
        }
    }

    fn grounded(tuning: MotionTuning) -> Self {
        let mut sim = Self::airborne(tuning);
        sim.contacts.ground = true;
        sim.step(idle());
        sim
    }

    fn step(&mut self, input: MotionInput) -> MotionOutput {
        self.controller.frame_tick(&input, DT);
        let output = self.controller.fixed_tick(self.contacts, self.position, DT);
        self.position += output.velocity * DT;
        output
    }

    /// Several frame ticks sharing one fixed step, as when the frame rate
    /// outruns the fixed rate.
    fn step_frames(&mut self, frames: &[MotionInput]) -> MotionOutput {
        let frame_dt = DT / frames.len() as f32;
        for input in frames {
            self.controller.frame_tick(input, frame_dt);
        }
        let output = self.controller.fixed_tick(self.contacts, self.position, DT);
        self.position += output.velocity * DT;
        output
    }

    fn run(&mut self, input: MotionInput, ticks: usize) -> MotionOutput {
        let mut output = self.controller.output();
        for _ in 0..ticks {
            output = self.step(input);
        }
        output
    }

    fn jump(&self) -> JumpState {
        self.controller.state().jump
    }

    fn dash(&self) -> DashState {
        self.controller.state().dash
    }
}

fn idle() -> MotionInput {
    MotionInput::default()
}

fn moving(move_dir_x: f32) -> MotionInput {
    MotionInput {
        move_dir_x,
        ..Default::default()
    }
}

fn jump_press() -> MotionInput {
    MotionInput {
        jump_pressed: true,
        jump_held: true,
        ..Default::default()
    }
}

fn jump_hold() -> MotionInput {
    MotionInput {
        jump_held: true,
        ..Default::default()
    }
}

fn dash_press() -> MotionInput {
    MotionInput {
        dash_pressed: true,
        ..Default::default()
    }
}

// -----------------------------------------------------------------------------
// Horizontal motion
// -----------------------------------------------------------------------------

#[test]
fn test_acceleration_clamps_at_speed_max() {
    let mut sim = Sim::grounded(test_tuning());

    sim.run(moving(1.0), 14);
    assert!(sim.controller.state().horizontal_speed < 5.0);

    // 5 / 20 = 0.25s to reach max
    sim.run(moving(1.0), 2);
    assert_eq!(sim.controller.state().horizontal_speed, 5.0);

    let output = sim.run(moving(1.0), 44);
    assert_eq!(sim.controller.state().horizontal_speed, 5.0);
    assert_eq!(output.velocity.x, 5.0);
    assert_eq!(output.facing, Facing::Right);
}

#[test]
fn test_zero_intent_decelerates_to_rest_and_stays() {
    let mut sim = Sim::grounded(test_tuning());
    sim.run(moving(1.0), 20);

    // 5 / 15 s of no intent
    sim.run(idle(), 22);
    assert_eq!(sim.controller.state().horizontal_speed, 0.0);

    let output = sim.run(idle(), 30);
    assert_eq!(sim.controller.state().horizontal_speed, 0.0);
    assert_eq!(output.velocity.x, 0.0);
}

#[test]
fn test_orientation_kept_on_zero_intent() {
    let mut sim = Sim::grounded(test_tuning());
    sim.run(moving(-1.0), 10);
    assert_eq!(sim.controller.facing(), Facing::Left);

    sim.run(idle(), 40);
    assert_eq!(sim.controller.facing(), Facing::Left);
}

#[test]
fn test_turn_back_brakes_before_flipping() {
    let mut sim = Sim::grounded(test_tuning());
    sim.run(moving(1.0), 30);

    // 5 / 25 = 0.2s of turn-back friction
    sim.run(moving(-1.0), 11);
    assert_eq!(sim.controller.facing(), Facing::Right);
    assert!(sim.controller.state().horizontal_speed > 0.0);

    let output = sim.run(moving(-1.0), 2);
    assert_eq!(sim.controller.facing(), Facing::Left);
    assert!(output.velocity.x <= 0.0);

    let output = sim.run(moving(-1.0), 5);
    assert!(output.velocity.x < 0.0);
}

#[test]
fn test_air_profile_used_when_airborne() {
    let mut sim = Sim::airborne(test_tuning());
    sim.step(moving(1.0));
    let expected = 12.0 * DT;
    assert!((sim.controller.state().horizontal_speed - expected).abs() < 1e-6);
}

#[test]
fn test_resolver_flips_in_the_step_speed_reaches_zero() {
    let profile = LocomotionProfile {
        acceleration: 20.0,
        deceleration: 15.0,
        turn_back_friction: 25.0,
        speed_max: 5.0,
    };
    let step = resolve_horizontal(0.1, Facing::Right, -1.0, &profile, 0.1);
    assert_eq!(step.speed, 0.0);
    assert_eq!(step.facing, Facing::Left);

    let step = resolve_horizontal(3.0, Facing::Right, -0.5, &profile, 0.1);
    assert_eq!(step.facing, Facing::Right);
    assert!((step.speed - 0.5).abs() < 1e-6);
}

#[test]
fn test_out_of_range_intent_is_clamped() {
    let mut sim = Sim::grounded(test_tuning());
    sim.step(moving(5.0));
    assert_eq!(sim.controller.state().move_dir_x, 1.0);

    sim.step(moving(f32::NAN));
    assert_eq!(sim.controller.state().move_dir_x, 0.0);
}

#[test]
fn test_wall_stops_horizontal_speed_outside_jump() {
    let mut sim = Sim::grounded(test_tuning());
    sim.contacts.wall = true;

    let output = sim.run(moving(1.0), 5);
    assert_eq!(sim.controller.state().horizontal_speed, 0.0);
    assert_eq!(output.velocity.x, 0.0);
    assert_eq!(output.facing, Facing::Right);
}

#[test]
fn test_wall_does_not_stop_jumping_character() {
    let mut sim = Sim::grounded(test_tuning());
    sim.step(MotionInput {
        move_dir_x: 1.0,
        jump_pressed: true,
        jump_held: true,
        dash_pressed: false,
    });
    sim.contacts.ground = false;
    sim.contacts.wall = true;

    let output = sim.run(
        MotionInput {
            move_dir_x: 1.0,
            jump_held: true,
            ..Default::default()
        },
        3,
    );
    assert!(sim.jump().is_jumping());
    assert!(output.velocity.x > 0.0);
}

#[test]
fn test_apply_wall_stop() {
    assert_eq!(apply_wall_stop(3.0, true, false), 0.0);
    assert_eq!(apply_wall_stop(3.0, true, true), 3.0);
    assert_eq!(apply_wall_stop(3.0, false, false), 3.0);
}

// -----------------------------------------------------------------------------
// Jump state machine
// -----------------------------------------------------------------------------

#[test]
fn test_jump_start_consumes_a_charge() {
    let mut sim = Sim::grounded(double_jump_tuning());
    assert_eq!(sim.jump().phase, JumpPhase::NotJumping);

    sim.step(jump_press());
    let jump = sim.jump();
    assert_eq!(jump.phase, JumpPhase::Impulsing);
    assert_eq!(jump.charges_used, 1);
    assert_eq!(jump.charge_index, 0);
}

#[test]
fn test_held_jump_pins_vertical_speed_until_max_duration() {
    let mut sim = Sim::grounded(test_tuning());

    let output = sim.step(jump_press());
    assert_eq!(output.velocity.y, 10.0);
    sim.contacts.ground = false;

    // elapsed 2/60 .. 8/60, all below 0.15
    for _ in 0..7 {
        let output = sim.step(jump_hold());
        assert_eq!(output.velocity.y, 10.0);
        assert_eq!(sim.jump().phase, JumpPhase::Impulsing);
    }

    // Still held at exactly 9/60 = 0.15s
    let output = sim.step(jump_hold());
    assert_eq!(sim.jump().phase, JumpPhase::Falling);
    assert!(output.velocity.y < 10.0);

    let before = output.velocity.y;
    let output = sim.step(jump_hold());
    assert!((before - output.velocity.y - 60.0 * DT).abs() < 1e-4);
}

#[test]
fn test_early_release_before_min_duration_has_no_effect() {
    let mut sim = Sim::grounded(test_tuning());
    sim.step(jump_press());
    sim.contacts.ground = false;

    let output = sim.step(idle());
    assert_eq!(sim.jump().phase, JumpPhase::Impulsing);
    assert_eq!(output.velocity.y, 10.0);

    // Exactly 3/60 = 0.05s with the button up
    let output = sim.step(idle());
    assert_eq!(sim.jump().phase, JumpPhase::Falling);
    assert!(output.velocity.y < 10.0);
}

#[test]
fn test_release_after_min_duration_ends_impulse() {
    let mut sim = Sim::grounded(test_tuning());
    sim.step(jump_press());
    sim.contacts.ground = false;
    sim.run(jump_hold(), 4);
    assert_eq!(sim.jump().phase, JumpPhase::Impulsing);

    let output = sim.step(idle());
    assert_eq!(sim.jump().phase, JumpPhase::Falling);
    assert!(output.velocity.y < 10.0);
}

#[test]
fn test_air_jump_uses_next_charge_profile() {
    let mut sim = Sim::grounded(double_jump_tuning());
    sim.step(jump_press());
    sim.contacts.ground = false;
    sim.run(jump_hold(), 12);
    assert_eq!(sim.jump().phase, JumpPhase::Falling);

    let output = sim.step(jump_press());
    let jump = sim.jump();
    assert_eq!(jump.phase, JumpPhase::Impulsing);
    assert_eq!(jump.charges_used, 2);
    assert_eq!(jump.charge_index, 1);
    assert_eq!(output.velocity.y, 8.0);
}

#[test]
fn test_charges_never_exceed_max() {
    let mut sim = Sim::grounded(double_jump_tuning());
    sim.step(jump_press());
    sim.contacts.ground = false;
    sim.run(jump_hold(), 12);
    sim.step(jump_press());
    sim.run(jump_hold(), 10);
    assert_eq!(sim.jump().charges_used, 2);

    sim.step(jump_press());
    assert_eq!(sim.jump().charges_used, 2);
    assert_eq!(sim.jump().phase, JumpPhase::Falling);
    assert!(sim.controller.state().jump_buffer > 0.0);
}

#[test]
fn test_press_during_impulse_buffers_until_min_duration() {
    let mut sim = Sim::grounded(double_jump_tuning());
    sim.step(jump_press());
    sim.contacts.ground = false;

    sim.step(jump_press());
    assert_eq!(sim.jump().charges_used, 1);
    assert!(sim.controller.state().jump_buffer > 0.0);

    sim.run(jump_hold(), 3);
    let jump = sim.jump();
    assert_eq!(jump.charges_used, 2);
    assert_eq!(jump.charge_index, 1);
    assert_eq!(sim.controller.state().jump_buffer, 0.0);
}

#[test]
fn test_landing_refills_charges() {
    let mut sim = Sim::grounded(double_jump_tuning());
    sim.step(jump_press());
    sim.contacts.ground = false;
    sim.run(jump_hold(), 12);
    sim.step(jump_press());
    sim.run(idle(), 20);

    sim.contacts.ground = true;
    let output = sim.step(idle());
    let jump = sim.jump();
    assert_eq!(jump.phase, JumpPhase::NotJumping);
    assert_eq!(jump.charges_used, 0);
    assert_eq!(output.velocity.y, 0.0);
}

#[test]
fn test_coyote_jump_behaves_like_ground_jump() {
    let mut sim = Sim::grounded(test_tuning());
    sim.contacts.ground = false;
    sim.step(idle());
    assert!(sim.controller.state().coyote > 0.0);

    let output = sim.step(jump_press());
    let jump = sim.jump();
    assert_eq!(jump.phase, JumpPhase::Impulsing);
    assert_eq!(jump.charges_used, 1);
    assert_eq!(jump.charge_index, 0);
    assert_eq!(output.velocity.y, 10.0);
    assert_eq!(sim.controller.state().coyote, 0.0);
}

#[test]
fn test_coyote_not_reloaded_while_falling() {
    let mut sim = Sim::grounded(test_tuning());
    sim.contacts.ground = false;
    sim.run(idle(), 20);
    assert_eq!(sim.controller.state().coyote, 0.0);
}

#[test]
fn test_late_press_buffers_and_fires_on_landing() {
    let mut sim = Sim::grounded(test_tuning());
    sim.contacts.ground = false;
    sim.run(idle(), 8);
    assert_eq!(sim.controller.state().coyote, 0.0);

    sim.step(jump_press());
    assert_eq!(sim.jump().phase, JumpPhase::NotJumping);
    assert_eq!(sim.jump().charges_used, 0);
    assert!(sim.controller.state().jump_buffer > 0.0);

    sim.contacts.ground = true;
    sim.step(jump_hold());
    let jump = sim.jump();
    assert_eq!(jump.phase, JumpPhase::Impulsing);
    assert_eq!(jump.charges_used, 1);
    assert_eq!(sim.controller.state().jump_buffer, 0.0);
}

#[test]
fn test_buffered_press_expires() {
    let mut sim = Sim::airborne(test_tuning());
    sim.step(jump_press());
    sim.run(idle(), 8);
    assert_eq!(sim.controller.state().jump_buffer, 0.0);

    sim.contacts.ground = true;
    sim.step(idle());
    assert_eq!(sim.jump().phase, JumpPhase::NotJumping);
}

#[test]
fn test_repeated_press_overwrites_buffer() {
    let mut sim = Sim::airborne(test_tuning());
    sim.step(jump_press());
    sim.run(idle(), 3);
    assert!(sim.controller.state().jump_buffer < 0.12);

    sim.step(jump_press());
    assert_eq!(sim.controller.state().jump_buffer, 0.12);
}

#[test]
fn test_fall_speed_clamps_at_terminal() {
    let mut sim = Sim::airborne(test_tuning());
    let output = sim.run(idle(), 120);
    assert_eq!(output.velocity.y, -20.0);
    assert_eq!(integrate_fall(-19.9, &test_tuning().fall, DT), -20.0);
}

#[test]
fn test_can_jump_rules() {
    let charges = double_jump_tuning().jumps;

    let idle = JumpState::default();
    assert!(idle.can_jump(&charges, true));
    assert!(!idle.can_jump(&charges, false));

    let started = idle.started();
    assert!(!started.can_jump(&charges, false));

    let past_min = JumpState {
        timer: 0.06,
        ..started
    };
    assert!(past_min.can_jump(&charges, false));

    let spent = past_min.started();
    assert_eq!(spent.charges_used, 2);
    assert!(!spent.interrupted().can_jump(&charges, true));
}

// -----------------------------------------------------------------------------
// Dash state machine
// -----------------------------------------------------------------------------

#[test]
fn test_dash_overrides_velocity_then_restores_gravity() {
    let mut sim = Sim::airborne(test_tuning());
    sim.run(idle(), 5);

    let output = sim.step(dash_press());
    assert_eq!(sim.dash().phase, DashPhase::Active);
    assert_eq!(output.velocity, Vec2::new(40.0, 0.0));

    // 0.1s into the dash
    let output = sim.run(moving(-1.0), 5);
    assert_eq!(output.velocity, Vec2::new(40.0, 0.0));
    assert_eq!(output.facing, Facing::Right);

    sim.run(idle(), 5);
    assert_eq!(sim.dash().phase, DashPhase::Active);

    // Twelfth fixed step: 12/60 = 0.2s
    let output = sim.step(idle());
    assert_eq!(sim.dash().phase, DashPhase::Idle);
    assert!(sim.dash().last_end.is_some());
    assert_eq!(output.velocity.y, 0.0);

    let output = sim.step(idle());
    assert!(output.velocity.y < 0.0);
}

#[test]
fn test_dash_follows_orientation() {
    let mut sim = Sim::grounded(test_tuning());
    sim.run(moving(-1.0), 3);
    let output = sim.step(dash_press());
    assert_eq!(output.velocity, Vec2::new(-40.0, 0.0));
}

#[test]
fn test_dash_press_while_active_is_noop() {
    let mut sim = Sim::grounded(test_tuning());
    sim.step(dash_press());
    sim.run(idle(), 4);
    let timer_before = sim.dash().timer;

    sim.step(dash_press());
    assert!(sim.dash().timer < timer_before);

    sim.run(idle(), 8);
    assert_eq!(sim.dash().phase, DashPhase::Idle);
}

#[test]
fn test_dash_respects_cooldown() {
    let mut sim = Sim::grounded(test_tuning());
    sim.step(dash_press());
    sim.run(idle(), 13);
    assert_eq!(sim.dash().phase, DashPhase::Idle);

    let output = sim.step(dash_press());
    assert_eq!(sim.dash().phase, DashPhase::Idle);
    assert_eq!(output.velocity.x, 0.0);

    // Cooldown of 2s measured from the dash end
    sim.run(idle(), 125);
    sim.step(dash_press());
    assert_eq!(sim.dash().phase, DashPhase::Active);
}

#[test]
fn test_wall_contact_ends_dash() {
    let mut sim = Sim::grounded(test_tuning());
    sim.step(dash_press());
    sim.run(idle(), 2);

    sim.contacts.wall = true;
    let output = sim.step(idle());
    assert_eq!(sim.dash().phase, DashPhase::Idle);
    assert_eq!(output.velocity, Vec2::ZERO);
}

#[test]
fn test_jump_ignored_while_dashing() {
    let mut sim = Sim::grounded(test_tuning());
    sim.step(dash_press());
    sim.step(jump_press());
    assert_eq!(sim.jump().charges_used, 0);
    assert_eq!(sim.controller.state().jump_buffer, 0.0);
}

#[test]
fn test_dash_cuts_jump_impulse() {
    let mut sim = Sim::grounded(test_tuning());
    sim.step(jump_press());
    sim.contacts.ground = false;
    sim.step(jump_hold());

    let output = sim.step(MotionInput {
        jump_held: true,
        dash_pressed: true,
        ..Default::default()
    });
    assert_eq!(sim.jump().phase, JumpPhase::Falling);
    assert_eq!(output.velocity.y, 0.0);
}

#[test]
fn test_dash_state_ready_checks_cooldown() {
    let profile = DashProfile {
        speed: 40.0,
        duration: 0.2,
        cooldown: 2.0,
    };
    let mut dash = DashState::default();
    assert!(dash.try_start(0.0, &profile));
    assert!(!dash.try_start(0.1, &profile));

    assert_eq!(dash.step(0.3, false, 0.3), Some(super::DashEnd::Timeout));
    assert!(!dash.ready(1.0, &profile));
    assert!(dash.ready(2.5, &profile));
}

// -----------------------------------------------------------------------------
// Follow anchor
// -----------------------------------------------------------------------------

#[test]
fn test_anchor_tracks_ground_position() {
    let mut sim = Sim::grounded(test_tuning());
    sim.run(moving(1.0), 10);

    let position = sim.position;
    let output = sim.step(moving(1.0));
    assert_eq!(output.anchor, position);
}

#[test]
fn test_anchor_holds_y_during_jump() {
    let mut sim = Sim::grounded(test_tuning());
    sim.position = Vec2::new(2.0, 1.0);
    sim.step(idle());

    sim.step(MotionInput {
        move_dir_x: 1.0,
        jump_pressed: true,
        jump_held: true,
        dash_pressed: false,
    });
    sim.contacts.ground = false;
    for _ in 0..10 {
        let position = sim.position;
        let output = sim.step(MotionInput {
            move_dir_x: 1.0,
            jump_held: true,
            ..Default::default()
        });
        assert_eq!(output.anchor.x, position.x);
        assert_eq!(output.anchor.y, 1.0);
    }
    assert!(sim.position.y > 1.0);
}

#[test]
fn test_follow_anchor_publish() {
    let mut anchor = FollowAnchor::new(Vec2::new(0.0, 0.0));
    anchor.publish(Vec2::new(3.0, 4.0), false, false);
    assert_eq!(anchor.position, Vec2::new(3.0, 0.0));
    anchor.publish(Vec2::new(5.0, 6.0), true, true);
    assert_eq!(anchor.position, Vec2::new(5.0, 0.0));
    anchor.publish(Vec2::new(7.0, 8.0), true, false);
    assert_eq!(anchor.position, Vec2::new(7.0, 8.0));
}

// -----------------------------------------------------------------------------
// Construction
// -----------------------------------------------------------------------------

#[test]
fn test_controller_rejects_invalid_tuning() {
    let mut tuning = test_tuning();
    tuning.jumps.clear();
    assert!(MotionController::new(tuning, Vec2::ZERO).is_err());
}

#[test]
fn test_controller_starts_at_rest() {
    let controller = MotionController::new(test_tuning(), Vec2::new(1.0, 2.0)).unwrap();
    let output = controller.output();
    assert_eq!(output.velocity, Vec2::ZERO);
    assert_eq!(output.facing, Facing::Right);
    assert_eq!(output.anchor, Vec2::new(1.0, 2.0));
}

#[test]
fn test_sensor_rig_from_rectangle() {
    let rig = SensorRig::from_collider(&Collider::rectangle(24.0, 48.0), 4.0, 2.0).unwrap();
    assert_eq!(rig.half_extents, Vec2::new(12.0, 24.0));

    let ground = rig.ground_probe(Vec2::new(10.0, 100.0));
    assert_eq!(ground.origin, Vec2::new(10.0, 76.0));
    assert_eq!(ground.direction, Dir2::NEG_Y);
    assert_eq!(ground.max_distance, 4.0);

    let wall = rig.wall_probe(Vec2::ZERO, Facing::Left);
    assert_eq!(wall.direction, Dir2::NEG_X);
    assert_eq!(wall.max_distance, 14.0);
}

#[test]
fn test_sensor_rig_requires_rectangle() {
    let err = SensorRig::from_collider(&Collider::circle(10.0), 4.0, 2.0).unwrap_err();
    assert_eq!(err, SensorError::UnsupportedCollider);

    let err = SensorRig::new(Vec2::ONE, 0.0, 2.0).unwrap_err();
    assert!(matches!(
        err,
        SensorError::InvalidDistance { probe: "ground", .. }
    ));
}

#[test]
fn test_single_jump_height_estimate() {
    let tuning = test_tuning();
    // 10 * 0.15 + 100 / 120
    let expected = 1.5 + 100.0 / 120.0;
    assert!((tuning.single_jump_height() - expected).abs() < 1e-5);
}

// -----------------------------------------------------------------------------
// Exact duration boundaries
// -----------------------------------------------------------------------------

#[test]
fn test_dash_state_ends_on_the_step_reaching_duration() {
    let profile = DashProfile {
        speed: 40.0,
        duration: 0.2,
        cooldown: 2.0,
    };
    let mut dash = DashState::default();
    assert!(dash.try_start(0.0, &profile));

    for tick in 1..12 {
        assert_eq!(dash.step(DT, false, tick as f32 * DT), None);
    }
    assert_eq!(dash.step(DT, false, 0.2), Some(super::DashEnd::Timeout));
    assert_eq!(dash.phase, DashPhase::Idle);
}

#[test]
fn test_impulse_forced_on_the_step_reaching_max_duration() {
    let charge = JumpChargeProfile {
        jump_speed: 10.0,
        jump_min_duration: 0.05,
        jump_max_duration: 0.15,
    };
    let mut jump = JumpState::default().started();
    for _ in 0..8 {
        let (next, end) = jump.impulse_step(&charge, true, DT);
        assert_eq!(end, None);
        jump = next;
    }
    assert_eq!(jump.phase, JumpPhase::Impulsing);

    let (jump, end) = jump.impulse_step(&charge, true, DT);
    assert_eq!(end, Some(super::ImpulseEnd::Forced));
    assert_eq!(jump.phase, JumpPhase::Falling);
}

#[test]
fn test_release_on_the_step_reaching_min_duration() {
    let charge = JumpChargeProfile {
        jump_speed: 10.0,
        jump_min_duration: 0.05,
        jump_max_duration: 0.15,
    };
    let (jump, _) = JumpState::default().started().impulse_step(&charge, true, DT);
    let (jump, end) = jump.impulse_step(&charge, false, DT);
    assert_eq!(end, None);

    let (jump, end) = jump.impulse_step(&charge, false, DT);
    assert_eq!(end, Some(super::ImpulseEnd::Released));
    assert_eq!(jump.phase, JumpPhase::Falling);
}

// -----------------------------------------------------------------------------
// Several frames per fixed step
// -----------------------------------------------------------------------------

#[test]
fn test_coyote_decays_per_frame() {
    let mut sim = Sim::grounded(test_tuning());
    sim.contacts.ground = false;
    sim.step_frames(&[idle(); 4]);
    assert_eq!(sim.controller.state().coyote, 0.1);

    sim.step_frames(&[idle(); 4]);
    let expected = 0.1 - DT;
    assert!((sim.controller.state().coyote - expected).abs() < 1e-6);
}

#[test]
fn test_jump_buffer_decays_per_frame() {
    let mut sim = Sim::airborne(test_tuning());
    sim.step_frames(&[jump_press(), idle(), idle(), idle()]);

    let expected = 0.12 - 3.0 * DT / 4.0;
    assert!((sim.controller.state().jump_buffer - expected).abs() < 1e-6);
    assert_eq!(sim.jump().phase, JumpPhase::NotJumping);
}

#[test]
fn test_tap_within_one_fixed_step_gets_min_impulse() {
    let mut sim = Sim::grounded(test_tuning());

    // Pressed and released before the fixed step runs
    let output = sim.step_frames(&[jump_press(), idle()]);
    assert_eq!(sim.jump().phase, JumpPhase::Impulsing);
    assert_eq!(output.velocity.y, 10.0);
    sim.contacts.ground = false;

    let output = sim.step_frames(&[idle(), idle()]);
    assert_eq!(sim.jump().phase, JumpPhase::Impulsing);
    assert_eq!(output.velocity.y, 10.0);

    sim.step_frames(&[idle(), idle()]);
    assert_eq!(sim.jump().phase, JumpPhase::Falling);
}

#[test]
fn test_second_dash_press_in_same_fixed_step_is_noop() {
    let mut once = Sim::grounded(test_tuning());
    let mut twice = Sim::grounded(test_tuning());

    let single = once.step_frames(&[dash_press(), idle(), idle()]);
    let double = twice.step_frames(&[dash_press(), idle(), dash_press()]);

    assert_eq!(twice.dash().phase, DashPhase::Active);
    assert_eq!(double, single);
    assert_eq!(twice.controller.state(), once.controller.state());
}

// -----------------------------------------------------------------------------
// Test room
// -----------------------------------------------------------------------------

#[test]
fn test_reachable_wall_tops_are_walkable() {
    use super::PIXELS_PER_UNIT;
    use super::dev::{BlockKind, TEST_ROOM};

    let floor_top = TEST_ROOM
        .iter()
        .filter(|(kind, _, _)| *kind == BlockKind::Floor)
        .map(|(_, center, size)| center.y + size.y / 2.0)
        .fold(f32::NEG_INFINITY, f32::max);
    // Highest the feet get with a full ground jump from the floor
    let reach = floor_top + MotionTuning::default().single_jump_height() * PIXELS_PER_UNIT;

    for (kind, center, size) in TEST_ROOM {
        if *kind != BlockKind::Wall {
            continue;
        }
        let top = center.y + size.y / 2.0;
        if top > reach {
            continue;
        }
        let capped = TEST_ROOM.iter().any(|(other, c, s)| {
            *other != BlockKind::Wall
                && (c.y - s.y / 2.0 - top).abs() < 1.0
                && (c.x - center.x).abs() <= s.x / 2.0
        });
        assert!(capped, "wall at {:?} has a bare top within jump reach", center);
    }
}
