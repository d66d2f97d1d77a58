//! Debug domain: serializable snapshot of controller state.

use serde::Serialize;

use crate::movement::{DashPhase, Facing, JumpPhase, MotionController};

#[derive(Debug, Clone, Serialize)]
pub struct MotionSnapshot {
    pub clock: f32,
    pub move_dir_x: f32,
    pub facing: Facing,
    pub horizontal_speed: f32,
    pub velocity: [f32; 2],
    pub grounded: bool,
    pub touching_wall: bool,
    pub jump_phase: JumpPhase,
    pub jump_timer: f32,
    pub charges_used: usize,
    pub charge_index: usize,
    pub jump_buffer: f32,
    pub coyote: f32,
    pub dash_phase: DashPhase,
    pub dash_timer: f32,
    pub anchor: [f32; 2],
}

impl MotionSnapshot {
    pub fn capture(controller: &MotionController) -> Self {
        let state = controller.state();
        let velocity = controller.velocity();
        Self {
            clock: state.clock,
            move_dir_x: state.move_dir_x,
            facing: state.facing,
            horizontal_speed: state.horizontal_speed,
            velocity: [velocity.x, velocity.y],
            grounded: state.grounded,
            touching_wall: state.touching_wall,
            jump_phase: state.jump.phase,
            jump_timer: state.jump.timer,
            charges_used: state.jump.charges_used,
            charge_index: state.jump.charge_index,
            jump_buffer: state.jump_buffer,
            coyote: state.coyote,
            dash_phase: state.dash.phase,
            dash_timer: state.dash.timer,
            anchor: [state.anchor.position.x, state.anchor.position.y],
        }
    }

    /// Multi-line text for the overlay.
    pub fn overlay_text(&self) -> String {
        format!(
            "MoveDirX = {:.2}\nOrient = {:?}\nHorizontal Speed = {:.2}\nVelocity = ({:.2}, {:.2})\nGrounded = {} Wall = {}\nJump = {:?} t={:.2} charges={}\nBuffer = {:.2} Coyote = {:.2}\nDash = {:?} t={:.2}",
            self.move_dir_x,
            self.facing,
            self.horizontal_speed,
            self.velocity[0],
            self.velocity[1],
            self.grounded,
            self.touching_wall,
            self.jump_phase,
            self.jump_timer,
            self.charges_used,
            self.jump_buffer,
            self.coyote,
            self.dash_phase,
            self.dash_timer,
        )
    }
}
