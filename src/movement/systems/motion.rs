//! Movement domain: controller tick systems and output publishing.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{
    Contacts, Facing, FollowAnchor, MotionController, MotionInput, PIXELS_PER_UNIT, Player,
};

/// Frame-rate half of the controller: intent, buffering, jump and dash triggers.
pub(crate) fn tick_frame(
    time: Res<Time>,
    input: Res<MotionInput>,
    mut query: Query<&mut MotionController, With<Player>>,
) {
    let dt = time.delta_secs();
    for mut controller in &mut query {
        controller.frame_tick(&input, dt);
    }
}

/// Fixed-step half of the controller: writes the body velocity and camera anchor.
pub(crate) fn tick_fixed(
    time: Res<Time>,
    mut query: Query<
        (
            &Transform,
            &Contacts,
            &mut MotionController,
            &mut LinearVelocity,
            &mut FollowAnchor,
        ),
        With<Player>,
    >,
) {
    let dt = time.delta_secs();
    for (transform, contacts, mut controller, mut velocity, mut anchor) in &mut query {
        let position = transform.translation.truncate() / PIXELS_PER_UNIT;
        let output = controller.fixed_tick(*contacts, position, dt);

        velocity.0 = output.velocity * PIXELS_PER_UNIT;
        anchor.position = output.anchor * PIXELS_PER_UNIT;
    }
}

/// Flip the visual to match the controller orientation.
pub(crate) fn sync_facing_visual(mut query: Query<(&MotionController, &mut Sprite), With<Player>>) {
    for (controller, mut sprite) in &mut query {
        let flip = controller.facing() == Facing::Left;
        if sprite.flip_x != flip {
            sprite.flip_x = flip;
        }
    }
}
