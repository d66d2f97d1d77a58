//! Movement domain: ground and wall sensing systems.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{Contacts, GameLayer, MotionController, Player, Probe, SensorRig};

fn probe_hits(spatial_query: &SpatialQuery, probe: Probe, filter: &SpatialQueryFilter) -> bool {
    spatial_query
        .cast_ray(
            probe.origin,
            probe.direction,
            probe.max_distance,
            true,
            filter,
        )
        .is_some()
}

/// Sample ground and wall contact for each player once per fixed step.
pub(crate) fn sense_contacts(
    spatial_query: SpatialQuery,
    mut query: Query<(&Transform, &SensorRig, &MotionController, &mut Contacts), With<Player>>,
) {
    // Only hit level geometry (not the player's own collider)
    let ground_filter = SpatialQueryFilter::from_mask(GameLayer::Ground);
    let wall_filter = SpatialQueryFilter::from_mask(GameLayer::Wall);

    for (transform, rig, controller, mut contacts) in &mut query {
        let center = transform.translation.truncate();

        let sensed = Contacts {
            ground: probe_hits(&spatial_query, rig.ground_probe(center), &ground_filter),
            wall: probe_hits(
                &spatial_query,
                rig.wall_probe(center, controller.facing()),
                &wall_filter,
            ),
        };

        if sensed.wall && !contacts.wall {
            debug!("Wall ahead: facing={:?}", controller.facing());
        }
        *contacts = sensed;
    }
}
