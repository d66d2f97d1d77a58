//! Movement domain: ground and wall sensor geometry.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::Facing;

/// Contact facts sampled once per fixed step.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contacts {
    pub ground: bool,
    /// Wall directly ahead in the facing direction.
    pub wall: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SensorError {
    /// Probes are placed from box half extents; other shapes have none.
    UnsupportedCollider,
    InvalidDistance { probe: &'static str, value: f32 },
}

impl std::fmt::Display for SensorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SensorError::UnsupportedCollider => {
                write!(f, "sensor rig requires a rectangle collider")
            }
            SensorError::InvalidDistance { probe, value } => {
                write!(f, "{} probe distance must be finite and > 0, got {}", probe, value)
            }
        }
    }
}

impl std::error::Error for SensorError {}

/// Ray probes derived from the character collider. Distances are in world units.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct SensorRig {
    pub half_extents: Vec2,
    pub ground_distance: f32,
    pub wall_distance: f32,
}

/// A ray cast request: origin, direction, max distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Probe {
    pub origin: Vec2,
    pub direction: Dir2,
    pub max_distance: f32,
}

impl SensorRig {
    pub fn new(
        half_extents: Vec2,
        ground_distance: f32,
        wall_distance: f32,
    ) -> Result<Self, SensorError> {
        for (probe, value) in [("ground", ground_distance), ("wall", wall_distance)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(SensorError::InvalidDistance { probe, value });
            }
        }
        Ok(Self {
            half_extents,
            ground_distance,
            wall_distance,
        })
    }

    pub fn from_collider(
        collider: &Collider,
        ground_distance: f32,
        wall_distance: f32,
    ) -> Result<Self, SensorError> {
        let cuboid = collider
            .shape_scaled()
            .as_cuboid()
            .ok_or(SensorError::UnsupportedCollider)?;
        let half_extents = Vec2::new(cuboid.half_extents.x, cuboid.half_extents.y);
        Self::new(half_extents, ground_distance, wall_distance)
    }

    /// Short ray downward from the feet.
    pub fn ground_probe(&self, center: Vec2) -> Probe {
        Probe {
            origin: center - Vec2::new(0.0, self.half_extents.y),
            direction: Dir2::NEG_Y,
            max_distance: self.ground_distance,
        }
    }

    /// Ray from the center toward the facing side, reaching just past the collider edge.
    pub fn wall_probe(&self, center: Vec2, facing: Facing) -> Probe {
        Probe {
            origin: center,
            direction: facing.direction(),
            max_distance: self.half_extents.x + self.wall_distance,
        }
    }
}
