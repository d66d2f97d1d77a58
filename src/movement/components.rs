//! Movement domain: components and physics layers for locomotion.

use avian2d::prelude::*;
use bevy::prelude::*;
use serde::Serialize;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Ground surfaces (floors, platforms)
    Ground,
    /// Wall surfaces
    Wall,
    /// Player character
    Player,
}

#[derive(Component, Debug)]
pub struct Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    pub fn direction(self) -> Dir2 {
        match self {
            Facing::Right => Dir2::X,
            Facing::Left => Dir2::NEG_X,
        }
    }
}

/// Marker for ground colliders
#[derive(Component, Debug)]
pub struct Ground;

/// Marker for wall colliders
#[derive(Component, Debug)]
pub struct Wall;
