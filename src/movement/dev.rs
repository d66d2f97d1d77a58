//! Movement domain: test room geometry for running the controller in-engine.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{GameLayer, Ground, Wall};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum BlockKind {
    Floor,
    Platform,
    Wall,
}

/// (kind, center, size) in pixels.
pub(super) const TEST_ROOM: &[(BlockKind, Vec2, Vec2)] = &[
    (BlockKind::Floor, Vec2::new(0.0, -200.0), Vec2::new(800.0, 40.0)),
    (BlockKind::Wall, Vec2::new(-420.0, 50.0), Vec2::new(40.0, 500.0)),
    (BlockKind::Wall, Vec2::new(420.0, 50.0), Vec2::new(40.0, 500.0)),
    (BlockKind::Platform, Vec2::new(-250.0, -80.0), Vec2::new(150.0, 20.0)),
    (BlockKind::Platform, Vec2::new(250.0, 0.0), Vec2::new(150.0, 20.0)),
    (BlockKind::Platform, Vec2::new(0.0, 90.0), Vec2::new(120.0, 20.0)),
    // Short pillar for wall-stop and dash interrupts
    (BlockKind::Wall, Vec2::new(-100.0, -130.0), Vec2::new(30.0, 100.0)),
    // Walkable cap on the pillar, which is within jump reach
    (BlockKind::Platform, Vec2::new(-100.0, -75.0), Vec2::new(30.0, 10.0)),
];

fn spawn_block(commands: &mut Commands, kind: BlockKind, center: Vec2, size: Vec2) {
    let (color, layer) = match kind {
        BlockKind::Floor => (Color::srgb(0.4, 0.5, 0.4), GameLayer::Ground),
        BlockKind::Platform => (Color::srgb(0.5, 0.4, 0.3), GameLayer::Ground),
        BlockKind::Wall => (Color::srgb(0.3, 0.3, 0.4), GameLayer::Wall),
    };

    let mut block = commands.spawn((
        Sprite {
            color,
            custom_size: Some(size),
            ..default()
        },
        Transform::from_xyz(center.x, center.y, 0.0),
        RigidBody::Static,
        Collider::rectangle(size.x, size.y),
        CollisionLayers::new(layer, [GameLayer::Player]),
    ));

    match kind {
        BlockKind::Floor | BlockKind::Platform => {
            block.insert(Ground);
        }
        BlockKind::Wall => {
            block.insert(Wall);
        }
    }
}

pub(crate) fn spawn_test_room(mut commands: Commands) {
    for &(kind, center, size) in TEST_ROOM {
        spawn_block(&mut commands, kind, center, size);
    }
    debug!("Spawned test room with {} blocks", TEST_ROOM.len());
}
