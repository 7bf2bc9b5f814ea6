//! World plugin: ground segments the player climbs from.
//!
//! The first segment is spawned on entering the game; the level plugin adds one at every
//! checkpoint.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy_firefly::prelude::Occluder2d;

use crate::common::{layers::Layer, state::GameState, tunables::Tunables};

pub const GROUND_THICKNESS: f32 = 0.5;

#[derive(Component, Debug, Clone, Copy)]
pub struct Ground;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_start_ground);
}

fn ground_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::World, [Layer::Player])
}

/// Spawn a ground segment whose top surface sits at `top.y`.
pub fn spawn_ground(commands: &mut Commands, top: Vec2, width: f32) -> Entity {
    let size = Vec2::new(width, GROUND_THICKNESS);
    let center = top - Vec2::Y * (GROUND_THICKNESS * 0.5);

    commands
        .spawn((
            Name::new("Ground"),
            Ground,
            Sprite {
                color: Color::srgb(0.25, 0.27, 0.33),
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(center.extend(0.0)),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            ground_layers(),
            Occluder2d::rectangle(size.x, size.y),
            DespawnOnExit(GameState::InGame),
        ))
        .id()
}

fn spawn_start_ground(mut commands: Commands, tunables: Res<Tunables>) {
    spawn_ground(&mut commands, Vec2::ZERO, tunables.level.ground_width * 3.0);
}
