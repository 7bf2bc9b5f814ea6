//! Physics plugin: Avian with platformer gravity.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::tunables::Tunables;

pub fn plugin(app: &mut App) {
    let physics = app.world().resource::<Tunables>().physics.clone();
    app.add_plugins(PhysicsPlugins::default().with_length_unit(physics.length_unit));
    app.insert_resource(Gravity(Vec2::NEG_Y * physics.gravity));
}
