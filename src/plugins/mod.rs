//! Feature plugins.

use bevy::prelude::*;

use crate::plugins::bubbles::BubblesPlugin;

pub mod bubbles;
pub mod core;
pub mod level;
pub mod physics;
pub mod player;
pub mod world;

// Render-only
pub mod camera;
pub mod lighting;

/// Register gameplay plugins that work in headless tests.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    physics::plugin(app);
    world::plugin(app);
    player::plugin(app);
    level::plugin(app);
    app.add_plugins(BubblesPlugin);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    camera::plugin(app);
    lighting::plugin(app);
}
