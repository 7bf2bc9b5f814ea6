//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides core ECS runtime.
//! - we then call `bubble_climb::game::configure_headless` to install gameplay plugins.

#![allow(dead_code)]

use std::time::Duration;

use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use bubble_climb::common::tunables::Tunables;

pub fn app_headless() -> App {
    app_headless_with(Tunables::default())
}

/// Headless app whose plugins are built from `tunables`.
pub fn app_headless_with(tunables: Tunables) -> App {
    let mut app = App::new();

    // AssetPlugin + ScenePlugin so SceneSpawner exists.
    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));

    // Inserted before the plugins so the core plugin keeps it.
    app.insert_resource(tunables);
    bubble_climb::game::configure_headless(&mut app);
    // `App::run` would do this; tests drive `update()` directly, and Avian initializes
    // resources in `Plugin::finish`.
    app.finish();
    app.cleanup();
    app
}

/// Advance every frame by exactly `1/60` s so fixed steps and physics run deterministically.
pub fn use_manual_time(app: &mut App) {
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(1.0 / 60.0)));
}

pub fn step(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}
