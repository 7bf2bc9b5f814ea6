//! Core plugin: shared resources and global settings.

use bevy::prelude::*;

use crate::common::bounds::CameraBounds;
use crate::common::tunables::Tunables;

pub fn plugin(app: &mut App) {
    if !app.world().contains_resource::<Tunables>() {
        app.insert_resource(Tunables::default());
    }
    app.init_resource::<CameraBounds>();
    app.insert_resource(ClearColor(Color::srgb(0.05, 0.06, 0.1)));
}
