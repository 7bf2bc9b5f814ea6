//! Lighting plugin (Firefly) (render-only).
//!
//! Both the player light and the full-screen overlay take their colour from `LevelTint`.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy_firefly::prelude::*;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::camera::MainCamera;
use crate::plugins::level::LevelTint;
use crate::plugins::player::Player;

#[derive(Component)]
pub struct PlayerLight;

/// Screen-sized quad in front of the world, tinted with the level colour.
#[derive(Component)]
pub struct LevelOverlay;

pub fn plugin(app: &mut App) {
    if !app.is_plugin_added::<FireflyPlugin>() {
        app.add_plugins(FireflyPlugin);
    }

    app.add_systems(OnEnter(GameState::InGame), setup).add_systems(
        PostUpdate,
        (follow_player_light, follow_camera_overlay, apply_level_tint)
            .after(crate::plugins::camera::follow_player)
            .before(TransformSystems::Propagate)
            .run_if(in_state(GameState::InGame)),
    );
}

fn setup(mut commands: Commands, tunables: Res<Tunables>, tint: Res<LevelTint>) {
    let view = tunables.camera.view_height;

    commands.spawn((
        Name::new("PlayerLight"),
        PlayerLight,
        PointLight2d {
            color: Color::srgb(1.0, 0.9, 0.75),
            radius: view * 0.75,
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 10.0),
        DespawnOnExit(GameState::InGame),
    ));

    commands.spawn((
        Name::new("LevelOverlay"),
        LevelOverlay,
        Sprite {
            color: tint.overlay,
            // Wide enough for any sane aspect ratio.
            custom_size: Some(Vec2::new(view * 4.0, view)),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 900.0),
        DespawnOnExit(GameState::InGame),
    ));
}

fn follow_player_light(
    q_player: Query<&Transform, (With<Player>, Without<PlayerLight>)>,
    mut q_light: Query<&mut Transform, (With<PlayerLight>, Without<Player>)>,
) {
    let Ok(tf_player) = q_player.single() else {
        return;
    };
    let Ok(mut tf_light) = q_light.single_mut() else {
        return;
    };

    tf_light.translation.x = tf_player.translation.x;
    tf_light.translation.y = tf_player.translation.y;
}

fn follow_camera_overlay(
    q_cam: Query<&Transform, (With<MainCamera>, Without<LevelOverlay>)>,
    mut q_overlay: Query<&mut Transform, (With<LevelOverlay>, Without<MainCamera>)>,
) {
    let Ok(tf_cam) = q_cam.single() else {
        return;
    };
    let Ok(mut tf_overlay) = q_overlay.single_mut() else {
        return;
    };

    tf_overlay.translation.x = tf_cam.translation.x;
    tf_overlay.translation.y = tf_cam.translation.y;
}

fn apply_level_tint(
    tint: Res<LevelTint>,
    mut q_light: Query<&mut PointLight2d, With<PlayerLight>>,
    mut q_overlay: Query<&mut Sprite, With<LevelOverlay>>,
) {
    if !tint.is_changed() {
        return;
    }

    let bloom = tint.bloom.to_srgba();
    for mut light in &mut q_light {
        // The light itself stays opaque; only the hue follows the level.
        light.color = bloom.with_alpha(1.0).into();
    }
    for mut sprite in &mut q_overlay {
        sprite.color = tint.overlay;
    }
}
