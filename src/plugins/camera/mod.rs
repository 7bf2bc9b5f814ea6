//! Camera plugin (render-only).
//!
//! The camera shows a fixed number of world units vertically and trails the player with an
//! exponential follow. The target is clamped so the view never drifts sideways past the
//! shaft or below the start ground.
//!
//! ```text
//! OnEnter(InGame): spawn MainCamera
//! PostUpdate:      follow_player -> publish CameraBounds
//! ```
//!
//! Queries on the player and the camera both touch `Transform`; `Without<...>` filters keep
//! them disjoint (B0001).

use bevy::camera::ScalingMode;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy_firefly::prelude::*;

use crate::common::bounds::CameraBounds;
use crate::common::state::GameState;
use crate::common::tunables::{CameraTunables, Tunables};
use crate::plugins::player::Player;

#[derive(Component)]
pub struct MainCamera {
    pub responsiveness: f32,
}

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_camera)
        .add_systems(
            PostUpdate,
            (follow_player, publish_bounds)
                .chain()
                .before(TransformSystems::Propagate)
                .run_if(in_state(GameState::InGame)),
        );
}

fn spawn_camera(mut commands: Commands, tunables: Res<Tunables>) {
    let cfg = &tunables.camera;

    commands.spawn((
        Name::new("MainCamera"),
        Camera2d,
        MainCamera { responsiveness: cfg.responsiveness },
        Projection::Orthographic(OrthographicProjection {
            scaling_mode: ScalingMode::FixedVertical { viewport_height: cfg.view_height },
            ..OrthographicProjection::default_2d()
        }),
        FireflyConfig::default(),
        Transform::from_xyz(0.0, cfg.min_y, 999.0),
        DespawnOnExit(GameState::InGame),
    ));
}

/// Where the camera wants to be for a player at `player`.
pub fn clamp_follow_target(player: Vec2, cfg: &CameraTunables) -> Vec2 {
    Vec2::new(player.x.clamp(cfg.min_x, cfg.max_x), player.y.max(cfg.min_y))
}

pub(crate) fn follow_player(
    time: Res<Time>,
    tunables: Res<Tunables>,
    q_player: Query<&Transform, (With<Player>, Without<MainCamera>)>,
    mut q_cam: Query<(&mut Transform, &MainCamera), Without<Player>>,
) {
    let Ok(tf_player) = q_player.single() else {
        return;
    };
    let Ok((mut tf_cam, main_cam)) = q_cam.single_mut() else {
        return;
    };

    let target = clamp_follow_target(tf_player.translation.truncate(), &tunables.camera);
    let alpha = 1.0 - (-main_cam.responsiveness * time.delta_secs()).exp();

    tf_cam.translation.x += (target.x - tf_cam.translation.x) * alpha;
    tf_cam.translation.y += (target.y - tf_cam.translation.y) * alpha;
}

fn publish_bounds(
    tunables: Res<Tunables>,
    q_cam: Query<&Transform, With<MainCamera>>,
    mut bounds: ResMut<CameraBounds>,
) {
    let Ok(tf_cam) = q_cam.single() else {
        return;
    };

    let next = CameraBounds {
        center_y: tf_cam.translation.y,
        half_height: tunables.camera.view_height * 0.5,
    };
    // Avoid flagging the resource as changed every frame the camera sits still.
    bounds.set_if_neq(next);
}

#[cfg(test)]
mod tests;
