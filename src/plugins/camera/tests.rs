use bevy::prelude::*;

use crate::common::bounds::CameraBounds;
use crate::common::test_utils::{run_system_once, time_with_delta};
use crate::common::tunables::{CameraTunables, Tunables};
use crate::plugins::player::Player;

use super::MainCamera;

fn world_with(player: Vec2, camera: Vec2, dt: f32) -> (World, Entity) {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    world.insert_resource(CameraBounds::default());
    world.insert_resource(time_with_delta(dt));

    world.spawn((Player, Transform::from_translation(player.extend(0.0))));
    let cam = world
        .spawn((MainCamera { responsiveness: 5.0 }, Transform::from_translation(camera.extend(999.0))))
        .id();
    (world, cam)
}

#[test]
fn follow_target_stays_inside_the_shaft() {
    let cfg = CameraTunables::default();
    assert_eq!(super::clamp_follow_target(Vec2::new(7.0, 3.0), &cfg), Vec2::new(2.0, 3.0));
    assert_eq!(super::clamp_follow_target(Vec2::new(-7.0, -4.0), &cfg), Vec2::new(-2.0, 0.0));
    assert_eq!(super::clamp_follow_target(Vec2::new(1.0, 12.0), &cfg), Vec2::new(1.0, 12.0));
}

#[test]
fn follow_moves_part_of_the_way() {
    let (mut world, cam) = world_with(Vec2::new(0.0, 10.0), Vec2::ZERO, 0.1);

    run_system_once(&mut world, super::follow_player);

    let y = world.get::<Transform>(cam).unwrap().translation.y;
    let expected = 10.0 * (1.0 - (-0.5_f32).exp());
    assert!((y - expected).abs() < 1e-4);
    assert_eq!(world.get::<Transform>(cam).unwrap().translation.z, 999.0);
}

#[test]
fn follow_never_dips_below_the_floor() {
    let (mut world, cam) = world_with(Vec2::new(0.0, -6.0), Vec2::ZERO, 1.0);

    run_system_once(&mut world, super::follow_player);

    assert_eq!(world.get::<Transform>(cam).unwrap().translation.y, 0.0);
}

#[test]
fn bounds_track_the_camera() {
    let (mut world, _) = world_with(Vec2::ZERO, Vec2::new(0.0, 12.0), 0.1);

    run_system_once(&mut world, super::publish_bounds);

    let bounds = *world.resource::<CameraBounds>();
    assert_eq!(bounds, CameraBounds { center_y: 12.0, half_height: 5.0 });
    assert_eq!(bounds.upper_edge(), 17.0);
}
