use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, Messages};
use bevy::prelude::*;

use crate::common::test_utils::{fixed_time_with_delta, run_system_once};
use crate::common::tunables::{PlayerTunables, Tunables};
use crate::plugins::bubbles::messages::BlowBubbleRequest;

use super::{Grounded, Player, PlayerInput};

const DT: f32 = 1.0 / 64.0;

fn world_with_player(input: PlayerInput, pos: Vec2, vel: Vec2) -> (World, Entity) {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    world.insert_resource(input);
    world.insert_resource(fixed_time_with_delta(DT));
    world.init_resource::<Messages<BlowBubbleRequest>>();

    let e = world
        .spawn((
            Player,
            Grounded::default(),
            Transform::from_translation(pos.extend(0.0)),
            LinearVelocity(vel),
        ))
        .id();
    (world, e)
}

fn sent_requests(world: &mut World) -> Vec<BlowBubbleRequest> {
    run_system_once(world, |mut reader: MessageReader<BlowBubbleRequest>| {
        reader.read().copied().collect::<Vec<_>>()
    })
}

#[test]
fn spawn_creates_player() {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    run_system_once(&mut world, super::spawn);

    let (tf, layers) = world
        .query_filtered::<(&Transform, &CollisionLayers), With<Player>>()
        .single(&world)
        .unwrap();
    assert_eq!(tf.translation.truncate(), PlayerTunables::default().spawn);
    assert!(layers.filters.has_all(crate::common::layers::Layer::Bubble));
}

#[test]
fn steering_approaches_target_speed_without_overshoot() {
    let cfg = PlayerTunables::default();
    let mut vx = 0.0;
    for _ in 0..200 {
        vx = super::steer_velocity_x(vx, 1.0, &cfg, DT);
        assert!(vx <= cfg.speed);
    }
    assert!((vx - cfg.speed).abs() < 1e-3);

    // Coasting decays slower than steering accelerates.
    let coast = super::steer_velocity_x(cfg.speed, 0.0, &cfg, DT);
    let brake = super::steer_velocity_x(cfg.speed, -1.0, &cfg, DT);
    assert!(coast > 0.0 && coast < cfg.speed);
    assert!(brake < coast);
}

#[test]
fn apply_movement_sets_horizontal_velocity_only() {
    let input = PlayerInput { move_axis: Vec2::X, ..default() };
    let (mut world, e) = world_with_player(input, Vec2::ZERO, Vec2::new(0.0, -3.0));

    run_system_once(&mut world, super::apply_movement);

    let v = world.get::<LinearVelocity>(e).unwrap();
    assert!(v.x > 0.0);
    assert_eq!(v.y, -3.0);
}

#[test]
fn jump_needs_ground_and_consumes_the_press() {
    let input = PlayerInput { jump_requested: true, ..default() };
    let (mut world, e) = world_with_player(input, Vec2::ZERO, Vec2::ZERO);

    run_system_once(&mut world, super::apply_jump);
    assert_eq!(world.get::<LinearVelocity>(e).unwrap().y, 0.0);
    assert!(!world.resource::<PlayerInput>().jump_requested);

    world.get_mut::<Grounded>(e).unwrap().0 = true;
    world.resource_mut::<PlayerInput>().jump_requested = true;
    run_system_once(&mut world, super::apply_jump);
    assert_eq!(world.get::<LinearVelocity>(e).unwrap().y, PlayerTunables::default().jump_force);
}

#[test]
fn leaving_the_band_throws_the_player_back() {
    let cfg = PlayerTunables::default();

    let (mut world, e) = world_with_player(PlayerInput::default(), Vec2::new(11.0, 0.0), Vec2::ZERO);
    run_system_once(&mut world, super::throw_back_into_bounds);
    assert_eq!(world.get::<LinearVelocity>(e).unwrap().x, -cfg.throw_back_force);

    let (mut world, e) = world_with_player(PlayerInput::default(), Vec2::new(-11.0, 0.0), Vec2::ZERO);
    run_system_once(&mut world, super::throw_back_into_bounds);
    assert_eq!(world.get::<LinearVelocity>(e).unwrap().x, cfg.throw_back_force);

    let (mut world, e) = world_with_player(PlayerInput::default(), Vec2::new(10.5, 0.0), Vec2::ZERO);
    run_system_once(&mut world, super::throw_back_into_bounds);
    assert_eq!(world.get::<LinearVelocity>(e).unwrap().x, 0.0);
}

#[test]
fn blow_aim_falls_back_to_facing() {
    assert_eq!(super::blow_aim(Vec2::ZERO, false), Vec2::X);
    assert_eq!(super::blow_aim(Vec2::ZERO, true), Vec2::NEG_X);
    assert_eq!(super::blow_aim(Vec2::NEG_Y, true), Vec2::NEG_Y);
}

#[test]
fn blow_press_becomes_one_request() {
    let input = PlayerInput { last_axis: Vec2::NEG_Y, blow_requested: true, ..default() };
    let (mut world, _) = world_with_player(input, Vec2::new(2.0, 3.0), Vec2::ZERO);

    run_system_once(&mut world, super::request_blow);
    run_system_once(&mut world, super::request_blow);

    let sent = sent_requests(&mut world);
    assert_eq!(
        sent,
        vec![BlowBubbleRequest {
            pos: Vec2::new(2.0, 2.0),
            direction: Vec2::NEG_Y,
            force: PlayerTunables::default().blow_force,
            mirrored: false,
        }]
    );
}

#[test]
fn facing_follows_any_non_zero_input() {
    let input = PlayerInput { move_axis: Vec2::NEG_X, ..default() };
    let (mut world, e) = world_with_player(input, Vec2::ZERO, Vec2::ZERO);
    world.entity_mut(e).insert(Sprite::default());

    run_system_once(&mut world, super::face_input);
    assert!(world.resource::<PlayerInput>().mirrored);
    assert!(world.get::<Sprite>(e).unwrap().flip_x);

    // No input keeps the facing.
    world.resource_mut::<PlayerInput>().move_axis = Vec2::ZERO;
    run_system_once(&mut world, super::face_input);
    assert!(world.resource::<PlayerInput>().mirrored);

    // Vertical-only input faces right again.
    world.resource_mut::<PlayerInput>().move_axis = Vec2::Y;
    run_system_once(&mut world, super::face_input);
    assert!(!world.resource::<PlayerInput>().mirrored);
    assert!(!world.get::<Sprite>(e).unwrap().flip_x);
}

/// One Update pass of the input side of the player pipeline.
fn sample_input(world: &mut World) {
    run_system_once(world, super::gather_input);
    run_system_once(world, super::face_input);
    run_system_once(world, super::request_blow);
}

#[test]
fn released_direction_does_not_aim_the_next_blow() {
    let (mut world, _) = world_with_player(PlayerInput::default(), Vec2::ZERO, Vec2::ZERO);
    world.insert_resource(ButtonInput::<KeyCode>::default());

    // Tap Down.
    world.resource_mut::<ButtonInput<KeyCode>>().press(KeyCode::ArrowDown);
    sample_input(&mut world);
    assert_eq!(world.resource::<PlayerInput>().last_axis, Vec2::NEG_Y);

    // Release it, then blow with nothing held.
    {
        let mut keys = world.resource_mut::<ButtonInput<KeyCode>>();
        keys.release(KeyCode::ArrowDown);
        keys.clear();
    }
    sample_input(&mut world);
    {
        let mut keys = world.resource_mut::<ButtonInput<KeyCode>>();
        keys.clear();
        keys.press(KeyCode::KeyJ);
    }
    sample_input(&mut world);

    let sent = sent_requests(&mut world);
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].direction, Vec2::X);
    assert!(!sent[0].mirrored);
    assert!(!crate::plugins::bubbles::machine::is_downward(
        sent[0].direction,
        crate::common::tunables::BubbleTunables::default().down_alignment,
    ));
}

#[test]
fn held_direction_aims_the_blow() {
    let (mut world, _) = world_with_player(PlayerInput::default(), Vec2::ZERO, Vec2::ZERO);
    let mut keys = ButtonInput::<KeyCode>::default();
    keys.press(KeyCode::ArrowLeft);
    keys.press(KeyCode::Enter);
    world.insert_resource(keys);

    sample_input(&mut world);

    let sent = sent_requests(&mut world);
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].direction, Vec2::NEG_X);
    assert!(sent[0].mirrored);
}
