//! Player plugin: movement, jumping and blowing bubbles.
//!
//! Pipeline:
//! - Update: sample input into `PlayerInput`, refresh `Grounded`, turn a blow press into a
//!   `BlowBubbleRequest` (the pool itself is never touched here)
//! - FixedUpdate: steer horizontal velocity, jump, push back inside the play band

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState, tunables::{PlayerTunables, Tunables}};
use crate::plugins::bubbles::messages::BlowBubbleRequest;
use crate::plugins::bubbles::BubbleSystems;

/// Player body: capsule radius and straight segment length.
const BODY_RADIUS: f32 = 0.25;
const BODY_LENGTH: f32 = 0.5;

#[derive(Component)]
pub struct Player;

#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Grounded(pub bool);

#[derive(Resource, Default, Debug)]
pub struct PlayerInput {
    pub move_axis: Vec2,
    /// Move input of the latest sample; aims the next bubble. Zero means "straight ahead".
    pub last_axis: Vec2,
    /// Facing left. Any non-zero input updates it, so a vertical-only input faces right.
    pub mirrored: bool,
    pub jump_requested: bool,
    pub blow_requested: bool,
}

pub fn plugin(app: &mut App) {
    app.insert_resource(PlayerInput::default())
        .add_systems(OnEnter(GameState::InGame), spawn)
        .add_systems(
            Update,
            (gather_input, face_input, check_grounded, request_blow)
                .chain()
                .before(BubbleSystems::Allocate)
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            FixedUpdate,
            (apply_movement, apply_jump, throw_back_into_bounds)
                .chain()
                .run_if(in_state(GameState::InGame)),
        );
}

fn spawn(mut commands: Commands, tunables: Res<Tunables>) {
    let layers = CollisionLayers::new(Layer::Player, [Layer::World, Layer::Bubble]);

    commands.spawn((
        Name::new("Player"),
        Player,
        Grounded::default(),
        Sprite {
            color: Color::srgb(0.95, 0.75, 0.3),
            custom_size: Some(Vec2::new(BODY_RADIUS * 2.0, BODY_LENGTH + BODY_RADIUS * 2.0)),
            ..default()
        },
        Transform::from_translation(tunables.player.spawn.extend(3.0)),
        RigidBody::Dynamic,
        Collider::capsule(BODY_RADIUS, BODY_LENGTH),
        LockedAxes::ROTATION_LOCKED,
        layers,
        LinearVelocity::ZERO,
        TranslationInterpolation,
        DespawnOnExit(GameState::InGame),
    ));
}

/// No keyboard in headless apps; the input simply stays idle.
fn gather_input(keys: Option<Res<ButtonInput<KeyCode>>>, mut input: ResMut<PlayerInput>) {
    let Some(keys) = keys else {
        return;
    };
    let mut axis = Vec2::ZERO;

    if keys.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]) {
        axis.y += 1.0;
    }
    if keys.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]) {
        axis.y -= 1.0;
    }
    if keys.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]) {
        axis.x -= 1.0;
    }
    if keys.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]) {
        axis.x += 1.0;
    }

    input.move_axis = axis.normalize_or_zero();
    input.last_axis = input.move_axis;

    // Latched until a fixed/update step consumes them.
    input.jump_requested |= keys.just_pressed(KeyCode::Space);
    input.blow_requested |= keys.any_just_pressed([KeyCode::KeyJ, KeyCode::Enter]);
}

/// Facing follows the last non-zero input.
fn face_input(mut input: ResMut<PlayerInput>, mut q: Query<&mut Sprite, With<Player>>) {
    if input.move_axis != Vec2::ZERO {
        input.mirrored = input.move_axis.x < 0.0;
    }
    if let Ok(mut sprite) = q.single_mut() {
        sprite.flip_x = input.mirrored;
    }
}

fn check_grounded(
    spatial_query: SpatialQuery,
    tunables: Res<Tunables>,
    mut q: Query<(Entity, &Transform, &mut Grounded), With<Player>>,
) {
    let cfg = &tunables.player;
    let Ok((e, tf, mut grounded)) = q.single_mut() else {
        return;
    };

    let radius = cfg.ground_check_width * 0.5;
    let shape = Collider::capsule(radius, (cfg.ground_check_height - cfg.ground_check_width).max(0.0));
    let filter = SpatialQueryFilter::from_mask([Layer::World, Layer::Bubble]).with_excluded_entities([e]);

    let now = !spatial_query
        .shape_intersections(&shape, tf.translation.truncate(), 0.0, &filter)
        .is_empty();
    if grounded.0 != now {
        grounded.0 = now;
    }
}

/// Where a bubble is blown from and which way: the last input, or straight ahead.
pub fn blow_aim(last_axis: Vec2, mirrored: bool) -> Vec2 {
    if last_axis == Vec2::ZERO {
        if mirrored { Vec2::NEG_X } else { Vec2::X }
    } else {
        last_axis.normalize_or_zero()
    }
}

fn request_blow(
    tunables: Res<Tunables>,
    mut input: ResMut<PlayerInput>,
    q_player: Query<&Transform, With<Player>>,
    mut writer: MessageWriter<BlowBubbleRequest>,
) {
    if !std::mem::take(&mut input.blow_requested) {
        return;
    }
    let Ok(tf) = q_player.single() else {
        debug!("Blow requested without a single Player");
        return;
    };

    let direction = blow_aim(input.last_axis, input.mirrored);
    writer.write(BlowBubbleRequest {
        pos: tf.translation.truncate() + direction,
        direction,
        force: tunables.player.blow_force,
        mirrored: input.mirrored,
    });
}

/// Horizontal velocity after one step: approach `axis_x.signum() * speed` exponentially,
/// quickly while steering and slowly while coasting.
pub fn steer_velocity_x(current: f32, axis_x: f32, cfg: &PlayerTunables, dt: f32) -> f32 {
    let (target, rate) = if axis_x != 0.0 {
        (axis_x.signum() * cfg.speed, cfg.acceleration)
    } else {
        (0.0, cfg.deceleration)
    };
    let alpha = 1.0 - (-rate * dt).exp();
    current + (target - current) * alpha
}

fn apply_movement(
    time: Res<Time<Fixed>>,
    tunables: Res<Tunables>,
    input: Res<PlayerInput>,
    mut q_player: Query<&mut LinearVelocity, With<Player>>,
) {
    let Ok(mut vel) = q_player.single_mut() else {
        return;
    };
    vel.x = steer_velocity_x(vel.x, input.move_axis.x, &tunables.player, time.delta_secs());
}

fn apply_jump(
    tunables: Res<Tunables>,
    mut input: ResMut<PlayerInput>,
    mut q_player: Query<(&mut LinearVelocity, &Grounded), With<Player>>,
) {
    if !std::mem::take(&mut input.jump_requested) {
        return;
    }
    let Ok((mut vel, grounded)) = q_player.single_mut() else {
        return;
    };
    if grounded.0 {
        vel.y = tunables.player.jump_force;
    }
}

fn throw_back_into_bounds(tunables: Res<Tunables>, mut q_player: Query<(&Transform, &mut LinearVelocity), With<Player>>) {
    let cfg = &tunables.player;
    let Ok((tf, mut vel)) = q_player.single_mut() else {
        return;
    };

    let x = tf.translation.x;
    if x > cfg.out_of_bounds_x.y {
        vel.x -= cfg.throw_back_force;
    } else if x < cfg.out_of_bounds_x.x {
        vel.x += cfg.throw_back_force;
    }
}

#[cfg(test)]
mod tests;
