//! Blow consumer: grow the pool if allowed, then acquire + launch bubbles.
//!
//! # Fail-fast invariants
//! - The free list contains only valid pooled bubble entities.
//! - Therefore, a pooled entity must match the bubble query.
//!
//! If this is violated, we `expect()` and crash loudly.

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::common::tunables::Tunables;

use super::components::{BubbleLease, PooledBubble, PopAnimation};
use super::machine::Bubble;
use super::messages::BlowBubbleRequest;
use super::pool::{active_bubble_layers, spawn_dormant_bubble, BubblePool, BUBBLE_Z};

/// Spawn whole batches of dormant bubbles when this frame's requests would drain the pool.
///
/// Runs before the allocator; the spawn commands are applied at the sync point between
/// the two, so the allocator sees fully formed entities.
pub fn grow_bubble_pool(
    mut commands: Commands,
    mut pool: ResMut<BubblePool>,
    mut requests: MessageReader<BlowBubbleRequest>,
    tunables: Res<Tunables>,
) {
    let wanted = requests.read().count();
    let Some(extra) = pool.growth_for(wanted) else {
        return;
    };

    for _ in 0..extra {
        spawn_dormant_bubble(&mut commands, &mut pool, &tunables.bubble);
    }
    info!("Bubble pool grew by {extra} (total {})", pool.total());
}

pub fn allocate_bubbles_from_pool(
    mut pool: ResMut<BubblePool>,
    mut requests: MessageReader<BlowBubbleRequest>,
    tunables: Res<Tunables>,
    mut q: Query<(
        &mut Bubble,
        &mut BubbleLease,
        &mut Transform,
        &mut Visibility,
        &mut CollisionLayers,
        &mut PopAnimation,
    ), With<PooledBubble>>,
) {
    let cfg = &tunables.bubble;

    for req in requests.read() {
        let e = match pool.acquire() {
            Ok(e) => e,
            Err(err) => {
                // Capacity decision, not a correctness failure: the blow is suppressed.
                debug!("Dropping blow request: {err}");
                continue;
            }
        };

        let (mut bubble, mut lease, mut tf, mut vis, mut layers, mut pop) = q
            .get_mut(e)
            .expect("BubblePool contained an entity missing pooled bubble components");

        bubble.thaw(req.pos);
        *lease = BubbleLease::OnLoan;
        tf.translation = req.pos.extend(BUBBLE_Z);
        tf.scale = Vec3::splat(cfg.dormant_scale);
        *vis = Visibility::Visible;
        *layers = active_bubble_layers();
        pop.reset();

        match bubble.launch(req.direction, req.force, req.mirrored, cfg) {
            Ok(impulse) => debug!("Bubble {e} launched with impulse {impulse}"),
            Err(err) => warn!("Bubble {e}: {err}"),
        }
    }
}
