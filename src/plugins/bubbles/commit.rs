//! Return commit: recycle bubbles back into the pool.
//!
//! This system is the "owner" of the pooled invariants. A pooled bubble is:
//! - hidden
//! - parked at the dormant anchor with the marker scale
//! - colliding with nothing
//! - reset (frozen, timers zeroed, no mounted player)

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::tunables::Tunables;

use super::components::{BubbleLease, PooledBubble, PopAnimation, ProbeReading};
use super::machine::Bubble;
use super::pool::{inactive_bubble_layers, BubblePool, BUBBLE_Z};

pub fn return_to_pool_commit(
    mut pool: ResMut<BubblePool>,
    tunables: Res<Tunables>,
    mut q: Query<(
        Entity,
        &mut Bubble,
        &mut BubbleLease,
        &mut Transform,
        &mut Visibility,
        &mut CollisionLayers,
        &mut PopAnimation,
        &mut ProbeReading,
    ), With<PooledBubble>>,
) {
    let cfg = &tunables.bubble;

    for (e, mut bubble, mut lease, mut tf, mut vis, mut layers, mut pop, mut reading) in &mut q {
        let BubbleLease::PendingReturn(reason) = *lease else {
            continue;
        };

        *vis = Visibility::Hidden;
        *layers = inactive_bubble_layers();
        tf.translation = cfg.dormant_anchor.extend(BUBBLE_Z);
        tf.scale = Vec3::splat(cfg.dormant_scale);
        pop.reset();
        *reading = ProbeReading::default();
        bubble.reset();
        *lease = BubbleLease::Pooled;

        match pool.release(e) {
            Ok(()) => debug!("Bubble {e} returned to pool ({reason:?})"),
            Err(err) => error!("{err}"),
        }
    }
}
