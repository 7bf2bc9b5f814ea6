//! Per-tick bubble systems.
//!
//! `Update` (variable dt): probe → detection/timers → pop animation → look.
//! `FixedUpdate` (fixed dt): motion + out-of-bounds release.
//!
//! Detection may lag motion by up to one tick. The blow-down timer masks the short
//! probe misses this causes right after a downward launch.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::bounds::CameraBounds;
use crate::common::tunables::Tunables;

use super::components::{bubble_color, BubbleLease, PooledBubble, PopAnimation, ProbeReading};
use super::machine::{Bubble, Sense, TickOutcome};
use super::probe::{probe_bubble, AvianProbe};

/// Apply a machine outcome to the pool/animation side.
#[inline]
fn apply_outcome(outcome: TickOutcome, lease: &mut BubbleLease, pop: &mut PopAnimation) {
    match outcome {
        TickOutcome::Continue => {}
        TickOutcome::BeginPop => pop.start(),
        TickOutcome::Release(reason) => *lease = BubbleLease::PendingReturn(reason),
    }
}

pub fn probe_players(
    spatial_query: SpatialQuery,
    tunables: Res<Tunables>,
    mut q: Query<(Entity, &Transform, &Bubble, &BubbleLease, &mut ProbeReading), With<PooledBubble>>,
) {
    let probe = AvianProbe::new(&spatial_query, &tunables.bubble);

    for (e, tf, bubble, lease, mut reading) in &mut q {
        if *lease != BubbleLease::OnLoan || bubble.is_frozen() {
            continue;
        }
        reading.player_above = probe_bubble(&probe, e, tf);
    }
}

pub fn advance_bubble_detection(
    time: Res<Time>,
    tunables: Res<Tunables>,
    mut q: Query<(
        &mut Bubble,
        &mut BubbleLease,
        &mut PopAnimation,
        &Transform,
        &ProbeReading,
    ), With<PooledBubble>>,
) {
    let dt = time.delta_secs();

    for (mut bubble, mut lease, mut pop, tf, reading) in &mut q {
        if *lease != BubbleLease::OnLoan {
            continue;
        }

        let before = bubble.state();
        let outcome = bubble.on_variable_tick(
            dt,
            Sense {
                position: tf.translation.truncate(),
                player_above: reading.player_above,
                pop_progress: pop.progress(),
            },
            &tunables.bubble,
        );

        if before != bubble.state() {
            debug!("Bubble {:?} -> {:?}", before, bubble.state());
        }
        apply_outcome(outcome, &mut lease, &mut pop);
    }
}

pub fn advance_bubble_motion(
    time: Res<Time<Fixed>>,
    tunables: Res<Tunables>,
    bounds: Res<CameraBounds>,
    mut q: Query<(&mut Bubble, &mut BubbleLease, &mut PopAnimation, &mut Transform), With<PooledBubble>>,
) {
    let dt = time.delta_secs();

    for (mut bubble, mut lease, mut pop, mut tf) in &mut q {
        if *lease != BubbleLease::OnLoan {
            continue;
        }
        let outcome = bubble.on_fixed_tick(dt, &mut tf, &bounds, &tunables.bubble);
        apply_outcome(outcome, &mut lease, &mut pop);
    }
}

/// Stand-in for the pop clip: progress runs 0 → 1 over `pop_duration`.
pub fn advance_pop_animations(
    time: Res<Time>,
    tunables: Res<Tunables>,
    mut q: Query<&mut PopAnimation, With<PooledBubble>>,
) {
    let dt = time.delta_secs();
    for mut pop in &mut q {
        pop.advance(dt, tunables.bubble.pop_duration);
    }
}

/// Presentation is derived from facts: tint from state, alpha from pop progress.
pub fn update_bubble_look(
    mut q: Query<(&Bubble, &PopAnimation, &mut Sprite), (With<PooledBubble>, Or<(Changed<Bubble>, Changed<PopAnimation>)>)>,
) {
    for (bubble, pop, mut sprite) in &mut q {
        sprite.color = bubble_color(bubble.state(), pop);
    }
}
