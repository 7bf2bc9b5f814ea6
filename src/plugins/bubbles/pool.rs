//! Bubble pool: pre-spawned bubbles, handed out FIFO.
//!
//! Every pooled bubble is either on the free list (`available`) or on loan; never both.
//! The free list only ever receives bubbles that went through the return commit (reset,
//! hidden, parked at the dormant anchor).

use std::collections::VecDeque;

use avian2d::prelude::*;
use bevy::platform::collections::HashSet;
use bevy::prelude::*;

use crate::common::layers::Layer;
use crate::common::tunables::{BubbleTunables, PoolPolicy, Tunables};

use super::components::{bubble_color, BubbleLease, PooledBubble, PopAnimation, ProbeReading};
use super::error::BubbleError;
use super::machine::Bubble;

/// Bubbles render above the level but below the player.
pub const BUBBLE_Z: f32 = 2.0;

#[derive(Resource, Debug)]
pub struct BubblePool {
    available: VecDeque<Entity>,
    on_loan: HashSet<Entity>,
    initial_capacity: usize,
    policy: PoolPolicy,
}

impl BubblePool {
    pub fn new(initial_capacity: usize, policy: PoolPolicy) -> Self {
        Self {
            available: VecDeque::with_capacity(initial_capacity),
            on_loan: HashSet::default(),
            initial_capacity,
            policy,
        }
    }

    pub fn from_tunables(cfg: &BubbleTunables) -> Self {
        Self::new(cfg.initial_capacity, cfg.pool_policy)
    }

    #[inline]
    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    #[inline]
    pub fn policy(&self) -> PoolPolicy {
        self.policy
    }

    #[inline]
    pub fn available_len(&self) -> usize {
        self.available.len()
    }

    #[inline]
    pub fn on_loan_len(&self) -> usize {
        self.on_loan.len()
    }

    #[inline]
    pub fn total(&self) -> usize {
        self.available.len() + self.on_loan.len()
    }

    #[inline]
    pub fn is_on_loan(&self, e: Entity) -> bool {
        self.on_loan.contains(&e)
    }

    /// Free list in acquisition order.
    pub fn available(&self) -> impl Iterator<Item = Entity> + '_ {
        self.available.iter().copied()
    }

    /// Add a newly spawned, dormant bubble to the tail of the free list.
    pub fn stock(&mut self, e: Entity) {
        debug_assert!(!self.on_loan.contains(&e) && !self.available.contains(&e));
        self.available.push_back(e);
    }

    /// Take the head of the free list.
    pub fn acquire(&mut self) -> Result<Entity, BubbleError> {
        let e = self
            .available
            .pop_front()
            .ok_or(BubbleError::PoolExhausted { on_loan: self.on_loan.len() })?;
        self.on_loan.insert(e);
        Ok(e)
    }

    /// Return a (reset) bubble to the tail of the free list.
    pub fn release(&mut self, e: Entity) -> Result<(), BubbleError> {
        if !self.on_loan.remove(&e) {
            return Err(BubbleError::NotOnLoan(e));
        }
        self.available.push_back(e);
        Ok(())
    }

    /// How many bubbles to spawn so `wanted` acquisitions succeed, or `None` when the
    /// policy forbids growing (or no growth is needed).
    pub fn growth_for(&self, wanted: usize) -> Option<usize> {
        let shortfall = wanted.saturating_sub(self.available.len());
        match self.policy {
            PoolPolicy::Grow { batch } if shortfall > 0 => {
                let batch = batch.max(1);
                Some(shortfall.div_ceil(batch) * batch)
            }
            _ => None,
        }
    }
}

#[inline]
pub(crate) fn active_bubble_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Bubble, [Layer::Player])
}

/// "Disabled" without structural changes: empty filters means we collide with nothing.
#[inline]
pub(crate) fn inactive_bubble_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Bubble, [] as [Layer; 0])
}

/// Spawn one dormant bubble (hidden, frozen, parked) and stock it.
pub fn spawn_dormant_bubble(commands: &mut Commands, pool: &mut BubblePool, cfg: &BubbleTunables) -> Entity {
    let e = commands
        .spawn((
            Name::new("Bubble(Pooled)"),
            PooledBubble,
            Bubble::dormant(),
            BubbleLease::Pooled,
            PopAnimation::default(),
            ProbeReading::default(),
            Sprite {
                color: bubble_color(None, &PopAnimation::default()),
                custom_size: Some(Vec2::splat(cfg.radius * 2.0)),
                ..default()
            },
            Transform::from_translation(cfg.dormant_anchor.extend(BUBBLE_Z))
                .with_scale(Vec3::splat(cfg.dormant_scale)),
            Visibility::Hidden,
            // Moved by the state machine, never by contacts.
            RigidBody::Kinematic,
            Collider::circle(cfg.radius),
            inactive_bubble_layers(),
        ))
        .id();

    pool.stock(e);
    e
}

/// Pre-spawn the initial pool.
pub fn init_bubble_pool(mut commands: Commands, mut pool: ResMut<BubblePool>, tunables: Res<Tunables>) {
    let count = pool.initial_capacity();
    for _ in 0..count {
        spawn_dormant_bubble(&mut commands, &mut pool, &tunables.bubble);
    }
    info!("Bubble pool ready with {count} bubbles");
}
