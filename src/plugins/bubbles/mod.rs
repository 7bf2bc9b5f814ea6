//! Bubbles plugin: pooled bubbles the player blows, rides and pops.
//!
//! # Data flow
//! ```text
//!   Update schedule (variable dt)
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (A) Producer: player::request_blow                                        │
//!│      - writes: BlowBubbleRequest message                                   │
//!│                                                                            │
//!│  (B) Detect: probe_players → advance_bubble_detection                      │
//!│      - reads: SpatialQuery (ray / circle above each bubble)                │
//!│      - mutates: Bubble (Idle → Mounted → Popping, blow-down timer)         │
//!│      - polls: PopAnimation progress → BubbleLease::PendingReturn           │
//!│                                                                            │
//!│  (C) Allocate: grow_bubble_pool → allocate_bubbles_from_pool               │
//!│      - mutates: BubblePool free list (FIFO)                                │
//!│      - mutates: Bubble (thaw + launch), Transform, Visibility, layers      │
//!│                                                                            │
//!│  (D) Present: advance_pop_animations → update_bubble_look                  │
//!└────────────────────────────────────────────────────────────────────────────┘
//!                │
//!                v
//!   FixedUpdate (fixed dt)
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (E) advance_bubble_motion                                                 │
//!│      - Growing: scale → 1, drift; Idle: sway + rise; Mounted: slow rise    │
//!│      - out of bounds → BubbleLease::PendingReturn                          │
//!└────────────────────────────────────────────────────────────────────────────┘
//!                │
//!                v
//!   PostUpdate
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (F) return_to_pool_commit                                                 │
//!│      - writes pooled invariants, Bubble::reset(), BubblePool::release()    │
//!└────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `CameraBounds` comes from the core plugin.
//!
//! Producers never borrow `ResMut<BubblePool>`; the allocator and the commit are the
//! only writers of the free list.

pub mod allocator;
pub mod commit;
pub mod components;
pub mod error;
pub mod machine;
pub mod messages;
pub mod pool;
pub mod probe;
pub mod systems;

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BubbleSystems {
    Detect,
    Allocate,
    Present,
}

pub struct BubblesPlugin;

impl Plugin for BubblesPlugin {
    fn build(&self, app: &mut App) {
        let cfg = app
            .world()
            .get_resource::<Tunables>()
            .map(|t| t.bubble.clone())
            .unwrap_or_default();

        app.insert_resource(pool::BubblePool::from_tunables(&cfg))
            .add_message::<messages::BlowBubbleRequest>()
            .add_systems(Startup, pool::init_bubble_pool);

        app.configure_sets(
            Update,
            (BubbleSystems::Detect, BubbleSystems::Allocate, BubbleSystems::Present)
                .chain()
                .run_if(in_state(GameState::InGame)),
        );

        app.add_systems(
            Update,
            (systems::probe_players, systems::advance_bubble_detection)
                .chain()
                .in_set(BubbleSystems::Detect),
        )
        .add_systems(
            Update,
            (allocator::grow_bubble_pool, allocator::allocate_bubbles_from_pool)
                .chain()
                .in_set(BubbleSystems::Allocate),
        )
        .add_systems(
            Update,
            (systems::advance_pop_animations, systems::update_bubble_look)
                .chain()
                .in_set(BubbleSystems::Present),
        );

        app.add_systems(
            FixedUpdate,
            systems::advance_bubble_motion.run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            PostUpdate,
            commit::return_to_pool_commit.run_if(in_state(GameState::InGame)),
        );
    }
}
