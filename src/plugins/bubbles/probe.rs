//! Player detection above a bubble.
//!
//! The state machine never calls the physics engine itself. It only sees the result of a
//! `SpatialProbe`, which keeps it testable with scripted hit/miss sequences.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::Layer;
use crate::common::tunables::{BubbleTunables, ProbeShape};

/// Side-effect free query: which player (if any) stands on the bubble at `origin`.
pub trait SpatialProbe {
    fn player_above(&self, origin: Vec2, scale: f32, exclude: Entity) -> Option<Entity>;
}

/// Probe backed by Avian's `SpatialQuery`.
pub struct AvianProbe<'a, 'w, 's> {
    query: &'a SpatialQuery<'w, 's>,
    shape: ProbeShape,
    reach: f32,
}

impl<'a, 'w, 's> AvianProbe<'a, 'w, 's> {
    pub fn new(query: &'a SpatialQuery<'w, 's>, cfg: &BubbleTunables) -> Self {
        Self { query, shape: cfg.probe, reach: cfg.player_check_distance }
    }
}

impl SpatialProbe for AvianProbe<'_, '_, '_> {
    fn player_above(&self, origin: Vec2, scale: f32, exclude: Entity) -> Option<Entity> {
        let filter = SpatialQueryFilter::from_mask(Layer::Player).with_excluded_entities([exclude]);

        match self.shape {
            ProbeShape::Ray => {
                let distance = scale * self.reach;
                if distance <= 0.0 {
                    return None;
                }
                self.query
                    .cast_ray(origin, Dir2::Y, distance, true, &filter)
                    .map(|hit| hit.entity)
            }
            ProbeShape::Circle { radius, offset } => self
                .query
                .shape_intersections(&Collider::circle(radius * scale), origin + offset * scale, 0.0, &filter)
                .into_iter()
                .next(),
        }
    }
}

/// Probe the bubble `e` at its current transform.
#[inline]
pub fn probe_bubble<P: SpatialProbe + ?Sized>(probe: &P, e: Entity, tf: &Transform) -> Option<Entity> {
    probe.player_above(tf.translation.truncate(), tf.scale.y, e)
}
