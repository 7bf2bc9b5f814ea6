//! Tunable gameplay constants.
//!
//! World units are meters: the camera shows `camera.view_height` of them vertically.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone, Default)]
pub struct Tunables {
    pub physics: PhysicsTunables,
    pub player: PlayerTunables,
    pub bubble: BubbleTunables,
    pub camera: CameraTunables,
    pub level: LevelTunables,
}

#[derive(Debug, Clone)]
pub struct PhysicsTunables {
    /// Avian length unit (typical object size in world units).
    pub length_unit: f32,
    pub gravity: f32,
}

impl Default for PhysicsTunables {
    fn default() -> Self {
        Self { length_unit: 1.0, gravity: 9.81 }
    }
}

#[derive(Debug, Clone)]
pub struct PlayerTunables {
    pub speed: f32,
    pub acceleration: f32,
    pub deceleration: f32,
    pub jump_force: f32,
    /// Horizontal band `(min, max)`; outside of it the player gets thrown back.
    pub out_of_bounds_x: Vec2,
    pub throw_back_force: f32,
    pub blow_force: f32,
    pub ground_check_width: f32,
    pub ground_check_height: f32,
    pub spawn: Vec2,
}

impl Default for PlayerTunables {
    fn default() -> Self {
        Self {
            speed: 2.0,
            acceleration: 20.0,
            deceleration: 1.0,
            jump_force: 5.0,
            out_of_bounds_x: Vec2::new(-10.5, 10.5),
            throw_back_force: 2.0,
            blow_force: 20.0,
            ground_check_width: 0.4,
            ground_check_height: 1.1,
            spawn: Vec2::new(0.0, 1.0),
        }
    }
}

/// What to do when the free list is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolPolicy {
    /// Spawn `batch` more dormant bubbles and keep them for good.
    Grow { batch: usize },
    /// Refuse; the request is dropped.
    Fixed,
}

/// Region the player probe checks above a bubble.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProbeShape {
    /// Upward ray of length `scale * player_check_distance`.
    Ray,
    /// Circle overlap centred at `offset * scale` from the bubble.
    Circle { radius: f32, offset: Vec2 },
}

#[derive(Debug, Clone)]
pub struct BubbleTunables {
    /// Exponential approach rate of the scale towards 1.0 while growing.
    pub growth_rate: f32,
    /// Scale above which growth snaps to 1.0 and the bubble goes idle.
    pub completion_threshold: f32,
    pub side_sway: f32,
    pub horizontal_speed: f32,
    pub vertical_speed: f32,
    /// Fraction of `vertical_speed` applied while a player rides the bubble.
    pub mounted_rise_factor: f32,
    pub player_check_distance: f32,
    pub probe: ProbeShape,
    pub blow_down_time: f32,
    pub down_blow_multiplier: f32,
    /// Minimum dot product with -Y for a launch to count as "blown down".
    pub down_alignment: f32,
    /// Exponential decay rate of the blow drift.
    pub blow_drag: f32,
    pub mass: f32,
    pub radius: f32,
    pub pop_duration: f32,
    pub pop_complete_threshold: f32,
    pub dormant_scale: f32,
    pub dormant_anchor: Vec2,
    pub initial_capacity: usize,
    pub pool_policy: PoolPolicy,
}

impl Default for BubbleTunables {
    fn default() -> Self {
        Self {
            growth_rate: 20.0,
            completion_threshold: 0.9,
            side_sway: 1.0,
            horizontal_speed: 1.0,
            vertical_speed: 0.5,
            mounted_rise_factor: 0.5,
            player_check_distance: 3.0,
            probe: ProbeShape::Ray,
            blow_down_time: 3.0,
            down_blow_multiplier: 10.0,
            down_alignment: 0.999,
            blow_drag: 4.0,
            mass: 1.0,
            radius: 0.5,
            pop_duration: 0.35,
            pop_complete_threshold: 0.9,
            dormant_scale: 0.1,
            dormant_anchor: Vec2::new(0.0, -1000.0),
            initial_capacity: 20,
            pool_policy: PoolPolicy::Grow { batch: 20 },
        }
    }
}

#[derive(Debug, Clone)]
pub struct CameraTunables {
    pub view_height: f32,
    pub responsiveness: f32,
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
}

impl Default for CameraTunables {
    fn default() -> Self {
        Self { view_height: 10.0, responsiveness: 5.0, min_x: -2.0, max_x: 2.0, min_y: 0.0 }
    }
}

#[derive(Debug, Clone)]
pub struct LevelTunables {
    /// Height the player climbs per level.
    pub distance_per_level: f32,
    pub colors: Vec<Color>,
    pub overlay_max_alpha: f32,
    pub bloom_intensity: f32,
    pub ground_width: f32,
}

impl Default for LevelTunables {
    fn default() -> Self {
        Self {
            distance_per_level: 20.0,
            colors: vec![
                Color::srgb(0.35, 0.75, 1.0),
                Color::srgb(0.45, 1.0, 0.6),
                Color::srgb(1.0, 0.85, 0.35),
                Color::srgb(1.0, 0.45, 0.35),
                Color::srgb(0.8, 0.45, 1.0),
            ],
            overlay_max_alpha: 0.25,
            bloom_intensity: 0.9,
            ground_width: 8.0,
        }
    }
}
