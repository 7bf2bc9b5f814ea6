//! Level plugin: height based progression, checkpoints and the level tint.
//!
//! Every `distance_per_level` units climbed the level goes up by one. The player's height at
//! that moment becomes the checkpoint: a new ground segment is laid under it, and falling
//! below it teleports the player back.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::state::GameState;
use crate::common::tunables::{LevelTunables, Tunables};
use crate::plugins::player::Player;
use crate::plugins::world::spawn_ground;

/// Distance from the player's origin to the soles of their feet.
const FEET_OFFSET: f32 = 0.5;
/// Resting contact may sink a hair below the checkpoint; only a real fall teleports.
const FALL_TOLERANCE: f32 = 0.25;

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct LevelProgress {
    /// 1-based.
    pub level: u32,
    pub checkpoint: Vec2,
    /// Player height seen on the last frame.
    pub distance_traveled: f32,
}

impl Default for LevelProgress {
    fn default() -> Self {
        Self { level: 1, checkpoint: Vec2::new(0.0, FEET_OFFSET), distance_traveled: 0.0 }
    }
}

impl LevelProgress {
    /// Height at which the current level ends.
    #[inline]
    pub fn next_threshold(&self, cfg: &LevelTunables) -> f32 {
        cfg.distance_per_level * self.level as f32
    }

    /// Record the player height. Returns the new checkpoint when a level boundary is crossed.
    pub fn observe(&mut self, y: f32, cfg: &LevelTunables) -> Option<Vec2> {
        self.distance_traveled = y;
        if y < self.next_threshold(cfg) {
            return None;
        }
        self.level += 1;
        self.checkpoint = Vec2::new(0.0, y);
        Some(self.checkpoint)
    }

    #[inline]
    pub fn fell_below_checkpoint(&self, y: f32) -> bool {
        y < self.checkpoint.y - FALL_TOLERANCE
    }

    /// Fraction of the current level climbed, in `[0, 1]`.
    pub fn level_fraction(&self, cfg: &LevelTunables) -> f32 {
        let start = cfg.distance_per_level * (self.level - 1) as f32;
        ((self.distance_traveled - start) / cfg.distance_per_level).clamp(0.0, 1.0)
    }
}

/// Colours derived from the level and the climb within it.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct LevelTint {
    pub overlay: Color,
    pub bloom: Color,
}

impl Default for LevelTint {
    fn default() -> Self {
        tint_for(&LevelProgress::default(), &LevelTunables::default())
    }
}

pub fn level_color(level: u32, cfg: &LevelTunables) -> Color {
    let idx = (level.max(1) - 1) as usize;
    cfg.colors.get(idx).or(cfg.colors.last()).copied().unwrap_or(Color::WHITE)
}

pub fn tint_for(progress: &LevelProgress, cfg: &LevelTunables) -> LevelTint {
    let base = level_color(progress.level, cfg).to_srgba();
    let overlay = base.with_alpha(progress.level_fraction(cfg) * cfg.overlay_max_alpha);
    let bloom = Srgba::new(
        overlay.red * cfg.bloom_intensity,
        overlay.green * cfg.bloom_intensity,
        overlay.blue * cfg.bloom_intensity,
        overlay.alpha,
    );
    LevelTint { overlay: overlay.into(), bloom: bloom.into() }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<LevelProgress>()
        .init_resource::<LevelTint>()
        .add_systems(OnEnter(GameState::InGame), reset_progress)
        .add_systems(
            Update,
            (advance_level, catch_falls, update_level_tint)
                .chain()
                .run_if(in_state(GameState::InGame)),
        );
}

fn reset_progress(mut progress: ResMut<LevelProgress>) {
    *progress = LevelProgress::default();
}

fn advance_level(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut progress: ResMut<LevelProgress>,
    q_player: Query<&Transform, With<Player>>,
) {
    let Ok(tf) = q_player.single() else {
        return;
    };
    let cfg = &tunables.level;

    if let Some(checkpoint) = progress.observe(tf.translation.y, cfg) {
        spawn_ground(&mut commands, checkpoint - Vec2::Y * FEET_OFFSET, cfg.ground_width);
        info!("Level {} reached, checkpoint at {:.2}", progress.level, checkpoint.y);
    }
}

fn catch_falls(
    progress: Res<LevelProgress>,
    mut q_player: Query<(&mut Transform, Option<&mut LinearVelocity>), With<Player>>,
) {
    let Ok((mut tf, vel)) = q_player.single_mut() else {
        return;
    };
    if !progress.fell_below_checkpoint(tf.translation.y) {
        return;
    }

    debug!("Player fell to {:.2}, back to checkpoint", tf.translation.y);
    tf.translation.x = progress.checkpoint.x;
    tf.translation.y = progress.checkpoint.y;
    if let Some(mut vel) = vel {
        vel.0 = Vec2::ZERO;
    }
}

fn update_level_tint(tunables: Res<Tunables>, progress: Res<LevelProgress>, mut tint: ResMut<LevelTint>) {
    if !progress.is_changed() {
        return;
    }
    tint.set_if_neq(tint_for(&progress, &tunables.level));
}
