//! Bubble behaviour state machine.
//!
//! One explicit enum (`BubbleState`) and one `match` per tick. The machine never touches
//! the world directly: the caller hands it the delta time, what the probe saw, the pop
//! animation progress and the bubble's `Transform`, and gets a `TickOutcome` back.
//!
//! ```text
//!            launch()                 probe hit
//!  Growing ───────────► Growing ──► Idle ─────────► Mounted
//!   (scale → 1.0)    scale > 0.9      │               │ probe miss && blow-down timer == 0
//!                                     │               │ or scale < 1.0
//!                                     │               v
//!                                     │            Popping ── progress ≥ 0.9 ──► Release(Popped)
//!                                     │
//!  any state, y far above the camera ─┴──────────────────────────────────────► Release(OutOfBounds)
//! ```

use bevy::prelude::*;

use crate::common::bounds::CameraBounds;
use crate::common::tunables::BubbleTunables;

use super::error::BubbleError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BubbleState {
    Growing,
    Idle,
    Mounted,
    Popping,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseReason {
    /// Pop animation finished.
    Popped,
    /// Drifted more than a screen above the camera.
    OutOfBounds,
}

/// What the host loop has to do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    /// Start the pop animation.
    BeginPop,
    /// Hand the bubble back to the pool.
    Release(ReleaseReason),
}

/// Inputs of a variable-rate tick.
#[derive(Debug, Clone, Copy)]
pub struct Sense {
    pub position: Vec2,
    pub player_above: Option<Entity>,
    pub pop_progress: f32,
}

/// Per-bubble state. `Transform` carries position and scale.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Bubble {
    state: BubbleState,
    start_position: Vec2,
    elapsed: f32,
    sway_direction: f32,
    blow_down_timer: f32,
    frozen: bool,
    launched: bool,
    mounted_player: Option<Entity>,
    velocity: Vec2,
}

impl Default for Bubble {
    fn default() -> Self {
        Self::dormant()
    }
}

impl Bubble {
    /// A pooled bubble waiting to be acquired.
    pub fn dormant() -> Self {
        Self {
            state: BubbleState::Growing,
            start_position: Vec2::ZERO,
            elapsed: 0.0,
            sway_direction: -1.0,
            blow_down_timer: 0.0,
            frozen: true,
            launched: false,
            mounted_player: None,
            velocity: Vec2::ZERO,
        }
    }

    /// `None` while frozen: pooled bubbles have no behaviour state.
    #[inline]
    pub fn state(&self) -> Option<BubbleState> {
        (!self.frozen).then_some(self.state)
    }

    #[inline]
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    #[inline]
    pub fn blow_down_timer(&self) -> f32 {
        self.blow_down_timer
    }

    #[inline]
    pub fn sway_direction(&self) -> f32 {
        self.sway_direction
    }

    #[inline]
    pub fn start_position(&self) -> Vec2 {
        self.start_position
    }

    #[inline]
    pub fn mounted_player(&self) -> Option<Entity> {
        self.mounted_player
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Activate a freshly acquired bubble at `position`.
    pub fn thaw(&mut self, position: Vec2) {
        self.frozen = false;
        self.state = BubbleState::Growing;
        self.start_position = position;
        self.elapsed = 0.0;
    }

    /// Put the bubble back into its pooled shape. Only the pool commit calls this.
    pub fn reset(&mut self) {
        *self = Self::dormant();
    }

    /// Give the bubble its initial push and pick its sway side.
    ///
    /// Returns the impulse applied. Downward launches are amplified and arm the blow-down
    /// timer so a player can land on the bubble before "player left" may pop it.
    pub fn launch(
        &mut self,
        direction: Vec2,
        force: f32,
        mirrored: bool,
        cfg: &BubbleTunables,
    ) -> Result<Vec2, BubbleError> {
        if self.frozen || self.launched || self.state != BubbleState::Growing {
            return Err(BubbleError::InvalidState {
                state: self.state(),
                launched: self.launched,
            });
        }

        self.launched = true;
        self.sway_direction = if mirrored { 1.0 } else { -1.0 };

        let impulse = if is_downward(direction, cfg.down_alignment) {
            self.blow_down_timer = cfg.blow_down_time.max(0.0);
            direction * force * cfg.down_blow_multiplier
        } else {
            direction * force
        };

        self.velocity += impulse / cfg.mass.max(f32::EPSILON);
        Ok(impulse)
    }

    /// Detection and timers (variable rate).
    pub fn on_variable_tick(&mut self, dt: f32, sense: Sense, cfg: &BubbleTunables) -> TickOutcome {
        if self.frozen {
            return TickOutcome::Continue;
        }

        let outcome = match self.state {
            BubbleState::Growing => TickOutcome::Continue,
            BubbleState::Idle => {
                if let Some(player) = sense.player_above {
                    self.enter_mounted(sense.position, player);
                }
                TickOutcome::Continue
            }
            BubbleState::Mounted => {
                if sense.player_above.is_none() && self.blow_down_timer <= 0.0 {
                    self.state = BubbleState::Popping;
                    TickOutcome::BeginPop
                } else {
                    TickOutcome::Continue
                }
            }
            BubbleState::Popping => {
                if sense.pop_progress >= cfg.pop_complete_threshold {
                    TickOutcome::Release(ReleaseReason::Popped)
                } else {
                    TickOutcome::Continue
                }
            }
        };

        self.blow_down_timer = (self.blow_down_timer - dt).max(0.0);
        outcome
    }

    /// Motion (fixed rate). Also runs the out-of-bounds safety release.
    pub fn on_fixed_tick(
        &mut self,
        dt: f32,
        tf: &mut Transform,
        bounds: &CameraBounds,
        cfg: &BubbleTunables,
    ) -> TickOutcome {
        if self.frozen {
            return TickOutcome::Continue;
        }

        let outcome = match self.state {
            BubbleState::Growing => {
                self.grow(dt, tf, cfg);
                TickOutcome::Continue
            }
            BubbleState::Idle => {
                self.elapsed += dt;
                let offset = Vec2::new(
                    (self.elapsed * cfg.horizontal_speed).sin() * cfg.side_sway * self.sway_direction,
                    self.elapsed * cfg.vertical_speed,
                );
                set_position(tf, self.start_position + offset);
                TickOutcome::Continue
            }
            BubbleState::Mounted => {
                if tf.scale.x < 1.0 {
                    self.state = BubbleState::Popping;
                    TickOutcome::BeginPop
                } else {
                    self.elapsed += dt;
                    let rise = self.elapsed * cfg.vertical_speed * cfg.mounted_rise_factor;
                    set_position(tf, self.start_position + Vec2::Y * rise);
                    TickOutcome::Continue
                }
            }
            BubbleState::Popping => TickOutcome::Continue,
        };

        if bounds.is_far_above(tf.translation.y) {
            return TickOutcome::Release(ReleaseReason::OutOfBounds);
        }
        outcome
    }

    fn grow(&mut self, dt: f32, tf: &mut Transform, cfg: &BubbleTunables) {
        // Blow drift: integrate, then bleed off.
        let position = tf.translation.truncate() + self.velocity * dt;
        self.velocity *= (-cfg.blow_drag * dt).exp();
        set_position(tf, position);

        // Frame-rate independent exponential approach.
        let scale = tf.scale.x.clamp(0.0, 1.0);
        let alpha = 1.0 - (-cfg.growth_rate * dt).exp();
        let next = (scale + (1.0 - scale) * alpha).clamp(scale, 1.0);

        if next > cfg.completion_threshold {
            tf.scale = Vec3::ONE;
            self.enter_idle(position);
        } else {
            tf.scale = Vec3::splat(next);
        }
    }

    fn enter_idle(&mut self, position: Vec2) {
        self.state = BubbleState::Idle;
        self.start_position = position;
        self.elapsed = 0.0;
        self.velocity = Vec2::ZERO;
    }

    fn enter_mounted(&mut self, position: Vec2, player: Entity) {
        self.state = BubbleState::Mounted;
        self.start_position = position;
        self.elapsed = 0.0;
        self.mounted_player = Some(player);
    }
}

/// A launch counts as "blown down" when it points within `alignment` (cosine) of -Y.
pub fn is_downward(direction: Vec2, alignment: f32) -> bool {
    let Some(dir) = direction.try_normalize() else {
        return false;
    };
    dir.dot(Vec2::NEG_Y) >= alignment
}

#[inline]
fn set_position(tf: &mut Transform, p: Vec2) {
    tf.translation.x = p.x;
    tf.translation.y = p.y;
}
