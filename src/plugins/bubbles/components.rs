use bevy::prelude::*;

use super::machine::{BubbleState, ReleaseReason};

/// Tint of a bubble nobody rides (pooled, growing, idle).
pub const FREE_BUBBLE_TINT: Color = Color::srgb(0.75, 0.9, 1.0);
/// Tint while a player rides the bubble or it pops.
pub const RIDDEN_BUBBLE_TINT: Color = Color::srgb(0.55, 0.8, 1.0);
/// Alpha of a bubble that is not popping.
pub const BUBBLE_ALPHA: f32 = 0.85;

/// Sprite colour for a bubble in `state` with its pop animation at `pop`.
pub fn bubble_color(state: Option<BubbleState>, pop: &PopAnimation) -> Color {
    let tint = match state {
        Some(BubbleState::Mounted) | Some(BubbleState::Popping) => RIDDEN_BUBBLE_TINT,
        _ => FREE_BUBBLE_TINT,
    };
    let alpha = if pop.is_playing() { BUBBLE_ALPHA * (1.0 - pop.progress()) } else { BUBBLE_ALPHA };
    tint.with_alpha(alpha)
}

#[derive(Component)]
pub struct PooledBubble;

/// Pool-side view of a bubble.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BubbleLease {
    #[default]
    Pooled,
    OnLoan,
    /// The machine is done with it; the return commit resets and recycles it.
    PendingReturn(ReleaseReason),
}

/// Last probe result (written in `Update`, read by the detection tick).
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProbeReading {
    pub player_above: Option<Entity>,
}

/// Pop animation driven by the presentation side.
///
/// `progress` goes from 0 to 1 over the pop duration and never decreases while playing.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct PopAnimation {
    playing: bool,
    progress: f32,
}

impl PopAnimation {
    #[inline]
    pub fn start(&mut self) {
        self.playing = true;
        self.progress = 0.0;
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    #[inline]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn advance(&mut self, dt: f32, duration: f32) {
        if !self.playing {
            return;
        }
        self.progress = (self.progress + dt / duration.max(0.0001)).min(1.0);
    }

    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
