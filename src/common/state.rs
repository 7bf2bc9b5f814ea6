//! Top-level game state.

use bevy::prelude::*;

/// Gameplay systems (player, bubbles, level) only run in `InGame`; level
/// geometry is tagged with `DespawnOnExit(GameState::InGame)`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    #[default]
    InGame,
}
