//! Bubble lifecycle errors.
//!
//! All of these are caller-contract problems or capacity decisions. Transient probe
//! misses and out-of-bounds drift are handled by the state machine and never show up here.

use bevy::prelude::*;
use thiserror::Error;

use super::machine::BubbleState;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BubbleError {
    /// `launch()` on a bubble that is frozen, already launched, or past `Growing`.
    #[error("bubble cannot be launched (state: {state:?}, already launched: {launched})")]
    InvalidState {
        state: Option<BubbleState>,
        launched: bool,
    },

    /// Free list empty and the pool is not allowed to grow.
    #[error("bubble pool exhausted ({on_loan} bubbles on loan)")]
    PoolExhausted { on_loan: usize },

    #[error("entity {0:?} is not on loan from the bubble pool")]
    NotOnLoan(Entity),
}
