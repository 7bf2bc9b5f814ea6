//! Buffered blow requests.
//!
//! The player controller only writes intent; the allocator is the single writer of the
//! pool free list.

use bevy::prelude::*;

#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct BlowBubbleRequest {
    /// Where the bubble appears.
    pub pos: Vec2,
    /// Unit (or near-unit) launch direction.
    pub direction: Vec2,
    pub force: f32,
    /// Player faces left.
    pub mirrored: bool,
}
