//! Pointer-relative spotlight position for hover cards.
//!
//! Converts a pointer position into percentage coordinates within a card's
//! rectangle, the values the host feeds into its highlight gradient.

use glam::Vec2;

/// A card's rectangle in the same coordinate space as the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardRect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl CardRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Whether a point lies within the card.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.origin.x
            && point.y >= self.origin.y
            && point.x <= self.origin.x + self.size.x
            && point.y <= self.origin.y + self.size.y
    }
}

/// Pointer position as percentages of the card's extent, or `None` when the
/// pointer is outside the card (the highlight should not move).
pub fn track(rect: &CardRect, pointer: Vec2) -> Option<Vec2> {
    if rect.size.x <= 0.0 || rect.size.y <= 0.0 || !rect.contains(pointer) {
        return None;
    }
    Some((pointer - rect.origin) / rect.size * 100.0)
}
