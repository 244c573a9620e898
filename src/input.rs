//! Pointer input for the backdrop.
//!
//! [`PointerTracker`] is a thin layer over raw window events: it keeps the
//! last pointer position in logical pixels plus an active flag, and nothing
//! else. The field reads the resulting [`PointerState`] once per tick; events
//! that arrive mid-frame are simply picked up by the next tick.

use glam::Vec2;
use winit::event::WindowEvent;

/// Where the pointer is, and whether it is over the surface at all.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    /// Pointer position in logical pixels.
    pub position: Vec2,
    /// False until the first move, and after the pointer leaves the window.
    pub active: bool,
}

impl Default for PointerState {
    fn default() -> Self {
        // Far off-surface so a stale read can never produce a proximity link.
        Self {
            position: Vec2::new(-9999.0, -9999.0),
            active: false,
        }
    }
}

/// Tracks pointer state from winit window events.
#[derive(Debug)]
pub struct PointerTracker {
    state: PointerState,
    scale_factor: f64,
}

impl PointerTracker {
    /// Create a tracker; the scale factor converts physical event coordinates
    /// to the logical pixels the field simulates in.
    pub fn new(scale_factor: f64) -> Self {
        Self {
            state: PointerState::default(),
            scale_factor,
        }
    }

    /// Update the scale factor after a monitor change or DPI event.
    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        self.scale_factor = scale_factor;
    }

    /// The current pointer state.
    #[inline]
    pub fn state(&self) -> &PointerState {
        &self.state
    }

    /// Process a winit window event.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.pointer_moved(position.x, position.y);
            }
            WindowEvent::CursorLeft { .. } => {
                self.pointer_left();
            }
            _ => {}
        }
    }

    fn pointer_moved(&mut self, physical_x: f64, physical_y: f64) {
        self.state.position = Vec2::new(
            (physical_x / self.scale_factor) as f32,
            (physical_y / self.scale_factor) as f32,
        );
        self.state.active = true;
    }

    fn pointer_left(&mut self) {
        self.state.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_inactive_and_offscreen() {
        let tracker = PointerTracker::new(1.0);
        assert!(!tracker.state().active);
        assert!(tracker.state().position.x < 0.0);
    }

    #[test]
    fn test_move_activates_and_scales() {
        let mut tracker = PointerTracker::new(2.0);
        // Simulate a cursor move via direct state manipulation (normally
        // done via handle_event).
        tracker.pointer_moved(200.0, 100.0);
        assert!(tracker.state().active);
        assert_eq!(tracker.state().position, Vec2::new(100.0, 50.0));
    }

    #[test]
    fn test_leave_deactivates_but_keeps_position() {
        let mut tracker = PointerTracker::new(1.0);
        tracker.pointer_moved(40.0, 30.0);
        tracker.pointer_left();
        assert!(!tracker.state().active);
        assert_eq!(tracker.state().position, Vec2::new(40.0, 30.0));
    }
}
