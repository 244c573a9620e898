//! # Gossamer
//!
//! An ambient particle-network backdrop for desktop apps, plus the small
//! interaction state machines of a portfolio-style kiosk page.
//!
//! The backdrop fills a window with slowly drifting dots, draws links between
//! dots that come near each other, and links dots to the pointer while it
//! hovers. It honors the reduced-motion preference by not starting at all.
//!
//! ## Quick Start
//!
//! ```ignore
//! use gossamer::Backdrop;
//!
//! fn main() -> Result<(), gossamer::BackdropError> {
//!     Backdrop::new()
//!         .with_title("portfolio")
//!         .run()
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Field
//!
//! [`Field`] owns the particles and the logical surface dimensions. Its
//! `tick` advances one frame and returns a [`FrameGeometry`] of plain dot
//! and link lists, so every visual rule is testable without a window. The
//! particle count follows the surface area (`clamp(round(w*h/15000), 35,
//! 120)`), and a resize rebuilds the whole set.
//!
//! ### Backdrop
//!
//! [`Backdrop`] wires the field to a winit window and a wgpu swapchain:
//! configure with method chaining, call `.run()`, and the redraw loop runs
//! until the window closes or a [`StopHandle`] is raised. Spawn randomness is
//! seedable via [`Backdrop::with_seed`] for reproducible layouts.
//!
//! ### Widgets
//!
//! The [`ui`] module holds independent page-interaction state machines:
//! fade-out navigation, scroll reveal, card spotlight, tag filter,
//! typewriter, menu toggle, and a focus-restoring modal. They share nothing
//! with the backdrop and perform no I/O; hosts feed events in and project
//! the state out.
//!
//! ## Reduced motion
//!
//! Set `GOSSAMER_REDUCED_MOTION=1` (or a config/builder override) and the
//! backdrop never constructs a particle or issues a draw call, while
//! [`ui::typewriter::Typewriter::with_reduced_motion`] degrades the headline
//! to static text.

mod backdrop;
pub mod config;
mod error;
pub mod field;
mod gpu;
pub mod input;
pub mod spawn;
pub mod time;
pub mod ui;
pub mod visuals;

pub use backdrop::{Backdrop, StopHandle};
pub use config::{BackdropConfig, ReducedMotion};
pub use error::{BackdropError, ConfigError, GpuError};
pub use field::{Field, FrameGeometry, Particle, Surface};
pub use glam::Vec2;
pub use input::PointerState;
pub use visuals::{LinkStyle, Palette, Rgba};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use gossamer::prelude::*;
/// ```
pub mod prelude {
    pub use crate::backdrop::{Backdrop, StopHandle};
    pub use crate::config::{BackdropConfig, ReducedMotion};
    pub use crate::error::BackdropError;
    pub use crate::field::{Field, FrameGeometry, Particle, Surface};
    pub use crate::input::PointerState;
    pub use crate::time::Time;
    pub use crate::ui;
    pub use crate::visuals::{LinkStyle, Palette, Rgba};
    pub use crate::Vec2;
}
