//! Page interaction widgets.
//!
//! Each submodule is an independent state machine modeling one interaction of
//! a portfolio-style page: fade-out navigation, scroll reveal, card
//! spotlight, tag filtering, a typewriter headline, a collapsible nav menu,
//! and a focus-restoring modal. They share no state with each other or with
//! the backdrop renderer, and none of them performs I/O: the host feeds
//! events in and projects the resulting state onto whatever it renders.
//!
//! All widgets are inert when their host has nothing for them to act on
//! (no cards, no focusable elements, and so on); absence is a silent no-op,
//! never an error.

pub mod fade;
pub mod filter;
pub mod menu;
pub mod modal;
pub mod reveal;
pub mod spotlight;
pub mod typewriter;
