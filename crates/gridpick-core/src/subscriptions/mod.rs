//! Built-in subscription sources.
//!
//! All of them read from one shared terminal event pump:
//!
//! - [`terminal_events`] -- every keyboard, mouse, resize, focus and paste
//!   event, mapped through a closure.
//! - [`pointer_presses`] -- left-button presses only, keyed by an owner id so
//!   several widgets can each hold one.

mod terminal;

pub use terminal::*;
