//! Core runtime for **gridpick**.
//!
//! `gridpick-core` provides the traits, types and runtime behind the
//! gridpick widgets.  Programs follow the [Elm Architecture]: state lives in
//! a [`Model`], input arrives as messages through [`Subscription`]s, and side
//! effects leave [`Model::update`] as [`Command`]s.
//!
//! # Key types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Model`] | Top-level application trait (init / update / view) |
//! | [`Component`] | Reusable sub-model that renders into a [`ratatui::layout::Rect`] |
//! | [`Command`] | Side effect executed by the runtime, including messages deferred past the next render |
//! | [`Subscription`] | Long-lived event source (terminal events, pointer presses) |
//! | [`Program`] | Wires a [`Model`] to a real terminal and drives the event loop |
//! | [`TestProgram`](testing::TestProgram) | Headless harness for unit-testing a [`Model`] |
//!
//! # Render-then-act
//!
//! [`Command::after_render`] holds a message back until the frame produced
//! by the current update has been drawn.  Widgets use it to move focus into
//! something that only exists once drawn, such as the search field of a
//! freshly opened dropdown.
//!
//! [Elm Architecture]: https://guide.elm-lang.org/architecture/

pub mod command;
pub mod component;
pub mod event;
pub mod model;
pub mod runtime;
pub mod subscription;
pub mod subscriptions;
pub mod testing;

pub use command::{Command, TerminalCommand};
pub use component::Component;
pub use event::TerminalEvent;
pub use model::Model;
pub use runtime::{OutputTarget, Program, ProgramError, ProgramOptions};
pub use subscription::{Subscription, SubscriptionId};
pub use subscriptions::{pointer_presses, terminal_events};

/// Run a gridpick application with default options.
pub async fn run<M: Model>(flags: M::Flags) -> Result<M, ProgramError> {
    Program::<M>::new(flags)?.run().await
}

/// Run with custom options.
pub async fn run_with<M: Model>(
    flags: M::Flags,
    options: ProgramOptions,
) -> Result<M, ProgramError> {
    Program::<M>::with_options(flags, options)?.run().await
}
