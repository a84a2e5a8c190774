//! **gridpick** -- searchable table pickers for [`ratatui`].
//!
//! This is the umbrella crate that re-exports everything you need from a
//! single dependency:
//!
//! ```toml
//! [dependencies]
//! gridpick = "0.1"
//! ```
//!
//! # Re-exports
//!
//! * All public items from [`gridpick_core`] are available at the crate root
//!   ([`Model`], [`Component`], [`Command`], [`Subscription`], [`Program`],
//!   [`run`], [`run_with`], etc.).
//! * The [`widgets`] module re-exports everything from [`gridpick_widgets`]
//!   ([`TableView`](widgets::table_view::TableView),
//!   [`Combobox`](widgets::combobox::Combobox) and their building blocks).
//! * [`ratatui`], [`crossterm`], and [`tokio`] are re-exported so downstream
//!   crates do not need to depend on them directly.
//!
//! # Quick start
//!
//! ```ignore
//! use gridpick::widgets::combobox::{self, Combobox};
//! use gridpick::widgets::data::{Column, Row};
//! use gridpick::{Command, Component, Model, Subscription};
//! use ratatui::Frame;
//!
//! struct Picker { combobox: Combobox }
//!
//! #[derive(Debug)]
//! enum Msg { Combobox(combobox::Message) }
//!
//! impl Model for Picker {
//!     type Message = Msg;
//!     type Flags = Vec<Row>;
//!
//!     fn init(rows: Vec<Row>) -> (Self, Command<Msg>) {
//!         let columns = vec![Column::new("name", "Name")];
//!         let mut combobox = Combobox::new(rows, columns);
//!         combobox.focus();
//!         (Picker { combobox }, Command::none())
//!     }
//!     fn update(&mut self, msg: Msg) -> Command<Msg> {
//!         match msg {
//!             Msg::Combobox(m) => self.combobox.update(m).map(Msg::Combobox),
//!         }
//!     }
//!     fn view(&self, frame: &mut Frame) {
//!         self.combobox.view(frame, frame.area());
//!     }
//!     fn subscriptions(&self) -> Vec<Subscription<Msg>> {
//!         self.combobox
//!             .subscriptions()
//!             .into_iter()
//!             .map(|s| s.map(Msg::Combobox))
//!             .collect()
//!     }
//! }
//! ```

pub use gridpick_core::*;
pub mod widgets {
    pub use gridpick_widgets::*;
}

// Re-export dependencies for use in demos and downstream crates
pub use crossterm;
pub use ratatui;
pub use tokio;
