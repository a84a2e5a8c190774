//! Widgets for **gridpick**: a filterable table and a combobox built on it.
//!
//! Every widget implements [`gridpick_core::Component`], so it can be
//! embedded inside any [`gridpick_core::Model`] and placed anywhere in a
//! [`ratatui`] layout.
//!
//! # Widgets
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`table_view`] | Filterable table with single selection and roving row focus |
//! | [`combobox`] | Dropdown whose options are the rows of a searchable table |
//! | [`text_input`] | Single-line text input field |
//!
//! # Building blocks
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`data`] | Rows, row ids and column definitions |
//! | [`filter`] | Case-insensitive substring row filter |
//! | [`selection`] | [`RovingFocus`](selection::RovingFocus) cursor with wrap-around |
//! | [`render`] | Interchangeable table renderers (plain and kit) |
//! | [`a11y`] | Accessibility snapshot of a table |
//! | [`focus`] | [`FocusGroup`](focus::FocusGroup) for managing focus across components |
//! | [`key`] | Key-binding helpers and help lines |
//! | [`overlay`] | Placement of floating panels |
//! | [`chrome`] | Shared border blocks |
//! | [`text`] | Unicode-aware width and truncation utilities |

pub mod a11y;
pub mod chrome;
pub mod combobox;
pub mod data;
pub mod filter;
pub mod focus;
pub mod key;
pub mod overlay;
pub mod render;
pub mod selection;
pub mod table_view;
pub mod text;
pub mod text_input;
