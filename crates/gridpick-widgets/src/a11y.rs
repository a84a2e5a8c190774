//! Accessibility snapshot of a table view.
//!
//! Terminals have no accessibility tree, so the table exposes the same
//! facts a grid would publish to one: role, per-row selected/focusable/
//! focused state and the full text behind each (possibly truncated) cell.

use crate::data::RowId;

/// Role of the snapshot root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Grid,
}

/// The whole grid as an assistive client would see it.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSnapshot {
    pub role: Role,
    /// Title of the table, empty when untitled.
    pub label: String,
    /// Visible (filtered) rows in display order.
    pub rows: Vec<RowSnapshot>,
    /// Placeholder announced instead of rows ("No data" / "No matches").
    pub status: Option<String>,
}

/// One visible row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowSnapshot {
    pub id: RowId,
    /// Position in the filtered sequence.
    pub position: usize,
    pub selected: bool,
    pub focusable: bool,
    pub focused: bool,
    pub cells: Vec<CellSnapshot>,
}

/// One cell; `title` is the untruncated text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellSnapshot {
    pub column: String,
    pub title: String,
}

impl GridSnapshot {
    /// The row carrying focus, if any.
    pub fn focused_row(&self) -> Option<&RowSnapshot> {
        self.rows.iter().find(|r| r.focused)
    }

    /// Rows flagged as selected.
    pub fn selected_rows(&self) -> impl Iterator<Item = &RowSnapshot> {
        self.rows.iter().filter(|r| r.selected)
    }
}
