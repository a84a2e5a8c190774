//! Interchangeable table renderers.
//!
//! The table view owns all state (filtered rows, selection, focus, scroll
//! offset) and hands a [`Grid`] to whichever [`TableRenderer`] its
//! [`RendererKind`] names.  Both renderers draw the same layout: one header
//! line followed by the body rows, columns separated by one blank cell.

mod kit;
mod plain;

pub use kit::KitRenderer;
pub use plain::PlainRenderer;

use crate::table_view::TableStyle;
use crate::text::{truncate, ELLIPSIS};
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::Frame;
use std::rc::Rc;

/// Blank cells between columns.
pub const COLUMN_SPACING: u16 = 1;

/// Which renderer a table view uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RendererKind {
    /// Hand-built: lays out every row and cell itself.
    #[default]
    Plain,
    /// Built on ratatui's stock [`Table`](ratatui::widgets::Table) widget.
    Kit,
}

impl RendererKind {
    pub fn renderer(self) -> &'static dyn TableRenderer {
        match self {
            RendererKind::Plain => &PlainRenderer,
            RendererKind::Kit => &KitRenderer,
        }
    }
}

/// Draws a [`Grid`] into the area inside the table border.
pub trait TableRenderer: Send + Sync {
    fn render(&self, frame: &mut Frame, area: Rect, grid: &Grid<'_>);
}

/// Everything a renderer needs for one frame.
pub struct Grid<'a> {
    pub headers: Vec<&'a str>,
    pub widths: Vec<Constraint>,
    /// Every visible row; renderers draw from `offset` on.
    pub rows: Vec<GridRow>,
    pub offset: usize,
    /// Row to highlight as focused, already `None` when the view is blurred.
    pub focused: Option<usize>,
    /// Replaces the body when there are no rows.
    pub placeholder: Option<&'a str>,
    pub style: &'a TableStyle,
}

/// Cell texts (single-line, untruncated) plus selection state.
pub struct GridRow {
    pub cells: Vec<String>,
    pub selected: bool,
}

impl GridRow {
    /// Row style: base, then selection, then focus.
    pub fn style(&self, style: &TableStyle, focused: bool) -> ratatui::style::Style {
        let mut s = style.normal;
        if self.selected {
            s = s.patch(style.selected);
        }
        if focused {
            s = s.patch(style.focused_row);
        }
        s
    }
}

/// The body rows: everything below the header line.
pub fn body_area(inner: Rect) -> Rect {
    Rect {
        y: inner.y.saturating_add(1).min(inner.bottom()),
        height: inner.height.saturating_sub(1),
        ..inner
    }
}

/// Column rects inside one line.
pub fn column_areas(line: Rect, widths: &[Constraint]) -> Rc<[Rect]> {
    Layout::horizontal(widths.iter().copied())
        .flex(Flex::Start)
        .spacing(COLUMN_SPACING)
        .split(line)
}

/// Cell text cut to `width` with an ellipsis.
pub fn fit(text: &str, width: u16) -> String {
    truncate(text, width as usize, ELLIPSIS)
}
