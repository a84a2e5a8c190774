use super::{body_area, column_areas, fit, Grid, TableRenderer, COLUMN_SPACING};
use ratatui::layout::{Flex, Rect};
use ratatui::widgets::{Cell, HighlightSpacing, Paragraph, Row, Table, TableState};
use ratatui::Frame;

fn fitted<'a>(texts: impl Iterator<Item = &'a str>, cols: &[Rect]) -> Vec<Cell<'static>> {
    texts
        .zip(cols.iter())
        .map(|(text, col)| Cell::from(fit(text, col.width)))
        .collect()
}

/// Delegates to ratatui's [`Table`], driving it through a [`TableState`]
/// built from the view's offset and focus.
pub struct KitRenderer;

impl TableRenderer for KitRenderer {
    fn render(&self, frame: &mut Frame, area: Rect, grid: &Grid<'_>) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        // Same column math as the table, so truncation matches what it draws.
        let cols = column_areas(Rect { height: 1, ..area }, &grid.widths);

        let header = Row::new(fitted(grid.headers.iter().copied(), &cols)).style(grid.style.header);
        let rows: Vec<Row> = if grid.placeholder.is_some() {
            Vec::new()
        } else {
            grid.rows
                .iter()
                .map(|row| {
                    Row::new(fitted(row.cells.iter().map(String::as_str), &cols))
                        .style(row.style(grid.style, false))
                })
                .collect()
        };

        let table = Table::new(rows, grid.widths.iter().copied())
            .header(header)
            .column_spacing(COLUMN_SPACING)
            .flex(Flex::Start)
            .row_highlight_style(grid.style.focused_row)
            .highlight_spacing(HighlightSpacing::Never);
        let mut state = TableState::default()
            .with_offset(grid.offset)
            .with_selected(grid.focused);
        frame.render_stateful_widget(table, area, &mut state);

        if let Some(text) = grid.placeholder {
            let body = body_area(area);
            if body.height > 0 {
                frame.render_widget(
                    Paragraph::new(fit(text, body.width)).style(grid.style.placeholder),
                    Rect { height: 1, ..body },
                );
            }
        }
    }
}
