use super::{body_area, column_areas, fit, Grid, TableRenderer};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::Frame;

/// Lays out the header and each body row cell by cell.
pub struct PlainRenderer;

fn put_cells(buf: &mut Buffer, line: Rect, grid: &Grid<'_>, cells: &[impl AsRef<str>]) {
    for (text, col) in cells.iter().zip(column_areas(line, &grid.widths).iter()) {
        if col.width == 0 {
            continue;
        }
        buf.set_stringn(
            col.x,
            col.y,
            fit(text.as_ref(), col.width),
            col.width as usize,
            Style::default(),
        );
    }
}

impl TableRenderer for PlainRenderer {
    fn render(&self, frame: &mut Frame, area: Rect, grid: &Grid<'_>) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let buf = frame.buffer_mut();

        let header = Rect { height: 1, ..area };
        buf.set_style(header, grid.style.header);
        put_cells(buf, header, grid, &grid.headers);

        let body = body_area(area);
        if let Some(text) = grid.placeholder {
            if body.height > 0 {
                buf.set_stringn(
                    body.x,
                    body.y,
                    fit(text, body.width),
                    body.width as usize,
                    grid.style.placeholder,
                );
            }
            return;
        }

        for (line_no, (index, row)) in grid
            .rows
            .iter()
            .enumerate()
            .skip(grid.offset)
            .take(body.height as usize)
            .enumerate()
        {
            let line = Rect {
                y: body.y + line_no as u16,
                height: 1,
                ..body
            };
            buf.set_style(line, row.style(grid.style, grid.focused == Some(index)));
            put_cells(buf, line, grid, &row.cells);
        }
    }
}
