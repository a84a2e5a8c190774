//! Border helpers shared by the widgets.

use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders};

/// A bordered block with the given border style and optional title.
pub fn border_block(title: &str, border: Style) -> Block<'_> {
    let block = Block::new().borders(Borders::ALL).border_style(border);
    if title.is_empty() {
        block
    } else {
        block.title(title)
    }
}

/// A bordered block that is cyan when focused and dark gray otherwise.
pub fn focus_block(title: &str, focused: bool) -> Block<'_> {
    let color = if focused { Color::Cyan } else { Color::DarkGray };
    border_block(title, Style::default().fg(color))
}
