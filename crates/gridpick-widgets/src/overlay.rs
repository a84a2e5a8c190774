//! Placement and drawing of panels that float over other content.

use ratatui::layout::Rect;
use ratatui::widgets::{Block, Clear};
use ratatui::Frame;

/// Rect for a panel of `height` rows attached to `anchor`.
///
/// Placed directly below the anchor when it fits inside `bounds`, above it
/// when only that fits, and otherwise below with whatever height remains.
/// The width follows the anchor, clipped to `bounds`.
pub fn anchored_panel(anchor: Rect, height: u16, bounds: Rect) -> Rect {
    let x = anchor.x.max(bounds.x);
    let width = anchor.right().min(bounds.right()).saturating_sub(x);
    let below = bounds.bottom().saturating_sub(anchor.bottom());
    let above = anchor.y.saturating_sub(bounds.y);
    if below >= height || below >= above {
        Rect::new(x, anchor.bottom(), width, height.min(below))
    } else {
        let h = height.min(above);
        Rect::new(x, anchor.y - h, width, h)
    }
}

/// Clear the overlay area and optionally render a block border.
///
/// Returns the inner area (after block padding, if any).
pub fn render_overlay(frame: &mut Frame, area: Rect, block: Option<&Block>) -> Rect {
    frame.render_widget(Clear, area);
    if let Some(block) = block {
        let inner = block.inner(area);
        frame.render_widget(block.clone(), area);
        inner
    } else {
        area
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_when_it_fits() {
        let bounds = Rect::new(0, 0, 80, 24);
        let anchor = Rect::new(2, 1, 30, 3);
        assert_eq!(anchored_panel(anchor, 10, bounds), Rect::new(2, 4, 30, 10));
    }

    #[test]
    fn above_when_only_that_fits() {
        let bounds = Rect::new(0, 0, 80, 24);
        let anchor = Rect::new(2, 18, 30, 3);
        assert_eq!(anchored_panel(anchor, 10, bounds), Rect::new(2, 8, 30, 10));
    }

    #[test]
    fn shrinks_into_the_larger_side() {
        let bounds = Rect::new(0, 0, 80, 12);
        let anchor = Rect::new(0, 3, 20, 3);
        // 6 rows below, 3 above.
        assert_eq!(anchored_panel(anchor, 10, bounds), Rect::new(0, 6, 20, 6));
    }

    #[test]
    fn width_is_clipped_to_bounds() {
        let bounds = Rect::new(0, 0, 40, 24);
        let anchor = Rect::new(30, 0, 30, 3);
        assert_eq!(anchored_panel(anchor, 5, bounds).width, 10);
    }
}
