//! Roving focus over a filtered collection.
//!
//! `RovingFocus` holds a position into whatever sequence is currently
//! visible.  The position is not clamped when that sequence shrinks; a stale
//! position is simply inert until the next navigation key moves it.

/// Focus position into the visible rows, with wrapping navigation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RovingFocus {
    index: Option<usize>,
}

impl RovingFocus {
    pub fn new() -> Self {
        Self { index: None }
    }

    /// The raw position, stale or not.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// The position if it points at one of `count` items.
    pub fn current(&self, count: usize) -> Option<usize> {
        self.index.filter(|&i| i < count)
    }

    pub fn set(&mut self, index: usize) {
        self.index = Some(index);
    }

    pub fn clear(&mut self) {
        self.index = None;
    }

    /// Next item, wrapping to the first. From nothing (or a stale
    /// position) goes to the first item.
    pub fn next(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        self.index = Some(match self.current(count) {
            Some(i) if i + 1 < count => i + 1,
            _ => 0,
        });
    }

    /// Previous item, wrapping to the last. From nothing (or a stale
    /// position) goes to the last item.
    pub fn prev(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        self.index = Some(match self.current(count) {
            Some(i) if i > 0 => i - 1,
            _ => count - 1,
        });
    }

    pub fn home(&mut self, count: usize) {
        if count > 0 {
            self.index = Some(0);
        }
    }

    pub fn end(&mut self, count: usize) {
        if count > 0 {
            self.index = Some(count - 1);
        }
    }

    /// Scroll offset that keeps the focused item inside a window of
    /// `visible` items, moving `offset` as little as possible.
    pub fn scroll(&self, offset: usize, visible: usize, count: usize) -> usize {
        let max_offset = count.saturating_sub(visible);
        let offset = offset.min(max_offset);
        let Some(cursor) = self.current(count) else {
            return offset;
        };
        if visible == 0 {
            return offset;
        }
        if cursor < offset {
            cursor
        } else if cursor >= offset + visible {
            cursor + 1 - visible
        } else {
            offset
        }
    }
}
