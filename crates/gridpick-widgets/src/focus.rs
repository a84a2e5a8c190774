//! Focus cycling across a fixed set of focusable slots.

/// Tracks which of `N` slots holds keyboard focus.
pub struct FocusGroup<const N: usize> {
    focused: usize,
}

impl<const N: usize> FocusGroup<N> {
    /// Create a new focus group with focus on the first slot (index 0).
    pub fn new() -> Self {
        Self { focused: 0 }
    }

    /// Return the index of the currently focused slot.
    pub fn focused(&self) -> usize {
        self.focused
    }

    /// Move focus to the next slot, wrapping around after the last.
    pub fn focus_next(&mut self) {
        self.focused = (self.focused + 1) % N;
    }

    /// Move focus to the previous slot, wrapping around before the first.
    pub fn focus_prev(&mut self) {
        self.focused = (self.focused + N - 1) % N;
    }

    /// Move focus to the next slot in `within`, wrapping.
    ///
    /// Used when only some slots are reachable, e.g. the search field and
    /// table of an open combobox but not its trigger.  Focus outside
    /// `within` lands on its first entry.
    pub fn cycle_within(&mut self, within: &[usize], forward: bool) {
        if within.is_empty() {
            return;
        }
        let next = match within.iter().position(|&slot| slot == self.focused) {
            Some(i) if forward => (i + 1) % within.len(),
            Some(i) => (i + within.len() - 1) % within.len(),
            None => 0,
        };
        self.focus(within[next]);
    }

    /// Set focus to the given slot index, clamped to the valid range.
    pub fn focus(&mut self, index: usize) {
        self.focused = index.min(N - 1);
    }

    /// Return whether the slot at the given index currently has focus.
    pub fn is_focused(&self, index: usize) -> bool {
        self.focused == index
    }
}

impl<const N: usize> Default for FocusGroup<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let fg = FocusGroup::<3>::new();
        assert_eq!(fg.focused(), 0);
        assert!(fg.is_focused(0));
    }

    #[test]
    fn focus_next_and_prev_wrap() {
        let mut fg = FocusGroup::<3>::new();
        fg.focus_prev();
        assert_eq!(fg.focused(), 2);
        fg.focus_next();
        assert_eq!(fg.focused(), 0);
    }

    #[test]
    fn focus_clamps() {
        let mut fg = FocusGroup::<3>::new();
        fg.focus(10);
        assert_eq!(fg.focused(), 2);
    }

    #[test]
    fn cycle_within_skips_other_slots() {
        let mut fg = FocusGroup::<3>::new();
        fg.cycle_within(&[1, 2], true); // 0 is outside -> first entry
        assert_eq!(fg.focused(), 1);
        fg.cycle_within(&[1, 2], true);
        assert_eq!(fg.focused(), 2);
        fg.cycle_within(&[1, 2], true);
        assert_eq!(fg.focused(), 1);
        fg.cycle_within(&[1, 2], false);
        assert_eq!(fg.focused(), 2);
    }
}
