//! Navigation controller - the keyboard highlight state machine
//!
//! The only input is the tab row count of the latest projection (the bound).
//! The highlight index is `None` when nothing is highlighted and otherwise
//! always below the bound.

use crate::projection::{Projection, TabNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HighlightMode {
    /// Bound is the unfiltered row count
    #[default]
    Normal,
    /// Bound is the filtered row count
    Filtered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighlightState {
    pub index: Option<usize>,
    pub mode: HighlightMode,
    pub visible_count: usize,
    /// Hidden by pointer movement without losing the index
    pub visible: bool,
}

#[derive(Debug, Clone, Default)]
pub struct NavigationController {
    state: HighlightState,
}

impl NavigationController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> HighlightState {
        self.state
    }

    pub fn index(&self) -> Option<usize> {
        self.state.index
    }

    /// Highlight index with -1 for "nothing highlighted"
    pub fn position(&self) -> isize {
        self.state.index.map_or(-1, |i| i as isize)
    }

    pub fn mode(&self) -> HighlightMode {
        self.state.mode
    }

    pub fn bound(&self) -> usize {
        self.state.visible_count
    }

    pub fn is_visible(&self) -> bool {
        self.state.visible
    }

    /// Move down one row. Saturates at the last row; returns whether it moved.
    pub fn next(&mut self) -> bool {
        let candidate = self.state.index.map_or(0, |i| i + 1);
        if candidate >= self.state.visible_count {
            return false;
        }
        self.state.index = Some(candidate);
        self.state.visible = true;
        true
    }

    /// Move up one row. Stays on the first row; returns whether it moved.
    pub fn previous(&mut self) -> bool {
        match self.state.index {
            Some(i) if i > 0 => {
                self.state.index = Some(i - 1);
                self.state.visible = true;
                true
            }
            _ => false,
        }
    }

    /// Hide the highlight but keep the index. Returns false if already hidden.
    pub fn clear_highlight(&mut self) -> bool {
        std::mem::replace(&mut self.state.visible, false)
    }

    /// Switch to the filtered bound, starting from no highlight
    pub fn enter_filtered(&mut self, bound: usize) {
        self.state.mode = HighlightMode::Filtered;
        self.state.index = None;
        self.state.visible = false;
        self.state.visible_count = bound;
    }

    /// Switch back to the unfiltered bound, keeping the index where possible
    pub fn enter_normal(&mut self, bound: usize) {
        self.state.mode = HighlightMode::Normal;
        self.sync_bound(bound);
    }

    /// Forget the highlight after the whole list was replaced
    pub fn reset(&mut self, bound: usize) {
        self.state.index = None;
        self.state.visible = false;
        self.state.visible_count = bound;
    }

    /// Re-evaluate the bound after the projection changed. Returns true if the
    /// index had to be clamped.
    pub fn sync_bound(&mut self, bound: usize) -> bool {
        self.state.visible_count = bound;
        match self.state.index {
            Some(i) if i >= bound => {
                let clamped = bound.checked_sub(1);
                tracing::debug!("Highlight {} past bound {}, clamped to {:?}", i, bound, clamped);
                self.state.index = clamped;
                if clamped.is_none() {
                    self.state.visible = false;
                }
                true
            }
            _ => false,
        }
    }

    /// Resolve the highlighted row against `projection`
    pub fn highlighted<'a>(&self, projection: &'a Projection) -> Option<&'a TabNode> {
        let index = self.state.index?;
        let row = projection.row(index);
        if row.is_none() {
            tracing::warn!(
                "Highlight {} outside projection of {} rows, ignoring",
                index,
                projection.tab_count()
            );
        }
        row
    }

    /// Check the highlight stays within its bound (debug builds only)
    #[cfg(debug_assertions)]
    pub fn assert_invariants(&self, context: &str) {
        if let Some(i) = self.state.index {
            assert!(
                i < self.state.visible_count,
                "[{}] highlight {} out of bound {}",
                context,
                i,
                self.state.visible_count
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(bound: usize) -> NavigationController {
        let mut nav = NavigationController::new();
        nav.reset(bound);
        nav
    }

    #[test]
    fn test_next_saturates_at_last_row() {
        let mut nav = controller(3);
        for _ in 0..3 {
            assert!(nav.next());
        }
        assert_eq!(nav.index(), Some(2));
        assert!(!nav.next());
        assert_eq!(nav.index(), Some(2));
    }

    #[test]
    fn test_previous_never_goes_below_first_row() {
        let mut nav = controller(3);
        assert!(!nav.previous());
        assert_eq!(nav.position(), -1);
        nav.next();
        assert!(!nav.previous());
        assert_eq!(nav.position(), 0);
    }

    #[test]
    fn test_empty_bound_never_highlights() {
        let mut nav = controller(0);
        assert!(!nav.next());
        assert_eq!(nav.index(), None);
    }

    #[test]
    fn test_clear_highlight_keeps_index() {
        let mut nav = controller(2);
        nav.next();
        assert!(nav.clear_highlight());
        assert!(!nav.clear_highlight());
        assert_eq!(nav.index(), Some(0));
        nav.next();
        assert!(nav.is_visible());
    }

    #[test]
    fn test_sync_bound_clamps() {
        let mut nav = controller(3);
        nav.next();
        nav.next();
        nav.next();
        assert!(nav.sync_bound(2));
        assert_eq!(nav.index(), Some(1));
        assert!(nav.sync_bound(0));
        assert_eq!(nav.index(), None);
        assert!(!nav.sync_bound(5));
    }

    #[test]
    fn test_mode_transitions() {
        let mut nav = controller(3);
        nav.next();
        nav.next();
        nav.enter_filtered(1);
        assert_eq!(nav.mode(), HighlightMode::Filtered);
        assert_eq!(nav.index(), None);
        assert_eq!(nav.bound(), 1);

        nav.next();
        nav.enter_normal(3);
        assert_eq!(nav.mode(), HighlightMode::Normal);
        assert_eq!(nav.index(), Some(0));
        assert_eq!(nav.bound(), 3);
    }
}
