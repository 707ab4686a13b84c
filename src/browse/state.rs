//! Highlight, viewport and selection state for one browser level
//!
//! The highlight and the selection are tracked by record id, not by index,
//! so ordered inserts and removals elsewhere in the list can never silently
//! retarget them. Methods take the current (sorted) entry slice to resolve
//! ids to positions.

use crate::models::{Record, RecordId};

/// Rows the focus window moves per page command
pub const PAGE_STEP: usize = 3;

#[derive(Debug, Clone)]
pub struct BrowserState {
    highlight: Option<RecordId>,
    focus: usize,
    selected: Vec<RecordId>,
    viewport_rows: usize,
}

impl BrowserState {
    pub fn new() -> Self {
        Self {
            highlight: None,
            focus: 0,
            selected: Vec::new(),
            viewport_rows: 10,
        }
    }

    pub fn highlight_id(&self) -> Option<RecordId> {
        self.highlight
    }

    pub fn set_highlight(&mut self, id: Option<RecordId>) {
        self.highlight = id;
    }

    /// Top-of-viewport offset into the entry list
    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn viewport_rows(&self) -> usize {
        self.viewport_rows
    }

    /// Update the viewport height from the current layout (at least one row)
    pub fn set_viewport_rows(&mut self, rows: usize) {
        self.viewport_rows = rows.max(1);
    }

    pub fn selection_count(&self) -> usize {
        self.selected.len()
    }

    pub fn is_selected(&self, id: RecordId) -> bool {
        self.selected.contains(&id)
    }

    pub fn highlight_index<T: Record>(&self, entries: &[T]) -> Option<usize> {
        let id = self.highlight?;
        entries.iter().position(|e| e.id() == id)
    }

    /// The half-open row range currently on screen
    pub fn visible_range(&self, len: usize) -> std::ops::Range<usize> {
        let start = self.focus.min(len);
        let end = (self.focus + self.viewport_rows).min(len);
        start..end
    }

    /// Reconcile this state with the entry list after any mutation: prune
    /// stale selection ids, fall back to the first entry when the highlight
    /// is gone, clamp the focus window, and keep the highlight on screen.
    pub fn sync<T: Record>(&mut self, entries: &[T]) {
        self.selected
            .retain(|id| entries.iter().any(|e| e.id() == *id));
        if self.highlight_index(entries).is_none() {
            self.highlight = entries.first().map(|e| e.id());
        }
        self.focus = self.focus.min(self.max_focus(entries.len()));
        self.ensure_visible(entries);
    }

    /// Scroll just enough to bring the highlight into the viewport
    pub fn ensure_visible<T: Record>(&mut self, entries: &[T]) {
        if let Some(index) = self.highlight_index(entries) {
            if index < self.focus {
                self.focus = index;
            } else if index >= self.focus + self.viewport_rows {
                self.focus = index + 1 - self.viewport_rows;
            }
        }
    }

    pub fn move_up<T: Record>(&mut self, entries: &[T]) {
        self.move_by(entries, -1);
    }

    pub fn move_down<T: Record>(&mut self, entries: &[T]) {
        self.move_by(entries, 1);
    }

    fn move_by<T: Record>(&mut self, entries: &[T], step: isize) {
        if entries.is_empty() {
            return;
        }
        let Some(index) = self.highlight_index(entries) else {
            self.highlight = Some(entries[0].id());
            self.ensure_visible(entries);
            return;
        };
        // clamp at both ends, no wraparound
        let target = index.saturating_add_signed(step).min(entries.len() - 1);
        if target == index {
            return;
        }
        self.highlight = Some(entries[target].id());
        // crossing a viewport edge drags the window by exactly one row
        if target < self.focus {
            self.focus -= 1;
        } else if target >= self.focus + self.viewport_rows {
            self.focus += 1;
        }
    }

    pub fn page_up<T: Record>(&mut self, entries: &[T]) {
        self.focus = self.focus.saturating_sub(PAGE_STEP);
        self.snap_highlight_into_view(entries);
    }

    pub fn page_down<T: Record>(&mut self, entries: &[T]) {
        self.focus = (self.focus + PAGE_STEP).min(self.max_focus(entries.len()));
        self.snap_highlight_into_view(entries);
    }

    fn max_focus(&self, len: usize) -> usize {
        len.saturating_sub(self.viewport_rows)
    }

    /// After a focus jump, pull an off-screen highlight to the nearest
    /// viewport edge
    fn snap_highlight_into_view<T: Record>(&mut self, entries: &[T]) {
        let Some(index) = self.highlight_index(entries) else {
            return;
        };
        let top = self.focus;
        let bottom = self.focus + self.viewport_rows;
        let snapped = if index < top {
            top
        } else if index >= bottom {
            bottom - 1
        } else {
            return;
        };
        if let Some(entry) = entries.get(snapped) {
            self.highlight = Some(entry.id());
        }
    }

    pub fn toggle_selected<T: Record>(&mut self, entries: &[T]) {
        let Some(index) = self.highlight_index(entries) else {
            return;
        };
        let id = entries[index].id();
        if let Some(at) = self.selected.iter().position(|s| *s == id) {
            self.selected.remove(at);
        } else {
            self.selected.push(id);
        }
    }

    pub fn select_all<T: Record>(&mut self, entries: &[T]) {
        self.selected = entries.iter().map(|e| e.id()).collect();
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// The ids a structural operation acts on: the selection when non-empty
    /// (in list order), otherwise the highlighted entry alone
    pub fn source_ids<T: Record>(&self, entries: &[T]) -> Vec<RecordId> {
        if !self.selected.is_empty() {
            return entries
                .iter()
                .map(|e| e.id())
                .filter(|id| self.selected.contains(id))
                .collect();
        }
        self.highlight
            .filter(|id| entries.iter().any(|e| e.id() == *id))
            .into_iter()
            .collect()
    }

    /// Before removing `removing`, re-point the highlight at the closest
    /// surviving entry: walk outward from the current position, alternating
    /// below then above, until an entry not in the set is found. If nothing
    /// survives the highlight becomes empty.
    pub fn highlight_closest_neighbor<T: Record>(&mut self, entries: &[T], removing: &[RecordId]) {
        let Some(index) = self.highlight_index(entries) else {
            self.highlight = None;
            return;
        };
        let survives = |i: usize| !removing.contains(&entries[i].id());
        if survives(index) {
            return;
        }
        let len = entries.len();
        let mut found = None;
        for distance in 1..len {
            if index + distance < len && survives(index + distance) {
                found = Some(index + distance);
                break;
            }
            if index >= distance && survives(index - distance) {
                found = Some(index - distance);
                break;
            }
        }
        self.highlight = found.map(|i| entries[i].id());
    }
}

impl Default for BrowserState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, Operation};
    use chrono::NaiveDate;

    fn ops(n: usize) -> Vec<Operation> {
        (0..n)
            .map(|i| {
                Operation::new(
                    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(i as u64),
                    "card".into(),
                    String::new(),
                    String::new(),
                    format!("op{}", i),
                    Money::from_cents(i as i64 * 100),
                )
            })
            .collect()
    }

    fn state_on(entries: &[Operation], viewport: usize) -> BrowserState {
        let mut state = BrowserState::new();
        state.set_viewport_rows(viewport);
        state.sync(entries);
        state
    }

    #[test]
    fn test_sync_highlights_first_entry() {
        let entries = ops(3);
        let state = state_on(&entries, 4);
        assert_eq!(state.highlight_id(), Some(entries[0].id()));
        assert_eq!(state.focus(), 0);
    }

    #[test]
    fn test_sync_empty_list() {
        let entries: Vec<Operation> = Vec::new();
        let state = state_on(&entries, 4);
        assert_eq!(state.highlight_id(), None);
        assert_eq!(state.focus(), 0);
    }

    #[test]
    fn test_move_clamps_at_ends() {
        let entries = ops(3);
        let mut state = state_on(&entries, 4);

        state.move_up(&entries);
        assert_eq!(state.highlight_index(&entries), Some(0));

        for _ in 0..10 {
            state.move_down(&entries);
        }
        assert_eq!(state.highlight_index(&entries), Some(2));
    }

    #[test]
    fn test_move_down_scrolls_by_one_row() {
        let entries = ops(10);
        let mut state = state_on(&entries, 4);

        // walking to the bottom edge does not scroll yet
        for _ in 0..3 {
            state.move_down(&entries);
        }
        assert_eq!(state.highlight_index(&entries), Some(3));
        assert_eq!(state.focus(), 0);

        // the next step crosses the edge and drags the window one row
        state.move_down(&entries);
        assert_eq!(state.highlight_index(&entries), Some(4));
        assert_eq!(state.focus(), 1);
    }

    #[test]
    fn test_move_up_scrolls_back() {
        let entries = ops(10);
        let mut state = state_on(&entries, 4);
        for _ in 0..6 {
            state.move_down(&entries);
        }
        assert_eq!(state.focus(), 3);

        for _ in 0..6 {
            state.move_up(&entries);
        }
        assert_eq!(state.highlight_index(&entries), Some(0));
        assert_eq!(state.focus(), 0);
    }

    #[test]
    fn test_page_down_clamps_at_len_minus_viewport() {
        let entries = ops(10);
        let mut state = state_on(&entries, 4);

        state.page_down(&entries);
        assert_eq!(state.focus(), 3);
        state.page_down(&entries);
        assert_eq!(state.focus(), 6);
        state.page_down(&entries);
        assert_eq!(state.focus(), 6); // never exceeds len - viewport
    }

    #[test]
    fn test_page_down_snaps_highlight_to_top_edge() {
        let entries = ops(10);
        let mut state = state_on(&entries, 4);
        assert_eq!(state.highlight_index(&entries), Some(0));

        state.page_down(&entries);
        // highlight was above the new window, snapped to its top
        assert_eq!(state.highlight_index(&entries), Some(3));
    }

    #[test]
    fn test_page_up_snaps_highlight_to_bottom_edge() {
        let entries = ops(10);
        let mut state = state_on(&entries, 4);
        for _ in 0..9 {
            state.move_down(&entries);
        }
        assert_eq!(state.highlight_index(&entries), Some(9));
        assert_eq!(state.focus(), 6);

        state.page_up(&entries);
        assert_eq!(state.focus(), 3);
        assert_eq!(state.highlight_index(&entries), Some(6));
    }

    #[test]
    fn test_page_with_fewer_items_than_viewport() {
        let entries = ops(2);
        let mut state = state_on(&entries, 4);
        state.page_down(&entries);
        assert_eq!(state.focus(), 0);
        state.page_up(&entries);
        assert_eq!(state.focus(), 0);
    }

    #[test]
    fn test_toggle_and_clear_selection() {
        let entries = ops(3);
        let mut state = state_on(&entries, 4);

        state.toggle_selected(&entries);
        assert!(state.is_selected(entries[0].id()));
        state.toggle_selected(&entries);
        assert!(!state.is_selected(entries[0].id()));

        state.select_all(&entries);
        assert_eq!(state.selection_count(), 3);
        state.clear_selection();
        assert_eq!(state.selection_count(), 0);
    }

    #[test]
    fn test_sync_prunes_stale_selection() {
        let entries = ops(3);
        let mut state = state_on(&entries, 4);
        state.select_all(&entries);

        let remaining = vec![entries[1].clone()];
        state.sync(&remaining);
        assert_eq!(state.selection_count(), 1);
        assert!(state.is_selected(entries[1].id()));
    }

    #[test]
    fn test_source_ids_prefers_selection_in_list_order() {
        let entries = ops(4);
        let mut state = state_on(&entries, 4);
        // select third then first; list order must win
        state.move_down(&entries);
        state.move_down(&entries);
        state.toggle_selected(&entries);
        state.set_highlight(Some(entries[0].id()));
        state.toggle_selected(&entries);

        let ids = state.source_ids(&entries);
        assert_eq!(ids, vec![entries[0].id(), entries[2].id()]);
    }

    #[test]
    fn test_source_ids_falls_back_to_highlight() {
        let entries = ops(2);
        let state = state_on(&entries, 4);
        assert_eq!(state.source_ids(&entries), vec![entries[0].id()]);
    }

    #[test]
    fn test_closest_neighbor_prefers_next_below() {
        let entries = ops(5);
        let mut state = state_on(&entries, 5);
        state.set_highlight(Some(entries[2].id()));

        state.highlight_closest_neighbor(&entries, &[entries[2].id()]);
        assert_eq!(state.highlight_id(), Some(entries[3].id()));
    }

    #[test]
    fn test_closest_neighbor_walks_outward_alternating() {
        let entries = ops(5);
        let mut state = state_on(&entries, 5);
        state.set_highlight(Some(entries[2].id()));

        // below is checked first at each distance, but everything below is
        // going away, so the neighbor above wins
        let removing = vec![entries[2].id(), entries[3].id(), entries[4].id()];
        state.highlight_closest_neighbor(&entries, &removing);
        assert_eq!(state.highlight_id(), Some(entries[1].id()));
    }

    #[test]
    fn test_closest_neighbor_none_when_all_removed() {
        let entries = ops(3);
        let mut state = state_on(&entries, 3);
        let all: Vec<_> = entries.iter().map(|e| e.id()).collect();
        state.highlight_closest_neighbor(&entries, &all);
        assert_eq!(state.highlight_id(), None);
    }

    #[test]
    fn test_closest_neighbor_keeps_surviving_highlight() {
        let entries = ops(3);
        let mut state = state_on(&entries, 3);
        state.set_highlight(Some(entries[1].id()));
        state.highlight_closest_neighbor(&entries, &[entries[0].id()]);
        assert_eq!(state.highlight_id(), Some(entries[1].id()));
    }

    #[test]
    fn test_visible_range() {
        let entries = ops(10);
        let mut state = state_on(&entries, 4);
        assert_eq!(state.visible_range(10), 0..4);
        state.page_down(&entries);
        assert_eq!(state.visible_range(10), 3..7);
        assert_eq!(state.visible_range(2), 2..2);
    }
}
