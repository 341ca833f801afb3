// src/domain/selection.rs
use crate::domain::bookmark::Identified;
use std::collections::HashSet;

/// Session-scoped multi-select state, keyed only by bookmark id.
///
/// Holds no bookmark data. Leaving selection mode always empties the set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected_ids: HashSet<String>,
    selection_mode: bool,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_item<S: Into<String>>(&mut self, id: S) {
        self.selected_ids.insert(id.into());
    }

    pub fn deselect_item(&mut self, id: &str) {
        self.selected_ids.remove(id);
    }

    /// Returns whether the item is selected afterwards
    pub fn toggle_item(&mut self, id: &str) -> bool {
        if self.selected_ids.remove(id) {
            false
        } else {
            self.selected_ids.insert(id.to_string());
            true
        }
    }

    /// Replace the selection with every id of `items`
    pub fn select_all<T: Identified>(&mut self, items: &[T]) {
        self.selected_ids = items.iter().map(|item| item.id().to_string()).collect();
    }

    pub fn select_ids<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_ids = ids.into_iter().map(Into::into).collect();
    }

    pub fn deselect_all(&mut self) {
        self.selected_ids.clear();
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected_ids.contains(id)
    }

    /// Members of `items` that are currently selected, in collection order
    pub fn selected_items<'a, T: Identified>(&self, items: &'a [T]) -> Vec<&'a T> {
        items
            .iter()
            .filter(|item| self.selected_ids.contains(item.id()))
            .collect()
    }

    /// Selected ids in a stable order
    pub fn selected_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.selected_ids.iter().cloned().collect();
        ids.sort();
        ids
    }

    pub fn selected_count(&self) -> usize {
        self.selected_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected_ids.is_empty()
    }

    pub fn enter_selection_mode(&mut self) {
        self.selection_mode = true;
    }

    pub fn exit_selection_mode(&mut self) {
        self.selection_mode = false;
        self.selected_ids.clear();
    }

    pub fn is_selection_mode(&self) -> bool {
        self.selection_mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bookmark::ExistingBookmark;

    fn bookmarks() -> Vec<ExistingBookmark> {
        vec![
            ExistingBookmark::new("1", "https://a.com", "A"),
            ExistingBookmark::new("2", "https://b.com", "B"),
            ExistingBookmark::new("3", "https://c.com", "C"),
        ]
    }

    #[test]
    fn given_items_when_toggling_then_membership_flips() {
        let mut state = SelectionState::new();
        assert!(state.toggle_item("1"));
        assert!(state.is_selected("1"));
        assert!(!state.toggle_item("1"));
        assert!(!state.is_selected("1"));
    }

    #[test]
    fn given_selection_when_select_all_then_set_is_replaced() {
        let mut state = SelectionState::new();
        state.select_item("stale");
        state.select_all(&bookmarks());
        assert_eq!(state.selected_ids(), vec!["1", "2", "3"]);
        assert!(!state.is_selected("stale"));
    }

    #[test]
    fn given_partial_selection_when_getting_items_then_filters_by_membership() {
        let items = bookmarks();
        let mut state = SelectionState::new();
        state.select_item("3");
        state.select_item("1");
        state.select_item("unknown");
        let selected: Vec<&str> = state
            .selected_items(&items)
            .into_iter()
            .map(|b| b.id.as_str())
            .collect();
        assert_eq!(selected, vec!["1", "3"]);
    }

    #[test]
    fn given_selection_mode_when_exiting_then_selection_is_cleared() {
        let mut state = SelectionState::new();
        state.enter_selection_mode();
        state.select_item("1");
        state.select_item("2");
        state.deselect_item("2");
        assert_eq!(state.selected_count(), 1);

        state.exit_selection_mode();
        assert!(!state.is_selection_mode());
        assert!(state.is_empty());

        state.enter_selection_mode();
        assert!(state.is_empty());
    }

    #[test]
    fn given_selection_when_deselect_all_then_mode_is_kept() {
        let mut state = SelectionState::new();
        state.enter_selection_mode();
        state.select_ids(["1", "2"]);
        state.deselect_all();
        assert!(state.is_empty());
        assert!(state.is_selection_mode());
    }
}
