//! Row selection state

use std::collections::HashSet;

use uuid::Uuid;

use crate::model::Row;

/// The set of selected row ids.
///
/// Selection is pure local state: it is never persisted and holds only ids,
/// re-validated against every new row view by [`Selection::reconcile`]. The
/// select-all toggle is page-scoped, matching a grid whose header checkbox
/// acts on the visible page, not the whole dataset.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    selected: HashSet<Uuid>,
}

impl Selection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the row is selected.
    pub fn is_selected(&self, id: Uuid) -> bool {
        self.selected.contains(&id)
    }

    /// Returns the number of selected rows.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Returns `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Returns the selected ids, in no particular order.
    pub fn ids(&self) -> Vec<Uuid> {
        self.selected.iter().copied().collect()
    }

    /// Toggles a single row's membership.
    pub fn toggle(&mut self, id: Uuid) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    /// Clears the selection.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Toggles select-all for the given page.
    ///
    /// If every row on the page is already selected, the whole selection is
    /// cleared; otherwise the selection becomes exactly the page's rows.
    pub fn toggle_all(&mut self, page_rows: &[Row]) {
        if self.is_all_selected(page_rows) {
            self.selected.clear();
        } else {
            self.selected = page_rows.iter().map(|r| r.id).collect();
        }
    }

    /// Returns `true` if the page is non-empty and every page row is selected.
    pub fn is_all_selected(&self, page_rows: &[Row]) -> bool {
        !page_rows.is_empty() && page_rows.iter().all(|r| self.selected.contains(&r.id))
    }

    /// Returns `true` if the selection is non-empty but smaller than the
    /// page's row count. Drives the indeterminate checkbox state.
    pub fn is_partially_selected(&self, page_rows: &[Row]) -> bool {
        !self.selected.is_empty() && self.selected.len() < page_rows.len()
    }

    /// Drops every selected id that is absent from the new row view.
    ///
    /// Runs on every snapshot; reconciling twice against the same view is a
    /// no-op.
    pub fn reconcile(&mut self, rows: &[Row]) {
        if self.selected.is_empty() {
            return;
        }
        let live: HashSet<Uuid> = rows.iter().map(|r| r.id).collect();
        self.selected.retain(|id| live.contains(id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: u128) -> Row {
        Row {
            id: Uuid::from_u128(id),
            cells: vec![],
            created_at: id as i64,
            updated_at: id as i64,
        }
    }

    #[test]
    fn toggle_is_a_symmetric_difference() {
        let mut selection = Selection::new();
        let id = Uuid::from_u128(1);

        selection.toggle(id);
        assert!(selection.is_selected(id));
        selection.toggle(id);
        assert!(!selection.is_selected(id));
    }

    #[test]
    fn toggle_all_selects_exactly_the_page() {
        let mut selection = Selection::new();
        let page = [row(1), row(2), row(3)];
        selection.toggle(Uuid::from_u128(99));

        selection.toggle_all(&page);

        assert_eq!(selection.len(), 3);
        assert!(!selection.is_selected(Uuid::from_u128(99)));
        assert!(selection.is_all_selected(&page));
    }

    #[test]
    fn toggle_all_clears_when_page_fully_selected() {
        let mut selection = Selection::new();
        let page = [row(1), row(2)];

        selection.toggle_all(&page);
        selection.toggle_all(&page);

        assert!(selection.is_empty());
    }

    #[test]
    fn tri_state_predicates() {
        let mut selection = Selection::new();
        let page = [row(1), row(2), row(3)];

        assert!(!selection.is_all_selected(&page));
        assert!(!selection.is_partially_selected(&page));

        selection.toggle(Uuid::from_u128(1));
        assert!(!selection.is_all_selected(&page));
        assert!(selection.is_partially_selected(&page));

        selection.toggle(Uuid::from_u128(2));
        selection.toggle(Uuid::from_u128(3));
        assert!(selection.is_all_selected(&page));
        assert!(!selection.is_partially_selected(&page));

        assert!(!selection.is_all_selected(&[]));
    }

    #[test]
    fn reconcile_drops_vanished_rows_and_is_idempotent() {
        let mut selection = Selection::new();
        selection.toggle(Uuid::from_u128(1));
        selection.toggle(Uuid::from_u128(2));
        selection.toggle(Uuid::from_u128(3));

        let remaining = [row(1), row(3)];
        selection.reconcile(&remaining);
        assert_eq!(selection.len(), 2);
        assert!(!selection.is_selected(Uuid::from_u128(2)));

        let before: Vec<Uuid> = selection.ids();
        selection.reconcile(&remaining);
        let mut after: Vec<Uuid> = selection.ids();
        let mut before = before;
        before.sort();
        after.sort();
        assert_eq!(before, after);
    }
}
