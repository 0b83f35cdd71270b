//! Selection tracking over the object store.
//!
//! Selection state lives on the objects themselves (the `selected` flag);
//! this manager tracks the primary selection and provides the sweep
//! operations the surface composes into its public commands.

use crate::object_store::ObjectStore;

/// Tracks the primary selection and drives selection sweeps.
#[derive(Debug, Default)]
pub struct SelectionManager {
    primary: Option<u64>,
}

impl SelectionManager {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently selected object, if any.
    pub fn primary(&self) -> Option<u64> {
        self.primary
    }

    /// Clears the selected flag on every object.
    pub fn deselect_all(&mut self, store: &mut ObjectStore) {
        for obj in store.iter_mut() {
            obj.selected = false;
        }
        self.primary = None;
    }

    /// Makes the given object the sole selection. Returns false for an
    /// unknown or unselectable object, leaving the selection unchanged.
    pub fn select_only(&mut self, store: &mut ObjectStore, id: u64) -> bool {
        match store.get(id) {
            Some(obj) if obj.selectable => {}
            _ => return false,
        }
        self.deselect_all(store);
        if let Some(obj) = store.get_mut(id) {
            obj.selected = true;
        }
        self.primary = Some(id);
        true
    }

    /// Selected ids in draw order.
    pub fn selected_ids(&self, store: &ObjectStore) -> Vec<u64> {
        store
            .iter()
            .filter(|obj| obj.selected)
            .map(|obj| obj.id)
            .collect()
    }

    /// Number of selected objects.
    pub fn selected_count(&self, store: &ObjectStore) -> usize {
        store.iter().filter(|obj| obj.selected).count()
    }

    /// Removes every selected object, returning the removed ids in draw
    /// order. Safe to call with nothing selected.
    pub fn remove_selected(&mut self, store: &mut ObjectStore) -> Vec<u64> {
        let ids = self.selected_ids(store);
        for &id in &ids {
            store.remove(id);
        }
        if self.primary.is_some_and(|p| ids.contains(&p)) {
            self.primary = None;
        }
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ObjectKind, SceneObject, TextObject};

    fn store_with(n: usize) -> (ObjectStore, Vec<u64>) {
        let mut store = ObjectStore::new();
        let mut ids = Vec::new();
        for i in 0..n {
            let id = store.generate_id();
            let kind = ObjectKind::Text(TextObject::plain(format!("t{i}"), 24.0, 256.0));
            store.insert(SceneObject::new(id, kind, 0.0, 0.0, 1.0));
            ids.push(id);
        }
        (store, ids)
    }

    #[test]
    fn test_select_only_is_exclusive() {
        let (mut store, ids) = store_with(3);
        let mut sel = SelectionManager::new();
        assert!(sel.select_only(&mut store, ids[0]));
        assert!(sel.select_only(&mut store, ids[2]));
        assert_eq!(sel.selected_ids(&store), vec![ids[2]]);
        assert_eq!(sel.primary(), Some(ids[2]));
    }

    #[test]
    fn test_unselectable_object_is_refused() {
        let (mut store, ids) = store_with(2);
        store.get_mut(ids[0]).unwrap().set_locked(true);
        let mut sel = SelectionManager::new();
        assert!(sel.select_only(&mut store, ids[1]));
        assert!(!sel.select_only(&mut store, ids[0]));
        assert_eq!(sel.primary(), Some(ids[1]));
    }

    #[test]
    fn test_remove_selected_clears_primary() {
        let (mut store, ids) = store_with(2);
        let mut sel = SelectionManager::new();
        sel.select_only(&mut store, ids[1]);
        assert_eq!(sel.remove_selected(&mut store), vec![ids[1]]);
        assert_eq!(sel.primary(), None);
        assert_eq!(store.len(), 1);
        assert!(sel.remove_selected(&mut store).is_empty());
    }
}
