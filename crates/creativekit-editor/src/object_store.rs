//! Ordered object storage.
//!
//! Objects live in a map keyed by id; a parallel order list holds the
//! z-order. List position is the single z-order authority: index 0 is the
//! bottom of the stack and the last index paints on top. Identifiers come
//! from a monotonic counter and are never reused, so observers can track an
//! object across reorders and projections.

use std::collections::HashMap;

use crate::model::SceneObject;

/// Ordered storage for scene objects.
#[derive(Debug, Default)]
pub struct ObjectStore {
    objects: HashMap<u64, SceneObject>,
    order: Vec<u64>,
    next_id: u64,
}

impl ObjectStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves the next stable identifier.
    pub fn generate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Inserts an object at the top of the stack.
    pub fn insert(&mut self, object: SceneObject) {
        self.order.push(object.id);
        self.objects.insert(object.id, object);
    }

    /// Looks up an object by id.
    pub fn get(&self, id: u64) -> Option<&SceneObject> {
        self.objects.get(&id)
    }

    /// Looks up an object mutably by id.
    pub fn get_mut(&mut self, id: u64) -> Option<&mut SceneObject> {
        self.objects.get_mut(&id)
    }

    /// Removes an object, returning it if present.
    pub fn remove(&mut self, id: u64) -> Option<SceneObject> {
        let removed = self.objects.remove(&id);
        if removed.is_some() {
            self.order.retain(|&o| o != id);
        }
        removed
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True when no objects are stored.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Removes every object. The id counter is not reset.
    pub fn clear(&mut self) {
        self.objects.clear();
        self.order.clear();
    }

    /// Iterates objects bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &SceneObject> {
        self.order.iter().filter_map(|id| self.objects.get(id))
    }

    /// Iterates objects mutably, in no particular order. Used for flag
    /// sweeps where z-order does not matter.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut SceneObject> {
        self.objects.values_mut()
    }

    /// The z-order as a slice of ids, bottom to top.
    pub fn draw_order(&self) -> &[u64] {
        &self.order
    }

    /// Stack position of an object, 0 = bottom.
    pub fn index_of(&self, id: u64) -> Option<usize> {
        self.order.iter().position(|&o| o == id)
    }

    /// Swaps an object with its upper neighbor. Returns false at the top
    /// of the stack or for an unknown id.
    pub fn bring_forward(&mut self, id: u64) -> bool {
        match self.index_of(id) {
            Some(i) if i + 1 < self.order.len() => {
                self.order.swap(i, i + 1);
                true
            }
            _ => false,
        }
    }

    /// Swaps an object with its lower neighbor. Returns false at the
    /// bottom of the stack or for an unknown id.
    pub fn send_backward(&mut self, id: u64) -> bool {
        match self.index_of(id) {
            Some(i) if i > 0 => {
                self.order.swap(i, i - 1);
                true
            }
            _ => false,
        }
    }

    /// Moves an object to the top of the stack. Returns false for an
    /// unknown id.
    pub fn bring_to_front(&mut self, id: u64) -> bool {
        match self.index_of(id) {
            Some(i) => {
                let moved = self.order.remove(i);
                self.order.push(moved);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ObjectKind, TextObject};

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
    fn test_insert_appends_to_top() {
        let (store, ids) = store_with(3);
        assert_eq!(store.draw_order(), ids.as_slice());
    }

    #[test]
    fn test_ids_never_reused_after_clear() {
        let (mut store, ids) = store_with(2);
        store.clear();
        let fresh = store.generate_id();
        assert!(fresh > ids[1]);
    }

    #[test]
    fn test_forward_backward_are_inverse() {
        let (mut store, ids) = store_with(3);
        assert!(store.bring_forward(ids[0]));
        assert!(store.send_backward(ids[0]));
        assert_eq!(store.draw_order(), ids.as_slice());
    }

    #[test]
    fn test_boundary_moves_are_noops() {
        let (mut store, ids) = store_with(3);
        assert!(!store.bring_forward(ids[2]));
        assert!(!store.send_backward(ids[0]));
        assert_eq!(store.draw_order(), ids.as_slice());
    }

    #[test]
    fn test_bring_to_front() {
        let (mut store, ids) = store_with(3);
        assert!(store.bring_to_front(ids[0]));
        assert_eq!(store.draw_order(), &[ids[1], ids[2], ids[0]]);
    }

    #[test]
    fn test_remove_drops_from_order() {
        let (mut store, ids) = store_with(3);
        assert!(store.remove(ids[1]).is_some());
        assert_eq!(store.draw_order(), &[ids[0], ids[2]]);
        assert!(store.remove(ids[1]).is_none());
    }
}
