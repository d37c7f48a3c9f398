//! Slot arena with stable handles.
//!
//! Values live in a `Vec<Option<T>>`; freed slots are recycled through a free
//! list so a [`SlotId`] stays valid until its own value is removed. The
//! recency list uses it to link nodes by index instead of by pointer.

/// Stable handle to a value stored in a [`SlotArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(pub(crate) usize);

impl SlotId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
pub struct SlotArena<T> {
    slots: Vec<Option<T>>,
    free_list: Vec<usize>,
    len: usize,
}

impl<T> SlotArena<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            len: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            len: 0,
        }
    }

    pub fn insert(&mut self, value: T) -> SlotId {
        let idx = match self.free_list.pop() {
            Some(idx) => {
                self.slots[idx] = Some(value);
                idx
            },
            None => {
                self.slots.push(Some(value));
                self.slots.len() - 1
            },
        };
        self.len += 1;
        SlotId(idx)
    }

    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let value = self.slots.get_mut(id.0)?.take()?;
        self.free_list.push(id.0);
        self.len -= 1;
        Some(value)
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn contains(&self, id: SlotId) -> bool {
        matches!(self.slots.get(id.0), Some(Some(_)))
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every value. Previously issued ids become dangling.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
        self.len = 0;
    }
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_remove_reuses_freed_slot() {
        let mut arena = SlotArena::new();
        let id1 = arena.insert("de");
        let id2 = arena.insert("en_US");
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(id1), Some(&"de"));
        assert_eq!(arena.get(id2), Some(&"en_US"));

        assert_eq!(arena.remove(id1), Some("de"));
        assert_eq!(arena.len(), 1);
        assert!(!arena.contains(id1));

        let id3 = arena.insert("sk");
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(id3), Some(&"sk"));
        assert_eq!(id1.index(), id3.index());
    }

    #[test]
    fn double_remove_is_none() {
        let mut arena = SlotArena::with_capacity(4);
        let id = arena.insert(7u32);
        assert_eq!(arena.remove(id), Some(7));
        assert_eq!(arena.remove(id), None);
        assert!(arena.is_empty());
    }

    #[test]
    fn get_mut_updates_in_place() {
        let mut arena = SlotArena::new();
        let id = arena.insert(String::from("da"));
        if let Some(value) = arena.get_mut(id) {
            value.push_str("_DK");
        }
        assert_eq!(arena.get(id).map(String::as_str), Some("da_DK"));
    }

    #[test]
    fn clear_resets_everything() {
        let mut arena = SlotArena::new();
        let id = arena.insert(1);
        arena.insert(2);
        arena.clear();
        assert!(arena.is_empty());
        assert!(!arena.contains(id));
        assert_eq!(arena.insert(3).index(), 0);
    }
}
