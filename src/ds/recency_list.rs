//! Recency-ordered doubly linked list backed by [`SlotArena`].
//!
//! Nodes are linked by [`SlotId`], so a caller can keep the id of a node in an
//! index and later promote or unlink it in O(1) without pointer chasing.
//!
//! ```text
//!   arena (SlotArena<Node<T>>)
//!   ┌────────┬─────────────────────────────────────────────┐
//!   │ SlotId │ Node { value, prev, next }                  │
//!   ├────────┼─────────────────────────────────────────────┤
//!   │ id_1   │ { value: A, prev: None, next: Some(id_2) }  │
//!   │ id_2   │ { value: B, prev: Some(id_1), next: id_3 }  │
//!   │ id_3   │ { value: C, prev: Some(id_2), next: None }  │
//!   └────────┴─────────────────────────────────────────────┘
//!
//!   head (MRU) ─► [id_1] ◄──► [id_2] ◄──► [id_3] ◄── tail (LRU)
//! ```
//!
//! The front is always the most recently used node and the back the least
//! recently used one. New nodes enter at the front.

use crate::ds::slot_arena::{SlotArena, SlotId};

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Doubly linked list ordered from most to least recently used.
#[derive(Debug)]
pub struct RecencyList<T> {
    arena: SlotArena<Node<T>>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

impl<T> RecencyList<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with reserved node capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.arena.get(id).map(|node| &node.value)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.arena.get_mut(id).map(|node| &mut node.value)
    }

    /// Least recently used value.
    pub fn back(&self) -> Option<&T> {
        self.tail.and_then(|id| self.get(id))
    }

    /// Inserts `value` as the most recently used node.
    pub fn push_front(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node {
            value,
            prev: None,
            next: self.head,
        });
        match self.head {
            Some(old_head) => {
                if let Some(node) = self.arena.get_mut(old_head) {
                    node.prev = Some(id);
                }
            },
            None => self.tail = Some(id),
        }
        self.head = Some(id);
        id
    }

    /// Removes and returns the least recently used value.
    pub fn pop_back(&mut self) -> Option<T> {
        let id = self.tail?;
        self.remove(id)
    }

    /// Unlinks `id` and returns its value.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        self.detach(id)?;
        self.arena.remove(id).map(|node| node.value)
    }

    /// Promotes `id` to most recently used; returns `false` if absent.
    pub fn move_to_front(&mut self, id: SlotId) -> bool {
        if !self.arena.contains(id) {
            return false;
        }
        if self.head == Some(id) {
            return true;
        }
        self.detach(id);
        self.attach_front(id);
        true
    }

    /// Distance of `id` from the front (0 = most recently used).
    pub fn position(&self, id: SlotId) -> Option<usize> {
        self.iter_ids().position(|candidate| candidate == id)
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.head = None;
        self.tail = None;
    }

    /// Iterates values from most to least recently used.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.iter_ids().filter_map(move |id| self.get(id))
    }

    /// Iterates node ids from most to least recently used.
    pub fn iter_ids(&self) -> RecencyIds<'_, T> {
        RecencyIds {
            list: self,
            current: self.head,
            remaining: self.len(),
        }
    }

    fn detach(&mut self, id: SlotId) -> Option<()> {
        let (prev, next) = {
            let node = self.arena.get(id)?;
            (node.prev, node.next)
        };

        match prev {
            Some(prev_id) => {
                if let Some(prev_node) = self.arena.get_mut(prev_id) {
                    prev_node.next = next;
                }
            },
            None => self.head = next,
        }

        match next {
            Some(next_id) => {
                if let Some(next_node) = self.arena.get_mut(next_id) {
                    next_node.prev = prev;
                }
            },
            None => self.tail = prev,
        }

        if let Some(node) = self.arena.get_mut(id) {
            node.prev = None;
            node.next = None;
        }
        Some(())
    }

    fn attach_front(&mut self, id: SlotId) {
        let old_head = self.head;
        match self.arena.get_mut(id) {
            Some(node) => {
                node.prev = None;
                node.next = old_head;
            },
            None => return,
        }
        match old_head {
            Some(old_head) => {
                if let Some(head_node) = self.arena.get_mut(old_head) {
                    head_node.prev = Some(id);
                }
            },
            None => self.tail = Some(id),
        }
        self.head = Some(id);
    }

    /// Walks the links and reports the first inconsistency found.
    pub fn validate(&self) -> Result<(), String> {
        if self.head.is_none() || self.tail.is_none() {
            if self.head.is_some() || self.tail.is_some() || !self.is_empty() {
                return Err("head/tail disagree on emptiness".into());
            }
            return Ok(());
        }

        let mut count = 0usize;
        let mut prev = None;
        let mut current = self.head;
        while let Some(id) = current {
            let node = self
                .arena
                .get(id)
                .ok_or_else(|| format!("linked slot {} is vacant", id.index()))?;
            if node.prev != prev {
                return Err(format!("slot {} has a stale prev link", id.index()));
            }
            if node.next.is_none() && self.tail != Some(id) {
                return Err("last reachable node is not the tail".into());
            }
            count += 1;
            if count > self.len() {
                return Err("cycle detected in recency list".into());
            }
            prev = Some(id);
            current = node.next;
        }

        if count != self.len() {
            return Err(format!(
                "reachable nodes ({count}) != stored nodes ({})",
                self.len()
            ));
        }
        Ok(())
    }
}

impl<T> Default for RecencyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over node ids from most to least recently used.
pub struct RecencyIds<'a, T> {
    list: &'a RecencyList<T>,
    current: Option<SlotId>,
    remaining: usize,
}

impl<'a, T> Iterator for RecencyIds<'a, T> {
    type Item = SlotId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.current?;
        let node = self.list.arena.get(id)?;
        self.current = node.next;
        self.remaining -= 1;
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(list: &RecencyList<&'static str>) -> Vec<&'static str> {
        list.iter().copied().collect()
    }

    #[test]
    fn push_front_orders_newest_first() {
        let mut list = RecencyList::new();
        list.push_front("a");
        list.push_front("b");
        list.push_front("c");
        assert_eq!(values(&list), vec!["c", "b", "a"]);
        assert_eq!(list.back(), Some(&"a"));
        assert!(list.validate().is_ok());
    }

    #[test]
    fn move_to_front_promotes_tail() {
        let mut list = RecencyList::new();
        let a = list.push_front("a");
        list.push_front("b");
        list.push_front("c");

        assert!(list.move_to_front(a));
        assert_eq!(values(&list), vec!["a", "c", "b"]);
        assert_eq!(list.back(), Some(&"b"));
        assert!(list.validate().is_ok());
    }

    #[test]
    fn move_to_front_of_head_is_noop() {
        let mut list = RecencyList::new();
        list.push_front("a");
        let b = list.push_front("b");
        assert!(list.move_to_front(b));
        assert_eq!(values(&list), vec!["b", "a"]);
    }

    #[test]
    fn pop_back_returns_least_recent() {
        let mut list = RecencyList::with_capacity(3);
        list.push_front("a");
        list.push_front("b");
        assert_eq!(list.pop_back(), Some("a"));
        assert_eq!(list.pop_back(), Some("b"));
        assert_eq!(list.pop_back(), None);
        assert!(list.is_empty());
        assert!(list.validate().is_ok());
    }

    #[test]
    fn remove_middle_relinks_neighbours() {
        let mut list = RecencyList::new();
        list.push_front("a");
        let b = list.push_front("b");
        list.push_front("c");

        assert_eq!(list.remove(b), Some("b"));
        assert_eq!(values(&list), vec!["c", "a"]);
        assert!(list.get(b).is_none());
        assert!(!list.move_to_front(b));
        assert!(list.validate().is_ok());
    }

    #[test]
    fn position_counts_from_front() {
        let mut list = RecencyList::new();
        let a = list.push_front("a");
        let b = list.push_front("b");
        assert_eq!(list.position(b), Some(0));
        assert_eq!(list.position(a), Some(1));
        list.remove(a);
        assert_eq!(list.position(a), None);
    }

    #[test]
    fn clear_empties_list() {
        let mut list = RecencyList::new();
        list.push_front(1);
        list.push_front(2);
        list.clear();
        assert!(list.is_empty());
        assert!(list.iter().next().is_none());
        assert!(list.back().is_none());
        assert!(list.validate().is_ok());
    }
}
