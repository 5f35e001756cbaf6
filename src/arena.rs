//! Node storage shared by both maps.
//!
//! Nodes refer to each other through [`Ptr`] handles instead of references,
//! so the link graph may contain back-references (a red-black node's parent)
//! without any shared ownership. The arena is the sole owner of every node.

use std::{fmt, mem, ops};

/// A handle to a node stored in an [`Arena`].
///
/// A handle is only meaningful for the arena that produced it, and only until
/// the node it refers to is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Ptr(usize);

impl fmt::Display for Ptr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
enum Slot<T> {
    Occupied(T),
    /// A removed entry, linking to the next vacant slot of the free list.
    Vacant(Option<Ptr>),
}

/// An allocation primitive similar to `Vec`, but which reuses the space of
/// removed entries.
///
/// Removing an entry never moves the others, so all outstanding handles
/// remain valid. Vacant slots form a free list used as a stack by
/// [`insert`][Arena::insert].
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    /// Head of the free list.
    free: Option<Ptr>,
    /// Number of occupied slots.
    len: usize,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: None,
            len: 0,
        }
    }
}

impl<T> Arena<T> {
    /// Creates an empty arena which will not allocate until first inserted
    /// into.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty arena able to hold `capacity` entries without
    /// reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Returns the number of occupied entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no entry is occupied.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Stores `value`, reusing a vacant slot if one exists, and returns its
    /// handle.
    pub fn insert(&mut self, value: T) -> Ptr {
        self.len += 1;
        if let Some(ptr) = self.free {
            let slot = mem::replace(&mut self.slots[ptr.0], Slot::Occupied(value));
            match slot {
                Slot::Vacant(next) => self.free = next,
                Slot::Occupied(_) => unreachable!("free list points to an occupied slot {ptr}"),
            }
            return ptr;
        }
        self.slots.push(Slot::Occupied(value));
        Ptr(self.slots.len() - 1)
    }

    /// Removes the entry behind `ptr` and returns it. The slot is pushed onto
    /// the free list.
    ///
    /// # Panics
    ///
    /// Panics if `ptr` does not refer to an occupied slot.
    pub fn remove(&mut self, ptr: Ptr) -> T {
        let slot = mem::replace(&mut self.slots[ptr.0], Slot::Vacant(self.free));
        match slot {
            Slot::Occupied(value) => {
                self.free = Some(ptr);
                self.len -= 1;
                value
            }
            Slot::Vacant(next) => {
                self.slots[ptr.0] = Slot::Vacant(next);
                panic!("dangling handle {ptr}")
            }
        }
    }

    /// Returns the entry behind `ptr`, or `None` if the slot is vacant.
    pub fn get(&self, ptr: Ptr) -> Option<&T> {
        match self.slots.get(ptr.0) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns the entry behind `ptr` mutably, or `None` if the slot is
    /// vacant.
    pub fn get_mut(&mut self, ptr: Ptr) -> Option<&mut T> {
        match self.slots.get_mut(ptr.0) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns mutable references to two distinct entries at once.
    ///
    /// # Panics
    ///
    /// Panics if `a == b` or if either handle is dangling.
    pub fn pair_mut(&mut self, a: Ptr, b: Ptr) -> (&mut T, &mut T) {
        assert_ne!(a, b, "pair_mut requires two distinct handles");
        let (low, high, swapped) = if a.0 < b.0 {
            (a.0, b.0, false)
        } else {
            (b.0, a.0, true)
        };
        let (head, tail) = self.slots.split_at_mut(high);
        let (Slot::Occupied(first), Some(Slot::Occupied(second))) = (&mut head[low], tail.first_mut())
        else {
            panic!("dangling handle {a} or {b}");
        };
        if swapped {
            (second, first)
        } else {
            (first, second)
        }
    }

    /// Drops every entry. All previously returned handles become invalid.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free = None;
        self.len = 0;
    }
}

impl<T> ops::Index<Ptr> for Arena<T> {
    type Output = T;

    fn index(&self, ptr: Ptr) -> &T {
        self.get(ptr)
            .unwrap_or_else(|| panic!("dangling handle {ptr}"))
    }
}

impl<T> ops::IndexMut<Ptr> for Arena<T> {
    fn index_mut(&mut self, ptr: Ptr) -> &mut T {
        self.get_mut(ptr)
            .unwrap_or_else(|| panic!("dangling handle {ptr}"))
    }
}

impl<T: fmt::Debug> fmt::Debug for Arena<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.slots.iter().enumerate().filter_map(|(i, slot)| match slot {
                Slot::Occupied(value) => Some((Ptr(i), value)),
                Slot::Vacant(_) => None,
            }))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::Arena;

    #[test]
    fn insert_remove() {
        let mut arena = Arena::new();
        assert!(arena.is_empty());
        let a = arena.insert("a");
        let b = arena.insert("b");
        assert_eq!(arena.len(), 2);
        assert_eq!(arena[a], "a");
        assert_eq!(arena[b], "b");

        assert_eq!(arena.remove(a), "a");
        assert_eq!(arena.len(), 1);
        assert!(arena.get(a).is_none());
        assert_eq!(arena[b], "b");
    }

    #[test]
    fn reuses_vacant_slots() {
        let mut arena = Arena::with_capacity(4);
        let ptrs: Vec<_> = (0..4).map(|i| arena.insert(i)).collect();
        arena.remove(ptrs[1]);
        arena.remove(ptrs[2]);

        // The free list is a stack: the last removed slot is reused first.
        assert_eq!(arena.insert(10), ptrs[2]);
        assert_eq!(arena.insert(11), ptrs[1]);
        assert_ne!(arena.insert(12), ptrs[3]);
        assert_eq!(arena.len(), 5);
    }

    #[test]
    fn pair_mut() {
        let mut arena = Arena::new();
        let a = arena.insert(1);
        let b = arena.insert(2);
        {
            let (x, y) = arena.pair_mut(b, a);
            std::mem::swap(x, y);
        }
        assert_eq!(arena[a], 2);
        assert_eq!(arena[b], 1);
    }

    #[test]
    #[should_panic(expected = "dangling handle")]
    fn remove_twice() {
        let mut arena = Arena::new();
        let a = arena.insert(1);
        arena.remove(a);
        arena.remove(a);
    }

    #[test]
    fn clear() {
        let mut arena = Arena::new();
        let a = arena.insert(1);
        arena.clear();
        assert!(arena.is_empty());
        assert!(arena.get(a).is_none());
    }
}
