//! Traversals of a [`RedBlackMap`][crate::RedBlackMap].
//!
//! [`Iter`] is the ascending (in-order) enumeration used by the map
//! contract. The other traversals expose the shape of the tree and make no
//! ordering promise beyond their name.

use std::{collections::VecDeque, iter::FusedIterator};

use crate::{
    arena::Ptr,
    red_black::node::{Nodes, predecessor, successor},
};

/// An iterator over the entries of a red-black map in ascending key order.
pub struct Iter<'a, K, V> {
    nodes: &'a Nodes<K, V>,
    front: Option<Ptr>,
    back: Option<Ptr>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(
        nodes: &'a Nodes<K, V>,
        first: Option<Ptr>,
        last: Option<Ptr>,
        len: usize,
    ) -> Self {
        Self {
            nodes,
            front: first,
            back: last,
            remaining: len,
        }
    }
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let ptr = self.front?;
        self.remaining -= 1;
        self.front = successor(self.nodes, ptr);
        Some(self.nodes[ptr].entry())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let ptr = self.back?;
        self.remaining -= 1;
        self.back = predecessor(self.nodes, ptr);
        Some(self.nodes[ptr].entry())
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// Visits each node before its left and right subtrees.
pub struct Preorder<'a, K, V> {
    nodes: &'a Nodes<K, V>,
    stack: Vec<Ptr>,
}

impl<'a, K, V> Preorder<'a, K, V> {
    pub(crate) fn new(nodes: &'a Nodes<K, V>, root: Option<Ptr>) -> Self {
        Self {
            nodes,
            stack: root.into_iter().collect(),
        }
    }
}

impl<'a, K, V> Iterator for Preorder<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let ptr = self.stack.pop()?;
        let node = &self.nodes[ptr];
        self.stack.extend(node.right);
        self.stack.extend(node.left);
        Some(node.entry())
    }
}

impl<K, V> FusedIterator for Preorder<'_, K, V> {}

/// Visits the left and right subtrees of each node before the node itself.
pub struct Postorder<'a, K, V> {
    nodes: &'a Nodes<K, V>,
    /// Pending nodes, flagged once their children have been pushed.
    stack: Vec<(Ptr, bool)>,
}

impl<'a, K, V> Postorder<'a, K, V> {
    pub(crate) fn new(nodes: &'a Nodes<K, V>, root: Option<Ptr>) -> Self {
        Self {
            nodes,
            stack: root.map(|ptr| (ptr, false)).into_iter().collect(),
        }
    }
}

impl<'a, K, V> Iterator for Postorder<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((ptr, expanded)) = self.stack.pop() {
            let node = &self.nodes[ptr];
            if expanded {
                return Some(node.entry());
            }
            self.stack.push((ptr, true));
            self.stack.extend(node.right.map(|p| (p, false)));
            self.stack.extend(node.left.map(|p| (p, false)));
        }
        None
    }
}

impl<K, V> FusedIterator for Postorder<'_, K, V> {}

/// Visits the tree breadth-first, one depth at a time from the root.
pub struct LevelOrder<'a, K, V> {
    nodes: &'a Nodes<K, V>,
    queue: VecDeque<Ptr>,
}

impl<'a, K, V> LevelOrder<'a, K, V> {
    pub(crate) fn new(nodes: &'a Nodes<K, V>, root: Option<Ptr>) -> Self {
        Self {
            nodes,
            queue: root.into_iter().collect(),
        }
    }
}

impl<'a, K, V> Iterator for LevelOrder<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let ptr = self.queue.pop_front()?;
        let node = &self.nodes[ptr];
        self.queue.extend(node.left);
        self.queue.extend(node.right);
        Some(node.entry())
    }
}

impl<K, V> FusedIterator for LevelOrder<'_, K, V> {}
