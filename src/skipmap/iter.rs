use std::iter::FusedIterator;

use crate::{arena::Ptr, skipmap::node::Nodes};

/// An iterator over the entries of a [`SkipMap`][crate::SkipMap] in ascending
/// key order.
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
        let node = &self.nodes[self.front?];
        self.remaining -= 1;
        self.front = node.forward[0];
        Some(node.entry())
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
        let node = &self.nodes[self.back?];
        self.remaining -= 1;
        self.back = node.prev;
        Some(node.entry())
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}
