use crate::arena::{Arena, Ptr};

/// The color of a red-black node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Color {
    Red,
    Black,
}

/// A single node of the red-black tree.
///
/// All links are handles into the tree's arena. `parent` is a back-reference
/// used while rebalancing and iterating; it does not own anything.
#[derive(Debug, Clone)]
pub(crate) struct Node<K, V> {
    pub key: K,
    pub value: V,
    pub color: Color,
    pub left: Option<Ptr>,
    pub right: Option<Ptr>,
    pub parent: Option<Ptr>,
}

impl<K, V> Node<K, V> {
    /// New nodes are always red.
    pub fn new(key: K, value: V, parent: Option<Ptr>) -> Self {
        Self {
            key,
            value,
            color: Color::Red,
            left: None,
            right: None,
            parent,
        }
    }

    pub fn entry(&self) -> (&K, &V) {
        (&self.key, &self.value)
    }
}

pub(crate) type Nodes<K, V> = Arena<Node<K, V>>;

/// Absent children are black.
pub(crate) fn is_red<K, V>(nodes: &Nodes<K, V>, ptr: Option<Ptr>) -> bool {
    ptr.is_some_and(|p| nodes[p].color == Color::Red)
}

/// Left-most node of the subtree rooted at `ptr`.
pub(crate) fn minimum<K, V>(nodes: &Nodes<K, V>, mut ptr: Ptr) -> Ptr {
    while let Some(left) = nodes[ptr].left {
        ptr = left;
    }
    ptr
}

/// Right-most node of the subtree rooted at `ptr`.
pub(crate) fn maximum<K, V>(nodes: &Nodes<K, V>, mut ptr: Ptr) -> Ptr {
    while let Some(right) = nodes[ptr].right {
        ptr = right;
    }
    ptr
}

/// The node following `ptr` in key order.
pub(crate) fn successor<K, V>(nodes: &Nodes<K, V>, ptr: Ptr) -> Option<Ptr> {
    if let Some(right) = nodes[ptr].right {
        return Some(minimum(nodes, right));
    }
    let mut child = ptr;
    let mut parent = nodes[ptr].parent;
    while let Some(p) = parent {
        if nodes[p].left == Some(child) {
            return Some(p);
        }
        child = p;
        parent = nodes[p].parent;
    }
    None
}

/// The node preceding `ptr` in key order.
pub(crate) fn predecessor<K, V>(nodes: &Nodes<K, V>, ptr: Ptr) -> Option<Ptr> {
    if let Some(left) = nodes[ptr].left {
        return Some(maximum(nodes, left));
    }
    let mut child = ptr;
    let mut parent = nodes[ptr].parent;
    while let Some(p) = parent {
        if nodes[p].right == Some(child) {
            return Some(p);
        }
        child = p;
        parent = nodes[p].parent;
    }
    None
}
