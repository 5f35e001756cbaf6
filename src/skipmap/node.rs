use crate::arena::{Arena, Ptr};

/// A single node of the skip list.
///
/// A node of height `h` participates in levels `0..h` and holds one forward
/// link per level. The level-0 chain is doubly linked through `prev` so the
/// list can be walked backwards.
#[derive(Debug, Clone)]
pub(crate) struct SkipNode<K, V> {
    pub key: K,
    pub value: V,
    /// Links to the next node at each level. Its length is the node's height.
    pub forward: Vec<Option<Ptr>>,
    /// The immediately previous node, or `None` for the first node.
    pub prev: Option<Ptr>,
}

impl<K, V> SkipNode<K, V> {
    pub fn new(key: K, value: V, height: usize) -> Self {
        Self {
            key,
            value,
            forward: vec![None; height],
            prev: None,
        }
    }

    pub fn height(&self) -> usize {
        self.forward.len()
    }

    pub fn entry(&self) -> (&K, &V) {
        (&self.key, &self.value)
    }
}

pub(crate) type Nodes<K, V> = Arena<SkipNode<K, V>>;
