//! Storage backend abstraction for FixedRedBlackTree.
//!
//! A backend owns a fixed array of node slots plus the root index. The engine
//! never touches slots directly; it goes through [`NodeStorage`], so the same
//! balancing code runs over [`PoolStorage`](crate::PoolStorage) and
//! [`ContiguousStorage`](crate::ContiguousStorage).

use crate::error::FixedTreeResult;
use crate::node::RedBlackNode;
use crate::types::NodeIndex;

/// A node moved from one slot to another while freeing a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relocation {
    pub from: NodeIndex,
    pub to: NodeIndex,
}

impl Relocation {
    /// Translate an index held across the relocation.
    pub fn remap(&self, index: NodeIndex) -> NodeIndex {
        if index == self.from {
            self.to
        } else {
            index
        }
    }
}

/// What [`NodeStorage::free_slot`] hands back.
#[derive(Debug)]
pub struct FreedSlot<N> {
    /// The node that occupied the freed slot.
    pub node: N,
    /// Set when the backend moved another node to keep itself dense.
    pub relocated: Option<Relocation>,
}

/// Fixed arena of red-black tree nodes.
pub trait NodeStorage {
    type Node: RedBlackNode;

    /// Number of slots, fixed at compile time.
    const CAPACITY: usize;

    /// Whether occupied slots always form the range `[0, len)`.
    const DENSE: bool;

    fn new() -> Self
    where
        Self: Sized;

    fn capacity(&self) -> usize {
        Self::CAPACITY
    }

    fn len(&self) -> usize;

    fn size(&self) -> usize {
        self.len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_full(&self) -> bool {
        self.len() == Self::CAPACITY
    }

    fn root_index(&self) -> NodeIndex;

    fn set_root_index(&mut self, index: NodeIndex);

    /// The node in slot `index`, if that slot is occupied.
    fn get(&self, index: NodeIndex) -> Option<&Self::Node>;

    fn get_mut(&mut self, index: NodeIndex) -> Option<&mut Self::Node>;

    fn contains(&self, index: NodeIndex) -> bool {
        self.get(index).is_some()
    }

    /// Place a new detached node and return its slot.
    ///
    /// Fails with `CapacityExceeded` without touching the arena when it is full.
    fn allocate_slot(
        &mut self,
        key: <Self::Node as RedBlackNode>::Key,
        value: <Self::Node as RedBlackNode>::Value,
    ) -> FixedTreeResult<NodeIndex>;

    /// Vacate slot `index` and return its node.
    ///
    /// The caller must already have unlinked the node from the tree. Fails with
    /// `InvalidAccess` without touching the arena if the slot is not occupied.
    fn free_slot(&mut self, index: NodeIndex) -> FixedTreeResult<FreedSlot<Self::Node>>;

    /// Exchange the raw contents of two occupied slots. Links are not rewritten.
    fn swap_slots(&mut self, a: NodeIndex, b: NodeIndex) -> FixedTreeResult<()>;

    /// Drop every node and reset the root.
    fn clear(&mut self);
}
