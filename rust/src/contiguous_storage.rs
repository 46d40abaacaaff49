//! Dense arena for FixedRedBlackTree.
//!
//! Occupied slots always form the prefix `[0, len)`. Allocation appends at
//! `len`; freeing a slot in the middle moves the last node into the hole and
//! rewrites every link that pointed at the node's old slot.

use tracing::trace;

use crate::error::{FixedTreeError, FixedTreeResult};
use crate::node::RedBlackNode;
use crate::storage::{FreedSlot, NodeStorage, Relocation};
use crate::types::{NodeIndex, MAX_CAPACITY, NULL_INDEX};

/// Fixed arena that never has holes.
#[derive(Debug, Clone)]
pub struct ContiguousStorage<N, const CAPACITY: usize> {
    slots: [Option<N>; CAPACITY],
    len: usize,
    root: NodeIndex,
}

impl<N: RedBlackNode, const CAPACITY: usize> ContiguousStorage<N, CAPACITY> {
    fn occupied(&self, index: NodeIndex) -> FixedTreeResult<usize> {
        let position = index as usize;
        if index != NULL_INDEX && position < self.len {
            Ok(position)
        } else {
            Err(FixedTreeError::invalid_access(index, self.len))
        }
    }

    /// Point whatever referenced slot `from` at slot `to`, where the node now lives.
    fn retarget_references(&mut self, from: NodeIndex, to: NodeIndex) {
        let (parent, left, right) = match self.get(to) {
            Some(node) => (node.parent_index(), node.left_index(), node.right_index()),
            None => return,
        };

        if parent == NULL_INDEX {
            if self.root == from {
                self.root = to;
            }
        } else if let Some(parent) = self.get_mut(parent) {
            if parent.left_index() == from {
                parent.set_left_index(to);
            } else if parent.right_index() == from {
                parent.set_right_index(to);
            }
        }

        for child in [left, right] {
            if let Some(child) = self.get_mut(child) {
                child.set_parent_index(to);
            }
        }
    }
}

impl<N: RedBlackNode, const CAPACITY: usize> NodeStorage for ContiguousStorage<N, CAPACITY> {
    type Node = N;

    const CAPACITY: usize = CAPACITY;
    const DENSE: bool = true;

    fn new() -> Self {
        const { assert!(CAPACITY <= MAX_CAPACITY, "capacity not addressable by NodeIndex") };
        Self {
            slots: std::array::from_fn(|_| None),
            len: 0,
            root: NULL_INDEX,
        }
    }

    fn len(&self) -> usize {
        self.len
    }

    fn root_index(&self) -> NodeIndex {
        self.root
    }

    fn set_root_index(&mut self, index: NodeIndex) {
        self.root = index;
    }

    #[inline]
    fn get(&self, index: NodeIndex) -> Option<&N> {
        self.slots.get(index as usize).and_then(Option::as_ref)
    }

    #[inline]
    fn get_mut(&mut self, index: NodeIndex) -> Option<&mut N> {
        self.slots.get_mut(index as usize).and_then(Option::as_mut)
    }

    fn contains(&self, index: NodeIndex) -> bool {
        self.occupied(index).is_ok()
    }

    fn allocate_slot(&mut self, key: N::Key, value: N::Value) -> FixedTreeResult<NodeIndex> {
        if self.len == CAPACITY {
            return Err(FixedTreeError::capacity_exceeded(CAPACITY));
        }
        let index = self.len;
        self.slots[index] = Some(N::new(key, value));
        self.len += 1;
        Ok(index as NodeIndex)
    }

    fn free_slot(&mut self, index: NodeIndex) -> FixedTreeResult<FreedSlot<N>> {
        let position = self.occupied(index)?;
        let last = self.len - 1;

        let node = match self.slots[position].take() {
            Some(node) => node,
            None => return Err(FixedTreeError::invalid_access(index, self.len)),
        };

        let relocated = if position != last {
            self.slots[position] = self.slots[last].take();
            let relocation = Relocation {
                from: last as NodeIndex,
                to: index,
            };
            trace!(from = relocation.from, to = relocation.to, "relocating last node into freed slot");
            self.retarget_references(relocation.from, relocation.to);
            Some(relocation)
        } else {
            None
        };
        self.len -= 1;

        Ok(FreedSlot { node, relocated })
    }

    fn swap_slots(&mut self, a: NodeIndex, b: NodeIndex) -> FixedTreeResult<()> {
        let a = self.occupied(a)?;
        let b = self.occupied(b)?;
        self.slots.swap(a, b);
        Ok(())
    }

    fn clear(&mut self) {
        for slot in &mut self.slots[..self.len] {
            *slot = None;
        }
        self.len = 0;
        self.root = NULL_INDEX;
    }
}

impl<N: RedBlackNode, const CAPACITY: usize> Default for ContiguousStorage<N, CAPACITY> {
    fn default() -> Self {
        Self::new()
    }
}
