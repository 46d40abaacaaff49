//! Free-list arena for FixedRedBlackTree.
//!
//! Freed slots are chained through the vacant slots themselves and reused
//! last-in first-out. Nodes never move, so the index of a live node is stable
//! for as long as the node stays in the tree.

use crate::error::{FixedTreeError, FixedTreeResult};
use crate::node::RedBlackNode;
use crate::storage::{FreedSlot, NodeStorage};
use crate::types::{NodeIndex, MAX_CAPACITY, NULL_INDEX};

#[derive(Debug, Clone)]
enum Slot<N> {
    Vacant { next_free: NodeIndex },
    Occupied(N),
}

/// Fixed arena with an intrusive free list.
#[derive(Debug, Clone)]
pub struct PoolStorage<N, const CAPACITY: usize> {
    slots: [Slot<N>; CAPACITY],
    /// Head of the free list, [`NULL_INDEX`] when the arena is full.
    free_head: NodeIndex,
    len: usize,
    root: NodeIndex,
}

impl<N, const CAPACITY: usize> PoolStorage<N, CAPACITY> {
    // Initially every slot is vacant and the list runs 0, 1, 2, ... so a fresh
    // arena hands out slots in ascending order.
    fn fresh_slots() -> [Slot<N>; CAPACITY] {
        std::array::from_fn(|i| Slot::Vacant {
            next_free: if i + 1 < CAPACITY {
                (i + 1) as NodeIndex
            } else {
                NULL_INDEX
            },
        })
    }

    fn fresh_head() -> NodeIndex {
        if CAPACITY == 0 {
            NULL_INDEX
        } else {
            0
        }
    }

    fn slot_position(&self, index: NodeIndex) -> Option<usize> {
        let position = index as usize;
        match self.slots.get(position) {
            Some(Slot::Occupied(_)) => Some(position),
            _ => None,
        }
    }

    /// Number of vacant slots.
    pub fn free_count(&self) -> usize {
        CAPACITY - self.len
    }
}

impl<N: RedBlackNode, const CAPACITY: usize> NodeStorage for PoolStorage<N, CAPACITY> {
    type Node = N;

    const CAPACITY: usize = CAPACITY;
    const DENSE: bool = false;

    fn new() -> Self {
        const { assert!(CAPACITY <= MAX_CAPACITY, "capacity not addressable by NodeIndex") };
        Self {
            slots: Self::fresh_slots(),
            free_head: Self::fresh_head(),
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
        match self.slots.get(index as usize) {
            Some(Slot::Occupied(node)) => Some(node),
            _ => None,
        }
    }

    #[inline]
    fn get_mut(&mut self, index: NodeIndex) -> Option<&mut N> {
        match self.slots.get_mut(index as usize) {
            Some(Slot::Occupied(node)) => Some(node),
            _ => None,
        }
    }

    fn allocate_slot(&mut self, key: N::Key, value: N::Value) -> FixedTreeResult<NodeIndex> {
        let index = self.free_head;
        let next_free = match self.slots.get(index as usize) {
            Some(Slot::Vacant { next_free }) => *next_free,
            _ => return Err(FixedTreeError::capacity_exceeded(CAPACITY)),
        };

        self.slots[index as usize] = Slot::Occupied(N::new(key, value));
        self.free_head = next_free;
        self.len += 1;
        Ok(index)
    }

    fn free_slot(&mut self, index: NodeIndex) -> FixedTreeResult<FreedSlot<N>> {
        let position = self
            .slot_position(index)
            .ok_or_else(|| FixedTreeError::invalid_access(index, self.len))?;

        let vacant = Slot::Vacant {
            next_free: self.free_head,
        };
        let node = match std::mem::replace(&mut self.slots[position], vacant) {
            Slot::Occupied(node) => node,
            previous @ Slot::Vacant { .. } => {
                self.slots[position] = previous;
                return Err(FixedTreeError::invalid_access(index, self.len));
            }
        };
        self.free_head = index;
        self.len -= 1;

        Ok(FreedSlot {
            node,
            relocated: None,
        })
    }

    fn swap_slots(&mut self, a: NodeIndex, b: NodeIndex) -> FixedTreeResult<()> {
        let a = self
            .slot_position(a)
            .ok_or_else(|| FixedTreeError::invalid_access(a, self.len))?;
        let b = self
            .slot_position(b)
            .ok_or_else(|| FixedTreeError::invalid_access(b, self.len))?;
        self.slots.swap(a, b);
        Ok(())
    }

    fn clear(&mut self) {
        self.slots = Self::fresh_slots();
        self.free_head = Self::fresh_head();
        self.len = 0;
        self.root = NULL_INDEX;
    }
}

impl<N: RedBlackNode, const CAPACITY: usize> Default for PoolStorage<N, CAPACITY> {
    fn default() -> Self {
        Self::new()
    }
}
