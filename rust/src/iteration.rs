//! Iterator implementations for FixedRedBlackTree.
//!
//! All iterators walk the tree in key order by following successor and
//! predecessor links from both ends, so they are double-ended and never
//! allocate. This module also holds the trait impls built on iteration
//! (`Debug`, `PartialEq`, `IntoIterator`).

use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;
use std::ops::{Bound, RangeBounds};

use crate::checking::CheckingPolicy;
use crate::comparator::Comparator;
use crate::node::RedBlackNode;
use crate::storage::NodeStorage;
use crate::types::{FixedRedBlackTree, KeyOf, NodeIndex, ValueOf, NULL_INDEX};

// ============================================================================
// ITERATOR STRUCTS
// ============================================================================

/// Iterator over key-value pairs in key order.
pub struct ItemIterator<'a, S, C, P> {
    tree: &'a FixedRedBlackTree<S, C, P>,
    front: NodeIndex,
    back: NodeIndex,
    remaining: usize,
}

/// Iterator over keys in order.
pub struct KeyIterator<'a, S, C, P> {
    items: ItemIterator<'a, S, C, P>,
}

/// Iterator over values in key order.
pub struct ValueIterator<'a, S, C, P> {
    items: ItemIterator<'a, S, C, P>,
}

/// Iterator over the key-value pairs inside a key range.
pub struct RangeIterator<'a, S, C, P> {
    tree: &'a FixedRedBlackTree<S, C, P>,
    /// Both ends are [`NULL_INDEX`] once the range is exhausted.
    front: NodeIndex,
    back: NodeIndex,
}

// ============================================================================
// TREE ITERATOR METHODS
// ============================================================================

impl<S: NodeStorage, C, P: CheckingPolicy> FixedRedBlackTree<S, C, P> {
    /// Returns an iterator over all key-value pairs in sorted order.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_rbtree::FixedRedBlackTreeMap;
    ///
    /// let tree: FixedRedBlackTreeMap<i32, char, 8> =
    ///     [(3, 'c'), (1, 'a'), (2, 'b')].into_iter().collect();
    /// let items: Vec<_> = tree.iter().collect();
    /// assert_eq!(items, [(&1, &'a'), (&2, &'b'), (&3, &'c')]);
    /// assert_eq!(tree.iter().next_back(), Some((&3, &'c')));
    /// ```
    pub fn iter(&self) -> ItemIterator<'_, S, C, P> {
        ItemIterator {
            tree: self,
            front: self.index_of_min_at(),
            back: self.index_of_max_at(),
            remaining: self.len(),
        }
    }

    /// Returns an iterator over all keys in sorted order.
    pub fn keys(&self) -> KeyIterator<'_, S, C, P> {
        KeyIterator { items: self.iter() }
    }

    /// Returns an iterator over all values in key order.
    pub fn values(&self) -> ValueIterator<'_, S, C, P> {
        ValueIterator { items: self.iter() }
    }

    /// Visit every entry in key order with mutable access to the value.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_rbtree::FixedRedBlackTreeMap;
    ///
    /// let mut tree: FixedRedBlackTreeMap<i32, i32, 8> = (1..=3).map(|k| (k, k)).collect();
    /// tree.for_each_mut(|key, value| *value *= key);
    /// assert_eq!(tree.values().copied().collect::<Vec<_>>(), [1, 4, 9]);
    /// ```
    pub fn for_each_mut<F>(&mut self, mut visit: F)
    where
        F: FnMut(&KeyOf<S>, &mut ValueOf<S>),
    {
        let mut current = self.index_of_min_at();
        while current != NULL_INDEX {
            let next = self.index_of_successor_at(current);
            let (key, value) = self.node_mut(current).entry_mut();
            visit(key, value);
            current = next;
        }
    }
}

impl<S, C, P> FixedRedBlackTree<S, C, P>
where
    S: NodeStorage,
    C: Comparator<KeyOf<S>>,
    P: CheckingPolicy,
{
    /// Returns an iterator over the entries whose keys fall inside `range`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_rbtree::FixedRedBlackTreeMap;
    ///
    /// let tree: FixedRedBlackTreeMap<i32, i32, 16> = (0..10).map(|k| (k, k * k)).collect();
    /// let squares: Vec<_> = tree.range(3..6).map(|(_, v)| *v).collect();
    /// assert_eq!(squares, [9, 16, 25]);
    /// assert_eq!(tree.range(..=1).count(), 2);
    /// ```
    pub fn range<R>(&self, range: R) -> RangeIterator<'_, S, C, P>
    where
        R: RangeBounds<KeyOf<S>>,
    {
        let front = match range.start_bound() {
            Bound::Included(key) => self.index_of_node_greater_or_equal(key),
            Bound::Excluded(key) => self.index_of_node_greater_than(key),
            Bound::Unbounded => self.index_of_min_at(),
        };
        let back = match range.end_bound() {
            Bound::Included(key) => self.index_of_node_less_or_equal(key),
            Bound::Excluded(key) => self.index_of_node_less_than(key),
            Bound::Unbounded => self.index_of_max_at(),
        };

        let empty = front == NULL_INDEX
            || back == NULL_INDEX
            || self
                .comparator
                .compare(self.node(front).key(), self.node(back).key())
                == Ordering::Greater;

        if empty {
            RangeIterator {
                tree: self,
                front: NULL_INDEX,
                back: NULL_INDEX,
            }
        } else {
            RangeIterator {
                tree: self,
                front,
                back,
            }
        }
    }
}

// ============================================================================
// ITEMITERATOR IMPLEMENTATION
// ============================================================================

impl<'a, S: NodeStorage, C, P: CheckingPolicy> Iterator for ItemIterator<'a, S, C, P> {
    type Item = (&'a KeyOf<S>, &'a ValueOf<S>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.tree.node(self.front);
        self.front = self.tree.index_of_successor_at(self.front);
        self.remaining -= 1;
        Some((node.key(), node.value()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, S: NodeStorage, C, P: CheckingPolicy> DoubleEndedIterator for ItemIterator<'a, S, C, P> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.tree.node(self.back);
        self.back = self.tree.index_of_predecessor_at(self.back);
        self.remaining -= 1;
        Some((node.key(), node.value()))
    }
}

impl<S: NodeStorage, C, P: CheckingPolicy> ExactSizeIterator for ItemIterator<'_, S, C, P> {}

impl<S: NodeStorage, C, P: CheckingPolicy> FusedIterator for ItemIterator<'_, S, C, P> {}

// ============================================================================
// KEY AND VALUE ITERATORS
// ============================================================================

impl<'a, S: NodeStorage, C, P: CheckingPolicy> Iterator for KeyIterator<'a, S, C, P> {
    type Item = &'a KeyOf<S>;

    fn next(&mut self) -> Option<Self::Item> {
        self.items.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

impl<S: NodeStorage, C, P: CheckingPolicy> DoubleEndedIterator for KeyIterator<'_, S, C, P> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.items.next_back().map(|(key, _)| key)
    }
}

impl<S: NodeStorage, C, P: CheckingPolicy> ExactSizeIterator for KeyIterator<'_, S, C, P> {}

impl<'a, S: NodeStorage, C, P: CheckingPolicy> Iterator for ValueIterator<'a, S, C, P> {
    type Item = &'a ValueOf<S>;

    fn next(&mut self) -> Option<Self::Item> {
        self.items.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

impl<S: NodeStorage, C, P: CheckingPolicy> DoubleEndedIterator for ValueIterator<'_, S, C, P> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.items.next_back().map(|(_, value)| value)
    }
}

impl<S: NodeStorage, C, P: CheckingPolicy> ExactSizeIterator for ValueIterator<'_, S, C, P> {}

// ============================================================================
// RANGEITERATOR IMPLEMENTATION
// ============================================================================

impl<'a, S: NodeStorage, C, P: CheckingPolicy> RangeIterator<'a, S, C, P> {
    fn finish_if_met(&mut self, yielded: NodeIndex) {
        if self.front == yielded && self.back == yielded {
            self.front = NULL_INDEX;
            self.back = NULL_INDEX;
        }
    }
}

impl<'a, S: NodeStorage, C, P: CheckingPolicy> Iterator for RangeIterator<'a, S, C, P> {
    type Item = (&'a KeyOf<S>, &'a ValueOf<S>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == NULL_INDEX {
            return None;
        }
        let current = self.front;
        let node = self.tree.node(current);
        self.finish_if_met(current);
        if self.front != NULL_INDEX {
            self.front = self.tree.index_of_successor_at(current);
        }
        Some((node.key(), node.value()))
    }
}

impl<S: NodeStorage, C, P: CheckingPolicy> DoubleEndedIterator for RangeIterator<'_, S, C, P> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.back == NULL_INDEX {
            return None;
        }
        let current = self.back;
        let node = self.tree.node(current);
        self.finish_if_met(current);
        if self.back != NULL_INDEX {
            self.back = self.tree.index_of_predecessor_at(current);
        }
        Some((node.key(), node.value()))
    }
}

impl<S: NodeStorage, C, P: CheckingPolicy> FusedIterator for RangeIterator<'_, S, C, P> {}

// ============================================================================
// TRAITS BUILT ON ITERATION
// ============================================================================

impl<'a, S: NodeStorage, C, P: CheckingPolicy> IntoIterator for &'a FixedRedBlackTree<S, C, P> {
    type Item = (&'a KeyOf<S>, &'a ValueOf<S>);
    type IntoIter = ItemIterator<'a, S, C, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<S, C, P> fmt::Debug for FixedRedBlackTree<S, C, P>
where
    S: NodeStorage,
    KeyOf<S>: fmt::Debug,
    ValueOf<S>: fmt::Debug,
    P: CheckingPolicy,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<S, C, P> PartialEq for FixedRedBlackTree<S, C, P>
where
    S: NodeStorage,
    KeyOf<S>: PartialEq,
    ValueOf<S>: PartialEq,
    P: CheckingPolicy,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<S, C, P> Eq for FixedRedBlackTree<S, C, P>
where
    S: NodeStorage,
    KeyOf<S>: Eq,
    ValueOf<S>: Eq,
    P: CheckingPolicy,
{
}
