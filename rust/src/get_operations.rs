//! GET operations for FixedRedBlackTree.
//!
//! This module contains all the read operations: key lookup, index-based node
//! access and the order-statistic queries (min/max, successor/predecessor and
//! the bound queries).

use std::cmp::Ordering;

use crate::checking::CheckingPolicy;
use crate::comparator::Comparator;
use crate::error::{FixedTreeError, KeyResult};
use crate::node::RedBlackNode;
use crate::storage::NodeStorage;
use crate::types::{FixedRedBlackTree, KeyOf, NodeIndex, SearchResult, Side, ValueOf, NULL_INDEX};

impl<S: NodeStorage, C, P: CheckingPolicy> FixedRedBlackTree<S, C, P> {
    // ============================================================================
    // SIZE
    // ============================================================================

    /// Number of keys in the tree.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Same as [`len`](Self::len).
    pub fn size(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Same as [`is_empty`](Self::is_empty).
    pub fn empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// `true` when no further key can be inserted.
    pub fn is_full(&self) -> bool {
        self.storage.is_full()
    }

    /// Same as [`is_full`](Self::is_full).
    pub fn full(&self) -> bool {
        self.storage.is_full()
    }

    /// Fixed maximum number of keys.
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// The backend, for inspection.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    // ============================================================================
    // INDEX-BASED ACCESS
    // ============================================================================

    /// Index of the root node, or [`NULL_INDEX`] for an empty tree.
    pub fn root_index(&self) -> NodeIndex {
        self.storage.root_index()
    }

    /// Whether `index` names a node currently in the tree.
    pub fn contains_at(&self, index: NodeIndex) -> bool {
        self.storage.contains(index)
    }

    /// The node in slot `index`.
    ///
    /// # Panics
    ///
    /// Invokes the checking policy when `index` is the sentinel or not occupied.
    /// Use [`try_node_at`](Self::try_node_at) to get an error instead.
    #[track_caller]
    pub fn node_at(&self, index: NodeIndex) -> &S::Node {
        self.node(index)
    }

    /// The node in slot `index`, or `InvalidAccess`.
    pub fn try_node_at(&self, index: NodeIndex) -> KeyResult<&S::Node> {
        self.storage
            .get(index)
            .ok_or_else(|| FixedTreeError::invalid_access(index, self.storage.len()))
    }

    /// Mutable access to the value in slot `index`.
    ///
    /// Keys and links stay read-only so the tree cannot be corrupted through an
    /// index.
    #[track_caller]
    pub fn value_at_mut(&mut self, index: NodeIndex) -> &mut ValueOf<S> {
        self.node_mut(index).value_mut()
    }

    // ============================================================================
    // SUBTREE WALKS
    // ============================================================================

    /// Leftmost node of the subtree rooted at `index`.
    #[track_caller]
    pub(crate) fn min_at(&self, mut index: NodeIndex) -> NodeIndex {
        if index == NULL_INDEX {
            return NULL_INDEX;
        }
        loop {
            let left = self.left_of(index);
            if left == NULL_INDEX {
                return index;
            }
            index = left;
        }
    }

    /// Rightmost node of the subtree rooted at `index`.
    #[track_caller]
    pub(crate) fn max_at(&self, mut index: NodeIndex) -> NodeIndex {
        if index == NULL_INDEX {
            return NULL_INDEX;
        }
        loop {
            let right = self.right_of(index);
            if right == NULL_INDEX {
                return index;
            }
            index = right;
        }
    }

    /// Index of the smallest key, or [`NULL_INDEX`] for an empty tree.
    pub fn index_of_min_at(&self) -> NodeIndex {
        self.min_at(self.root_index())
    }

    /// Index of the largest key, or [`NULL_INDEX`] for an empty tree.
    pub fn index_of_max_at(&self) -> NodeIndex {
        self.max_at(self.root_index())
    }

    /// Index of the next key in order after the node at `index`.
    ///
    /// Returns [`NULL_INDEX`] when `index` holds the largest key.
    #[track_caller]
    pub fn index_of_successor_at(&self, index: NodeIndex) -> NodeIndex {
        self.neighbor_at(index, Side::Right)
    }

    /// Index of the previous key in order before the node at `index`.
    ///
    /// Returns [`NULL_INDEX`] when `index` holds the smallest key.
    #[track_caller]
    pub fn index_of_predecessor_at(&self, index: NodeIndex) -> NodeIndex {
        self.neighbor_at(index, Side::Left)
    }

    // Successor for Side::Right, predecessor for Side::Left.
    #[track_caller]
    fn neighbor_at(&self, index: NodeIndex, toward: Side) -> NodeIndex {
        let child = self.child_of(index, toward);
        if child != NULL_INDEX {
            return match toward {
                Side::Right => self.min_at(child),
                Side::Left => self.max_at(child),
            };
        }

        let mut current = index;
        let mut parent = self.parent_of(current);
        while parent != NULL_INDEX && self.child_of(parent, toward) == current {
            current = parent;
            parent = self.parent_of(current);
        }
        parent
    }
}

impl<S, C, P> FixedRedBlackTree<S, C, P>
where
    S: NodeStorage,
    C: Comparator<KeyOf<S>>,
    P: CheckingPolicy,
{
    // ============================================================================
    // KEY SEARCH
    // ============================================================================

    /// Descend from the root looking for `key`.
    pub(crate) fn search(&self, key: &KeyOf<S>) -> SearchResult {
        let mut parent = NULL_INDEX;
        let mut side = Side::Left;
        let mut current = self.root_index();

        while current != NULL_INDEX {
            let node = self.node(current);
            match self.comparator.compare(key, node.key()) {
                Ordering::Less => {
                    parent = current;
                    side = Side::Left;
                    current = node.left_index();
                }
                Ordering::Greater => {
                    parent = current;
                    side = Side::Right;
                    current = node.right_index();
                }
                Ordering::Equal => return SearchResult::Found(current),
            }
        }

        SearchResult::Vacant { parent, side }
    }

    /// Index of the node holding `key`, or [`NULL_INDEX`].
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_rbtree::{FixedRedBlackTreeSet, RedBlackNode, NULL_INDEX};
    ///
    /// let mut set: FixedRedBlackTreeSet<u8, 4> = FixedRedBlackTreeSet::new();
    /// set.insert_key(7);
    /// let index = set.index_of_node_or_null(&7);
    /// assert_eq!(*set.node_at(index).key(), 7);
    /// assert_eq!(set.index_of_node_or_null(&8), NULL_INDEX);
    /// ```
    pub fn index_of_node_or_null(&self, key: &KeyOf<S>) -> NodeIndex {
        match self.search(key) {
            SearchResult::Found(index) => index,
            SearchResult::Vacant { .. } => NULL_INDEX,
        }
    }

    /// Get a reference to the value associated with a key.
    ///
    /// # Arguments
    ///
    /// * `key` - The key to look up
    ///
    /// # Returns
    ///
    /// A reference to the value if the key exists, `None` otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_rbtree::FixedRedBlackTreeMap;
    ///
    /// let mut tree: FixedRedBlackTreeMap<i32, &str, 8> = FixedRedBlackTreeMap::new();
    /// tree.insert(1, "one");
    /// assert_eq!(tree.get(&1), Some(&"one"));
    /// assert_eq!(tree.get(&2), None);
    /// ```
    pub fn get(&self, key: &KeyOf<S>) -> Option<&ValueOf<S>> {
        self.lookup(key).map(|node| node.value())
    }

    /// Get a mutable reference to the value associated with a key.
    pub fn get_mut(&mut self, key: &KeyOf<S>) -> Option<&mut ValueOf<S>> {
        match self.search(key) {
            SearchResult::Found(index) => Some(self.node_mut(index).value_mut()),
            SearchResult::Vacant { .. } => None,
        }
    }

    /// The stored key and its value.
    pub fn get_key_value(&self, key: &KeyOf<S>) -> Option<(&KeyOf<S>, &ValueOf<S>)> {
        self.lookup(key).map(|node| (node.key(), node.value()))
    }

    /// Check if key exists in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_rbtree::FixedRedBlackTreeMap;
    ///
    /// let mut tree: FixedRedBlackTreeMap<i32, &str, 8> = FixedRedBlackTreeMap::new();
    /// tree.insert(1, "one");
    /// assert!(tree.contains_key(&1));
    /// assert!(!tree.contains_key(&2));
    /// ```
    pub fn contains_key(&self, key: &KeyOf<S>) -> bool {
        matches!(self.search(key), SearchResult::Found(_))
    }

    fn lookup(&self, key: &KeyOf<S>) -> Option<&S::Node> {
        match self.search(key) {
            SearchResult::Found(index) => Some(self.node(index)),
            SearchResult::Vacant { .. } => None,
        }
    }

    /// Smallest key and its value.
    pub fn first_key_value(&self) -> Option<(&KeyOf<S>, &ValueOf<S>)> {
        self.entry_at(self.index_of_min_at())
    }

    /// Largest key and its value.
    pub fn last_key_value(&self) -> Option<(&KeyOf<S>, &ValueOf<S>)> {
        self.entry_at(self.index_of_max_at())
    }

    fn entry_at(&self, index: NodeIndex) -> Option<(&KeyOf<S>, &ValueOf<S>)> {
        self.storage
            .get(index)
            .map(|node| (node.key(), node.value()))
    }

    // ============================================================================
    // BOUND QUERIES
    // ============================================================================

    /// Index of the node with the smallest key strictly greater than `key`,
    /// or [`NULL_INDEX`] if there is none. `key` need not be in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_rbtree::{FixedRedBlackTreeSet, RedBlackNode, NULL_INDEX};
    ///
    /// let set: FixedRedBlackTreeSet<i32, 8> = FixedRedBlackTreeSet::from_keys([10, 20, 30]);
    /// let index = set.index_of_node_greater_than(&15);
    /// assert_eq!(*set.node_at(index).key(), 20);
    /// assert_eq!(set.index_of_node_greater_than(&30), NULL_INDEX);
    /// ```
    pub fn index_of_node_greater_than(&self, key: &KeyOf<S>) -> NodeIndex {
        self.descend_keeping_best(key, Side::Left, |ordering| ordering == Ordering::Greater)
    }

    /// Index of the node with the smallest key not less than `key`.
    pub fn index_of_node_greater_or_equal(&self, key: &KeyOf<S>) -> NodeIndex {
        self.descend_keeping_best(key, Side::Left, |ordering| ordering != Ordering::Less)
    }

    /// Index of the node with the largest key strictly less than `key`.
    pub fn index_of_node_less_than(&self, key: &KeyOf<S>) -> NodeIndex {
        self.descend_keeping_best(key, Side::Right, |ordering| ordering == Ordering::Less)
    }

    /// Index of the node with the largest key not greater than `key`.
    pub fn index_of_node_less_or_equal(&self, key: &KeyOf<S>) -> NodeIndex {
        self.descend_keeping_best(key, Side::Right, |ordering| ordering != Ordering::Greater)
    }

    /// Walk down from the root, remembering the last node whose key satisfies
    /// `qualifies(node_key.cmp(key))`. After a qualifying node the walk heads
    /// toward `closer`, the side holding keys nearer to `key`.
    fn descend_keeping_best(
        &self,
        key: &KeyOf<S>,
        closer: Side,
        qualifies: impl Fn(Ordering) -> bool,
    ) -> NodeIndex {
        let mut best = NULL_INDEX;
        let mut current = self.root_index();
        while current != NULL_INDEX {
            let node = self.node(current);
            let side = if qualifies(self.comparator.compare(node.key(), key)) {
                best = current;
                closer
            } else {
                closer.opposite()
            };
            current = match side {
                Side::Left => node.left_index(),
                Side::Right => node.right_index(),
            };
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use crate::comparator::ReverseOrder;
    use crate::error::FixedTreeError;
    use crate::node::{PlainNode, RedBlackNode};
    use crate::pool_storage::PoolStorage;
    use crate::types::{FixedRedBlackTree, FixedRedBlackTreeMap, NULL_INDEX};

    fn evens() -> FixedRedBlackTreeMap<i32, i32, 16> {
        (0..8).map(|k| (k * 2, k)).collect()
    }

    #[test]
    fn test_bound_queries_on_empty_tree() {
        let tree: FixedRedBlackTreeMap<i32, i32, 4> = FixedRedBlackTreeMap::new();
        assert_eq!(tree.index_of_node_greater_than(&0), NULL_INDEX);
        assert_eq!(tree.index_of_node_greater_or_equal(&0), NULL_INDEX);
        assert_eq!(tree.index_of_node_less_than(&0), NULL_INDEX);
        assert_eq!(tree.index_of_node_less_or_equal(&0), NULL_INDEX);
        assert_eq!(tree.index_of_node_or_null(&0), NULL_INDEX);
        assert_eq!(tree.first_key_value(), None);
        assert_eq!(tree.last_key_value(), None);
    }

    #[test]
    fn test_bound_queries_between_keys() {
        let tree = evens();
        let key_of = |index| *tree.node_at(index).key();
        assert_eq!(key_of(tree.index_of_node_greater_than(&5)), 6);
        assert_eq!(key_of(tree.index_of_node_greater_than(&6)), 8);
        assert_eq!(key_of(tree.index_of_node_greater_or_equal(&6)), 6);
        assert_eq!(key_of(tree.index_of_node_less_than(&6)), 4);
        assert_eq!(key_of(tree.index_of_node_less_or_equal(&7)), 6);
        assert_eq!(key_of(tree.index_of_node_less_or_equal(&0)), 0);
        assert_eq!(tree.index_of_node_less_than(&0), NULL_INDEX);
        assert_eq!(tree.index_of_node_greater_than(&14), NULL_INDEX);
    }

    #[test]
    fn test_successor_and_predecessor_walk() {
        let tree = evens();
        let mut forward = Vec::new();
        let mut index = tree.index_of_min_at();
        while index != NULL_INDEX {
            forward.push(*tree.node_at(index).key());
            index = tree.index_of_successor_at(index);
        }
        assert_eq!(forward, [0, 2, 4, 6, 8, 10, 12, 14]);

        let mut backward = Vec::new();
        let mut index = tree.index_of_max_at();
        while index != NULL_INDEX {
            backward.push(*tree.node_at(index).key());
            index = tree.index_of_predecessor_at(index);
        }
        forward.reverse();
        assert_eq!(backward, forward);
    }

    #[test]
    fn test_lookup_and_value_access() {
        let mut tree = evens();
        assert_eq!(tree.get(&4), Some(&2));
        assert_eq!(tree.get(&5), None);
        assert_eq!(tree.get_key_value(&14), Some((&14, &7)));
        assert!(tree.contains_key(&0));
        assert!(!tree.contains_key(&15));

        *tree.get_mut(&4).unwrap() = 40;
        let index = tree.index_of_node_or_null(&6);
        *tree.value_at_mut(index) = 60;
        assert_eq!(tree.get(&4), Some(&40));
        assert_eq!(tree.get(&6), Some(&60));
        assert_eq!(tree.first_key_value(), Some((&0, &0)));
        assert_eq!(tree.last_key_value(), Some((&14, &7)));
    }

    #[test]
    fn test_try_node_at_reports_dead_slots() {
        let mut tree = evens();
        let index = tree.index_of_node_or_null(&2);
        tree.remove(&2);
        assert!(!tree.contains_at(index));
        assert_eq!(
            tree.try_node_at(index).unwrap_err(),
            FixedTreeError::invalid_access(index, 7)
        );
        assert!(tree.try_node_at(NULL_INDEX).unwrap_err().is_access_error());
    }

    #[test]
    fn test_queries_follow_the_comparator() {
        let tree: FixedRedBlackTree<PoolStorage<PlainNode<i32, ()>, 8>, ReverseOrder> =
            FixedRedBlackTree::from_keys([1, 5, 9]);
        assert_eq!(*tree.node_at(tree.index_of_min_at()).key(), 9);
        assert_eq!(*tree.node_at(tree.index_of_node_greater_than(&5)).key(), 1);
        assert_eq!(*tree.node_at(tree.index_of_node_less_than(&5)).key(), 9);
    }
}
