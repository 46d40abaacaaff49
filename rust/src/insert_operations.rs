//! INSERT operations for FixedRedBlackTree.
//!
//! New keys are attached as red leaves and the red-red conflicts this can cause
//! are repaired by recoloring up the tree and at most two rotations.

use std::panic::Location;

use crate::checking::CheckingPolicy;
use crate::comparator::Comparator;
use crate::error::{FixedTreeResult, ModifyResult};
use crate::node::RedBlackNode;
use crate::storage::NodeStorage;
use crate::types::{Color, FixedRedBlackTree, KeyOf, NodeIndex, SearchResult, Side, ValueOf, NULL_INDEX};

impl<S, C, P> FixedRedBlackTree<S, C, P>
where
    S: NodeStorage,
    C: Comparator<KeyOf<S>>,
    P: CheckingPolicy,
{
    // ============================================================================
    // PUBLIC INSERT OPERATIONS
    // ============================================================================

    /// Insert a key-value pair into the tree.
    ///
    /// If the key already exists its value is replaced in place and the old
    /// value is returned; the tree structure does not change.
    ///
    /// # Panics
    ///
    /// Invokes the checking policy when the key is new and the tree is full.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_rbtree::FixedRedBlackTreeMap;
    ///
    /// let mut tree: FixedRedBlackTreeMap<i32, &str, 8> = FixedRedBlackTreeMap::new();
    /// assert_eq!(tree.insert(1, "one"), None);
    /// assert_eq!(tree.insert(1, "ONE"), Some("one"));
    /// assert_eq!(tree.get(&1), Some(&"ONE"));
    /// ```
    #[track_caller]
    pub fn insert(&mut self, key: KeyOf<S>, value: ValueOf<S>) -> Option<ValueOf<S>> {
        match self.insert_entry(key, value) {
            Ok((_, previous)) => previous,
            Err(error) => self.fail(error),
        }
    }

    /// Insert or update like [`insert`](Self::insert) and return the index of
    /// the node holding `key`.
    #[track_caller]
    pub fn insert_node(&mut self, key: KeyOf<S>, value: ValueOf<S>) -> NodeIndex {
        match self.insert_entry(key, value) {
            Ok((index, _)) => index,
            Err(error) => self.fail(error),
        }
    }

    /// Like [`insert`](Self::insert), but a full tree is reported as
    /// `CapacityExceeded` instead of going to the checking policy.
    ///
    /// Nothing is modified when an error is returned.
    pub fn try_insert(
        &mut self,
        key: KeyOf<S>,
        value: ValueOf<S>,
    ) -> ModifyResult<Option<ValueOf<S>>> {
        self.insert_entry(key, value).map(|(_, previous)| previous)
    }

    /// Value for `key`, inserting `make()` first if the key is absent.
    ///
    /// This is the `tree[key]` access of ordered maps.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_rbtree::FixedRedBlackTreeMap;
    ///
    /// let mut counts: FixedRedBlackTreeMap<char, u32, 8> = FixedRedBlackTreeMap::new();
    /// for c in "abca".chars() {
    ///     *counts.get_or_insert_with(c, || 0) += 1;
    /// }
    /// assert_eq!(counts.get(&'a'), Some(&2));
    /// ```
    #[track_caller]
    pub fn get_or_insert_with<F>(&mut self, key: KeyOf<S>, make: F) -> &mut ValueOf<S>
    where
        F: FnOnce() -> ValueOf<S>,
    {
        let index = match self.search(&key) {
            SearchResult::Found(index) => index,
            SearchResult::Vacant { parent, side } => match self.attach(key, make(), parent, side) {
                Ok(index) => index,
                Err(error) => self.fail(error),
            },
        };
        self.node_mut(index).value_mut()
    }

    /// Value for `key`, inserting the default value first if the key is absent.
    #[track_caller]
    pub fn get_or_insert_default(&mut self, key: KeyOf<S>) -> &mut ValueOf<S>
    where
        ValueOf<S>: Default,
    {
        self.get_or_insert_with(key, Default::default)
    }

    // ============================================================================
    // INSERT HELPERS
    // ============================================================================

    /// Insert or update, returning the node's index and the replaced value.
    #[track_caller]
    pub(crate) fn insert_entry(
        &mut self,
        key: KeyOf<S>,
        value: ValueOf<S>,
    ) -> FixedTreeResult<(NodeIndex, Option<ValueOf<S>>)> {
        match self.search(&key) {
            SearchResult::Found(index) => {
                let previous = std::mem::replace(self.node_mut(index).value_mut(), value);
                Ok((index, Some(previous)))
            }
            SearchResult::Vacant { parent, side } => {
                let index = self.attach(key, value, parent, side)?;
                Ok((index, None))
            }
        }
    }

    /// Allocate a red leaf below `parent` and rebalance.
    #[track_caller]
    fn attach(
        &mut self,
        key: KeyOf<S>,
        value: ValueOf<S>,
        parent: NodeIndex,
        side: Side,
    ) -> FixedTreeResult<NodeIndex> {
        let index = self.storage.allocate_slot(key, value)?;

        self.node_mut(index).set_parent_index(parent);
        if parent == NULL_INDEX {
            self.storage.set_root_index(index);
        } else {
            self.set_child_of(parent, side, index);
        }

        self.fix_after_insert(index);
        self.verify_after("insert");
        Ok(index)
    }

    #[track_caller]
    fn fix_after_insert(&mut self, mut node: NodeIndex) {
        while self.is_red(self.parent_of(node)) {
            // A red parent is never the root, so the grandparent exists.
            let parent = self.parent_of(node);
            let grandparent = self.parent_of(parent);
            let parent_side = if self.left_of(grandparent) == parent {
                Side::Left
            } else {
                Side::Right
            };
            let uncle = self.child_of(grandparent, parent_side.opposite());

            if self.is_red(uncle) {
                self.set_color_of(parent, Color::Black);
                self.set_color_of(uncle, Color::Black);
                self.set_color_of(grandparent, Color::Red);
                node = grandparent;
                continue;
            }

            // Inner grandchild: turn it into an outer one first.
            if self.child_of(parent, parent_side.opposite()) == node {
                node = parent;
                self.rotate_toward(node, parent_side);
            }

            let parent = self.parent_of(node);
            let grandparent = self.parent_of(parent);
            self.set_color_of(parent, Color::Black);
            self.set_color_of(grandparent, Color::Red);
            self.rotate_toward(grandparent, parent_side.opposite());
        }

        let root = self.root_index();
        self.set_color_of(root, Color::Black);
    }

    /// Rotate `pivot` down toward `side`.
    #[track_caller]
    pub(crate) fn rotate_toward(&mut self, pivot: NodeIndex, side: Side) {
        match side {
            Side::Left => self.rotate_left(pivot),
            Side::Right => self.rotate_right(pivot),
        }
    }

    /// Re-validate the whole tree after `operation` when built with the
    /// `verify-invariants` feature.
    #[inline]
    #[track_caller]
    pub(crate) fn verify_after(&self, operation: &str) {
        #[cfg(feature = "verify-invariants")]
        {
            use crate::error::TreeResultExt;
            if let Err(error) = self.validate().with_operation(operation) {
                P::invariant_violation(error, Location::caller());
            }
        }
        #[cfg(not(feature = "verify-invariants"))]
        let _ = (operation, Location::caller());
    }
}

impl<S, C, P> FixedRedBlackTree<S, C, P>
where
    S: NodeStorage,
    S::Node: RedBlackNode<Value = ()>,
    C: Comparator<KeyOf<S>>,
    P: CheckingPolicy,
{
    /// Add `key` to a set-like tree. Returns `false` if it was already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_rbtree::FixedRedBlackTreeSet;
    ///
    /// let mut set: FixedRedBlackTreeSet<i32, 4> = FixedRedBlackTreeSet::new();
    /// assert!(set.insert_key(3));
    /// assert!(!set.insert_key(3));
    /// assert_eq!(set.len(), 1);
    /// ```
    #[track_caller]
    pub fn insert_key(&mut self, key: KeyOf<S>) -> bool {
        self.insert(key, ()).is_none()
    }
}

#[cfg(test)]
mod tests {
    use crate::checking::PanicChecking;
    use crate::comparator::NaturalOrder;
    use crate::node::{PlainNode, RedBlackNode};
    use crate::pool_storage::PoolStorage;
    use crate::types::{Color, FixedRedBlackTree, FixedRedBlackTreeMap, NULL_INDEX};

    type Checked<const C: usize> =
        FixedRedBlackTree<PoolStorage<PlainNode<i32, i32>, C>, NaturalOrder, PanicChecking>;

    #[test]
    fn test_first_insert_becomes_black_root() {
        let mut tree: FixedRedBlackTreeMap<i32, i32, 4> = FixedRedBlackTreeMap::new();
        let index = tree.insert_node(15, 150);
        assert_eq!(tree.root_index(), index);
        let root = tree.node_at(index);
        assert_eq!(root.color(), Color::Black);
        assert_eq!(root.parent_index(), NULL_INDEX);
    }

    #[test]
    fn test_update_keeps_structure() {
        let mut tree: FixedRedBlackTreeMap<i32, i32, 4> = FixedRedBlackTreeMap::new();
        let first = tree.insert_node(1, 10);
        tree.insert(2, 20);
        assert_eq!(tree.insert_node(1, 11), first);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.get(&1), Some(&11));
    }

    #[test]
    fn test_try_insert_reports_full_tree_without_mutating() {
        let mut tree: Checked<2> = Checked::new();
        tree.insert(1, 1);
        tree.insert(2, 2);
        let err = tree.try_insert(3, 3).unwrap_err();
        assert!(err.is_capacity_error());
        assert_eq!(tree.len(), 2);
        assert!(tree.validate().is_ok());

        // Updating an existing key still works on a full tree.
        assert_eq!(tree.try_insert(2, 20), Ok(Some(2)));
    }

    #[test]
    #[should_panic(expected = "capacity exceeded")]
    fn test_insert_into_full_tree_invokes_policy() {
        let mut tree: Checked<1> = Checked::new();
        tree.insert(1, 1);
        tree.insert(2, 2);
    }

    #[test]
    fn test_get_or_insert_default() {
        let mut tree: Checked<4> = Checked::new();
        *tree.get_or_insert_default(5) += 3;
        *tree.get_or_insert_default(5) += 4;
        assert_eq!(tree.get(&5), Some(&7));
    }

    #[test]
    fn test_ascending_inserts_stay_balanced() {
        let mut tree: Checked<64> = Checked::new();
        for key in 0..64 {
            tree.insert(key, key);
            assert!(tree.check_invariants(), "invalid after inserting {}", key);
        }
        assert!(tree.height() <= 2 * (65f64).log2() as usize);
    }
}
