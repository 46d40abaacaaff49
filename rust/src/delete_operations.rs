//! DELETE operations for FixedRedBlackTree.
//!
//! This module contains key-based and index-based removal. A node with two
//! children is replaced by its in-order successor, which keeps its own slot
//! and takes over the removed node's position and color. The removed slot is
//! then freed; on a dense backend that moves the last node into the hole.

use crate::checking::CheckingPolicy;
use crate::comparator::Comparator;
use crate::error::{FixedTreeError, ModifyResult};
use crate::node::RedBlackNode;
use crate::storage::{NodeStorage, Relocation};
use crate::types::{Color, FixedRedBlackTree, KeyOf, NodeIndex, SearchResult, Side, ValueOf, NULL_INDEX};

impl<S, C, P> FixedRedBlackTree<S, C, P>
where
    S: NodeStorage,
    C: Comparator<KeyOf<S>>,
    P: CheckingPolicy,
{
    // ============================================================================
    // PUBLIC DELETE OPERATIONS
    // ============================================================================

    /// Remove a key from the tree and return its associated value.
    ///
    /// # Arguments
    ///
    /// * `key` - The key to remove
    ///
    /// # Returns
    ///
    /// The value that was associated with the key, or `None` if the key was absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_rbtree::FixedRedBlackTreeMap;
    ///
    /// let mut tree: FixedRedBlackTreeMap<i32, &str, 8> = FixedRedBlackTreeMap::new();
    /// tree.insert(1, "one");
    /// tree.insert(2, "two");
    ///
    /// assert_eq!(tree.remove(&1), Some("one"));
    /// assert_eq!(tree.remove(&1), None);
    /// assert_eq!(tree.len(), 1);
    /// ```
    #[track_caller]
    pub fn remove(&mut self, key: &KeyOf<S>) -> Option<ValueOf<S>> {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Remove a key and return the stored key together with its value.
    #[track_caller]
    pub fn remove_entry(&mut self, key: &KeyOf<S>) -> Option<(KeyOf<S>, ValueOf<S>)> {
        match self.search(key) {
            SearchResult::Found(index) => Some(self.remove_at(index)),
            SearchResult::Vacant { .. } => None,
        }
    }

    /// Remove a key, reporting whether it was present.
    #[track_caller]
    pub fn delete_node(&mut self, key: &KeyOf<S>) -> bool {
        self.remove_entry(key).is_some()
    }

    /// Remove a key, or fail with `KeyNotFound`.
    pub fn try_remove(&mut self, key: &KeyOf<S>) -> ModifyResult<ValueOf<S>> {
        self.remove(key).ok_or(FixedTreeError::KeyNotFound)
    }

    /// Remove the node in slot `index` and return its key and value.
    ///
    /// # Panics
    ///
    /// Invokes the checking policy when `index` is not an occupied slot.
    #[track_caller]
    pub fn remove_at(&mut self, index: NodeIndex) -> (KeyOf<S>, ValueOf<S>) {
        let (node, _) = self.delete_at(index);
        node.into_entry()
    }

    /// Remove the node in slot `index` and return the index now holding the
    /// next key in order, or [`NULL_INDEX`] if the removed key was the largest.
    ///
    /// The returned index already accounts for any relocation the backend did,
    /// so it can be used to keep walking the tree while deleting.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_rbtree::{ContiguousRedBlackTreeSet, RedBlackNode, NULL_INDEX};
    ///
    /// let mut set: ContiguousRedBlackTreeSet<i32, 8> = ContiguousRedBlackTreeSet::from_keys([1, 2, 3, 4]);
    /// let mut index = set.index_of_node_or_null(&2);
    /// index = set.delete_at_and_return_successor(index);
    /// assert_eq!(*set.node_at(index).key(), 3);
    /// index = set.delete_at_and_return_successor(index);
    /// assert_eq!(*set.node_at(index).key(), 4);
    /// assert_eq!(set.delete_at_and_return_successor(index), NULL_INDEX);
    /// assert_eq!(set.len(), 1);
    /// ```
    #[track_caller]
    pub fn delete_at_and_return_successor(&mut self, index: NodeIndex) -> NodeIndex {
        let successor = self.index_of_successor_at(index);
        match self.delete_at(index) {
            (_, Some(relocation)) => relocation.remap(successor),
            (_, None) => successor,
        }
    }

    // ============================================================================
    // DELETE HELPERS
    // ============================================================================

    /// Unlink slot `index` from the tree, rebalance, and free the slot.
    #[track_caller]
    pub(crate) fn delete_at(&mut self, index: NodeIndex) -> (S::Node, Option<Relocation>) {
        self.unlink(index);
        let freed = match self.storage.free_slot(index) {
            Ok(freed) => freed,
            Err(error) => self.fail(error),
        };
        self.verify_after("delete");
        (freed.node, freed.relocated)
    }

    /// Detach `target` from the tree structure. Its slot stays occupied.
    #[track_caller]
    fn unlink(&mut self, target: NodeIndex) {
        let left = self.left_of(target);
        let right = self.right_of(target);

        let mut removed_color = self.color_of(target);
        let replacement;
        let replacement_parent;

        if left == NULL_INDEX || right == NULL_INDEX {
            replacement = if left == NULL_INDEX { right } else { left };
            replacement_parent = self.parent_of(target);
            self.transplant(target, replacement);
        } else {
            let successor = self.min_at(right);
            removed_color = self.color_of(successor);
            replacement = self.right_of(successor);

            if self.parent_of(successor) == target {
                replacement_parent = successor;
            } else {
                replacement_parent = self.parent_of(successor);
                self.transplant(successor, replacement);
                self.node_mut(successor).set_right_index(right);
                self.set_parent_of(right, successor);
            }

            self.transplant(target, successor);
            self.node_mut(successor).set_left_index(left);
            self.set_parent_of(left, successor);
            let color = self.color_of(target);
            self.set_color_of(successor, color);
        }

        if removed_color.is_black() {
            self.fix_after_delete(replacement, replacement_parent);
        }
    }

    /// Restore the black height after a black node left the tree. `node` is
    /// the extra-black position, possibly empty, and `parent` is its parent.
    #[track_caller]
    fn fix_after_delete(&mut self, mut node: NodeIndex, mut parent: NodeIndex) {
        while node != self.root_index() && self.is_black(node) {
            let side = if self.left_of(parent) == node {
                Side::Left
            } else {
                Side::Right
            };
            let far = side.opposite();
            let mut sibling = self.child_of(parent, far);

            if self.is_red(sibling) {
                self.set_color_of(sibling, Color::Black);
                self.set_color_of(parent, Color::Red);
                self.rotate_toward(parent, side);
                sibling = self.child_of(parent, far);
            }

            if self.is_black(self.left_of(sibling)) && self.is_black(self.right_of(sibling)) {
                self.set_color_of(sibling, Color::Red);
                node = parent;
                parent = self.parent_of(node);
                continue;
            }

            if self.is_black(self.child_of(sibling, far)) {
                let near = self.child_of(sibling, side);
                self.set_color_of(near, Color::Black);
                self.set_color_of(sibling, Color::Red);
                self.rotate_toward(sibling, far);
                sibling = self.child_of(parent, far);
            }

            let parent_color = self.color_of(parent);
            self.set_color_of(sibling, parent_color);
            self.set_color_of(parent, Color::Black);
            let far_child = self.child_of(sibling, far);
            self.set_color_of(far_child, Color::Black);
            self.rotate_toward(parent, side);
            node = self.root_index();
            parent = NULL_INDEX;
        }

        self.set_color_of(node, Color::Black);
    }
}
