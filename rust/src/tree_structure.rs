//! Structural primitives for FixedRedBlackTree.
//!
//! Checked node access, link helpers, rotations and the slot-level node swap.
//! Everything here works on indices only and never compares keys.

use std::panic::Location;

use tracing::trace;

use crate::checking::CheckingPolicy;
use crate::comparator::Comparator;
use crate::error::FixedTreeError;
use crate::node::RedBlackNode;
use crate::storage::NodeStorage;
use crate::types::{Color, FixedRedBlackTree, KeyOf, NodeIndex, Side, NULL_INDEX};

impl<S: NodeStorage, C, P: CheckingPolicy> FixedRedBlackTree<S, C, P> {
    // ============================================================================
    // CHECKED NODE ACCESS
    // ============================================================================

    /// Hand an error to the matching checking-policy hook, reporting the
    /// caller's location.
    #[track_caller]
    pub(crate) fn fail(&self, error: FixedTreeError) -> ! {
        let location = Location::caller();
        match error {
            FixedTreeError::CapacityExceeded { capacity } => P::capacity_exceeded(capacity, location),
            FixedTreeError::InvalidAccess { index, size } => P::invalid_access(index, size, location),
            error @ FixedTreeError::InvariantViolation(_) => P::invariant_violation(error, location),
            error => P::violation(error, location),
        }
    }

    #[track_caller]
    pub(crate) fn node(&self, index: NodeIndex) -> &S::Node {
        match self.storage.get(index) {
            Some(node) => node,
            None => P::invalid_access(index, self.storage.len(), Location::caller()),
        }
    }

    #[track_caller]
    pub(crate) fn node_mut(&mut self, index: NodeIndex) -> &mut S::Node {
        let size = self.storage.len();
        match self.storage.get_mut(index) {
            Some(node) => node,
            None => P::invalid_access(index, size, Location::caller()),
        }
    }

    // ============================================================================
    // LINK HELPERS
    // ============================================================================

    #[track_caller]
    pub(crate) fn parent_of(&self, index: NodeIndex) -> NodeIndex {
        self.node(index).parent_index()
    }

    #[track_caller]
    pub(crate) fn left_of(&self, index: NodeIndex) -> NodeIndex {
        self.node(index).left_index()
    }

    #[track_caller]
    pub(crate) fn right_of(&self, index: NodeIndex) -> NodeIndex {
        self.node(index).right_index()
    }

    #[track_caller]
    pub(crate) fn child_of(&self, index: NodeIndex, side: Side) -> NodeIndex {
        match side {
            Side::Left => self.left_of(index),
            Side::Right => self.right_of(index),
        }
    }

    /// Empty children count as black.
    #[track_caller]
    pub(crate) fn color_of(&self, index: NodeIndex) -> Color {
        if index == NULL_INDEX {
            Color::Black
        } else {
            self.node(index).color()
        }
    }

    #[track_caller]
    pub(crate) fn is_red(&self, index: NodeIndex) -> bool {
        self.color_of(index).is_red()
    }

    #[track_caller]
    pub(crate) fn is_black(&self, index: NodeIndex) -> bool {
        self.color_of(index).is_black()
    }

    /// Recolor `index`; a no-op on the sentinel.
    #[track_caller]
    pub(crate) fn set_color_of(&mut self, index: NodeIndex, color: Color) {
        if index != NULL_INDEX {
            self.node_mut(index).set_color(color);
        }
    }

    /// Set the parent link of `index`; a no-op on the sentinel.
    #[track_caller]
    pub(crate) fn set_parent_of(&mut self, index: NodeIndex, parent: NodeIndex) {
        if index != NULL_INDEX {
            self.node_mut(index).set_parent_index(parent);
        }
    }

    #[track_caller]
    pub(crate) fn set_child_of(&mut self, index: NodeIndex, side: Side, child: NodeIndex) {
        let node = self.node_mut(index);
        match side {
            Side::Left => node.set_left_index(child),
            Side::Right => node.set_right_index(child),
        }
    }

    /// Make whatever pointed down at `old` from `parent` point at `new`.
    /// A [`NULL_INDEX`] parent means `old` was the root.
    #[track_caller]
    pub(crate) fn replace_child(&mut self, parent: NodeIndex, old: NodeIndex, new: NodeIndex) {
        if parent == NULL_INDEX {
            self.storage.set_root_index(new);
        } else if self.left_of(parent) == old {
            self.node_mut(parent).set_left_index(new);
        } else {
            self.node_mut(parent).set_right_index(new);
        }
    }

    /// Put the subtree rooted at `replacement` where `target` hangs.
    #[track_caller]
    pub(crate) fn transplant(&mut self, target: NodeIndex, replacement: NodeIndex) {
        let parent = self.parent_of(target);
        self.replace_child(parent, target, replacement);
        self.set_parent_of(replacement, parent);
    }

    // ============================================================================
    // ROTATIONS
    // ============================================================================

    /// Rotate `pivot` down to the left; its right child takes its place.
    #[track_caller]
    pub(crate) fn rotate_left(&mut self, pivot: NodeIndex) {
        let riser = self.right_of(pivot);
        let crossing = self.left_of(riser);

        self.node_mut(pivot).set_right_index(crossing);
        self.set_parent_of(crossing, pivot);

        let parent = self.parent_of(pivot);
        self.node_mut(riser).set_parent_index(parent);
        self.replace_child(parent, pivot, riser);

        self.node_mut(riser).set_left_index(pivot);
        self.node_mut(pivot).set_parent_index(riser);
    }

    /// Rotate `pivot` down to the right; its left child takes its place.
    #[track_caller]
    pub(crate) fn rotate_right(&mut self, pivot: NodeIndex) {
        let riser = self.left_of(pivot);
        let crossing = self.right_of(riser);

        self.node_mut(pivot).set_left_index(crossing);
        self.set_parent_of(crossing, pivot);

        let parent = self.parent_of(pivot);
        self.node_mut(riser).set_parent_index(parent);
        self.replace_child(parent, pivot, riser);

        self.node_mut(riser).set_right_index(pivot);
        self.node_mut(pivot).set_parent_index(riser);
    }

    // ============================================================================
    // NODE SWAP
    // ============================================================================

    #[track_caller]
    fn swap_parent_and_child(&mut self, parent: NodeIndex, child: NodeIndex) {
        let grandparent = self.parent_of(parent);
        let side = if self.left_of(parent) == child {
            Side::Left
        } else {
            Side::Right
        };
        let sibling = self.child_of(parent, side.opposite());
        let (child_left, child_right) = (self.left_of(child), self.right_of(child));

        self.replace_child(grandparent, parent, child);
        self.set_parent_of(sibling, child);
        self.set_parent_of(child_left, parent);
        self.set_parent_of(child_right, parent);

        self.swap_slots(parent, child);

        // The two nodes still point at each other through their old slots.
        self.node_mut(parent).set_parent_index(child);
        self.set_child_of(child, side, parent);
    }

    #[track_caller]
    fn swap_unrelated(&mut self, a: NodeIndex, b: NodeIndex) {
        let (a_parent, b_parent) = (self.parent_of(a), self.parent_of(b));

        if a_parent == b_parent {
            let parent = self.node_mut(a_parent);
            let left = parent.left_index();
            parent.set_left_index(parent.right_index());
            parent.set_right_index(left);
        } else {
            self.replace_child(a_parent, a, b);
            self.replace_child(b_parent, b, a);
        }

        for child in [self.left_of(a), self.right_of(a)] {
            self.set_parent_of(child, b);
        }
        for child in [self.left_of(b), self.right_of(b)] {
            self.set_parent_of(child, a);
        }

        self.swap_slots(a, b);
    }

    #[track_caller]
    fn swap_slots(&mut self, a: NodeIndex, b: NodeIndex) {
        if let Err(error) = self.storage.swap_slots(a, b) {
            self.fail(error);
        }
    }
}

impl<S, C, P> FixedRedBlackTree<S, C, P>
where
    S: NodeStorage,
    C: Comparator<KeyOf<S>>,
    P: CheckingPolicy,
{
    /// Exchange the slots of two nodes without changing the logical tree.
    ///
    /// Key, value, color and links travel together: afterwards the node that
    /// lived in slot `a` lives in slot `b` and vice versa, and every parent,
    /// child and root reference has been retargeted accordingly. Swapping the
    /// same pair twice restores the arena exactly.
    ///
    /// # Panics
    ///
    /// Invokes the checking policy if either index is not an occupied slot.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_rbtree::{FixedRedBlackTreeMap, RedBlackNode};
    ///
    /// let mut tree: FixedRedBlackTreeMap<i32, char, 8> = FixedRedBlackTreeMap::new();
    /// let a = tree.insert_node(1, 'a');
    /// let b = tree.insert_node(2, 'b');
    /// tree.swap_nodes(a, b);
    /// assert_eq!(*tree.node_at(a).value(), 'b');
    /// assert_eq!(tree.get(&1), Some(&'a'));
    /// ```
    #[track_caller]
    pub fn swap_nodes(&mut self, a: NodeIndex, b: NodeIndex) {
        // Both must be live before anything is touched.
        self.node(a);
        self.node(b);
        if a == b {
            return;
        }
        trace!(a, b, "swapping node slots");

        if self.parent_of(b) == a {
            self.swap_parent_and_child(a, b);
        } else if self.parent_of(a) == b {
            self.swap_parent_and_child(b, a);
        } else {
            self.swap_unrelated(a, b);
        }
        self.verify_after("swap");
    }
}

impl Side {
    pub(crate) fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}
