//! Validation and debugging utilities for FixedRedBlackTree.
//!
//! This module contains invariant checking (red-black coloring, black height,
//! key order, link consistency, density of the contiguous backend) and a few
//! structural measurements used by tests.

use std::cmp::Ordering;
use std::fmt::{self, Write};

use crate::checking::CheckingPolicy;
use crate::comparator::Comparator;
use crate::error::{FixedTreeError, FixedTreeResult};
use crate::node::RedBlackNode;
use crate::storage::NodeStorage;
use crate::types::{FixedRedBlackTree, KeyOf, NodeIndex, NULL_INDEX};

// ============================================================================
// VALIDATION METHODS
// ============================================================================

impl<S, C, P> FixedRedBlackTree<S, C, P>
where
    S: NodeStorage,
    C: Comparator<KeyOf<S>>,
    P: CheckingPolicy,
{
    /// Check if the tree maintains its invariants.
    /// Returns true if all invariants are satisfied.
    pub fn check_invariants(&self) -> bool {
        self.validate().is_ok()
    }

    /// Check invariants with detailed error reporting.
    pub fn check_invariants_detailed(&self) -> Result<(), String> {
        self.validate().map_err(|error| error.to_string())
    }

    /// Validate every structural invariant, reporting the first one broken.
    ///
    /// Checked, in order: the root has no parent and is black; every reachable
    /// node is occupied and its children point back at it; keys are strictly
    /// increasing in order; no red node has a red child; every root-to-leaf
    /// path has the same number of black nodes; exactly `len()` nodes are
    /// reachable; and for a dense backend, the occupied slots are `[0, len)`.
    pub fn validate(&self) -> FixedTreeResult<()> {
        let root = self.root_index();
        if root != NULL_INDEX {
            let node = self.checked_node(root)?;
            if node.parent_index() != NULL_INDEX {
                return Err(FixedTreeError::invariant_violation(
                    "root link",
                    &format!("root {} has parent {}", root, node.parent_index()),
                ));
            }
            if node.is_red() {
                return Err(FixedTreeError::invariant_violation(
                    "root color",
                    &format!("root {} is red", root),
                ));
            }
        }

        let mut reached = 0;
        self.validate_subtree(root, None, None, &mut reached)?;
        if reached != self.len() {
            return Err(FixedTreeError::invariant_violation(
                "node count",
                &format!("{} nodes reachable but size is {}", reached, self.len()),
            ));
        }

        if S::DENSE {
            self.validate_dense()?;
        }
        Ok(())
    }

    /// Returns the black height of the subtree, counting the empty leaves.
    fn validate_subtree(
        &self,
        index: NodeIndex,
        lower: Option<&KeyOf<S>>,
        upper: Option<&KeyOf<S>>,
        reached: &mut usize,
    ) -> FixedTreeResult<usize> {
        if index == NULL_INDEX {
            return Ok(1);
        }

        *reached += 1;
        if *reached > self.len() {
            return Err(FixedTreeError::invariant_violation(
                "node count",
                &format!("more than {} nodes reachable, links form a cycle", self.len()),
            ));
        }

        let node = self.checked_node(index)?;
        let key = node.key();

        if let Some(lower) = lower {
            if self.comparator.compare(lower, key) != Ordering::Less {
                return Err(FixedTreeError::invariant_violation(
                    "key order",
                    &format!("node {} is not greater than its left-side ancestor", index),
                ));
            }
        }
        if let Some(upper) = upper {
            if self.comparator.compare(key, upper) != Ordering::Less {
                return Err(FixedTreeError::invariant_violation(
                    "key order",
                    &format!("node {} is not less than its right-side ancestor", index),
                ));
            }
        }

        for child in [node.left_index(), node.right_index()] {
            if child == NULL_INDEX {
                continue;
            }
            let child_node = self.checked_node(child)?;
            if child_node.parent_index() != index {
                return Err(FixedTreeError::invariant_violation(
                    "parent link",
                    &format!(
                        "node {} is a child of {} but points to parent {}",
                        child,
                        index,
                        child_node.parent_index()
                    ),
                ));
            }
            if node.is_red() && child_node.is_red() {
                return Err(FixedTreeError::invariant_violation(
                    "red rule",
                    &format!("red node {} has red child {}", index, child),
                ));
            }
        }

        let left = self.validate_subtree(node.left_index(), lower, Some(key), reached)?;
        let right = self.validate_subtree(node.right_index(), Some(key), upper, reached)?;
        if left != right {
            return Err(FixedTreeError::invariant_violation(
                "black height",
                &format!("node {} has black heights {} (left) and {} (right)", index, left, right),
            ));
        }

        Ok(left + usize::from(node.is_black()))
    }

    fn validate_dense(&self) -> FixedTreeResult<()> {
        for index in 0..self.len() {
            if self.storage.get(index as NodeIndex).is_none() {
                return Err(FixedTreeError::invariant_violation(
                    "dense storage",
                    &format!("slot {} is empty but size is {}", index, self.len()),
                ));
            }
        }
        if self.storage.get(self.len() as NodeIndex).is_some() {
            return Err(FixedTreeError::invariant_violation(
                "dense storage",
                &format!("slot {} is occupied past the end", self.len()),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// STRUCTURE MEASUREMENTS
// ============================================================================

impl<S: NodeStorage, C, P: CheckingPolicy> FixedRedBlackTree<S, C, P> {
    fn checked_node(&self, index: NodeIndex) -> FixedTreeResult<&S::Node> {
        self.try_node_at(index).map_err(|_| {
            FixedTreeError::invariant_violation(
                "dangling link",
                &format!("index {} is not an occupied slot", index),
            )
        })
    }

    /// Number of edges on the longest root-to-leaf path. Zero for a tree with
    /// at most one node.
    pub fn height(&self) -> usize {
        self.height_at(self.root_index()).saturating_sub(1)
    }

    fn height_at(&self, index: NodeIndex) -> usize {
        match self.storage.get(index) {
            Some(node) => {
                1 + self
                    .height_at(node.left_index())
                    .max(self.height_at(node.right_index()))
            }
            None => 0,
        }
    }

    /// Number of black nodes on the leftmost root-to-leaf path.
    pub fn black_height(&self) -> usize {
        let mut count = 0;
        let mut current = self.root_index();
        while let Some(node) = self.storage.get(current) {
            count += usize::from(node.is_black());
            current = node.left_index();
        }
        count
    }

    /// One line per occupied slot in index order: key, color and links.
    pub fn dump_nodes(&self) -> String
    where
        KeyOf<S>: fmt::Debug,
    {
        let mut out = String::new();
        let mut listed = 0;
        let mut index: NodeIndex = 0;
        while listed < self.len() && (index as usize) < self.capacity() {
            if let Some(node) = self.storage.get(index) {
                let _ = writeln!(
                    out,
                    "[{}] {:?} {} parent={} left={} right={}",
                    index,
                    node.key(),
                    node.color(),
                    fmt_index(node.parent_index()),
                    fmt_index(node.left_index()),
                    fmt_index(node.right_index()),
                );
                listed += 1;
            }
            index += 1;
        }
        out
    }
}

fn fmt_index(index: NodeIndex) -> String {
    if index == NULL_INDEX {
        "-".to_string()
    } else {
        index.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checking::PanicChecking;
    use crate::comparator::NaturalOrder;
    use crate::node::PlainNode;
    use crate::pool_storage::PoolStorage;
    use crate::types::{Color, FixedRedBlackTreeMap};

    type Plain = FixedRedBlackTree<PoolStorage<PlainNode<i32, ()>, 8>, NaturalOrder, PanicChecking>;

    fn three() -> Plain {
        let mut tree = Plain::new();
        for key in [2, 1, 3] {
            tree.insert_key(key);
        }
        tree
    }

    #[test]
    fn test_valid_tree_passes() {
        let tree = three();
        assert!(tree.check_invariants());
        assert_eq!(tree.height(), 1);
        assert_eq!(tree.black_height(), 1);
    }

    #[test]
    fn test_empty_and_single() {
        let mut tree = Plain::new();
        assert!(tree.validate().is_ok());
        assert_eq!(tree.height(), 0);
        tree.insert_key(1);
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.black_height(), 1);
    }

    #[test]
    fn test_red_root_is_reported() {
        let mut tree = three();
        let root = tree.root_index();
        tree.set_color_of(root, Color::Red);
        let message = tree.check_invariants_detailed().unwrap_err();
        assert!(message.contains("root color"), "{}", message);
    }

    #[test]
    fn test_red_red_is_reported() {
        let mut tree = three();
        let root = tree.root_index();
        let left = tree.left_of(root);
        tree.set_color_of(left, Color::Black);
        let right = tree.right_of(root);
        tree.set_color_of(right, Color::Black);
        // 4 hangs red below 3; repaint 3 red as well.
        tree.insert_key(4);
        let four = tree.index_of_node_or_null(&4);
        let three = tree.parent_of(four);
        tree.set_color_of(three, Color::Red);
        let error = tree.validate().unwrap_err();
        assert!(error.to_string().contains("red rule"), "{}", error);
    }

    #[test]
    fn test_black_height_mismatch_is_reported() {
        let mut tree = three();
        let root = tree.root_index();
        let left = tree.left_of(root);
        tree.set_color_of(left, Color::Black);
        let error = tree.validate().unwrap_err();
        assert!(error.to_string().contains("black height"), "{}", error);
    }

    #[test]
    fn test_broken_parent_link_is_reported() {
        let mut tree = three();
        let root = tree.root_index();
        let left = tree.left_of(root);
        tree.set_parent_of(left, NULL_INDEX);
        let error = tree.validate().unwrap_err();
        assert!(error.to_string().contains("parent link"), "{}", error);
    }

    #[test]
    fn test_dump_nodes() {
        let tree: FixedRedBlackTreeMap<i32, (), 4> = [(1, ())].into_iter().collect();
        assert_eq!(tree.dump_nodes(), "[0] 1 B parent=- left=- right=-\n");
    }
}
