//! Core types and data structures for FixedRedBlackTree.
//!
//! This module contains the index and color primitives, the tree struct itself,
//! and the type aliases for the common backend/layout combinations.

use std::fmt;
use std::marker::PhantomData;

use crate::checking::AbortChecking;
use crate::comparator::NaturalOrder;
use crate::contiguous_storage::ContiguousStorage;
use crate::node::{CompactNode, RedBlackNode};
use crate::pool_storage::PoolStorage;
use crate::storage::NodeStorage;

// ============================================================================
// TYPE DEFINITIONS
// ============================================================================

/// Index of a slot in a node arena.
pub type NodeIndex = u32;

/// Sentinel index: no parent, no child, no root.
pub const NULL_INDEX: NodeIndex = NodeIndex::MAX;

/// Largest index a [`ColoredIndex`](crate::ColoredIndex) can hold; the top bit
/// is reserved for the color.
pub const MAX_INDEX: NodeIndex = NULL_INDEX / 2;

/// Largest arena capacity addressable by [`NodeIndex`].
pub const MAX_CAPACITY: usize = MAX_INDEX as usize;

/// Key type stored by a backend.
pub type KeyOf<S> = <<S as NodeStorage>::Node as RedBlackNode>::Key;

/// Value type stored by a backend.
pub type ValueOf<S> = <<S as NodeStorage>::Node as RedBlackNode>::Value;

/// Node color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    pub fn is_red(self) -> bool {
        self == Color::Red
    }

    pub fn is_black(self) -> bool {
        self == Color::Black
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => write!(f, "R"),
            Color::Black => write!(f, "B"),
        }
    }
}

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// Fixed-capacity red-black tree.
///
/// All nodes live in the arena `S`, which also decides the key and value types,
/// the node layout and the capacity. Links between nodes are [`NodeIndex`]
/// values into that arena. Nothing is allocated on the heap.
///
/// # Type Parameters
///
/// * `S` - Node arena ([`PoolStorage`] or [`ContiguousStorage`])
/// * `C` - Key comparator, [`NaturalOrder`] by default
/// * `P` - Checking policy invoked on programming errors, [`AbortChecking`] by default
///
/// # Examples
///
/// ```
/// use fixed_rbtree::FixedRedBlackTreeMap;
///
/// let mut tree: FixedRedBlackTreeMap<i32, &str, 16> = FixedRedBlackTreeMap::new();
/// tree.insert(2, "two");
/// tree.insert(1, "one");
/// tree.insert(3, "three");
///
/// assert_eq!(tree.get(&2), Some(&"two"));
/// assert_eq!(tree.len(), 3);
///
/// let keys: Vec<_> = tree.keys().copied().collect();
/// assert_eq!(keys, [1, 2, 3]);
/// ```
///
/// # Index invalidation
///
/// Indices handed out by the tree stay valid only until the next mutating call.
/// With [`ContiguousStorage`] a deletion moves the last occupied slot into the
/// freed one, so even unrelated indices can change.
pub struct FixedRedBlackTree<S, C = NaturalOrder, P = AbortChecking> {
    /// Arena holding every node and the root index.
    pub(crate) storage: S,
    /// Strict weak order over keys.
    pub(crate) comparator: C,
    pub(crate) _policy: PhantomData<fn() -> P>,
}

/// Map over a free-list arena with compact nodes.
pub type FixedRedBlackTreeMap<K, V, const CAPACITY: usize> =
    FixedRedBlackTree<PoolStorage<CompactNode<K, V>, CAPACITY>>;

/// Set over a free-list arena with compact nodes.
pub type FixedRedBlackTreeSet<K, const CAPACITY: usize> =
    FixedRedBlackTree<PoolStorage<CompactNode<K, ()>, CAPACITY>>;

/// Map over a dense arena with compact nodes.
pub type ContiguousRedBlackTreeMap<K, V, const CAPACITY: usize> =
    FixedRedBlackTree<ContiguousStorage<CompactNode<K, V>, CAPACITY>>;

/// Set over a dense arena with compact nodes.
pub type ContiguousRedBlackTreeSet<K, const CAPACITY: usize> =
    FixedRedBlackTree<ContiguousStorage<CompactNode<K, ()>, CAPACITY>>;

/// Which way a node hangs off its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

/// Where a key lives, or where it would be attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SearchResult {
    Found(NodeIndex),
    /// Not present; a new node would become the `side` child of `parent`
    /// (or the root when `parent` is [`NULL_INDEX`]).
    Vacant { parent: NodeIndex, side: Side },
}
