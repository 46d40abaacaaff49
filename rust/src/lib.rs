//! Fixed-capacity red-black tree in Rust with a map/set API.
//!
//! Nodes live in a fixed array sized by a const generic and link to each other
//! by [`NodeIndex`] instead of by pointer, so the tree never touches the heap.
//! The balancing engine is written once against two seams:
//!
//! * [`RedBlackNode`], implemented by [`PlainNode`] (separate color field) and
//!   [`CompactNode`] (color folded into the parent link via [`ColoredIndex`]).
//! * [`NodeStorage`], implemented by [`PoolStorage`] (free list, nodes never
//!   move) and [`ContiguousStorage`] (dense, deleting moves the last node into
//!   the hole).
//!
//! Overflowing the capacity or dereferencing a dead index is a programming
//! error and goes to the tree's [`CheckingPolicy`]. The default,
//! [`AbortChecking`], logs through `tracing` and aborts; the `try_*` methods
//! return a [`FixedTreeError`] instead.
//!
//! ```
//! use fixed_rbtree::{ContiguousRedBlackTreeMap, RedBlackNode};
//!
//! let mut tree: ContiguousRedBlackTreeMap<u32, &str, 8> = ContiguousRedBlackTreeMap::new();
//! tree.insert(20, "twenty");
//! tree.insert(10, "ten");
//! tree.insert(30, "thirty");
//!
//! let index = tree.index_of_node_greater_than(&10);
//! assert_eq!(*tree.node_at(index).value(), "twenty");
//! assert_eq!(tree.remove(&20), Some("twenty"));
//! assert_eq!(tree.keys().copied().collect::<Vec<_>>(), [10, 30]);
//! ```

mod checking;
mod comparator;
mod construction;
mod contiguous_storage;
mod delete_operations;
mod error;
mod get_operations;
mod insert_operations;
mod iteration;
mod node;
mod packed_index;
mod pool_storage;
mod storage;
mod tree_structure;
mod types;
mod validation;

pub use checking::{AbortChecking, CheckingPolicy, PanicChecking};
pub use comparator::{Comparator, NaturalOrder, ReverseOrder};
pub use contiguous_storage::ContiguousStorage;
pub use error::{FixedTreeError, FixedTreeResult, KeyResult, ModifyResult, TreeResultExt};
pub use iteration::{ItemIterator, KeyIterator, RangeIterator, ValueIterator};
pub use node::{CompactNode, PlainNode, RedBlackNode};
pub use packed_index::ColoredIndex;
pub use pool_storage::PoolStorage;
pub use storage::{FreedSlot, NodeStorage, Relocation};
pub use types::{
    Color, ContiguousRedBlackTreeMap, ContiguousRedBlackTreeSet, FixedRedBlackTree,
    FixedRedBlackTreeMap, FixedRedBlackTreeSet, KeyOf, NodeIndex, ValueOf, MAX_CAPACITY,
    MAX_INDEX, NULL_INDEX,
};
