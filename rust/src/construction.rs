//! Construction and initialization logic for FixedRedBlackTree.
//!
//! This module contains the constructors, `Default`, `Clone`, and the
//! collection traits that build a tree from an iterator.

use std::marker::PhantomData;

use crate::checking::CheckingPolicy;
use crate::comparator::Comparator;
use crate::node::RedBlackNode;
use crate::storage::NodeStorage;
use crate::types::{FixedRedBlackTree, KeyOf, ValueOf};

impl<S: NodeStorage, C: Default, P> FixedRedBlackTree<S, C, P> {
    /// Create an empty tree.
    ///
    /// All `CAPACITY` slots are reserved inline; no heap allocation happens now
    /// or later.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_rbtree::FixedRedBlackTreeMap;
    ///
    /// let tree: FixedRedBlackTreeMap<i32, String, 32> = FixedRedBlackTreeMap::new();
    /// assert!(tree.is_empty());
    /// assert_eq!(tree.capacity(), 32);
    /// ```
    pub fn new() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<S: NodeStorage, C, P> FixedRedBlackTree<S, C, P> {
    /// Create an empty tree ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_rbtree::{FixedRedBlackTree, PoolStorage, PlainNode};
    ///
    /// let by_len = |a: &&str, b: &&str| a.len().cmp(&b.len()).then(a.cmp(b));
    /// let mut tree: FixedRedBlackTree<PoolStorage<PlainNode<&str, ()>, 8>, _> =
    ///     FixedRedBlackTree::with_comparator(by_len);
    /// tree.insert("ccc", ());
    /// tree.insert("a", ());
    /// tree.insert("bb", ());
    /// assert_eq!(tree.keys().copied().collect::<Vec<_>>(), ["a", "bb", "ccc"]);
    /// ```
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            storage: S::new(),
            comparator,
            _policy: PhantomData,
        }
    }

    /// Remove every key. The capacity is unchanged.
    pub fn clear(&mut self) {
        self.storage.clear();
    }

    /// The comparator ordering this tree.
    pub fn comparator(&self) -> &C {
        &self.comparator
    }
}

impl<S, C, P> FixedRedBlackTree<S, C, P>
where
    S: NodeStorage,
    S::Node: RedBlackNode<Value = ()>,
    C: Comparator<KeyOf<S>> + Default,
    P: CheckingPolicy,
{
    /// Build a set-like tree from keys. Later duplicates are ignored.
    ///
    /// # Panics
    ///
    /// Invokes the checking policy if there are more distinct keys than slots.
    #[track_caller]
    pub fn from_keys<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = KeyOf<S>>,
    {
        let mut tree = Self::new();
        for key in keys {
            tree.insert_key(key);
        }
        tree
    }
}

impl<S: NodeStorage, C: Default, P> Default for FixedRedBlackTree<S, C, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone, C: Clone, P> Clone for FixedRedBlackTree<S, C, P> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            comparator: self.comparator.clone(),
            _policy: PhantomData,
        }
    }
}

impl<S, C, P> FromIterator<(KeyOf<S>, ValueOf<S>)> for FixedRedBlackTree<S, C, P>
where
    S: NodeStorage,
    C: Comparator<KeyOf<S>> + Default,
    P: CheckingPolicy,
{
    #[track_caller]
    fn from_iter<I: IntoIterator<Item = (KeyOf<S>, ValueOf<S>)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<S, C, P> Extend<(KeyOf<S>, ValueOf<S>)> for FixedRedBlackTree<S, C, P>
where
    S: NodeStorage,
    C: Comparator<KeyOf<S>>,
    P: CheckingPolicy,
{
    #[track_caller]
    fn extend<I: IntoIterator<Item = (KeyOf<S>, ValueOf<S>)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}
