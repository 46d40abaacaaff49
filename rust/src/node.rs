//! Node layouts for FixedRedBlackTree.
//!
//! The engine only talks to nodes through [`RedBlackNode`]. Two layouts implement
//! it: [`PlainNode`] keeps the color in its own field, [`CompactNode`] folds it
//! into the parent link through [`ColoredIndex`].

use crate::packed_index::ColoredIndex;
use crate::types::{Color, NodeIndex, NULL_INDEX};

/// Capability surface every node layout provides.
///
/// Set-like trees use `()` as the value type.
pub trait RedBlackNode {
    type Key;
    type Value;

    /// A detached red node: all three links are [`NULL_INDEX`].
    fn new(key: Self::Key, value: Self::Value) -> Self;

    fn key(&self) -> &Self::Key;
    fn value(&self) -> &Self::Value;
    fn value_mut(&mut self) -> &mut Self::Value;
    /// The key alongside mutable access to the value.
    fn entry_mut(&mut self) -> (&Self::Key, &mut Self::Value);
    fn into_entry(self) -> (Self::Key, Self::Value);

    fn color(&self) -> Color;
    fn set_color(&mut self, color: Color);

    fn parent_index(&self) -> NodeIndex;
    fn set_parent_index(&mut self, index: NodeIndex);
    fn left_index(&self) -> NodeIndex;
    fn set_left_index(&mut self, index: NodeIndex);
    fn right_index(&self) -> NodeIndex;
    fn set_right_index(&mut self, index: NodeIndex);

    fn is_red(&self) -> bool {
        self.color().is_red()
    }

    fn is_black(&self) -> bool {
        self.color().is_black()
    }

    /// Point every link that equals `from` at `to` instead.
    fn retarget_links(&mut self, from: NodeIndex, to: NodeIndex) {
        if self.parent_index() == from {
            self.set_parent_index(to);
        }
        if self.left_index() == from {
            self.set_left_index(to);
        }
        if self.right_index() == from {
            self.set_right_index(to);
        }
    }
}

// ============================================================================
// PLAIN LAYOUT
// ============================================================================

/// Node with a dedicated color field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainNode<K, V> {
    key: K,
    value: V,
    parent: NodeIndex,
    left: NodeIndex,
    right: NodeIndex,
    color: Color,
}

impl<K, V> RedBlackNode for PlainNode<K, V> {
    type Key = K;
    type Value = V;

    fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            parent: NULL_INDEX,
            left: NULL_INDEX,
            right: NULL_INDEX,
            color: Color::Red,
        }
    }

    fn key(&self) -> &K {
        &self.key
    }

    fn value(&self) -> &V {
        &self.value
    }

    fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    fn entry_mut(&mut self) -> (&K, &mut V) {
        (&self.key, &mut self.value)
    }

    fn into_entry(self) -> (K, V) {
        (self.key, self.value)
    }

    fn color(&self) -> Color {
        self.color
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn parent_index(&self) -> NodeIndex {
        self.parent
    }

    fn set_parent_index(&mut self, index: NodeIndex) {
        self.parent = index;
    }

    fn left_index(&self) -> NodeIndex {
        self.left
    }

    fn set_left_index(&mut self, index: NodeIndex) {
        self.left = index;
    }

    fn right_index(&self) -> NodeIndex {
        self.right
    }

    fn set_right_index(&mut self, index: NodeIndex) {
        self.right = index;
    }
}

// ============================================================================
// COMPACT LAYOUT
// ============================================================================

/// Node whose color shares a word with the parent link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompactNode<K, V> {
    key: K,
    value: V,
    parent_and_color: ColoredIndex,
    left: NodeIndex,
    right: NodeIndex,
}

impl<K, V> RedBlackNode for CompactNode<K, V> {
    type Key = K;
    type Value = V;

    fn new(key: K, value: V) -> Self {
        let mut parent_and_color = ColoredIndex::new();
        parent_and_color.set_color(Color::Red);
        Self {
            key,
            value,
            parent_and_color,
            left: NULL_INDEX,
            right: NULL_INDEX,
        }
    }

    fn key(&self) -> &K {
        &self.key
    }

    fn value(&self) -> &V {
        &self.value
    }

    fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    fn entry_mut(&mut self) -> (&K, &mut V) {
        (&self.key, &mut self.value)
    }

    fn into_entry(self) -> (K, V) {
        (self.key, self.value)
    }

    fn color(&self) -> Color {
        self.parent_and_color.color()
    }

    fn set_color(&mut self, color: Color) {
        self.parent_and_color.set_color(color);
    }

    fn parent_index(&self) -> NodeIndex {
        self.parent_and_color.index()
    }

    // Arena capacities are capped at construction, so every slot index fits.
    fn set_parent_index(&mut self, index: NodeIndex) {
        self.parent_and_color.set_index(index);
    }

    fn left_index(&self) -> NodeIndex {
        self.left
    }

    fn set_left_index(&mut self, index: NodeIndex) {
        self.left = index;
    }

    fn right_index(&self) -> NodeIndex {
        self.right
    }

    fn set_right_index(&mut self, index: NodeIndex) {
        self.right = index;
    }
}
