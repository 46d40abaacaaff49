//! A node index and a color packed into one word.
//!
//! The color lives in the most significant bit, the index in the rest. The
//! all-ones pattern is the sentinel and reads back as ([`NULL_INDEX`], black).

use std::fmt;

use crate::error::{FixedTreeError, FixedTreeResult};
use crate::types::{Color, NodeIndex, MAX_INDEX, NULL_INDEX};

const COLOR_BIT: NodeIndex = 1 << (NodeIndex::BITS - 1);
const INDEX_MASK: NodeIndex = !COLOR_BIT;

/// Index plus color in a single [`NodeIndex`]-sized word.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColoredIndex(NodeIndex);

impl ColoredIndex {
    /// The sentinel: no index, black.
    pub const fn new() -> Self {
        Self(NULL_INDEX)
    }

    pub fn index(&self) -> NodeIndex {
        match self.0 & INDEX_MASK {
            INDEX_MASK => NULL_INDEX,
            index => index,
        }
    }

    /// Store `index`, keeping the color.
    ///
    /// # Panics
    ///
    /// Panics if `index` is neither [`NULL_INDEX`] nor at most [`MAX_INDEX`].
    #[track_caller]
    pub fn set_index(&mut self, index: NodeIndex) {
        if let Err(e) = self.try_set_index(index) {
            panic!("{}", e);
        }
    }

    /// Store `index`, keeping the color, or report why it does not fit.
    pub fn try_set_index(&mut self, index: NodeIndex) -> FixedTreeResult<()> {
        let bits = if index == NULL_INDEX {
            INDEX_MASK
        } else if index <= MAX_INDEX {
            index
        } else {
            return Err(FixedTreeError::invariant_violation(
                "packed index",
                &format!("{} does not fit below the color bit (max {})", index, MAX_INDEX),
            ));
        };
        self.0 = (self.0 & COLOR_BIT) | bits;
        Ok(())
    }

    pub fn color(&self) -> Color {
        if self.0 & COLOR_BIT == 0 {
            Color::Red
        } else {
            Color::Black
        }
    }

    pub fn set_color(&mut self, color: Color) {
        match color {
            Color::Red => self.0 &= INDEX_MASK,
            Color::Black => self.0 |= COLOR_BIT,
        }
    }
}

impl Default for ColoredIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ColoredIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColoredIndex")
            .field("index", &self.index())
            .field("color", &self.color())
            .finish()
    }
}
