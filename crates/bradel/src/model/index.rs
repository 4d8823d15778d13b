//! Positions within a sectioned list.
//!
//! An [`IndexPath`] addresses one row: the zero-based index of its section,
//! and the zero-based index of the row within that section.

use std::fmt;

/// The (section, row) coordinate of a row in a list view model.
///
/// Index paths order section-major: every row of section 0 sorts before any
/// row of section 1. This is also the order in which lookups scan the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct IndexPath {
    /// Zero-based section index.
    pub section: usize,
    /// Zero-based row index, local to the section.
    pub row: usize,
}

impl IndexPath {
    /// Creates an index path.
    #[inline]
    pub const fn new(section: usize, row: usize) -> Self {
        Self { section, row }
    }

    /// Returns the index path of the next row in the same section.
    #[inline]
    pub const fn next_row(self) -> Self {
        Self::new(self.section, self.row + 1)
    }
}

impl From<(usize, usize)> for IndexPath {
    fn from((section, row): (usize, usize)) -> Self {
        Self::new(section, row)
    }
}

impl fmt::Display for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.section, self.row)
    }
}
