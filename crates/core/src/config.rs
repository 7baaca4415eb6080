//! Grid construction parameters.
//!
//! Contains `GridConfig` and the `Padding` flags that control how many extra
//! cells an entry claims around its bounding box.

use bitflags::bitflags;

use crate::error::{GridError, Result};

bitflags! {
    /// Sides on which an inserted entry claims one extra ring of cells.
    ///
    /// Padding is an insertion-time margin: it widens the cell range an entry
    /// is bucketed into, never the range a query scans. `TOP` is the min-y side
    /// and `BOTTOM` the max-y side (y grows downward).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Padding: u8 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const TOP = 1 << 2;
        const BOTTOM = 1 << 3;
        const HORIZONTAL = Self::LEFT.bits() | Self::RIGHT.bits();
        const VERTICAL = Self::TOP.bits() | Self::BOTTOM.bits();
        const ALL = Self::HORIZONTAL.bits() | Self::VERTICAL.bits();
    }
}

impl Padding {
    pub const NONE: Self = Self::empty();

    /// Cells added on the (min x, min y, max x, max y) sides.
    #[inline]
    pub(crate) fn margins(self) -> (i64, i64, i64, i64) {
        (
            i64::from(self.contains(Self::LEFT)),
            i64::from(self.contains(Self::TOP)),
            i64::from(self.contains(Self::RIGHT)),
            i64::from(self.contains(Self::BOTTOM)),
        )
    }
}

/// Default side length of a cell.
pub const DEFAULT_CELL_SIZE: f64 = 64.0;

/// Default upper bound on the cells a single entry may cover.
pub const DEFAULT_MAX_ENTRY_CELLS: u64 = 1 << 24;

/// Parameters for building a [`Grid`](crate::Grid).
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    /// Side length of every cell, in world units. Must be positive and finite.
    pub cell_size: f64,

    /// Padding applied by `insert` and `insert_rect` when the caller does not
    /// pass one explicitly.
    pub padding: Padding,

    /// Number of occupied cells to preallocate room for.
    pub capacity: usize,

    /// Largest number of candidate cells (padding included) an insert may
    /// enumerate. Inserting a box that covers more fails instead of
    /// allocating one key per cell.
    pub max_entry_cells: u64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            padding: Padding::NONE,
            capacity: 0,
            max_entry_cells: DEFAULT_MAX_ENTRY_CELLS,
        }
    }
}

impl GridConfig {
    /// Creates a configuration with the given cell size and no padding.
    ///
    /// # Panics
    /// Panics if `cell_size` is not strictly positive and finite.
    pub fn new(cell_size: f64) -> Self {
        assert!(
            valid_cell_size(cell_size),
            "cell size must be positive and finite, got {cell_size}"
        );
        Self {
            cell_size,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_max_entry_cells(mut self, max_entry_cells: u64) -> Self {
        self.max_entry_cells = max_entry_cells;
        self
    }

    /// Checks the invariants a grid relies on.
    ///
    /// # Errors
    /// Returns [`GridError::InvalidCellSize`] for a zero, negative, NaN or
    /// infinite cell size.
    pub fn validate(&self) -> Result<()> {
        check_cell_size(self.cell_size).map(|_| ())
    }
}

#[inline]
pub(crate) fn valid_cell_size(cell_size: f64) -> bool {
    cell_size > 0.0 && cell_size.is_finite()
}

pub(crate) fn check_cell_size(cell_size: f64) -> Result<f64> {
    if valid_cell_size(cell_size) {
        Ok(cell_size)
    } else {
        Err(GridError::InvalidCellSize(cell_size))
    }
}
