//! Uniform-cell spatial hash grid.
//!
//! The grid keeps two views of the same data:
//! - the bucket store, `CellKey -> entries`, walked by queries
//! - the reverse index, `entry -> (cell keys, bbox, stamp)`, used for O(k)
//!   removal and for the exact overlap recheck
//!
//! Every public operation leaves them consistent: an entry recorded with keys
//! `K` appears exactly once in each bucket of `K`, and no bucket is ever empty.
//! Read operations live in [`crate::query`].

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::config::{GridConfig, Padding, check_cell_size};
use crate::error::{GridError, Result};
use crate::geom::{HasBBox, Rect};
use crate::key::CellKey;
use crate::pool::Pool;
use crate::range::{CellRange, cell_bounds};

/// Initial capacity of a freshly created bucket.
const BUCKET_CAPACITY: usize = 4;

/// Upper bound on recycled key lists kept around after removals.
const MAX_POOLED_KEY_LISTS: usize = 256;

/// Reverse-index record for one entry.
pub(crate) struct Slot {
    /// Cells the entry was bucketed into, in row-major order.
    pub(crate) keys: Vec<CellKey>,
    /// Box captured at insertion, used for the exact query recheck.
    pub(crate) bbox: Rect,
    /// Generation of the last `query_view` that emitted this entry.
    pub(crate) stamp: u64,
}

/// A spatial hash index over axis-aligned bounding boxes.
///
/// Entries are bucketed into square cells of side `cell_size`; queries touch
/// only the cells covering the query rectangle. Entry identity is `Eq + Hash`,
/// so small handles (ids, indices, keys into an arena) are the intended entry
/// type. The grid never looks at an entry's geometry after insertion: if an
/// entry moves, remove and re-insert it.
///
/// # Example
/// ```
/// use cellgrid_core::Grid;
///
/// let mut grid = Grid::new(64.0);
/// grid.insert_rect("a", (0.0, 0.0, 32.0, 32.0));
/// grid.insert_rect("b", (0.0, 0.0, 200.0, 200.0));
///
/// assert_eq!(grid.query((10.0, 10.0, 20.0, 20.0)), vec!["a", "b"]);
/// assert!(grid.query((1000.0, 1000.0, 1100.0, 1100.0)).is_empty());
/// ```
pub struct Grid<T> {
    cell_size: f64,
    padding: Padding,
    max_entry_cells: u64,
    pub(crate) cells: FxHashMap<CellKey, Vec<T>>,
    pub(crate) entries: FxHashMap<T, Slot>,
    pub(crate) generation: u64,
    pub(crate) query_buf: Vec<T>,
    pub(crate) key_buf: Vec<CellKey>,
    key_pool: Pool<Vec<CellKey>>,
}

impl<T> Grid<T> {
    /// Creates an empty grid with square cells of side `cell_size`.
    ///
    /// # Panics
    /// Panics if `cell_size` is zero, negative, NaN or infinite.
    pub fn new(cell_size: f64) -> Self {
        Self::with_config(GridConfig::new(cell_size))
    }

    /// Creates an empty grid, rejecting an invalid cell size with an error.
    ///
    /// # Errors
    /// Returns [`GridError::InvalidCellSize`](crate::GridError::InvalidCellSize)
    /// if `cell_size` is not strictly positive and finite.
    pub fn try_new(cell_size: f64) -> Result<Self> {
        Self::try_with_config(GridConfig {
            cell_size,
            ..GridConfig::default()
        })
    }

    /// Creates an empty grid from a full configuration.
    ///
    /// # Panics
    /// Panics if `config.cell_size` is not strictly positive and finite.
    pub fn with_config(config: GridConfig) -> Self {
        match Self::try_with_config(config) {
            Ok(grid) => grid,
            Err(err) => panic!("{err}"),
        }
    }

    /// Fallible counterpart of [`Grid::with_config`].
    ///
    /// # Errors
    /// Returns [`GridError::InvalidCellSize`](crate::GridError::InvalidCellSize)
    /// if the configured cell size is invalid.
    pub fn try_with_config(config: GridConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            cell_size: config.cell_size,
            padding: config.padding,
            max_entry_cells: config.max_entry_cells,
            cells: FxHashMap::with_capacity_and_hasher(config.capacity, Default::default()),
            entries: FxHashMap::default(),
            generation: 0,
            query_buf: Vec::new(),
            key_buf: Vec::new(),
            key_pool: Pool::new(|| Vec::with_capacity(BUCKET_CAPACITY)),
        })
    }

    /// Side length of a cell.
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Padding applied by inserts that do not pass one explicitly.
    pub fn padding(&self) -> Padding {
        self.padding
    }

    /// Changes the default padding. Entries already in the grid keep the cells
    /// they were inserted with.
    pub fn set_padding(&mut self, padding: Padding) {
        self.padding = padding;
    }

    /// Largest number of cells a single insert may cover.
    pub fn max_entry_cells(&self) -> u64 {
        self.max_entry_cells
    }

    /// Number of entries in the grid.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the grid holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of occupied cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Range of cells a query over `rect` scans.
    pub fn cell_range(&self, rect: Rect) -> CellRange {
        CellRange::for_query(rect, self.cell_size)
    }

    /// Removes every entry. The cell size and padding are kept.
    pub fn clear(&mut self) {
        debug!(
            entries = self.entries.len(),
            cells = self.cells.len(),
            "clearing grid"
        );
        self.cells.clear();
        self.entries.clear();
        self.query_buf.clear();
        self.key_buf.clear();
        self.generation = 0;
    }

    /// Switches to a new cell size. **This discards every entry.**
    ///
    /// Buckets computed for the old size are meaningless under the new one, so
    /// the grid is cleared and the caller must re-insert whatever it still
    /// needs. Resizing to the current size is a no-op that keeps all entries.
    ///
    /// # Panics
    /// Panics if `cell_size` is zero, negative, NaN or infinite.
    pub fn resize(&mut self, cell_size: f64) {
        if let Err(err) = self.try_resize(cell_size) {
            panic!("{err}");
        }
    }

    /// Fallible counterpart of [`Grid::resize`]. On error the grid is left
    /// untouched.
    ///
    /// # Errors
    /// Returns [`GridError::InvalidCellSize`](crate::GridError::InvalidCellSize)
    /// if `cell_size` is not strictly positive and finite.
    pub fn try_resize(&mut self, cell_size: f64) -> Result<()> {
        let cell_size = check_cell_size(cell_size)?;
        if cell_size == self.cell_size {
            return Ok(());
        }
        debug!(
            old = self.cell_size,
            new = cell_size,
            discarded = self.entries.len(),
            "resizing grid"
        );
        self.clear();
        self.cell_size = cell_size;
        Ok(())
    }
}

impl<T: Eq + Hash + Clone> Grid<T> {
    /// Returns true if the entry is in the grid.
    pub fn contains<Q>(&self, entry: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(entry)
    }

    /// Cell keys the entry occupies, or `None` if it is not in the grid.
    ///
    /// An entry whose every cell was rejected by an acceptance predicate is
    /// present with an empty list.
    pub fn cells_of<Q>(&self, entry: &Q) -> Option<&[CellKey]>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(entry).map(|slot| slot.keys.as_slice())
    }

    /// Bounding box captured when the entry was inserted.
    pub fn bbox_of<Q>(&self, entry: &Q) -> Option<Rect>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(entry).map(|slot| slot.bbox)
    }

    /// Returns an iterator over all entries, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.keys()
    }

    /// Inserts `entry` with an explicit bounding box and the grid's padding.
    ///
    /// Returns false, leaving the grid unchanged, if the entry is already
    /// present. Insertion never updates an existing entry's box.
    ///
    /// Insertion costs one step per covered cell, so the box is bounded by
    /// [`GridConfig::max_entry_cells`].
    ///
    /// # Panics
    /// Panics if `bbox` is inverted or NaN, reaches cell coordinates beyond
    /// the `i32` range, or covers more cells than the configured limit. Use
    /// [`Grid::try_insert_rect`] to handle these as errors.
    pub fn insert_rect(&mut self, entry: T, bbox: Rect) -> bool {
        let padding = self.padding;
        self.insert_rect_with(entry, bbox, padding, |_| true)
    }

    /// Fallible counterpart of [`Grid::insert_rect`].
    ///
    /// # Errors
    /// [`GridError::InvalidBounds`], [`GridError::CoordinateOutOfRange`] or
    /// [`GridError::TooManyCells`]; the grid is unchanged on error.
    pub fn try_insert_rect(&mut self, entry: T, bbox: Rect) -> Result<bool> {
        let padding = self.padding;
        self.try_insert_rect_with(entry, bbox, padding, |_| true)
    }

    /// Inserts `entry` with an explicit box, padding and per-cell predicate.
    ///
    /// `accept` is called with the world-space bounds of every candidate cell
    /// (padding included) and decides whether the entry claims it. An entry
    /// whose cells are all rejected is still recorded, occupies no bucket and
    /// is never returned by queries. The limit on covered cells applies to
    /// the candidates, before `accept` narrows them.
    ///
    /// # Panics
    /// Same conditions as [`Grid::insert_rect`].
    pub fn insert_rect_with<F>(&mut self, entry: T, bbox: Rect, padding: Padding, accept: F) -> bool
    where
        F: FnMut(Rect) -> bool,
    {
        match self.try_insert_rect_with(entry, bbox, padding, accept) {
            Ok(inserted) => inserted,
            Err(err) => panic!("{err}"),
        }
    }

    /// Fallible counterpart of [`Grid::insert_rect_with`].
    ///
    /// # Errors
    /// Same as [`Grid::try_insert_rect`].
    pub fn try_insert_rect_with<F>(
        &mut self,
        entry: T,
        bbox: Rect,
        padding: Padding,
        mut accept: F,
    ) -> Result<bool>
    where
        F: FnMut(Rect) -> bool,
    {
        if self.entries.contains_key(&entry) {
            trace!("insert skipped, entry already present");
            return Ok(false);
        }

        let range = CellRange::for_entry(bbox, self.cell_size, padding)
            .and_then(|range| self.check_cell_count(range))
            .inspect_err(|err| trace!(%err, "insert rejected"))?;

        let mut keys = self.key_pool.get();
        keys.clear();
        for coord in range.coords() {
            if accept(cell_bounds(coord, self.cell_size)) {
                keys.push(CellKey::from(coord));
            }
        }

        for &key in &keys {
            self.cells
                .entry(key)
                .or_insert_with(|| Vec::with_capacity(BUCKET_CAPACITY))
                .push(entry.clone());
        }
        self.entries.insert(
            entry,
            Slot {
                keys,
                bbox,
                stamp: 0,
            },
        );
        Ok(true)
    }

    fn check_cell_count(&self, range: CellRange) -> Result<CellRange> {
        let cells = range.area();
        if cells > u128::from(self.max_entry_cells) {
            return Err(GridError::TooManyCells {
                cells,
                limit: self.max_entry_cells,
            });
        }
        Ok(range)
    }

    /// Removes the entry from every cell it occupies.
    ///
    /// Costs O(k) in the number of occupied cells; the entry's current geometry
    /// is never consulted. Returns false if the entry was not present.
    pub fn remove<Q>(&mut self, entry: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(slot) = self.entries.remove(entry) else {
            return false;
        };

        for key in &slot.keys {
            if let Some(bucket) = self.cells.get_mut(key) {
                if let Some(pos) = bucket.iter().position(|e| <T as Borrow<Q>>::borrow(e) == entry) {
                    bucket.remove(pos);
                }
                if bucket.is_empty() {
                    self.cells.remove(key);
                }
            }
        }

        if self.key_pool.len() < MAX_POOLED_KEY_LISTS {
            let mut keys = slot.keys;
            keys.clear();
            self.key_pool.put(keys);
        }
        true
    }
}

impl<T: HasBBox + Eq + Hash + Clone> Grid<T> {
    /// Inserts `entry` using its own bounding box and the grid's padding.
    ///
    /// # Panics
    /// Same conditions as [`Grid::insert_rect`].
    pub fn insert(&mut self, entry: T) -> bool {
        let bbox = entry.bbox();
        self.insert_rect(entry, bbox)
    }

    /// Fallible counterpart of [`Grid::insert`].
    ///
    /// # Errors
    /// Same as [`Grid::try_insert_rect`].
    pub fn try_insert(&mut self, entry: T) -> Result<bool> {
        let bbox = entry.bbox();
        self.try_insert_rect(entry, bbox)
    }

    /// Inserts `entry` using its own bounding box, with explicit padding and
    /// cell predicate. See [`Grid::insert_rect_with`].
    ///
    /// # Panics
    /// Same conditions as [`Grid::insert_rect`].
    pub fn insert_with<F>(&mut self, entry: T, padding: Padding, accept: F) -> bool
    where
        F: FnMut(Rect) -> bool,
    {
        let bbox = entry.bbox();
        self.insert_rect_with(entry, bbox, padding, accept)
    }

    /// Fallible counterpart of [`Grid::insert_with`].
    ///
    /// # Errors
    /// Same as [`Grid::try_insert_rect`].
    pub fn try_insert_with<F>(&mut self, entry: T, padding: Padding, accept: F) -> Result<bool>
    where
        F: FnMut(Rect) -> bool,
    {
        let bbox = entry.bbox();
        self.try_insert_rect_with(entry, bbox, padding, accept)
    }

    /// Inserts every entry, returning how many were not already present.
    ///
    /// # Panics
    /// Same conditions as [`Grid::insert_rect`].
    pub fn extend(&mut self, entries: impl IntoIterator<Item = T>) -> usize {
        entries
            .into_iter()
            .map(|entry| self.insert(entry))
            .filter(|&inserted| inserted)
            .count()
    }
}

impl<T: fmt::Debug> fmt::Debug for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("cell_size", &self.cell_size)
            .field("padding", &self.padding)
            .field("entries", &self.entries.len())
            .field("cells", &self.cells.len())
            .finish()
    }
}
