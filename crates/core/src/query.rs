//! Read-side operations on [`Grid`].
//!
//! Every query visits the occupied cells of the query range in row-major
//! order (`cy` outer, `cx` inner) and each bucket in insertion order, reports
//! an entry at most once, and keeps only entries whose stored box overlaps the
//! query rectangle as closed sets, so touching edges and points on the
//! boundary are reported.
//!
//! Two flavours exist for each query:
//! - `query` / `keys` borrow the grid immutably, deduplicate with a transient
//!   set and return an owned `Vec`.
//! - `query_view` / `keys_view` borrow the grid mutably, deduplicate with the
//!   per-entry generation stamp and return a slice of a buffer the grid reuses.
//!   The slice is valid until the next call on the same grid, which the borrow
//!   checker enforces. Copy it (`to_vec`) to keep a snapshot.
//!
//! Both flavours return the same elements in the same order.

use std::hash::Hash;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::geom::{Rect, overlaps};
use crate::grid::Grid;
use crate::key::CellKey;
use crate::range::{CellRange, row_major};

impl<T: Eq + Hash + Clone> Grid<T> {
    /// Finds entries whose bounding box overlaps `rect`.
    pub fn query(&self, rect: Rect) -> Vec<T> {
        let mut keys = Vec::new();
        collect_keys(&self.cells, self.cell_range(rect), &mut keys);

        let mut done = FxHashSet::with_capacity_and_hasher(64, Default::default());
        let mut result = Vec::with_capacity(16);
        for key in &keys {
            for entry in &self.cells[key] {
                if !done.insert(entry) {
                    continue;
                }
                if overlaps(self.entries[entry].bbox, rect) {
                    result.push(entry.clone());
                }
            }
        }
        result
    }

    /// Finds entries whose bounding box overlaps `rect`, reusing internal buffers.
    ///
    /// Allocation-free once the buffers have grown to the working size. The
    /// returned slice is overwritten by the next `query_view` or `keys_view`.
    pub fn query_view(&mut self, rect: Rect) -> &[T] {
        let range = self.cell_range(rect);
        let generation = self.next_generation();

        let Self {
            cells,
            entries,
            query_buf,
            key_buf,
            ..
        } = &mut *self;
        query_buf.clear();
        key_buf.clear();
        collect_keys(cells, range, key_buf);

        for key in key_buf.iter() {
            for entry in &cells[key] {
                let Some(slot) = entries.get_mut(entry) else {
                    continue;
                };
                if slot.stamp == generation {
                    continue;
                }
                slot.stamp = generation;
                if overlaps(slot.bbox, rect) {
                    query_buf.push(entry.clone());
                }
            }
        }
        &self.query_buf
    }

    /// Finds entries whose box contains the point `(x, y)`, boundary included.
    pub fn query_point(&self, x: f64, y: f64) -> Vec<T> {
        self.query((x, y, x, y))
    }

    /// Returns true if any entry overlaps `rect`.
    pub fn any(&self, rect: Rect) -> bool {
        let range = self.cell_range(rect);
        let mut keys = Vec::new();
        collect_keys(&self.cells, range, &mut keys);
        keys.iter()
            .flat_map(|key| &self.cells[key])
            .any(|entry| overlaps(self.entries[entry].bbox, rect))
    }

    /// Bumps the query generation, resetting every stamp if the counter wraps.
    fn next_generation(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            for slot in self.entries.values_mut() {
                slot.stamp = 0;
            }
            self.generation = 1;
        }
        self.generation
    }
}

impl<T> Grid<T> {
    /// Occupied cells inside the query range of `rect`, in row-major order.
    ///
    /// Meant for diagnostics such as drawing a grid overlay.
    pub fn keys(&self, rect: Rect) -> Vec<CellKey> {
        let mut keys = Vec::new();
        collect_keys(&self.cells, self.cell_range(rect), &mut keys);
        keys
    }

    /// Same as [`Grid::keys`], written into a buffer the grid reuses.
    ///
    /// The returned slice is overwritten by the next `keys_view` or `query_view`.
    pub fn keys_view(&mut self, rect: Rect) -> &[CellKey] {
        let range = self.cell_range(rect);
        self.key_buf.clear();
        collect_keys(&self.cells, range, &mut self.key_buf);
        &self.key_buf
    }
}

/// Appends the occupied keys of `range` to `out` in row-major order.
///
/// Walks the range cell by cell when it is no larger than the number of
/// occupied cells, otherwise filters the occupied cells and sorts them, so a
/// huge query over a sparse grid costs O(occupied) instead of O(range).
fn collect_keys<T>(cells: &FxHashMap<CellKey, Vec<T>>, range: CellRange, out: &mut Vec<CellKey>) {
    if range.is_empty() || cells.is_empty() {
        return;
    }
    if range.area() <= cells.len() as u128 {
        out.extend(range.keys().filter(|key| cells.contains_key(key)));
    } else {
        let start = out.len();
        out.extend(
            cells
                .keys()
                .copied()
                .filter(|key| range.contains(key.decode())),
        );
        out[start..].sort_unstable_by_key(|&key| row_major(key));
    }
}
