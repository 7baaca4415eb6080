//! Cell-range computation.
//!
//! An entry occupies the half-open block of cells
//! `[start_x, end_x) x [start_y, end_y)` with `start = floor(min / size)` and
//! `end = ceil(max / size)`, so a box whose max edge lies exactly on a cell
//! boundary does not claim the next cell. Each axis always covers at least
//! one cell so that zero-width boxes stay addressable.
//!
//! A query scans every cell whose closed extent `[c * size, (c + 1) * size]`
//! meets the closed query rectangle: `start = ceil(min / size) - 1` and
//! `end = floor(max / size) + 1`. This is at most one ring wider than the
//! entry formula and guarantees that an entry touching the query on a cell
//! line sits in a scanned cell.
//!
//! Bounds are kept as `i64` so that an exclusive end of `i32::MAX + 1` is
//! representable. The fields are private and every constructor keeps them
//! inside the `i32` cell space, so [`CellRange::coords`] never truncates.

use itertools::iproduct;

use crate::config::Padding;
use crate::error::{GridError, Result};
use crate::geom::{Rect, check_rect, is_valid_rect};
use crate::key::{CellCoord, CellKey};

const MIN_COORD: i64 = i32::MIN as i64;
const MAX_COORD: i64 = i32::MAX as i64;

/// Half-open rectangular block of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    start_x: i64,
    start_y: i64,
    end_x: i64,
    end_y: i64,
}

impl CellRange {
    /// A range containing no cells.
    pub const EMPTY: Self = Self {
        start_x: 0,
        start_y: 0,
        end_x: 0,
        end_y: 0,
    };

    /// Range an entry with `bbox` occupies, widened by `padding`.
    ///
    /// # Errors
    /// [`GridError::InvalidBounds`] if the box has NaN coordinates or is
    /// inverted, [`GridError::CoordinateOutOfRange`] if any covered cell
    /// coordinate (padding included) does not fit in `i32`.
    pub fn for_entry(bbox: Rect, cell_size: f64, padding: Padding) -> Result<Self> {
        let (x0, y0, x1, y1) = check_rect(bbox)?;
        let (start_x, end_x) = axis_exact(x0, x1, cell_size)?;
        let (start_y, end_y) = axis_exact(y0, y1, cell_size)?;

        let (left, top, right, bottom) = padding.margins();
        let range = Self {
            start_x: start_x - left,
            start_y: start_y - top,
            end_x: end_x + right,
            end_y: end_y + bottom,
        };

        if range.start_x < MIN_COORD {
            return Err(GridError::CoordinateOutOfRange { value: x0 });
        }
        if range.start_y < MIN_COORD {
            return Err(GridError::CoordinateOutOfRange { value: y0 });
        }
        if range.end_x > MAX_COORD + 1 {
            return Err(GridError::CoordinateOutOfRange { value: x1 });
        }
        if range.end_y > MAX_COORD + 1 {
            return Err(GridError::CoordinateOutOfRange { value: y1 });
        }
        Ok(range)
    }

    /// Range a query over `rect` scans: every cell whose closed extent meets
    /// the closed rectangle.
    ///
    /// Never fails: an invalid rectangle yields [`CellRange::EMPTY`] and
    /// coordinates beyond the representable cells are clamped, since nothing
    /// can be stored there.
    pub fn for_query(rect: Rect, cell_size: f64) -> Self {
        if !is_valid_rect(rect) {
            return Self::EMPTY;
        }
        let (x0, y0, x1, y1) = rect;
        let (start_x, end_x) = axis_clamped(x0, x1, cell_size);
        let (start_y, end_y) = axis_clamped(y0, y1, cell_size);
        Self {
            start_x,
            start_y,
            end_x,
            end_y,
        }
    }

    /// First column (inclusive).
    #[inline]
    pub fn start_x(&self) -> i64 {
        self.start_x
    }

    /// First row (inclusive).
    #[inline]
    pub fn start_y(&self) -> i64 {
        self.start_y
    }

    /// Column past the last one (exclusive).
    #[inline]
    pub fn end_x(&self) -> i64 {
        self.end_x
    }

    /// Row past the last one (exclusive).
    #[inline]
    pub fn end_y(&self) -> i64 {
        self.end_y
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end_x <= self.start_x || self.end_y <= self.start_y
    }

    #[inline]
    pub fn width(&self) -> u64 {
        (self.end_x - self.start_x).max(0) as u64
    }

    #[inline]
    pub fn height(&self) -> u64 {
        (self.end_y - self.start_y).max(0) as u64
    }

    /// Number of cells in the range.
    #[inline]
    pub fn area(&self) -> u128 {
        u128::from(self.width()) * u128::from(self.height())
    }

    #[inline]
    pub fn contains(&self, (cx, cy): CellCoord) -> bool {
        let (cx, cy) = (i64::from(cx), i64::from(cy));
        self.start_x <= cx && cx < self.end_x && self.start_y <= cy && cy < self.end_y
    }

    /// Cell coordinates in row-major order (`cy` outer, `cx` inner).
    pub fn coords(&self) -> impl Iterator<Item = CellCoord> + use<> {
        let (xs, ys) = if self.is_empty() {
            (0..0, 0..0)
        } else {
            (self.start_x..self.end_x, self.start_y..self.end_y)
        };
        // Bounds lie in [i32::MIN, i32::MAX + 1), the casts are lossless.
        iproduct!(ys, xs).map(|(cy, cx)| (cx as i32, cy as i32))
    }

    /// Cell keys in row-major order.
    pub fn keys(&self) -> impl Iterator<Item = CellKey> + use<> {
        self.coords().map(CellKey::from)
    }
}

/// World-space bounds of one cell.
#[inline]
pub fn cell_bounds((cx, cy): CellCoord, cell_size: f64) -> Rect {
    let x0 = f64::from(cx) * cell_size;
    let y0 = f64::from(cy) * cell_size;
    (x0, y0, x0 + cell_size, y0 + cell_size)
}

/// Cell containing the point `(x, y)`, or `None` if it is not representable.
pub fn cell_of(x: f64, y: f64, cell_size: f64) -> Option<CellCoord> {
    let cx = to_coord((x / cell_size).floor())?;
    let cy = to_coord((y / cell_size).floor())?;
    Some((cx as i32, cy as i32))
}

/// Row-major sort key for a cell.
#[inline]
pub(crate) fn row_major(key: CellKey) -> (i32, i32) {
    let (cx, cy) = key.decode();
    (cy, cx)
}

fn to_coord(v: f64) -> Option<i64> {
    // NaN fails both comparisons
    if (MIN_COORD as f64) <= v && v <= (MAX_COORD as f64) {
        Some(v as i64)
    } else {
        None
    }
}

fn axis_exact(lo: f64, hi: f64, cell_size: f64) -> Result<(i64, i64)> {
    let start = to_coord((lo / cell_size).floor())
        .ok_or(GridError::CoordinateOutOfRange { value: lo })?;
    let end = (hi / cell_size).ceil();
    let end = if end <= (MAX_COORD + 1) as f64 {
        end as i64
    } else {
        return Err(GridError::CoordinateOutOfRange { value: hi });
    };
    Ok((start, end.max(start + 1)))
}

fn axis_clamped(lo: f64, hi: f64, cell_size: f64) -> (i64, i64) {
    let limit = (MAX_COORD + 1) as f64;
    let start = ((lo / cell_size).ceil() - 1.0).clamp(MIN_COORD as f64, MAX_COORD as f64) as i64;
    let end = ((hi / cell_size).floor() + 1.0).clamp(MIN_COORD as f64, limit) as i64;
    (start, end.max(start + 1))
}
