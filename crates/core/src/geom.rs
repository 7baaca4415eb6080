//! Geometric primitives shared by the grid.
//!
//! Provides:
//! - `Rect`, the `(min_x, min_y, max_x, max_y)` tuple every API speaks
//! - `HasBBox`, the capability an entry needs to be inserted without an explicit box
//! - The closed overlap test used to recheck query candidates

use crate::error::{GridError, Result};

/// A rectangle defined by (x0, y0, x1, y1) where (x0, y0) is the minimum
/// corner and (x1, y1) the maximum corner.
pub type Rect = (f64, f64, f64, f64);

/// Trait for objects that have a bounding box.
pub trait HasBBox {
    fn x0(&self) -> f64;
    fn y0(&self) -> f64;
    fn x1(&self) -> f64;
    fn y1(&self) -> f64;

    fn bbox(&self) -> Rect {
        (self.x0(), self.y0(), self.x1(), self.y1())
    }

    fn width(&self) -> f64 {
        self.x1() - self.x0()
    }

    fn height(&self) -> f64 {
        self.y1() - self.y0()
    }
}

impl HasBBox for Rect {
    fn x0(&self) -> f64 {
        self.0
    }
    fn y0(&self) -> f64 {
        self.1
    }
    fn x1(&self) -> f64 {
        self.2
    }
    fn y1(&self) -> f64 {
        self.3
    }
}

/// Returns true if the two rectangles intersect as closed sets.
///
/// Touching edges and corners count, so a point or a zero-width segment
/// overlaps every rectangle it lies in or on.
#[inline]
pub fn overlaps(a: Rect, b: Rect) -> bool {
    a.0 <= b.2 && b.0 <= a.2 && a.1 <= b.3 && b.1 <= a.3
}

/// Returns true if no coordinate is NaN and min <= max on both axes.
#[inline]
pub fn is_valid_rect(r: Rect) -> bool {
    // NaN fails both comparisons
    r.0 <= r.2 && r.1 <= r.3
}

pub(crate) fn check_rect(r: Rect) -> Result<Rect> {
    if is_valid_rect(r) {
        Ok(r)
    } else {
        Err(GridError::InvalidBounds {
            min_x: r.0,
            min_y: r.1,
            max_x: r.2,
            max_y: r.3,
        })
    }
}
