//! Error types for the cellgrid spatial index.

use thiserror::Error;

/// Errors reported by the fallible (`try_*`) grid entry points.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("cell size must be positive and finite, got {0}")]
    InvalidCellSize(f64),

    #[error("invalid bounds ({min_x}, {min_y}, {max_x}, {max_y})")]
    InvalidBounds {
        min_x: f64,
        min_y: f64,
        max_x: f64,
        max_y: f64,
    },

    #[error("cell coordinate for {value} is outside the representable i32 range")]
    CoordinateOutOfRange { value: f64 },

    #[error("entry covers {cells} cells, more than the limit of {limit}")]
    TooManyCells { cells: u128, limit: u64 },
}

/// Convenience Result type alias for GridError.
pub type Result<T> = std::result::Result<T, GridError>;
