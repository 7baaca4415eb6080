//! cellgrid - a uniform-cell spatial hash index for 2D bounding boxes.
//!
//! [`Grid`] buckets axis-aligned boxes into square cells so that "what overlaps
//! this rectangle" costs time proportional to the cells touched, not the number
//! of entries. It keeps a reverse index for O(k) removal and a generation stamp
//! for allocation-free deduplication of entries spanning several cells.
//!
//! ```
//! use cellgrid_core::{Grid, GridConfig, Padding};
//!
//! let mut grid = Grid::with_config(GridConfig::new(64.0).with_padding(Padding::NONE));
//! grid.insert_rect(7u32, (0.0, 0.0, 200.0, 200.0));
//!
//! assert_eq!(grid.query((90.0, 90.0, 110.0, 110.0)), vec![7]);
//! assert_eq!(grid.query_view((90.0, 90.0, 110.0, 110.0)), &[7]);
//!
//! grid.remove(&7);
//! assert!(grid.keys((0.0, 0.0, 200.0, 200.0)).is_empty());
//! ```
//!
//! The grid is single-threaded: mutation and the buffer-reusing `*_view`
//! queries take `&mut self`, the owned `query`/`keys` take `&self`.

pub mod config;
pub mod error;
pub mod geom;
pub mod grid;
pub mod key;
pub mod pool;
pub mod query;
pub mod range;
pub mod utils;

pub use config::{GridConfig, Padding};
pub use error::{GridError, Result};
pub use geom::{HasBBox, Rect};
pub use grid::Grid;
pub use key::{CellCoord, CellKey};
pub use range::CellRange;
