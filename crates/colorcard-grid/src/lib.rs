//! Patch-grid reconstruction for reference color cards.
//!
//! ## Quickstart
//!
//! ```
//! use colorcard_core::Point;
//! use colorcard_grid::{build_regions, locate_grid, CardCorners, CardLayout};
//!
//! let corners = CardCorners {
//!     a: Point::new(426.0, 2083.0),
//!     b: Point::new(2479.0, 2098.0),
//!     c: Point::new(2485.0, 692.0),
//!     d: Point::new(438.0, 773.0),
//! };
//! let layout = CardLayout::default();
//! let grid = locate_grid(&corners, &layout).unwrap();
//! let regions = build_regions(&grid, layout.roi_tolerance);
//! assert_eq!(regions.len(), 24);
//! ```
//!
//! Algorithm (closed-form extrapolation, no pixel content involved):
//! 1. Walk the left edge A→D and the right edge B→C in `rows` constant
//!    steps of one patch-plus-gap pitch, following each edge's slope.
//! 2. For every row, walk from its left node to its right node in `cols`
//!    constant steps; these are the cells' top-left corners.
//! 3. Offset each top-left corner horizontally by the row's patch width
//!    (top-right), then vertically by the column's patch height
//!    (bottom-left / bottom-right).
//!
//! Only valid while the card's deviation from a rectangle (lens distortion,
//! perspective) stays small over its extent.

mod error;
mod locate;
mod params;
mod region;

pub use error::GridError;
pub use locate::{
    column_patch_heights, edge_points, locate_grid, patch_size, row_widths, PatchGrid,
};
pub use params::{CardCorners, CardLayout};
pub use region::{build_regions, shrink_to_region};
