//! Exact circle/pixel overlap weights for astronomical aperture photometry.
//!
//! The core is a closed-form geometry kernel for the intersection area of a
//! circle and an axis-aligned rectangle, correct for every relative placement
//! of the two. On top of it sit a weight-grid builder (one overlap fraction
//! per pixel of an n×n mask), conservative per-row span classification, and
//! sub-pixel-accurate aperture sums over an image.
//!
//! Pixels are unit squares centered on the integer lattice: pixel `(i, j)`
//! spans `[i - 0.5, i + 0.5] × [j - 0.5, j + 0.5]`. Grids and images are
//! indexed `[[y, x]]`. Points at distance exactly `r` from the aperture
//! center count as inside (closed disk).
//!
//! ```
//! use apermask::{weight_grid, Circle};
//!
//! let aperture = Circle::new(6.89, 5.123, 3.67)?;
//! let weights = weight_grid(aperture, 13)?;
//!
//! // exact per-pixel fractions sum to the disk area once the disk fits
//! let total: f64 = weights.sum();
//! assert!((total - std::f64::consts::PI * 3.67 * 3.67).abs() < 1e-9);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod geometry;
pub mod grid;
pub mod overlap;
pub mod photometry;
pub mod render;
pub mod spans;

pub use geometry::{Circle, GeometryError, PixelRect};
pub use grid::{weight_grid, weight_grid_parallel, EmptyGridError};
pub use overlap::{overlap_area, pixel_weight};
pub use photometry::{centered_aperture_sum, weighted_aperture_sum};
pub use render::{weights_to_ascii, weights_to_gray_image};
pub use spans::{column_spans, row_spans, PixelSpans};
