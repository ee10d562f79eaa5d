//! Aperture weight-grid assembly.
//!
//! One kernel evaluation per pixel, assembled into an `Array2<f64>`. The
//! parallel build exists because the cells are fully independent; it must
//! produce the same bits as the serial build.

use ndarray::{Array2, Axis};
use rayon::prelude::*;
use thiserror::Error;

use crate::geometry::Circle;
use crate::overlap::pixel_weight;

/// Error for a weight grid requested with zero pixels.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("grid side length must be positive")]
pub struct EmptyGridError;

/// Builds the `side × side` grid of per-pixel overlap fractions for one
/// circular aperture.
///
/// Element `[[row, col]]` is the overlap fraction of the unit pixel centered
/// at `(x = col, y = row)`: row-major with y down the first axis, the same
/// axis convention the image helpers use. Pixel centers sit on the integer
/// lattice, so pixel `(i, j)` spans `[i - 0.5, i + 0.5] × [j - 0.5, j + 0.5]`.
///
/// The grid is freshly allocated on every call; the circle is not modified.
/// Cost is `side²` constant-time kernel evaluations.
///
/// # Arguments
/// * `circle` - The aperture to rasterize
/// * `side` - Grid side length in pixels; must be positive
///
/// # Returns
/// The weight grid, or [`EmptyGridError`] when `side` is zero.
pub fn weight_grid(circle: Circle, side: usize) -> Result<Array2<f64>, EmptyGridError> {
    if side == 0 {
        return Err(EmptyGridError);
    }
    let mut grid = Array2::zeros((side, side));
    for ((row, col), w) in grid.indexed_iter_mut() {
        *w = pixel_weight(circle, col as f64, row as f64);
    }
    Ok(grid)
}

/// Parallel variant of [`weight_grid`]: rows are filled by a rayon map.
///
/// Cells carry no cross-dependencies, so the only coordination is the final
/// assembly into the output array. The result is bit-identical to the serial
/// build.
pub fn weight_grid_parallel(circle: Circle, side: usize) -> Result<Array2<f64>, EmptyGridError> {
    if side == 0 {
        return Err(EmptyGridError);
    }
    let mut grid = Array2::zeros((side, side));
    grid.axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(row, mut line)| {
            for (col, w) in line.iter_mut().enumerate() {
                *w = pixel_weight(circle, col as f64, row as f64);
            }
        });
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_zero_side_rejected() {
        let c = Circle::new(1.0, 1.0, 1.0).unwrap();
        assert_eq!(weight_grid(c, 0), Err(EmptyGridError));
        assert_eq!(weight_grid_parallel(c, 0), Err(EmptyGridError));
    }

    #[test]
    fn test_single_pixel_grid() {
        let c = Circle::new(0.0, 0.0, 0.2).unwrap();
        let grid = weight_grid(c, 1).unwrap();
        assert_eq!(grid.dim(), (1, 1));
        assert_relative_eq!(grid[[0, 0]], PI * 0.04, max_relative = 1e-12);
    }

    #[test]
    fn test_axis_convention_row_is_y() {
        // aperture hugging (x = 3, y = 1): full weight lands at [[1, 3]],
        // nothing at the transposed index
        let c = Circle::new(3.0, 1.0, 0.8).unwrap();
        let grid = weight_grid(c, 5).unwrap();
        assert_eq!(grid[[1, 3]], 1.0);
        assert_eq!(grid[[3, 1]], 0.0);
    }

    #[test]
    fn test_contained_disk_sum_is_its_area() {
        // every pixel weight is exact, so the grid total telescopes to the
        // disk area once the disk fits inside the grid
        let c = Circle::new(6.89, 5.123, 3.67).unwrap();
        let grid = weight_grid(c, 13).unwrap();
        assert_relative_eq!(grid.sum(), PI * 3.67 * 3.67, max_relative = 1e-10);
    }

    #[test]
    fn test_zero_radius_grid_is_all_zero() {
        let c = Circle::new(4.0, 4.0, 0.0).unwrap();
        let grid = weight_grid(c, 9).unwrap();
        assert!(grid.iter().all(|&w| w == 0.0));
    }

    #[test]
    fn test_parallel_matches_serial() {
        let c = Circle::new(6.89, 5.123, 3.67).unwrap();
        let serial = weight_grid(c, 13).unwrap();
        let parallel = weight_grid_parallel(c, 13).unwrap();
        assert_eq!(serial, parallel);
    }

    #[test]
    fn test_weights_bounded_by_unit_pixel_area() {
        let c = Circle::new(2.3, 2.7, 2.0).unwrap();
        let grid = weight_grid(c, 6).unwrap();
        for &w in grid.iter() {
            assert!((0.0..=1.0).contains(&w));
        }
    }
}
