//! Geometric input types for aperture masks.
//!
//! Both types are plain value types with public fields. The `new` constructors
//! validate eagerly so malformed geometry is rejected at the boundary instead
//! of surfacing later as NaN weights.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from validating aperture geometry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Radius was NaN, infinite, or negative.
    #[error("aperture radius must be finite and non-negative, got {radius}")]
    InvalidRadius {
        /// The rejected radius value
        radius: f64,
    },
    /// A center coordinate was NaN or infinite.
    #[error("aperture center must be finite, got ({center_x}, {center_y})")]
    NonFiniteCenter {
        /// The rejected x coordinate
        center_x: f64,
        /// The rejected y coordinate
        center_y: f64,
    },
    /// Rectangle bounds were non-finite or not strictly ordered.
    #[error(
        "rectangle bounds must be finite with x_min < x_max and y_min < y_max, \
         got x [{x_min}, {x_max}], y [{y_min}, {y_max}]"
    )]
    MalformedRect {
        /// Lower x bound
        x_min: f64,
        /// Upper x bound
        x_max: f64,
        /// Lower y bound
        y_min: f64,
        /// Upper y bound
        y_max: f64,
    },
}

/// A circular aperture in pixel coordinates.
///
/// `center_x`/`center_y` follow the image convention used throughout this
/// crate: x runs along columns, y along rows, and the pixel centered at
/// integer coordinates `(i, j)` spans `[i - 0.5, i + 0.5] × [j - 0.5, j + 0.5]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    /// Center x coordinate (column direction), in pixels
    pub center_x: f64,
    /// Center y coordinate (row direction), in pixels
    pub center_y: f64,
    /// Aperture radius, in pixels
    pub radius: f64,
}

impl Circle {
    /// Creates a circle after validating that the center is finite and the
    /// radius is finite and non-negative.
    ///
    /// # Arguments
    /// * `center_x` - Center x coordinate in pixels
    /// * `center_y` - Center y coordinate in pixels
    /// * `radius` - Aperture radius in pixels (zero is allowed and yields a
    ///   measure-zero aperture)
    pub fn new(center_x: f64, center_y: f64, radius: f64) -> Result<Self, GeometryError> {
        if !center_x.is_finite() || !center_y.is_finite() {
            return Err(GeometryError::NonFiniteCenter { center_x, center_y });
        }
        if !radius.is_finite() || radius < 0.0 {
            return Err(GeometryError::InvalidRadius { radius });
        }
        Ok(Self {
            center_x,
            center_y,
            radius,
        })
    }
}

impl std::fmt::Display for Circle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}) r={}", self.center_x, self.center_y, self.radius)
    }
}

/// An axis-aligned rectangle in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelRect {
    /// Lower x bound
    pub x_min: f64,
    /// Upper x bound
    pub x_max: f64,
    /// Lower y bound
    pub y_min: f64,
    /// Upper y bound
    pub y_max: f64,
}

impl PixelRect {
    /// Creates a rectangle after validating that all bounds are finite and
    /// strictly ordered (`x_min < x_max`, `y_min < y_max`).
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Result<Self, GeometryError> {
        let finite =
            x_min.is_finite() && x_max.is_finite() && y_min.is_finite() && y_max.is_finite();
        if !finite || x_min >= x_max || y_min >= y_max {
            return Err(GeometryError::MalformedRect {
                x_min,
                x_max,
                y_min,
                y_max,
            });
        }
        Ok(Self {
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }

    /// The unit-square pixel centered at `(x, y)`.
    ///
    /// `x` and `y` are assumed finite; this is the rectangle the grid and
    /// photometry layers evaluate once per pixel.
    pub fn unit(x: f64, y: f64) -> Self {
        Self {
            x_min: x - 0.5,
            x_max: x + 0.5,
            y_min: y - 0.5,
            y_max: y + 0.5,
        }
    }

    /// Extent along x.
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Extent along y.
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Rectangle area (`width × height`).
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }
}
