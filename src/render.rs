//! Quick-look rendering of weight grids.
//!
//! The ASCII dump is for eyeballing a mask in a terminal or log; the
//! grayscale conversion feeds normal image tooling. Both read the grid with
//! the crate's `[[y, x]]` convention.

use image::{GrayImage, Luma};
use ndarray::ArrayView2;

/// Density progression from empty to fully covered.
const DENSITY_RAMP: &str = " .:-=+*#%@";

/// Renders a weight grid as one density character per pixel.
///
/// Row 0 is printed at the *bottom* so the output matches the usual
/// bottom-left-origin display of astronomical images. Weights outside
/// `[0, 1]` are clamped before mapping onto the ramp.
pub fn weights_to_ascii(grid: &ArrayView2<f64>) -> String {
    let levels: Vec<char> = DENSITY_RAMP.chars().collect();
    let top = levels.len() - 1;
    let (height, width) = grid.dim();

    let mut output = String::with_capacity((width + 1) * height);
    for y in (0..height).rev() {
        for x in 0..width {
            let w = grid[[y, x]].clamp(0.0, 1.0);
            let idx = ((w * top as f64).round() as usize).min(top);
            output.push(levels[idx]);
        }
        output.push('\n');
    }
    output
}

/// Converts a weight grid to an 8-bit grayscale image.
///
/// Grid `[[y, x]]` maps to image `(x, y)`, so row 0 is the top row of the
/// image, following the raster convention of the `image` crate. Weights are
/// clamped to `[0, 1]` and scaled to the full `0..=255` range.
pub fn weights_to_gray_image(grid: &ArrayView2<f64>) -> GrayImage {
    let (height, width) = grid.dim();
    let mut img = GrayImage::new(width as u32, height as u32);
    for ((y, x), &w) in grid.indexed_iter() {
        let level = (w.clamp(0.0, 1.0) * 255.0).round() as u8;
        img.put_pixel(x as u32, y as u32, Luma([level]));
    }
    img
}
