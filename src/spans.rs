//! Conservative pixel-span classification along one image line.
//!
//! Photometry loops want to know, for each image row, which pixels need the
//! full overlap kernel and which can be added raw. The classification here is
//! deliberately conservative: `outer` may include pixels the kernel will
//! score as zero, and `inner` claims a pixel only when it is provably whole
//! pixels inside the aperture. Both directions are safe for a weighted sum.

use std::ops::Range;

use crate::geometry::Circle;

/// Upper bound on sqrt(2), rounded up in the last printed digit so the
/// uncertainty margin derived from it only ever grows.
const SQRT2_UPPER: f64 = 1.414_213_563;

/// Pixel index spans along one line of pixels, classified against a circle.
///
/// Both ranges are half-open. Guarantees:
/// - every pixel with nonzero overlap lies in `outer`;
/// - every pixel in `inner` lies entirely within the closed disk
///   (overlap fraction exactly 1);
/// - `inner` is contained in `outer`.
///
/// When the line misses the disk entirely, both ranges are empty, anchored
/// at the rounded line center.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelSpans {
    /// Superset of pixel indices with any overlap
    pub outer: Range<i64>,
    /// Subset of pixel indices whose pixels are fully interior
    pub inner: Range<i64>,
}

/// Spans of pixel x indices (columns) for the pixel row at `y = row`.
pub fn row_spans(circle: Circle, row: i64) -> PixelSpans {
    line_spans(
        circle.center_x,
        row as f64 - circle.center_y,
        circle.radius,
    )
}

/// Spans of pixel y indices (rows) for the pixel column at `x = col`.
pub fn column_spans(circle: Circle, col: i64) -> PixelSpans {
    line_spans(
        circle.center_y,
        col as f64 - circle.center_x,
        circle.radius,
    )
}

/// Shared implementation: spans of indices along one axis, for the line of
/// unit pixels whose centers sit `across_dist` away from the circle center
/// on the other axis.
///
/// A unit pixel can overlap the disk only when its center is within
/// `r + sqrt(2)/2` of the circle center, and is certainly interior when
/// within `r - sqrt(2)/2`. Squaring both bounds against the along-axis
/// offset gives the discriminants `a + b` and `a - b` below, with
/// `a = r² + 0.5 - across_dist²` and `b = sqrt(2)⁺·r`.
fn line_spans(along_center: f64, across_dist: f64, radius: f64) -> PixelSpans {
    let mid = along_center.round() as i64;
    let empty = PixelSpans {
        outer: mid..mid,
        inner: mid..mid,
    };

    if radius <= 0.0 {
        return empty;
    }

    let a = radius * radius + 0.5 - across_dist * across_dist;
    let b = SQRT2_UPPER * radius;

    let outdsq = a + b;
    if outdsq < 0.0 {
        return empty;
    }
    let outd = outdsq.sqrt();
    let outer = (along_center - outd).ceil() as i64..(along_center + outd).floor() as i64 + 1;

    // The interior discriminant only makes sense once r >= sqrt(2)/2
    // (b >= 1); below that no unit pixel can fit inside the disk.
    let inner = if b < 1.0 || a - b < 0.0 {
        let anchor = mid.clamp(outer.start, outer.end);
        anchor..anchor
    } else {
        let ind = (a - b).sqrt();
        (along_center - ind).ceil() as i64..(along_center + ind).floor() as i64 + 1
    };

    PixelSpans { outer, inner }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlap::pixel_weight;

    #[test]
    fn test_missing_line_is_empty() {
        let c = Circle::new(5.0, 5.0, 2.0).unwrap();
        let spans = row_spans(c, 20);
        assert!(spans.outer.is_empty());
        assert!(spans.inner.is_empty());
        assert_eq!(spans.outer.start, 5);
    }

    #[test]
    fn test_zero_radius_is_empty() {
        let c = Circle::new(3.2, 4.8, 0.0).unwrap();
        let spans = row_spans(c, 5);
        assert!(spans.outer.is_empty());
        assert!(spans.inner.is_empty());
    }

    #[test]
    fn test_small_radius_claims_no_interior() {
        // below r = sqrt(2)/2 no unit pixel fits inside the disk
        let c = Circle::new(10.0, 10.0, 0.6).unwrap();
        for row in 5..15 {
            assert!(row_spans(c, row).inner.is_empty());
        }
    }

    #[test]
    fn test_inner_contained_in_outer() {
        let c = Circle::new(6.89, 5.123, 3.67).unwrap();
        for row in -2..14 {
            let spans = row_spans(c, row);
            assert!(spans.inner.start >= spans.outer.start);
            assert!(spans.inner.end <= spans.outer.end);
        }
    }

    #[test]
    fn test_central_row_has_interior() {
        let c = Circle::new(6.89, 5.123, 3.67).unwrap();
        let spans = row_spans(c, 5);
        assert!(!spans.inner.is_empty());
        assert!(!spans.outer.is_empty());
    }

    #[test]
    fn test_classification_agrees_with_kernel() {
        let c = Circle::new(6.89, 5.123, 3.67).unwrap();
        for row in -3..15 {
            let spans = row_spans(c, row);
            for col in -3..15 {
                let w = pixel_weight(c, col as f64, row as f64);
                if spans.inner.contains(&col) {
                    assert_eq!(w, 1.0, "inner pixel ({col}, {row}) not fully covered");
                } else if !spans.outer.contains(&col) {
                    assert_eq!(w, 0.0, "pixel ({col}, {row}) outside outer span overlaps");
                } else {
                    assert!((0.0..=1.0).contains(&w));
                }
            }
        }
    }

    #[test]
    fn test_row_and_column_spans_mirror() {
        let c = Circle::new(6.89, 5.123, 3.67).unwrap();
        let mirrored = Circle::new(5.123, 6.89, 3.67).unwrap();
        for k in 0..12 {
            assert_eq!(row_spans(c, k), column_spans(mirrored, k));
        }
    }

    #[test]
    fn test_negative_indices_handled() {
        // circle near the origin spills into negative pixel indices
        let c = Circle::new(0.0, 0.0, 2.5).unwrap();
        let spans = row_spans(c, 0);
        assert!(spans.outer.start < 0);
        assert!(spans.outer.end > 0);
    }
}
