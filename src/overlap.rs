//! Exact circle / axis-aligned-rectangle intersection area.
//!
//! The kernel is fully closed-form: the disk clipped to an arbitrary
//! axis-aligned box is assembled by inclusion-exclusion over a signed corner
//! function, so one case analysis in the first quadrant covers every relative
//! placement of box and circle (center inside the box, outside, on an edge,
//! box straddling an axis, and so on). No sampling, no iteration.

use crate::geometry::{Circle, PixelRect};

/// Area under the arc `y = sqrt(r² − x²)` over `[0, t]`, for `0 ≤ t ≤ r`.
///
/// Antiderivative form `0.5·(t·sqrt(r² − t²) + r²·asin(t/r))`. The ratio is
/// clamped before `asin` and the radicand floored at zero so values of `t`
/// a rounding error past `r` stay in domain.
fn arc_integral(t: f64, r: f64) -> f64 {
    let radicand = (r * r - t * t).max(0.0);
    let ratio = (t / r).clamp(-1.0, 1.0);
    0.5 * (t * radicand.sqrt() + r * r * ratio.asin())
}

/// Area of the disk of radius `r` (centered at the origin) clipped to the
/// box `[0, u] × [0, v]`, for `u, v ≥ 0`.
///
/// Case split on where the far corner `(u, v)` sits relative to the disk:
/// fully covered box, box past the disk on one or both axes, or the arc
/// crossing the far corner region. The branches agree at every case
/// boundary: at `u² + v² = r²` the partial branch collapses to `u·v`, and
/// `arc_integral(r, r) = π·r²/4` joins the one-axis branches to the
/// quarter-disk branch.
fn quadrant_area(u: f64, v: f64, r: f64) -> f64 {
    if u == 0.0 || v == 0.0 {
        return 0.0;
    }
    let rsq = r * r;
    if u * u + v * v <= rsq {
        // far corner inside the disk (closed): box fully covered
        return u * v;
    }
    if u >= r && v >= r {
        // box contains the whole first-quadrant quarter disk
        return 0.25 * std::f64::consts::PI * rsq;
    }
    if u >= r {
        return arc_integral(v, r);
    }
    if v >= r {
        return arc_integral(u, r);
    }
    // Both edges cross the arc: full columns out to where the arc meets
    // y = v, then the strip under the arc from there to u.
    let xv = (rsq - v * v).sqrt();
    xv * v + arc_integral(u, r) - arc_integral(xv, r)
}

/// Signed cumulative corner function: area of the disk clipped to the box
/// spanned by the origin and `(x, y)`, with the sign of `x·y`.
///
/// Differencing this over the four corners of any axis-aligned box yields
/// the clipped area of that box, regardless of which quadrants the box
/// touches; the signs make the overhanging strips cancel.
fn corner_area(x: f64, y: f64, r: f64) -> f64 {
    x.signum() * y.signum() * quadrant_area(x.abs(), y.abs(), r)
}

/// Exact area of the intersection between a circle and an axis-aligned
/// rectangle.
///
/// Points at distance exactly `radius` from the center count as inside
/// (closed disk), so a rectangle whose farthest corner lies on the circle
/// reports its full area.
///
/// Fast paths return exact values for the disjoint and fully-contained
/// cases; every other placement goes through the corner-function
/// inclusion-exclusion, with the result clamped to `[0, rect.area()]` to
/// absorb round-off. A zero radius yields zero for every rectangle.
///
/// # Arguments
/// * `circle` - The aperture circle
/// * `rect` - The rectangle to clip against, with `x_min < x_max` and
///   `y_min < y_max` (checked only by debug assertion; validated
///   construction is `PixelRect::new`)
///
/// # Returns
/// The intersection area, in `[0, rect.area()]`.
pub fn overlap_area(circle: Circle, rect: PixelRect) -> f64 {
    debug_assert!(circle.radius >= 0.0, "negative radius {}", circle.radius);
    debug_assert!(
        rect.x_max > rect.x_min && rect.y_max > rect.y_min,
        "malformed rectangle {rect:?}"
    );

    let r = circle.radius;
    let rsq = r * r;

    // Nearest rectangle point at distance >= r: measure-zero intersection.
    let dx = (rect.x_min - circle.center_x)
        .max(circle.center_x - rect.x_max)
        .max(0.0);
    let dy = (rect.y_min - circle.center_y)
        .max(circle.center_y - rect.y_max)
        .max(0.0);
    if dx * dx + dy * dy >= rsq {
        return 0.0;
    }

    // Farthest corner within the closed disk: rectangle fully covered.
    let fx = (rect.x_max - circle.center_x)
        .abs()
        .max((rect.x_min - circle.center_x).abs());
    let fy = (rect.y_max - circle.center_y)
        .abs()
        .max((rect.y_min - circle.center_y).abs());
    if fx * fx + fy * fy <= rsq {
        return rect.area();
    }

    let x0 = rect.x_min - circle.center_x;
    let x1 = rect.x_max - circle.center_x;
    let y0 = rect.y_min - circle.center_y;
    let y1 = rect.y_max - circle.center_y;

    let area = corner_area(x1, y1, r) - corner_area(x0, y1, r) - corner_area(x1, y0, r)
        + corner_area(x0, y0, r);
    area.clamp(0.0, rect.area())
}

/// Overlap fraction for the unit pixel centered at `(x, y)`.
///
/// Unit pixels have area 1, so the returned value is directly the fraction
/// of the pixel covered by the aperture, in `[0, 1]`.
pub fn pixel_weight(circle: Circle, x: f64, y: f64) -> f64 {
    overlap_area(circle, PixelRect::unit(x, y))
}
