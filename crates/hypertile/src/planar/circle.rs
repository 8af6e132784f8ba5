//! Circles, inversion and geodesic arcs.

use nalgebra::Vector2;

use crate::error::DegenerateError;
use crate::hyperbolic::Polygon;

/// Euclidean circle `|z − center| = radius`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub center: Vector2<f64>,
    pub radius: f64,
}

impl Circle {
    #[inline]
    pub fn new(center: Vector2<f64>, radius: f64) -> Self {
        Self { center, radius }
    }
    /// The unit circle bounding the Poincaré disk.
    #[inline]
    pub fn unit() -> Self {
        Self::new(Vector2::zeros(), 1.0)
    }
    /// `(center_x, center_y, radius)` as uploaded by the renderer.
    #[inline]
    pub fn to_triple(&self) -> [f64; 3] {
        [self.center.x, self.center.y, self.radius]
    }
    /// Signed distance from `p` to the circle (negative inside).
    #[inline]
    pub fn signed_distance(&self, p: Vector2<f64>) -> f64 {
        (p - self.center).norm() - self.radius
    }
}

/// Circle through three points.
///
/// Pre: `a`, `b`, `c` not collinear.
/// Post: the unique circle through all three; `Collinear` when
/// `|det| <= eps_det * scale²`, where `scale` is the largest coordinate spread.
pub fn circumcircle(
    a: Vector2<f64>,
    b: Vector2<f64>,
    c: Vector2<f64>,
    eps_det: f64,
) -> Result<Circle, DegenerateError> {
    let ab = (a.norm_squared() - b.norm_squared()) / 2.0;
    let bc = (b.norm_squared() - c.norm_squared()) / 2.0;
    let det = (a.x - b.x) * (b.y - c.y) - (a.y - b.y) * (b.x - c.x);

    let scale = [
        (a.x - b.x).abs(),
        (a.y - b.y).abs(),
        (b.x - c.x).abs(),
        (b.y - c.y).abs(),
    ]
    .into_iter()
    .fold(0.0_f64, f64::max);
    if !det.is_finite() || det.abs() <= eps_det * scale * scale {
        return Err(DegenerateError::Collinear { det });
    }

    let center = Vector2::new(
        (ab * (b.y - c.y) - bc * (a.y - b.y)) / det,
        (bc * (a.x - b.x) - ab * (b.x - c.x)) / det,
    );
    let radius = (center - a).norm();
    if !radius.is_finite() {
        return Err(DegenerateError::NonFinite("circumcircle"));
    }
    Ok(Circle { center, radius })
}

/// Inversion of `p` in the circle `(center, radius)`:
/// the point on the ray center→p with `|cp|·|cp'| = radius²`.
pub fn invert(
    p: Vector2<f64>,
    center: Vector2<f64>,
    radius: f64,
) -> Result<Vector2<f64>, DegenerateError> {
    if !(radius.is_finite() && radius > 0.0) {
        return Err(DegenerateError::NonPositiveRadius { radius });
    }
    let v = p - center;
    let d2 = v.norm_squared();
    if d2 == 0.0 {
        return Err(DegenerateError::AtInversionCenter);
    }
    let image = center + v * (radius * radius / d2);
    if !(image.x.is_finite() && image.y.is_finite()) {
        return Err(DegenerateError::NonFinite("inversion"));
    }
    Ok(image)
}

/// Euclidean circle carrying the hyperbolic geodesic through `a` and `b`.
///
/// The geodesic is orthogonal to the unit circle, so it also passes through
/// the inverse of `a` in the unit circle. A chord through the origin is a
/// diameter and is reported as `Collinear`.
pub fn geodesic_arc(
    a: Vector2<f64>,
    b: Vector2<f64>,
    eps_det: f64,
) -> Result<Circle, DegenerateError> {
    let unit = Circle::unit();
    let a_inv = invert(a, unit.center, unit.radius)?;
    circumcircle(a, b, a_inv, eps_det)
}

/// One geodesic arc per polygon edge `(v_i, v_{i+1})`, in vertex order.
pub fn shape_edges(polygon: &Polygon, eps_det: f64) -> Result<Vec<Circle>, DegenerateError> {
    polygon
        .edges()
        .map(|(a, b)| geodesic_arc(a, b, eps_det))
        .collect()
}

/// Flat `[cx0, cy0, r0, cx1, ...]` buffer, `3 * edges.len()` scalars.
pub fn edge_buffer(edges: &[Circle]) -> Vec<f64> {
    edges.iter().flat_map(Circle::to_triple).collect()
}
