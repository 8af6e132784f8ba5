//! Centroid estimate and bounding radius for disk polygons.

use nalgebra::Vector2;

use crate::error::DegenerateError;
use crate::hyperbolic::Polygon;

/// Incentre of triangle `(a, b, c)`: vertices weighted by the opposite side.
pub fn triangle_incenter(
    a: Vector2<f64>,
    b: Vector2<f64>,
    c: Vector2<f64>,
) -> Result<Vector2<f64>, DegenerateError> {
    let opp_a = (b - c).norm();
    let opp_b = (a - c).norm();
    let opp_c = (a - b).norm();
    let perimeter = opp_a + opp_b + opp_c;
    if perimeter <= 0.0 || !perimeter.is_finite() {
        return Err(DegenerateError::ZeroPerimeter);
    }
    Ok((a * opp_a + b * opp_b + c * opp_c) / perimeter)
}

/// Mean of the incentres of the `p` consecutive triangles
/// `(v_i, v_{i+1}, v_{i+2})`.
///
/// An engineering stand-in for the centre of mass, good enough to centre the
/// renderer's bounding circle. It is not the hyperbolic centroid.
pub fn centroid_estimate(polygon: &Polygon) -> Result<Vector2<f64>, DegenerateError> {
    let mut sum = Vector2::zeros();
    for tri in polygon.triangles() {
        sum += triangle_incenter(tri[0], tri[1], tri[2])?;
    }
    Ok(sum / polygon.len() as f64)
}

/// Largest Euclidean distance from `center` to any of the `p` vertices.
pub fn bounding_radius(polygon: &Polygon, center: Vector2<f64>) -> f64 {
    polygon
        .vertices()
        .iter()
        .map(|v| (v - center).norm_squared())
        .fold(0.0, f64::max)
        .sqrt()
}
