//! Curated surface for the rendering collaborator (UNSTABLE).
//!
//! The renderer only needs four things per signature change: the vertex
//! count, the centroid, the bounding radius and the flat edge buffer. Prefer
//! these re-exports over reaching into `hyperbolic`/`planar` directly.

// Shape construction
pub use crate::hyperbolic::{
    build_shape, shape_from_angles, shape_from_text, AngleSequence, Polygon,
    ReflectionGroupSignature, Shape, ShapeCfg, SolverCfg,
};
// Closed-form regular path
pub use crate::hyperbolic::{regular_polygon, regular_radius};
// Circle geometry
pub use crate::planar::{
    bounding_radius, centroid_estimate, circumcircle, edge_buffer, geodesic_arc, invert,
    shape_edges, triangle_incenter, Circle,
};
// Background recomputation
pub use crate::session::{ShapeSession, Ticket, Update};

use nalgebra::Vector2;

/// Hyperbolic distance from the origin of a point in the Poincaré disk.
///
/// Pre: `|p| < 1`.
/// Post: `2 artanh |p|`; `None` on or outside the unit circle.
pub fn poincare_distance_from_origin(p: Vector2<f64>) -> Option<f64> {
    let r = p.norm();
    if r.is_nan() || r >= 1.0 {
        return None;
    }
    Some(2.0 * r.atanh())
}
