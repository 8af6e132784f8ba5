//! Planar circle geometry (Euclidean constructions in the disk's plane).
//!
//! Purpose
//! - Classical constructions used to turn Poincaré-disk vertices into
//!   renderable data: circle through three points, circle inversion, and the
//!   geodesic arc between two disk points.
//! - Incentre-based centroid estimate and bounding radius of a polygon.
//!
//! Degenerate inputs (collinear triples, inversion at the centre, zero
//! perimeter) are reported as `DegenerateError`, never as NaN/∞ results.
//!
//! Code cross-refs: `hyperbolic::Polygon`, `hyperbolic::shape`.

mod center;
mod circle;

pub use center::{bounding_radius, centroid_estimate, triangle_incenter};
pub use circle::{circumcircle, edge_buffer, geodesic_arc, invert, shape_edges, Circle};
