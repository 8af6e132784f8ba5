//! Hyperbolic fundamental polygons from reflection-group signatures.
//!
//! Purpose
//! - Turn a signature `(q_0, …, q_{p-1})` into target angles `2π/q_i`, solve the
//!   per-vertex side constraints for the angle splits, and place the vertices
//!   in the Poincaré disk.
//! - Derive the renderer-facing data (edge arcs, centroid, bounding radius).
//!
//! Layout
//! - `signature`: parsing and `AngleSequence`.
//! - `system`: per-vertex residual functors (`SideConstraint`).
//! - `lm`: generic Levenberg–Marquardt over the `Residuals` trait.
//! - `solve`: feasibility gate + split solve.
//! - `polygon`: vertex placement, closed-form regular path.
//! - `shape`: the factory tying it together.
//!
//! Code cross-refs: `planar::{geodesic_arc, centroid_estimate, bounding_radius}`.

mod cfg;
pub mod lm;
mod polygon;
mod shape;
mod signature;
mod solve;
mod system;

pub use cfg::{ShapeCfg, SolverCfg};
pub use lm::{levenberg_marquardt, Residuals, SolveReport};
pub use polygon::{build_polygon, regular_polygon, regular_radius, vertex_radius, Polygon};
pub use shape::{build_shape, shape_from_angles, shape_from_text, Shape};
pub use signature::{parse_signature, AngleSequence, ReflectionGroupSignature};
pub use solve::{check_feasible, initial_guess, solve_angle_splits, AngleSplit, Solved};
pub use system::{SideConstraint, SideConstraintSystem};

#[cfg(test)]
mod tests;
