//! Shape factory: signature in, renderer-ready geometry out.

use nalgebra::Vector2;

use super::cfg::ShapeCfg;
use super::lm::SolveReport;
use super::polygon::{build_polygon, Polygon};
use super::signature::{parse_signature, AngleSequence, ReflectionGroupSignature};
use super::solve::{solve_angle_splits, AngleSplit};
use crate::error::{DegenerateError, Result};
use crate::planar::{bounding_radius, centroid_estimate, edge_buffer, shape_edges, Circle};

/// Fundamental polygon plus everything the renderer uploads.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    pub angles: AngleSequence,
    pub split: AngleSplit,
    pub report: SolveReport,
    pub polygon: Polygon,
    /// One geodesic arc per edge, in vertex order.
    pub edges: Vec<Circle>,
    pub centroid: Vector2<f64>,
    pub radius: f64,
}

impl Shape {
    /// Vertex count `p`.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.polygon.len()
    }
    /// `3p` scalars: `(cx, cy, r)` per edge.
    pub fn edge_buffer(&self) -> Vec<f64> {
        edge_buffer(&self.edges)
    }
}

/// Build the shape for a reflection-group signature (`α_i = 2π/q_i`).
pub fn build_shape(signature: &ReflectionGroupSignature, cfg: &ShapeCfg) -> Result<Shape> {
    shape_from_angles(signature.angles(), cfg).inspect_err(|e| {
        tracing::warn!(%signature, kind = e.kind(), error = %e, "shape_rejected");
    })
}

/// Parse `text` as a signature, then build.
pub fn shape_from_text(text: &str, cfg: &ShapeCfg) -> Result<Shape> {
    let signature = parse_signature(text)?;
    build_shape(&signature, cfg)
}

/// Build from raw target angles.
///
/// Post: every vertex is finite and strictly inside the unit disk; edges,
/// centroid and radius are finite.
pub fn shape_from_angles(angles: AngleSequence, cfg: &ShapeCfg) -> Result<Shape> {
    let solved = solve_angle_splits(&angles, &cfg.solver)?;
    let polygon = build_polygon(&angles, &solved.split, cfg)?;
    for (vertex, v) in polygon.vertices().iter().enumerate() {
        let radius = v.norm();
        if !(radius.is_finite() && radius < 1.0) {
            return Err(DegenerateError::OutsideDisk { vertex, radius }.into());
        }
    }

    let edges = shape_edges(&polygon, cfg.eps_det)?;
    let centroid = centroid_estimate(&polygon)?;
    let radius = bounding_radius(&polygon, centroid);
    if !(centroid.x.is_finite() && centroid.y.is_finite() && radius.is_finite()) {
        return Err(DegenerateError::NonFinite("centroid").into());
    }
    tracing::debug!(
        sides = polygon.len(),
        radius,
        iterations = solved.report.iterations,
        "shape_built"
    );

    Ok(Shape {
        angles,
        split: solved.split,
        report: solved.report,
        polygon,
        edges,
        centroid,
        radius,
    })
}
