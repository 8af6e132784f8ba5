//! JSON view of a shape: exactly the values the renderer uploads, plus the
//! solver diagnostics.

use hypertile::hyperbolic::{Shape, SolveReport};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SolverSummary {
    pub iterations: usize,
    pub residual_norm: f64,
}

impl From<&SolveReport> for SolverSummary {
    fn from(report: &SolveReport) -> Self {
        Self {
            iterations: report.iterations,
            residual_norm: report.residual_norm,
        }
    }
}

/// Renderer inputs for one signature.
#[derive(Debug, Serialize)]
pub struct RenderPayload {
    pub signature: String,
    /// Vertex count.
    pub p: usize,
    pub center: [f64; 2],
    pub radius: f64,
    /// `3p` scalars, `(cx, cy, r)` per edge.
    pub edges: Vec<f64>,
    /// Closed ring `[x0, y0, …]`, first two vertices repeated.
    pub vertices: Vec<f64>,
    pub splits: Vec<f64>,
    pub solver: SolverSummary,
}

impl RenderPayload {
    pub fn from_shape(signature: &str, shape: &Shape) -> Self {
        Self {
            signature: signature.to_string(),
            p: shape.vertex_count(),
            center: [shape.centroid.x, shape.centroid.y],
            radius: shape.radius,
            edges: shape.edge_buffer(),
            vertices: shape.polygon.to_flat(),
            splits: shape.split.as_slice().to_vec(),
            solver: SolverSummary::from(&shape.report),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hypertile::hyperbolic::shape_from_text;
    use hypertile::ShapeCfg;

    #[test]
    fn payload_sizes_follow_vertex_count() {
        let shape = shape_from_text("3,4,5,6,7", &ShapeCfg::default()).unwrap();
        let payload = RenderPayload::from_shape("3,4,5,6,7", &shape);
        assert_eq!(payload.p, 5);
        assert_eq!(payload.edges.len(), 15);
        assert_eq!(payload.vertices.len(), 14);
        assert_eq!(payload.splits.len(), 5);
    }

    #[test]
    fn payload_serializes_expected_keys() {
        let shape = shape_from_text("5,5,5,5,5", &ShapeCfg::default()).unwrap();
        let value = serde_json::to_value(RenderPayload::from_shape("5,5,5,5,5", &shape)).unwrap();
        for key in ["signature", "p", "center", "radius", "edges", "vertices", "splits", "solver"] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        assert_eq!(value["solver"]["iterations"], 0);
    }
}
