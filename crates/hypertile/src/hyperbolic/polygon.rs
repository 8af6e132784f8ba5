//! Vertex placement in the Poincaré disk.
//!
//! Vertex `i` sits at polar angle `2πi/n`. Its distance from the origin comes
//! from the triangle (origin, v_i, v_{i+1}) with angles `I = 2π/n` at the
//! origin, `A = x_i` at `v_i` and `C = α_{i+1} − x_{i+1}` at `v_{i+1}`: the
//! hyperbolic law of cosines gives `cosh d = (cos C + cos A cos I)/(sin A sin I)`
//! and the disk radius is `tanh(d/2) = (eᵈ − 1)/(eᵈ + 1)`.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use nalgebra::Vector2;

use super::cfg::{ShapeCfg, SolverCfg};
use super::signature::AngleSequence;
use super::solve::{check_feasible, AngleSplit};
use crate::error::{DegenerateError, Result};

/// Number of leading vertices repeated at the end of the stored ring.
const CLOSURE: usize = 2;

/// Closed polygon in the unit disk.
///
/// Storage keeps the first two vertices appended after the last one, so edge
/// walks (`windows(2)`) and triangle fans (`windows(3)`) need no modular
/// indexing. `vertices()` hides the repeats; `closed()` exposes them.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    ring: Vec<Vector2<f64>>,
    sides: usize,
}

impl Polygon {
    pub(crate) fn from_ring(vertices: Vec<Vector2<f64>>) -> Self {
        let sides = vertices.len();
        let mut ring = vertices;
        if sides > 0 {
            for i in 0..CLOSURE {
                ring.push(ring[i % sides]);
            }
        }
        Self { ring, sides }
    }
    /// Vertex count `p`.
    #[inline]
    pub fn len(&self) -> usize {
        self.sides
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sides == 0
    }
    /// The `p` proper vertices.
    #[inline]
    pub fn vertices(&self) -> &[Vector2<f64>] {
        &self.ring[..self.sides]
    }
    /// The `p + 2` stored points (closure included).
    #[inline]
    pub fn closed(&self) -> &[Vector2<f64>] {
        &self.ring
    }
    /// Edges `(v_i, v_{i+1})`, `p` of them.
    pub fn edges(&self) -> impl Iterator<Item = (Vector2<f64>, Vector2<f64>)> + '_ {
        self.ring.windows(2).take(self.sides).map(|w| (w[0], w[1]))
    }
    /// Triangles `(v_i, v_{i+1}, v_{i+2})`, `p` of them.
    pub fn triangles(&self) -> impl Iterator<Item = &[Vector2<f64>]> + '_ {
        self.ring.windows(3).take(self.sides)
    }
    /// Interleaved `[x0, y0, x1, y1, …]` of the closed ring.
    pub fn to_flat(&self) -> Vec<f64> {
        self.ring.iter().flat_map(|v| [v.x, v.y]).collect()
    }
}

/// Disk radius of vertex `vertex` from its triangle angles `a`, `central`, `c`.
pub fn vertex_radius(
    vertex: usize,
    a: f64,
    central: f64,
    c: f64,
    cfg: &ShapeCfg,
) -> std::result::Result<f64, DegenerateError> {
    let denom = a.sin() * central.sin();
    if !denom.is_finite() || denom.abs() <= cfg.eps_denominator {
        return Err(DegenerateError::VanishingDenominator {
            vertex,
            value: denom,
        });
    }
    let val = (c.cos() + a.cos() * central.cos()) / denom;
    if !val.is_finite() || val - 1.0 <= cfg.eps_radicand {
        return Err(DegenerateError::NegativeRadicand { vertex, value: val });
    }
    let d = val + (val * val - 1.0).sqrt();
    let radius = (d - 1.0) / (d + 1.0);
    if !radius.is_finite() {
        return Err(DegenerateError::NonFinite("vertex radius"));
    }
    Ok(radius)
}

/// Place all vertices from target angles and solved splits.
pub fn build_polygon(angles: &AngleSequence, split: &AngleSplit, cfg: &ShapeCfg) -> Result<Polygon> {
    let n = angles.len();
    let central = angles.central_angle();
    let mut vertices = Vec::with_capacity(n + CLOSURE);
    for i in 0..n {
        let next = angles.next(i);
        let a = split[i];
        let c = angles[next] - split[next];
        let r = vertex_radius(i, a, central, c, cfg)?;
        if r >= 1.0 {
            return Err(DegenerateError::OutsideDisk {
                vertex: i,
                radius: r,
            }
            .into());
        }
        let phi = TAU * i as f64 / n as f64;
        vertices.push(Vector2::new(r * phi.cos(), r * phi.sin()));
    }
    Ok(Polygon::from_ring(vertices))
}

/// Closed-form circumradius of the regular `p`-gon with interior angle `2π/q`:
/// `√((cot(π/q) − tan(π/p)) / (cot(π/q) + tan(π/p)))`.
///
/// Gated by the same feasibility check as the general path.
pub fn regular_radius(p: usize, q: u32) -> Result<f64> {
    let angles = AngleSequence::new(vec![TAU / f64::from(q); p]);
    check_feasible(&angles, SolverCfg::default().feasibility_margin)?;
    let t1 = (FRAC_PI_2 - PI / f64::from(q)).tan();
    let t2 = (PI / p as f64).tan();
    let r = ((t1 - t2) / (t1 + t2)).sqrt();
    if !r.is_finite() {
        return Err(DegenerateError::NonFinite("regular radius").into());
    }
    Ok(r)
}

/// Regular `p`-gon of circumradius `r`, first vertex on the positive x-axis.
pub fn regular_polygon(p: usize, r: f64) -> Polygon {
    let vertices = (0..p)
        .map(|i| {
            let phi = TAU * i as f64 / p as f64;
            Vector2::new(r * phi.cos(), r * phi.sin())
        })
        .collect();
    Polygon::from_ring(vertices)
}
