//! Side constraints: one residual per vertex, in the unknown angle splits.
//!
//! For vertex `i` with `next = i+1`, `prev = i−1` (cyclic) and central angle
//! `I = 2π/n`:
//!
//! ```text
//! r_i(x) = cos(α_next − x_next)·sin(α_i − x_i) − cos(x_prev)·sin(x_i)
//!          − sin(2x_i − α_i)·cos I
//! ```
//!
//! A root of all `n` residuals lets the `n` triangles fanned around the origin
//! (apex angle `I`) share their sides consistently.

use nalgebra::{DMatrix, DVector};

use super::lm::Residuals;
use super::signature::AngleSequence;

/// Residual of one vertex, with its neighbour indices and angles captured.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SideConstraint {
    pub vertex: usize,
    pub next: usize,
    pub prev: usize,
    angle: f64,
    angle_next: f64,
    cos_central: f64,
}

impl SideConstraint {
    pub fn new(vertex: usize, angles: &AngleSequence) -> Self {
        let next = angles.next(vertex);
        Self {
            vertex,
            next,
            prev: angles.prev(vertex),
            angle: angles[vertex],
            angle_next: angles[next],
            cos_central: angles.central_angle().cos(),
        }
    }

    /// `r_i(x)`.
    #[inline]
    pub fn eval(&self, x: &[f64]) -> f64 {
        let xi = x[self.vertex];
        let xn = x[self.next];
        let xp = x[self.prev];
        (self.angle_next - xn).cos() * (self.angle - xi).sin()
            - xp.cos() * xi.sin()
            - (2.0 * xi - self.angle).sin() * self.cos_central
    }

    /// Non-zero partials `(column, ∂r_i/∂x_column)`. Columns may repeat for
    /// `n < 3`; callers accumulate.
    #[inline]
    pub fn gradient(&self, x: &[f64]) -> [(usize, f64); 3] {
        let xi = x[self.vertex];
        let xn = x[self.next];
        let xp = x[self.prev];
        let d_vertex = -(self.angle_next - xn).cos() * (self.angle - xi).cos()
            - xp.cos() * xi.cos()
            - 2.0 * (2.0 * xi - self.angle).cos() * self.cos_central;
        let d_next = (self.angle_next - xn).sin() * (self.angle - xi).sin();
        let d_prev = xp.sin() * xi.sin();
        [
            (self.vertex, d_vertex),
            (self.next, d_next),
            (self.prev, d_prev),
        ]
    }
}

/// The square system `{r_i}` for an angle sequence.
#[derive(Clone, Debug)]
pub struct SideConstraintSystem {
    sides: Vec<SideConstraint>,
}

impl SideConstraintSystem {
    pub fn new(angles: &AngleSequence) -> Self {
        Self {
            sides: (0..angles.len())
                .map(|i| SideConstraint::new(i, angles))
                .collect(),
        }
    }
    #[inline]
    pub fn sides(&self) -> &[SideConstraint] {
        &self.sides
    }
}

impl Residuals for SideConstraintSystem {
    fn dim(&self) -> usize {
        self.sides.len()
    }

    fn residuals(&self, x: &DVector<f64>) -> DVector<f64> {
        let xs = x.as_slice();
        DVector::from_iterator(self.sides.len(), self.sides.iter().map(|s| s.eval(xs)))
    }

    fn jacobian(&self, x: &DVector<f64>) -> DMatrix<f64> {
        let xs = x.as_slice();
        let n = self.sides.len();
        let mut j = DMatrix::zeros(n, n);
        for (row, side) in self.sides.iter().enumerate() {
            for (col, d) in side.gradient(xs) {
                j[(row, col)] += d;
            }
        }
        j
    }
}
