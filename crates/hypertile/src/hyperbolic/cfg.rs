//! Solver and geometry tolerances.
//!
//! Passed explicitly into every build; nothing here is global state.

/// Levenberg–Marquardt budget and tolerances.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolverCfg {
    pub max_iterations: usize,
    /// Stop as soon as ‖r‖ drops below this.
    pub residual_tol: f64,
    /// Stop when ‖δ‖ ≤ step_tol · (‖x‖ + step_tol).
    pub step_tol: f64,
    /// A stopped run counts as converged only if ‖r‖ ≤ accept_tol.
    pub accept_tol: f64,
    pub lambda_init: f64,
    pub lambda_factor: f64,
    pub lambda_max: f64,
    /// Reject `Σ angle ≥ π(n−2) − feasibility_margin`.
    pub feasibility_margin: f64,
}

impl Default for SolverCfg {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            residual_tol: 1e-12,
            step_tol: 1e-15,
            accept_tol: 1e-9,
            lambda_init: 1e-3,
            lambda_factor: 10.0,
            lambda_max: 1e12,
            feasibility_margin: 1e-12,
        }
    }
}

/// Configuration for one shape build.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeCfg {
    pub solver: SolverCfg,
    /// Relative determinant threshold for collinear triples.
    pub eps_det: f64,
    /// Minimum |sin A · sin I| in the vertex-distance formula.
    pub eps_denominator: f64,
    /// Minimum `val − 1` before the square root.
    pub eps_radicand: f64,
}

impl Default for ShapeCfg {
    fn default() -> Self {
        Self {
            solver: SolverCfg::default(),
            eps_det: 1e-12,
            eps_denominator: 1e-12,
            eps_radicand: 1e-12,
        }
    }
}
