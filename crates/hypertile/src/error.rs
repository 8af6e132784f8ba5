//! Error taxonomy for shape construction.
//!
//! All four categories are recoverable at the factory boundary; callers keep
//! their last good shape and decide whether to surface the message.

use thiserror::Error;

/// Top-level error for the hypertile core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HypertileError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    InfeasibleGeometry(#[from] InfeasibleError),

    #[error(transparent)]
    SolverDivergence(#[from] SolveError),

    #[error(transparent)]
    DegenerateComputation(#[from] DegenerateError),
}

impl HypertileError {
    /// Stable category name, used as a structured logging field.
    pub fn kind(&self) -> &'static str {
        match self {
            HypertileError::Parse(_) => "parse",
            HypertileError::InfeasibleGeometry(_) => "infeasible_geometry",
            HypertileError::SolverDivergence(_) => "solver_divergence",
            HypertileError::DegenerateComputation(_) => "degenerate_computation",
        }
    }
}

/// Malformed signature text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("token {index} ({token:?}) is not an integer")]
    NotAnInteger { index: usize, token: String },

    #[error("entry {index} = {value} must be a positive integer")]
    NonPositive { index: usize, value: i64 },

    #[error("entry {index} = {value} does not fit a mirror count")]
    OutOfRange { index: usize, value: i64 },
}

/// Angle data that cannot close into a hyperbolic polygon.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InfeasibleError {
    #[error("angle sum {sum} must be below {bound} for a hyperbolic {sides}-gon")]
    AngleSum { sides: usize, sum: f64, bound: f64 },

    #[error("angle {index} = {angle} lies outside (0, π)")]
    InvalidAngle { index: usize, angle: f64 },
}

/// Nonlinear solve failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    #[error("no convergence after {iterations} iterations (residual norm {residual:e})")]
    NoConvergence { iterations: usize, residual: f64 },

    #[error("non-finite residual at iteration {iteration}")]
    NonFinite { iteration: usize },

    #[error("split {index} = {value} lies outside (0, {angle})")]
    SplitOutOfRange { index: usize, value: f64, angle: f64 },
}

/// NaN, division by zero or an ill-posed construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DegenerateError {
    #[error("points are collinear (determinant {det:e})")]
    Collinear { det: f64 },

    #[error("inversion radius {radius} must be positive")]
    NonPositiveRadius { radius: f64 },

    #[error("point coincides with the inversion center")]
    AtInversionCenter,

    #[error("triangle has zero perimeter")]
    ZeroPerimeter,

    #[error("vertex {vertex}: cosh argument {value} has no real distance")]
    NegativeRadicand { vertex: usize, value: f64 },

    #[error("vertex {vertex}: vanishing denominator sin(A)·sin(I) = {value:e}")]
    VanishingDenominator { vertex: usize, value: f64 },

    #[error("vertex {vertex} at radius {radius} is not inside the unit disk")]
    OutsideDisk { vertex: usize, radius: f64 },

    #[error("non-finite value in {0}")]
    NonFinite(&'static str),
}

/// Convenience type alias for results using [`HypertileError`].
pub type Result<T> = std::result::Result<T, HypertileError>;
