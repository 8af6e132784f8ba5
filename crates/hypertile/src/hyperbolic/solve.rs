//! Angle-difference solve: feasibility gate, initial guess, LM, range check.

use std::f64::consts::PI;

use nalgebra::DVector;

use super::cfg::SolverCfg;
use super::lm::{levenberg_marquardt, SolveReport};
use super::signature::AngleSequence;
use super::system::SideConstraintSystem;
use crate::error::{InfeasibleError, Result, SolveError};

/// Solved split `x_i ∈ (0, α_i)` of each target angle.
#[derive(Clone, Debug, PartialEq)]
pub struct AngleSplit(Vec<f64>);

impl AngleSplit {
    pub(crate) fn new(values: Vec<f64>) -> Self {
        Self(values)
    }
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl std::ops::Index<usize> for AngleSplit {
    type Output = f64;
    #[inline]
    fn index(&self, i: usize) -> &f64 {
        &self.0[i]
    }
}

/// A split together with the solver run that produced it.
#[derive(Clone, Debug, PartialEq)]
pub struct Solved {
    pub split: AngleSplit,
    pub report: SolveReport,
}

/// Hyperbolic existence condition `Σ α < π(n−2)` (necessary, not sufficient),
/// plus every target angle in `(0, π)`; entries `q ≤ 2` give straight or
/// reflex vertices and are rejected here.
///
/// `margin` widens the rejected band so that sums equal to the bound up to
/// rounding (e.g. `{4,4,4,4}`) are rejected.
pub fn check_feasible(angles: &AngleSequence, margin: f64) -> std::result::Result<(), InfeasibleError> {
    if let Some((index, &angle)) = angles
        .as_slice()
        .iter()
        .enumerate()
        .find(|(_, a)| !(a.is_finite() && **a > 0.0 && **a < PI))
    {
        return Err(InfeasibleError::InvalidAngle { index, angle });
    }
    let sides = angles.len();
    let sum = angles.sum();
    let bound = PI * (sides as f64 - 2.0);
    if sum >= bound - margin {
        return Err(InfeasibleError::AngleSum { sides, sum, bound });
    }
    Ok(())
}

/// Even split `x0_i = α_i / 2`; exact for regular signatures.
pub fn initial_guess(angles: &AngleSequence) -> DVector<f64> {
    DVector::from_iterator(angles.len(), angles.as_slice().iter().map(|a| a / 2.0))
}

/// Every split component must lie strictly inside `(0, α_i)`.
fn check_split_range(x: &DVector<f64>, angles: &AngleSequence) -> std::result::Result<(), SolveError> {
    for (index, (&value, &angle)) in x.iter().zip(angles.as_slice()).enumerate() {
        if !(value > 0.0 && value < angle) {
            return Err(SolveError::SplitOutOfRange {
                index,
                value,
                angle,
            });
        }
    }
    Ok(())
}

/// Solve the side-constraint system for the angle splits.
///
/// Errors: `InfeasibleGeometry` before any numerics run; `SolverDivergence`
/// when LM stalls or lands outside `(0, α_i)`.
pub fn solve_angle_splits(angles: &AngleSequence, cfg: &SolverCfg) -> Result<Solved> {
    check_feasible(angles, cfg.feasibility_margin)?;
    let system = SideConstraintSystem::new(angles);
    let report = levenberg_marquardt(&system, initial_guess(angles), cfg)?;
    tracing::debug!(
        sides = angles.len(),
        iterations = report.iterations,
        residual = report.residual_norm,
        "angle_splits_solved"
    );

    check_split_range(&report.x, angles)?;
    Ok(Solved {
        split: AngleSplit::new(report.x.iter().copied().collect()),
        report,
    })
}
