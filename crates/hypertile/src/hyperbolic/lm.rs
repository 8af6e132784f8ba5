//! Levenberg–Marquardt for small square nonlinear systems.
//!
//! Minimises ½‖r(x)‖² with Marquardt's diagonal scaling: each step solves
//! `(JᵀJ + λ·diag(JᵀJ)) δ = −Jᵀr` by Cholesky, accepts it if the cost drops
//! (λ ← λ/factor) and otherwise retries with λ ← λ·factor.

use nalgebra::{DMatrix, DVector};

use super::cfg::SolverCfg;
use crate::error::SolveError;

/// A residual vector `r: Rⁿ → Rᵐ` with an optional analytic Jacobian.
pub trait Residuals {
    /// Number of unknowns.
    fn dim(&self) -> usize;

    fn residuals(&self, x: &DVector<f64>) -> DVector<f64>;

    /// Central finite differences unless overridden.
    fn jacobian(&self, x: &DVector<f64>) -> DMatrix<f64> {
        let h = 1e-7;
        let r0 = self.residuals(x);
        let mut j = DMatrix::zeros(r0.len(), self.dim());
        let mut xp = x.clone();
        for col in 0..self.dim() {
            let orig = xp[col];
            xp[col] = orig + h;
            let plus = self.residuals(&xp);
            xp[col] = orig - h;
            let minus = self.residuals(&xp);
            xp[col] = orig;
            j.set_column(col, &((plus - minus) / (2.0 * h)));
        }
        j
    }
}

/// Outcome of a converged run.
#[derive(Clone, Debug, PartialEq)]
pub struct SolveReport {
    pub x: DVector<f64>,
    pub iterations: usize,
    pub residual_norm: f64,
}

/// Run LM from `x0`.
///
/// Post: `Ok` only if the final residual norm is within `cfg.accept_tol`.
pub fn levenberg_marquardt<R: Residuals + ?Sized>(
    system: &R,
    x0: DVector<f64>,
    cfg: &SolverCfg,
) -> Result<SolveReport, SolveError> {
    let mut x = x0;
    let mut r = system.residuals(&x);
    if !r.iter().all(|v| v.is_finite()) {
        return Err(SolveError::NonFinite { iteration: 0 });
    }
    let mut cost = r.norm_squared();
    let mut lambda = cfg.lambda_init;
    let mut iterations = 0;

    while iterations < cfg.max_iterations {
        if cost.sqrt() <= cfg.residual_tol {
            break;
        }
        iterations += 1;

        let j = system.jacobian(&x);
        let jt = j.transpose();
        let jtj = &jt * &j;
        let neg_grad = -(&jt * &r);

        let mut accepted = None;
        while lambda <= cfg.lambda_max {
            let mut damped = jtj.clone();
            for i in 0..damped.nrows() {
                damped[(i, i)] += lambda * jtj[(i, i)].max(1e-12);
            }
            let Some(chol) = damped.cholesky() else {
                lambda *= cfg.lambda_factor;
                continue;
            };
            let step = chol.solve(&neg_grad);
            let candidate = &x + &step;
            let r_new = system.residuals(&candidate);
            let cost_new = r_new.norm_squared();
            if cost_new.is_finite() && cost_new < cost {
                lambda = (lambda / cfg.lambda_factor).max(1e-15);
                accepted = Some((candidate, r_new, cost_new, step.norm()));
                break;
            }
            lambda *= cfg.lambda_factor;
            tracing::trace!(iteration = iterations, lambda, "lm_step_rejected");
        }

        let Some((candidate, r_new, cost_new, step_norm)) = accepted else {
            // damping exhausted: no descent direction left
            break;
        };
        let x_norm = candidate.norm();
        x = candidate;
        r = r_new;
        cost = cost_new;
        if step_norm <= cfg.step_tol * (x_norm + cfg.step_tol) {
            break;
        }
    }

    let residual_norm = cost.sqrt();
    if !residual_norm.is_finite() {
        return Err(SolveError::NonFinite {
            iteration: iterations,
        });
    }
    if residual_norm > cfg.accept_tol {
        return Err(SolveError::NoConvergence {
            iterations,
            residual: residual_norm,
        });
    }
    Ok(SolveReport {
        x,
        iterations,
        residual_norm,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// x² − 2 = 0, y − x = 0
    struct Sqrt2;
    impl Residuals for Sqrt2 {
        fn dim(&self) -> usize {
            2
        }
        fn residuals(&self, x: &DVector<f64>) -> DVector<f64> {
            DVector::from_vec(vec![x[0] * x[0] - 2.0, x[1] - x[0]])
        }
    }

    /// x² + 1 = 0 has no real root.
    struct NoRoot;
    impl Residuals for NoRoot {
        fn dim(&self) -> usize {
            1
        }
        fn residuals(&self, x: &DVector<f64>) -> DVector<f64> {
            DVector::from_vec(vec![x[0] * x[0] + 1.0])
        }
    }

    #[test]
    fn finds_root_with_numeric_jacobian() {
        let rep = levenberg_marquardt(
            &Sqrt2,
            DVector::from_vec(vec![1.0, 0.0]),
            &SolverCfg::default(),
        )
        .unwrap();
        assert!((rep.x[0] - 2.0_f64.sqrt()).abs() < 1e-9);
        assert!((rep.x[1] - 2.0_f64.sqrt()).abs() < 1e-9);
        assert!(rep.iterations > 0);
    }

    #[test]
    fn exact_start_takes_no_iterations() {
        let s = 2.0_f64.sqrt();
        let rep =
            levenberg_marquardt(&Sqrt2, DVector::from_vec(vec![s, s]), &SolverCfg::default())
                .unwrap();
        assert_eq!(rep.iterations, 0);
    }

    #[test]
    fn reports_divergence_without_root() {
        let err = levenberg_marquardt(&NoRoot, DVector::from_vec(vec![0.7]), &SolverCfg::default())
            .unwrap_err();
        assert!(matches!(err, SolveError::NoConvergence { .. }));
    }

    #[test]
    fn iteration_budget_is_respected() {
        let cfg = SolverCfg {
            max_iterations: 1,
            ..SolverCfg::default()
        };
        let err = levenberg_marquardt(&Sqrt2, DVector::from_vec(vec![10.0, -10.0]), &cfg)
            .unwrap_err();
        assert!(matches!(
            err,
            SolveError::NoConvergence { iterations: 1, .. }
        ));
    }
}
