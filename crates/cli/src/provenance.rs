//! `<payload>.provenance.json` sidecars: which code, signature and solver
//! settings produced a written shape.

use anyhow::{Context, Result};
use hypertile::hyperbolic::{ReflectionGroupSignature, Shape};
use hypertile::SolverCfg;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::payload::SolverSummary;

/// Solver budget the shape was built with.
#[derive(Debug, Serialize)]
pub struct SolverSettings {
    pub max_iterations: usize,
    pub residual_tol: f64,
    pub accept_tol: f64,
    pub feasibility_margin: f64,
}

impl From<&SolverCfg> for SolverSettings {
    fn from(cfg: &SolverCfg) -> Self {
        Self {
            max_iterations: cfg.max_iterations,
            residual_tol: cfg.residual_tol,
            accept_tol: cfg.accept_tol,
            feasibility_margin: cfg.feasibility_margin,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Sidecar {
    pub code_rev: String,
    pub hypertile: &'static str,
    pub signature: String,
    pub p: usize,
    pub settings: SolverSettings,
    pub solver: SolverSummary,
    pub output: String,
}

impl Sidecar {
    pub fn new(
        output: &Path,
        signature: &ReflectionGroupSignature,
        shape: &Shape,
        cfg: &SolverCfg,
    ) -> Self {
        Self {
            code_rev: code_rev(),
            hypertile: hypertile::VERSION,
            signature: signature.to_string(),
            p: shape.vertex_count(),
            settings: cfg.into(),
            solver: SolverSummary::from(&shape.report),
            output: output.to_string_lossy().into_owned(),
        }
    }
}

/// `shape.json` → `shape.provenance.json`, next to the payload.
pub fn sidecar_path(output: &Path) -> PathBuf {
    output.with_extension("provenance.json")
}

/// Write the sidecar for `output` and return its path.
pub fn write_sidecar(output: &Path, sidecar: &Sidecar) -> Result<PathBuf> {
    let path = sidecar_path(output);
    fs::write(&path, serde_json::to_vec_pretty(sidecar)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

/// Commit from `GIT_COMMIT` (build time, then run time), else `git`, else "unknown".
pub fn code_rev() -> String {
    option_env!("GIT_COMMIT")
        .map(str::to_string)
        .or_else(|| std::env::var("GIT_COMMIT").ok())
        .filter(|rev| !rev.is_empty())
        .or_else(git_head)
        .unwrap_or_else(|| "unknown".to_string())
}

fn git_head() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let rev = String::from_utf8(output.stdout).ok()?;
    Some(rev.trim().to_string())
}
