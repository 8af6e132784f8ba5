use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hypertile::hyperbolic::{
    build_shape, parse_signature, regular_radius, ReflectionGroupSignature,
};
use hypertile::{ShapeCfg, SolverCfg};
use std::path::Path;
use tracing_subscriber::fmt::SubscriberBuilder;

mod payload;
mod provenance;

use payload::RenderPayload;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Fundamental domains of hyperbolic reflection tilings")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Solve a signature and emit the renderer payload as JSON
    Shape {
        /// Comma-separated mirror counts, e.g. "4,6,4,6"
        #[arg(long)]
        signature: String,
        /// Write the payload (plus a provenance sidecar) here instead of stdout
        #[arg(long)]
        out: Option<String>,
        #[arg(long, default_value_t = SolverCfg::default().max_iterations)]
        max_iterations: usize,
        /// Residual norm accepted as converged
        #[arg(long, default_value_t = SolverCfg::default().accept_tol)]
        accept_tol: f64,
    },
    /// Compare the closed-form regular radius with the solver path
    Regular {
        #[arg(long)]
        p: usize,
        #[arg(long)]
        q: u32,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Shape {
            signature,
            out,
            max_iterations,
            accept_tol,
        } => {
            let cfg = ShapeCfg {
                solver: SolverCfg {
                    max_iterations,
                    accept_tol,
                    ..SolverCfg::default()
                },
                ..ShapeCfg::default()
            };
            shape(&signature, out, &cfg)
        }
        Action::Regular { p, q } => regular(p, q),
        Action::Report => report(),
    }
}

fn shape(text: &str, out: Option<String>, cfg: &ShapeCfg) -> Result<()> {
    tracing::info!(signature = text, out = ?out, "shape");
    let signature = parse_signature(text).with_context(|| format!("signature {text:?}"))?;
    let shape = build_shape(&signature, cfg)
        .with_context(|| format!("building shape for {signature}"))?;
    let payload = RenderPayload::from_shape(&signature.to_string(), &shape);
    let json = serde_json::to_string_pretty(&payload)?;

    let Some(out) = out else {
        println!("{json}");
        return Ok(());
    };
    let out_path = Path::new(&out);
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(out_path, &json).with_context(|| format!("writing {out}"))?;
    let sidecar = provenance::Sidecar::new(out_path, &signature, &shape, &cfg.solver);
    let sidecar = provenance::write_sidecar(out_path, &sidecar)?;
    tracing::info!(
        p = payload.p,
        iterations = payload.solver.iterations,
        sidecar = %sidecar.display(),
        "shape_written"
    );
    Ok(())
}

fn regular(p: usize, q: u32) -> Result<()> {
    tracing::info!(p, q, "regular");
    let closed_form = regular_radius(p, q).with_context(|| format!("closed form {{{p},{q}}}"))?;
    let signature = ReflectionGroupSignature::regular(p, q)?;
    let shape = build_shape(&signature, &ShapeCfg::default())?;
    let solved = shape
        .polygon
        .vertices()
        .iter()
        .map(|v| v.norm())
        .fold(0.0, f64::max);
    let obj = serde_json::json!({
        "p": p,
        "q": q,
        "closed_form_radius": closed_form,
        "solver_radius": solved,
        "difference": (closed_form - solved).abs(),
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

fn report() -> Result<()> {
    let obj = serde_json::json!({
        "code_rev": provenance::code_rev(),
        "hypertile": hypertile::VERSION,
        "defaults": provenance::SolverSettings::from(&SolverCfg::default()),
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
