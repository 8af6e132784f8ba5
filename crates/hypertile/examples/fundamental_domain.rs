//! Print the fundamental domain of a tiling for quick visual sanity.
//!
//! Usage:
//!   cargo run -p hypertile --example fundamental_domain -- "4,6,4,6"
//!
//! Prints vertices, solved splits, edge circles, centroid and radius, then the
//! closed-form radius when the signature is regular.

use hypertile::prelude::*;
use std::process::ExitCode;

fn main() -> ExitCode {
    let text = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "4,6,4,6".to_string());
    let cfg = ShapeCfg::default();
    let shape = match shape_from_text(&text, &cfg) {
        Ok(shape) => shape,
        Err(e) => {
            eprintln!("{text}: {} ({})", e, e.kind());
            return ExitCode::FAILURE;
        }
    };

    println!(
        "signature {text}: p={} solved in {} iterations (|r|={:.2e})",
        shape.vertex_count(),
        shape.report.iterations,
        shape.report.residual_norm
    );
    for (i, v) in shape.polygon.vertices().iter().enumerate() {
        println!(
            "  v{i}: ({:+.6}, {:+.6})  |v|={:.6}  split={:.6}",
            v.x,
            v.y,
            v.norm(),
            shape.split[i]
        );
    }
    for (i, e) in shape.edges.iter().enumerate() {
        println!(
            "  e{i}: center ({:+.6}, {:+.6}) radius {:.6}",
            e.center.x, e.center.y, e.radius
        );
    }
    println!(
        "  centroid ({:+.6}, {:+.6}) radius {:.6}",
        shape.centroid.x, shape.centroid.y, shape.radius
    );

    if let Ok(sig) = text.parse::<ReflectionGroupSignature>() {
        let q = sig.entries()[0];
        if sig.entries().iter().all(|&e| e == q) {
            match regular_radius(sig.len(), q) {
                Ok(r) => println!("  closed form {{{},{q}}}: radius {r:.6}", sig.len()),
                Err(e) => println!("  closed form unavailable: {e}"),
            }
        }
    }
    ExitCode::SUCCESS
}
