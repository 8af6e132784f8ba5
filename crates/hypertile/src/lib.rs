//! Fundamental domains of hyperbolic reflection tilings.
//!
//! Pipeline (leaf-first):
//! - `planar`: Euclidean circle constructions (circumcircle, inversion,
//!   incentre-based centroid estimate, bounding radius, geodesic arcs).
//! - `hyperbolic`: signature → target angles → solved angle splits →
//!   Poincaré-disk vertices → edge arcs, centroid and radius.
//! - `session`: generation-tagged background recomputation for interactive
//!   callers (latest request wins, stale results are dropped).
//!
//! Every build is a pure function of its signature and `ShapeCfg`; nothing is
//! cached between calls.

pub mod api;
pub mod error;
pub mod hyperbolic;
pub mod planar;
pub mod session;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{HypertileError, Result};
pub use hyperbolic::{ShapeCfg, SolverCfg};
pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::error::{
        DegenerateError, HypertileError, InfeasibleError, ParseError, Result, SolveError,
    };
    pub use crate::hyperbolic::{
        build_shape, regular_radius, shape_from_angles, shape_from_text, AngleSequence,
        AngleSplit, Polygon, ReflectionGroupSignature, Shape, ShapeCfg, SolveReport, SolverCfg,
    };
    pub use crate::planar::{edge_buffer, Circle};
    pub use crate::session::{ShapeSession, Ticket, Update};
    pub use nalgebra::Vector2 as Vec2;
}
