use super::*;
use crate::error::{DegenerateError, HypertileError, InfeasibleError, SolveError};
use nalgebra::DVector;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::f64::consts::{PI, TAU};

fn sig(entries: &[u32]) -> ReflectionGroupSignature {
    ReflectionGroupSignature::new(entries.to_vec()).unwrap()
}

fn is_feasible(entries: &[u32]) -> bool {
    check_feasible(&sig(entries).angles(), SolverCfg::default().feasibility_margin).is_ok()
}

#[test]
fn regular_pentagon_family_splits_evenly() {
    let cfg = ShapeCfg::default();
    let shape = build_shape(&sig(&[5, 5, 5, 5, 5]), &cfg).unwrap();
    assert_eq!(shape.vertex_count(), 5);
    for &x in shape.split.as_slice() {
        assert!((x - PI / 5.0).abs() < 1e-12);
    }
    let r0 = shape.polygon.vertices()[0].norm();
    for v in shape.polygon.vertices() {
        assert!((v.norm() - r0).abs() < 1e-12);
    }
}

#[test]
fn solver_path_agrees_with_closed_form_regular_radius() {
    let cfg = ShapeCfg::default();
    for (p, q) in [(5usize, 5u32), (4, 6), (6, 4), (7, 3), (3, 7), (8, 8), (5, 4)] {
        let shape = build_shape(&ReflectionGroupSignature::regular(p, q).unwrap(), &cfg).unwrap();
        let expected = regular_radius(p, q).unwrap();
        for v in shape.polygon.vertices() {
            assert!(
                (v.norm() - expected).abs() < 1e-10,
                "{{{p},{q}}}: {} vs {expected}",
                v.norm()
            );
        }
        // centroid of a regular polygon is the origin
        assert!(shape.centroid.norm() < 1e-10);
        assert!((shape.radius - expected).abs() < 1e-10);
    }
}

#[test]
fn square_of_right_angles_is_euclidean_and_rejected() {
    let err = build_shape(&sig(&[4, 4, 4, 4]), &ShapeCfg::default()).unwrap_err();
    match err {
        HypertileError::InfeasibleGeometry(InfeasibleError::AngleSum { sides, sum, bound }) => {
            assert_eq!(sides, 4);
            assert!((sum - TAU).abs() < 1e-12);
            assert!((bound - TAU).abs() < 1e-12);
        }
        other => panic!("expected infeasible geometry, got {other:?}"),
    }
}

#[test]
fn too_few_sides_and_flat_triangles_are_rejected() {
    let cfg = ShapeCfg::default();
    let cases: [&[u32]; 6] = [&[3, 3], &[2, 2, 2], &[3, 3, 3], &[4, 4, 4], &[6, 6, 6], &[5]];
    for entries in cases {
        let err = build_shape(&sig(entries), &cfg).unwrap_err();
        assert_eq!(err.kind(), "infeasible_geometry", "{entries:?}");
    }
    let empty = AngleSequence::new(Vec::new());
    assert!(check_feasible(&empty, 0.0).is_err());
}

#[test]
fn invalid_raw_angles_are_rejected() {
    let angles = AngleSequence::new(vec![0.5, f64::NAN, 0.5, 0.5]);
    assert!(matches!(
        check_feasible(&angles, 0.0),
        Err(InfeasibleError::InvalidAngle { index: 1, .. })
    ));
    let angles = AngleSequence::new(vec![0.5, 0.5, -0.1, 0.5]);
    assert!(matches!(
        check_feasible(&angles, 0.0),
        Err(InfeasibleError::InvalidAngle { index: 2, .. })
    ));
}

#[test]
fn irregular_signature_converges_inside_disk() {
    let cfg = ShapeCfg::default();
    let shape = build_shape(&sig(&[3, 4, 5, 6, 7]), &cfg).unwrap();
    assert!(shape.report.residual_norm <= cfg.solver.accept_tol);
    assert!(shape.report.iterations > 0);
    for (i, &x) in shape.split.as_slice().iter().enumerate() {
        assert!(x > 0.0 && x < shape.angles[i]);
    }
    for v in shape.polygon.vertices() {
        assert!(v.norm() < 1.0);
    }
    // every vertex i sits on its own ray
    for (i, v) in shape.polygon.vertices().iter().enumerate() {
        let phi = TAU * i as f64 / 5.0;
        assert!((v.y.atan2(v.x).rem_euclid(TAU) - phi).abs() < 1e-9);
    }
}

#[test]
fn residuals_vanish_at_solution() {
    let angles = sig(&[3, 8, 3, 8, 3]).angles();
    let solved = solve_angle_splits(&angles, &SolverCfg::default()).unwrap();
    let sys = SideConstraintSystem::new(&angles);
    let x = DVector::from_column_slice(solved.split.as_slice());
    assert!(sys.residuals(&x).amax() < 1e-9);
}

#[test]
fn starved_solver_reports_divergence() {
    let cfg = ShapeCfg {
        solver: SolverCfg {
            max_iterations: 0,
            ..SolverCfg::default()
        },
        ..ShapeCfg::default()
    };
    // the even split is not a root for irregular signatures
    let err = build_shape(&sig(&[3, 4, 5, 6, 7]), &cfg).unwrap_err();
    assert!(matches!(
        err,
        HypertileError::SolverDivergence(SolveError::NoConvergence { iterations: 0, .. })
    ));
}

#[test]
fn edges_centroid_and_buffer_for_renderer() {
    let shape = shape_from_text("4,6,4,6", &ShapeCfg::default()).unwrap();
    assert_eq!(shape.edges.len(), 4);
    let buf = shape.edge_buffer();
    assert_eq!(buf.len(), 12);
    assert!(buf.iter().all(|v| v.is_finite()));
    for ((a, b), arc) in shape.polygon.edges().zip(&shape.edges) {
        assert!(arc.signed_distance(a).abs() < 1e-9);
        assert!(arc.signed_distance(b).abs() < 1e-9);
        // geodesics meet the boundary at right angles
        assert!((arc.center.norm_squared() - 1.0 - arc.radius * arc.radius).abs() < 1e-8);
    }
    for v in shape.polygon.vertices() {
        assert!((v - shape.centroid).norm() <= shape.radius + 1e-12);
    }
}

#[test]
fn text_errors_are_parse_errors() {
    let err = shape_from_text("4,six,4", &ShapeCfg::default()).unwrap_err();
    assert_eq!(err.kind(), "parse");
}

#[test]
fn seeded_random_signatures_build_valid_shapes() {
    let mut rng = StdRng::seed_from_u64(7);
    let cfg = ShapeCfg::default();
    let mut built = 0;
    for _ in 0..200 {
        let p = rng.gen_range(3..=8);
        let entries: Vec<u32> = (0..p).map(|_| rng.gen_range(3..=12)).collect();
        if !is_feasible(&entries) {
            continue;
        }
        let shape = build_shape(&sig(&entries), &cfg)
            .unwrap_or_else(|e| panic!("{entries:?}: {e}"));
        assert_eq!(shape.polygon.len(), p);
        assert_eq!(shape.polygon.closed().len(), p + 2);
        assert_eq!(shape.edge_buffer().len(), 3 * p);
        for v in shape.polygon.vertices() {
            assert!(v.x.is_finite() && v.y.is_finite());
            assert!(v.norm() < 1.0);
        }
        built += 1;
    }
    assert!(built > 100);
}

#[test]
fn inputs_are_not_mutated() {
    let angles = sig(&[3, 12, 12, 3]).angles();
    let before = angles.clone();
    let _ = solve_angle_splits(&angles, &SolverCfg::default()).unwrap();
    assert_eq!(angles, before);
}

#[test]
fn mirror_counts_below_three_are_invalid_angles() {
    let cfg = ShapeCfg::default();
    // a straight angle at vertex 0 with an otherwise comfortable angle sum
    let err = build_shape(&sig(&[2, 5, 5, 5, 5, 5]), &cfg).unwrap_err();
    match err {
        HypertileError::InfeasibleGeometry(InfeasibleError::InvalidAngle { index, angle }) => {
            assert_eq!(index, 0);
            assert!((angle - PI).abs() < 1e-15);
        }
        other => panic!("expected invalid angle, got {other:?}"),
    }

    let mut entries = vec![1u32];
    entries.extend(std::iter::repeat(7).take(20));
    let err = build_shape(&sig(&entries), &cfg).unwrap_err();
    assert!(matches!(
        err,
        HypertileError::InfeasibleGeometry(InfeasibleError::InvalidAngle { index: 0, .. })
    ));

    assert_eq!(
        build_shape(&sig(&[2, 2, 2]), &cfg).unwrap_err().kind(),
        "infeasible_geometry"
    );
    assert!(regular_radius(5, 2).is_err());
}

#[test]
fn vertex_pushed_onto_boundary_is_outside_disk() {
    let angles = sig(&[5, 5, 5, 5, 5]).angles();
    let mut values = vec![PI / 5.0; 5];
    // sin(A) ≈ 1e-20 sends cosh d to ~1e20, rounding the disk radius to 1.0
    values[0] = 1e-20;
    let split = AngleSplit::new(values);
    let cfg = ShapeCfg {
        eps_denominator: 0.0,
        ..ShapeCfg::default()
    };
    let err = build_polygon(&angles, &split, &cfg).unwrap_err();
    assert!(matches!(
        err,
        HypertileError::DegenerateComputation(DegenerateError::OutsideDisk { vertex: 0, .. })
    ));

    // with the default guard the same split is caught one step earlier
    let err = build_polygon(&angles, &split, &ShapeCfg::default()).unwrap_err();
    assert!(matches!(
        err,
        HypertileError::DegenerateComputation(DegenerateError::VanishingDenominator { vertex: 0, .. })
    ));
}
