// tests/cga_tests.rs
// Conformal model: null basis, up/down embedding, translators, objects.

use approx::assert_abs_diff_eq;
use ga_core::{build_layout, sandwich, Conformal, Error, ObjectKind};

const TOL: f64 = 1e-10;

fn cga3() -> Conformal {
    Conformal::new(&[1, 1, 1]).unwrap()
}

#[test]
fn conformalize_extends_the_signature_by_one_plus_one_minus() {
    let cga = cga3();
    assert_eq!(cga.layout().signature(), &[1, 1, 1, 1, -1]);
    assert_eq!(cga.base().signature(), &[1, 1, 1]);
    let ep2 = cga.ep().gp(cga.ep()).scalar_part();
    let en2 = cga.en().gp(cga.en()).scalar_part();
    assert!((ep2 - 1.0).abs() < TOL);
    assert!((en2 + 1.0).abs() < TOL);
}

#[test]
fn up_produces_null_points() {
    let cga = cga3();
    let x = cga.base().multivector(vec![0.0, 1.2, -0.5, 2.0, 0.0, 0.0, 0.0, 0.0]).unwrap();
    let p = cga.up(&x).unwrap();
    let p2 = p.gp(&p).scalar_part();
    assert!(p2.abs() < TOL, "up(x) must be null, got P·P = {p2}");
    // Weight against infinity is -1 for a unit-weight point.
    let w = p.ip(cga.einf()).scalar_part();
    assert!((w + 1.0).abs() < TOL);
}

#[test]
fn down_inverts_up() {
    let cga = cga3();
    let x = cga.base().multivector(vec![0.0, 0.7, -1.3, 0.4, 0.0, 0.0, 0.0, 0.0]).unwrap();
    let back = cga.down(&cga.up(&x).unwrap()).unwrap();
    assert_abs_diff_eq!(back, x, epsilon = TOL);

    // The origin embeds to e0 and comes back.
    let zero = cga.base().scalar(0.0).grade(1);
    let origin = cga.up(&zero).unwrap();
    assert_abs_diff_eq!(origin, cga.eo().clone(), epsilon = TOL);
    assert_abs_diff_eq!(cga.down(&origin).unwrap(), zero, epsilon = TOL);
}

#[test]
fn down_survives_unnormalised_weights() {
    let cga = cga3();
    let x = cga.base().multivector(vec![0.0, 1.0, 2.0, 3.0, 0.0, 0.0, 0.0, 0.0]).unwrap();
    let p = cga.up(&x).unwrap().scale(-4.5);
    assert_abs_diff_eq!(cga.down(&p).unwrap(), x, epsilon = TOL);
}

#[test]
fn down_rejects_infinity_and_non_null_points() {
    let cga = cga3();
    assert_eq!(cga.down(cga.einf()), Err(Error::PointAtInfinity));
    // A purely Euclidean vector has no e∞ weight either.
    let e1 = cga.layout().blade("e1").unwrap();
    assert_eq!(cga.down(&e1), Err(Error::PointAtInfinity));
    // e0 + e1 has weight 1 but squares to 1, not 0.
    let bad = cga.eo().add(&e1);
    assert!(matches!(cga.down(&bad), Err(Error::NonNullPoint(_))));
}

#[test]
fn up_rejects_non_vector_arguments() {
    let cga = cga3();
    let biv = cga.base().blade("e12").unwrap();
    assert!(matches!(cga.up(&biv), Err(Error::NotABlade { .. })));
    let conformal_dir = cga.layout().blade("e4").unwrap();
    assert!(matches!(cga.up(&conformal_dir), Err(Error::NotABlade { .. })));
}

#[test]
fn homo_normalises_the_infinity_weight() {
    let cga = cga3();
    let x = cga.base().multivector(vec![0.0, 2.0, 0.0, -1.0, 0.0, 0.0, 0.0, 0.0]).unwrap();
    let p = cga.up(&x).unwrap().scale(3.0);
    let h = cga.homo(&p).unwrap();
    let w = -h.ip(cga.einf()).scalar_part();
    assert!((w - 1.0).abs() < TOL);
}

#[test]
fn translator_moves_points_and_is_unit() {
    let cga = cga3();
    let t = cga.base().multivector(vec![0.0, 1.0, -2.0, 0.5, 0.0, 0.0, 0.0, 0.0]).unwrap();
    let x = cga.base().multivector(vec![0.0, 0.3, 0.4, -0.1, 0.0, 0.0, 0.0, 0.0]).unwrap();
    let tr = cga.translator(&t).unwrap();

    // T ~T = 1 (parabolic versor).
    let unit = tr.gp(&tr.reverse());
    assert_abs_diff_eq!(unit, cga.layout().scalar(1.0), epsilon = TOL);

    let moved = cga.down(&sandwich(&tr, &cga.up(&x).unwrap())).unwrap();
    assert_abs_diff_eq!(moved, x.add(&t), epsilon = TOL);
}

#[test]
fn conformal_rotation_agrees_with_the_base_algebra() {
    let cga = cga3();
    let base = build_layout(&[1, 1, 1]).unwrap();
    let theta = 0.8;
    let e1b = base.blade("e1").unwrap();
    let e2b = base.blade("e2").unwrap();
    let r_base = ga_core::generate_rotation_rotor(theta, &e1b, &e2b).unwrap();

    let x = base.multivector(vec![0.0, 1.0, 0.5, -0.7, 0.0, 0.0, 0.0, 0.0]).unwrap();
    let rotated_base = sandwich(&r_base, &x);

    let r_cga = cga.rotor(theta, &e1b, &e2b).unwrap();
    let rotated_cga = cga.down(&sandwich(&r_cga, &cga.up(&x).unwrap())).unwrap();
    assert_abs_diff_eq!(rotated_cga, rotated_base, epsilon = TOL);
}

#[test]
fn lines_are_flat_grade_three_objects() {
    let cga = cga3();
    let origin = cga.up(&cga.base().scalar(0.0).grade(1)).unwrap();
    let through = cga
        .up(&cga.base().multivector(vec![0.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0]).unwrap())
        .unwrap();
    let line = origin.op(&through).op(cga.einf());

    assert_eq!(line.grades(1e-9), vec![3]);
    assert_eq!(ObjectKind::Line.expected_grade(), 3);
    assert!(ObjectKind::Line.is_flat());
    // Flat objects absorb infinity.
    assert!(line.op(cga.einf()).max_abs() < TOL);
    // A normalised line squares to +1.
    let unit = line.normal().unwrap();
    let sq = unit.gp(&unit);
    assert_abs_diff_eq!(sq, cga.layout().scalar(1.0), epsilon = 1e-9);
}

#[test]
fn circles_are_round_grade_three_objects() {
    let cga = cga3();
    let p = |v: [f64; 3]| {
        cga.up(
            &cga.base()
                .multivector(vec![0.0, v[0], v[1], v[2], 0.0, 0.0, 0.0, 0.0])
                .unwrap(),
        )
        .unwrap()
    };
    let circle = p([1.0, 0.0, 0.0])
        .op(&p([0.0, 1.0, 0.0]))
        .op(&p([-1.0, 0.0, 0.0]));
    assert_eq!(circle.grades(1e-9), vec![3]);
    assert_eq!(ObjectKind::Circle.expected_grade(), 3);
    assert!(!ObjectKind::Circle.is_flat());
    // Round objects do not absorb infinity.
    assert!(circle.op(cga.einf()).max_abs() > 1e-6);
    // A normalised circle also squares to +1.
    let unit = circle.normal().unwrap();
    assert_abs_diff_eq!(unit.gp(&unit), cga.layout().scalar(1.0), epsilon = 1e-9);
}

#[test]
fn object_kind_grades_cover_the_catalogue() {
    assert_eq!(ObjectKind::Point.expected_grade(), 1);
    assert_eq!(ObjectKind::PointPair.expected_grade(), 2);
    assert_eq!(ObjectKind::Plane.expected_grade(), 4);
    assert_eq!(ObjectKind::Sphere.expected_grade(), 4);
    assert!(ObjectKind::Plane.is_flat());
    assert!(!ObjectKind::Sphere.is_flat());
}
