// tests/layout_tests.rs
// Layout construction: blade enumeration, names, tables, error paths.

use ga_core::{build_layout, Error, MAX_DIMENSION};

const EPS: f64 = 1e-12;

#[test]
fn g3_enumerates_eight_blades_in_grade_order() {
    let g3 = build_layout(&[1, 1, 1]).unwrap();
    assert_eq!(g3.ga_dims(), 8);
    assert_eq!(
        g3.names(),
        &["", "e1", "e2", "e3", "e12", "e13", "e23", "e123"]
    );
    assert_eq!(g3.grades(), &[0, 1, 1, 1, 2, 2, 2, 3]);
}

#[test]
fn grade_counts_are_binomial() {
    let g5 = build_layout(&[1, 1, 1, 1, 1]).unwrap();
    let mut counts = [0usize; 6];
    for &g in g5.grades() {
        counts[g] += 1;
    }
    assert_eq!(counts, [1, 5, 10, 10, 5, 1]);
}

#[test]
fn basis_vectors_square_to_their_metric_entry() {
    let sig: [i8; 4] = [1, 1, -1, -1];
    let layout = build_layout(&sig).unwrap();
    for (i, &s) in sig.iter().enumerate() {
        let e = layout.basis_vector(i).unwrap();
        let sq = e.gp(&e);
        assert!(
            (sq.scalar_part() - s as f64).abs() < EPS,
            "e{}^2 should be {}",
            i + 1,
            s
        );
        assert!(sq.is_scalar(EPS));
    }
}

#[test]
fn g2_products_match_the_textbook_table() {
    let g2 = build_layout(&[1, 1]).unwrap();
    let e1 = g2.blade("e1").unwrap();
    let e2 = g2.blade("e2").unwrap();
    let e12 = g2.blade("e12").unwrap();

    assert_eq!(e1.gp(&e1), g2.scalar(1.0));
    assert_eq!(e1.gp(&e2), e12);
    assert_eq!(e2.gp(&e1), -&e12);
    assert_eq!(e12.gp(&e12), g2.scalar(-1.0));

    // Orthogonal vectors: zero inner product, wedge equals the full product.
    assert_eq!(e1.ip(&e2), g2.scalar(0.0));
    assert_eq!(e1.op(&e2), e12);
    // Parallel vectors: zero wedge.
    assert!(e1.op(&e1).max_abs() < EPS);
}

#[test]
fn left_contraction_lowers_grade_from_the_left() {
    let g3 = build_layout(&[1, 1, 1]).unwrap();
    let e1 = g3.blade("e1").unwrap();
    let e12 = g3.blade("e12").unwrap();
    // e1 _| e12 = e2, e12 _| e1 = 0.
    assert_eq!(e1.lc(&e12), g3.blade("e2").unwrap());
    assert!(e12.lc(&e1).max_abs() < EPS);
    // A scalar contracts onto anything.
    assert_eq!(g3.scalar(2.0).lc(&e1), e1.scale(2.0));
}

#[test]
fn inner_product_discards_scalar_operands() {
    let g2 = build_layout(&[1, 1]).unwrap();
    let e1 = g2.blade("e1").unwrap();
    assert!(g2.scalar(3.0).ip(&e1).max_abs() < EPS);
    assert!(e1.ip(&g2.scalar(3.0)).max_abs() < EPS);
}

#[test]
fn pseudoscalar_has_top_grade() {
    let g3 = build_layout(&[1, 1, 1]).unwrap();
    let i = g3.pseudoscalar();
    assert_eq!(i, g3.blade("e123").unwrap());
    // I^2 = -1 in G(3, 0).
    assert_eq!(i.gp(&i), g3.scalar(-1.0));
}

#[test]
fn layouts_compare_by_signature() {
    let a = build_layout(&[1, 1, -1]).unwrap();
    let b = build_layout(&[1, 1, -1]).unwrap();
    let c = build_layout(&[1, 1, 1]).unwrap();
    assert_eq!(*a, *b);
    assert_ne!(*a, *c);
}

#[test]
fn rejects_signature_entries_other_than_unit() {
    let err = build_layout(&[1, 0, 1]).unwrap_err();
    assert_eq!(err, Error::InvalidSignature { index: 1, value: 0 });
    let err = build_layout(&[2]).unwrap_err();
    assert_eq!(err, Error::InvalidSignature { index: 0, value: 2 });
}

#[test]
fn rejects_dimensions_past_the_dense_table_bound() {
    let sig = vec![1i8; MAX_DIMENSION + 1];
    let err = build_layout(&sig).unwrap_err();
    assert_eq!(
        err,
        Error::UnsupportedDimension {
            dims: MAX_DIMENSION + 1,
            max: MAX_DIMENSION
        }
    );
    // The bound itself is fine.
    assert!(build_layout(&vec![1i8; MAX_DIMENSION]).is_ok());
}

#[test]
fn unknown_blade_names_are_reported() {
    let g2 = build_layout(&[1, 1]).unwrap();
    assert_eq!(
        g2.blade("e3").unwrap_err(),
        Error::UnknownBlade("e3".into())
    );
}

#[test]
fn blade_lookup_by_mask_and_name_agree() {
    let g3 = build_layout(&[1, 1, 1]).unwrap();
    assert_eq!(g3.blade_from_mask(0b011).unwrap(), g3.blade("e12").unwrap());
    assert_eq!(g3.blade_from_mask(0b101).unwrap(), g3.blade("e13").unwrap());
    let all = g3.blades();
    assert_eq!(all.len(), 7);
    assert_eq!(all["e123"], g3.pseudoscalar());
}
