//! Random element generation, mainly for property tests and benchmarks.

use std::sync::Arc;

use rand::Rng;

use crate::error::Result;
use crate::layout::Layout;
use crate::multivector::MultiVector;

/// A multivector with every coefficient uniform in [-1, 1).
pub fn random_multivector<R: Rng + ?Sized>(layout: &Arc<Layout>, rng: &mut R) -> MultiVector {
    let mut mv = MultiVector::zero(layout);
    for c in mv.coefficients_mut() {
        *c = rng.gen_range(-1.0..1.0);
    }
    mv
}

/// A random multivector restricted to the given grades.
pub fn random_with_grades<R: Rng + ?Sized>(
    layout: &Arc<Layout>,
    grades: &[usize],
    rng: &mut R,
) -> MultiVector {
    let mut mv = MultiVector::zero(layout);
    for (i, c) in mv.coefficients_mut().iter_mut().enumerate() {
        if grades.contains(&layout.grade_of(i)) {
            *c = rng.gen_range(-1.0..1.0);
        }
    }
    mv
}

/// A random grade-1 element.
pub fn random_vector<R: Rng + ?Sized>(layout: &Arc<Layout>, rng: &mut R) -> MultiVector {
    random_with_grades(layout, &[1], rng)
}

/// A random rotor: the product of two unit vectors, so R ~R = 1 exactly
/// (up to rounding).
///
/// Fails only in the measure-zero event that a sampled vector is null.
pub fn random_rotor<R: Rng + ?Sized>(layout: &Arc<Layout>, rng: &mut R) -> Result<MultiVector> {
    let a = random_vector(layout, rng).normal()?;
    let b = random_vector(layout, rng).normal()?;
    Ok(a.gp(&b))
}
