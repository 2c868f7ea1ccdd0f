// src/ops/reflection.rs
//! Sandwich reflection of a multivector in a hyperplane.

use crate::error::Result;
use crate::multivector::MultiVector;

/// Reflection in the hyperplane orthogonal to a vector.
pub trait Reflect {
    /// Reflect this element in the hyperplane with normal `n`: -n x n⁻¹.
    fn reflect_in(&self, n: &MultiVector) -> Result<MultiVector>;
}

impl Reflect for MultiVector {
    fn reflect_in(&self, n: &MultiVector) -> Result<MultiVector> {
        let n_inv = n.normal_inv()?;
        Ok(-n.gp(self).gp(&n_inv))
    }
}

/// Reflect `x` in the hyperplane with normal `n`.
pub fn reflect(x: &MultiVector, n: &MultiVector) -> Result<MultiVector> {
    x.reflect_in(n)
}
