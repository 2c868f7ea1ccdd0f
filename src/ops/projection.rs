// src/ops/projection.rs
//! Projection and rejection of a multivector onto a blade.

use crate::error::{Error, Result};
use crate::multivector::MultiVector;
use crate::types::EPS;

/// Trait for projecting multivectors onto blades.
pub trait Project {
    /// Project this element onto the blade `target`: (self ⌋ target) target⁻¹.
    fn project_onto(&self, target: &MultiVector) -> Result<MultiVector>;

    /// Component of this element not contained in `target`.
    fn reject_from(&self, target: &MultiVector) -> Result<MultiVector>;
}

impl Project for MultiVector {
    fn project_onto(&self, target: &MultiVector) -> Result<MultiVector> {
        if !target.is_blade(EPS * target.max_abs().max(1.0)) {
            return Err(Error::NotABlade {
                expected: target.dominant_grade(EPS).unwrap_or(0),
                got: target.grades(EPS),
            });
        }
        let target_inv = target.inverse()?;
        Ok(self.lc(target).gp(&target_inv))
    }

    fn reject_from(&self, target: &MultiVector) -> Result<MultiVector> {
        Ok(self.sub(&self.project_onto(target)?))
    }
}

/// Free-function wrappers for convenience and for importing in tests.
/// Project `m` onto the blade `target`.
pub fn project(m: &MultiVector, target: &MultiVector) -> Result<MultiVector> {
    m.project_onto(target)
}

/// Reject `m` from the blade `target`.
pub fn reject(m: &MultiVector, target: &MultiVector) -> Result<MultiVector> {
    m.reject_from(target)
}
