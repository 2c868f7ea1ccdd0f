//! Dense multivectors over a shared [`Layout`].
//!
//! A [`MultiVector`] is a plain coefficient vector in blade order plus an
//! `Arc` to its layout. All products are accumulation loops over the
//! layout's precomputed tables; nothing here recomputes signs.
//!
//! Combining multivectors from different layouts is a programming error and
//! panics in the operator impls; numerically fallible operations
//! (normalisation, inversion, dual) return `Result` instead.

use std::fmt;
use std::sync::Arc;

use approx::{AbsDiffEq, RelativeEq};

use crate::error::{Error, Result};
use crate::layout::{Layout, TableEntry};
use crate::types::{Scalar, EPS};

/// An element of a geometric algebra: one coefficient per basis blade.
#[derive(Clone, PartialEq)]
pub struct MultiVector {
    layout: Arc<Layout>,
    value: Vec<Scalar>,
}

impl MultiVector {
    /// Build from raw coefficients in blade order.
    pub fn new(layout: Arc<Layout>, value: Vec<Scalar>) -> Result<MultiVector> {
        if value.len() != layout.ga_dims() {
            return Err(Error::CoefficientLength {
                expected: layout.ga_dims(),
                got: value.len(),
            });
        }
        Ok(MultiVector { layout, value })
    }

    /// The zero element.
    pub fn zero(layout: &Arc<Layout>) -> MultiVector {
        MultiVector {
            layout: layout.clone(),
            value: vec![0.0; layout.ga_dims()],
        }
    }

    /// A pure scalar.
    pub fn scalar(layout: &Arc<Layout>, s: Scalar) -> MultiVector {
        let mut mv = MultiVector::zero(layout);
        mv.value[0] = s;
        mv
    }

    /// The unit basis blade at `index` (blade order).
    pub(crate) fn basis(layout: &Arc<Layout>, index: usize) -> MultiVector {
        let mut mv = MultiVector::zero(layout);
        mv.value[index] = 1.0;
        mv
    }

    /// The layout this element belongs to.
    pub fn layout(&self) -> &Arc<Layout> {
        &self.layout
    }

    /// Coefficients in blade order.
    pub fn coefficients(&self) -> &[Scalar] {
        &self.value
    }

    pub(crate) fn coefficients_mut(&mut self) -> &mut [Scalar] {
        &mut self.value
    }

    /// Coefficient of the blade at `index`.
    pub fn coeff(&self, index: usize) -> Scalar {
        self.value[index]
    }

    /// The scalar (grade-0) coefficient.
    pub fn scalar_part(&self) -> Scalar {
        self.value[0]
    }

    /// Largest absolute coefficient.
    pub fn max_abs(&self) -> Scalar {
        self.value.iter().fold(0.0, |m, &v| m.max(v.abs()))
    }

    /// Nonzero (name, coefficient) pairs in blade order.
    pub fn components(&self) -> impl Iterator<Item = (&str, Scalar)> {
        self.value
            .iter()
            .enumerate()
            .filter(|(_, &v)| v != 0.0)
            .map(|(i, &v)| (self.layout.name_of(i), v))
    }

    fn assert_same_layout(&self, other: &MultiVector) {
        assert!(
            self.layout == other.layout,
            "multivectors belong to different layouts"
        );
    }

    fn table_product(&self, other: &MultiVector, table: &[TableEntry]) -> MultiVector {
        self.assert_same_layout(other);
        let n = self.layout.ga_dims();
        let mut out = vec![0.0; n];
        for (i, &a) in self.value.iter().enumerate() {
            if a == 0.0 {
                continue;
            }
            let row = &table[i * n..(i + 1) * n];
            for (j, &b) in other.value.iter().enumerate() {
                if b == 0.0 {
                    continue;
                }
                let (sign, k) = row[j];
                if sign != 0.0 {
                    out[k] += sign * a * b;
                }
            }
        }
        MultiVector {
            layout: self.layout.clone(),
            value: out,
        }
    }

    /// Geometric product (also available as `*`).
    pub fn gp(&self, other: &MultiVector) -> MultiVector {
        self.table_product(other, self.layout.gmt())
    }

    /// Outer (wedge) product (also available as `^`).
    pub fn op(&self, other: &MultiVector) -> MultiVector {
        self.table_product(other, self.layout.omt())
    }

    /// Inner product, scalar-free convention (also available as `|`).
    pub fn ip(&self, other: &MultiVector) -> MultiVector {
        self.table_product(other, self.layout.imt())
    }

    /// Left contraction.
    pub fn lc(&self, other: &MultiVector) -> MultiVector {
        self.table_product(other, self.layout.lcmt())
    }

    /// Reversion ~M: each grade-k part picks up (-1)^(k(k-1)/2).
    pub fn reverse(&self) -> MultiVector {
        let signs = self.layout.adjoint_signs();
        MultiVector {
            layout: self.layout.clone(),
            value: self
                .value
                .iter()
                .zip(signs)
                .map(|(&v, &s)| v * s)
                .collect(),
        }
    }

    /// Grade involution: negate odd-grade parts.
    pub fn grade_involution(&self) -> MultiVector {
        MultiVector {
            layout: self.layout.clone(),
            value: self
                .value
                .iter()
                .enumerate()
                .map(|(i, &v)| if self.layout.grade_of(i) & 1 == 0 { v } else { -v })
                .collect(),
        }
    }

    /// Clifford conjugate: reversion composed with grade involution.
    pub fn clifford_conjugate(&self) -> MultiVector {
        self.grade_involution().reverse()
    }

    /// Projection onto a single grade.
    pub fn grade(&self, k: usize) -> MultiVector {
        self.grades_filter(&[k])
    }

    /// Projection onto a set of grades.
    pub fn grades_filter(&self, keep: &[usize]) -> MultiVector {
        MultiVector {
            layout: self.layout.clone(),
            value: self
                .value
                .iter()
                .enumerate()
                .map(|(i, &v)| {
                    if keep.contains(&self.layout.grade_of(i)) {
                        v
                    } else {
                        0.0
                    }
                })
                .collect(),
        }
    }

    /// Even-grade part.
    pub fn even(&self) -> MultiVector {
        MultiVector {
            layout: self.layout.clone(),
            value: self
                .value
                .iter()
                .enumerate()
                .map(|(i, &v)| if self.layout.grade_of(i) & 1 == 0 { v } else { 0.0 })
                .collect(),
        }
    }

    /// Odd-grade part.
    pub fn odd(&self) -> MultiVector {
        MultiVector {
            layout: self.layout.clone(),
            value: self
                .value
                .iter()
                .enumerate()
                .map(|(i, &v)| if self.layout.grade_of(i) & 1 == 1 { v } else { 0.0 })
                .collect(),
        }
    }

    /// Grades with a coefficient above `eps`, ascending.
    pub fn grades(&self, eps: Scalar) -> Vec<usize> {
        let mut present = vec![false; self.layout.dims() + 1];
        for (i, &v) in self.value.iter().enumerate() {
            if v.abs() > eps {
                present[self.layout.grade_of(i)] = true;
            }
        }
        present
            .iter()
            .enumerate()
            .filter(|(_, &p)| p)
            .map(|(g, _)| g)
            .collect()
    }

    /// Grade carrying the largest total absolute weight, if any coefficient
    /// is above `eps`.
    pub fn dominant_grade(&self, eps: Scalar) -> Option<usize> {
        let mut weight = vec![0.0 as Scalar; self.layout.dims() + 1];
        for (i, &v) in self.value.iter().enumerate() {
            weight[self.layout.grade_of(i)] += v.abs();
        }
        let (g, &w) = weight
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))?;
        if w > eps {
            Some(g)
        } else {
            None
        }
    }

    /// True when only the scalar coefficient is (numerically) present.
    pub fn is_scalar(&self, eps: Scalar) -> bool {
        self.value[1..].iter().all(|&v| v.abs() <= eps)
    }

    /// True when the element is a single grade and squares to a scalar.
    pub fn is_blade(&self, eps: Scalar) -> bool {
        self.grades(eps).len() <= 1 && self.gp(self).is_scalar(eps * self.max_abs().max(1.0))
    }

    /// ⟨~M M⟩₀, the squared-magnitude scalar (may be negative in mixed
    /// signatures).
    pub fn mag2(&self) -> Scalar {
        self.reverse().gp(self).scalar_part()
    }

    /// sqrt(|⟨~M M⟩₀|).
    pub fn magnitude(&self) -> Scalar {
        self.mag2().abs().sqrt()
    }

    /// M / |M|; fails when the magnitude is numerically zero.
    pub fn normal(&self) -> Result<MultiVector> {
        let mag = self.magnitude();
        if mag <= EPS {
            return Err(Error::ZeroMagnitude);
        }
        Ok(self.scale(1.0 / mag))
    }

    /// Versor inverse ~M / (M ~M)₀.
    ///
    /// Requires M ~M to be a nonzero scalar; use [`MultiVector::inverse`]
    /// for general elements.
    pub fn normal_inv(&self) -> Result<MultiVector> {
        let m_rev = self.reverse();
        let prod = self.gp(&m_rev);
        let s = prod.scalar_part();
        if s.abs() <= EPS || !prod.is_scalar(EPS * prod.max_abs().max(1.0)) {
            return Err(Error::SingularInverse);
        }
        Ok(m_rev.scale(1.0 / s))
    }

    /// General left inverse: X with X M = 1.
    ///
    /// Takes the versor fast path when M ~M is a nonzero scalar, otherwise
    /// solves the Cayley-matrix linear system by Gaussian elimination with
    /// partial pivoting.
    pub fn inverse(&self) -> Result<MultiVector> {
        if let Ok(inv) = self.normal_inv() {
            return Ok(inv);
        }
        self.la_inverse()
    }

    /// Left inverse via the linear system (X M)_k = δ_k0.
    fn la_inverse(&self) -> Result<MultiVector> {
        let n = self.layout.ga_dims();
        let gmt = self.layout.gmt();

        // a[k][i] = coefficient of X_i in (X M)_k.
        let mut a = vec![0.0 as Scalar; n * n];
        for i in 0..n {
            for (j, &vj) in self.value.iter().enumerate() {
                if vj == 0.0 {
                    continue;
                }
                let (sign, k) = gmt[i * n + j];
                if sign != 0.0 {
                    a[k * n + i] += sign * vj;
                }
            }
        }
        let mut rhs = vec![0.0 as Scalar; n];
        rhs[0] = 1.0;

        // Forward elimination with partial pivoting.
        for col in 0..n {
            let mut pivot = col;
            for row in col + 1..n {
                if a[row * n + col].abs() > a[pivot * n + col].abs() {
                    pivot = row;
                }
            }
            if a[pivot * n + col].abs() <= EPS {
                return Err(Error::SingularInverse);
            }
            if pivot != col {
                for c in 0..n {
                    a.swap(col * n + c, pivot * n + c);
                }
                rhs.swap(col, pivot);
            }
            let diag = a[col * n + col];
            for row in col + 1..n {
                let factor = a[row * n + col] / diag;
                if factor == 0.0 {
                    continue;
                }
                for c in col..n {
                    a[row * n + c] -= factor * a[col * n + c];
                }
                rhs[row] -= factor * rhs[col];
            }
        }
        // Back substitution.
        let mut x = vec![0.0 as Scalar; n];
        for col in (0..n).rev() {
            let mut acc = rhs[col];
            for c in col + 1..n {
                acc -= a[col * n + c] * x[c];
            }
            x[col] = acc / a[col * n + col];
        }
        MultiVector::new(self.layout.clone(), x)
    }

    /// Dual: M I⁻¹ with I the unit pseudoscalar.
    pub fn dual(&self) -> Result<MultiVector> {
        let i_inv = self.layout.pseudoscalar().normal_inv()?;
        Ok(self.gp(&i_inv))
    }

    /// Commutator product (A B − B A) / 2.
    pub fn commutator(&self, other: &MultiVector) -> MultiVector {
        self.gp(other).sub(&other.gp(self)).scale(0.5)
    }

    /// Anticommutator product (A B + B A) / 2.
    pub fn anticommutator(&self, other: &MultiVector) -> MultiVector {
        self.gp(other).add(&other.gp(self)).scale(0.5)
    }

    /// Elementwise sum.
    pub fn add(&self, other: &MultiVector) -> MultiVector {
        self.assert_same_layout(other);
        MultiVector {
            layout: self.layout.clone(),
            value: self
                .value
                .iter()
                .zip(&other.value)
                .map(|(&a, &b)| a + b)
                .collect(),
        }
    }

    /// Elementwise difference.
    pub fn sub(&self, other: &MultiVector) -> MultiVector {
        self.assert_same_layout(other);
        MultiVector {
            layout: self.layout.clone(),
            value: self
                .value
                .iter()
                .zip(&other.value)
                .map(|(&a, &b)| a - b)
                .collect(),
        }
    }

    /// Scale by a scalar factor.
    pub fn scale(&self, s: Scalar) -> MultiVector {
        MultiVector {
            layout: self.layout.clone(),
            value: self.value.iter().map(|&v| v * s).collect(),
        }
    }

    /// Add a scalar to the grade-0 coefficient.
    pub fn add_scalar(&self, s: Scalar) -> MultiVector {
        let mut out = self.clone();
        out.value[0] += s;
        out
    }

    /// Zero every coefficient with |c| ≤ eps.
    pub fn clean(&self, eps: Scalar) -> MultiVector {
        MultiVector {
            layout: self.layout.clone(),
            value: self
                .value
                .iter()
                .map(|&v| if v.abs() <= eps { 0.0 } else { v })
                .collect(),
        }
    }
}

impl fmt::Display for MultiVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut wrote = false;
        for (name, coeff) in self.components() {
            if wrote {
                write!(f, " + ")?;
            }
            if name.is_empty() {
                write!(f, "{}", coeff)?;
            } else {
                write!(f, "({}^{})", coeff, name)?;
            }
            wrote = true;
        }
        if !wrote {
            write!(f, "0")?;
        }
        Ok(())
    }
}

impl fmt::Debug for MultiVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MultiVector({})", self)
    }
}

impl AbsDiffEq for MultiVector {
    type Epsilon = Scalar;

    fn default_epsilon() -> Scalar {
        EPS
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Scalar) -> bool {
        self.layout == other.layout
            && self
                .value
                .iter()
                .zip(&other.value)
                .all(|(a, b)| Scalar::abs_diff_eq(a, b, epsilon))
    }
}

impl RelativeEq for MultiVector {
    fn default_max_relative() -> Scalar {
        EPS
    }

    fn relative_eq(&self, other: &Self, epsilon: Scalar, max_relative: Scalar) -> bool {
        self.layout == other.layout
            && self
                .value
                .iter()
                .zip(&other.value)
                .all(|(a, b)| Scalar::relative_eq(a, b, epsilon, max_relative))
    }
}

macro_rules! impl_binop {
    ($trait:ident, $fn:ident, $method:ident) => {
        impl std::ops::$trait for MultiVector {
            type Output = MultiVector;
            fn $fn(self, rhs: MultiVector) -> MultiVector {
                MultiVector::$method(&self, &rhs)
            }
        }
        impl std::ops::$trait<&MultiVector> for MultiVector {
            type Output = MultiVector;
            fn $fn(self, rhs: &MultiVector) -> MultiVector {
                MultiVector::$method(&self, rhs)
            }
        }
        impl std::ops::$trait<MultiVector> for &MultiVector {
            type Output = MultiVector;
            fn $fn(self, rhs: MultiVector) -> MultiVector {
                MultiVector::$method(self, &rhs)
            }
        }
        impl std::ops::$trait<&MultiVector> for &MultiVector {
            type Output = MultiVector;
            fn $fn(self, rhs: &MultiVector) -> MultiVector {
                MultiVector::$method(self, rhs)
            }
        }
    };
}

impl_binop!(Mul, mul, gp);
impl_binop!(BitXor, bitxor, op);
impl_binop!(BitOr, bitor, ip);
impl_binop!(Add, add, add);
impl_binop!(Sub, sub, sub);

impl std::ops::Neg for MultiVector {
    type Output = MultiVector;
    fn neg(self) -> MultiVector {
        self.scale(-1.0)
    }
}

impl std::ops::Neg for &MultiVector {
    type Output = MultiVector;
    fn neg(self) -> MultiVector {
        self.scale(-1.0)
    }
}

impl std::ops::Mul<Scalar> for MultiVector {
    type Output = MultiVector;
    fn mul(self, rhs: Scalar) -> MultiVector {
        self.scale(rhs)
    }
}

impl std::ops::Mul<Scalar> for &MultiVector {
    type Output = MultiVector;
    fn mul(self, rhs: Scalar) -> MultiVector {
        self.scale(rhs)
    }
}

impl std::ops::Mul<MultiVector> for Scalar {
    type Output = MultiVector;
    fn mul(self, rhs: MultiVector) -> MultiVector {
        rhs.scale(self)
    }
}

impl std::ops::Mul<&MultiVector> for Scalar {
    type Output = MultiVector;
    fn mul(self, rhs: &MultiVector) -> MultiVector {
        rhs.scale(self)
    }
}
