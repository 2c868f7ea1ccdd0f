//! Conformal geometric algebra (CGA) built over a Euclidean base algebra.
//!
//! [`Conformal::new`] extends a base signature (p, q) to (p+1, q+1) and
//! precomputes the null basis e∞, e₀ and the Minkowski plane E₀ = e∞ ∧ e₀.
//! Points embed by `up`, recover by `down`, and conformal objects (point
//! pairs, lines, circles, planes, spheres) transform by rotor sandwiches.
//!
//! `rotor_between_objects` follows Lasenby & Hadfield, "Calculating the
//! rotor between conformal objects" (AGACSE 2018).

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::layout::{build_layout, Layout};
use crate::multivector::MultiVector;
use crate::rotor::{self, sandwich};
use crate::types::{Scalar, EPS};

/// Tolerance for the null-point check in [`Conformal::down`]. Conformal
/// embeddings accumulate rounding in |x|², so this is looser than [`EPS`].
const NULL_TOL: Scalar = 1e-9;

/// Role tags for the conformal objects a client may build or interpolate.
///
/// The engine only fixes each object's blade grade and whether it passes
/// through infinity; rendering them is a caller concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Point,
    PointPair,
    Line,
    Circle,
    Plane,
    Sphere,
}

impl ObjectKind {
    /// Blade grade of this object in the conformal algebra of a 3-D base.
    pub fn expected_grade(&self) -> usize {
        match self {
            ObjectKind::Point => 1,
            ObjectKind::PointPair => 2,
            ObjectKind::Line | ObjectKind::Circle => 3,
            ObjectKind::Plane | ObjectKind::Sphere => 4,
        }
    }

    /// Flat objects contain the point at infinity as a factor.
    pub fn is_flat(&self) -> bool {
        matches!(self, ObjectKind::Line | ObjectKind::Plane)
    }
}

/// A conformal model: the extended layout plus its distinguished elements.
pub struct Conformal {
    base: Arc<Layout>,
    layout: Arc<Layout>,
    ep: MultiVector,
    en: MultiVector,
    eo: MultiVector,
    einf: MultiVector,
    minkowski: MultiVector,
}

impl Conformal {
    /// Conformalize a Euclidean (or mixed) base signature by appending one
    /// +1 and one -1 basis vector.
    pub fn new(base_signature: &[i8]) -> Result<Conformal> {
        let base = build_layout(base_signature)?;
        let mut sig = base_signature.to_vec();
        sig.push(1);
        sig.push(-1);
        let layout = build_layout(&sig)?;

        let n = base.dims();
        let ep = layout.basis_vector(n)?;
        let en = layout.basis_vector(n + 1)?;
        let einf = en.add(&ep);
        let eo = en.sub(&ep).scale(0.5);
        let minkowski = einf.op(&eo);

        Ok(Conformal {
            base,
            layout,
            ep,
            en,
            eo,
            einf,
            minkowski,
        })
    }

    /// The base algebra the model was built from.
    pub fn base(&self) -> &Arc<Layout> {
        &self.base
    }

    /// The extended (p+1, q+1) layout.
    pub fn layout(&self) -> &Arc<Layout> {
        &self.layout
    }

    /// The added basis vector squaring to +1.
    pub fn ep(&self) -> &MultiVector {
        &self.ep
    }

    /// The added basis vector squaring to -1.
    pub fn en(&self) -> &MultiVector {
        &self.en
    }

    /// The null origin e₀ (e₀ · e∞ = -1).
    pub fn eo(&self) -> &MultiVector {
        &self.eo
    }

    /// The null point at infinity e∞.
    pub fn einf(&self) -> &MultiVector {
        &self.einf
    }

    /// The Minkowski plane E₀ = e∞ ∧ e₀.
    pub fn minkowski(&self) -> &MultiVector {
        &self.minkowski
    }

    /// Pseudoscalar of the base algebra.
    pub fn base_pseudoscalar(&self) -> MultiVector {
        self.base.pseudoscalar()
    }

    /// Carry a base-layout vector into the conformal layout, or pass a
    /// conformal vector through after checking it is purely Euclidean.
    pub fn lift(&self, x: &MultiVector) -> Result<MultiVector> {
        let tol = EPS * x.max_abs().max(1.0);
        let grades = x.grades(tol);
        if grades.iter().any(|&g| g != 1) {
            return Err(Error::NotABlade {
                expected: 1,
                got: grades,
            });
        }
        if x.layout() == &self.layout {
            let n = self.base.dims();
            let extra = self.layout.index_of_mask(1 << n);
            let extra2 = self.layout.index_of_mask(1 << (n + 1));
            if x.coeff(extra).abs() > tol || x.coeff(extra2).abs() > tol {
                return Err(Error::NotABlade {
                    expected: 1,
                    got: grades,
                });
            }
            return Ok(x.clone());
        }
        if x.layout() != &self.base {
            return Err(Error::LayoutMismatch);
        }
        let mut out = MultiVector::zero(&self.layout);
        for i in 0..self.base.dims() {
            let c = x.coeff(self.base.index_of_mask(1 << i));
            out.coefficients_mut()[self.layout.index_of_mask(1 << i)] = c;
        }
        Ok(out)
    }

    /// Conformal embedding: up(x) = x + ½|x|² e∞ + e₀.
    ///
    /// The result is a null vector, P · P ≈ 0.
    pub fn up(&self, x: &MultiVector) -> Result<MultiVector> {
        let x = self.lift(x)?;
        let x2 = x.gp(&x).scalar_part();
        Ok(x.add(&self.einf.scale(0.5 * x2)).add(&self.eo))
    }

    /// Homogenise a conformal point: P / (-P · e∞).
    pub fn homo(&self, p: &MultiVector) -> Result<MultiVector> {
        let weight = -p.ip(&self.einf).scalar_part();
        if weight.abs() <= EPS * p.max_abs().max(1.0) {
            return Err(Error::PointAtInfinity);
        }
        Ok(p.scale(1.0 / weight))
    }

    /// Invert the embedding: recover the base-layout Euclidean vector of a
    /// null conformal point.
    ///
    /// Fails with [`Error::PointAtInfinity`] when the e∞ weight vanishes
    /// and [`Error::NonNullPoint`] when P · P is not numerically zero.
    pub fn down(&self, p: &MultiVector) -> Result<MultiVector> {
        let h = self.homo(p)?;
        let scale = h.max_abs().max(1.0);
        let null_defect = h.gp(&h).scalar_part();
        if null_defect.abs() > NULL_TOL * scale * scale {
            return Err(Error::NonNullPoint(null_defect));
        }
        // (homo(P) ∧ E₀) E₀ lies in the Euclidean subspace.
        let euclid = h.op(&self.minkowski).gp(&self.minkowski);
        let mut out = MultiVector::zero(&self.base);
        for i in 0..self.base.dims() {
            let c = euclid.coeff(self.layout.index_of_mask(1 << i));
            out.coefficients_mut()[self.base.index_of_mask(1 << i)] = c;
        }
        Ok(out)
    }

    /// Translation versor T = 1 - ½ t e∞, satisfying
    /// T up(x) ~T = up(x + t).
    pub fn translator(&self, t: &MultiVector) -> Result<MultiVector> {
        let t = self.lift(t)?;
        Ok(self.einf.gp(&t).scale(0.5).add_scalar(1.0))
    }

    /// Rotation rotor about the origin in the plane of `a` and `b`.
    pub fn rotor(&self, angle: Scalar, a: &MultiVector, b: &MultiVector) -> Result<MultiVector> {
        let a = self.lift(a)?;
        let b = self.lift(b)?;
        rotor::generate_rotation_rotor(angle, &a, &b)
    }
}

/// Rotor taking conformal object X1 onto X2 (same kind, both normalised so
/// that X² = ±1), sign-canonicalised to a positive scalar part.
///
/// Builds C = 1 ± X2 X1 (sign from ⟨X1²⟩₀), takes the square root of
/// σ = C ~C — a scalar-plus-4-vector element — through
/// K = σ + sqrt(⟨σ⟩₀² - ⟨σ⟩₄²), and normalises (⟨K⟩₀ - ⟨K⟩₄) C.
pub fn rotor_between_objects(x1: &MultiVector, x2: &MultiVector) -> Result<MultiVector> {
    let x2x1 = x2.gp(x1);
    let c = if x1.gp(x1).scalar_part() > 0.0 {
        x2x1.add_scalar(1.0)
    } else {
        (-x2x1).add_scalar(1.0)
    };

    let sigma = c.gp(&c.reverse());
    let s0 = sigma.scalar_part();
    let s4 = sigma.grade(4);
    let lam2 = s0 * s0 - s4.gp(&s4).scalar_part();
    if lam2 < 0.0 {
        return Err(Error::DegenerateRotor(
            "objects admit no connecting rotor (negative root discriminant)".into(),
        ));
    }
    let lambda = lam2.sqrt();

    // K = sqrt(σ) up to scale; K⁻¹ ∝ ⟨K⟩₀ - ⟨K⟩₄.
    let k0 = s0 + lambda;
    let r_raw = s4.scale(-1.0).add_scalar(k0).gp(&c);
    let r = r_raw.normal().map_err(|_| {
        Error::DegenerateRotor("objects are antipodal: connecting rotor is unconstrained".into())
    })?;
    Ok(if r.scalar_part() < 0.0 { -r } else { r })
}

/// Direct interpolation between two conformal objects of the same kind:
/// apply exp(alpha · log R) to `l1`, where R is the connecting rotor.
///
/// alpha = 0 returns `l1` and alpha = 1 returns `l2`, both up to
/// normalisation and tolerance.
pub fn interp_objects_root(
    l1: &MultiVector,
    l2: &MultiVector,
    alpha: Scalar,
) -> Result<MultiVector> {
    let r = rotor_between_objects(l1, l2)?;
    let b = rotor::log(&r)?;
    let r_alpha = rotor::exp(&b.scale(alpha));
    sandwich(&r_alpha, l1).normal()
}
