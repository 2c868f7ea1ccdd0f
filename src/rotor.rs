//! Rotor exponential / logarithm and small rotor construction helpers.
//!
//! `exp` takes closed forms when its argument is a simple bivector (squares
//! to a scalar) and falls back to a scale-and-square Taylor series for
//! everything else. `log` inverts the closed forms and reports elements it
//! cannot resolve as [`Error::DegenerateRotor`].

use crate::error::{Error, Result};
use crate::multivector::MultiVector;
use crate::types::{Scalar, EPS};

/// sin(x)/x with the series form near zero, so the closed-form rotor
/// exponential stays smooth through θ = 0.
fn sinc(x: Scalar) -> Scalar {
    if x.abs() < 1e-4 {
        1.0 - x * x / 6.0 + x.powi(4) / 120.0
    } else {
        x.sin() / x
    }
}

fn sinhc(x: Scalar) -> Scalar {
    if x.abs() < 1e-4 {
        1.0 + x * x / 6.0 + x.powi(4) / 120.0
    } else {
        x.sinh() / x
    }
}

/// Exponential of a multivector.
///
/// A grade-2 argument whose square is numerically scalar gets the exact
/// trigonometric / hyperbolic / parabolic form; anything else is summed by
/// Taylor series after halving the argument into the convergence region.
pub fn exp(b: &MultiVector) -> MultiVector {
    let tol = EPS * b.max_abs().max(1.0);
    if b.grades(tol).iter().all(|&g| g == 2) {
        let sq = b.gp(b);
        if sq.is_scalar(EPS * sq.max_abs().max(1.0)) {
            let s = sq.scalar_part();
            if s < -tol {
                // B² = -θ²: rotation plane.
                let theta = (-s).sqrt();
                return b.scale(sinc(theta)).add_scalar(theta.cos());
            }
            if s > tol {
                // B² = +φ²: boost plane.
                let phi = s.sqrt();
                return b.scale(sinhc(phi)).add_scalar(phi.cosh());
            }
            // B² ≈ 0: null (translation-like) plane.
            return b.add_scalar(1.0);
        }
    }
    exp_series(b)
}

/// Scale-and-square Taylor exponential for non-simple arguments.
fn exp_series(b: &MultiVector) -> MultiVector {
    let layout = b.layout();
    let max = b.max_abs();
    let mut halvings = 0u32;
    let mut scaled = b.clone();
    if max > 1.0 {
        halvings = max.log2().ceil() as u32 + 1;
        scaled = b.scale(0.5f64.powi(halvings as i32));
    }

    let mut sum = MultiVector::scalar(layout, 1.0);
    let mut term = MultiVector::scalar(layout, 1.0);
    for k in 1..=64 {
        term = term.gp(&scaled).scale(1.0 / k as Scalar);
        sum = sum.add(&term);
        if term.max_abs() < 1e-18 {
            break;
        }
    }
    for _ in 0..halvings {
        sum = sum.gp(&sum);
    }
    sum
}

/// Principal logarithm of a rotor, returned as a bivector.
///
/// The rotor must be scalar + simple bivector within tolerance. For
/// rotation rotors the minimal-angle branch θ = atan2(|B|, s) ∈ (0, π) is
/// taken; R ≈ 1 maps to the zero bivector and R ≈ -1 has no preferred
/// rotation plane and is rejected.
pub fn log(r: &MultiVector) -> Result<MultiVector> {
    let tol = EPS.sqrt() * r.max_abs().max(1.0);
    let even_simple = r.grades_filter(&[0, 2]);
    if r.sub(&even_simple).max_abs() > tol {
        return Err(Error::DegenerateRotor(format!(
            "element carries grades {:?}, expected scalar + bivector",
            r.grades(tol)
        )));
    }
    let s = r.scalar_part();
    let b = r.grade(2);
    let b_norm = b.max_abs();

    if b_norm <= tol {
        if s > 0.0 {
            return Ok(MultiVector::zero(r.layout()));
        }
        return Err(Error::DegenerateRotor(
            "rotor is numerically -1: the rotation plane is unconstrained".into(),
        ));
    }

    let sq = b.gp(&b);
    let plane_tol = tol * b_norm.max(1.0);
    if !sq.is_scalar(plane_tol) {
        return Err(Error::DegenerateRotor(
            "bivector part is not simple (its square is not a scalar)".into(),
        ));
    }
    let bb = sq.scalar_part();

    if bb < -plane_tol {
        // cos θ + B̂ sin θ
        let mag = (-bb).sqrt();
        let theta = mag.atan2(s);
        return Ok(b.scale(theta / mag));
    }
    if bb > plane_tol {
        // cosh φ + B̂ sinh φ; unit rotors satisfy s² - |B|² = 1.
        let mag = bb.sqrt();
        if s <= mag {
            return Err(Error::DegenerateRotor(
                "hyperbolic rotor is not normalised".into(),
            ));
        }
        let phi = (s + mag).ln();
        return Ok(b.scale(phi / mag));
    }
    // Parabolic: s(1 + B/s), log = B/s.
    if s <= tol {
        return Err(Error::DegenerateRotor(
            "parabolic rotor has a vanishing scalar part".into(),
        ));
    }
    Ok(b.scale(1.0 / s))
}

/// True when R is even and R ~R ≈ 1 within `tol`.
pub fn is_rotor(r: &MultiVector, tol: Scalar) -> bool {
    if r.sub(&r.even()).max_abs() > tol {
        return false;
    }
    r.gp(&r.reverse()).add_scalar(-1.0).max_abs() <= tol
}

/// Sandwich product R x ~R.
pub fn sandwich(r: &MultiVector, x: &MultiVector) -> MultiVector {
    r.gp(x).gp(&r.reverse())
}

/// Rotor turning by `angle` in the plane spanned by vectors `a` and `b`:
/// cos(angle/2) − B̂ sin(angle/2).
///
/// Fails when a and b are (numerically) parallel or the plane is null.
pub fn generate_rotation_rotor(
    angle: Scalar,
    a: &MultiVector,
    b: &MultiVector,
) -> Result<MultiVector> {
    let a = a.normal()?;
    let b = b.normal()?;
    let plane = a.op(&b);
    let sq = plane.gp(&plane).scalar_part();
    if sq >= -EPS {
        return Err(Error::DegenerateRotor(
            "rotation plane is degenerate (parallel vectors or null plane)".into(),
        ));
    }
    let unit_plane = plane.scale(1.0 / (-sq).sqrt());
    let half = angle / 2.0;
    Ok(unit_plane.scale(-half.sin()).add_scalar(half.cos()))
}

/// Shortest-arc rotor mapping the direction of `a` onto the direction of
/// `b`: (1 + b̂ â) normalised. Opposite vectors have no unique arc.
pub fn rotor_vector_to_vector(a: &MultiVector, b: &MultiVector) -> Result<MultiVector> {
    let a = a.normal()?;
    let b = b.normal()?;
    let r = b.gp(&a).add_scalar(1.0);
    r.normal().map_err(|_| {
        Error::DegenerateRotor("vectors are opposite: rotation plane is unconstrained".into())
    })
}

/// Angle between two vectors, in [0, π].
pub fn angle_between_vectors(a: &MultiVector, b: &MultiVector) -> Result<Scalar> {
    let a = a.normal()?;
    let b = b.normal()?;
    let c = a.ip(&b).scalar_part().clamp(-1.0, 1.0);
    Ok(c.acos())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::build_layout;

    const TOL: f64 = 1e-10;

    #[test]
    fn closed_form_and_series_agree_on_a_simple_bivector() {
        let g3 = build_layout(&[1, 1, 1]).unwrap();
        let b = g3.blade("e12").unwrap().scale(0.3);
        let closed = exp(&b);
        let series = exp_series(&b);
        assert!(closed.sub(&series).max_abs() < TOL);
    }

    #[test]
    fn sinc_series_matches_ratio_at_the_crossover() {
        let x = 1.1e-4;
        assert!((sinc(x) - x.sin() / x).abs() < 1e-15);
    }
}
