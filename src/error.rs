//! Error types for algebra construction and fallible operations.

use thiserror::Error;

/// Errors produced by layout construction and numerically fallible
/// multivector operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A signature entry was not +1 or -1.
    #[error("invalid signature entry {value} at position {index}: must be +1 or -1")]
    InvalidSignature { index: usize, value: i8 },

    /// The requested dimension exceeds the dense-table bound.
    #[error("unsupported dimension {dims}: dense multiplication tables are limited to {max}")]
    UnsupportedDimension { dims: usize, max: usize },

    /// Operands belong to different layouts.
    #[error("cannot operate on multivectors with different layouts")]
    LayoutMismatch,

    /// A raw coefficient vector does not match the layout's blade count.
    #[error("coefficient vector has length {got}, layout expects {expected}")]
    CoefficientLength { expected: usize, got: usize },

    /// No blade with the given name exists in the layout.
    #[error("unknown blade name `{0}`")]
    UnknownBlade(String),

    /// The Cayley matrix of the element is singular within tolerance.
    #[error("multivector has no inverse (singular within tolerance)")]
    SingularInverse,

    /// The rotor has no resolvable logarithm (e.g. -1, or a non-simple
    /// even versor).
    #[error("rotor logarithm is unresolvable: {0}")]
    DegenerateRotor(String),

    /// Down-projection of a conformal point that is not null.
    #[error("conformal point is not null (P·P = {0:e})")]
    NonNullPoint(f64),

    /// Down-projection of the point at infinity.
    #[error("conformal point lies at infinity (zero e-infinity coefficient)")]
    PointAtInfinity,

    /// An operation that requires a blade was given a mixed-grade element.
    #[error("expected a blade of grade {expected}, got grades {got:?}")]
    NotABlade { expected: usize, got: Vec<usize> },

    /// Normalisation of an element with numerically zero magnitude.
    #[error("cannot normalise a multivector with zero magnitude")]
    ZeroMagnitude,
}

/// Result type for all fallible operations in the crate.
pub type Result<T> = std::result::Result<T, Error>;
