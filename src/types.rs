//! Shared numeric definitions.

/// Scalar type used for all multivector coefficients.
pub type Scalar = f64;

/// Default tolerance for comparisons against zero.
///
/// Every numerical zero test in the crate (null checks, singularity checks,
/// branch selection in `exp`/`log`) uses this constant unless the caller
/// supplies an explicit tolerance.
pub const EPS: Scalar = 1e-12;
