//! # ga_core
//!
//! A table-driven Clifford / geometric algebra engine with conformal (CGA)
//! tools.
//!
//! Build a [`Layout`] from a metric signature, then work with dense
//! [`MultiVector`] values whose products all run through the layout's
//! precomputed multiplication tables:
//!
//! ```
//! use ga_core::build_layout;
//!
//! let g2 = build_layout(&[1, 1]).unwrap();
//! let e1 = g2.blade("e1").unwrap();
//! let e2 = g2.blade("e2").unwrap();
//! let e12 = &e1 * &e2;
//! assert_eq!(e12, g2.blade("e12").unwrap());
//! assert_eq!((&e12 * &e12).scalar_part(), -1.0);
//! ```
//!
//! The [`cga`] module extends a base algebra to its conformal model, with
//! `up`/`down` embeddings, translators, and direct object interpolation.

pub mod cga;
pub mod error;
pub mod layout;
pub mod multivector;
pub mod ops;
pub mod random;
pub mod rotor;
pub mod types;

pub use cga::{interp_objects_root, rotor_between_objects, Conformal, ObjectKind};
pub use error::{Error, Result};
pub use layout::{build_layout, Layout, MAX_DIMENSION};
pub use multivector::MultiVector;
pub use ops::{project, reflect, reject, Project, Reflect};
pub use random::{random_multivector, random_rotor, random_vector, random_with_grades};
pub use rotor::{
    angle_between_vectors, exp, generate_rotation_rotor, is_rotor, log, rotor_vector_to_vector,
    sandwich,
};
pub use types::{Scalar, EPS};

/// Convenience glob import for downstream code and tests.
pub mod prelude {
    pub use crate::cga::{interp_objects_root, rotor_between_objects, Conformal, ObjectKind};
    pub use crate::error::{Error, Result};
    pub use crate::layout::{build_layout, Layout, MAX_DIMENSION};
    pub use crate::multivector::MultiVector;
    pub use crate::ops::{project, reflect, reject, Project, Reflect};
    pub use crate::rotor::{exp, generate_rotation_rotor, is_rotor, log, sandwich};
    pub use crate::types::{Scalar, EPS};
}
