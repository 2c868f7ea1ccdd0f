// src/ops/mod.rs
//! Geometric operations layered on top of the core products.

pub mod projection;
pub mod reflection;

pub use projection::{project, reject, Project};
pub use reflection::{reflect, Reflect};
