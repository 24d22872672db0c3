//! Domain layer: shared types, the closed error set, role constants,
//! and input-validation helpers.
//!
//! This crate knows nothing about HTTP or the database driver; the
//! transport layer maps [`error::CoreError`] to status codes exactly
//! once, at the boundary.

pub mod error;
pub mod roles;
pub mod types;
pub mod validation;
