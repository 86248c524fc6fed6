//! Shared vector math for the marchview workspace.
//!
//! # Invariants
//! - Functions are pure and allocation-free.
//! - Zero-length vectors are never normalized; callers keep `up` non-degenerate.

pub mod math;

pub use glam::Vec3;
pub use math::{cross, normalize};
