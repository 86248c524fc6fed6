//! Camera State: eye position, two unbounded rotation angles, and the
//! orthonormal basis derived from them.
//!
//! # Invariants
//! - `up` is renormalized every time it is read.
//! - `back` and `right` are unit length after derivation.
//! - All keys held in one frame move along the same basis snapshot.
//! - Speeds are per tick, not per second.

pub mod camera;
pub mod config;

pub use camera::{Basis, CameraState, MOVE_SPEED, TURN_SPEED};
pub use config::{CameraConfig, ConfigError};
