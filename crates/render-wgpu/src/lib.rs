//! wgpu graphics binding for the marchview camera viewer.
//!
//! Draws one full-screen quad with a user-supplied WGSL shader pair. The
//! scene lives entirely in the fragment shader; this crate only feeds it the
//! viewport resolution and the camera's eye, back and up vectors.
//!
//! # Invariants
//! - One shader program and one quad for the renderer's lifetime.
//! - Shader compile and link failures are returned, never panicked.
//! - Resolution is rewritten on resize; camera vectors on every frame.

mod error;
mod gpu;
mod shaders;

pub use error::GpuError;
pub use gpu::{QUAD_VERTICES, Uniforms, WgpuRenderer};
pub use shaders::{ShaderSources, ShaderStage};
