//! Rendering Adapter: renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers never mutate camera state.
//! - Each frame pushes exactly eye, back and up; resolution is the renderer's own concern.
//!
//! The wgpu backend lives in `marchview-render-wgpu`. [`DebugTextRenderer`]
//! implements the same trait for headless runs and tests.

mod renderer;

pub use renderer::{DebugTextRenderer, RenderView, Renderer};

pub fn crate_info() -> &'static str {
    "marchview-render v0.1.0"
}
