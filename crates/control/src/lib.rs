//! Render Loop Controller: drives per-frame update and draw while keys are held.
//!
//! # Invariants
//! - At most one frame request is in flight.
//! - Key-up never schedules or cancels; the loop goes idle only at the end of a tick.
//! - One extra frame renders after the last key is released.

pub mod frame_loop;
pub mod scheduler;

pub use frame_loop::{LoopState, RenderLoop};
pub use scheduler::{FrameRequest, FrameScheduler, FrameSlot, ManualScheduler};
