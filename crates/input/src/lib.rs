//! Input Tracker: held-key state and the fixed key-to-action bindings.
//!
//! # Invariants
//! - Keys are identified by host key strings (`"w"`, `"ArrowUp"`) compared by equality.
//! - Key-up only clears a flag; it never removes the key or schedules anything.

pub mod action;
pub mod state;

pub use action::{Action, BINDINGS, Direction, TurnAxis, binding};
pub use state::InputState;

pub fn crate_info() -> &'static str {
    "marchview-input v0.1.0"
}
