//! Per-workflow panel state.
//!
//! - `state.rs` - selection, busy flag, hover and results
//! - `intent.rs` - what can happen to a workflow
//! - `reducer.rs` - state transitions

mod intent;
mod reducer;
mod state;

pub use intent::WorkflowIntent;
pub use reducer::WorkflowReducer;
pub use state::{WorkflowKind, WorkflowState};
