//! qa_state - Session state machine for the streaming Q&A exchange
//!
//! Folds decoded stream events into immutable snapshots of the
//! current exchange. Pure logic: no I/O, no async, independently
//! testable without a network layer.

pub mod machine;

// Re-export commonly used types
pub use machine::{fold, SessionPhase, SessionSnapshot};
