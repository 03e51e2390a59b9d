//! qa_core - Wire-level data model for the subject Q&A streaming API
//!
//! Pure data: the server-sent event taxonomy, evidence chunks and the
//! feedback rating. No I/O or async lives here.

pub mod event;
pub mod feedback;

// Re-export commonly used types
pub use event::{EvidenceChunk, StreamEvent};
pub use feedback::Rating;
