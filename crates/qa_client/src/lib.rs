//! qa_client - HTTP client and session controller for the streaming
//! subject Q&A API.
//!
//! The chat call answers with a line-framed event stream carried in
//! the response body of one POST; [`ChatSession`] drives one such
//! exchange at a time, decodes frames as bytes arrive and publishes
//! [`qa_state::SessionSnapshot`] values to subscribers.

pub mod config;
pub mod decoder;
pub mod error;
pub mod session;

// Re-export commonly used types
pub use config::ClientConfig;
pub use decoder::FrameDecoder;
pub use error::ClientError;
pub use session::ChatSession;
