use reqwest::StatusCode;
use thiserror::Error;

/// Errors returned directly to callers of the client API.
///
/// Failures inside a running exchange are not returned from `ask`;
/// they are folded into the published snapshot as a terminal `error`
/// phase instead.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The question was empty after trimming. No request was made.
    #[error("question must not be empty")]
    EmptyQuestion,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response to a plain (non-streaming) call.
    #[error("HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },
}
