//! Session snapshot - the full observable state of one exchange.

use qa_core::EvidenceChunk;
use serde::{Deserialize, Serialize};

use super::states::SessionPhase;

/// Immutable view of the current exchange, published to consumers.
///
/// The fold produces a new snapshot rather than mutating in place, so
/// a consumer can hold one without it changing underneath. Within one
/// exchange `answer_text` only ever grows; `evidence` and
/// `answer_text` are emptied only when a new question starts or on
/// reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,

    /// Query announced during the `searching` phase.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,

    /// Evidence chunks backing the answer, in server order.
    #[serde(default)]
    pub evidence: Vec<EvidenceChunk>,

    /// Answer text accumulated so far.
    #[serde(default)]
    pub answer_text: String,

    /// Server-issued exchange identifier, set by the `done` event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange_id: Option<String>,

    /// Message carried by the terminal `error` phase.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl SessionSnapshot {
    /// Baseline published the moment a new question is accepted.
    pub fn thinking() -> Self {
        Self {
            phase: SessionPhase::Thinking,
            ..Self::default()
        }
    }
}
