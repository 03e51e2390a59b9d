//! Event fold - turns one decoded event into the next snapshot.

use qa_core::StreamEvent;

use super::snapshot::SessionSnapshot;
use super::states::SessionPhase;

/// Fold one decoded event into `previous`, producing the next snapshot.
///
/// Pure: no I/O, no clock. Any event is accepted in any phase; the
/// protocol only loosely orders events (thinking/searching before
/// streaming before done) and an out-of-order frame must update state
/// rather than break the consumer. Suppressing events after a
/// terminal phase is the controller's job, it stops feeding the fold
/// once `done` or `error` has been applied.
pub fn fold(previous: &SessionSnapshot, event: &StreamEvent) -> SessionSnapshot {
    let mut next = previous.clone();
    match event {
        StreamEvent::Thinking {} => {
            next.phase = SessionPhase::Thinking;
            next.search_query = None;
        }
        StreamEvent::Searching { query } => {
            next.phase = SessionPhase::Searching;
            next.search_query = Some(query.clone());
        }
        // Replaces the whole set; the phase stays as it was.
        StreamEvent::Evidence { chunks } => {
            next.evidence = chunks.clone();
        }
        StreamEvent::Chunk { text } => {
            next.phase = SessionPhase::Streaming;
            next.answer_text.push_str(text);
        }
        StreamEvent::Done { chat_id } => {
            next.phase = SessionPhase::Done;
            next.exchange_id = Some(chat_id.clone());
        }
        StreamEvent::Error { message } => {
            next.phase = SessionPhase::Error;
            next.error_message = Some(message.clone());
        }
    }
    next
}
