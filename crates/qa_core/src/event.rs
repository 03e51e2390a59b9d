//! Stream events - the closed set of frames the chat call can emit.

use serde::{Deserialize, Serialize};

/// One fragment of source material backing an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceChunk {
    pub file_name: String,
    /// 1-based page within the source file; 0 means "no page".
    pub page_number: u32,
    /// Quoted passage. May be empty when only the location is known.
    pub excerpt: String,
}

/// A single decoded frame from the answer stream.
///
/// Adjacently tagged to match the wire shape
/// `{"type": "...", "data": {...}}`. The set is closed: a frame with
/// an unknown `type` fails to deserialize and is dropped by the
/// decoder instead of being swallowed by a default arm, so adding an
/// event kind is a compile-checked change everywhere it is matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum StreamEvent {
    /// The server accepted the question and is working on it.
    Thinking {},

    /// The server is querying the subject's material index.
    Searching { query: String },

    /// The evidence set selected for the answer. Replaces any
    /// previously announced set, it is not an append.
    Evidence {
        #[serde(default)]
        chunks: Vec<EvidenceChunk>,
    },

    /// An answer text fragment, appended to what came before.
    Chunk { text: String },

    /// The exchange completed; `chat_id` identifies it server-side.
    Done { chat_id: String },

    /// The server aborted the exchange with a message.
    Error { message: String },
}

impl StreamEvent {
    /// Whether this event ends the exchange.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done { .. } | Self::Error { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_wire_variant() {
        let cases = [
            (r#"{"type":"thinking","data":{}}"#, StreamEvent::Thinking {}),
            (
                r#"{"type":"searching","data":{"query":"mitosis"}}"#,
                StreamEvent::Searching {
                    query: "mitosis".into(),
                },
            ),
            (
                r#"{"type":"chunk","data":{"text":"Cells divide"}}"#,
                StreamEvent::Chunk {
                    text: "Cells divide".into(),
                },
            ),
            (
                r#"{"type":"done","data":{"chat_id":"c-42"}}"#,
                StreamEvent::Done {
                    chat_id: "c-42".into(),
                },
            ),
            (
                r#"{"type":"error","data":{"message":"llm unavailable"}}"#,
                StreamEvent::Error {
                    message: "llm unavailable".into(),
                },
            ),
        ];

        for (raw, expected) in cases {
            let parsed: StreamEvent = serde_json::from_str(raw).unwrap();
            assert_eq!(parsed, expected, "payload: {raw}");
        }
    }

    #[test]
    fn parses_evidence_chunks() {
        let raw = r#"{"type":"evidence","data":{"chunks":[
            {"file_name":"notes.pdf","page_number":3,"excerpt":"see fig. 2"},
            {"file_name":"slides.pdf","page_number":0,"excerpt":""}
        ]}}"#;
        let parsed: StreamEvent = serde_json::from_str(raw).unwrap();
        let StreamEvent::Evidence { chunks } = parsed else {
            panic!("expected evidence, got {parsed:?}");
        };
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].file_name, "notes.pdf");
        assert_eq!(chunks[1].page_number, 0);
    }

    #[test]
    fn evidence_tolerates_missing_chunks() {
        let parsed: StreamEvent =
            serde_json::from_str(r#"{"type":"evidence","data":{}}"#).unwrap();
        assert_eq!(parsed, StreamEvent::Evidence { chunks: vec![] });
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let result =
            serde_json::from_str::<StreamEvent>(r#"{"type":"heartbeat","data":{}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn terminal_detection() {
        assert!(StreamEvent::Done { chat_id: "c".into() }.is_terminal());
        assert!(StreamEvent::Error { message: "m".into() }.is_terminal());
        assert!(!StreamEvent::Thinking {}.is_terminal());
        assert!(!StreamEvent::Chunk { text: "t".into() }.is_terminal());
    }
}
