//! Incremental decoder for the line-framed answer stream.
//!
//! The chat call answers with `text/event-stream`-style framing, one
//! `data: ` line per event, but the transport hands over raw byte
//! chunks cut at arbitrary points. The decoder buffers the trailing
//! partial line between feeds, so a frame split anywhere, including
//! inside the `data: ` prefix or a multi-byte character, decodes once
//! the rest arrives.

use log::debug;
use qa_core::StreamEvent;

const DATA_PREFIX: &str = "data: ";

/// Stateful frame decoder for one streaming call.
///
/// One instance per call; nothing survives to the next call. The
/// buffer holds raw bytes so that chunk boundaries never split a
/// UTF-8 code point: text is only decoded per complete line.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    buffer: Vec<u8>,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one raw chunk and return every event it completes.
    ///
    /// A malformed or unrecognized frame is dropped without affecting
    /// later ones. A trailing line not yet terminated by `'\n'` stays
    /// buffered for the next feed; if the stream ends first the
    /// partial frame is never emitted.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<StreamEvent> {
        self.buffer.extend_from_slice(chunk);

        let mut events = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&line[..line.len() - 1]);
            if let Some(event) = decode_line(&line) {
                events.push(event);
            }
        }
        events
    }
}

/// Decode one complete line, without its terminator.
///
/// Lines that are not single-line `data: ` frames (blank separators,
/// `: keep-alive` comments, named-event headers) carry nothing here
/// and are skipped.
fn decode_line(line: &str) -> Option<StreamEvent> {
    let payload = line.strip_prefix(DATA_PREFIX)?.trim();
    if payload.is_empty() {
        return None;
    }
    match serde_json::from_str::<StreamEvent>(payload) {
        Ok(event) => Some(event),
        Err(err) => {
            debug!("dropping malformed frame: {err}: {payload}");
            None
        }
    }
}
