//! Minimal server-sent-event line codec.
//!
//! Both ends of the relay speak the same framing: the backend decodes the
//! completion API's event stream and re-encodes fragments for the browser, and
//! the frontend decodes the relay's stream. Only `data:` lines matter here;
//! other fields (`event:`, `id:`, comments) are ignored.

use crate::requests::StreamChunk;

/// Sentinel payload that terminates a stream.
pub const DONE_PAYLOAD: &str = "[DONE]";

/// A decoded `data:` line.
#[derive(Debug, Clone, PartialEq)]
pub enum SseEvent {
    Data(String),
    Done,
}

/// Incremental decoder that accepts arbitrary byte chunks.
///
/// Bytes are buffered until a full line (`\n`, optionally preceded by `\r`)
/// is available, so chunks may split lines and multi-byte characters anywhere.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds a chunk and returns the events completed by it, in order.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<SseEvent> {
        self.buffer.extend_from_slice(chunk);
        let mut events = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let mut line: Vec<u8> = self.buffer.drain(..=pos).collect();
            line.pop();
            if line.ends_with(b"\r") {
                line.pop();
            }
            if let Some(event) = parse_line(&String::from_utf8_lossy(&line)) {
                events.push(event);
            }
        }
        events
    }

    /// Decodes a trailing line that was not newline-terminated.
    pub fn finish(&mut self) -> Option<SseEvent> {
        let rest = std::mem::take(&mut self.buffer);
        parse_line(String::from_utf8_lossy(&rest).trim_end_matches('\r'))
    }
}

fn parse_line(line: &str) -> Option<SseEvent> {
    let payload = line.strip_prefix("data:")?;
    let payload = payload.strip_prefix(' ').unwrap_or(payload);
    if payload == DONE_PAYLOAD {
        Some(SseEvent::Done)
    } else {
        Some(SseEvent::Data(payload.to_string()))
    }
}

/// Encodes one relay event: `data: {"content": ...}\n\n`.
pub fn encode_chunk(content: &str) -> String {
    let chunk = StreamChunk {
        content: content.to_string(),
    };
    // Serializing a struct with a single string field cannot fail.
    let json = serde_json::to_string(&chunk).unwrap_or_else(|_| String::from("{\"content\":\"\"}"));
    format!("data: {}\n\n", json)
}

/// Encodes the terminating event: `data: [DONE]\n\n`.
pub fn encode_done() -> String {
    format!("data: {}\n\n", DONE_PAYLOAD)
}

/// Parses the payload of a relay event. Callers log a malformed payload and
/// skip it rather than aborting the stream.
pub fn decode_chunk(payload: &str) -> Result<StreamChunk, serde_json::Error> {
    serde_json::from_str(payload)
}
