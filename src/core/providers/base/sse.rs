//! Server-Sent Events decoding
//!
//! Splits a byte stream into `data:` payloads. Other SSE fields (`event`,
//! `id`, `retry`) and comments are ignored. Bytes are buffered until a line
//! is complete, so a UTF-8 sequence split across network chunks decodes intact.

use bytes::BytesMut;

/// One decoded frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseFrame {
    /// Payload of a `data:` line
    Data(String),
    /// The `[DONE]` end marker
    Done,
}

/// Incremental line decoder
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: BytesMut,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed raw bytes, returning frames for every complete line
    pub fn push(&mut self, bytes: &[u8]) -> Vec<SseFrame> {
        self.buffer.extend_from_slice(bytes);

        let Some(last_newline) = self.buffer.iter().rposition(|&b| b == b'\n') else {
            return Vec::new();
        };

        let complete = self.buffer.split_to(last_newline + 1);
        decode_lines(&complete)
    }

    /// Flush a trailing line that was not newline-terminated
    pub fn finish(&mut self) -> Vec<SseFrame> {
        let rest = self.buffer.split();
        decode_lines(&rest)
    }
}

fn decode_lines(bytes: &[u8]) -> Vec<SseFrame> {
    String::from_utf8_lossy(bytes)
        .lines()
        .filter_map(parse_line)
        .collect()
}

fn parse_line(line: &str) -> Option<SseFrame> {
    let line = line.trim_end_matches('\r');
    if line.is_empty() || line.starts_with(':') {
        return None;
    }
    let data = line.strip_prefix("data:")?.trim_start();
    if data.trim() == "[DONE]" {
        Some(SseFrame::Done)
    } else {
        Some(SseFrame::Data(data.to_string()))
    }
}
