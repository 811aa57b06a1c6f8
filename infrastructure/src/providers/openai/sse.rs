//! Server-sent events decoding for streamed completions.

use super::wire::WireUsage;
use serde::Deserialize;
use serde_json::Value;
use toolchat_domain::StreamEvent;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct FunctionDelta {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    arguments: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ToolCallDelta {
    index: usize,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    function: Option<FunctionDelta>,
}

#[derive(Debug, Deserialize)]
struct Delta {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<ToolCallDelta>>,
}

#[derive(Debug, Deserialize)]
struct ChunkChoice {
    delta: Delta,
}

#[derive(Debug, Deserialize)]
struct Chunk {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
    #[serde(default)]
    usage: Option<WireUsage>,
}

/// Incremental decoder: bytes in, [`StreamEvent`]s out.
///
/// Bytes are buffered until a full line is available, so chunk boundaries
/// may fall anywhere, including inside a multi-byte character.
#[derive(Debug, Default)]
pub(crate) struct SseDecoder {
    buffer: Vec<u8>,
    done: bool,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once `data: [DONE]` has been seen.
    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn feed(&mut self, bytes: &[u8]) -> Vec<StreamEvent> {
        self.buffer.extend_from_slice(bytes);
        let mut events = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&line);
            self.decode_line(line.trim(), &mut events);
        }
        events
    }

    /// Flush a final line that arrived without a trailing newline.
    pub fn finish(&mut self) -> Vec<StreamEvent> {
        let rest = std::mem::take(&mut self.buffer);
        let mut events = Vec::new();
        let line = String::from_utf8_lossy(&rest);
        self.decode_line(line.trim(), &mut events);
        events
    }

    fn decode_line(&mut self, line: &str, events: &mut Vec<StreamEvent>) {
        if self.done {
            return;
        }
        // Blank separators, comments and non-data fields carry nothing for us
        let Some(data) = line.strip_prefix("data:") else {
            return;
        };
        let data = data.trim();

        if data == "[DONE]" {
            self.done = true;
            events.push(StreamEvent::Completed);
            return;
        }

        let value: Value = match serde_json::from_str(data) {
            Ok(v) => v,
            Err(e) => {
                events.push(StreamEvent::Error(format!("Malformed stream chunk: {}", e)));
                return;
            }
        };

        if let Some(message) = value.get("error").map(|e| {
            e.get("message")
                .and_then(Value::as_str)
                .map_or_else(|| e.to_string(), str::to_string)
        }) {
            events.push(StreamEvent::Error(message));
            return;
        }

        let chunk: Chunk = match serde_json::from_value(value) {
            Ok(c) => c,
            Err(e) => {
                debug!("Skipping unrecognized stream chunk: {}", e);
                return;
            }
        };

        for choice in chunk.choices {
            if let Some(text) = choice.delta.content
                && !text.is_empty()
            {
                events.push(StreamEvent::Delta(text));
            }
            for call in choice.delta.tool_calls.unwrap_or_default() {
                let (name, arguments_delta) = match call.function {
                    Some(f) => (f.name, f.arguments),
                    None => (None, None),
                };
                events.push(StreamEvent::ToolCallDelta {
                    index: call.index,
                    id: call.id,
                    name,
                    arguments_delta,
                });
            }
        }

        if let Some(usage) = chunk.usage {
            events.push(StreamEvent::Usage(usage.into()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolchat_domain::{StreamAccumulator, TokenUsage};

    #[test]
    fn test_text_deltas_and_done() {
        let mut decoder = SseDecoder::new();
        let events = decoder.feed(
            b"data: {\"choices\":[{\"delta\":{\"role\":\"assistant\",\"content\":\"Hel\"}}]}\n\n\
              data: {\"choices\":[{\"delta\":{\"content\":\"lo\"}}]}\n\n\
              data: [DONE]\n\n",
        );
        assert_eq!(
            events,
            vec![
                StreamEvent::Delta("Hel".into()),
                StreamEvent::Delta("lo".into()),
                StreamEvent::Completed,
            ]
        );
        assert!(decoder.is_done());
    }

    #[test]
    fn test_line_split_across_chunks() {
        let mut decoder = SseDecoder::new();
        let line = "data: {\"choices\":[{\"delta\":{\"content\":\"héllo\"}}]}\n".as_bytes();
        // Split inside the two-byte 'é'
        let split = line.iter().position(|b| *b == 0xC3).unwrap() + 1;
        assert!(decoder.feed(&line[..split]).is_empty());
        assert_eq!(
            decoder.feed(&line[split..]),
            vec![StreamEvent::Delta("héllo".into())]
        );
    }

    #[test]
    fn test_tool_call_fragments_accumulate() {
        let mut decoder = SseDecoder::new();
        let mut events = decoder.feed(
            b"data: {\"choices\":[{\"delta\":{\"tool_calls\":[{\"index\":0,\"id\":\"call_1\",\"type\":\"function\",\"function\":{\"name\":\"extract_todos\",\"arguments\":\"\"}}]}}]}\n",
        );
        events.extend(decoder.feed(
            b"data: {\"choices\":[{\"delta\":{\"tool_calls\":[{\"index\":0,\"function\":{\"arguments\":\"{\\\"path\\\":\"}}]}}]}\n",
        ));
        events.extend(decoder.feed(
            b"data: {\"choices\":[{\"delta\":{\"tool_calls\":[{\"index\":0,\"function\":{\"arguments\":\"\\\".\\\"}\"}}]}}]}\n",
        ));
        events.extend(decoder.feed(
            b"data: {\"choices\":[],\"usage\":{\"prompt_tokens\":9,\"completion_tokens\":4}}\n",
        ));

        let mut accumulator = StreamAccumulator::new();
        for event in &events {
            accumulator.push(event);
        }
        let completion = accumulator.finish();
        assert_eq!(completion.tool_calls.len(), 1);
        assert_eq!(completion.tool_calls[0].id, "call_1");
        assert_eq!(completion.tool_calls[0].arguments_json(), "{\"path\":\".\"}");
        assert_eq!(completion.usage, Some(TokenUsage::new(9, 4)));
    }

    #[test]
    fn test_error_chunk() {
        let mut decoder = SseDecoder::new();
        let events = decoder.feed(b"data: {\"error\":{\"message\":\"overloaded\"}}\n");
        assert_eq!(events, vec![StreamEvent::Error("overloaded".into())]);
    }

    #[test]
    fn test_comments_ignored_and_finish_flushes() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.feed(b": keep-alive\n\n").is_empty());
        assert!(decoder.feed(b"data: [DONE]").is_empty());
        assert_eq!(decoder.finish(), vec![StreamEvent::Completed]);
    }
}
