//! OpenAI-compatible chat completions provider
//!
//! Talks to any endpoint that speaks the `/chat/completions` protocol.
//!
//! ```text
//! CompletionRequest ──► wire::request_body ──► POST {base_url}/chat/completions
//!                                                  │
//!                        ┌─────────────────────────┴─────────────┐
//!                  stream = false                          stream = true
//!                        │                                       │
//!            wire::parse_completion               sse::SseDecoder (spawned task)
//!                        │                                       │
//!                    Completion                   StreamHandle (mpsc of StreamEvent)
//! ```

mod client;
mod sse;
mod wire;

pub use client::{DEFAULT_BASE_URL, OpenAiConfig, OpenAiProvider};
