//! Session domain: messages exchanged with the model and the shapes of
//! its responses, whole or streamed.

pub mod entities;
pub mod response;
pub mod stream;

pub use entities::{FunctionCall, Message, Role, SUMMARY_PREFIX, ToolCallRecord};
pub use response::{Completion, TokenUsage};
pub use stream::{StreamAccumulator, StreamEvent};
