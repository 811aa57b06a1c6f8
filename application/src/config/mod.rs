//! Application-level configuration.
//!
//! - [`ChatConfig`]: model, sampling, tool calling and context control

pub mod chat_config;

pub use chat_config::ChatConfig;
