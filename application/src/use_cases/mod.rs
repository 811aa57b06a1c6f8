//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod chat_orchestrator;
pub mod conversation_store;
pub mod llm_summarizer;
pub mod persona;
