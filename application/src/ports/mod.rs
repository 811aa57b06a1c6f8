//! Port definitions (interfaces) for external adapters
//!
//! Ports define the interfaces that the application layer uses to
//! interact with external systems. Adapters in the infrastructure
//! layer implement these ports.

pub mod conversation_repository;
pub mod llm_provider;
pub mod summarizer;
pub mod tool_executor;
