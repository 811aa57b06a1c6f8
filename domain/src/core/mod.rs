//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: identifier of the chat model driving a session
//! - [`error::DomainError`]: domain-level errors
//! - [`string`]: character-safe text helpers

pub mod error;
pub mod model;
pub mod string;
