//! # GameChat Core
//!
//! Domain types, traits, and error definitions for the GameChat
//! conversational retrieval layer. This crate has **zero framework
//! dependencies**: it defines the domain model that every other crate
//! implements against.
//!
//! ## Seams
//!
//! Each external collaborator is a trait here, with implementations in
//! their own crates:
//! - [`Provider`]: the completion service
//! - [`RowRetriever`]: keyword row lookup over the game table
//! - [`ColumnSummarizer`]: natural-language column descriptions
//! - [`SessionStore`]: per-client conversation storage

pub mod dataset;
pub mod error;
pub mod message;
pub mod provider;
pub mod session;

// Re-export key types at crate root for ergonomics
pub use dataset::{ColumnSummarizer, ColumnSummary, Label, RowRecord, RowRetriever};
pub use error::{Error, ErrorKind, Result};
pub use message::{Conversation, Message, Role, Turn};
pub use provider::{Provider, ProviderRequest, ProviderResponse, Usage};
pub use session::{SessionId, SessionStore};
