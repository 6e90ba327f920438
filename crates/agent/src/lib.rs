//! The query routing and context-composition core of GameChat.
//!
//! Every turn follows the same sequence:
//!
//! 1. **Validate** the query (non-blank)
//! 2. **Retrieve** candidate rows by keyword
//! 3. **Classify** the query as metadata or row-specific
//! 4. **Build context**: row blocks or column summaries
//! 5. **Compose** one prompt from bounded history, context, and query
//! 6. **Complete** the prompt with the provider
//! 7. **Append** the turn to the conversation
//!
//! A failure at any step leaves the conversation untouched.

pub mod classifier;
pub mod context;
pub mod history;
pub mod orchestrator;
pub mod prompt;
pub mod summarizer;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use classifier::QueryClassifier;
pub use history::{BoundedHistory, DEFAULT_RECENT_LIMIT, bound};
pub use orchestrator::{RESET_MESSAGE, TurnOrchestrator, TurnOutcome};
pub use prompt::PromptComposer;
pub use summarizer::ProviderColumnSummarizer;
