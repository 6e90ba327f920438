//! Prompt composition.
//!
//! A prompt is a branch-specific header carrying the context, then the
//! bounded history, then the new query as an open `Assistant:` turn.

use gamechat_core::dataset::Label;
use gamechat_core::message::Conversation;

use crate::history::{self, DEFAULT_RECENT_LIMIT};

const ROW_HEADER: &str = "This is a conversation about video games. Here is some context:\n\n";

const METADATA_HEADER: &str = "You are a knowledgeable assistant for a dataset about video games.\n\
Please respond concisely to the user's question based on the information provided.\n\
Do not reference this context explicitly unless the user asks for details.\n\
Here is the dataset context:\n";

/// Builds the single user message sent to the completion service.
#[derive(Debug, Clone, Copy)]
pub struct PromptComposer {
    recent_limit: usize,
}

impl PromptComposer {
    pub fn new(recent_limit: usize) -> Self {
        Self { recent_limit }
    }

    pub fn recent_limit(&self) -> usize {
        self.recent_limit
    }

    /// Compose the prompt for `query`. Identical inputs give identical output.
    pub fn compose(&self, label: Label, conversation: &Conversation, query: &str, context: &str) -> String {
        let bounded = history::bound(conversation, self.recent_limit);

        let mut prompt = match label {
            Label::RowSpecific => format!("{ROW_HEADER}{context}\n\n"),
            Label::Metadata => format!("{METADATA_HEADER}{context}\n\n"),
        };

        if !bounded.summary.is_empty() {
            prompt.push_str(&format!("Summary of previous conversation: {}\n\n", bounded.summary));
        }

        for turn in bounded.recent {
            prompt.push_str(&format!("User: {}\nAssistant: {}\n", turn.user, turn.assistant));
        }

        prompt.push_str(&format!("User: {query}\nAssistant:"));
        prompt
    }
}

impl Default for PromptComposer {
    fn default() -> Self {
        Self::new(DEFAULT_RECENT_LIMIT)
    }
}
