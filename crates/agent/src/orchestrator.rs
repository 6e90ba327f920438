//! Turn orchestrator: one query in, one answer out.
//!
//! Owns the full sequence for a turn: validate, retrieve, classify, build
//! context, compose, complete, append. The conversation is only modified
//! once the completion has succeeded, so a failed turn leaves no trace.

use gamechat_core::dataset::{ColumnSummary, Label, RowRetriever};
use gamechat_core::message::{Conversation, Turn};
use gamechat_core::provider::{Provider, ProviderRequest};
use gamechat_core::session::{SessionId, SessionStore};
use gamechat_core::{Error, Result};
use std::sync::Arc;
use tracing::{debug, info};

use crate::classifier::QueryClassifier;
use crate::context;
use crate::history::DEFAULT_RECENT_LIMIT;
use crate::prompt::PromptComposer;

/// Reply text for a session reset.
pub const RESET_MESSAGE: &str = "Conversation reset.";

const EMPTY_QUERY: &str = "Query field is required and cannot be empty.";

/// Result of a successful turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    /// The completion text, returned verbatim.
    pub answer: String,
    /// Which branch the query was routed to.
    pub label: Label,
    /// Rows fetched for this turn (zero on the metadata branch when retrieval is deferred).
    pub rows_retrieved: usize,
}

/// Drives a single conversation turn against the dataset.
pub struct TurnOrchestrator {
    provider: Arc<dyn Provider>,
    model: String,
    temperature: f32,
    max_tokens: Option<u32>,
    classifier: QueryClassifier,
    retriever: Arc<dyn RowRetriever>,
    summaries: Arc<[ColumnSummary]>,
    sessions: Arc<dyn SessionStore>,
    composer: PromptComposer,
    defer_row_retrieval: bool,
}

impl TurnOrchestrator {
    pub fn new(
        provider: Arc<dyn Provider>,
        model: impl Into<String>,
        retriever: Arc<dyn RowRetriever>,
        summaries: Arc<[ColumnSummary]>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        let model = model.into();
        Self {
            classifier: QueryClassifier::new(provider.clone(), model.clone()),
            provider,
            model,
            temperature: 0.7,
            max_tokens: None,
            retriever,
            summaries,
            sessions,
            composer: PromptComposer::new(DEFAULT_RECENT_LIMIT),
            defer_row_retrieval: false,
        }
    }

    /// Temperature for answer generation. Classification is unaffected.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Number of turns quoted verbatim in each prompt.
    pub fn with_recent_limit(mut self, recent_limit: usize) -> Self {
        self.composer = PromptComposer::new(recent_limit);
        self
    }

    /// Retrieve rows only after a query is classified as row-specific.
    pub fn with_deferred_retrieval(mut self, defer: bool) -> Self {
        self.defer_row_retrieval = defer;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// The column summaries behind the metadata branch.
    pub fn summaries(&self) -> &[ColumnSummary] {
        &self.summaries
    }

    /// Row count of the dataset, as recorded in the column summaries.
    pub fn total_rows(&self) -> usize {
        self.summaries.first().map(|s| s.total_rows).unwrap_or(0)
    }

    /// Answer `query` and append the turn to `conversation` on success.
    pub async fn handle(&self, query: &str, conversation: &mut Conversation) -> Result<TurnOutcome> {
        if query.trim().is_empty() {
            return Err(Error::Validation(EMPTY_QUERY.into()));
        }

        // Retrieval runs before classification unless deferred.
        let mut rows = if self.defer_row_retrieval {
            Vec::new()
        } else {
            self.retriever.retrieve(query).await?
        };

        let label = self.classifier.classify(query, conversation).await?;

        if self.defer_row_retrieval && label == Label::RowSpecific {
            rows = self.retriever.retrieve(query).await?;
        }

        let context = context::build(label, &rows, &self.summaries);
        let prompt = self.composer.compose(label, conversation, query, &context);
        debug!(label = %label, rows = rows.len(), prompt_len = prompt.len(), "Prompt composed");

        let mut request = ProviderRequest::prompt(self.model.clone(), prompt);
        request.temperature = self.temperature;
        request.max_tokens = self.max_tokens;
        let response = self.provider.complete(request).await?;
        let answer = response.content;

        conversation.push(Turn::new(query, answer.clone()));

        info!(
            label = %label,
            rows = rows.len(),
            answer_len = answer.len(),
            turns = conversation.len(),
            "Turn completed"
        );

        Ok(TurnOutcome {
            answer,
            label,
            rows_retrieved: rows.len(),
        })
    }

    /// Run a turn against the conversation stored for `session`.
    ///
    /// The stored conversation is replaced only when the turn succeeds.
    /// Concurrent turns on one session are last-writer-wins.
    pub async fn handle_session(&self, session: &SessionId, query: &str) -> Result<TurnOutcome> {
        let mut conversation = self.sessions.get(session).await?;
        let outcome = self.handle(query, &mut conversation).await?;
        self.sessions.put(session, conversation).await?;
        Ok(outcome)
    }

    /// Forget the conversation stored for `session`. Idempotent.
    pub async fn reset_session(&self, session: &SessionId) -> Result<&'static str> {
        self.sessions.clear(session).await?;
        info!(session = %session, "Conversation reset");
        Ok(RESET_MESSAGE)
    }

    /// Read-only copy of a session's conversation.
    pub async fn conversation(&self, session: &SessionId) -> Result<Conversation> {
        Ok(self.sessions.get(session).await?)
    }
}
