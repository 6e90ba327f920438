//! Provider-backed column summarizer.

use async_trait::async_trait;
use gamechat_core::dataset::ColumnSummarizer;
use gamechat_core::provider::{Provider, ProviderRequest};
use std::sync::Arc;
use tracing::debug;

/// Describes a dataset column by asking the completion service.
pub struct ProviderColumnSummarizer {
    provider: Arc<dyn Provider>,
    model: String,
}

impl ProviderColumnSummarizer {
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }
}

#[async_trait]
impl ColumnSummarizer for ProviderColumnSummarizer {
    async fn describe(&self, column: &str, samples: &[String]) -> gamechat_core::Result<String> {
        let prompt = format!(
            "Based on the column name and content provided, generate a concise and general summary \
that describes the main purpose of this column in a dataset about game descriptions.\n\n\
Column Name: {column}\n\
Column Content: {}\n\n\
The summary should briefly explain what information this column contains without going into \
extensive detail.",
            samples.join(", ")
        );

        debug!(column, samples = samples.len(), "Requesting column summary");
        let response = self
            .provider
            .complete(ProviderRequest::prompt(self.model.clone(), prompt))
            .await?;
        Ok(response.content)
    }
}
