//! Query classifier.
//!
//! Asks the completion service whether a query is about the dataset as a
//! whole (metadata) or about particular games (row-specific). The reply is
//! parsed as an untrusted label; anything outside the two labels is a
//! classification error rather than a silent default.

use gamechat_core::dataset::Label;
use gamechat_core::message::{Conversation, Message};
use gamechat_core::provider::{Provider, ProviderRequest};
use std::sync::Arc;
use tracing::debug;

const SYSTEM_PROMPT: &str = "You are determining whether the user's query pertains to metadata \
about the dataset or specific row-based information. Use the last user input or assistant \
response to help clarify if the query is vague.";

/// Classifies queries with one completion call each.
pub struct QueryClassifier {
    provider: Arc<dyn Provider>,
    model: String,
    temperature: f32,
}

impl QueryClassifier {
    /// Classification runs at temperature 0 unless overridden.
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature: 0.0,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Label `query`, using the previous turn's user text as context.
    pub async fn classify(&self, query: &str, conversation: &Conversation) -> gamechat_core::Result<Label> {
        let previous = conversation.last().map(|t| t.user.as_str()).unwrap_or("");

        let request = ProviderRequest {
            model: self.model.clone(),
            messages: vec![
                Message::system(SYSTEM_PROMPT),
                Message::user(user_prompt(previous, query)),
            ],
            temperature: self.temperature,
            max_tokens: None,
        };

        let response = self.provider.complete(request).await?;
        let label = response.content.parse::<Label>()?;
        debug!(label = %label, reply = %response.content.trim(), "Query classified");
        Ok(label)
    }
}

fn user_prompt(previous: &str, query: &str) -> String {
    format!(
        "Previous context: \"{previous}\"\n\n\
You are working with a dataset that contains information about video games, including details \
such as titles, descriptions, genres, system requirements, ratings, reviews, and more.\n\n\
Here is a summary of the dataset structure:\n\
- \"Metadata\" includes general information about the dataset, such as the total number of \
games, descriptions of each column, and types of data in each column.\n\
- \"Row-specific\" information pertains to specific details about individual games, like \
information for a particular title or details about a specific game's rating, genre, or release \
date.\n\n\
Determine whether the following query is asking for:\n\
1. **Metadata** (general dataset information) - Examples include \"How many games are in the \
dataset?\", \"What columns are in the dataset?\", \"Describe the types of data available.\"\n\
2. **Row-specific** information - Examples include \"Tell me about Cyberpunk 2077\", \"What are \
the system requirements for Red Dead Redemption 2?\", or \"Show details for games in the RPG \
genre.\"\n\n\
Query: \"{query}\"\n\n\
Instructions:\n\
- If the query asks for general information about the dataset, such as counts, types of \
columns, or descriptions of column content, classify it as **Metadata**.\n\
- If the query asks about specific games, individual details, or content that varies per row, \
classify it as **Row-specific**.\n\
- Output \"Metadata\" or \"Row-specific\" based on the query's intent."
    )
}
