//! Keyword row retriever.
//!
//! Scores every row by how many query keywords appear in it, weighting a
//! hit in the game name above hits in descriptive fields. This is a plain
//! lexical match, not a ranking engine.

use async_trait::async_trait;
use gamechat_core::dataset::{RowRecord, RowRetriever};
use gamechat_core::error::RetrievalError;
use std::sync::Arc;
use tracing::debug;

use crate::table::GameTable;

/// Words that never count as keywords.
const STOPWORDS: &[&str] = &[
    "about", "all", "and", "any", "are", "can", "does", "for", "from", "game", "games", "give",
    "has", "have", "how", "into", "is", "it", "its", "know", "like", "many", "me", "more",
    "related", "show", "some", "tell", "that", "the", "their", "them", "there", "this", "what",
    "when", "where", "which", "who", "with", "you", "your",
];

const NAME_WEIGHT: usize = 3;
const FIELD_WEIGHT: usize = 1;

/// Retrieves rows from a [`GameTable`] by keyword overlap with the query.
pub struct KeywordRetriever {
    table: Arc<GameTable>,
    max_rows: usize,
}

impl KeywordRetriever {
    pub fn new(table: Arc<GameTable>, max_rows: usize) -> Self {
        Self { table, max_rows }
    }

    /// Synchronous core of [`RowRetriever::retrieve`].
    pub fn search(&self, query: &str) -> Vec<RowRecord> {
        let keywords = keywords(query);
        if keywords.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(usize, usize)> = self
            .table
            .rows()
            .iter()
            .enumerate()
            .filter_map(|(index, row)| {
                let score = score_row(row, &keywords);
                (score > 0).then_some((index, score))
            })
            .collect();

        // Stable sort keeps table order among equal scores.
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored.truncate(self.max_rows);

        debug!(keywords = ?keywords, matches = scored.len(), "Keyword retrieval");

        scored
            .into_iter()
            .map(|(index, _)| self.table.rows()[index].clone())
            .collect()
    }
}

#[async_trait]
impl RowRetriever for KeywordRetriever {
    async fn retrieve(&self, query: &str) -> Result<Vec<RowRecord>, RetrievalError> {
        Ok(self.search(query))
    }
}

/// Lowercase alphanumeric words of at least three characters, minus
/// stopwords, deduplicated in query order.
fn keywords(query: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for word in query
        .split(|c: char| !c.is_alphanumeric())
        .map(str::to_lowercase)
        .filter(|w| w.chars().count() >= 3 && !STOPWORDS.contains(&w.as_str()))
    {
        if !out.contains(&word) {
            out.push(word);
        }
    }
    out
}

fn score_row(row: &RowRecord, keywords: &[String]) -> usize {
    let name = row.name.to_lowercase();
    let fields = [
        row.genres.to_lowercase(),
        row.short_description.to_lowercase(),
        row.developer.to_lowercase(),
        row.publisher.to_lowercase(),
    ];

    keywords
        .iter()
        .map(|k| {
            let in_name = if name.contains(k.as_str()) { NAME_WEIGHT } else { 0 };
            let in_fields = fields.iter().filter(|f| f.contains(k.as_str())).count() * FIELD_WEIGHT;
            in_name + in_fields
        })
        .sum()
}
