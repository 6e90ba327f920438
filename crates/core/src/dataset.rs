//! Dataset domain types and the retrieval seams.
//!
//! The game table is static: rows and column summaries are loaded once and
//! never mutated. Retrieval and summarization are traits so the agent can
//! be driven by a real table in production and by fixtures in tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use crate::error::{Error, RetrievalError};

/// One game entity from the source table.
///
/// Field names match the CSV header of the dataset. Values are kept as
/// text because the source is scraped and not normalized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub long_description: String,
    #[serde(default)]
    pub genres: String,
    #[serde(default)]
    pub minimum_system_requirement: String,
    #[serde(default)]
    pub recommend_system_requirement: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub developer: String,
    #[serde(default)]
    pub publisher: String,
    #[serde(default)]
    pub overall_player_rating: String,
    #[serde(default)]
    pub number_of_reviews_from_purchased_people: String,
    #[serde(default)]
    pub number_of_english_reviews: String,
    #[serde(default)]
    pub link: String,
}

/// A natural-language description of one dataset column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub column_name: String,
    pub description: String,
    pub total_rows: usize,
}

/// Which kind of context a query needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    /// Questions about the dataset as a whole (columns, counts, structure).
    #[serde(rename = "Metadata")]
    Metadata,
    /// Questions about individual games.
    #[serde(rename = "Row-specific")]
    RowSpecific,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Metadata => "Metadata",
            Label::RowSpecific => "Row-specific",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Label {
    type Err = Error;

    /// Parse a label from untrusted model output.
    ///
    /// Surrounding whitespace, quotes, markdown emphasis, and a trailing
    /// period are ignored; the comparison is case-insensitive. Anything
    /// that is not one of the two labels is a classification error.
    fn from_str(reply: &str) -> Result<Self, Self::Err> {
        let cleaned = reply
            .trim()
            .trim_matches(|c: char| matches!(c, '"' | '\'' | '*' | '`' | '.') || c.is_whitespace())
            .to_ascii_lowercase();

        match cleaned.as_str() {
            "metadata" => Ok(Label::Metadata),
            "row-specific" | "row specific" | "rowspecific" => Ok(Label::RowSpecific),
            _ => Err(Error::Classification {
                reply: reply.to_string(),
            }),
        }
    }
}

/// Keyword-style lookup of rows relevant to a query.
///
/// Ranking is implementation-defined. Returning no rows is not an error.
#[async_trait]
pub trait RowRetriever: Send + Sync {
    async fn retrieve(&self, query: &str) -> std::result::Result<Vec<RowRecord>, RetrievalError>;
}

/// Produces a natural-language description of a column from sample values.
#[async_trait]
pub trait ColumnSummarizer: Send + Sync {
    async fn describe(&self, column: &str, samples: &[String]) -> crate::error::Result<String>;
}
