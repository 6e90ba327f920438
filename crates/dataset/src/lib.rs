//! Dataset access for GameChat.
//!
//! - [`GameTable`]: the static games table, loaded once from CSV
//! - [`KeywordRetriever`]: keyword-scored row lookup over the table
//! - [`summary`]: column summaries, loaded from a side file or generated
//!   once and persisted

pub mod retriever;
pub mod summary;
pub mod table;

pub use retriever::KeywordRetriever;
pub use summary::load_or_generate;
pub use table::{COLUMNS, GameTable};

use gamechat_core::error::RetrievalError;
use std::path::PathBuf;

/// Errors raised while reading or writing dataset files.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("Failed to read {path}: {reason}")]
    Io { path: PathBuf, reason: String },

    #[error("Malformed CSV: {0}")]
    Csv(String),

    #[error("Malformed summary file {path}: {reason}")]
    Summary { path: PathBuf, reason: String },
}

impl From<csv::Error> for DatasetError {
    fn from(e: csv::Error) -> Self {
        DatasetError::Csv(e.to_string())
    }
}

impl From<DatasetError> for gamechat_core::Error {
    fn from(e: DatasetError) -> Self {
        gamechat_core::Error::Retrieval(RetrievalError::Unavailable(e.to_string()))
    }
}
