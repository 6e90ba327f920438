//! Column summaries side store.
//!
//! Summaries are produced once per dataset by asking a [`ColumnSummarizer`]
//! to describe each column from a handful of sample values, then written to
//! a JSON file. Later runs load that file instead of regenerating.

use gamechat_core::dataset::{ColumnSummarizer, ColumnSummary};
use gamechat_core::error::RetrievalError;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use crate::DatasetError;
use crate::table::GameTable;

/// Read summaries from the side file. `Ok(None)` when the file is absent.
pub fn load_summaries(path: &Path) -> Result<Option<Vec<ColumnSummary>>, DatasetError> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(DatasetError::Io {
                path: path.to_path_buf(),
                reason: e.to_string(),
            });
        }
    };

    let summaries = serde_json::from_str(&content).map_err(|e| DatasetError::Summary {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(Some(summaries))
}

/// Write summaries to the side file, creating parent directories.
pub fn save_summaries(path: &Path, summaries: &[ColumnSummary]) -> Result<(), DatasetError> {
    let io_err = |e: std::io::Error| DatasetError::Io {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }

    let json = serde_json::to_string_pretty(summaries).map_err(|e| DatasetError::Summary {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    std::fs::write(path, json).map_err(io_err)
}

/// Describe every column of `table`, in column order.
///
/// Each column is sampled with its first `sample_size` non-empty values.
/// A summarizer failure aborts generation.
pub async fn generate_summaries(
    table: &GameTable,
    summarizer: &dyn ColumnSummarizer,
    sample_size: usize,
) -> gamechat_core::Result<Vec<ColumnSummary>> {
    let mut summaries = Vec::with_capacity(table.columns().len());

    for column in table.columns() {
        let samples: Vec<String> = table
            .column_values(column)
            .ok_or_else(|| RetrievalError::UnknownColumn(column.clone()))?
            .into_iter()
            .filter(|v| !v.trim().is_empty())
            .take(sample_size)
            .map(str::to_string)
            .collect();

        let description = summarizer.describe(column, &samples).await?;
        info!(column = %column, "Column summarized");

        summaries.push(ColumnSummary {
            column_name: column.clone(),
            description: description.trim().to_string(),
            total_rows: table.len(),
        });
    }

    Ok(summaries)
}

/// Load summaries from `path`, or generate and persist them when the file
/// does not exist yet.
///
/// A failure to persist freshly generated summaries is logged and the
/// summaries are still returned.
pub async fn load_or_generate(
    path: &Path,
    table: &GameTable,
    summarizer: &dyn ColumnSummarizer,
    sample_size: usize,
) -> gamechat_core::Result<Arc<[ColumnSummary]>> {
    if let Some(summaries) = load_summaries(path)? {
        info!(path = %path.display(), columns = summaries.len(), "Column summaries loaded");
        return Ok(summaries.into());
    }

    info!(path = %path.display(), columns = table.columns().len(), "Generating column summaries");
    let summaries = generate_summaries(table, summarizer, sample_size).await?;

    if let Err(e) = save_summaries(path, &summaries) {
        warn!(error = %e, "Could not persist column summaries");
    }

    Ok(summaries.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records every call and answers with a canned description.
    #[derive(Default)]
    struct RecordingSummarizer {
        calls: Mutex<Vec<(String, Vec<String>)>>,
    }

    #[async_trait]
    impl ColumnSummarizer for RecordingSummarizer {
        async fn describe(&self, column: &str, samples: &[String]) -> gamechat_core::Result<String> {
            self.calls
                .lock()
                .unwrap()
                .push((column.to_string(), samples.to_vec()));
            Ok(format!("  The {column} of each game.\n"))
        }
    }

    struct FailingSummarizer;

    #[async_trait]
    impl ColumnSummarizer for FailingSummarizer {
        async fn describe(&self, _column: &str, _samples: &[String]) -> gamechat_core::Result<String> {
            Err(gamechat_core::Error::Provider(
                gamechat_core::error::ProviderError::Network("offline".into()),
            ))
        }
    }

    fn small_table() -> GameTable {
        GameTable::from_reader(
            "name,genres\nHades,Roguelike\nCeleste,\nTetris,Puzzle\n".as_bytes(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn generates_one_summary_per_column() {
        let summarizer = RecordingSummarizer::default();
        let summaries = generate_summaries(&small_table(), &summarizer, 5).await.unwrap();

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].column_name, "name");
        assert_eq!(summaries[0].description, "The name of each game.");
        assert_eq!(summaries[1].total_rows, 3);

        let calls = summarizer.calls.lock().unwrap();
        // Empty cells are skipped when sampling.
        assert_eq!(calls[1], ("genres".to_string(), vec!["Roguelike".to_string(), "Puzzle".to_string()]));
    }

    #[tokio::test]
    async fn sample_size_limits_values() {
        let summarizer = RecordingSummarizer::default();
        generate_summaries(&small_table(), &summarizer, 1).await.unwrap();
        let calls = summarizer.calls.lock().unwrap();
        assert_eq!(calls[0].1, vec!["Hades".to_string()]);
    }

    #[tokio::test]
    async fn generated_summaries_are_persisted_and_reused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summaries").join("columns.json");

        let first = RecordingSummarizer::default();
        let generated = load_or_generate(&path, &small_table(), &first, 5).await.unwrap();
        assert_eq!(generated.len(), 2);
        assert!(path.exists());

        // Second load must not call the summarizer at all.
        let second = RecordingSummarizer::default();
        let loaded = load_or_generate(&path, &small_table(), &second, 5).await.unwrap();
        assert_eq!(&*loaded, &*generated);
        assert!(second.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn summarizer_failure_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("columns.json");
        let err = load_or_generate(&path, &small_table(), &FailingSummarizer, 5)
            .await
            .unwrap_err();
        assert!(matches!(err, gamechat_core::Error::Provider(_)));
        assert!(!path.exists());
    }

    #[test]
    fn missing_side_file_reads_as_none() {
        assert!(load_summaries(Path::new("/nonexistent/columns.json")).unwrap().is_none());
    }

    #[test]
    fn corrupted_side_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("columns.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            load_summaries(&path).unwrap_err(),
            DatasetError::Summary { .. }
        ));
    }
}
