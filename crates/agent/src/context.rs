//! Context rendering for the two routing branches.
//!
//! Row-specific queries get one labelled block per retrieved game.
//! Metadata queries get one line per column summary. Both renderings are
//! pure and rebuilt on every request.

use gamechat_core::dataset::{ColumnSummary, Label, RowRecord};

/// Render retrieved rows as labelled text blocks separated by a blank line.
/// No rows renders as an empty string.
pub fn row_context(rows: &[RowRecord]) -> String {
    rows.iter().map(row_block).collect::<Vec<_>>().join("\n\n")
}

fn row_block(row: &RowRecord) -> String {
    format!(
        "Game: {}\n\
         Short Description: {}\n\
         Long Description: {}\n\
         Genres: {}\n\
         Minimum System Requirement: {}\n\
         Recommended System Requirement: {}\n\
         Release Date: {}\n\
         Developer: {}\n\
         Publisher: {}\n\
         Overall Player Rating: {}\n\
         Number of Reviews from Purchased People: {}\n\
         Number of English Reviews: {}\n\
         Link: {}",
        row.name,
        row.short_description,
        row.long_description,
        row.genres,
        row.minimum_system_requirement,
        row.recommend_system_requirement,
        row.release_date,
        row.developer,
        row.publisher,
        row.overall_player_rating,
        row.number_of_reviews_from_purchased_people,
        row.number_of_english_reviews,
        row.link,
    )
}

/// Render column summaries as `"<column>: <description>: <total rows>:"`
/// lines separated by a blank line.
pub fn metadata_context(summaries: &[ColumnSummary]) -> String {
    summaries
        .iter()
        .map(|s| format!("{}: {}: {}:", s.column_name, s.description, s.total_rows))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Pick the rendering for `label`.
pub fn build(label: Label, rows: &[RowRecord], summaries: &[ColumnSummary]) -> String {
    match label {
        Label::RowSpecific => row_context(rows),
        Label::Metadata => metadata_context(summaries),
    }
}
