//! The games table.
//!
//! Loaded once from a CSV file with a header row. Rows are typed as
//! [`RowRecord`]; the raw cells are kept alongside so column summaries can
//! sample any column, including ones `RowRecord` does not model.

use gamechat_core::dataset::RowRecord;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

use crate::DatasetError;

/// Column names of the games dataset, in file order.
pub const COLUMNS: [&str; 13] = [
    "name",
    "short_description",
    "long_description",
    "genres",
    "minimum_system_requirement",
    "recommend_system_requirement",
    "release_date",
    "developer",
    "publisher",
    "overall_player_rating",
    "number_of_reviews_from_purchased_people",
    "number_of_english_reviews",
    "link",
];

/// Columns a games file must carry.
const REQUIRED_COLUMNS: [&str; 1] = ["name"];

/// An immutable in-memory copy of the games table.
#[derive(Debug, Clone, Default)]
pub struct GameTable {
    headers: Vec<String>,
    cells: Vec<Vec<String>>,
    rows: Vec<RowRecord>,
}

impl GameTable {
    /// Load the table from a CSV file.
    pub fn from_csv_path(path: &Path) -> Result<Self, DatasetError> {
        let file = std::fs::File::open(path).map_err(|e| DatasetError::Io {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let table = Self::from_reader(file)?;
        info!(path = %path.display(), rows = table.len(), columns = table.headers.len(), "Game table loaded");
        Ok(table)
    }

    /// Parse a table from any CSV source.
    ///
    /// The header must name a `name` column. Other known columns may be
    /// absent, as may trailing cells of a row; missing fields read as
    /// empty text.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let header_record = csv_reader.headers()?.clone();
        let headers: Vec<String> = header_record.iter().map(str::to_string).collect();
        check_headers(&headers)?;

        let mut cells: Vec<Vec<String>> = Vec::new();
        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            let row: RowRecord = record.deserialize(Some(&header_record))?;
            cells.push(record.iter().map(str::to_string).collect());
            rows.push(row);
        }

        Ok(Self {
            headers,
            cells,
            rows,
        })
    }

    /// Build a table directly from typed rows (columns = [`COLUMNS`]).
    pub fn from_rows(rows: Vec<RowRecord>) -> Self {
        let cells = rows
            .iter()
            .map(|r| row_cells(r).iter().map(|c| c.to_string()).collect::<Vec<_>>())
            .collect();
        Self {
            headers: COLUMNS.iter().map(|c| c.to_string()).collect(),
            cells,
            rows,
        }
    }

    pub fn rows(&self) -> &[RowRecord] {
        &self.rows
    }

    /// Column names in file order.
    pub fn columns(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Every value of one column, in row order. `None` for unknown columns.
    pub fn column_values(&self, column: &str) -> Option<Vec<&str>> {
        let index = self.headers.iter().position(|h| h == column)?;
        Some(
            self.cells
                .iter()
                .map(|row| row.get(index).map(String::as_str).unwrap_or(""))
                .collect(),
        )
    }
}

fn check_headers(headers: &[String]) -> Result<(), DatasetError> {
    let has = |column: &str| headers.iter().any(|h| h == column);

    let missing: Vec<&str> = REQUIRED_COLUMNS.into_iter().filter(|&c| !has(c)).collect();
    if !missing.is_empty() {
        return Err(DatasetError::Csv(format!(
            "missing columns: {}",
            missing.join(", ")
        )));
    }

    let absent: Vec<&str> = COLUMNS.into_iter().filter(|&c| !has(c)).collect();
    if !absent.is_empty() {
        warn!(columns = %absent.join(", "), "Games file lacks some columns; they read as empty");
    }
    Ok(())
}

fn row_cells(row: &RowRecord) -> [&str; 13] {
    [
        row.name.as_str(),
        row.short_description.as_str(),
        row.long_description.as_str(),
        row.genres.as_str(),
        row.minimum_system_requirement.as_str(),
        row.recommend_system_requirement.as_str(),
        row.release_date.as_str(),
        row.developer.as_str(),
        row.publisher.as_str(),
        row.overall_player_rating.as_str(),
        row.number_of_reviews_from_purchased_people.as_str(),
        row.number_of_english_reviews.as_str(),
        row.link.as_str(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "\
name,short_description,genres,developer,release_date
Cyberpunk 2077,\"Open-world, action-adventure RPG\",\"RPG, Action\",CD PROJEKT RED,2020-12-10
Stardew Valley,Farming sim,\"Indie, Simulation\",ConcernedApe,2016-02-26
";

    #[test]
    fn parses_rows_and_headers() {
        let table = GameTable::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.columns().len(), 5);
        assert_eq!(table.rows()[0].name, "Cyberpunk 2077");
        assert_eq!(table.rows()[0].genres, "RPG, Action");
        assert_eq!(table.rows()[1].developer, "ConcernedApe");
        // Columns absent from the file read as empty.
        assert!(table.rows()[0].link.is_empty());
    }

    #[test]
    fn column_values_follow_row_order() {
        let table = GameTable::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(
            table.column_values("release_date").unwrap(),
            vec!["2020-12-10", "2016-02-26"]
        );
        assert!(table.column_values("price").is_none());
    }

    #[test]
    fn short_rows_are_tolerated() {
        let csv = "name,genres,developer\nHades,Roguelike\n";
        let table = GameTable::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.rows()[0].genres, "Roguelike");
        assert_eq!(table.column_values("developer").unwrap(), vec![""]);
    }

    #[test]
    fn unrelated_headers_are_rejected() {
        let csv = "Title,Genre\nHades,Roguelike\nCeleste,Platformer\n";
        let err = GameTable::from_reader(csv.as_bytes()).unwrap_err();
        match err {
            DatasetError::Csv(message) => assert_eq!(message, "missing columns: name"),
            other => panic!("expected a CSV error, got {other:?}"),
        }
    }

    #[test]
    fn header_whitespace_is_ignored() {
        let csv = " name , genres \nHades,Roguelike\n";
        let table = GameTable::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.rows()[0].name, "Hades");
    }

    #[test]
    fn from_rows_exposes_all_columns() {
        let table = GameTable::from_rows(vec![RowRecord {
            name: "Celeste".into(),
            link: "https://example.com/celeste".into(),
            ..Default::default()
        }]);
        assert_eq!(table.columns().len(), COLUMNS.len());
        assert_eq!(
            table.column_values("link").unwrap(),
            vec!["https://example.com/celeste"]
        );
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let table = GameTable::from_csv_path(file.path()).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = GameTable::from_csv_path(Path::new("/nonexistent/games.csv")).unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }
}
