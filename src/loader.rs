//! One-shot bulk import of the survey CSV into the `users` table.
//!
//! The table is replaced wholesale on each run: dropped, recreated, then
//! filled inside a single transaction. Source headers are matched after
//! trimming whitespace, and the space-containing headers ("Marital Status",
//! "Monthly Income", "Educational Qualifications", "Family size") map onto
//! the underscored column names.

use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use indicatif::ProgressBar;
use rusqlite::{params, Connection};
use thiserror::Error;

use crate::storage::SurveyStore;

const CREATE_TABLE: &str = "\
CREATE TABLE users (
    user_id INTEGER,
    name TEXT,
    email TEXT,
    password TEXT,
    Age INTEGER,
    Gender TEXT,
    Marital_Status TEXT,
    Occupation TEXT,
    Monthly_Income TEXT,
    Educational_Qualifications TEXT,
    Family_size INTEGER
)";

const INSERT_ROW: &str = "\
INSERT INTO users (
    user_id, name, email, password, Age, Gender,
    Marital_Status, Occupation, Monthly_Income,
    Educational_Qualifications, Family_size
) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";

/// Source header name for each target column, in insert order. Underscored
/// source headers are accepted as well.
const COLUMNS: [(&str, &str); 11] = [
    ("user_id", "user_id"),
    ("name", "name"),
    ("email", "email"),
    ("password", "password"),
    ("Age", "Age"),
    ("Gender", "Gender"),
    ("Marital Status", "Marital_Status"),
    ("Occupation", "Occupation"),
    ("Monthly Income", "Monthly_Income"),
    ("Educational Qualifications", "Educational_Qualifications"),
    ("Family size", "Family_size"),
];

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing column {0:?} in CSV header")]
    MissingColumn(String),

    #[error("Store error: {0}")]
    Store(#[from] rusqlite::Error),
}

/// Outcome of one import run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub inserted: usize,
    pub skipped: usize,
}

/// Replace the `users` table with the contents of the CSV at `path`.
pub fn load_csv(store: &SurveyStore, path: impl AsRef<Path>) -> Result<LoadReport, LoadError> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_path(path)?;

    // Resolve each target column to a position in the source header.
    let headers = reader.headers()?.clone();
    let mut positions = Vec::with_capacity(COLUMNS.len());
    for (source, target) in COLUMNS {
        let position = headers
            .iter()
            .position(|h| h == source || h == target)
            .ok_or_else(|| LoadError::MissingColumn(source.to_string()))?;
        positions.push(position);
    }

    let mut records = Vec::new();
    for result in reader.records() {
        records.push(result?);
    }

    let progress = ProgressBar::new(records.len() as u64);
    let mut skipped = 0usize;

    let inserted = store.with_connection(|conn| {
        conn.execute("DROP TABLE IF EXISTS users", [])?;
        conn.execute(CREATE_TABLE, [])?;
        insert_all(conn, &records, &positions, &progress, &mut skipped)
    })?;

    progress.finish_and_clear();
    Ok(LoadReport { inserted, skipped })
}

fn insert_all(
    conn: &Connection,
    records: &[StringRecord],
    positions: &[usize],
    progress: &ProgressBar,
    skipped: &mut usize,
) -> rusqlite::Result<usize> {
    let tx = conn.unchecked_transaction()?;
    let mut inserted = 0usize;
    {
        let mut stmt = tx.prepare(INSERT_ROW)?;
        for record in records {
            progress.inc(1);
            let field = |i: usize| record.get(positions[i]).unwrap_or("");

            // Numeric columns must parse; a malformed row is skipped with a
            // warning rather than stored as text.
            let Ok(user_id) = field(0).parse::<i64>() else {
                warn_skipped(record, "user_id", skipped);
                continue;
            };
            let Ok(age) = field(4).parse::<i64>() else {
                warn_skipped(record, "Age", skipped);
                continue;
            };
            let Ok(family_size) = field(10).parse::<i64>() else {
                warn_skipped(record, "Family size", skipped);
                continue;
            };

            stmt.execute(params![
                user_id,
                field(1),
                field(2),
                field(3),
                age,
                field(5),
                field(6),
                field(7),
                field(8),
                field(9),
                family_size,
            ])?;
            inserted += 1;
        }
    }
    tx.commit()?;
    Ok(inserted)
}

fn warn_skipped(record: &StringRecord, column: &str, skipped: &mut usize) {
    *skipped += 1;
    tracing::warn!(
        "Skipping row {:?}: non-numeric {}",
        record.position().map(|p| p.line()),
        column
    );
}
