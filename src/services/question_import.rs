use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use sqlx::{Connection, PgConnection};
use thiserror::Error;

use crate::db::models::NewQuestion;
use crate::db::types::Difficulty;
use crate::repositories;

const LEVEL_PREFIX: &str = "Level ";
// Longest slice of an offending line echoed back in parse errors.
const MAX_LINE_PREVIEW: usize = 120;

#[derive(Debug, Error)]
pub(crate) enum ImportError {
    #[error("unable to scan data directory {path}: {source}")]
    ScanDirectory { path: PathBuf, source: std::io::Error },
    #[error("failed to read {path}: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("error parsing line {line_number} in {path} ({line}): {source}")]
    ParseLine { path: PathBuf, line_number: usize, line: String, source: serde_json::Error },
    #[error("database error while loading questions: {0}")]
    Database(#[from] sqlx::Error),
}

/// Why a single parsed record was left out of the load.
#[derive(Debug, Error)]
pub(crate) enum RecordError {
    #[error("record is missing fields or has wrong types: {0}")]
    Shape(#[from] serde_json::Error),
    #[error("unrecognised level {0:?}, expected \"Level <1-5>\"")]
    Level(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ImportSummary {
    pub(crate) files: usize,
    pub(crate) inserted_rows: u64,
    pub(crate) skipped_records: usize,
}

#[derive(Debug, Deserialize)]
struct SourceRecord {
    problem: String,
    solution: String,
    #[serde(rename = "type")]
    topic: String,
    level: String,
}

/// Replaces the contents of `questions` with every record found in `dir`.
///
/// The directory is scanned before the table is touched, and the whole run
/// shares one transaction: any fatal error leaves the previous rows in place.
pub(crate) async fn import_directory(
    conn: &mut PgConnection,
    dir: &Path,
) -> Result<ImportSummary, ImportError> {
    let files = list_data_files(dir).await?;
    if files.is_empty() {
        tracing::warn!(dir = %dir.display(), "No data files found; table will be left empty");
    }

    let mut tx = conn.begin().await?;
    match load_files(&mut tx, &files).await {
        Ok(summary) => {
            tx.commit().await?;
            Ok(summary)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::warn!(error = %rollback_err, "Failed to roll back questions load");
            }
            Err(err)
        }
    }
}

async fn load_files(
    conn: &mut PgConnection,
    files: &[PathBuf],
) -> Result<ImportSummary, ImportError> {
    repositories::questions::reset_table(conn).await?;
    tracing::info!("Questions table reset");

    let total = files.len();
    let mut summary = ImportSummary { files: total, ..ImportSummary::default() };

    for (index, path) in files.iter().enumerate() {
        let records = read_records(path).await?;
        let (rows, skipped) = build_rows(path, records);
        summary.skipped_records += skipped;

        if !rows.is_empty() {
            summary.inserted_rows += repositories::questions::insert_many(conn, &rows).await?;
        }

        tracing::info!(
            file = %path.display(),
            rows = rows.len(),
            skipped,
            "File {} of {}: {}%",
            index + 1,
            total,
            progress_percent(index + 1, total)
        );
    }

    let stored = repositories::questions::count(&mut *conn).await?;
    tracing::info!(stored, "Questions staged for commit");

    Ok(summary)
}

/// Regular files (or symlinks to them) directly inside `dir`, ordered by file name.
pub(crate) async fn list_data_files(dir: &Path) -> Result<Vec<PathBuf>, ImportError> {
    let scan_error = |source| ImportError::ScanDirectory { path: dir.to_path_buf(), source };

    let mut entries = tokio::fs::read_dir(dir).await.map_err(scan_error)?;
    let mut files = Vec::new();

    while let Some(entry) = entries.next_entry().await.map_err(scan_error)? {
        // Follows symlinks, so linked data files load like regular ones.
        let metadata = tokio::fs::metadata(entry.path()).await.map_err(scan_error)?;
        if metadata.is_file() {
            files.push(entry.path());
        } else {
            tracing::warn!(path = %entry.path().display(), "Skipping non-file entry");
        }
    }

    files.sort();
    Ok(files)
}

/// Parses every non-blank line of a JSONL file. The first malformed line fails the file.
pub(crate) async fn read_records(path: &Path) -> Result<Vec<Value>, ImportError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ImportError::ReadFile { path: path.to_path_buf(), source })?;

    let mut records = Vec::new();
    for (index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let record = serde_json::from_str(line).map_err(|source| ImportError::ParseLine {
            path: path.to_path_buf(),
            line_number: index + 1,
            line: preview(line),
            source,
        })?;
        records.push(record);
    }

    Ok(records)
}

/// Converts parsed records into rows, logging and dropping the ones that do not fit.
pub(crate) fn build_rows(path: &Path, records: Vec<Value>) -> (Vec<NewQuestion>, usize) {
    let mut rows = Vec::with_capacity(records.len());
    let mut skipped = 0;

    for (index, record) in records.into_iter().enumerate() {
        match to_question(record) {
            Ok(row) => rows.push(row),
            Err(err) => {
                skipped += 1;
                tracing::warn!(
                    file = %path.display(),
                    record = index + 1,
                    error = %err,
                    "Skipping record"
                );
            }
        }
    }

    (rows, skipped)
}

pub(crate) fn to_question(record: Value) -> Result<NewQuestion, RecordError> {
    let record: SourceRecord = serde_json::from_value(record)?;
    let difficulty =
        parse_level(&record.level).ok_or_else(|| RecordError::Level(record.level.clone()))?;

    Ok(NewQuestion {
        question: record.problem,
        answer: record.solution,
        topic: record.topic,
        difficulty: difficulty.get(),
    })
}

/// `"Level 3"` -> 3. Anything other than the prefix followed by one digit in 1..=5 is rejected.
pub(crate) fn parse_level(level: &str) -> Option<Difficulty> {
    level.trim().strip_prefix(LEVEL_PREFIX).and_then(Difficulty::from_digit)
}

fn progress_percent(done: usize, total: usize) -> usize {
    if total == 0 {
        return 100;
    }
    (done * 100 + total / 2) / total
}

fn preview(line: &str) -> String {
    match line.char_indices().nth(MAX_LINE_PREVIEW) {
        Some((index, _)) => format!("{}...", &line[..index]),
        None => line.to_string(),
    }
}
