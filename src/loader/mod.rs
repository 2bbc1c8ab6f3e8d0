//! Dataset loading.
//!
//! Loads review records from JSON (flat record arrays and the nested
//! per-assignment dashboard export) and CSV files. A directory input is
//! scanned for data files, which are loaded in sorted order and
//! concatenated.

pub mod csv;
pub mod json;

use crate::models::ReviewRecord;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Errors surfaced by the loading layer.
///
/// The aggregation core itself never errors; everything that can go wrong
/// happens here, before the data reaches it.
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unsupported input format: {path} (expected .json or .csv)")]
    UnsupportedFormat { path: PathBuf },

    #[error("no .json or .csv files found under {path}")]
    NoData { path: PathBuf },
}

/// Load records from a data file or a directory of data files.
pub fn load_dataset(path: &Path) -> Result<Vec<ReviewRecord>, LoaderError> {
    if path.is_dir() {
        load_directory(path)
    } else {
        load_file(path)
    }
}

fn load_file(path: &Path) -> Result<Vec<ReviewRecord>, LoaderError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let records = match extension.as_deref() {
        Some("json") => json::load_json_file(path)?,
        Some("csv") => csv::load_csv_file(path)?,
        _ => {
            return Err(LoaderError::UnsupportedFormat {
                path: path.to_path_buf(),
            })
        }
    };

    info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

fn load_directory(dir: &Path) -> Result<Vec<ReviewRecord>, LoaderError> {
    let mut data_files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            matches!(
                path.extension().and_then(|e| e.to_str()),
                Some(ext) if ext.eq_ignore_ascii_case("json") || ext.eq_ignore_ascii_case("csv")
            )
        })
        .collect();

    // Sorted order keeps repeated runs over the same directory identical.
    data_files.sort();

    if data_files.is_empty() {
        return Err(LoaderError::NoData {
            path: dir.to_path_buf(),
        });
    }

    let mut records = Vec::new();
    for file in &data_files {
        debug!("Loading {}", file.display());
        records.extend(load_file(file)?);
    }

    Ok(records)
}

/// Treat empty strings and the literal "NULL" as absent, matching the
/// original exporter's placeholder convention.
pub(crate) fn clean_name(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null") {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
