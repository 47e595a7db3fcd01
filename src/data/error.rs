use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors raised while locating, reading or normalizing a dataset.
///
/// Individual malformed rows are not errors: the normalizer drops them and
/// only counts them in [`NormalizeStats`](super::model::NormalizeStats).
#[derive(Debug, Error)]
pub enum DataError {
    #[error(
        "dataset not found: place 'Data Science Jobs Salaries.csv' next to the executable (tried: {})",
        display_paths(.tried)
    )]
    DatasetNotFound { tried: Vec<PathBuf> },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("dataset is missing required column '{0}'")]
    MissingColumn(String),

    #[error("invalid JSON dataset: {0}")]
    InvalidJson(String),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write CSV export: {0}")]
    Export(#[source] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!("'{}'", p.display()))
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T, E = DataError> = std::result::Result<T, E>;
