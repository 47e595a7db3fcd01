use std::fs::File;
use std::path::{Path, PathBuf};

use arrow::array::Array;
use arrow::util::display::{ArrayFormatter, FormatOptions};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::{DataError, Result};
use super::model::RawTable;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Return the first candidate that exists on disk.
pub fn resolve_candidate(candidates: &[PathBuf]) -> Result<&Path> {
    candidates
        .iter()
        .find(|p| p.is_file())
        .map(PathBuf::as_path)
        .ok_or_else(|| DataError::DatasetNotFound {
            tried: candidates.to_vec(),
        })
}

/// Load the first existing candidate.  A candidate that exists but cannot
/// be parsed is an error; later candidates are not consulted.
pub fn load_first(candidates: &[PathBuf]) -> Result<(PathBuf, RawTable)> {
    let path = resolve_candidate(candidates)?;
    log::info!("Loading dataset from {}", path.display());
    let table = load_file(path)?;
    Ok((path.to_path_buf(), table))
}

/// Load a table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` (or no extension) – header row followed by records
/// * `.json`    – `[{ "work_year": 2021, "job_title": "...", ... }, ...]`
/// * `.parquet` – any flat schema; cells are stringified
pub fn load_file(path: &Path) -> Result<RawTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "" | "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(DataError::UnsupportedFormat(other.to_string())),
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> DataError + '_ {
    move |source| DataError::Io {
        path: path.to_path_buf(),
        source,
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<RawTable> {
    let file = File::open(path).map_err(io_error(path))?;
    read_csv(file)
}

/// Parse CSV from any reader.  Short rows are padded with empty cells and
/// long rows are cut at the header width, so every row lines up with the
/// header.
pub fn read_csv<R: std::io::Read>(reader: R) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    let mut truncated = 0usize;
    for result in reader.records() {
        let record = result?;
        if record.len() > headers.len() {
            truncated += 1;
        }
        let mut row: Vec<String> = record
            .iter()
            .take(headers.len())
            .map(str::to_string)
            .collect();
        row.resize(headers.len(), String::new());
        rows.push(row);
    }

    if truncated > 0 {
        log::debug!(
            "{truncated} CSV rows had more cells than the {} header columns; extra cells ignored",
            headers.len()
        );
    }

    Ok(RawTable { headers, rows })
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "work_year": 2021, "experience_level": "SE", "salary_in_usd": 150000, ... },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<RawTable> {
    let text = std::fs::read_to_string(path).map_err(io_error(path))?;
    let root: JsonValue = serde_json::from_str(&text)?;

    let records = root
        .as_array()
        .ok_or_else(|| DataError::InvalidJson("expected top-level JSON array".into()))?;

    // Header = union of keys across records.  Each object's keys come out of
    // serde_json's map sorted, so columns end up in alphabetical order within
    // each record.
    let mut headers: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .ok_or_else(|| DataError::InvalidJson(format!("row {i} is not a JSON object")))?;
        for key in obj.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let rows = records
        .iter()
        .filter_map(JsonValue::as_object)
        .map(|obj| {
            headers
                .iter()
                .map(|h| obj.get(h).map(json_to_cell).unwrap_or_default())
                .collect()
        })
        .collect();

    Ok(RawTable { headers, rows })
}

fn json_to_cell(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file written by Pandas (`df.to_parquet()`) or Polars.
/// Every column is rendered to text with Arrow's display formatter.
fn load_parquet(path: &Path) -> Result<RawTable> {
    let file = File::open(path).map_err(io_error(path))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build()?;

    let options = FormatOptions::default();
    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;
        let formatters = batch
            .columns()
            .iter()
            .map(|col| ArrayFormatter::try_new(col.as_ref(), &options))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        for row in 0..batch.num_rows() {
            let cells = batch
                .columns()
                .iter()
                .zip(&formatters)
                .map(|(col, fmt)| {
                    if col.is_null(row) {
                        String::new()
                    } else {
                        fmt.value(row).to_string()
                    }
                })
                .collect();
            rows.push(cells);
        }
    }

    Ok(RawTable { headers, rows })
}
