use std::sync::LazyLock;

use regex::Regex;

use super::error::{DataError, Result};
use super::model::{
    Dataset, ExperienceLevel, NormalizeStats, RawTable, Record, RemoteWork, COMPANY_LOCATION,
    EXPERIENCE_LEVEL, JOB_TITLE, REMOTE_RATIO, SALARY_IN_USD, WORK_YEAR,
};

static YEAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]{4})").expect("year pattern is valid"));

/// Positions of the columns the normalizer reads.
struct Columns {
    year: usize,
    experience: usize,
    remote: usize,
    salary: usize,
    title: usize,
    location: Option<usize>,
}

impl Columns {
    fn locate(table: &RawTable) -> Result<Self> {
        let required = |name: &str| {
            table
                .column_index(name)
                .ok_or_else(|| DataError::MissingColumn(name.to_string()))
        };
        Ok(Self {
            year: required(WORK_YEAR)?,
            experience: required(EXPERIENCE_LEVEL)?,
            remote: required(REMOTE_RATIO)?,
            salary: required(SALARY_IN_USD)?,
            title: required(JOB_TITLE)?,
            location: table.column_index(COMPANY_LOCATION),
        })
    }
}

/// Extract the first run of four digits, e.g. `"FY2021"` → 2021.
pub fn extract_year(cell: &str) -> Option<i32> {
    YEAR_PATTERN
        .captures(cell)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Parse a salary cell.  Blank, non-numeric and non-finite values yield `None`.
pub fn parse_salary(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn cell(cells: &[String], idx: usize) -> &str {
    cells.get(idx).map(String::as_str).unwrap_or("")
}

fn parse_ratio(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Turn raw tabular content into a typed [`Dataset`].
///
/// Rows without a four-digit year or a numeric salary are dropped; all
/// other columns pass through untouched and row order is preserved.
pub fn normalize(table: RawTable) -> Result<Dataset> {
    let cols = Columns::locate(&table)?;
    let mut stats = NormalizeStats {
        input_rows: table.rows.len(),
        ..Default::default()
    };

    let mut records = Vec::with_capacity(table.rows.len());
    for cells in table.rows {
        let Some(work_year) = extract_year(cell(&cells, cols.year)) else {
            stats.dropped_year += 1;
            continue;
        };
        let Some(salary_in_usd) = parse_salary(cell(&cells, cols.salary)) else {
            stats.dropped_salary += 1;
            continue;
        };

        let raw_ratio = cell(&cells, cols.remote);
        let remote_ratio = parse_ratio(raw_ratio);

        records.push(Record {
            work_year,
            experience: ExperienceLevel::from_code(cell(&cells, cols.experience)),
            remote: RemoteWork::from_ratio(raw_ratio, remote_ratio),
            remote_ratio,
            salary_in_usd,
            job_title: cell(&cells, cols.title).to_string(),
            company_location: cols
                .location
                .map(|i| cell(&cells, i).to_string())
                .unwrap_or_default(),
            cells,
        });
    }

    if stats.dropped() > 0 {
        log::debug!(
            "Dropped {} of {} rows ({} without a year, {} without a salary)",
            stats.dropped(),
            stats.input_rows,
            stats.dropped_year,
            stats.dropped_salary
        );
    }

    Ok(Dataset {
        headers: table.headers,
        records,
        stats,
    })
}
