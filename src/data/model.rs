use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

pub const WORK_YEAR: &str = "work_year";
pub const EXPERIENCE_LEVEL: &str = "experience_level";
pub const REMOTE_RATIO: &str = "remote_ratio";
pub const SALARY_IN_USD: &str = "salary_in_usd";
pub const JOB_TITLE: &str = "job_title";
pub const COMPANY_LOCATION: &str = "company_location";

// ---------------------------------------------------------------------------
// RawTable – stringified cells straight from the source file
// ---------------------------------------------------------------------------

/// Untyped tabular content as read by the loader.  Every cell is kept as
/// text; nulls become the empty string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

// ---------------------------------------------------------------------------
// Canonical labels
// ---------------------------------------------------------------------------

/// Experience level: one of the four known codes, or whatever the source
/// file carried instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExperienceLevel {
    Entry,
    Mid,
    Senior,
    Exec,
    Raw(String),
}

impl ExperienceLevel {
    /// Labels of the known levels in display order.
    pub const KNOWN_LABELS: [&'static str; 4] = ["Entry", "Mid", "Senior", "Exec"];

    /// Map a source code (`EN`, `MI`, `SE`, `EX`) to its level.
    pub fn from_code(code: &str) -> Self {
        match code {
            "EN" => ExperienceLevel::Entry,
            "MI" => ExperienceLevel::Mid,
            "SE" => ExperienceLevel::Senior,
            "EX" => ExperienceLevel::Exec,
            other => ExperienceLevel::Raw(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ExperienceLevel::Entry => "Entry",
            ExperienceLevel::Mid => "Mid",
            ExperienceLevel::Senior => "Senior",
            ExperienceLevel::Exec => "Exec",
            ExperienceLevel::Raw(s) => s,
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Remote-work arrangement derived from `remote_ratio`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RemoteWork {
    OnSite,
    Hybrid,
    Remote,
    Raw(String),
}

impl RemoteWork {
    pub const KNOWN_LABELS: [&'static str; 3] = ["On-site", "Hybrid", "Remote"];

    /// Map a raw `remote_ratio` cell.  Any spelling of 0, 50 or 100 that
    /// parses as a number is recognised; everything else keeps its text.
    pub fn from_ratio(raw: &str, numeric: Option<f64>) -> Self {
        match numeric {
            Some(v) if v == 0.0 => RemoteWork::OnSite,
            Some(v) if v == 50.0 => RemoteWork::Hybrid,
            Some(v) if v == 100.0 => RemoteWork::Remote,
            _ => RemoteWork::Raw(raw.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            RemoteWork::OnSite => "On-site",
            RemoteWork::Hybrid => "Hybrid",
            RemoteWork::Remote => "Remote",
            RemoteWork::Raw(s) => s,
        }
    }
}

impl fmt::Display for RemoteWork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Record – one normalized row
// ---------------------------------------------------------------------------

/// One job-salary observation after normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub work_year: i32,
    pub experience: ExperienceLevel,
    pub remote: RemoteWork,
    /// Numeric value of the `remote_ratio` cell, when it has one.
    pub remote_ratio: Option<f64>,
    pub salary_in_usd: f64,
    pub job_title: String,
    pub company_location: String,
    /// Source cells aligned with [`Dataset::headers`], kept for passthrough
    /// columns and export.
    pub cells: Vec<String>,
}

impl Record {
    pub fn is_fully_remote(&self) -> bool {
        self.remote_ratio == Some(100.0)
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete normalized table
// ---------------------------------------------------------------------------

/// Row counts discarded during normalization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeStats {
    pub input_rows: usize,
    pub dropped_year: usize,
    pub dropped_salary: usize,
}

impl NormalizeStats {
    pub fn dropped(&self) -> usize {
        self.dropped_year + self.dropped_salary
    }
}

/// The normalized dataset.  Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Column names in source order (including passthrough columns).
    pub headers: Vec<String>,
    pub records: Vec<Record>,
    pub stats: NormalizeStats,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sorted distinct years present in the data.
    pub fn years(&self) -> Vec<i32> {
        self.records
            .iter()
            .map(|r| r.work_year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn experience_codes_map_to_labels() {
        assert_eq!(ExperienceLevel::from_code("EN").label(), "Entry");
        assert_eq!(ExperienceLevel::from_code("MI").label(), "Mid");
        assert_eq!(ExperienceLevel::from_code("SE").label(), "Senior");
        assert_eq!(ExperienceLevel::from_code("EX").label(), "Exec");
    }

    #[test]
    fn unknown_experience_code_keeps_raw_text() {
        let level = ExperienceLevel::from_code("Principal");
        assert_eq!(level, ExperienceLevel::Raw("Principal".into()));
        assert_eq!(level.to_string(), "Principal");
    }

    #[test]
    fn remote_ratio_maps_numeric_spellings() {
        assert_eq!(RemoteWork::from_ratio("0", Some(0.0)), RemoteWork::OnSite);
        assert_eq!(RemoteWork::from_ratio("50.0", Some(50.0)), RemoteWork::Hybrid);
        assert_eq!(RemoteWork::from_ratio("100", Some(100.0)), RemoteWork::Remote);
        assert_eq!(
            RemoteWork::from_ratio("75", Some(75.0)),
            RemoteWork::Raw("75".into())
        );
        assert_eq!(RemoteWork::from_ratio("", None).label(), "");
    }
}
