use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use super::error::Result;
use super::loader::load_first;
use super::model::Dataset;
use super::normalize::normalize;

#[derive(Debug)]
struct CacheEntry {
    dataset: Arc<Dataset>,
    source: PathBuf,
    modified: Option<SystemTime>,
}

/// Owns the normalized dataset between interactions.
///
/// The dataset is loaded on the first [`get`](Self::get) and reused until
/// either the source file's modification time changes or
/// [`invalidate`](Self::invalidate) is called.
#[derive(Debug)]
pub struct DatasetCache {
    candidates: Vec<PathBuf>,
    entry: Option<CacheEntry>,
}

fn modified_time(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

impl DatasetCache {
    pub fn new(candidates: Vec<PathBuf>) -> Self {
        Self {
            candidates,
            entry: None,
        }
    }

    /// Path the cached dataset was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.entry.as_ref().map(|e| e.source.as_path())
    }

    /// Return the cached dataset, (re)loading it when needed.
    pub fn get(&mut self) -> Result<Arc<Dataset>> {
        if let Some(entry) = &self.entry {
            if modified_time(&entry.source) == entry.modified {
                return Ok(Arc::clone(&entry.dataset));
            }
            log::info!("{} changed on disk, reloading", entry.source.display());
        }

        self.entry = None;
        let (source, raw) = load_first(&self.candidates)?;
        let modified = modified_time(&source);
        let dataset = Arc::new(normalize(raw)?);
        log::info!(
            "Loaded {} rows from {} ({} dropped)",
            dataset.len(),
            source.display(),
            dataset.stats.dropped()
        );

        self.entry = Some(CacheEntry {
            dataset: Arc::clone(&dataset),
            source,
            modified,
        });
        Ok(dataset)
    }

    /// Drop the cached dataset so the next [`get`](Self::get) reloads it.
    pub fn invalidate(&mut self) {
        if self.entry.take().is_some() {
            log::info!("Dataset cache invalidated");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::error::DataError;
    use std::fs::File;
    use std::io::Write;
    use std::time::Duration;

    const HEADER: &str = "work_year,experience_level,remote_ratio,salary_in_usd,job_title\n";

    fn write_rows(path: &Path, rows: &[&str]) -> anyhow::Result<()> {
        let mut file = File::create(path)?;
        file.write_all(HEADER.as_bytes())?;
        for row in rows {
            writeln!(file, "{row}")?;
        }
        Ok(())
    }

    fn set_mtime(path: &Path, secs: u64) -> anyhow::Result<()> {
        let file = File::options().write(true).open(path)?;
        file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))?;
        Ok(())
    }

    #[test]
    fn repeated_gets_share_one_load() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("jobs.csv");
        write_rows(&path, &["2021,EN,0,50000,Data Analyst"])?;

        let mut cache = DatasetCache::new(vec![path.clone()]);
        assert!(cache.source().is_none());
        let first = cache.get()?;
        let second = cache.get()?;
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.source(), Some(path.as_path()));
        Ok(())
    }

    #[test]
    fn modified_source_is_reloaded() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("jobs.csv");
        write_rows(&path, &["2021,EN,0,50000,Data Analyst"])?;
        set_mtime(&path, 1_000)?;

        let mut cache = DatasetCache::new(vec![path.clone()]);
        assert_eq!(cache.get()?.len(), 1);

        write_rows(
            &path,
            &["2021,EN,0,50000,Data Analyst", "2022,SE,100,150000,Data Scientist"],
        )?;
        set_mtime(&path, 2_000)?;
        assert_eq!(cache.get()?.len(), 2);
        Ok(())
    }

    #[test]
    fn invalidate_forces_reload() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("jobs.csv");
        write_rows(&path, &["2021,EN,0,50000,Data Analyst"])?;

        let mut cache = DatasetCache::new(vec![path]);
        let first = cache.get()?;
        cache.invalidate();
        assert!(cache.source().is_none());
        let second = cache.get()?;
        assert!(!Arc::ptr_eq(&first, &second));
        Ok(())
    }

    #[test]
    fn missing_source_is_not_cached() {
        let mut cache = DatasetCache::new(vec![PathBuf::from("/nonexistent/jobs.csv")]);
        assert!(matches!(cache.get(), Err(DataError::DatasetNotFound { .. })));
        assert!(cache.source().is_none());
    }
}
