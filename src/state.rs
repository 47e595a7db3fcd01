use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::color::ColorMap;
use crate::data::cache::DatasetCache;
use crate::data::export::export_csv;
use crate::data::filter::{FilterCriteria, ALL};
use crate::data::model::{Dataset, ExperienceLevel, RemoteWork};
use crate::data::report::{render, Report};

// ---------------------------------------------------------------------------
// Selector values
// ---------------------------------------------------------------------------

/// Current value of each selector in the controls row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub year: String,
    pub experience: String,
    pub remote: String,
    pub top_n: usize,
}

impl Selection {
    pub fn new(top_n: usize) -> Self {
        Self {
            year: ALL.to_string(),
            experience: ALL.to_string(),
            remote: ALL.to_string(),
            top_n,
        }
    }

    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::from_options(&self.year, &self.experience, &self.remote)
    }
}

fn with_all<'a>(labels: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    std::iter::once(ALL)
        .chain(labels)
        .map(str::to_string)
        .collect()
}

pub fn experience_options() -> Vec<String> {
    with_all(ExperienceLevel::KNOWN_LABELS)
}

pub fn remote_options() -> Vec<String> {
    with_all(RemoteWork::KNOWN_LABELS)
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub cache: DatasetCache,

    /// Loaded dataset (None until a load succeeds).
    pub dataset: Option<Arc<Dataset>>,

    pub selection: Selection,

    /// Report for the current selection (cached between frames).
    pub report: Option<Report>,

    /// Colours for experience labels in the strip plot.
    pub color_map: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(cache: DatasetCache, top_n: usize) -> Self {
        Self {
            cache,
            dataset: None,
            selection: Selection::new(top_n),
            report: None,
            color_map: None,
            status_message: None,
        }
    }

    /// Fetch the dataset from the cache, reloading only if the source changed.
    pub fn reload(&mut self) {
        match self.cache.get() {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load dataset: {e}");
                self.dataset = None;
                self.report = None;
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Discard the cached dataset and load it again.
    pub fn force_reload(&mut self) {
        self.cache.invalidate();
        self.reload();
    }

    fn set_dataset(&mut self, dataset: Arc<Dataset>) {
        let unchanged = self
            .dataset
            .as_ref()
            .is_some_and(|current| Arc::ptr_eq(current, &dataset));
        if unchanged {
            return;
        }

        // A year that no longer exists falls back to "All".
        if let Ok(year) = self.selection.year.parse::<i32>() {
            if !dataset.years().contains(&year) {
                self.selection.year = ALL.to_string();
            }
        }

        self.dataset = Some(dataset);
        self.status_message = None;
        self.refilter();
    }

    /// Recompute the report after a selector change.
    pub fn refilter(&mut self) {
        let Some(ds) = &self.dataset else {
            return;
        };
        let report = render(ds, &self.selection.criteria(), self.selection.top_n);
        self.color_map = Some(ColorMap::new(&report.strip.series));
        self.report = Some(report);
    }

    /// Year selector entries: "All" then every observed year.
    pub fn year_options(&self) -> Vec<String> {
        let mut options = vec![ALL.to_string()];
        if let Some(ds) = &self.dataset {
            options.extend(ds.years().into_iter().map(|y| y.to_string()));
        }
        options
    }

    /// Write the rows of the current report to `path` as CSV.
    pub fn export_to(&self, path: &Path) -> anyhow::Result<usize> {
        let (Some(ds), Some(report)) = (&self.dataset, &self.report) else {
            anyhow::bail!("no dataset loaded");
        };
        let view = report.view(ds);
        let bytes = export_csv(&view)?;
        std::fs::write(path, bytes)
            .with_context(|| format!("writing {}", path.display()))?;
        log::info!("Exported {} rows to {}", view.len(), path.display());
        Ok(view.len())
    }
}
