use serde::Serialize;

use super::charts::{box_stats, histogram, strip_points, BoxStats, HistogramBin, StripChart, HISTOGRAM_BINS};
use super::filter::{apply_filter, FilterCriteria, FilteredView};
use super::model::Dataset;
use super::summary::{summarize, SummaryResult};

/// Everything the dashboard shows for one set of criteria.
///
/// The report owns its data so a presenter can keep it between frames; the
/// matching rows are recovered with [`Report::view`].
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    #[serde(skip)]
    rows: Vec<usize>,
    pub criteria: CriteriaEcho,
    pub summary: SummaryResult,
    pub histogram: Vec<HistogramBin>,
    pub boxes: Vec<BoxStats>,
    pub strip: StripChart,
}

/// The criteria a report was computed for, in serializable form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriteriaEcho {
    pub year: Option<i32>,
    pub experience: Option<String>,
    pub remote: Option<String>,
    pub top_n: usize,
}

impl Report {
    /// Nothing matched the criteria; charts and export are skipped.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The filtered rows of the dataset this report was rendered from.
    pub fn view<'a>(&self, dataset: &'a Dataset) -> FilteredView<'a> {
        FilteredView::from_indices(dataset, self.rows.clone())
    }
}

/// Filter, summarize and aggregate in one pass over the dataset.
pub fn render(dataset: &Dataset, criteria: &FilterCriteria, top_n: usize) -> Report {
    let view = apply_filter(dataset, criteria);
    let summary = summarize(&view, top_n);
    let (histogram, boxes, strip) = if view.is_empty() {
        (Vec::new(), Vec::new(), StripChart::default())
    } else {
        (
            histogram(&view, HISTOGRAM_BINS),
            box_stats(&view),
            strip_points(&view),
        )
    };

    Report {
        criteria: CriteriaEcho {
            year: criteria.year,
            experience: criteria.experience.clone(),
            remote: criteria.remote.clone(),
            top_n,
        },
        rows: view.indices().to_vec(),
        summary,
        histogram,
        boxes,
        strip,
    }
}
