use serde::Serialize;

use super::filter::FilteredView;
use super::model::{ExperienceLevel, RemoteWork};

pub const HISTOGRAM_BINS: usize = 30;

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Equal-width salary histogram over `[min, max]`.  The last bin is closed
/// so the maximum lands in it; a view with a single distinct salary yields
/// one zero-width bin.
pub fn histogram(view: &FilteredView<'_>, bins: usize) -> Vec<HistogramBin> {
    let salaries: Vec<f64> = view.iter().map(|r| r.salary_in_usd).collect();
    if salaries.is_empty() || bins == 0 {
        return Vec::new();
    }

    let min = salaries.iter().copied().fold(f64::INFINITY, f64::min);
    let max = salaries.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    if range <= 0.0 {
        return vec![HistogramBin {
            start: min,
            end: max,
            count: salaries.len(),
        }];
    }

    let width = range / bins as f64;
    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            start: min + i as f64 * width,
            end: if i + 1 == bins {
                max
            } else {
                min + (i + 1) as f64 * width
            },
            count: 0,
        })
        .collect();

    for s in salaries {
        let idx = (((s - min) / width) as usize).min(bins - 1);
        out[idx].count += 1;
    }
    out
}

// ---------------------------------------------------------------------------
// Box plot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxStats {
    pub label: String,
    pub count: usize,
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

/// Quantile of sorted values with linear interpolation between ranks.
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let pos = p * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

fn box_for(label: String, mut values: Vec<f64>) -> BoxStats {
    values.sort_by(f64::total_cmp);
    let q1 = quantile(&values, 0.25);
    let median = quantile(&values, 0.5);
    let q3 = quantile(&values, 0.75);
    let fence = 1.5 * (q3 - q1);
    let (low_fence, high_fence) = (q1 - fence, q3 + fence);

    let inside = || values.iter().copied().filter(|&v| v >= low_fence && v <= high_fence);
    let lower_whisker = inside().fold(f64::INFINITY, f64::min);
    let upper_whisker = inside().fold(f64::NEG_INFINITY, f64::max);
    let outliers = values
        .iter()
        .copied()
        .filter(|&v| v < low_fence || v > high_fence)
        .collect();

    BoxStats {
        label,
        count: values.len(),
        lower_whisker,
        q1,
        median,
        q3,
        upper_whisker,
        outliers,
    }
}

/// Order categories: the known labels that occur, then anything else in
/// first-seen order.
fn ordered_categories<'a>(
    known: &[&'a str],
    seen: impl Iterator<Item = &'a str>,
) -> Vec<String> {
    let mut extra: Vec<&'a str> = Vec::new();
    let mut present: Vec<&'a str> = Vec::new();
    for label in seen {
        if known.contains(&label) {
            if !present.contains(&label) {
                present.push(label);
            }
        } else if !extra.contains(&label) {
            extra.push(label);
        }
    }
    known
        .iter()
        .filter(|k| present.contains(*k))
        .map(|s| s.to_string())
        .chain(extra.into_iter().map(str::to_string))
        .collect()
}

pub fn experience_order(view: &FilteredView<'_>) -> Vec<String> {
    ordered_categories(
        &ExperienceLevel::KNOWN_LABELS,
        view.iter().map(|r| r.experience.label()),
    )
}

pub fn remote_order(view: &FilteredView<'_>) -> Vec<String> {
    ordered_categories(&RemoteWork::KNOWN_LABELS, view.iter().map(|r| r.remote.label()))
}

/// Salary box plot per experience label.
pub fn box_stats(view: &FilteredView<'_>) -> Vec<BoxStats> {
    experience_order(view)
        .into_iter()
        .map(|label| {
            let values = view
                .iter()
                .filter(|r| r.experience.label() == label)
                .map(|r| r.salary_in_usd)
                .collect();
            box_for(label, values)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Strip plot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StripPoint {
    pub remote: String,
    pub experience: String,
    pub salary_in_usd: f64,
    pub job_title: String,
    pub company_location: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct StripChart {
    /// Remote labels along the x axis.
    pub categories: Vec<String>,
    /// Experience labels used for colouring.
    pub series: Vec<String>,
    pub points: Vec<StripPoint>,
}

impl StripChart {
    pub fn category_index(&self, remote: &str) -> Option<usize> {
        self.categories.iter().position(|c| c == remote)
    }
}

pub fn strip_points(view: &FilteredView<'_>) -> StripChart {
    StripChart {
        categories: remote_order(view),
        series: experience_order(view),
        points: view
            .iter()
            .map(|r| StripPoint {
                remote: r.remote.label().to_string(),
                experience: r.experience.label().to_string(),
                salary_in_usd: r.salary_in_usd,
                job_title: r.job_title.clone(),
                company_location: r.company_location.clone(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Dataset, Record};

    fn record(exp: &str, ratio: &str, salary: f64) -> Record {
        let numeric = ratio.parse().ok();
        Record {
            work_year: 2021,
            experience: ExperienceLevel::from_code(exp),
            remote: RemoteWork::from_ratio(ratio, numeric),
            remote_ratio: numeric,
            salary_in_usd: salary,
            job_title: "Data Scientist".into(),
            company_location: "US".into(),
            cells: Vec::new(),
        }
    }

    fn dataset(records: Vec<Record>) -> Dataset {
        Dataset {
            records,
            ..Default::default()
        }
    }

    #[test]
    fn histogram_bins_cover_the_range() {
        let ds = dataset(
            [0.0, 10.0, 20.0, 30.0, 100.0]
                .into_iter()
                .map(|s| record("MI", "0", s))
                .collect(),
        );
        let bins = histogram(&FilteredView::all(&ds), 10);

        assert_eq!(bins.len(), 10);
        assert_eq!(bins[0].start, 0.0);
        assert_eq!(bins[9].end, 100.0);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 5);
        assert_eq!(bins[0].count, 1);
        assert_eq!(bins[1].count, 1);
        assert_eq!(bins[2].count, 1);
        assert_eq!(bins[3].count, 1);
        // Maximum falls in the closed last bin.
        assert_eq!(bins[9].count, 1);
    }

    #[test]
    fn histogram_of_constant_salaries_is_one_bin() {
        let ds = dataset(vec![record("MI", "0", 5.0), record("SE", "0", 5.0)]);
        let bins = histogram(&FilteredView::all(&ds), HISTOGRAM_BINS);
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].count, 2);
    }

    #[test]
    fn histogram_of_empty_view_is_empty() {
        let ds = Dataset::default();
        assert!(histogram(&FilteredView::all(&ds), HISTOGRAM_BINS).is_empty());
    }

    #[test]
    fn box_stats_interpolate_quartiles_and_flag_outliers() {
        let ds = dataset(
            [1.0, 2.0, 3.0, 4.0, 5.0, 100.0]
                .into_iter()
                .map(|s| record("SE", "0", s))
                .collect(),
        );
        let boxes = box_stats(&FilteredView::all(&ds));
        assert_eq!(boxes.len(), 1);

        let b = &boxes[0];
        assert_eq!(b.label, "Senior");
        assert_eq!(b.count, 6);
        assert_eq!(b.q1, 2.25);
        assert_eq!(b.median, 3.5);
        assert_eq!(b.q3, 4.75);
        assert_eq!(b.lower_whisker, 1.0);
        assert_eq!(b.upper_whisker, 5.0);
        assert_eq!(b.outliers, vec![100.0]);
    }

    #[test]
    fn categories_follow_canonical_then_first_seen_order() {
        let ds = dataset(vec![
            record("XX", "75", 1.0),
            record("SE", "100", 1.0),
            record("EN", "0", 1.0),
            record("YY", "0", 1.0),
        ]);
        let view = FilteredView::all(&ds);

        assert_eq!(experience_order(&view), vec!["Entry", "Senior", "XX", "YY"]);
        let strip = strip_points(&view);
        assert_eq!(strip.categories, vec!["On-site", "Remote", "75"]);
        assert_eq!(strip.category_index("75"), Some(2));
        assert_eq!(strip.points.len(), 4);
    }
}
