use std::collections::HashMap;

use serde::Serialize;

use super::filter::FilteredView;

/// Top-N selector choices offered by the dashboard.
pub const TOP_N_OPTIONS: [usize; 4] = [8, 10, 12, 15];
pub const DEFAULT_TOP_N: usize = 12;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleCount {
    pub job_title: String,
    pub count: usize,
}

/// KPIs for one filtered view.  The salary statistics and the remote share
/// are `None` when the view is empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryResult {
    pub row_count: usize,
    pub median_salary: Option<f64>,
    pub mean_salary: Option<f64>,
    /// Percentage (0–100) of rows with `remote_ratio == 100`.
    pub remote_share: Option<f64>,
    pub top_titles: Vec<TitleCount>,
}

pub fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}

/// Most frequent job titles, descending by count.  Ties keep the order in
/// which titles were first seen.
pub fn top_titles(view: &FilteredView<'_>, top_n: usize) -> Vec<TitleCount> {
    let mut counts: Vec<TitleCount> = Vec::new();
    let mut slot: HashMap<&str, usize> = HashMap::new();

    for record in view.iter() {
        match slot.get(record.job_title.as_str()) {
            Some(&i) => counts[i].count += 1,
            None => {
                slot.insert(record.job_title.as_str(), counts.len());
                counts.push(TitleCount {
                    job_title: record.job_title.clone(),
                    count: 1,
                });
            }
        }
    }

    // `sort_by` is stable, so equal counts stay in first-seen order.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(top_n);
    counts
}

pub fn summarize(view: &FilteredView<'_>, top_n: usize) -> SummaryResult {
    let row_count = view.len();
    let mut salaries: Vec<f64> = view.iter().map(|r| r.salary_in_usd).collect();

    let (mean_salary, remote_share) = if row_count == 0 {
        (None, None)
    } else {
        let n = row_count as f64;
        let fully_remote = view.iter().filter(|r| r.is_fully_remote()).count();
        (
            Some(salaries.iter().sum::<f64>() / n),
            Some(100.0 * fully_remote as f64 / n),
        )
    };

    SummaryResult {
        row_count,
        median_salary: median(&mut salaries),
        mean_salary,
        remote_share,
        top_titles: top_titles(view, top_n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{apply_filter, FilterCriteria};
    use crate::data::model::{Dataset, ExperienceLevel, Record, RemoteWork};

    fn record(year: i32, exp: &str, ratio: f64, salary: f64, title: &str) -> Record {
        Record {
            work_year: year,
            experience: ExperienceLevel::from_code(exp),
            remote: RemoteWork::from_ratio("", Some(ratio)),
            remote_ratio: Some(ratio),
            salary_in_usd: salary,
            job_title: title.to_string(),
            company_location: String::new(),
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
    fn two_row_example() {
        let ds = dataset(vec![
            record(2021, "EN", 100.0, 50000.0, "Data Analyst"),
            record(2022, "SE", 0.0, 150000.0, "Data Scientist"),
        ]);
        let view = apply_filter(&ds, &FilterCriteria::from_options("All", "All", "All"));
        let summary = summarize(&view, 8);

        assert_eq!(summary.row_count, 2);
        assert_eq!(summary.median_salary, Some(100000.0));
        assert_eq!(summary.mean_salary, Some(100000.0));
        assert_eq!(summary.remote_share, Some(50.0));
        assert_eq!(
            summary.top_titles,
            vec![
                TitleCount {
                    job_title: "Data Analyst".into(),
                    count: 1
                },
                TitleCount {
                    job_title: "Data Scientist".into(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn empty_view_has_no_statistics() {
        let ds = dataset(vec![record(2021, "EN", 100.0, 50000.0, "Data Analyst")]);
        let view = apply_filter(&ds, &FilterCriteria::from_options("1999", "All", "All"));
        let summary = summarize(&view, 10);

        assert_eq!(summary.row_count, 0);
        assert_eq!(summary.median_salary, None);
        assert_eq!(summary.mean_salary, None);
        assert_eq!(summary.remote_share, None);
        assert!(summary.top_titles.is_empty());
    }

    #[test]
    fn odd_median_is_middle_value() {
        assert_eq!(median(&mut [30.0, 10.0, 20.0]), Some(20.0));
        assert_eq!(median(&mut []), None);
    }

    #[test]
    fn top_titles_rank_by_count_with_stable_ties() {
        let ds = dataset(
            [
                "Data Engineer",
                "Data Analyst",
                "Data Scientist",
                "Data Analyst",
                "ML Engineer",
                "Data Scientist",
                "Data Scientist",
            ]
            .into_iter()
            .map(|t| record(2021, "MI", 0.0, 1.0, t))
            .collect(),
        );
        let view = FilteredView::all(&ds);

        let ranked: Vec<(String, usize)> = top_titles(&view, 3)
            .into_iter()
            .map(|t| (t.job_title, t.count))
            .collect();
        assert_eq!(
            ranked,
            vec![
                ("Data Scientist".to_string(), 3),
                ("Data Analyst".to_string(), 2),
                ("Data Engineer".to_string(), 1),
            ]
        );
    }

    #[test]
    fn top_n_larger_than_distinct_titles() {
        let ds = dataset(vec![
            record(2021, "MI", 0.0, 1.0, "A"),
            record(2021, "MI", 0.0, 1.0, "B"),
        ]);
        let titles = top_titles(&FilteredView::all(&ds), 15);
        assert_eq!(titles.len(), 2);
    }

    #[test]
    fn remote_share_counts_only_full_remote() {
        let ds = dataset(vec![
            record(2021, "MI", 100.0, 1.0, "A"),
            record(2021, "MI", 50.0, 1.0, "A"),
            record(2021, "MI", 0.0, 1.0, "A"),
            record(2021, "MI", 100.0, 1.0, "A"),
        ]);
        let summary = summarize(&FilteredView::all(&ds), 8);
        assert_eq!(summary.remote_share, Some(50.0));
    }
}
