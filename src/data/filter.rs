use super::model::{Dataset, Record};

/// UI option value meaning "no constraint".
pub const ALL: &str = "All";

// ---------------------------------------------------------------------------
// FilterCriteria
// ---------------------------------------------------------------------------

/// Active equality constraints.  `None` means the field is unconstrained;
/// set fields are combined with logical AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub year: Option<i32>,
    /// Canonical experience label, e.g. `"Senior"`.
    pub experience: Option<String>,
    /// Canonical remote label, e.g. `"Hybrid"`.
    pub remote: Option<String>,
}

fn option_value(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty() && value != ALL).then_some(value)
}

impl FilterCriteria {
    /// Build criteria from selector strings, where `"All"` or a blank value
    /// leaves the field unset.  A year that is not an integer is treated as
    /// unset.
    pub fn from_options(year: &str, experience: &str, remote: &str) -> Self {
        Self {
            year: option_value(year).and_then(|y| y.parse().ok()),
            experience: option_value(experience).map(str::to_string),
            remote: option_value(remote).map(str::to_string),
        }
    }

    pub fn is_unconstrained(&self) -> bool {
        self.year.is_none() && self.experience.is_none() && self.remote.is_none()
    }

    /// Whether a single record satisfies every set field.
    pub fn matches(&self, record: &Record) -> bool {
        self.year.map_or(true, |y| record.work_year == y)
            && self
                .experience
                .as_deref()
                .map_or(true, |e| record.experience.label() == e)
            && self
                .remote
                .as_deref()
                .map_or(true, |r| record.remote.label() == r)
    }
}

// ---------------------------------------------------------------------------
// FilteredView
// ---------------------------------------------------------------------------

/// The rows of a dataset that satisfy some criteria, in dataset order.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    dataset: &'a Dataset,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    /// A view containing every row.
    pub fn all(dataset: &'a Dataset) -> Self {
        Self {
            dataset,
            indices: (0..dataset.len()).collect(),
        }
    }

    /// Rebuild a view from row indices previously taken from a view of the
    /// same dataset.
    pub(crate) fn from_indices(dataset: &'a Dataset, indices: Vec<usize>) -> Self {
        debug_assert!(indices.iter().all(|&i| i < dataset.len()));
        Self { dataset, indices }
    }

    /// Narrow this view further.  Refining with the same criteria twice is
    /// a no-op.
    pub fn refine(&self, criteria: &FilterCriteria) -> Self {
        if criteria.is_unconstrained() {
            return self.clone();
        }
        let indices = self
            .indices
            .iter()
            .copied()
            .filter(|&i| criteria.matches(&self.dataset.records[i]))
            .collect();
        Self {
            dataset: self.dataset,
            indices,
        }
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    /// Dataset row indices in this view.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn get(&self, pos: usize) -> Option<&'a Record> {
        let dataset: &'a Dataset = self.dataset;
        self.indices.get(pos).map(|&i| &dataset.records[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + '_ {
        let dataset: &'a Dataset = self.dataset;
        let records = &dataset.records;
        self.indices.iter().map(move |&i| &records[i])
    }
}

/// Return the rows of `dataset` that match `criteria`: one linear scan.
pub fn apply_filter<'a>(dataset: &'a Dataset, criteria: &FilterCriteria) -> FilteredView<'a> {
    FilteredView::all(dataset).refine(criteria)
}
