/// Data layer: loading, normalization, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  first existing candidate → RawTable
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ normalize  │  typed Dataset, malformed rows dropped   (held by cache)
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterCriteria → FilteredView
///   └──────────┘
///        │
///        ▼
///   ┌──────────────────┐
///   │ summary / charts  │  KPIs, top titles, histogram, boxes, strip
///   └──────────────────┘
/// ```

pub mod cache;
pub mod charts;
pub mod error;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod report;
pub mod summary;
