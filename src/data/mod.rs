/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  URL / .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  fetch + parse → PassengerDataset (fail-fast)
///   └──────────┘
///        │
///        ▼
///   ┌─────────────────┐
///   │ PassengerDataset │  Vec<PassengerRecord>, year / month indices
///   └─────────────────┘
///        │
///        ▼
///   ┌──────────┐     ┌──────────┐
///   │  filter   │ ──▶ │  stats    │  summary, yearly totals, extremes
///   └──────────┘     └──────────┘
/// ```

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod period;
pub mod sample;
pub mod stats;
