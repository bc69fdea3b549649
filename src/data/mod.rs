/// Data layer: the point set and its file loaders.
///
/// Architecture:
/// ```text
///  .json / .csv / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset (all or nothing)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  equal-length x / y sequences
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
