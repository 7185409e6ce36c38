/// Data layer: core types, loading, filtering, aggregation, and export.
///
/// Architecture:
/// ```text
///  .xlsx / .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file, consent pre-filter → SurveyDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ SurveyDataset │  Vec<SurveyRecord>, ordered columns
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐     ┌──────────┐
///   │  filter   │ ──▶ │  links    │  annotate document URLs
///   └──────────┘     └──────────┘
///        │                 │
///        ▼                 ▼
///   ┌──────────┐     ┌──────────┐
///   │ aggregate │     │  export   │  frequency tables / xlsx buffer
///   └──────────┘     └──────────┘
/// ```
pub mod aggregate;
pub mod export;
pub mod filter;
pub mod links;
pub mod loader;
pub mod model;
pub mod sections;
