//! # tablecheck
//!
//! Batch ETL over restaurant order records.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                 Raw CSV (order records)                  │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [ingest: load + clean]
//! ┌─────────────────────────────────────────────────────────┐
//! │              Session (cleaned_data table)                │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [transform: group, rank, cut]
//! ┌─────────────────────────────────────────────────────────┐
//! │  restaurant_stats  popular_dishes  profitable_dishes     │
//! │  customer_stats    frequent_visitors                     │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [export]
//! ┌─────────────────────────────────────────────────────────┐
//! │                 <dir>/<table>.csv                        │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [warehouse: truncate-and-load]
//! ┌─────────────────────────────────────────────────────────┐
//! │               BigQuery / SQLite tables                   │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod export;
pub mod ingest;
pub mod model;
pub mod pipeline;
pub mod sql;
pub mod transform;
pub mod warehouse;

pub use model::TableName;
pub use pipeline::{PipelineError, PipelineOptions};
pub use transform::Session;
