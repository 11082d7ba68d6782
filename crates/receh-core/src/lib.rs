//! RECEH Core Library
//!
//! Aggregation and categorization engine for the RECEH expense dashboard:
//! - Transaction record model with lenient decoding of backend payloads
//! - Keyword-based category prediction and backfill
//! - Period/filter resolution over an explicit, caller-owned view state
//! - Period totals and daily averages
//! - Category breakdown with hideable categories
//! - Pagination math for the transaction list
//! - Layered TOML configuration
//! - Report sources (saved file or HTTP relay)
//!
//! Engine functions are pure: they take records, a view state and the
//! current time, and return plain data for a renderer.

pub mod breakdown;
pub mod category;
pub mod config;
pub mod error;
pub mod models;
pub mod pagination;
pub mod payload;
pub mod source;
pub mod summary;
pub mod view;

/// Test utilities including a mock relay server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use breakdown::{breakdown, UNCATEGORIZED_KEY};
pub use category::{BackfillResult, CategoryRule, CategoryTable};
pub use config::{EngineConfig, SourceConfig, ViewConfig};
pub use error::{Error, Result};
pub use models::{
    CategoryBreakdown, CategoryGroup, CategoryKey, Period, Summary, SummaryReport,
    TransactionRecord,
};
pub use pagination::{page_window, paginate, PageSlice, PageSlot};
pub use payload::{decode_report, Report, ReportEnvelope};
pub use source::{FileSource, HttpSource, ReportSource};
pub use summary::summarize_scope;
pub use view::{select_scope, CategoryFilter, Scope, ViewState};
