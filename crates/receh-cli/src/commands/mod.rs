//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (config loading, report session, view flags)
//! - `format` - Rupiah, percentage and date display helpers
//! - `summary` - Period totals and daily average
//! - `list` - Paginated transaction list
//! - `breakdown` - Spending per category
//! - `predict` - Category prediction for a single description
//! - `backfill` - Fill missing categories on the loaded records

pub mod backfill;
pub mod breakdown;
pub mod core;
pub mod format;
pub mod list;
pub mod predict;
pub mod summary;

// Re-export command functions for main.rs
pub use backfill::*;
pub use breakdown::*;
pub use core::*;
pub use list::*;
pub use predict::*;
pub use summary::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
