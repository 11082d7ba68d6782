//! View state and the period/filter resolver
//!
//! The caller owns a [`ViewState`] and threads it through every call; the
//! engine keeps no state between calls.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::category::CategoryTable;
use crate::models::{Period, TransactionRecord};

/// Category filter applied to the transaction list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum CategoryFilter {
    #[default]
    All,
    Uncategorized,
    Named(String),
}

impl CategoryFilter {
    /// Parse a filter value; anything that is not a known category is `All`
    pub fn parse(value: &str, table: &CategoryTable) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Self::All;
        }
        if trimmed.eq_ignore_ascii_case("uncategorized") {
            return Self::Uncategorized;
        }
        match table.resolve(trimmed) {
            Some(name) => Self::Named(name.to_string()),
            None => {
                debug!("Unknown category filter '{}', showing all", trimmed);
                Self::All
            }
        }
    }

    fn accepts(&self, category: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Uncategorized => category.is_none(),
            Self::Named(name) => category == Some(name.as_str()),
        }
    }
}

/// Everything the renderer needs to reproduce a view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub period: Period,
    /// 1-12
    pub month: u32,
    pub year: i32,
    pub category: CategoryFilter,
    pub search: String,
    /// 1-based page of the filtered list
    pub page: usize,
    /// Categories excluded from breakdown percentages
    pub hidden_categories: BTreeSet<String>,
    /// Classify records without a stored category when filtering/grouping
    pub predict_missing: bool,
}

impl ViewState {
    /// Month view of the month containing `now`
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            period: Period::Month,
            month: now.month(),
            year: now.year(),
            category: CategoryFilter::All,
            search: String::new(),
            page: 1,
            hidden_categories: BTreeSet::new(),
            predict_missing: true,
        }
    }

    pub fn with_period(mut self, period: Period) -> Self {
        self.period = period;
        self.page = 1;
        self
    }

    /// Select an explicit month and year; the month is clamped to 1-12
    pub fn with_month(mut self, month: u32, year: i32) -> Self {
        self.month = month.clamp(1, 12);
        self.year = year;
        self.page = 1;
        self
    }

    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self.page = 1;
        self
    }

    pub fn with_search(mut self, search: &str) -> Self {
        self.search = search.to_string();
        self.page = 1;
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page.max(1);
        self
    }

    /// Hide a visible category or show a hidden one
    pub fn toggle_hidden(mut self, category: &str) -> Self {
        if !self.hidden_categories.remove(category) {
            self.hidden_categories.insert(category.to_string());
        }
        self
    }

    pub fn filter_active(&self) -> bool {
        self.category != CategoryFilter::All || !self.search.trim().is_empty()
    }

    fn in_year(&self, date: NaiveDate) -> bool {
        date.year() == self.year
    }

    fn in_period(&self, date: NaiveDate, today: NaiveDate) -> bool {
        if !self.in_year(date) {
            return false;
        }
        match self.period {
            Period::Year => true,
            Period::Month => date.month() == self.month.clamp(1, 12),
            Period::Day => date.month() == self.month.clamp(1, 12) && date == today,
        }
    }
}

/// Records selected for a view, each list newest first
#[derive(Debug, Clone, Default)]
pub struct Scope<'a> {
    /// Category and search applied, any date
    pub filtered: Vec<&'a TransactionRecord>,
    /// Target year, no category/search
    pub year_items: Vec<&'a TransactionRecord>,
    /// Period window, no category/search
    pub period_items: Vec<&'a TransactionRecord>,
    /// Target year with category and search
    pub filtered_year_items: Vec<&'a TransactionRecord>,
    /// Period window with category and search
    pub filtered_period_items: Vec<&'a TransactionRecord>,
}

/// Case-insensitive substring search over purpose → note → actor
pub fn matches_search(record: &TransactionRecord, search: &str) -> bool {
    let needle = search.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    record
        .search_text()
        .map(|text| text.to_lowercase().contains(&needle))
        .unwrap_or(false)
}

/// Keep records whose effective category passes the filter
pub fn filter_by_category<'a>(
    records: &[&'a TransactionRecord],
    filter: &CategoryFilter,
    table: &CategoryTable,
    predict_missing: bool,
) -> Vec<&'a TransactionRecord> {
    records
        .iter()
        .copied()
        .filter(|r| filter.accepts(table.effective(r, predict_missing)))
        .collect()
}

/// Keep records matching the search text
pub fn filter_by_search<'a>(
    records: &[&'a TransactionRecord],
    search: &str,
) -> Vec<&'a TransactionRecord> {
    records
        .iter()
        .copied()
        .filter(|r| matches_search(r, search))
        .collect()
}

/// Sort newest first; equal timestamps keep their input order
pub fn sort_newest_first(records: &mut [&TransactionRecord], now: NaiveDateTime) {
    // slice::sort_by_key is stable
    records.sort_by_key(|r| std::cmp::Reverse(r.timestamp(now)));
}

/// Resolve the record sets for a view
///
/// `now` is the caller's current local time; it decides "today" for the day
/// period and stands in for unparseable timestamps.
pub fn select_scope<'a>(
    records: &'a [TransactionRecord],
    view: &ViewState,
    table: &CategoryTable,
    now: NaiveDateTime,
) -> Scope<'a> {
    let today = now.date();

    let mut all: Vec<&TransactionRecord> = records.iter().collect();
    sort_newest_first(&mut all, now);

    let by_category = filter_by_category(&all, &view.category, table, view.predict_missing);
    let filtered = filter_by_search(&by_category, &view.search);

    let year_items: Vec<_> = all
        .iter()
        .copied()
        .filter(|r| view.in_year(r.date(now)))
        .collect();
    let period_items: Vec<_> = year_items
        .iter()
        .copied()
        .filter(|r| view.in_period(r.date(now), today))
        .collect();
    let filtered_year_items: Vec<_> = filtered
        .iter()
        .copied()
        .filter(|r| view.in_year(r.date(now)))
        .collect();
    let filtered_period_items: Vec<_> = filtered_year_items
        .iter()
        .copied()
        .filter(|r| view.in_period(r.date(now), today))
        .collect();

    debug!(
        "Scope for {} {}-{:02}: {} filtered, {} in year, {} in period",
        view.period,
        view.year,
        view.month,
        filtered.len(),
        year_items.len(),
        period_items.len()
    );

    Scope {
        filtered,
        year_items,
        period_items,
        filtered_year_items,
        filtered_period_items,
    }
}
