//! Period totals and daily averages

use std::collections::HashSet;

use chrono::NaiveDateTime;

use crate::models::{Period, Summary, SummaryReport, TransactionRecord};
use crate::view::{Scope, ViewState};

/// Months in a year; the year view averages per month
const MONTHS_PER_YEAR: f64 = 12.0;

/// Sum of amounts, saturating at `u64::MAX`
pub fn total(records: &[&TransactionRecord]) -> u64 {
    records
        .iter()
        .fold(0u64, |acc, r| acc.saturating_add(r.amount))
}

/// Number of distinct calendar dates with at least one record
pub fn active_days(records: &[&TransactionRecord], now: NaiveDateTime) -> u64 {
    records
        .iter()
        .map(|r| r.date(now))
        .collect::<HashSet<_>>()
        .len() as u64
}

/// Average per day for a period total
///
/// Day divides by 1, month by the number of active days, year by 12.
pub fn daily_average(period: Period, period_total: u64, active_day_count: u64) -> f64 {
    let divisor = match period {
        Period::Day => 1.0,
        Period::Month => active_day_count as f64,
        Period::Year => MONTHS_PER_YEAR,
    };
    if divisor == 0.0 {
        return 0.0;
    }
    period_total as f64 / divisor
}

/// Totals for one pair of year/period record sets
pub fn summarize(
    period: Period,
    year_items: &[&TransactionRecord],
    period_items: &[&TransactionRecord],
    now: NaiveDateTime,
) -> Summary {
    let period_total = total(period_items);
    let active_day_count = active_days(period_items, now);
    Summary {
        yearly_total: total(year_items),
        period_total,
        daily_average: daily_average(period, period_total, active_day_count),
        active_day_count,
    }
}

/// Overall and filtered summaries for a resolved scope
pub fn summarize_scope(scope: &Scope<'_>, view: &ViewState, now: NaiveDateTime) -> SummaryReport {
    SummaryReport {
        period: view.period,
        year: view.year,
        month: view.month,
        overall: summarize(view.period, &scope.year_items, &scope.period_items, now),
        filtered: summarize(
            view.period,
            &scope.filtered_year_items,
            &scope.filtered_period_items,
            now,
        ),
        filter_active: view.filter_active(),
    }
}
