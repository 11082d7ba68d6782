//! Display helpers for terminal output

use chrono::NaiveDateTime;
use receh_core::{CategoryKey, PageSlot, Period, SummaryReport, TransactionRecord};

/// Label for records without a category
pub const UNCATEGORIZED_LABEL: &str = "Tanpa Kategori";

const MONTH_NAMES: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Format an amount as Indonesian Rupiah, e.g. `Rp 18.000`
///
/// No decimals; halves round away from zero.
pub fn format_rupiah(value: f64) -> String {
    let rounded = if value.is_finite() { value.round() } else { 0.0 };
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-Rp {}", grouped)
    } else {
        format!("Rp {}", grouped)
    }
}

pub fn category_label(category: &CategoryKey) -> &str {
    category.name().unwrap_or(UNCATEGORIZED_LABEL)
}

/// Percentage with one decimal
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES[(month.clamp(1, 12) - 1) as usize]
}

/// Human label for the period a summary covers
pub fn period_label(report: &SummaryReport, now: NaiveDateTime) -> String {
    match report.period {
        Period::Day => format!("Hari ini, {}", now.format("%d/%m/%Y")),
        Period::Month => format!("{} {}", month_name(report.month), report.year),
        Period::Year => format!("Tahun {}", report.year),
    }
}

/// Date column for a record; the backend's own formatting wins when present
pub fn record_date(record: &TransactionRecord, now: NaiveDateTime) -> String {
    match record.date_formatted.as_deref() {
        Some(formatted) if !formatted.trim().is_empty() => formatted.to_string(),
        _ => record.timestamp(now).format("%d/%m/%Y %H:%M").to_string(),
    }
}

/// Page bar, e.g. `1 … 4 [5] 6 … 20`
pub fn page_bar(slots: &[PageSlot], current: usize) -> String {
    slots
        .iter()
        .map(|slot| match slot {
            PageSlot::Page(n) if *n == current => format!("[{}]", n),
            PageSlot::Page(n) => n.to_string(),
            PageSlot::Gap => "…".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
