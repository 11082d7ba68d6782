//! Summary command implementation

use anyhow::Result;
use receh_core::{select_scope, summarize_scope, Summary, SummaryReport};
use serde::Serialize;

use super::format::{format_rupiah, period_label};
use super::Session;
use crate::cli::ViewArgs;

/// Everything the summary cards show
#[derive(Debug, Serialize)]
pub struct SummaryOutput {
    /// All-time total from the backend's balance block
    pub all_time_total: Option<u64>,
    #[serde(flatten)]
    pub report: SummaryReport,
    pub filtered_count: usize,
    pub year_record_count: usize,
}

/// Resolve the view and compute the summary cards
pub fn build_summary(session: &Session, args: &ViewArgs) -> Result<SummaryOutput> {
    let table = &session.config.categories;
    let view = super::build_view(args, table, session.now)?;
    let records = session.records(args.backfill);

    let scope = select_scope(&records, &view, table, session.now);
    let report = summarize_scope(&scope, &view, session.now);

    Ok(SummaryOutput {
        all_time_total: session.balance_total,
        report,
        filtered_count: scope.filtered.len(),
        year_record_count: scope.year_items.len(),
    })
}

pub fn cmd_summary(session: &Session, args: &ViewArgs, json: bool) -> Result<()> {
    let output = build_summary(session, args)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let report = &output.report;

    println!();
    println!("📊 Ringkasan Pengeluaran");
    println!("   Periode: {}", period_label(report, session.now));
    println!("   ─────────────────────────────────────────────────────────────");

    if let Some(total) = output.all_time_total {
        println!(
            "   {:<20} {:>16}",
            "Total Pengeluaran",
            format_rupiah(total as f64)
        );
    }

    if output.year_record_count == 0 {
        println!("   No expenses recorded in {}.", report.year);
        return Ok(());
    }

    print_summary(&report.overall, report.year);

    if report.filter_active {
        println!();
        println!("   🔍 Filtered ({} matching records)", output.filtered_count);
        print_summary(&report.filtered, report.year);
    }

    Ok(())
}

fn print_summary(summary: &Summary, year: i32) {
    println!(
        "   {:<20} {:>16}",
        format!("Total {}", year),
        format_rupiah(summary.yearly_total as f64)
    );
    println!(
        "   {:<20} {:>16}",
        "Total periode",
        format_rupiah(summary.period_total as f64)
    );
    println!(
        "   {:<20} {:>16}   ({} active days)",
        "Rata-rata / hari",
        format_rupiah(summary.daily_average),
        summary.active_day_count
    );
}
