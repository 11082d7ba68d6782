//! Category breakdown command implementation

use anyhow::Result;
use receh_core::{breakdown, select_scope};

use super::format::{category_label, format_percent, format_rupiah};
use super::{truncate, Session};
use crate::cli::ViewArgs;

pub fn cmd_breakdown(session: &Session, args: &ViewArgs, filtered: bool, json: bool) -> Result<()> {
    let table = &session.config.categories;
    let view = super::build_view(args, table, session.now)?;
    let records = session.records(args.backfill);

    let scope = select_scope(&records, &view, table, session.now);
    let items = if filtered {
        &scope.filtered_period_items
    } else {
        &scope.period_items
    };
    let result = breakdown(items, table, &view.hidden_categories, view.predict_missing);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!();
    println!("🏷️  Pengeluaran per Kategori");
    println!("   ─────────────────────────────────────────────────────────────");

    if result.groups.is_empty() {
        println!("   No spending found in this period.");
        return Ok(());
    }

    println!("   Total: {}", format_rupiah(result.visible_total as f64));
    println!();
    println!(
        "   {:25} │ {:>14} │ {:>6} │ {:>5}",
        "Category", "Amount", "%", "Count"
    );
    println!("   ──────────────────────────┼────────────────┼────────┼───────");

    for group in &result.groups {
        let name = truncate(category_label(&group.category), 25);
        if group.hidden {
            println!(
                "   \x1b[2m{:25} │ {:>14} │ {:>6} │ {:>5}\x1b[0m",
                name,
                format_rupiah(group.total as f64),
                "hidden",
                group.count
            );
        } else {
            println!(
                "   {:25} │ {:>14} │ {:>6} │ {:>5}",
                name,
                format_rupiah(group.total as f64),
                format_percent(group.percent_of_total),
                group.count
            );
        }
    }

    Ok(())
}
