//! Transaction list command implementation

use anyhow::Result;
use receh_core::{
    page_window, paginate, select_scope, CategoryKey, PageSlice, PageSlot, TransactionRecord,
};
use serde::Serialize;

use super::format::{category_label, format_rupiah, page_bar, record_date};
use super::{truncate, Session};
use crate::cli::ViewArgs;

/// JSON shape of one list page
#[derive(Serialize)]
struct ListPage<'a> {
    #[serde(flatten)]
    page: PageSlice<'a, &'a TransactionRecord>,
    buttons: Vec<PageSlot>,
}

pub fn cmd_list(session: &Session, args: &ViewArgs, json: bool) -> Result<()> {
    let table = &session.config.categories;
    let view_config = &session.config.view;
    let view = super::build_view(args, table, session.now)?;
    let records = session.records(args.backfill);

    let scope = select_scope(&records, &view, table, session.now);
    let page = paginate(&scope.filtered, view.page, view_config.page_size);
    let buttons = page_window(page.page, page.total_pages, view_config.max_page_buttons);

    if json {
        let output = ListPage { page, buttons };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if page.total_items == 0 {
        if view.filter_active() {
            println!("No transactions match the current filter.");
        } else {
            println!("No transactions found.");
        }
        return Ok(());
    }

    println!();
    println!("📝 Transaksi ({} total)", page.total_items);
    println!("   ─────────────────────────────────────────────────────────────");

    for record in page.items {
        let category = CategoryKey::from_option(table.effective(record, view.predict_missing));
        let photo = if record.has_photo() { " 📷" } else { "" };
        println!(
            "   {:16} │ {:>12} │ {:32} │ {}{}",
            record_date(record, session.now),
            format_rupiah(record.amount as f64),
            truncate(record.title(), 32),
            category_label(&category),
            photo
        );
        if let Some(actor) = record.actor() {
            println!("   {:16} │ {:>12} │ \x1b[2m{}\x1b[0m", "", "", truncate(actor, 32));
        }
    }

    println!();
    println!(
        "   Page {}/{} · showing {}-{} · {}",
        page.page,
        page.total_pages,
        page.start + 1,
        page.end,
        page_bar(&buttons, page.page)
    );
    if page.has_next() {
        println!("   Use --page {} for more.", page.page + 1);
    }

    Ok(())
}
