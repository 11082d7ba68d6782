//! Per-category totals and shares

use std::collections::{BTreeSet, HashMap};

use crate::category::CategoryTable;
use crate::models::{CategoryBreakdown, CategoryGroup, CategoryKey, TransactionRecord};

/// Name used in a hidden set to hide the uncategorized bucket
pub const UNCATEGORIZED_KEY: &str = "uncategorized";

/// Group records by effective category
///
/// Groups are ordered by total, largest first. Equal totals follow table
/// order, with the uncategorized bucket after every named category.
/// Hidden categories stay in the list but are left out of the percentage
/// base and get a share of 0.
pub fn breakdown(
    records: &[&TransactionRecord],
    table: &CategoryTable,
    hidden: &BTreeSet<String>,
    predict_missing: bool,
) -> CategoryBreakdown {
    let mut totals: HashMap<CategoryKey, (u64, u64)> = HashMap::new();

    for record in records {
        let key = CategoryKey::from_option(table.effective(record, predict_missing));
        let entry = totals.entry(key).or_insert((0, 0));
        entry.0 = entry.0.saturating_add(record.amount);
        entry.1 += 1;
    }

    let rank = |key: &CategoryKey| -> usize {
        key.name()
            .and_then(|name| table.position(name))
            .unwrap_or(usize::MAX)
    };

    let mut groups: Vec<CategoryGroup> = totals
        .into_iter()
        .map(|(category, (total, count))| {
            let is_hidden = category
                .name()
                .map(|name| hidden.contains(name))
                .unwrap_or_else(|| hidden.contains(UNCATEGORIZED_KEY));
            CategoryGroup {
                category,
                total,
                count,
                percent_of_total: 0.0,
                hidden: is_hidden,
            }
        })
        .collect();

    groups.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| rank(&a.category).cmp(&rank(&b.category)))
    });

    let visible_total = groups
        .iter()
        .filter(|g| !g.hidden)
        .fold(0u64, |acc, g| acc.saturating_add(g.total));

    if visible_total > 0 {
        for group in groups.iter_mut().filter(|g| !g.hidden) {
            group.percent_of_total = group.total as f64 / visible_total as f64 * 100.0;
        }
    }

    CategoryBreakdown {
        groups,
        visible_total,
    }
}
