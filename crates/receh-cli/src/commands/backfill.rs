//! Backfill command implementation

use anyhow::Result;
use serde_json::json;

use super::Session;

/// Fill missing categories on the loaded records
///
/// With `--json` the updated records are printed so they can be saved.
pub fn cmd_backfill(session: Session, json: bool) -> Result<()> {
    let Session {
        config,
        mut records,
        ..
    } = session;

    let result = config.categories.backfill(&mut records);

    if json {
        let output = json!({ "result": result, "records": records });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!();
    println!("🔄 Backfill");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Records without a category: {}", result.processed);
    println!("   Categorized:                {}", result.categorized);
    println!("   Left uncategorized:         {}", result.left_uncategorized);

    Ok(())
}
