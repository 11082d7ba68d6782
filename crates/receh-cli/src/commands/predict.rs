//! Category prediction command implementation

use anyhow::Result;
use receh_core::{CategoryKey, CategoryTable};
use serde_json::json;

use super::format::category_label;

pub fn cmd_predict(table: &CategoryTable, text: &str, json: bool) -> Result<()> {
    let category = table.predict(Some(text));

    if json {
        let output = json!({ "text": text, "category": category });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", category_label(&CategoryKey::from_option(category)));
    Ok(())
}
