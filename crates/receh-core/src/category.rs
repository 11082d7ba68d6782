//! Keyword-based category prediction
//!
//! Categories are matched by naive lowercase substring containment, in table
//! order: the first category with any keyword contained in the description
//! wins. A keyword inside an unrelated longer word still matches ("air" in
//! "kairos"); word-boundary matching would change results for existing data.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::TransactionRecord;

/// A category and the keywords that select it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub name: String,
    pub keywords: Vec<String>,
}

impl CategoryRule {
    pub fn new(name: &str, keywords: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    fn matches(&self, lowered: &str) -> bool {
        self.keywords
            .iter()
            .any(|k| !k.is_empty() && lowered.contains(k.as_str()))
    }
}

/// Ordered category → keywords table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTable {
    rules: Vec<CategoryRule>,
}

/// Result of a backfill pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BackfillResult {
    pub processed: u64,
    pub categorized: u64,
    pub left_uncategorized: u64,
}

impl CategoryTable {
    /// Build a table; keywords are lowercased and duplicate names keep the
    /// first occurrence
    pub fn new(rules: Vec<CategoryRule>) -> Self {
        let mut deduped: Vec<CategoryRule> = Vec::with_capacity(rules.len());
        for mut rule in rules {
            let name = rule.name.trim().to_string();
            if name.is_empty() || deduped.iter().any(|r| r.name == name) {
                continue;
            }
            rule.name = name;
            rule.keywords = rule
                .keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect();
            deduped.push(rule);
        }
        Self { rules: deduped }
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Position of a category in priority order
    pub fn position(&self, name: &str) -> Option<usize> {
        self.rules.iter().position(|r| r.name == name)
    }

    /// Canonical name for a category, matched case-insensitively
    pub fn resolve(&self, name: &str) -> Option<&str> {
        let wanted = name.trim();
        self.rules
            .iter()
            .find(|r| r.name.eq_ignore_ascii_case(wanted))
            .map(|r| r.name.as_str())
    }

    /// Predict a category for free text; `None` means uncategorized
    pub fn predict(&self, text: Option<&str>) -> Option<&str> {
        let text = text?;
        if text.trim().is_empty() {
            return None;
        }
        let lowered = text.to_lowercase();
        self.rules
            .iter()
            .find(|r| r.matches(&lowered))
            .map(|r| r.name.as_str())
    }

    /// Stored category when it is one of ours, otherwise none
    pub fn stored<'a>(&'a self, record: &TransactionRecord) -> Option<&'a str> {
        record.stored_category().and_then(|c| self.resolve(c))
    }

    /// Category a record counts under
    ///
    /// The stored category wins; with `predict_missing` the description is
    /// classified when nothing valid is stored.
    pub fn effective<'a>(
        &'a self,
        record: &TransactionRecord,
        predict_missing: bool,
    ) -> Option<&'a str> {
        match self.stored(record) {
            Some(name) => Some(name),
            None if predict_missing => self.predict(record.description()),
            None => None,
        }
    }

    /// Fill `category` on records that lack a valid one
    ///
    /// Stored names outside the table are cleared so that only known
    /// categories ever reach the renderer.
    pub fn backfill(&self, records: &mut [TransactionRecord]) -> BackfillResult {
        let mut result = BackfillResult::default();

        for record in records.iter_mut() {
            if let Some(name) = self.stored(record) {
                if record.category.as_deref() != Some(name) {
                    record.category = Some(name.to_string());
                }
                continue;
            }

            result.processed += 1;
            match self.predict(record.description()) {
                Some(name) => {
                    record.category = Some(name.to_string());
                    result.categorized += 1;
                }
                None => {
                    record.category = None;
                    result.left_uncategorized += 1;
                }
            }
        }

        debug!(
            "Backfill: {} processed, {} categorized, {} left uncategorized",
            result.processed, result.categorized, result.left_uncategorized
        );
        result
    }
}

impl Default for CategoryTable {
    /// Built-in Indonesian table
    fn default() -> Self {
        Self::new(vec![
            CategoryRule::new(
                "Makanan & Minuman",
                &[
                    "makan", "minum", "nasi", "kopi", "teh", "snack", "jajan", "ayam", "bakso",
                    "mie", "roti", "galon", "air",
                ],
            ),
            CategoryRule::new(
                "Transportasi",
                &[
                    "bensin", "pertalite", "pertamax", "solar", "parkir", "tol", "ojek", "gojek",
                    "grab", "motor", "mobil", "servis", "bengkel", "tiket",
                ],
            ),
            CategoryRule::new(
                "Belanja",
                &[
                    "belanja", "sabun", "sampo", "shampo", "detergen", "indomaret", "alfamart",
                    "pasar", "baju", "sepatu",
                ],
            ),
            CategoryRule::new(
                "Tagihan",
                &[
                    "listrik", "token", "pulsa", "kuota", "internet", "wifi", "pdam", "bpjs",
                    "cicilan", "sewa",
                ],
            ),
            CategoryRule::new(
                "Kesehatan",
                &["obat", "dokter", "apotek", "klinik", "vitamin", "rumah sakit", "periksa"],
            ),
            CategoryRule::new(
                "Hiburan",
                &["nonton", "bioskop", "game", "netflix", "spotify", "liburan", "wisata"],
            ),
            CategoryRule::new(
                "Pendidikan",
                &["buku", "sekolah", "kursus", "spp", "seminar", "fotokopi"],
            ),
            CategoryRule::new(
                "Sosial",
                &["sumbangan", "donasi", "kondangan", "zakat", "sedekah", "infaq", "arisan"],
            ),
        ])
    }
}
