//! Domain models for RECEH

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Title shown for a record with neither purpose nor note
pub const FALLBACK_TITLE: &str = "Pengeluaran";

/// A single expense record as delivered by the backend
///
/// Field names follow the engine's vocabulary; serde aliases accept the
/// backend's Indonesian keys (`jumlah`, `keperluan`, `user_nama`, ...).
/// A field of the wrong JSON type decodes as absent instead of failing the
/// whole payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    /// Amount in whole Rupiah; anything unparseable decodes as 0
    #[serde(default, alias = "jumlah", deserialize_with = "lenient_amount")]
    pub amount: u64,
    #[serde(default, deserialize_with = "lenient_text", alias = "createdAt")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", alias = "keperluan")]
    pub purpose: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", alias = "keterangan")]
    pub note: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", alias = "user_nama", alias = "actorName")]
    pub actor_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        alias = "admin_nama",
        skip_serializing_if = "Option::is_none"
    )]
    pub admin_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", alias = "link_foto", alias = "photoLink")]
    pub photo_link: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", alias = "kategori")]
    pub category: Option<String>,
    /// Backend-formatted amount, passed through for renderers
    #[serde(
        default,
        deserialize_with = "lenient_text",
        alias = "jumlah_formatted",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount_formatted: Option<String>,
    /// Backend-formatted date, passed through for renderers
    #[serde(
        default,
        deserialize_with = "lenient_text",
        alias = "tanggal_formatted",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_formatted: Option<String>,
}

impl TransactionRecord {
    /// Parsed `created_at`, or `now` when missing or malformed
    pub fn timestamp(&self, now: NaiveDateTime) -> NaiveDateTime {
        self.created_at
            .as_deref()
            .and_then(parse_timestamp)
            .unwrap_or(now)
    }

    /// Calendar date of the record (see [`Self::timestamp`])
    pub fn date(&self, now: NaiveDateTime) -> NaiveDate {
        self.timestamp(now).date()
    }

    /// Free-text description used for categorization: purpose, then note
    pub fn description(&self) -> Option<&str> {
        non_blank(self.purpose.as_deref()).or_else(|| non_blank(self.note.as_deref()))
    }

    /// Text searched by the free-text filter: purpose, then note, then actor
    pub fn search_text(&self) -> Option<&str> {
        self.description().or_else(|| self.actor())
    }

    /// Name of whoever recorded the expense
    pub fn actor(&self) -> Option<&str> {
        non_blank(self.actor_name.as_deref()).or_else(|| non_blank(self.admin_name.as_deref()))
    }

    pub fn title(&self) -> &str {
        self.description().unwrap_or(FALLBACK_TITLE)
    }

    pub fn has_photo(&self) -> bool {
        non_blank(self.photo_link.as_deref()).is_some()
    }

    /// Stored category, with blanks treated as absent
    pub fn stored_category(&self) -> Option<&str> {
        non_blank(self.category.as_deref())
    }
}

/// Returns `Some(s)` only when `s` has non-whitespace content
pub(crate) fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !v.trim().is_empty())
}

/// Parse a backend timestamp
///
/// The backend writes `YYYY-MM-DD HH:MM:SS`; the space is normalized to `T`
/// before parsing. RFC 3339 strings and bare dates are accepted too.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let normalized = raw.trim().replacen(' ', "T", 1);
    if normalized.is_empty() {
        return None;
    }

    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&normalized, format) {
            return Some(dt);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
        return Some(dt.naive_local());
    }

    NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Parse the leading decimal digits of a string, the way the dashboard's
/// `parseInt` did. Signs other than `+` yield 0.
pub fn parse_amount(raw: &str) -> u64 {
    let trimmed = raw.trim_start();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return 0;
    }
    // All-digit input can only fail on overflow
    digits[..end].parse().unwrap_or(u64::MAX)
}

/// Whole-Rupiah amount from any JSON value
///
/// Floats are truncated; negatives, non-numbers and garbage give 0.
pub(crate) fn amount_from_value(value: &Value) -> u64 {
    match value {
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                v
            } else if let Some(f) = n.as_f64() {
                if f.is_finite() && f > 0.0 {
                    f.trunc() as u64
                } else {
                    0
                }
            } else {
                0
            }
        }
        Value::String(s) => parse_amount(s),
        _ => 0,
    }
}

fn lenient_amount<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(amount_from_value(&value))
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

/// Summary granularity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Day,
    #[default]
    Month,
    Year,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

impl std::str::FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" | "hari" | "today" => Ok(Self::Day),
            "month" | "bulan" => Ok(Self::Month),
            "year" | "tahun" => Ok(Self::Year),
            _ => Err(format!("Unknown period: {}", s)),
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Period-scoped totals
///
/// `daily_average` is kept at full precision; round it when rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub yearly_total: u64,
    pub period_total: u64,
    pub daily_average: f64,
    pub active_day_count: u64,
}

/// Summary for the whole period plus the one restricted by category/search
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub period: Period,
    pub year: i32,
    pub month: u32,
    pub overall: Summary,
    pub filtered: Summary,
    /// True when a category filter or search text narrows the list
    pub filter_active: bool,
}

/// Grouping key for the category breakdown
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum CategoryKey {
    Named(String),
    Uncategorized,
}

impl CategoryKey {
    pub fn from_option(category: Option<&str>) -> Self {
        match category {
            Some(name) => Self::Named(name.to_string()),
            None => Self::Uncategorized,
        }
    }

    /// Category name, or `None` for the uncategorized bucket
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            Self::Uncategorized => None,
        }
    }
}

/// One row of the category breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub category: CategoryKey,
    pub total: u64,
    pub count: u64,
    /// Share of the visible total, 0-100 at full precision; 0 when hidden
    pub percent_of_total: f64,
    pub hidden: bool,
}

/// Category breakdown over a set of records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub groups: Vec<CategoryGroup>,
    /// Sum of totals over groups that are not hidden
    pub visible_total: u64,
}
