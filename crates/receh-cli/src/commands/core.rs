//! Shared command plumbing: config, report loading and view flags

use std::borrow::Cow;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use receh_core::{
    CategoryFilter, CategoryTable, EngineConfig, FileSource, HttpSource, Period, Report,
    ReportSource, TransactionRecord, ViewState, UNCATEGORIZED_KEY,
};
use tracing::{info, warn};

use crate::cli::ViewArgs;

/// Load config, letting `--url` win over the file and environment
pub fn load_config(path: Option<&Path>, url: Option<&str>) -> Result<EngineConfig> {
    let mut config = EngineConfig::load(path).context("Failed to load config")?;
    if let Some(url) = url {
        config.source.base_url = url.to_string();
    }
    Ok(config)
}

/// Records plus the config and clock they are viewed with
pub struct Session {
    pub config: EngineConfig,
    pub records: Vec<TransactionRecord>,
    /// All-time expense total reported by the backend, when it sent one
    pub balance_total: Option<u64>,
    pub now: NaiveDateTime,
}

impl Session {
    pub fn new(config: EngineConfig, records: Vec<TransactionRecord>, now: NaiveDateTime) -> Self {
        Self {
            config,
            records,
            balance_total: None,
            now,
        }
    }

    pub fn with_balance_total(mut self, balance_total: Option<u64>) -> Self {
        self.balance_total = balance_total;
        self
    }

    /// Load config and fetch the report from `file` or the relay
    pub async fn load(file: Option<&Path>, url: Option<&str>, config: Option<&Path>) -> Result<Self> {
        let config = load_config(config, url)?;

        let source: Box<dyn ReportSource> = match file {
            Some(path) => Box::new(FileSource::new(path)),
            None => Box::new(
                HttpSource::new(&config.source).context("Failed to create HTTP client")?,
            ),
        };

        let report = fetch_report(source.as_ref()).await;
        let now = config.view.now();
        Ok(Self::new(config, report.records, now).with_balance_total(report.balance_total))
    }

    /// Records to view, with predicted categories written in when `backfill` is set
    pub fn records(&self, backfill: bool) -> Cow<'_, [TransactionRecord]> {
        if backfill {
            let mut owned = self.records.clone();
            self.config.categories.backfill(&mut owned);
            Cow::Owned(owned)
        } else {
            Cow::Borrowed(&self.records)
        }
    }
}

/// Fetch a report, falling back to an empty one when the source fails
pub async fn fetch_report(source: &dyn ReportSource) -> Report {
    match source.fetch().await {
        Ok(report) => {
            info!(
                "Loaded {} records from {}",
                report.records.len(),
                source.describe()
            );
            report
        }
        Err(e) => {
            warn!("Could not load report from {}: {}", source.describe(), e);
            warn!("Continuing with no records");
            Report::default()
        }
    }
}

/// Build the view state described by the command-line flags
pub fn build_view(args: &ViewArgs, table: &CategoryTable, now: NaiveDateTime) -> Result<ViewState> {
    let period: Period = args.period.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    let mut view = ViewState::new(now).with_period(period);

    if args.month.is_some() || args.year.is_some() {
        let month = args.month.unwrap_or(view.month);
        let year = args.year.unwrap_or(view.year);
        view = view.with_month(month, year);
    }
    if let Some(category) = &args.category {
        view = view.with_category(CategoryFilter::parse(category, table));
    }
    if let Some(search) = &args.search {
        view = view.with_search(search);
    }

    for name in &args.hide {
        let key = if name.trim().eq_ignore_ascii_case(UNCATEGORIZED_KEY) {
            UNCATEGORIZED_KEY.to_string()
        } else {
            match table.resolve(name) {
                Some(resolved) => resolved.to_string(),
                None => {
                    warn!("Unknown category '{}' in --hide, ignoring", name);
                    continue;
                }
            }
        };
        view.hidden_categories.insert(key);
    }

    Ok(view.with_page(args.page))
}
