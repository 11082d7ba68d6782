//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use receh_core::test_utils::MockRelayServer;
use receh_core::{
    CategoryFilter, CategoryKey, EngineConfig, PageSlot, Period, UNCATEGORIZED_KEY,
};
use tempfile::TempDir;

use crate::cli::ViewArgs;
use crate::commands::format::{
    category_label, format_percent, format_rupiah, page_bar, period_label, record_date,
    UNCATEGORIZED_LABEL,
};
use crate::commands::{self, truncate, Session};

const PAYLOAD: &str = r#"{
    "status": "success",
    "message": "Data laporan berhasil diambil",
    "timestamp": "2024-01-06 21:30:00",
    "data": {
        "saldo": {"total_pengeluaran": 18000},
        "pengeluaran": [
            {"id": 1, "jumlah": "10000", "created_at": "2024-01-05 10:00:00", "keperluan": "Nasi padang", "user_nama": "Budi"},
            {"id": 2, "jumlah": "5000", "created_at": "2024-01-05 18:00:00", "keperluan": "Parkir motor", "user_nama": "Sari"},
            {"id": 3, "jumlah": "3000", "created_at": "2024-01-06 09:00:00", "keterangan": "Beli sesuatu", "user_nama": "Budi", "link_foto": "nota.jpg"}
        ]
    }
}"#;

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 6)
        .unwrap()
        .and_hms_opt(21, 30, 0)
        .unwrap()
}

fn view_args() -> ViewArgs {
    ViewArgs {
        period: "month".to_string(),
        page: 1,
        ..Default::default()
    }
}

/// Write the payload and a config into a temp dir, returning (dir, payload, config)
fn setup_files(config: &str) -> (TempDir, PathBuf, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let payload = dir.path().join("laporan.json");
    std::fs::write(&payload, PAYLOAD).unwrap();
    let config_path = dir.path().join("receh.toml");
    std::fs::write(&config_path, config).unwrap();
    (dir, payload, config_path)
}

fn setup_session() -> Session {
    let report = receh_core::decode_report(PAYLOAD).unwrap();
    Session::new(EngineConfig::embedded().unwrap(), report.records, now())
        .with_balance_total(report.balance_total)
}

// ========== Format Helper Tests ==========

#[test]
fn test_format_rupiah() {
    assert_eq!(format_rupiah(18000.0), "Rp 18.000");
    assert_eq!(format_rupiah(0.0), "Rp 0");
    assert_eq!(format_rupiah(999.0), "Rp 999");
    assert_eq!(format_rupiah(1234567.0), "Rp 1.234.567");
    assert_eq!(format_rupiah(-1500.0), "-Rp 1.500");
    assert_eq!(format_rupiah(f64::NAN), "Rp 0");
}

#[test]
fn test_format_rupiah_rounds_half_away_from_zero() {
    assert_eq!(format_rupiah(9000.4), "Rp 9.000");
    assert_eq!(format_rupiah(9000.5), "Rp 9.001");
    assert_eq!(format_rupiah(3333.333), "Rp 3.333");
    assert_eq!(format_rupiah(-2.5), "-Rp 3");
}

#[test]
fn test_category_label() {
    assert_eq!(
        category_label(&CategoryKey::Named("Tagihan".to_string())),
        "Tagihan"
    );
    assert_eq!(category_label(&CategoryKey::Uncategorized), UNCATEGORIZED_LABEL);
    assert_eq!(UNCATEGORIZED_LABEL, "Tanpa Kategori");
}

#[test]
fn test_format_percent() {
    assert_eq!(format_percent(75.0), "75.0%");
    assert_eq!(format_percent(33.333), "33.3%");
}

#[test]
fn test_page_bar() {
    let slots = vec![
        PageSlot::Page(1),
        PageSlot::Gap,
        PageSlot::Page(4),
        PageSlot::Page(5),
        PageSlot::Page(6),
        PageSlot::Gap,
        PageSlot::Page(20),
    ];
    assert_eq!(page_bar(&slots, 5), "1 … 4 [5] 6 … 20");
    assert_eq!(page_bar(&[], 1), "");
}

#[test]
fn test_period_label() {
    let session = setup_session();
    let view = commands::build_view(&view_args(), &session.config.categories, now()).unwrap();
    let table = &session.config.categories;
    let scope = receh_core::select_scope(&session.records, &view, table, now());
    let report = receh_core::summarize_scope(&scope, &view, now());
    assert_eq!(period_label(&report, now()), "Januari 2024");
}

#[test]
fn test_record_date_prefers_backend_format() {
    let session = setup_session();
    assert_eq!(record_date(&session.records[0], now()), "05/01/2024 10:00");

    let mut record = session.records[0].clone();
    record.date_formatted = Some("5 Jan 2024".to_string());
    assert_eq!(record_date(&record, now()), "5 Jan 2024");
}

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("exactly10!", 10), "exactly10!");
    assert_eq!(truncate("this is a long string", 10), "this is...");
    // Multi-byte characters are never split
    assert_eq!(truncate("kopi ☕☕☕☕☕☕☕", 8), "kopi ...");
}

// ========== View Flag Tests ==========

#[test]
fn test_build_view_defaults_to_now() {
    let table = receh_core::CategoryTable::default();
    let view = commands::build_view(&view_args(), &table, now()).unwrap();
    assert_eq!(view.period, Period::Month);
    assert_eq!((view.month, view.year), (1, 2024));
    assert_eq!(view.category, CategoryFilter::All);
    assert_eq!(view.page, 1);
    assert!(view.predict_missing);
}

#[test]
fn test_build_view_applies_flags() {
    let table = receh_core::CategoryTable::default();
    let args = ViewArgs {
        period: "tahun".to_string(),
        year: Some(2023),
        category: Some("transportasi".to_string()),
        search: Some("parkir".to_string()),
        page: 3,
        hide: vec![
            "tagihan".to_string(),
            "Uncategorized".to_string(),
            "Bogus".to_string(),
        ],
        ..view_args()
    };

    let view = commands::build_view(&args, &table, now()).unwrap();

    assert_eq!(view.period, Period::Year);
    assert_eq!((view.month, view.year), (1, 2023));
    assert_eq!(view.category, CategoryFilter::Named("Transportasi".to_string()));
    assert_eq!(view.search, "parkir");
    assert_eq!(view.page, 3);
    let hidden: Vec<&str> = view.hidden_categories.iter().map(String::as_str).collect();
    assert_eq!(hidden, vec!["Tagihan", UNCATEGORIZED_KEY]);
}

#[test]
fn test_build_view_rejects_unknown_period() {
    let table = receh_core::CategoryTable::default();
    let args = ViewArgs {
        period: "fortnight".to_string(),
        ..view_args()
    };
    assert!(commands::build_view(&args, &table, now()).is_err());
}

#[test]
fn test_build_view_clamps_month() {
    let table = receh_core::CategoryTable::default();
    let args = ViewArgs {
        month: Some(13),
        ..view_args()
    };
    let view = commands::build_view(&args, &table, now()).unwrap();
    assert_eq!((view.month, view.year), (12, 2024));
}

// ========== Session Tests ==========

#[tokio::test]
async fn test_session_load_from_file() {
    let (_dir, payload, config) = setup_files("[view]\npage_size = 2\n");

    let session = Session::load(Some(payload.as_path()), None, Some(config.as_path()))
        .await
        .unwrap();

    assert_eq!(session.records.len(), 3);
    assert_eq!(session.balance_total, Some(18000));
    assert_eq!(session.config.view.page_size, 2);
}

#[tokio::test]
async fn test_session_missing_file_falls_back_to_empty() {
    let (dir, _payload, config) = setup_files("");
    let missing = dir.path().join("missing.json");

    let session = Session::load(Some(missing.as_path()), None, Some(config.as_path()))
        .await
        .unwrap();

    assert!(session.records.is_empty());
}

#[tokio::test]
async fn test_session_bad_config_is_an_error() {
    let (_dir, payload, config) = setup_files("[view]\nutc_offset_hours = 99\n");
    let result = Session::load(Some(payload.as_path()), None, Some(config.as_path())).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_session_load_from_relay() {
    let server = MockRelayServer::start(PAYLOAD).await;
    let (_dir, _payload, config) = setup_files("[source]\ntimeout_secs = 5\n");

    let session = Session::load(None, Some(server.proxy_url().as_str()), Some(config.as_path()))
        .await
        .unwrap();

    assert_eq!(session.records.len(), 3);
    assert_eq!(
        server.last_endpoint().as_deref(),
        Some("api_laporan_lengkap.php")
    );
}

#[tokio::test]
async fn test_session_relay_error_falls_back_to_empty() {
    let server = MockRelayServer::start(r#"{"status": "error", "message": "down"}"#).await;
    let (_dir, _payload, config) = setup_files("");

    let session = Session::load(None, Some(server.proxy_url().as_str()), Some(config.as_path()))
        .await
        .unwrap();

    assert!(session.records.is_empty());
    assert_eq!(session.balance_total, None);
}

#[test]
fn test_session_records_backfill_is_a_copy() {
    let session = setup_session();

    let backfilled = session.records(true);
    assert_eq!(backfilled[0].category.as_deref(), Some("Makanan & Minuman"));
    assert_eq!(backfilled[1].category.as_deref(), Some("Transportasi"));
    assert_eq!(backfilled[2].category, None);

    assert!(session.records.iter().all(|r| r.category.is_none()));
    assert_eq!(session.records(false)[0].category, None);
}

// ========== Command Tests ==========

#[test]
fn test_cmd_summary() {
    let session = setup_session();
    assert!(commands::cmd_summary(&session, &view_args(), false).is_ok());
    assert!(commands::cmd_summary(&session, &view_args(), true).is_ok());

    let filtered = ViewArgs {
        category: Some("Transportasi".to_string()),
        ..view_args()
    };
    assert!(commands::cmd_summary(&session, &filtered, false).is_ok());
}

#[test]
fn test_build_summary_includes_all_time_total() {
    let session = setup_session();

    let output = commands::build_summary(&session, &view_args()).unwrap();
    assert_eq!(output.all_time_total, Some(18000));
    assert_eq!(output.report.overall.period_total, 18000);
    assert_eq!(output.year_record_count, 3);

    let value = serde_json::to_value(&output).unwrap();
    assert_eq!(value["all_time_total"], 18000);
    assert_eq!(value["overall"]["period_total"], 18000);
    assert_eq!(value["period"], "month");
}

#[test]
fn test_build_summary_without_balance() {
    let session = Session::new(EngineConfig::default(), Vec::new(), now());
    let output = commands::build_summary(&session, &view_args()).unwrap();
    assert_eq!(output.all_time_total, None);
    assert!(serde_json::to_value(&output).unwrap()["all_time_total"].is_null());
    assert!(commands::cmd_summary(&session, &view_args(), false).is_ok());
}

#[test]
fn test_cmd_summary_empty_year() {
    let session = setup_session();
    let args = ViewArgs {
        year: Some(2020),
        ..view_args()
    };
    assert!(commands::cmd_summary(&session, &args, false).is_ok());
}

#[test]
fn test_cmd_summary_bad_period() {
    let session = setup_session();
    let args = ViewArgs {
        period: "week".to_string(),
        ..view_args()
    };
    assert!(commands::cmd_summary(&session, &args, false).is_err());
}

#[test]
fn test_cmd_list() {
    let session = setup_session();
    assert!(commands::cmd_list(&session, &view_args(), false).is_ok());
    assert!(commands::cmd_list(&session, &view_args(), true).is_ok());

    let args = ViewArgs {
        search: Some("zzz".to_string()),
        ..view_args()
    };
    assert!(commands::cmd_list(&session, &args, false).is_ok());

    let args = ViewArgs {
        page: 99,
        ..view_args()
    };
    assert!(commands::cmd_list(&session, &args, false).is_ok());
}

#[test]
fn test_cmd_list_empty() {
    let session = Session::new(EngineConfig::default(), Vec::new(), now());
    assert!(commands::cmd_list(&session, &view_args(), false).is_ok());
}

#[test]
fn test_cmd_breakdown() {
    let session = setup_session();
    assert!(commands::cmd_breakdown(&session, &view_args(), false, false).is_ok());
    assert!(commands::cmd_breakdown(&session, &view_args(), true, true).is_ok());

    let args = ViewArgs {
        hide: vec!["Makanan & Minuman".to_string()],
        backfill: true,
        ..view_args()
    };
    assert!(commands::cmd_breakdown(&session, &args, false, false).is_ok());
}

#[test]
fn test_cmd_predict() {
    let table = receh_core::CategoryTable::default();
    assert!(commands::cmd_predict(&table, "beli pertalite motor", false).is_ok());
    assert!(commands::cmd_predict(&table, "", true).is_ok());
}

#[test]
fn test_cmd_backfill() {
    assert!(commands::cmd_backfill(setup_session(), false).is_ok());
    assert!(commands::cmd_backfill(setup_session(), true).is_ok());
}
