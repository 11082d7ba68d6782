//! Backend report envelope
//!
//! The relay forwards the backend's JSON untouched:
//!
//! ```json
//! {
//!   "status": "success",
//!   "message": "Data laporan berhasil diambil",
//!   "timestamp": "2025-12-12 20:42:53",
//!   "data": { "saldo": { "total_pengeluaran": 150000 }, "pengeluaran": [ ... ] }
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{amount_from_value, TransactionRecord};

/// Top-level response from the report endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportEnvelope {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub data: Option<ReportData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportData {
    #[serde(default, alias = "pengeluaran")]
    pub expenses: Vec<TransactionRecord>,
    #[serde(default, alias = "saldo")]
    pub balance: Option<Balance>,
}

/// Balance block; only the all-time expense total is used
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Balance {
    #[serde(default, alias = "total_pengeluaran")]
    pub total_expenses: Option<Value>,
}

impl Balance {
    /// All-time expense total, parsed as leniently as record amounts
    pub fn total_expenses(&self) -> u64 {
        self.total_expenses
            .as_ref()
            .map(amount_from_value)
            .unwrap_or(0)
    }
}

/// Decoded report ready for the engine
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub records: Vec<TransactionRecord>,
    pub balance_total: Option<u64>,
    pub timestamp: Option<String>,
}

impl ReportEnvelope {
    pub fn is_success(&self) -> bool {
        self.status.eq_ignore_ascii_case("success")
    }

    /// Unwrap a successful envelope into a report
    pub fn into_report(self) -> Result<Report> {
        if !self.is_success() {
            return Err(Error::Backend(
                self.message
                    .unwrap_or_else(|| format!("status '{}'", self.status)),
            ));
        }

        let data = self.data.unwrap_or_default();
        debug!("Decoded report with {} records", data.expenses.len());

        Ok(Report {
            records: data.expenses,
            balance_total: data.balance.map(|b| b.total_expenses()),
            timestamp: self.timestamp,
        })
    }
}

/// Decode a report payload
///
/// Accepts either the full envelope or a bare array of records.
pub fn decode_report(json: &str) -> Result<Report> {
    let value: Value = serde_json::from_str(json)?;
    match value {
        Value::Array(_) => Ok(Report {
            records: serde_json::from_value(value)?,
            ..Default::default()
        }),
        Value::Object(_) => serde_json::from_value::<ReportEnvelope>(value)?.into_report(),
        _ => Err(Error::InvalidData(
            "report payload must be an object or an array".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_success_envelope() {
        let json = r#"{
            "status": "success",
            "message": "Data laporan berhasil diambil",
            "timestamp": "2025-12-12 20:42:53",
            "data": {
                "saldo": {"total_pengeluaran": "150000"},
                "pengeluaran": [
                    {"id": 1, "jumlah": "10000", "created_at": "2025-12-01 10:00:00", "keperluan": "Kopi"},
                    {"id": 2, "jumlah": 5000, "created_at": "2025-12-02 11:00:00", "keperluan": "Parkir"}
                ]
            }
        }"#;

        let report = decode_report(json).unwrap();

        assert_eq!(report.records.len(), 2);
        assert_eq!(report.records[0].amount, 10000);
        assert_eq!(report.records[1].purpose.as_deref(), Some("Parkir"));
        assert_eq!(report.balance_total, Some(150000));
        assert_eq!(report.timestamp.as_deref(), Some("2025-12-12 20:42:53"));
    }

    #[test]
    fn test_decode_error_envelope() {
        let json = r#"{"status": "error", "message": "API request failed with HTTP code: 502"}"#;
        let err = decode_report(json).unwrap_err();
        match err {
            Error::Backend(message) => assert!(message.contains("502")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_decode_missing_data_is_empty() {
        let report = decode_report(r#"{"status": "success", "data": {}}"#).unwrap();
        assert!(report.records.is_empty());
        assert_eq!(report.balance_total, None);
    }

    #[test]
    fn test_decode_float_balance_is_truncated() {
        let json = r#"{"status": "success", "data": {"saldo": {"total_pengeluaran": 150000.75}}}"#;
        let report = decode_report(json).unwrap();
        assert_eq!(report.balance_total, Some(150000));

        let json = r#"{"status": "success", "data": {"saldo": {"total_pengeluaran": -20}}}"#;
        assert_eq!(decode_report(json).unwrap().balance_total, Some(0));
    }

    #[test]
    fn test_decode_keeps_records_next_to_bad_timestamp() {
        let json = r#"{
            "status": "success",
            "data": {"pengeluaran": [
                {"id": 1, "jumlah": "10000", "created_at": "2024-01-05 10:00:00", "keperluan": "Nasi"},
                {"id": 2, "jumlah": "3000", "created_at": 1704441600, "keperluan": "Kopi"}
            ]}
        }"#;
        let report = decode_report(json).unwrap();
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.records[0].created_at.as_deref(), Some("2024-01-05 10:00:00"));
        assert_eq!(report.records[1].created_at, None);
        assert_eq!(report.records[1].amount, 3000);
    }

    #[test]
    fn test_decode_bare_array() {
        let report = decode_report(r#"[{"jumlah": "700"}]"#).unwrap();
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].amount, 700);
    }

    #[test]
    fn test_decode_rejects_scalars_and_garbage() {
        assert!(matches!(decode_report("42"), Err(Error::InvalidData(_))));
        assert!(matches!(decode_report("{not json"), Err(Error::Json(_))));
    }
}
