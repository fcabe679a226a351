//! Aggregate stats and bulk upload types

use serde::{Deserialize, Serialize};

/// Aggregate counts from `GET /dashboard/stats` and `GET /admin/stats`
///
/// Both endpoints share one shape; the agent dashboard ignores
/// `total_agents`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(default)]
    pub total_agents: u64,
    #[serde(default)]
    pub total_customers: u64,
    #[serde(default)]
    pub total_investments: u64,
    #[serde(default)]
    pub total_investment_value: f64,
    #[serde(default)]
    pub pending_followups: u64,
}

/// Result of `POST /upload/bulk`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkUploadSummary {
    #[serde(default)]
    pub total_rows: u64,
    #[serde(default, alias = "new_customers")]
    pub customers_created: u64,
    #[serde(default)]
    pub investments_created: u64,
}

/// A spreadsheet picked for bulk upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// MIME type guessed from the file extension
    pub fn mime_type(&self) -> &'static str {
        let lower = self.file_name.to_ascii_lowercase();
        if lower.ends_with(".csv") {
            "text/csv"
        } else if lower.ends_with(".xlsx") {
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        } else if lower.ends_with(".xls") {
            "application/vnd.ms-excel"
        } else {
            "application/octet-stream"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_deserialize() {
        let json = r#"{"total_agents":1,"total_customers":12,"total_investments":30,
                       "total_investment_value":1250000.5,"pending_followups":3}"#;
        let stats: Stats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.total_customers, 12);
        assert_eq!(stats.pending_followups, 3);
    }

    #[test]
    fn test_upload_summary_accepts_legacy_field() {
        let json = r#"{"message":"Upload processed","new_customers":4,"investments_created":9}"#;
        let summary: BulkUploadSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.customers_created, 4);
        assert_eq!(summary.investments_created, 9);
        assert_eq!(summary.total_rows, 0);
    }

    #[test]
    fn test_upload_mime_type() {
        assert_eq!(UploadFile::new("Book1.CSV", vec![]).mime_type(), "text/csv");
        assert_eq!(UploadFile::new("data.xls", vec![]).mime_type(), "application/vnd.ms-excel");
    }
}
