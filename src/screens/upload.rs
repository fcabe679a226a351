//! Bulk upload

use crate::api::DeskApi;
use crate::models::{BulkUploadSummary, UploadFile};

use super::FormError;

/// Header row the server requires in an uploaded sheet
pub const EXPECTED_COLUMNS: [&str; 6] = [
    "Name",
    "Mobile",
    "Scheme",
    "Principal",
    "StartDate",
    "MaturityDate",
];

/// Confirmation shown after a successful upload
pub fn success_message(summary: &BulkUploadSummary) -> String {
    format!(
        "Success! Processed {} rows. Created {} customers and {} investments.",
        summary.total_rows, summary.customers_created, summary.investments_created
    )
}

/// Expected columns absent from a header row
///
/// Names must match exactly; the server does not fold case or spacing.
pub fn missing_columns<S: AsRef<str>>(headers: &[S]) -> Vec<&'static str> {
    EXPECTED_COLUMNS
        .iter()
        .copied()
        .filter(|expected| !headers.iter().any(|h| h.as_ref() == *expected))
        .collect()
}

/// Send the chosen file; no file means no request
pub async fn submit_upload<D: DeskApi + ?Sized>(
    api: &D,
    file: Option<UploadFile>,
) -> Result<BulkUploadSummary, FormError> {
    let file = file.ok_or(FormError::NoFile)?;
    let file_name = file.file_name.clone();
    tracing::debug!(file = %file_name, bytes = file.bytes.len(), "Uploading sheet");

    let summary = api.bulk_upload(file).await.map_err(|e| {
        tracing::warn!(file = %file_name, "Bulk upload failed: {}", e);
        FormError::from_api(&e, "Failed to upload file")
    })?;
    tracing::info!(
        rows = summary.total_rows,
        customers = summary.customers_created,
        investments = summary.investments_created,
        "Bulk upload processed"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::testing::MockApi;

    #[test]
    fn test_success_message_embeds_counts() {
        let summary = BulkUploadSummary {
            total_rows: 10,
            customers_created: 4,
            investments_created: 9,
        };
        assert_eq!(
            success_message(&summary),
            "Success! Processed 10 rows. Created 4 customers and 9 investments."
        );
    }

    #[test]
    fn test_server_header_row_passes() {
        let headers = ["Name", "Mobile", "Scheme", "Principal", "StartDate", "MaturityDate"];
        assert!(missing_columns(&headers).is_empty());
    }

    #[test]
    fn test_missing_columns() {
        let headers = ["name", "Mobile", "scheme_type", "Principal", "start_date", "MaturityDate"];
        assert_eq!(missing_columns(&headers), vec!["Name", "Scheme", "StartDate"]);
    }

    #[tokio::test]
    async fn test_no_file_sends_nothing() {
        let api = MockApi::new();
        assert_eq!(submit_upload(&api, None).await, Err(FormError::NoFile));
        assert_eq!(api.calls("bulk_upload"), 0);
    }

    #[tokio::test]
    async fn test_upload_passes_file_through() {
        let api = MockApi::new();
        api.set_upload(Ok(BulkUploadSummary {
            total_rows: 2,
            customers_created: 1,
            investments_created: 2,
        }));
        let file = UploadFile::new("batch.csv", b"name,mobile\n".to_vec());

        let summary = submit_upload(&api, Some(file)).await.unwrap();

        assert_eq!(summary.investments_created, 2);
        assert_eq!(api.uploads()[0].file_name, "batch.csv");
    }

    #[tokio::test]
    async fn test_upload_error_detail() {
        let api = MockApi::new();
        api.set_upload(Err(ApiError::from_status(
            400,
            r#"{"detail":"Invalid file format. Please upload .xlsx or .csv"}"#,
        )));
        let file = UploadFile::new("notes.txt", Vec::new());

        let err = submit_upload(&api, Some(file)).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "Invalid file format. Please upload .xlsx or .csv"
        );
    }
}
