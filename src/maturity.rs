//! Suggested maturity dates
//!
//! The investment form fills the maturity date from the start date and the
//! scheme's conventional term. The suggestion is always editable.
//!
//! Month arithmetic clamps to the end of the target month, so a start on
//! 31 January with a one-month term lands on the last day of February.

use chrono::{Months, NaiveDate};

use crate::models::SchemeType;

/// Date format used by the API and the date inputs
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Start date plus the scheme's term
///
/// `None` only when the result falls outside chrono's date range.
pub fn default_maturity(start: NaiveDate, scheme: SchemeType) -> Option<NaiveDate> {
    start.checked_add_months(Months::new(scheme.term_months()))
}

/// Parse a `YYYY-MM-DD` date as entered in a form
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
