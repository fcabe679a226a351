//! Screen logic shared by the browser and terminal front ends
//!
//! Each submodule holds what a screen computes (form validation, derived
//! rows, stat cards, messages) independent of how it is drawn. The Leptos
//! pages and the CLI subcommands both render from these types.

pub mod admin;
pub mod auth;
pub mod customers;
pub mod dashboard;
pub mod investments;
pub mod upload;

use thiserror::Error;

use crate::error::ApiError;
use crate::guard::Route;

/// What a screen does with a failed load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureAction {
    /// Session is gone: clear it and go to the given login screen
    ForceLogout { redirect: Route },
    /// Show the message in place of the data
    Show(String),
}

/// Map a load failure on a session-checked screen
pub fn failure_action(err: &ApiError, login_route: Route, fallback: &str) -> FailureAction {
    if err.is_unauthorized() {
        FailureAction::ForceLogout {
            redirect: login_route,
        }
    } else {
        FailureAction::Show(err.user_message(fallback))
    }
}

/// Form submission errors
///
/// Validation variants are raised before any request is sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("Principal must be greater than zero")]
    InvalidPrincipal,

    #[error("Invalid {field}: {value}. Use YYYY-MM-DD")]
    InvalidDate { field: &'static str, value: String },

    #[error("Please choose a file to upload")]
    NoFile,

    #[error("Please enter mobile number first.")]
    MobileRequired,

    /// Server detail or the screen's fallback message
    #[error("{0}")]
    Server(String),
}

impl FormError {
    pub fn from_api(err: &ApiError, fallback: &str) -> Self {
        FormError::Server(err.user_message(fallback))
    }
}

/// Amount in rupees with Indian digit grouping, e.g. `₹ 12,50,000.5`
pub fn format_rupees(amount: f64) -> String {
    format!("₹ {}", group_indian(amount))
}

/// Indian digit grouping: last three digits, then pairs
///
/// At most two fractional digits are kept, trailing zeros dropped.
pub fn group_indian(amount: f64) -> String {
    let paise_total = (amount.abs() * 100.0).round() as u64;
    let whole = (paise_total / 100).to_string();
    let paise = paise_total % 100;

    let grouped = if whole.len() <= 3 {
        whole
    } else {
        let (head, tail) = whole.split_at(whole.len() - 3);
        let mut pairs = Vec::new();
        let mut end = head.len();
        while end > 0 {
            let start = end.saturating_sub(2);
            pairs.push(&head[start..end]);
            end = start;
        }
        pairs.reverse();
        format!("{},{}", pairs.join(","), tail)
    };

    let mut out = String::new();
    if amount < 0.0 && paise_total > 0 {
        out.push('-');
    }
    out.push_str(&grouped);
    if paise > 0 {
        let fraction = format!("{:02}", paise);
        out.push('.');
        out.push_str(fraction.trim_end_matches('0'));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_indian() {
        assert_eq!(group_indian(0.0), "0");
        assert_eq!(group_indian(999.0), "999");
        assert_eq!(group_indian(1000.0), "1,000");
        assert_eq!(group_indian(100000.0), "1,00,000");
        assert_eq!(group_indian(1250000.5), "12,50,000.5");
        assert_eq!(group_indian(123456789.25), "12,34,56,789.25");
        assert_eq!(group_indian(-2500.0), "-2,500");
    }

    #[test]
    fn test_format_rupees() {
        assert_eq!(format_rupees(25000.0), "₹ 25,000");
    }

    #[test]
    fn test_failure_action() {
        let unauthorized = ApiError::from_status(401, "");
        assert_eq!(
            failure_action(&unauthorized, Route::AdminLogin, "Failed"),
            FailureAction::ForceLogout {
                redirect: Route::AdminLogin
            }
        );

        let rejected = ApiError::from_status(403, r#"{"detail":"Not enough permissions"}"#);
        assert_eq!(
            failure_action(&rejected, Route::Login, "Failed"),
            FailureAction::Show("Not enough permissions".to_string())
        );
    }

    #[test]
    fn test_form_error_messages() {
        assert_eq!(FormError::Missing("Full name").to_string(), "Full name is required");
        assert_eq!(
            FormError::MobileRequired.to_string(),
            "Please enter mobile number first."
        );
        let server = FormError::from_api(&ApiError::Unreachable("x".into()), "Failed to upload file");
        assert_eq!(server.to_string(), "Failed to upload file");
    }
}
