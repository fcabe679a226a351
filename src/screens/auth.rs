//! Login, signup and OTP verification screens

use crate::api::AuthApi;
use crate::guard::Route;
use crate::session::{AuthOutcome, SessionStore};

use super::FormError;

/// Status line next to the "Resend OTP" button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResendStatus {
    Idle,
    Sending,
    Sent,
    Failed,
}

impl ResendStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ResendStatus::Idle => "",
            ResendStatus::Sending => "Sending...",
            ResendStatus::Sent => "OTP sent!",
            ResendStatus::Failed => "Failed to send.",
        }
    }
}

/// Where a successful auth screen goes next
pub fn next_route(screen: &Route, mobile: &str) -> Route {
    match screen {
        Route::Signup => Route::Verify {
            mobile: Some(mobile.trim().to_string()).filter(|m| !m.is_empty()),
        },
        Route::AdminLogin => Route::AdminDashboard,
        _ => Route::Dashboard,
    }
}

/// Prompt under the verify heading
pub fn verify_prompt(mobile: &str) -> String {
    if mobile.trim().is_empty() {
        "Enter your mobile number and the OTP sent to it".to_string()
    } else {
        format!("Enter the code sent to {}", mobile.trim())
    }
}

/// Resend the OTP, refusing to call the server without a mobile number
///
/// Returns the status to show and, on failure, the error message.
pub async fn resend<A: AuthApi>(
    session: &SessionStore<A>,
    mobile: &str,
) -> Result<ResendStatus, (ResendStatus, FormError)> {
    let mobile = mobile.trim();
    if mobile.is_empty() {
        return Err((ResendStatus::Idle, FormError::MobileRequired));
    }
    let outcome = session.resend_otp(mobile).await;
    if outcome.success {
        Ok(ResendStatus::Sent)
    } else {
        Err((ResendStatus::Failed, outcome_error(outcome)))
    }
}

/// Failure message of an outcome as a form error
pub fn outcome_error(outcome: AuthOutcome) -> FormError {
    FormError::Server(outcome.message.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::testing::MockApi;

    #[tokio::test]
    async fn test_resend_requires_mobile() {
        let api = MockApi::new();
        let session = SessionStore::new(api.clone());

        let result = resend(&session, "  ").await;

        assert_eq!(result, Err((ResendStatus::Idle, FormError::MobileRequired)));
        assert_eq!(api.calls("resend_otp"), 0);
    }

    #[tokio::test]
    async fn test_resend_sent() {
        let api = MockApi::new();
        let session = SessionStore::new(api);

        let status = resend(&session, "9876543210").await.unwrap();

        assert_eq!(status.label(), "OTP sent!");
    }

    #[tokio::test]
    async fn test_resend_failure_keeps_detail() {
        let api = MockApi::new();
        api.set_resend(Err(ApiError::from_status(
            400,
            r#"{"detail":"Agent already verified"}"#,
        )));
        let session = SessionStore::new(api);

        let result = resend(&session, "9876543210").await;

        assert_eq!(
            result,
            Err((
                ResendStatus::Failed,
                FormError::Server("Agent already verified".to_string())
            ))
        );
    }

    #[tokio::test]
    async fn test_verify_failure_uses_fallback() {
        let api = MockApi::new();
        api.set_verify(Err(ApiError::from_status(400, "")));
        let session = SessionStore::new(api);

        let outcome = session.verify("9876543210", "1").await;

        assert_eq!(outcome_error(outcome).to_string(), "Verification failed");
    }

    #[test]
    fn test_next_routes() {
        assert_eq!(
            next_route(&Route::Signup, "9876543210"),
            Route::Verify {
                mobile: Some("9876543210".to_string())
            }
        );
        assert_eq!(next_route(&Route::AdminLogin, ""), Route::AdminDashboard);
        assert_eq!(next_route(&Route::Verify { mobile: None }, ""), Route::Dashboard);
    }

    #[test]
    fn test_verify_prompt() {
        assert_eq!(verify_prompt("9876543210"), "Enter the code sent to 9876543210");
        assert!(verify_prompt("").starts_with("Enter your mobile number"));
    }
}
