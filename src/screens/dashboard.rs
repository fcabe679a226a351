//! Agent dashboard

use crate::api::DeskApi;
use crate::guard::Route;
use crate::models::Stats;

use super::{failure_action, format_rupees, FailureAction};

/// Shown for a stat the server has not reported yet
pub const MISSING: &str = "-";

/// One labelled number on a dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub label: &'static str,
    pub value: String,
}

impl StatCard {
    fn new(label: &'static str, value: Option<String>) -> Self {
        Self {
            label,
            value: value.unwrap_or_else(|| MISSING.to_string()),
        }
    }
}

/// Cards for the agent dashboard; `None` renders every value as `-`
pub fn agent_cards(stats: Option<&Stats>) -> Vec<StatCard> {
    vec![
        StatCard::new(
            "Total Customers",
            stats.map(|s| s.total_customers.to_string()),
        ),
        StatCard::new(
            "Total Investment Value",
            stats.map(|s| format_rupees(s.total_investment_value)),
        ),
        StatCard::new(
            "Pending Follow-ups",
            stats.map(|s| s.pending_followups.to_string()),
        ),
    ]
}

/// Load the agent's stats
///
/// A 401 means the session expired and sends the agent back to `/login`.
pub async fn load_dashboard<D: DeskApi + ?Sized>(api: &D) -> Result<Stats, FailureAction> {
    api.dashboard_stats().await.map_err(|e| {
        tracing::warn!("Failed to fetch dashboard stats: {}", e);
        failure_action(&e, Route::Login, "Failed to load dashboard stats")
    })
}
