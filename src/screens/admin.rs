//! Admin dashboard

use crate::api::AuthApi;
use crate::guard::Route;
use crate::models::Stats;

use super::dashboard::{StatCard, MISSING};
use super::{failure_action, format_rupees, FailureAction};

/// The five system-wide stat items
pub fn admin_items(stats: Option<&Stats>) -> Vec<StatCard> {
    let count = |f: fn(&Stats) -> u64| {
        stats
            .map(|s| f(s).to_string())
            .unwrap_or_else(|| MISSING.to_string())
    };
    vec![
        StatCard {
            label: "Total Agents",
            value: count(|s| s.total_agents),
        },
        StatCard {
            label: "Total Customers",
            value: count(|s| s.total_customers),
        },
        StatCard {
            label: "Total Investments",
            value: count(|s| s.total_investments),
        },
        StatCard {
            label: "Total Asset Value",
            value: stats
                .map(|s| format_rupees(s.total_investment_value))
                .unwrap_or_else(|| MISSING.to_string()),
        },
        StatCard {
            label: "Pending Follow-ups",
            value: count(|s| s.pending_followups),
        },
    ]
}

/// Load system-wide stats; a 401 sends the admin back to `/admin/login`
pub async fn load_admin_stats<A: AuthApi + ?Sized>(api: &A) -> Result<Stats, FailureAction> {
    api.admin_stats().await.map_err(|e| {
        tracing::warn!("Failed to fetch admin stats: {}", e);
        failure_action(&e, Route::AdminLogin, "Failed to load admin stats")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::testing::MockApi;

    #[test]
    fn test_admin_items() {
        let stats = Stats {
            total_agents: 4,
            total_customers: 40,
            total_investments: 90,
            total_investment_value: 4500000.0,
            pending_followups: 7,
        };
        let items = admin_items(Some(&stats));
        let labels: Vec<_> = items.iter().map(|i| i.label).collect();
        assert_eq!(
            labels,
            vec![
                "Total Agents",
                "Total Customers",
                "Total Investments",
                "Total Asset Value",
                "Pending Follow-ups"
            ]
        );
        assert_eq!(items[0].value, "4");
        assert_eq!(items[3].value, "₹ 45,00,000");
    }

    #[tokio::test]
    async fn test_admin_401_redirects_to_admin_login() {
        let api = MockApi::new();
        api.set_admin_stats(Err(ApiError::from_status(401, "")));

        assert_eq!(
            load_admin_stats(&api).await,
            Err(FailureAction::ForceLogout {
                redirect: Route::AdminLogin
            })
        );
    }
}
