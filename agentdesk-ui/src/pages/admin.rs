//! Admin Login and Dashboard Pages

use agentdesk::screens::admin::{admin_items, load_admin_stats};
use agentdesk::screens::auth::next_route;
use agentdesk::{FailureAction, Route as DeskRoute, Stats};
use leptos::*;
use leptos_router::*;

use super::auth::{AuthCard, Field};
use crate::components::{ErrorBanner, StatCards, SubmitButton};
use crate::state::{use_lifetime, use_session};

/// Admin login page
#[component]
pub fn AdminLogin() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();
    let secret = create_rw_signal(String::new());
    let error = create_rw_signal(None::<String>);
    let busy = create_rw_signal(false);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let session = session.clone();
        let navigate = navigate.clone();
        busy.set(true);
        error.set(None);

        spawn_local(async move {
            let outcome = session.store.admin_login(&secret.get_untracked()).await;
            busy.set(false);
            if outcome.success {
                navigate(&next_route(&DeskRoute::AdminLogin, "").path(), Default::default());
            } else {
                error.set(outcome.message);
            }
        });
    };

    view! {
        <AuthCard title="Admin sign in" subtitle="System-wide statistics".to_string()>
            <form class="space-y-4" on:submit=on_submit>
                <ErrorBanner message=error />
                <Field label="Secret key" kind="password" value=secret />
                <SubmitButton label="Sign in" busy_label="Verifying..." busy=busy />
            </form>
            <div class="text-sm text-gray-400">
                <A href="/login" class="hover:text-white">"Agent sign in"</A>
            </div>
        </AuthCard>
    }
}

/// Admin dashboard page
#[component]
pub fn AdminDashboard() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();
    let stats = create_rw_signal(None::<Stats>);
    let error = create_rw_signal(None::<String>);
    let lifetime = use_lifetime();

    {
        let session = session.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            let Some(result) = lifetime.bind(load_admin_stats(session.api())).await else {
                return;
            };
            match result {
                Ok(loaded) => stats.set(Some(loaded)),
                Err(FailureAction::ForceLogout { redirect }) => {
                    session.sign_out().await;
                    navigate(&redirect.path(), Default::default());
                }
                Err(FailureAction::Show(message)) => {
                    web_sys::console::error_1(&format!("Failed to load admin stats: {}", message).into());
                    error.set(Some(message));
                }
            }
        });
    }

    let sign_out = move |_| {
        let session = session.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            session.sign_out().await;
            navigate(&DeskRoute::AdminLogin.path(), Default::default());
        });
    };

    let cards = Signal::derive(move || stats.with(|s| admin_items(s.as_ref())));

    view! {
        <div class="space-y-8">
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Admin Dashboard"</h1>
                    <p class="text-gray-400 mt-1">"Totals across every agent"</p>
                </div>
                <button
                    class="px-4 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg"
                    on:click=sign_out
                >
                    "Sign out"
                </button>
            </div>
            <ErrorBanner message=error />
            <StatCards cards=cards />
        </div>
    }
}
