//! Dashboard Page
//!
//! Agent profile and the three headline numbers.

use agentdesk::screens::dashboard::{agent_cards, load_dashboard};
use agentdesk::{FailureAction, Stats};
use leptos::*;
use leptos_router::*;

use crate::components::{ErrorBanner, StatCards};
use crate::state::{use_lifetime, use_session};

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();
    let stats = create_rw_signal(None::<Stats>);
    let error = create_rw_signal(None::<String>);
    let lifetime = use_lifetime();

    {
        let session = session.clone();
        spawn_local(async move {
            let Some(result) = lifetime.bind(load_dashboard(session.api())).await else {
                return;
            };
            match result {
                Ok(loaded) => stats.set(Some(loaded)),
                Err(FailureAction::ForceLogout { redirect }) => {
                    session.sign_out().await;
                    navigate(&redirect.path(), Default::default());
                }
                Err(FailureAction::Show(message)) => {
                    web_sys::console::error_1(&format!("Failed to fetch dashboard stats: {}", message).into());
                    error.set(Some(message));
                }
            }
        });
    }

    let profile = move || {
        session.state.with(|s| {
            s.user
                .as_ref()
                .and_then(|u| u.profile().cloned())
        })
    };

    let cards = Signal::derive(move || stats.with(|s| agent_cards(s.as_ref())));

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Dashboard"</h1>
                <p class="text-gray-400 mt-1">"Your book at a glance"</p>
            </div>

            {move || profile().map(|p| view! {
                <section class="bg-gray-800 rounded-xl p-6">
                    <h2 class="text-xl font-semibold">{p.name}</h2>
                    <div class="text-sm text-gray-400 mt-2 space-y-1">
                        <div>"Agent ID: " {p.agent_id}</div>
                        <div>"Mobile: " {p.mobile}</div>
                    </div>
                </section>
            })}

            <ErrorBanner message=error />
            <StatCards cards=cards />

            <section class="flex flex-wrap gap-3">
                <A href="/customers/add" class="px-4 py-2 bg-primary-600 hover:bg-primary-700 rounded-lg">"Add customer"</A>
                <A href="/investments/add" class="px-4 py-2 bg-primary-600 hover:bg-primary-700 rounded-lg">"Add investment"</A>
                <A href="/upload" class="px-4 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg">"Bulk upload"</A>
            </section>
        </div>
    }
}
