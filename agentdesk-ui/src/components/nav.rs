//! Navigation Component
//!
//! Header bar with the screen links and the signed-in user.

use agentdesk::Role;
use leptos::*;
use leptos_router::*;

use crate::state::use_session;

/// Navigation header, shown only while someone is signed in
#[component]
pub fn Nav() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();

    let role = {
        let session = session.clone();
        move || session.state.with(|s| s.user.as_ref().map(|u| u.role()))
    };

    let sign_out = {
        let session = session.clone();
        move |_| {
            let session = session.clone();
            let navigate = navigate.clone();
            let login = match session.state.with_untracked(|s| s.user.as_ref().map(|u| u.role())) {
                Some(Role::Admin) => "/admin/login",
                _ => "/login",
            };
            spawn_local(async move {
                session.sign_out().await;
                navigate(login, Default::default());
            });
        }
    };

    view! {
        <Show when={let role = role.clone(); move || role().is_some()}>
            <nav class="bg-gray-800 border-b border-gray-700">
                <div class="container mx-auto px-4">
                    <div class="flex items-center justify-between h-16">
                        <A href="/" class="flex items-center space-x-3">
                            <span class="text-xl font-bold text-white">"AgentDesk"</span>
                        </A>

                        <div class="flex items-center space-x-1">
                            {
                                let role = role.clone();
                                move || match role() {
                                    Some(Role::Admin) => view! {
                                        <NavLink href="/admin/dashboard" label="Admin" />
                                    }.into_view(),
                                    _ => view! {
                                        <NavLink href="/dashboard" label="Dashboard" />
                                        <NavLink href="/customers" label="Customers" />
                                        <NavLink href="/investments" label="Investments" />
                                        <NavLink href="/upload" label="Bulk Upload" />
                                    }.into_view(),
                                }
                            }
                        </div>

                        <div class="flex items-center space-x-4 text-sm">
                            <span class="text-gray-300">
                                {let session = session.clone(); move || session.user_name().unwrap_or_default()}
                            </span>
                            <button
                                class="px-3 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700"
                                on:click=sign_out.clone()
                            >
                                "Sign out"
                            </button>
                        </div>
                    </div>
                </div>
            </nav>
        </Show>
    }
}

/// Individual navigation link
#[component]
fn NavLink(href: &'static str, label: &'static str) -> impl IntoView {
    view! {
        <A
            href=href
            class="px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
            active_class="bg-gray-700 text-white"
        >
            {label}
        </A>
    }
}
