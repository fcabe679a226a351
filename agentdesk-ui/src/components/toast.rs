//! Toast Notification Component

use leptos::*;

use crate::state::use_session;

/// Success toast fed by [`Session::show_notice`](crate::state::session::Session::show_notice)
#[component]
pub fn Toast() -> impl IntoView {
    let session = use_session();

    view! {
        <div class="fixed bottom-4 right-4 z-50">
            {move || {
                session.notice.get().map(|message| view! {
                    <div class="flex items-center space-x-3 bg-green-600 text-white px-4 py-3 rounded-lg shadow-lg">
                        <span class="text-lg">"✓"</span>
                        <span class="text-sm font-medium">{message}</span>
                    </div>
                })
            }}
        </div>
    }
}
