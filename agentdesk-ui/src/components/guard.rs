//! Route Guard Component
//!
//! Wraps every protected page. Nothing is rendered until the first
//! profile check settles; afterwards the page renders only for a signed-in
//! identity and everyone else is sent to `/login`.

use agentdesk::{resolve, Navigation, Route as DeskRoute};
use leptos::*;
use leptos_router::*;

use super::Loading;
use crate::state::use_session;

#[component]
pub fn Protected(children: ChildrenFn) -> impl IntoView {
    let session = use_session().state;
    let location = use_location();

    let decision = create_memo(move |_| {
        let route = DeskRoute::parse(&location.pathname.get());
        session.with(|state| resolve(route, state))
    });

    move || match decision.get() {
        Navigation::Placeholder => view! { <Loading /> }.into_view(),
        Navigation::Render(_) => children().into_view(),
        Navigation::Redirect(target) => view! { <Redirect path=target.path() /> }.into_view(),
    }
}
