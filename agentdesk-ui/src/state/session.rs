//! Session Context
//!
//! One [`SessionStore`] per page load, provided through Leptos context.
//! The store pushes every change into a signal so views re-render on
//! login and logout.

use std::rc::Rc;

use agentdesk::{SessionState, SessionStore};
use leptos::*;

use crate::api::GlooClient;

/// Session handle shared by every component
#[derive(Clone)]
pub struct Session {
    pub store: Rc<SessionStore<GlooClient>>,
    /// Mirror of the store state
    pub state: RwSignal<SessionState>,
    /// Success message (for toasts)
    pub notice: RwSignal<Option<String>>,
}

impl Session {
    /// The HTTP client behind the store
    pub fn api(&self) -> &GlooClient {
        self.store.api()
    }

    /// Name of the signed-in user, if any
    pub fn user_name(&self) -> Option<String> {
        self.state
            .with(|s| s.user.as_ref().map(|u| u.name().to_string()))
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_notice(&self, message: &str) {
        self.notice.set(Some(message.to_string()));

        let notice = self.notice;
        gloo_timers::callback::Timeout::new(3000, move || {
            notice.set(None);
        })
        .forget();
    }

    /// Sign out and clear the identity
    pub async fn sign_out(&self) {
        self.store.logout().await;
    }
}

/// Create the session, start the first profile check and provide it
pub fn provide_session() {
    let store = Rc::new(SessionStore::new(GlooClient::from_storage()));
    let state = create_rw_signal(store.snapshot());
    store.subscribe(move |snapshot| state.set(snapshot.clone()));

    let session = Session {
        store: store.clone(),
        state,
        notice: create_rw_signal(None),
    };
    provide_context(session);

    spawn_local(async move {
        store.init().await;
    });
}

/// Session from context
pub fn use_session() -> Session {
    expect_context::<Session>()
}
