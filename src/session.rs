//! Session Store
//!
//! Explicit session object holding the signed-in identity and the initial
//! loading flag. Front ends construct one [`SessionStore`] and pass it to
//! whatever needs it; nothing here is global.
//!
//! # Lifecycle
//!
//! - [`SessionStore::init`]: first profile check, runs once
//! - [`SessionStore::load_user`]: refresh from `GET /auth/me`
//! - [`SessionStore::logout`]: teardown, always clears the identity
//!
//! Every operation returns an [`AuthOutcome`] instead of an error so that
//! screens can render the result directly.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::api::AuthApi;
use crate::error::ApiError;
use crate::models::Identity;

/// Snapshot of the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    /// Current identity, `None` when signed out
    pub user: Option<Identity>,
    /// True until the first profile check settles
    pub loading: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Uniform result of an auth operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthOutcome {
    pub success: bool,
    /// Server acknowledgement on success, error detail or fallback on failure
    pub message: Option<String>,
    /// HTTP status of the failure, when the server answered
    pub status: Option<u16>,
}

impl AuthOutcome {
    pub fn ok(message: Option<String>) -> Self {
        Self {
            success: true,
            message,
            status: None,
        }
    }

    pub fn failed(err: &ApiError, fallback: &str) -> Self {
        Self {
            success: false,
            message: Some(err.user_message(fallback)),
            status: err.status(),
        }
    }
}

type Observer = Rc<dyn Fn(&SessionState)>;

/// Session store over an authentication backend
pub struct SessionStore<A> {
    api: A,
    state: RefCell<SessionState>,
    initialized: Cell<bool>,
    /// Bumped by every operation that replaces the identity; profile
    /// responses started under an older value are dropped
    generation: Cell<u64>,
    observers: RefCell<Vec<Observer>>,
}

impl<A: AuthApi> SessionStore<A> {
    /// Create a store in the loading state
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: RefCell::new(SessionState::default()),
            initialized: Cell::new(false),
            generation: Cell::new(0),
            observers: RefCell::new(Vec::new()),
        }
    }

    /// The backend this store talks to
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Current state
    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn user(&self) -> Option<Identity> {
        self.state.borrow().user.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    /// Register a callback invoked after every state change
    pub fn subscribe(&self, observer: impl Fn(&SessionState) + 'static) {
        self.observers.borrow_mut().push(Rc::new(observer));
    }

    /// Initial profile check; later calls are no-ops
    pub async fn init(&self) {
        if self.initialized.replace(true) {
            return;
        }
        self.load_user().await;
    }

    /// Fetch the current profile
    ///
    /// Any failure, including 401, means "not signed in". Loading is
    /// cleared either way. A response that arrives after a login, logout
    /// or verification started is stale and ignored.
    pub async fn load_user(&self) {
        let generation = self.generation.get();
        let result = self.api.me().await;
        if self.generation.get() != generation {
            tracing::debug!("Ignoring stale profile response");
            return;
        }
        match result {
            Ok(profile) => {
                tracing::info!(agent_id = %profile.agent_id, "Session loaded");
                self.update(|state| {
                    state.user = Some(Identity::Agent(profile));
                    state.loading = false;
                });
            }
            Err(e) => {
                tracing::debug!("No active session: {}", e);
                self.update(|state| {
                    state.user = None;
                    state.loading = false;
                });
            }
        }
    }

    /// Agent login; on success the profile is reloaded
    pub async fn login(&self, mobile: &str, password: &str) -> AuthOutcome {
        self.begin();
        match self.api.login(mobile, password).await {
            Ok(()) => {
                self.load_user().await;
                AuthOutcome::ok(None)
            }
            Err(e) => {
                tracing::warn!("Login failed: {}", e);
                self.settle();
                AuthOutcome::failed(&e, "Login failed")
            }
        }
    }

    /// Admin login
    ///
    /// The admin identity is installed only after the admin-only stats
    /// endpoint accepts the new session.
    pub async fn admin_login(&self, secret_key: &str) -> AuthOutcome {
        self.begin();
        if let Err(e) = self.api.admin_login(secret_key).await {
            tracing::warn!("Admin login failed: {}", e);
            self.settle();
            return AuthOutcome::failed(&e, "Login failed");
        }

        match self.api.admin_stats().await {
            Ok(_) => {
                tracing::info!("Admin session verified");
                self.update(|state| {
                    state.user = Some(Identity::admin());
                    state.loading = false;
                });
                AuthOutcome::ok(None)
            }
            Err(e) => {
                tracing::warn!("Admin session could not be verified: {}", e);
                self.update(|state| {
                    state.user = None;
                    state.loading = false;
                });
                AuthOutcome::failed(&e, "Admin session could not be verified")
            }
        }
    }

    /// Sign out; the local identity is cleared even if the server call fails
    pub async fn logout(&self) {
        self.begin();
        if let Err(e) = self.api.logout().await {
            tracing::warn!("Logout request failed: {}", e);
        }
        self.update(|state| {
            state.user = None;
            state.loading = false;
        });
        tracing::info!("Session cleared");
    }

    pub async fn signup(&self, name: &str, mobile: &str, password: &str) -> AuthOutcome {
        match self.api.signup(name, mobile, password).await {
            Ok(message) => AuthOutcome::ok(message),
            Err(e) => AuthOutcome::failed(&e, "Signup failed"),
        }
    }

    /// Verify the signup OTP; success signs the agent in
    pub async fn verify(&self, mobile: &str, otp: &str) -> AuthOutcome {
        self.begin();
        match self.api.verify(mobile, otp).await {
            Ok(message) => {
                self.load_user().await;
                AuthOutcome::ok(message)
            }
            Err(e) => {
                self.settle();
                AuthOutcome::failed(&e, "Verification failed")
            }
        }
    }

    pub async fn resend_otp(&self, mobile: &str) -> AuthOutcome {
        match self.api.resend_otp(mobile).await {
            Ok(message) => AuthOutcome::ok(message),
            Err(e) => AuthOutcome::failed(&e, "Resend failed"),
        }
    }

    /// Invalidate profile checks already in flight
    fn begin(&self) {
        self.generation.set(self.generation.get() + 1);
    }

    /// Clear the loading flag without touching the identity
    fn settle(&self) {
        if self.state.borrow().loading {
            self.update(|state| state.loading = false);
        }
    }

    fn update(&self, f: impl FnOnce(&mut SessionState)) {
        let snapshot = {
            let mut state = self.state.borrow_mut();
            f(&mut state);
            state.clone()
        };
        // Observers may subscribe more observers
        let observers: Vec<Observer> = self.observers.borrow().clone();
        for observer in observers {
            observer(&snapshot);
        }
    }
}
