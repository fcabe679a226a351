//! Route Guard
//!
//! Route table and the access decision for protected screens.
//!
//! The guard only distinguishes "someone is signed in" from "nobody is":
//! agent and admin identities pass the same check. While the first profile
//! check is still running nothing is rendered, so a returning user never
//! sees the signed-out screens flash.

use crate::session::SessionState;

/// Every screen the front ends know about
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Signup,
    /// OTP verification, optionally prefilled with a mobile number
    Verify { mobile: Option<String> },
    AdminLogin,
    /// `/`, forwards to the dashboard
    Home,
    Dashboard,
    Customers,
    AddCustomer,
    CustomerDetail(String),
    Investments,
    AddInvestment,
    Upload,
    AdminDashboard,
    NotFound,
}

impl Route {
    /// Parse a path (query string allowed) into a route
    pub fn parse(path: &str) -> Route {
        let (path, query) = match path.split_once('?') {
            Some((p, q)) => (p, Some(q)),
            None => (path, None),
        };
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["login"] => Route::Login,
            ["signup"] => Route::Signup,
            ["verify"] => Route::Verify {
                mobile: query.and_then(|q| query_param(q, "mobile")),
            },
            ["admin", "login"] => Route::AdminLogin,
            ["admin", "dashboard"] => Route::AdminDashboard,
            ["dashboard"] => Route::Dashboard,
            ["customers"] => Route::Customers,
            ["customers", "add"] => Route::AddCustomer,
            ["customers", id] => Route::CustomerDetail(decode(id)),
            ["investments"] => Route::Investments,
            ["investments", "add"] => Route::AddInvestment,
            ["upload"] => Route::Upload,
            _ => Route::NotFound,
        }
    }

    /// Path for links and redirects
    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Signup => "/signup".to_string(),
            Route::Verify { mobile: None } => "/verify".to_string(),
            Route::Verify {
                mobile: Some(mobile),
            } => format!("/verify?mobile={}", urlencoding::encode(mobile)),
            Route::AdminLogin => "/admin/login".to_string(),
            Route::Home => "/".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::Customers => "/customers".to_string(),
            Route::AddCustomer => "/customers/add".to_string(),
            Route::CustomerDetail(id) => format!("/customers/{}", urlencoding::encode(id)),
            Route::Investments => "/investments".to_string(),
            Route::AddInvestment => "/investments/add".to_string(),
            Route::Upload => "/upload".to_string(),
            Route::AdminDashboard => "/admin/dashboard".to_string(),
            Route::NotFound => "/404".to_string(),
        }
    }

    /// Whether the route requires a signed-in identity
    pub fn is_protected(&self) -> bool {
        !matches!(
            self,
            Route::Login
                | Route::Signup
                | Route::Verify { .. }
                | Route::AdminLogin
                | Route::NotFound
        )
    }
}

fn query_param(query: &str, key: &str) -> Option<String> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| decode(v))
        .filter(|v| !v.is_empty())
}

fn decode(s: &str) -> String {
    urlencoding::decode(s)
        .map(|d| d.into_owned())
        .unwrap_or_else(|_| s.to_string())
}

/// Guard state derived from the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// Initial profile check still running
    Checking,
    Authenticated,
    Unauthenticated,
}

impl GuardState {
    pub fn from_session(session: &SessionState) -> Self {
        if session.loading {
            GuardState::Checking
        } else if session.user.is_some() {
            GuardState::Authenticated
        } else {
            GuardState::Unauthenticated
        }
    }
}

/// What a front end should do for a requested route
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Render nothing (or a spinner) until the session settles
    Placeholder,
    Render(Route),
    Redirect(Route),
}

/// Decide what to show for `route` given the current session
pub fn resolve(route: Route, session: &SessionState) -> Navigation {
    let state = GuardState::from_session(session);
    if state == GuardState::Checking {
        return Navigation::Placeholder;
    }

    if !route.is_protected() {
        return Navigation::Render(route);
    }

    match (state, route) {
        (GuardState::Authenticated, Route::Home) => Navigation::Redirect(Route::Dashboard),
        (GuardState::Authenticated, route) => Navigation::Render(route),
        _ => Navigation::Redirect(Route::Login),
    }
}
