//! # AgentDesk
//!
//! Back-office client for financial agents: customers, fixed-term
//! investment schemes (NSC, MIS, FD, KVP), spreadsheet bulk import and
//! aggregate stats, on top of a REST API.
//!
//! ## Modules
//!
//! - [`models`]: JSON bodies exchanged with the API
//! - [`api`]: endpoint table and the [`AuthApi`] / [`DeskApi`] traits
//! - [`session`]: injected session store (identity + loading flag)
//! - [`guard`]: route table and access decisions
//! - [`fetch`]: request-backed screen state and scoped cancellation
//! - [`screens`]: per-screen logic shared by every front end
//! - [`client`]: reqwest implementation of the API traits (`client` feature)
//! - [`config`]: TOML configuration with environment overrides (`client` feature)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use agentdesk::{HttpClient, SessionStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HttpClient::new("http://localhost:8000/api/v1")?;
//!     let session = SessionStore::new(client);
//!
//!     let outcome = session.login("9876543210", "secret").await;
//!     if let Some(user) = session.user() {
//!         println!("Signed in as {}", user.name());
//!     } else {
//!         println!("{}", outcome.message.unwrap_or_default());
//!     }
//!
//!     session.logout().await;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod error;
pub mod fetch;
pub mod guard;
pub mod maturity;
pub mod models;
pub mod screens;
pub mod session;

#[cfg(feature = "client")]
pub mod client;
#[cfg(feature = "client")]
pub mod config;

#[cfg(test)]
mod testing;

pub use api::{AuthApi, DeskApi, DEFAULT_API_BASE};
pub use error::{ApiError, ApiResult};
pub use fetch::{Lifetime, ListState, Loadable};
pub use guard::{resolve, GuardState, Navigation, Route};
pub use models::{
    AgentProfile, BulkUploadSummary, Customer, Identity, Investment, InvestmentStatus,
    NewCustomer, NewInvestment, Role, SchemeType, Stats, UploadFile,
};
pub use screens::{FailureAction, FormError};
pub use session::{AuthOutcome, SessionState, SessionStore};

#[cfg(feature = "client")]
pub use client::{HttpClient, SessionFile, SessionFileError};
#[cfg(feature = "client")]
pub use config::{Config, ConfigError};
