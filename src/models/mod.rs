//! Transport-level data types
//!
//! Every type here mirrors a JSON body exchanged with the back-office REST
//! API. None of them are owned or persisted by this crate: local state is
//! replaced wholesale from the latest response.
//!
//! - [`Identity`]: who is signed in (agent or admin)
//! - [`Customer`] / [`NewCustomer`]: customer records
//! - [`Investment`] / [`NewInvestment`]: fixed-term scheme records
//! - [`Stats`]: aggregate counts for the dashboards
//! - [`BulkUploadSummary`]: result of a spreadsheet import

mod auth;
mod customer;
mod identity;
mod investment;
mod stats;

pub use auth::{
    AdminLoginRequest, LoginRequest, MessageResponse, ResendOtpRequest, SignupRequest,
    VerifyRequest,
};
pub use customer::{Customer, NewCustomer};
pub use identity::{AgentProfile, Identity, Role, ADMIN_DISPLAY_NAME};
pub use investment::{Investment, InvestmentStatus, NewInvestment, SchemeType};
pub use stats::{BulkUploadSummary, Stats, UploadFile};
