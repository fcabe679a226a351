//! Page Components
//!
//! One module per screen group. The logic each page runs lives in
//! `agentdesk::screens`; these modules only wire it to signals and views.

mod admin;
mod auth;
mod customers;
mod dashboard;
mod investments;
mod upload;

pub use admin::{AdminDashboard, AdminLogin};
pub use auth::{Login, Signup, Verify};
pub use customers::{AddCustomer, CustomerDetailPage, Customers};
pub use dashboard::Dashboard;
pub use investments::{AddInvestment, Investments};
pub use upload::Upload;
