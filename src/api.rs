//! Back-office REST API surface
//!
//! The two traits split the API along the line the screens use it:
//! [`AuthApi`] backs the session store, [`DeskApi`] backs the record
//! screens. The native client ([`crate::client::HttpClient`]) and the
//! browser client in the dashboard crate both implement them.
//!
//! Futures are `?Send`: everything runs on one cooperative thread (the
//! browser event loop, or a single CLI task).

use async_trait::async_trait;

use crate::error::ApiResult;
use crate::models::{
    AgentProfile, BulkUploadSummary, Customer, Investment, NewCustomer, NewInvestment, Stats,
    UploadFile,
};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8000/api/v1";

/// Endpoint paths, relative to the API base URL
pub mod endpoints {
    pub const AUTH_LOGIN: &str = "/auth/login";
    pub const AUTH_ME: &str = "/auth/me";
    pub const AUTH_LOGOUT: &str = "/auth/logout";
    pub const AUTH_SIGNUP: &str = "/auth/signup";
    pub const AUTH_VERIFY: &str = "/auth/verify";
    pub const AUTH_RESEND_OTP: &str = "/auth/resend-otp";
    pub const ADMIN_LOGIN: &str = "/admin/login";
    pub const ADMIN_STATS: &str = "/admin/stats";
    pub const DASHBOARD_STATS: &str = "/dashboard/stats";
    pub const CUSTOMERS: &str = "/customers/";
    pub const INVESTMENTS: &str = "/investments/";
    pub const BULK_UPLOAD: &str = "/upload/bulk";

    /// Multipart field carrying the spreadsheet
    pub const UPLOAD_FIELD: &str = "file";

    /// `GET /customers/{id}`
    pub fn customer(id: &str) -> String {
        format!("/customers/{}", urlencoding::encode(id))
    }

    /// `GET /investments/` or `GET /investments/?customer_id=`
    pub fn investments(customer_id: Option<&str>) -> String {
        match customer_id {
            Some(id) => format!("{}?customer_id={}", INVESTMENTS, urlencoding::encode(id)),
            None => INVESTMENTS.to_string(),
        }
    }
}

/// Join a base URL and an endpoint path
pub fn join_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

/// Authentication endpoints
#[async_trait(?Send)]
pub trait AuthApi {
    /// `GET /auth/me`
    async fn me(&self) -> ApiResult<AgentProfile>;

    /// `POST /auth/login`; the server answers with a session cookie
    async fn login(&self, mobile: &str, password: &str) -> ApiResult<()>;

    /// `POST /auth/logout`
    async fn logout(&self) -> ApiResult<()>;

    /// `POST /auth/signup`, returns the server's acknowledgement message
    async fn signup(&self, name: &str, mobile: &str, password: &str) -> ApiResult<Option<String>>;

    /// `POST /auth/verify`; success also sets a session cookie
    async fn verify(&self, mobile: &str, otp: &str) -> ApiResult<Option<String>>;

    /// `POST /auth/resend-otp`
    async fn resend_otp(&self, mobile: &str) -> ApiResult<Option<String>>;

    /// `POST /admin/login`
    async fn admin_login(&self, secret_key: &str) -> ApiResult<()>;

    /// `GET /admin/stats`, only reachable with an admin session
    async fn admin_stats(&self) -> ApiResult<Stats>;
}

/// Record endpoints used by the agent screens
#[async_trait(?Send)]
pub trait DeskApi {
    /// `GET /dashboard/stats`
    async fn dashboard_stats(&self) -> ApiResult<Stats>;

    /// `GET /customers/`
    async fn list_customers(&self) -> ApiResult<Vec<Customer>>;

    /// `GET /customers/{id}`
    async fn get_customer(&self, customer_id: &str) -> ApiResult<Customer>;

    /// `POST /customers/`
    async fn create_customer(&self, customer: &NewCustomer) -> ApiResult<Customer>;

    /// `GET /investments/`, optionally filtered to one customer
    async fn list_investments(&self, customer_id: Option<&str>) -> ApiResult<Vec<Investment>>;

    /// `POST /investments/`
    async fn create_investment(&self, investment: &NewInvestment) -> ApiResult<Investment>;

    /// `POST /upload/bulk` as multipart
    async fn bulk_upload(&self, file: UploadFile) -> ApiResult<BulkUploadSummary>;
}
