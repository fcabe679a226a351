//! Back-office REST API Client
//!
//! reqwest-based client for native front ends. One instance is shared per
//! process: fixed base URL, a cookie jar carrying the session cookie on
//! every request, JSON bodies, multipart for the bulk upload.
//!
//! No timeout or retry is configured: a request either gets a response or
//! fails with [`ApiError::Unreachable`].

mod cookies;

pub use cookies::{SessionFile, SessionFileError};

use async_trait::async_trait;
use reqwest::cookie::Jar;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

use crate::api::{endpoints, join_url, AuthApi, DeskApi};
use crate::error::{ApiError, ApiResult};
use crate::models::{
    AdminLoginRequest, AgentProfile, BulkUploadSummary, Customer, Investment, LoginRequest,
    MessageResponse, NewCustomer, NewInvestment, ResendOtpRequest, SignupRequest, Stats,
    UploadFile, VerifyRequest,
};

/// HTTP client for the back-office API
pub struct HttpClient {
    client: Client,
    base_url: String,
    jar: Arc<Jar>,
}

impl HttpClient {
    /// Create a client with an empty cookie jar
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        Self::with_jar(base_url, Arc::new(Jar::default()))
    }

    /// Create a client around an existing jar (e.g. one restored from disk)
    pub fn with_jar(base_url: impl Into<String>, jar: Arc<Jar>) -> ApiResult<Self> {
        let client = Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .build()
            .map_err(|e| ApiError::Unreachable(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            jar,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The cookie jar holding the session cookie
    pub fn jar(&self) -> &Jar {
        &self.jar
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        let response = self.client.get(&url).send().await.map_err(transport_error)?;
        decode(response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        tracing::debug!(%url, "POST");
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;
        decode(response).await
    }

    /// POST whose response body only matters for its status
    async fn post_ack<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<()> {
        let url = self.url(path);
        tracing::debug!(%url, "POST");
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;
        read_body(response).await.map(|_| ())
    }

    /// POST returning the server's optional `message`
    async fn post_message<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<Option<String>> {
        let url = self.url(path);
        tracing::debug!(%url, "POST");
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;
        let text = read_body(response).await?;
        Ok(serde_json::from_str::<MessageResponse>(&text)
            .ok()
            .and_then(|m| m.message))
    }
}

fn transport_error(err: reqwest::Error) -> ApiError {
    ApiError::Unreachable(err.to_string())
}

/// Body of a success response, or the decoded error
async fn read_body(response: Response) -> ApiResult<String> {
    let status = response.status();
    let text = response.text().await.map_err(transport_error)?;
    if status.is_success() {
        Ok(text)
    } else {
        let err = ApiError::from_status(status.as_u16(), &text);
        tracing::debug!(status = status.as_u16(), "Request failed: {}", err);
        Err(err)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let text = read_body(response).await?;
    Ok(serde_json::from_str(&text)?)
}

#[async_trait(?Send)]
impl AuthApi for HttpClient {
    async fn me(&self) -> ApiResult<AgentProfile> {
        self.get_json(endpoints::AUTH_ME).await
    }

    async fn login(&self, mobile: &str, password: &str) -> ApiResult<()> {
        self.post_ack(endpoints::AUTH_LOGIN, &LoginRequest { mobile, password })
            .await
    }

    async fn logout(&self) -> ApiResult<()> {
        self.post_ack(endpoints::AUTH_LOGOUT, &serde_json::json!({}))
            .await
    }

    async fn signup(&self, name: &str, mobile: &str, password: &str) -> ApiResult<Option<String>> {
        let body = SignupRequest {
            name,
            mobile,
            password,
        };
        self.post_message(endpoints::AUTH_SIGNUP, &body).await
    }

    async fn verify(&self, mobile: &str, otp: &str) -> ApiResult<Option<String>> {
        self.post_message(endpoints::AUTH_VERIFY, &VerifyRequest { mobile, otp })
            .await
    }

    async fn resend_otp(&self, mobile: &str) -> ApiResult<Option<String>> {
        self.post_message(endpoints::AUTH_RESEND_OTP, &ResendOtpRequest { mobile })
            .await
    }

    async fn admin_login(&self, secret_key: &str) -> ApiResult<()> {
        self.post_ack(endpoints::ADMIN_LOGIN, &AdminLoginRequest { secret_key })
            .await
    }

    async fn admin_stats(&self) -> ApiResult<Stats> {
        self.get_json(endpoints::ADMIN_STATS).await
    }
}

#[async_trait(?Send)]
impl DeskApi for HttpClient {
    async fn dashboard_stats(&self) -> ApiResult<Stats> {
        self.get_json(endpoints::DASHBOARD_STATS).await
    }

    async fn list_customers(&self) -> ApiResult<Vec<Customer>> {
        self.get_json(endpoints::CUSTOMERS).await
    }

    async fn get_customer(&self, customer_id: &str) -> ApiResult<Customer> {
        self.get_json(&endpoints::customer(customer_id)).await
    }

    async fn create_customer(&self, customer: &NewCustomer) -> ApiResult<Customer> {
        self.post_json(endpoints::CUSTOMERS, customer).await
    }

    async fn list_investments(&self, customer_id: Option<&str>) -> ApiResult<Vec<Investment>> {
        self.get_json(&endpoints::investments(customer_id)).await
    }

    async fn create_investment(&self, investment: &NewInvestment) -> ApiResult<Investment> {
        self.post_json(endpoints::INVESTMENTS, investment).await
    }

    async fn bulk_upload(&self, file: UploadFile) -> ApiResult<BulkUploadSummary> {
        let mime = file.mime_type();
        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(mime)
            .map_err(transport_error)?;
        let form = Form::new().part(endpoints::UPLOAD_FIELD, part);

        let url = self.url(endpoints::BULK_UPLOAD);
        tracing::debug!(%url, "POST multipart");
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;
        decode(response).await
    }
}
