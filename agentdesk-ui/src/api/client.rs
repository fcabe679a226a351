//! HTTP API Client
//!
//! gloo-net client for the back-office REST API. Every request is sent with
//! `credentials: include` so the browser attaches the HttpOnly session
//! cookie the API sets on login.

use agentdesk::api::{endpoints, join_url, AuthApi, DeskApi, DEFAULT_API_BASE};
use agentdesk::models::{
    AdminLoginRequest, AgentProfile, BulkUploadSummary, Customer, Investment, LoginRequest,
    MessageResponse, NewCustomer, NewInvestment, ResendOtpRequest, SignupRequest, Stats,
    UploadFile, VerifyRequest,
};
use agentdesk::{ApiError, ApiResult};
use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::JsValue;
use web_sys::RequestCredentials;

const API_URL_KEY: &str = "agentdesk_api_url";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    url.trim_end_matches('/').to_string()
}

/// Set the API base URL in local storage
pub fn set_api_base(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item(API_URL_KEY, url);
        }
    }
}

/// Browser client; clones share nothing but the base URL
#[derive(Debug, Clone)]
pub struct GlooClient {
    base_url: String,
}

impl GlooClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Client for the base URL saved in local storage
    pub fn from_storage() -> Self {
        Self::new(get_api_base())
    }

    fn get(&self, path: &str) -> RequestBuilder {
        Request::get(&join_url(&self.base_url, path)).credentials(RequestCredentials::Include)
    }

    fn post(&self, path: &str) -> RequestBuilder {
        Request::post(&join_url(&self.base_url, path)).credentials(RequestCredentials::Include)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self.get(path).send().await.map_err(transport_error)?;
        decode(response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.post(path).json(body).map_err(transport_error)?;
        let response = request.send().await.map_err(transport_error)?;
        decode(response).await
    }

    async fn post_ack<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<()> {
        let request = self.post(path).json(body).map_err(transport_error)?;
        let response = request.send().await.map_err(transport_error)?;
        read_body(response).await.map(|_| ())
    }

    async fn post_message<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<Option<String>> {
        let request = self.post(path).json(body).map_err(transport_error)?;
        let response = request.send().await.map_err(transport_error)?;
        let text = read_body(response).await?;
        Ok(serde_json::from_str::<MessageResponse>(&text)
            .ok()
            .and_then(|m| m.message))
    }
}

fn transport_error(err: gloo_net::Error) -> ApiError {
    ApiError::Unreachable(err.to_string())
}

fn js_error(err: JsValue) -> ApiError {
    ApiError::Unreachable(format!("{:?}", err))
}

async fn read_body(response: Response) -> ApiResult<String> {
    let status = response.status();
    let ok = response.ok();
    let text = response.text().await.map_err(transport_error)?;
    if ok {
        Ok(text)
    } else {
        Err(ApiError::from_status(status, &text))
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let text = read_body(response).await?;
    Ok(serde_json::from_str(&text)?)
}

/// Multipart body with the file under the upload field
fn upload_form(file: &UploadFile) -> ApiResult<web_sys::FormData> {
    let bytes = js_sys::Uint8Array::from(file.bytes.as_slice());
    let parts = js_sys::Array::of1(&bytes);
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(file.mime_type());
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(js_error)?;

    let form = web_sys::FormData::new().map_err(js_error)?;
    form.append_with_blob_and_filename(endpoints::UPLOAD_FIELD, &blob, &file.file_name)
        .map_err(js_error)?;
    Ok(form)
}

#[async_trait(?Send)]
impl AuthApi for GlooClient {
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
impl DeskApi for GlooClient {
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
        // The browser sets the multipart boundary itself
        let form = upload_form(&file)?;
        let request = self
            .post(endpoints::BULK_UPLOAD)
            .body(form)
            .map_err(transport_error)?;
        let response = request.send().await.map_err(transport_error)?;
        decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash() {
        let client = GlooClient::new("http://localhost:8000/api/v1/");
        assert_eq!(client.base_url, "http://localhost:8000/api/v1");
    }

    #[test]
    fn test_default_base_url() {
        let client = GlooClient::new(DEFAULT_API_BASE);
        assert_eq!(
            join_url(&client.base_url, endpoints::AUTH_ME),
            format!("{}/auth/me", DEFAULT_API_BASE)
        );
    }
}
