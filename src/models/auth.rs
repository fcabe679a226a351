//! Request bodies for the authentication endpoints

use serde::{Deserialize, Serialize};

/// `POST /auth/login`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub mobile: &'a str,
    pub password: &'a str,
}

/// `POST /auth/signup`
#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest<'a> {
    pub name: &'a str,
    pub mobile: &'a str,
    pub password: &'a str,
}

/// `POST /auth/verify`
#[derive(Debug, Clone, Serialize)]
pub struct VerifyRequest<'a> {
    pub mobile: &'a str,
    pub otp: &'a str,
}

/// `POST /auth/resend-otp`
#[derive(Debug, Clone, Serialize)]
pub struct ResendOtpRequest<'a> {
    pub mobile: &'a str,
}

/// `POST /admin/login`
#[derive(Debug, Clone, Serialize)]
pub struct AdminLoginRequest<'a> {
    pub secret_key: &'a str,
}

/// Acknowledgement body returned by the auth endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}
