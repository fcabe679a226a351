//! HttpClient against an in-process fake of the back-office API

use agentdesk::screens::customers::CustomerForm;
use agentdesk::screens::upload::{submit_upload, success_message};
use agentdesk::{
    ApiError, AuthApi, DeskApi, HttpClient, Role, SessionFile, SessionStore, UploadFile,
};
use axum::extract::{Multipart, Query};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use reqwest::cookie::Jar;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

const AGENT_COOKIE: &str = "access_token=agent-token";
const ADMIN_COOKIE: &str = "admin_token=admin-token";

fn has_cookie(headers: &HeaderMap, cookie: &str) -> bool {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.split(';').any(|pair| pair.trim() == cookie))
}

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["password"] == "secret" {
        (
            [(header::SET_COOKIE, format!("{}; Path=/; HttpOnly", AGENT_COOKIE))],
            Json(json!({ "message": "Login successful" })),
        )
            .into_response()
    } else {
        detail(StatusCode::UNAUTHORIZED, "Incorrect mobile or password")
    }
}

async fn me(headers: HeaderMap) -> Response {
    if has_cookie(&headers, AGENT_COOKIE) {
        Json(json!({ "agent_id": "agent-1", "name": "Ravi Kumar", "mobile": "9876543210" }))
            .into_response()
    } else {
        detail(StatusCode::UNAUTHORIZED, "Could not validate credentials")
    }
}

async fn logout() -> Response {
    (
        [(header::SET_COOKIE, "access_token=; Path=/; Max-Age=0")],
        Json(json!({ "message": "Logout successful" })),
    )
        .into_response()
}

async fn admin_login(Json(body): Json<Value>) -> Response {
    if body["secret_key"] == "letmein" {
        (
            [(header::SET_COOKIE, format!("{}; Path=/; HttpOnly", ADMIN_COOKIE))],
            Json(json!({ "message": "Admin login successful" })),
        )
            .into_response()
    } else {
        detail(StatusCode::UNAUTHORIZED, "Invalid admin secret")
    }
}

async fn admin_stats(headers: HeaderMap) -> Response {
    if has_cookie(&headers, ADMIN_COOKIE) {
        Json(json!({
            "total_agents": 3,
            "total_customers": 20,
            "total_investments": 45,
            "total_investment_value": 2500000.0,
            "pending_followups": 6
        }))
        .into_response()
    } else {
        detail(StatusCode::UNAUTHORIZED, "Could not validate admin credentials")
    }
}

async fn create_customer() -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({
            "detail": [{ "loc": ["body", "mobile"], "msg": "field required", "type": "value_error.missing" }]
        })),
    )
        .into_response()
}

async fn investments(Query(params): Query<HashMap<String, String>>) -> Response {
    let customer_id = params.get("customer_id").cloned().unwrap_or_default();
    Json(json!([{
        "investment_id": "0f8e2a9c-1111-2222-3333-444455556666",
        "customer_id": customer_id,
        "scheme_type": "FD",
        "principal": 25000.0,
        "start_date": "2024-01-15",
        "maturity_date": "2025-01-15",
        "status": "ACTIVE"
    }]))
    .into_response()
}

async fn upload(mut multipart: Multipart) -> Response {
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let Ok(data) = field.bytes().await else {
            return detail(StatusCode::BAD_REQUEST, "Unreadable upload");
        };
        if file_name != "batch.csv" || content_type != "text/csv" {
            return detail(StatusCode::BAD_REQUEST, "Invalid file format. Please upload .xlsx or .csv");
        }
        let rows = String::from_utf8_lossy(&data).lines().count().saturating_sub(1);
        return Json(json!({
            "message": "Upload processed",
            "total_rows": rows,
            "new_customers": 2,
            "investments_created": rows
        }))
        .into_response();
    }
    detail(StatusCode::BAD_REQUEST, "No file")
}

async fn spawn_api() -> String {
    let app = Router::new()
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/me", get(me))
        .route("/api/v1/auth/logout", post(logout))
        .route("/api/v1/admin/login", post(admin_login))
        .route("/api/v1/admin/stats", get(admin_stats))
        .route("/api/v1/customers/", post(create_customer))
        .route("/api/v1/investments/", get(investments))
        .route("/api/v1/upload/bulk", post(upload));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/api/v1", addr)
}

#[tokio::test]
async fn test_login_cookie_carries_session() {
    let base = spawn_api().await;
    let session = SessionStore::new(HttpClient::new(base).unwrap());

    session.init().await;
    assert!(session.user().is_none());
    assert!(!session.is_loading());

    let outcome = session.login("9876543210", "secret").await;

    assert!(outcome.success);
    let user = session.user().unwrap();
    assert_eq!(user.name(), "Ravi Kumar");
    assert_eq!(user.role(), Role::Agent);
}

#[tokio::test]
async fn test_failed_login_surfaces_detail() {
    let base = spawn_api().await;
    let session = SessionStore::new(HttpClient::new(base).unwrap());

    let outcome = session.login("9876543210", "wrong").await;

    assert!(!outcome.success);
    assert_eq!(outcome.status, Some(401));
    assert_eq!(outcome.message.as_deref(), Some("Incorrect mobile or password"));
    assert!(session.user().is_none());
}

#[tokio::test]
async fn test_logout_expires_cookie() {
    let base = spawn_api().await;
    let session = SessionStore::new(HttpClient::new(base).unwrap());
    session.login("9876543210", "secret").await;

    session.logout().await;
    assert!(session.user().is_none());

    let err = session.api().me().await.unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn test_session_file_restores_cookie() {
    let base = spawn_api().await;
    let dir = tempfile::tempdir().unwrap();
    let file = SessionFile::new(dir.path().join("session.json"));

    let first = HttpClient::new(base.as_str()).unwrap();
    first.login("9876543210", "secret").await.unwrap();
    file.save(first.jar(), &base).unwrap();

    let jar = Arc::new(Jar::default());
    assert_eq!(file.restore(&jar, &base).unwrap(), 1);
    let second = HttpClient::with_jar(base.as_str(), jar).unwrap();

    let profile = second.me().await.unwrap();
    assert_eq!(profile.agent_id, "agent-1");
}

#[tokio::test]
async fn test_admin_login_verified_by_stats() {
    let base = spawn_api().await;
    let session = SessionStore::new(HttpClient::new(base).unwrap());

    let rejected = session.admin_login("nope").await;
    assert_eq!(rejected.message.as_deref(), Some("Invalid admin secret"));
    assert!(session.user().is_none());

    let outcome = session.admin_login("letmein").await;
    assert!(outcome.success);
    assert_eq!(session.user().unwrap().role(), Role::Admin);
}

#[tokio::test]
async fn test_validation_list_uses_fallback() {
    let base = spawn_api().await;
    let client = HttpClient::new(base).unwrap();

    let err = CustomerForm::new("Asha Devi", "9000000001")
        .submit(&client)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Failed to create customer");
}

#[tokio::test]
async fn test_investment_filter_reaches_server() {
    let base = spawn_api().await;
    let client = HttpClient::new(base).unwrap();

    let investments = client.list_investments(Some("c 1&x")).await.unwrap();

    assert_eq!(investments[0].customer_id, "c 1&x");
}

#[tokio::test]
async fn test_bulk_upload_multipart() {
    let base = spawn_api().await;
    let client = HttpClient::new(base).unwrap();
    let csv = "Name,Mobile,Scheme,Principal,StartDate,MaturityDate\n\
               Asha,9000000001,FD,25000,2024-01-15,2025-01-15\n\
               Mohan,9000000002,KVP,50000,2024-02-01,2033-09-01\n";

    let summary = submit_upload(&client, Some(UploadFile::new("batch.csv", csv.as_bytes().to_vec())))
        .await
        .unwrap();

    assert_eq!(
        success_message(&summary),
        "Success! Processed 2 rows. Created 2 customers and 2 investments."
    );
}

#[tokio::test]
async fn test_upload_rejected_file() {
    let base = spawn_api().await;
    let client = HttpClient::new(base).unwrap();

    let err = client
        .bulk_upload(UploadFile::new("notes.txt", b"hello".to_vec()))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Rejected { status: 400, .. }));
    assert_eq!(
        err.detail(),
        Some("Invalid file format. Please upload .xlsx or .csv")
    );
}
