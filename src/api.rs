//! Remote data gateway. Every function is a single request/response pair:
//! no retries, no queueing, no caching. Callers treat any error as terminal
//! for the triggering action and surface a banner.

use gloo_net::http::{Request, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use web_sys::RequestCredentials;

use crate::model::{Expense, Notification, User, UserSettings};

pub const API_BASE_URL: &str = "http://localhost:8000";

fn url(path: &str) -> String {
    format!("{API_BASE_URL}{path}")
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network request failed: {0}")]
    Network(String),
    #[error("request failed with status {status}")]
    Status { status: u16, detail: Option<String> },
    #[error("could not decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Structured error detail, when the server sent one. Only the
    /// settings/category mutations read this; everything else shows a
    /// generic message.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<String>,
    message: Option<String>,
}

fn network(err: gloo_net::Error) -> ApiError {
    ApiError::Network(err.to_string())
}

async fn status_error(response: Response) -> ApiError {
    let status = response.status();
    let detail = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.detail.or(body.message));
    ApiError::Status { status, detail }
}

async fn expect_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if !response.ok() {
        return Err(status_error(response).await);
    }
    response
        .json::<T>()
        .await
        .map_err(|err| ApiError::Decode(err.to_string()))
}

async fn expect_ok(response: Response) -> Result<(), ApiError> {
    if response.ok() {
        Ok(())
    } else {
        Err(status_error(response).await)
    }
}

async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let response = Request::get(&url(path))
        .credentials(RequestCredentials::Include)
        .send()
        .await
        .map_err(network)?;
    expect_json(response).await
}

// Expenses

pub async fn list_expenses() -> Result<Vec<Expense>, ApiError> {
    get_json("/api/expenses").await
}

#[derive(Clone, PartialEq, Deserialize)]
pub struct LimitBreach {
    pub period: String,
    #[serde(default)]
    pub limit: f64,
    #[serde(default)]
    pub spent: f64,
}

/// Create/update responses optionally carry a budget verdict next to the
/// saved record. Backends that predate budget limits send the bare record,
/// so both fields default to not-exceeded.
#[derive(Clone, PartialEq, Deserialize)]
pub struct ExpenseSaved {
    #[serde(default)]
    pub limit_exceeded: bool,
    #[serde(default)]
    pub details: Vec<LimitBreach>,
}

pub async fn create_expense(expense: &Expense) -> Result<ExpenseSaved, ApiError> {
    let response = Request::post(&url("/api/expenses"))
        .credentials(RequestCredentials::Include)
        .json(expense)
        .map_err(network)?
        .send()
        .await
        .map_err(network)?;
    expect_json(response).await
}

pub async fn update_expense(id: i64, expense: &Expense) -> Result<ExpenseSaved, ApiError> {
    let response = Request::put(&url(&format!("/api/expenses/{id}")))
        .credentials(RequestCredentials::Include)
        .json(expense)
        .map_err(network)?
        .send()
        .await
        .map_err(network)?;
    expect_json(response).await
}

pub async fn delete_expense(id: i64) -> Result<(), ApiError> {
    let response = Request::delete(&url(&format!("/api/expenses/{id}")))
        .credentials(RequestCredentials::Include)
        .send()
        .await
        .map_err(network)?;
    expect_ok(response).await
}

// Categories

pub async fn list_categories() -> Result<Vec<String>, ApiError> {
    get_json("/api/categories").await
}

/// Returns the full updated category list.
pub async fn create_category(name: &str) -> Result<Vec<String>, ApiError> {
    let response = Request::post(&url("/api/categories"))
        .credentials(RequestCredentials::Include)
        .json(&serde_json::json!({ "name": name }))
        .map_err(network)?
        .send()
        .await
        .map_err(network)?;
    expect_json(response).await
}

pub async fn rename_category(old_name: &str, new_name: &str) -> Result<(), ApiError> {
    let response = Request::put(&url("/api/categories"))
        .credentials(RequestCredentials::Include)
        .json(&serde_json::json!({ "old_name": old_name, "new_name": new_name }))
        .map_err(network)?
        .send()
        .await
        .map_err(network)?;
    expect_ok(response).await
}

pub async fn delete_category(name: &str) -> Result<(), ApiError> {
    let response = Request::delete(&url("/api/categories"))
        .credentials(RequestCredentials::Include)
        .json(&serde_json::json!({ "name": name }))
        .map_err(network)?
        .send()
        .await
        .map_err(network)?;
    expect_ok(response).await
}

// Settings

pub async fn get_settings() -> Result<UserSettings, ApiError> {
    get_json("/api/settings").await
}

pub async fn put_settings(settings: &UserSettings) -> Result<(), ApiError> {
    let response = Request::put(&url("/api/settings"))
        .credentials(RequestCredentials::Include)
        .json(settings)
        .map_err(network)?
        .send()
        .await
        .map_err(network)?;
    expect_ok(response).await
}

// Session

pub async fn login(email: &str, password: &str) -> Result<User, ApiError> {
    let response = Request::post(&url("/api/login"))
        .credentials(RequestCredentials::Include)
        .json(&serde_json::json!({ "email": email, "password": password }))
        .map_err(network)?
        .send()
        .await
        .map_err(network)?;
    expect_json(response).await
}

#[derive(Clone, PartialEq, Serialize)]
pub struct SignupForm {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "confirmPassword")]
    pub confirm_password: String,
}

pub async fn signup(form: &SignupForm) -> Result<(), ApiError> {
    let response = Request::post(&url("/api/signup"))
        .credentials(RequestCredentials::Include)
        .json(form)
        .map_err(network)?
        .send()
        .await
        .map_err(network)?;
    expect_ok(response).await
}

pub async fn logout() -> Result<(), ApiError> {
    let response = Request::post(&url("/api/logout"))
        .credentials(RequestCredentials::Include)
        .send()
        .await
        .map_err(network)?;
    expect_ok(response).await
}

pub async fn current_user() -> Result<User, ApiError> {
    get_json("/api/user/me").await
}

// Notifications

/// The feed endpoint answers either a bare array or `{"notifications":
/// [...]}` depending on the backend version.
#[derive(Deserialize)]
#[serde(untagged)]
enum NotificationFeed {
    List(Vec<Notification>),
    Wrapped { notifications: Vec<Notification> },
}

pub async fn list_notifications() -> Result<Vec<Notification>, ApiError> {
    let feed: NotificationFeed = get_json("/api/notifications").await?;
    Ok(match feed {
        NotificationFeed::List(list) => list,
        NotificationFeed::Wrapped { notifications } => notifications,
    })
}

pub async fn mark_all_notifications_read() -> Result<(), ApiError> {
    let response = Request::post(&url("/api/notifications/mark-all-as-read"))
        .credentials(RequestCredentials::Include)
        .send()
        .await
        .map_err(network)?;
    expect_ok(response).await
}
