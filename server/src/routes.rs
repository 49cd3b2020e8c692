//! HTTP surface of the account service.
//!
//! Three account operations plus a banner, a health probe, and a
//! one-shot database bootstrap. Update-profile is deliberately
//! unauthenticated to keep the original contract; see DESIGN.md.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::State,
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::password;
use crate::store::UserStore;
use crate::user::{Location, User, UserInfo};

const SEED_EMAIL: &str = "test@example.com";
const SEED_PASSWORD: &str = "test123";

/// Shared handler state: the store plus process metadata for `/health`
/// and `/init-db`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub database: String,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>, database: String) -> Self {
        Self {
            store,
            database,
            started_at: Instant::now(),
        }
    }
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(banner))
        .route("/health", get(health))
        .route("/init-db", get(init_db))
        .route("/api/signup", post(signup))
        .route("/api/login", post(login))
        .route("/api/update-profile", put(update_profile))
        .with_state(state)
}

async fn banner() -> &'static str {
    "Urban Waves API Running"
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "ok": true,
        "db": state.store.status().await,
        "uptime": state.started_at.elapsed().as_secs_f64(),
    }))
}

async fn init_db(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let seed = User::new(
        SEED_EMAIL.into(),
        "Test User".into(),
        password::hash(SEED_PASSWORD)?,
        Location {
            city: "Testville".into(),
            pincode: "000000".into(),
            ..Location::default()
        },
    );
    let report = state.store.init(seed).await?;
    let message = if report.created {
        "Database initialized successfully"
    } else {
        "Database already exists"
    };
    Ok(Json(json!({
        "message": message,
        "database": state.database,
        "collection": "users",
        "collections": report.tables,
    })))
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

#[derive(Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub location: Option<Location>,
}

#[derive(Serialize)]
pub struct UserResponse {
    pub ok: bool,
    pub user: UserInfo,
}

async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let (Some(email), Some(plaintext)) = (present(&req.email), present(&req.password)) else {
        return Err(ApiError::Validation("Email and password required"));
    };

    if state.store.find_by_email(email).await?.is_some() {
        return Err(ApiError::Conflict);
    }

    let user = User::new(
        email.to_string(),
        req.name.unwrap_or_default(),
        password::hash(plaintext)?,
        req.location.unwrap_or_default(),
    );
    state.store.insert(&user).await?;
    tracing::info!(email = %user.email, "account created");

    Ok(Json(UserResponse {
        ok: true,
        user: user.to_info(),
    }))
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let (Some(email), Some(plaintext)) = (present(&req.email), present(&req.password)) else {
        return Err(ApiError::Validation("Email and password required"));
    };

    // One error for both a missing account and a wrong password.
    let user = state
        .store
        .find_by_email(email)
        .await?
        .ok_or(ApiError::Auth)?;
    if !password::verify(plaintext, &user.password_hash)? {
        return Err(ApiError::Auth);
    }

    Ok(Json(UserResponse {
        ok: true,
        user: user.to_info(),
    }))
}

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub location: Option<Location>,
}

async fn update_profile(
    State(state): State<AppState>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let Some(email) = present(&req.email) else {
        return Err(ApiError::Validation("Email required to identify user"));
    };

    let mut user = state
        .store
        .find_by_email(email)
        .await?
        .ok_or(ApiError::NotFound)?;

    // Partial update: empty strings count as absent, a present
    // location object always replaces the stored one.
    if let Some(name) = present(&req.name) {
        user.name = name.to_string();
    }
    if let Some(location) = req.location {
        user.location = location;
    }
    if let Some(plaintext) = present(&req.password) {
        user.password_hash = password::hash(plaintext)?;
    }
    user.updated_at = Utc::now();

    state.store.update(&user).await?;
    tracing::info!(email = %user.email, "profile updated");

    Ok(Json(UserResponse {
        ok: true,
        user: user.to_info(),
    }))
}
