//! POST /api/auth/login and POST /api/auth/register.

use crate::error::AppError;
use crate::response::{success_one, success_one_ok};
use crate::service::{AuthService, NewUser, RequestValidator, Role};
use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub full_name: Option<String>,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    RequestValidator::require(&[("email", body.email.as_deref()), ("password", body.password.as_deref())])?;
    let (Some(email), Some(password)) = (body.email, body.password) else {
        return Err(AppError::InvalidCredentials);
    };
    let user = AuthService::login(&state.pool, &email, &password).await?;
    tracing::info!(user_id = user.id, "login succeeded");
    Ok(success_one_ok(user))
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    RequestValidator::require(&[
        ("email", body.email.as_deref()),
        ("password", body.password.as_deref()),
        ("role", body.role.as_deref()),
        ("fullName", body.full_name.as_deref()),
    ])?;
    let (Some(email), Some(password), Some(role), Some(full_name)) =
        (body.email, body.password, body.role, body.full_name)
    else {
        return Err(AppError::Validation("missing required fields".into()));
    };
    let role: Role = role.parse()?;
    let user = AuthService::register(
        &state.pool,
        NewUser {
            email,
            password,
            role,
            full_name,
        },
    )
    .await?;
    Ok(success_one(user))
}
