//! User administration: list, change role, delete.

use super::parse_id;
use crate::error::AppError;
use crate::response::{message_ok, success_many};
use crate::service::{PublicUser, RequestValidator, Role};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct RoleUpdate {
    pub role: Option<String>,
}

/// GET /api/users
pub async fn list(State(state): State<AppState>) -> Result<impl axum::response::IntoResponse, AppError> {
    let rows: Vec<PublicUser> = sqlx::query_as("SELECT id, email, role, full_name FROM users ORDER BY id")
        .fetch_all(&state.pool)
        .await?;
    Ok(success_many(rows))
}

/// PATCH /api/users/secrets/:id/role
pub async fn update_role(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    Json(body): Json<RoleUpdate>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    RequestValidator::require(&[("role", body.role.as_deref())])?;
    let role: Role = body.role.as_deref().unwrap_or("").parse()?;
    let result = sqlx::query("UPDATE users SET role = $1 WHERE id = $2")
        .bind(role.as_str())
        .bind(id)
        .execute(&state.pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("user {}", id)));
    }
    tracing::info!(user_id = id, role = %role, "role updated");
    Ok(message_ok("role updated successfully"))
}

/// DELETE /api/users/secrets/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("user {}", id)));
    }
    tracing::info!(user_id = id, "user deleted");
    Ok(message_ok("user deleted successfully"))
}
