//! Delivery routes keyed by a client-supplied route code.

use super::text_id;
use crate::error::AppError;
use crate::response::{success_many, success_one, success_one_ok};
use crate::service::RequestValidator;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryRoute {
    pub id: String,
    pub address: String,
    pub drop_point: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteInput {
    #[serde(default, deserialize_with = "text_id")]
    pub id: Option<String>,
    pub address: Option<String>,
    pub drop_point: Option<String>,
}

pub async fn list(State(state): State<AppState>) -> Result<impl axum::response::IntoResponse, AppError> {
    let rows: Vec<DeliveryRoute> = sqlx::query_as("SELECT id, address, drop_point FROM routes ORDER BY id")
        .fetch_all(&state.pool)
        .await?;
    Ok(success_many(rows))
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<RouteInput>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    RequestValidator::require(&[
        ("id", body.id.as_deref()),
        ("address", body.address.as_deref()),
        ("dropPoint", body.drop_point.as_deref()),
    ])?;
    let row: DeliveryRoute = sqlx::query_as(
        "INSERT INTO routes (id, address, drop_point) VALUES ($1, $2, $3) RETURNING id, address, drop_point",
    )
    .bind(&body.id)
    .bind(&body.address)
    .bind(&body.drop_point)
    .fetch_one(&state.pool)
    .await
    .map_err(|e| AppError::on_unique_violation(e, "route code already exists"))?;
    tracing::info!(route_id = %row.id, "route created");
    Ok(success_one(row))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<RouteInput>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    RequestValidator::require(&[
        ("address", body.address.as_deref()),
        ("dropPoint", body.drop_point.as_deref()),
    ])?;
    let row: DeliveryRoute = sqlx::query_as(
        "UPDATE routes SET address = $1, drop_point = $2 WHERE id = $3 RETURNING id, address, drop_point",
    )
    .bind(&body.address)
    .bind(&body.drop_point)
    .bind(&id)
    .fetch_optional(&state.pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("route {}", id)))?;
    Ok(success_one_ok(row))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let result = sqlx::query("DELETE FROM routes WHERE id = $1")
        .bind(&id)
        .execute(&state.pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("route {}", id)));
    }
    Ok(StatusCode::NO_CONTENT)
}
