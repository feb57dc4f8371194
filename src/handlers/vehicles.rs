//! Vehicles keyed by a client-supplied id.

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

const VEHICLE_COLUMNS: &str = "id, type, plate_number, status";
const ACTIVE: &str = "Active";

#[derive(Debug, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub vehicle_type: String,
    pub plate_number: String,
    pub status: String,
}

/// Vehicle offered for driver assignment.
#[derive(Debug, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignableVehicle {
    pub id: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub vehicle_type: String,
    pub plate_number: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleInput {
    #[serde(default, deserialize_with = "text_id")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub vehicle_type: Option<String>,
    pub plate_number: Option<String>,
    pub status: Option<String>,
}

/// GET /api/vehicles, ordered by id.
pub async fn list(State(state): State<AppState>) -> Result<impl axum::response::IntoResponse, AppError> {
    let sql = format!("SELECT {} FROM vehicles ORDER BY id", VEHICLE_COLUMNS);
    let rows: Vec<Vehicle> = sqlx::query_as(&sql).fetch_all(&state.pool).await?;
    Ok(success_many(rows))
}

/// GET /api/vehicles-drivers: active vehicles only.
pub async fn list_active(State(state): State<AppState>) -> Result<impl axum::response::IntoResponse, AppError> {
    let rows: Vec<AssignableVehicle> =
        sqlx::query_as("SELECT id, type, plate_number FROM vehicles WHERE status = $1 ORDER BY id")
            .bind(ACTIVE)
            .fetch_all(&state.pool)
            .await?;
    Ok(success_many(rows))
}

/// POST /api/vehicles: `status` defaults to Active; a taken id is a conflict.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<VehicleInput>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    RequestValidator::require(&[
        ("id", body.id.as_deref()),
        ("type", body.vehicle_type.as_deref()),
        ("plateNumber", body.plate_number.as_deref()),
    ])?;
    let status = body.status.as_deref().filter(|s| !s.is_empty()).unwrap_or(ACTIVE);
    let sql = format!(
        "INSERT INTO vehicles (id, type, plate_number, status) VALUES ($1, $2, $3, $4) RETURNING {}",
        VEHICLE_COLUMNS
    );
    let row: Vehicle = sqlx::query_as(&sql)
        .bind(&body.id)
        .bind(&body.vehicle_type)
        .bind(&body.plate_number)
        .bind(status)
        .fetch_one(&state.pool)
        .await
        .map_err(|e| AppError::on_unique_violation(e, "vehicle id already exists"))?;
    tracing::info!(vehicle_id = %row.id, "vehicle created");
    Ok(success_one(row))
}

/// PUT /api/vehicles/:id: `type`, `plateNumber` and `status` are all required.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<VehicleInput>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    RequestValidator::require(&[
        ("type", body.vehicle_type.as_deref()),
        ("plateNumber", body.plate_number.as_deref()),
        ("status", body.status.as_deref()),
    ])?;
    let sql = format!(
        "UPDATE vehicles SET type = $1, plate_number = $2, status = $3 WHERE id = $4 RETURNING {}",
        VEHICLE_COLUMNS
    );
    let row: Vehicle = sqlx::query_as(&sql)
        .bind(&body.vehicle_type)
        .bind(&body.plate_number)
        .bind(&body.status)
        .bind(&id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("vehicle {}", id)))?;
    Ok(success_one_ok(row))
}

/// DELETE /api/vehicles/:id → 204.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
        .bind(&id)
        .execute(&state.pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("vehicle {}", id)));
    }
    Ok(StatusCode::NO_CONTENT)
}
