//! Drivers: list, create, full replace, delete.

use super::parse_id;
use crate::error::AppError;
use crate::response::{success_many, success_one, success_one_ok};
use crate::service::RequestValidator;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

const DRIVER_COLUMNS: &str = "id, name, license_number, vehicle_assigned, status";

#[derive(Debug, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub id: i32,
    pub name: String,
    pub license_number: String,
    pub vehicle_assigned: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverInput {
    pub name: Option<String>,
    pub license_number: Option<String>,
    pub vehicle_assigned: Option<String>,
    pub status: Option<String>,
}

impl DriverInput {
    fn validate(&self) -> Result<(), AppError> {
        RequestValidator::require(&[
            ("name", self.name.as_deref()),
            ("licenseNumber", self.license_number.as_deref()),
        ])
    }
}

/// GET /api/drivers, ordered by id.
pub async fn list(State(state): State<AppState>) -> Result<impl axum::response::IntoResponse, AppError> {
    let sql = format!("SELECT {} FROM drivers ORDER BY id", DRIVER_COLUMNS);
    let rows: Vec<Driver> = sqlx::query_as(&sql).fetch_all(&state.pool).await?;
    Ok(success_many(rows))
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<DriverInput>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    body.validate()?;
    let sql = format!(
        "INSERT INTO drivers (name, license_number, vehicle_assigned, status) VALUES ($1, $2, $3, $4) RETURNING {}",
        DRIVER_COLUMNS
    );
    let row: Driver = sqlx::query_as(&sql)
        .bind(&body.name)
        .bind(&body.license_number)
        .bind(&body.vehicle_assigned)
        .bind(&body.status)
        .fetch_one(&state.pool)
        .await?;
    tracing::info!(driver_id = row.id, "driver created");
    Ok(success_one(row))
}

/// PUT /api/drivers/:id replaces every column.
pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    Json(body): Json<DriverInput>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    body.validate()?;
    let sql = format!(
        "UPDATE drivers SET name = $1, license_number = $2, vehicle_assigned = $3, status = $4 \
         WHERE id = $5 RETURNING {}",
        DRIVER_COLUMNS
    );
    let row: Driver = sqlx::query_as(&sql)
        .bind(&body.name)
        .bind(&body.license_number)
        .bind(&body.vehicle_assigned)
        .bind(&body.status)
        .bind(id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("driver {}", id)))?;
    Ok(success_one_ok(row))
}

/// DELETE /api/drivers/:id → 204.
pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let result = sqlx::query("DELETE FROM drivers WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("driver {}", id)));
    }
    Ok(StatusCode::NO_CONTENT)
}
