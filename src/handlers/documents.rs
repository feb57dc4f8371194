//! Document handlers, shared by every document kind; the kind is resolved from the path segment.

use super::parse_id;
use crate::config::DocumentKind;
use crate::error::AppError;
use crate::extractors::{DocumentForm, FILE_FIELD};
use crate::response::{message_ok, success_many, success_one, success_one_ok};
use crate::service::{DocumentPatch, DocumentService, NewDocument, RequestValidator};
use crate::state::AppState;
use axum::extract::{Path, State};

fn resolve_kind(path_segment: &str) -> Result<DocumentKind, AppError> {
    DocumentKind::from_path_segment(path_segment)
        .ok_or_else(|| AppError::NotFound(format!("no such resource: {}", path_segment)))
}

/// GET /api/:kind
pub async fn list(
    State(state): State<AppState>,
    Path(path_segment): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let kind = resolve_kind(&path_segment)?;
    let rows = DocumentService::list(&state.pool, kind).await?;
    Ok(success_many(rows))
}

/// POST /api/:kind (multipart): `name`, `createdBy` and a file are required.
pub async fn create(
    State(state): State<AppState>,
    Path(path_segment): Path<String>,
    mut form: DocumentForm,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let kind = resolve_kind(&path_segment)?;
    let name = RequestValidator::present(form.take_text("name"));
    let created_by = RequestValidator::present(form.take_text("createdBy"));
    let file = form.take_file();
    let doc = match (name, created_by, file) {
        (Some(name), Some(created_by), Some(file)) => NewDocument {
            name,
            description: form.take_text("description"),
            status: form.take_text("status"),
            created_by,
            file,
        },
        (name, created_by, file) => {
            let missing: Vec<&str> = [
                ("name", name.is_none()),
                ("createdBy", created_by.is_none()),
                (FILE_FIELD, file.is_none()),
            ]
            .into_iter()
            .filter_map(|(field, absent)| absent.then_some(field))
            .collect();
            return Err(RequestValidator::missing(&missing));
        }
    };
    let row = DocumentService::create(&state.pool, kind, doc).await?;
    Ok(success_one(row))
}

/// PUT /api/:kind/:id (multipart, or JSON without a file): sparse update; the acting user is required.
pub async fn update(
    State(state): State<AppState>,
    Path((path_segment, id_str)): Path<(String, String)>,
    mut form: DocumentForm,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let kind = resolve_kind(&path_segment)?;
    let id = parse_id(&id_str)?;
    let acting_user = form
        .acting_user()
        .map(str::to_string)
        .ok_or_else(|| AppError::Validation("missing required fields: updatedBy".into()))?;
    let patch = DocumentPatch {
        name: form.take_text("name"),
        description: form.take_text("description"),
        status: form.take_text("status"),
        file: form.take_file(),
    };
    let row = DocumentService::patch(&state.pool, kind, id, &acting_user, patch)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} {}", kind.label(), id)))?;
    Ok(success_one_ok(row))
}

/// PUT /api/:kind/:id/excel (multipart): replace only the attachment.
/// A `file_name` text field overrides the uploaded file's own name.
pub async fn replace_file(
    State(state): State<AppState>,
    Path((path_segment, id_str)): Path<(String, String)>,
    mut form: DocumentForm,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let kind = resolve_kind(&path_segment)?;
    let id = parse_id(&id_str)?;
    let mut file = form
        .take_file()
        .ok_or_else(|| AppError::Validation("no file uploaded".into()))?;
    if let Some(name) = form.take_text("file_name") {
        file.file_name = name;
    }
    let row = DocumentService::replace_file(&state.pool, kind, id, file)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} {}", kind.label(), id)))?;
    Ok(success_one_ok(row))
}

/// DELETE /api/:kind/:id
pub async fn delete(
    State(state): State<AppState>,
    Path((path_segment, id_str)): Path<(String, String)>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let kind = resolve_kind(&path_segment)?;
    let id = parse_id(&id_str)?;
    if !DocumentService::delete(&state.pool, kind, id).await? {
        return Err(AppError::NotFound(format!("{} {}", kind.label(), id)));
    }
    tracing::info!(table = kind.table_name(), id, "document deleted");
    Ok(message_ok(format!("{} deleted successfully", kind.label())))
}
