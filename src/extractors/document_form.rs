//! Document form: multipart text fields plus one spreadsheet part, or a JSON body
//! carrying the same text fields without a file.

use crate::error::AppError;
use crate::service::FileUpload;
use async_trait::async_trait;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use axum::Json;
use serde::Deserialize;
use std::collections::HashMap;

/// Multipart field carrying the spreadsheet.
pub const FILE_FIELD: &str = "file_data";

#[derive(Debug, Default)]
pub struct DocumentForm {
    fields: HashMap<String, String>,
    file: Option<FileUpload>,
}

impl DocumentForm {
    /// Text field value; empty strings read as absent.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str).filter(|v| !v.is_empty())
    }

    pub fn take_text(&mut self, key: &str) -> Option<String> {
        self.fields.remove(key).filter(|v| !v.is_empty())
    }

    pub fn has_file(&self) -> bool {
        self.file.is_some()
    }

    pub fn take_file(&mut self) -> Option<FileUpload> {
        self.file.take()
    }

    /// The acting user of an update: `updatedBy`, else `createdBy`.
    pub fn acting_user(&self) -> Option<&str> {
        self.text("updatedBy").or_else(|| self.text("createdBy"))
    }
}

/// Text fields accepted as JSON, e.g. `{"status": "completed", "updatedBy": "ana"}`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentFields {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
    #[serde(rename = "file_name")]
    pub file_name: Option<String>,
}

impl From<DocumentFields> for DocumentForm {
    fn from(body: DocumentFields) -> Self {
        let fields = [
            ("name", body.name),
            ("description", body.description),
            ("status", body.status),
            ("createdBy", body.created_by),
            ("updatedBy", body.updated_by),
            ("file_name", body.file_name),
        ]
        .into_iter()
        .filter_map(|(k, v)| v.map(|v| (k.to_string(), v)))
        .collect();
        DocumentForm { fields, file: None }
    }
}

fn is_json(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.trim_start().to_ascii_lowercase().starts_with("application/json"))
}

#[async_trait]
impl<S> FromRequest<S> for DocumentForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_json(&req) {
            let Json(body) = Json::<DocumentFields>::from_request(req, state)
                .await
                .map_err(|e| AppError::from_extractor(e.status(), e.body_text()))?;
            return Ok(body.into());
        }
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::from_extractor(e.status(), e.body_text()))?;
        let mut form = DocumentForm::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::from_extractor(e.status(), e.body_text()))?
        {
            let name = field.name().unwrap_or("").to_string();
            match field.file_name().map(str::to_string) {
                Some(file_name) if name == FILE_FIELD => {
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::from_extractor(e.status(), e.body_text()))?;
                    form.file = Some(FileUpload {
                        file_name,
                        bytes: bytes.to_vec(),
                    });
                }
                Some(_) => {
                    tracing::debug!(field = %name, "ignoring unexpected file part");
                }
                None => {
                    let value = field
                        .text()
                        .await
                        .map_err(|e| AppError::from_extractor(e.status(), e.body_text()))?;
                    form.fields.insert(name, value);
                }
            }
        }
        Ok(form)
    }
}
