//! Document CRUD execution against PostgreSQL. One statement per call.

use crate::config::DocumentKind;
use crate::error::AppError;
use crate::sql::{
    delete_by_id, insert_document, replace_file, select_documents, QueryBuf, SparsePatch,
    DOCUMENT_FULL_COLUMNS, DOCUMENT_PATCH_FIELDS,
};
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};

/// An uploaded spreadsheet.
#[derive(Clone, Debug, PartialEq)]
pub struct FileUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone, Debug)]
pub struct NewDocument {
    pub name: String,
    pub description: Option<String>,
    pub status: Option<String>,
    pub created_by: String,
    pub file: FileUpload,
}

/// Sparse change set; `None` (or an empty string) leaves the column as it is.
#[derive(Clone, Debug, Default)]
pub struct DocumentPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub file: Option<FileUpload>,
}

/// List item: dates only, attachment included.
#[derive(Debug, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentListItem {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Option<String>,
    pub created_by: Option<String>,
    pub updated_at: Option<String>,
    pub updated_by: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "file_name")]
    pub file_name: Option<String>,
    #[serde(rename = "file_data", serialize_with = "as_base64")]
    pub file_data: Option<Vec<u8>>,
}

/// Row returned by create (no bytes) and patch (with bytes).
#[derive(Debug, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
    #[serde(rename = "file_name")]
    pub file_name: Option<String>,
    #[sqlx(default)]
    #[serde(rename = "file_data", serialize_with = "as_base64", skip_serializing_if = "Option::is_none")]
    pub file_data: Option<Vec<u8>>,
}

#[derive(Debug, FromRow, Serialize)]
pub struct FileRef {
    pub id: i32,
    pub file_name: Option<String>,
}

fn as_base64<S: Serializer>(bytes: &Option<Vec<u8>>, s: S) -> Result<S::Ok, S::Error> {
    use base64::Engine;
    match bytes {
        Some(b) => s.serialize_str(&base64::engine::general_purpose::STANDARD.encode(b)),
        None => s.serialize_none(),
    }
}

pub struct DocumentService;

impl DocumentService {
    /// All rows, newest id first.
    pub async fn list(pool: &PgPool, kind: DocumentKind) -> Result<Vec<DocumentListItem>, AppError> {
        let sql = select_documents(kind.table_name());
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, DocumentListItem>(&sql).fetch_all(pool).await?;
        Ok(rows)
    }

    /// Insert one document; returns the row without file bytes.
    pub async fn create(pool: &PgPool, kind: DocumentKind, doc: NewDocument) -> Result<DocumentRecord, AppError> {
        let NewDocument {
            name,
            description,
            status,
            created_by,
            file,
        } = doc;
        let q = insert_document(
            kind.table_name(),
            &name,
            description.as_deref(),
            status.as_deref(),
            &created_by,
            &file.file_name,
            file.bytes,
        );
        let row = Self::fetch_optional::<DocumentRecord>(pool, q)
            .await?
            .ok_or(AppError::Db(sqlx::Error::RowNotFound))?;
        tracing::info!(table = kind.table_name(), id = row.id, created_by = %created_by, "document created");
        Ok(row)
    }

    /// Partial update; `None` when no row has `id`.
    pub async fn patch(
        pool: &PgPool,
        kind: DocumentKind,
        id: i32,
        updated_by: &str,
        patch: DocumentPatch,
    ) -> Result<Option<DocumentRecord>, AppError> {
        let mut builder = SparsePatch::new(kind.table_name(), DOCUMENT_PATCH_FIELDS, updated_by);
        builder
            .set_text("name", patch.name.as_deref())?
            .set_text("description", patch.description.as_deref())?
            .set_text("status", patch.status.as_deref())?;
        if let Some(file) = patch.file {
            builder.set_file(&file.file_name, file.bytes);
        }
        let q = builder.finish(id, DOCUMENT_FULL_COLUMNS);
        Self::fetch_optional::<DocumentRecord>(pool, q).await
    }

    /// Replace only the attachment; `None` when no row has `id`.
    pub async fn replace_file(
        pool: &PgPool,
        kind: DocumentKind,
        id: i32,
        file: FileUpload,
    ) -> Result<Option<FileRef>, AppError> {
        let q = replace_file(kind.table_name(), id, &file.file_name, file.bytes);
        Self::fetch_optional::<FileRef>(pool, q).await
    }

    /// Returns whether a row was removed.
    pub async fn delete(pool: &PgPool, kind: DocumentKind, id: i32) -> Result<bool, AppError> {
        let sql = delete_by_id(kind.table_name());
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(&sql).bind(id).execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn fetch_optional<T>(pool: &PgPool, q: QueryBuf) -> Result<Option<T>, AppError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        // Params can hold whole spreadsheets; log the count only.
        tracing::debug!(sql = %q.sql, params = q.params.len(), "query");
        let mut query = sqlx::query_as::<_, T>(&q.sql);
        for p in q.params {
            query = query.bind(p);
        }
        let row = query.fetch_optional(pool).await?;
        Ok(row)
    }
}
