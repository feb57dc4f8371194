//! Builds parameterized statements for the document tables.
//! Identifiers come from `DocumentKind` and the allowed-field lists below; values are always parameters.

use super::params::SqlParam;
use crate::error::AppError;

/// Text columns a document patch may change.
pub const DOCUMENT_PATCH_FIELDS: &[&str] = &["name", "description", "status"];

/// Columns returned after insert: everything except the file bytes.
pub const DOCUMENT_CREATED_COLUMNS: &str =
    "id, name, description, status, created_at, updated_at, created_by, updated_by, file_name";

/// Columns returned after a patch: the full row.
pub const DOCUMENT_FULL_COLUMNS: &str =
    "id, name, description, status, created_at, updated_at, created_by, updated_by, file_name, file_data";

/// Status given to documents created without one.
pub const DEFAULT_DOCUMENT_STATUS: &str = "incomplete";

/// Quote identifier for PostgreSQL (safe: only from code).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: impl Into<SqlParam>) -> usize {
        self.params.push(v.into());
        self.params.len()
    }
}

/// Sparse UPDATE for one row: `updated_at`/`updated_by` are always set, other columns
/// only when supplied. Empty strings count as not supplied, so a patch cannot clear a
/// text column.
pub struct SparsePatch<'a> {
    table: &'a str,
    allowed: &'a [&'a str],
    sets: Vec<String>,
    buf: QueryBuf,
}

impl<'a> SparsePatch<'a> {
    pub fn new(table: &'a str, allowed: &'a [&'a str], updated_by: &str) -> Self {
        let mut buf = QueryBuf::new();
        let n = buf.push_param(updated_by);
        SparsePatch {
            table,
            allowed,
            sets: vec![
                format!("{} = NOW()", quoted("updated_at")),
                format!("{} = ${}", quoted("updated_by"), n),
            ],
            buf,
        }
    }

    /// Add `column = $n` when `value` is present and non-empty.
    pub fn set_text(&mut self, column: &str, value: Option<&str>) -> Result<&mut Self, AppError> {
        if !self.allowed.iter().any(|c| *c == column) {
            return Err(AppError::BadRequest(format!("{} cannot be updated", column)));
        }
        if let Some(v) = value.filter(|v| !v.is_empty()) {
            let n = self.buf.push_param(v);
            self.sets.push(format!("{} = ${}", quoted(column), n));
        }
        Ok(self)
    }

    /// Replace the attachment: `file_name` and `file_data` together.
    pub fn set_file(&mut self, file_name: &str, bytes: Vec<u8>) -> &mut Self {
        let name_n = self.buf.push_param(file_name);
        let data_n = self.buf.push_param(bytes);
        self.sets.push(format!("{} = ${}", quoted("file_name"), name_n));
        self.sets.push(format!("{} = ${}", quoted("file_data"), data_n));
        self
    }

    /// Number of SET clauses, including the two always-present audit columns.
    #[cfg(test)]
    fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn finish(self, id: i32, returning: &str) -> QueryBuf {
        let SparsePatch { table, sets, mut buf, .. } = self;
        let id_n = buf.push_param(id);
        buf.sql = format!(
            "UPDATE {} SET {} WHERE {} = ${} RETURNING {}",
            quoted(table),
            sets.join(", "),
            quoted("id"),
            id_n,
            returning
        );
        buf
    }
}

/// List query: newest id first, timestamps as calendar dates.
pub fn select_documents(table: &str) -> String {
    format!(
        "SELECT id, name, description, \
         TO_CHAR(created_at, 'YYYY-MM-DD') AS created_at, created_by, \
         TO_CHAR(updated_at, 'YYYY-MM-DD') AS updated_at, updated_by, \
         status, file_name, file_data \
         FROM {} ORDER BY id DESC",
        quoted(table)
    )
}

/// INSERT a document; `updated_by` starts equal to `created_by`.
pub fn insert_document(
    table: &str,
    name: &str,
    description: Option<&str>,
    status: Option<&str>,
    created_by: &str,
    file_name: &str,
    file_data: Vec<u8>,
) -> QueryBuf {
    let mut q = QueryBuf::new();
    let description = description.filter(|d| !d.is_empty()).map(str::to_string);
    let status = status.filter(|s| !s.is_empty()).unwrap_or(DEFAULT_DOCUMENT_STATUS);
    let placeholders: Vec<String> = [
        SqlParam::from(name),
        SqlParam::from(description),
        SqlParam::from(status),
        SqlParam::from(created_by),
        SqlParam::from(created_by),
        SqlParam::from(file_name),
        SqlParam::from(file_data),
    ]
    .into_iter()
    .map(|p| format!("${}", q.push_param(p)))
    .collect();
    q.sql = format!(
        "INSERT INTO {} (name, description, status, created_by, updated_by, file_name, file_data) \
         VALUES ({}) RETURNING {}",
        quoted(table),
        placeholders.join(", "),
        DOCUMENT_CREATED_COLUMNS
    );
    q
}

/// Swap only the attachment and refresh `updated_at`.
pub fn replace_file(table: &str, id: i32, file_name: &str, file_data: Vec<u8>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let name_n = q.push_param(file_name);
    let data_n = q.push_param(file_data);
    let id_n = q.push_param(id);
    q.sql = format!(
        "UPDATE {} SET file_name = ${}, file_data = ${}, updated_at = NOW() WHERE id = ${} RETURNING id, file_name",
        quoted(table),
        name_n,
        data_n,
        id_n
    );
    q
}

/// DELETE by id. Caller binds id as $1.
pub fn delete_by_id(table: &str) -> String {
    format!("DELETE FROM {} WHERE id = $1", quoted(table))
}
