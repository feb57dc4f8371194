//! HTTP handlers for documents, auth, users, drivers, vehicles and routes.

pub mod auth;
pub mod documents;
pub mod drivers;
pub mod routes;
pub mod users;
pub mod vehicles;

use crate::error::AppError;
use serde::{Deserialize, Deserializer};

/// Store-generated integer id from a path segment.
pub(crate) fn parse_id(id_str: &str) -> Result<i32, AppError> {
    id_str
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid id '{}'", id_str)))
}

/// Client-supplied ids arrive as strings or numbers; both are stored as text.
pub(crate) fn text_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match v {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(serde_json::Value::Null) | None => None,
        Some(other) => {
            return Err(serde::de::Error::custom(format!(
                "id must be a string or number, got {}",
                other
            )))
        }
    })
}
