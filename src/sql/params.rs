//! Bind values for dynamically built statements.

use sqlx::encode::{Encode, IsNull};
use sqlx::postgres::{PgTypeInfo, Postgres};
use sqlx::{Database, Type};

/// A value that can be bound to a PostgreSQL query. Each variant reports its own
/// wire type so one `Vec<SqlParam>` can carry text, integer and bytea columns.
#[derive(Clone, Debug, PartialEq)]
pub enum SqlParam {
    /// `None` binds a typed NULL so it fits TEXT columns.
    Text(Option<String>),
    Int(i32),
    Bytes(Vec<u8>),
}

impl From<&str> for SqlParam {
    fn from(s: &str) -> Self {
        SqlParam::Text(Some(s.to_string()))
    }
}

impl From<String> for SqlParam {
    fn from(s: String) -> Self {
        SqlParam::Text(Some(s))
    }
}

impl From<Option<String>> for SqlParam {
    fn from(s: Option<String>) -> Self {
        SqlParam::Text(s)
    }
}

impl From<i32> for SqlParam {
    fn from(n: i32) -> Self {
        SqlParam::Int(n)
    }
}

impl From<Vec<u8>> for SqlParam {
    fn from(b: Vec<u8>) -> Self {
        SqlParam::Bytes(b)
    }
}

impl<'q> Encode<'q, Postgres> for SqlParam {
    fn encode_by_ref(
        &self,
        buf: &mut <Postgres as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, Box<dyn std::error::Error + Send + Sync>> {
        Ok(match self {
            SqlParam::Text(Some(s)) => {
                let s_ref: &str = s.as_str();
                <&str as Encode<Postgres>>::encode_by_ref(&s_ref, buf)?
            }
            SqlParam::Text(None) => <Option<&str> as Encode<Postgres>>::encode_by_ref(&None, buf)?,
            SqlParam::Int(n) => <i32 as Encode<Postgres>>::encode_by_ref(n, buf)?,
            SqlParam::Bytes(b) => {
                let b_ref: &[u8] = b.as_slice();
                <&[u8] as Encode<Postgres>>::encode_by_ref(&b_ref, buf)?
            }
        })
    }

    fn produces(&self) -> Option<PgTypeInfo> {
        Some(match self {
            SqlParam::Text(_) => <String as Type<Postgres>>::type_info(),
            SqlParam::Int(_) => <i32 as Type<Postgres>>::type_info(),
            SqlParam::Bytes(_) => <Vec<u8> as Type<Postgres>>::type_info(),
        })
    }
}

impl Type<Postgres> for SqlParam {
    fn type_info() -> PgTypeInfo {
        <String as Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <String as Type<Postgres>>::compatible(ty)
            || <i32 as Type<Postgres>>::compatible(ty)
            || <Vec<u8> as Type<Postgres>>::compatible(ty)
    }
}
