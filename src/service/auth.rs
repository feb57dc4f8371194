//! Credentials: argon2id hashing, login and registration against `users`.

use crate::error::AppError;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use std::fmt;
use std::str::FromStr;

/// The closed set of user roles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Admin,
    Coordinator,
    Driver,
}

impl Role {
    pub const NAMES: [&'static str; 3] = ["admin", "coordinator", "driver"];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Coordinator => "coordinator",
            Role::Driver => "driver",
        }
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "coordinator" => Ok(Role::Coordinator),
            "driver" => Ok(Role::Driver),
            _ => Err(AppError::Validation(format!(
                "role must be one of: {}",
                Role::NAMES.join(", ")
            ))),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user as shown to clients. Never carries the password hash.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: i32,
    pub email: String,
    pub role: String,
    pub full_name: Option<String>,
}

#[derive(FromRow)]
struct CredentialRow {
    id: i32,
    email: String,
    password: String,
    role: String,
    full_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub role: Role,
    pub full_name: String,
}

/// Salted argon2id hash in PHC string form.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AppError::PasswordHash)
}

/// False for a wrong password and for a stored value that is not a PHC hash.
pub fn verify_password(password: &str, stored: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => {
            tracing::warn!("stored password is not a valid PHC hash");
            false
        }
    }
}

pub struct AuthService;

impl AuthService {
    /// Unknown email and wrong password both yield `InvalidCredentials`.
    pub async fn login(pool: &PgPool, email: &str, password: &str) -> Result<PublicUser, AppError> {
        let row: Option<CredentialRow> = sqlx::query_as(
            "SELECT id, email, password, role, full_name FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        let Some(row) = row else {
            return Err(AppError::InvalidCredentials);
        };
        if !verify_password(password, &row.password) {
            return Err(AppError::InvalidCredentials);
        }
        Ok(PublicUser {
            id: row.id,
            email: row.email,
            role: row.role,
            full_name: row.full_name,
        })
    }

    /// Hash and insert. Duplicate email → `Conflict`.
    pub async fn register(pool: &PgPool, user: NewUser) -> Result<PublicUser, AppError> {
        let hashed = hash_password(&user.password)?;
        let created: PublicUser = sqlx::query_as(
            "INSERT INTO users (email, password, role, full_name) VALUES ($1, $2, $3, $4) \
             RETURNING id, email, role, full_name",
        )
        .bind(&user.email)
        .bind(&hashed)
        .bind(user.role.as_str())
        .bind(&user.full_name)
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::on_unique_violation(e, "email already exists"))?;
        tracing::info!(user_id = created.id, role = %user.role, "user registered");
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify() {
        let hash = hash_password("driver123").unwrap();
        assert_ne!(hash, "driver123");
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("driver123", &hash));
        assert!(!verify_password("driver124", &hash));
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("same").unwrap();
        let b = hash_password("same").unwrap();
        assert_ne!(a, b);
        assert!(verify_password("same", &a));
        assert!(verify_password("same", &b));
    }

    #[test]
    fn unparseable_stored_value_never_verifies() {
        assert!(!verify_password("admin123", "admin123"));
        assert!(!verify_password("", ""));
    }

    #[test]
    fn roles_are_a_closed_lowercase_set() {
        for name in Role::NAMES {
            assert_eq!(name.parse::<Role>().unwrap().as_str(), name);
        }
        assert!("Admin".parse::<Role>().is_err());
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn public_user_uses_camel_case() {
        let u = PublicUser {
            id: 1,
            email: "admin@example.com".into(),
            role: "admin".into(),
            full_name: Some("Admin User".into()),
        };
        let v = serde_json::to_value(&u).unwrap();
        assert_eq!(v["fullName"], "Admin User");
        assert!(v.get("password").is_none());
    }
}
