//! Shared application state for all routes.

use sqlx::PgPool;

/// Built once at startup and cloned into each request. The pool is the only
/// shared resource; `PgPool` is reference counted.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        AppState { pool }
    }
}
