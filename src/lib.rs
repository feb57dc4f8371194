//! Logistics back office: REST backend over PostgreSQL for users, drivers, vehicles,
//! routes and spreadsheet-backed documents.

pub mod config;
pub mod error;
pub mod extractors;
pub mod response;
pub mod sql;
pub mod state;
pub mod store;
pub mod service;
pub mod handlers;
pub mod routes;

pub use config::{DocumentKind, Settings};
pub use error::{AppError, ConfigError};
pub use response::{message_ok, success_many, success_one};
pub use routes::{api_routes, app, common_routes};
pub use state::AppState;
pub use store::{connect, ensure_database_exists, ensure_schema};
pub use service::{AuthService, DocumentService};
