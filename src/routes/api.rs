//! `/api` routes. Fixed resources are static paths; every document kind shares the
//! `/:kind` family and is resolved by the handlers.

use crate::handlers::{auth, documents, drivers, routes, users, vehicles};
use crate::state::AppState;
use axum::routing::{delete, get, patch, post, put};
use axum::Router;

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/users", get(users::list))
        .route("/users/secrets/:id/role", patch(users::update_role))
        .route("/users/secrets/:id", delete(users::delete))
        .route("/auth/login", post(auth::login))
        .route("/auth/register", post(auth::register))
        .route("/drivers", get(drivers::list).post(drivers::create))
        .route("/drivers/:id", put(drivers::update).delete(drivers::delete))
        .route("/vehicles-drivers", get(vehicles::list_active))
        .route("/vehicles", get(vehicles::list).post(vehicles::create))
        .route("/vehicles/:id", put(vehicles::update).delete(vehicles::delete))
        .route("/routes", get(routes::list).post(routes::create))
        .route("/routes/:id", put(routes::update).delete(routes::delete))
        .route("/:kind", get(documents::list).post(documents::create))
        .route("/:kind/:id", put(documents::update).delete(documents::delete))
        .route("/:kind/:id/excel", put(documents::replace_file))
        .with_state(state)
}
