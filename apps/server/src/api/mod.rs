//! HTTP API routers.

mod applications;
mod child_accounts;
mod health;
mod letters;
mod notes;
mod payments;
mod settings;
pub(crate) mod shared;
mod signatures;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::main_lib::AppState;

pub fn app_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .merge(applications::router())
        .merge(child_accounts::router())
        .merge(health::router())
        .merge(letters::router())
        .merge(notes::router())
        .merge(payments::router())
        .merge(settings::router())
        .merge(signatures::router());

    Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
