use std::sync::Arc;

use axum::http::StatusCode;
use axum::{extract::State, routing::get, Json, Router};

use ipdesk_core::settings::{Settings, SettingsUpdate};

use crate::error::ApiResult;
use crate::main_lib::AppState;

async fn get_settings(State(state): State<Arc<AppState>>) -> ApiResult<Json<Settings>> {
    let settings = state.settings_service.get_settings()?;
    Ok(Json(settings))
}

async fn update_settings(
    State(state): State<Arc<AppState>>,
    Json(update): Json<SettingsUpdate>,
) -> ApiResult<StatusCode> {
    state.settings_service.update_settings(&update).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/settings", get(get_settings).put(update_settings))
}
