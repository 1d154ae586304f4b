use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};

use ipdesk_core::correspondence::{Letter, NewLetter};

use crate::error::ApiResult;
use crate::main_lib::AppState;

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListLettersQuery {
    account_id: String,
    #[serde(default)]
    unread_only: bool,
}

async fn list_letters(
    Query(query): Query<ListLettersQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Letter>>> {
    let letters = state
        .correspondence_service
        .list_letters(&query.account_id, query.unread_only)?;
    Ok(Json(letters))
}

async fn list_for_application(
    Path(number): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Letter>>> {
    let letters = state.correspondence_service.list_for_application(&number)?;
    Ok(Json(letters))
}

/// Office-side import of a delivered letter.
async fn record_letter(
    State(state): State<Arc<AppState>>,
    Json(new_letter): Json<NewLetter>,
) -> ApiResult<Json<Letter>> {
    let letter = state.correspondence_service.record_letter(new_letter).await?;
    Ok(Json(letter))
}

async fn mark_read(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Letter>> {
    let letter = state.correspondence_service.mark_read(&id).await?;
    Ok(Json(letter))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/letters", get(list_letters).post(record_letter))
        .route("/letters/application/{number}", get(list_for_application))
        .route("/letters/{id}/read", post(mark_read))
}
