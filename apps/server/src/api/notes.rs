use std::sync::Arc;

use axum::http::{HeaderMap, StatusCode};
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};

use ipdesk_core::notes::{ApplicationNote, NewNote, NoteUpdate};

use super::shared::actor;
use crate::error::ApiResult;
use crate::main_lib::AppState;

async fn list_notes(
    Path(application_number): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<ApplicationNote>>> {
    let notes = state.note_service.list_notes(&application_number)?;
    Ok(Json(notes))
}

async fn add_note(
    State(state): State<Arc<AppState>>,
    Json(new_note): Json<NewNote>,
) -> ApiResult<Json<ApplicationNote>> {
    let note = state.note_service.add_note(new_note).await?;
    Ok(Json(note))
}

async fn update_note(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(mut update): Json<NoteUpdate>,
) -> ApiResult<Json<ApplicationNote>> {
    let actor = actor(&headers)?;
    update.id = Some(id);
    let note = state.note_service.update_note(update, &actor).await?;
    Ok(Json(note))
}

async fn delete_note(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<StatusCode> {
    let actor = actor(&headers)?;
    state.note_service.delete_note(&id, &actor).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn lock_note(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<ApplicationNote>> {
    let actor = actor(&headers)?;
    let note = state.note_service.lock_note(&id, &actor).await?;
    Ok(Json(note))
}

async fn unlock_note(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<ApplicationNote>> {
    let actor = actor(&headers)?;
    let note = state.note_service.unlock_note(&id, &actor).await?;
    Ok(Json(note))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/notes", post(add_note))
        .route("/notes/application/{number}", get(list_notes))
        .route("/notes/{id}", axum::routing::put(update_note).delete(delete_note))
        .route("/notes/{id}/lock", post(lock_note))
        .route("/notes/{id}/unlock", post(unlock_note))
}
