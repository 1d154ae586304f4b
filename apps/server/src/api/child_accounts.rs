use std::sync::Arc;

use axum::http::HeaderMap;
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};

use ipdesk_core::child_accounts::{ChildAccount, ChildAccountUpdate, NewChildAccount};

use super::shared::actor;
use crate::error::ApiResult;
use crate::main_lib::AppState;

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListChildrenQuery {
    parent_account_id: String,
}

async fn list_children(
    Query(query): Query<ListChildrenQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<ChildAccount>>> {
    let children = state
        .child_account_service
        .list_children(&query.parent_account_id)?;
    Ok(Json(children))
}

async fn get_child(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ChildAccount>> {
    let child = state.child_account_service.get_child(&id)?;
    Ok(Json(child))
}

async fn create_child(
    State(state): State<Arc<AppState>>,
    Json(new_child): Json<NewChildAccount>,
) -> ApiResult<Json<ChildAccount>> {
    let child = state.child_account_service.create_child(new_child).await?;
    Ok(Json(child))
}

async fn update_child(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(mut update): Json<ChildAccountUpdate>,
) -> ApiResult<Json<ChildAccount>> {
    let actor = actor(&headers)?;
    update.id = Some(id);
    let child = state.child_account_service.update_child(update, &actor).await?;
    Ok(Json(child))
}

async fn deactivate_child(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<ChildAccount>> {
    let actor = actor(&headers)?;
    let child = state.child_account_service.deactivate_child(&id, &actor).await?;
    Ok(Json(child))
}

async fn lock_child(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<ChildAccount>> {
    let actor = actor(&headers)?;
    let child = state.child_account_service.lock_child(&id, &actor).await?;
    Ok(Json(child))
}

async fn unlock_child(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<ChildAccount>> {
    let actor = actor(&headers)?;
    let child = state.child_account_service.unlock_child(&id, &actor).await?;
    Ok(Json(child))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/child-accounts", get(list_children).post(create_child))
        .route(
            "/child-accounts/{id}",
            get(get_child).put(update_child).delete(deactivate_child),
        )
        .route("/child-accounts/{id}/lock", post(lock_child))
        .route("/child-accounts/{id}/unlock", post(unlock_child))
}
