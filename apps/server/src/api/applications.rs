use std::str::FromStr;
use std::sync::Arc;

use axum::http::{HeaderMap, StatusCode};
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};

use ipdesk_core::applications::{
    Application, ApplicationSearchQuery, ApplicationSearchResponse, ApplicationUpdate,
    IpRightType, NewApplication, Sort,
};

use super::shared::{actor, check_right_type, parse_date_optional, parse_date_optional_end};
use crate::error::ApiResult;
use crate::main_lib::AppState;

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApplicationSearchBody {
    page: i64,
    page_size: i64,
    account_id_filter: Option<Vec<String>>,
    ip_right_type: Option<IpRightType>,
    status_filter: Option<Vec<String>>,
    keyword: Option<String>,
    date_from: Option<String>, // YYYY-MM-DD format
    date_to: Option<String>,   // YYYY-MM-DD format
    sort: Option<Sort>,
}

async fn search_applications(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ApplicationSearchBody>,
) -> ApiResult<Json<ApplicationSearchResponse>> {
    let date_from = parse_date_optional(body.date_from, "dateFrom")?;
    let date_to = parse_date_optional_end(body.date_to, "dateTo")?;

    let response = state
        .application_service
        .search_applications(ApplicationSearchQuery {
            page: body.page,
            page_size: body.page_size,
            account_ids: body.account_id_filter,
            ip_right_type: body.ip_right_type,
            statuses: body.status_filter,
            keyword: body.keyword,
            date_from,
            date_to,
            sort: body.sort,
        })?;
    Ok(Json(response))
}

async fn create_application(
    State(state): State<Arc<AppState>>,
    Json(new_application): Json<NewApplication>,
) -> ApiResult<Json<Application>> {
    let created = state.application_service.create_draft(new_application).await?;
    Ok(Json(created))
}

/// Loads the application and validates the type segment of the path.
fn typed_application(
    state: &AppState,
    ip_right_type: &str,
    id: &str,
) -> ApiResult<(IpRightType, Application)> {
    let ip_right_type = IpRightType::from_str(ip_right_type)?;
    let application = state.application_service.get_application(id)?;
    check_right_type(&application, ip_right_type)?;
    Ok((ip_right_type, application))
}

async fn get_application(
    Path((ip_right_type, id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Application>> {
    let (_, application) = typed_application(&state, &ip_right_type, &id)?;
    Ok(Json(application))
}

async fn update_application(
    Path((ip_right_type, id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(mut update): Json<ApplicationUpdate>,
) -> ApiResult<Json<Application>> {
    let actor = actor(&headers)?;
    typed_application(&state, &ip_right_type, &id)?;
    update.id = Some(id);
    let updated = state.application_service.update_draft(update, &actor).await?;
    Ok(Json(updated))
}

async fn delete_application(
    Path((ip_right_type, id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<StatusCode> {
    let actor = actor(&headers)?;
    typed_application(&state, &ip_right_type, &id)?;
    state.application_service.delete_draft(&id, &actor).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn submit_application(
    Path((ip_right_type, id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<Application>> {
    let actor = actor(&headers)?;
    typed_application(&state, &ip_right_type, &id)?;
    let submitted = state.application_service.submit_draft(&id, &actor).await?;
    Ok(Json(submitted))
}

async fn lock_application(
    Path((ip_right_type, id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<Application>> {
    let actor = actor(&headers)?;
    typed_application(&state, &ip_right_type, &id)?;
    let locked = state.application_service.lock_application(&id, &actor).await?;
    Ok(Json(locked))
}

async fn unlock_application(
    Path((ip_right_type, id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<Application>> {
    let actor = actor(&headers)?;
    typed_application(&state, &ip_right_type, &id)?;
    let unlocked = state.application_service.unlock_application(&id, &actor).await?;
    Ok(Json(unlocked))
}

async fn lock_by_number(
    Path(number): Path<String>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<Application>>> {
    let actor = actor(&headers)?;
    let locked = state.application_service.lock_all_by_number(&number, &actor).await?;
    Ok(Json(locked))
}

async fn unlock_by_number(
    Path(number): Path<String>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<Application>>> {
    let actor = actor(&headers)?;
    let unlocked = state
        .application_service
        .unlock_all_by_number(&number, &actor)
        .await?;
    Ok(Json(unlocked))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/applications/search", post(search_applications))
        .route("/applications", post(create_application))
        .route(
            "/applications/{ipRightType}/{id}",
            get(get_application)
                .put(update_application)
                .delete(delete_application),
        )
        .route(
            "/applications/{ipRightType}/{id}/submit",
            post(submit_application),
        )
        .route(
            "/applications/{ipRightType}/{id}/lock",
            post(lock_application),
        )
        .route(
            "/applications/{ipRightType}/{id}/unlock",
            post(unlock_application),
        )
        .route("/applications/number/{number}/lock", post(lock_by_number))
        .route(
            "/applications/number/{number}/unlock",
            post(unlock_by_number),
        )
}
