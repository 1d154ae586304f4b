use std::str::FromStr;
use std::sync::Arc;

use axum::http::HeaderMap;
use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};

use ipdesk_core::applications::{Application, IpRightType};
use ipdesk_core::signatures::{SignatureOutcome, SigningSession};

use super::shared::{actor, check_right_type};
use crate::error::ApiResult;
use crate::main_lib::AppState;

async fn request_signature(
    Path((ip_right_type, id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<SigningSession>> {
    let actor = actor(&headers)?;
    let ip_right_type = IpRightType::from_str(&ip_right_type)?;
    check_right_type(&state.application_service.get_application(&id)?, ip_right_type)?;
    let session = state.signature_service.request_signature(&id, &actor).await?;
    Ok(Json(session))
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfirmSignatureBody {
    envelope_id: String,
    outcome: SignatureOutcome,
    signer: Option<String>,
}

/// Callback endpoint for the signature platform.
async fn confirm_signature(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ConfirmSignatureBody>,
) -> ApiResult<Json<Application>> {
    let application = state
        .signature_service
        .confirm_signature(&body.envelope_id, body.outcome, body.signer)
        .await?;
    Ok(Json(application))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/applications/{ipRightType}/{id}/signature",
            post(request_signature),
        )
        .route("/signatures/confirm", post(confirm_signature))
}
