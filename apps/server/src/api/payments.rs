use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use rust_decimal::Decimal;

use ipdesk_core::applications::IpRightType;
use ipdesk_core::payments::{NewPayment, Payment, PaymentInitiation, PaymentOutcome};

use super::shared::check_right_type;
use crate::error::ApiResult;
use crate::main_lib::AppState;

fn check_typed(state: &AppState, ip_right_type: &str, id: &str) -> ApiResult<()> {
    let ip_right_type = IpRightType::from_str(ip_right_type)?;
    let application = state.application_service.get_application(id)?;
    check_right_type(&application, ip_right_type)
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct InitiatePaymentBody {
    amount: Decimal,
    currency: Option<String>,
}

async fn initiate_payment(
    Path((ip_right_type, id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    Json(body): Json<InitiatePaymentBody>,
) -> ApiResult<Json<PaymentInitiation>> {
    check_typed(&state, &ip_right_type, &id)?;
    let initiation = state
        .payment_service
        .initiate_payment(NewPayment {
            application_id: id,
            amount: body.amount,
            currency: body.currency,
        })
        .await?;
    Ok(Json(initiation))
}

async fn list_payments(
    Path((ip_right_type, id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Payment>>> {
    check_typed(&state, &ip_right_type, &id)?;
    let payments = state.payment_service.list_payments(&id)?;
    Ok(Json(payments))
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfirmPaymentBody {
    provider_ref: String,
    outcome: PaymentOutcome,
}

/// Callback endpoint for the payment gateway.
async fn confirm_payment(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ConfirmPaymentBody>,
) -> ApiResult<Json<Payment>> {
    let payment = state
        .payment_service
        .confirm_payment(&body.provider_ref, body.outcome)
        .await?;
    Ok(Json(payment))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/applications/{ipRightType}/{id}/payments",
            get(list_payments).post(initiate_payment),
        )
        .route("/payments/confirm", post(confirm_payment))
}
