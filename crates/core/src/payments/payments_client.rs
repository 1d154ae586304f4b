//! HTTP client for the payment gateway.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::payments_errors::PaymentError;
use super::payments_model::{GatewayOrder, GatewayOrderRequest};
use super::payments_traits::PaymentGatewayClient;
use crate::errors::Result;

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Order as returned by the gateway API.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderResponse {
    order_ref: String,
    redirect_url: String,
}

/// Payment gateway client talking JSON over HTTP.
#[derive(Clone)]
pub struct HttpPaymentGatewayClient {
    client: Client,
    base_url: String,
}

impl HttpPaymentGatewayClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| PaymentError::Gateway(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl PaymentGatewayClient for HttpPaymentGatewayClient {
    async fn initiate(&self, request: &GatewayOrderRequest) -> Result<GatewayOrder> {
        let url = format!("{}/orders", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| PaymentError::Gateway(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PaymentError::Gateway(format!(
                "order creation returned HTTP {}",
                response.status()
            ))
            .into());
        }

        let order: OrderResponse = response
            .json()
            .await
            .map_err(|e| PaymentError::Gateway(e.to_string()))?;

        Ok(GatewayOrder {
            provider_ref: order.order_ref,
            redirect_url: order.redirect_url,
        })
    }
}
