//! HTTP client for the signature platform.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::signatures_errors::SignatureError;
use super::signatures_model::{Envelope, EnvelopeRequest};
use super::signatures_traits::SignaturePlatformClient;
use crate::errors::Result;

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Envelope as returned by the platform API.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnvelopeResponse {
    envelope_id: String,
    signing_url: String,
}

/// Signature platform client talking JSON over HTTP.
#[derive(Clone)]
pub struct HttpSignaturePlatformClient {
    client: Client,
    base_url: String,
}

impl HttpSignaturePlatformClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| SignatureError::Platform(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl SignaturePlatformClient for HttpSignaturePlatformClient {
    async fn create_envelope(&self, request: &EnvelopeRequest) -> Result<Envelope> {
        let url = format!("{}/envelopes", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| SignatureError::Platform(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SignatureError::Platform(format!(
                "envelope creation returned HTTP {}",
                response.status()
            ))
            .into());
        }

        let envelope: EnvelopeResponse = response
            .json()
            .await
            .map_err(|e| SignatureError::Platform(e.to_string()))?;

        Ok(Envelope {
            id: envelope.envelope_id,
            signing_url: envelope.signing_url,
        })
    }
}
