//! # Gateway Client
//!
//! Builds Bankily-pay requests and performs one request/response exchange
//! per call. No retries.

use std::time::Instant;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use reqwest::{RequestBuilder, StatusCode, Url};
use serde_json::Value;

use super::error::GatewayError;
use super::wire::{self, ConsultPayload, GatewayPayload, PaymentReceipt, VerifyPayload};
use crate::config::GatewayConnectionProfile;
use crate::models::{PaymentMethod, PaymentRequest};

/// Outcome of one exchange with the gateway.
///
/// `raw` keeps whatever JSON the gateway sent back, success or not, for the
/// raw-data panel.
#[derive(Debug)]
pub struct Exchange<T> {
    pub raw: Option<Value>,
    pub outcome: Result<T, GatewayError>,
}

impl<T> Exchange<T> {
    fn failed(error: GatewayError) -> Self {
        Self {
            raw: None,
            outcome: Err(error),
        }
    }
}

/// HTTP client bound to one gateway base URL and API key
#[derive(Debug, Clone)]
pub struct GatewayClient {
    client: reqwest::Client,
    base_url: Url,
}

impl GatewayClient {
    /// Create a client from a connection profile
    pub fn new(profile: &impl GatewayConnectionProfile) -> Result<Self, GatewayError> {
        let server = profile.server().ok_or_else(|| {
            GatewayError::Configuration("no gateway host configured in the profile".to_string())
        })?;
        let base_url = Url::parse(server)
            .map_err(|e| GatewayError::Configuration(format!("invalid host '{server}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(GatewayError::Configuration(format!(
                "host '{server}' cannot be used as a base URL"
            )));
        }

        let mut builder = reqwest::Client::builder()
            .default_headers(Self::default_headers(profile)?)
            .danger_accept_invalid_certs(profile.insecure());
        if let Some(timeout) = profile.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        tracing::debug!(%base_url, "Gateway client created");
        Ok(Self { client, base_url })
    }

    fn default_headers(
        profile: &impl GatewayConnectionProfile,
    ) -> Result<HeaderMap, GatewayError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        for (name, value) in profile.headers() {
            headers.insert(header_name(name)?, header_value(name, value)?);
        }

        match profile.api_key() {
            Some(key) => {
                let name = profile.api_key_header();
                let mut value = header_value(name, key)?;
                value.set_sensitive(true);
                headers.insert(header_name(name)?, value);
            }
            None => tracing::warn!("No API key configured; gateway requests are unauthenticated"),
        }

        Ok(headers)
    }

    /// Base URL with `segments` appended, each one percent-encoded
    pub fn endpoint<I>(&self, segments: I) -> Url
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut url = self.base_url.clone();
        // cannot_be_a_base was ruled out in new()
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// `GET /bankilypay/consult/{reference}`
    pub async fn consult_invoice(&self, reference: &str) -> Exchange<ConsultPayload> {
        let url = self.endpoint(["bankilypay", "consult", reference]);
        self.exchange(self.client.get(url.clone()), &url).await
    }

    /// Submit a payment with the given request shape
    pub async fn submit_payment(
        &self,
        request: &PaymentRequest,
        method: PaymentMethod,
    ) -> Exchange<PaymentReceipt> {
        match method {
            PaymentMethod::Post => {
                let url = self.endpoint(["bankilypay", "payment"]);
                let builder = self.client.post(url.clone()).json(request);
                self.exchange(builder, &url).await
            }
            PaymentMethod::Get => {
                let amount = request.amount_segment();
                let url = self.endpoint([
                    "bankilypay",
                    "payment",
                    request.reference.as_str(),
                    amount.as_str(),
                    request.transaction_id.as_str(),
                    request.phone_number.as_str(),
                ]);
                self.exchange(self.client.get(url.clone()), &url).await
            }
        }
    }

    /// `GET /bankilypay/verify/{transactionId}`
    pub async fn verify_payment(&self, transaction_id: &str) -> Exchange<VerifyPayload> {
        let url = self.endpoint(["bankilypay", "verify", transaction_id]);
        self.exchange(self.client.get(url.clone()), &url).await
    }

    async fn exchange<T: GatewayPayload>(&self, request: RequestBuilder, url: &Url) -> Exchange<T> {
        let (status, raw) = match self.send(request, url).await {
            Ok(received) => received,
            Err(e) => {
                tracing::error!("Gateway request to {} failed: {}", url, e);
                return Exchange::failed(e);
            }
        };

        let outcome = wire::decode(status, raw.as_ref());
        if let Err(e) = &outcome {
            tracing::warn!(%url, "Gateway exchange failed: {}", e);
        }
        Exchange { raw, outcome }
    }

    async fn send(
        &self,
        request: RequestBuilder,
        url: &Url,
    ) -> Result<(StatusCode, Option<Value>), GatewayError> {
        let start_time = Instant::now();
        tracing::debug!(%url, "Gateway request");

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        let duration_ms = start_time.elapsed().as_millis() as u64;

        let raw = if body.is_empty() {
            None
        } else {
            match serde_json::from_slice::<Value>(&body) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!("Gateway response body is not JSON: {}", e);
                    None
                }
            }
        };

        tracing::debug!(
            status = status.as_u16(),
            duration_ms,
            body = %raw.as_ref().map(|v| v.to_string()).unwrap_or_default(),
            "Gateway response"
        );
        Ok((status, raw))
    }
}

fn header_name(name: &str) -> Result<HeaderName, GatewayError> {
    HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| GatewayError::Configuration(format!("invalid header name '{name}': {e}")))
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, GatewayError> {
    HeaderValue::from_str(value)
        .map_err(|e| GatewayError::Configuration(format!("invalid value for header '{name}': {e}")))
}
