//! # Payment Verification
//!
//! Unlike the other flows, a failed verification keeps the payload the
//! gateway sent, and the raw-data panel is shown after every attempt.

use serde_json::Value;

use super::flow_state::{FlowFailure, FlowState};
use crate::gateway::{Exchange, GatewayClient, VerifyPayload};
use crate::models::{VerificationResult, VerifyQuery};

const VERIFY_FAILED: &str = "Failed to verify payment";

/// Shown when the gateway reports any status other than paid
pub const NOT_YET_PAID: &str =
    "Le paiement n'a pas encore été effectué. Veuillez réessayer plus tard.";

#[derive(Debug, Default)]
pub struct VerifyFlow {
    query: VerifyQuery,
    state: FlowState<VerificationResult>,
    raw: Option<Value>,
    show_raw: bool,
}

impl VerifyFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_transaction_id(&mut self, transaction_id: impl Into<String>) {
        self.query.transaction_id = transaction_id.into();
    }

    pub fn transaction_id(&self) -> &str {
        &self.query.transaction_id
    }

    pub fn state(&self) -> &FlowState<VerificationResult> {
        &self.state
    }

    /// Last payload received from the gateway, successful or not
    pub fn raw(&self) -> Option<&Value> {
        self.raw.as_ref()
    }

    pub fn show_raw(&self) -> bool {
        self.show_raw
    }

    pub fn set_show_raw(&mut self, show: bool) {
        self.show_raw = show;
    }

    pub fn toggle_raw(&mut self) {
        self.show_raw = !self.show_raw;
    }

    pub fn begin(&mut self) -> Option<String> {
        match self.query.validate() {
            Ok(transaction_id) => {
                self.state = FlowState::Submitting;
                Some(transaction_id)
            }
            Err(e) => {
                tracing::debug!("Verification rejected: {}", e);
                self.state = FlowState::Failed(FlowFailure::validation(e));
                None
            }
        }
    }

    pub fn finish(&mut self, transaction_id: &str, exchange: Exchange<VerifyPayload>) {
        // captured before the outcome is looked at
        if exchange.raw.is_some() {
            self.raw = exchange.raw;
        }

        self.state = match exchange.outcome {
            Ok(payload) => FlowState::Success(VerificationResult::new(transaction_id, &payload)),
            Err(e) => FlowState::Failed(FlowFailure::from_gateway(&e, VERIFY_FAILED)),
        };
        self.show_raw = true;
    }

    pub async fn submit(&mut self, client: &GatewayClient) -> &FlowState<VerificationResult> {
        if let Some(transaction_id) = self.begin() {
            tracing::info!("Verifying transaction '{}'", transaction_id);
            let exchange = client.verify_payment(&transaction_id).await;
            self.finish(&transaction_id, exchange);
        }
        &self.state
    }

    /// Start a new verification: clears the result, the payload and the input
    pub fn reset(&mut self) {
        self.query = VerifyQuery::default();
        self.state = FlowState::Idle;
        self.raw = None;
    }
}
