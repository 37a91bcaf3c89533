//! # Payment Submission
//!
//! Holds the four payment fields, the selected request shape and the last
//! payload the gateway returned.

use serde_json::Value;

use super::flow_state::{FlowFailure, FlowState};
use crate::gateway::{Exchange, GatewayClient, PaymentReceipt};
use crate::models::{PaymentForm, PaymentMethod, PaymentRequest, PaymentResult};

const PAYMENT_FAILED: &str = "Erreur lors du traitement du paiement";

/// Message shown above a successful payment
pub const PAYMENT_SUCCEEDED: &str = "Paiement effectué avec succès";

#[derive(Debug, Default)]
pub struct PaymentFlow {
    form: PaymentForm,
    method: PaymentMethod,
    state: FlowState<PaymentResult>,
    /// Last payload received, with the method that produced it
    raw: Option<(PaymentMethod, Value)>,
    show_raw: bool,
}

impl PaymentFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_form(&mut self, form: PaymentForm) {
        self.form = form;
    }

    pub fn form(&self) -> &PaymentForm {
        &self.form
    }

    /// Select the request shape used by the next submission
    pub fn set_method(&mut self, method: PaymentMethod) {
        self.method = method;
    }

    pub fn method(&self) -> PaymentMethod {
        self.method
    }

    pub fn state(&self) -> &FlowState<PaymentResult> {
        &self.state
    }

    pub fn raw(&self) -> Option<(PaymentMethod, &Value)> {
        self.raw.as_ref().map(|(method, value)| (*method, value))
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

    /// Validate the form and enter `Submitting`.
    ///
    /// Returns `None` when the form was rejected; nothing must be sent then.
    pub fn begin(&mut self) -> Option<PaymentRequest> {
        match self.form.validate() {
            Ok(request) => {
                self.state = FlowState::Submitting;
                Some(request)
            }
            Err(e) => {
                tracing::debug!("Payment rejected: {}", e);
                self.state = FlowState::Failed(FlowFailure::validation(e));
                None
            }
        }
    }

    /// Apply the gateway's answer to `request`, sent with `method`
    pub fn finish(
        &mut self,
        request: &PaymentRequest,
        method: PaymentMethod,
        exchange: Exchange<PaymentReceipt>,
    ) {
        if let Some(raw) = exchange.raw {
            self.raw = Some((method, raw));
        }

        self.state = match exchange.outcome {
            Ok(receipt) => FlowState::Success(PaymentResult::new(request, &receipt)),
            Err(e) => FlowState::Failed(FlowFailure::from_gateway(&e, PAYMENT_FAILED)),
        };
    }

    /// Submit the current form with the selected method
    pub async fn submit(&mut self, client: &GatewayClient) -> &FlowState<PaymentResult> {
        if let Some(request) = self.begin() {
            let method = self.method;
            tracing::info!(
                "Submitting payment for '{}' via {}",
                request.reference,
                method
            );
            let exchange = client.submit_payment(&request, method).await;
            self.finish(&request, method, exchange);
        }
        &self.state
    }
}
