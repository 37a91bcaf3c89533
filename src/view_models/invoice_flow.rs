//! # Invoice Lookup
//!
//! Holds the reference input and the state of the last lookup.

use super::flow_state::{FlowFailure, FlowState};
use crate::gateway::{ConsultPayload, Exchange, GatewayClient, GatewayError};
use crate::models::{InvoiceQuery, InvoiceView};

const LOOKUP_FAILED: &str = "Échec de la récupération des informations de la facture";
const LOOKUP_REJECTED: &str = "Erreur lors de la récupération de la facture";

#[derive(Debug, Default)]
pub struct InvoiceFlow {
    query: InvoiceQuery,
    state: FlowState<InvoiceView>,
}

impl InvoiceFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_reference(&mut self, reference: impl Into<String>) {
        self.query.reference = reference.into();
    }

    pub fn reference(&self) -> &str {
        &self.query.reference
    }

    pub fn state(&self) -> &FlowState<InvoiceView> {
        &self.state
    }

    /// Validate the input and enter `Submitting`.
    ///
    /// Returns the reference to look up, or `None` when the input was
    /// rejected (the flow is then `Failed`).
    pub fn begin(&mut self) -> Option<String> {
        match self.query.validate() {
            Ok(reference) => {
                self.state = FlowState::Submitting;
                Some(reference)
            }
            Err(e) => {
                tracing::debug!("Invoice lookup rejected: {}", e);
                self.state = FlowState::Failed(FlowFailure::validation(e));
                None
            }
        }
    }

    /// Apply the gateway's answer for `reference`
    pub fn finish(&mut self, reference: &str, exchange: Exchange<ConsultPayload>) {
        self.state = match exchange.outcome {
            Ok(payload) => FlowState::Success(InvoiceView::new(reference, &payload)),
            Err(e) => {
                let fallback = match e {
                    GatewayError::Rejected { .. } => LOOKUP_REJECTED,
                    _ => LOOKUP_FAILED,
                };
                FlowState::Failed(FlowFailure::from_gateway(&e, fallback))
            }
        };
    }

    /// Run one lookup against the gateway
    pub async fn submit(&mut self, client: &GatewayClient) -> &FlowState<InvoiceView> {
        if let Some(reference) = self.begin() {
            tracing::info!("Looking up invoice '{}'", reference);
            let exchange = client.consult_invoice(&reference).await;
            self.finish(&reference, exchange);
        }
        &self.state
    }

    /// Clear the result and the input field
    pub fn reset(&mut self) {
        self.query = InvoiceQuery::default();
        self.state = FlowState::Idle;
    }
}
