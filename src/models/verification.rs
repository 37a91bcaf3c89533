//! Payment verification models

use super::validation::{required, ValidationError};
use crate::gateway::wire::VerifyPayload;

/// Status value the gateway reports for a settled payment
pub const PAID_STATUS: &str = "paid";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyQuery {
    pub transaction_id: String,
}

impl VerifyQuery {
    pub fn new(transaction_id: impl Into<String>) -> Self {
        Self {
            transaction_id: transaction_id.into(),
        }
    }

    pub fn validate(&self) -> Result<String, ValidationError> {
        required(&self.transaction_id)
            .map(str::to_string)
            .ok_or(ValidationError::MissingTransactionId)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationResult {
    /// The transaction id that was verified
    pub transaction_id: String,
    pub status: String,
    pub api_id: Option<String>,
    pub payment_date: Option<String>,
}

impl VerificationResult {
    pub fn new(transaction_id: impl Into<String>, payload: &VerifyPayload) -> Self {
        Self {
            transaction_id: transaction_id.into(),
            status: payload.status.clone(),
            api_id: payload.api_id.clone(),
            payment_date: payload.payment_date.clone(),
        }
    }

    pub fn is_paid(&self) -> bool {
        self.status == PAID_STATUS
    }
}
