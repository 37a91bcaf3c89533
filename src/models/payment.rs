//! Payment submission models

use std::fmt::Display;

use serde::Serialize;

use super::number_format::format_number;
use super::validation::{required, ValidationError};
use crate::gateway::wire::PaymentReceipt;

/// Which request shape a payment is sent with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum PaymentMethod {
    /// JSON body to `/bankilypay/payment`
    #[default]
    Post,
    /// Values embedded as path segments
    Get,
}

impl PaymentMethod {
    /// Label of the submit action
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Post => "Paiement POST",
            PaymentMethod::Get => "Paiement GET",
        }
    }
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::Post => f.write_str("POST"),
            PaymentMethod::Get => f.write_str("GET"),
        }
    }
}

/// Raw payment form input, as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentForm {
    pub reference: String,
    pub amount: String,
    pub transaction_id: String,
    pub phone_number: String,
}

impl PaymentForm {
    pub fn new(
        reference: impl Into<String>,
        amount: impl Into<String>,
        transaction_id: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Self {
        Self {
            reference: reference.into(),
            amount: amount.into(),
            transaction_id: transaction_id.into(),
            phone_number: phone_number.into(),
        }
    }

    /// Check every field and build the request sent to the gateway
    pub fn validate(&self) -> Result<PaymentRequest, ValidationError> {
        let (Some(reference), Some(amount), Some(transaction_id), Some(phone_number)) = (
            required(&self.reference),
            required(&self.amount),
            required(&self.transaction_id),
            required(&self.phone_number),
        ) else {
            return Err(ValidationError::MissingPaymentFields);
        };

        let amount = amount
            .parse::<f64>()
            .ok()
            .filter(|a| a.is_finite() && *a > 0.0)
            .ok_or(ValidationError::InvalidAmount)?;

        if phone_number.len() != 8 || !phone_number.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidPhoneNumber);
        }

        Ok(PaymentRequest {
            reference: reference.to_string(),
            amount,
            transaction_id: transaction_id.to_string(),
            phone_number: phone_number.to_string(),
        })
    }
}

/// Validated payment, serialized as the POST body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentRequest {
    pub reference: String,
    pub amount: f64,
    #[serde(rename = "transactionID")]
    pub transaction_id: String,
    #[serde(rename = "phoneNumber")]
    pub phone_number: String,
}

impl PaymentRequest {
    /// Amount as embedded in the GET path (`100`, `12.5`).
    ///
    /// Shortest round-trip form, switching to exponent notation (`1e+21`,
    /// `1e-7`) outside `[1e-6, 1e21)` like a JavaScript number would.
    pub fn amount_segment(&self) -> String {
        let magnitude = self.amount.abs();
        if magnitude != 0.0 && !(1e-6..1e21).contains(&magnitude) {
            let exp = format!("{:e}", self.amount);
            match exp.split_once('e') {
                Some((mantissa, power)) if !power.starts_with('-') => {
                    format!("{mantissa}e+{power}")
                }
                _ => exp,
            }
        } else {
            self.amount.to_string()
        }
    }
}

/// Display-only progress derived from the remaining balance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentProgress {
    Complete,
    InProgress,
}

impl PaymentProgress {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentProgress::Complete => "Complété",
            PaymentProgress::InProgress => "En cours",
        }
    }
}

/// Successful payment as displayed
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentResult {
    pub reference: String,
    pub api_id: Option<String>,
    pub amount_paid: f64,
    pub remaining_amount: f64,
}

impl PaymentResult {
    pub fn new(request: &PaymentRequest, receipt: &PaymentReceipt) -> Self {
        Self {
            reference: request.reference.clone(),
            api_id: receipt.api_id.clone(),
            amount_paid: receipt.amount_paid,
            remaining_amount: receipt.remaining_amount,
        }
    }

    pub fn progress(&self) -> PaymentProgress {
        if self.remaining_amount == 0.0 {
            PaymentProgress::Complete
        } else {
            PaymentProgress::InProgress
        }
    }

    pub fn amount_paid_display(&self) -> String {
        format_number(self.amount_paid)
    }

    pub fn remaining_display(&self) -> String {
        format_number(self.remaining_amount)
    }
}
