//! Invoice lookup models

use super::number_format::format_number;
use super::validation::{required, ValidationError};
use crate::gateway::wire::{ConsultLine, ConsultPayload};

/// Invoice lookup input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvoiceQuery {
    pub reference: String,
}

impl InvoiceQuery {
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
        }
    }

    /// The trimmed reference, ready to go in a URL path
    pub fn validate(&self) -> Result<String, ValidationError> {
        required(&self.reference)
            .map(str::to_string)
            .ok_or(ValidationError::MissingReference)
    }
}

/// One invoice line with its numbers already formatted for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub description: Option<String>,
    pub quantity: String,
    pub unit_price: String,
    pub total: String,
    pub vat_rate: String,
}

impl From<&ConsultLine> for LineItem {
    fn from(line: &ConsultLine) -> Self {
        Self {
            description: line
                .description
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
            quantity: format_number(line.quantity),
            unit_price: format_number(line.unit_price),
            total: format_number(line.total),
            vat_rate: format_number(line.vat_rate),
        }
    }
}

/// Invoice as displayed after a successful lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceView {
    /// The payment reference the user searched with
    pub reference: String,
    pub company_name: String,
    pub company_phone: Option<String>,
    pub amount: String,
    pub status: String,
    pub paid: bool,
    /// The invoice's own reference (`FA2404-0012`)
    pub invoice_ref: String,
    pub date: Option<String>,
    pub lines: Vec<LineItem>,
}

impl InvoiceView {
    pub fn new(reference: impl Into<String>, payload: &ConsultPayload) -> Self {
        Self {
            reference: reference.into(),
            company_name: payload.data.name.clone(),
            company_phone: payload.data.phone.clone(),
            amount: format_number(payload.data.amount),
            status: payload.details.status.clone(),
            paid: payload.details.payment_status,
            invoice_ref: payload.details.reference.clone(),
            date: payload.details.date.clone(),
            lines: payload.details.lines.iter().map(LineItem::from).collect(),
        }
    }

    pub fn payment_status_label(&self) -> &'static str {
        if self.paid {
            "Payé"
        } else {
            "Impayé"
        }
    }
}
