//! Bankily-pay gateway integration
//!
//! This module defines the request builder, transport and payload schemas
//! used to talk to the external payment gateway.

mod client;
mod de;
mod error;
/// Gateway payload schemas
pub mod wire;

pub use client::{Exchange, GatewayClient};
pub use error::{error_message, ErrorPayload, GatewayError};
pub use wire::{ConsultPayload, PaymentReceipt, VerifyPayload};
