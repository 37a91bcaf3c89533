//! # View Models
//!
//! One view model per gateway flow. Each owns its input fields and a
//! [`FlowState`]; submitting borrows the flow mutably for the duration of
//! the request, so a flow never has two requests in flight.

pub mod flow_state;
pub mod invoice_flow;
pub mod payment_flow;
pub mod verify_flow;

pub use flow_state::{FailureKind, FlowFailure, FlowState};
pub use invoice_flow::InvoiceFlow;
pub use payment_flow::{PaymentFlow, PAYMENT_SUCCEEDED};
pub use verify_flow::{VerifyFlow, NOT_YET_PAID};
