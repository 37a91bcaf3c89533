//! # Payline - Terminal Client for Bankily-pay
//!
//! Looks up invoices, submits payments and verifies payment status against a
//! Bankily-pay gateway, rendering each answer in the terminal.
//!
//! ## Architecture
//!
//! Every flow is the same thin pipeline:
//!
//! ```text
//! ┌─────────────┐   ┌──────────────┐   ┌───────────┐   ┌──────────────┐   ┌────────────┐
//! │   Input     │──▶│   Request    │──▶│ Transport │──▶│   Response   │──▶│ View State │
//! │  (cmd_args, │   │   Builder    │   │ (reqwest) │   │    Mapper    │   │ (FlowState)│
//! │   shell)    │   │  (gateway)   │   │           │   │   (models)   │   │            │
//! └─────────────┘   └──────────────┘   └───────────┘   └──────────────┘   └────────────┘
//! ```
//!
//! - [`gateway`] builds requests and decodes gateway payloads into typed schemas
//! - [`models`] holds the display models and input validation
//! - [`view_models`] holds per-flow state (`Idle`, `Submitting`, `Success`, `Failed`)
//! - [`views`] renders a flow to the terminal
//! - [`controller`] wires it all together for one-shot commands and the shell

pub mod cmd_args;
pub mod config;
pub mod controller;
pub mod gateway;
pub mod models;
pub mod view_models;
pub mod views;

// Re-export main types for easy access
pub use controller::AppController;
pub use gateway::{GatewayClient, GatewayError};
