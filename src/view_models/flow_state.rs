//! # Flow State
//!
//! The state every flow moves through:
//!
//! ```text
//! Idle ──submit──▶ Submitting ──▶ Success(T)
//!  ▲                   ▲   └────▶ Failed
//!  └──── reset ────────┴── resubmit ──┘
//! ```

use crate::gateway::GatewayError;
use crate::models::ValidationError;

/// Why an attempt failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Input rejected, no request sent
    Validation,
    /// No response, or a non-success HTTP status
    Transport,
    /// HTTP success carrying a business error code
    GatewayLogic,
    /// Payload did not match the expected schema
    MalformedResponse,
}

/// A failed attempt, with the message shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl FlowFailure {
    pub fn validation(error: ValidationError) -> Self {
        Self {
            kind: FailureKind::Validation,
            message: error.to_string(),
        }
    }

    /// Map a gateway error, using `fallback` when the gateway gave no message
    pub fn from_gateway(error: &GatewayError, fallback: &str) -> Self {
        let gateway_message = || {
            error
                .gateway_message()
                .map(str::to_string)
                .unwrap_or_else(|| fallback.to_string())
        };

        match error {
            GatewayError::Configuration(_) | GatewayError::Request(_) => Self {
                kind: FailureKind::Transport,
                message: format!("{fallback} ({error})"),
            },
            GatewayError::Status { .. } => Self {
                kind: FailureKind::Transport,
                message: gateway_message(),
            },
            GatewayError::Rejected { .. } => Self {
                kind: FailureKind::GatewayLogic,
                message: gateway_message(),
            },
            GatewayError::MalformedResponse(detail) => Self {
                kind: FailureKind::MalformedResponse,
                message: format!("Réponse inattendue de la passerelle : {detail}"),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FlowState<T> {
    Idle,
    Submitting,
    Success(T),
    Failed(FlowFailure),
}

impl<T> Default for FlowState<T> {
    fn default() -> Self {
        FlowState::Idle
    }
}

impl<T> FlowState<T> {
    /// True while a request is in flight
    pub fn is_loading(&self) -> bool {
        matches!(self, FlowState::Submitting)
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, FlowState::Idle)
    }

    pub fn result(&self) -> Option<&T> {
        match self {
            FlowState::Success(result) => Some(result),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&FlowFailure> {
        match self {
            FlowState::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        self.failure().map(|f| f.message.as_str())
    }
}
