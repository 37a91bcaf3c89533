use std::fmt::Display;

use serde_json::Value;

/// Error body returned by the gateway.
///
/// The message has been observed both at the top level (`errorMessage`) and
/// nested (`error.message`), so both are read. The nested form wins.
#[derive(Debug, Default, serde::Deserialize)]
pub struct ErrorPayload {
    #[serde(rename = "errorMessage", default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub error: Option<NestedError>,
}

#[derive(Debug, Default, serde::Deserialize)]
pub struct NestedError {
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorPayload {
    /// Read an error payload leniently. Shapes that don't match yield an empty payload.
    pub fn from_value(value: &Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or_default()
    }

    pub fn message(&self) -> Option<&str> {
        self.error
            .as_ref()
            .and_then(|e| e.message.as_deref())
            .or(self.error_message.as_deref())
            .filter(|m| !m.trim().is_empty())
    }
}

/// Extract the gateway's error message from a payload, if it carries one
pub fn error_message(value: &Value) -> Option<String> {
    ErrorPayload::from_value(value).message().map(str::to_string)
}

#[derive(Debug)]
pub enum GatewayError {
    /// The client could not be built from the profile
    Configuration(String),
    /// The request never produced a response
    Request(reqwest::Error),
    /// Non-success HTTP status
    Status { status: u16, message: Option<String> },
    /// HTTP success, but the payload reports a business failure
    Rejected { code: i64, message: Option<String> },
    /// Body was not JSON or did not match the expected schema
    MalformedResponse(String),
}

impl GatewayError {
    /// The message the gateway itself supplied, if any
    pub fn gateway_message(&self) -> Option<&str> {
        match self {
            GatewayError::Status { message, .. } | GatewayError::Rejected { message, .. } => {
                message.as_deref()
            }
            _ => None,
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(value: reqwest::Error) -> Self {
        Self::Request(value)
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(value: serde_json::Error) -> Self {
        Self::MalformedResponse(value.to_string())
    }
}

impl std::error::Error for GatewayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GatewayError::Request(e) => Some(e),
            _ => None,
        }
    }
}

impl Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GatewayError::Configuration(msg) => write!(f, "gateway configuration: {msg}"),
            GatewayError::Request(e) => write!(f, "http request error: {e}"),
            GatewayError::Status { status, message } => match message {
                Some(m) => write!(f, "gateway returned HTTP {status}: {m}"),
                None => write!(f, "gateway returned HTTP {status}"),
            },
            GatewayError::Rejected { code, message } => match message {
                Some(m) => write!(f, "gateway rejected the request (code {code}): {m}"),
                None => write!(f, "gateway rejected the request (code {code})"),
            },
            GatewayError::MalformedResponse(detail) => {
                write!(f, "gateway response deserialization: {detail}")
            }
        }
    }
}
