//! Gateway payload schemas.
//!
//! Each flow's success payload is decoded into an explicit type. A payload
//! that does not fit is a [`GatewayError::MalformedResponse`].

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use super::de;
use super::error::{error_message, GatewayError};

/// A success payload for one gateway endpoint
pub trait GatewayPayload: DeserializeOwned {
    /// Business-level failure carried inside an HTTP success payload
    fn check(_raw: &Value) -> Result<(), GatewayError> {
        Ok(())
    }
}

/// Map a status and decoded body onto the flow's payload type
pub fn decode<T: GatewayPayload>(
    status: StatusCode,
    payload: Option<&Value>,
) -> Result<T, GatewayError> {
    if !status.is_success() {
        return Err(GatewayError::Status {
            status: status.as_u16(),
            message: payload.and_then(error_message),
        });
    }

    let payload = payload.ok_or_else(|| {
        GatewayError::MalformedResponse("response body is empty or not JSON".to_string())
    })?;
    T::check(payload)?;
    Ok(T::deserialize(payload)?)
}

// === Invoice lookup ===

#[derive(Debug, Deserialize)]
struct ConsultEnvelope {
    #[serde(rename = "errorCode", default, deserialize_with = "de::optional_number")]
    error_code: Option<f64>,
}

/// `GET /bankilypay/consult/{reference}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConsultPayload {
    pub data: ConsultCompany,
    pub details: ConsultDetails,
}

impl GatewayPayload for ConsultPayload {
    fn check(raw: &Value) -> Result<(), GatewayError> {
        let envelope = ConsultEnvelope::deserialize(raw)?;
        match envelope.error_code {
            None => Err(GatewayError::MalformedResponse(
                "missing field `errorCode`".to_string(),
            )),
            Some(code) if code != 0.0 => Err(GatewayError::Rejected {
                code: code as i64,
                message: error_message(raw),
            }),
            Some(_) => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConsultCompany {
    #[serde(deserialize_with = "de::text")]
    pub name: String,
    #[serde(default, deserialize_with = "de::optional_text")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "de::number")]
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConsultDetails {
    #[serde(deserialize_with = "de::text")]
    pub status: String,
    #[serde(deserialize_with = "de::flag")]
    pub payment_status: bool,
    #[serde(rename = "ref", deserialize_with = "de::text")]
    pub reference: String,
    #[serde(default, deserialize_with = "de::optional_text")]
    pub date: Option<String>,
    #[serde(default)]
    pub lines: Vec<ConsultLine>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConsultLine {
    #[serde(default, deserialize_with = "de::optional_text")]
    pub description: Option<String>,
    #[serde(deserialize_with = "de::number")]
    pub quantity: f64,
    #[serde(deserialize_with = "de::number")]
    pub unit_price: f64,
    #[serde(deserialize_with = "de::number")]
    pub total: f64,
    #[serde(deserialize_with = "de::number")]
    pub vat_rate: f64,
}

// === Payment ===

/// `POST /bankilypay/payment` and `GET /bankilypay/payment/...`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PaymentReceipt {
    #[serde(rename = "apiID", default, deserialize_with = "de::optional_text")]
    pub api_id: Option<String>,
    #[serde(rename = "amountPaid", deserialize_with = "de::number")]
    pub amount_paid: f64,
    #[serde(rename = "remainingAmount", deserialize_with = "de::number")]
    pub remaining_amount: f64,
}

impl GatewayPayload for PaymentReceipt {}

// === Verification ===

/// `GET /bankilypay/verify/{transactionId}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VerifyPayload {
    #[serde(deserialize_with = "de::text")]
    pub status: String,
    #[serde(rename = "apiID", default, deserialize_with = "de::optional_text")]
    pub api_id: Option<String>,
    #[serde(default, deserialize_with = "de::optional_text")]
    pub payment_date: Option<String>,
}

impl GatewayPayload for VerifyPayload {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn consult_body() -> Value {
        json!({
            "errorCode": 0,
            "data": {"name": "Sahel Distribution", "phone": "22233445", "amount": "1500.00000000"},
            "details": {
                "status": "1",
                "payment_status": "0",
                "ref": "FA2404-0012",
                "date": "2024-04-12",
                "lines": [
                    {"description": "Ciment", "quantity": "2", "unit_price": "750.00", "total": "1500.00", "vat_rate": "0.000"}
                ]
            }
        })
    }

    #[test]
    fn decode_should_parse_consult_payload() {
        let body = consult_body();
        let payload: ConsultPayload = decode(StatusCode::OK, Some(&body)).unwrap();

        assert_eq!(payload.data.name, "Sahel Distribution");
        assert_eq!(payload.data.amount, 1500.0);
        assert!(!payload.details.payment_status);
        assert_eq!(payload.details.reference, "FA2404-0012");
        assert_eq!(payload.details.lines.len(), 1);
        assert_eq!(payload.details.lines[0].unit_price, 750.0);
    }

    #[test]
    fn decode_should_reject_nonzero_error_code() {
        let body = json!({"errorCode": 2, "errorMessage": "Facture introuvable"});
        let err = decode::<ConsultPayload>(StatusCode::OK, Some(&body)).unwrap_err();

        match err {
            GatewayError::Rejected { code, message } => {
                assert_eq!(code, 2);
                assert_eq!(message.as_deref(), Some("Facture introuvable"));
            }
            other => panic!("Expected Rejected, got {other:?}"),
        }
    }

    #[test]
    fn decode_should_treat_missing_error_code_as_malformed() {
        let mut body = consult_body();
        body.as_object_mut().unwrap().remove("errorCode");

        let err = decode::<ConsultPayload>(StatusCode::OK, Some(&body)).unwrap_err();
        assert!(matches!(err, GatewayError::MalformedResponse(_)));
    }

    #[test]
    fn decode_should_treat_schema_mismatch_as_malformed() {
        let body = json!({"errorCode": 0, "data": {"name": "X"}});
        let err = decode::<ConsultPayload>(StatusCode::OK, Some(&body)).unwrap_err();
        assert!(matches!(err, GatewayError::MalformedResponse(_)));
    }

    #[test]
    fn decode_should_map_http_failure_with_nested_message() {
        let body = json!({"error": {"code": 400, "message": "Bad Request: amount"}});
        let err = decode::<PaymentReceipt>(StatusCode::BAD_REQUEST, Some(&body)).unwrap_err();

        match err {
            GatewayError::Status { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message.as_deref(), Some("Bad Request: amount"));
            }
            other => panic!("Expected Status, got {other:?}"),
        }
    }

    #[test]
    fn decode_should_map_http_failure_without_body() {
        let err = decode::<VerifyPayload>(StatusCode::BAD_GATEWAY, None).unwrap_err();
        assert!(matches!(
            err,
            GatewayError::Status {
                status: 502,
                message: None
            }
        ));
    }

    #[test]
    fn decode_should_reject_empty_success_body() {
        let err = decode::<VerifyPayload>(StatusCode::OK, None).unwrap_err();
        assert!(matches!(err, GatewayError::MalformedResponse(_)));
    }

    #[test]
    fn decode_should_parse_payment_receipt() {
        let body = json!({"apiID": 98765, "amountPaid": "500", "remainingAmount": 0});
        let receipt: PaymentReceipt = decode(StatusCode::OK, Some(&body)).unwrap();

        assert_eq!(receipt.api_id.as_deref(), Some("98765"));
        assert_eq!(receipt.amount_paid, 500.0);
        assert_eq!(receipt.remaining_amount, 0.0);
    }

    #[test]
    fn decode_should_parse_pending_verification() {
        let body = json!({"status": "pending"});
        let payload: VerifyPayload = decode(StatusCode::OK, Some(&body)).unwrap();

        assert_eq!(payload.status, "pending");
        assert_eq!(payload.api_id, None);
        assert_eq!(payload.payment_date, None);
    }
}
