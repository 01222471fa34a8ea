//! # Payment Domain Types
//!
//! Request and record types for the payment-creation workflow.
//!
//! The request mirrors the inbound HTTP body (`client` / `buyer` / `payment`
//! facets); the record mirrors the persisted `payments` row that is read back
//! and returned to the caller.

use crate::error::{PaymentError, PaymentResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Recognized payment types.
///
/// Matched by exact string equality; anything else is rejected up front as
/// `PaymentError::UnsupportedPaymentType` rather than silently skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentKind {
    /// Immediate card charge, approved at creation time
    Credit,
    /// Deferred bank slip, pending until paid out-of-band
    Boleto,
}

impl PaymentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentKind::Credit => "credit",
            PaymentKind::Boleto => "boleto",
        }
    }

    /// The status assigned unconditionally at creation for this type.
    /// There is no settlement or capture flow; status never transitions.
    pub fn initial_status(&self) -> PaymentStatus {
        match self {
            PaymentKind::Credit => PaymentStatus::Approved,
            PaymentKind::Boleto => PaymentStatus::Pending,
        }
    }
}

impl FromStr for PaymentKind {
    type Err = PaymentError;

    fn from_str(s: &str) -> PaymentResult<Self> {
        match s {
            "credit" => Ok(PaymentKind::Credit),
            "boleto" => Ok(PaymentKind::Boleto),
            other => Err(PaymentError::UnsupportedPaymentType {
                kind: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for PaymentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment status, fixed at creation by the payment type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Approved,
    Pending,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Approved => "approved",
            PaymentStatus::Pending => "pending",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = PaymentError;

    fn from_str(s: &str) -> PaymentResult<Self> {
        match s {
            "approved" => Ok(PaymentStatus::Approved),
            "pending" => Ok(PaymentStatus::Pending),
            other => Err(PaymentError::Internal(format!(
                "unknown payment status in store: {other}"
            ))),
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Card details from the request.
///
/// Required iff the payment type is `credit`. Stored in clear form — no
/// tokenization exists in this system; see DESIGN.md for the security flag.
#[derive(Clone, Deserialize)]
pub struct CardDetails {
    pub number: String,
    pub exp_date: String,
    pub cvv: String,
    pub holder_name: String,
}

// Card numbers and CVVs must never reach logs; Debug shows the holder only.
impl std::fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardDetails")
            .field("number", &"<redacted>")
            .field("exp_date", &self.exp_date)
            .field("cvv", &"<redacted>")
            .field("holder_name", &self.holder_name)
            .finish()
    }
}

/// Buyer details from the request.
///
/// Every request creates a fresh buyer row, even for repeat customers —
/// there is no deduplication (preserved behavior, flagged in DESIGN.md).
#[derive(Debug, Clone, Deserialize)]
pub struct BuyerDetails {
    pub email: String,
    pub name: String,
    /// Brazilian tax identifier; no format validation is performed here
    pub cpf: String,
}

/// Client facet of the request.
///
/// Carries an id in the wire format, but the core ignores it: a new client
/// row is created per request regardless.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientRef {
    #[serde(default)]
    pub id: Option<String>,
}

/// Payment facet of the request.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentDetails {
    pub amount: f64,
    /// Raw type string; validated against [`PaymentKind`] by the executor so
    /// an unknown type surfaces as an explicit input error
    #[serde(rename = "type")]
    pub type_payment: String,
    #[serde(default)]
    pub card: Option<CardDetails>,
}

impl PaymentDetails {
    /// Parse the raw type string into a recognized [`PaymentKind`].
    pub fn kind(&self) -> PaymentResult<PaymentKind> {
        self.type_payment.parse()
    }
}

/// A decoded payment-creation request.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentRequest {
    #[serde(default)]
    pub client: ClientRef,
    pub buyer: BuyerDetails,
    pub payment: PaymentDetails,
}

/// A fully-populated payment row, as read back from the store.
///
/// Field names match the response wire format (`type_payment`,
/// `status_payment`, ...). `payment_date` and `credit_card_id` are null for
/// boleto payments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentRecord {
    pub id: Uuid,
    pub amount: f64,
    pub type_payment: PaymentKind,
    pub status_payment: PaymentStatus,
    pub payment_date: Option<DateTime<Utc>>,
    pub buyer_id: Uuid,
    pub client_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_card_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parsing() {
        assert_eq!("credit".parse::<PaymentKind>().unwrap(), PaymentKind::Credit);
        assert_eq!("boleto".parse::<PaymentKind>().unwrap(), PaymentKind::Boleto);

        let err = "pix".parse::<PaymentKind>().unwrap_err();
        assert!(matches!(
            err,
            PaymentError::UnsupportedPaymentType { kind } if kind == "pix"
        ));

        // exact string equality, no case folding
        assert!("Credit".parse::<PaymentKind>().is_err());
    }

    #[test]
    fn test_initial_status() {
        assert_eq!(
            PaymentKind::Credit.initial_status(),
            PaymentStatus::Approved
        );
        assert_eq!(PaymentKind::Boleto.initial_status(), PaymentStatus::Pending);
    }

    #[test]
    fn test_request_decoding() {
        let body = serde_json::json!({
            "client": {"id": "1"},
            "buyer": {"email": "a@b.com", "name": "A", "cpf": "123"},
            "payment": {
                "type": "credit",
                "amount": 100.0,
                "card": {
                    "number": "4111111111111111",
                    "exp_date": "12/23",
                    "cvv": "123",
                    "holder_name": "A"
                }
            }
        });

        let request: PaymentRequest = serde_json::from_value(body).unwrap();
        assert_eq!(request.buyer.email, "a@b.com");
        assert_eq!(request.payment.amount, 100.0);
        assert_eq!(request.payment.kind().unwrap(), PaymentKind::Credit);
        assert_eq!(
            request.payment.card.as_ref().unwrap().number,
            "4111111111111111"
        );
    }

    #[test]
    fn test_request_decoding_boleto_without_card_or_client() {
        let body = serde_json::json!({
            "buyer": {"email": "a@b.com", "name": "A", "cpf": "123"},
            "payment": {"type": "boleto", "amount": 50.0}
        });

        let request: PaymentRequest = serde_json::from_value(body).unwrap();
        assert!(request.payment.card.is_none());
        assert!(request.client.id.is_none());
        assert_eq!(request.payment.kind().unwrap(), PaymentKind::Boleto);
    }

    #[test]
    fn test_record_serialization_omits_missing_card() {
        let record = PaymentRecord {
            id: Uuid::new_v4(),
            amount: 50.0,
            type_payment: PaymentKind::Boleto,
            status_payment: PaymentStatus::Pending,
            payment_date: None,
            buyer_id: Uuid::new_v4(),
            client_id: Uuid::new_v4(),
            credit_card_id: None,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type_payment"], "boleto");
        assert_eq!(json["status_payment"], "pending");
        assert!(json["payment_date"].is_null());
        assert!(json.get("credit_card_id").is_none());
    }

    #[test]
    fn test_card_debug_redacts_sensitive_fields() {
        let card = CardDetails {
            number: "4111111111111111".into(),
            exp_date: "12/23".into(),
            cvv: "123".into(),
            holder_name: "A".into(),
        };

        let debug = format!("{card:?}");
        assert!(!debug.contains("4111111111111111"));
        assert!(!debug.contains("\"123\""));
        assert!(debug.contains("<redacted>"));
    }
}
