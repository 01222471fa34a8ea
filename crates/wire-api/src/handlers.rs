//! # Request Handlers
//!
//! Axum request handlers for the payment API. The handlers decode the body,
//! hand it to the executor, and map the result back onto HTTP; all workflow
//! logic lives in `wire_core`.

use crate::state::AppState;
use axum::{
    extract::rejection::JsonRejection,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use tracing::{error, instrument};
use wire_core::{PaymentError, PaymentRecord, PaymentRequest};

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

fn payment_error_to_response(err: PaymentError) -> (StatusCode, Json<ErrorResponse>) {
    let code = err.status_code();
    let response = ErrorResponse::new(err.to_string(), code);
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(response),
    )
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "wirepay",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Create a payment.
///
/// Body: `{ client, buyer, payment }` per the wire contract. On success the
/// full persisted payment row is returned; on failure an `ErrorResponse`
/// with the status from the error class (400 for input errors, 500 for
/// store failures).
#[instrument(skip_all, fields(payment_type = tracing::field::Empty))]
pub async fn create_payment(
    State(state): State<AppState>,
    body: Result<Json<PaymentRequest>, JsonRejection>,
) -> Result<Json<PaymentRecord>, (StatusCode, Json<ErrorResponse>)> {
    // Decode failures never reach the executor; the store is untouched.
    let Json(request) = body.map_err(|rejection| {
        error!("rejected undecodable payment request: {rejection}");
        (
            rejection.status(),
            Json(
                ErrorResponse::new("Invalid request payload", rejection.status().as_u16())
                    .with_details(rejection.body_text()),
            ),
        )
    })?;

    tracing::Span::current().record("payment_type", request.payment.type_payment.as_str());

    let payment = state
        .executor
        .create_payment(&request)
        .await
        .map_err(|e| {
            error!("failed to create payment: {e}");
            payment_error_to_response(e)
        })?;

    Ok(Json(payment))
}
