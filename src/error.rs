//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.
//!
//! Every business-rule error here means "nothing happened" — no balance
//! moved, no ledger row written. Only `Database` can represent an
//! ambiguous outcome, and even then the unit of work has rolled back
//! before the error surfaces.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application-wide error type.
///
/// Each variant maps to a stable machine-readable code and a specific
/// HTTP status, so callers can distinguish every member of the failure
/// taxonomy without parsing messages.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Underlying storage operation failed (connectivity, lock timeout,
    /// failed commit). Always preceded by a full rollback.
    ///
    /// This wraps any sqlx::Error using the `#[from]` attribute, which
    /// automatically implements `From<sqlx::Error> for AppError`.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Bearer token is missing, unknown, expired, or the staff account
    /// behind it is no longer active.
    ///
    /// Returns HTTP 401 Unauthorized.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// Login or PIN verification failed.
    ///
    /// Returns HTTP 401 Unauthorized. Deliberately does not say which
    /// part of the credential was wrong.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Recipient identifier did not resolve to an eligible staff account.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("Recipient not found")]
    RecipientNotFound,

    /// No wallet row exists for the account.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("Wallet not found")]
    WalletNotFound,

    /// Transaction does not exist, or the caller is not a party to it.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("Transaction not found")]
    TransactionNotFound,

    /// Sender and resolved recipient are the same account.
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("Cannot transfer to yourself")]
    SelfTransferNotAllowed,

    /// A participating wallet is frozen or closed. Reads still work;
    /// mutations are rejected.
    ///
    /// Returns HTTP 409 Conflict.
    #[error("Wallet is not active")]
    WalletNotActive,

    /// Sender balance is smaller than the transfer amount.
    ///
    /// Returns HTTP 422 Unprocessable Entity.
    #[error("Insufficient balance")]
    InsufficientBalance,

    /// Reference collided twice in a row on insert. Treated as a storage
    /// fault: the unit of work rolled back, no funds moved.
    ///
    /// Returns HTTP 500 Internal Server Error.
    #[error("Could not allocate a unique transaction reference")]
    DuplicateReference,

    /// Request body or parameters are invalid (bad amount, malformed
    /// identifier). Rejected before any storage access.
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("Invalid request")]
    InvalidRequest(String),
}

/// Convert AppError into an HTTP response.
///
/// This implementation allows Axum handlers to return `Result<T, AppError>`
/// and have errors automatically converted to proper HTTP responses.
///
/// # Response Format
///
/// All errors return JSON in this format:
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map each error variant to (HTTP status, error code, message)
        let (status, code, message) = match self {
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "invalid_token", self.to_string()),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "invalid_credentials",
                self.to_string(),
            ),
            AppError::RecipientNotFound => (
                StatusCode::NOT_FOUND,
                "recipient_not_found",
                self.to_string(),
            ),
            AppError::WalletNotFound => {
                (StatusCode::NOT_FOUND, "wallet_not_found", self.to_string())
            }
            AppError::TransactionNotFound => (
                StatusCode::NOT_FOUND,
                "transaction_not_found",
                self.to_string(),
            ),
            AppError::SelfTransferNotAllowed => (
                StatusCode::BAD_REQUEST,
                "self_transfer_not_allowed",
                self.to_string(),
            ),
            AppError::WalletNotActive => {
                (StatusCode::CONFLICT, "wallet_not_active", self.to_string())
            }
            AppError::InsufficientBalance => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "insufficient_balance",
                self.to_string(),
            ),
            AppError::InvalidRequest(ref msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", msg.clone())
            }
            // Storage-shaped failures hide details from the client.
            AppError::DuplicateReference | AppError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "An internal error occurred".to_string(),
            ),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn business_errors_map_to_distinct_client_statuses() {
        assert_eq!(status_of(AppError::InvalidToken), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status_of(AppError::InvalidCredentials),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AppError::RecipientNotFound),
            StatusCode::NOT_FOUND
        );
        assert_eq!(status_of(AppError::WalletNotFound), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(AppError::SelfTransferNotAllowed),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_of(AppError::WalletNotActive), StatusCode::CONFLICT);
        assert_eq!(
            status_of(AppError::InsufficientBalance),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(AppError::InvalidRequest("bad".into())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn storage_faults_map_to_500_without_detail() {
        assert_eq!(
            status_of(AppError::DuplicateReference),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(AppError::Database(sqlx::Error::PoolClosed)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
