//! Wallet HTTP handlers.
//!
//! This module implements the wallet-facing API endpoints:
//! - GET  /api/wallet/balance - Current balance
//! - GET  /api/wallet/transactions - Transaction history (paginated)
//! - GET  /api/wallet/transactions/:id - Single transaction detail
//! - POST /api/wallet/transfer - Move money to another staff member
//! - GET  /api/wallet/search - Directory search for recipients
//!
//! Handlers stay thin: PIN verification and response shaping happen here,
//! every business rule lives in the transfer coordinator.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::{
    error::AppError,
    middleware::auth::{AuthContext, sha256_hex},
    models::{
        staff::DirectoryEntry,
        transaction::{TransactionView, TransferEnvelope, TransferRequest},
        wallet::BalanceResponse,
    },
    services::{directory, ledger, transfer},
    state::AppState,
};

/// History queries are capped at one page of 50 entries; older entries
/// are reachable through `offset`.
const PAGE_SIZE: i64 = 50;

/// Get the caller's wallet balance.
///
/// # Response (200)
///
/// ```json
/// { "balance": "7499.50", "currency": "PHP", "status": "active" }
/// ```
///
/// Accounts that predate eager wallet creation get their wallet upserted
/// here with the configured opening balance.
pub async fn get_balance(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<BalanceResponse>, AppError> {
    if let Some(wallet) = ledger::get_wallet(&state.pool, &auth.staff_id).await? {
        return Ok(Json(wallet.into()));
    }

    ledger::ensure_wallet(
        &state.pool,
        &auth.staff_id,
        state.config.initial_wallet_balance,
        &state.config.currency,
    )
    .await?;
    tracing::info!(employee_id = %auth.staff_id, "wallet created on first balance query");

    let wallet = ledger::get_wallet(&state.pool, &auth.staff_id)
        .await?
        .ok_or(AppError::WalletNotFound)?;

    Ok(Json(wallet.into()))
}

#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// List the caller's transaction history, most recent first.
///
/// # Response (200)
///
/// ```json
/// { "transactions": [ { "type": "sent", "amount": "2500.50", ... } ] }
/// ```
///
/// Only committed transactions are visible; an in-flight transfer never
/// appears here.
pub async fn list_transactions(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<Value>, AppError> {
    let limit = params.limit.unwrap_or(PAGE_SIZE).clamp(1, PAGE_SIZE);
    let offset = params.offset.unwrap_or(0).max(0);

    let rows = ledger::list_transactions_for(&state.pool, &auth.staff_id, limit, offset).await?;
    let transactions: Vec<TransactionView> = rows
        .into_iter()
        .map(|row| TransactionView::project(row, &auth.staff_id, &state.config.currency))
        .collect();

    Ok(Json(json!({ "transactions": transactions })))
}

/// Get one transaction the caller is a party to.
///
/// Returns 404 both for unknown ids and for transactions between other
/// people, so nothing leaks about the ledger at large.
pub async fn get_transaction(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(transaction_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let row = ledger::get_transaction_for(&state.pool, transaction_id, &auth.staff_id)
        .await?
        .ok_or(AppError::TransactionNotFound)?;

    let transaction = TransactionView::project(row, &auth.staff_id, &state.config.currency);

    Ok(Json(json!({ "transaction": transaction })))
}

/// Transfer money to another staff member.
///
/// # Request Body
///
/// ```json
/// { "recipient_id": "EMP-002", "amount": "2500.50", "pin": "123456" }
/// ```
///
/// # Response (200)
///
/// ```json
/// {
///   "success": true,
///   "message": "Transfer successful",
///   "transaction": {
///     "reference": "TXN1767225600000000042",
///     "type": "sent",
///     "amount": "2500.50",
///     "currency": "PHP",
///     "from": "Maria Santos",
///     "to": "Juan Dela Cruz",
///     "status": "completed",
///     "created_at": "2026-01-01T00:00:00Z"
///   }
/// }
/// ```
///
/// The optional PIN is verified here, before the transfer coordinator is
/// invoked; the coordinator itself never sees credentials.
pub async fn create_transfer(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(request): Json<TransferRequest>,
) -> Result<Json<TransferEnvelope>, AppError> {
    if let Some(ref pin) = request.pin {
        verify_pin(&state, &auth.staff_id, pin).await?;
    }

    let receipt = transfer::execute_transfer(
        &state.pool,
        &auth.staff_id,
        &request.recipient_id,
        request.amount,
        &state.config.currency,
    )
    .await?;

    Ok(Json(TransferEnvelope {
        success: true,
        message: "Transfer successful".to_string(),
        transaction: receipt.into(),
    }))
}

/// Check a presented PIN against the caller's stored digest.
///
/// A caller with no PIN configured cannot use PIN-gated transfers until
/// one is set.
async fn verify_pin(state: &AppState, staff_id: &str, pin: &str) -> Result<(), AppError> {
    let stored: Option<String> = sqlx::query_scalar("SELECT pin_hash FROM staff WHERE id = $1")
        .bind(staff_id)
        .fetch_optional(&state.pool)
        .await?
        .flatten();

    match stored {
        Some(pin_hash) if sha256_hex(pin) == pin_hash => Ok(()),
        _ => {
            tracing::warn!(employee_id = %staff_id, "transfer rejected: PIN verification failed");
            Err(AppError::InvalidCredentials)
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// Search the staff directory for transfer recipients.
///
/// Queries shorter than 2 characters return an empty result rather than
/// an error, matching incremental-search clients.
pub async fn search(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Value>, AppError> {
    let query = params.q.unwrap_or_default();
    let query = query.trim();

    if query.len() < 2 {
        return Ok(Json(json!({ "employees": Vec::<DirectoryEntry>::new() })));
    }

    let employees = directory::search_staff(&state.pool, query, &auth.staff_id).await?;

    Ok(Json(json!({ "employees": employees })))
}
