//! Transfer coordinator - the core business logic for moving money.
//!
//! One call = one unit of work. The coordinator resolves the recipient,
//! locks both participant wallets in a fixed global order, validates,
//! mutates both balances, appends the ledger entry and commits. Any
//! failure before the commit rolls the whole thing back: no partial
//! balance change, no orphan transaction row.
//!
//! # Process
//!
//! 1. Validate the amount (positive, ledger precision) — no storage touched
//! 2. Begin the database transaction
//! 3. Resolve the recipient through the account directory
//! 4. Reject self-transfers
//! 5. Ensure the recipient wallet exists (atomic upsert, zero balance)
//! 6. Lock both wallets, ascending staff id order
//! 7. Validate wallet statuses and the sender balance
//! 8. Debit sender, credit recipient
//! 9. Append the ledger entry with a fresh unique reference
//! 10. Commit
//!
//! Both wallets are locked — not just the sender's — because an account
//! can be a sender in one in-flight transfer and a recipient in another;
//! the fixed order keeps opposite-direction transfers deadlock-free.

use rust_decimal::Decimal;

use crate::{
    db::DbPool,
    error::AppError,
    models::{
        transaction::{NewTransaction, TransactionKind, TransactionStatus, TransferReceipt},
        wallet::WalletStatus,
    },
    services::{directory, ledger},
};

/// Largest amount that fits the ledger's NUMERIC(12,2) column.
fn max_amount() -> Decimal {
    Decimal::new(999_999_999_999, 2)
}

/// Validate a transfer amount against the ledger's currency precision.
///
/// Runs before any storage access; a bad amount never opens a unit of
/// work.
pub fn validate_amount(amount: Decimal) -> Result<(), AppError> {
    if amount <= Decimal::ZERO {
        return Err(AppError::InvalidRequest(
            "Amount must be greater than 0".to_string(),
        ));
    }
    if amount.normalize().scale() > 2 {
        return Err(AppError::InvalidRequest(
            "Amount precision is limited to 2 decimal places".to_string(),
        ));
    }
    if amount > max_amount() {
        return Err(AppError::InvalidRequest(
            "Amount exceeds the maximum transferable value".to_string(),
        ));
    }

    Ok(())
}

/// Execute a wallet-to-wallet transfer as one atomic unit of work.
///
/// # Arguments
///
/// * `pool` - Database connection pool
/// * `sender_id` - Authenticated sender (already verified upstream)
/// * `recipient_identifier` - Employee id or phone of the recipient
/// * `amount` - Positive, currency-precision amount
/// * `currency` - Ledger currency code, used for new wallets and the receipt
///
/// # Errors
///
/// Every business-rule error leaves both balances untouched. A `Database`
/// error means the unit of work rolled back; no funds moved either way.
pub async fn execute_transfer(
    pool: &DbPool,
    sender_id: &str,
    recipient_identifier: &str,
    amount: Decimal,
    currency: &str,
) -> Result<TransferReceipt, AppError> {
    validate_amount(amount)?;

    let recipient_identifier = recipient_identifier.trim();
    if recipient_identifier.is_empty() {
        return Err(AppError::InvalidRequest(
            "Recipient identifier is required".to_string(),
        ));
    }

    let mut tx = pool.begin().await?;

    // Resolve inside the unit of work so the eligibility check and the
    // transfer see the same committed directory state.
    let recipient = directory::resolve_recipient(&mut *tx, recipient_identifier)
        .await?
        .ok_or(AppError::RecipientNotFound)?;

    if recipient.id == sender_id {
        return Err(AppError::SelfTransferNotAllowed);
    }

    // First transfer to a brand-new account: the upsert is race-free, so
    // two concurrent first-transfers cannot produce duplicate wallets.
    ledger::ensure_wallet(&mut *tx, &recipient.id, Decimal::ZERO, currency).await?;

    let (sender_wallet, recipient_wallet) =
        ledger::lock_wallet_pair(&mut tx, sender_id, &recipient.id).await?;

    let sender_wallet = sender_wallet.ok_or(AppError::WalletNotFound)?;
    let recipient_wallet = recipient_wallet.ok_or(AppError::WalletNotFound)?;

    // A credit is a mutation too: frozen and closed wallets reject both
    // sides of a transfer.
    if sender_wallet.status != WalletStatus::Active
        || recipient_wallet.status != WalletStatus::Active
    {
        tx.rollback().await?;
        return Err(AppError::WalletNotActive);
    }

    if sender_wallet.balance < amount {
        tx.rollback().await?;
        tracing::info!(sender = %sender_id, "transfer rejected: insufficient balance");
        return Err(AppError::InsufficientBalance);
    }

    ledger::adjust_balance(&mut tx, sender_id, -amount).await?;
    ledger::adjust_balance(&mut tx, &recipient.id, amount).await?;

    let sender_name: String = sqlx::query_scalar("SELECT name FROM staff WHERE id = $1")
        .bind(sender_id)
        .fetch_optional(&mut *tx)
        .await?
        .unwrap_or_else(|| sender_id.to_string());

    let record = NewTransaction {
        from_staff_id: Some(sender_id.to_string()),
        to_staff_id: Some(recipient.id.clone()),
        amount,
        kind: TransactionKind::Transfer,
        status: TransactionStatus::Completed,
        description: Some(format!("Transfer to {}", recipient.name)),
    };
    let transaction = ledger::append_transaction(&mut tx, &record).await?;

    // Everything or nothing. A failure here (or anywhere above) means the
    // dropped transaction rolls back and no reader ever sees a half
    // applied transfer.
    tx.commit().await?;

    tracing::info!(
        reference = %transaction.reference,
        from = %sender_id,
        to = %recipient.id,
        %amount,
        "transfer completed"
    );

    Ok(TransferReceipt {
        reference: transaction.reference,
        amount: transaction.amount,
        currency: currency.to_string(),
        from: sender_name,
        to: recipient.name,
        status: transaction.status,
        created_at: transaction.created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn rejects_zero_and_negative_amounts() {
        assert!(validate_amount(Decimal::ZERO).is_err());
        assert!(validate_amount(dec("-0.01")).is_err());
        assert!(validate_amount(dec("-2500.50")).is_err());
    }

    #[test]
    fn rejects_sub_centavo_precision() {
        assert!(validate_amount(dec("10.555")).is_err());
        assert!(validate_amount(dec("0.001")).is_err());
    }

    #[test]
    fn accepts_currency_precision_amounts() {
        assert!(validate_amount(dec("2500.50")).is_ok());
        assert!(validate_amount(dec("0.01")).is_ok());
        assert!(validate_amount(dec("10000")).is_ok());
        // Trailing zeros beyond 2 places are still exactly representable.
        assert!(validate_amount(dec("5.1000")).is_ok());
    }

    #[test]
    fn rejects_amounts_beyond_column_range() {
        assert!(validate_amount(dec("9999999999.99")).is_ok());
        assert!(validate_amount(dec("10000000000.00")).is_err());
    }
}
