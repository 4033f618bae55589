//! Ledger store - durable wallet and transaction operations.
//!
//! Everything that can mutate the ledger takes `&mut PgTx`, so the type
//! system guarantees it runs inside an open unit of work; the caller owns
//! commit and rollback. Read projections take any executor and only ever
//! observe committed state.
//!
//! # Atomicity Guarantees
//!
//! Row locks are taken with `SELECT ... FOR UPDATE` and held until the
//! unit of work ends. PostgreSQL ensures all-or-nothing execution; a
//! dropped `PgTx` rolls back.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    db::{DbPool, PgTx},
    error::AppError,
    models::{
        transaction::{NewTransaction, Transaction, TransactionWithNames},
        wallet::Wallet,
    },
    services::reference,
};

/// Fixed lock acquisition order for a wallet pair.
///
/// Every caller that locks two wallets goes through this, so two opposite
/// direction transfers between the same accounts can never deadlock on
/// each other's rows.
pub fn lock_order<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Make sure a wallet row exists for the account.
///
/// Atomic upsert: concurrent callers race on the unique `staff_id`
/// constraint and the losers simply do nothing, so no duplicate wallets
/// and no lost opening balance. Does not touch an existing row.
pub async fn ensure_wallet<'e, E>(
    executor: E,
    staff_id: &str,
    opening_balance: Decimal,
    currency: &str,
) -> Result<(), AppError>
where
    E: sqlx::PgExecutor<'e>,
{
    sqlx::query(
        r#"
        INSERT INTO wallets (staff_id, balance, currency)
        VALUES ($1, $2, $3)
        ON CONFLICT (staff_id) DO NOTHING
        "#,
    )
    .bind(staff_id)
    .bind(opening_balance)
    .bind(currency)
    .execute(executor)
    .await?;

    Ok(())
}

/// Read a wallet without locking it.
pub async fn get_wallet<'e, E>(executor: E, staff_id: &str) -> Result<Option<Wallet>, AppError>
where
    E: sqlx::PgExecutor<'e>,
{
    let wallet = sqlx::query_as::<_, Wallet>(
        "SELECT id, staff_id, balance, currency, status, created_at, updated_at
         FROM wallets WHERE staff_id = $1",
    )
    .bind(staff_id)
    .fetch_optional(executor)
    .await?;

    Ok(wallet)
}

/// Lock one wallet row for the rest of the unit of work.
///
/// Blocks until any conflicting in-flight transfer commits or rolls back,
/// then observes its committed balance.
pub async fn lock_wallet(tx: &mut PgTx<'_>, staff_id: &str) -> Result<Option<Wallet>, AppError> {
    let wallet = sqlx::query_as::<_, Wallet>(
        "SELECT id, staff_id, balance, currency, status, created_at, updated_at
         FROM wallets WHERE staff_id = $1 FOR UPDATE",
    )
    .bind(staff_id)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(wallet)
}

/// Lock both participant wallets, always in ascending staff id order.
///
/// Returns the rows keyed back to the caller's argument order.
pub async fn lock_wallet_pair(
    tx: &mut PgTx<'_>,
    first: &str,
    second: &str,
) -> Result<(Option<Wallet>, Option<Wallet>), AppError> {
    let (lo, hi) = lock_order(first, second);
    let lo_wallet = lock_wallet(tx, lo).await?;
    let hi_wallet = lock_wallet(tx, hi).await?;

    if lo == first {
        Ok((lo_wallet, hi_wallet))
    } else {
        Ok((hi_wallet, lo_wallet))
    }
}

/// Apply a signed delta to a wallet balance.
///
/// Only callable inside an open unit of work; the caller must already
/// hold the row lock and have validated the resulting balance.
pub async fn adjust_balance(
    tx: &mut PgTx<'_>,
    staff_id: &str,
    delta: Decimal,
) -> Result<(), AppError> {
    let updated = sqlx::query(
        "UPDATE wallets SET balance = balance + $1, updated_at = NOW() WHERE staff_id = $2",
    )
    .bind(delta)
    .bind(staff_id)
    .execute(&mut **tx)
    .await?
    .rows_affected();

    if updated == 0 {
        return Err(AppError::WalletNotFound);
    }

    Ok(())
}

/// Append a transaction to the ledger.
///
/// Generates the reference here and inserts with
/// `ON CONFLICT (reference) DO NOTHING`, so a collision does not abort the
/// surrounding PostgreSQL transaction. One bounded retry with a fresh
/// reference; a second collision is treated as a storage fault.
pub async fn append_transaction(
    tx: &mut PgTx<'_>,
    record: &NewTransaction,
) -> Result<Transaction, AppError> {
    for attempt in 0..2 {
        let candidate = reference::next();

        let inserted = sqlx::query_as::<_, Transaction>(
            r#"
            INSERT INTO transactions (from_staff_id, to_staff_id, amount, kind, status, description, reference)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (reference) DO NOTHING
            RETURNING id, from_staff_id, to_staff_id, amount, kind, status, description, reference, created_at
            "#,
        )
        .bind(&record.from_staff_id)
        .bind(&record.to_staff_id)
        .bind(record.amount)
        .bind(record.kind)
        .bind(record.status)
        .bind(&record.description)
        .bind(&candidate)
        .fetch_optional(&mut **tx)
        .await?;

        match inserted {
            Some(transaction) => return Ok(transaction),
            None => {
                tracing::warn!(reference = %candidate, attempt, "transaction reference collided");
            }
        }
    }

    Err(AppError::DuplicateReference)
}

/// Read one party's transaction history, most recent first.
///
/// `limit` is expected to be pre-clamped by the caller (page cap 50).
pub async fn list_transactions_for(
    pool: &DbPool,
    staff_id: &str,
    limit: i64,
    offset: i64,
) -> Result<Vec<TransactionWithNames>, AppError> {
    let rows = sqlx::query_as::<_, TransactionWithNames>(
        r#"
        SELECT
            t.id, t.from_staff_id, t.to_staff_id, t.amount, t.kind, t.status,
            t.description, t.reference, t.created_at,
            s1.name AS from_name,
            s2.name AS to_name
        FROM transactions t
        LEFT JOIN staff s1 ON t.from_staff_id = s1.id
        LEFT JOIN staff s2 ON t.to_staff_id = s2.id
        WHERE t.from_staff_id = $1 OR t.to_staff_id = $1
        ORDER BY t.created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(staff_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Fetch one transaction, restricted to a caller who is a party to it.
///
/// Authorization lives in the query: a transaction the caller is not
/// involved in is indistinguishable from one that does not exist.
pub async fn get_transaction_for(
    pool: &DbPool,
    transaction_id: Uuid,
    staff_id: &str,
) -> Result<Option<TransactionWithNames>, AppError> {
    let row = sqlx::query_as::<_, TransactionWithNames>(
        r#"
        SELECT
            t.id, t.from_staff_id, t.to_staff_id, t.amount, t.kind, t.status,
            t.description, t.reference, t.created_at,
            s1.name AS from_name,
            s2.name AS to_name
        FROM transactions t
        LEFT JOIN staff s1 ON t.from_staff_id = s1.id
        LEFT JOIN staff s2 ON t.to_staff_id = s2.id
        WHERE t.id = $1 AND (t.from_staff_id = $2 OR t.to_staff_id = $2)
        "#,
    )
    .bind(transaction_id)
    .bind(staff_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_order_is_ascending() {
        assert_eq!(lock_order("EMP-001", "EMP-002"), ("EMP-001", "EMP-002"));
        assert_eq!(lock_order("EMP-002", "EMP-001"), ("EMP-001", "EMP-002"));
    }

    #[test]
    fn lock_order_is_symmetric() {
        // Opposite-direction transfers must agree on the order.
        let forward = lock_order("EMP-007", "EMP-003");
        let backward = lock_order("EMP-003", "EMP-007");
        assert_eq!(forward, backward);
    }

    #[test]
    fn lock_order_handles_equal_ids() {
        assert_eq!(lock_order("EMP-001", "EMP-001"), ("EMP-001", "EMP-001"));
    }
}
