//! Wallet data model and balance response type.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

/// Lifecycle status of a wallet.
///
/// Frozen and closed wallets still answer balance and history reads but
/// reject every mutation, on either side of a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, sqlx::Type)]
#[sqlx(type_name = "wallet_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum WalletStatus {
    Active,
    Frozen,
    Closed,
}

/// Represents a wallet record from the database.
///
/// # Database Table
///
/// Maps to the `wallets` table, exactly one row per staff account
/// (unique constraint on `staff_id`). The balance is a `NUMERIC(12,2)`
/// decoded as `rust_decimal::Decimal`, never a float.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Wallet {
    pub id: Uuid,

    /// Owning staff account (unique — 1:1 with `staff`)
    pub staff_id: String,

    /// Current balance. Non-negative at every committed state; the
    /// transfer coordinator enforces this before mutating.
    pub balance: Decimal,

    /// ISO 4217 currency code
    pub currency: String,

    pub status: WalletStatus,

    pub created_at: DateTime<Utc>,

    /// Bumped on every balance mutation
    pub updated_at: DateTime<Utc>,
}

/// Response body for `GET /api/wallet/balance`.
#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    pub balance: Decimal,
    pub currency: String,
    pub status: WalletStatus,
}

impl From<Wallet> for BalanceResponse {
    fn from(wallet: Wallet) -> Self {
        Self {
            balance: wallet.balance,
            currency: wallet.currency,
            status: wallet.status,
        }
    }
}
