//! Transaction data models and API request/response types.
//!
//! This module defines:
//! - `Transaction`: immutable ledger entry, as stored
//! - `NewTransaction`: what the coordinator hands the ledger for append
//! - `TransactionView`: a row projected for one viewer (sent/received)
//! - Request/response types for the transfer endpoint

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of ledger movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, sqlx::Type)]
#[sqlx(type_name = "transaction_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Transfer,
    Topup,
    Payment,
    Refund,
    Cashout,
}

/// Settlement status of a ledger entry.
///
/// Transfers commit as `Completed` directly; the remaining variants exist
/// in the schema for other movement kinds and a future async settlement
/// path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, sqlx::Type)]
#[sqlx(type_name = "transaction_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
    Cancelled,
}

/// Represents a transaction record from the database.
///
/// Immutable once committed. A NULL party means an external/system origin
/// or sink (e.g. a payroll top-up has no `from_staff_id`).
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Transaction {
    pub id: Uuid,
    pub from_staff_id: Option<String>,
    pub to_staff_id: Option<String>,

    /// Always positive (CHECK constraint backs this up)
    pub amount: Decimal,

    pub kind: TransactionKind,
    pub status: TransactionStatus,
    pub description: Option<String>,

    /// Externally visible identifier, globally unique, assigned exactly
    /// once at creation
    pub reference: String,

    pub created_at: DateTime<Utc>,
}

/// A ledger entry the coordinator asks the ledger store to append.
///
/// The reference is generated inside the append, not here, so a bounded
/// collision retry can swap it without the caller noticing.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub from_staff_id: Option<String>,
    pub to_staff_id: Option<String>,
    pub amount: Decimal,
    pub kind: TransactionKind,
    pub status: TransactionStatus,
    pub description: Option<String>,
}

/// A transaction row joined with both parties' display names.
///
/// What the history queries return; still viewer-neutral.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TransactionWithNames {
    pub id: Uuid,
    pub from_staff_id: Option<String>,
    pub to_staff_id: Option<String>,
    pub amount: Decimal,
    pub kind: TransactionKind,
    pub status: TransactionStatus,
    pub description: Option<String>,
    pub reference: String,
    pub created_at: DateTime<Utc>,
    pub from_name: Option<String>,
    pub to_name: Option<String>,
}

/// A transaction as one party sees it.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": "770e8400-e29b-41d4-a716-446655440002",
///   "type": "received",
///   "amount": "2500.50",
///   "currency": "PHP",
///   "from": "Maria Santos",
///   "to": "Juan Dela Cruz",
///   "description": "Transfer to Juan Dela Cruz",
///   "status": "completed",
///   "reference": "TXN1767225600000000042",
///   "created_at": "2026-01-01T00:00:00Z"
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct TransactionView {
    pub id: Uuid,

    /// "sent" if the viewer is the sender, "received" otherwise
    #[serde(rename = "type")]
    pub direction: &'static str,

    pub amount: Decimal,
    pub currency: String,
    pub from: String,
    pub to: String,
    pub description: String,
    pub status: TransactionStatus,
    pub reference: String,
    pub created_at: DateTime<Utc>,
}

impl TransactionView {
    /// Project a joined row for a specific viewer.
    ///
    /// Missing parties render as "System"; a missing description falls
    /// back to a direction-appropriate one.
    pub fn project(row: TransactionWithNames, viewer_id: &str, currency: &str) -> Self {
        let sent = row.from_staff_id.as_deref() == Some(viewer_id);
        let from = row.from_name.unwrap_or_else(|| "System".to_string());
        let to = row.to_name.unwrap_or_else(|| "System".to_string());
        let description = row.description.unwrap_or_else(|| {
            if sent {
                format!("Sent to {to}")
            } else {
                format!("Received from {from}")
            }
        });

        Self {
            id: row.id,
            direction: if sent { "sent" } else { "received" },
            amount: row.amount,
            currency: currency.to_string(),
            from,
            to,
            description,
            status: row.status,
            reference: row.reference,
            created_at: row.created_at,
        }
    }
}

/// Request body for `POST /api/wallet/transfer`.
///
/// # JSON Example
///
/// ```json
/// {
///   "recipient_id": "EMP-002",
///   "amount": "2500.50",
///   "pin": "123456"
/// }
/// ```
///
/// The recipient may be identified by employee id or phone number. The
/// PIN is optional; when present it is verified before the transfer
/// coordinator runs.
#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    pub recipient_id: String,
    pub amount: Decimal,
    pub pin: Option<String>,
}

/// What a committed transfer looks like to its sender.
///
/// Produced by the transfer coordinator after commit; everything here is
/// durable state.
#[derive(Debug, Clone)]
pub struct TransferReceipt {
    pub reference: String,
    pub amount: Decimal,
    pub currency: String,
    pub from: String,
    pub to: String,
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
}

/// Transaction payload inside the transfer response.
#[derive(Debug, Serialize)]
pub struct TransferResponse {
    pub reference: String,

    /// Always "sent" — the response goes to the sender
    #[serde(rename = "type")]
    pub direction: &'static str,

    pub amount: Decimal,
    pub currency: String,
    pub from: String,
    pub to: String,
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
}

impl From<TransferReceipt> for TransferResponse {
    fn from(receipt: TransferReceipt) -> Self {
        Self {
            reference: receipt.reference,
            direction: "sent",
            amount: receipt.amount,
            currency: receipt.currency,
            from: receipt.from,
            to: receipt.to,
            status: receipt.status,
            created_at: receipt.created_at,
        }
    }
}

/// Full response body for `POST /api/wallet/transfer`.
#[derive(Debug, Serialize)]
pub struct TransferEnvelope {
    pub success: bool,
    pub message: String,
    pub transaction: TransferResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(from: Option<&str>, to: Option<&str>) -> TransactionWithNames {
        TransactionWithNames {
            id: Uuid::new_v4(),
            from_staff_id: from.map(String::from),
            to_staff_id: to.map(String::from),
            amount: Decimal::new(2500_50, 2),
            kind: TransactionKind::Transfer,
            status: TransactionStatus::Completed,
            description: None,
            reference: "TXN1767225600000000042".to_string(),
            created_at: Utc::now(),
            from_name: from.map(|_| "Maria Santos".to_string()),
            to_name: to.map(|_| "Juan Dela Cruz".to_string()),
        }
    }

    #[test]
    fn sender_sees_sent_with_fallback_description() {
        let view = TransactionView::project(row(Some("EMP-001"), Some("EMP-002")), "EMP-001", "PHP");
        assert_eq!(view.direction, "sent");
        assert_eq!(view.from, "Maria Santos");
        assert_eq!(view.to, "Juan Dela Cruz");
        assert_eq!(view.description, "Sent to Juan Dela Cruz");
    }

    #[test]
    fn recipient_sees_received() {
        let view = TransactionView::project(row(Some("EMP-001"), Some("EMP-002")), "EMP-002", "PHP");
        assert_eq!(view.direction, "received");
        assert_eq!(view.description, "Received from Maria Santos");
    }

    #[test]
    fn system_origin_renders_as_system() {
        let view = TransactionView::project(row(None, Some("EMP-002")), "EMP-002", "PHP");
        assert_eq!(view.direction, "received");
        assert_eq!(view.from, "System");
        assert_eq!(view.description, "Received from System");
    }

    #[test]
    fn explicit_description_is_kept() {
        let mut r = row(Some("EMP-001"), Some("EMP-002"));
        r.description = Some("Lunch money".to_string());
        let view = TransactionView::project(r, "EMP-001", "PHP");
        assert_eq!(view.description, "Lunch money");
    }
}
