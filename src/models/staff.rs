//! Staff directory models.
//!
//! Staff records are owned by the identity subsystem; the wallet service
//! reads identity, role and status, and verifies credential digests. It
//! never writes to this table.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Lifecycle status of a staff account.
///
/// Suspended and closed accounts keep their rows (and wallets) but cannot
/// log in or take part in transfers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, sqlx::Type)]
#[sqlx(type_name = "account_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Active,
    Suspended,
    Closed,
}

/// Represents a staff record from the database.
///
/// # Database Table
///
/// Maps to the `staff` table. `password_hash` and `pin_hash` are hex
/// SHA-256 digests; raw credentials never touch storage.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Staff {
    /// Employee identifier, e.g. "EMP-001". Immutable.
    pub id: String,

    /// Display name shown in transaction history
    pub name: String,

    /// Optional phone number, usable as an alternate recipient identifier
    pub phone: Option<String>,

    pub department: Option<String>,
    pub position: Option<String>,

    /// "employee" or "admin". Admin accounts are restricted: they cannot
    /// log in to the wallet API and never appear as transfer parties.
    pub role: String,

    pub status: AccountStatus,

    /// Hex SHA-256 digest of the login password
    pub password_hash: String,

    /// Hex SHA-256 digest of the transfer PIN, if one is set
    pub pin_hash: Option<String>,

    pub created_at: DateTime<Utc>,
}

/// Public profile returned by the login endpoint.
///
/// Strips credential digests and internal fields.
#[derive(Debug, Serialize)]
pub struct StaffProfile {
    pub id: String,
    pub name: String,
    pub department: Option<String>,
    pub position: Option<String>,
}

impl From<Staff> for StaffProfile {
    fn from(staff: Staff) -> Self {
        Self {
            id: staff.id,
            name: staff.name,
            department: staff.department,
            position: staff.position,
        }
    }
}

/// One row of a directory search result.
#[derive(Debug, sqlx::FromRow, Serialize)]
pub struct DirectoryEntry {
    pub id: String,
    pub name: String,
    pub department: Option<String>,
    pub position: Option<String>,
}
