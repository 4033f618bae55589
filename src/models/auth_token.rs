//! Session token model and login request/response types.
//!
//! Tokens are opaque 256-bit random values. Only their SHA-256 digests are
//! stored; presenting a token means hashing it and looking the digest up.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::staff::StaffProfile;

/// Represents a session token record from the database.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AuthToken {
    pub id: Uuid,

    /// Hex SHA-256 digest of the raw token (64 characters)
    pub token_hash: String,

    pub staff_id: String,
    pub created_at: DateTime<Utc>,

    /// Tokens past this instant are rejected by the auth middleware
    pub expires_at: DateTime<Utc>,
}

/// Request body for `POST /api/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub employee_id: String,
    pub password: String,
}

/// Response body for `POST /api/login`.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Raw bearer token; shown exactly once
    pub token: String,
    pub user: StaffProfile,
}
