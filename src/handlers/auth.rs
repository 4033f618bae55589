//! Login and logout endpoints.
//!
//! Token issuance lives here; token *checking* lives in the auth
//! middleware. Raw tokens are 256-bit random values returned to the
//! client once; only their SHA-256 digests are stored.

use axum::{Extension, Json, extract::State};
use rand::RngCore;
use serde_json::{Value, json};

use crate::{
    error::AppError,
    middleware::auth::{AuthContext, sha256_hex},
    models::{
        auth_token::{AuthToken, LoginRequest, LoginResponse},
        staff::{AccountStatus, Staff},
    },
    services::ledger,
    state::AppState,
};

/// Authenticate a staff member and issue a session token.
///
/// # Endpoint
///
/// `POST /api/login`
///
/// # Request Body
///
/// ```json
/// { "employee_id": "EMP-001", "password": "..." }
/// ```
///
/// # Behavior
///
/// - Admin accounts cannot log in to the wallet API.
/// - A suspended or closed account is rejected exactly like a bad
///   password, so account states don't leak.
/// - The caller's wallet is created eagerly here (atomic upsert) with the
///   configured opening balance, so transfers never race on wallet
///   creation for established accounts.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let staff = sqlx::query_as::<_, Staff>(
        r#"
        SELECT id, name, phone, department, position, role, status,
               password_hash, pin_hash, created_at
        FROM staff
        WHERE id = $1 AND role <> 'admin'
        "#,
    )
    .bind(&request.employee_id)
    .fetch_optional(&state.pool)
    .await?
    .ok_or_else(|| {
        tracing::warn!(employee_id = %request.employee_id, "login failed: unknown employee id");
        AppError::InvalidCredentials
    })?;

    if staff.status != AccountStatus::Active
        || sha256_hex(&request.password) != staff.password_hash
    {
        tracing::warn!(employee_id = %staff.id, "login failed: bad credentials");
        return Err(AppError::InvalidCredentials);
    }

    ledger::ensure_wallet(
        &state.pool,
        &staff.id,
        state.config.initial_wallet_balance,
        &state.config.currency,
    )
    .await?;

    // 256 random bits, hex encoded. The client gets the raw value; we
    // keep only the digest.
    let mut token_bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut token_bytes);
    let token = hex::encode(token_bytes);

    let issued = sqlx::query_as::<_, AuthToken>(
        r#"
        INSERT INTO auth_tokens (token_hash, staff_id, expires_at)
        VALUES ($1, $2, NOW() + INTERVAL '24 hours')
        RETURNING id, token_hash, staff_id, created_at, expires_at
        "#,
    )
    .bind(sha256_hex(&token))
    .bind(&staff.id)
    .fetch_one(&state.pool)
    .await?;

    tracing::info!(
        employee_id = %staff.id,
        expires_at = %issued.expires_at,
        "login successful"
    );

    Ok(Json(LoginResponse {
        token,
        user: staff.into(),
    }))
}

/// Revoke the presented session token.
///
/// # Endpoint
///
/// `POST /api/logout`
///
/// Idempotent: revoking an already-revoked token still returns success.
pub async fn logout(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<Value>, AppError> {
    sqlx::query("DELETE FROM auth_tokens WHERE token_hash = $1")
        .bind(&auth.token_hash)
        .execute(&state.pool)
        .await?;

    tracing::info!(employee_id = %auth.staff_id, "logged out");

    Ok(Json(json!({ "success": true })))
}
