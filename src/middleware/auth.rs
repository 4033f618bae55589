//! Bearer token authentication middleware.
//!
//! This middleware intercepts every protected request to:
//! 1. Extract the bearer token from the Authorization header
//! 2. Hash it and look the digest up in the `auth_tokens` table
//! 3. Inject authentication context into the request
//! 4. Reject unauthorized requests with HTTP 401
//!
//! The same SHA-256 digest helper covers passwords and transfer PINs, so
//! no raw credential is ever compared or stored directly.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use sha2::{Digest, Sha256};

use crate::{error::AppError, state::AppState};

/// Authentication context attached to authenticated requests.
///
/// Inserted into the request's extension map; route handlers extract it
/// with `Extension<AuthContext>` to know who made the request.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Authenticated staff id, used as the transfer sender and as the
    /// filter for every wallet/history query
    pub staff_id: String,

    /// Display name of the caller
    pub name: String,

    /// Digest of the presented token, so logout can revoke exactly this
    /// session
    pub token_hash: String,
}

/// Hex SHA-256 digest of a credential or token.
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Bearer token authentication middleware function.
///
/// # Flow
///
/// 1. Extract `Authorization: Bearer <token>` header from request
/// 2. Hash the `<token>` using SHA-256
/// 3. Query for an unexpired token row whose staff account is active
/// 4. If found: inject `AuthContext` into request, call next handler
/// 5. If not found: return 401 Unauthorized error
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::InvalidToken)?;

    // Expected format: "Bearer <token>"
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AppError::InvalidToken)?;

    let token_hash = sha256_hex(token);

    // Expiry and account status are enforced here, not at issuance:
    // suspending a staff account kills its live sessions immediately.
    let (staff_id, name) = sqlx::query_as::<_, (String, String)>(
        r#"
        SELECT s.id, s.name
        FROM auth_tokens a
        JOIN staff s ON s.id = a.staff_id
        WHERE a.token_hash = $1
          AND a.expires_at > NOW()
          AND s.status = 'active'
        "#,
    )
    .bind(&token_hash)
    .fetch_optional(&state.pool)
    .await?
    .ok_or(AppError::InvalidToken)?;

    request.extensions_mut().insert(AuthContext {
        staff_id,
        name,
        token_hash,
    });

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_64_hex_chars() {
        let digest = sha256_hex("123456");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn digest_is_deterministic_and_input_sensitive() {
        assert_eq!(sha256_hex("secret"), sha256_hex("secret"));
        assert_ne!(sha256_hex("secret"), sha256_hex("secret "));
    }

    #[test]
    fn known_vector() {
        // SHA-256 of the empty string.
        assert_eq!(
            sha256_hex(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
