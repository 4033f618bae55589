//! Account directory lookups.
//!
//! The staff directory belongs to the identity subsystem; this module
//! only consumes its lookup contract: resolve a recipient identifier to
//! an account, and search for transfer counterparties.

use crate::{error::AppError, models::staff::DirectoryEntry};

/// A resolved transfer recipient.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Recipient {
    pub id: String,
    pub name: String,
}

/// Resolve a recipient identifier (employee id or phone) to an account.
///
/// Only active, non-admin staff are eligible transfer recipients;
/// anything else resolves to `None`.
pub async fn resolve_recipient<'e, E>(
    executor: E,
    identifier: &str,
) -> Result<Option<Recipient>, AppError>
where
    E: sqlx::PgExecutor<'e>,
{
    let recipient = sqlx::query_as::<_, Recipient>(
        r#"
        SELECT id, name FROM staff
        WHERE (id = $1 OR phone = $1)
          AND role <> 'admin'
          AND status = 'active'
        "#,
    )
    .bind(identifier)
    .fetch_optional(executor)
    .await?;

    Ok(recipient)
}

/// Search the directory by name or id substring.
///
/// Excludes the caller and admin accounts; capped at 10 results.
pub async fn search_staff(
    executor: &crate::db::DbPool,
    query: &str,
    caller_id: &str,
) -> Result<Vec<DirectoryEntry>, AppError> {
    let pattern = format!("%{query}%");

    let entries = sqlx::query_as::<_, DirectoryEntry>(
        r#"
        SELECT id, name, department, position FROM staff
        WHERE (name ILIKE $1 OR id ILIKE $1)
          AND id <> $2
          AND role <> 'admin'
          AND status = 'active'
        ORDER BY name
        LIMIT 10
        "#,
    )
    .bind(&pattern)
    .bind(caller_id)
    .fetch_all(executor)
    .await?;

    Ok(entries)
}
