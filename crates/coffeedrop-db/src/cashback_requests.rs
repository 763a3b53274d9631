//! Append-only audit log for cashback calculations.

use sqlx::PgPool;

use crate::DbError;

/// Inserts one audit row for a cashback calculation.
///
/// The raw request payload is stored as JSONB; `cashback` is in pence.
/// Callers treat failure here as non-fatal: the computed amount is still
/// returned to the client, the failure is only logged.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn insert_cashback_request(
    pool: &PgPool,
    user_ip: &str,
    user_agent: &str,
    request: &serde_json::Value,
    cashback_pence: i64,
) -> Result<(), DbError> {
    sqlx::query(
        "INSERT INTO cashback_requests (user_ip, user_agent, request, cashback) \
         VALUES ($1, $2, $3, $4)",
    )
    .bind(user_ip)
    .bind(user_agent)
    .bind(request)
    .bind(cashback_pence)
    .execute(pool)
    .await?;

    Ok(())
}
