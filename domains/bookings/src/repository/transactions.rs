//! Transactional free functions for the Bookings domain
//!
//! [`in_transaction`] runs a caller-supplied sequence of statements on one
//! connection with auto-commit off. The `*_tx` functions are the statements
//! it is composed from.

use futures::future::BoxFuture;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, error};

use crate::domain::entities::Ticket;
use crate::repository::tickets::insert_ticket;
use flightdesk_common::{Error, Result};

/// Run `op` inside a single database transaction.
///
/// Commits when `op` succeeds. When `op` fails the transaction is rolled back
/// explicitly and the original error is returned; if that rollback fails as
/// well, both are reported through [`Error::RollbackFailed`]. The connection
/// goes back to the pool when the transaction handle drops, on every path.
pub async fn in_transaction<T, F>(pool: &PgPool, op: F) -> Result<T>
where
    T: Send,
    F: for<'c> FnOnce(&'c mut Transaction<'static, Postgres>) -> BoxFuture<'c, Result<T>> + Send,
{
    let mut transaction = pool.begin().await?;
    let outcome = op(&mut transaction).await;

    match outcome {
        Ok(value) => {
            // Explicit commit; dropping the handle uncommitted rolls back (RAII)
            transaction.commit().await?;
            debug!("Transaction committed");
            Ok(value)
        }
        Err(err) => match transaction.rollback().await {
            Ok(()) => {
                debug!(error = %err, "Transaction rolled back");
                Err(err)
            }
            Err(rollback) => {
                error!(error = %err, rollback_error = %rollback, "Rollback failed");
                Err(Error::RollbackFailed {
                    source: Box::new(err),
                    rollback,
                })
            }
        },
    }
}

/// Delete every ticket of a flight within an existing transaction.
pub async fn delete_tickets_by_flight_tx(
    transaction: &mut Transaction<'_, Postgres>,
    flight_id: i64,
) -> Result<u64> {
    let result = sqlx::query("DELETE FROM ticket WHERE flight_id = $1")
        .bind(flight_id)
        .execute(&mut **transaction)
        .await?;

    Ok(result.rows_affected())
}

/// Delete a flight within an existing transaction.
///
/// Fails with a foreign-key violation while tickets still reference it.
pub async fn delete_flight_tx(
    transaction: &mut Transaction<'_, Postgres>,
    flight_id: i64,
) -> Result<bool> {
    let result = sqlx::query("DELETE FROM flight WHERE id = $1")
        .bind(flight_id)
        .execute(&mut **transaction)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Insert a ticket within an existing transaction, returning its generated id.
pub async fn save_ticket_tx(
    transaction: &mut Transaction<'_, Postgres>,
    ticket: &Ticket,
) -> Result<i64> {
    if ticket.is_persisted() {
        return Err(Error::Validation("Ticket is already persisted".to_string()));
    }
    ticket.validate()?;

    insert_ticket(&mut **transaction, ticket).await
}
