//! Flight repository

use chrono::NaiveDateTime;
use sqlx::{PgConnection, PgPool};

use crate::domain::entities::Flight;
use crate::repository::transactions::{delete_flight_tx, delete_tickets_by_flight_tx, in_transaction};
use flightdesk_common::{Error, Result};

/// All columns in the flight table, used for SELECT clauses.
const FLIGHT_COLUMNS: &str = "\
    id, flight_no, \
    departure_date, departure_airport_code, \
    arrival_date, arrival_airport_code, \
    aircraft_id, status";

/// Outcome of [`FlightRepository::delete_with_tickets`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CascadeDeletion {
    pub tickets_deleted: u64,
    pub flight_deleted: bool,
}

/// Look up a flight on an already checked-out connection
pub async fn find_flight_on(conn: &mut PgConnection, id: i64) -> Result<Option<Flight>> {
    let query = format!("SELECT {FLIGHT_COLUMNS} FROM flight WHERE id = $1");
    let flight = sqlx::query_as::<_, Flight>(&query)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(flight)
}

#[derive(Clone)]
pub struct FlightRepository {
    pool: PgPool,
}

impl FlightRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find flight by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Flight>> {
        let mut conn = self.pool.acquire().await?;
        find_flight_on(&mut conn, id).await
    }

    /// IDs of flights departing within `[from, to]`
    pub async fn find_ids_departing_between(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<i64>> {
        let ids = sqlx::query_scalar::<_, i64>(
            "SELECT id FROM flight WHERE departure_date BETWEEN $1 AND $2 ORDER BY id",
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    /// Delete a flight together with its tickets, atomically.
    ///
    /// Tickets go first so the foreign key is never violated mid-transaction.
    pub async fn delete_with_tickets(&self, flight_id: i64) -> Result<CascadeDeletion> {
        let deletion = in_transaction(&self.pool, |tx| {
            Box::pin(async move {
                let tickets_deleted = delete_tickets_by_flight_tx(tx, flight_id).await?;
                let flight_deleted = delete_flight_tx(tx, flight_id).await?;
                Ok::<_, Error>(CascadeDeletion {
                    tickets_deleted,
                    flight_deleted,
                })
            })
        })
        .await?;

        tracing::info!(
            flight_id,
            tickets_deleted = deletion.tickets_deleted,
            flight_deleted = deletion.flight_deleted,
            "Flight deleted with its tickets"
        );

        Ok(deletion)
    }
}
