//! Ticket repository
//!
//! Every operation checks out exactly one pooled connection and holds it
//! until the operation returns; flight lookups during row mapping reuse it.

use sqlx::{PgConnection, PgPool};

use crate::domain::entities::Ticket;
use crate::domain::filter::TicketFilter;
use crate::repository::mapper::{map_ticket, map_tickets, TicketRow};
use crate::repository::query::{bind_params, build_filter_clause};
use flightdesk_common::{Error, Result};

/// All columns in the ticket table, used for SELECT clauses.
const TICKET_COLUMNS: &str = "id, passenger_no, passenger_name, flight_id, seat_no, cost";

/// Insert a ticket on `conn` and return the id the database assigned.
pub(crate) async fn insert_ticket(conn: &mut PgConnection, ticket: &Ticket) -> Result<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO ticket (passenger_no, passenger_name, flight_id, seat_no, cost)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(&ticket.passenger_no)
    .bind(&ticket.passenger_name)
    .bind(ticket.flight_id)
    .bind(&ticket.seat_no)
    .bind(ticket.cost)
    .fetch_optional(&mut *conn)
    .await?;

    id.ok_or(Error::MissingGeneratedKey { table: "ticket" })
}

#[derive(Clone)]
pub struct TicketRepository {
    pool: PgPool,
}

impl TicketRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a new ticket and return it carrying its generated id
    pub async fn save(&self, mut ticket: Ticket) -> Result<Ticket> {
        if ticket.is_persisted() {
            return Err(Error::Validation("Ticket is already persisted".to_string()));
        }
        ticket.validate()?;

        let mut conn = self.pool.acquire().await?;
        let id = insert_ticket(&mut conn, &ticket).await?;
        ticket.id = Some(id);

        tracing::debug!(ticket_id = id, flight_id = ticket.flight_id, "Ticket saved");
        Ok(ticket)
    }

    /// Find ticket by ID, with its flight resolved
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Ticket>> {
        let query = format!("SELECT {TICKET_COLUMNS} FROM ticket WHERE id = $1");

        let mut conn = self.pool.acquire().await?;
        let row = sqlx::query_as::<_, TicketRow>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        match row {
            Some(row) => Ok(Some(map_ticket(&mut conn, row).await?)),
            None => Ok(None),
        }
    }

    /// Find tickets matching `filter`, one page at a time
    pub async fn find_all(&self, filter: &TicketFilter) -> Result<Vec<Ticket>> {
        filter.validate()?;

        let clause = build_filter_clause(filter);
        let query = format!("SELECT {TICKET_COLUMNS} FROM ticket{}", clause.sql);
        tracing::debug!(sql = %query, params = clause.params.len(), "Executing ticket search");

        let mut conn = self.pool.acquire().await?;
        let rows = bind_params(sqlx::query_as::<_, TicketRow>(&query), clause.params)
            .fetch_all(&mut *conn)
            .await?;

        map_tickets(&mut conn, rows).await
    }

    /// List every ticket, ordered by id
    pub async fn list(&self) -> Result<Vec<Ticket>> {
        let query = format!("SELECT {TICKET_COLUMNS} FROM ticket ORDER BY id");

        let mut conn = self.pool.acquire().await?;
        let rows = sqlx::query_as::<_, TicketRow>(&query)
            .fetch_all(&mut *conn)
            .await?;

        map_tickets(&mut conn, rows).await
    }

    /// Replace every mutable column of a persisted ticket.
    ///
    /// Returns the number of rows affected; zero means no ticket has that id.
    pub async fn update(&self, ticket: &Ticket) -> Result<u64> {
        let id = ticket
            .id
            .ok_or_else(|| Error::Validation("Cannot update a ticket without an id".to_string()))?;
        ticket.validate()?;

        let result = sqlx::query(
            r#"
            UPDATE ticket
            SET passenger_no = $1,
                passenger_name = $2,
                flight_id = $3,
                seat_no = $4,
                cost = $5
            WHERE id = $6
            "#,
        )
        .bind(&ticket.passenger_no)
        .bind(&ticket.passenger_name)
        .bind(ticket.flight_id)
        .bind(&ticket.seat_no)
        .bind(ticket.cost)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Delete a ticket; `true` if exactly one row was removed
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM ticket WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() == 1)
    }
}
