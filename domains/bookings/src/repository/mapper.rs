//! Row → entity mapping for tickets
//!
//! The flight behind each ticket is looked up on the connection the ticket
//! row was read from. Callers pass that connection in; mapping never checks
//! out a second one from the pool.

use rust_decimal::Decimal;
use sqlx::PgConnection;

use crate::domain::entities::{Flight, Ticket};
use crate::repository::flights::find_flight_on;
use flightdesk_common::Result;

/// Direct columns of the ticket table
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct TicketRow {
    pub id: i64,
    pub passenger_no: String,
    pub passenger_name: String,
    pub flight_id: i64,
    pub seat_no: String,
    pub cost: Decimal,
}

impl TicketRow {
    pub fn into_ticket(self, flight: Option<Flight>) -> Ticket {
        Ticket {
            id: Some(self.id),
            passenger_no: self.passenger_no,
            passenger_name: self.passenger_name,
            flight_id: self.flight_id,
            flight,
            seat_no: self.seat_no,
            cost: self.cost,
        }
    }
}

/// Build a ticket and resolve its flight on `conn`
pub(crate) async fn map_ticket(conn: &mut PgConnection, row: TicketRow) -> Result<Ticket> {
    let flight = find_flight_on(conn, row.flight_id).await?;
    if flight.is_none() {
        tracing::warn!(
            ticket_id = row.id,
            flight_id = row.flight_id,
            "Ticket references a missing flight"
        );
    }
    Ok(row.into_ticket(flight))
}

/// Map already-fetched rows in order
pub(crate) async fn map_tickets(conn: &mut PgConnection, rows: Vec<TicketRow>) -> Result<Vec<Ticket>> {
    let mut tickets = Vec::with_capacity(rows.len());
    for row in rows {
        tickets.push(map_ticket(&mut *conn, row).await?);
    }
    Ok(tickets)
}
