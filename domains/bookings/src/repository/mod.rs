//! Repository implementations for the Bookings domain

pub mod flights;
mod mapper;
pub mod query;
pub mod tickets;
pub mod transactions;

use sqlx::{PgPool, Postgres, Transaction};

pub use flights::{find_flight_on, CascadeDeletion, FlightRepository};
pub use query::{build_filter_clause, FilterClause, FilterParam};
pub use tickets::TicketRepository;
pub use transactions::{delete_flight_tx, delete_tickets_by_flight_tx, in_transaction, save_ticket_tx};

/// Combined repository access for the Bookings domain
#[derive(Clone)]
pub struct BookingsRepositories {
    pool: PgPool,
    pub tickets: TicketRepository,
    pub flights: FlightRepository,
}

impl BookingsRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            tickets: TicketRepository::new(pool.clone()),
            flights: FlightRepository::new(pool.clone()),
            pool,
        }
    }

    /// Begin a new database transaction.
    pub async fn begin(&self) -> std::result::Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
