//! Bookings domain: tickets, flights, filtered ticket search, transactional deletes

pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{Flight, Ticket};
pub use domain::filter::TicketFilter;

// Re-export repository types
pub use repository::{
    build_filter_clause, delete_flight_tx, delete_tickets_by_flight_tx, find_flight_on,
    in_transaction, save_ticket_tx, BookingsRepositories, CascadeDeletion, FilterClause,
    FilterParam, FlightRepository, TicketRepository,
};
