//! Bookings domain layer: entities and search criteria

pub mod entities;
pub mod filter;
