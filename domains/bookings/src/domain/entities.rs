//! Domain entities for the Bookings domain
//!
//! A `Ticket` references exactly one `Flight` by foreign key. Flights are
//! read-only from the ticket side; tickets are created transiently by the
//! caller and receive their id from the database on save.

use chrono::{Duration, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use flightdesk_common::{Error, Result};

/// Maximum passenger document number length
pub const MAX_PASSENGER_NO_LEN: usize = 32;

/// Maximum passenger name length
pub const MAX_PASSENGER_NAME_LEN: usize = 128;

/// Maximum seat number length
pub const MAX_SEAT_NO_LEN: usize = 8;

/// Fractional digits the cost column stores
pub const COST_SCALE: u32 = 2;

/// Largest cost the cost column stores (`NUMERIC(8, 2)`)
pub const MAX_COST: Decimal = Decimal::from_parts(99_999_999, 0, 0, false, COST_SCALE);

/// Flight entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Flight {
    pub id: i64,
    pub flight_no: String,
    pub departure_date: NaiveDateTime,
    pub departure_airport_code: String,
    pub arrival_date: NaiveDateTime,
    pub arrival_airport_code: String,
    pub aircraft_id: i32,
    pub status: String,
}

impl Flight {
    /// Scheduled time in the air
    pub fn duration(&self) -> Duration {
        self.arrival_date - self.departure_date
    }
}

/// Ticket entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    /// Assigned by the database on save
    pub id: Option<i64>,
    pub passenger_no: String,
    pub passenger_name: String,
    pub flight_id: i64,
    /// Resolved on read; `None` before the ticket is read back or when the
    /// referenced flight row no longer exists
    pub flight: Option<Flight>,
    pub seat_no: String,
    pub cost: Decimal,
}

impl Ticket {
    /// Create a new, not yet persisted ticket
    pub fn new(
        passenger_no: impl Into<String>,
        passenger_name: impl Into<String>,
        flight_id: i64,
        seat_no: impl Into<String>,
        cost: Decimal,
    ) -> Result<Self> {
        let ticket = Ticket {
            id: None,
            passenger_no: passenger_no.into(),
            passenger_name: passenger_name.into(),
            flight_id,
            flight: None,
            seat_no: seat_no.into(),
            cost,
        };
        ticket.validate()?;
        Ok(ticket)
    }

    /// Check field constraints; run again before every write
    pub fn validate(&self) -> Result<()> {
        validate_text("Passenger number", &self.passenger_no, MAX_PASSENGER_NO_LEN)?;
        validate_text("Passenger name", &self.passenger_name, MAX_PASSENGER_NAME_LEN)?;
        validate_text("Seat number", &self.seat_no, MAX_SEAT_NO_LEN)?;

        if self.cost.is_sign_negative() && !self.cost.is_zero() {
            return Err(Error::Validation("Cost cannot be negative".to_string()));
        }
        if self.cost.normalize().scale() > COST_SCALE {
            return Err(Error::Validation(format!(
                "Cost cannot have more than {} decimal places",
                COST_SCALE
            )));
        }
        if self.cost > MAX_COST {
            return Err(Error::Validation(format!("Cost cannot exceed {}", MAX_COST)));
        }

        Ok(())
    }

    /// Whether the ticket has been persisted
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Point the ticket at another flight, dropping any resolved flight
    pub fn reassign_flight(&mut self, flight_id: i64) {
        if self.flight_id != flight_id {
            self.flight_id = flight_id;
            self.flight = None;
        }
    }
}

fn validate_text(field: &str, value: &str, max_len: usize) -> Result<()> {
    let len = value.trim().chars().count();
    if len == 0 || value.chars().count() > max_len {
        return Err(Error::Validation(format!(
            "{} must be 1-{} characters",
            field, max_len
        )));
    }
    Ok(())
}
