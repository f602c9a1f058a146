//! Ticket search criteria

use serde::{Deserialize, Serialize};

use flightdesk_common::{Error, Result};

/// Optional match criteria plus mandatory page bounds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketFilter {
    pub limit: i64,
    pub offset: i64,
    /// Substring of the seat number
    pub seat_no: Option<String>,
    /// Exact passenger name
    pub passenger_name: Option<String>,
}

impl TicketFilter {
    pub fn new(limit: i64, offset: i64) -> Self {
        Self {
            limit,
            offset,
            seat_no: None,
            passenger_name: None,
        }
    }

    pub fn with_seat_no(mut self, seat_no: impl Into<String>) -> Self {
        self.seat_no = Some(seat_no.into());
        self
    }

    pub fn with_passenger_name(mut self, passenger_name: impl Into<String>) -> Self {
        self.passenger_name = Some(passenger_name.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.limit < 0 {
            return Err(Error::Validation("Limit cannot be negative".to_string()));
        }
        if self.offset < 0 {
            return Err(Error::Validation("Offset cannot be negative".to_string()));
        }
        Ok(())
    }
}
