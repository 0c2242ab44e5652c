//! Booking entities: appointments between customers and technicians.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::UserId;

/// Maximum length accepted for booking notes.
const MAX_NOTES_CHARS: usize = 500;

/// Lifecycle status of a booking, persisted as a lowercase string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    /// Upcoming appointment.
    Scheduled,
    /// Appointment took place.
    Completed,
    /// Appointment was called off.
    Canceled,
}

impl BookingStatus {
    /// Stable string form used by the record store.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
            Self::Canceled => "canceled",
        }
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = BookingValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(Self::Scheduled),
            "completed" => Ok(Self::Completed),
            "canceled" => Ok(Self::Canceled),
            other => Err(BookingValidationError::UnknownStatus {
                value: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation errors for booking payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingValidationError {
    /// Status string did not name a known status.
    UnknownStatus { value: String },
    /// Notes exceeded the persisted length limit.
    NotesTooLong { max: usize },
}

impl fmt::Display for BookingValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownStatus { value } => write!(f, "unknown booking status {value}"),
            Self::NotesTooLong { max } => {
                write!(f, "booking notes must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for BookingValidationError {}

/// Input payload for creating a booking; the record store assigns id and
/// creation timestamp, and new bookings always start `scheduled`.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingDraft {
    customer_id: UserId,
    technician_id: UserId,
    service_id: Uuid,
    booking_time: DateTime<Utc>,
    notes: String,
}

impl BookingDraft {
    /// Validate and build a draft.
    pub fn new(
        customer_id: UserId,
        technician_id: UserId,
        service_id: Uuid,
        booking_time: DateTime<Utc>,
        notes: impl Into<String>,
    ) -> Result<Self, BookingValidationError> {
        let notes = notes.into();
        if notes.chars().count() > MAX_NOTES_CHARS {
            return Err(BookingValidationError::NotesTooLong {
                max: MAX_NOTES_CHARS,
            });
        }
        Ok(Self {
            customer_id,
            technician_id,
            service_id,
            booking_time,
            notes,
        })
    }

    /// Booking customer.
    #[must_use]
    pub fn customer_id(&self) -> &UserId {
        &self.customer_id
    }

    /// Booked technician.
    #[must_use]
    pub fn technician_id(&self) -> &UserId {
        &self.technician_id
    }

    /// Booked service offering.
    #[must_use]
    pub fn service_id(&self) -> Uuid {
        self.service_id
    }

    /// Appointment time.
    #[must_use]
    pub fn booking_time(&self) -> DateTime<Utc> {
        self.booking_time
    }

    /// Free-form customer notes.
    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
    }
}

/// A persisted booking.
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    pub id: Uuid,
    pub customer_id: UserId,
    pub technician_id: UserId,
    pub service_id: Uuid,
    pub booking_time: DateTime<Utc>,
    pub status: BookingStatus,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}
