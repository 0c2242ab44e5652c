//! Driving port for creating bookings.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Booking, BookingStatus, Error, Principal, UserId};

/// Request payload for creating a booking. The customer id always comes from
/// the authenticated principal, never from the request body.
#[derive(Debug, Clone)]
pub struct CreateBookingRequest {
    pub principal: Principal,
    pub technician_id: UserId,
    pub service_id: Uuid,
    pub booking_time: DateTime<Utc>,
    pub notes: String,
}

/// Driving port for booking creation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingCommand: Send + Sync {
    /// Create a booking with status `scheduled`.
    async fn create_booking(&self, request: CreateBookingRequest) -> Result<Booking, Error>;
}

/// Fixture implementation echoing the request back as a booking.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureBookingCommand;

#[async_trait]
impl BookingCommand for FixtureBookingCommand {
    async fn create_booking(&self, request: CreateBookingRequest) -> Result<Booking, Error> {
        Ok(Booking {
            id: Uuid::nil(),
            customer_id: *request.principal.user_id(),
            technician_id: request.technician_id,
            service_id: request.service_id,
            booking_time: request.booking_time,
            status: BookingStatus::Scheduled,
            notes: request.notes,
            created_at: request.booking_time,
        })
    }
}
