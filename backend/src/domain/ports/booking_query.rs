//! Driving port for listing a customer's bookings.

use async_trait::async_trait;

use crate::domain::{Booking, Error, Principal};

/// Driving port for booking reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingQuery: Send + Sync {
    /// Bookings made by the authenticated principal, soonest first.
    async fn list_own_bookings(&self, principal: &Principal) -> Result<Vec<Booking>, Error>;
}

/// Fixture implementation returning no bookings.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureBookingQuery;

#[async_trait]
impl BookingQuery for FixtureBookingQuery {
    async fn list_own_bookings(&self, _principal: &Principal) -> Result<Vec<Booking>, Error> {
        Ok(Vec::new())
    }
}
