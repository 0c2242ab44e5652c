//! Driven port for persisting bookings.

use async_trait::async_trait;

use crate::domain::{Booking, BookingDraft, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors surfaced by booking persistence.
    pub enum BookingRepositoryError {
        /// Could not reach the record store.
        Connection { message: String } =>
            "booking repository unavailable: {message}",
        /// The record store rejected or failed the operation.
        Query { message: String } =>
            "booking repository error: {message}",
    }
}

/// Port for the `bookings` table.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Insert a draft with status `scheduled`; the record store assigns the
    /// id and creation time.
    async fn create(&self, draft: &BookingDraft) -> Result<Booking, BookingRepositoryError>;

    /// Bookings made by one customer, soonest first.
    async fn list_for_customer(
        &self,
        customer_id: &UserId,
    ) -> Result<Vec<Booking>, BookingRepositoryError>;
}
