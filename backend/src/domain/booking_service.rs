//! Booking domain services implementing the booking driving ports.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    BookingCommand, BookingQuery, BookingRepository, BookingRepositoryError, CreateBookingRequest,
};
use crate::domain::{Booking, BookingDraft, Error, Principal};

fn map_repository_error(error: BookingRepositoryError) -> Error {
    match error {
        BookingRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("booking storage unavailable: {message}"))
        }
        BookingRepositoryError::Query { message } => {
            Error::internal(format!("booking storage error: {message}"))
        }
    }
}

/// Booking service implementing command and query driving ports.
#[derive(Clone)]
pub struct BookingService {
    bookings: Arc<dyn BookingRepository>,
}

impl BookingService {
    /// Create the service over the booking repository.
    pub fn new(bookings: Arc<dyn BookingRepository>) -> Self {
        Self { bookings }
    }
}

#[async_trait]
impl BookingCommand for BookingService {
    async fn create_booking(&self, request: CreateBookingRequest) -> Result<Booking, Error> {
        let CreateBookingRequest {
            principal,
            technician_id,
            service_id,
            booking_time,
            notes,
        } = request;

        let draft = BookingDraft::new(
            *principal.user_id(),
            technician_id,
            service_id,
            booking_time,
            notes,
        )
        .map_err(|err| Error::invalid_request(err.to_string()))?;

        self.bookings
            .create(&draft)
            .await
            .map_err(map_repository_error)
    }
}

#[async_trait]
impl BookingQuery for BookingService {
    async fn list_own_bookings(&self, principal: &Principal) -> Result<Vec<Booking>, Error> {
        self.bookings
            .list_for_customer(principal.user_id())
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rstest::rstest;
    use uuid::Uuid;

    use super::*;
    use crate::domain::ports::MockBookingRepository;
    use crate::domain::{BookingStatus, ErrorCode, Role, UserId};

    fn principal() -> Principal {
        Principal::new(UserId::from_uuid(Uuid::new_v4()), Role::Customer)
    }

    fn request(principal: Principal, notes: String) -> CreateBookingRequest {
        CreateBookingRequest {
            principal,
            technician_id: UserId::from_uuid(Uuid::new_v4()),
            service_id: Uuid::new_v4(),
            booking_time: Utc::now(),
            notes,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn bookings_are_created_for_the_session_customer() {
        let caller = principal();
        let customer_id = *caller.user_id();
        let mut repo = MockBookingRepository::new();
        repo.expect_create()
            .times(1)
            .withf(move |draft| draft.customer_id() == &customer_id)
            .returning(|draft| {
                Ok(Booking {
                    id: Uuid::new_v4(),
                    customer_id: *draft.customer_id(),
                    technician_id: *draft.technician_id(),
                    service_id: draft.service_id(),
                    booking_time: draft.booking_time(),
                    status: BookingStatus::Scheduled,
                    notes: draft.notes().to_owned(),
                    created_at: Utc::now(),
                })
            });

        let booking = BookingService::new(Arc::new(repo))
            .create_booking(request(caller, "fade please".to_owned()))
            .await
            .expect("booking created");

        assert_eq!(booking.status, BookingStatus::Scheduled);
        assert_eq!(booking.customer_id, customer_id);
    }

    #[rstest]
    #[tokio::test]
    async fn overlong_notes_never_reach_the_repository() {
        let mut repo = MockBookingRepository::new();
        repo.expect_create().times(0);

        let error = BookingService::new(Arc::new(repo))
            .create_booking(request(principal(), "x".repeat(501)))
            .await
            .expect_err("validation rejects");

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    #[tokio::test]
    async fn connection_failures_surface_as_service_unavailable() {
        let mut repo = MockBookingRepository::new();
        repo.expect_list_for_customer()
            .times(1)
            .returning(|_| Err(BookingRepositoryError::connection("pool exhausted")));

        let error = BookingService::new(Arc::new(repo))
            .list_own_bookings(&principal())
            .await
            .expect_err("connection error surfaces");

        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }
}
