//! PostgreSQL-backed `BookingRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{BookingRepository, BookingRepositoryError};
use crate::domain::{Booking, BookingDraft, BookingStatus, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{BookingRow, NewBookingRow};
use super::pool::{DbPool, PoolError};
use super::schema::bookings;

/// Diesel-backed implementation of the booking repository port.
#[derive(Clone)]
pub struct DieselBookingRepository {
    pool: DbPool,
}

impl DieselBookingRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> BookingRepositoryError {
    map_pool_error(error, |message| BookingRepositoryError::connection(message))
}

fn map_diesel(error: diesel::result::Error) -> BookingRepositoryError {
    map_diesel_error(
        error,
        BookingRepositoryError::query,
        BookingRepositoryError::connection,
    )
}

fn row_to_booking(row: BookingRow) -> Result<Booking, BookingRepositoryError> {
    let status: BookingStatus = row
        .status
        .parse()
        .map_err(|err: crate::domain::BookingValidationError| {
            BookingRepositoryError::query(err.to_string())
        })?;

    Ok(Booking {
        id: row.id,
        customer_id: UserId::from_uuid(row.customer_id),
        technician_id: UserId::from_uuid(row.technician_id),
        service_id: row.service_id,
        booking_time: row.booking_time,
        status,
        notes: row.notes,
        created_at: row.created_at,
    })
}

#[async_trait]
impl BookingRepository for DieselBookingRepository {
    async fn create(&self, draft: &BookingDraft) -> Result<Booking, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let new_row = NewBookingRow {
            customer_id: *draft.customer_id().as_uuid(),
            technician_id: *draft.technician_id().as_uuid(),
            service_id: draft.service_id(),
            booking_time: draft.booking_time(),
            status: BookingStatus::Scheduled.as_str(),
            notes: draft.notes(),
        };

        let row: BookingRow = diesel::insert_into(bookings::table)
            .values(&new_row)
            .returning(BookingRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel)?;

        row_to_booking(row)
    }

    async fn list_for_customer(
        &self,
        customer_id: &UserId,
    ) -> Result<Vec<Booking>, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<BookingRow> = bookings::table
            .filter(bookings::customer_id.eq(customer_id.as_uuid()))
            .order(bookings::booking_time.asc())
            .select(BookingRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        rows.into_iter().map(row_to_booking).collect()
    }
}
