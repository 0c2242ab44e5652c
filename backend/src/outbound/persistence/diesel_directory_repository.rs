//! PostgreSQL-backed `DirectoryRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{DirectoryRepository, DirectoryRepositoryError};
use crate::domain::{ServiceOffering, TechnicianListing, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{ProfileRow, ServiceRow, TechnicianRow};
use super::pool::{DbPool, PoolError};
use super::schema::{profiles, services, technicians};

/// Diesel-backed implementation of the directory repository port.
#[derive(Clone)]
pub struct DieselDirectoryRepository {
    pool: DbPool,
}

impl DieselDirectoryRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> DirectoryRepositoryError {
    map_pool_error(error, |message| {
        DirectoryRepositoryError::connection(message)
    })
}

fn map_diesel(error: diesel::result::Error) -> DirectoryRepositoryError {
    map_diesel_error(
        error,
        DirectoryRepositoryError::query,
        DirectoryRepositoryError::connection,
    )
}

fn rows_to_listing((technician, profile): (TechnicianRow, ProfileRow)) -> TechnicianListing {
    TechnicianListing {
        user_id: UserId::from_uuid(technician.user_id),
        full_name: profile.full_name,
        avatar_url: profile.avatar_url,
        specialty: technician.specialty,
        rating: technician.rating,
        bio: technician.bio,
        availability: technician.availability,
    }
}

#[async_trait]
impl DirectoryRepository for DieselDirectoryRepository {
    async fn list_technicians(&self) -> Result<Vec<TechnicianListing>, DirectoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<(TechnicianRow, ProfileRow)> = technicians::table
            .inner_join(profiles::table)
            .order(technicians::rating.desc())
            .select((TechnicianRow::as_select(), ProfileRow::as_select()))
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(rows.into_iter().map(rows_to_listing).collect())
    }

    async fn list_active_services(
        &self,
    ) -> Result<Vec<ServiceOffering>, DirectoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<ServiceRow> = services::table
            .filter(services::is_active.eq(true))
            .order(services::name.asc())
            .select(ServiceRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(rows
            .into_iter()
            .map(|row| ServiceOffering {
                id: row.id,
                name: row.name,
                duration_minutes: row.duration_minutes,
                price: row.price,
                is_active: row.is_active,
            })
            .collect())
    }
}
