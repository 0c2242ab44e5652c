//! PostgreSQL-backed `ProfileRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ProfileRepository, ProfileRepositoryError};
use crate::domain::{Profile, Role, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::ProfileRow;
use super::pool::{DbPool, PoolError};
use super::schema::profiles;

/// Diesel-backed implementation of the profile repository port.
#[derive(Clone)]
pub struct DieselProfileRepository {
    pool: DbPool,
}

impl DieselProfileRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> ProfileRepositoryError {
    map_pool_error(error, |message| ProfileRepositoryError::connection(message))
}

fn map_diesel(error: diesel::result::Error) -> ProfileRepositoryError {
    map_diesel_error(
        error,
        ProfileRepositoryError::query,
        ProfileRepositoryError::connection,
    )
}

fn row_to_profile(row: ProfileRow) -> Result<Profile, ProfileRepositoryError> {
    let role: Role = row
        .role
        .parse()
        .map_err(|err: crate::domain::IdentityValidationError| {
            ProfileRepositoryError::query(err.to_string())
        })?;

    Ok(Profile {
        id: UserId::from_uuid(row.id),
        full_name: row.full_name,
        role,
        avatar_url: row.avatar_url,
        created_at: row.created_at,
    })
}

#[async_trait]
impl ProfileRepository for DieselProfileRepository {
    async fn find_by_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Profile>, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = profiles::table
            .filter(profiles::id.eq(user_id.as_uuid()))
            .select(ProfileRow::as_select())
            .first::<ProfileRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(row_to_profile).transpose()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn unknown_roles_map_to_query_errors() {
        let row = ProfileRow {
            id: Uuid::new_v4(),
            full_name: None,
            role: "barista".to_owned(),
            avatar_url: None,
            created_at: Utc::now(),
        };

        let error = row_to_profile(row).expect_err("unknown role fails");
        assert!(matches!(error, ProfileRepositoryError::Query { .. }));
    }
}
