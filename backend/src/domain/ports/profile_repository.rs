//! Driven port for identity profile lookups.

use async_trait::async_trait;

use crate::domain::{Profile, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors surfaced by profile lookups.
    pub enum ProfileRepositoryError {
        /// Could not reach the record store.
        Connection { message: String } =>
            "profile repository unavailable: {message}",
        /// The record store rejected or failed the operation.
        Query { message: String } =>
            "profile repository error: {message}",
    }
}

/// Port for the `profiles` table, consumed read-only.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Load one profile.
    async fn find_by_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Profile>, ProfileRepositoryError>;
}
