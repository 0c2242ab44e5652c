//! Driven port for directory reads (technicians and services).

use async_trait::async_trait;

use crate::domain::{ServiceOffering, TechnicianListing};

use super::define_port_error;

define_port_error! {
    /// Errors surfaced by directory reads.
    pub enum DirectoryRepositoryError {
        /// Could not reach the record store.
        Connection { message: String } =>
            "directory repository unavailable: {message}",
        /// The record store rejected or failed the operation.
        Query { message: String } =>
            "directory repository error: {message}",
    }
}

/// Port for the `technicians` and `services` tables.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryRepository: Send + Sync {
    /// Technicians joined with their profiles, best rated first.
    async fn list_technicians(&self) -> Result<Vec<TechnicianListing>, DirectoryRepositoryError>;

    /// Active services in display order.
    async fn list_active_services(&self)
    -> Result<Vec<ServiceOffering>, DirectoryRepositoryError>;
}
