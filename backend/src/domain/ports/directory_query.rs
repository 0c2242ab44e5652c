//! Driving port for the technician and service directory.

use async_trait::async_trait;

use crate::domain::{Error, ServiceOffering, TechnicianListing};

/// Driving port for directory reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryQuery: Send + Sync {
    /// Technicians with profile data, best rated first.
    async fn list_technicians(&self) -> Result<Vec<TechnicianListing>, Error>;

    /// Active services in display order.
    async fn list_services(&self) -> Result<Vec<ServiceOffering>, Error>;
}

/// Fixture implementation returning empty listings.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureDirectoryQuery;

#[async_trait]
impl DirectoryQuery for FixtureDirectoryQuery {
    async fn list_technicians(&self) -> Result<Vec<TechnicianListing>, Error> {
        Ok(Vec::new())
    }

    async fn list_services(&self) -> Result<Vec<ServiceOffering>, Error> {
        Ok(Vec::new())
    }
}
