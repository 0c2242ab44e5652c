//! Driving port for reading a technician's published portfolio.

use async_trait::async_trait;

use crate::domain::{Error, Post, UserId};

/// Driving port for portfolio reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PortfolioQuery: Send + Sync {
    /// Completed posts for one technician, newest first.
    async fn list_completed(&self, technician_id: &UserId) -> Result<Vec<Post>, Error>;
}

/// Fixture implementation returning an empty portfolio.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixturePortfolioQuery;

#[async_trait]
impl PortfolioQuery for FixturePortfolioQuery {
    async fn list_completed(&self, _technician_id: &UserId) -> Result<Vec<Post>, Error> {
        Ok(Vec::new())
    }
}
