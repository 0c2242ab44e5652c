//! Driving port resolving an authenticated user id into a principal.
//!
//! Authentication itself is the external provider's concern; this port only
//! reads the role attribute off the stored profile.

use async_trait::async_trait;

use crate::domain::{Error, Principal, UserId};

/// Driving port for principal resolution.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityQuery: Send + Sync {
    /// Resolve a user id into a principal, failing when no profile exists.
    async fn principal(&self, user_id: &UserId) -> Result<Principal, Error>;
}

/// Fixture implementation granting every caller the technician role.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureIdentityQuery;

#[async_trait]
impl IdentityQuery for FixtureIdentityQuery {
    async fn principal(&self, user_id: &UserId) -> Result<Principal, Error> {
        Ok(Principal::new(*user_id, crate::domain::Role::Technician))
    }
}
