//! Directory, portfolio, and identity read services.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    DirectoryQuery, DirectoryRepository, DirectoryRepositoryError, IdentityQuery, PortfolioQuery,
    PostRepository, PostRepositoryError, ProfileRepository, ProfileRepositoryError,
};
use crate::domain::{Error, Post, Principal, ServiceOffering, TechnicianListing, UserId};

fn map_directory_error(error: DirectoryRepositoryError) -> Error {
    match error {
        DirectoryRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("directory unavailable: {message}"))
        }
        DirectoryRepositoryError::Query { message } => {
            Error::internal(format!("directory error: {message}"))
        }
    }
}

fn map_post_error(error: PostRepositoryError) -> Error {
    match error {
        PostRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("post storage unavailable: {message}"))
        }
        PostRepositoryError::Query { message } => {
            Error::internal(format!("post storage error: {message}"))
        }
    }
}

fn map_profile_error(error: ProfileRepositoryError) -> Error {
    match error {
        ProfileRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("profile storage unavailable: {message}"))
        }
        ProfileRepositoryError::Query { message } => {
            Error::internal(format!("profile storage error: {message}"))
        }
    }
}

/// Directory service implementing the directory driving port.
#[derive(Clone)]
pub struct DirectoryService {
    directory: Arc<dyn DirectoryRepository>,
}

impl DirectoryService {
    /// Create the service over the directory repository.
    pub fn new(directory: Arc<dyn DirectoryRepository>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl DirectoryQuery for DirectoryService {
    async fn list_technicians(&self) -> Result<Vec<TechnicianListing>, Error> {
        self.directory
            .list_technicians()
            .await
            .map_err(map_directory_error)
    }

    async fn list_services(&self) -> Result<Vec<ServiceOffering>, Error> {
        self.directory
            .list_active_services()
            .await
            .map_err(map_directory_error)
    }
}

/// Portfolio service implementing the portfolio driving port.
#[derive(Clone)]
pub struct PortfolioService {
    posts: Arc<dyn PostRepository>,
}

impl PortfolioService {
    /// Create the service over the post repository.
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }
}

#[async_trait]
impl PortfolioQuery for PortfolioService {
    async fn list_completed(&self, technician_id: &UserId) -> Result<Vec<Post>, Error> {
        self.posts
            .list_completed_for_technician(technician_id)
            .await
            .map_err(map_post_error)
    }
}

/// Identity service resolving user ids into principals via stored profiles.
#[derive(Clone)]
pub struct IdentityService {
    profiles: Arc<dyn ProfileRepository>,
}

impl IdentityService {
    /// Create the service over the profile repository.
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }
}

#[async_trait]
impl IdentityQuery for IdentityService {
    async fn principal(&self, user_id: &UserId) -> Result<Principal, Error> {
        let profile = self
            .profiles
            .find_by_id(user_id)
            .await
            .map_err(map_profile_error)?
            .ok_or_else(|| Error::unauthorized("no profile exists for the authenticated user"))?;

        Ok(Principal::new(profile.id, profile.role))
    }
}
