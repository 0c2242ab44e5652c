//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Thin translators between Diesel rows and domain types; no business logic
//! lives here. Row structs (`models.rs`) and table definitions (`schema.rs`)
//! are internal implementation details. Connections come from a `bb8` pool
//! with native async support through `diesel-async`.

mod diesel_booking_repository;
mod diesel_directory_repository;
mod diesel_error_mapping;
mod diesel_post_repository;
mod diesel_profile_repository;
mod models;
mod pool;
mod schema;

pub use diesel_booking_repository::DieselBookingRepository;
pub use diesel_directory_repository::DieselDirectoryRepository;
pub use diesel_post_repository::DieselPostRepository;
pub use diesel_profile_repository::DieselProfileRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
