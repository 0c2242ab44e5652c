//! Directory read models: profiles, technician listings, service offerings.
//!
//! These are plain projections of record-store rows; the booking and
//! portfolio screens filter and sort them but apply no further logic.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Role, UserId};

/// An identity profile row, consumed read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub id: UserId,
    pub full_name: Option<String>,
    pub role: Role,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A technician row joined with its profile for directory display.
#[derive(Debug, Clone, PartialEq)]
pub struct TechnicianListing {
    pub user_id: UserId,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub specialty: String,
    pub rating: f32,
    pub bio: String,
    /// Bookable time slots, e.g. `"10:00"`, in display order.
    pub availability: Vec<String>,
}

/// A bookable service offering.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceOffering {
    pub id: Uuid,
    pub name: String,
    pub duration_minutes: i32,
    /// Price in minor currency units.
    pub price: i64,
    pub is_active: bool,
}
