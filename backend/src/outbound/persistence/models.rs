//! Internal Diesel row structs for database operations.
//!
//! Implementation details of the persistence layer; never exposed to the
//! domain. Rows are converted through validated domain constructors on read.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{bookings, posts, profiles, services, technicians};

/// Row struct for reading from the profiles table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProfileRow {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub role: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Row struct for reading from the technicians table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = technicians)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TechnicianRow {
    pub user_id: Uuid,
    pub specialty: String,
    pub rating: f32,
    pub bio: String,
    pub availability: Vec<String>,
    #[expect(dead_code, reason = "schema field read for completeness")]
    pub created_at: DateTime<Utc>,
}

/// Row struct for reading from the services table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = services)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ServiceRow {
    pub id: Uuid,
    pub name: String,
    pub duration_minutes: i32,
    pub price: i64,
    pub is_active: bool,
    #[expect(dead_code, reason = "schema field read for completeness")]
    pub created_at: DateTime<Utc>,
}

/// Row struct for reading from the bookings table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = bookings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BookingRow {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub technician_id: Uuid,
    pub service_id: Uuid,
    pub booking_time: DateTime<Utc>,
    pub status: String,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating bookings; id, status, and creation time
/// come from column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = bookings)]
pub(crate) struct NewBookingRow<'a> {
    pub customer_id: Uuid,
    pub technician_id: Uuid,
    pub service_id: Uuid,
    pub booking_time: DateTime<Utc>,
    pub status: &'a str,
    pub notes: &'a str,
}

/// Row struct for reading from the posts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PostRow {
    pub id: Uuid,
    pub technician_id: Uuid,
    pub customer_id: Option<Uuid>,
    pub booking_id: Option<Uuid>,
    pub raw_image_url: String,
    pub enhanced_image_url: Option<String>,
    pub generated_captions: Vec<String>,
    pub selected_caption: Option<String>,
    pub ai_status: String,
    pub style_tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating posts; id and creation time come from
/// column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = posts)]
pub(crate) struct NewPostRow<'a> {
    pub technician_id: Uuid,
    pub customer_id: Option<Uuid>,
    pub booking_id: Option<Uuid>,
    pub raw_image_url: &'a str,
    pub generated_captions: &'a [String],
    pub ai_status: &'a str,
    pub style_tags: &'a [String],
}

/// Changeset struct covering every field the pipeline mutates.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = posts)]
pub(crate) struct PostUpdate<'a> {
    pub enhanced_image_url: Option<&'a str>,
    pub generated_captions: &'a [String],
    pub selected_caption: Option<&'a str>,
    pub ai_status: &'a str,
}
