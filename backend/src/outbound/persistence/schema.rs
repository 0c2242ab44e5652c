//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations under `backend/migrations/`
//! exactly; Diesel uses them for compile-time query validation.

diesel::table! {
    /// Identity profiles mirrored from the auth provider.
    profiles (id) {
        /// Primary key; matches the auth provider's user id.
        id -> Uuid,
        full_name -> Nullable<Varchar>,
        /// One of `customer`, `technician`, `admin`.
        role -> Varchar,
        avatar_url -> Nullable<Varchar>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Technician directory entries, one per technician profile.
    technicians (user_id) {
        /// Primary key; references `profiles.id`.
        user_id -> Uuid,
        specialty -> Varchar,
        rating -> Float4,
        bio -> Text,
        /// Bookable time slots in display order.
        availability -> Array<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Bookable service offerings.
    services (id) {
        id -> Uuid,
        name -> Varchar,
        duration_minutes -> Int4,
        /// Minor currency units.
        price -> Int8,
        is_active -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Appointments between customers and technicians.
    bookings (id) {
        id -> Uuid,
        customer_id -> Uuid,
        technician_id -> Uuid,
        service_id -> Uuid,
        booking_time -> Timestamptz,
        /// One of `scheduled`, `completed`, `canceled`.
        status -> Varchar,
        notes -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Generative content submissions.
    posts (id) {
        id -> Uuid,
        technician_id -> Uuid,
        customer_id -> Nullable<Uuid>,
        booking_id -> Nullable<Uuid>,
        raw_image_url -> Text,
        enhanced_image_url -> Nullable<Text>,
        generated_captions -> Array<Text>,
        selected_caption -> Nullable<Text>,
        /// One of `processing`, `generated`, `completed`, `failed`.
        ai_status -> Varchar,
        style_tags -> Array<Text>,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(technicians -> profiles (user_id));

diesel::allow_tables_to_appear_in_same_query!(profiles, technicians);
