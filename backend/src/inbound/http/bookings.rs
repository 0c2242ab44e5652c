//! Booking HTTP handlers.
//!
//! ```text
//! POST /api/v1/bookings {"technicianId": ..., "serviceId": ..., "bookingTime": ...}
//! GET  /api/v1/bookings
//! ```

use actix_web::{get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::CreateBookingRequest;
use crate::domain::{Booking, Error, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Request payload for creating a booking.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequestBody {
    #[schema(format = "uuid")]
    pub technician_id: String,
    #[schema(format = "uuid")]
    pub service_id: String,
    #[schema(format = "date-time")]
    pub booking_time: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// One booking as returned by the API.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponseBody {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(format = "uuid")]
    pub customer_id: String,
    #[schema(format = "uuid")]
    pub technician_id: String,
    #[schema(format = "uuid")]
    pub service_id: String,
    #[schema(format = "date-time")]
    pub booking_time: String,
    pub status: String,
    pub notes: String,
    #[schema(format = "date-time")]
    pub created_at: String,
}

impl From<Booking> for BookingResponseBody {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id.to_string(),
            customer_id: booking.customer_id.to_string(),
            technician_id: booking.technician_id.to_string(),
            service_id: booking.service_id.to_string(),
            booking_time: booking.booking_time.to_rfc3339(),
            status: booking.status.as_str().to_owned(),
            notes: booking.notes,
            created_at: booking.created_at.to_rfc3339(),
        }
    }
}

fn parse_uuid(raw: &str, field: &'static str) -> Result<Uuid, Error> {
    Uuid::parse_str(raw).map_err(|_| {
        Error::invalid_request(format!("{field} must be a valid UUID"))
            .with_details(json!({ "field": field, "code": "invalid_uuid" }))
    })
}

fn parse_timestamp(raw: &str, field: &'static str) -> Result<DateTime<Utc>, Error> {
    DateTime::parse_from_rfc3339(raw)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|_| {
            Error::invalid_request(format!("{field} must be an RFC 3339 timestamp"))
                .with_details(json!({ "field": field, "code": "invalid_timestamp" }))
        })
}

/// Create a booking for the authenticated customer.
#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    request_body = CreateBookingRequestBody,
    responses(
        (status = 200, description = "Booking scheduled", body = BookingResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["bookings"],
    operation_id = "createBooking",
    security(("SessionCookie" = []))
)]
#[post("/bookings")]
pub async fn create_booking(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateBookingRequestBody>,
) -> ApiResult<web::Json<BookingResponseBody>> {
    let user_id = session.require_user_id()?;
    let principal = state.identity.principal(&user_id).await?;
    let body = payload.into_inner();

    let booking = state
        .bookings
        .create_booking(CreateBookingRequest {
            principal,
            technician_id: UserId::from_uuid(parse_uuid(&body.technician_id, "technicianId")?),
            service_id: parse_uuid(&body.service_id, "serviceId")?,
            booking_time: parse_timestamp(&body.booking_time, "bookingTime")?,
            notes: body.notes.unwrap_or_default(),
        })
        .await?;

    Ok(web::Json(BookingResponseBody::from(booking)))
}

/// List the authenticated customer's bookings, soonest first.
#[utoipa::path(
    get,
    path = "/api/v1/bookings",
    responses(
        (status = 200, description = "Bookings", body = [BookingResponseBody]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["bookings"],
    operation_id = "listBookings",
    security(("SessionCookie" = []))
)]
#[get("/bookings")]
pub async fn list_bookings(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<BookingResponseBody>>> {
    let user_id = session.require_user_id()?;
    let principal = state.identity.principal(&user_id).await?;

    let bookings = state.bookings_query.list_own_bookings(&principal).await?;

    Ok(web::Json(
        bookings.into_iter().map(BookingResponseBody::from).collect(),
    ))
}
