//! Directory HTTP handlers: technician and service listings.
//!
//! ```text
//! GET /api/v1/technicians
//! GET /api/v1/services
//! ```

use actix_web::{get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{ServiceOffering, TechnicianListing};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// One technician directory entry.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TechnicianResponseBody {
    #[schema(format = "uuid")]
    pub user_id: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub specialty: String,
    pub rating: f32,
    pub bio: String,
    pub availability: Vec<String>,
}

impl From<TechnicianListing> for TechnicianResponseBody {
    fn from(listing: TechnicianListing) -> Self {
        Self {
            user_id: listing.user_id.to_string(),
            full_name: listing.full_name,
            avatar_url: listing.avatar_url,
            specialty: listing.specialty,
            rating: listing.rating,
            bio: listing.bio,
            availability: listing.availability,
        }
    }
}

/// One bookable service.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceResponseBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub name: String,
    pub duration_minutes: i32,
    /// Minor currency units.
    pub price: i64,
}

impl From<ServiceOffering> for ServiceResponseBody {
    fn from(service: ServiceOffering) -> Self {
        Self {
            id: service.id.to_string(),
            name: service.name,
            duration_minutes: service.duration_minutes,
            price: service.price,
        }
    }
}

/// List technicians, best rated first.
#[utoipa::path(
    get,
    path = "/api/v1/technicians",
    responses(
        (status = 200, description = "Technicians", body = [TechnicianResponseBody]),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["directory"],
    operation_id = "listTechnicians",
    security([])
)]
#[get("/technicians")]
pub async fn list_technicians(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<TechnicianResponseBody>>> {
    let technicians = state.directory.list_technicians().await?;
    Ok(web::Json(
        technicians
            .into_iter()
            .map(TechnicianResponseBody::from)
            .collect(),
    ))
}

/// List active services.
#[utoipa::path(
    get,
    path = "/api/v1/services",
    responses(
        (status = 200, description = "Active services", body = [ServiceResponseBody]),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["directory"],
    operation_id = "listServices",
    security([])
)]
#[get("/services")]
pub async fn list_services(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<ServiceResponseBody>>> {
    let services = state.directory.list_services().await?;
    Ok(web::Json(
        services.into_iter().map(ServiceResponseBody::from).collect(),
    ))
}
