//! Session establishment handlers.
//!
//! ```text
//! POST /api/v1/session {"userId": "..."}
//! ```
//!
//! Credential verification happens at the external identity provider; this
//! endpoint only accepts an externally authenticated user id, checks that a
//! profile exists for it, and pins the id into the cookie session.

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{Error, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Request payload for establishing a session.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequestBody {
    #[schema(format = "uuid")]
    pub user_id: String,
}

/// Response payload echoing the resolved principal.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionResponseBody {
    #[schema(format = "uuid")]
    pub user_id: String,
    /// `customer`, `technician`, or `admin`.
    pub role: String,
}

/// Establish a session for an externally authenticated principal.
#[utoipa::path(
    post,
    path = "/api/v1/session",
    request_body = CreateSessionRequestBody,
    responses(
        (status = 200, description = "Session established", body = CreateSessionResponseBody,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "No profile for this user", body = ErrorSchema)
    ),
    tags = ["session"],
    operation_id = "createSession",
    security([])
)]
#[post("/session")]
pub async fn create_session(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateSessionRequestBody>,
) -> ApiResult<web::Json<CreateSessionResponseBody>> {
    let user_id = UserId::new(&payload.user_id).map_err(|err| {
        Error::invalid_request(err.to_string())
            .with_details(json!({ "field": "userId", "code": "invalid_uuid" }))
    })?;

    let principal = state.identity.principal(&user_id).await?;
    session.persist_user(principal.user_id())?;

    Ok(web::Json(CreateSessionResponseBody {
        user_id: principal.user_id().to_string(),
        role: principal.role().to_string(),
    }))
}
