//! Generative content HTTP handlers.
//!
//! ```text
//! POST /api/v1/posts?filename=cut.jpg      (raw image bytes in the body)
//! POST /api/v1/posts/{id}/publish          {"selectedCaption": "..."}
//! GET  /api/v1/technicians/{id}/posts
//! ```

use actix_web::{HttpRequest, get, http::header, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::{PublishPostRequest, PublishPostResponse, UploadImageRequest, UploadImageResponse};
use crate::domain::{Error, Post, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Query parameters for the upload endpoint.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UploadPostQuery {
    /// Client-side file name; sanitised before use in the object path.
    pub filename: String,
}

/// Response payload for a successful upload.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadPostResponseBody {
    #[schema(format = "uuid")]
    pub post_id: String,
    /// Flow stage after the transition (`result` on success).
    pub stage: String,
    pub raw_image_url: String,
    pub enhanced_image_url: String,
    pub captions: Vec<String>,
}

impl From<UploadImageResponse> for UploadPostResponseBody {
    fn from(value: UploadImageResponse) -> Self {
        Self {
            post_id: value.post_id.to_string(),
            stage: value.stage.as_str().to_owned(),
            raw_image_url: value.raw_image_url,
            enhanced_image_url: value.enhanced_image_url,
            captions: value.captions,
        }
    }
}

/// Request payload for publishing a post.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublishPostRequestBody {
    pub selected_caption: String,
}

/// Response payload for a successful publish.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublishPostResponseBody {
    #[schema(format = "uuid")]
    pub post_id: String,
    /// Flow stage after the transition (`upload`: publishing resets).
    pub stage: String,
}

impl From<PublishPostResponse> for PublishPostResponseBody {
    fn from(value: PublishPostResponse) -> Self {
        Self {
            post_id: value.post_id.to_string(),
            stage: value.stage.as_str().to_owned(),
        }
    }
}

/// One portfolio entry.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostResponseBody {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(format = "uuid")]
    pub technician_id: String,
    pub raw_image_url: String,
    pub enhanced_image_url: Option<String>,
    pub generated_captions: Vec<String>,
    pub selected_caption: Option<String>,
    pub ai_status: String,
    pub style_tags: Vec<String>,
    #[schema(format = "date-time")]
    pub created_at: String,
}

impl From<Post> for PostResponseBody {
    fn from(post: Post) -> Self {
        Self {
            id: post.id().to_string(),
            technician_id: post.technician_id().to_string(),
            raw_image_url: post.raw_image_url().to_owned(),
            enhanced_image_url: post.enhanced_image_url().map(str::to_owned),
            generated_captions: post.generated_captions().to_vec(),
            selected_caption: post.selected_caption().map(str::to_owned),
            ai_status: post.ai_status().as_str().to_owned(),
            style_tags: post.style_tags().to_vec(),
            created_at: post.created_at().to_rfc3339(),
        }
    }
}

fn request_content_type(request: &HttpRequest) -> String {
    request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("application/octet-stream")
        .to_owned()
}

/// Upload a raw image and run the generation pipeline.
#[utoipa::path(
    post,
    path = "/api/v1/posts",
    request_body(content = Vec<u8>, description = "Raw image bytes"),
    params(("filename" = String, Query, description = "Client-side file name")),
    responses(
        (status = 200, description = "Generation artefacts ready", body = UploadPostResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Caller is not a technician", body = ErrorSchema),
        (status = 502, description = "Inference gateway failure", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "uploadPost",
    security(("SessionCookie" = []))
)]
#[post("/posts")]
pub async fn upload_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<UploadPostQuery>,
    request: HttpRequest,
    body: web::Bytes,
) -> ApiResult<web::Json<UploadPostResponseBody>> {
    let user_id = session.require_user_id()?;
    let principal = state.identity.principal(&user_id).await?;

    let filename = query.into_inner().filename;
    if filename.trim().is_empty() {
        return Err(Error::invalid_request("filename must not be empty"));
    }

    let response = state
        .pipeline
        .upload_image(UploadImageRequest {
            principal,
            filename,
            content_type: request_content_type(&request),
            bytes: body.to_vec(),
        })
        .await?;

    Ok(web::Json(UploadPostResponseBody::from(response)))
}

/// Publish a generated post with the selected caption.
#[utoipa::path(
    post,
    path = "/api/v1/posts/{post_id}/publish",
    request_body = PublishPostRequestBody,
    params(("post_id" = Uuid, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Post published", body = PublishPostResponseBody),
        (status = 400, description = "Caption not in the generated list", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Caller does not own the post", body = ErrorSchema),
        (status = 404, description = "Unknown post", body = ErrorSchema),
        (status = 409, description = "Post is not awaiting publication", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "publishPost",
    security(("SessionCookie" = []))
)]
#[post("/posts/{post_id}/publish")]
pub async fn publish_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
    payload: web::Json<PublishPostRequestBody>,
) -> ApiResult<web::Json<PublishPostResponseBody>> {
    let user_id = session.require_user_id()?;
    let principal = state.identity.principal(&user_id).await?;

    let response = state
        .pipeline
        .publish_post(PublishPostRequest {
            principal,
            post_id: path.into_inner(),
            selected_caption: payload.into_inner().selected_caption,
        })
        .await?;

    Ok(web::Json(PublishPostResponseBody::from(response)))
}

/// List a technician's published portfolio, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/technicians/{technician_id}/posts",
    params(("technician_id" = Uuid, Path, description = "Technician identifier")),
    responses(
        (status = 200, description = "Completed posts", body = [PostResponseBody]),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "listTechnicianPosts",
    security([])
)]
#[get("/technicians/{technician_id}/posts")]
pub async fn list_technician_posts(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<Vec<PostResponseBody>>> {
    let technician_id = UserId::from_uuid(path.into_inner());
    let posts = state.portfolio.list_completed(&technician_id).await?;

    Ok(web::Json(
        posts.into_iter().map(PostResponseBody::from).collect(),
    ))
}

#[cfg(test)]
#[path = "posts_tests.rs"]
mod tests;
