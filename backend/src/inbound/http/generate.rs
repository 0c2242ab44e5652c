//! Caption generation compatibility endpoint.
//!
//! ```text
//! POST /api/generate-content {"image_url": "https://..."}
//! ```
//!
//! Mirrors the serverless contract the mobile client already speaks:
//! bespoke `{"error": ...}` payloads, `405` for non-POST methods, and the
//! `{enhancedImage, captions}` success shape. Everything else in the API
//! uses the shared error envelope instead.

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::CaptionSourceError;
use crate::inbound::http::state::HttpState;

/// Request body; `image_url` must be publicly dereferenceable.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct GenerateContentRequestBody {
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Success payload, camel-cased for the existing client.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponseBody {
    pub enhanced_image: String,
    pub captions: Vec<String>,
}

/// Error payload for this endpoint only.
#[derive(Debug, Serialize, ToSchema)]
pub struct GenerateContentErrorBody {
    pub error: String,
}

fn error_body(message: impl Into<String>) -> GenerateContentErrorBody {
    GenerateContentErrorBody {
        error: message.into(),
    }
}

/// Run one captioning request against the configured gateway.
#[utoipa::path(
    post,
    path = "/api/generate-content",
    request_body = GenerateContentRequestBody,
    responses(
        (status = 200, description = "Captions generated", body = GenerateContentResponseBody),
        (status = 400, description = "Missing image_url", body = GenerateContentErrorBody),
        (status = 405, description = "Method not allowed"),
        (status = 500, description = "Gateway not configured", body = GenerateContentErrorBody),
        (status = 502, description = "Upstream inference failure", body = GenerateContentErrorBody)
    ),
    tags = ["generate"],
    operation_id = "generateContent",
    security([])
)]
pub async fn generate_content(
    state: web::Data<HttpState>,
    payload: web::Json<GenerateContentRequestBody>,
) -> HttpResponse {
    let image_url = match payload.into_inner().image_url {
        Some(url) if !url.trim().is_empty() => url,
        _ => {
            return HttpResponse::BadRequest()
                .json(error_body("image_url is required in the request body"));
        }
    };

    match state.captions.generate(&image_url).await {
        Ok(artifacts) => HttpResponse::Ok().json(GenerateContentResponseBody {
            enhanced_image: artifacts.enhanced_image_url,
            captions: artifacts.captions,
        }),
        Err(CaptionSourceError::Configuration { message }) => {
            HttpResponse::InternalServerError().json(error_body(message))
        }
        Err(error) => HttpResponse::BadGateway().json(error_body(error.to_string())),
    }
}

async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().finish()
}

/// Resource wiring the POST handler and the 405 fallback for every other
/// method on the path.
pub fn generate_content_resource() -> actix_web::Resource {
    web::resource("/api/generate-content")
        .route(web::post().to(generate_content))
        .default_service(web::route().to(method_not_allowed))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, http::StatusCode, test};
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::ports::{CaptionArtifacts, MockCaptionSource};
    use crate::outbound::inference::MissingCredentialCaptionSource;

    fn app_state(captions: Arc<dyn crate::domain::ports::CaptionSource>) -> web::Data<HttpState> {
        let state = HttpState {
            captions,
            ..HttpState::fixture()
        };
        web::Data::new(state)
    }

    async fn call(
        state: web::Data<HttpState>,
        request: test::TestRequest,
    ) -> (StatusCode, Value) {
        let app = test::init_service(
            App::new()
                .app_data(state)
                .service(generate_content_resource()),
        )
        .await;
        let response = test::call_service(&app, request.to_request()).await;
        let status = response.status();
        let body = test::read_body(response).await;
        let value = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).expect("json body")
        };
        (status, value)
    }

    #[actix_web::test]
    async fn non_post_methods_are_rejected_with_405() {
        let (status, _) = call(
            app_state(Arc::new(MockCaptionSource::new())),
            test::TestRequest::get().uri("/api/generate-content"),
        )
        .await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[actix_web::test]
    async fn missing_image_url_is_a_400_with_error_body() {
        let (status, body) = call(
            app_state(Arc::new(MockCaptionSource::new())),
            test::TestRequest::post()
                .uri("/api/generate-content")
                .set_json(json!({})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(
            body.get("error")
                .and_then(Value::as_str)
                .is_some_and(|message| !message.is_empty())
        );
    }

    #[actix_web::test]
    async fn missing_credential_is_a_500_with_error_body() {
        let (status, body) = call(
            app_state(Arc::new(MissingCredentialCaptionSource)),
            test::TestRequest::post()
                .uri("/api/generate-content")
                .set_json(json!({ "image_url": "https://cdn.test/cut.jpg" })),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.get("error").is_some());
    }

    #[actix_web::test]
    async fn upstream_failures_surface_as_502() {
        let mut captions = MockCaptionSource::new();
        captions.expect_generate().times(1).returning(|_| {
            Err(crate::domain::ports::CaptionSourceError::upstream_status(
                503_u16,
                "model loading",
            ))
        });

        let (status, body) = call(
            app_state(Arc::new(captions)),
            test::TestRequest::post()
                .uri("/api/generate-content")
                .set_json(json!({ "image_url": "https://cdn.test/cut.jpg" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(
            body.get("error")
                .and_then(Value::as_str)
                .is_some_and(|message| message.contains("503"))
        );
    }

    #[actix_web::test]
    async fn success_returns_the_camel_cased_artefacts() {
        let mut captions = MockCaptionSource::new();
        captions.expect_generate().times(1).returning(|url| {
            Ok(CaptionArtifacts {
                captions: vec![
                    "A cool haircut".to_owned(),
                    "Fresh from the chair: a cool haircut!".to_owned(),
                    "New style, new confidence. Loving a cool haircut!".to_owned(),
                ],
                enhanced_image_url: format!("{url}?enhanced=ai"),
            })
        });

        let (status, body) = call(
            app_state(Arc::new(captions)),
            test::TestRequest::post()
                .uri("/api/generate-content")
                .set_json(json!({ "image_url": "http://cdn.test/cut.jpg" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["enhancedImage"],
            "http://cdn.test/cut.jpg?enhanced=ai"
        );
        let captions = body["captions"].as_array().expect("captions array");
        assert_eq!(captions.len(), 3);
        assert_eq!(captions[0], "A cool haircut");
    }
}
