//! HTTP surface tests for the caption generation compatibility endpoint.

use actix_web::{App, http::StatusCode, test, web};
use serde_json::{Value, json};
use std::sync::Arc;

use chairside::Trace;
use chairside::inbound::http::generate::generate_content_resource;
use chairside::inbound::http::state::HttpState;
use chairside::outbound::inference::MissingCredentialCaptionSource;

macro_rules! generate_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .wrap(Trace)
                .service(generate_content_resource()),
        )
        .await
    };
}

#[actix_web::test]
async fn post_with_image_url_returns_enhanced_image_and_captions() {
    let app = generate_app!(HttpState::fixture());

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/generate-content")
            .set_json(json!({ "image_url": "https://cdn.test/cut.jpg" }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert!(
        body["enhancedImage"]
            .as_str()
            .is_some_and(|url| url.contains("enhanced=ai"))
    );
    let captions = body["captions"].as_array().expect("captions array");
    assert!(!captions.is_empty());
}

#[actix_web::test]
async fn get_requests_are_rejected_with_405() {
    let app = generate_app!(HttpState::fixture());

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/generate-content")
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[actix_web::test]
async fn missing_image_url_yields_400_with_error_field() {
    let app = generate_app!(HttpState::fixture());

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/generate-content")
            .set_json(json!({}))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert!(
        body["error"]
            .as_str()
            .is_some_and(|message| !message.is_empty())
    );
}

#[actix_web::test]
async fn missing_credential_yields_500_with_error_field() {
    let state = HttpState {
        captions: Arc::new(MissingCredentialCaptionSource),
        ..HttpState::fixture()
    };
    let app = generate_app!(state);

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/generate-content")
            .set_json(json!({ "image_url": "https://cdn.test/cut.jpg" }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(res).await;
    assert!(body["error"].as_str().is_some());
}

#[actix_web::test]
async fn responses_carry_trace_ids_for_correlation() {
    let app = generate_app!(HttpState::fixture());

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/generate-content")
            .set_json(json!({ "image_url": "https://cdn.test/cut.jpg" }))
            .to_request(),
    )
    .await;

    assert!(res.headers().get("trace-id").is_some());
}
