//! Handler coverage for the posts endpoints.

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::{App, HttpResponse, http::StatusCode, test, web};
use chrono::Utc;
use serde_json::{Value, json};
use uuid::Uuid;

use super::*;
use crate::domain::ports::{
    MockContentPipelineCommand, MockIdentityQuery, MockPortfolioQuery, PipelineStage,
};
use crate::domain::{AiStatus, PostParts, Principal, Role};

fn technician_identity() -> Arc<MockIdentityQuery> {
    let mut identity = MockIdentityQuery::new();
    identity
        .expect_principal()
        .returning(|user_id| Ok(Principal::new(*user_id, Role::Technician)));
    Arc::new(identity)
}

fn test_app_state(state: HttpState) -> web::Data<HttpState> {
    web::Data::new(state)
}

macro_rules! session_cookie {
    ($app:expr, $user_id:expr) => {{
        let res = test::call_service(
            &$app,
            test::TestRequest::get()
                .uri(&format!("/login-as/{}", $user_id))
                .to_request(),
        )
        .await;
        let cookie: Cookie<'static> = res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned();
        cookie
    }};
}

macro_rules! posts_test_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(test_app_state($state))
                .wrap(crate::inbound::http::test_utils::test_session_middleware())
                .route(
                    "/login-as/{id}",
                    web::get().to(
                        |session: SessionContext, path: web::Path<Uuid>| async move {
                            let id = UserId::from_uuid(path.into_inner());
                            session.persist_user(&id)?;
                            Ok::<_, Error>(HttpResponse::Ok())
                        },
                    ),
                )
                .service(
                    web::scope("/api/v1")
                        .service(upload_post)
                        .service(publish_post)
                        .service(list_technician_posts),
                ),
        )
        .await
    };
}

#[actix_web::test]
async fn upload_without_a_session_is_unauthorised() {
    let mut pipeline = MockContentPipelineCommand::new();
    pipeline.expect_upload_image().times(0);
    let state = HttpState {
        pipeline: Arc::new(pipeline),
        ..HttpState::fixture()
    };
    let app = posts_test_app!(state);

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/posts?filename=cut.jpg")
            .set_payload(vec![1_u8, 2, 3])
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn upload_forwards_principal_and_bytes_to_the_pipeline() {
    let user_id = Uuid::new_v4();
    let mut pipeline = MockContentPipelineCommand::new();
    pipeline
        .expect_upload_image()
        .times(1)
        .withf(move |request| {
            request.principal.user_id().as_uuid() == &user_id
                && request.filename == "cut.jpg"
                && request.content_type == "image/jpeg"
                && request.bytes == vec![0xFF, 0xD8]
        })
        .returning(|request| {
            Ok(crate::domain::ports::UploadImageResponse {
                post_id: Uuid::new_v4(),
                stage: PipelineStage::Result,
                raw_image_url: "https://storage.test/raw.jpg".to_owned(),
                enhanced_image_url: "https://storage.test/raw.jpg?enhanced=ai".to_owned(),
                captions: vec![format!("A cut for {}", request.principal.user_id())],
            })
        });

    let state = HttpState {
        pipeline: Arc::new(pipeline),
        identity: technician_identity(),
        ..HttpState::fixture()
    };
    let app = posts_test_app!(state);
    let cookie = session_cookie!(app, user_id);

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/posts?filename=cut.jpg")
            .insert_header(("content-type", "image/jpeg"))
            .cookie(cookie)
            .set_payload(vec![0xFF_u8, 0xD8])
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["stage"], "result");
    assert_eq!(body["rawImageUrl"], "https://storage.test/raw.jpg");
    assert!(body["captions"].as_array().is_some());
}

#[actix_web::test]
async fn upload_with_blank_filename_never_reaches_the_pipeline() {
    let mut pipeline = MockContentPipelineCommand::new();
    pipeline.expect_upload_image().times(0);
    let state = HttpState {
        pipeline: Arc::new(pipeline),
        identity: technician_identity(),
        ..HttpState::fixture()
    };
    let app = posts_test_app!(state);
    let cookie = session_cookie!(app, Uuid::new_v4());

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/posts?filename=%20")
            .cookie(cookie)
            .set_payload(vec![1_u8])
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn pipeline_forbidden_errors_surface_as_403() {
    let mut pipeline = MockContentPipelineCommand::new();
    pipeline
        .expect_upload_image()
        .times(1)
        .returning(|_| Err(Error::forbidden("only technicians can upload generative content")));

    let mut identity = MockIdentityQuery::new();
    identity
        .expect_principal()
        .returning(|user_id| Ok(Principal::new(*user_id, Role::Customer)));

    let state = HttpState {
        pipeline: Arc::new(pipeline),
        identity: Arc::new(identity),
        ..HttpState::fixture()
    };
    let app = posts_test_app!(state);
    let cookie = session_cookie!(app, Uuid::new_v4());

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/posts?filename=cut.jpg")
            .cookie(cookie)
            .set_payload(vec![1_u8])
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn publish_returns_the_reset_stage() {
    let post_id = Uuid::new_v4();
    let mut pipeline = MockContentPipelineCommand::new();
    pipeline
        .expect_publish_post()
        .times(1)
        .withf(move |request| {
            request.post_id == post_id && request.selected_caption == "Fresh fade"
        })
        .returning(|request| {
            Ok(crate::domain::ports::PublishPostResponse {
                post_id: request.post_id,
                stage: PipelineStage::Upload,
            })
        });

    let state = HttpState {
        pipeline: Arc::new(pipeline),
        identity: technician_identity(),
        ..HttpState::fixture()
    };
    let app = posts_test_app!(state);
    let cookie = session_cookie!(app, Uuid::new_v4());

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/posts/{post_id}/publish"))
            .cookie(cookie)
            .set_json(json!({ "selectedCaption": "Fresh fade" }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["stage"], "upload");
    assert_eq!(body["postId"], post_id.to_string());
}

#[actix_web::test]
async fn portfolio_serialises_completed_posts() {
    let technician_id = Uuid::new_v4();
    let mut portfolio = MockPortfolioQuery::new();
    portfolio
        .expect_list_completed()
        .times(1)
        .returning(move |owner| {
            let post = crate::domain::Post::from_parts(PostParts {
                id: Uuid::new_v4(),
                technician_id: *owner,
                customer_id: None,
                booking_id: None,
                raw_image_url: "https://storage.test/raw.jpg".to_owned(),
                enhanced_image_url: Some("https://storage.test/raw.jpg?enhanced=ai".to_owned()),
                generated_captions: vec!["A cool haircut".to_owned()],
                selected_caption: Some("A cool haircut".to_owned()),
                ai_status: AiStatus::Completed,
                style_tags: vec!["fade".to_owned()],
                created_at: Utc::now(),
            })
            .expect("valid completed post");
            Ok(vec![post])
        });

    let state = HttpState {
        portfolio: Arc::new(portfolio),
        ..HttpState::fixture()
    };
    let app = posts_test_app!(state);

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/technicians/{technician_id}/posts"))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    let posts = body.as_array().expect("array body");
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["aiStatus"], "completed");
    assert_eq!(posts[0]["selectedCaption"], "A cool haircut");
}
