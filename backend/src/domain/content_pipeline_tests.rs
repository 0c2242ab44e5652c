//! Behaviour coverage for the content pipeline service.
//!
//! Uses mocked driven ports throughout; no network or database involved.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use mockall::Sequence;
use rstest::{fixture, rstest};
use uuid::Uuid;

use super::{upload_object_path, ContentPipelineService};
use crate::domain::ports::{
    CaptionArtifacts, CaptionSourceError, ContentPipelineCommand, MockCaptionSource,
    MockObjectStore, MockPostRepository, PipelineStage, PostRepositoryError, PublishPostRequest,
    UploadImageRequest,
};
use crate::domain::{
    AiStatus, Error, ErrorCode, Post, PostParts, Principal, Role, UserId,
};

const RAW_URL: &str = "https://storage.test/object/public/posts/raw.jpg";

fn technician() -> Principal {
    Principal::new(UserId::from_uuid(Uuid::new_v4()), Role::Technician)
}

fn customer() -> Principal {
    Principal::new(UserId::from_uuid(Uuid::new_v4()), Role::Customer)
}

fn processing_post(owner: &UserId) -> Post {
    Post::from_parts(PostParts {
        id: Uuid::new_v4(),
        technician_id: *owner,
        customer_id: None,
        booking_id: None,
        raw_image_url: RAW_URL.to_owned(),
        enhanced_image_url: None,
        generated_captions: Vec::new(),
        selected_caption: None,
        ai_status: AiStatus::Processing,
        style_tags: Vec::new(),
        created_at: Utc::now(),
    })
    .expect("valid processing post")
}

fn generated_post(owner: &UserId) -> Post {
    processing_post(owner)
        .attach_generation(
            format!("{RAW_URL}?enhanced=ai"),
            vec!["A cool haircut".to_owned(), "Fresh fade".to_owned()],
        )
        .expect("generation attaches")
}

fn artifacts() -> CaptionArtifacts {
    CaptionArtifacts {
        captions: vec![
            "A cool haircut".to_owned(),
            "Fresh from the chair: a cool haircut!".to_owned(),
            "New style, new confidence. Loving a cool haircut!".to_owned(),
        ],
        enhanced_image_url: format!("{RAW_URL}?enhanced=ai"),
    }
}

fn upload_request(principal: Principal) -> UploadImageRequest {
    UploadImageRequest {
        principal,
        filename: "cut.jpg".to_owned(),
        content_type: "image/jpeg".to_owned(),
        bytes: vec![0xFF, 0xD8, 0xFF],
    }
}

#[fixture]
fn mocks() -> (MockObjectStore, MockCaptionSource, MockPostRepository) {
    (
        MockObjectStore::new(),
        MockCaptionSource::new(),
        MockPostRepository::new(),
    )
}

fn service(
    store: MockObjectStore,
    captions: MockCaptionSource,
    posts: MockPostRepository,
) -> ContentPipelineService {
    ContentPipelineService::new(Arc::new(store), Arc::new(captions), Arc::new(posts))
}

#[rstest]
#[tokio::test]
async fn upload_by_non_technician_performs_zero_side_effects(
    mocks: (MockObjectStore, MockCaptionSource, MockPostRepository),
) {
    let (mut store, mut captions, mut posts) = mocks;
    store.expect_put().times(0);
    store.expect_public_url().times(0);
    captions.expect_generate().times(0);
    posts.expect_create().times(0);
    posts.expect_update().times(0);
    posts.expect_mark_failed().times(0);

    let error = service(store, captions, posts)
        .upload_image(upload_request(customer()))
        .await
        .expect_err("customers must be rejected");

    assert_eq!(error.code(), ErrorCode::Forbidden);
    assert!(!error.message().is_empty());
}

#[rstest]
#[tokio::test]
async fn upload_stores_image_and_creates_row_before_invoking_gateway(
    mocks: (MockObjectStore, MockCaptionSource, MockPostRepository),
) {
    let (mut store, mut captions, mut posts) = mocks;
    let principal = technician();
    let owner = *principal.user_id();
    let mut seq = Sequence::new();

    store
        .expect_put()
        .times(1)
        .in_sequence(&mut seq)
        .withf(move |path, bytes, content_type| {
            path.starts_with(&format!("{owner}/"))
                && !bytes.is_empty()
                && content_type == "image/jpeg"
        })
        .returning(|_, _, _| Ok(()));
    store
        .expect_public_url()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| RAW_URL.to_owned());
    posts
        .expect_create()
        .times(1)
        .in_sequence(&mut seq)
        .withf(move |draft| {
            draft.raw_image_url() == RAW_URL && draft.technician_id() == &owner
        })
        .returning(move |_| Ok(processing_post(&owner)));
    captions
        .expect_generate()
        .times(1)
        .in_sequence(&mut seq)
        .withf(|url| url == RAW_URL)
        .returning(|_| Ok(artifacts()));
    posts
        .expect_update()
        .times(1)
        .in_sequence(&mut seq)
        .withf(|post| {
            post.ai_status() == AiStatus::Generated
                && post.enhanced_image_url().is_some()
                && post.generated_captions().len() == 3
        })
        .returning(|_| Ok(()));
    posts.expect_mark_failed().times(0);

    let response = service(store, captions, posts)
        .upload_image(upload_request(principal))
        .await
        .expect("upload succeeds");

    assert_eq!(response.stage, PipelineStage::Result);
    assert_eq!(response.raw_image_url, RAW_URL);
    assert_eq!(response.captions.len(), 3);
    assert_eq!(response.enhanced_image_url, format!("{RAW_URL}?enhanced=ai"));
}

#[rstest]
#[tokio::test]
async fn object_store_failure_aborts_before_any_record_or_gateway_call(
    mocks: (MockObjectStore, MockCaptionSource, MockPostRepository),
) {
    let (mut store, mut captions, mut posts) = mocks;
    store
        .expect_put()
        .times(1)
        .returning(|_, _, _| Err(crate::domain::ports::ObjectStoreError::transport("refused")));
    store.expect_public_url().times(0);
    captions.expect_generate().times(0);
    posts.expect_create().times(0);
    posts.expect_update().times(0);
    posts.expect_mark_failed().times(0);

    let error = service(store, captions, posts)
        .upload_image(upload_request(technician()))
        .await
        .expect_err("store failure surfaces");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn gateway_error_marks_post_failed_and_surfaces_message(
    mocks: (MockObjectStore, MockCaptionSource, MockPostRepository),
) {
    let (mut store, mut captions, mut posts) = mocks;
    let principal = technician();
    let owner = *principal.user_id();
    let post = processing_post(&owner);
    let post_id = post.id();

    store.expect_put().times(1).returning(|_, _, _| Ok(()));
    store
        .expect_public_url()
        .times(1)
        .returning(|_| RAW_URL.to_owned());
    posts
        .expect_create()
        .times(1)
        .returning(move |_| Ok(post.clone()));
    captions.expect_generate().times(1).returning(|_| {
        Err(CaptionSourceError::upstream_status(
            503_u16,
            "Service Unavailable",
        ))
    });
    posts
        .expect_mark_failed()
        .times(1)
        .withf(move |id| *id == post_id)
        .returning(|_| Ok(()));
    posts.expect_update().times(0);

    let error = service(store, captions, posts)
        .upload_image(upload_request(principal))
        .await
        .expect_err("gateway failure surfaces");

    assert_eq!(error.code(), ErrorCode::BadGateway);
    assert!(!error.message().is_empty());
}

#[rstest]
#[tokio::test]
async fn mark_failed_errors_do_not_mask_the_gateway_error(
    mocks: (MockObjectStore, MockCaptionSource, MockPostRepository),
) {
    let (mut store, mut captions, mut posts) = mocks;
    let principal = technician();
    let owner = *principal.user_id();
    let post = processing_post(&owner);

    store.expect_put().times(1).returning(|_, _, _| Ok(()));
    store
        .expect_public_url()
        .times(1)
        .returning(|_| RAW_URL.to_owned());
    posts
        .expect_create()
        .times(1)
        .returning(move |_| Ok(post.clone()));
    captions
        .expect_generate()
        .times(1)
        .returning(|_| Err(CaptionSourceError::transport("connection reset")));
    posts
        .expect_mark_failed()
        .times(1)
        .returning(|_| Err(PostRepositoryError::connection("pool exhausted")));

    let error = service(store, captions, posts)
        .upload_image(upload_request(principal))
        .await
        .expect_err("gateway failure surfaces");

    assert_eq!(error.code(), ErrorCode::BadGateway);
}

#[rstest]
#[tokio::test]
async fn publish_persists_selected_caption_and_resets_stage(
    mocks: (MockObjectStore, MockCaptionSource, MockPostRepository),
) {
    let (store, captions, mut posts) = mocks;
    let principal = technician();
    let owner = *principal.user_id();
    let post = generated_post(&owner);
    let post_id = post.id();

    posts
        .expect_find_by_id()
        .times(1)
        .withf(move |id| *id == post_id)
        .returning(move |_| Ok(Some(post.clone())));
    posts
        .expect_update()
        .times(1)
        .withf(|post| {
            post.ai_status() == AiStatus::Completed
                && post.selected_caption() == Some("Fresh fade")
        })
        .returning(|_| Ok(()));

    let response = service(store, captions, posts)
        .publish_post(PublishPostRequest {
            principal,
            post_id,
            selected_caption: "Fresh fade".to_owned(),
        })
        .await
        .expect("publish succeeds");

    assert_eq!(response.post_id, post_id);
    assert_eq!(response.stage, PipelineStage::Upload);
}

#[rstest]
#[tokio::test]
async fn publish_rejects_caption_outside_generated_list(
    mocks: (MockObjectStore, MockCaptionSource, MockPostRepository),
) {
    let (store, captions, mut posts) = mocks;
    let principal = technician();
    let owner = *principal.user_id();
    let post = generated_post(&owner);
    let post_id = post.id();

    posts
        .expect_find_by_id()
        .times(1)
        .returning(move |_| Ok(Some(post.clone())));
    posts.expect_update().times(0);

    let error = service(store, captions, posts)
        .publish_post(PublishPostRequest {
            principal,
            post_id,
            selected_caption: "a caption nobody generated".to_owned(),
        })
        .await
        .expect_err("foreign caption rejected");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn publish_rejects_other_technicians_posts(
    mocks: (MockObjectStore, MockCaptionSource, MockPostRepository),
) {
    let (store, captions, mut posts) = mocks;
    let owner = UserId::from_uuid(Uuid::new_v4());
    let post = generated_post(&owner);
    let post_id = post.id();

    posts
        .expect_find_by_id()
        .times(1)
        .returning(move |_| Ok(Some(post.clone())));
    posts.expect_update().times(0);

    let error = service(store, captions, posts)
        .publish_post(PublishPostRequest {
            principal: technician(),
            post_id,
            selected_caption: "Fresh fade".to_owned(),
        })
        .await
        .expect_err("foreign owner rejected");

    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn publish_of_unknown_post_is_not_found(
    mocks: (MockObjectStore, MockCaptionSource, MockPostRepository),
) {
    let (store, captions, mut posts) = mocks;
    posts
        .expect_find_by_id()
        .times(1)
        .returning(|_| Ok(None));

    let error = service(store, captions, posts)
        .publish_post(PublishPostRequest {
            principal: technician(),
            post_id: Uuid::new_v4(),
            selected_caption: "Fresh fade".to_owned(),
        })
        .await
        .expect_err("missing post rejected");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn publish_before_generation_is_a_conflict(
    mocks: (MockObjectStore, MockCaptionSource, MockPostRepository),
) {
    let (store, captions, mut posts) = mocks;
    let principal = technician();
    let owner = *principal.user_id();
    let post = processing_post(&owner);
    let post_id = post.id();

    posts
        .expect_find_by_id()
        .times(1)
        .returning(move |_| Ok(Some(post.clone())));
    posts.expect_update().times(0);

    let error = service(store, captions, posts)
        .publish_post(PublishPostRequest {
            principal,
            post_id,
            selected_caption: "Fresh fade".to_owned(),
        })
        .await
        .expect_err("premature publish rejected");

    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[rstest]
#[case("cut.jpg", "cut.jpg")]
#[case("../../etc/passwd", "passwd")]
#[case("my cut photo.png", "my-cut-photo.png")]
#[case("???", "upload")]
fn object_paths_embed_owner_timestamp_and_sanitised_name(
    #[case] filename: &str,
    #[case] expected_suffix: &str,
) {
    let owner = UserId::from_uuid(Uuid::nil());
    let at = Utc.timestamp_millis_opt(1_770_000_000_000).single().expect("valid ts");

    let path = upload_object_path(&owner, at, filename);

    assert_eq!(
        path,
        format!("{owner}/1770000000000_{expected_suffix}")
    );
}

#[test]
fn object_paths_differ_across_upload_times() {
    let owner = UserId::from_uuid(Uuid::new_v4());
    let first = Utc.timestamp_millis_opt(1_770_000_000_000).single().expect("ts");
    let second = Utc.timestamp_millis_opt(1_770_000_000_001).single().expect("ts");

    assert_ne!(
        upload_object_path(&owner, first, "cut.jpg"),
        upload_object_path(&owner, second, "cut.jpg")
    );
}

#[rstest]
#[tokio::test]
async fn empty_payload_is_rejected_before_any_side_effect(
    mocks: (MockObjectStore, MockCaptionSource, MockPostRepository),
) {
    let (mut store, captions, posts) = mocks;
    store.expect_put().times(0);

    let mut request = upload_request(technician());
    request.bytes.clear();

    let error = service(store, captions, posts)
        .upload_image(request)
        .await
        .expect_err("empty payload rejected");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[test]
fn upload_errors_always_carry_a_message() {
    // The HTTP layer relays `Error::message` verbatim; the pipeline must
    // never produce a blank one.
    let error = Error::bad_gateway("caption generation failed with status 503");
    assert!(!error.message().is_empty());
}

#[rstest]
#[tokio::test]
async fn publish_by_non_technician_reads_nothing(
    mocks: (MockObjectStore, MockCaptionSource, MockPostRepository),
) {
    let (store, captions, mut posts) = mocks;
    posts.expect_find_by_id().times(0);
    posts.expect_update().times(0);

    let error = service(store, captions, posts)
        .publish_post(PublishPostRequest {
            principal: customer(),
            post_id: Uuid::new_v4(),
            selected_caption: "Fresh fade".to_owned(),
        })
        .await
        .expect_err("customers cannot publish");

    assert_eq!(error.code(), ErrorCode::Forbidden);
}
