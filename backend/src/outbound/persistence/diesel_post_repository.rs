//! PostgreSQL-backed `PostRepository` implementation using Diesel ORM.
//!
//! Rows pass through the validated `Post` constructor on read, so corrupt
//! rows surface as query errors instead of leaking into the domain.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{PostRepository, PostRepositoryError};
use crate::domain::{AiStatus, Post, PostDraft, PostParts, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewPostRow, PostRow, PostUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::posts;

/// Diesel-backed implementation of the post repository port.
#[derive(Clone)]
pub struct DieselPostRepository {
    pool: DbPool,
}

impl DieselPostRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> PostRepositoryError {
    map_pool_error(error, |message| PostRepositoryError::connection(message))
}

fn map_diesel(error: diesel::result::Error) -> PostRepositoryError {
    map_diesel_error(
        error,
        PostRepositoryError::query,
        PostRepositoryError::connection,
    )
}

/// Convert a database row into a validated domain post.
fn row_to_post(row: PostRow) -> Result<Post, PostRepositoryError> {
    let PostRow {
        id,
        technician_id,
        customer_id,
        booking_id,
        raw_image_url,
        enhanced_image_url,
        generated_captions,
        selected_caption,
        ai_status,
        style_tags,
        created_at,
    } = row;

    let ai_status: AiStatus = ai_status
        .parse()
        .map_err(|err: crate::domain::PostValidationError| {
            PostRepositoryError::query(err.to_string())
        })?;

    Post::from_parts(PostParts {
        id,
        technician_id: UserId::from_uuid(technician_id),
        customer_id,
        booking_id,
        raw_image_url,
        enhanced_image_url,
        generated_captions,
        selected_caption,
        ai_status,
        style_tags,
        created_at,
    })
    .map_err(|err| PostRepositoryError::query(err.to_string()))
}

#[async_trait]
impl PostRepository for DieselPostRepository {
    async fn create(&self, draft: &PostDraft) -> Result<Post, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let new_row = NewPostRow {
            technician_id: *draft.technician_id().as_uuid(),
            customer_id: draft.customer_id(),
            booking_id: draft.booking_id(),
            raw_image_url: draft.raw_image_url(),
            generated_captions: &[],
            ai_status: AiStatus::Processing.as_str(),
            style_tags: draft.style_tags(),
        };

        let row: PostRow = diesel::insert_into(posts::table)
            .values(&new_row)
            .returning(PostRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel)?;

        row_to_post(row)
    }

    async fn update(&self, post: &Post) -> Result<(), PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let changes = PostUpdate {
            enhanced_image_url: post.enhanced_image_url(),
            generated_captions: post.generated_captions(),
            selected_caption: post.selected_caption(),
            ai_status: post.ai_status().as_str(),
        };

        let affected = diesel::update(posts::table.filter(posts::id.eq(post.id())))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(map_diesel)?;

        if affected == 0 {
            return Err(PostRepositoryError::query("post row no longer exists"));
        }
        Ok(())
    }

    async fn mark_failed(&self, post_id: Uuid) -> Result<(), PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        diesel::update(posts::table.filter(posts::id.eq(post_id)))
            .set(posts::ai_status.eq(AiStatus::Failed.as_str()))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel)
    }

    async fn find_by_id(&self, post_id: Uuid) -> Result<Option<Post>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = posts::table
            .filter(posts::id.eq(post_id))
            .select(PostRow::as_select())
            .first::<PostRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(row_to_post).transpose()
    }

    async fn list_completed_for_technician(
        &self,
        technician_id: &UserId,
    ) -> Result<Vec<Post>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<PostRow> = posts::table
            .filter(
                posts::technician_id
                    .eq(technician_id.as_uuid())
                    .and(posts::ai_status.eq(AiStatus::Completed.as_str())),
            )
            .order(posts::created_at.desc())
            .select(PostRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        rows.into_iter().map(row_to_post).collect()
    }
}
