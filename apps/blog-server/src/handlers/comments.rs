//! Comment submission.

use actix_web::{HttpResponse, web};

use blog_core::services::CommentOutcome;
use blog_shared::dto::CommentForm;

use super::{parse_post_id, post_path, redirect};
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /posts/{id}/comments
///
/// Blank submissions create nothing and land back on the post like a real one.
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
    form: web::Form<CommentForm>,
) -> AppResult<HttpResponse> {
    let post_id = parse_post_id(&path)?;

    let outcome = state
        .content
        .create_comment(post_id, identity.user_id, &form.content)
        .await?;

    if let CommentOutcome::Created(comment) = outcome {
        tracing::debug!(comment_id = %comment.id, "Comment stored");
    }

    Ok(redirect(&post_path(post_id)))
}
