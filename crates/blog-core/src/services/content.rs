//! Content store - posts and comments with ownership checks.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Comment, Post, PostDraft};
use crate::error::DomainError;
use crate::ports::{CommentRepository, PostRepository};
use crate::validation;

/// Result of a comment submission.
#[derive(Debug)]
pub enum CommentOutcome {
    Created(Comment),
    /// Blank submissions are dropped without an error.
    Ignored,
}

#[derive(Clone)]
pub struct ContentStore {
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl ContentStore {
    pub fn new(posts: Arc<dyn PostRepository>, comments: Arc<dyn CommentRepository>) -> Self {
        Self { posts, comments }
    }

    pub async fn create_post(&self, author_id: Uuid, draft: PostDraft) -> Result<Post, DomainError> {
        validation::validate_title(&draft.title)?;

        let post = self.posts.insert(Post::new(author_id, draft)).await?;
        tracing::info!(post_id = %post.id, author_id = %author_id, "Post created");
        Ok(post)
    }

    pub async fn get_post(&self, id: Uuid) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))
    }

    /// Load a post and require that `requester_id` wrote it.
    pub async fn owned_post(&self, post_id: Uuid, requester_id: Uuid) -> Result<Post, DomainError> {
        let post = self.get_post(post_id).await?;
        if !post.is_owned_by(requester_id) {
            tracing::warn!(
                post_id = %post_id,
                requester_id = %requester_id,
                "Rejected access to another author's post"
            );
            return Err(DomainError::Forbidden);
        }
        Ok(post)
    }

    pub async fn update_post(
        &self,
        post_id: Uuid,
        requester_id: Uuid,
        draft: PostDraft,
    ) -> Result<Post, DomainError> {
        let mut post = self.owned_post(post_id, requester_id).await?;
        validation::validate_title(&draft.title)?;

        post.apply(draft);
        let post = self.posts.update(post).await?;
        tracing::info!(post_id = %post.id, "Post updated");
        Ok(post)
    }

    /// Delete a post together with its comments.
    ///
    /// The post row goes first, so a failed comment sweep leaves only orphans.
    pub async fn delete_post(&self, post_id: Uuid, requester_id: Uuid) -> Result<(), DomainError> {
        self.owned_post(post_id, requester_id).await?;

        self.posts.delete(post_id).await?;
        let removed = self.comments.delete_by_post(post_id).await?;
        tracing::info!(post_id = %post_id, comments_removed = removed, "Post deleted");
        Ok(())
    }

    pub async fn create_comment(
        &self,
        post_id: Uuid,
        author_id: Uuid,
        content: &str,
    ) -> Result<CommentOutcome, DomainError> {
        if content.trim().is_empty() {
            tracing::debug!(post_id = %post_id, "Ignoring empty comment");
            return Ok(CommentOutcome::Ignored);
        }

        // parent must exist
        self.get_post(post_id).await?;

        let comment = Comment::new(post_id, author_id, content.to_string());
        let comment = self.comments.insert(comment).await?;
        tracing::info!(comment_id = %comment.id, post_id = %post_id, "Comment created");
        Ok(CommentOutcome::Created(comment))
    }

    pub async fn list_published(&self, limit: Option<u64>) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.find_published(limit).await?)
    }

    pub async fn list_comments_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, DomainError> {
        Ok(self.comments.find_by_post(post_id).await?)
    }

    pub async fn list_posts_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.find_by_author(author_id).await?)
    }
}
