use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post entity - a blog article owned by its author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Time-ordered (v7), so it breaks ties between equal `created_at` values.
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub category: String,
    /// Comma-joined tag list, stored exactly as submitted.
    pub tags: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The author-editable fields of a post.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub category: String,
    pub tags: String,
}

impl Post {
    /// Create a new published post.
    pub fn new(author_id: Uuid, draft: PostDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            author_id,
            title: draft.title,
            content: draft.content,
            excerpt: draft.excerpt,
            category: draft.category,
            tags: draft.tags,
            published: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the editable fields and bump `updated_at`.
    pub fn apply(&mut self, draft: PostDraft) {
        self.title = draft.title;
        self.content = draft.content;
        self.excerpt = draft.excerpt;
        self.category = draft.category;
        self.tags = draft.tags;
        self.updated_at = Utc::now();
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.author_id == user_id
    }

    /// Tags split for display. Storage keeps the raw string.
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, tags: &str) -> PostDraft {
        PostDraft {
            title: title.to_string(),
            tags: tags.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_post_is_published() {
        let author = Uuid::new_v4();
        let post = Post::new(author, draft("Hello", ""));
        assert!(post.published);
        assert!(post.is_owned_by(author));
        assert!(!post.is_owned_by(Uuid::new_v4()));
    }

    #[test]
    fn test_tag_list_skips_blanks() {
        let post = Post::new(Uuid::new_v4(), draft("t", "go, gin,,web ,"));
        assert_eq!(post.tag_list(), vec!["go", "gin", "web"]);
        assert_eq!(post.tags, "go, gin,,web ,");
    }

    #[test]
    fn test_apply_keeps_identity() {
        let mut post = Post::new(Uuid::new_v4(), draft("Old", "a"));
        let (id, author, created) = (post.id, post.author_id, post.created_at);

        post.apply(draft("New", "b,c"));

        assert_eq!(post.title, "New");
        assert_eq!(post.tags, "b,c");
        assert_eq!(post.id, id);
        assert_eq!(post.author_id, author);
        assert_eq!(post.created_at, created);
        assert!(post.updated_at >= created);
    }
}
