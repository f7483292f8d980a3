#![cfg(feature = "auth")]

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use blog_core::domain::{Post, PostDraft};
use blog_core::error::{DomainError, RepoError};
use blog_core::ports::{
    AuthError, BaseRepository, CommentRepository, PasswordService, PostRepository, TokenService,
    UserRepository,
};
use blog_core::services::{
    ADMIN_EMAIL, ADMIN_PASSWORD, ADMIN_USERNAME, CommentOutcome, ContentStore, CredentialStore,
};
use blog_core::validation::MAX_TITLE_CHARS;
use blog_infra::{InMemoryPostRepository, JwtConfig, JwtTokenService};
use common::{Fixture, fast_passwords};
use uuid::Uuid;

fn draft(title: &str) -> PostDraft {
    PostDraft {
        title: title.to_string(),
        content: "Body".to_string(),
        excerpt: "Short".to_string(),
        category: "Rust".to_string(),
        tags: "rust,web".to_string(),
    }
}

fn validation_field(err: DomainError) -> String {
    match err {
        DomainError::Validation(e) => e.field,
        other => panic!("expected validation error, got {other:?}"),
    }
}

/// Counts calls to `verify` on the wrapped service.
struct CountingPasswords {
    inner: Arc<dyn PasswordService>,
    verifies: AtomicUsize,
}

impl PasswordService for CountingPasswords {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        self.inner.hash(password)
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        self.verifies.fetch_add(1, Ordering::SeqCst);
        self.inner.verify(password, hash)
    }
}

/// Post store whose deletes always fail.
struct UndeletablePosts(InMemoryPostRepository);

#[async_trait]
impl BaseRepository<Post, Uuid> for UndeletablePosts {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        self.0.find_by_id(id).await
    }

    async fn insert(&self, entity: Post) -> Result<Post, RepoError> {
        self.0.insert(entity).await
    }

    async fn update(&self, entity: Post) -> Result<Post, RepoError> {
        self.0.update(entity).await
    }

    async fn delete(&self, _id: Uuid) -> Result<(), RepoError> {
        Err(RepoError::Connection("connection reset".into()))
    }
}

#[async_trait]
impl PostRepository for UndeletablePosts {
    async fn find_published(&self, limit: Option<u64>) -> Result<Vec<Post>, RepoError> {
        self.0.find_published(limit).await
    }

    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError> {
        self.0.find_by_author(author_id).await
    }

    async fn count(&self) -> Result<u64, RepoError> {
        PostRepository::count(&self.0).await
    }
}

#[tokio::test]
async fn test_register_checks_fields_in_order() {
    let fx = Fixture::in_memory();

    let err = fx.credentials.register("al", "bad", "123").await.unwrap_err();
    assert_eq!(validation_field(err), "username");

    let err = fx.credentials.register("alice", "bad", "123").await.unwrap_err();
    assert_eq!(validation_field(err), "email");

    let err = fx
        .credentials
        .register("alice", "alice@example.com", "12345")
        .await
        .unwrap_err();
    assert_eq!(validation_field(err), "password");

    assert!(fx.users.find_by_email("alice@example.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_register_hashes_password() {
    let fx = Fixture::in_memory();
    let user = fx
        .credentials
        .register("alice", "alice@example.com", "secret1")
        .await
        .unwrap();

    assert_ne!(user.password_hash, "secret1");
    assert!(user.password_hash.starts_with("$argon2id$"));
    assert!(fx.credentials.verify_password("secret1", &user.password_hash));
}

#[tokio::test]
async fn test_register_duplicate_is_conflict() {
    let fx = Fixture::in_memory();
    fx.credentials
        .register("alice", "alice@example.com", "secret1")
        .await
        .unwrap();

    let same_email = fx
        .credentials
        .register("alice2", "alice@example.com", "secret1")
        .await;
    assert!(matches!(same_email, Err(DomainError::Conflict)));

    let same_name = fx
        .credentials
        .register("alice", "other@example.com", "secret1")
        .await;
    assert!(matches!(same_name, Err(DomainError::Conflict)));
}

#[tokio::test]
async fn test_authenticate_does_not_reveal_which_part_failed() {
    let fx = Fixture::in_memory();
    let user = fx
        .credentials
        .register("alice", "alice@example.com", "secret1")
        .await
        .unwrap();

    let found = fx
        .credentials
        .authenticate("alice@example.com", "secret1")
        .await
        .unwrap();
    assert_eq!(found.id, user.id);

    let wrong_password = fx
        .credentials
        .authenticate("alice@example.com", "wrong!!")
        .await
        .unwrap_err();
    let unknown_email = fx
        .credentials
        .authenticate("nobody@example.com", "secret1")
        .await
        .unwrap_err();

    assert!(matches!(
        wrong_password,
        DomainError::Auth(AuthError::InvalidCredentials)
    ));
    assert_eq!(wrong_password.to_string(), unknown_email.to_string());
}

#[tokio::test]
async fn test_unknown_email_still_verifies_a_hash() {
    let fx = Fixture::in_memory();
    let passwords = Arc::new(CountingPasswords {
        inner: fast_passwords(),
        verifies: AtomicUsize::new(0),
    });
    let credentials = CredentialStore::new(fx.users.clone(), passwords.clone());
    credentials
        .register("alice", "alice@example.com", "secret1")
        .await
        .unwrap();

    let err = credentials
        .authenticate("nobody@example.com", "secret1")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::InvalidCredentials)));
    assert_eq!(passwords.verifies.load(Ordering::SeqCst), 1);

    credentials
        .authenticate("alice@example.com", "wrong!!")
        .await
        .unwrap_err();
    assert_eq!(passwords.verifies.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_create_post_requires_title() {
    let fx = Fixture::in_memory();
    let err = fx
        .content
        .create_post(Uuid::new_v4(), draft(""))
        .await
        .unwrap_err();

    assert_eq!(validation_field(err), "title");
    assert_eq!(fx.posts.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_title_length_is_capped() {
    let fx = Fixture::in_memory();
    let author = Uuid::new_v4();
    let too_long = "t".repeat(MAX_TITLE_CHARS + 1);

    let err = fx
        .content
        .create_post(author, draft(&too_long))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "title too long");
    assert_eq!(fx.posts.count().await.unwrap(), 0);

    let post = fx
        .content
        .create_post(author, draft(&"t".repeat(MAX_TITLE_CHARS)))
        .await
        .unwrap();
    let err = fx
        .content
        .update_post(post.id, author, draft(&too_long))
        .await
        .unwrap_err();
    assert_eq!(validation_field(err), "title");
    assert_eq!(
        fx.content.get_post(post.id).await.unwrap().title.chars().count(),
        MAX_TITLE_CHARS
    );
}

#[tokio::test]
async fn test_only_author_may_change_post() {
    let fx = Fixture::in_memory();
    let (author, intruder) = (Uuid::new_v4(), Uuid::new_v4());
    let post = fx.content.create_post(author, draft("Mine")).await.unwrap();

    let update = fx
        .content
        .update_post(post.id, intruder, draft("Hijacked"))
        .await;
    assert!(matches!(update, Err(DomainError::Forbidden)));

    let delete = fx.content.delete_post(post.id, intruder).await;
    assert!(matches!(delete, Err(DomainError::Forbidden)));

    // blank title from a stranger is still a permission failure
    let blank = fx.content.update_post(post.id, intruder, draft("")).await;
    assert!(matches!(blank, Err(DomainError::Forbidden)));

    assert_eq!(fx.content.get_post(post.id).await.unwrap().title, "Mine");
}

#[tokio::test]
async fn test_update_replaces_fields() {
    let fx = Fixture::in_memory();
    let author = Uuid::new_v4();
    let post = fx.content.create_post(author, draft("Before")).await.unwrap();

    let mut changes = draft("After");
    changes.tags = "rust".to_string();
    let updated = fx.content.update_post(post.id, author, changes).await.unwrap();

    assert_eq!(updated.title, "After");
    assert_eq!(updated.tags, "rust");
    assert_eq!(updated.created_at, post.created_at);
    assert!(updated.updated_at >= post.updated_at);

    let err = fx
        .content
        .update_post(post.id, author, draft(""))
        .await
        .unwrap_err();
    assert_eq!(validation_field(err), "title");
}

#[tokio::test]
async fn test_missing_post_is_not_found() {
    let fx = Fixture::in_memory();
    let id = Uuid::new_v4();

    assert!(matches!(
        fx.content.get_post(id).await,
        Err(DomainError::NotFound { .. })
    ));
    assert!(matches!(
        fx.content.update_post(id, Uuid::new_v4(), draft("x")).await,
        Err(DomainError::NotFound { .. })
    ));
    assert!(matches!(
        fx.content.create_comment(id, Uuid::new_v4(), "hello").await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_blank_comment_is_ignored() {
    let fx = Fixture::in_memory();
    let author = Uuid::new_v4();
    let post = fx.content.create_post(author, draft("Post")).await.unwrap();

    let outcome = fx.content.create_comment(post.id, author, "   ").await.unwrap();
    assert!(matches!(outcome, CommentOutcome::Ignored));

    // blank wins over a missing post
    let outcome = fx
        .content
        .create_comment(Uuid::new_v4(), author, "")
        .await
        .unwrap();
    assert!(matches!(outcome, CommentOutcome::Ignored));

    assert_eq!(fx.comments.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_delete_post_removes_its_comments() {
    let fx = Fixture::in_memory();
    let author = Uuid::new_v4();
    let doomed = fx.content.create_post(author, draft("Doomed")).await.unwrap();
    let kept = fx.content.create_post(author, draft("Kept")).await.unwrap();

    fx.content.create_comment(doomed.id, author, "one").await.unwrap();
    fx.content.create_comment(doomed.id, author, "two").await.unwrap();
    fx.content.create_comment(kept.id, author, "three").await.unwrap();

    fx.content.delete_post(doomed.id, author).await.unwrap();

    assert!(fx.content.list_comments_for_post(doomed.id).await.unwrap().is_empty());
    assert_eq!(fx.content.list_comments_for_post(kept.id).await.unwrap().len(), 1);
    assert!(matches!(
        fx.content.get_post(doomed.id).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_failed_post_delete_keeps_comments() {
    let fx = Fixture::in_memory();
    let content = ContentStore::new(
        Arc::new(UndeletablePosts(InMemoryPostRepository::new())),
        fx.comments.clone(),
    );
    let author = Uuid::new_v4();
    let post = content.create_post(author, draft("Sticky")).await.unwrap();
    content.create_comment(post.id, author, "keep me").await.unwrap();

    let err = content.delete_post(post.id, author).await.unwrap_err();
    assert!(matches!(err, DomainError::Repo(_)));

    assert!(content.get_post(post.id).await.is_ok());
    assert_eq!(content.list_comments_for_post(post.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_seeder_is_idempotent() {
    let fx = Fixture::in_memory();

    let first = fx.seeder().run().await.unwrap();
    assert!(first.admin_created);
    assert_eq!(first.posts_created, 3);
    assert_eq!(first.comments_created, 3);

    let second = fx.seeder().run().await.unwrap();
    assert_eq!(second, Default::default());

    assert_eq!(fx.posts.count().await.unwrap(), 3);
    assert_eq!(fx.comments.count().await.unwrap(), 3);

    let admin = fx
        .credentials
        .authenticate(ADMIN_EMAIL, ADMIN_PASSWORD)
        .await
        .unwrap();
    assert_eq!(admin.username, ADMIN_USERNAME);

    for post in fx.content.list_published(None).await.unwrap() {
        assert_eq!(post.author_id, admin.id);
        assert_eq!(fx.content.list_comments_for_post(post.id).await.unwrap().len(), 1);
    }
}

#[tokio::test]
async fn test_reader_journey() {
    let fx = Fixture::in_memory();
    let tokens = JwtTokenService::new(JwtConfig {
        secret: "journey-secret".to_string(),
        ..Default::default()
    });

    let alice = fx
        .credentials
        .register("alice", "alice@example.com", "secret1")
        .await
        .unwrap();
    let bob = fx
        .credentials
        .register("bob", "bob@example.com", "secret2")
        .await
        .unwrap();

    let user = fx
        .credentials
        .authenticate("alice@example.com", "secret1")
        .await
        .unwrap();
    let token = tokens.issue(user.id, &user.username).unwrap();
    let claims = tokens.verify(&token).unwrap();
    assert_eq!(claims.user_id, alice.id);
    assert_eq!(claims.username, "alice");

    let post = fx
        .content
        .create_post(claims.user_id, draft("Hello"))
        .await
        .unwrap();
    assert!(post.published);

    fx.content.create_comment(post.id, bob.id, "Nice post").await.unwrap();

    let listed = fx.content.list_published(Some(10)).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, post.id);

    let comments = fx.content.list_comments_for_post(post.id).await.unwrap();
    let names = fx
        .credentials
        .usernames(comments.iter().map(|c| c.author_id).chain([post.author_id]))
        .await
        .unwrap();
    assert_eq!(names[&alice.id], "alice");
    assert_eq!(names[&comments[0].author_id], "bob");

    let mine = fx.content.list_posts_by_author(alice.id).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert!(fx.content.list_posts_by_author(bob.id).await.unwrap().is_empty());
}
