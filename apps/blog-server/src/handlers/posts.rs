//! Post pages: listings, detail, and the author-only create/edit/delete flow.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use tera::Context;
use uuid::Uuid;

use blog_core::domain::PostDraft;
use blog_core::error::DomainError;
use blog_shared::dto::PostForm;

use super::{parse_post_id, post_path, redirect};
use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::AppResult;
use crate::state::AppState;
use crate::views::{self, base_context};

/// Posts shown on the home page.
const HOME_LIMIT: u64 = 10;

fn draft_from(form: PostForm) -> PostDraft {
    PostDraft {
        title: form.title,
        content: form.content,
        excerpt: form.excerpt,
        category: form.category,
        tags: form.tags,
    }
}

async fn render_listing(
    state: &AppState,
    identity: Option<&Identity>,
    title: &str,
    template: &str,
    limit: Option<u64>,
) -> AppResult<HttpResponse> {
    let posts = state.content.list_published(limit).await?;
    let names = state
        .credentials
        .usernames(posts.iter().map(|p| p.author_id))
        .await?;

    let mut ctx = base_context(title, identity);
    ctx.insert("posts", &views::post_views(&posts, &names));
    state.views.page(StatusCode::OK, template, &ctx)
}

/// GET /
pub async fn home(state: web::Data<AppState>, identity: OptionalIdentity) -> AppResult<HttpResponse> {
    render_listing(&state, identity.identity(), "Home", "home.html", Some(HOME_LIMIT)).await
}

/// GET /posts
pub async fn list(state: web::Data<AppState>, identity: OptionalIdentity) -> AppResult<HttpResponse> {
    render_listing(&state, identity.identity(), "All Posts", "posts/list.html", None).await
}

/// GET /posts/{id}
pub async fn show(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post_id = parse_post_id(&path)?;
    let post = state.content.get_post(post_id).await?;
    let comments = state.content.list_comments_for_post(post_id).await?;

    let names = state
        .credentials
        .usernames(
            comments
                .iter()
                .map(|c| c.author_id)
                .chain(std::iter::once(post.author_id)),
        )
        .await?;

    let is_owner = identity
        .identity()
        .is_some_and(|i| post.is_owned_by(i.user_id));

    let mut ctx = base_context(&post.title, identity.identity());
    ctx.insert("post", &views::post_view(&post, &names));
    ctx.insert(
        "comments",
        &comments
            .iter()
            .map(|c| views::comment_view(c, &names))
            .collect::<Vec<_>>(),
    );
    ctx.insert("is_owner", &is_owner);
    state.views.page(StatusCode::OK, "posts/detail.html", &ctx)
}

fn form_context(title: &str, identity: &Identity, form: &PostForm, error: Option<&str>) -> Context {
    let mut ctx = base_context(title, Some(identity));
    ctx.insert("form", form);
    ctx.insert("error", &error);
    ctx
}

/// GET /posts/new
pub async fn new_form(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let ctx = form_context("Create Post", &identity, &PostForm::default(), None);
    state.views.page(StatusCode::OK, "posts/create.html", &ctx)
}

/// POST /posts
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    form: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();

    match state
        .content
        .create_post(identity.user_id, draft_from(form.clone()))
        .await
    {
        Ok(post) => Ok(redirect(&post_path(post.id))),
        Err(DomainError::Validation(e)) => {
            let ctx = form_context("Create Post", &identity, &form, Some(&e.message));
            state.views.page(StatusCode::BAD_REQUEST, "posts/create.html", &ctx)
        }
        Err(e) => Err(e.into()),
    }
}

fn edit_context(post_id: Uuid, identity: &Identity, form: &PostForm, error: Option<&str>) -> Context {
    let mut ctx = form_context("Edit Post", identity, form, error);
    ctx.insert("post_id", &post_id);
    ctx
}

/// GET /posts/{id}/edit
pub async fn edit_form(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post_id = parse_post_id(&path)?;
    let post = state.content.owned_post(post_id, identity.user_id).await?;

    let form = PostForm {
        title: post.title,
        content: post.content,
        excerpt: post.excerpt,
        category: post.category,
        tags: post.tags,
    };
    let ctx = edit_context(post_id, &identity, &form, None);
    state.views.page(StatusCode::OK, "posts/edit.html", &ctx)
}

/// POST /posts/{id}/update
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
    form: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    let post_id = parse_post_id(&path)?;
    let form = form.into_inner();

    match state
        .content
        .update_post(post_id, identity.user_id, draft_from(form.clone()))
        .await
    {
        Ok(post) => Ok(redirect(&post_path(post.id))),
        Err(DomainError::Validation(e)) => {
            let ctx = edit_context(post_id, &identity, &form, Some(&e.message));
            state.views.page(StatusCode::BAD_REQUEST, "posts/edit.html", &ctx)
        }
        Err(e) => Err(e.into()),
    }
}

/// POST /posts/{id}/delete
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post_id = parse_post_id(&path)?;
    state.content.delete_post(post_id, identity.user_id).await?;
    Ok(redirect("/posts"))
}
