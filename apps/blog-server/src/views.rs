//! Template loading and view-model assembly.

use std::collections::HashMap;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, http::header::ContentType};
use tera::{Context, Tera};
use uuid::Uuid;

use blog_core::domain::{Comment, Post, User};
use blog_shared::view::{UNKNOWN_AUTHOR, display_time};
use blog_shared::{CommentView, PostView, UserView};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};

/// Every template under the views directory, parsed once at startup.
/// Templates are addressed by their path relative to that directory.
pub struct Views {
    tera: Tera,
}

impl Views {
    pub fn load(dir: &str) -> Result<Self, tera::Error> {
        let pattern = format!("{}/**/*.html", dir.trim_end_matches('/'));
        let tera = Tera::new(&pattern)?;

        tracing::info!(
            dir = %dir,
            templates = tera.get_template_names().count(),
            "Templates loaded"
        );
        Ok(Self { tera })
    }

    pub fn render(&self, template: &str, ctx: &Context) -> AppResult<String> {
        self.tera.render(template, ctx).map_err(|e| {
            tracing::error!(template = %template, error = ?e, "Template rendering failed");
            AppError::Internal(format!("rendering {template}"))
        })
    }

    /// Render a full HTML response with the given status.
    pub fn page(&self, status: StatusCode, template: &str, ctx: &Context) -> AppResult<HttpResponse> {
        let body = self.render(template, ctx)?;
        Ok(HttpResponse::build(status)
            .content_type(ContentType::html())
            .body(body))
    }
}

/// Context every page starts from: the navigation needs to know who is signed in.
pub fn base_context(title: &str, identity: Option<&Identity>) -> Context {
    let mut ctx = Context::new();
    ctx.insert("title", title);
    ctx.insert("current_user", &identity.map(|i| i.username.as_str()));
    ctx.insert("error", &None::<String>);
    ctx
}

fn author_name(names: &HashMap<Uuid, String>, id: Uuid) -> String {
    names
        .get(&id)
        .cloned()
        .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string())
}

pub fn post_view(post: &Post, names: &HashMap<Uuid, String>) -> PostView {
    PostView {
        id: post.id,
        title: post.title.clone(),
        content: post.content.clone(),
        excerpt: post.excerpt.clone(),
        category: post.category.clone(),
        tags: post.tags.clone(),
        tag_list: post.tag_list().into_iter().map(str::to_string).collect(),
        author_id: post.author_id,
        author: author_name(names, post.author_id),
        created_at: display_time(&post.created_at),
        updated_at: display_time(&post.updated_at),
    }
}

pub fn post_views(posts: &[Post], names: &HashMap<Uuid, String>) -> Vec<PostView> {
    posts.iter().map(|p| post_view(p, names)).collect()
}

pub fn comment_view(comment: &Comment, names: &HashMap<Uuid, String>) -> CommentView {
    CommentView {
        id: comment.id,
        content: comment.content.clone(),
        author: author_name(names, comment.author_id),
        created_at: display_time(&comment.created_at),
    }
}

pub fn user_view(user: &User) -> UserView {
    UserView {
        id: user.id,
        username: user.username.clone(),
        email: user.email.clone(),
        bio: user.bio.clone(),
        joined: display_time(&user.created_at),
    }
}
