//! Registration, login, logout and the profile page.

use std::collections::HashMap;

use actix_web::cookie::{Cookie, SameSite, time::Duration};
use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, web};
use uuid::Uuid;

use blog_core::error::DomainError;
use blog_core::ports::AuthError;
use blog_shared::dto::{LoginForm, RegisterForm};

use super::redirect;
use crate::middleware::auth::{Identity, OptionalIdentity, SESSION_COOKIE};
use crate::middleware::error::AppResult;
use crate::state::AppState;
use crate::views::{self, base_context};

fn session_cookie(token: String, max_age_secs: i64, secure: bool) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(max_age_secs))
        .finish()
}

fn render_login(
    state: &AppState,
    status: StatusCode,
    form: &LoginForm,
    error: Option<&str>,
) -> AppResult<HttpResponse> {
    let mut ctx = base_context("Login", None);
    ctx.insert("form", &form.without_password());
    ctx.insert("error", &error);
    state.views.page(status, "users/login.html", &ctx)
}

fn render_register(
    state: &AppState,
    status: StatusCode,
    form: &RegisterForm,
    error: Option<&str>,
) -> AppResult<HttpResponse> {
    let mut ctx = base_context("Register", None);
    ctx.insert("form", &form.without_password());
    ctx.insert("error", &error);
    state.views.page(status, "users/register.html", &ctx)
}

/// GET /login
pub async fn login_form(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    render_login(&state, StatusCode::OK, &LoginForm::default(), None)
}

/// POST /login
pub async fn login(
    state: web::Data<AppState>,
    form: web::Form<LoginForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();

    let user = match state.credentials.authenticate(&form.email, &form.password).await {
        Ok(user) => user,
        Err(DomainError::Auth(AuthError::InvalidCredentials)) => {
            let message = AuthError::InvalidCredentials.to_string();
            return render_login(&state, StatusCode::UNAUTHORIZED, &form, Some(&message));
        }
        Err(e) => return Err(e.into()),
    };

    let token = state.tokens.issue(user.id, &user.username)?;
    tracing::info!(user_id = %user.id, "User logged in");

    let cookie = session_cookie(token, state.tokens.ttl_seconds(), state.secure_cookie);
    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, "/"))
        .cookie(cookie)
        .finish())
}

/// GET /register
pub async fn register_form(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    render_register(&state, StatusCode::OK, &RegisterForm::default(), None)
}

/// POST /register
pub async fn register(
    state: web::Data<AppState>,
    form: web::Form<RegisterForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();

    match state
        .credentials
        .register(&form.username, &form.email, &form.password)
        .await
    {
        Ok(_) => Ok(redirect("/login")),
        Err(DomainError::Validation(e)) => {
            render_register(&state, StatusCode::BAD_REQUEST, &form, Some(&e.message))
        }
        Err(DomainError::Conflict) => {
            let message = DomainError::Conflict.to_string();
            render_register(&state, StatusCode::BAD_REQUEST, &form, Some(&message))
        }
        Err(e) => Err(e.into()),
    }
}

/// POST /logout
pub async fn logout(identity: OptionalIdentity) -> HttpResponse {
    if let Some(identity) = identity.identity() {
        tracing::info!(user_id = %identity.user_id, "User logged out");
    }

    let mut cookie = Cookie::build(SESSION_COOKIE, "").path("/").finish();
    cookie.make_removal();

    HttpResponse::Found()
        .insert_header((header::LOCATION, "/"))
        .cookie(cookie)
        .finish()
}

/// GET /profile
pub async fn profile(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = state.credentials.find_user(identity.user_id).await?;
    let posts = state.content.list_posts_by_author(user.id).await?;

    let names: HashMap<Uuid, String> = [(user.id, user.username.clone())].into_iter().collect();

    let mut ctx = base_context("Profile", Some(&identity));
    ctx.insert("user", &views::user_view(&user));
    ctx.insert("posts", &views::post_views(&posts, &names));
    state.views.page(StatusCode::OK, "users/profile.html", &ctx)
}
