//! Authentication middleware and extractors.

use actix_web::http::{StatusCode, header};
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, dev::Payload, web};
use std::future::{Ready, ready};
use std::sync::Arc;

use blog_core::ports::{TokenClaims, TokenService};

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "token";

const LOGIN_PATH: &str = "/login";

/// Authenticated user identity extractor.
///
/// Looks for the session token in the `token` cookie first, then in an
/// `Authorization: Bearer` header. Without a valid token the request is
/// redirected to the login page and the handler never runs:
/// ```ignore
/// async fn profile(identity: Identity) -> impl Responder {
///     format!("Hello, {}!", identity.username)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: uuid::Uuid,
    pub username: String,
}

impl From<TokenClaims> for Identity {
    fn from(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.user_id,
            username: claims.username,
        }
    }
}

/// Why a request did not get an [`Identity`].
#[derive(Debug, thiserror::Error)]
pub enum AuthRejection {
    #[error("authentication required")]
    Unauthenticated,

    #[error("token service not configured")]
    Misconfigured,
}

impl ResponseError for AuthRejection {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthRejection::Unauthenticated => StatusCode::FOUND,
            AuthRejection::Misconfigured => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AuthRejection::Unauthenticated => HttpResponse::Found()
                .insert_header((header::LOCATION, LOGIN_PATH))
                .finish(),
            AuthRejection::Misconfigured => HttpResponse::InternalServerError().finish(),
        }
    }
}

/// Token from the session cookie, falling back to a Bearer header.
fn session_token(req: &HttpRequest) -> Option<String> {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        if !cookie.value().is_empty() {
            return Some(cookie.value().to_string());
        }
    }

    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

fn authenticate(req: &HttpRequest) -> Result<Identity, AuthRejection> {
    let Some(tokens) = req.app_data::<web::Data<Arc<dyn TokenService>>>() else {
        tracing::error!("TokenService not found in app data");
        return Err(AuthRejection::Misconfigured);
    };

    let Some(token) = session_token(req) else {
        return Err(AuthRejection::Unauthenticated);
    };

    match tokens.verify(&token) {
        Ok(claims) => Ok(Identity::from(claims)),
        Err(e) => {
            tracing::debug!(reason = e.kind(), path = %req.path(), "Session token rejected");
            Err(AuthRejection::Unauthenticated)
        }
    }
}

impl FromRequest for Identity {
    type Error = AuthRejection;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

/// Optional identity extractor - never redirects. Used by public pages.
pub struct OptionalIdentity(pub Option<Identity>);

impl OptionalIdentity {
    pub fn identity(&self) -> Option<&Identity> {
        self.0.as_ref()
    }
}

impl FromRequest for OptionalIdentity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(OptionalIdentity(authenticate(req).ok())))
    }
}
