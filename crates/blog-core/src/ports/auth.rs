//! Authentication ports: session tokens and password hashing.

use uuid::Uuid;

/// Lifetime of a session token, counted from issuance. Never extended.
pub const SESSION_TTL_HOURS: i64 = 24;

/// Claims carried by a verified session token.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub user_id: Uuid,
    pub username: String,
    pub issued_at: i64,
    pub expires_at: i64,
}

/// Token service trait for signed session tokens.
pub trait TokenService: Send + Sync {
    /// Issue a token for a user, valid for [`SESSION_TTL_HOURS`].
    fn issue(&self, user_id: Uuid, username: &str) -> Result<String, TokenError>;

    /// Check signature and expiry, returning the bound identity.
    fn verify(&self, token: &str) -> Result<TokenClaims, TokenError>;

    /// Token lifetime in seconds, for cookie max-age.
    fn ttl_seconds(&self) -> i64 {
        SESSION_TTL_HOURS * 3600
    }
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password with a fresh salt.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a stored hash. A malformed hash is a mismatch.
    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// Credential errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Same variant for unknown email and wrong password.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("Hashing error: {0}")]
    HashingError(String),
}

/// Session token errors. Callers treat all of them as "not logged in".
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,

    #[error("Token signature mismatch")]
    BadSignature,

    #[error("Malformed token: {0}")]
    Malformed(String),

    #[error("Token signing failed: {0}")]
    Signing(String),
}

impl TokenError {
    /// Short label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            TokenError::Expired => "expired",
            TokenError::BadSignature => "bad_signature",
            TokenError::Malformed(_) => "malformed",
            TokenError::Signing(_) => "signing",
        }
    }
}
