//! JWT session token implementation.

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use blog_core::ports::{SESSION_TTL_HOURS, TokenClaims, TokenError, TokenService};

/// Development fallback. Never meant for a real deployment.
pub const DEFAULT_SECRET: &str = "secret-key-change-in-production";

/// JWT token service configuration.
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"***")
            .field("issuer", &self.issuer)
            .finish()
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_SECRET.to_string(),
            issuer: "simple-blog".to_string(),
        }
    }
}

impl JwtConfig {
    /// Read `JWT_SECRET` and `JWT_ISSUER`, warning loudly on the default secret.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_SECRET.to_string());

        let config = Self {
            secret,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "simple-blog".to_string()),
        };

        if config.uses_default_secret() {
            let is_production = std::env::var("RUST_ENV")
                .map(|v| v == "production" || v == "prod")
                .unwrap_or(false);

            if is_production {
                tracing::error!(
                    "SECURITY: Using default JWT secret in production! Set JWT_SECRET environment variable."
                );
            } else {
                tracing::warn!("Using default JWT secret. Set JWT_SECRET for production use.");
            }
        }

        config
    }

    pub fn uses_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String, // user_id
    name: String,
    exp: i64,
    iat: i64,
    iss: String,
}

/// HS256 token service. The secret is fixed for the life of the service.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    config: JwtConfig,
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_required_spec_claims(&["exp", "iat", "iss", "sub"]);
        // expiry is absolute
        validation.leeway = 0;

        Self {
            encoding_key,
            decoding_key,
            validation,
            config,
        }
    }

    /// Issue a token as if it had been issued at `issued_at`.
    pub fn issue_at(
        &self,
        user_id: Uuid,
        username: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let exp = issued_at + TimeDelta::hours(SESSION_TTL_HOURS);

        let claims = Claims {
            sub: user_id.to_string(),
            name: username.to_string(),
            exp: exp.timestamp(),
            iat: issued_at.timestamp(),
            iss: self.config.issuer.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, user_id: Uuid, username: &str) -> Result<String, TokenError> {
        self.issue_at(user_id, username, Utc::now())
    }

    fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::BadSignature,
                _ => TokenError::Malformed(e.to_string()),
            })?;

        let user_id = Uuid::parse_str(&token_data.claims.sub)
            .map_err(|e| TokenError::Malformed(e.to_string()))?;

        Ok(TokenClaims {
            user_id,
            username: token_data.claims.name,
            issued_at: token_data.claims.iat,
            expires_at: token_data.claims.exp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key".to_string(),
            issuer: "test-issuer".to_string(),
        }
    }

    #[test]
    fn test_issue_and_verify() {
        let service = JwtTokenService::new(test_config());
        let user_id = Uuid::new_v4();

        let token = service.issue(user_id, "alice").unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.expires_at - claims.issued_at, 24 * 3600);
    }

    #[test]
    fn test_expired_after_24_hours() {
        let service = JwtTokenService::new(test_config());
        let issued = Utc::now() - TimeDelta::hours(24) - TimeDelta::seconds(5);

        let token = service.issue_at(Uuid::new_v4(), "alice", issued).unwrap();

        assert!(matches!(service.verify(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn test_still_valid_before_24_hours() {
        let service = JwtTokenService::new(test_config());
        let user_id = Uuid::new_v4();
        let issued = Utc::now() - TimeDelta::hours(23);

        let token = service.issue_at(user_id, "alice", issued).unwrap();

        assert_eq!(service.verify(&token).unwrap().user_id, user_id);
    }

    #[test]
    fn test_wrong_secret_is_bad_signature() {
        let issuer = JwtTokenService::new(test_config());
        let verifier = JwtTokenService::new(JwtConfig {
            secret: "another-secret".to_string(),
            ..test_config()
        });

        let token = issuer.issue(Uuid::new_v4(), "alice").unwrap();

        assert!(matches!(verifier.verify(&token), Err(TokenError::BadSignature)));
    }

    #[test]
    fn test_tampered_payload_is_bad_signature() {
        let service = JwtTokenService::new(test_config());
        let token = service.issue(Uuid::new_v4(), "alice").unwrap();
        let other = service.issue(Uuid::new_v4(), "mallory").unwrap();

        // header and signature from one token, payload from another
        let parts: Vec<&str> = token.split('.').collect();
        let other_parts: Vec<&str> = other.split('.').collect();
        let forged = format!("{}.{}.{}", parts[0], other_parts[1], parts[2]);

        assert!(matches!(service.verify(&forged), Err(TokenError::BadSignature)));
    }

    #[test]
    fn test_garbage_is_malformed() {
        let service = JwtTokenService::new(test_config());

        let err = service.verify("invalid-token").unwrap_err();

        assert!(matches!(err, TokenError::Malformed(_)));
        assert_eq!(err.kind(), "malformed");
    }

    #[test]
    fn test_wrong_issuer_rejected() {
        let service1 = JwtTokenService::new(JwtConfig {
            secret: "same-secret".to_string(),
            issuer: "issuer1".to_string(),
        });
        let service2 = JwtTokenService::new(JwtConfig {
            secret: "same-secret".to_string(),
            issuer: "issuer2".to_string(),
        });

        let token = service1.issue(Uuid::new_v4(), "alice").unwrap();

        assert!(service2.verify(&token).is_err());
    }

    #[test]
    fn test_ttl_seconds() {
        let service = JwtTokenService::new(test_config());
        assert_eq!(service.ttl_seconds(), 86400);
    }

    #[test]
    fn test_debug_hides_secret() {
        let rendered = format!("{:?}", test_config());
        assert!(!rendered.contains("test-secret-key"));
        assert!(JwtConfig::default().uses_default_secret());
    }
}
