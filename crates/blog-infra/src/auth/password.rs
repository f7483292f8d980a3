//! Argon2 password hashing implementation.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use blog_core::ports::{AuthError, PasswordService};

/// Argon2id password service. Hashes are self-describing PHC strings, so
/// verification works across parameter changes.
pub struct Argon2PasswordService {
    argon2: Argon2<'static>,
}

impl Argon2PasswordService {
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }

    /// Custom cost parameters (memory KiB, iterations, lanes).
    pub fn with_params(m_cost: u32, t_cost: u32, p_cost: u32) -> Result<Self, AuthError> {
        let params = Params::new(m_cost, t_cost, p_cost, None)
            .map_err(|e| AuthError::HashingError(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

impl Default for Argon2PasswordService {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordService for Argon2PasswordService {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| AuthError::HashingError(e.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(error = %e, "Stored password hash is malformed");
                return false;
            }
        };

        self.argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let service = Argon2PasswordService::new();
        let password = "secure_password_123";

        let hash = service.hash(password).unwrap();
        assert!(service.verify(password, &hash));
        assert!(!service.verify("wrong_password", &hash));
    }

    #[test]
    fn test_hash_is_salted() {
        let service = Argon2PasswordService::with_params(8, 1, 1).unwrap();

        let first = service.hash("secret1").unwrap();
        let second = service.hash("secret1").unwrap();

        assert_ne!(first, second);
        assert!(!first.contains("secret1"));
        assert!(service.verify("secret1", &first));
        assert!(service.verify("secret1", &second));
    }

    #[test]
    fn test_malformed_hash_is_mismatch() {
        let service = Argon2PasswordService::with_params(8, 1, 1).unwrap();
        assert!(!service.verify("secret1", "not-a-phc-string"));
        assert!(!service.verify("secret1", ""));
    }

    #[test]
    fn test_default_service_verifies_light_hash() {
        let light = Argon2PasswordService::with_params(8, 1, 1).unwrap();
        let hash = light.hash("secret1").unwrap();

        assert!(Argon2PasswordService::new().verify("secret1", &hash));
    }
}
