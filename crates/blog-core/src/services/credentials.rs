//! Credential store - registration, login and user lookup.

use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{User, mask_email};
use crate::error::{DomainError, RepoError};
use crate::ports::{AuthError, PasswordService, UserRepository};
use crate::validation;

/// Verified against on unknown-email logins so both failure paths cost one hash check.
const DUMMY_PASSWORD: &str = "unknown-account-placeholder";

/// Owns user identity and password verification.
#[derive(Clone)]
pub struct CredentialStore {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
    dummy_hash: Option<Arc<str>>,
}

impl CredentialStore {
    pub fn new(users: Arc<dyn UserRepository>, passwords: Arc<dyn PasswordService>) -> Self {
        let dummy_hash = match passwords.hash(DUMMY_PASSWORD) {
            Ok(hash) => Some(Arc::from(hash)),
            Err(e) => {
                tracing::warn!(error = %e, "Could not prepare dummy password hash");
                None
            }
        };
        Self {
            users,
            passwords,
            dummy_hash,
        }
    }

    pub fn hash_password(&self, plain: &str) -> Result<String, AuthError> {
        self.passwords.hash(plain)
    }

    pub fn verify_password(&self, plain: &str, hash: &str) -> bool {
        self.passwords.verify(plain, hash)
    }

    /// Validate, hash and persist a new account.
    ///
    /// Fields are checked in order (username, email, password) and nothing is
    /// written unless all three pass.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, DomainError> {
        validation::validate_username(username)?;
        validation::validate_email(email)?;
        validation::validate_password(password)?;

        let password_hash = self.hash_password(password)?;
        let user = User::new(username.to_string(), email.to_string(), password_hash);

        match self.users.insert(user).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, username = %user.username, "User registered");
                Ok(user)
            }
            Err(RepoError::Constraint(detail)) => {
                tracing::info!(
                    user_email = %mask_email(email),
                    detail = %detail,
                    "Registration rejected by unique constraint"
                );
                Err(DomainError::Conflict)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Look up by exact email and check the password.
    ///
    /// Unknown email and wrong password produce the same error, and both run
    /// one password verification.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, DomainError> {
        let user = match self.users.find_by_email(email).await? {
            Some(user) => user,
            None => {
                if let Some(hash) = &self.dummy_hash {
                    let _ = self.verify_password(password, hash);
                }
                tracing::debug!(user_email = %mask_email(email), "Login for unknown email");
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        if !self.verify_password(password, &user.password_hash) {
            tracing::debug!(user_id = %user.id, "Login with wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        Ok(user)
    }

    pub async fn find_user(&self, id: Uuid) -> Result<User, DomainError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(id))
    }

    /// Resolve usernames for a set of user ids. Unknown ids are left out.
    pub async fn usernames(
        &self,
        ids: impl IntoIterator<Item = Uuid>,
    ) -> Result<HashMap<Uuid, String>, DomainError> {
        let mut ids: Vec<Uuid> = ids.into_iter().collect();
        ids.sort_unstable();
        ids.dedup();

        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let users = self.users.find_by_ids(&ids).await?;
        Ok(users.into_iter().map(|u| (u.id, u.username)).collect())
    }
}
