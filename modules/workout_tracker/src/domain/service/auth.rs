use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::contract::model::{AuthToken, NewUser, User};
use crate::domain::error::DomainError;
use crate::domain::ports::{CredentialService, PasswordHasher};
use crate::domain::repo::{RepoError, UsersRepository};
use crate::domain::service::plans::require;

pub const DEFAULT_MIN_PASSWORD_LEN: usize = 6;

/// Local accounts: registration, password login and token checks.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UsersRepository>,
    credentials: Arc<dyn CredentialService>,
    hasher: Arc<dyn PasswordHasher>,
    min_password_len: usize,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UsersRepository>,
        credentials: Arc<dyn CredentialService>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            users,
            credentials,
            hasher,
            min_password_len: DEFAULT_MIN_PASSWORD_LEN,
        }
    }

    pub fn with_min_password_len(mut self, len: usize) -> Self {
        self.min_password_len = len;
        self
    }

    #[instrument(name = "workout_tracker.auth.register", skip(self, new_user))]
    pub async fn register(&self, new_user: NewUser) -> Result<User, DomainError> {
        info!("Registering user");

        let name = require(&new_user.name, "name")?;
        let email = normalize_email(&new_user.email)?;
        if new_user.password.chars().count() < self.min_password_len {
            return Err(DomainError::invalid_input(format!(
                "password must be at least {} characters",
                self.min_password_len
            )));
        }

        if self
            .users
            .email_exists(&email)
            .await
            .map_err(DomainError::storage)?
        {
            return Err(email_taken());
        }

        let password_hash = self
            .hasher
            .hash(&new_user.password)
            .map_err(|e| DomainError::internal(format!("password hashing failed: {e}")))?;

        let user = User {
            id: Uuid::new_v4().to_string(),
            name,
            email,
            created_at: Utc::now(),
        };

        self.users
            .insert(user.clone(), password_hash)
            .await
            .map_err(|e| match e {
                RepoError::Duplicate => email_taken(),
                other => DomainError::storage(other),
            })?;

        info!(user_id = %user.id, "Successfully registered user");
        Ok(user)
    }

    #[instrument(name = "workout_tracker.auth.login", skip(self, email, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthToken, DomainError> {
        debug!("Login attempt");

        let email = email.trim().to_lowercase();
        if email.is_empty() || password.is_empty() {
            return Err(DomainError::invalid_input("email and password are required"));
        }

        let record = self
            .users
            .find_by_email(&email)
            .await
            .map_err(DomainError::storage)?;

        let Some(record) = record else {
            warn!("Login rejected");
            return Err(invalid_credentials());
        };
        if !self.hasher.verify(password, &record.password_hash) {
            warn!(user_id = %record.user.id, "Login rejected");
            return Err(invalid_credentials());
        }

        let token = self
            .credentials
            .issue(&record.user.id)
            .map_err(|e| DomainError::internal(format!("token issuance failed: {e}")))?;

        info!(user_id = %record.user.id, "User logged in");
        Ok(token)
    }

    #[instrument(name = "workout_tracker.auth.get_user", skip(self), fields(user_id = %user_id.trim()))]
    pub async fn get_user(&self, user_id: &str) -> Result<User, DomainError> {
        let user_id = require(user_id, "user id")?;
        self.users
            .find_by_id(&user_id)
            .await
            .map_err(DomainError::storage)?
            .ok_or_else(|| DomainError::not_found("user", user_id))
    }

    /// Resolve a bearer token to the user id it was issued for.
    pub fn authenticate(&self, token: &str) -> Result<String, DomainError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(DomainError::unauthorized("missing access token"));
        }
        self.credentials.validate(token).map_err(|e| {
            debug!(error = %e, "Access token rejected");
            DomainError::unauthorized("invalid or expired access token")
        })
    }
}

fn normalize_email(raw: &str) -> Result<String, DomainError> {
    let email = raw.trim().to_lowercase();
    if email.is_empty() {
        return Err(DomainError::invalid_input("email is required"));
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(DomainError::invalid_input(format!("invalid email: '{email}'"))),
    }
}

fn email_taken() -> DomainError {
    DomainError::conflict("email is already registered")
}

fn invalid_credentials() -> DomainError {
    DomainError::unauthorized("invalid email or password")
}
