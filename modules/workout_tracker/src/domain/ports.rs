use crate::contract::model::AuthToken;

/// Issues and checks access tokens for authenticated users.
pub trait CredentialService: Send + Sync {
    fn issue(&self, user_id: &str) -> anyhow::Result<AuthToken>;
    /// Returns the user id the token was issued for.
    fn validate(&self, token: &str) -> anyhow::Result<String>;
}

pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> anyhow::Result<String>;
    fn verify(&self, password: &str, hash: &str) -> bool;
}
