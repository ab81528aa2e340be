use anyhow::Context;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::contract::model::AuthToken;
use crate::domain::ports::CredentialService;

/// Ten years.
const MAX_TTL_SECS: u64 = 10 * 365 * 24 * 60 * 60;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iss: String,
    iat: i64,
    exp: i64,
}

/// HS256 access tokens carrying the user id in `sub`.
pub struct JwtCredentialService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    ttl: Duration,
}

impl JwtCredentialService {
    pub fn new(secret: &str, issuer: impl Into<String>, ttl_secs: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            issuer: issuer.into(),
            ttl: Duration::seconds(ttl_secs.min(MAX_TTL_SECS) as i64),
        }
    }

    fn validation(&self) -> Validation {
        let mut v = Validation::new(Algorithm::HS256);
        v.set_issuer(&[self.issuer.as_str()]);
        v.set_required_spec_claims(&["exp", "iss", "sub"]);
        v.leeway = 0;
        v
    }
}

impl CredentialService for JwtCredentialService {
    fn issue(&self, user_id: &str) -> anyhow::Result<AuthToken> {
        let now = Utc::now();
        let expires_at = now + self.ttl;
        let claims = Claims {
            sub: user_id.to_string(),
            iss: self.issuer.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };
        let access_token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .context("failed to sign access token")?;
        Ok(AuthToken {
            access_token,
            expires_at,
        })
    }

    fn validate(&self, token: &str) -> anyhow::Result<String> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation())
            .context("invalid access token")?;
        if data.claims.sub.trim().is_empty() {
            anyhow::bail!("access token has an empty subject");
        }
        Ok(data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_tokens_validate_to_the_same_user() {
        let svc = JwtCredentialService::new("secret", "workout-tracker", 3600);
        let token = svc.issue("user-1").unwrap();
        assert!(token.expires_at > Utc::now());
        assert_eq!(svc.validate(&token.access_token).unwrap(), "user-1");
    }

    #[test]
    fn wrong_secret_or_issuer_is_rejected() {
        let issuer = JwtCredentialService::new("secret", "workout-tracker", 3600);
        let token = issuer.issue("user-1").unwrap().access_token;

        let other_secret = JwtCredentialService::new("other", "workout-tracker", 3600);
        assert!(other_secret.validate(&token).is_err());

        let other_issuer = JwtCredentialService::new("secret", "someone-else", 3600);
        assert!(other_issuer.validate(&token).is_err());
    }

    #[test]
    fn expired_tokens_are_rejected() {
        let svc = JwtCredentialService::new("secret", "workout-tracker", 3600);
        let past = Utc::now() - Duration::hours(2);
        let claims = Claims {
            sub: "user-1".into(),
            iss: "workout-tracker".into(),
            iat: past.timestamp(),
            exp: (past + Duration::minutes(1)).timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &svc.encoding).unwrap();
        assert!(svc.validate(&token).is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        let svc = JwtCredentialService::new("secret", "workout-tracker", 3600);
        assert!(svc.validate("not-a-token").is_err());
    }
}
