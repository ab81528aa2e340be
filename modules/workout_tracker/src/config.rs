use serde::{Deserialize, Serialize};

/// Configuration for the workout_tracker module (`modules.workout_tracker`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkoutTrackerConfig {
    /// HS256 signing secret for access tokens. Required.
    #[serde(default)]
    pub jwt_secret: String,
    #[serde(default = "default_jwt_issuer")]
    pub jwt_issuer: String,
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: u64,
    #[serde(default = "default_min_password_len")]
    pub min_password_len: usize,
}

impl Default for WorkoutTrackerConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            jwt_issuer: default_jwt_issuer(),
            token_ttl_secs: default_token_ttl_secs(),
            min_password_len: default_min_password_len(),
        }
    }
}

impl WorkoutTrackerConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.jwt_secret.trim().is_empty() {
            anyhow::bail!("modules.workout_tracker.jwt_secret must be set");
        }
        if self.token_ttl_secs == 0 {
            anyhow::bail!("modules.workout_tracker.token_ttl_secs must be positive");
        }
        Ok(())
    }
}

fn default_jwt_issuer() -> String {
    "workout-tracker".to_string()
}

fn default_token_ttl_secs() -> u64 {
    24 * 60 * 60
}

fn default_min_password_len() -> usize {
    6
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let cfg: WorkoutTrackerConfig =
            serde_json::from_value(serde_json::json!({ "jwt_secret": "s3cret" })).unwrap();
        assert_eq!(cfg.jwt_issuer, "workout-tracker");
        assert_eq!(cfg.token_ttl_secs, 86_400);
        assert_eq!(cfg.min_password_len, 6);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn empty_secret_is_rejected() {
        let cfg = WorkoutTrackerConfig::default();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let res: Result<WorkoutTrackerConfig, _> =
            serde_json::from_value(serde_json::json!({ "jwt_secret": "x", "bogus": 1 }));
        assert!(res.is_err());
    }
}
