/// Redact credentials from a DSN for logging.
pub fn redact_credentials_in_dsn(dsn: Option<&str>) -> String {
    match dsn {
        Some(dsn) if dsn.contains('@') => {
            if let Ok(mut parsed) = url::Url::parse(dsn) {
                if parsed.password().is_some() {
                    let _ = parsed.set_password(Some("***"));
                }
                parsed.to_string()
            } else {
                "***".to_string()
            }
        }
        Some(dsn) => dsn.to_string(),
        None => "none".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_is_masked() {
        let out = redact_credentials_in_dsn(Some("postgres://app:secret@db:5432/workouts"));
        assert_eq!(out, "postgres://app:***@db:5432/workouts");
        assert!(!out.contains("secret"));
    }

    #[test]
    fn dsn_without_credentials_is_kept() {
        assert_eq!(
            redact_credentials_in_dsn(Some("sqlite://database/workouts.db")),
            "sqlite://database/workouts.db"
        );
        assert_eq!(redact_credentials_in_dsn(None), "none");
    }

    #[test]
    fn unparsable_dsn_with_at_sign_is_hidden() {
        assert_eq!(redact_credentials_in_dsn(Some("not a url @ all")), "***");
    }
}
