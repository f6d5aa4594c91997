use std::fmt;

pub const BUCKET_NAME_VAR: &str = "bucket_name";
pub const ACCESS_KEY_ID_VAR: &str = "aws_access_key_id";
pub const SECRET_ACCESS_KEY_VAR: &str = "aws_secret_access_key";
pub const SESSION_TOKEN_VAR: &str = "aws_session_token";

/// Raw settings as read from the environment; nothing is validated yet.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct DrawSettings {
    pub bucket_name: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub session_token: Option<String>,
}

/// Settings required to reach the entry bucket.
#[derive(Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub bucket: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("bucket_name is not set")]
    MissingBucket,
    #[error("aws_key is not set")]
    MissingAccessKey,
    #[error("aws_secret is not set")]
    MissingSecret,
}

impl DrawSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            bucket_name: lookup(BUCKET_NAME_VAR),
            access_key_id: lookup(ACCESS_KEY_ID_VAR),
            secret_access_key: lookup(SECRET_ACCESS_KEY_VAR),
            session_token: lookup(SESSION_TOKEN_VAR),
        }
    }

    /// Checks the required settings in order and reports the first one that
    /// is absent or empty.
    pub fn validate(&self) -> Result<StoreConfig, ConfigError> {
        let bucket = required(&self.bucket_name).ok_or(ConfigError::MissingBucket)?;
        let access_key_id = required(&self.access_key_id).ok_or(ConfigError::MissingAccessKey)?;
        let secret_access_key =
            required(&self.secret_access_key).ok_or(ConfigError::MissingSecret)?;

        Ok(StoreConfig {
            bucket,
            access_key_id,
            secret_access_key,
            session_token: required(&self.session_token),
        })
    }
}

fn required(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|value| !value.is_empty()).cloned()
}

fn redacted(value: &Option<String>) -> &'static str {
    match value {
        Some(_) => "<redacted>",
        None => "<unset>",
    }
}

impl fmt::Debug for DrawSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawSettings")
            .field("bucket_name", &self.bucket_name)
            .field("access_key_id", &redacted(&self.access_key_id))
            .field("secret_access_key", &redacted(&self.secret_access_key))
            .field("session_token", &redacted(&self.session_token))
            .finish()
    }
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("bucket", &self.bucket)
            .field("access_key_id", &"<redacted>")
            .field("secret_access_key", &"<redacted>")
            .field("session_token", &redacted(&self.session_token))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn settings_from(pairs: &[(&str, &str)]) -> DrawSettings {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        DrawSettings::from_lookup(|name| values.get(name).cloned())
    }

    #[test]
    fn validates_when_everything_is_set() {
        let config = settings_from(&[
            ("bucket_name", "bucket"),
            ("aws_access_key_id", "id"),
            ("aws_secret_access_key", "secret"),
        ])
        .validate()
        .expect("complete settings should validate");

        assert_eq!(config.bucket, "bucket");
        assert_eq!(config.access_key_id, "id");
        assert_eq!(config.secret_access_key, "secret");
        assert_eq!(config.session_token, None);
    }

    #[test]
    fn reports_missing_bucket_name() {
        let error = settings_from(&[("aws_access_key_id", "id"), ("aws_secret_access_key", "secret")])
            .validate()
            .expect_err("missing bucket should fail");
        assert_eq!(error, ConfigError::MissingBucket);
        assert_eq!(error.to_string(), "bucket_name is not set");
    }

    #[test]
    fn reports_missing_access_key() {
        let error = settings_from(&[("bucket_name", "bucket"), ("aws_secret_access_key", "secret")])
            .validate()
            .expect_err("missing key should fail");
        assert_eq!(error.to_string(), "aws_key is not set");
    }

    #[test]
    fn reports_missing_secret() {
        let error = settings_from(&[("bucket_name", "bucket"), ("aws_access_key_id", "id")])
            .validate()
            .expect_err("missing secret should fail");
        assert_eq!(error.to_string(), "aws_secret is not set");
    }

    #[test]
    fn treats_empty_values_as_missing() {
        let error = settings_from(&[
            ("bucket_name", ""),
            ("aws_access_key_id", "id"),
            ("aws_secret_access_key", "secret"),
        ])
        .validate()
        .expect_err("empty bucket should fail");
        assert_eq!(error, ConfigError::MissingBucket);
    }

    #[test]
    fn forwards_session_token_when_present() {
        let config = settings_from(&[
            ("bucket_name", "bucket"),
            ("aws_access_key_id", "id"),
            ("aws_secret_access_key", "secret"),
            ("aws_session_token", "token"),
        ])
        .validate()
        .expect("settings should validate");
        assert_eq!(config.session_token.as_deref(), Some("token"));
    }

    #[test]
    fn debug_output_hides_credentials() {
        let settings = settings_from(&[
            ("bucket_name", "bucket"),
            ("aws_access_key_id", "AKIAEXAMPLE"),
            ("aws_secret_access_key", "very-secret"),
        ]);
        let rendered = format!("{settings:?} {:?}", settings.validate().expect("valid"));
        assert!(!rendered.contains("AKIAEXAMPLE"));
        assert!(!rendered.contains("very-secret"));
        assert!(rendered.contains("bucket"));
    }
}
