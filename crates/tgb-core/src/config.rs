use std::{collections::HashMap, env, path::Path, time::Duration};

use tracing::debug;

use crate::{errors::Error, Result};

pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Connection settings shared by every manager.
///
/// Wrap it in an `Arc` and hand the same value to each `ApiClient`; there is no
/// process-wide credential store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub token: String,
    /// Replaces the raw message of transport failures when set.
    pub default_error_message: Option<String>,
    pub request_timeout: Option<Duration>,
    pub api_url: String,
}

impl ClientConfig {
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(Error::Config("bot token must not be empty".to_string()));
        }
        Ok(Self {
            token,
            default_error_message: None,
            request_timeout: None,
            api_url: DEFAULT_API_URL.to_string(),
        })
    }

    pub fn with_default_error_message(mut self, message: impl Into<String>) -> Self {
        self.default_error_message = Some(message.into());
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Load from the process environment and `.env` in the working directory.
    ///
    /// Variables already set in the environment win over `.env` entries.
    pub fn from_env() -> Result<Self> {
        Self::from_env_file(Path::new(".env"), |key| env::var(key).ok())
    }

    /// Like [`ClientConfig::from_env`] with an explicit file and variable lookup.
    /// A missing file is skipped; an unreadable or malformed one is a config error.
    pub fn from_env_file(path: &Path, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let file = read_env_file(path)?;
        debug!(path = %path.display(), entries = file.len(), "env file read");
        Self::from_vars(|key| env(key).or_else(|| file.get(key).cloned()))
    }

    /// Build from an arbitrary variable lookup (the environment, a map in tests).
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let token = lookup("TELEGRAM_BOT_TOKEN").unwrap_or_default();
        if token.trim().is_empty() {
            return Err(Error::Config(
                "TELEGRAM_BOT_TOKEN environment variable is required".to_string(),
            ));
        }

        let mut cfg = Self::new(token.trim())?;

        if let Some(msg) = lookup("TELEGRAM_DEFAULT_ERROR_MESSAGE").and_then(non_empty) {
            cfg.default_error_message = Some(msg);
        }

        if let Some(raw) = lookup("TELEGRAM_REQUEST_TIMEOUT_MS").and_then(non_empty) {
            let ms = raw.trim().parse::<u64>().map_err(|_| {
                Error::Config(format!(
                    "TELEGRAM_REQUEST_TIMEOUT_MS must be a number of milliseconds, got `{raw}`"
                ))
            })?;
            cfg.request_timeout = Some(Duration::from_millis(ms));
        }

        if let Some(url) = lookup("TELEGRAM_API_URL").and_then(non_empty) {
            cfg.api_url = url.trim().trim_end_matches('/').to_string();
        }

        Ok(cfg)
    }

    /// `<api_url>/bot<token>/<method>`
    pub fn endpoint(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.api_url.trim_end_matches('/'),
            self.token,
            method
        )
    }

    /// Download location for a `File::file_path`.
    pub fn file_url(&self, file_path: &str) -> String {
        format!(
            "{}/file/bot{}/{}",
            self.api_url.trim_end_matches('/'),
            self.token,
            file_path
        )
    }
}

fn read_env_file(path: &Path) -> Result<HashMap<String, String>> {
    let entries = match dotenvy::from_path_iter(path) {
        Ok(entries) => entries,
        Err(e) if e.not_found() => return Ok(HashMap::new()),
        Err(e) => return Err(Error::Config(format!("{}: {e}", path.display()))),
    };
    entries
        .collect::<std::result::Result<HashMap<_, _>, _>>()
        .map_err(|e| Error::Config(format!("{}: {e}", path.display())))
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{fs, path::PathBuf};

    fn env_file(name: &str, contents: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("tgb-{}-{name}.env", std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn token_is_required() {
        let err = ClientConfig::from_vars(vars(&[])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = ClientConfig::new("   ").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn optional_settings_are_read() {
        let cfg = ClientConfig::from_vars(vars(&[
            ("TELEGRAM_BOT_TOKEN", "123:abc"),
            ("TELEGRAM_DEFAULT_ERROR_MESSAGE", "Telegram is unreachable"),
            ("TELEGRAM_REQUEST_TIMEOUT_MS", "2500"),
            ("TELEGRAM_API_URL", "http://localhost:8081/"),
        ]))
        .unwrap();

        assert_eq!(cfg.token, "123:abc");
        assert_eq!(
            cfg.default_error_message.as_deref(),
            Some("Telegram is unreachable")
        );
        assert_eq!(cfg.request_timeout, Some(Duration::from_millis(2500)));
        assert_eq!(cfg.endpoint("getMe"), "http://localhost:8081/bot123:abc/getMe");
    }

    #[test]
    fn defaults_apply_when_optional_settings_absent() {
        let cfg = ClientConfig::from_vars(vars(&[("TELEGRAM_BOT_TOKEN", "t")])).unwrap();
        assert_eq!(cfg.default_error_message, None);
        assert_eq!(cfg.request_timeout, None);
        assert_eq!(cfg.endpoint("sendGame"), "https://api.telegram.org/bott/sendGame");
        assert_eq!(
            cfg.file_url("photos/file_1.jpg"),
            "https://api.telegram.org/file/bott/photos/file_1.jpg"
        );
    }

    #[test]
    fn bad_timeout_is_a_config_error() {
        let err = ClientConfig::from_vars(vars(&[
            ("TELEGRAM_BOT_TOKEN", "t"),
            ("TELEGRAM_REQUEST_TIMEOUT_MS", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("soon")));
    }

    #[test]
    fn env_file_fills_gaps_but_never_overrides() {
        let path = env_file(
            "override",
            "# bot settings\nTELEGRAM_BOT_TOKEN=\"111:from-file\"\nTELEGRAM_REQUEST_TIMEOUT_MS=750\n",
        );
        let env = vars(&[("TELEGRAM_BOT_TOKEN", "222:from-env")]);
        let cfg = ClientConfig::from_env_file(&path, env).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(cfg.token, "222:from-env");
        assert_eq!(cfg.request_timeout, Some(Duration::from_millis(750)));
    }

    #[test]
    fn missing_env_file_is_skipped() {
        let path = env::temp_dir().join("tgb-no-such-file.env");
        let cfg = ClientConfig::from_env_file(&path, vars(&[("TELEGRAM_BOT_TOKEN", "t")])).unwrap();
        assert_eq!(cfg.token, "t");

        let err = ClientConfig::from_env_file(&path, vars(&[])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn malformed_env_file_is_a_config_error() {
        let path = env_file("malformed", "TELEGRAM_BOT_TOKEN='unterminated\n");
        let err = ClientConfig::from_env_file(&path, vars(&[])).unwrap_err();
        fs::remove_file(&path).unwrap();
        assert!(matches!(err, Error::Config(_)));
    }
}
