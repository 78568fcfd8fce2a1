//! Application configuration. Organization, credentials, cache location.

use crate::domain::DomainError;
use serde::Deserialize;
use std::path::PathBuf;

/// Raw configuration as read from the environment (HIPCHAT_* variables, .env
/// supported) or an optional config file pointed at by HIPCHAT_CONFIG.
#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Organization identifier; builds the API base URL. Read from HIPCHAT_GROUP.
    pub group: Option<String>,

    /// API bearer token. Read from HIPCHAT_TOKEN.
    pub token: Option<String>,

    /// Full base URL override, for self-hosted servers. Read from HIPCHAT_BASE_URL.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Cache directory override. Read from HIPCHAT_CACHE_DIR.
    #[serde(default)]
    pub cache_dir: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("HIPCHAT"));
        if let Ok(path) = std::env::var("HIPCHAT_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    /// Validate into runtime settings. Group and token are both required; a
    /// missing one is a configuration error naming the variable, so the CLI
    /// can exit cleanly before any network activity.
    pub fn resolve(self) -> Result<Settings, DomainError> {
        let (group, token) = match (normalize(self.group), normalize(self.token)) {
            (Some(group), Some(token)) => (group, token),
            (None, Some(_)) => {
                return Err(DomainError::Config("HIPCHAT_GROUP must be set".into()));
            }
            (Some(_), None) => {
                return Err(DomainError::Config("HIPCHAT_TOKEN must be set".into()));
            }
            (None, None) => {
                return Err(DomainError::Config(
                    "HIPCHAT_GROUP and HIPCHAT_TOKEN must be set".into(),
                ));
            }
        };

        let base_url = match normalize(self.base_url) {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://{}.hipchat.com/v2", group),
        };

        let cache_dir = match normalize(self.cache_dir) {
            Some(dir) => PathBuf::from(dir),
            None => dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".hipchat"),
        };

        Ok(Settings {
            base_url,
            token,
            cache_path: cache_dir.join("directory.json"),
        })
    }
}

/// Trim and drop empty values so `HIPCHAT_TOKEN=""` counts as unset.
fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Validated runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// `/v2` API root, no trailing slash.
    pub base_url: String,
    pub token: String,
    /// Location of the persisted directory snapshot.
    pub cache_path: PathBuf,
}
