//! Runtime configuration.
//!
//! Native builds read the process environment, seeded from `.env` or the
//! bundled `assets/config.env`. The browser has no process environment, so
//! web builds read the bundled file directly.

use once_cell::sync::OnceCell;
use reqwest::Url;

/// Bundled config for web and mobile builds
const BUNDLED_CONFIG: &str = include_str!("../assets/config.env");

pub const API_BASE_URL_VAR: &str = "PROSPERA_API_BASE_URL";
pub const HEALTH_URL_VAR: &str = "PROSPERA_HEALTH_URL";
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

static CLIENT_CONFIG: OnceCell<ClientConfig> = OnceCell::new();

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL in {var}: {value}")]
    InvalidUrl { var: &'static str, value: String },

    #[error("client config already installed")]
    AlreadyInstalled,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    api_base: Url,
    health_url: Url,
}

impl ClientConfig {
    pub fn new(api_base: &str, health_url: Option<&str>) -> Result<Self, ConfigError> {
        let api_base = parse_api_base(api_base)?;
        let health_url = match health_url {
            Some(raw) => Url::parse(raw).map_err(|_| ConfigError::InvalidUrl {
                var: HEALTH_URL_VAR,
                value: raw.to_string(),
            })?,
            // Health lives at the server root, not under the API base
            None => api_base
                .join("/health")
                .map_err(|_| ConfigError::InvalidUrl {
                    var: API_BASE_URL_VAR,
                    value: api_base.to_string(),
                })?,
        };
        Ok(Self {
            api_base,
            health_url,
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from `KEY=VALUE` pairs. Later pairs win over earlier ones.
    pub fn from_pairs<'a>(
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, ConfigError> {
        let pairs: Vec<(&str, &str)> = pairs.into_iter().collect();
        Self::from_lookup(|key| {
            pairs
                .iter()
                .rev()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| value.to_string())
        })
    }

    /// Config from the bundled `assets/config.env` alone.
    pub fn bundled() -> Result<Self, ConfigError> {
        Self::from_pairs(parse_env_lines(BUNDLED_CONFIG))
    }

    /// The config for this platform: the process environment on native
    /// targets, the bundled file in the browser.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_env()
    }

    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Result<Self, ConfigError> {
        Self::bundled()
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let base = non_blank(API_BASE_URL_VAR).unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let health = non_blank(HEALTH_URL_VAR);
        Self::new(&base, health.as_deref())
    }

    /// Absolute URL of an operation path relative to the API base.
    pub fn endpoint(&self, path: &str) -> Url {
        let relative = path.trim_start_matches('/');
        // The base always ends in '/', so a relative join keeps its path
        self.api_base
            .join(relative)
            .unwrap_or_else(|_| self.api_base.clone())
    }

    pub fn api_base(&self) -> &Url {
        &self.api_base
    }

    pub fn health_url(&self) -> &Url {
        &self.health_url
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        let api_base = Url::parse("http://localhost:5000/api/").expect("valid default URL");
        let health_url = Url::parse("http://localhost:5000/health").expect("valid default URL");
        Self {
            api_base,
            health_url,
        }
    }
}

fn parse_api_base(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    Url::parse(&with_slash).map_err(|_| ConfigError::InvalidUrl {
        var: API_BASE_URL_VAR,
        value: raw.to_string(),
    })
}

/// Install the process-wide config. Call once, before the UI launches.
pub fn install(config: ClientConfig) -> Result<(), ConfigError> {
    CLIENT_CONFIG
        .set(config)
        .map_err(|_| ConfigError::AlreadyInstalled)
}

/// The installed config, or defaults when nothing was installed.
pub fn client_config() -> ClientConfig {
    CLIENT_CONFIG.get().cloned().unwrap_or_default()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_dotenv() {
    // First try to load from .env file (desktop dev)
    if dotenvy::dotenv().is_ok() {
        return;
    }

    // Fall back to bundled config
    load_bundled_config(BUNDLED_CONFIG);
}

/// Nothing to seed: `ClientConfig::load` reads the bundled file directly.
#[cfg(target_arch = "wasm32")]
pub fn load_dotenv() {}

#[cfg(not(target_arch = "wasm32"))]
fn load_bundled_config(contents: &str) {
    for (key, value) in parse_env_lines(contents) {
        // Only set if not already set (allow env override)
        if std::env::var(key).is_err() {
            // SAFETY: We're setting env vars at startup before any threads are spawned
            unsafe {
                std::env::set_var(key, value);
            }
        }
    }
}

fn parse_env_lines(contents: &str) -> Vec<(&str, &str)> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim(), value.trim()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_stays_under_api_base() {
        let config = ClientConfig::new("http://localhost:5000/api", None).unwrap();
        assert_eq!(
            config.endpoint("/ask-ai").as_str(),
            "http://localhost:5000/api/ask-ai"
        );
        assert_eq!(
            config.endpoint("net_worth").as_str(),
            "http://localhost:5000/api/net_worth"
        );
    }

    #[test]
    fn test_health_defaults_to_server_root() {
        let config = ClientConfig::new("https://fin.example.com/api/", None).unwrap();
        assert_eq!(
            config.health_url().as_str(),
            "https://fin.example.com/health"
        );
    }

    #[test]
    fn test_explicit_health_url() {
        let config =
            ClientConfig::new("http://localhost:5000/api", Some("http://localhost:8000/health"))
                .unwrap();
        assert_eq!(config.health_url().as_str(), "http://localhost:8000/health");
    }

    #[test]
    fn test_invalid_base_url() {
        let err = ClientConfig::new("not a url", None).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidUrl {
                var: API_BASE_URL_VAR,
                ..
            }
        ));
    }

    #[test]
    fn test_default_matches_default_base() {
        let parsed = ClientConfig::new(DEFAULT_API_BASE_URL, None).unwrap();
        assert_eq!(parsed, ClientConfig::default());
    }

    #[test]
    fn test_bundled_config_resolves_without_environment() {
        let config = ClientConfig::bundled().unwrap();
        assert_eq!(config.api_base().as_str(), "http://localhost:5000/api/");
        assert_eq!(config.health_url().as_str(), "http://localhost:5000/health");
    }

    #[test]
    fn test_from_pairs_reads_both_urls() {
        let config = ClientConfig::from_pairs(parse_env_lines(
            "PROSPERA_API_BASE_URL=https://fin.example.com/v1\n\
             PROSPERA_HEALTH_URL=https://status.example.com/ping\n",
        ))
        .unwrap();
        assert_eq!(
            config.endpoint("visualize").as_str(),
            "https://fin.example.com/v1/visualize"
        );
        assert_eq!(
            config.health_url().as_str(),
            "https://status.example.com/ping"
        );
    }

    #[test]
    fn test_from_pairs_blank_and_missing_fall_back() {
        let config = ClientConfig::from_pairs([(API_BASE_URL_VAR, "  ")]).unwrap();
        assert_eq!(config, ClientConfig::default());

        let config = ClientConfig::from_pairs(std::iter::empty()).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_from_pairs_last_value_wins() {
        let config = ClientConfig::from_pairs([
            (API_BASE_URL_VAR, "http://first/api"),
            (API_BASE_URL_VAR, "http://second/api"),
        ])
        .unwrap();
        assert_eq!(config.api_base().as_str(), "http://second/api/");
    }

    #[test]
    fn test_parse_env_lines_skips_comments() {
        let parsed = parse_env_lines("# comment\n\nPROSPERA_API_BASE_URL = http://x/api\nBROKEN\n");
        assert_eq!(parsed, vec![("PROSPERA_API_BASE_URL", "http://x/api")]);
    }
}
