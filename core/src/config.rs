//! Static client configuration: the service root and the user agent.

/// Public MyVariant.info v1 endpoint.
pub const DEFAULT_BASE_URL: &str = "http://myvariant.info/v1";

/// Environment variable that overrides `DEFAULT_BASE_URL`.
pub const BASE_URL_ENV: &str = "MYVARIANT_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub user_agent: String,
}

fn default_user_agent() -> String {
    concat!("myvariant-rs/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: default_user_agent(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        ClientConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        }
    }

    /// Defaults, with the base URL taken from `MYVARIANT_URL` when set and
    /// non-blank.
    pub fn from_env() -> Self {
        match std::env::var(BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => ClientConfig::new(url.trim()),
            _ => ClientConfig::default(),
        }
    }
}
