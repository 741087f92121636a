use serde::Deserialize;

/// Backend address used when neither the config file nor the environment sets one
pub const DEFAULT_BASE_URL: &str = "https://technicalseoagentbackend.onrender.com";

/// Environment variable that overrides `backend.base-url`
pub const BASE_URL_ENV: &str = "SEO_SCOUT_API_URL";

/// Main configuration structure for SEO Scout
///
/// Every section is optional; a missing file or section yields the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub polling: PollingConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
    #[serde(default)]
    pub credentials: CredentialConfig,
    #[serde(default)]
    pub crawl: CrawlConfig,
}

/// Where the crawl/report service lives
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Root URL of the backend service
    #[serde(rename = "base-url", default = "default_base_url")]
    pub base_url: String,

    /// TCP connect timeout (seconds)
    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

/// Crawl-status polling
#[derive(Debug, Clone, Deserialize)]
pub struct PollingConfig {
    /// Time between status requests (milliseconds)
    #[serde(rename = "interval-ms", default = "default_interval_ms")]
    pub interval_ms: u64,
}

/// Toast-style notifications
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationConfig {
    /// How long a notification stays visible (milliseconds)
    #[serde(rename = "ttl-ms", default = "default_ttl_ms")]
    pub ttl_ms: u64,
}

/// Local API-key persistence
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialConfig {
    /// Path to the SQLite file holding the key
    #[serde(rename = "store-path", default = "default_store_path")]
    pub store_path: String,

    /// Key the credential is stored under
    #[serde(default = "default_credential_key")]
    pub key: String,
}

/// Defaults for crawl submission
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// Max pages used when the user does not pass one
    #[serde(rename = "default-max-pages", default = "default_max_pages")]
    pub default_max_pages: u32,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_interval_ms() -> u64 {
    3000
}

fn default_ttl_ms() -> u64 {
    4000
}

fn default_store_path() -> String {
    "seo-scout.db".to_string()
}

fn default_credential_key() -> String {
    "openai_api_key".to_string()
}

fn default_max_pages() -> u32 {
    10
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            ttl_ms: default_ttl_ms(),
        }
    }
}

impl Default for CredentialConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            key: default_credential_key(),
        }
    }
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            default_max_pages: default_max_pages(),
        }
    }
}
