use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Directory for stored media assets (downloaded favicons)
    #[serde(default = "default_media_dir")]
    pub media_dir: String,
    /// Rows per admin list page
    #[serde(default = "default_page_size")]
    pub page_size: i64,
    #[serde(default)]
    pub fetch: FetchConfig,
}

fn default_media_dir() -> String {
    "media".to_string()
}

fn default_page_size() -> i64 {
    25
}

#[derive(Debug, Deserialize, Clone)]
pub struct FetchConfig {
    /// Timeout in seconds for each outbound request
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Browser-like User-Agent; some sites block obvious bots
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            media_dir: default_media_dir(),
            page_size: default_page_size(),
            fetch: FetchConfig::default(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file. A missing file is not an error:
    /// every setting has a default.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        if !path.as_ref().exists() {
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Parse config from a TOML string (useful for testing)
    pub fn from_str(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}
