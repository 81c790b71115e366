use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, anyhow};
use serde::Deserialize;
use url::Url;

pub const ENV_CONFIG: &str = "SITE_CONFIG";
pub const ENV_FEED_URL: &str = "SITE_FEED_URL";
pub const ENV_SUBMIT_URL: &str = "SITE_SUBMIT_URL";
pub const ENV_SITE_URL: &str = "SITE_URL";

const DEFAULT_FEED_URL: &str = "https://your-strapi-domain.com/api/blogs";
const DEFAULT_SITE_URL: &str = "https://guhatek.com";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub feed_url: String,
    pub submit_url: Option<String>,
    pub site_url: String,
    pub timeout_secs: u64,
    pub catalog: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            submit_url: None,
            site_url: DEFAULT_SITE_URL.to_string(),
            timeout_secs: 30,
            catalog: None,
        }
    }
}

impl Config {
    /// Resolution order: `$SITE_CONFIG`, then `<config dir>/careersite/config.toml`
    /// if present, then built-in defaults. Env URL overrides apply last.
    pub fn load() -> anyhow::Result<Self> {
        let mut config = match config_path() {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        // Relative catalog paths are relative to the config file
        if let Some(catalog) = config.catalog.take() {
            let resolved = match path.parent() {
                Some(dir) if catalog.is_relative() => dir.join(catalog),
                _ => catalog,
            };
            config.catalog = Some(resolved);
        }
        Ok(config)
    }

    fn apply_env(&mut self, get: impl Fn(&str) -> Option<String>) {
        if let Some(v) = get(ENV_FEED_URL).filter(|v| !v.is_empty()) {
            self.feed_url = v;
        }
        if let Some(v) = get(ENV_SUBMIT_URL).filter(|v| !v.is_empty()) {
            self.submit_url = Some(v);
        }
        if let Some(v) = get(ENV_SITE_URL).filter(|v| !v.is_empty()) {
            self.site_url = v;
        }
    }

    pub fn feed_url(&self) -> anyhow::Result<Url> {
        Url::parse(&self.feed_url).with_context(|| format!("invalid feed_url: {}", self.feed_url))
    }

    pub fn submit_url(&self) -> anyhow::Result<Url> {
        let raw = self.submit_url.as_deref().ok_or_else(|| {
            anyhow!(
                "no application endpoint configured; set submit_url in the config file or {}",
                ENV_SUBMIT_URL
            )
        })?;
        Url::parse(raw).with_context(|| format!("invalid submit_url: {}", raw))
    }

    pub fn post_url(&self, slug: &str) -> String {
        format!("{}/blog/{}", self.site_url.trim_end_matches('/'), slug)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn config_path() -> Option<PathBuf> {
    if let Ok(p) = std::env::var(ENV_CONFIG) {
        return Some(PathBuf::from(p));
    }
    dirs::config_dir()
        .map(|dir| dir.join("careersite").join("config.toml"))
        .filter(|p| p.exists())
}
