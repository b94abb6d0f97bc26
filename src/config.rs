//! Cache configuration management.
//!
//! The configuration is the data surface of the engine: which generation is
//! current, which same-origin paths must be cached at install, which CDN
//! resources should be cached best-effort, which hostnames get the
//! network-first treatment, and which document is served when everything
//! else has failed.
//!
//! Configuration is stored at `~/.config/sitecache/config.json`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use reqwest::Url;
use serde::{Deserialize, Serialize};

/// Application name used for config/cache directory paths
const APP_NAME: &str = "sitecache";

/// Config file name
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Name of the current cache generation, e.g. "site-cache-v2".
    /// Activation deletes every generation whose name differs from this.
    pub generation: String,
    /// Origin of the application itself, e.g. "https://example.app".
    /// Requests matching this origin use the cache-first strategy.
    pub app_origin: String,
    /// Same-origin paths that must all be cached for install to succeed.
    pub mandatory: Vec<String>,
    /// Absolute cross-origin URLs cached best-effort during install.
    pub optional: Vec<String>,
    /// Hostnames that get the network-first strategy.
    pub cdn_hosts: Vec<String>,
    /// Same-origin path of the always-pre-cached offline fallback document.
    pub offline_fallback: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            generation: "site-cache-v1".to_string(),
            app_origin: "https://localhost".to_string(),
            mandatory: vec!["/".to_string(), "/index.html".to_string()],
            optional: Vec::new(),
            cdn_hosts: Vec::new(),
            offline_fallback: "/index.html".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    /// Resolve a same-origin path against the configured application origin.
    pub fn resolve(&self, path: &str) -> Result<Url> {
        let base = Url::parse(&self.app_origin)
            .with_context(|| format!("Invalid app origin: {}", self.app_origin))?;
        base.join(path)
            .with_context(|| format!("Invalid resource path: {}", path))
    }

    /// Full URL of the offline fallback document.
    pub fn offline_fallback_url(&self) -> Result<Url> {
        self.resolve(&self.offline_fallback)
    }

    /// Whether a URL belongs to the application's own origin.
    pub fn is_same_origin(&self, url: &Url) -> bool {
        match Url::parse(&self.app_origin) {
            Ok(origin) => url.origin() == origin.origin(),
            Err(_) => false,
        }
    }

    /// Whether a URL points at one of the designated CDN hosts.
    pub fn is_cdn_host(&self, url: &Url) -> bool {
        match url.host_str() {
            Some(host) => self.cdn_hosts.iter().any(|h| h == host),
            None => false,
        }
    }
}
