use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub wall: WallConfig,
    pub profile: ProfileConfig,
    pub ui: UiConfig,
}

/// Remote wall service endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WallConfig {
    pub base_url: String,
    pub api_key: Option<String>,
}

/// Static sidebar content. Purely presentational.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfileConfig {
    pub name: String,
    pub subtitle: String,
    pub networks: Vec<String>,
    pub city: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UiConfig {
    pub title: String,
    pub default_theme: String,
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            api_key: None,
        }
    }
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            name: "Anonymous".to_string(),
            subtitle: "wall".to_string(),
            networks: Vec::new(),
            city: None,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            title: "Freedom Wall".to_string(),
            default_theme: "dark".to_string(),
        }
    }
}

impl Config {
    /// Default location, e.g. `~/.config/walltui/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("walltui").join("config.toml"))
    }

    /// Load from the given path, or the default path when none is given.
    /// A missing file yields the built-in defaults; a file that exists
    /// but does not parse is an error worth stopping for.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) => path,
                None => return Ok(Self::default()),
            },
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
    }
}
