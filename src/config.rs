use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub render: RenderConfig,
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    /// Upload endpoint; also the base for relative document addresses.
    pub files_uri: String,
    pub graphql_uri: String,
    pub request_timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            files_uri: "http://localhost:8081/files".to_string(),
            graphql_uri: "http://localhost:8081/graphql".to_string(),
            request_timeout_ms: 30_000,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    pub page_scale: f32,
    pub redraw_interval_ms: u64,
    pub page_cache_entries: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            page_scale: 1.5,
            redraw_interval_ms: 250,
            page_cache_entries: 16,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KeymapConfig {
    pub preset: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            preset: "default".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> AppResult<Self> {
        let Some(path) = default_config_path() else {
            return Ok(Self::default());
        };
        Self::load_from_path(path)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        if !path.is_file() {
            return Err(AppError::invalid_argument(format!(
                "config path is not a regular file: {}",
                path.display()
            )));
        }

        let raw = fs::read_to_string(path).map_err(|source| {
            AppError::io_with_context(source, format!("failed to read config: {}", path.display()))
        })?;
        let parsed = toml::from_str::<Self>(&raw).map_err(|source| {
            AppError::invalid_argument(format!(
                "failed to parse config {}: {source}",
                path.display()
            ))
        })?;
        Ok(parsed.sanitized())
    }

    /// Applies command-line overrides on top of the file values.
    pub fn with_overrides(mut self, files_uri: Option<String>, graphql_uri: Option<String>) -> Self {
        if let Some(files_uri) = files_uri {
            self.server.files_uri = files_uri;
        }
        if let Some(graphql_uri) = graphql_uri {
            self.server.graphql_uri = graphql_uri;
        }
        self.sanitized()
    }

    fn sanitized(mut self) -> Self {
        let defaults = ServerConfig::default();
        if self.server.files_uri.trim().is_empty() {
            self.server.files_uri = defaults.files_uri;
        }
        if self.server.graphql_uri.trim().is_empty() {
            self.server.graphql_uri = defaults.graphql_uri;
        }
        self.server.request_timeout_ms = self.server.request_timeout_ms.max(1);
        self.render.redraw_interval_ms = self.render.redraw_interval_ms.max(1);
        self.render.page_cache_entries = self.render.page_cache_entries.max(1);
        if !self.render.page_scale.is_finite() || self.render.page_scale <= 0.0 {
            self.render.page_scale = RenderConfig::default().page_scale;
        }
        self
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    if let Some(explicit) = std::env::var_os("PDFDROP_CONFIG_PATH")
        && !explicit.is_empty()
    {
        return Some(PathBuf::from(explicit));
    }

    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME")
        && !xdg.is_empty()
    {
        return Some(PathBuf::from(xdg).join("pdfdrop").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME")
        && !home.is_empty()
    {
        return Some(
            PathBuf::from(home)
                .join(".config")
                .join("pdfdrop")
                .join("config.toml"),
        );
    }
    if let Some(appdata) = std::env::var_os("APPDATA")
        && !appdata.is_empty()
    {
        return Some(PathBuf::from(appdata).join("pdfdrop").join("config.toml"));
    }
    None
}
