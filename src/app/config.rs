use std::path::Path;

use anyhow::Context;

use crate::{
    cache::manifest::DEFAULT_CACHE_NAME,
    cache::offline::DEFAULT_CHUNK_SIZE,
    drawing::ink::InkStyle,
    foundation::error::{WritepadError, WritepadResult},
    geometry::grid::GridConfig,
};

/// Offline cache settings.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct CacheConfig {
    pub cache_name: String,
    /// URLs fetched per install batch.
    pub chunk_size: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            cache_name: DEFAULT_CACHE_NAME.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Top-level pad configuration. Every section is optional in JSON.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct PadConfig {
    pub grid: GridConfig,
    pub ink: InkStyle,
    pub cache: CacheConfig,
    /// Inset in pixels kept free around the grid when fitting it to the canvas.
    pub margin: f64,
}

impl Default for PadConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            ink: InkStyle::default(),
            cache: CacheConfig::default(),
            margin: 20.0,
        }
    }
}

impl PadConfig {
    pub fn from_json_str(s: &str) -> WritepadResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| WritepadError::config(format!("parse pad config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> WritepadResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read pad config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    pub fn validate(&self) -> WritepadResult<()> {
        self.grid
            .validate()
            .map_err(|e| WritepadError::config(e.to_string()))?;
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(WritepadError::config("margin must be finite and >= 0"));
        }
        if !self.ink.line_width.is_finite() || self.ink.line_width <= 0.0 {
            return Err(WritepadError::config("ink lineWidth must be finite and > 0"));
        }
        if self.cache.cache_name.is_empty() {
            return Err(WritepadError::config("cache cacheName must be non-empty"));
        }
        if self.cache.chunk_size == 0 {
            return Err(WritepadError::config("cache chunkSize must be > 0"));
        }
        Ok(())
    }
}
