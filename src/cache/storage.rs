use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    foundation::error::{WritepadError, WritepadResult},
    foundation::math::fnv_hex,
};

/// A cached (or freshly fetched) response body.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedResponse {
    pub url: String,
    pub content_type: String,
    #[serde(skip)]
    pub body: Vec<u8>,
}

impl CachedResponse {
    pub fn new(url: impl Into<String>, content_type: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            url: url.into(),
            content_type: content_type.into(),
            body,
        }
    }
}

/// Named caches of URL -> response.
pub trait CacheStorage {
    /// Store `response` under its URL in cache `cache`, creating the cache if needed.
    fn put(&mut self, cache: &str, response: &CachedResponse) -> WritepadResult<()>;

    /// Look `url` up across all caches, in [`CacheStorage::cache_names`] order.
    fn match_url(&self, url: &str) -> WritepadResult<Option<CachedResponse>>;

    fn cache_names(&self) -> WritepadResult<Vec<String>>;

    /// Returns whether a cache by that name existed.
    fn delete(&mut self, cache: &str) -> WritepadResult<bool>;
}

#[derive(Clone, Debug, Default)]
pub struct MemoryCacheStorage {
    caches: Vec<(String, Vec<CachedResponse>)>,
}

impl MemoryCacheStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry_count(&self, cache: &str) -> usize {
        self.caches
            .iter()
            .find(|(name, _)| name == cache)
            .map_or(0, |(_, entries)| entries.len())
    }
}

impl CacheStorage for MemoryCacheStorage {
    fn put(&mut self, cache: &str, response: &CachedResponse) -> WritepadResult<()> {
        let idx = match self.caches.iter().position(|(name, _)| name == cache) {
            Some(idx) => idx,
            None => {
                self.caches.push((cache.to_string(), Vec::new()));
                self.caches.len() - 1
            }
        };
        let entries = &mut self.caches[idx].1;
        match entries.iter_mut().find(|r| r.url == response.url) {
            Some(slot) => *slot = response.clone(),
            None => entries.push(response.clone()),
        }
        Ok(())
    }

    fn match_url(&self, url: &str) -> WritepadResult<Option<CachedResponse>> {
        Ok(self
            .caches
            .iter()
            .flat_map(|(_, entries)| entries.iter())
            .find(|r| r.url == url)
            .cloned())
    }

    fn cache_names(&self) -> WritepadResult<Vec<String>> {
        Ok(self.caches.iter().map(|(name, _)| name.clone()).collect())
    }

    fn delete(&mut self, cache: &str) -> WritepadResult<bool> {
        let before = self.caches.len();
        self.caches.retain(|(name, _)| name != cache);
        Ok(self.caches.len() != before)
    }
}

/// Filesystem-backed caches: one directory per cache under `root`, two files per entry
/// (`<hash>.body` and `<hash>.json`), where `<hash>` is the FNV-1a digest of the URL.
#[derive(Clone, Debug)]
pub struct FsCacheStorage {
    root: PathBuf,
}

impl FsCacheStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn cache_dir(&self, cache: &str) -> WritepadResult<PathBuf> {
        validate_cache_name(cache)?;
        Ok(self.root.join(cache))
    }

    fn read_entry(dir: &Path, url: &str) -> WritepadResult<Option<CachedResponse>> {
        let stem = fnv_hex(url);
        let meta_path = dir.join(format!("{stem}.json"));
        if !meta_path.is_file() {
            return Ok(None);
        }
        let meta_bytes = std::fs::read(&meta_path)
            .with_context(|| format!("read cache entry '{}'", meta_path.display()))?;
        let mut response: CachedResponse = serde_json::from_slice(&meta_bytes)?;
        // Hash collisions are possible; the stored URL is authoritative.
        if response.url != url {
            return Ok(None);
        }
        let body_path = dir.join(format!("{stem}.body"));
        response.body = std::fs::read(&body_path)
            .with_context(|| format!("read cache body '{}'", body_path.display()))?;
        Ok(Some(response))
    }
}

impl CacheStorage for FsCacheStorage {
    fn put(&mut self, cache: &str, response: &CachedResponse) -> WritepadResult<()> {
        let dir = self.cache_dir(cache)?;
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("create cache dir '{}'", dir.display()))?;

        let stem = fnv_hex(&response.url);
        let body_path = dir.join(format!("{stem}.body"));
        std::fs::write(&body_path, &response.body)
            .with_context(|| format!("write cache body '{}'", body_path.display()))?;
        let meta_path = dir.join(format!("{stem}.json"));
        std::fs::write(&meta_path, serde_json::to_vec(response)?)
            .with_context(|| format!("write cache entry '{}'", meta_path.display()))?;
        Ok(())
    }

    fn match_url(&self, url: &str) -> WritepadResult<Option<CachedResponse>> {
        for name in self.cache_names()? {
            if let Some(hit) = Self::read_entry(&self.root.join(&name), url)? {
                return Ok(Some(hit));
            }
        }
        Ok(None)
    }

    fn cache_names(&self) -> WritepadResult<Vec<String>> {
        let Ok(rd) = std::fs::read_dir(&self.root) else {
            return Ok(Vec::new());
        };
        let mut names = Vec::new();
        for entry in rd.flatten() {
            if !entry.path().is_dir() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn delete(&mut self, cache: &str) -> WritepadResult<bool> {
        let dir = self.cache_dir(cache)?;
        if !dir.is_dir() {
            return Ok(false);
        }
        std::fs::remove_dir_all(&dir)
            .with_context(|| format!("remove cache dir '{}'", dir.display()))?;
        Ok(true)
    }
}

fn validate_cache_name(cache: &str) -> WritepadResult<()> {
    if cache.is_empty() || cache == "." || cache == ".." || cache.contains(['/', '\\']) {
        return Err(WritepadError::cache(format!("invalid cache name '{cache}'")));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/cache/storage.rs"]
mod tests;
