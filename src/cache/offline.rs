use crate::{
    cache::fetch::Fetcher,
    cache::manifest::PrecacheManifest,
    cache::storage::{CacheStorage, CachedResponse},
    foundation::error::{WritepadError, WritepadResult},
};

const TARGET: &str = "writepad::cache";

/// Body served when neither the cache nor the fetcher can produce a response.
pub const OFFLINE_FALLBACK_BODY: &str = "Offline content not available";

/// Default number of URLs fetched per install batch.
pub const DEFAULT_CHUNK_SIZE: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseSource {
    Cache,
    Network,
    Fallback,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Served {
    pub source: ResponseSource,
    pub response: CachedResponse,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallReport {
    pub cached: usize,
    pub chunks: usize,
}

/// Cache-first offline strategy with install / fetch / activate phases.
#[derive(Debug)]
pub struct OfflineCache<S, F> {
    storage: S,
    fetcher: F,
    manifest: PrecacheManifest,
    chunk_size: usize,
}

impl<S: CacheStorage, F: Fetcher> OfflineCache<S, F> {
    pub fn new(storage: S, fetcher: F, manifest: PrecacheManifest) -> Self {
        Self {
            storage,
            fetcher,
            manifest,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Zero is treated as one.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn cache_name(&self) -> &str {
        &self.manifest.cache_name
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_parts(self) -> (S, F) {
        (self.storage, self.fetcher)
    }

    /// Fetch every manifest URL into the current cache, one chunk at a time.
    ///
    /// A chunk is stored only if every URL in it fetched; the first failing chunk aborts the
    /// install and earlier chunks stay cached.
    #[tracing::instrument(skip(self), fields(cache = %self.manifest.cache_name))]
    pub fn install(&mut self) -> WritepadResult<InstallReport> {
        let mut report = InstallReport::default();
        for (idx, chunk) in self.manifest.urls.chunks(self.chunk_size).enumerate() {
            let mut fetched = Vec::with_capacity(chunk.len());
            for url in chunk {
                let response = self.fetcher.fetch(url).map_err(|e| {
                    WritepadError::cache(format!("install chunk {idx}: fetch '{url}': {e}"))
                })?;
                fetched.push(response);
            }
            for response in &fetched {
                self.storage.put(&self.manifest.cache_name, response)?;
            }
            report.cached += fetched.len();
            report.chunks += 1;
            tracing::debug!(target: TARGET, chunk = idx, urls = fetched.len(), "chunk cached");
        }
        tracing::info!(target: TARGET, cached = report.cached, "install complete");
        Ok(report)
    }

    /// Serve `url` from any cache, else from the fetcher, else the offline fallback body.
    /// Fetched responses are not written back.
    pub fn respond(&self, url: &str) -> Served {
        match self.storage.match_url(url) {
            Ok(Some(response)) => {
                return Served {
                    source: ResponseSource::Cache,
                    response,
                };
            }
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(target: TARGET, url, error = %err, "cache lookup failed");
                return fallback(url);
            }
        }
        match self.fetcher.fetch(url) {
            Ok(response) => Served {
                source: ResponseSource::Network,
                response,
            },
            Err(err) => {
                tracing::info!(target: TARGET, url, error = %err, "failed to fetch");
                fallback(url)
            }
        }
    }

    /// Delete every cache except the current one. Returns the deleted names.
    pub fn activate(&mut self) -> WritepadResult<Vec<String>> {
        let mut deleted = Vec::new();
        for name in self.storage.cache_names()? {
            if name == self.manifest.cache_name {
                continue;
            }
            if self.storage.delete(&name)? {
                tracing::debug!(target: TARGET, cache = %name, "stale cache deleted");
                deleted.push(name);
            }
        }
        Ok(deleted)
    }
}

fn fallback(url: &str) -> Served {
    Served {
        source: ResponseSource::Fallback,
        response: CachedResponse::new(url, "text/plain", OFFLINE_FALLBACK_BODY.as_bytes().to_vec()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/cache/offline.rs"]
mod tests;
