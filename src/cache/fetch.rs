use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    cache::manifest::is_remote,
    cache::storage::CachedResponse,
    foundation::error::{WritepadError, WritepadResult},
};

/// Source of responses when the cache misses.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> WritepadResult<CachedResponse>;
}

/// Serves same-origin URLs from a local directory: `/writepad/a.png` resolves to
/// `<root>/writepad/a.png`. Remote `http(s)` URLs are refused.
#[derive(Clone, Debug)]
pub struct FsFetcher {
    root: PathBuf,
}

impl FsFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Fetcher for FsFetcher {
    fn fetch(&self, url: &str) -> WritepadResult<CachedResponse> {
        if is_remote(url) {
            return Err(WritepadError::cache(format!(
                "remote url '{url}' is not available from the filesystem"
            )));
        }
        let rel = normalize_url_path(url)?;
        let path = self.root.join(Path::new(&rel));
        let body = std::fs::read(&path)
            .with_context(|| format!("fetch '{url}' from '{}'", path.display()))?;
        Ok(CachedResponse::new(url, content_type_for(&rel), body))
    }
}

/// Relative, `/`-separated path for a same-origin URL. Query strings and fragments are dropped;
/// `..` segments are rejected.
pub fn normalize_url_path(url: &str) -> WritepadResult<String> {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let s = path.replace('\\', "/");

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(WritepadError::cache(format!("url '{url}' must not contain '..'")));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(WritepadError::cache(format!("url '{url}' must name a file")));
    }
    Ok(out.join("/"))
}

fn content_type_for(path: &str) -> &'static str {
    let ext = path
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "html" | "htm" => "text/html",
        "json" => "application/json",
        "js" => "text/javascript",
        "png" => "image/png",
        "svg" => "image/svg+xml",
        "css" => "text/css",
        _ => "application/octet-stream",
    }
}
