//! # Offline Asset Cache
//!
//! Cache-first serving of the calculator's static assets so the web build
//! keeps working offline.
//!
//! - **Install**: fetch every pre-cache path into a cache named by version.
//!   Installation is all-or-nothing; on success the new cache becomes
//!   active and caches under any other name are dropped.
//! - **Respond**: serve the cached body if the active cache has the path,
//!   otherwise fall through to the network.
//!
//! Bumping the cache name (e.g. `mechanical-calc-v2`) is how a release
//! invalidates previously cached assets.
//!
//! ## Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use calc_core::asset_cache::{AssetCache, ResponseSource, StaticFetcher, CACHE_NAME};
//!
//! let mut network = StaticFetcher::new(HashMap::from([
//!     ("/".to_string(), b"<html>".to_vec()),
//!     ("/app.js".to_string(), b"main()".to_vec()),
//! ]));
//!
//! let mut cache = AssetCache::new();
//! cache.install(CACHE_NAME, &["/", "/app.js"], &mut network).unwrap();
//!
//! let response = cache.respond("/app.js", &mut network).unwrap();
//! assert_eq!(response.source, ResponseSource::Cache);
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Default versioned cache name
pub const CACHE_NAME: &str = "mechanical-calc-v1";

/// Paths fetched on install
pub const PRECACHE_URLS: [&str; 4] = ["/", "/index.html", "/style.css", "/app.js"];

/// Source of asset bodies that are not cached.
pub trait Fetcher {
    fn fetch(&mut self, path: &str) -> CalcResult<Vec<u8>>;
}

/// Fetcher backed by an in-memory map; unknown paths fail.
#[derive(Debug, Clone, Default)]
pub struct StaticFetcher {
    assets: HashMap<String, Vec<u8>>,
    requests: Vec<String>,
}

impl StaticFetcher {
    pub fn new(assets: HashMap<String, Vec<u8>>) -> Self {
        StaticFetcher {
            assets,
            requests: Vec::new(),
        }
    }

    /// Paths requested so far, in order
    pub fn requests(&self) -> &[String] {
        &self.requests
    }
}

impl Fetcher for StaticFetcher {
    fn fetch(&mut self, path: &str) -> CalcResult<Vec<u8>> {
        self.requests.push(path.to_string());
        self.assets
            .get(path)
            .cloned()
            .ok_or_else(|| CalcError::fetch_failed(path, "not found"))
    }
}

/// Fetcher that serves files below a root directory. `/` maps to
/// `index.html`.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct DirFetcher {
    root: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl DirFetcher {
    pub fn new(root: impl Into<std::path::PathBuf>) -> Self {
        DirFetcher { root: root.into() }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Fetcher for DirFetcher {
    fn fetch(&mut self, path: &str) -> CalcResult<Vec<u8>> {
        let relative = path.trim_start_matches('/');
        let relative = if relative.is_empty() { "index.html" } else { relative };
        if relative.split('/').any(|part| part == "..") {
            return Err(CalcError::fetch_failed(path, "path escapes asset root"));
        }
        std::fs::read(self.root.join(relative))
            .map_err(|e| CalcError::fetch_failed(path, e.to_string()))
    }
}

/// A stored asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedAsset {
    pub path: String,
    pub body: Vec<u8>,
    pub cached_at: DateTime<Utc>,
}

/// Where a response body came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseSource {
    Cache,
    Network,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssetResponse {
    pub body: Vec<u8>,
    pub source: ResponseSource,
}

/// Named caches of static assets, one of which is active.
#[derive(Debug, Clone, Default)]
pub struct AssetCache {
    caches: HashMap<String, HashMap<String, CachedAsset>>,
    active: Option<String>,
}

impl AssetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the cache currently used for responses
    pub fn active_name(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Names of every cache held
    pub fn cache_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.caches.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Assets of the active cache, sorted by path
    pub fn entries(&self) -> Vec<&CachedAsset> {
        let mut entries: Vec<&CachedAsset> = self
            .active
            .as_ref()
            .and_then(|name| self.caches.get(name))
            .map(|cache| cache.values().collect())
            .unwrap_or_default();
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        entries
    }

    /// Fetch `urls` into the cache `name` and activate it.
    ///
    /// If any fetch fails nothing is stored and the previous cache stays
    /// active. Returns the number of assets stored.
    pub fn install<S: AsRef<str>>(
        &mut self,
        name: &str,
        urls: &[S],
        fetcher: &mut dyn Fetcher,
    ) -> CalcResult<usize> {
        let mut fresh = HashMap::new();
        for url in urls {
            let path = url.as_ref();
            let body = fetcher.fetch(path).inspect_err(|e| {
                tracing::warn!(cache = name, error = %e, "install aborted");
            })?;
            fresh.insert(
                path.to_string(),
                CachedAsset {
                    path: path.to_string(),
                    body,
                    cached_at: Utc::now(),
                },
            );
        }

        let stored = fresh.len();
        self.caches.insert(name.to_string(), fresh);
        self.caches.retain(|key, _| key == name);
        self.active = Some(name.to_string());
        tracing::info!(cache = name, assets = stored, "opened cache");
        Ok(stored)
    }

    /// Look up a path in the active cache only
    pub fn lookup(&self, path: &str) -> Option<&CachedAsset> {
        let name = self.active.as_ref()?;
        self.caches.get(name)?.get(path)
    }

    /// Serve `path` from the active cache, falling back to `fetcher`.
    ///
    /// Network responses are not added to the cache.
    pub fn respond(&self, path: &str, fetcher: &mut dyn Fetcher) -> CalcResult<AssetResponse> {
        if let Some(asset) = self.lookup(path) {
            return Ok(AssetResponse {
                body: asset.body.clone(),
                source: ResponseSource::Cache,
            });
        }
        tracing::trace!(path, "cache miss");
        Ok(AssetResponse {
            body: fetcher.fetch(path)?,
            source: ResponseSource::Network,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network() -> StaticFetcher {
        StaticFetcher::new(
            PRECACHE_URLS
                .iter()
                .map(|p| (p.to_string(), format!("body of {p}").into_bytes()))
                .chain([("/manifest.json".to_string(), b"{}".to_vec())])
                .collect(),
        )
    }

    #[test]
    fn test_install_and_serve_from_cache() {
        let mut net = network();
        let mut cache = AssetCache::new();
        assert_eq!(cache.install(CACHE_NAME, &PRECACHE_URLS, &mut net).unwrap(), 4);
        assert_eq!(cache.active_name(), Some(CACHE_NAME));

        let before = net.requests().len();
        let response = cache.respond("/style.css", &mut net).unwrap();
        assert_eq!(response.source, ResponseSource::Cache);
        assert_eq!(response.body, b"body of /style.css");
        assert_eq!(net.requests().len(), before);
    }

    #[test]
    fn test_uncached_path_falls_through() {
        let mut net = network();
        let mut cache = AssetCache::new();
        cache.install(CACHE_NAME, &PRECACHE_URLS, &mut net).unwrap();

        let response = cache.respond("/manifest.json", &mut net).unwrap();
        assert_eq!(response.source, ResponseSource::Network);
        assert!(cache.lookup("/manifest.json").is_none());

        assert!(cache.respond("/missing.png", &mut net).is_err());
    }

    #[test]
    fn test_before_install_everything_is_network() {
        let mut net = network();
        let cache = AssetCache::new();
        let response = cache.respond("/", &mut net).unwrap();
        assert_eq!(response.source, ResponseSource::Network);
    }

    #[test]
    fn test_new_version_replaces_old() {
        let mut net = network();
        let mut cache = AssetCache::new();
        cache.install("mechanical-calc-v1", &PRECACHE_URLS, &mut net).unwrap();
        cache.install("mechanical-calc-v2", &["/", "/app.js"], &mut net).unwrap();

        assert_eq!(cache.cache_names(), vec!["mechanical-calc-v2"]);
        assert!(cache.lookup("/style.css").is_none());
        assert_eq!(cache.entries().len(), 2);
    }

    #[test]
    fn test_failed_install_keeps_previous_cache() {
        let mut net = network();
        let mut cache = AssetCache::new();
        cache.install("mechanical-calc-v1", &PRECACHE_URLS, &mut net).unwrap();

        let err = cache
            .install("mechanical-calc-v2", &["/", "/not-there.js"], &mut net)
            .unwrap_err();
        assert_eq!(err.error_code(), "FETCH_FAILED");
        assert_eq!(cache.active_name(), Some("mechanical-calc-v1"));
        assert!(cache.lookup("/style.css").is_some());
    }

    #[test]
    fn test_dir_fetcher_rejects_parent_paths() {
        let mut fetcher = DirFetcher::new(std::env::temp_dir());
        assert!(fetcher.fetch("/../etc/passwd").is_err());
    }

    #[test]
    fn test_dir_fetcher_maps_root_to_index() {
        let root = std::env::temp_dir().join("mechcalc_test_assets");
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join("index.html"), "<html></html>").unwrap();

        let mut fetcher = DirFetcher::new(&root);
        assert_eq!(fetcher.fetch("/").unwrap(), b"<html></html>");
        assert_eq!(fetcher.fetch("/index.html").unwrap(), b"<html></html>");

        let _ = std::fs::remove_dir_all(&root);
    }
}
