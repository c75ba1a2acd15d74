//! Download index client.
//!
//! The ziglang.org index is one JSON document keyed by version, with a
//! `master` entry that names the current dev build and its per-platform
//! tarballs. Only the master resolution is interpreted here; `zup index`
//! passes the raw document through.

use crate::platform::Platform;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use zup_core::error::{Error, Result};

/// Default URL of the download index.
pub const DEFAULT_INDEX_URL: &str = "https://ziglang.org/download/index.json";

/// The concrete release the `master` token resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MasterRelease {
    /// Concrete version name, e.g. `0.12.0-dev.100+aaaa`.
    pub version: String,
    /// Platform-specific archive URL.
    pub tarball_url: String,
}

/// Client for fetching and interpreting the download index.
#[derive(Debug, Clone)]
pub struct IndexClient {
    http: reqwest::Client,
    url: String,
}

impl IndexClient {
    /// Create a client against `url` with a request timeout in seconds.
    pub fn new(url: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| Error::config(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }

    /// The index URL this client fetches.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch and parse the index document.
    pub async fn fetch(&self) -> Result<Value> {
        debug!("Fetching download index from {}", self.url);
        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::download(&self.url, "request failed", Some(Box::new(e))))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::download(&self.url, format!("HTTP {status}"), None));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| Error::download(&self.url, "invalid JSON", Some(Box::new(e))))
    }

    /// Resolve the `master` token to a concrete version and archive URL.
    pub async fn resolve_master(&self, platform: Platform) -> Result<MasterRelease> {
        let doc = self.fetch().await?;
        resolve_master_in(&doc, platform, &self.url)
    }
}

/// Extract the master release for `platform` from a parsed index.
///
/// Every missing or mistyped key is a `MalformedIndex` naming the field,
/// so a schema drift upstream reports precisely instead of crashing.
pub fn resolve_master_in(doc: &Value, platform: Platform, url: &str) -> Result<MasterRelease> {
    let malformed = |field: String| Error::MalformedIndex {
        url: url.to_string(),
        field,
    };

    let master = doc
        .get("master")
        .ok_or_else(|| malformed("master".to_string()))?;

    let version = master
        .get("version")
        .and_then(Value::as_str)
        .ok_or_else(|| malformed("master.version".to_string()))?;

    let key = platform.index_key();
    let entry = master
        .get(&key)
        .ok_or_else(|| malformed(format!("master.{key}")))?;

    let tarball_url = entry
        .get("tarball")
        .and_then(Value::as_str)
        .ok_or_else(|| malformed(format!("master.{key}.tarball")))?;

    Ok(MasterRelease {
        version: version.to_string(),
        tarball_url: tarball_url.to_string(),
    })
}
