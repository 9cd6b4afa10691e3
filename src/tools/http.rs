//! HTTP download and version index lookup.

use crate::error::{Error, Result};
use crate::platform::Platform;
use crate::tools::{Fetcher, ReleaseLookup, Tool};
use crate::version::Version;
use serde::Deserialize;
use std::fs::File;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

fn build_client(timeout: Duration) -> reqwest::Result<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .user_agent(concat!("upgrade-chromedriver/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
}

/// Blocking HTTP downloader.
///
/// The timeout bounds the whole transfer; expiry surfaces as a fetch
/// failure like any other transport problem.
pub struct HttpFetcher {
    client: Option<reqwest::blocking::Client>,
}

impl HttpFetcher {
    /// Build a fetcher with the given transfer timeout.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        let client = build_client(timeout);
        if let Err(ref e) = client {
            warn!("could not build HTTP client: {e}");
        }
        Self {
            client: client.ok(),
        }
    }
}

impl Tool for HttpFetcher {
    fn name(&self) -> &str {
        "downloader"
    }

    fn available(&self) -> bool {
        self.client.is_some()
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str, dest: &Path) -> Result<()> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| Error::ToolUnavailable("downloader".to_string()))?;
        let fail = |reason: String| Error::FetchFailure {
            url: url.to_string(),
            reason,
        };

        debug!("fetching {url} to {}", dest.display());
        let mut response = client
            .get(url)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(|e| fail(e.to_string()))?;
        let mut file = File::create(dest).map_err(|e| fail(e.to_string()))?;
        response.copy_to(&mut file).map_err(|e| fail(e.to_string()))?;
        Ok(())
    }
}

// The index payload: a list of versions, each with per-platform downloads
// for several binaries. Only the chromedriver list matters here.

#[derive(Debug, Deserialize)]
struct KnownGoodVersions {
    #[serde(default)]
    versions: Vec<IndexEntry>,
}

#[derive(Debug, Deserialize)]
struct IndexEntry {
    version: String,
    #[serde(default)]
    downloads: Downloads,
}

#[derive(Debug, Default, Deserialize)]
struct Downloads {
    #[serde(default)]
    chromedriver: Vec<DownloadEntry>,
}

#[derive(Debug, Deserialize)]
struct DownloadEntry {
    platform: String,
    url: String,
}

fn match_url(index: &KnownGoodVersions, version: &Version, platform: &Platform) -> Option<String> {
    let entry = index
        .versions
        .iter()
        .find(|entry| Version::parse(&entry.version).is_ok_and(|v| &v == version))?;

    entry
        .downloads
        .chromedriver
        .iter()
        .find(|download| download.platform == platform.as_str())
        .map(|download| download.url.clone())
}

/// Version index lookup against the known-good-versions endpoint.
pub struct IndexLookup {
    endpoint: String,
    client: Option<reqwest::blocking::Client>,
}

impl IndexLookup {
    /// Build a lookup against `endpoint` with the given request timeout.
    #[must_use]
    pub fn new(endpoint: String, timeout: Duration) -> Self {
        let client = build_client(timeout);
        if let Err(ref e) = client {
            warn!("could not build HTTP client: {e}");
        }
        Self {
            endpoint,
            client: client.ok(),
        }
    }

    fn fetch_index(&self, client: &reqwest::blocking::Client) -> reqwest::Result<KnownGoodVersions> {
        client
            .get(&self.endpoint)
            .send()?
            .error_for_status()?
            .json()
    }
}

impl Tool for IndexLookup {
    fn name(&self) -> &str {
        "version index"
    }

    fn available(&self) -> bool {
        self.client.is_some()
    }
}

impl ReleaseLookup for IndexLookup {
    fn locate(&self, version: &Version, platform: &Platform) -> Option<String> {
        let client = self.client.as_ref()?;
        debug!("looking up chromedriver {version} for {platform}");

        let index = match self.fetch_index(client) {
            Ok(index) => index,
            Err(e) => {
                warn!("version index lookup failed: {e}");
                return None;
            }
        };

        match_url(&index, version, platform)
    }
}
