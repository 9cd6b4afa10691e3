//! External capability interfaces.
//!
//! Everything the upgrade needs from outside the process sits behind a small
//! one-operation trait: HTTP fetch, version index lookup, APT cache query,
//! browser and driver probes, archive handling. Tests substitute scripted
//! stand-ins; production wiring lives in [`Toolbox::production`].

mod apt;
mod archive;
mod browser;
mod http;

pub use apt::AptCache;
pub use archive::ZipArchiver;
pub use browser::{BrowserVersionProbe, DriverVersionProbe};
pub use http::{HttpFetcher, IndexLookup};

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::platform::Platform;
use crate::version::Version;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Common facet of the preflight-checked capabilities.
pub trait Tool {
    /// Name shown in preflight failures.
    fn name(&self) -> &str;

    /// Whether the capability can be invoked at all.
    fn available(&self) -> bool;
}

/// Downloads a URL to a local file.
pub trait Fetcher: Tool {
    /// Fetch `url` into the file at `dest`, blocking until done.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FetchFailure`] on any transport problem.
    fn fetch(&self, url: &str, dest: &Path) -> Result<()>;
}

/// Maps a driver version and platform to a download URL.
pub trait ReleaseLookup: Tool {
    /// The download URL for `version` on `platform`, or `None`.
    ///
    /// Transport failures and malformed index payloads also read as `None`;
    /// a dead index and an empty result are indistinguishable to the caller.
    fn locate(&self, version: &Version, platform: &Platform) -> Option<String>;
}

/// Queries the system package cache for the next installable browser version.
pub trait PackageCache: Tool {
    /// Next installable version of `package`, or `None` when nothing is
    /// upgradable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ToolUnavailable`] when the package tool itself is
    /// missing.
    fn candidate(&self, package: &str) -> Result<Option<Version>>;
}

/// Reports the installed browser version.
pub trait BrowserProbe {
    /// The installed browser version, or `None` when it is not installed.
    /// A probe whose output cannot be parsed also reads as `None`.
    fn installed_version(&self) -> Option<Version>;
}

/// Reports the version of a driver binary on disk.
pub trait DriverProbe {
    /// The version reported by the binary at `path`, or `None` when the file
    /// is missing or its output cannot be parsed.
    fn version_at(&self, path: &Path) -> Option<Version>;
}

/// Verifies and extracts driver archives.
pub trait Archiver: Tool {
    /// Integrity-test `archive` without extracting anything.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VerificationFailure`] when the archive is unreadable
    /// or any entry fails its checksum.
    fn verify(&self, archive: &Path) -> Result<()>;

    /// Extract the entry named `entry` from `archive` into `dest_dir`,
    /// returning the path of the extracted file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ExtractionFailure`] when the entry is absent or
    /// cannot be written out.
    fn extract(&self, archive: &Path, entry: &str, dest_dir: &Path) -> Result<PathBuf>;
}

/// The full set of external capabilities one upgrade run uses.
pub struct Toolbox {
    /// HTTP download capability.
    pub fetcher: Box<dyn Fetcher>,
    /// Version index lookup.
    pub lookup: Box<dyn ReleaseLookup>,
    /// APT cache query.
    pub packages: Box<dyn PackageCache>,
    /// Installed browser probe.
    pub browser: Box<dyn BrowserProbe>,
    /// Installed driver probe.
    pub driver: Box<dyn DriverProbe>,
    /// Archive verification and extraction.
    pub archiver: Box<dyn Archiver>,
}

impl Toolbox {
    /// The production capabilities for the given settings.
    #[must_use]
    pub fn production(settings: &Settings) -> Self {
        let timeout = Duration::from_secs(settings.fetch_timeout_secs);
        Self {
            fetcher: Box::new(HttpFetcher::new(timeout)),
            lookup: Box::new(IndexLookup::new(settings.index_url.clone(), timeout)),
            packages: Box::new(AptCache::new()),
            browser: Box::new(BrowserVersionProbe::new(settings.browser_command.clone())),
            driver: Box::new(DriverVersionProbe::new()),
            archiver: Box::new(ZipArchiver),
        }
    }

    /// Fail fast when a required capability is unusable.
    ///
    /// Checks the fetcher, the version index lookup, and the archiver; the
    /// package tool is checked only when apt mode is on. The first missing
    /// tool wins. Advisory only: later stages produce their own errors, this
    /// exists to produce a specific one early.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ToolUnavailable`] naming the first missing tool.
    pub fn preflight(&self, apt_mode: bool) -> Result<()> {
        let mut required = vec![
            (self.fetcher.name(), self.fetcher.available()),
            (self.lookup.name(), self.lookup.available()),
            (self.archiver.name(), self.archiver.available()),
        ];
        if apt_mode {
            required.push((self.packages.name(), self.packages.available()));
        }

        for (name, available) in required {
            if !available {
                return Err(Error::ToolUnavailable(name.to_string()));
            }
        }
        Ok(())
    }
}
