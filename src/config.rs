//! Configuration for upgrade-chromedriver.

use crate::platform::Platform;
use crate::version::Version;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Tool settings, optionally loaded from a TOML file.
///
/// Every field has a sensible default; a config file only needs the keys it
/// wants to change. Command-line flags override file values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Browser command probed for the installed version.
    #[serde(default = "default_browser_command")]
    pub browser_command: String,

    /// Name of the driver binary this tool installs.
    #[serde(default = "default_driver_name")]
    pub driver_name: String,

    /// Package queried in the APT cache with `--apt`.
    #[serde(default = "default_apt_package")]
    pub apt_package: String,

    /// Version index endpoint listing driver downloads per version.
    #[serde(default = "default_index_url")]
    pub index_url: String,

    /// Bounded wait for each network call, in seconds.
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// Install directory used when no driver is found on the search path.
    #[serde(default = "default_fallback_install_dir")]
    pub fallback_install_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            browser_command: default_browser_command(),
            driver_name: default_driver_name(),
            apt_package: default_apt_package(),
            index_url: default_index_url(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            fallback_install_dir: default_fallback_install_dir(),
        }
    }
}

fn default_browser_command() -> String {
    "google-chrome".to_string()
}

fn default_driver_name() -> String {
    "chromedriver".to_string()
}

fn default_apt_package() -> String {
    "google-chrome-stable".to_string()
}

fn default_index_url() -> String {
    "https://googlechromelabs.github.io/chrome-for-testing/known-good-versions-with-downloads.json"
        .to_string()
}

const fn default_fetch_timeout_secs() -> u64 {
    120
}

fn default_fallback_install_dir() -> PathBuf {
    directories::UserDirs::new()
        .map(|dirs| dirs.home_dir().join(".local").join("bin"))
        .unwrap_or_else(|| PathBuf::from(".local/bin"))
}

impl Settings {
    /// Load settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save settings to a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn to_file(&self, path: &std::path::Path) -> crate::Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Per-run behavior flags.
///
/// Flags only add early exits or retention to the fixed stage sequence; they
/// never reorder it. A platform override is resolved into
/// [`UpgradeRequest::platform`] before the run starts.
#[derive(Debug, Clone, Default)]
pub struct RunMode {
    /// Report findings only; no downloads, no writes.
    pub dry: bool,

    /// Skip the up-to-date short-circuit and reinstall.
    pub force: bool,

    /// Stop once a verified archive is staged; never install.
    pub download_only: bool,

    /// Keep the downloaded archive when a stage after the fetch fails.
    pub leave_zip_on_failure: bool,

    /// Install directory override.
    pub target_dir: Option<PathBuf>,

    /// Staging directory override (default is a fresh temporary directory).
    pub download_dir: Option<PathBuf>,
}

/// Everything one upgrade run needs, assembled before the first stage.
#[derive(Debug, Clone)]
pub struct UpgradeRequest {
    /// Target version given on the command line, if any.
    pub explicit_version: Option<Version>,

    /// Resolve the target version from the APT package cache.
    pub use_apt: bool,

    /// Platform identifier, explicit or host-derived. Fixed for the run.
    pub platform: Platform,

    /// Behavior flags.
    pub mode: RunMode,

    /// Tool settings.
    pub settings: Settings,

    /// Directories searched for an installed driver binary.
    pub search_path: Vec<PathBuf>,
}

impl UpgradeRequest {
    /// The executable search path from the `PATH` environment variable.
    ///
    /// Captured once at startup so every probe in the run sees the same
    /// directories.
    #[must_use]
    pub fn env_search_path() -> Vec<PathBuf> {
        std::env::var_os("PATH")
            .map(|path| std::env::split_paths(&path).collect())
            .unwrap_or_default()
    }
}
