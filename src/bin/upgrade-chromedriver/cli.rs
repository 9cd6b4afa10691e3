//! Command-line interface definition.

use clap::Parser;
use std::path::PathBuf;
use upgrade_chromedriver::config::{RunMode, Settings, UpgradeRequest};
use upgrade_chromedriver::{Error, Platform, Version};

/// Upgrade the installed chromedriver to match Google Chrome.
#[derive(Parser, Debug)]
#[command(name = "upgrade-chromedriver")]
#[command(author, version, about, long_about = None)]
// Help is hand-routed in main so it can exit 1, and the auto --version
// flag's id would collide with the VERSION positional.
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// Driver version to install (defaults to the installed Chrome's version).
    #[arg(value_name = "VERSION")]
    pub version: Option<String>,

    /// Driver version to install, as a flag.
    #[arg(long, value_name = "VERSION")]
    pub chrome: Option<String>,

    /// Take the target version from the APT upgrade candidate.
    #[arg(long)]
    pub apt: bool,

    /// Platform identifier for the download (defaults to this machine).
    #[arg(long, env = "UPGRADE_CHROMEDRIVER_PLATFORM")]
    pub platform: Option<String>,

    /// Install into this directory instead of the detected one.
    #[arg(long, env = "UPGRADE_CHROMEDRIVER_TARGET_DIR")]
    pub target_dir: Option<PathBuf>,

    /// Stage the download in this directory instead of a temporary one.
    #[arg(long, env = "UPGRADE_CHROMEDRIVER_DOWNLOAD_DIR")]
    pub download_dir: Option<PathBuf>,

    /// Report the downloadable driver without installing anything.
    #[arg(long)]
    pub dry: bool,

    /// Reinstall even when the installed driver already matches.
    #[arg(long)]
    pub force: bool,

    /// Stop once the verified archive is staged.
    #[arg(long)]
    pub download_only: bool,

    /// Keep the downloaded archive when a later stage fails.
    #[arg(long)]
    pub leave_zip_on_failure: bool,

    /// Log level.
    #[arg(long, default_value = "warn", env = "RUST_LOG")]
    pub log_level: String,

    /// Path to configuration file.
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Print help.
    #[arg(long, short = 'h')]
    pub help: bool,
}

impl Cli {
    /// Convert CLI arguments into an upgrade request.
    ///
    /// # Errors
    ///
    /// Returns a usage error when the version is given both bare and
    /// through `--chrome`, a parse error for a malformed version, and a
    /// configuration error when the config file cannot be loaded.
    pub fn into_request(self) -> upgrade_chromedriver::Result<UpgradeRequest> {
        let settings = match &self.config {
            Some(path) => Settings::from_file(path)?,
            None => Settings::default(),
        };

        if self.version.is_some() && self.chrome.is_some() {
            return Err(Error::Usage(
                "give the version either bare or through --chrome, not both".to_string(),
            ));
        }
        let explicit_version = match self.version.as_deref().or(self.chrome.as_deref()) {
            Some(text) => Some(Version::parse(text)?),
            None => None,
        };

        let platform = self.platform.map_or_else(Platform::host, Platform::new);

        Ok(UpgradeRequest {
            explicit_version,
            use_apt: self.apt,
            platform,
            mode: RunMode {
                dry: self.dry,
                force: self.force,
                download_only: self.download_only,
                leave_zip_on_failure: self.leave_zip_on_failure,
                target_dir: self.target_dir,
                download_dir: self.download_dir,
            },
            settings,
            search_path: UpgradeRequest::env_search_path(),
        })
    }
}
