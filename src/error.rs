//! Error types for upgrade-chromedriver.

use std::path::PathBuf;

/// Errors that can end an upgrade run.
///
/// Every variant renders as the single line shown to the user; the exit code
/// comes from [`Error::exit_code`]. Nothing is retried; the tool is meant to
/// be re-invoked by its caller.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required external capability is missing or unusable.
    #[error("Required tool {0} not found")]
    ToolUnavailable(String),

    /// A version string could not be parsed.
    #[error("Malformed version string {0:?}")]
    MalformedVersion(String),

    /// No browser to derive a target version from.
    #[error("Google Chrome is not installed")]
    BrowserNotInstalled,

    /// The version index has no driver artifact for this version/platform.
    #[error("Could not find downloadable chromedriver {version} for {platform}")]
    NoMatchingArtifact {
        /// Requested driver version.
        version: String,
        /// Requested platform identifier.
        platform: String,
    },

    /// Transport failed, or transport succeeded without producing a file.
    #[error("Failed to download {url}: {reason}")]
    FetchFailure {
        /// Origin URL of the artifact.
        url: String,
        /// What went wrong.
        reason: String,
    },

    /// The downloaded archive failed its integrity test.
    ///
    /// Shares the "Failed to download" lead-in: an artifact that does not
    /// verify was never usefully downloaded.
    #[error("Failed to download {}: {reason}", archive.display())]
    VerificationFailure {
        /// The staged archive that failed verification.
        archive: PathBuf,
        /// What went wrong.
        reason: String,
    },

    /// The archive verified but the driver entry could not be extracted.
    #[error("Failed to extract chromedriver from {}: {reason}", archive.display())]
    ExtractionFailure {
        /// The staged archive.
        archive: PathBuf,
        /// What went wrong.
        reason: String,
    },

    /// The new binary could not be swapped into place.
    #[error("Failed to install chromedriver to {}: {reason}", path.display())]
    InstallFailure {
        /// Intended install path.
        path: PathBuf,
        /// What went wrong.
        reason: String,
    },

    /// The requested download directory cannot be used for staging.
    #[error("Download directory {} is not writable: {reason}", path.display())]
    DownloadDirectoryNotWritable {
        /// The rejected directory.
        path: PathBuf,
        /// What went wrong.
        reason: String,
    },

    /// Conflicting or invalid command-line usage.
    #[error("{0}")]
    Usage(String),

    /// Configuration file problem.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem error outside the stages above.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Process exit code for this error.
    ///
    /// Usage problems exit 2; every other fatal condition exits 1.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) => 2,
            _ => 1,
        }
    }
}
