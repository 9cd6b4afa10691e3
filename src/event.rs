//! Run progress events.
//!
//! Progress is reported through the [`Reporter`] trait instead of ad-hoc
//! printing so the user-facing lines stay in one place and tests can capture
//! them. [`ConsoleReporter`] is what the binary uses; [`RecordingReporter`]
//! collects events for inspection.

use crate::platform::Platform;
use crate::resolver::ResolutionSource;
use crate::version::Version;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Events emitted while an upgrade run progresses.
#[derive(Debug, Clone)]
pub enum UpgradeEvent {
    /// Target driver version resolved.
    TargetResolved {
        /// The version to install.
        version: Version,
        /// Where it came from.
        source: ResolutionSource,
    },

    /// Installed driver version probed.
    InstalledResolved {
        /// The installed version, or `None` when no driver was found.
        version: Option<Version>,
    },

    /// The installed driver already matches the target.
    AlreadyInstalled {
        /// The matching version.
        version: Version,
    },

    /// The package cache has no upgrade candidate.
    NoAptCandidate {
        /// The queried package.
        package: String,
    },

    /// A downloadable driver archive was located.
    ArtifactLocated {
        /// Download URL from the version index.
        url: String,
        /// Platform the artifact was looked up for.
        platform: Platform,
    },

    /// Archive downloaded and verified.
    Downloaded {
        /// The staged archive.
        archive: PathBuf,
    },

    /// Driver installed.
    Installed {
        /// The new driver version.
        version: Version,
        /// Final install path.
        path: PathBuf,
    },
}

impl UpgradeEvent {
    /// The user-facing line for this event.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::TargetResolved { version, source } => {
                format!("Target version {version} ({source})")
            }
            Self::InstalledResolved {
                version: Some(version),
            } => format!("Installed chromedriver is {version}"),
            Self::InstalledResolved { version: None } => {
                "No chromedriver is currently installed".to_string()
            }
            Self::AlreadyInstalled { version } => {
                format!("chromedriver {version} is already installed")
            }
            Self::NoAptCandidate { package } => {
                format!("No upgradable {package} version found")
            }
            Self::ArtifactLocated { url, platform } => {
                format!("Found downloadable chromedriver for {platform}: {url}")
            }
            Self::Downloaded { archive } => format!("Downloaded {}", archive.display()),
            Self::Installed { version, path } => {
                format!("Installed chromedriver {version} to {}", path.display())
            }
        }
    }
}

/// Observer for upgrade progress.
pub trait Reporter {
    /// Handle one progress event.
    fn report(&self, event: &UpgradeEvent);
}

/// Writes each event's line to stdout.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&self, event: &UpgradeEvent) {
        println!("{}", event.message());
    }
}

/// Collects events in memory for later inspection.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<UpgradeEvent>>,
}

impl RecordingReporter {
    /// All events reported so far.
    #[must_use]
    pub fn events(&self) -> Vec<UpgradeEvent> {
        self.lock().clone()
    }

    /// The rendered lines of all events reported so far.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.lock().iter().map(UpgradeEvent::message).collect()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<UpgradeEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, event: &UpgradeEvent) {
        self.lock().push(event.clone());
    }
}
