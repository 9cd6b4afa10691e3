//! Target and installed version resolution.
//!
//! The target version comes from exactly one place per run: the command
//! line, the APT cache, or the installed browser, in that priority. The
//! installed driver is located by probing the target directory override,
//! the executable search path, then the fallback install directory.

use crate::config::UpgradeRequest;
use crate::error::{Error, Result};
use crate::tools::{BrowserProbe, DriverProbe, PackageCache};
use crate::version::Version;
use std::fmt;
use std::path::PathBuf;
use tracing::debug;

/// Where the target version came from. Reported alongside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionSource {
    /// Version given as a command line argument.
    CommandLine,
    /// Version taken from the APT upgrade candidate.
    AptCache,
    /// Version matched to the installed browser.
    InstalledBrowser,
}

impl fmt::Display for ResolutionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::CommandLine => "Command line",
            Self::AptCache => "APT cache",
            Self::InstalledBrowser => "Installed Google Chrome",
        };
        f.write_str(text)
    }
}

/// Outcome of target resolution.
#[derive(Debug, Clone)]
pub enum TargetResolution {
    /// A driver version to aim for, and where it came from.
    Wanted {
        /// The version to install.
        version: Version,
        /// Where it came from.
        source: ResolutionSource,
    },

    /// Apt mode found nothing upgradable. The run stops cleanly.
    NoAptCandidate,
}

/// An installed driver binary: where it sits and what it reports.
#[derive(Debug, Clone)]
pub struct InstalledDriver {
    /// Full path of the binary.
    pub path: PathBuf,
    /// Version it reports.
    pub version: Version,
}

/// Resolve the version to install.
///
/// # Errors
///
/// Returns [`Error::BrowserNotInstalled`] when resolution falls through to
/// the browser probe and no browser is found, and propagates
/// [`Error::ToolUnavailable`] from the package cache in apt mode.
pub fn resolve_target(
    request: &UpgradeRequest,
    packages: &dyn PackageCache,
    browser: &dyn BrowserProbe,
) -> Result<TargetResolution> {
    if let Some(version) = &request.explicit_version {
        return Ok(TargetResolution::Wanted {
            version: version.clone(),
            source: ResolutionSource::CommandLine,
        });
    }

    if request.use_apt {
        return match packages.candidate(&request.settings.apt_package)? {
            Some(version) => Ok(TargetResolution::Wanted {
                version,
                source: ResolutionSource::AptCache,
            }),
            None => Ok(TargetResolution::NoAptCandidate),
        };
    }

    browser
        .installed_version()
        .map(|version| TargetResolution::Wanted {
            version,
            source: ResolutionSource::InstalledBrowser,
        })
        .ok_or(Error::BrowserNotInstalled)
}

/// Find the installed driver, if any.
///
/// A target directory override pins the probe to that directory alone;
/// otherwise the search path directories are probed in order, then the
/// fallback install directory. The first binary that reports a version
/// wins.
pub fn locate_installed(
    request: &UpgradeRequest,
    driver: &dyn DriverProbe,
) -> Option<InstalledDriver> {
    let name = &request.settings.driver_name;

    if let Some(dir) = &request.mode.target_dir {
        let path = dir.join(name);
        return driver.version_at(&path).map(|version| InstalledDriver { path, version });
    }

    request
        .search_path
        .iter()
        .chain(std::iter::once(&request.settings.fallback_install_dir))
        .find_map(|dir| {
            let path = dir.join(name);
            driver.version_at(&path).map(|version| {
                debug!("installed driver {version} at {}", path.display());
                InstalledDriver { path, version }
            })
        })
}

/// The directory the new driver binary goes into.
///
/// A target directory override wins; otherwise the new binary replaces the
/// located one in place, and with nothing installed it goes to the fallback
/// directory.
#[must_use]
pub fn install_dir(request: &UpgradeRequest, installed: Option<&InstalledDriver>) -> PathBuf {
    if let Some(dir) = &request.mode.target_dir {
        return dir.clone();
    }
    if let Some(existing) = installed {
        if let Some(parent) = existing.path.parent() {
            return parent.to_path_buf();
        }
    }
    request.settings.fallback_install_dir.clone()
}
