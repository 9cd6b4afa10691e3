//! The upgrade run: a fixed stage sequence with early clean exits.
//!
//! Stages always run in the same order. Resolve the target version, probe
//! the installed driver, short-circuit when they match, preflight the
//! remaining tools, locate the artifact, then fetch, verify, extract, and
//! install. Flags add exits or retention; they never reorder stages.

use crate::config::{RunMode, UpgradeRequest};
use crate::error::{Error, Result};
use crate::event::{Reporter, UpgradeEvent};
use crate::installer;
use crate::pipeline::{archive_file_name, DownloadArtifact, StagingArea};
use crate::resolver::{self, TargetResolution};
use crate::tools::Toolbox;
use crate::version::Version;
use std::path::PathBuf;
use tracing::debug;

/// How a successful run ended. Every variant exits 0.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// The installed driver already matches the target version.
    AlreadyUpToDate {
        /// The matching version.
        version: Version,
    },

    /// Apt mode found no upgrade candidate, so there is nothing to do.
    NoAptUpgrade,

    /// Dry run: an artifact exists for the target version.
    UpdateAvailable {
        /// The target version.
        version: Version,
        /// Where its archive can be downloaded.
        url: String,
    },

    /// Download-only run: the verified archive is staged and kept.
    Downloaded {
        /// The retained archive.
        archive: PathBuf,
    },

    /// The new driver is installed.
    Installed {
        /// The installed version.
        version: Version,
        /// Final binary path.
        path: PathBuf,
    },
}

/// Run one upgrade.
///
/// # Errors
///
/// Returns the first stage error. The error's rendering is the line shown
/// to the user and [`Error::exit_code`] picks the process exit code.
pub fn run(request: &UpgradeRequest, tools: &Toolbox, reporter: &dyn Reporter) -> Result<Outcome> {
    let target = match resolver::resolve_target(
        request,
        tools.packages.as_ref(),
        tools.browser.as_ref(),
    )? {
        TargetResolution::Wanted { version, source } => {
            reporter.report(&UpgradeEvent::TargetResolved {
                version: version.clone(),
                source,
            });
            version
        }
        TargetResolution::NoAptCandidate => {
            reporter.report(&UpgradeEvent::NoAptCandidate {
                package: request.settings.apt_package.clone(),
            });
            return Ok(Outcome::NoAptUpgrade);
        }
    };

    let installed = resolver::locate_installed(request, tools.driver.as_ref());
    reporter.report(&UpgradeEvent::InstalledResolved {
        version: installed.as_ref().map(|driver| driver.version.clone()),
    });

    if !request.mode.force {
        if let Some(driver) = &installed {
            if driver.version == target {
                reporter.report(&UpgradeEvent::AlreadyInstalled {
                    version: target.clone(),
                });
                return Ok(Outcome::AlreadyUpToDate { version: target });
            }
        }
    }

    tools.preflight(request.use_apt)?;
    debug!("upgrading to {target} for {}", request.platform);

    let url = tools
        .lookup
        .locate(&target, &request.platform)
        .ok_or_else(|| Error::NoMatchingArtifact {
            version: target.to_string(),
            platform: request.platform.to_string(),
        })?;
    reporter.report(&UpgradeEvent::ArtifactLocated {
        url: url.clone(),
        platform: request.platform.clone(),
    });

    if request.mode.dry {
        return Ok(Outcome::UpdateAvailable {
            version: target,
            url,
        });
    }

    let staging = StagingArea::prepare(request.mode.download_dir.as_deref())?;
    debug!("staging in {}", staging.dir().display());
    let file_name = archive_file_name(&request.settings.driver_name, &request.platform, &target);
    let mut artifact = DownloadArtifact::new(&staging, url, &file_name);

    // A failed transfer can leave a partial file; it is garbage either way.
    if let Err(e) = artifact.fetch(tools.fetcher.as_ref()) {
        artifact.discard();
        return Err(e);
    }

    if let Err(e) = artifact.verify(tools.archiver.as_ref()) {
        cleanup_failed(staging, &artifact, &request.mode);
        return Err(e);
    }
    reporter.report(&UpgradeEvent::Downloaded {
        archive: artifact.archive().to_path_buf(),
    });

    if request.mode.download_only {
        let archive = artifact.archive().to_path_buf();
        staging.keep();
        return Ok(Outcome::Downloaded { archive });
    }

    let binary = match artifact.extract(
        tools.archiver.as_ref(),
        &request.settings.driver_name,
        &staging,
    ) {
        Ok(binary) => binary,
        Err(e) => {
            cleanup_failed(staging, &artifact, &request.mode);
            return Err(e);
        }
    };

    // The archive is spent once its binary is out.
    artifact.discard();

    let dir = resolver::install_dir(request, installed.as_ref());
    let path = match installer::install(&binary, &dir, &request.settings.driver_name) {
        Ok(path) => path,
        Err(e) => {
            let _ = std::fs::remove_file(&binary);
            return Err(e);
        }
    };

    reporter.report(&UpgradeEvent::Installed {
        version: target.clone(),
        path: path.clone(),
    });
    Ok(Outcome::Installed {
        version: target,
        path,
    })
}

/// Dispose of staged files after a failure downstream of a good fetch.
///
/// The archive is deleted unless the run asked to keep it; a kept
/// temporary staging directory is surrendered so it survives the run.
fn cleanup_failed(staging: StagingArea, artifact: &DownloadArtifact, mode: &RunMode) {
    if mode.leave_zip_on_failure {
        staging.keep();
    } else {
        artifact.discard();
    }
}
