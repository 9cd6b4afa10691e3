//! Archive staging: where the download lands and how it moves through
//! fetch, verify, and extract.
//!
//! The default staging area is a fresh temporary directory that vanishes
//! with the run. A download directory override stages into a caller-owned
//! directory instead; the run then cleans up individual files, never the
//! directory itself.

use crate::error::{Error, Result};
use crate::platform::Platform;
use crate::tools::{Archiver, Fetcher};
use crate::version::Version;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::debug;

/// Workspace for the downloaded archive and the extracted binary.
pub struct StagingArea {
    dir: PathBuf,
    temp: Option<TempDir>,
}

impl StagingArea {
    /// Prepare a staging area, in `download_dir` when given.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DownloadDirectoryNotWritable`] when the override
    /// directory refuses a write probe, and an I/O error when no temporary
    /// directory can be created.
    pub fn prepare(download_dir: Option<&Path>) -> Result<Self> {
        match download_dir {
            Some(dir) => {
                ensure_writable(dir)?;
                Ok(Self {
                    dir: dir.to_path_buf(),
                    temp: None,
                })
            }
            None => {
                let temp = TempDir::new()?;
                Ok(Self {
                    dir: temp.path().to_path_buf(),
                    temp: Some(temp),
                })
            }
        }
    }

    /// The staging directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Give up ownership of the staging directory so its contents survive
    /// the run. A no-op for a caller-owned download directory.
    pub fn keep(mut self) {
        if let Some(temp) = self.temp.take() {
            debug!("keeping staging directory {}", temp.path().display());
            let _ = temp.keep();
        }
    }
}

fn ensure_writable(dir: &Path) -> Result<()> {
    tempfile::NamedTempFile::new_in(dir)
        .map(drop)
        .map_err(|e| Error::DownloadDirectoryNotWritable {
            path: dir.to_path_buf(),
            reason: e.to_string(),
        })
}

/// The archive file name for a driver release.
#[must_use]
pub fn archive_file_name(driver_name: &str, platform: &Platform, version: &Version) -> String {
    format!("{driver_name}-{platform}-{version}.zip")
}

/// Integrity status of a staged archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationState {
    /// Fetched but not yet integrity-tested.
    Unverified,
    /// The archive read back cleanly.
    Verified,
    /// The integrity test failed; the archive is corrupt or truncated.
    Failed,
}

/// A staged driver archive moving through fetch, verify, and extract.
pub struct DownloadArtifact {
    url: String,
    archive: PathBuf,
    state: VerificationState,
}

impl DownloadArtifact {
    /// Stage an artifact for `url` under `staging` as `file_name`.
    #[must_use]
    pub fn new(staging: &StagingArea, url: String, file_name: &str) -> Self {
        Self {
            archive: staging.dir().join(file_name),
            url,
            state: VerificationState::Unverified,
        }
    }

    /// Where the archive sits on disk.
    #[must_use]
    pub fn archive(&self) -> &Path {
        &self.archive
    }

    /// The download URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Download the archive.
    ///
    /// A fetch that reports success but produces no bytes counts as a
    /// failure; some downloaders exit cleanly on certain dead links.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FetchFailure`] when the transfer fails or produces
    /// an empty file.
    pub fn fetch(&self, fetcher: &dyn Fetcher) -> Result<()> {
        fetcher.fetch(&self.url, &self.archive)?;

        let size = fs::metadata(&self.archive).map_or(0, |m| m.len());
        if size == 0 {
            let _ = fs::remove_file(&self.archive);
            return Err(Error::FetchFailure {
                url: self.url.clone(),
                reason: "no archive was produced".to_string(),
            });
        }
        debug!("fetched {} ({size} bytes)", self.archive.display());
        Ok(())
    }

    /// Integrity status of the archive.
    #[must_use]
    pub fn state(&self) -> VerificationState {
        self.state
    }

    /// Integrity-test the downloaded archive.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VerificationFailure`] when the archive does not
    /// read back cleanly.
    pub fn verify(&mut self, archiver: &dyn Archiver) -> Result<()> {
        match archiver.verify(&self.archive) {
            Ok(()) => {
                self.state = VerificationState::Verified;
                Ok(())
            }
            Err(e) => {
                self.state = VerificationState::Failed;
                Err(e)
            }
        }
    }

    /// Extract the driver binary into the staging directory.
    ///
    /// Refuses archives that have not passed [`verify`](Self::verify).
    ///
    /// # Errors
    ///
    /// Returns [`Error::ExtractionFailure`] when the archive is unverified,
    /// the binary is absent, or it cannot be written out.
    pub fn extract(
        &self,
        archiver: &dyn Archiver,
        binary_name: &str,
        staging: &StagingArea,
    ) -> Result<PathBuf> {
        if self.state != VerificationState::Verified {
            return Err(Error::ExtractionFailure {
                archive: self.archive.clone(),
                reason: "archive has not been verified".to_string(),
            });
        }
        archiver.extract(&self.archive, binary_name, staging.dir())
    }

    /// Remove the archive file. Best effort.
    pub fn discard(&self) {
        if let Err(e) = fs::remove_file(&self.archive) {
            debug!("could not remove {}: {e}", self.archive.display());
        }
    }
}
