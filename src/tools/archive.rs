//! Zip archive verification and extraction.

use crate::error::{Error, Result};
use crate::tools::{Archiver, Tool};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;
use zip::ZipArchive;

/// Zip handling on top of the `zip` crate.
///
/// Verification reads every entry to the end, which checks the central
/// directory, the per-entry headers, and the CRC of the decompressed
/// bytes without writing anything to disk.
pub struct ZipArchiver;

impl ZipArchiver {
    /// Build an archiver.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for ZipArchiver {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for ZipArchiver {
    fn name(&self) -> &str {
        "zip"
    }

    fn available(&self) -> bool {
        true
    }
}

impl Archiver for ZipArchiver {
    fn verify(&self, archive: &Path) -> Result<()> {
        let fail = |reason: String| Error::VerificationFailure {
            archive: archive.to_path_buf(),
            reason,
        };

        let file = File::open(archive).map_err(|e| fail(e.to_string()))?;
        let mut zip = ZipArchive::new(file).map_err(|e| fail(e.to_string()))?;
        if zip.is_empty() {
            return Err(fail("archive holds no entries".to_string()));
        }
        for index in 0..zip.len() {
            let mut entry = zip.by_index(index).map_err(|e| fail(e.to_string()))?;
            let name = entry.name().to_string();
            io::copy(&mut entry, &mut io::sink()).map_err(|e| fail(format!("entry {name}: {e}")))?;
        }
        debug!("{} verified", archive.display());
        Ok(())
    }

    fn extract(&self, archive: &Path, binary_name: &str, dest_dir: &Path) -> Result<PathBuf> {
        let fail = |reason: String| Error::ExtractionFailure {
            archive: archive.to_path_buf(),
            reason,
        };

        let file = File::open(archive).map_err(|e| fail(e.to_string()))?;
        let mut zip = ZipArchive::new(file).map_err(|e| fail(e.to_string()))?;
        let index = locate_entry(&mut zip, binary_name)
            .ok_or_else(|| fail(format!("no {binary_name} entry in the archive")))?;

        let mut entry = zip.by_index(index).map_err(|e| fail(e.to_string()))?;
        let target = dest_dir.join(binary_name);
        let mut out = File::create(&target).map_err(|e| fail(e.to_string()))?;
        if let Err(e) = io::copy(&mut entry, &mut out) {
            // Never leave a partial binary behind.
            drop(out);
            let _ = std::fs::remove_file(&target);
            return Err(fail(e.to_string()));
        }
        debug!("extracted {binary_name} to {}", target.display());
        Ok(target)
    }
}

/// Find the binary inside the archive by base name.
///
/// Accepts the entry at the archive root or under a single vendor
/// directory, the layout Google's driver archives use. Deeper nesting
/// is not searched.
fn locate_entry(zip: &mut ZipArchive<File>, binary_name: &str) -> Option<usize> {
    (0..zip.len()).find(|&index| {
        zip.by_index(index).ok().is_some_and(|entry| {
            entry.is_file()
                && entry.enclosed_name().is_some_and(|path| {
                    path.file_name().is_some_and(|name| name == binary_name)
                        && path.components().count() <= 2
                })
        })
    })
}
