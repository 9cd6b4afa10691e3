//! Atomic driver installation.

use crate::error::{Error, Result};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Install the staged binary as `binary_name` inside `dir`.
///
/// The bytes are copied to a temporary file beside the final path, made
/// executable, then renamed over whatever is there. Until the rename lands
/// the previous binary stays fully usable; there is no window with a
/// missing or half-written driver.
///
/// # Errors
///
/// Returns [`Error::InstallFailure`] when the directory cannot be created,
/// the staged bytes cannot be copied in, or the rename fails.
pub fn install(staged: &Path, dir: &Path, binary_name: &str) -> Result<PathBuf> {
    let target = dir.join(binary_name);
    let fail = |reason: String| Error::InstallFailure {
        path: target.clone(),
        reason,
    };

    fs::create_dir_all(dir).map_err(|e| fail(e.to_string()))?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| fail(e.to_string()))?;
    let mut source = File::open(staged).map_err(|e| fail(e.to_string()))?;
    io::copy(&mut source, tmp.as_file_mut()).map_err(|e| fail(e.to_string()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(fs::Permissions::from_mode(0o755))
            .map_err(|e| fail(e.to_string()))?;
    }

    tmp.persist(&target).map_err(|e| fail(e.to_string()))?;

    // The staged copy has served its purpose.
    if let Err(e) = fs::remove_file(staged) {
        debug!("could not remove staged binary {}: {e}", staged.display());
    }

    debug!("installed {}", target.display());
    Ok(target)
}
