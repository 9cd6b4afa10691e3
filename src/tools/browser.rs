//! Version probes for the installed browser and driver binaries.

use crate::tools::{BrowserProbe, DriverProbe};
use crate::version::Version;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// The first whitespace token of `--version` output that parses as a
/// version. Tolerates leading product names of any length.
fn version_from_output(output: &str) -> Option<Version> {
    output
        .split_whitespace()
        .find_map(|token| Version::parse(token).ok())
}

/// Probes the installed browser by running its `--version` command.
pub struct BrowserVersionProbe {
    command: String,
}

impl BrowserVersionProbe {
    /// Build a probe that runs `command --version`.
    #[must_use]
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl BrowserProbe for BrowserVersionProbe {
    fn installed_version(&self) -> Option<Version> {
        let output = Command::new(&self.command).arg("--version").output().ok()?;
        if !output.status.success() {
            debug!("{} --version exited nonzero", self.command);
            return None;
        }
        version_from_output(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Probes a driver binary on disk by running it with `--version`.
pub struct DriverVersionProbe;

impl DriverVersionProbe {
    /// Build a driver probe.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for DriverVersionProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl DriverProbe for DriverVersionProbe {
    fn version_at(&self, path: &Path) -> Option<Version> {
        if !path.is_file() {
            return None;
        }
        let output = Command::new(path).arg("--version").output().ok()?;
        if !output.status.success() {
            debug!("{} --version exited nonzero", path.display());
            return None;
        }
        version_from_output(&String::from_utf8_lossy(&output.stdout))
    }
}
