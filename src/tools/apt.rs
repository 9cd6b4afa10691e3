//! APT package cache queries.

use crate::config::UpgradeRequest;
use crate::error::{Error, Result};
use crate::tools::{PackageCache, Tool};
use crate::version::Version;
use std::process::Command;
use tracing::{debug, warn};

/// Upgrade candidate lookup through `apt-get --just-print upgrade`.
///
/// The dry-run output lists a `Conf <package> (<version> ...)` line for
/// every package that would be reconfigured; the upstream part of that
/// version is the candidate.
pub struct AptCache;

impl AptCache {
    /// Build a cache query bound to the `apt-get` on the search path.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for AptCache {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for AptCache {
    fn name(&self) -> &str {
        "apt-get"
    }

    fn available(&self) -> bool {
        UpgradeRequest::env_search_path()
            .iter()
            .any(|dir| dir.join("apt-get").is_file())
    }
}

impl PackageCache for AptCache {
    fn candidate(&self, package: &str) -> Result<Option<Version>> {
        if !self.available() {
            return Err(Error::ToolUnavailable("apt-get".to_string()));
        }

        debug!("querying APT cache for {package}");
        let output = Command::new("apt-get")
            .args(["--just-print", "upgrade"])
            .output()
            .map_err(|_| Error::ToolUnavailable("apt-get".to_string()))?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(candidate_from_output(&stdout, package))
    }
}

/// Pick the package's candidate version out of dry-run upgrade output.
///
/// Debian version strings carry a release suffix (`115.0.5790.170-1`);
/// only the upstream part ahead of the first `-` is kept.
fn candidate_from_output(output: &str, package: &str) -> Option<Version> {
    for line in output.lines() {
        let mut fields = line.split_whitespace();
        if fields.next() != Some("Conf") || fields.next() != Some(package) {
            continue;
        }
        let Some(token) = fields.next() else {
            continue;
        };
        let token = token.trim_start_matches('(');
        let upstream = token.split('-').next().unwrap_or(token);
        match Version::parse(upstream) {
            Ok(version) => return Some(version),
            Err(e) => {
                warn!("unusable candidate version for {package}: {e}");
                return None;
            }
        }
    }
    None
}
