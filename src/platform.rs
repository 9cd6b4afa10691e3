//! Driver platform identifiers.

use std::fmt;

/// Platform identifier used verbatim in version index lookups.
///
/// The Chrome for Testing index publishes `linux64`, `mac-arm64`, `mac-x64`,
/// `win32`, and `win64` artifacts. The value is opaque to this tool: it is
/// either supplied on the command line or derived once at startup with
/// [`Platform::host`], and never re-derived mid-run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform(String);

impl Platform {
    /// Wrap an explicit platform identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Platform of the running OS and architecture.
    #[must_use]
    pub fn host() -> Self {
        Self(host_identifier().to_string())
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier matching the version index naming.
///
/// The index publishes only `linux64` for Linux, so every Linux architecture
/// maps there; exotic hosts fall back to `linux64` as well and simply fail
/// the lookup if no such artifact exists.
fn host_identifier() -> &'static str {
    #[cfg(all(target_os = "macos", target_arch = "aarch64"))]
    return "mac-arm64";

    #[cfg(all(target_os = "macos", target_arch = "x86_64"))]
    return "mac-x64";

    #[cfg(all(target_os = "windows", target_arch = "x86"))]
    return "win32";

    #[cfg(all(target_os = "windows", not(target_arch = "x86")))]
    return "win64";

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    return "linux64";
}
