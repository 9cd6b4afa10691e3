//! Keeps a chromedriver binary in step with the installed Google Chrome.
//!
//! The library resolves which driver version is wanted (command line, APT
//! cache, or the installed browser), finds its archive in Google's version
//! index, downloads and verifies it, and swaps the binary into place
//! atomically. The `upgrade-chromedriver` binary is a thin command-line
//! front end over [`orchestrator::run`].

pub mod config;
pub mod error;
pub mod event;
pub mod installer;
pub mod orchestrator;
pub mod pipeline;
pub mod platform;
pub mod resolver;
pub mod tools;
pub mod version;

pub use config::{RunMode, Settings, UpgradeRequest};
pub use error::{Error, Result};
pub use event::{ConsoleReporter, RecordingReporter, Reporter, UpgradeEvent};
pub use orchestrator::{run, Outcome};
pub use platform::Platform;
pub use tools::Toolbox;
pub use version::Version;
