//! Upgrade runs that end badly, and what they leave behind.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::harness::{self, Scenario, TestBed, NEW_VERSION};
use std::fs;
use upgrade_chromedriver::{Error, Outcome};

/// With tools missing and work to do, the first missing tool is named.
#[test]
fn test_missing_tools_reported() {
    let bed = TestBed::new();
    let scenario = Scenario {
        tools_available: false,
        ..Scenario::default()
    };

    let (result, _) = harness::run_upgrade(&bed, &scenario, &bed.request());

    let err = result.expect_err("missing tools should fail the run");
    assert_eq!(err.to_string(), "Required tool downloader not found");
    assert_eq!(err.exit_code(), 1);
}

/// A failed transfer reads as a download failure.
#[test]
fn test_failed_transfer_reports_download_failure() {
    let bed = TestBed::new();
    let scenario = Scenario {
        driver: None,
        fetch_succeeds: false,
        ..Scenario::default()
    };

    let (result, _) = harness::run_upgrade(&bed, &scenario, &bed.request());

    let err = result.expect_err("failed transfer should fail the run");
    assert!(err.to_string().starts_with("Failed to download"));
    assert_eq!(err.exit_code(), 1);
    assert!(!bed.fallback_dir.join("chromedriver").exists());
}

/// A transfer that produces no file also reads as a download failure.
#[test]
fn test_transfer_without_file_is_download_failure() {
    let bed = TestBed::new();
    let scenario = Scenario {
        driver: None,
        fetch_writes_file: false,
        ..Scenario::default()
    };

    let (result, _) = harness::run_upgrade(&bed, &scenario, &bed.request());

    let err = result.expect_err("empty transfer should fail the run");
    assert!(err.to_string().starts_with("Failed to download"));
}

/// An archive that fails verification reads as a download failure, and the
/// staged file is cleaned up.
#[test]
fn test_corrupt_archive_fails_verification() {
    let bed = TestBed::new();
    let downloads = bed.subdir("downloads");
    let scenario = Scenario {
        driver: None,
        corrupt_archive: true,
        ..Scenario::default()
    };
    let mut request = bed.request();
    request.mode.download_dir = Some(downloads.clone());

    let (result, _) = harness::run_upgrade(&bed, &scenario, &request);

    let err = result.expect_err("corrupt archive should fail the run");
    assert!(err.to_string().starts_with("Failed to download"));
    assert_eq!(harness::entry_count(&downloads), 0);
}

/// On request, the archive that failed verification is kept for inspection.
#[test]
fn test_corrupt_archive_kept_on_request() {
    let bed = TestBed::new();
    let downloads = bed.subdir("downloads");
    let scenario = Scenario {
        driver: None,
        corrupt_archive: true,
        ..Scenario::default()
    };
    let mut request = bed.request();
    request.mode.download_dir = Some(downloads.clone());
    request.mode.leave_zip_on_failure = true;

    let (result, _) = harness::run_upgrade(&bed, &scenario, &request);

    result.expect_err("corrupt archive should fail the run");
    assert_eq!(harness::entry_count(&downloads), 1);
}

/// A failed extraction is its own failure kind.
#[test]
fn test_failed_extraction_reported() {
    let bed = TestBed::new();
    let scenario = Scenario {
        driver: None,
        extract_succeeds: false,
        ..Scenario::default()
    };

    let (result, _) = harness::run_upgrade(&bed, &scenario, &bed.request());

    let err = result.expect_err("failed extraction should fail the run");
    assert!(err.to_string().starts_with("Failed to extract"));
    assert!(!bed.fallback_dir.join("chromedriver").exists());
}

/// The archive survives a failed extraction when asked to stay, and is the
/// only thing left in the download directory.
#[test]
fn test_extraction_failure_keeps_archive_on_request() {
    let bed = TestBed::new();
    let downloads = bed.subdir("downloads");
    let scenario = Scenario {
        driver: None,
        extract_succeeds: false,
        ..Scenario::default()
    };
    let mut request = bed.request();
    request.mode.download_dir = Some(downloads.clone());
    request.mode.leave_zip_on_failure = true;

    let (result, _) = harness::run_upgrade(&bed, &scenario, &request);

    let err = result.expect_err("failed extraction should fail the run");
    assert_eq!(err.exit_code(), 1);
    assert_eq!(harness::entry_count(&downloads), 1);
    assert!(downloads
        .join(format!("chromedriver-linux64-{NEW_VERSION}.zip"))
        .exists());
}

/// Without a browser there is nothing to derive the target version from.
#[test]
fn test_missing_browser_reported() {
    let bed = TestBed::new();
    let scenario = Scenario {
        chrome: None,
        update_found: false,
        ..Scenario::default()
    };

    let (result, _) = harness::run_upgrade(&bed, &scenario, &bed.request());

    let err = result.expect_err("no browser should fail the run");
    assert!(matches!(err, Error::BrowserNotInstalled));
    assert_eq!(err.to_string(), "Google Chrome is not installed");
}

/// A version absent from the index is reported as not downloadable.
#[test]
fn test_no_artifact_for_version() {
    let bed = TestBed::new();
    let scenario = Scenario {
        driver: None,
        update_found: false,
        ..Scenario::default()
    };

    let (result, _) = harness::run_upgrade(&bed, &scenario, &bed.request());

    let err = result.expect_err("missing artifact should fail the run");
    assert!(err
        .to_string()
        .starts_with("Could not find downloadable chromedriver"));
    assert_eq!(err.exit_code(), 1);
}

/// Apt mode with nothing upgradable ends cleanly.
#[test]
fn test_apt_without_candidate_is_clean_exit() {
    let bed = TestBed::new();
    let scenario = Scenario {
        driver: None,
        apt_candidate: None,
        ..Scenario::default()
    };
    let mut request = bed.request();
    request.use_apt = true;

    let (result, reporter) = harness::run_upgrade(&bed, &scenario, &request);

    let outcome = result.expect("no candidate should end cleanly");
    assert!(matches!(outcome, Outcome::NoAptUpgrade));
    assert!(harness::output(&reporter).contains("No upgradable google-chrome-stable"));
}

/// The clean no-candidate exit does not depend on the download tools.
#[test]
fn test_apt_without_candidate_ignores_missing_tools() {
    let bed = TestBed::new();
    let scenario = Scenario {
        driver: None,
        apt_candidate: None,
        tools_available: false,
        ..Scenario::default()
    };
    let mut request = bed.request();
    request.use_apt = true;

    let (result, _) = harness::run_upgrade(&bed, &scenario, &request);

    assert!(matches!(result, Ok(Outcome::NoAptUpgrade)));
}

/// Apt mode without apt-get names the missing tool.
#[test]
fn test_missing_apt_get_reported() {
    let bed = TestBed::new();
    let scenario = Scenario {
        driver: None,
        apt_available: false,
        ..Scenario::default()
    };
    let mut request = bed.request();
    request.use_apt = true;

    let (result, _) = harness::run_upgrade(&bed, &scenario, &request);

    let err = result.expect_err("missing apt-get should fail the run");
    assert_eq!(err.to_string(), "Required tool apt-get not found");
}

/// A download directory that cannot take files stops the run before any
/// transfer.
#[test]
fn test_unusable_download_dir_rejected() {
    let bed = TestBed::new();
    let blocker = bed.path().join("blocker");
    fs::write(&blocker, b"plain file, not a directory").expect("Failed to write blocker");

    let scenario = Scenario {
        driver: None,
        ..Scenario::default()
    };
    let mut request = bed.request();
    request.mode.download_dir = Some(blocker);

    let (result, _) = harness::run_upgrade(&bed, &scenario, &request);

    let err = result.expect_err("unusable download dir should fail the run");
    assert!(matches!(err, Error::DownloadDirectoryNotWritable { .. }));
    assert!(err.to_string().contains("is not writable"));
}

/// A blocked install path fails the run and leaves the occupant alone.
#[test]
fn test_blocked_install_path_reported() {
    let bed = TestBed::new();
    let target = bed.subdir("target");
    // The final path is occupied by a directory, so the rename cannot land.
    fs::create_dir_all(target.join("chromedriver")).expect("Failed to create occupant");
    fs::write(target.join("chromedriver").join("keep.txt"), b"still here")
        .expect("Failed to write occupant file");

    let scenario = Scenario {
        driver: None,
        ..Scenario::default()
    };
    let mut request = bed.request();
    request.mode.target_dir = Some(target.clone());

    let (result, _) = harness::run_upgrade(&bed, &scenario, &request);

    let err = result.expect_err("blocked install path should fail the run");
    assert!(err.to_string().starts_with("Failed to install"));
    assert!(target.join("chromedriver").join("keep.txt").exists());
}
