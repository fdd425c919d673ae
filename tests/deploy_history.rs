#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing
)]
//! Integration tests for the deployment log parser — a realistic
//! multi-line `DeployHistory.txt` excerpt exercised end to end, verifying
//! that:
//! - all three release forms and both revert forms parse
//! - batches split on `...` with status tokens discarded
//! - unparseable sub-events drop without aborting the parse
//! - `latest` answers per-binary queries against source order

use chrono::{NaiveDate, NaiveDateTime};

use rbx_studio::deploy::{DeploymentEvent, DeploymentHistory, DeploymentType};
use rbx_studio::version::VersionNumber;

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .unwrap()
        .and_hms_opt(h, mi, s)
        .unwrap()
}

/// An excerpt shaped like the production log: one batch per line, mixed
/// eras and forms.
const SAMPLE_LOG: &str = "\
New WindowsMFCStudio version-00a0cb2724c0414a at 10/7/2015 4:51:37 PM...Done!
New Studio version-5dd689edbd4941dd at 5/5/2016 4:20:00 PM, file verion: 0, 271, 0, 108037...Done!
New Studio64 version-abc123 at 1/1/2020 12:00:00 PM, file version: 0, 411, 0, 346082, git hash: 9f2e61c...Done!
Revert WindowsPlayer version-old456 at 1/2/2020 3:15:00 PM ...Done!
New WindowsPlayer version-new789 at 1/3/2020 9:05:21 AM, file version: 0, 412, 0, 346500...Done!
Reverting Studio64 to version version-abc122 at 1/4/2020 11:59:59 PM by operator...Done!
";

#[test]
fn sample_log_parses_every_line() {
    let history = DeploymentHistory::parse(SAMPLE_LOG);
    assert_eq!(history.len(), 6);
    assert!(history.dropped().is_empty());
}

#[test]
fn full_form_fills_version_number_and_git_hash() {
    let history = DeploymentHistory::parse(SAMPLE_LOG);
    let release = history.events()[2].as_release().expect("release event");
    assert_eq!(release.deployment_type, DeploymentType::Studio64);
    assert_eq!(release.version_hash, "version-abc123");
    assert_eq!(release.timestamp, at(2020, 1, 1, 12, 0, 0));
    assert_eq!(
        release.version_number,
        Some(VersionNumber::new([0, 411, 0, 346082]))
    );
    assert_eq!(release.git_hash.as_deref(), Some("9f2e61c"));
}

#[test]
fn misspelled_marker_still_fills_version_number() {
    let history = DeploymentHistory::parse(SAMPLE_LOG);
    let release = history.events()[1].as_release().expect("release event");
    assert_eq!(
        release.version_number,
        Some(VersionNumber::new([0, 271, 0, 108037]))
    );
    assert!(release.git_hash.is_none());
}

#[test]
fn fallback_form_fills_neither() {
    let history = DeploymentHistory::parse(SAMPLE_LOG);
    let release = history.events()[0].as_release().expect("release event");
    // "WindowsMFCStudio" is outside the known name table.
    assert_eq!(release.deployment_type, DeploymentType::Unknown);
    assert_eq!(release.timestamp, at(2015, 10, 7, 16, 51, 37));
    assert!(release.version_number.is_none());
    assert!(release.git_hash.is_none());
}

#[test]
fn both_revert_forms_parse() {
    let history = DeploymentHistory::parse(SAMPLE_LOG);

    let short_form = history.events()[3].as_revert().expect("revert event");
    assert_eq!(short_form.deployment_type, DeploymentType::WindowsPlayer);
    assert_eq!(short_form.version_hash, "version-old456");

    let long_form = history.events()[5].as_revert().expect("revert event");
    assert_eq!(long_form.deployment_type, DeploymentType::Studio64);
    assert_eq!(long_form.version_hash, "version-abc122");
    assert_eq!(long_form.timestamp, at(2020, 1, 4, 23, 59, 59));
}

/// The spec's single-line smoke test: one full-form release closed by a
/// status token yields exactly one event.
#[test]
fn single_batch_with_status_token() {
    let history = DeploymentHistory::parse(
        "New Studio64 version-abc at 1/1/2020 12:00:00 PM, \
         file version: 0, 1, 2, 3, git hash: deadbeef...Done!",
    );
    assert_eq!(history.len(), 1);
    let release = history.events()[0].as_release().expect("release event");
    assert_eq!(release.deployment_type, DeploymentType::Studio64);
    assert_eq!(release.version_hash, "version-abc");
    assert_eq!(release.version_number, Some(VersionNumber::new([0, 1, 2, 3])));
    assert_eq!(release.git_hash.as_deref(), Some("deadbeef"));
}

/// A garbled sub-event between two separators drops alone; the valid
/// sub-event on the same line survives in order.
#[test]
fn garbled_sub_event_drops_without_aborting_the_line() {
    let history = DeploymentHistory::parse(
        "New Studio version-ok at 1/1/2020 1:00:00 PM...New garbled nonsense...Done!",
    );
    assert_eq!(history.len(), 1);
    assert_eq!(history.events()[0].version_hash(), "version-ok");
    assert_eq!(history.dropped(), ["New garbled nonsense"]);
}

#[test]
fn latest_returns_the_chronologically_last_match() {
    let history = DeploymentHistory::parse(SAMPLE_LOG);
    let latest = history.latest(DeploymentType::Studio64).expect("present");
    // The revert at the end of the log is the latest Studio64 event.
    assert!(matches!(latest, DeploymentEvent::Revert(_)));
    assert_eq!(latest.version_hash(), "version-abc122");
}

#[test]
fn latest_is_none_for_absent_and_empty() {
    let history = DeploymentHistory::parse(SAMPLE_LOG);
    assert!(history.latest(DeploymentType::RccService).is_none());

    let empty = DeploymentHistory::parse("\n\n");
    assert!(empty.is_empty());
    assert!(empty.latest(DeploymentType::Studio64).is_none());
}
