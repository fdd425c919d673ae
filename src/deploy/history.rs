//! Deployment history log parsing.
//!
//! `DeployHistory.txt` is an append-only free-text log. Each line is a
//! chronological batch of sub-events separated by a literal `...`, closed
//! by a `Done!` or `Error!` status token. The parser is total: it returns
//! every sub-event it can classify, in source order, and drops the rest.
//!
//! Structural matching is an ordered chain of parse attempts returning
//! present/absent results — every sub-event is single-line and
//! unambiguous once a pattern is chosen, so no state machine is needed.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::event::{DeploymentEvent, DeploymentType, Release, Revert};
use crate::version::VersionNumber;

/// Literal separator between sub-events within one line.
const EVENT_SEPARATOR: &str = "...";

/// Status tokens closing a batch; they carry no event of their own.
const STATUS_TOKENS: [&str; 2] = ["Done!", "Error!"];

/// Every build identifier in the log starts with this prefix.
const VERSION_HASH_PREFIX: &str = "version-";

/// File-version markers, including the historical misspelling that one
/// stretch of the production log carries.
const FILE_VERSION_MARKERS: [&str; 2] = [", file version:", ", file verion:"];

/// Marker introducing the git hash in the full release form.
const GIT_HASH_MARKER: &str = ", git hash:";

/// Timestamp formats, 12-hour form first (the log's usual shape), then
/// the 24-hour form some older entries use.
const TIMESTAMP_FORMATS: [&str; 2] = ["%m/%d/%Y %I:%M:%S %p", "%m/%d/%Y %H:%M:%S"];

/// An ordered sequence of deployment events parsed from one log.
///
/// Events appear in source order (chronological); nothing is deduplicated
/// or resorted. Sub-events that matched a class keyword but no structural
/// pattern are preserved verbatim in [`DeploymentHistory::dropped`] so
/// callers can opt into stricter observability.
///
/// # Examples
///
/// ```
/// use rbx_studio::deploy::{DeploymentHistory, DeploymentType};
///
/// let history = DeploymentHistory::parse(
///     "New Studio64 version-abc at 1/1/2020 12:00:00 PM, \
///      file version: 0, 1, 2, 3, git hash: deadbeef...Done!",
/// );
/// let latest = history.latest(DeploymentType::Studio64).unwrap();
/// assert_eq!(latest.version_hash(), "version-abc");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentHistory {
    events: Vec<DeploymentEvent>,
    dropped: Vec<String>,
}

/// What one trimmed sub-event turned out to be.
enum Classified {
    /// A parsed release or revert.
    Event(DeploymentEvent),
    /// Matched a class keyword but no structural pattern in that class.
    Dropped,
    /// Neither a release nor a revert; not worth recording.
    Noise,
}

impl DeploymentHistory {
    /// Parse a raw deployment log.
    ///
    /// The parse never fails: unparseable sub-events are dropped (and
    /// recorded when their keyword matched), and everything that did
    /// match is returned in original order.
    #[must_use]
    pub fn parse(raw_text: &str) -> Self {
        let mut events = Vec::new();
        let mut dropped = Vec::new();

        for line in raw_text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            for sub_event in line.split(EVENT_SEPARATOR) {
                let sub_event = sub_event.trim();
                if sub_event.is_empty() || STATUS_TOKENS.contains(&sub_event) {
                    continue;
                }
                match classify(sub_event) {
                    Classified::Event(event) => events.push(event),
                    Classified::Dropped => {
                        tracing::debug!("Dropping unparseable history entry: {sub_event}");
                        dropped.push(sub_event.to_string());
                    }
                    Classified::Noise => {}
                }
            }
        }

        Self { events, dropped }
    }

    /// The events in source order.
    #[must_use]
    pub fn events(&self) -> &[DeploymentEvent] {
        &self.events
    }

    /// Sub-events that matched a class keyword but failed every
    /// structural pattern, verbatim and in source order.
    #[must_use]
    pub fn dropped(&self) -> &[String] {
        &self.dropped
    }

    /// The most recent event for the given binary, or `None` if the
    /// history is empty or never mentions it.
    #[must_use]
    pub fn latest(&self, deployment_type: DeploymentType) -> Option<&DeploymentEvent> {
        self.events
            .iter()
            .rev()
            .find(|event| event.deployment_type() == deployment_type)
    }

    /// Number of parsed events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the history holds no events.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Classify one trimmed sub-event by its leading keyword.
fn classify(sub_event: &str) -> Classified {
    if sub_event.starts_with("New") {
        parse_release(sub_event).map_or(Classified::Dropped, |release| {
            Classified::Event(DeploymentEvent::Release(release))
        })
    } else if sub_event.starts_with("Revert") {
        parse_revert(sub_event).map_or(Classified::Dropped, |revert| {
            Classified::Event(DeploymentEvent::Revert(revert))
        })
    } else {
        Classified::Noise
    }
}

/// Parse a release sub-event.
///
/// Structural forms, in fixed priority order:
///
/// 1. `New <Name> <version-Hash> at <Date> <Time>, file version: <csv>, git hash: <Hash>`
/// 2. `New <Name> <version-Hash> at <Date> <Time>, file version: <csv>`
/// 3. `New <Name> <version-Hash> at <Date> <Time> <trailing text>`
///
/// The first structural match wins; a form whose payload fails to parse
/// falls through to the next.
fn parse_release(sub_event: &str) -> Option<Release> {
    let rest = sub_event.strip_prefix("New ")?;
    let (name, rest) = next_token(rest)?;
    let (version_hash, rest) = next_token(rest)?;
    if !version_hash.starts_with(VERSION_HASH_PREFIX) {
        return None;
    }
    let rest = rest.strip_prefix("at ")?;

    let deployment_type = DeploymentType::from_log_name(name);
    let version_hash = version_hash.to_string();

    if let Some((timestamp_text, tail)) = split_file_version(rest) {
        if let Some(timestamp) = parse_timestamp(timestamp_text.trim()) {
            let (csv, git_hash) = tail
                .split_once(GIT_HASH_MARKER)
                .map_or((tail, None), |(csv, git)| (csv, first_token(git)));
            if let Ok(version_number) = csv.trim().parse::<VersionNumber>() {
                return Some(Release {
                    deployment_type,
                    version_hash,
                    timestamp,
                    version_number: Some(version_number),
                    git_hash,
                });
            }
        }
    }

    // Fallback: timestamp directly after "at", trailing text ignored.
    let timestamp = leading_timestamp(rest)?;
    Some(Release {
        deployment_type,
        version_hash,
        timestamp,
        version_number: None,
        git_hash: None,
    })
}

/// Parse a revert sub-event.
///
/// Two accepted shapes:
///
/// 1. `Reverting <Name> to version <version-Hash> at <Date> <Time> <trailing text>`
/// 2. `Revert <Name> <version-Hash> at <Date> <Time> <trailing text>`
fn parse_revert(sub_event: &str) -> Option<Revert> {
    let (name, rest) = if let Some(rest) = sub_event.strip_prefix("Reverting ") {
        let (name, rest) = next_token(rest)?;
        (name, rest.strip_prefix("to version ")?)
    } else {
        let rest = sub_event.strip_prefix("Revert ")?;
        next_token(rest)?
    };

    let (version_hash, rest) = next_token(rest)?;
    if !version_hash.starts_with(VERSION_HASH_PREFIX) {
        return None;
    }
    let rest = rest.strip_prefix("at ")?;
    let timestamp = leading_timestamp(rest)?;

    Some(Revert {
        deployment_type: DeploymentType::from_log_name(name),
        version_hash: version_hash.to_string(),
        timestamp,
    })
}

/// Split off the text before a file-version marker and the payload after
/// it, accepting the misspelled marker as well.
fn split_file_version(rest: &str) -> Option<(&str, &str)> {
    FILE_VERSION_MARKERS
        .iter()
        .find_map(|marker| rest.split_once(marker))
}

/// Split off the first space-delimited token.
fn next_token(text: &str) -> Option<(&str, &str)> {
    let (token, rest) = text.split_once(' ')?;
    (!token.is_empty()).then_some((token, rest))
}

/// The first whitespace-delimited token, owned; `None` if there is none.
fn first_token(text: &str) -> Option<String> {
    text.split_whitespace().next().map(ToString::to_string)
}

/// Parse a timestamp from the front of free text, ignoring whatever
/// trails it.
fn leading_timestamp(text: &str) -> Option<NaiveDateTime> {
    let mut tokens = text.split_whitespace();
    let date = tokens.next()?;
    let time = tokens.next()?;

    // 12-hour entries carry an AM/PM token; punctuation may trail it when
    // the entry continues ("... PM, <more>").
    if let Some(meridiem) = tokens.next() {
        let candidate = format!("{date} {time} {}", meridiem.trim_end_matches(','));
        if let Some(timestamp) = parse_timestamp(&candidate) {
            return Some(timestamp);
        }
    }
    parse_timestamp(&format!("{date} {time}"))
}

/// Parse an exact timestamp string against the known log formats.
fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
}
