//! Typed model for deployment log events.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::version::VersionNumber;

/// The binary identity a log entry refers to.
///
/// The log names binaries with a fixed vocabulary; anything outside it
/// maps to [`DeploymentType::Unknown`] rather than failing, so new
/// binaries appearing in the log never break the parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentType {
    /// The server-side RCC service (`RccService`).
    RccService,
    /// The game client (`Client`).
    Client,
    /// The Windows player (`WindowsPlayer`).
    WindowsPlayer,
    /// 32-bit Studio (`Studio`).
    Studio,
    /// 64-bit Studio (`Studio64`).
    Studio64,
    /// The Studio beta channel build (`StudioBeta`).
    StudioBeta,
    /// The legacy MFC Studio (`MFCStudio`).
    MfcStudio,
    /// The combined legacy MFC player and studio
    /// (`windows-mfc-player-and-studio`).
    WindowsMfcPlayerAndStudio,
    /// A name outside the known vocabulary.
    Unknown,
}

impl DeploymentType {
    /// Map a log entry's binary name to its identity.
    #[must_use]
    pub fn from_log_name(name: &str) -> Self {
        match name {
            "RccService" => Self::RccService,
            "Client" => Self::Client,
            "WindowsPlayer" => Self::WindowsPlayer,
            "Studio" => Self::Studio,
            "Studio64" => Self::Studio64,
            "StudioBeta" => Self::StudioBeta,
            "MFCStudio" => Self::MfcStudio,
            "windows-mfc-player-and-studio" => Self::WindowsMfcPlayerAndStudio,
            _ => Self::Unknown,
        }
    }
}

/// A "new version went live" log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    /// Which binary was released.
    pub deployment_type: DeploymentType,
    /// The opaque build identifier, prefixed `version-`.
    pub version_hash: String,
    /// When the release was recorded. The log carries no time zone.
    pub timestamp: NaiveDateTime,
    /// The 4-component file version, when the entry carries one.
    pub version_number: Option<VersionNumber>,
    /// The source-control commit identifier, when the entry carries one.
    pub git_hash: Option<String>,
}

/// A rollback log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revert {
    /// Which binary was rolled back.
    pub deployment_type: DeploymentType,
    /// The build identifier rolled back to, prefixed `version-`.
    pub version_hash: String,
    /// When the revert was recorded.
    pub timestamp: NaiveDateTime,
}

/// One event in the deployment history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DeploymentEvent {
    /// A new version went live.
    Release(Release),
    /// A version was rolled back.
    Revert(Revert),
}

impl DeploymentEvent {
    /// The binary this event refers to.
    #[must_use]
    pub const fn deployment_type(&self) -> DeploymentType {
        match self {
            Self::Release(release) => release.deployment_type,
            Self::Revert(revert) => revert.deployment_type,
        }
    }

    /// The build identifier this event refers to.
    #[must_use]
    pub fn version_hash(&self) -> &str {
        match self {
            Self::Release(release) => &release.version_hash,
            Self::Revert(revert) => &revert.version_hash,
        }
    }

    /// When the event was recorded.
    #[must_use]
    pub const fn timestamp(&self) -> NaiveDateTime {
        match self {
            Self::Release(release) => release.timestamp,
            Self::Revert(revert) => revert.timestamp,
        }
    }

    /// The release entry, if this event is one.
    #[must_use]
    pub const fn as_release(&self) -> Option<&Release> {
        match self {
            Self::Release(release) => Some(release),
            Self::Revert(_) => None,
        }
    }

    /// The revert entry, if this event is one.
    #[must_use]
    pub const fn as_revert(&self) -> Option<&Revert> {
        match self {
            Self::Revert(revert) => Some(revert),
            Self::Release(_) => None,
        }
    }
}
