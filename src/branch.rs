//! Deployment branches and their well-known log locations.
//!
//! Each named deployment channel publishes its setup artifacts under a
//! fixed base URL, with the deployment log at a per-platform well-known
//! path. Only the path construction lives here; fetching the resource is
//! the caller's concern.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BranchError;

/// File name of the deployment log at each branch root.
const DEPLOY_HISTORY_FILE: &str = "DeployHistory.txt";

/// A named deployment channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Branch {
    /// The live production channel.
    Production,
    /// Site test channel 1.
    Sitetest1,
    /// Site test channel 2.
    Sitetest2,
    /// Site test channel 3.
    Sitetest3,
    /// Game test channel 1.
    Gametest1,
    /// Game test channel 2.
    Gametest2,
}

/// The platform axis of the deployment logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
    /// Windows builds, published at the branch root.
    Windows,
    /// macOS builds, published under the `mac/` segment.
    Mac,
}

impl Branch {
    /// Base URL of the branch's setup CDN.
    #[must_use]
    pub const fn base_url(self) -> &'static str {
        match self {
            Self::Production => "https://setup.rbxcdn.com/",
            Self::Sitetest1 => "http://setup.sitetest1.robloxlabs.com.s3.amazonaws.com/",
            Self::Sitetest2 => "http://setup.sitetest2.robloxlabs.com.s3.amazonaws.com/",
            Self::Sitetest3 => "http://setup.sitetest3.robloxlabs.com.s3.amazonaws.com/",
            Self::Gametest1 => "http://setup.gametest1.robloxlabs.com.s3.amazonaws.com/",
            Self::Gametest2 => "http://setup.gametest2.robloxlabs.com.s3.amazonaws.com/",
        }
    }

    /// Well-known URL of this branch's deployment log for a platform.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbx_studio::branch::{Branch, Os};
    ///
    /// assert_eq!(
    ///     Branch::Production.deploy_history_url(Os::Windows),
    ///     "https://setup.rbxcdn.com/DeployHistory.txt"
    /// );
    /// ```
    #[must_use]
    pub fn deploy_history_url(self, os: Os) -> String {
        match os {
            Os::Windows => format!("{}{DEPLOY_HISTORY_FILE}", self.base_url()),
            Os::Mac => format!("{}mac/{DEPLOY_HISTORY_FILE}", self.base_url()),
        }
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Production => "production",
            Self::Sitetest1 => "sitetest1",
            Self::Sitetest2 => "sitetest2",
            Self::Sitetest3 => "sitetest3",
            Self::Gametest1 => "gametest1",
            Self::Gametest2 => "gametest2",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Branch {
    type Err = BranchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "production" => Ok(Self::Production),
            "sitetest1" => Ok(Self::Sitetest1),
            "sitetest2" => Ok(Self::Sitetest2),
            "sitetest3" => Ok(Self::Sitetest3),
            "gametest1" => Ok(Self::Gametest1),
            "gametest2" => Ok(Self::Gametest2),
            other => Err(BranchError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Windows => write!(f, "windows"),
            Self::Mac => write!(f, "mac"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn production_deploy_history_urls() {
        assert_eq!(
            Branch::Production.deploy_history_url(Os::Windows),
            "https://setup.rbxcdn.com/DeployHistory.txt"
        );
        assert_eq!(
            Branch::Production.deploy_history_url(Os::Mac),
            "https://setup.rbxcdn.com/mac/DeployHistory.txt"
        );
    }

    #[test]
    fn test_branch_deploy_history_url() {
        assert_eq!(
            Branch::Sitetest2.deploy_history_url(Os::Windows),
            "http://setup.sitetest2.robloxlabs.com.s3.amazonaws.com/DeployHistory.txt"
        );
    }

    #[test]
    fn branch_display_round_trips_through_from_str() {
        for branch in [
            Branch::Production,
            Branch::Sitetest1,
            Branch::Sitetest2,
            Branch::Sitetest3,
            Branch::Gametest1,
            Branch::Gametest2,
        ] {
            let reparsed: Branch = branch.to_string().parse().expect("known name");
            assert_eq!(reparsed, branch);
        }
    }

    #[test]
    fn unknown_branch_name_fails() {
        assert!("prod".parse::<Branch>().is_err());
        assert!("".parse::<Branch>().is_err());
    }

    #[test]
    fn os_display() {
        assert_eq!(Os::Windows.to_string(), "windows");
        assert_eq!(Os::Mac.to_string(), "mac");
    }
}
