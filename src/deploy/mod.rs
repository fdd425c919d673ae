//! Deployment log model and parser.
//!
//! The vendor publishes one append-only `DeployHistory.txt` per branch
//! and platform. [`DeploymentHistory::parse`] turns its raw text into an
//! ordered sequence of typed [`DeploymentEvent`]s that can be queried for
//! the latest release or revert of a given binary.

pub mod event;
pub mod history;

pub use event::{DeploymentEvent, DeploymentType, Release, Revert};
pub use history::DeploymentHistory;
