//! Roblox Studio client library.
//!
//! Typed access to the two text surfaces Studio exposes to tooling: the
//! `ClientAppSettings.json` flag override object and the per-branch
//! `DeployHistory.txt` release log. Both are consumed as plain text and
//! returned as plain text; fetching and storing the bytes is left to the
//! caller.
//!
//! The public API is organised into four layers:
//!
//! - **[`flags`]** — decode/encode raw override keys into typed [`flags::FlagDescriptor`]s
//! - **[`deploy`]** — parse the deployment log into an ordered [`deploy::DeploymentHistory`]
//! - **[`version`]** — the 4-component [`version::VersionNumber`] build counter
//! - **[`branch`]** — deployment channels and their well-known log locations
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod branch;
pub mod deploy;
pub mod error;
pub mod flags;
pub mod version;
