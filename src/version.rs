//! Deployment version numbers.
//!
//! The deployment log records each build's version as 4 comma-separated
//! non-negative integers (e.g. `0, 488, 0, 427188`). Beyond total ordering
//! the components carry no semantics; two builds compare the way their
//! component tuples compare.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VersionError;

/// A deployment's 4-component build version number.
///
/// Equality is component-wise; ordering is lexicographic across the
/// components in order. No partial state exists — construction either
/// yields all 4 components or fails.
///
/// # Examples
///
/// ```
/// use rbx_studio::version::VersionNumber;
///
/// let older = VersionNumber::new([0, 488, 0, 427188]);
/// let newer: VersionNumber = "0, 493, 1, 4930375".parse().unwrap();
/// assert!(older < newer);
/// assert_eq!(newer.to_string(), "0, 493, 1, 4930375");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct VersionNumber([u64; 4]);

impl VersionNumber {
    /// Create a version number from its 4 components.
    #[must_use]
    pub const fn new(components: [u64; 4]) -> Self {
        Self(components)
    }

    /// The 4 components in order.
    #[must_use]
    pub const fn components(&self) -> [u64; 4] {
        self.0
    }
}

impl FromStr for VersionNumber {
    type Err = VersionError;

    /// Parse the log's comma-separated form, tolerating whitespace around
    /// each component.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let pieces: Vec<&str> = s.split(',').map(str::trim).collect();
        if pieces.len() != 4 {
            return Err(VersionError::WrongArity(pieces.len()));
        }

        let mut components = [0_u64; 4];
        for (slot, piece) in components.iter_mut().zip(&pieces) {
            *slot = piece
                .parse()
                .map_err(|_| VersionError::InvalidComponent((*piece).to_string()))?;
        }
        Ok(Self(components))
    }
}

impl fmt::Display for VersionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [generation, major, minor, build] = self.0;
        write!(f, "{generation}, {major}, {minor}, {build}")
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn equal_components_compare_equal() {
        assert_eq!(
            VersionNumber::new([0, 1, 0, 0]),
            VersionNumber::new([0, 1, 0, 0])
        );
    }

    #[test]
    fn ordering_is_lexicographic() {
        assert!(VersionNumber::new([0, 1, 0, 0]) < VersionNumber::new([0, 1, 0, 1]));
        assert!(VersionNumber::new([0, 2, 0, 0]) > VersionNumber::new([0, 1, 9, 9]));
        assert!(VersionNumber::new([1, 0, 0, 0]) > VersionNumber::new([0, 9, 9, 9]));
    }

    #[test]
    fn later_components_do_not_outweigh_earlier_ones() {
        // The 4th component is a raw build counter and can be numerically
        // huge without making the version "newer".
        assert!(VersionNumber::new([0, 488, 0, 427188]) < VersionNumber::new([0, 493, 1, 0]));
    }

    #[test]
    fn parse_spaced_csv() {
        let version: VersionNumber = "0, 488, 0, 427188".parse().expect("valid csv");
        assert_eq!(version.components(), [0, 488, 0, 427188]);
    }

    #[test]
    fn parse_unspaced_csv() {
        let version: VersionNumber = "0,1,2,3".parse().expect("valid csv");
        assert_eq!(version.components(), [0, 1, 2, 3]);
    }

    #[test]
    fn parse_wrong_arity_fails() {
        assert!("0, 1, 2".parse::<VersionNumber>().is_err());
        assert!("0, 1, 2, 3, 4".parse::<VersionNumber>().is_err());
        assert!("".parse::<VersionNumber>().is_err());
    }

    #[test]
    fn parse_non_integer_component_fails() {
        assert!("0, 1, x, 3".parse::<VersionNumber>().is_err());
        assert!("0, 1, -2, 3".parse::<VersionNumber>().is_err());
    }

    #[test]
    fn display_round_trips() {
        let version = VersionNumber::new([0, 493, 1, 4930375]);
        let reparsed: VersionNumber = version.to_string().parse().unwrap();
        assert_eq!(version, reparsed);
    }
}
