//! Typed model for flag override descriptors.
//!
//! A raw override key packs up to four pieces of information into one
//! string: a kind prefix (`F`/`SF`/`DF`), a value-kind infix
//! (`Flag`/`Int`/`String`/`Log`), the flag's root name, and an optional
//! filter suffix (`_PlaceFilter`/`_DataCenterFilter`). The types here hold
//! the unpacked form; [`super::codec`] does the packing and unpacking.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How a flag's override value is delivered to the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagKind {
    /// Fixed for the lifetime of the process; key prefix `F`.
    Static,
    /// Synchronized with the server at startup; key prefix `SF`.
    Synced,
    /// Updatable while the process runs; key prefix `DF`.
    Dynamic,
}

impl FlagKind {
    /// The raw key prefix for this kind.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Static => "F",
            Self::Synced => "SF",
            Self::Dynamic => "DF",
        }
    }
}

/// The value type a flag's key declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagValueKind {
    /// Boolean toggle; key infix `Flag`.
    Flag,
    /// Integer parameter; key infix `Int`.
    Int,
    /// Free-text parameter; key infix `String`.
    String,
    /// Integer log verbosity level; key infix `Log`.
    Log,
}

impl FlagValueKind {
    /// The raw key infix for this value kind.
    #[must_use]
    pub const fn infix(self) -> &'static str {
        match self {
            Self::Flag => "Flag",
            Self::Int => "Int",
            Self::String => "String",
            Self::Log => "Log",
        }
    }
}

/// The scoping axis of a flag filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    /// Scoped to specific place ids; key suffix `_PlaceFilter`.
    Place,
    /// Scoped to specific data centers; key suffix `_DataCenterFilter`.
    DataCenter,
}

impl FilterKind {
    /// The raw key suffix for this filter kind, without the leading
    /// underscore.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Place => "PlaceFilter",
            Self::DataCenter => "DataCenterFilter",
        }
    }
}

/// A scoping filter narrowing where an override value applies.
///
/// On the wire the ids ride along in the raw value, semicolon-joined
/// after the primary value (`"5;100;200"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagFilter {
    /// The scoping axis.
    pub kind: FilterKind,
    /// The ids the override is scoped to. Always non-empty: the codec
    /// rejects a filter suffix with no trailing ids as a format error.
    pub values: Vec<i64>,
}

/// A flag's primary override value.
///
/// This is the explicit tagged union behind a descriptor's `value` field;
/// [`FlagValue::coerce`] is the single constructor that selects the
/// variant from the recognized value kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    /// A boolean toggle value.
    Bool(bool),
    /// An integer parameter or log level.
    Int(i64),
    /// Free text, including any raw value that failed coercion.
    Text(String),
}

impl FlagValue {
    /// Coerce a raw primary value according to the recognized value kind.
    ///
    /// Boolean tokens become [`FlagValue::Bool`], numeric text becomes
    /// [`FlagValue::Int`], and anything else — including every value of an
    /// unrecognized kind — passes through untouched as [`FlagValue::Text`].
    /// Coercion never fails; a value that does not match its declared kind
    /// simply stays text.
    #[must_use]
    pub fn coerce(raw: &str, value_kind: Option<FlagValueKind>) -> Self {
        match value_kind {
            Some(FlagValueKind::Flag) => {
                if raw.eq_ignore_ascii_case("true") {
                    Self::Bool(true)
                } else if raw.eq_ignore_ascii_case("false") {
                    Self::Bool(false)
                } else {
                    Self::Text(raw.to_string())
                }
            }
            Some(FlagValueKind::Int | FlagValueKind::Log) => raw
                .trim()
                .parse()
                .map_or_else(|_| Self::Text(raw.to_string()), Self::Int),
            Some(FlagValueKind::String) | None => Self::Text(raw.to_string()),
        }
    }
}

impl fmt::Display for FlagValue {
    /// Render the value in its raw textual form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Text(value) => write!(f, "{value}"),
        }
    }
}

/// One decoded flag override.
///
/// `kind` and `value_kind` are `None` when the raw key did not carry a
/// recognized prefix or infix. The descriptor still holds the untouched
/// root name and raw value as text in that case, so no information is
/// lost even when classification fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagDescriptor {
    /// The recognized kind prefix, if any.
    pub kind: Option<FlagKind>,
    /// The recognized value-kind infix, if any.
    pub value_kind: Option<FlagValueKind>,
    /// The root name with recognized prefix, infix, and suffix stripped.
    pub name: String,
    /// The primary override value.
    pub value: FlagValue,
    /// The scoping filter, if the key carried a filter suffix.
    pub filter: Option<FlagFilter>,
}
