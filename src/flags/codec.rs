//! Bidirectional codec between raw override key/value pairs and
//! [`FlagDescriptor`]s.
//!
//! Decoding degrades gracefully: a key with no recognized prefix or infix
//! still yields a descriptor carrying the full key as its name and the raw
//! value as text. The only format error is a recognized filter suffix
//! whose value carries no parseable filter ids.

use crate::error::FlagError;

use super::model::{FilterKind, FlagDescriptor, FlagFilter, FlagKind, FlagValue, FlagValueKind};

/// Kind prefixes in scan priority order.
///
/// The order is fixed and explicit, but since no prefix is a proper prefix
/// of another it cannot affect which one matches.
const KIND_PREFIXES: [(&str, FlagKind); 3] = [
    ("F", FlagKind::Static),
    ("SF", FlagKind::Synced),
    ("DF", FlagKind::Dynamic),
];

/// Value-kind infixes in scan priority order.
const VALUE_KIND_INFIXES: [(&str, FlagValueKind); 4] = [
    ("Flag", FlagValueKind::Flag),
    ("Int", FlagValueKind::Int),
    ("String", FlagValueKind::String),
    ("Log", FlagValueKind::Log),
];

/// Filter suffixes, each preceded by an underscore in the raw key.
const FILTER_SUFFIXES: [(&str, FilterKind); 2] = [
    ("PlaceFilter", FilterKind::Place),
    ("DataCenterFilter", FilterKind::DataCenter),
];

/// Decode one raw override entry into a typed descriptor.
///
/// The key is scanned front to back: kind prefix, then value-kind infix,
/// then a trailing filter suffix on the remaining root name. Each scan is
/// independent — a miss leaves the corresponding field `None` and the
/// unconsumed text in the name. When a filter suffix is present the raw
/// value is split on `;`: the first segment is the primary value, the rest
/// are the filter ids.
///
/// # Examples
///
/// ```
/// use rbx_studio::flags::codec;
/// use rbx_studio::flags::{FlagKind, FlagValue, FlagValueKind};
///
/// let flag = codec::decode("FFlagDebugDisplayFPS", "true").unwrap();
/// assert_eq!(flag.kind, Some(FlagKind::Static));
/// assert_eq!(flag.value_kind, Some(FlagValueKind::Flag));
/// assert_eq!(flag.name, "DebugDisplayFPS");
/// assert_eq!(flag.value, FlagValue::Bool(true));
/// assert!(flag.filter.is_none());
/// ```
///
/// # Errors
///
/// Returns an error only if the key carries a recognized filter suffix and
/// the value has no filter segments, or a segment is not an integer.
pub fn decode(raw_key: &str, raw_value: &str) -> Result<FlagDescriptor, FlagError> {
    let (kind, rest) = match_kind_prefix(raw_key);
    let (value_kind, rest) = match_value_kind_infix(rest);
    let (name, filter_kind) = match_filter_suffix(rest);

    let (primary, filter) = match filter_kind {
        Some(filter_kind) => {
            let (primary, values) = split_filter_values(raw_key, raw_value)?;
            (
                primary,
                Some(FlagFilter {
                    kind: filter_kind,
                    values,
                }),
            )
        }
        None => (raw_value.to_string(), None),
    };

    Ok(FlagDescriptor {
        kind,
        value_kind,
        name: name.to_string(),
        value: FlagValue::coerce(&primary, value_kind),
        filter,
    })
}

/// Encode a descriptor back into its raw key/value pair.
///
/// Reconstructs the key as prefix + infix + name + `_` + suffix, omitting
/// whichever parts the descriptor does not carry, and renders the value
/// with any filter ids semicolon-joined after the primary value.
///
/// # Examples
///
/// ```
/// use rbx_studio::flags::codec;
///
/// let flag = codec::decode("DFIntTestFlag_PlaceFilter", "5;100;200").unwrap();
/// let (key, value) = codec::encode(&flag);
/// assert_eq!(key, "DFIntTestFlag_PlaceFilter");
/// assert_eq!(value, "5;100;200");
/// ```
#[must_use]
pub fn encode(descriptor: &FlagDescriptor) -> (String, String) {
    let mut key = String::new();
    if let Some(kind) = descriptor.kind {
        key.push_str(kind.prefix());
    }
    if let Some(value_kind) = descriptor.value_kind {
        key.push_str(value_kind.infix());
    }
    key.push_str(&descriptor.name);

    let mut value = descriptor.value.to_string();
    if let Some(filter) = &descriptor.filter {
        key.push('_');
        key.push_str(filter.kind.suffix());
        for id in &filter.values {
            value.push(';');
            value.push_str(&id.to_string());
        }
    }

    (key, value)
}

/// Match a kind prefix at the start of the key.
fn match_kind_prefix(key: &str) -> (Option<FlagKind>, &str) {
    for (prefix, kind) in KIND_PREFIXES {
        if let Some(rest) = key.strip_prefix(prefix) {
            return (Some(kind), rest);
        }
    }
    (None, key)
}

/// Match a value-kind infix after any consumed prefix.
fn match_value_kind_infix(rest: &str) -> (Option<FlagValueKind>, &str) {
    for (infix, value_kind) in VALUE_KIND_INFIXES {
        if let Some(rest) = rest.strip_prefix(infix) {
            return (Some(value_kind), rest);
        }
    }
    (None, rest)
}

/// Match and strip a trailing `_PlaceFilter` / `_DataCenterFilter`.
fn match_filter_suffix(rest: &str) -> (&str, Option<FilterKind>) {
    for (suffix, filter_kind) in FILTER_SUFFIXES {
        let stripped = rest
            .strip_suffix(suffix)
            .and_then(|root| root.strip_suffix('_'));
        if let Some(root) = stripped {
            return (root, Some(filter_kind));
        }
    }
    (rest, None)
}

/// Split a filtered raw value into the primary segment and its filter ids.
fn split_filter_values(raw_key: &str, raw_value: &str) -> Result<(String, Vec<i64>), FlagError> {
    let mut segments = raw_value.split(';');
    let primary = segments.next().unwrap_or_default().to_string();

    let mut values = Vec::new();
    for segment in segments {
        let trimmed = segment.trim();
        let id = trimmed.parse().map_err(|_| FlagError::InvalidFilterValue {
            key: raw_key.to_string(),
            value: trimmed.to_string(),
        })?;
        values.push(id);
    }

    if values.is_empty() {
        return Err(FlagError::EmptyFilter {
            key: raw_key.to_string(),
        });
    }
    Ok((primary, values))
}
