//! Flag override model and codec.
//!
//! Studio reads flag overrides from a JSON object mapping raw key strings
//! to raw values. [`codec`] translates individual entries to and from
//! typed [`FlagDescriptor`]s; [`FlagCollection`] applies the codec to a
//! whole override object while preserving entry order.

pub mod codec;
pub mod model;

pub use model::{FilterKind, FlagDescriptor, FlagFilter, FlagKind, FlagValue, FlagValueKind};

use serde::{Deserialize, Serialize};

use crate::error::FlagError;

/// An ordered collection of flag descriptors.
///
/// Order is the override file's entry order and is preserved through
/// decode and encode. The collection itself is a plain value: callers may
/// rebuild `flags` with modified descriptors before re-encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagCollection {
    /// The descriptors, in override-file order.
    pub flags: Vec<FlagDescriptor>,
}

impl FlagCollection {
    /// Decode a sequence of raw key/value pairs, preserving input order.
    ///
    /// Entries that fail to decode (a filter suffix with a malformed value
    /// list) are skipped with a warning; decode ambiguity never drops an
    /// entry.
    #[must_use]
    pub fn decode_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut flags = Vec::new();
        for (key, value) in entries {
            match codec::decode(key, value) {
                Ok(descriptor) => flags.push(descriptor),
                Err(err) => tracing::warn!("Skipping malformed override entry: {err}"),
            }
        }
        Self { flags }
    }

    /// Encode every descriptor back into ordered raw key/value pairs.
    ///
    /// If two descriptors encode to the same raw key the last write wins;
    /// the collision is reported with a warning, never an error.
    #[must_use]
    pub fn encode_entries(&self) -> Vec<(String, String)> {
        let mut entries: Vec<(String, String)> = Vec::with_capacity(self.flags.len());
        for flag in &self.flags {
            let (key, value) = codec::encode(flag);
            if let Some(existing) = entries.iter_mut().find(|(seen, _)| *seen == key) {
                tracing::warn!("Duplicate flag key '{key}' while encoding; last write wins");
                existing.1 = value;
            } else {
                entries.push((key, value));
            }
        }
        entries
    }

    /// Decode an override file's JSON object.
    ///
    /// Entry order is preserved. Scalar values are taken in their textual
    /// JSON form (booleans as `true`/`false`, numbers as written, strings
    /// as-is); entries holding arrays, objects, or `null` are skipped with
    /// a warning, as are entries with a malformed filter value list.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbx_studio::flags::{FlagCollection, FlagValue};
    ///
    /// let overrides =
    ///     FlagCollection::from_json_str(r#"{"FFlagDebugDisplayFPS": true}"#).unwrap();
    /// assert_eq!(overrides.flags[0].value, FlagValue::Bool(true));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid JSON or the root is not
    /// an object. Individual entries never fail the whole collection.
    pub fn from_json_str(data: &str) -> Result<Self, FlagError> {
        let root: serde_json::Value = serde_json::from_str(data)?;
        let Some(object) = root.as_object() else {
            return Err(FlagError::NotAnObject);
        };

        let mut flags = Vec::new();
        for (key, value) in object {
            let Some(text) = scalar_to_string(value) else {
                tracing::warn!("Skipping override entry '{key}': non-scalar JSON value");
                continue;
            };
            match codec::decode(key, &text) {
                Ok(descriptor) => flags.push(descriptor),
                Err(err) => tracing::warn!("Skipping malformed override entry: {err}"),
            }
        }
        Ok(Self { flags })
    }

    /// Encode the collection as an override file JSON object.
    ///
    /// Typed values become native JSON scalars (bool, number, string);
    /// filtered flags always encode as their semicolon-joined string form.
    /// Key collisions follow the same last-write-wins policy as
    /// [`FlagCollection::encode_entries`].
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        let mut object = serde_json::Map::new();
        for flag in &self.flags {
            let (key, rendered) = codec::encode(flag);
            let value = if flag.filter.is_some() {
                serde_json::Value::String(rendered)
            } else {
                match &flag.value {
                    FlagValue::Bool(value) => serde_json::Value::Bool(*value),
                    FlagValue::Int(value) => serde_json::Value::Number((*value).into()),
                    FlagValue::Text(value) => serde_json::Value::String(value.clone()),
                }
            };
            if object.contains_key(&key) {
                tracing::warn!("Duplicate flag key '{key}' while encoding; last write wins");
            }
            object.insert(key, value);
        }
        serde_json::Value::Object(object)
    }

    /// Encode the collection as override file JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_string(&self) -> Result<String, FlagError> {
        Ok(serde_json::to_string(&self.to_json_value())?)
    }

    /// Number of descriptors in the collection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Whether the collection holds no descriptors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

/// Render a scalar JSON value in its textual form; `None` for arrays,
/// objects, and `null`.
fn scalar_to_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Bool(b) => Some(b.to_string()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn decode_entries_preserves_order() {
        let collection = FlagCollection::decode_entries([
            ("FFlagB", "true"),
            ("FFlagA", "false"),
            ("DFIntC", "3"),
        ]);
        let names: Vec<&str> = collection.flags.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["B", "A", "C"]);
    }

    #[test]
    fn decode_entries_skips_only_the_bad_entry() {
        let collection = FlagCollection::decode_entries([
            ("FFlagGood", "true"),
            ("DFIntBad_PlaceFilter", "5"),
            ("FFlagAlsoGood", "false"),
        ]);
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.flags[0].name, "Good");
        assert_eq!(collection.flags[1].name, "AlsoGood");
    }

    #[test]
    fn encode_entries_last_write_wins() {
        let first = codec::decode("FFlagSame", "true").unwrap();
        let second = codec::decode("FFlagSame", "false").unwrap();
        let collection = FlagCollection {
            flags: vec![first, second],
        };

        let entries = collection.encode_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0], ("FFlagSame".to_string(), "false".to_string()));
    }

    #[test]
    fn from_json_preserves_object_order() {
        let collection = FlagCollection::from_json_str(
            r#"{"FFlagZebra": true, "FFlagApple": false, "DFIntMango": 7}"#,
        )
        .expect("valid object");
        let names: Vec<&str> = collection.flags.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["Zebra", "Apple", "Mango"]);
    }

    #[test]
    fn from_json_stringifies_scalars() {
        let collection = FlagCollection::from_json_str(
            r#"{"FFlagA": true, "DFIntB": 42, "DFIntC": "43", "SFStringD": "x"}"#,
        )
        .unwrap();
        assert_eq!(collection.flags[0].value, FlagValue::Bool(true));
        assert_eq!(collection.flags[1].value, FlagValue::Int(42));
        assert_eq!(collection.flags[2].value, FlagValue::Int(43));
        assert_eq!(collection.flags[3].value, FlagValue::Text("x".to_string()));
    }

    #[test]
    fn from_json_skips_non_scalar_entries() {
        let collection =
            FlagCollection::from_json_str(r#"{"FFlagA": [1, 2], "FFlagB": true, "FFlagC": null}"#)
                .unwrap();
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.flags[0].name, "B");
    }

    #[test]
    fn from_json_rejects_non_object_root() {
        assert!(matches!(
            FlagCollection::from_json_str("[1, 2, 3]"),
            Err(FlagError::NotAnObject)
        ));
        assert!(FlagCollection::from_json_str("not json at all").is_err());
    }

    #[test]
    fn to_json_uses_native_scalars() {
        let collection = FlagCollection::decode_entries([
            ("FFlagA", "true"),
            ("DFIntB", "42"),
            ("SFStringC", "hello"),
        ]);
        let json = collection.to_json_value();
        assert_eq!(json["FFlagA"], serde_json::Value::Bool(true));
        assert_eq!(json["DFIntB"], serde_json::json!(42));
        assert_eq!(json["SFStringC"], serde_json::json!("hello"));
    }

    #[test]
    fn to_json_keeps_filtered_flags_as_strings() {
        let collection = FlagCollection::decode_entries([("DFIntCap_PlaceFilter", "60;123456")]);
        let json = collection.to_json_value();
        assert_eq!(json["DFIntCap_PlaceFilter"], serde_json::json!("60;123456"));
    }

    #[test]
    fn json_round_trip() {
        let source = r#"{"FFlagA":true,"DFIntB":42,"DFIntCap_PlaceFilter":"60;123456"}"#;
        let collection = FlagCollection::from_json_str(source).unwrap();
        assert_eq!(collection.to_json_string().unwrap(), source);
    }

    #[test]
    fn empty_collection() {
        let collection = FlagCollection::from_json_str("{}").unwrap();
        assert!(collection.is_empty());
        assert_eq!(collection.len(), 0);
        assert_eq!(collection.to_json_string().unwrap(), "{}");
    }
}
