//! Typed Firestore field values.
//!
//! The REST API wraps every field in a single-key object naming its type
//! (`{"stringValue": "Red"}`, `{"integerValue": "5000"}`, ...). The
//! externally-tagged enum below matches that wire shape directly, and the
//! accessors perform the lenient coercions the decode boundary needs.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::Deserialize;

/// One Firestore field value.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FirestoreValue {
    StringValue(String),
    /// Integers arrive as decimal strings to survive 64-bit precision.
    IntegerValue(String),
    DoubleValue(f64),
    BooleanValue(bool),
    TimestampValue(DateTime<Utc>),
    NullValue(Option<serde_json::Value>),
    ArrayValue {
        #[serde(default)]
        values: Vec<FirestoreValue>,
    },
    MapValue {
        #[serde(default)]
        fields: BTreeMap<String, FirestoreValue>,
    },
    // The remaining wire kinds are carried opaquely; the catalog never
    // reads them.
    ReferenceValue(String),
    GeoPointValue(serde_json::Value),
    BytesValue(String),
}

impl FirestoreValue {
    /// The string content, when this is a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::StringValue(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric content as a decimal: integer strings parse exactly,
    /// doubles convert, numeric strings are tolerated.
    #[must_use]
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::IntegerValue(raw) | Self::StringValue(raw) => raw.trim().parse().ok(),
            Self::DoubleValue(f) => Decimal::from_f64(*f),
            _ => None,
        }
    }

    /// Numeric content as an `f64` (ratings).
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::DoubleValue(f) => Some(*f),
            Self::IntegerValue(raw) | Self::StringValue(raw) => raw.trim().parse().ok(),
            _ => None,
        }
    }

    /// Numeric content as a `u32` (counts, stock). Negative and fractional
    /// values are rejected.
    #[must_use]
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Self::IntegerValue(raw) | Self::StringValue(raw) => raw.trim().parse().ok(),
            Self::DoubleValue(f) if f.fract() == 0.0 && *f >= 0.0 => {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let v = *f as u32;
                Some(v)
            }
            _ => None,
        }
    }

    /// Timestamp content.
    #[must_use]
    pub const fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::TimestampValue(ts) => Some(*ts),
            _ => None,
        }
    }

    /// The string elements of an array value, skipping non-strings.
    #[must_use]
    pub fn as_string_array(&self) -> Vec<String> {
        match self {
            Self::ArrayValue { values } => values
                .iter()
                .filter_map(|v| v.as_str().map(str::to_owned))
                .collect(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> FirestoreValue {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn test_decodes_wire_shapes() {
        assert_eq!(parse(r#"{"stringValue":"Red"}"#).as_str(), Some("Red"));
        assert_eq!(
            parse(r#"{"integerValue":"5000"}"#).as_decimal(),
            Some(Decimal::from(5000))
        );
        assert_eq!(parse(r#"{"doubleValue":4.5}"#).as_f64(), Some(4.5));
        assert!(parse(r#"{"timestampValue":"2024-01-01T00:00:00Z"}"#)
            .as_timestamp()
            .is_some());
    }

    #[test]
    fn test_array_of_strings() {
        let value = parse(r#"{"arrayValue":{"values":[{"stringValue":"silk"},{"integerValue":"1"},{"stringValue":"saree"}]}}"#);
        assert_eq!(value.as_string_array(), vec!["silk", "saree"]);
    }

    #[test]
    fn test_empty_array_value() {
        let value = parse(r#"{"arrayValue":{}}"#);
        assert!(value.as_string_array().is_empty());
    }

    #[test]
    fn test_coercions_reject_wrong_types() {
        let value = parse(r#"{"stringValue":"not-a-number"}"#);
        assert_eq!(value.as_decimal(), None);
        assert_eq!(value.as_u32(), None);
        assert_eq!(parse(r#"{"booleanValue":true}"#).as_str(), None);
    }

    #[test]
    fn test_numeric_string_is_tolerated() {
        let value = parse(r#"{"stringValue":"2500"}"#);
        assert_eq!(value.as_decimal(), Some(Decimal::from(2500)));
        assert_eq!(value.as_u32(), Some(2500));
    }
}
