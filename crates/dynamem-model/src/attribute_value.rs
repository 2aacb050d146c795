//! Document attribute values.
//!
//! An [`AttributeValue`] is a tagged union where exactly one variant is
//! present. On the wire it uses the DynamoDB single-key object form, e.g.
//! `{"S": "hello"}` or `{"M": {"a": {"N": "1"}}}`.

use std::collections::HashMap;
use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A stored document: attribute name to value.
pub type Document = HashMap<String, AttributeValue>;

/// Dynamically typed document attribute value.
///
/// Numbers are string-encoded so that the store never loses precision on
/// values it does not interpret.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// String value.
    S(String),
    /// Number value (string-encoded).
    N(String),
    /// Boolean value.
    Bool(bool),
    /// Null value.
    Null(bool),
    /// Ordered sequence of values.
    L(Vec<AttributeValue>),
    /// Nested mapping.
    M(HashMap<String, AttributeValue>),
}

impl AttributeValue {
    /// Returns `true` if this value can address a table slot.
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::S(_) | Self::N(_) | Self::Bool(_))
    }

    /// Returns the type descriptor used on the wire (e.g. "S", "BOOL").
    #[must_use]
    pub fn type_descriptor(&self) -> &'static str {
        match self {
            Self::S(_) => "S",
            Self::N(_) => "N",
            Self::Bool(_) => "BOOL",
            Self::Null(_) => "NULL",
            Self::L(_) => "L",
            Self::M(_) => "M",
        }
    }
}

impl Eq for AttributeValue {}

impl std::hash::Hash for AttributeValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            Self::S(s) | Self::N(s) => s.hash(state),
            Self::Bool(b) | Self::Null(b) => b.hash(state),
            Self::L(v) => v.hash(state),
            Self::M(m) => {
                // Map iteration order is unstable; hash sorted pairs.
                let mut pairs: Vec<_> = m.iter().collect();
                pairs.sort_by_key(|(k, _)| *k);
                for (k, v) in pairs {
                    k.hash(state);
                    v.hash(state);
                }
            }
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::S(s) => write!(f, "{{S: {s}}}"),
            Self::N(n) => write!(f, "{{N: {n}}}"),
            Self::Bool(b) => write!(f, "{{BOOL: {b}}}"),
            Self::Null(b) => write!(f, "{{NULL: {b}}}"),
            Self::L(v) => write!(f, "{{L: {} items}}", v.len()),
            Self::M(m) => write!(f, "{{M: {} keys}}", m.len()),
        }
    }
}

impl Serialize for AttributeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Self::S(s) => map.serialize_entry("S", s)?,
            Self::N(n) => map.serialize_entry("N", n)?,
            Self::Bool(b) => map.serialize_entry("BOOL", b)?,
            Self::Null(b) => map.serialize_entry("NULL", b)?,
            Self::L(list) => map.serialize_entry("L", list)?,
            Self::M(m) => map.serialize_entry("M", m)?,
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AttributeValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(AttributeValueVisitor)
    }
}

struct AttributeValueVisitor;

impl<'de> Visitor<'de> for AttributeValueVisitor {
    type Value = AttributeValue;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("an attribute value object with exactly one type key")
    }

    fn visit_map<M: MapAccess<'de>>(self, mut map: M) -> Result<Self::Value, M::Error> {
        let Some(key) = map.next_key::<String>()? else {
            return Err(de::Error::custom(
                "AttributeValue must have exactly one key",
            ));
        };

        let value = match key.as_str() {
            "S" => AttributeValue::S(map.next_value()?),
            "N" => AttributeValue::N(map.next_value()?),
            "BOOL" => AttributeValue::Bool(map.next_value()?),
            "NULL" => AttributeValue::Null(map.next_value()?),
            "L" => AttributeValue::L(map.next_value()?),
            "M" => AttributeValue::M(map.next_value()?),
            other => {
                return Err(de::Error::unknown_field(
                    other,
                    &["S", "N", "BOOL", "NULL", "L", "M"],
                ));
            }
        };

        if map.next_key::<String>()?.is_some() {
            return Err(de::Error::custom(
                "AttributeValue must have exactly one key",
            ));
        }

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_serialize_string_value() {
        let val = AttributeValue::S("hello".to_owned());
        let json = serde_json::to_string(&val).unwrap();
        assert_eq!(json, r#"{"S":"hello"}"#);
    }

    #[test]
    fn test_should_serialize_list_value() {
        let val = AttributeValue::L(vec![
            AttributeValue::S("a".to_owned()),
            AttributeValue::N("1".to_owned()),
        ]);
        let json = serde_json::to_string(&val).unwrap();
        assert_eq!(json, r#"{"L":[{"S":"a"},{"N":"1"}]}"#);
    }

    #[test]
    fn test_should_deserialize_nested_map() {
        let json = r#"{"M":{"profile":{"M":{"active":{"BOOL":true}}}}}"#;
        let val: AttributeValue = serde_json::from_str(json).unwrap();
        let expected = AttributeValue::M(HashMap::from([(
            "profile".to_owned(),
            AttributeValue::M(HashMap::from([(
                "active".to_owned(),
                AttributeValue::Bool(true),
            )])),
        )]));
        assert_eq!(val, expected);
    }

    #[test]
    fn test_should_reject_unknown_type_key() {
        let result: Result<AttributeValue, _> = serde_json::from_str(r#"{"SS":["a"]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_should_reject_multiple_type_keys() {
        let result: Result<AttributeValue, _> = serde_json::from_str(r#"{"S":"a","N":"1"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_should_classify_scalars() {
        assert!(AttributeValue::S("a".to_owned()).is_scalar());
        assert!(AttributeValue::N("1".to_owned()).is_scalar());
        assert!(AttributeValue::Bool(false).is_scalar());
        assert!(!AttributeValue::Null(true).is_scalar());
        assert!(!AttributeValue::L(vec![]).is_scalar());
        assert!(!AttributeValue::M(HashMap::new()).is_scalar());
    }

    #[test]
    fn test_should_hash_maps_independent_of_insertion_order() {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut a = HashMap::new();
        let mut b = HashMap::new();
        for i in 0..16 {
            a.insert(format!("k{i}"), AttributeValue::N(i.to_string()));
        }
        for i in (0..16).rev() {
            b.insert(format!("k{i}"), AttributeValue::N(i.to_string()));
        }
        let hash = |v: &AttributeValue| {
            let mut h = DefaultHasher::new();
            v.hash(&mut h);
            h.finish()
        };
        assert_eq!(hash(&AttributeValue::M(a)), hash(&AttributeValue::M(b)));
    }
}
