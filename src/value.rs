use indexmap::IndexMap;
use serde_json::Value;
use time::OffsetDateTime;

use crate::intrinsics::Intrinsic;

/// A CloudFormation property value.
///
/// Resources accept arbitrary untyped values per property, so this is a
/// closed union over everything a template property can hold: primitives,
/// sequences, nested property bags, and intrinsic function expressions.
/// Keeping the set closed lets the serializer match exhaustively instead of
/// walking an opaque "any" type.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Null,
    Bool(bool),
    Long(i64),
    Double(f64),
    String(String),
    Timestamp(OffsetDateTime),
    List(Vec<PropertyValue>),
    Map(IndexMap<String, PropertyValue>),
    Intrinsic(Intrinsic),
}

impl PropertyValue {
    /// Rebuild a property value from a JSON tree.
    ///
    /// Objects with exactly one reserved intrinsic key and a value of the
    /// expected arity decode as intrinsics; everything else is literal data.
    /// A user-authored literal object that happens to look like an intrinsic
    /// (say, a single key named `Ref`) is therefore mis-classified. This is a
    /// known limitation of the document format itself, not something the
    /// decoder can repair.
    pub fn from_json(value: &Value) -> PropertyValue {
        match value {
            Value::Null => PropertyValue::Null,
            Value::Bool(b) => PropertyValue::Bool(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    PropertyValue::Long(i)
                } else {
                    PropertyValue::Double(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => PropertyValue::String(s.clone()),
            Value::Array(items) => {
                PropertyValue::List(items.iter().map(PropertyValue::from_json).collect())
            }
            Value::Object(map) => {
                if let Some(intrinsic) = Intrinsic::from_json_object(map) {
                    PropertyValue::Intrinsic(intrinsic)
                } else {
                    PropertyValue::Map(
                        map.iter()
                            .map(|(k, v)| (k.clone(), PropertyValue::from_json(v)))
                            .collect(),
                    )
                }
            }
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::String(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::String(s)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Bool(b)
    }
}

impl From<i32> for PropertyValue {
    fn from(i: i32) -> Self {
        PropertyValue::Long(i64::from(i))
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        PropertyValue::Long(i)
    }
}

impl From<u32> for PropertyValue {
    fn from(i: u32) -> Self {
        PropertyValue::Long(i64::from(i))
    }
}

impl From<f64> for PropertyValue {
    fn from(f: f64) -> Self {
        PropertyValue::Double(f)
    }
}

impl From<OffsetDateTime> for PropertyValue {
    fn from(ts: OffsetDateTime) -> Self {
        PropertyValue::Timestamp(ts)
    }
}

impl From<Intrinsic> for PropertyValue {
    fn from(intrinsic: Intrinsic) -> Self {
        PropertyValue::Intrinsic(intrinsic)
    }
}

impl<T: Into<PropertyValue>> From<Vec<T>> for PropertyValue {
    fn from(items: Vec<T>) -> Self {
        PropertyValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<IndexMap<String, PropertyValue>> for PropertyValue {
    fn from(map: IndexMap<String, PropertyValue>) -> Self {
        PropertyValue::Map(map)
    }
}
