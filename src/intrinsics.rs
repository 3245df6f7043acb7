use indexmap::IndexMap;
use lazy_static::lazy_static;
use serde_json::Value;
use std::collections::HashSet;

use crate::value::PropertyValue;

/// A CloudFormation intrinsic function expression.
///
/// Each variant serializes to a JSON object with exactly one key (see
/// [`Intrinsic::full_name`]). Operands may themselves be intrinsics, so
/// expressions nest arbitrarily: an `If` branch can be a `Ref`, a `Join`
/// element can be a `GetAtt`, and so on.
#[derive(Debug, Clone, PartialEq)]
pub enum Intrinsic {
    /// `{"Ref": "LogicalName"}`
    Ref(String),
    /// `{"Fn::GetAtt": ["LogicalName", "Attribute"]}`
    GetAtt { resource: String, attribute: String },
    /// `{"Fn::Join": ["delimiter", [values...]]}`
    Join {
        delimiter: String,
        values: Vec<PropertyValue>,
    },
    /// `{"Fn::Sub": "template"}` or `{"Fn::Sub": ["template", {vars}]}`
    Sub {
        template: String,
        variables: Option<IndexMap<String, PropertyValue>>,
    },
    /// `{"Fn::ImportValue": value}`
    ImportValue(Box<PropertyValue>),
    /// `{"Fn::Split": ["delimiter", source]}`
    Split {
        delimiter: String,
        source: Box<PropertyValue>,
    },
    /// `{"Fn::Select": [index, [values...]]}`
    Select {
        index: Box<PropertyValue>,
        values: Vec<PropertyValue>,
    },
    /// `{"Fn::GetAZs": region}` -- region may be the empty string
    GetAZs(Box<PropertyValue>),
    /// `{"Fn::FindInMap": ["MapName", top_key, second_key]}`
    FindInMap {
        map_name: String,
        top_level_key: Box<PropertyValue>,
        second_level_key: Box<PropertyValue>,
    },
    /// `{"Fn::Base64": value}`
    Base64(Box<PropertyValue>),
    /// `{"Fn::If": ["ConditionName", if_true, if_false]}`
    If {
        condition: String,
        if_true: Box<PropertyValue>,
        if_false: Box<PropertyValue>,
    },
    /// `{"Condition": "ConditionName"}`
    Condition(String),
}

lazy_static! {
    /// JSON object keys reserved for intrinsic functions. An object with
    /// exactly one of these keys is a candidate for structural decoding.
    pub(crate) static ref INTRINSIC_KEYS: HashSet<&'static str> = {
        let mut set = HashSet::new();
        set.insert("Ref");
        set.insert("Fn::GetAtt");
        set.insert("Fn::Join");
        set.insert("Fn::Sub");
        set.insert("Fn::ImportValue");
        set.insert("Fn::Split");
        set.insert("Fn::Select");
        set.insert("Fn::GetAZs");
        set.insert("Fn::FindInMap");
        set.insert("Fn::Base64");
        set.insert("Fn::If");
        set.insert("Condition");
        set
    };
}

impl Intrinsic {
    /// The single JSON object key this intrinsic serializes under.
    pub fn full_name(&self) -> &'static str {
        match self {
            Intrinsic::Ref(_) => "Ref",
            Intrinsic::GetAtt { .. } => "Fn::GetAtt",
            Intrinsic::Join { .. } => "Fn::Join",
            Intrinsic::Sub { .. } => "Fn::Sub",
            Intrinsic::ImportValue(_) => "Fn::ImportValue",
            Intrinsic::Split { .. } => "Fn::Split",
            Intrinsic::Select { .. } => "Fn::Select",
            Intrinsic::GetAZs(_) => "Fn::GetAZs",
            Intrinsic::FindInMap { .. } => "Fn::FindInMap",
            Intrinsic::Base64(_) => "Fn::Base64",
            Intrinsic::If { .. } => "Fn::If",
            Intrinsic::Condition(_) => "Condition",
        }
    }

    /// Structurally match a JSON object against the intrinsic shapes.
    ///
    /// Returns `None` when the object is not a single-key object with a
    /// reserved key, or when the value does not match the expected arity;
    /// callers treat such objects as literal maps.
    pub(crate) fn from_json_object(map: &serde_json::Map<String, Value>) -> Option<Intrinsic> {
        if map.len() != 1 {
            return None;
        }
        let (key, value) = map.iter().next()?;
        if !INTRINSIC_KEYS.contains(key.as_str()) {
            return None;
        }

        match key.as_str() {
            "Ref" => Some(Intrinsic::Ref(value.as_str()?.to_string())),
            "Fn::GetAtt" => decode_get_att(value),
            "Fn::Join" => {
                let (delimiter, rest) = split_leading_string(value)?;
                let values = rest.first()?.as_array()?;
                Some(Intrinsic::Join {
                    delimiter,
                    values: values.iter().map(PropertyValue::from_json).collect(),
                })
            }
            "Fn::Sub" => decode_sub(value),
            "Fn::ImportValue" => Some(Intrinsic::ImportValue(Box::new(
                PropertyValue::from_json(value),
            ))),
            "Fn::Split" => {
                let (delimiter, rest) = split_leading_string(value)?;
                let source = rest.first()?;
                Some(Intrinsic::Split {
                    delimiter,
                    source: Box::new(PropertyValue::from_json(source)),
                })
            }
            "Fn::Select" => {
                let items = value.as_array()?;
                if items.len() != 2 {
                    return None;
                }
                let values = items[1].as_array()?;
                Some(Intrinsic::Select {
                    index: Box::new(PropertyValue::from_json(&items[0])),
                    values: values.iter().map(PropertyValue::from_json).collect(),
                })
            }
            "Fn::GetAZs" => Some(Intrinsic::GetAZs(Box::new(PropertyValue::from_json(value)))),
            "Fn::FindInMap" => {
                let items = value.as_array()?;
                if items.len() != 3 {
                    return None;
                }
                Some(Intrinsic::FindInMap {
                    map_name: items[0].as_str()?.to_string(),
                    top_level_key: Box::new(PropertyValue::from_json(&items[1])),
                    second_level_key: Box::new(PropertyValue::from_json(&items[2])),
                })
            }
            "Fn::Base64" => Some(Intrinsic::Base64(Box::new(PropertyValue::from_json(value)))),
            "Fn::If" => {
                let items = value.as_array()?;
                if items.len() != 3 {
                    return None;
                }
                Some(Intrinsic::If {
                    condition: items[0].as_str()?.to_string(),
                    if_true: Box::new(PropertyValue::from_json(&items[1])),
                    if_false: Box::new(PropertyValue::from_json(&items[2])),
                })
            }
            "Condition" => Some(Intrinsic::Condition(value.as_str()?.to_string())),
            _ => None,
        }
    }
}

/// `Fn::GetAtt` comes in two lexical forms: the two-element array and the
/// dotted short string (`"Resource.Attribute"`).
fn decode_get_att(value: &Value) -> Option<Intrinsic> {
    if let Some(items) = value.as_array() {
        if items.len() != 2 {
            return None;
        }
        return Some(Intrinsic::GetAtt {
            resource: items[0].as_str()?.to_string(),
            attribute: items[1].as_str()?.to_string(),
        });
    }

    let dotted = value.as_str()?;
    let (resource, attribute) = dotted.split_once('.')?;
    if resource.is_empty() || attribute.is_empty() {
        return None;
    }
    Some(Intrinsic::GetAtt {
        resource: resource.to_string(),
        attribute: attribute.to_string(),
    })
}

fn decode_sub(value: &Value) -> Option<Intrinsic> {
    if let Some(template) = value.as_str() {
        return Some(Intrinsic::Sub {
            template: template.to_string(),
            variables: None,
        });
    }

    let items = value.as_array()?;
    if items.len() != 2 {
        return None;
    }
    let template = items[0].as_str()?.to_string();
    let vars = items[1].as_object()?;
    Some(Intrinsic::Sub {
        template,
        variables: Some(
            vars.iter()
                .map(|(k, v)| (k.clone(), PropertyValue::from_json(v)))
                .collect(),
        ),
    })
}

/// Matches a two-element array whose first element is a string, returning
/// that string and the remaining elements.
fn split_leading_string(value: &Value) -> Option<(String, &[Value])> {
    let items = value.as_array()?;
    if items.len() != 2 {
        return None;
    }
    let leading = items[0].as_str()?.to_string();
    Some((leading, &items[1..]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: Value) -> Option<Intrinsic> {
        Intrinsic::from_json_object(value.as_object().expect("fixture must be an object"))
    }

    #[test]
    fn test_decode_ref() {
        assert_eq!(
            decode(json!({ "Ref": "MyBucket" })),
            Some(Intrinsic::Ref("MyBucket".to_string()))
        );
    }

    #[test]
    fn test_decode_get_att_array_form() {
        assert_eq!(
            decode(json!({ "Fn::GetAtt": ["MyQueue", "Arn"] })),
            Some(Intrinsic::GetAtt {
                resource: "MyQueue".to_string(),
                attribute: "Arn".to_string(),
            })
        );
    }

    #[test]
    fn test_decode_get_att_dotted_form() {
        assert_eq!(
            decode(json!({ "Fn::GetAtt": "MyQueue.Arn" })),
            Some(Intrinsic::GetAtt {
                resource: "MyQueue".to_string(),
                attribute: "Arn".to_string(),
            })
        );
    }

    #[test]
    fn test_decode_sub_string_form() {
        assert_eq!(
            decode(json!({ "Fn::Sub": "${AWS::StackName}-bucket" })),
            Some(Intrinsic::Sub {
                template: "${AWS::StackName}-bucket".to_string(),
                variables: None,
            })
        );
    }

    #[test]
    fn test_decode_sub_pair_form() {
        let decoded = decode(json!({
            "Fn::Sub": ["${Name}-suffix", { "Name": { "Ref": "MyBucket" } }]
        }));
        match decoded {
            Some(Intrinsic::Sub {
                template,
                variables: Some(vars),
            }) => {
                assert_eq!(template, "${Name}-suffix");
                assert_eq!(
                    vars["Name"],
                    PropertyValue::Intrinsic(Intrinsic::Ref("MyBucket".to_string()))
                );
            }
            other => panic!("expected Sub with variables, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_if() {
        assert_eq!(
            decode(json!({ "Fn::If": ["IsProd", "a", "b"] })),
            Some(Intrinsic::If {
                condition: "IsProd".to_string(),
                if_true: Box::new(PropertyValue::String("a".to_string())),
                if_false: Box::new(PropertyValue::String("b".to_string())),
            })
        );
    }

    #[test]
    fn test_decode_find_in_map() {
        assert_eq!(
            decode(json!({ "Fn::FindInMap": ["RegionMap", { "Ref": "AWS::Region" }, "Ami"] })),
            Some(Intrinsic::FindInMap {
                map_name: "RegionMap".to_string(),
                top_level_key: Box::new(PropertyValue::Intrinsic(Intrinsic::Ref(
                    "AWS::Region".to_string()
                ))),
                second_level_key: Box::new(PropertyValue::String("Ami".to_string())),
            })
        );
    }

    #[test]
    fn test_decode_unreserved_key_is_not_intrinsic() {
        assert_eq!(decode(json!({ "Name": "MyBucket" })), None);
    }

    #[test]
    fn test_decode_arity_mismatch_is_not_intrinsic() {
        assert_eq!(decode(json!({ "Fn::GetAtt": ["OnlyOne"] })), None);
        assert_eq!(decode(json!({ "Fn::If": ["Cond", "a"] })), None);
        assert_eq!(decode(json!({ "Ref": 42 })), None);
    }

    #[test]
    fn test_full_names() {
        assert_eq!(Intrinsic::Ref("x".into()).full_name(), "Ref");
        assert_eq!(
            Intrinsic::GetAZs(Box::new(PropertyValue::String(String::new()))).full_name(),
            "Fn::GetAZs"
        );
        assert_eq!(Intrinsic::Condition("c".into()).full_name(), "Condition");
    }
}
