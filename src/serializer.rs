//! Turns a [`Template`] into CloudFormation template JSON.
//!
//! The assembler produces the top-level sections in their fixed order, the
//! enrichment step wraps each resource in its `{Type, Condition?, Properties}`
//! fragment, and the recursive writer encodes property values -- applying the
//! property-name normalizer at every depth and emitting intrinsic functions
//! as their single-key object forms.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use time::format_description::well_known::Rfc3339;

use crate::errors::{Error, Result};
use crate::intrinsics::Intrinsic;
use crate::normalize::normalize_property_name;
use crate::resource::Resource;
use crate::template::Template;
use crate::value::PropertyValue;

/// Serialize a template to indented CloudFormation JSON.
pub fn serialize(template: &Template) -> Result<String> {
    let doc = to_json(template)?;
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Assemble the document tree without rendering it to text.
///
/// Top-level field order is fixed: `AWSTemplateFormatVersion`, `Transform`,
/// `Description`, `Parameters`, `Resources`, `Outputs`, `Mappings`,
/// `Conditions`. Unset fields and empty sections are omitted entirely, never
/// emitted as `null` or `{}`.
pub fn to_json(template: &Template) -> Result<Value> {
    let mut doc = Map::new();

    if let Some(version) = &template.format_version {
        doc.insert(
            "AWSTemplateFormatVersion".to_string(),
            Value::String(version.clone()),
        );
    }
    if let Some(transform) = &template.transform {
        doc.insert("Transform".to_string(), Value::String(transform.clone()));
    }
    if let Some(description) = &template.description {
        doc.insert("Description".to_string(), Value::String(description.clone()));
    }

    write_section(&mut doc, "Parameters", &template.parameters)?;

    if !template.resources.is_empty() {
        let mut resources = Map::new();
        for (name, resource) in &template.resources {
            resources.insert(
                name.clone(),
                enrich_resource(name, resource, &template.resource_conditions)?,
            );
        }
        doc.insert("Resources".to_string(), Value::Object(resources));
    }

    write_section(&mut doc, "Outputs", &template.outputs)?;
    write_section(&mut doc, "Mappings", &template.mappings)?;
    write_section(&mut doc, "Conditions", &template.conditions)?;

    Ok(Value::Object(doc))
}

/// Emits one opaque top-level section through the generic value path.
/// Logical names are data keys and stay verbatim; the entities behind them
/// get the normal field-name treatment.
fn write_section(
    doc: &mut Map<String, Value>,
    section: &str,
    entries: &IndexMap<String, PropertyValue>,
) -> Result<()> {
    if entries.is_empty() {
        return Ok(());
    }
    let mut out = Map::new();
    let mut path = vec![section.to_string()];
    for (name, entity) in entries {
        path.push(name.clone());
        out.insert(name.clone(), write_value(entity, &mut path)?);
        path.pop();
    }
    doc.insert(section.to_string(), Value::Object(out));
    Ok(())
}

/// Wraps one resource in its document fragment: `Type` derived from the
/// declared identity, `Condition` only on a side-table hit, `Properties`
/// through the generic path.
fn enrich_resource(
    name: &str,
    resource: &Resource,
    resource_conditions: &IndexMap<String, String>,
) -> Result<Value> {
    let mut fragment = Map::new();
    fragment.insert("Type".to_string(), Value::String(resource.type_name(name)?));

    if let Some(condition) = resource_conditions.get(name) {
        fragment.insert("Condition".to_string(), Value::String(condition.clone()));
    }

    let mut path = vec!["Resources".to_string(), name.to_string(), "Properties".to_string()];
    fragment.insert(
        "Properties".to_string(),
        write_bag(resource.properties(), &mut path)?,
    );

    Ok(Value::Object(fragment))
}

/// Recursive value writer. `path` tracks the field path for error reporting.
fn write_value(value: &PropertyValue, path: &mut Vec<String>) -> Result<Value> {
    match value {
        PropertyValue::Null => Ok(Value::Null),
        PropertyValue::Bool(b) => Ok(Value::Bool(*b)),
        PropertyValue::Long(i) => Ok(Value::Number((*i).into())),
        PropertyValue::Double(f) => match serde_json::Number::from_f64(*f) {
            Some(n) => Ok(Value::Number(n)),
            None => Err(Error::UnsupportedValue {
                path: path_string(path),
                reason: format!("non-finite number {}", f),
            }),
        },
        PropertyValue::String(s) => Ok(Value::String(s.clone())),
        PropertyValue::Timestamp(ts) => match ts.format(&Rfc3339) {
            Ok(formatted) => Ok(Value::String(formatted)),
            Err(e) => Err(Error::UnsupportedValue {
                path: path_string(path),
                reason: format!("timestamp cannot be formatted: {}", e),
            }),
        },
        PropertyValue::List(items) => write_list(items, path),
        PropertyValue::Map(map) => write_bag(map, path),
        PropertyValue::Intrinsic(intrinsic) => write_intrinsic(intrinsic, path),
    }
}

fn write_list(items: &[PropertyValue], path: &mut Vec<String>) -> Result<Value> {
    let mut out = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        path.push(format!("[{}]", i));
        out.push(write_value(item, path)?);
        path.pop();
    }
    Ok(Value::Array(out))
}

/// Emits a property bag. Field names are normalized at this and every nested
/// level; `Null` entries are dropped (key and all), matching the document
/// policy of omitting unset fields. Nulls inside sequences survive, since
/// arrays keep their arity.
fn write_bag(map: &IndexMap<String, PropertyValue>, path: &mut Vec<String>) -> Result<Value> {
    let mut out = Map::new();
    for (name, value) in map {
        if matches!(value, PropertyValue::Null) {
            continue;
        }
        let name = normalize_property_name(name);
        path.push(name.to_string());
        out.insert(name.to_string(), write_value(value, path)?);
        path.pop();
    }
    Ok(Value::Object(out))
}

/// Closed dispatch over the intrinsic variant set. Each arm produces the
/// single-key object shape for its function; operands recurse through
/// [`write_value`].
fn write_intrinsic(intrinsic: &Intrinsic, path: &mut Vec<String>) -> Result<Value> {
    path.push(intrinsic.full_name().to_string());
    let operand = match intrinsic {
        Intrinsic::Ref(name) => Value::String(name.clone()),
        Intrinsic::GetAtt {
            resource,
            attribute,
        } => Value::Array(vec![
            Value::String(resource.clone()),
            Value::String(attribute.clone()),
        ]),
        Intrinsic::Join { delimiter, values } => Value::Array(vec![
            Value::String(delimiter.clone()),
            write_list(values, path)?,
        ]),
        Intrinsic::Sub {
            template,
            variables,
        } => match variables {
            None => Value::String(template.clone()),
            // Substitution variable names are data keys, not field names,
            // so they bypass the normalizer.
            Some(vars) => {
                let mut var_map = Map::new();
                for (name, value) in vars {
                    if matches!(value, PropertyValue::Null) {
                        continue;
                    }
                    path.push(name.clone());
                    var_map.insert(name.clone(), write_value(value, path)?);
                    path.pop();
                }
                Value::Array(vec![
                    Value::String(template.clone()),
                    Value::Object(var_map),
                ])
            }
        },
        Intrinsic::ImportValue(value) => write_value(value, path)?,
        Intrinsic::Split { delimiter, source } => Value::Array(vec![
            Value::String(delimiter.clone()),
            write_value(source, path)?,
        ]),
        Intrinsic::Select { index, values } => Value::Array(vec![
            write_value(index, path)?,
            write_list(values, path)?,
        ]),
        Intrinsic::GetAZs(region) => write_value(region, path)?,
        Intrinsic::FindInMap {
            map_name,
            top_level_key,
            second_level_key,
        } => Value::Array(vec![
            Value::String(map_name.clone()),
            write_value(top_level_key, path)?,
            write_value(second_level_key, path)?,
        ]),
        Intrinsic::Base64(value) => write_value(value, path)?,
        Intrinsic::If {
            condition,
            if_true,
            if_false,
        } => Value::Array(vec![
            Value::String(condition.clone()),
            write_value(if_true, path)?,
            write_value(if_false, path)?,
        ]),
        Intrinsic::Condition(name) => Value::String(name.clone()),
    };
    path.pop();

    let mut out = Map::new();
    out.insert(intrinsic.full_name().to_string(), operand);
    Ok(Value::Object(out))
}

fn path_string(segments: &[String]) -> String {
    let mut out = String::new();
    for segment in segments {
        if !out.is_empty() && !segment.starts_with('[') {
            out.push('.');
        }
        out.push_str(segment);
    }
    out
}
