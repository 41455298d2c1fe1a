//! Flatten - Project typed read records onto a schema
//!
//! Data sources describe what they read as a strongly typed record. The
//! record is serialized and walked against the data source's schema:
//!
//! - a `None` field is skipped, never written as a zero value
//! - nested sequences are mapped element by element, in order
//! - sets keep only the first occurrence of a repeated element
//! - a field the schema does not declare as computed is an error

use serde::Serialize;
use serde_json::Value as Json;

use crate::identifier::Identifier;
use crate::resource::{ResourceId, State, Value};
use crate::schema::{AttributeMap, AttributeType, ResourceSchema, TypeError};

/// Flatten error
#[derive(Debug, thiserror::Error)]
pub enum FlattenError {
    #[error("Failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Record must serialize to an object, got {got}")]
    NotAnObject { got: &'static str },

    #[error("Attribute '{path}' is not declared in the schema")]
    Undeclared { path: String },

    #[error("Attribute '{name}' is not computed and cannot be set by a read")]
    NotComputed { name: String },

    #[error("Attribute '{path}': expected {expected}, got {got}")]
    TypeMismatch {
        path: String,
        expected: String,
        got: &'static str,
    },

    #[error("Attribute '{path}': {source}")]
    Invalid {
        path: String,
        #[source]
        source: TypeError,
    },
}

/// Outcome of a remote read: the identifier plus the serialized record
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub identifier: Identifier,
    values: Json,
}

impl Snapshot {
    pub fn capture<T: Serialize>(
        identifier: Identifier,
        record: &T,
    ) -> Result<Self, FlattenError> {
        Ok(Self {
            identifier,
            values: serde_json::to_value(record)?,
        })
    }

    /// Build the state for `id`, assigning the identifier before any attribute
    pub fn into_state(
        self,
        id: ResourceId,
        schema: &ResourceSchema,
    ) -> Result<State, FlattenError> {
        let state = State::new(id, self.identifier);
        let attributes = flatten(schema, &self.values)?;
        Ok(state.with_attributes(attributes))
    }
}

/// Flatten a serialized record into the attributes declared by `schema`
pub fn flatten(schema: &ResourceSchema, values: &Json) -> Result<AttributeMap, FlattenError> {
    let object = values.as_object().ok_or(FlattenError::NotAnObject {
        got: json_type_name(values),
    })?;

    let mut attributes = AttributeMap::new();
    for (name, json) in object {
        let attr = schema.get(name).ok_or_else(|| FlattenError::Undeclared {
            path: name.clone(),
        })?;
        if !attr.is_computed() {
            return Err(FlattenError::NotComputed { name: name.clone() });
        }
        if let Some(value) = convert(&attr.attr_type, json, name)? {
            attributes.insert(name.clone(), value);
        }
    }
    Ok(attributes)
}

fn convert(
    attr_type: &AttributeType,
    json: &Json,
    path: &str,
) -> Result<Option<Value>, FlattenError> {
    if json.is_null() {
        return Ok(None);
    }

    let mismatch = || FlattenError::TypeMismatch {
        path: path.to_string(),
        expected: attr_type.to_string(),
        got: json_type_name(json),
    };

    let value = match attr_type {
        AttributeType::String => Value::String(json.as_str().ok_or_else(mismatch)?.to_string()),
        AttributeType::Int => Value::Int(json.as_i64().ok_or_else(mismatch)?),
        AttributeType::Float => Value::Float(json.as_f64().ok_or_else(mismatch)?),
        AttributeType::Bool => Value::Bool(json.as_bool().ok_or_else(mismatch)?),
        AttributeType::Custom { base, .. } => {
            let Some(value) = convert(base, json, path)? else {
                return Ok(None);
            };
            attr_type
                .validate(&value)
                .map_err(|source| FlattenError::Invalid {
                    path: path.to_string(),
                    source,
                })?;
            value
        }
        AttributeType::List(inner) | AttributeType::Set(inner) => {
            let items = json.as_array().ok_or_else(mismatch)?;
            let is_set = matches!(attr_type, AttributeType::Set(_));
            let mut values = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                let Some(v) = convert(inner, item, &format!("{}[{}]", path, i))? else {
                    continue;
                };
                // A set keeps the first occurrence of each element
                if is_set && values.contains(&v) {
                    continue;
                }
                values.push(v);
            }
            Value::List(values)
        }
        AttributeType::Object(fields) => {
            let object = json.as_object().ok_or_else(mismatch)?;
            let mut map = AttributeMap::new();
            for (key, field_json) in object {
                let field_path = format!("{}.{}", path, key);
                let field = fields.get(key).ok_or_else(|| FlattenError::Undeclared {
                    path: field_path.clone(),
                })?;
                if let Some(v) = convert(&field.attr_type, field_json, &field_path)? {
                    map.insert(key.clone(), v);
                }
            }
            Value::Map(map)
        }
    };
    Ok(Some(value))
}

fn json_type_name(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "bool",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{AttributeSchema, types};
    use serde_json::json;

    fn volumes_schema() -> ResourceSchema {
        ResourceSchema::new("ibm_ppc_instance_volumes")
            .attribute(
                AttributeSchema::new("ppc_instance_name", types::non_empty_string()).required(),
            )
            .attribute(AttributeSchema::new("boot_volume_id", AttributeType::String).computed())
            .attribute(
                AttributeSchema::new(
                    "instance_volumes",
                    AttributeType::list_of(AttributeType::object(vec![
                        AttributeSchema::new("id", AttributeType::String).computed(),
                        AttributeSchema::new("size", AttributeType::Float).computed(),
                        AttributeSchema::new("bootable", AttributeType::Bool).computed(),
                    ])),
                )
                .computed(),
            )
            .attribute(AttributeSchema::new("vlan_id", AttributeType::Int).computed())
            .attribute(
                AttributeSchema::new("dns", AttributeType::set_of(AttributeType::String))
                    .computed(),
            )
    }

    #[test]
    fn null_fields_are_omitted() {
        let attrs = flatten(
            &volumes_schema(),
            &json!({"boot_volume_id": null, "vlan_id": 0}),
        )
        .unwrap();

        assert_eq!(attrs.len(), 1);
        // Zero is a value, null is absence
        assert_eq!(attrs.get("vlan_id"), Some(&Value::Int(0)));
        assert!(!attrs.contains_key("boot_volume_id"));
    }

    #[test]
    fn nested_lists_keep_order_and_presence() {
        let attrs = flatten(
            &volumes_schema(),
            &json!({
                "instance_volumes": [
                    {"id": "v1", "size": 20.0, "bootable": true},
                    {"id": "v2", "size": 10, "bootable": null},
                ]
            }),
        )
        .unwrap();

        let volumes = attrs["instance_volumes"].as_list().unwrap();
        assert_eq!(volumes.len(), 2);

        let first = volumes[0].as_map().unwrap();
        assert_eq!(first.get("id"), Some(&Value::from("v1")));
        assert_eq!(first.get("bootable"), Some(&Value::Bool(true)));

        let second = volumes[1].as_map().unwrap();
        assert_eq!(second.get("id"), Some(&Value::from("v2")));
        assert_eq!(second.get("size"), Some(&Value::Float(10.0)));
        assert!(!second.contains_key("bootable"));
    }

    #[test]
    fn sets_drop_duplicates_and_lists_keep_them() {
        let attrs = flatten(
            &volumes_schema(),
            &json!({
                "dns": ["9.9.9.9", "8.8.8.8", "9.9.9.9"],
                "instance_volumes": [{"id": "v1"}, {"id": "v1"}],
            }),
        )
        .unwrap();

        assert_eq!(
            attrs["dns"],
            Value::List(vec![Value::from("9.9.9.9"), Value::from("8.8.8.8")])
        );
        assert_eq!(attrs["instance_volumes"].as_list().unwrap().len(), 2);
    }

    #[test]
    fn undeclared_attribute_is_rejected() {
        let err = flatten(&volumes_schema(), &json!({"colour": "blue"})).unwrap_err();
        assert!(matches!(err, FlattenError::Undeclared { path } if path == "colour"));

        let err = flatten(
            &volumes_schema(),
            &json!({"instance_volumes": [{"id": "v1", "colour": "blue"}]}),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            FlattenError::Undeclared { path } if path == "instance_volumes[0].colour"
        ));
    }

    #[test]
    fn configured_attribute_cannot_be_flattened() {
        let err = flatten(&volumes_schema(), &json!({"ppc_instance_name": "vm"})).unwrap_err();
        assert!(matches!(err, FlattenError::NotComputed { .. }));
    }

    #[test]
    fn type_mismatch_names_the_path() {
        let err = flatten(&volumes_schema(), &json!({"vlan_id": "ten"})).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Attribute 'vlan_id': expected Int, got string"
        );
    }

    #[test]
    fn non_object_record_is_rejected() {
        let err = flatten(&volumes_schema(), &json!([1, 2])).unwrap_err();
        assert!(matches!(err, FlattenError::NotAnObject { got: "array" }));
    }

    #[derive(Serialize)]
    struct BootRecord {
        boot_volume_id: Option<String>,
        vlan_id: Option<i64>,
    }

    #[test]
    fn snapshot_assigns_identifier_and_attributes() {
        let record = BootRecord {
            boot_volume_id: Some("v1".to_string()),
            vlan_id: None,
        };
        let snapshot = Snapshot::capture(Identifier::remote("vm-1"), &record).unwrap();
        let state = snapshot
            .into_state(ResourceId::new("ibm_ppc_instance_volumes", "vols"), &volumes_schema())
            .unwrap();

        assert_eq!(state.identifier(), &Identifier::remote("vm-1"));
        assert_eq!(state.get("boot_volume_id"), Some(&Value::from("v1")));
        assert!(state.get("vlan_id").is_none());
    }
}
