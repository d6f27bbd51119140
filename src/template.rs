//! Index-template compilation
//!
//! Walks the normalized working set, independently of the code generator,
//! and builds the recursive `properties` tree of an Elasticsearch legacy
//! index template. Dotted field names become paths whose intermediate
//! segments are object containers; the terminal segment carries the storage
//! type. The aggregate document is meant to be printed to stdout for direct
//! submission to the index-template endpoint.

use serde_json::{json, Map, Value};
use tracing::info;

use crate::config::Config;
use crate::error::{FieldgenError, Result};
use crate::schema::{self, FieldSet};

/// Resolve the storage type for a mapping leaf. This table is enforced on
/// its own: an unknown type aborts template generation even if the code
/// generator never ran.
fn storage_type(field_name: &str, raw_type: &str) -> Result<&'static str> {
    match raw_type {
        "keyword" => Ok("keyword"),
        "wildcard" => Ok("wildcard"),
        "version" => Ok("version"),
        "constant_keyword" => Ok("constant_keyword"),
        "text" => Ok("text"),
        "ip" => Ok("ip"),
        "geo_point" => Ok("geo_point"),
        "long" => Ok("long"),
        "integer" => Ok("integer"),
        "float" => Ok("float"),
        "scaled_float" => Ok("scaled_float"),
        "date" => Ok("date"),
        "boolean" => Ok("boolean"),
        "nested" => Ok("nested"),
        "object" => Ok("object"),
        "flattened" => Ok("flattened"),
        _ => Err(FieldgenError::UnknownType {
            field: field_name.to_string(),
            raw: raw_type.to_string(),
        }),
    }
}

/// Build the `properties` tree for the whole working set. Group-typed sets
/// contribute their fields under the set name; promoted entries contribute
/// a leaf at the root.
pub fn build_properties(sets: &[FieldSet]) -> Result<Map<String, Value>> {
    let mut properties = Map::new();

    for set in sets {
        if set.is_group() {
            for field in &set.fields {
                let path = format!("{}.{}", set.name, field.name);
                let leaf = json!({ "type": storage_type(&path, &field.field_type)? });
                insert_nested(
                    &mut properties,
                    &path.split('.').collect::<Vec<_>>(),
                    leaf,
                );
            }
        } else {
            let leaf = json!({ "type": storage_type(&set.name, &set.set_type)? });
            insert_nested(
                &mut properties,
                &set.name.split('.').collect::<Vec<_>>(),
                leaf,
            );
        }
    }

    Ok(properties)
}

/// Place `value` at the dotted path, creating `{"properties": {...}}`
/// containers for intermediate segments. An `object`-typed leaf never
/// overwrites a container that another field already populated.
fn insert_nested(map: &mut Map<String, Value>, path: &[&str], value: Value) {
    let (head, rest) = match path.split_first() {
        Some(split) => split,
        None => return,
    };

    if rest.is_empty() {
        let is_object_leaf = value
            .get("type")
            .and_then(Value::as_str)
            .is_some_and(|t| t == "object" || t == "flattened");
        if is_object_leaf && map.contains_key(*head) {
            return;
        }
        map.insert(head.to_string(), value);
        return;
    }

    let entry = map
        .entry(head.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    let container = entry
        .as_object_mut()
        .expect("mapping tree values are always objects");
    let children = container
        .entry("properties".to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    let children = children
        .as_object_mut()
        .expect("properties values are always objects");

    insert_nested(children, rest, value);
}

/// Assemble the legacy index-template document around the property tree.
pub fn build_template(sets: &[FieldSet], version: &str) -> Result<Value> {
    let properties = build_properties(sets)?;
    info!(top_level = properties.len(), "compiled property tree");

    Ok(json!({
        "index_patterns": ["ecs-*"],
        "order": 1,
        "settings": {
            "index": {
                "mapping": {
                    "total_fields": {
                        "limit": 10000
                    }
                },
                "refresh_interval": "5s"
            }
        },
        "mappings": {
            "_meta": { "version": version },
            "date_detection": false,
            "dynamic_templates": [
                {
                    "strings_as_keyword": {
                        "mapping": {
                            "ignore_above": 1024,
                            "type": "keyword"
                        },
                        "match_mapping_type": "string"
                    }
                }
            ],
            "properties": properties
        }
    }))
}

/// Run the template pipeline and return the pretty-printed document. Keys
/// serialize in sorted order, so identical input reproduces identical text.
pub fn generate(config: &Config) -> Result<String> {
    config.validate()?;
    let sets = schema::load_dir(&config.schema_dir)?;
    let template = build_template(&sets, &config.version)?;
    let mut rendered = serde_json::to_string_pretty(&template)?;
    rendered.push('\n');
    Ok(rendered)
}
