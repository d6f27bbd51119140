//! Schema loading and normalization
//!
//! Parses field-group schema documents (YAML) and concatenates them into an
//! ordered working set of field sets. Normalization flattens nested
//! sub-field declarations into dotted names, assigns the default set type
//! `group`, and promotes the fields of any set literally named `base` to the
//! top level of the working set.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::{FieldgenError, Result};

/// Name of the field set whose fields are promoted to the top level.
pub const BASE_SET: &str = "base";

/// Set type emitted as a record declaration.
pub const GROUP_TYPE: &str = "group";

/// A top-level entry in the working set.
///
/// Most entries are groups of fields sharing one description. Entries
/// promoted out of the `base` set instead carry the promoted field's own
/// storage type and no members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSet {
    /// Raw schema name, also the stem of the generated artifact.
    pub name: String,
    /// Set type; only `group` produces a record declaration.
    pub set_type: String,
    pub description: String,
    /// Field definitions in declaration order.
    pub fields: Vec<FieldDef>,
}

impl FieldSet {
    /// Whether this entry is rendered as a record declaration.
    pub fn is_group(&self) -> bool {
        self.set_type == GROUP_TYPE
    }
}

/// A single field definition within a set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    /// Dotted field name, retained unmodified as the wire key.
    pub name: String,
    /// Raw storage type token, e.g. `keyword` or `nested`.
    pub field_type: String,
    pub description: String,
}

/// Raw YAML shape of one field set.
#[derive(Debug, Deserialize)]
struct RawFieldSet {
    name: String,
    #[serde(rename = "type")]
    set_type: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    fields: Vec<RawField>,
}

/// Raw YAML shape of one field entry. An entry either declares a storage
/// type (leaf) or nested sub-fields (container), never meaningfully both.
#[derive(Debug, Deserialize)]
struct RawField {
    name: String,
    #[serde(rename = "type")]
    field_type: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    fields: Vec<RawField>,
}

/// Load every schema file in `dir` (non-recursive, `.yml`/`.yaml`, sorted by
/// file name) and return the normalized working set.
pub fn load_dir(dir: &Path) -> Result<Vec<FieldSet>> {
    let mut sets = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| FieldgenError::Parse {
            path: dir.to_path_buf(),
            message: e.to_string(),
        })?;
        let path = entry.path();
        let is_yaml = path
            .extension()
            .is_some_and(|ext| ext == "yml" || ext == "yaml");
        if !entry.file_type().is_file() || !is_yaml {
            continue;
        }

        let text = std::fs::read_to_string(path)?;
        let loaded = parse_file(&text, path)?;
        debug!(file = %path.display(), sets = loaded.len(), "loaded schema file");
        sets.extend(loaded);
    }

    let sets = promote_base(sets);
    info!(sets = sets.len(), "built working set");
    Ok(sets)
}

/// Parse one schema file, which may hold several `---`-separated documents,
/// each a sequence of field sets. Documents are concatenated in order.
pub fn parse_file(text: &str, path: &Path) -> Result<Vec<FieldSet>> {
    let mut sets = Vec::new();

    for document in serde_yaml::Deserializer::from_str(text) {
        let raw: Option<Vec<RawFieldSet>> =
            Option::deserialize(document).map_err(|e| FieldgenError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        for raw_set in raw.unwrap_or_default() {
            sets.push(normalize_set(raw_set)?);
        }
    }

    Ok(sets)
}

/// Normalize one raw set: flatten sub-fields, default the set type, and
/// validate field names.
fn normalize_set(raw: RawFieldSet) -> Result<FieldSet> {
    let mut fields = Vec::new();
    for field in raw.fields {
        flatten_field("", field, &raw.name, &mut fields)?;
    }

    let mut seen = HashSet::new();
    for field in &fields {
        if !seen.insert(field.name.as_str()) {
            return Err(FieldgenError::Schema(format!(
                "duplicate field {:?} in set {:?}",
                field.name, raw.name
            )));
        }
    }

    Ok(FieldSet {
        name: raw.name,
        set_type: raw.set_type.unwrap_or_else(|| GROUP_TYPE.to_string()),
        description: raw.description,
        fields,
    })
}

/// Flatten a raw field into dotted leaf definitions. A field carrying
/// sub-fields acts purely as a name prefix for them.
fn flatten_field(
    prefix: &str,
    raw: RawField,
    set_name: &str,
    out: &mut Vec<FieldDef>,
) -> Result<()> {
    let name = if prefix.is_empty() {
        raw.name.clone()
    } else {
        format!("{}.{}", prefix, raw.name)
    };

    if name.is_empty() || name.split('.').any(|segment| segment.is_empty()) {
        return Err(FieldgenError::Schema(format!(
            "field name {:?} in set {:?} has an empty segment",
            name, set_name
        )));
    }

    if raw.fields.is_empty() {
        let field_type = raw.field_type.ok_or_else(|| {
            FieldgenError::Schema(format!(
                "field {:?} in set {:?} has no type",
                name, set_name
            ))
        })?;
        out.push(FieldDef {
            name,
            field_type,
            description: raw.description,
        });
    } else {
        for child in raw.fields {
            flatten_field(&name, child, set_name, out)?;
        }
    }

    Ok(())
}

/// Apply the base-flattening policy: any set named `base` is replaced, in
/// place, by its fields promoted to top-level entries that carry the field's
/// own storage type. Promoted entries are not groups, so they never become
/// record declarations; the mapping compiler places them at the root of the
/// property tree.
fn promote_base(sets: Vec<FieldSet>) -> Vec<FieldSet> {
    let mut promoted = Vec::with_capacity(sets.len());
    for set in sets {
        if set.name == BASE_SET {
            debug!(fields = set.fields.len(), "promoting base fields");
            for field in set.fields {
                promoted.push(FieldSet {
                    name: field.name,
                    set_type: field.field_type,
                    description: field.description,
                    fields: Vec::new(),
                });
            }
        } else {
            promoted.push(set);
        }
    }
    promoted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Vec<FieldSet>> {
        let sets = parse_file(text, Path::new("test.yml"))?;
        Ok(promote_base(sets))
    }

    #[test]
    fn parses_a_simple_set() {
        let sets = parse(
            r#"
- name: host
  description: A host.
  fields:
    - name: name
      type: keyword
      description: Host name.
"#,
        )
        .unwrap();

        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].name, "host");
        assert_eq!(sets[0].set_type, GROUP_TYPE);
        assert_eq!(sets[0].fields[0].name, "name");
        assert_eq!(sets[0].fields[0].field_type, "keyword");
    }

    #[test]
    fn explicit_set_type_is_kept() {
        let sets = parse("- {name: labels, type: object, fields: []}\n").unwrap();
        assert_eq!(sets[0].set_type, "object");
        assert!(!sets[0].is_group());
    }

    #[test]
    fn concatenates_yaml_documents() {
        let sets = parse(
            r#"---
- name: one
  fields: []
---
- name: two
  fields: []
"#,
        )
        .unwrap();
        let names: Vec<_> = sets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["one", "two"]);
    }

    #[test]
    fn flattens_sub_fields_to_dotted_names() {
        let sets = parse(
            r#"
- name: client
  fields:
    - name: nat
      fields:
        - name: ip
          type: ip
"#,
        )
        .unwrap();
        assert_eq!(sets[0].fields[0].name, "nat.ip");
        assert_eq!(sets[0].fields[0].field_type, "ip");
    }

    #[test]
    fn base_fields_are_promoted_in_place() {
        let sets = parse(
            r#"
- name: agent
  fields: []
- name: base
  fields:
    - name: id
      type: keyword
- name: host
  fields: []
"#,
        )
        .unwrap();

        let names: Vec<_> = sets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["agent", "id", "host"]);
        assert_eq!(sets[1].set_type, "keyword");
        assert!(!sets[1].is_group());
    }

    #[test]
    fn base_promotion_works_in_both_merge_directions() {
        let base = "- name: base\n  fields:\n    - {name: id, type: keyword}\n";
        let host = "- name: host\n  fields: []\n";

        let base_first = parse(&format!("{}{}", base, host)).unwrap();
        let base_last = parse(&format!("{}{}", host, base)).unwrap();

        let names =
            |sets: &[FieldSet]| sets.iter().map(|s| s.name.clone()).collect::<Vec<_>>();
        assert_eq!(names(&base_first), ["id", "host"]);
        assert_eq!(names(&base_last), ["host", "id"]);
    }

    #[test]
    fn duplicate_field_names_are_rejected() {
        let err = parse(
            r#"
- name: host
  fields:
    - {name: name, type: keyword}
    - {name: name, type: text}
"#,
        )
        .unwrap_err();
        assert!(matches!(err, FieldgenError::Schema(_)));
    }

    #[test]
    fn empty_name_segments_are_rejected() {
        let err = parse("- name: host\n  fields:\n    - {name: name., type: keyword}\n")
            .unwrap_err();
        assert!(matches!(err, FieldgenError::Schema(_)));
    }

    #[test]
    fn leaf_without_type_is_rejected() {
        let err = parse("- name: host\n  fields:\n    - {name: name}\n").unwrap_err();
        assert!(matches!(err, FieldgenError::Schema(_)));
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let err = parse("- name: [unclosed\n").unwrap_err();
        assert!(matches!(err, FieldgenError::Parse { .. }));
    }
}
