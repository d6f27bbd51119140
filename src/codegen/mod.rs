//! Record model building and artifact assembly
//!
//! Turns the normalized working set into per-group record models, splitting
//! `nested`-typed fields into derived sub-records, then hands each model to
//! the Go emitter. Artifacts come back in working-set order with the shared
//! version artifact last, so a run over identical input reproduces identical
//! output.

pub mod go;

use std::collections::HashMap;

use tracing::{debug, info};

use crate::config::Config;
use crate::error::{FieldgenError, Result};
use crate::resolve::{resolve_type, type_name};
use crate::schema::{self, FieldSet};

/// One generated output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Output file name, derived from the raw schema name.
    pub name: String,
    pub content: String,
}

/// A record member: generated identifier, target type and wire key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub description: String,
    pub ident: String,
    pub go_type: String,
    /// Original dotted name used as the serialization key. The member
    /// synthesized for a derived group has none.
    pub wire_key: Option<String>,
}

/// A sub-record derived from a `nested`-typed field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedRecord {
    /// The owning nested field's dotted name; prefixed fields are
    /// reassigned here.
    pub key: String,
    /// Generated record identifier.
    pub name: String,
    pub members: Vec<Member>,
}

/// Record model for one field group and its derived sub-records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordModel {
    pub name: String,
    pub description: String,
    pub members: Vec<Member>,
    pub derived: Vec<DerivedRecord>,
    /// Whether any member type requires the `time` import.
    pub imports_time: bool,
}

impl RecordModel {
    /// Build the record model for one group-typed field set.
    pub fn build(set: &FieldSet) -> Result<Self> {
        let mut model = RecordModel {
            name: type_name(&set.name),
            description: set.description.clone(),
            members: Vec::new(),
            derived: Vec::new(),
            imports_time: false,
        };
        // derived-group key -> index into model.derived
        let mut derived_index: HashMap<String, usize> = HashMap::new();

        for field in &set.fields {
            let leading = leading_segment(&field.name);

            if field.field_type == "nested" {
                if derived_index.contains_key(leading) {
                    return Err(FieldgenError::Schema(format!(
                        "nested field {:?} in set {:?} is inside derived group {:?}; \
                         multi-level nesting is not supported",
                        field.name, set.name, leading
                    )));
                }
                let ident = type_name(&field.name);
                model.members.push(Member {
                    description: field.description.clone(),
                    ident: ident.clone(),
                    go_type: format!("[]{}", ident),
                    wire_key: None,
                });
                derived_index.insert(field.name.clone(), model.derived.len());
                model.derived.push(DerivedRecord {
                    key: field.name.clone(),
                    name: ident,
                    members: Vec::new(),
                });
                continue;
            }

            let resolved = resolve_type(&field.name, &field.field_type)?;
            model.imports_time |= resolved.imports_time;

            match derived_index.get(leading) {
                Some(&idx) if field.name.len() > leading.len() => {
                    // Reassign into the derived group, stripping the matched
                    // prefix and its separator.
                    let stripped = &field.name[model.derived[idx].key.len() + 1..];
                    model.derived[idx].members.push(Member {
                        description: field.description.clone(),
                        ident: type_name(stripped),
                        go_type: resolved.go_type,
                        wire_key: Some(stripped.to_string()),
                    });
                }
                _ => {
                    model.members.push(Member {
                        description: field.description.clone(),
                        ident: type_name(&field.name),
                        go_type: resolved.go_type,
                        wire_key: Some(field.name.clone()),
                    });
                }
            }
        }

        debug!(
            record = %model.name,
            members = model.members.len(),
            derived = model.derived.len(),
            "built record model"
        );
        Ok(model)
    }
}

/// Dotted name prefix up to the first `.`, or the whole name.
fn leading_segment(name: &str) -> &str {
    name.split('.').next().unwrap_or(name)
}

/// Run the full codegen pipeline: validate the configuration, load the
/// schema directory, and produce all generated artifacts in order.
pub fn generate(config: &Config) -> Result<Vec<Artifact>> {
    config.validate()?;
    let sets = schema::load_dir(&config.schema_dir)?;
    build_artifacts(&sets, &config.version)
}

/// Produce one artifact per group-typed set plus the shared version
/// artifact, in working-set order.
pub fn build_artifacts(sets: &[FieldSet], version: &str) -> Result<Vec<Artifact>> {
    let mut artifacts = Vec::new();

    for set in sets.iter().filter(|s| s.is_group()) {
        let model = RecordModel::build(set)?;
        artifacts.push(Artifact {
            name: format!("{}.go", set.name),
            content: go::render_record(&model)?,
        });
    }

    artifacts.push(Artifact {
        name: "version.go".to_string(),
        content: go::render_version(version),
    });

    info!(artifacts = artifacts.len(), "generated artifacts");
    Ok(artifacts)
}
