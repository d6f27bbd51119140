//! Go source emission
//!
//! Pure text rendering of record models into Go declarations. Writing the
//! rendered artifacts to disk is the caller's job.

use crate::error::{FieldgenError, Result};
use crate::wrap::wrap_comment;

use super::{DerivedRecord, Member, RecordModel};

const HEADER: &str = "// Code generated by fieldgen. DO NOT EDIT.\n\npackage ecs\n";

/// Render one field group and its derived records as a Go source file.
pub fn render_record(model: &RecordModel) -> Result<String> {
    if model.name.is_empty() {
        return Err(FieldgenError::Render(
            "record model has an empty name".to_string(),
        ));
    }

    let mut out = String::from(HEADER);

    if model.imports_time {
        out.push_str("\nimport (\n\t\"time\"\n)\n");
    }

    out.push('\n');
    for line in wrap_comment("", &model.description) {
        out.push_str(&line);
        out.push('\n');
    }
    push_struct(&mut out, &model.name, &model.members)?;

    for derived in &model.derived {
        out.push('\n');
        push_derived(&mut out, derived)?;
    }

    Ok(out)
}

/// Render the shared artifact holding the version constant.
pub fn render_version(version: &str) -> String {
    format!(
        "{}\n// Version is the schema version from which this code was generated.\nconst Version = \"{}\"\n",
        HEADER, version
    )
}

fn push_derived(out: &mut String, derived: &DerivedRecord) -> Result<()> {
    if derived.name.is_empty() {
        return Err(FieldgenError::Render(format!(
            "derived record for {:?} has an empty name",
            derived.key
        )));
    }
    push_struct(out, &derived.name, &derived.members)
}

fn push_struct(out: &mut String, name: &str, members: &[Member]) -> Result<()> {
    out.push_str(&format!("type {} struct {{\n", name));
    for (i, member) in members.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        push_member(out, member)?;
    }
    out.push_str("}\n");
    Ok(())
}

fn push_member(out: &mut String, member: &Member) -> Result<()> {
    if member.ident.is_empty() || member.go_type.is_empty() {
        return Err(FieldgenError::Render(format!(
            "member {:?} is missing an identifier or type",
            member
        )));
    }

    for line in wrap_comment("\t", &member.description) {
        out.push_str(&line);
        out.push('\n');
    }
    match &member.wire_key {
        Some(key) => out.push_str(&format!(
            "\t{} {} `ecs:\"{}\"`\n",
            member.ident, member.go_type, key
        )),
        None => out.push_str(&format!("\t{} {}\n", member.ident, member.go_type)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(ident: &str, go_type: &str, wire_key: Option<&str>, description: &str) -> Member {
        Member {
            description: description.to_string(),
            ident: ident.to_string(),
            go_type: go_type.to_string(),
            wire_key: wire_key.map(str::to_string),
        }
    }

    #[test]
    fn renders_a_record_with_doc_comments_and_tags() {
        let model = RecordModel {
            name: "Host".to_string(),
            description: "A host is defined as a general computing instance.".to_string(),
            members: vec![
                member("Name", "string", Some("name"), "Name of the host."),
                member("IP", "string", Some("ip"), "Host IP addresses."),
            ],
            derived: Vec::new(),
            imports_time: false,
        };

        let rendered = render_record(&model).unwrap();
        assert!(rendered.starts_with("// Code generated by fieldgen. DO NOT EDIT.\n"));
        assert!(rendered.contains("package ecs\n"));
        assert!(rendered.contains("// A host is defined as a general computing instance.\n"));
        assert!(rendered.contains("type Host struct {\n"));
        assert!(rendered.contains("\t// Name of the host.\n\tName string `ecs:\"name\"`\n"));
        assert!(rendered.contains("\tIP string `ecs:\"ip\"`\n"));
        assert!(!rendered.contains("import"));
    }

    #[test]
    fn time_import_is_emitted_once_when_needed() {
        let model = RecordModel {
            name: "Event".to_string(),
            description: String::new(),
            members: vec![member("Created", "time.Time", Some("created"), "")],
            derived: Vec::new(),
            imports_time: true,
        };
        let rendered = render_record(&model).unwrap();
        assert!(rendered.contains("import (\n\t\"time\"\n)\n"));
    }

    #[test]
    fn derived_records_follow_the_owner_in_the_same_file() {
        let model = RecordModel {
            name: "Process".to_string(),
            description: String::new(),
            members: vec![member("Process", "[]Process", None, "")],
            derived: vec![DerivedRecord {
                key: "process".to_string(),
                name: "Process".to_string(),
                members: vec![member("PID", "int32", Some("pid"), "")],
            }],
            imports_time: false,
        };
        let rendered = render_record(&model).unwrap();

        let owner = rendered.find("type Process struct {").unwrap();
        let derived = rendered.rfind("type Process struct {").unwrap();
        assert!(derived > owner);
        // The synthesized sequence member has no tag.
        assert!(rendered.contains("\tProcess []Process\n"));
        assert!(rendered.contains("\tPID int32 `ecs:\"pid\"`\n"));
    }

    #[test]
    fn version_artifact_carries_the_literal_version() {
        let rendered = render_version("9.9.9");
        assert!(rendered.starts_with("// Code generated by fieldgen. DO NOT EDIT.\n"));
        assert!(rendered.contains("const Version = \"9.9.9\"\n"));
    }

    #[test]
    fn empty_record_name_is_a_render_error() {
        let model = RecordModel {
            name: String::new(),
            description: String::new(),
            members: Vec::new(),
            derived: Vec::new(),
            imports_time: false,
        };
        assert!(matches!(
            render_record(&model).unwrap_err(),
            FieldgenError::Render(_)
        ));
    }
}
