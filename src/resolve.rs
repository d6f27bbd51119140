//! Type and name resolution
//!
//! Maps each field's raw storage type and dotted name onto the Go type and
//! identifier used in generated declarations. The raw-type table is closed:
//! anything outside it is a fatal semantic error rather than a guessed
//! fallback, because downstream consumers trust the generated contracts
//! without further validation.

use crate::error::{FieldgenError, Result};

/// Resolved target type for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType {
    /// Go type token, e.g. `string` or `time.Duration`.
    pub go_type: String,
    /// Whether the generated file needs a `time` import for this type.
    pub imports_time: bool,
}

impl ResolvedType {
    fn plain(go_type: &str) -> Self {
        Self {
            go_type: go_type.to_string(),
            imports_time: false,
        }
    }

    fn time(go_type: &str) -> Self {
        Self {
            go_type: go_type.to_string(),
            imports_time: true,
        }
    }
}

/// Resolve the Go type for a field, given its name and raw storage type.
///
/// Exact `(name, raw type)` special cases are matched before the generic
/// table: the generic mapping would yield a scalar type that is semantically
/// wrong for these known duration and multi-valued fields.
pub fn resolve_type(field_name: &str, raw_type: &str) -> Result<ResolvedType> {
    match (field_name, raw_type) {
        ("duration", "long") => return Ok(ResolvedType::time("time.Duration")),
        ("args", "keyword") => return Ok(ResolvedType::plain("[]string")),
        _ => {}
    }

    match raw_type {
        "keyword" | "wildcard" | "version" | "constant_keyword" | "text" | "ip" | "geo_point"
        | "flattened" => Ok(ResolvedType::plain("string")),
        "long" => Ok(ResolvedType::plain("int64")),
        "integer" => Ok(ResolvedType::plain("int32")),
        "float" | "scaled_float" => Ok(ResolvedType::plain("float64")),
        "date" => Ok(ResolvedType::time("time.Time")),
        "boolean" => Ok(ResolvedType::plain("bool")),
        "object" => Ok(ResolvedType::plain("map[string]interface{}")),
        _ => Err(FieldgenError::UnknownType {
            field: field_name.to_string(),
            raw: raw_type.to_string(),
        }),
    }
}

/// Field name separators. `@` is included so that metadata-prefixed names
/// like `@timestamp` lose the marker entirely.
fn is_separator(c: char) -> bool {
    matches!(c, '.' | '_' | '@')
}

/// Closed set of words rendered fully uppercase in identifiers.
fn abbreviation(word: &str) -> Option<String> {
    match word.to_ascii_lowercase().as_str() {
        "id" | "ppid" | "pid" | "pgid" | "mac" | "ip" | "iana" | "uid" | "ecs" | "as" => {
            Some(word.to_ascii_uppercase())
        }
        _ => None,
    }
}

/// Build the generated identifier for a dotted or underscored field name.
///
/// Splits on `.`, `_` and `@`, uppercases known abbreviations, capitalizes
/// the first letter of every other word, and concatenates the result. The
/// tail of a word is left untouched, so already-normalized names pass
/// through unchanged.
pub fn type_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for word in name.split(is_separator).filter(|w| !w.is_empty()) {
        match abbreviation(word) {
            Some(upper) => out.push_str(&upper),
            None => {
                let mut chars = word.chars();
                if let Some(first) = chars.next() {
                    out.extend(first.to_uppercase());
                    out.push_str(chars.as_str());
                }
            }
        }
    }
    out
}
