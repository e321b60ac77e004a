//! Result Validator/Normalizer — strict, contract-driven validation of the
//! generation service's raw output.
#![allow(dead_code)]
//!
//! Validation fails closed: a missing required field or a wrong primitive
//! kind rejects the whole output with a `SchemaViolation` naming the field
//! (dotted path, list indices included). Best-effort coercion is deliberately
//! absent — rendering indexes directly into the expected shapes, and shape
//! drift tolerated here would crash far from the root cause.
//!
//! Normalization rules:
//! - absent or null optional fields become explicit empty values (empty
//!   string / empty list / empty record), so no consumer branches on
//!   missing-vs-empty;
//! - fields not declared in the contract are dropped.
//!
//! A validated output is never partial: `validate` returns a complete
//! `GeneratedResume` or an error.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::resume::GeneratedResume;
use crate::schema::{FieldKind, FieldSpec, SchemaContract};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaViolation {
    #[error("missing {field}")]
    Missing { field: String },

    #[error("type mismatch {field}: expected {expected}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
    },
}

/// Validates parsed service output against the contract and decodes it into
/// a `GeneratedResume`.
pub fn validate(raw: &Value, contract: &SchemaContract) -> Result<GeneratedResume, SchemaViolation> {
    let normalized = validate_object(raw, contract.fields, "")?;
    // The contract mirrors GeneratedResume field-for-field (see schema
    // module), so decoding a normalized object cannot fail unless the two
    // have drifted apart.
    serde_json::from_value(Value::Object(normalized)).map_err(|_| SchemaViolation::TypeMismatch {
        field: "$".to_string(),
        expected: "resume object",
    })
}

fn validate_object(
    value: &Value,
    fields: &[FieldSpec],
    path: &str,
) -> Result<Map<String, Value>, SchemaViolation> {
    let obj = value.as_object().ok_or_else(|| SchemaViolation::TypeMismatch {
        field: if path.is_empty() { "$".to_string() } else { path.to_string() },
        expected: "object",
    })?;

    let mut out = Map::new();
    for spec in fields {
        let field_path = join_path(path, spec.name);
        match obj.get(spec.name) {
            None | Some(Value::Null) => {
                if spec.required {
                    return Err(SchemaViolation::Missing { field: field_path });
                }
                out.insert(spec.name.to_string(), empty_value(&spec.kind));
            }
            Some(present) => {
                out.insert(
                    spec.name.to_string(),
                    validate_field(present, &spec.kind, &field_path)?,
                );
            }
        }
    }
    Ok(out)
}

fn validate_field(value: &Value, kind: &FieldKind, path: &str) -> Result<Value, SchemaViolation> {
    match kind {
        FieldKind::Str => value
            .as_str()
            .map(|s| Value::String(s.to_string()))
            .ok_or_else(|| mismatch(path, kind)),
        FieldKind::StrList => {
            let items = value.as_array().ok_or_else(|| mismatch(path, kind))?;
            let mut out = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                let s = item.as_str().ok_or_else(|| SchemaViolation::TypeMismatch {
                    field: format!("{path}[{i}]"),
                    expected: "string",
                })?;
                out.push(Value::String(s.to_string()));
            }
            Ok(Value::Array(out))
        }
        FieldKind::Record(fields) => Ok(Value::Object(validate_object(value, fields, path)?)),
        FieldKind::RecordList(fields) => {
            let items = value.as_array().ok_or_else(|| mismatch(path, kind))?;
            let mut out = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                out.push(Value::Object(validate_object(
                    item,
                    fields,
                    &format!("{path}[{i}]"),
                )?));
            }
            Ok(Value::Array(out))
        }
    }
}

/// The explicit empty value an absent optional field normalizes to.
fn empty_value(kind: &FieldKind) -> Value {
    match kind {
        FieldKind::Str => Value::String(String::new()),
        FieldKind::StrList | FieldKind::RecordList(_) => Value::Array(Vec::new()),
        FieldKind::Record(fields) => Value::Object(
            fields
                .iter()
                .map(|f| (f.name.to_string(), empty_value(&f.kind)))
                .collect(),
        ),
    }
}

fn join_path(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{path}.{name}")
    }
}

fn mismatch(path: &str, kind: &FieldKind) -> SchemaViolation {
    SchemaViolation::TypeMismatch {
        field: path.to_string(),
        expected: kind.expected_name(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::RESUME_CONTRACT;
    use serde_json::json;

    fn full_payload() -> Value {
        json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "phone": "+44 1234",
            "linkedin": "linkedin.com/in/ada",
            "github": "github.com/ada",
            "education": [{
                "degree": "BSc Mathematics",
                "institution": "University of London",
                "date": "1833",
                "location": "London"
            }],
            "experience": [{
                "title": "Analyst",
                "company": "Analytical Engines Ltd",
                "date": "1837-1843",
                "location": "London",
                "description": ["Wrote the first published algorithm", "Reviewed engine designs"]
            }],
            "projects": [{
                "name": "Notes on the Analytical Engine",
                "tech": "Punched cards",
                "date": "1843",
                "description": ["Translated and annotated Menabrea's memoir"]
            }],
            "skills": {
                "languages": "English, French",
                "frameworks": "Analytical Engine",
                "tools": "Pen, paper"
            }
        })
    }

    #[test]
    fn test_validate_accepts_well_formed_payload() {
        let resume = validate(&full_payload(), &RESUME_CONTRACT).unwrap();
        assert_eq!(resume.name, "Ada Lovelace");
        assert_eq!(resume.education.len(), 1);
        assert_eq!(resume.experience[0].description.len(), 2);
        assert_eq!(resume.skills.tools, "Pen, paper");
    }

    #[test]
    fn test_missing_required_top_level_key_names_the_field() {
        let mut payload = full_payload();
        payload.as_object_mut().unwrap().remove("skills");
        let err = validate(&payload, &RESUME_CONTRACT).unwrap_err();
        assert_eq!(
            err,
            SchemaViolation::Missing {
                field: "skills".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_nested_key_reports_dotted_path() {
        let mut payload = full_payload();
        payload["education"][0]
            .as_object_mut()
            .unwrap()
            .remove("degree");
        let err = validate(&payload, &RESUME_CONTRACT).unwrap_err();
        assert_eq!(
            err,
            SchemaViolation::Missing {
                field: "education[0].degree".to_string(),
            }
        );
    }

    #[test]
    fn test_string_where_sequence_required_is_type_mismatch() {
        let mut payload = full_payload();
        payload["experience"][0]["description"] = json!("not a list");
        let err = validate(&payload, &RESUME_CONTRACT).unwrap_err();
        assert_eq!(
            err,
            SchemaViolation::TypeMismatch {
                field: "experience[0].description".to_string(),
                expected: "array of strings",
            }
        );
    }

    #[test]
    fn test_scalar_where_record_required_is_type_mismatch() {
        let mut payload = full_payload();
        payload["skills"] = json!("Rust, Python");
        let err = validate(&payload, &RESUME_CONTRACT).unwrap_err();
        assert_eq!(
            err,
            SchemaViolation::TypeMismatch {
                field: "skills".to_string(),
                expected: "object",
            }
        );
    }

    #[test]
    fn test_null_required_field_is_missing() {
        let mut payload = full_payload();
        payload["github"] = Value::Null;
        let err = validate(&payload, &RESUME_CONTRACT).unwrap_err();
        assert_eq!(
            err,
            SchemaViolation::Missing {
                field: "github".to_string(),
            }
        );
    }

    #[test]
    fn test_undeclared_fields_are_dropped() {
        let mut payload = full_payload();
        payload["hobbies"] = json!(["chess"]);
        payload["education"][0]["gpa"] = json!("4.0");
        let resume = validate(&payload, &RESUME_CONTRACT).unwrap();
        // Round-trip through serde shows only declared fields survive
        let value = serde_json::to_value(&resume).unwrap();
        assert!(value.get("hobbies").is_none());
        assert!(value["education"][0].get("gpa").is_none());
    }

    #[test]
    fn test_empty_sequences_are_allowed() {
        let mut payload = full_payload();
        payload["projects"] = json!([]);
        payload["experience"][0]["description"] = json!([]);
        let resume = validate(&payload, &RESUME_CONTRACT).unwrap();
        assert!(resume.projects.is_empty());
        assert!(resume.experience[0].description.is_empty());
    }

    #[test]
    fn test_non_object_root_is_type_mismatch() {
        let err = validate(&json!(["not", "an", "object"]), &RESUME_CONTRACT).unwrap_err();
        assert_eq!(
            err,
            SchemaViolation::TypeMismatch {
                field: "$".to_string(),
                expected: "object",
            }
        );
    }

    #[test]
    fn test_absent_optional_normalizes_to_empty_value() {
        // The resume contract marks everything required; exercise the
        // optional path with a local declaration.
        const OPTIONAL_FIELDS: &[FieldSpec] = &[
            FieldSpec {
                name: "summary",
                kind: FieldKind::Str,
                required: false,
            },
            FieldSpec {
                name: "tags",
                kind: FieldKind::StrList,
                required: false,
            },
        ];
        let normalized = validate_object(&json!({}), OPTIONAL_FIELDS, "").unwrap();
        assert_eq!(normalized["summary"], json!(""));
        assert_eq!(normalized["tags"], json!([]));
    }
}
