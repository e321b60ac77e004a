//! Schema Contract — the fixed, versioned shape the generation service must
//! produce.
#![allow(dead_code)]
//!
//! One canonical declaration, two derived uses:
//! 1. `request_schema()` builds the structural constraint attached to every
//!    generation request, so the service emits schema-conformant JSON.
//! 2. The result validator walks the same declaration as its ground truth.
//!
//! Keeping both uses on a single declaration is load-bearing: hand-duplicated
//! field lists in the request and the validator drift apart silently.
//!
//! The contract mirrors `models::resume::GeneratedResume` field-for-field.
//! Changing one without the other is a breaking change — update both together.

use serde_json::{json, Map, Value};

/// Bumped whenever the declared shape changes.
pub const CONTRACT_VERSION: &str = "1";

// ────────────────────────────────────────────────────────────────────────────
// Declaration types
// ────────────────────────────────────────────────────────────────────────────

/// Primitive kind of a declared field.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    Str,
    StrList,
    Record(&'static [FieldSpec]),
    RecordList(&'static [FieldSpec]),
}

impl FieldKind {
    /// Human-readable kind name used in validation errors.
    pub fn expected_name(&self) -> &'static str {
        match self {
            FieldKind::Str => "string",
            FieldKind::StrList => "array of strings",
            FieldKind::Record(_) => "object",
            FieldKind::RecordList(_) => "array of objects",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct SchemaContract {
    pub version: &'static str,
    pub fields: &'static [FieldSpec],
}

// ────────────────────────────────────────────────────────────────────────────
// The resume contract (v1)
// ────────────────────────────────────────────────────────────────────────────

const fn req(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        name,
        kind,
        required: true,
    }
}

const EDUCATION_FIELDS: &[FieldSpec] = &[
    req("degree", FieldKind::Str),
    req("institution", FieldKind::Str),
    req("date", FieldKind::Str),
    req("location", FieldKind::Str),
];

const EXPERIENCE_FIELDS: &[FieldSpec] = &[
    req("title", FieldKind::Str),
    req("company", FieldKind::Str),
    req("date", FieldKind::Str),
    req("location", FieldKind::Str),
    req("description", FieldKind::StrList),
];

const PROJECT_FIELDS: &[FieldSpec] = &[
    req("name", FieldKind::Str),
    req("tech", FieldKind::Str),
    req("date", FieldKind::Str),
    req("description", FieldKind::StrList),
];

const SKILLS_FIELDS: &[FieldSpec] = &[
    req("languages", FieldKind::Str),
    req("frameworks", FieldKind::Str),
    req("tools", FieldKind::Str),
];

const RESUME_FIELDS: &[FieldSpec] = &[
    req("name", FieldKind::Str),
    req("email", FieldKind::Str),
    req("phone", FieldKind::Str),
    req("linkedin", FieldKind::Str),
    req("github", FieldKind::Str),
    req("education", FieldKind::RecordList(EDUCATION_FIELDS)),
    req("experience", FieldKind::RecordList(EXPERIENCE_FIELDS)),
    req("projects", FieldKind::RecordList(PROJECT_FIELDS)),
    req("skills", FieldKind::Record(SKILLS_FIELDS)),
];

/// The one contract every generation request and validation pass uses.
pub const RESUME_CONTRACT: SchemaContract = SchemaContract {
    version: CONTRACT_VERSION,
    fields: RESUME_FIELDS,
};

// ────────────────────────────────────────────────────────────────────────────
// Derived use (a): the service-side structural constraint
// ────────────────────────────────────────────────────────────────────────────

impl SchemaContract {
    /// Renders the declaration in the generation service's schema vocabulary
    /// (OBJECT / ARRAY / STRING with `properties` and `required` arrays).
    pub fn request_schema(&self) -> Value {
        object_schema(self.fields)
    }
}

fn object_schema(fields: &[FieldSpec]) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();
    for field in fields {
        properties.insert(field.name.to_string(), kind_schema(&field.kind));
        if field.required {
            required.push(Value::String(field.name.to_string()));
        }
    }
    json!({
        "type": "OBJECT",
        "properties": properties,
        "required": required,
    })
}

fn kind_schema(kind: &FieldKind) -> Value {
    match kind {
        FieldKind::Str => json!({ "type": "STRING" }),
        FieldKind::StrList => json!({ "type": "ARRAY", "items": { "type": "STRING" } }),
        FieldKind::Record(fields) => object_schema(fields),
        FieldKind::RecordList(fields) => json!({ "type": "ARRAY", "items": object_schema(fields) }),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_declares_all_top_level_fields() {
        let names: Vec<&str> = RESUME_CONTRACT.fields.iter().map(|f| f.name).collect();
        assert_eq!(
            names,
            vec![
                "name",
                "email",
                "phone",
                "linkedin",
                "github",
                "education",
                "experience",
                "projects",
                "skills",
            ]
        );
        assert!(RESUME_CONTRACT.fields.iter().all(|f| f.required));
    }

    #[test]
    fn test_request_schema_top_level_shape() {
        let schema = RESUME_CONTRACT.request_schema();
        assert_eq!(schema["type"], "OBJECT");
        assert_eq!(schema["properties"]["name"]["type"], "STRING");
        assert_eq!(schema["required"].as_array().unwrap().len(), 9);
    }

    #[test]
    fn test_request_schema_nested_education_items() {
        let schema = RESUME_CONTRACT.request_schema();
        let education = &schema["properties"]["education"];
        assert_eq!(education["type"], "ARRAY");
        assert_eq!(education["items"]["type"], "OBJECT");
        assert_eq!(education["items"]["properties"]["degree"]["type"], "STRING");
        let required: Vec<&str> = education["items"]["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(required, vec!["degree", "institution", "date", "location"]);
    }

    #[test]
    fn test_request_schema_description_is_string_array() {
        let schema = RESUME_CONTRACT.request_schema();
        let description = &schema["properties"]["experience"]["items"]["properties"]["description"];
        assert_eq!(description["type"], "ARRAY");
        assert_eq!(description["items"]["type"], "STRING");
    }

    #[test]
    fn test_request_schema_skills_is_fixed_record() {
        let schema = RESUME_CONTRACT.request_schema();
        let skills = &schema["properties"]["skills"];
        assert_eq!(skills["type"], "OBJECT");
        for key in ["languages", "frameworks", "tools"] {
            assert_eq!(skills["properties"][key]["type"], "STRING");
        }
    }
}
