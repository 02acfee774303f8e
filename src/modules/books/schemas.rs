//! Request schemas for the books module and their structural validation.
//!
//! Bodies are checked field by field so a single response can report every
//! violation rather than only the first. Validation is purely structural:
//! required-field presence and primitive types. Numeric strings are not
//! coerced.

use folio_http::error::Violation;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Request model for creating a new book. The store assigns the `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBook {
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub published_date: String,
    pub page_count: u32,
    pub language: String,
}

/// Partial-update payload. Absent fields leave the stored value untouched;
/// `published_date` is not part of the patch surface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateBook {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

const STRING_FIELDS: &[&str] = &["title", "author", "publisher", "published_date", "language"];
const PATCH_STRING_FIELDS: &[&str] = &["title", "author", "publisher", "language"];

/// Validate a raw JSON body against the create schema.
pub fn validate_create(value: &Value) -> Result<CreateBook, Vec<Violation>> {
    let object = require_object(value)?;

    let mut violations = Vec::new();
    for field in STRING_FIELDS {
        check_string(object, field, true, &mut violations);
    }
    check_page_count(object, true, &mut violations);

    if !violations.is_empty() {
        return Err(violations);
    }

    // The checks above guarantee every field is present with the right type.
    serde_json::from_value(value.clone())
        .map_err(|_| vec![Violation::new(["body"], "value is not a valid create payload")])
}

/// Validate a raw JSON body against the partial-update schema.
pub fn validate_update(value: &Value) -> Result<UpdateBook, Vec<Violation>> {
    let object = require_object(value)?;

    let mut violations = Vec::new();
    for field in PATCH_STRING_FIELDS {
        check_string(object, field, false, &mut violations);
    }
    check_page_count(object, false, &mut violations);

    if !violations.is_empty() {
        return Err(violations);
    }

    serde_json::from_value(value.clone())
        .map_err(|_| vec![Violation::new(["body"], "value is not a valid update payload")])
}

fn require_object(value: &Value) -> Result<&Map<String, Value>, Vec<Violation>> {
    value
        .as_object()
        .ok_or_else(|| vec![Violation::new(["body"], "value is not a valid object")])
}

fn check_string(
    object: &Map<String, Value>,
    field: &str,
    required: bool,
    violations: &mut Vec<Violation>,
) {
    match object.get(field) {
        None if required => violations.push(Violation::new(["body", field], "field required")),
        None => {}
        Some(value) if !value.is_string() => {
            violations.push(Violation::new(
                ["body", field],
                "value is not a valid string",
            ));
        }
        Some(_) => {}
    }
}

fn check_page_count(object: &Map<String, Value>, required: bool, violations: &mut Vec<Violation>) {
    let loc = ["body", "page_count"];
    match object.get("page_count") {
        None if required => violations.push(Violation::new(loc, "field required")),
        None => {}
        Some(value) => {
            if let Some(count) = value.as_u64() {
                if u32::try_from(count).is_err() {
                    violations.push(Violation::new(loc, "value is not a valid integer"));
                }
            } else if value.as_i64().is_some() {
                // Integer, but negative
                violations.push(Violation::new(
                    loc,
                    "ensure this value is greater than or equal to 0",
                ));
            } else {
                violations.push(Violation::new(loc, "value is not a valid integer"));
            }
        }
    }
}
