//! Record schema validation
//!
//! Every record must carry all required keys with the expected coarse JSON
//! types before a batch is exported. Additional keys are allowed.

use crate::record::Record;
use crate::ValidationError;
use serde_json::Value;

/// Coarse JSON type expected for a schema field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    NullableString,
    Number,
    Array,
    Object,
}

impl FieldType {
    fn matches(&self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::NullableString => value.is_string() || value.is_null(),
            Self::Number => value.is_number(),
            Self::Array => value.is_array(),
            Self::Object => value.is_object(),
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            Self::String => "'string'",
            Self::NullableString => "'string' or 'null'",
            Self::Number => "'number'",
            Self::Array => "'array'",
            Self::Object => "'object'",
        }
    }
}

/// Keys every record must have, with their types
pub const REQUIRED_FIELDS: &[(&str, FieldType)] = &[
    ("origin", FieldType::String),
    ("domain", FieldType::String),
    ("country", FieldType::NullableString),
    ("process_type", FieldType::String),
    ("top_competitors", FieldType::Array),
    ("most_valuable_keywords", FieldType::Array),
    ("most_successful_keywords", FieldType::Array),
    ("newly_ranked_keywords", FieldType::Array),
    ("top_ads", FieldType::Array),
    ("domain_stats", FieldType::Object),
    ("timestamp", FieldType::Number),
    ("run_id", FieldType::String),
];

/// Keys that are type-checked only when present
pub const OPTIONAL_FIELDS: &[(&str, FieldType)] = &[("notes", FieldType::NullableString)];

/// Returns every schema violation of a single record
pub fn record_violations(record: &Value) -> Vec<String> {
    let Some(object) = record.as_object() else {
        return vec!["record is not of type 'object'".to_string()];
    };

    let mut violations = Vec::new();

    for (name, field_type) in REQUIRED_FIELDS {
        match object.get(*name) {
            None => violations.push(format!("'{}' is a required property", name)),
            Some(value) if !field_type.matches(value) => violations.push(format!(
                "'{}' is not of type {}",
                name,
                field_type.describe()
            )),
            Some(_) => {}
        }
    }

    for (name, field_type) in OPTIONAL_FIELDS {
        if let Some(value) = object.get(*name) {
            if !field_type.matches(value) {
                violations.push(format!(
                    "'{}' is not of type {}",
                    name,
                    field_type.describe()
                ));
            }
        }
    }

    violations
}

/// Validates a batch of records given as JSON values
///
/// All violations across all records are collected and logged; the batch
/// fails with a single aggregate error.
pub fn validate_values(records: &[Value]) -> Result<(), ValidationError> {
    let messages: Vec<String> = records
        .iter()
        .enumerate()
        .flat_map(|(idx, record)| {
            record_violations(record)
                .into_iter()
                .map(move |violation| format!("Record #{}: {}", idx, violation))
        })
        .collect();

    if messages.is_empty() {
        return Ok(());
    }

    for message in &messages {
        tracing::error!("Schema validation error: {}", message);
    }

    Err(ValidationError {
        count: messages.len(),
        messages,
    })
}

/// Validates a batch of typed records
pub fn validate_records(records: &[Record]) -> Result<(), ValidationError> {
    let values: Vec<Value> = records
        .iter()
        .map(|record| serde_json::to_value(record).unwrap_or(Value::Null))
        .collect();
    validate_values(&values)
}
