use std::collections::BTreeMap;

use jsonschema::error::ValidationErrorKind;
use serde_json::Value;

use crate::job::JobDescription;

/// Field path -> human readable message. Empty means valid.
pub type FieldErrors = BTreeMap<String, String>;

/// Message reported under `body` when the request carried no job at all.
pub const NO_BODY_MESSAGE: &str = "no request body provided";

const ROOT_KEY: &str = "body";
const SCHEMA: &str = include_str!("schema.json");

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("embedded job schema is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("embedded job schema failed to compile: {0}")]
    Compile(String),
}

/// Compiled job schema, built once and shared by every request.
#[derive(Debug)]
pub struct JobValidator {
    validator: jsonschema::Validator,
}

impl JobValidator {
    pub fn new() -> Result<Self, SchemaError> {
        let schema: Value = serde_json::from_str(SCHEMA)?;
        let validator = jsonschema::options()
            .build(&schema)
            .map_err(|err| SchemaError::Compile(err.to_string()))?;
        Ok(Self { validator })
    }

    /// Check a raw request body against the schema.
    ///
    /// `None` and JSON `null` both count as a missing body.
    pub fn check(&self, body: Option<&Value>) -> FieldErrors {
        let mut errors = FieldErrors::new();
        let body = match body {
            Some(Value::Null) | None => {
                errors.insert(ROOT_KEY.to_string(), NO_BODY_MESSAGE.to_string());
                return errors;
            }
            Some(body) => body,
        };

        for error in self.validator.iter_errors(body) {
            let key = field_key(&error.instance_path.to_string());
            let message = match &error.kind {
                ValidationErrorKind::Required { property } => {
                    format!("requires property {property}")
                }
                _ => error.to_string(),
            };
            // Later errors for the same field replace earlier ones.
            errors.insert(key, message);
        }
        errors
    }

    /// Check and decode in one step.
    pub fn validate(&self, body: Option<&Value>) -> Result<JobDescription, FieldErrors> {
        let errors = self.check(body);
        if !errors.is_empty() {
            return Err(errors);
        }
        let mut body = body.cloned().unwrap_or(Value::Null);
        if let Value::Object(fields) = &mut body {
            for (name, value) in fields.iter_mut() {
                if name != "device" {
                    normalize_integral_floats(value);
                }
            }
        }
        serde_json::from_value(body).map_err(|err| {
            let mut errors = FieldErrors::new();
            errors.insert(ROOT_KEY.to_string(), err.to_string());
            errors
        })
    }
}

/// The schema accepts `1920.0` as an integer; the typed model wants `1920`.
fn normalize_integral_floats(value: &mut Value) {
    match value {
        Value::Number(number) if !number.is_u64() && !number.is_i64() => {
            if let Some(float) = number.as_f64() {
                if float.fract() == 0.0 && (0.0..=u64::MAX as f64).contains(&float) {
                    *value = Value::from(float as u64);
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(normalize_integral_floats),
        Value::Object(fields) => fields.values_mut().for_each(normalize_integral_floats),
        _ => {}
    }
}

/// `/pdf/background` -> `pdf.background`; the root pointer -> `body`.
fn field_key(pointer: &str) -> String {
    let trimmed = pointer.trim_start_matches('/');
    if trimmed.is_empty() {
        return ROOT_KEY.to_string();
    }
    trimmed
        .split('/')
        .map(|segment| segment.replace("~1", "/").replace("~0", "~"))
        .collect::<Vec<_>>()
        .join(".")
}
