//! Shape validation for JSON request bodies.
//!
//! A [`Schema`] is a list of named string fields with presence and length
//! rules. Validation reports every failing field at once, keyed by field
//! name, so a client can fix its whole input in one round trip. Keys the
//! schema does not mention are ignored.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Field name → first failing rule for that field.
pub type FieldErrors = HashMap<String, String>;

/// Key used for errors about the body as a whole.
pub const ROOT_FIELD: &str = "_errors";

#[derive(Debug, Clone)]
pub struct FieldRule {
    name: &'static str,
    required: bool,
    min_len: usize,
    max_bytes: Option<usize>,
}

impl FieldRule {
    pub fn required_string(name: &'static str) -> Self {
        Self {
            name,
            required: true,
            min_len: 1,
            max_bytes: None,
        }
    }

    pub fn optional_string(name: &'static str) -> Self {
        Self {
            name,
            required: false,
            min_len: 0,
            max_bytes: None,
        }
    }

    pub fn max_bytes(mut self, max: usize) -> Self {
        self.max_bytes = Some(max);
        self
    }

    fn check(&self, value: Option<&Value>) -> Result<(), String> {
        let value = match value {
            None if self.required => return Err("Required".to_string()),
            None => return Ok(()),
            Some(v) => v,
        };

        let s = value
            .as_str()
            .ok_or_else(|| format!("Expected string, received {}", type_name(value)))?;

        if s.chars().count() < self.min_len {
            return Err(format!(
                "String must contain at least {} character(s)",
                self.min_len
            ));
        }
        if let Some(max) = self.max_bytes {
            if s.len() > max {
                return Err(format!("String must contain at most {} byte(s)", max));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Schema {
    fields: Vec<FieldRule>,
}

impl Schema {
    pub fn new(fields: Vec<FieldRule>) -> Self {
        Self { fields }
    }

    pub fn validate(&self, input: &Value) -> Result<(), FieldErrors> {
        let Some(object) = input.as_object() else {
            let mut errors = FieldErrors::new();
            errors.insert(
                ROOT_FIELD.to_string(),
                format!("Expected object, received {}", type_name(input)),
            );
            return Err(errors);
        };

        let errors: FieldErrors = self
            .fields
            .iter()
            .filter_map(|rule| {
                rule.check(object.get(rule.name))
                    .err()
                    .map(|msg| (rule.name.to_string(), msg))
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate, then deserialize into the typed request.
    pub fn parse<T: DeserializeOwned>(&self, input: Value) -> Result<T, FieldErrors> {
        self.validate(&input)?;
        serde_json::from_value(input).map_err(|e| {
            let mut errors = FieldErrors::new();
            errors.insert(ROOT_FIELD.to_string(), e.to_string());
            errors
        })
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    fn schema() -> Schema {
        Schema::new(vec![
            FieldRule::required_string("username"),
            FieldRule::required_string("password").max_bytes(8),
            FieldRule::optional_string("name"),
        ])
    }

    #[derive(Debug, Deserialize)]
    struct Input {
        username: String,
        password: String,
        name: Option<String>,
    }

    #[test]
    fn accepts_valid_input_and_ignores_unknown_keys() {
        let input: Input = schema()
            .parse(json!({"username": "alice", "password": "pw1", "extra": 1}))
            .unwrap();
        assert_eq!(input.username, "alice");
        assert_eq!(input.password, "pw1");
        assert_eq!(input.name, None);
    }

    #[test]
    fn reports_every_failing_field() {
        let errors = schema().validate(&json!({"username": ""})).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors["username"].contains("at least 1"));
        assert_eq!(errors["password"], "Required");
    }

    #[test]
    fn rejects_wrong_types() {
        let errors = schema()
            .validate(&json!({"username": 7, "password": "pw", "name": null}))
            .unwrap_err();
        assert_eq!(errors["username"], "Expected string, received number");
        assert_eq!(errors["name"], "Expected string, received null");
        assert!(!errors.contains_key("password"));
    }

    #[test]
    fn enforces_byte_limit() {
        let errors = schema()
            .validate(&json!({"username": "a", "password": "123456789"}))
            .unwrap_err();
        assert!(errors["password"].contains("at most 8"));
    }

    #[test]
    fn non_object_body_is_a_root_error() {
        let errors = schema().validate(&json!(["alice"])).unwrap_err();
        assert_eq!(errors[ROOT_FIELD], "Expected object, received array");
    }
}
