use std::fmt;
use std::fmt::{Display, Formatter};

use serde_json::{Map, Value};
use thiserror::Error;

use crate::schema::{FieldKind, FieldValue, Presence, Record, Schema};
use crate::text_utils::{coerce_date_str, date_from_millis};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldErrorKind {
    Missing,
    WrongType { expected: FieldKind, found: &'static str },
    InvalidDate { input: String },
}

impl Display for FieldErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            FieldErrorKind::Missing => write!(f, "required field is missing"),
            FieldErrorKind::WrongType { expected, found } => write!(f, "expected {}, found {}", expected, found),
            FieldErrorKind::InvalidDate { input } => write!(f, "cannot coerce {} to a date", input),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field path, `tags[2]` for list elements
    pub field: String,
    pub kind: FieldErrorKind,
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {collection} record: {}", join_errors(.errors))]
pub struct ValidationError {
    pub collection: String,
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    pub fn kind_of(&self, field: &str) -> Option<&FieldErrorKind> {
        self.errors.iter().find(|e| e.field == field).map(|e| &e.kind)
    }
}

fn join_errors(errors: &[FieldError]) -> String {
    errors.iter().map(|e| e.to_string()).collect::<Vec<String>>().join("; ")
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

impl Schema {
    /// Checks every declared field of the raw record.
    /// All failures are collected, the first one does not stop the others.
    /// Fields unknown to the schema are left out of the result.
    pub fn validate(&self, collection: &str, raw: &Map<String, Value>) -> Result<Record, ValidationError> {
        let mut record = Record::default();
        let mut errors = vec![];

        for descriptor in self.fields() {
            let name = descriptor.name.as_str();

            // An explicit null counts as absent
            let value = match raw.get(name) {
                None | Some(Value::Null) => None,
                Some(value) => Some(value),
            };

            let Some(value) = value else {
                match descriptor.presence {
                    Presence::Required => errors.push(FieldError {
                        field: name.to_string(),
                        kind: FieldErrorKind::Missing,
                    }),
                    Presence::Optional => {}
                    Presence::Default(ref default) => record.insert(name, default.clone()),
                }
                continue;
            };

            match coerce(name, descriptor.kind, value) {
                Ok(coerced) => record.insert(name, coerced),
                Err(mut field_errors) => errors.append(&mut field_errors),
            }
        }

        if errors.is_empty() {
            Ok(record)
        } else {
            Err(ValidationError {
                collection: collection.to_string(),
                errors,
            })
        }
    }
}

fn coerce(name: &str, kind: FieldKind, value: &Value) -> Result<FieldValue, Vec<FieldError>> {
    let wrong_type = |field: String, value: &Value| FieldError {
        field,
        kind: FieldErrorKind::WrongType { expected: kind, found: type_name(value) },
    };

    match (kind, value) {
        (FieldKind::String, Value::String(s)) => Ok(FieldValue::String(s.clone())),
        (FieldKind::Boolean, Value::Bool(b)) => Ok(FieldValue::Boolean(*b)),
        (FieldKind::StringList, Value::Array(items)) => {
            let mut list = Vec::with_capacity(items.len());
            let mut errors = vec![];
            for (i, item) in items.iter().enumerate() {
                match item {
                    Value::String(s) => list.push(s.clone()),
                    other => errors.push(FieldError {
                        field: format!("{}[{}]", name, i),
                        kind: FieldErrorKind::WrongType { expected: FieldKind::String, found: type_name(other) },
                    }),
                }
            }
            if errors.is_empty() {
                Ok(FieldValue::StringList(list))
            } else {
                Err(errors)
            }
        }
        (FieldKind::CoercedDate, value) => coerce_date(value)
            .map(FieldValue::Date)
            .map_err(|_| vec![FieldError {
                field: name.to_string(),
                kind: FieldErrorKind::InvalidDate { input: value.to_string() },
            }]),
        (_, value) => Err(vec![wrong_type(name.to_string(), value)]),
    }
}

fn coerce_date(value: &Value) -> Result<chrono::NaiveDateTime, String> {
    match value {
        Value::String(s) => coerce_date_str(s),
        Value::Number(n) => match n.as_f64() {
            Some(millis) => date_from_millis(millis),
            None => Err(format!("Number {} cannot be represented", n)),
        },
        other => Err(format!("A {} is not a date", type_name(other))),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use super::*;

    fn schema() -> Schema {
        Schema::new()
            .required("title", FieldKind::String)
            .required("publishDate", FieldKind::CoercedDate)
            .optional("tags", FieldKind::StringList)
            .with_default("show", FieldKind::Boolean, FieldValue::Boolean(true))
    }

    fn raw(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test record must be an object"),
        }
    }

    #[test]
    fn test_valid_record() {
        let record = schema().validate("blog", &raw(json!({
            "title": "Hello",
            "publishDate": "2022-04-02",
            "tags": ["rust", "blog"],
            "unknown": 42,
        }))).unwrap();

        assert_eq!(record.get_str("title"), Some("Hello"));
        assert_eq!(record.get_date("publishDate"), NaiveDate::from_ymd_opt(2022, 4, 2).unwrap().and_hms_opt(0, 0, 0));
        assert_eq!(record.get_list("tags").unwrap(), ["rust", "blog"]);
        assert_eq!(record.get_bool("show"), Some(true));
        assert!(record.get("unknown").is_none());
    }

    #[test]
    fn test_all_errors_reported() {
        let err = schema().validate("blog", &raw(json!({
            "publishDate": "not-a-date",
            "tags": ["ok", 3, false],
            "show": "yes",
        }))).unwrap_err();

        assert_eq!(err.collection, "blog");
        assert_eq!(err.kind_of("title"), Some(&FieldErrorKind::Missing));
        assert_eq!(err.kind_of("publishDate"), Some(&FieldErrorKind::InvalidDate { input: "\"not-a-date\"".to_string() }));
        assert_eq!(err.kind_of("tags[1]"), Some(&FieldErrorKind::WrongType { expected: FieldKind::String, found: "number" }));
        assert_eq!(err.kind_of("tags[2]"), Some(&FieldErrorKind::WrongType { expected: FieldKind::String, found: "boolean" }));
        assert_eq!(err.kind_of("show"), Some(&FieldErrorKind::WrongType { expected: FieldKind::Boolean, found: "string" }));
        assert_eq!(err.errors.len(), 5);
    }

    #[test]
    fn test_null_is_missing() {
        let err = schema().validate("blog", &raw(json!({
            "title": null,
            "publishDate": 0,
        }))).unwrap_err();
        assert_eq!(err.errors, vec![FieldError { field: "title".to_string(), kind: FieldErrorKind::Missing }]);

        let record = schema().validate("blog", &raw(json!({
            "title": "Hello",
            "publishDate": 0,
            "show": null,
        }))).unwrap();
        assert_eq!(record.get_bool("show"), Some(true));
    }

    #[test]
    fn test_explicit_false_kept() {
        let record = schema().validate("blog", &raw(json!({
            "title": "Hello",
            "publishDate": "2022-04-02",
            "show": false,
        }))).unwrap();
        assert_eq!(record.get_bool("show"), Some(false));
    }

    #[test]
    fn test_date_coercion_inputs() {
        let expected = NaiveDate::from_ymd_opt(2022, 4, 2).unwrap().and_hms_opt(0, 0, 0);
        for input in [json!("2022-04-02"), json!("2022-04-02T00:00:00Z"), json!(1_648_857_600_000i64), json!(1_648_857_600_000.4)] {
            let record = schema().validate("blog", &raw(json!({
                "title": "Hello",
                "publishDate": input,
            }))).unwrap();
            assert_eq!(record.get_date("publishDate"), expected);
        }
    }

    #[test]
    fn test_date_wrong_shapes_are_invalid_dates() {
        for input in [json!(true), json!([2022, 4, 2]), json!({"year": 2022})] {
            let err = schema().validate("blog", &raw(json!({
                "title": "Hello",
                "publishDate": input,
            }))).unwrap_err();
            assert!(matches!(err.kind_of("publishDate"), Some(FieldErrorKind::InvalidDate { .. })));
        }
    }

    #[test]
    fn test_error_message() {
        let err = schema().validate("blog", &raw(json!({
            "title": 1,
        }))).unwrap_err();
        assert_eq!(err.to_string(), "invalid blog record: title: expected string, found number; publishDate: required field is missing");
    }
}
