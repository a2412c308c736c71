//! Record type and field coercion.
//!
//! A [`Record`] is a flat JSON object. Its shape is not fixed: matching walks
//! whatever keys the record carries, so two records in the same collection may
//! disagree on their field sets without anything breaking.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;

/// One searchable entity, stored exactly as it was loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Wrap an already-parsed JSON object.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Look up a single field by name.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Iterate over `(field, value)` pairs in load order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields holding an array or object instead of a scalar.
    pub fn non_scalar_fields(&self) -> usize {
        self.0
            .values()
            .filter(|v| matches!(v, Value::Array(_) | Value::Object(_)))
            .count()
    }

    /// Coerce a field value to the text that matching runs against.
    ///
    /// Never fails: `null` becomes the empty string and nested values fall
    /// back to their compact JSON form.
    pub fn field_text(value: &Value) -> Cow<'_, str> {
        match value {
            Value::String(s) => Cow::Borrowed(s.as_str()),
            Value::Number(n) => Cow::Owned(n.to_string()),
            Value::Bool(true) => Cow::Borrowed("true"),
            Value::Bool(false) => Cow::Borrowed("false"),
            Value::Null => Cow::Borrowed(""),
            Value::Array(_) | Value::Object(_) => Cow::Owned(value.to_string()),
        }
    }

    /// True if any field, lower-cased, contains `needle`.
    ///
    /// `needle` must already be lower-cased by the caller.
    pub fn matches(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        self.0
            .values()
            .any(|value| Self::field_text(value).to_lowercase().contains(needle))
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        serde_json::from_value(value).expect("object")
    }

    #[test]
    fn field_text_coerces_scalars() {
        assert_eq!(Record::field_text(&json!("Reno")), "Reno");
        assert_eq!(Record::field_text(&json!(42)), "42");
        assert_eq!(Record::field_text(&json!(3.5)), "3.5");
        assert_eq!(Record::field_text(&json!(true)), "true");
        assert_eq!(Record::field_text(&json!(false)), "false");
        assert_eq!(Record::field_text(&Value::Null), "");
    }

    #[test]
    fn field_text_tolerates_nested_values() {
        assert_eq!(Record::field_text(&json!([1, 2])), "[1,2]");
        assert_eq!(Record::field_text(&json!({"a": 1})), r#"{"a":1}"#);
    }

    #[test]
    fn matches_any_field_case_insensitively() {
        let r = record(json!({"name": "Alice", "city": "RENO", "age": 31}));
        assert!(r.matches("ali"));
        assert!(r.matches("reno"));
        assert!(r.matches("31"));
        assert!(!r.matches("bob"));
    }

    #[test]
    fn null_field_does_not_poison_match() {
        let r = record(json!({"name": null, "city": "Reno"}));
        assert!(r.matches("ren"));
        assert!(!r.matches("null"));
    }

    #[test]
    fn boolean_fields_match_their_text() {
        let r = record(json!({"active": true}));
        assert!(r.matches("tru"));
        assert!(!r.matches("false"));
    }

    #[test]
    fn empty_needle_matches_empty_record() {
        assert!(Record::new(Map::new()).matches(""));
    }

    #[test]
    fn serializes_back_to_loaded_shape() {
        let value = json!({"name": "Bob", "age": 40, "city": "Albany"});
        let r = record(value.clone());
        assert_eq!(serde_json::to_value(&r).unwrap(), value);
        assert_eq!(r.non_scalar_fields(), 0);
    }
}
