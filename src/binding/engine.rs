//! Field binding: look up each requested field and convert it.
//!
//! One bad field never stops the others.  A field that is missing from
//! the payload gets no entry at all, so the caller's own default stays.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use thiserror::Error;

use super::convert::{convert, ConvertError};
use super::pairs::PlaintextPairs;
use super::target::FieldSpec;
use super::value::Value;

/// A conversion failure tagged with the field it happened on.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("field '{field}': {cause}")]
pub struct ConversionError {
    pub field: String,
    #[source]
    pub cause: ConvertError,
}

/// Outcome for one field that was present in the payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    Value(Value),
    Error(ConversionError),
}

/// Result of binding a payload against a list of fields.
///
/// Entries keep the order of the request.  Each requested field appears
/// at most once, holding either a value or an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    entries: Vec<(String, Binding)>,
}

impl Bindings {
    /// The outcome for `name`, or `None` if it was not in the payload.
    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, b)| b)
    }

    /// The bound value for `name`, if it converted successfully.
    pub fn value(&self, name: &str) -> Option<&Value> {
        match self.get(name)? {
            Binding::Value(v) => Some(v),
            Binding::Error(_) => None,
        }
    }

    /// The conversion error for `name`, if it failed.
    pub fn error(&self, name: &str) -> Option<&ConversionError> {
        match self.get(name)? {
            Binding::Error(e) => Some(e),
            Binding::Value(_) => None,
        }
    }

    pub fn values(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().filter_map(|(n, b)| match b {
            Binding::Value(v) => Some((n.as_str(), v)),
            Binding::Error(_) => None,
        })
    }

    pub fn errors(&self) -> impl Iterator<Item = &ConversionError> {
        self.entries.iter().filter_map(|(_, b)| match b {
            Binding::Error(e) => Some(e),
            Binding::Value(_) => None,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Binding)> {
        self.entries.iter().map(|(n, b)| (n.as_str(), b))
    }

    /// `true` when no field failed to convert.
    pub fn is_valid(&self) -> bool {
        self.errors().next().is_none()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, name: &str, binding: Binding) {
        match self.entries.iter_mut().find(|(n, _)| n.as_str() == name) {
            Some((_, slot)) => *slot = binding,
            None => self.entries.push((name.to_string(), binding)),
        }
    }
}

/// Serializes as `{ "values": { name: value, .. }, "errors": { name: message, .. } }`.
impl Serialize for Bindings {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        struct Values<'a>(&'a Bindings);
        struct Errors<'a>(&'a Bindings);

        impl Serialize for Values<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(None)?;
                for (name, value) in self.0.values() {
                    map.serialize_entry(name, value)?;
                }
                map.end()
            }
        }

        impl Serialize for Errors<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(None)?;
                for err in self.0.errors() {
                    map.serialize_entry(&err.field, &err.cause.to_string())?;
                }
                map.end()
            }
        }

        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("values", &Values(self))?;
        map.serialize_entry("errors", &Errors(self))?;
        map.end()
    }
}

/// Bind every field in `fields` from `pairs`.
pub fn bind(pairs: &PlaintextPairs, fields: &[FieldSpec]) -> Bindings {
    let mut bindings = Bindings::default();

    for field in fields {
        let Some(raw) = pairs.get(&field.name) else {
            tracing::debug!(field = %field.name, "field not present in payload");
            continue;
        };

        match convert(raw, field.target) {
            Ok(value) => bindings.insert(&field.name, Binding::Value(value)),
            Err(cause) => {
                tracing::debug!(
                    field = %field.name,
                    target = %field.target,
                    reason = %cause.reason,
                    "field failed to convert"
                );
                bindings.insert(
                    &field.name,
                    Binding::Error(ConversionError {
                        field: field.name.clone(),
                        cause,
                    }),
                );
            }
        }
    }

    tracing::debug!(
        requested = fields.len(),
        bound = bindings.values().count(),
        failed = bindings.errors().count(),
        "binding pass complete"
    );

    bindings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::pairs::parse_pairs;
    use crate::binding::target::{TargetType, ValueKind};

    fn fields(specs: &[&str]) -> Vec<FieldSpec> {
        specs.iter().map(|s| s.parse().unwrap()).collect()
    }

    #[test]
    fn binds_all_fields() {
        let pairs = parse_pairs("number=42&name=Ada");
        let bound = bind(&pairs, &fields(&["number:int", "name:string"]));

        assert_eq!(bound.value("number"), Some(&Value::I32(42)));
        assert_eq!(bound.value("name"), Some(&Value::String("Ada".into())));
        assert!(bound.is_valid());
    }

    #[test]
    fn one_bad_field_does_not_stop_the_rest() {
        let pairs = parse_pairs("a=1&b=oops&c=3");
        let bound = bind(&pairs, &fields(&["a:int", "b:int", "c:int"]));

        assert_eq!(bound.value("a"), Some(&Value::I32(1)));
        assert_eq!(bound.value("c"), Some(&Value::I32(3)));
        let err = bound.error("b").unwrap();
        assert_eq!(err.field, "b");
        assert_eq!(err.cause.kind, ValueKind::I32);
        assert!(bound.value("b").is_none());
        assert_eq!(bound.errors().count(), 1);
    }

    #[test]
    fn absent_field_has_no_entry() {
        let pairs = parse_pairs("name=Ada");
        let bound = bind(&pairs, &fields(&["number:int", "name:string"]));

        assert!(bound.get("number").is_none());
        assert!(bound.is_valid());
        assert_eq!(bound.len(), 1);
    }

    #[test]
    fn entries_follow_request_order() {
        let pairs = parse_pairs("b=2&a=1");
        let bound = bind(&pairs, &fields(&["a:int", "b:int"]));
        let names: Vec<_> = bound.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn duplicate_request_keeps_one_entry() {
        let pairs = parse_pairs("a=1");
        let specs = vec![
            FieldSpec::new("a", ValueKind::String),
            FieldSpec::new("a", TargetType::of(ValueKind::I32)),
        ];
        let bound = bind(&pairs, &specs);
        assert_eq!(bound.len(), 1);
        assert_eq!(bound.value("a"), Some(&Value::I32(1)));
    }

    #[test]
    fn error_message_names_the_field() {
        let pairs = parse_pairs("when=soon");
        let bound = bind(&pairs, &fields(&["when:datetime"]));
        let msg = bound.error("when").unwrap().to_string();
        assert!(msg.contains("when"));
        assert!(msg.contains("datetime"));
    }
}
