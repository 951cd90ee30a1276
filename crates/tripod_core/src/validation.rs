//! Required-field validation.
//!
//! Validation is a pure function of a resource's current state. Rules are a
//! declarative list of `(field name, accessor)` pairs checked by one generic
//! routine; every blank field gets exactly one [`CANT_BE_BLANK`] message.

use crate::resource::Resource;
use std::collections::BTreeMap;
use std::fmt;

/// Message recorded for a blank required field.
pub const CANT_BE_BLANK: &str = "can't be blank";

/// Reads one field of a resource.
pub type FieldAccessor = fn(&Resource) -> &str;

/// Fields a resource must have before it can be persisted.
pub const REQUIRED_FIELDS: &[(&str, FieldAccessor)] =
    &[("uri", Resource::uri), ("graph_uri", Resource::graph_uri)];

/// Attribute name to ordered error messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Errors {
    messages: BTreeMap<String, Vec<String>>,
}

impl Errors {
    /// Creates an empty errors map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message against a field.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.messages
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Returns the messages for a field, or an empty slice.
    #[must_use]
    pub fn get(&self, field: &str) -> &[String] {
        self.messages
            .get(field)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Checks if no field has errors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Returns the number of fields with errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Iterates over fields and their messages, ordered by field name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.messages
            .iter()
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }

    /// Returns every message prefixed with its field, e.g. `uri can't be blank`.
    #[must_use]
    pub fn full_messages(&self) -> Vec<String> {
        self.iter()
            .flat_map(|(field, messages)| messages.iter().map(move |m| format!("{field} {m}")))
            .collect()
    }
}

impl fmt::Display for Errors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_messages().join(", "))
    }
}

/// Checks if a field value counts as blank.
#[must_use]
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Validates a resource against [`REQUIRED_FIELDS`].
#[must_use]
pub fn validate(resource: &Resource) -> Errors {
    validate_presence(resource, REQUIRED_FIELDS)
}

/// Validates that every listed field of `resource` is present.
#[must_use]
pub fn validate_presence(resource: &Resource, rules: &[(&str, FieldAccessor)]) -> Errors {
    let mut errors = Errors::new();
    for (field, accessor) in rules {
        if is_blank(accessor(resource)) {
            errors.add(*field, CANT_BE_BLANK);
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_resource_has_no_errors() {
        let resource = Resource::new("http://uri", "http://graph");
        assert!(validate(&resource).is_empty());
    }

    #[test]
    fn blank_uri_is_reported_once() {
        let resource = Resource::new("", "http://graph");
        let errors = validate(&resource);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("uri"), [CANT_BE_BLANK.to_string()]);
        assert!(errors.get("graph_uri").is_empty());
    }

    #[test]
    fn whitespace_graph_is_blank() {
        let resource = Resource::new("http://uri", "   ");
        let errors = validate(&resource);
        assert_eq!(errors.get("graph_uri"), ["can't be blank".to_string()]);
    }

    #[test]
    fn both_blank_reports_both() {
        let errors = validate(&Resource::new("", ""));
        assert_eq!(
            errors.full_messages(),
            vec!["graph_uri can't be blank", "uri can't be blank"]
        );
    }

    #[test]
    fn custom_rules_use_same_routine() {
        fn first_name(_: &Resource) -> &str {
            ""
        }
        let rules: &[(&str, FieldAccessor)] = &[("first_name", first_name)];
        let errors = validate_presence(&Resource::new("http://uri", "http://graph"), rules);
        assert_eq!(errors.get("first_name").len(), 1);
    }

    #[test]
    fn display_joins_full_messages() {
        let mut errors = Errors::new();
        errors.add("uri", CANT_BE_BLANK);
        assert_eq!(errors.to_string(), "uri can't be blank");
    }
}
