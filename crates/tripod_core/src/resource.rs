//! Resources: entities backed by the statements sharing their subject.

use crate::validation::{self, Errors};
use tripod_store::{Statement, StatementSet, Term};

/// An entity identified by a URI and stored in one graph.
///
/// A resource's attributes are `(predicate, object)` pairs. A predicate may
/// carry several values. Blank identity fields are allowed while a resource
/// lives in memory; they are rejected by validation when it is saved.
#[derive(Debug, Clone, Default)]
pub struct Resource {
    uri: String,
    graph_uri: String,
    attributes: Vec<(String, Term)>,
    errors: Errors,
}

impl Resource {
    /// Creates an empty resource.
    #[must_use]
    pub fn new(uri: impl Into<String>, graph_uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            graph_uri: graph_uri.into(),
            attributes: Vec::new(),
            errors: Errors::new(),
        }
    }

    /// Returns the resource URI.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Returns the graph the resource is stored in.
    #[must_use]
    pub fn graph_uri(&self) -> &str {
        &self.graph_uri
    }

    /// Sets the resource URI.
    pub fn set_uri(&mut self, uri: impl Into<String>) {
        self.uri = uri.into();
    }

    /// Sets the graph the resource is stored in.
    pub fn set_graph_uri(&mut self, graph_uri: impl Into<String>) {
        self.graph_uri = graph_uri.into();
    }

    /// Returns every value of `predicate`, in insertion order.
    #[must_use]
    pub fn get(&self, predicate: &str) -> Vec<&Term> {
        self.attributes
            .iter()
            .filter(|(p, _)| p == predicate)
            .map(|(_, value)| value)
            .collect()
    }

    /// Replaces every value of `predicate` with a single value.
    pub fn set(&mut self, predicate: impl Into<String>, value: impl Into<Term>) {
        let predicate = predicate.into();
        self.remove(&predicate);
        self.attributes.push((predicate, value.into()));
    }

    /// Appends a value to `predicate`.
    pub fn add(&mut self, predicate: impl Into<String>, value: impl Into<Term>) {
        self.attributes.push((predicate.into(), value.into()));
    }

    /// Removes every value of `predicate`.
    pub fn remove(&mut self, predicate: &str) {
        self.attributes.retain(|(p, _)| p != predicate);
    }

    /// Returns the distinct predicates, in first-seen order.
    #[must_use]
    pub fn predicates(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for (predicate, _) in &self.attributes {
            if !seen.contains(&predicate.as_str()) {
                seen.push(predicate);
            }
        }
        seen
    }

    /// Checks if the resource has no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Converts the attributes into statements about this resource's URI.
    #[must_use]
    pub fn dehydrate(&self) -> StatementSet {
        self.attributes
            .iter()
            .map(|(predicate, value)| Statement::new(&self.uri, predicate, value.clone()))
            .collect()
    }

    /// Replaces the attributes with the statements about this resource.
    ///
    /// Statements about other subjects are ignored.
    pub fn hydrate_from(&mut self, statements: &StatementSet) {
        self.attributes = statements
            .iter()
            .filter(|s| s.subject == self.uri)
            .map(|s| (s.predicate.clone(), s.object.clone()))
            .collect();
    }

    /// Runs validation, keeps the result and reports whether it passed.
    pub fn valid(&mut self) -> bool {
        self.errors = validation::validate(self);
        self.errors.is_empty()
    }

    /// Returns the errors from the last validation run.
    #[must_use]
    pub fn errors(&self) -> &Errors {
        &self.errors
    }
}

impl std::ops::Index<&str> for Resource {
    type Output = Term;

    /// Returns the first value of a predicate.
    ///
    /// # Panics
    ///
    /// Panics if the predicate has no value.
    fn index(&self, predicate: &str) -> &Self::Output {
        match self.attributes.iter().find(|(p, _)| p == predicate) {
            Some((_, value)) => value,
            None => panic!("no value for predicate <{predicate}>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_all_values() {
        let mut r = Resource::new("http://uri", "http://graph");
        r.add("http://pred", "a");
        r.add("http://pred", "b");
        r.set("http://pred", "c");

        let values: Vec<_> = r.get("http://pred").into_iter().map(Term::as_str).collect();
        assert_eq!(values, vec!["c"]);
    }

    #[test]
    fn add_keeps_multiple_values() {
        let mut r = Resource::new("http://uri", "http://graph");
        r.add("http://pred", Term::iri("http://a"));
        r.add("http://pred", Term::iri("http://b"));
        assert_eq!(r.get("http://pred").len(), 2);
        assert_eq!(r.predicates(), vec!["http://pred"]);
    }

    #[test]
    fn dehydrate_uses_resource_uri() {
        let mut r = Resource::new("http://uri", "http://graph");
        r.add("http://pred", Term::iri("http://obj"));

        let statements = r.dehydrate();
        assert_eq!(statements.len(), 1);
        let st = statements.iter().next().unwrap();
        assert_eq!(st.subject, "http://uri");
        assert_eq!(st.predicate, "http://pred");
        assert_eq!(st.object, Term::iri("http://obj"));
    }

    #[test]
    fn hydrate_ignores_other_subjects() {
        let statements: StatementSet = vec![
            Statement::new("http://uri", "http://pred", Term::iri("http://obj")),
            Statement::new("http://other", "http://pred", Term::iri("http://x")),
        ]
        .into_iter()
        .collect();

        let mut r = Resource::new("http://uri", "http://graph");
        r.add("http://stale", "gone");
        r.hydrate_from(&statements);

        assert!(r.get("http://stale").is_empty());
        assert_eq!(r["http://pred"], Term::iri("http://obj"));
        assert_eq!(r.dehydrate(), statements.filter_subject("http://uri"));
    }

    #[test]
    fn valid_replaces_previous_errors() {
        let mut r = Resource::new("", "http://graph");
        assert!(!r.valid());
        assert_eq!(r.errors().get("uri").len(), 1);

        r.set_uri("http://uri");
        assert!(r.valid());
        assert!(r.errors().is_empty());
    }

    #[test]
    #[should_panic(expected = "no value for predicate")]
    fn index_missing_predicate_panics() {
        let r = Resource::new("http://uri", "http://graph");
        let _ = &r["http://missing"];
    }
}
