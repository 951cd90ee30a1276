//! Property-based test generators using proptest.
//!
//! Provides strategies for generating resources and statements that keep
//! the invariants the persistence laws rely on.

use proptest::prelude::*;
use tripod_core::Resource;
use tripod_store::Term;

/// Strategy for generating IRIs under `http://example.org/`.
pub fn iri_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,8}(/[a-z0-9]{1,6})?".prop_map(|path| format!("http://example.org/{path}"))
}

/// Strategy for generating object terms, IRIs or literals.
pub fn term_strategy() -> impl Strategy<Value = Term> {
    prop_oneof![
        iri_strategy().prop_map(Term::Iri),
        "[ -~]{0,16}".prop_map(Term::Literal),
    ]
}

/// Strategy for generating blank field values.
pub fn blank_strategy() -> impl Strategy<Value = String> {
    "[ \t]{0,3}"
}

/// Strategy for generating non-empty attribute lists.
pub fn attributes_strategy() -> impl Strategy<Value = Vec<(String, Term)>> {
    prop::collection::vec((iri_strategy(), term_strategy()), 1..8)
}

/// Strategy for generating valid, non-empty resources in `graph`.
pub fn resource_strategy(graph: &'static str) -> impl Strategy<Value = Resource> {
    (iri_strategy(), attributes_strategy()).prop_map(move |(uri, attributes)| {
        let mut resource = Resource::new(uri, graph);
        for (predicate, value) in attributes {
            resource.add(predicate, value);
        }
        resource
    })
}
