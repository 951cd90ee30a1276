//! Statement model: terms, statements and statement sets.

use serde::{Deserialize, Serialize};
use std::collections::btree_set;
use std::collections::BTreeSet;
use std::fmt;

/// The object position of a statement.
///
/// Subjects and predicates are always IRIs and are kept as plain strings;
/// objects can be either another IRI or a literal value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Term {
    /// A reference to another resource.
    Iri(String),
    /// A plain literal value.
    Literal(String),
}

impl Term {
    /// Creates an IRI term.
    #[must_use]
    pub fn iri(value: impl Into<String>) -> Self {
        Self::Iri(value.into())
    }

    /// Creates a literal term.
    #[must_use]
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal(value.into())
    }

    /// Returns the bare lexical value, without any IRI or literal markup.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Iri(value) | Self::Literal(value) => value,
        }
    }

    /// Checks if this term is an IRI.
    #[must_use]
    pub fn is_iri(&self) -> bool {
        matches!(self, Self::Iri(_))
    }

    /// Checks if this term is a literal.
    #[must_use]
    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iri(iri) => write!(f, "<{iri}>"),
            Self::Literal(value) => {
                f.write_str("\"")?;
                for c in value.chars() {
                    match c {
                        '"' => f.write_str("\\\"")?,
                        '\\' => f.write_str("\\\\")?,
                        '\n' => f.write_str("\\n")?,
                        '\r' => f.write_str("\\r")?,
                        '\t' => f.write_str("\\t")?,
                        c => write!(f, "{c}")?,
                    }
                }
                f.write_str("\"")
            }
        }
    }
}

impl From<&str> for Term {
    fn from(value: &str) -> Self {
        Self::literal(value)
    }
}

impl From<String> for Term {
    fn from(value: String) -> Self {
        Self::Literal(value)
    }
}

/// A subject–predicate–object fact.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Statement {
    /// Subject IRI.
    pub subject: String,
    /// Predicate IRI.
    pub predicate: String,
    /// Object term.
    pub object: Term,
}

impl Statement {
    /// Creates a new statement.
    #[must_use]
    pub fn new(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<Term>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}> <{}> {} .", self.subject, self.predicate, self.object)
    }
}

/// An order-irrelevant set of statements.
///
/// Two sets are equal when they hold the same statements, regardless of the
/// order they were inserted in. Inserting an identical statement twice keeps
/// a single copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatementSet(BTreeSet<Statement>);

impl StatementSet {
    /// Creates an empty statement set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a statement. Returns `false` if it was already present.
    pub fn insert(&mut self, statement: Statement) -> bool {
        self.0.insert(statement)
    }

    /// Checks if the set contains a statement.
    #[must_use]
    pub fn contains(&self, statement: &Statement) -> bool {
        self.0.contains(statement)
    }

    /// Returns the number of statements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Checks if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the statements in a stable order.
    pub fn iter(&self) -> btree_set::Iter<'_, Statement> {
        self.0.iter()
    }

    /// Returns the distinct subjects in this set.
    #[must_use]
    pub fn subjects(&self) -> BTreeSet<&str> {
        self.0.iter().map(|s| s.subject.as_str()).collect()
    }

    /// Returns every object stated for `predicate`.
    pub fn objects_for<'a>(&'a self, predicate: &'a str) -> impl Iterator<Item = &'a Term> + 'a {
        self.0
            .iter()
            .filter(move |s| s.predicate == predicate)
            .map(|s| &s.object)
    }

    /// Returns the statements about `subject` only.
    #[must_use]
    pub fn filter_subject(&self, subject: &str) -> Self {
        self.0
            .iter()
            .filter(|s| s.subject == subject)
            .cloned()
            .collect()
    }

    /// Renders the set as N-Triples lines, one statement per line.
    #[must_use]
    pub fn to_ntriples(&self) -> String {
        let mut out = String::new();
        for statement in &self.0 {
            out.push_str(&statement.to_string());
            out.push('\n');
        }
        out
    }
}

impl FromIterator<Statement> for StatementSet {
    fn from_iter<I: IntoIterator<Item = Statement>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Statement> for StatementSet {
    fn extend<I: IntoIterator<Item = Statement>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for StatementSet {
    type Item = Statement;
    type IntoIter = btree_set::IntoIter<Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a StatementSet {
    type Item = &'a Statement;
    type IntoIter = btree_set::Iter<'a, Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
