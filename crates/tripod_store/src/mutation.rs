//! Store mutation units.

use crate::error::{StoreError, StoreResult};
use crate::statement::StatementSet;
use std::fmt::Write as _;

/// A single unit of store mutation, scoped to one subject in one graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Replace every statement of `subject` in `graph` with `statements`.
    Replace {
        /// Subject IRI.
        subject: String,
        /// Graph IRI.
        graph: String,
        /// The complete new statement set for the subject.
        statements: StatementSet,
    },
    /// Remove every statement of `subject` in `graph`.
    Delete {
        /// Subject IRI.
        subject: String,
        /// Graph IRI.
        graph: String,
    },
}

impl Mutation {
    /// Creates a replace mutation.
    #[must_use]
    pub fn replace(
        subject: impl Into<String>,
        graph: impl Into<String>,
        statements: StatementSet,
    ) -> Self {
        Self::Replace {
            subject: subject.into(),
            graph: graph.into(),
            statements,
        }
    }

    /// Creates a delete mutation.
    #[must_use]
    pub fn delete(subject: impl Into<String>, graph: impl Into<String>) -> Self {
        Self::Delete {
            subject: subject.into(),
            graph: graph.into(),
        }
    }

    /// Returns the subject this mutation addresses.
    #[must_use]
    pub fn subject(&self) -> &str {
        match self {
            Self::Replace { subject, .. } | Self::Delete { subject, .. } => subject,
        }
    }

    /// Returns the graph this mutation addresses.
    #[must_use]
    pub fn graph(&self) -> &str {
        match self {
            Self::Replace { graph, .. } | Self::Delete { graph, .. } => graph,
        }
    }

    /// Checks that the mutation can be applied.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidKey`] for a blank subject or graph, and
    /// [`StoreError::SubjectMismatch`] when a replacement carries statements
    /// about another subject.
    pub fn check(&self) -> StoreResult<()> {
        let (subject, graph) = (self.subject(), self.graph());
        if subject.trim().is_empty() || graph.trim().is_empty() {
            return Err(StoreError::invalid_key(subject, graph));
        }

        if let Self::Replace { statements, .. } = self {
            if let Some(other) = statements.iter().find(|s| s.subject != subject) {
                return Err(StoreError::SubjectMismatch {
                    expected: subject.to_string(),
                    found: other.subject.clone(),
                });
            }
        }

        Ok(())
    }

    /// Renders this mutation as SPARQL update text.
    #[must_use]
    pub fn to_update_query(&self) -> String {
        let (subject, graph) = (self.subject(), self.graph());
        let mut query = format!(
            "DELETE {{ GRAPH <{graph}> {{ <{subject}> ?p ?o }} }} \
             WHERE {{ GRAPH <{graph}> {{ <{subject}> ?p ?o }} }}"
        );

        if let Self::Replace { statements, .. } = self {
            if !statements.is_empty() {
                let _ = write!(query, ";\nINSERT DATA {{ GRAPH <{graph}> {{ ");
                for statement in statements {
                    let _ = write!(query, "{statement} ");
                }
                query.push_str("} }");
            }
        }

        query
    }
}

/// Renders an ordered batch as one SPARQL update request.
///
/// An empty batch renders as an empty string.
#[must_use]
pub fn render_update(batch: &[Mutation]) -> String {
    batch
        .iter()
        .map(Mutation::to_update_query)
        .collect::<Vec<_>>()
        .join(";\n")
}
