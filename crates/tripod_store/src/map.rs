//! Graph-partitioned statement map shared by the bundled stores.

use crate::error::StoreResult;
use crate::mutation::Mutation;
use crate::statement::StatementSet;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Statements keyed by `(graph, subject)`.
///
/// Subjects with no statements are never kept as empty entries.
#[derive(Debug, Clone, Default)]
pub(crate) struct StatementMap {
    entries: HashMap<(String, String), StatementSet>,
}

impl StatementMap {
    pub(crate) fn get(&self, subject: &str, graph: &str) -> StatementSet {
        self.entries
            .get(&(graph.to_string(), subject.to_string()))
            .cloned()
            .unwrap_or_default()
    }

    /// Applies one unit. The caller must have checked it first.
    pub(crate) fn apply(&mut self, mutation: &Mutation) {
        let key = (mutation.graph().to_string(), mutation.subject().to_string());
        match mutation {
            Mutation::Replace { statements, .. } if !statements.is_empty() => {
                self.entries.insert(key, statements.clone());
            }
            Mutation::Replace { .. } | Mutation::Delete { .. } => {
                self.entries.remove(&key);
            }
        }
    }

    /// Checks every unit, then applies them in order.
    pub(crate) fn apply_all(&mut self, batch: &[Mutation]) -> StoreResult<()> {
        for mutation in batch {
            mutation.check()?;
        }
        for mutation in batch {
            self.apply(mutation);
        }
        Ok(())
    }

    pub(crate) fn statement_count(&self) -> usize {
        self.entries.values().map(StatementSet::len).sum()
    }

    pub(crate) fn graphs(&self) -> BTreeSet<String> {
        self.entries.keys().map(|(graph, _)| graph.clone()).collect()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    /// Flattens the map into per-graph statement lists.
    pub(crate) fn to_graphs(&self) -> BTreeMap<String, StatementSet> {
        let mut graphs: BTreeMap<String, StatementSet> = BTreeMap::new();
        for ((graph, _), statements) in &self.entries {
            graphs
                .entry(graph.clone())
                .or_default()
                .extend(statements.iter().cloned());
        }
        graphs
    }

    /// Rebuilds the map from per-graph statement lists.
    pub(crate) fn from_graphs(graphs: BTreeMap<String, StatementSet>) -> Self {
        let mut entries: HashMap<(String, String), StatementSet> = HashMap::new();
        for (graph, statements) in graphs {
            for statement in statements {
                let subject = statement.subject.clone();
                entries
                    .entry((graph.clone(), subject))
                    .or_default()
                    .insert(statement);
            }
        }
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::statement::Statement;

    fn set(subject: &str, value: &str) -> StatementSet {
        let mut set = StatementSet::new();
        set.insert(Statement::new(subject, "http://pred", value));
        set
    }

    #[test]
    fn replace_with_empty_set_removes_entry() {
        let mut map = StatementMap::default();
        map.apply(&Mutation::replace("http://s", "http://g", set("http://s", "1")));
        map.apply(&Mutation::replace("http://s", "http://g", StatementSet::new()));
        assert!(map.get("http://s", "http://g").is_empty());
        assert_eq!(map.statement_count(), 0);
    }

    #[test]
    fn apply_all_is_all_or_nothing() {
        let mut map = StatementMap::default();
        let batch = vec![
            Mutation::replace("http://s", "http://g", set("http://s", "1")),
            Mutation::delete("", "http://g"),
        ];
        assert!(matches!(
            map.apply_all(&batch),
            Err(StoreError::InvalidKey { .. })
        ));
        assert!(map.get("http://s", "http://g").is_empty());
    }

    #[test]
    fn graphs_roundtrip() {
        let mut map = StatementMap::default();
        map.apply(&Mutation::replace("http://a", "http://g1", set("http://a", "1")));
        map.apply(&Mutation::replace("http://b", "http://g2", set("http://b", "2")));

        let rebuilt = StatementMap::from_graphs(map.to_graphs());
        assert_eq!(rebuilt.get("http://a", "http://g1"), set("http://a", "1"));
        assert_eq!(rebuilt.get("http://b", "http://g2"), set("http://b", "2"));
        assert_eq!(rebuilt.graphs().len(), 2);
    }
}
