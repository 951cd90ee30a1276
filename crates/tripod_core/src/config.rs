//! Repository configuration.

/// Configuration for a [`crate::Repository`].
#[derive(Debug, Clone)]
pub struct Config {
    /// Graph used by `find` and `resource` when no graph is given.
    pub default_graph_uri: Option<String>,

    /// Whether a committed transaction keeps the update text it applied.
    pub retain_applied_query: bool,

    /// Whether to log the update text of every write at debug level.
    pub log_queries: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_graph_uri: None,
            retain_applied_query: true,
            log_queries: false,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default graph.
    #[must_use]
    pub fn default_graph_uri(mut self, graph_uri: impl Into<String>) -> Self {
        self.default_graph_uri = Some(graph_uri.into());
        self
    }

    /// Sets whether committed transactions keep their applied update text.
    #[must_use]
    pub fn retain_applied_query(mut self, value: bool) -> Self {
        self.retain_applied_query = value;
        self
    }

    /// Sets whether update text is logged.
    #[must_use]
    pub fn log_queries(mut self, value: bool) -> Self {
        self.log_queries = value;
        self
    }
}
