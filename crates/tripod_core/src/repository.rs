//! Persistence engine: validate, translate and write resources.

use crate::config::Config;
use crate::error::{CoreError, CoreResult};
use crate::resource::Resource;
use crate::transaction::{CommitReceipt, Transaction};
use crate::validation::is_blank;
use std::sync::Arc;
use tracing::{debug, warn};
use tripod_store::{Mutation, StatementSet, StatementStore};

/// Where a write goes.
#[derive(Debug, Default)]
pub enum WriteTarget<'a> {
    /// Apply to the store right away.
    #[default]
    Immediate,
    /// Append to a transaction; the store is untouched until it commits.
    Buffered(&'a mut Transaction),
}

impl<'a> From<&'a mut Transaction> for WriteTarget<'a> {
    fn from(txn: &'a mut Transaction) -> Self {
        Self::Buffered(txn)
    }
}

/// Saves, destroys, finds and hydrates resources against one store.
///
/// Every write is a single mutation unit. With [`WriteTarget::Immediate`]
/// the unit is applied straight away; with [`WriteTarget::Buffered`] it is
/// appended to a transaction and applied by [`Repository::commit`]. A direct
/// save is therefore indistinguishable from a one-resource transaction that
/// commits at once.
pub struct Repository {
    store: Arc<dyn StatementStore>,
    config: Config,
}

impl Repository {
    /// Creates a repository with the default configuration.
    pub fn new(store: Arc<dyn StatementStore>) -> Self {
        Self::with_config(store, Config::default())
    }

    /// Creates a repository with the given configuration.
    pub fn with_config(store: Arc<dyn StatementStore>, config: Config) -> Self {
        Self { store, config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn StatementStore> {
        &self.store
    }

    /// Creates an unsaved resource in the default graph.
    ///
    /// Without a configured default graph the resource's graph is blank and
    /// it will not validate until one is set.
    #[must_use]
    pub fn resource(&self, uri: impl Into<String>) -> Resource {
        Resource::new(uri, self.config.default_graph_uri.clone().unwrap_or_default())
    }

    /// Begins a new transaction.
    #[must_use]
    pub fn begin(&self) -> Transaction {
        Transaction::new()
    }

    /// Validates and writes a resource.
    ///
    /// Returns `Ok(false)` if validation failed; the resource's errors are
    /// then filled in and neither the store nor the transaction is touched.
    ///
    /// # Errors
    ///
    /// Returns a store error from an immediate write, or
    /// [`CoreError::TransactionClosed`] if the target transaction is no
    /// longer open.
    pub fn save(&self, resource: &mut Resource, target: WriteTarget<'_>) -> CoreResult<bool> {
        if !resource.valid() {
            warn!(
                uri = resource.uri(),
                graph = resource.graph_uri(),
                errors = %resource.errors(),
                "save rejected by validation"
            );
            return Ok(false);
        }

        let mutation = Mutation::replace(resource.uri(), resource.graph_uri(), resource.dehydrate());
        self.write(mutation, target)?;
        Ok(true)
    }

    /// Like [`Repository::save`], but a validation failure is an error.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ValidationFailed`] carrying the resource's
    /// errors, plus everything [`Repository::save`] can return.
    pub fn save_strict(&self, resource: &mut Resource, target: WriteTarget<'_>) -> CoreResult<()> {
        if self.save(resource, target)? {
            Ok(())
        } else {
            Err(CoreError::validation_failed(resource.errors().clone()))
        }
    }

    /// Removes every statement of a resource from its graph.
    ///
    /// There is no validation gate, but a resource with a blank uri or
    /// graph has no addressable subject and always yields `Ok(false)`.
    /// The in-memory resource is left as it was.
    ///
    /// # Errors
    ///
    /// Returns a store error from an immediate write, or
    /// [`CoreError::TransactionClosed`] if the target transaction is no
    /// longer open.
    pub fn destroy(&self, resource: &Resource, target: WriteTarget<'_>) -> CoreResult<bool> {
        if is_blank(resource.uri()) || is_blank(resource.graph_uri()) {
            warn!(
                uri = resource.uri(),
                graph = resource.graph_uri(),
                "destroy without addressable subject"
            );
            return Ok(false);
        }

        self.write(Mutation::delete(resource.uri(), resource.graph_uri()), target)?;
        Ok(true)
    }

    /// Loads a resource from the default graph's committed state.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ResourceNotFound`] if the store holds nothing
    /// for `uri`, and [`CoreError::InvalidOperation`] if no default graph is
    /// configured.
    pub fn find(&self, uri: &str) -> CoreResult<Resource> {
        let graph = self
            .config
            .default_graph_uri
            .as_deref()
            .ok_or_else(|| CoreError::invalid_operation("no default graph configured"))?;
        self.find_in(uri, graph)
    }

    /// Loads a resource from the committed state of `graph`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ResourceNotFound`] if the store holds nothing
    /// for `uri` in `graph`, or a store error.
    pub fn find_in(&self, uri: &str, graph: &str) -> CoreResult<Resource> {
        if is_blank(uri) || is_blank(graph) {
            return Err(CoreError::resource_not_found(uri, graph));
        }

        let mut resource = Resource::new(uri, graph);
        self.hydrate(&mut resource, None)?;
        if resource.is_empty() {
            return Err(CoreError::resource_not_found(uri, graph));
        }
        Ok(resource)
    }

    /// Populates a resource's attributes.
    ///
    /// Supplied statements are loaded directly. Without them the store is
    /// queried for the resource's `(uri, graph_uri)`; an empty result leaves
    /// the resource without attributes.
    ///
    /// # Errors
    ///
    /// Returns a store error if the query fails.
    pub fn hydrate(
        &self,
        resource: &mut Resource,
        statements: Option<&StatementSet>,
    ) -> CoreResult<()> {
        match statements {
            Some(statements) => resource.hydrate_from(statements),
            None => {
                let fetched = self.store.query(resource.uri(), resource.graph_uri())?;
                debug!(
                    uri = resource.uri(),
                    graph = resource.graph_uri(),
                    statements = fetched.len(),
                    "hydrated from store"
                );
                resource.hydrate_from(&fetched);
            }
        }
        Ok(())
    }

    /// Checks if the committed state holds any statement for `uri` in `graph`.
    ///
    /// # Errors
    ///
    /// Returns a store error if the query fails.
    pub fn exists(&self, uri: &str, graph: &str) -> CoreResult<bool> {
        Ok(!self.store.query(uri, graph)?.is_empty())
    }

    /// Applies every buffered mutation of `txn` to the store atomically.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::TransactionClosed`] if `txn` is not open, or the
    /// store error unchanged; the transaction then stays open with its
    /// buffer intact.
    pub fn commit(&self, txn: &mut Transaction) -> CoreResult<CommitReceipt> {
        if self.config.log_queries && !txn.is_empty() {
            debug!(txn = %txn.id(), query = %txn.query(), "committing update");
        }
        txn.commit_to(self.store.as_ref(), self.config.retain_applied_query)
    }

    /// Discards every buffered mutation of `txn`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::TransactionClosed`] if `txn` is not open.
    pub fn abort(&self, txn: &mut Transaction) -> CoreResult<()> {
        txn.abort()
    }

    fn write(&self, mutation: Mutation, target: WriteTarget<'_>) -> CoreResult<()> {
        match target {
            WriteTarget::Buffered(txn) => txn.push(mutation),
            WriteTarget::Immediate => {
                if self.config.log_queries {
                    debug!(query = %mutation.to_update_query(), "applying update");
                }
                match &mutation {
                    Mutation::Replace {
                        subject,
                        graph,
                        statements,
                    } => self.store.insert_or_replace(subject, graph, statements)?,
                    Mutation::Delete { subject, graph } => self.store.delete(subject, graph)?,
                }
                debug!(
                    subject = mutation.subject(),
                    graph = mutation.graph(),
                    "applied mutation"
                );
                Ok(())
            }
        }
    }
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
