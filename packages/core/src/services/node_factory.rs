//! Node Materialization
//!
//! This module turns raw [`NodeRecord`]s into live, addressable node handles.
//! A live node can answer the only two questions the repair pass asks: does a
//! child exist at a slot, and can one be created there.
//!
//! Materialization is allowed to fail softly: a record that cannot be
//! resolved inside the given context (orphaned path, wrong workspace) yields
//! `None` and is skipped by the caller. Legacy repositories accumulate such
//! records; they are expected noise, not errors.

use crate::db::{DatabaseError, NodeStore};
use crate::models::{child_path, is_valid_path, NodeRecord, ResolutionContext};
use crate::services::ChildCreationError;
use async_trait::async_trait;
use std::sync::Arc;

/// Resolved, addressable form of a persisted record.
#[async_trait]
pub trait LiveNode: Send + Sync {
    /// Absolute path of this node
    fn path(&self) -> &str;

    /// Look up an existing child by slot name
    async fn child(&self, name: &str) -> Result<Option<NodeRecord>, DatabaseError>;

    /// Create a new child of the given type at the given slot name.
    ///
    /// Failure is returned as a value rather than aborting the caller's
    /// pass; the repair loop counts and reports it.
    async fn create_child(
        &self,
        name: &str,
        node_type: &str,
    ) -> Result<NodeRecord, ChildCreationError>;
}

/// Factory turning records into live nodes within a resolution context.
#[async_trait]
pub trait NodeFactory: Send + Sync {
    /// Materialize a record, or `None` if it is not structurally addressable
    async fn materialize(
        &self,
        record: &NodeRecord,
        context: &ResolutionContext,
    ) -> Option<Box<dyn LiveNode>>;
}

/// Factory producing store-backed live nodes.
pub struct StoreNodeFactory {
    store: Arc<dyn NodeStore>,
}

impl StoreNodeFactory {
    /// Create a factory over the given store
    pub fn new(store: Arc<dyn NodeStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl NodeFactory for StoreNodeFactory {
    async fn materialize(
        &self,
        record: &NodeRecord,
        context: &ResolutionContext,
    ) -> Option<Box<dyn LiveNode>> {
        if !is_valid_path(&record.path) {
            tracing::debug!(
                "Skipping node {}: path {:?} is not addressable",
                record.identifier,
                record.path
            );
            return None;
        }
        if record.workspace != context.workspace {
            tracing::debug!(
                "Skipping node {}: workspace {:?} outside context {:?}",
                record.identifier,
                record.workspace,
                context.workspace
            );
            return None;
        }

        Some(Box::new(StoreNode {
            store: Arc::clone(&self.store),
            record: record.clone(),
            context: context.clone(),
        }))
    }
}

/// Live node handle backed by a `NodeStore`.
struct StoreNode {
    store: Arc<dyn NodeStore>,
    record: NodeRecord,
    context: ResolutionContext,
}

#[async_trait]
impl LiveNode for StoreNode {
    fn path(&self) -> &str {
        &self.record.path
    }

    async fn child(&self, name: &str) -> Result<Option<NodeRecord>, DatabaseError> {
        let path = child_path(&self.record.path, name);
        self.store.get(&self.context.workspace, &path).await
    }

    async fn create_child(
        &self,
        name: &str,
        node_type: &str,
    ) -> Result<NodeRecord, ChildCreationError> {
        let record = NodeRecord::new(
            child_path(&self.record.path, name),
            node_type,
            self.context.workspace.clone(),
        );
        self.store
            .insert(record)
            .await
            .map_err(|error| ChildCreationError::new(error.to_string()))
    }
}
