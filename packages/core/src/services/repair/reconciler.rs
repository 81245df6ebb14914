//! Child Node Reconciliation Engine
//!
//! The per-type reconciliation pass: load the eligible records of a node type
//! (and its subtypes) for one workspace, diff each node's actual children
//! against the type's auto-create contract, and create what is missing.
//!
//! ## Pass semantics
//!
//! - The record list of a type is fetched once at the start of that type's
//!   pass; children created during the pass are not re-scanned
//! - Records that cannot be materialized are skipped without counting
//! - A failed child creation is counted and reported, then the pass moves on
//!   to the next slot; only an unknown requested type aborts the run
//! - Under dry-run nothing is created; the created counter doubles as the
//!   "would create" count

use crate::db::NodeStore;
use crate::models::ResolutionContext;
use crate::services::output::OutputSink;
use crate::services::type_registry::NodeTypeRegistry;
use crate::services::{NodeFactory, RepairServiceError};
use std::sync::Arc;

/// Counters for one reconciliation pass.
///
/// Created fresh per invocation and returned to the caller; never shared
/// between passes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunCounters {
    /// Nodes created, or under dry-run, nodes that would be created
    pub created: usize,

    /// Child creations that failed
    pub errors: usize,
}

impl RunCounters {
    /// Whether the pass found nothing to do
    pub fn is_empty(&self) -> bool {
        self.created == 0 && self.errors == 0
    }
}

/// Reconciles persisted nodes of one type against the type's auto-created
/// child contract.
pub struct ChildNodeReconciler {
    registry: Arc<dyn NodeTypeRegistry>,
    store: Arc<dyn NodeStore>,
    factory: Arc<dyn NodeFactory>,
    output: Arc<dyn OutputSink>,
}

impl ChildNodeReconciler {
    /// Create a reconciler over the given collaborators
    pub fn new(
        registry: Arc<dyn NodeTypeRegistry>,
        store: Arc<dyn NodeStore>,
        factory: Arc<dyn NodeFactory>,
        output: Arc<dyn OutputSink>,
    ) -> Self {
        Self {
            registry,
            store,
            factory,
            output,
        }
    }

    /// Run one reconciliation pass for `type_name` in `workspace`.
    ///
    /// The pass covers the type's whole subtype closure: instances of a
    /// subtype must satisfy the parent's auto-create contract as well as
    /// their own. Returns the pass counters.
    ///
    /// # Errors
    ///
    /// - [`RepairServiceError::UnknownNodeType`] if `type_name` is not
    ///   registered; the error line is emitted before returning and callers
    ///   must abort the whole run
    /// - [`RepairServiceError::DatabaseError`] if a record query fails
    pub async fn reconcile(
        &self,
        type_name: &str,
        workspace: &str,
        dry_run: bool,
    ) -> Result<RunCounters, RepairServiceError> {
        if self.registry.get(type_name).is_none() {
            self.output
                .line(&format!("Node type \"{}\" does not exist", type_name));
            return Err(RepairServiceError::unknown_node_type(type_name));
        }

        tracing::debug!(
            "Reconciling child nodes for node type {} in workspace {} (dry run: {})",
            type_name,
            workspace,
            dry_run
        );

        let mut counters = RunCounters::default();

        for node_type in self.registry.subtypes_of(type_name) {
            let records = self.store.find_by_type(&node_type.name, workspace).await?;

            for record in records {
                let context = ResolutionContext::repair(record.workspace.clone());
                let Some(node) = self.factory.materialize(&record, &context).await else {
                    // Not structurally addressable; expected noise in legacy data
                    continue;
                };

                for spec in &node_type.auto_created_children {
                    if node.child(&spec.name).await?.is_some() {
                        continue;
                    }

                    if dry_run {
                        counters.created += 1;
                        self.output.line(&format!(
                            "Missing child node \"{}\" in \"{}\"",
                            spec.name,
                            node.path()
                        ));
                        continue;
                    }

                    match node.create_child(&spec.name, &spec.node_type).await {
                        Ok(_) => {
                            counters.created += 1;
                            self.output.line(&format!(
                                "Auto created child node \"{}\" in \"{}\"",
                                spec.name,
                                node.path()
                            ));
                        }
                        Err(error) => {
                            counters.errors += 1;
                            self.output.line(&format!(
                                "Could not create child node \"{}\" in \"{}\": {}",
                                spec.name,
                                node.path(),
                                error
                            ));
                        }
                    }
                }
            }
        }

        self.report(&counters, dry_run);
        Ok(counters)
    }

    /// Emit the end-of-pass summary; a pass with nothing to report is silent.
    fn report(&self, counters: &RunCounters, dry_run: bool) {
        if counters.is_empty() {
            return;
        }

        if dry_run {
            self.output.line(&format!(
                "{} missing child nodes need to be created",
                counters.created
            ));
            return;
        }

        self.output
            .line(&format!("Created {} new child nodes", counters.created));
        if counters.errors > 0 {
            self.output.line(&format!(
                "{} errors occurred during child node creation",
                counters.errors
            ));
        }
    }
}
