//! Structural Repair Services
//!
//! This module contains the repair orchestrator and the per-type
//! reconciliation engine:
//!
//! - `RepairService` - Determines which node types to process and drives one
//!   reconciliation pass per type
//! - `ChildNodeReconciler` - Diffs persisted instances of one type (plus its
//!   subtypes) against the type's auto-created child contract
//!
//! ## Example Usage
//!
//! ```no_run
//! # use lattice_core::db::{MemoryStore, NodeStore};
//! # use lattice_core::services::{
//! #     ConsoleOutput, InMemoryTypeRegistry, RepairOptions, RepairService, StoreNodeFactory,
//! # };
//! # use std::sync::Arc;
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = Arc::new(InMemoryTypeRegistry::new());
//! let store = Arc::new(MemoryStore::new());
//! let factory = Arc::new(StoreNodeFactory::new(Arc::clone(&store) as Arc<dyn NodeStore>));
//! let service = RepairService::new(registry, store, factory, Arc::new(ConsoleOutput));
//!
//! // Check every non-abstract type in the live workspace, without writing
//! let options = RepairOptions {
//!     dry_run: true,
//!     ..RepairOptions::default()
//! };
//! service.run(&options).await?;
//! # Ok(())
//! # }
//! ```

mod reconciler;

pub use reconciler::{ChildNodeReconciler, RunCounters};

use crate::db::NodeStore;
use crate::services::output::OutputSink;
use crate::services::type_registry::NodeTypeRegistry;
use crate::services::{NodeFactory, RepairServiceError};
use std::sync::Arc;

/// Workspace targeted when none is specified
pub const DEFAULT_WORKSPACE: &str = "live";

/// Parameters of one repair run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairOptions {
    /// Restrict the run to one node type (and its subtypes); `None` processes
    /// every non-abstract registered type
    pub node_type: Option<String>,

    /// Target workspace
    pub workspace: String,

    /// Report discrepancies without creating nodes
    pub dry_run: bool,
}

impl Default for RepairOptions {
    fn default() -> Self {
        Self {
            node_type: None,
            workspace: DEFAULT_WORKSPACE.to_string(),
            dry_run: false,
        }
    }
}

/// Orchestrates structural repair across node types.
pub struct RepairService {
    registry: Arc<dyn NodeTypeRegistry>,
    reconciler: ChildNodeReconciler,
    output: Arc<dyn OutputSink>,
}

impl RepairService {
    /// Create a repair service over the given collaborators
    pub fn new(
        registry: Arc<dyn NodeTypeRegistry>,
        store: Arc<dyn NodeStore>,
        factory: Arc<dyn NodeFactory>,
        output: Arc<dyn OutputSink>,
    ) -> Self {
        let reconciler = ChildNodeReconciler::new(
            Arc::clone(&registry),
            store,
            factory,
            Arc::clone(&output),
        );
        Self {
            registry,
            reconciler,
            output,
        }
    }

    /// The underlying per-type reconciliation engine
    pub fn reconciler(&self) -> &ChildNodeReconciler {
        &self.reconciler
    }

    /// Run a repair pass per the given options.
    ///
    /// All results are observable through the output sink; the return value
    /// only signals whether the run completed. An unknown requested type
    /// aborts immediately with [`RepairServiceError::UnknownNodeType`] after
    /// the error line has been emitted; callers are expected to exit
    /// non-zero on it.
    pub async fn run(&self, options: &RepairOptions) -> Result<(), RepairServiceError> {
        match &options.node_type {
            Some(type_name) => {
                self.output.line(&format!(
                    "Checking for missing child nodes in nodes of type \"{}\" ...",
                    type_name
                ));
                self.reconciler
                    .reconcile(type_name, &options.workspace, options.dry_run)
                    .await?;
            }
            None => {
                self.output.line("Checking for missing child nodes ...");
                for node_type in self.registry.all() {
                    if node_type.is_abstract {
                        continue;
                    }
                    self.reconciler
                        .reconcile(&node_type.name, &options.workspace, options.dry_run)
                        .await?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::models::{NodeRecord, NodeTypeDefinition};
    use crate::services::output::BufferedOutput;
    use crate::services::type_registry::InMemoryTypeRegistry;
    use crate::services::StoreNodeFactory;

    async fn service(
        registry: InMemoryTypeRegistry,
        records: Vec<NodeRecord>,
    ) -> (RepairService, Arc<BufferedOutput>, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        for record in records {
            store.insert(record).await.unwrap();
        }
        let output = Arc::new(BufferedOutput::new());
        let service = RepairService::new(
            Arc::new(registry),
            Arc::clone(&store) as Arc<dyn NodeStore>,
            Arc::new(StoreNodeFactory::new(
                Arc::clone(&store) as Arc<dyn NodeStore>
            )),
            Arc::clone(&output) as Arc<dyn OutputSink>,
        );
        (service, output, store)
    }

    fn site_registry() -> InMemoryTypeRegistry {
        let mut registry = InMemoryTypeRegistry::new();
        registry.register(NodeTypeDefinition::abstract_type("document"));
        registry.register(
            NodeTypeDefinition::new("page")
                .with_supertype("document")
                .with_child("main", "contentCollection"),
        );
        registry.register(NodeTypeDefinition::new("contentCollection"));
        registry
    }

    #[tokio::test]
    async fn test_explicit_type_emits_named_header() {
        let (service, output, _store) = service(site_registry(), vec![]).await;

        let options = RepairOptions {
            node_type: Some("page".to_string()),
            ..RepairOptions::default()
        };
        service.run(&options).await.unwrap();

        assert_eq!(
            output.lines(),
            vec!["Checking for missing child nodes in nodes of type \"page\" ..."]
        );
    }

    #[tokio::test]
    async fn test_all_types_skips_abstract_definitions() {
        let records = vec![NodeRecord::new("/sites/home", "page", "live")];
        let (service, output, store) = service(site_registry(), records).await;

        service.run(&RepairOptions::default()).await.unwrap();

        // The abstract "document" type is never reconciled directly, but the
        // page instance is still repaired through the concrete "page" pass.
        assert_eq!(
            output.lines(),
            vec![
                "Checking for missing child nodes ...",
                "Auto created child node \"main\" in \"/sites/home\"",
                "Created 1 new child nodes",
            ]
        );
        assert!(store.get("live", "/sites/home/main").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_unknown_explicit_type_aborts_the_run() {
        let (service, output, store) = service(site_registry(), vec![]).await;

        let options = RepairOptions {
            node_type: Some("missing".to_string()),
            ..RepairOptions::default()
        };
        let result = service.run(&options).await;

        assert!(matches!(
            result,
            Err(RepairServiceError::UnknownNodeType { .. })
        ));
        assert_eq!(
            output.lines(),
            vec![
                "Checking for missing child nodes in nodes of type \"missing\" ...",
                "Node type \"missing\" does not exist",
            ]
        );
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_default_options_target_live_workspace() {
        let options = RepairOptions::default();
        assert_eq!(options.workspace, DEFAULT_WORKSPACE);
        assert!(options.node_type.is_none());
        assert!(!options.dry_run);
    }
}
