//! Structural Repair Command
//!
//! Runs the child-node repair pass against a demo in-memory repository.
//! Useful for exercising the repair services end to end without wiring up
//! a real backend.
//!
//! # Usage
//!
//! ```bash
//! # Check every non-abstract type in the live workspace
//! cargo run --bin repair-check
//!
//! # Restrict to one type, simulate only
//! LATTICE_NODE_TYPE=page LATTICE_DRY_RUN=1 cargo run --bin repair-check
//! ```
//!
//! # Configuration
//!
//! - `LATTICE_NODE_TYPE`: restrict the run to one node type (default: all)
//! - `LATTICE_WORKSPACE`: target workspace (default: "live")
//! - `LATTICE_DRY_RUN`: set to `1` or `true` to report without creating
//!
//! Exits non-zero when the requested node type does not exist.

use lattice_core::db::{MemoryStore, NodeStore};
use lattice_core::models::{NodeRecord, NodeTypeDefinition};
use lattice_core::services::{
    ConsoleOutput, InMemoryTypeRegistry, RepairOptions, RepairService, StoreNodeFactory,
    DEFAULT_WORKSPACE,
};
use std::env;
use std::sync::Arc;

/// Node types of the demo site
fn demo_registry() -> InMemoryTypeRegistry {
    let mut registry = InMemoryTypeRegistry::new();
    registry.register(NodeTypeDefinition::abstract_type("document"));
    registry.register(
        NodeTypeDefinition::new("page")
            .with_supertype("document")
            .with_child("main", "contentCollection"),
    );
    registry.register(
        NodeTypeDefinition::new("landingPage")
            .with_supertype("page")
            .with_child("teaser", "contentCollection"),
    );
    registry.register(NodeTypeDefinition::new("contentCollection"));
    registry
}

/// Demo content: a small site where some pages lost their collections
async fn demo_store() -> anyhow::Result<Arc<MemoryStore>> {
    let store = Arc::new(MemoryStore::new());
    let records = vec![
        NodeRecord::new("/sites/home", "page", "live"),
        NodeRecord::new("/sites/home/main", "contentCollection", "live"),
        NodeRecord::new("/sites/about", "page", "live"),
        NodeRecord::new("/sites/campaign", "landingPage", "live"),
        NodeRecord::new("/sites/home", "page", "user-demo"),
    ];
    for record in records {
        store.insert(record).await?;
    }
    Ok(store)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let options = RepairOptions {
        node_type: env::var("LATTICE_NODE_TYPE").ok(),
        workspace: env::var("LATTICE_WORKSPACE")
            .unwrap_or_else(|_| DEFAULT_WORKSPACE.to_string()),
        dry_run: matches!(
            env::var("LATTICE_DRY_RUN").as_deref(),
            Ok("1") | Ok("true")
        ),
    };

    let store = demo_store().await?;
    let service = RepairService::new(
        Arc::new(demo_registry()),
        Arc::clone(&store) as Arc<dyn NodeStore>,
        Arc::new(StoreNodeFactory::new(
            Arc::clone(&store) as Arc<dyn NodeStore>
        )),
        Arc::new(ConsoleOutput),
    );

    if let Err(error) = service.run(&options).await {
        // The user-facing error line has already gone through the sink
        tracing::error!("Repair run aborted: {}", error);
        std::process::exit(1);
    }
    Ok(())
}
