//! Business Services
//!
//! This module contains the core business logic services:
//!
//! - `RepairService` - Orchestrates structural repair across node types
//! - `ChildNodeReconciler` - Per-type schema-to-instance reconciliation
//! - `NodeTypeRegistry` / `InMemoryTypeRegistry` - Schema registry seam
//! - `NodeFactory` / `StoreNodeFactory` - Record materialization seam
//! - `OutputSink` - Line-oriented result reporting
//!
//! Services coordinate between the schema registry and the persistence
//! layer; all collaborators are injected explicitly through constructors.

pub mod error;
pub mod node_factory;
pub mod output;
pub mod repair;
pub mod type_registry;

pub use error::{ChildCreationError, RepairServiceError};
pub use node_factory::{LiveNode, NodeFactory, StoreNodeFactory};
pub use output::{BufferedOutput, ConsoleOutput, OutputSink};
pub use repair::{
    ChildNodeReconciler, RepairOptions, RepairService, RunCounters, DEFAULT_WORKSPACE,
};
pub use type_registry::{InMemoryTypeRegistry, NodeTypeRegistry};
