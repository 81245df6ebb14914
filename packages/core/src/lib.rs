//! Lattice Core Business Logic Layer
//!
//! This crate provides the node type schema model, the persistence seams and
//! the structural repair services for the Lattice content repository.
//!
//! # Architecture
//!
//! - **Schema-driven structure**: Node type definitions mandate auto-created
//!   child nodes; instances are reconciled against their type's contract
//! - **Workspace partitioning**: Every persisted record belongs to exactly one
//!   named workspace (e.g. "live" vs. a draft line)
//! - **Narrow persistence seams**: The repair services only ever talk to the
//!   `NodeStore`, `NodeFactory` and `OutputSink` traits, never to a concrete
//!   backend
//!
//! # Modules
//!
//! - [`models`] - Data structures (NodeRecord, NodeTypeDefinition, etc.)
//! - [`services`] - Business services (RepairService, ChildNodeReconciler, etc.)
//! - [`db`] - Persistence layer abstraction and the in-memory backend

pub mod db;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use db::*;
pub use models::*;
pub use services::*;
