//! Service Layer Error Types
//!
//! This module defines error types for the repair services, separating the
//! fatal configuration path (unknown node type) from the local, recoverable
//! child-creation failure.

use crate::db::DatabaseError;
use thiserror::Error;

/// Repair service errors.
///
/// Every variant here aborts the running pass; failures that must not abort
/// the pass are modeled as [`ChildCreationError`] values instead.
#[derive(Error, Debug)]
pub enum RepairServiceError {
    /// The requested node type is not registered.
    ///
    /// This is a misconfigured request rather than a data problem; callers
    /// are expected to terminate the whole command with a non-zero status.
    #[error("Node type \"{name}\" does not exist")]
    UnknownNodeType { name: String },

    /// Persistence operation failed
    #[error("Database operation failed: {0}")]
    DatabaseError(#[from] DatabaseError),
}

impl RepairServiceError {
    /// Create an unknown node type error
    pub fn unknown_node_type(name: impl Into<String>) -> Self {
        Self::UnknownNodeType { name: name.into() }
    }
}

/// Failure while creating a single missing child node.
///
/// Returned by [`LiveNode::create_child`](crate::services::LiveNode::create_child)
/// instead of being thrown through the pass: the reconciliation loop counts
/// and reports it, then continues with the next slot.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ChildCreationError {
    /// Human-readable failure detail
    pub message: String,
}

impl ChildCreationError {
    /// Create a child creation error with the given detail message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
