//! Database Error Types
//!
//! This module defines error types for persistence operations. More specific
//! repair failures are handled by service-layer error types.

use thiserror::Error;

/// Persistence operation errors
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// A record already exists at the target path
    #[error("A node already exists at \"{path}\" in workspace \"{workspace}\"")]
    NodeExists { path: String, workspace: String },

    /// The given path is not a well-formed absolute node path
    #[error("Invalid node path: \"{path}\"")]
    InvalidPath { path: String },

    /// Query execution error with context
    #[error("Query failed: {0}")]
    QueryFailed(String),
}

impl DatabaseError {
    /// Create a node exists error
    pub fn node_exists(path: impl Into<String>, workspace: impl Into<String>) -> Self {
        Self::NodeExists {
            path: path.into(),
            workspace: workspace.into(),
        }
    }

    /// Create an invalid path error
    pub fn invalid_path(path: impl Into<String>) -> Self {
        Self::InvalidPath { path: path.into() }
    }

    /// Create a query failed error with context
    pub fn query_failed(msg: impl Into<String>) -> Self {
        Self::QueryFailed(msg.into())
    }
}
