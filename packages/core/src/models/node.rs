//! Node Record Structures
//!
//! This module defines the persisted form of a content node together with the
//! path helpers used across the repository layer.
//!
//! # Architecture
//!
//! - **Path-addressed hierarchy**: A node's place in the tree is its absolute
//!   path (`/sites/home/main`); the last segment is the node name
//! - **Workspace scoped**: The same path can exist once per workspace
//! - **Move shadows**: Moving a node leaves a record behind with `moved_to`
//!   pointing at the successor; shadows are not real content states
//!
//! # Examples
//!
//! ```rust
//! use lattice_core::models::NodeRecord;
//!
//! let page = NodeRecord::new("/sites/home", "page", "live");
//! assert_eq!(page.name(), "home");
//! assert!(page.is_repair_candidate());
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default properties value for serde deserialization (empty object)
fn default_properties() -> serde_json::Value {
    serde_json::json!({})
}

/// Absolute path of the repository root node
pub const ROOT_PATH: &str = "/";

/// Check whether a string is a well-formed absolute node path.
///
/// A valid path is `/` or a `/`-separated sequence of non-empty segments
/// with no trailing slash. Paths are case-sensitive and never relative.
pub fn is_valid_path(path: &str) -> bool {
    if path == ROOT_PATH {
        return true;
    }
    if !path.starts_with('/') || path.ends_with('/') {
        return false;
    }
    path[1..].split('/').all(|segment| !segment.is_empty())
}

/// Build the absolute path of a child node from its parent path and name.
///
/// # Examples
///
/// ```rust
/// use lattice_core::models::child_path;
///
/// assert_eq!(child_path("/sites/home", "main"), "/sites/home/main");
/// assert_eq!(child_path("/", "sites"), "/sites");
/// ```
pub fn child_path(parent: &str, name: &str) -> String {
    if parent == ROOT_PATH {
        format!("/{}", name)
    } else {
        format!("{}/{}", parent, name)
    }
}

/// Persisted form of a content node.
///
/// A record is the raw, storage-level view of a node: it knows where the node
/// lives (`path`, `workspace`), what it is (`node_type`) and its lifecycle
/// state (`moved_to`, `removed`). It carries no resolved hierarchy; turning a
/// record into an addressable node is the job of the
/// [`NodeFactory`](crate::services::NodeFactory).
///
/// # Move shadows and removal
///
/// - `moved_to` set, `removed` false: the record is a pure shadow left behind
///   by a move and is skipped by repository queries
/// - `removed` true: the node is soft-deleted but still queryable, so its
///   existing children can be checked before permanent cleanup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
    /// Stable identifier, independent of the node's position in the tree
    pub identifier: String,

    /// Absolute path of the node (e.g. `/sites/home/main`)
    pub path: String,

    /// Node type name (e.g. "page", "contentCollection")
    pub node_type: String,

    /// Name of the workspace owning this record
    pub workspace: String,

    /// Identifier of the successor record if this is a move shadow
    #[serde(default)]
    pub moved_to: Option<String>,

    /// Soft-delete flag
    #[serde(default)]
    pub removed: bool,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Entity-specific data as a JSON object; structural repair never
    /// reads or writes it
    #[serde(default = "default_properties")]
    pub properties: serde_json::Value,
}

impl NodeRecord {
    /// Create a new record at the given path.
    ///
    /// The record gets a fresh identifier and a current timestamp; it is
    /// neither moved nor removed.
    pub fn new(
        path: impl Into<String>,
        node_type: impl Into<String>,
        workspace: impl Into<String>,
    ) -> Self {
        Self {
            identifier: Uuid::new_v4().to_string(),
            path: path.into(),
            node_type: node_type.into(),
            workspace: workspace.into(),
            moved_to: None,
            removed: false,
            created_at: Utc::now(),
            properties: default_properties(),
        }
    }

    /// The node name, i.e. the last segment of the path.
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or("")
    }

    /// Whether this record takes part in structural repair.
    ///
    /// Pure move shadows (`moved_to` set, not removed) are excluded; removed
    /// records that are not move shadows are still candidates so that their
    /// existing children get checked before permanent cleanup.
    pub fn is_repair_candidate(&self) -> bool {
        self.moved_to.is_none() || self.removed
    }
}
