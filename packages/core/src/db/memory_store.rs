//! In-Memory Node Store
//!
//! A `NodeStore` backend that keeps all records in a `RwLock<HashMap>`.
//! It is the default backend for tests, the dev tools and embedders that
//! bring their own persistence later.

use crate::db::{DatabaseError, NodeStore};
use crate::models::{is_valid_path, NodeRecord};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory `NodeStore` implementation.
///
/// Records are keyed by `(workspace, path)`; the same path may exist once per
/// workspace. All operations take the lock briefly and never await while
/// holding it.
pub struct MemoryStore {
    nodes: RwLock<HashMap<(String, String), NodeRecord>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            nodes: RwLock::new(HashMap::new()),
        }
    }

    /// Total number of records across all workspaces
    pub fn len(&self) -> usize {
        self.nodes.read().map(|nodes| nodes.len()).unwrap_or(0)
    }

    /// Whether the store holds no records
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NodeStore for MemoryStore {
    async fn find_by_type(
        &self,
        node_type: &str,
        workspace: &str,
    ) -> Result<Vec<NodeRecord>, DatabaseError> {
        let nodes = self
            .nodes
            .read()
            .map_err(|_| DatabaseError::query_failed("store lock poisoned"))?;

        let mut records: Vec<NodeRecord> = nodes
            .values()
            .filter(|record| {
                record.node_type == node_type
                    && record.workspace == workspace
                    && record.is_repair_candidate()
            })
            .cloned()
            .collect();

        // Stable ordering keeps repair output deterministic
        records.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(records)
    }

    async fn get(
        &self,
        workspace: &str,
        path: &str,
    ) -> Result<Option<NodeRecord>, DatabaseError> {
        let nodes = self
            .nodes
            .read()
            .map_err(|_| DatabaseError::query_failed("store lock poisoned"))?;

        Ok(nodes.get(&(workspace.to_string(), path.to_string())).cloned())
    }

    async fn insert(&self, record: NodeRecord) -> Result<NodeRecord, DatabaseError> {
        if !is_valid_path(&record.path) {
            return Err(DatabaseError::invalid_path(&record.path));
        }

        let mut nodes = self
            .nodes
            .write()
            .map_err(|_| DatabaseError::query_failed("store lock poisoned"))?;

        let key = (record.workspace.clone(), record.path.clone());
        if nodes.contains_key(&key) {
            return Err(DatabaseError::node_exists(&record.path, &record.workspace));
        }

        nodes.insert(key, record.clone());
        Ok(record)
    }
}
