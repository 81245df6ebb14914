//! NodeStore Trait - Persistence Abstraction Layer
//!
//! This module defines the `NodeStore` trait that abstracts record persistence
//! for the repair services. The trait enables multiple backend implementations
//! without changing business logic in the reconciliation engine.
//!
//! # Design Decisions
//!
//! 1. **Async-First**: All methods are async so that both embedded and
//!    network backends fit behind the same seam
//! 2. **Eligibility in the query**: `find_by_type` applies the repair
//!    eligibility predicate (pure move shadows excluded, removed records
//!    included) so callers never see shadow records
//! 3. **Whole result sets**: No pagination or streaming; all matching records
//!    for a type are loaded before processing begins

use crate::db::DatabaseError;
use crate::models::NodeRecord;
use async_trait::async_trait;

/// Abstraction layer for node record persistence.
///
/// Implementations must be `Send + Sync` so they can be shared across async
/// tasks behind an `Arc`.
#[async_trait]
pub trait NodeStore: Send + Sync {
    /// Find all repair-eligible records of an exact type in a workspace.
    ///
    /// The eligibility rule is the one encoded by
    /// [`NodeRecord::is_repair_candidate`]: records that are pure move
    /// shadows are excluded, records merely marked removed are included.
    /// Results are returned in stable path order.
    async fn find_by_type(
        &self,
        node_type: &str,
        workspace: &str,
    ) -> Result<Vec<NodeRecord>, DatabaseError>;

    /// Fetch the record at an exact path in a workspace, if any
    async fn get(&self, workspace: &str, path: &str)
        -> Result<Option<NodeRecord>, DatabaseError>;

    /// Insert a new record.
    ///
    /// # Errors
    ///
    /// - [`DatabaseError::InvalidPath`] if the record path is malformed
    /// - [`DatabaseError::NodeExists`] if a record already occupies the path
    async fn insert(&self, record: NodeRecord) -> Result<NodeRecord, DatabaseError>;
}
