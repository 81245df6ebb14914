//! Resolution Context
//!
//! The scope in which records are materialized into addressable nodes:
//! a workspace name plus visibility configuration.

use serde::{Deserialize, Serialize};

/// Workspace and visibility scope for resolving node records.
///
/// Repair passes use [`ResolutionContext::repair`], which shows normally
/// invisible and inaccessible content so the pass sees the complete
/// structural truth rather than an end user's view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionContext {
    /// Name of the workspace records are resolved against
    pub workspace: String,

    /// Show content hidden by visibility settings
    pub invisible_content_shown: bool,

    /// Show content restricted by access settings
    pub inaccessible_content_shown: bool,
}

impl ResolutionContext {
    /// Create a context with end-user visibility (hidden content stays hidden)
    pub fn new(workspace: impl Into<String>) -> Self {
        Self {
            workspace: workspace.into(),
            invisible_content_shown: false,
            inaccessible_content_shown: false,
        }
    }

    /// Create a full-visibility context for structural repair
    pub fn repair(workspace: impl Into<String>) -> Self {
        Self {
            invisible_content_shown: true,
            inaccessible_content_shown: true,
            ..Self::new(workspace)
        }
    }
}
