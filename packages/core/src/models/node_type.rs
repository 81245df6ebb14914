//! Node Type Definitions
//!
//! This module contains the schema-side view of the repository: a node type
//! describes what a class of nodes is allowed (and required) to look like.
//! The part the repair services care about is the ordered list of
//! auto-created children: child nodes a type mandates must exist at a given
//! named slot under every instance.
//!
//! ## Example Definition
//!
//! ```rust
//! use lattice_core::models::NodeTypeDefinition;
//!
//! let page = NodeTypeDefinition::new("page")
//!     .with_supertype("document")
//!     .with_child("main", "contentCollection");
//!
//! assert_eq!(page.auto_created_children.len(), 1);
//! assert!(!page.is_abstract);
//! ```

use serde::{Deserialize, Serialize};

/// A single auto-created child mandated by a node type.
///
/// The `name` is the slot under the parent node (it becomes the last path
/// segment of the child), `node_type` names the required child type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildNodeSpec {
    /// Slot name of the child below its parent
    pub name: String,

    /// Type name of the required child node
    pub node_type: String,
}

impl ChildNodeSpec {
    /// Create a new child specification
    pub fn new(name: impl Into<String>, node_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            node_type: node_type.into(),
        }
    }
}

/// Schema definition for a class of content nodes.
///
/// Definitions form an inheritance lattice via `supertypes`: an instance of a
/// subtype must satisfy the auto-create contract of every ancestor as well as
/// its own. Abstract types cannot be instantiated and are only reconciled as
/// ancestors of concrete types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeTypeDefinition {
    /// Unique type name (e.g. "page", "contentCollection")
    pub name: String,

    /// Abstract types are never instantiated directly
    #[serde(default)]
    pub is_abstract: bool,

    /// Names of the directly declared supertypes
    #[serde(default)]
    pub supertypes: Vec<String>,

    /// Ordered mapping of slot name to required child type
    #[serde(default)]
    pub auto_created_children: Vec<ChildNodeSpec>,
}

impl NodeTypeDefinition {
    /// Create a new concrete node type with no supertypes and no children
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_abstract: false,
            supertypes: Vec::new(),
            auto_created_children: Vec::new(),
        }
    }

    /// Create a new abstract node type
    pub fn abstract_type(name: impl Into<String>) -> Self {
        Self {
            is_abstract: true,
            ..Self::new(name)
        }
    }

    /// Declare a direct supertype
    pub fn with_supertype(mut self, name: impl Into<String>) -> Self {
        self.supertypes.push(name.into());
        self
    }

    /// Declare an auto-created child at the given slot.
    ///
    /// Declaration order is preserved; the repair pass diffs slots in
    /// exactly this order.
    pub fn with_child(mut self, slot: impl Into<String>, node_type: impl Into<String>) -> Self {
        self.auto_created_children
            .push(ChildNodeSpec::new(slot, node_type));
        self
    }

    /// Look up the declared child specification for a slot name
    pub fn auto_created_child(&self, slot: &str) -> Option<&ChildNodeSpec> {
        self.auto_created_children
            .iter()
            .find(|spec| spec.name == slot)
    }
}
