//! Node Type Registry
//!
//! This module provides the schema registry consumed by the repair services:
//! lookup of a type definition by name, enumeration of all registered types,
//! and computation of a type's subtype closure.
//!
//! ## Architecture
//!
//! - **Effective definitions**: Every definition handed out by the registry
//!   has its supertype configuration merged in: auto-created children
//!   declared by an ancestor appear on the subtype, with the most derived
//!   declaration winning per slot
//! - **Registration order matters**: Enumeration and closure computation walk
//!   types in the order they were registered, so repair output is stable
//! - **Transitive closure**: `subtypes_of` returns the requested type first,
//!   followed by every type that declares it as an ancestor (directly or
//!   transitively)
//!
//! ## Example Usage
//!
//! ```rust
//! use lattice_core::models::NodeTypeDefinition;
//! use lattice_core::services::{InMemoryTypeRegistry, NodeTypeRegistry};
//!
//! let mut registry = InMemoryTypeRegistry::new();
//! registry.register(
//!     NodeTypeDefinition::abstract_type("document").with_child("main", "contentCollection"),
//! );
//! registry.register(NodeTypeDefinition::new("page").with_supertype("document"));
//!
//! // "page" inherits the "main" slot from "document"
//! let page = registry.get("page").unwrap();
//! assert_eq!(page.auto_created_children.len(), 1);
//! ```

use crate::models::{ChildNodeSpec, NodeTypeDefinition};
use std::collections::{HashMap, HashSet};

/// Schema registry consumed by the repair services.
///
/// Implementations must be `Send + Sync`; lookups are pure reads over
/// configured schema data. All returned definitions are effective, i.e.
/// inherited auto-created children are merged in.
pub trait NodeTypeRegistry: Send + Sync {
    /// Look up a type definition by exact name
    fn get(&self, name: &str) -> Option<NodeTypeDefinition>;

    /// All registered type definitions, in registration order
    fn all(&self) -> Vec<NodeTypeDefinition>;

    /// The subtype closure of a type, including the type itself.
    ///
    /// The requested type comes first, followed by its subtypes in
    /// registration order. Returns an empty vector for an unknown name.
    fn subtypes_of(&self, name: &str) -> Vec<NodeTypeDefinition>;
}

/// Registry backed by explicitly registered definitions.
pub struct InMemoryTypeRegistry {
    /// Registration order of type names
    order: Vec<String>,

    /// Declared (unmerged) definitions keyed by type name
    types: HashMap<String, NodeTypeDefinition>,
}

impl InMemoryTypeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            types: HashMap::new(),
        }
    }

    /// Register a type definition as declared.
    ///
    /// Re-registering a name replaces the definition but keeps its original
    /// position in the registration order.
    pub fn register(&mut self, definition: NodeTypeDefinition) {
        if !self.types.contains_key(&definition.name) {
            self.order.push(definition.name.clone());
        }
        self.types.insert(definition.name.clone(), definition);
    }

    /// Number of registered types
    pub fn type_count(&self) -> usize {
        self.order.len()
    }

    /// Whether `definition` declares `ancestor` as a supertype, transitively.
    fn extends(&self, definition: &NodeTypeDefinition, ancestor: &str) -> bool {
        let mut queue: Vec<&str> = definition.supertypes.iter().map(String::as_str).collect();
        let mut visited: HashSet<&str> = HashSet::new();

        while let Some(name) = queue.pop() {
            if name == ancestor {
                return true;
            }
            if !visited.insert(name) {
                continue;
            }
            if let Some(parent) = self.types.get(name) {
                queue.extend(parent.supertypes.iter().map(String::as_str));
            }
        }
        false
    }

    /// Supertype chain of a definition, most ancestral first, self last.
    fn ancestry<'a>(&'a self, definition: &'a NodeTypeDefinition) -> Vec<&'a NodeTypeDefinition> {
        let mut chain = Vec::new();
        let mut visited = HashSet::new();
        self.collect_ancestry(definition, &mut chain, &mut visited);
        chain
    }

    fn collect_ancestry<'a>(
        &'a self,
        definition: &'a NodeTypeDefinition,
        chain: &mut Vec<&'a NodeTypeDefinition>,
        visited: &mut HashSet<&'a str>,
    ) {
        if !visited.insert(definition.name.as_str()) {
            return;
        }
        for supertype in &definition.supertypes {
            if let Some(parent) = self.types.get(supertype) {
                self.collect_ancestry(parent, chain, visited);
            }
        }
        chain.push(definition);
    }

    /// Build the effective definition: inherited auto-created children are
    /// merged in, ancestor slots keep their position, the most derived
    /// declaration per slot wins.
    fn effective(&self, definition: &NodeTypeDefinition) -> NodeTypeDefinition {
        let mut children: Vec<ChildNodeSpec> = Vec::new();
        for ancestor in self.ancestry(definition) {
            for spec in &ancestor.auto_created_children {
                match children.iter_mut().find(|child| child.name == spec.name) {
                    Some(child) => child.node_type = spec.node_type.clone(),
                    None => children.push(spec.clone()),
                }
            }
        }

        NodeTypeDefinition {
            auto_created_children: children,
            ..definition.clone()
        }
    }
}

impl Default for InMemoryTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeTypeRegistry for InMemoryTypeRegistry {
    fn get(&self, name: &str) -> Option<NodeTypeDefinition> {
        self.types.get(name).map(|definition| self.effective(definition))
    }

    fn all(&self) -> Vec<NodeTypeDefinition> {
        self.order
            .iter()
            .filter_map(|name| self.get(name))
            .collect()
    }

    fn subtypes_of(&self, name: &str) -> Vec<NodeTypeDefinition> {
        let Some(base) = self.types.get(name) else {
            return Vec::new();
        };

        let mut closure = vec![self.effective(base)];
        for type_name in &self.order {
            if type_name == name {
                continue;
            }
            if let Some(definition) = self.types.get(type_name) {
                if self.extends(definition, name) {
                    closure.push(self.effective(definition));
                }
            }
        }
        closure
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_registry() -> InMemoryTypeRegistry {
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

    #[test]
    fn test_get_and_all_preserve_registration_order() {
        let registry = sample_registry();
        assert_eq!(registry.type_count(), 4);
        assert!(registry.get("page").is_some());
        assert!(registry.get("missing").is_none());

        let names: Vec<String> = registry.all().into_iter().map(|t| t.name).collect();
        assert_eq!(
            names,
            vec!["document", "page", "landingPage", "contentCollection"]
        );
    }

    #[test]
    fn test_subtypes_of_is_transitive_and_requested_first() {
        let registry = sample_registry();

        let closure: Vec<String> = registry
            .subtypes_of("document")
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(closure, vec!["document", "page", "landingPage"]);

        let closure: Vec<String> = registry
            .subtypes_of("page")
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(closure, vec!["page", "landingPage"]);
    }

    #[test]
    fn test_subtypes_of_leaf_is_only_itself() {
        let registry = sample_registry();
        let closure: Vec<String> = registry
            .subtypes_of("contentCollection")
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(closure, vec!["contentCollection"]);
    }

    #[test]
    fn test_subtypes_of_unknown_type_is_empty() {
        let registry = sample_registry();
        assert!(registry.subtypes_of("missing").is_empty());
    }

    #[test]
    fn test_children_are_inherited_along_the_supertype_chain() {
        let registry = sample_registry();

        let landing_page = registry.get("landingPage").unwrap();
        let slots: Vec<&str> = landing_page
            .auto_created_children
            .iter()
            .map(|spec| spec.name.as_str())
            .collect();
        // Inherited slots first, own slots after
        assert_eq!(slots, vec!["main", "teaser"]);
    }

    #[test]
    fn test_subtype_declaration_overrides_inherited_slot_type() {
        let mut registry = InMemoryTypeRegistry::new();
        registry.register(NodeTypeDefinition::new("page").with_child("main", "contentCollection"));
        registry.register(
            NodeTypeDefinition::new("galleryPage")
                .with_supertype("page")
                .with_child("main", "imageCollection"),
        );

        let gallery = registry.get("galleryPage").unwrap();
        assert_eq!(gallery.auto_created_children.len(), 1);
        assert_eq!(gallery.auto_created_children[0].name, "main");
        assert_eq!(gallery.auto_created_children[0].node_type, "imageCollection");
    }

    #[test]
    fn test_supertype_cycles_do_not_hang() {
        let mut registry = InMemoryTypeRegistry::new();
        registry.register(NodeTypeDefinition::new("a").with_supertype("b"));
        registry.register(NodeTypeDefinition::new("b").with_supertype("a"));

        let closure: Vec<String> = registry.subtypes_of("a").into_iter().map(|t| t.name).collect();
        assert_eq!(closure, vec!["a", "b"]);
        assert!(registry.get("a").is_some());
    }

    #[test]
    fn test_reregistration_replaces_definition_in_place() {
        let mut registry = sample_registry();
        registry.register(NodeTypeDefinition::new("page").with_child("hero", "contentCollection"));

        let names: Vec<String> = registry.all().into_iter().map(|t| t.name).collect();
        assert_eq!(
            names,
            vec!["document", "page", "landingPage", "contentCollection"]
        );

        let slots: Vec<String> = registry
            .get("page")
            .unwrap()
            .auto_created_children
            .into_iter()
            .map(|spec| spec.name)
            .collect();
        assert_eq!(slots, vec!["hero"]);
    }
}
