//! pwmigrate-ast: syntax facility for the pwmigrate engine
//!
//! This crate wraps Tree-sitter so the migration engine can treat parsing,
//! structural queries and text edits as a small, stable interface:
//!
//! - **Parse**: `AdapterRegistry::parse` turns source text into a `SourceTree`
//! - **Query**: node helpers for field access, named children, descendant
//!   search with a predicate and ancestor walks
//! - **Edit**: `EditSet` collects non-overlapping byte-range replacements and
//!   commits them against the original text in one pass
//!
//! The engine never mutates a tree. Every rewrite is a ranged edit keyed on the
//! original text, so node ranges stay valid for the whole traversal.
//!
//! # Example
//!
//! ```rust,ignore
//! use pwmigrate_ast::{AdapterRegistry, EditSet, LanguageId};
//!
//! let registry = AdapterRegistry::new();
//! let tree = registry.parse("cy.visit('/')", LanguageId::TypeScript)?;
//! let mut edits = EditSet::new();
//! edits.replace(&tree.root_node(), "await page.goto('/')")?;
//! let out = edits.commit(tree.source())?;
//! ```

pub mod adapters;
pub mod edit;
pub mod error;
pub mod ir;
mod registry;
pub mod tree;

pub use adapters::{
    ancestors, find_all, named_args, named_children, node_text, LanguageAdapter,
};
pub use edit::{Edit, EditSet};
pub use error::{AstError, Result};
pub use ir::LanguageId;
pub use registry::AdapterRegistry;
pub use tree::SourceTree;

/// Re-exported so callers can name node types without a direct dependency
pub use tree_sitter::Node;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
