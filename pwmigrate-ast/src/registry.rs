//! Adapter Registry
//!
//! The registry manages the language adapters and provides a single entry
//! point for parsing test files into `SourceTree`s.

use crate::adapters::{LanguageAdapter, TypeScriptTreeSitterAdapter};
use crate::error::{AstError, Result};
use crate::ir::LanguageId;
use crate::tree::SourceTree;
use std::collections::BTreeMap;
use tracing::debug;

/// Registry of language adapters
pub struct AdapterRegistry {
    adapters: BTreeMap<LanguageId, Box<dyn LanguageAdapter>>,
}

impl AdapterRegistry {
    /// Create a new registry with all built-in adapters
    pub fn new() -> Self {
        let mut registry = Self {
            adapters: BTreeMap::new(),
        };

        registry.register(Box::new(TypeScriptTreeSitterAdapter::new())); // .ts, .mts, .cts
        registry.register(Box::new(TypeScriptTreeSitterAdapter::tsx())); // .tsx
        registry.register(Box::new(TypeScriptTreeSitterAdapter::javascript())); // .js, .mjs, .cjs
        registry.register(Box::new(TypeScriptTreeSitterAdapter::jsx())); // .jsx

        registry
    }

    /// Register a language adapter
    pub fn register(&mut self, adapter: Box<dyn LanguageAdapter>) {
        self.adapters.insert(adapter.language(), adapter);
    }

    /// Get an adapter for a language
    pub fn get(&self, language: LanguageId) -> Option<&dyn LanguageAdapter> {
        self.adapters.get(&language).map(|a| a.as_ref())
    }

    /// Parse source text into a tree
    pub fn parse(&self, source: &str, language: LanguageId) -> Result<SourceTree> {
        let adapter = self
            .get(language)
            .ok_or(AstError::UnsupportedLanguage(language))?;

        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&adapter.tree_sitter_language())
            .map_err(|e| AstError::TreeSitterError(e.to_string()))?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| AstError::parse_error("Failed to parse source"))?;

        let error_count = adapter.count_errors(&tree);
        if error_count > 0 {
            debug!(
                language = %language,
                error_count,
                "parsed with error recovery"
            );
        }

        Ok(SourceTree::new(tree, source.to_string(), language, error_count))
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
