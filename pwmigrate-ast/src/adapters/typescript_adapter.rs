//! TypeScript/JavaScript Language Adapter
//!
//! Hands out the Tree-sitter grammars for `.ts`, `.tsx`, `.js` and `.jsx`
//! test files. JSX goes through the JavaScript grammar, which accepts it.

use super::LanguageAdapter;
use crate::ir::LanguageId;

/// TypeScript/JavaScript language adapter using Tree-sitter
pub struct TypeScriptTreeSitterAdapter {
    language: tree_sitter::Language,
    language_id: LanguageId,
}

impl TypeScriptTreeSitterAdapter {
    /// Create a new TypeScript adapter
    pub fn new() -> Self {
        Self {
            language: tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            language_id: LanguageId::TypeScript,
        }
    }

    /// Create a new TSX adapter
    pub fn tsx() -> Self {
        Self {
            language: tree_sitter_typescript::LANGUAGE_TSX.into(),
            language_id: LanguageId::Tsx,
        }
    }

    /// Create a new JavaScript adapter
    pub fn javascript() -> Self {
        Self {
            language: tree_sitter_javascript::LANGUAGE.into(),
            language_id: LanguageId::JavaScript,
        }
    }

    /// Create a JSX adapter (JavaScript grammar, JSX language id)
    pub fn jsx() -> Self {
        Self {
            language: tree_sitter_javascript::LANGUAGE.into(),
            language_id: LanguageId::Jsx,
        }
    }
}

impl Default for TypeScriptTreeSitterAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageAdapter for TypeScriptTreeSitterAdapter {
    fn language(&self) -> LanguageId {
        self.language_id
    }

    fn tree_sitter_language(&self) -> tree_sitter::Language {
        self.language.clone()
    }
}
