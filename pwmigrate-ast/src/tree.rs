//! Parsed source trees
//!
//! A `SourceTree` owns both the Tree-sitter tree and the text it was parsed
//! from, so node text lookups can never be made against the wrong buffer.

use crate::adapters::node_text;
use crate::ir::LanguageId;
use tree_sitter::Node;

/// A parsed file: tree, original text and language
pub struct SourceTree {
    tree: tree_sitter::Tree,
    source: String,
    language: LanguageId,
    error_count: usize,
}

impl SourceTree {
    pub(crate) fn new(
        tree: tree_sitter::Tree,
        source: String,
        language: LanguageId,
        error_count: usize,
    ) -> Self {
        Self {
            tree,
            source,
            language,
            error_count,
        }
    }

    /// Root (`program`) node
    pub fn root_node(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// The original text
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Language the tree was parsed as
    pub fn language(&self) -> LanguageId {
        self.language
    }

    /// Text of a node belonging to this tree
    pub fn text(&self, node: &Node) -> &str {
        node_text(node, &self.source)
    }

    /// Number of error/missing nodes Tree-sitter recovered from
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Whether the parse needed error recovery anywhere
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }
}

impl std::fmt::Debug for SourceTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceTree")
            .field("language", &self.language)
            .field("bytes", &self.source.len())
            .field("error_count", &self.error_count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::registry::AdapterRegistry;
    use crate::LanguageId;

    #[test]
    fn test_text_matches_source() {
        let tree = AdapterRegistry::new()
            .parse("cy.reload();\n", LanguageId::JavaScript)
            .unwrap();
        assert_eq!(tree.text(&tree.root_node()), "cy.reload();\n");
        assert_eq!(tree.language(), LanguageId::JavaScript);
        assert!(!tree.has_errors());
    }

    #[test]
    fn test_debug_omits_text() {
        let tree = AdapterRegistry::new()
            .parse("const secret = 1;", LanguageId::TypeScript)
            .unwrap();
        let dbg = format!("{:?}", tree);
        assert!(dbg.contains("TypeScript"));
        assert!(!dbg.contains("secret"));
    }
}
