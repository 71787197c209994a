//! Language Adapters for pwmigrate-ast
//!
//! Each supported language provides an adapter that hands out its Tree-sitter
//! grammar. The free functions below are the structural query primitives the
//! migration engine builds on: node text, named children, call arguments,
//! descendant search and ancestor walks.

pub mod typescript_adapter;

use crate::ir::LanguageId;
use tree_sitter::Node;

pub use typescript_adapter::TypeScriptTreeSitterAdapter;

/// Trait for language-specific adapters
pub trait LanguageAdapter: Send + Sync {
    /// The language this adapter handles
    fn language(&self) -> LanguageId;

    /// Get the Tree-sitter language
    fn tree_sitter_language(&self) -> tree_sitter::Language;

    /// Count error and missing nodes in a parse tree
    ///
    /// Parsing never fails on bad input; this lets callers report how much of
    /// a file was recovered rather than understood.
    fn count_errors(&self, tree: &tree_sitter::Tree) -> usize {
        find_all(tree.root_node(), |n| n.is_error() || n.is_missing()).len()
    }
}

/// Get the text content of a Tree-sitter node
pub fn node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    &source[node.start_byte()..node.end_byte()]
}

/// Named children of a node, comments excluded
pub fn named_children<'t>(node: &Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|c| c.kind() != "comment")
        .collect()
}

/// Named argument expressions of a call expression
///
/// Returns an empty list when the node has no `arguments` field (tagged
/// templates, non-calls).
pub fn named_args<'t>(call: &Node<'t>) -> Vec<Node<'t>> {
    call.child_by_field_name("arguments")
        .map(|args| named_children(&args))
        .unwrap_or_default()
}

/// All descendants of `node` (itself included) matching `pred`, in pre-order
///
/// Iterative so deeply nested callbacks cannot exhaust the stack.
pub fn find_all<'t, F>(node: Node<'t>, pred: F) -> Vec<Node<'t>>
where
    F: Fn(&Node<'t>) -> bool,
{
    let mut found = Vec::new();
    let mut cursor = node.walk();
    loop {
        let current = cursor.node();
        if pred(&current) {
            found.push(current);
        }
        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return found;
            }
        }
    }
}

/// Iterator over the ancestors of a node, nearest first
pub struct Ancestors<'t> {
    next: Option<Node<'t>>,
}

impl<'t> Iterator for Ancestors<'t> {
    type Item = Node<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent();
        Some(current)
    }
}

/// Walk from the parent of `node` up to the root
pub fn ancestors<'t>(node: &Node<'t>) -> Ancestors<'t> {
    Ancestors {
        next: node.parent(),
    }
}

/// Whether a node is a string or template literal
pub fn is_string_like(node: &Node) -> bool {
    matches!(node.kind(), "string" | "template_string")
}

/// Whether a node is an inline callback (arrow function or function expression)
pub fn is_function_like(node: &Node) -> bool {
    matches!(
        node.kind(),
        "arrow_function" | "function_expression" | "function"
    )
}

/// Leading whitespace of the line containing byte offset `at`
pub fn line_indent(source: &str, at: usize) -> &str {
    let at = at.min(source.len());
    let line_start = source[..at].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let rest = &source[line_start..];
    let width = rest
        .find(|c: char| c != ' ' && c != '\t')
        .unwrap_or(rest.len());
    &rest[..width]
}
