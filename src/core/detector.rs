//! File-level gate
//!
//! A file is only worth transforming when at least one `cy.<member>` usage
//! refers to the framework global. Files that merely mention `describe` or
//! `it`, or that define their own `cy`, pass through untouched.

use pwmigrate_ast::{find_all, node_text, Node};

use super::scope::{ScopeResolver, ENTRY_POINT};

/// Whether `node` is an identifier spelled like the entry point
pub fn is_entry_identifier(node: &Node, source: &str) -> bool {
    node.kind() == "identifier" && node_text(node, source) == ENTRY_POINT
}

/// Whether any `cy.x` member access in the file refers to the global
pub fn file_uses_framework<'a>(root: Node<'a>, resolver: &mut ScopeResolver<'a>) -> bool {
    let source = resolver.source();
    find_all(root, |n| n.kind() == "member_expression")
        .into_iter()
        .filter_map(|member| member.child_by_field_name("object"))
        .filter(|object| is_entry_identifier(object, source))
        .any(|object| resolver.is_entry_point_global(&object))
}
