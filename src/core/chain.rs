//! Chain decomposition
//!
//! `cy.get('.a').find('.b').click()` nests outward: the outermost call's
//! callee is a member expression whose object is the previous call. This
//! module flattens that nesting into an ordered list of links, first link
//! closest to `cy`.

use std::collections::VecDeque;

use pwmigrate_ast::{named_args, node_text, Node};

use super::detector::is_entry_identifier;
use super::scope::ScopeResolver;

/// One method call in a command chain
#[derive(Debug, Clone)]
pub struct ChainLink<'a> {
    /// Method name, e.g. `get` or `should`
    pub method: &'a str,
    /// Argument expression nodes in source order
    pub args: Vec<Node<'a>>,
    /// The call expression this link was read from
    pub node: Node<'a>,
}

impl<'a> ChainLink<'a> {
    /// Source text of the `i`-th argument
    pub fn arg_text(&self, i: usize, source: &'a str) -> Option<&'a str> {
        self.args.get(i).map(|a| node_text(a, source))
    }

    /// All arguments joined with `, ` as written
    pub fn joined_args(&self, source: &'a str) -> String {
        self.args
            .iter()
            .map(|a| node_text(a, source))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Split a member call into its receiver and method name
fn member_call<'a>(call: &Node<'a>, source: &'a str) -> Option<(Node<'a>, &'a str)> {
    if call.kind() != "call_expression" {
        return None;
    }
    let callee = call.child_by_field_name("function")?;
    if callee.kind() != "member_expression" {
        return None;
    }
    let receiver = callee.child_by_field_name("object")?;
    let property = callee.child_by_field_name("property")?;
    Some((receiver, node_text(&property, source)))
}

/// Flatten the chain ending at `outermost`
///
/// Returns an empty chain when the innermost receiver is neither a call nor
/// the `cy` identifier (`foo().bar()`, `obj.cy.get()`).
pub fn decompose<'a>(outermost: Node<'a>, source: &'a str) -> Vec<ChainLink<'a>> {
    let mut links = VecDeque::new();
    let mut current = outermost;

    while let Some((receiver, method)) = member_call(&current, source) {
        links.push_front(ChainLink {
            method,
            args: named_args(&current),
            node: current,
        });

        if is_entry_identifier(&receiver, source) {
            return links.into();
        }
        if receiver.kind() != "call_expression" {
            break;
        }
        current = receiver;
    }

    Vec::new()
}

/// Whether `node` is a call chain rooted at the genuine `cy` global
pub fn is_entry_command<'a>(node: &Node<'a>, resolver: &mut ScopeResolver<'a>) -> bool {
    let source = resolver.source();
    let mut current = *node;
    while let Some((receiver, _)) = member_call(&current, source) {
        if is_entry_identifier(&receiver, source) {
            return resolver.is_entry_point_global(&receiver);
        }
        current = receiver;
    }
    false
}

/// Whether a confirmed command call is the outermost call of its chain
///
/// `cy.get('a')` inside `cy.get('a').click()` is not: its parent is the
/// member expression `.click` and the grandparent call is itself a command.
pub fn is_chain_root<'a>(node: &Node<'a>, resolver: &mut ScopeResolver<'a>) -> bool {
    let Some(parent) = node.parent() else {
        return true;
    };
    if parent.kind() != "member_expression" {
        return true;
    }
    match parent.parent() {
        Some(grand) if grand.kind() == "call_expression" => {
            let calls_parent = grand
                .child_by_field_name("function")
                .is_some_and(|f| f.id() == parent.id());
            !(calls_parent && is_entry_command(&grand, resolver))
        }
        _ => true,
    }
}
