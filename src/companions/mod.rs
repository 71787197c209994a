//! Companion transforms
//!
//! Whole-file conversions that sit next to the spec engine: turning a
//! `cypress.config.*` into a `playwright.config.*`, and inventorying custom
//! commands registered in support files so they can be rebuilt as fixtures.

pub mod commands;
pub mod config;

pub use commands::{inventory_custom_commands, CustomCommand};
pub use config::{migrate_config, CypressConfig};

use pwmigrate_ast::{named_children, node_text, Node};

/// Key text of an object `pair`, with quotes removed for string keys
pub(crate) fn pair_key<'a>(pair: &Node<'a>, source: &'a str) -> Option<&'a str> {
    let key = pair.child_by_field_name("key")?;
    let text = node_text(&key, source);
    Some(crate::core::literal::strip_quotes(text))
}

/// Value node of the direct property `name` of an object literal
pub(crate) fn property<'a>(object: &Node<'a>, name: &str, source: &'a str) -> Option<Node<'a>> {
    named_children(object)
        .into_iter()
        .filter(|child| child.kind() == "pair")
        .find(|pair| pair_key(pair, source) == Some(name))
        .and_then(|pair| pair.child_by_field_name("value"))
}
