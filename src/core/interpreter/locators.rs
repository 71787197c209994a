//! Locator-building links: selection, text lookup and DOM traversal

use super::{ChainState, Cx, Flow};
use crate::core::chain::ChainLink;
use std::ops::ControlFlow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocatorOp {
    Get,
    Contains,
    First,
    Last,
    Eq,
    Find,
    Parent,
    Children,
    Siblings,
    Next,
    Prev,
    Filter,
    Not,
    Focused,
    Wrap,
}

impl LocatorOp {
    pub const METHODS: &'static [(&'static str, LocatorOp)] = &[
        ("get", LocatorOp::Get),
        ("contains", LocatorOp::Contains),
        ("first", LocatorOp::First),
        ("last", LocatorOp::Last),
        ("eq", LocatorOp::Eq),
        ("find", LocatorOp::Find),
        ("parent", LocatorOp::Parent),
        ("children", LocatorOp::Children),
        ("siblings", LocatorOp::Siblings),
        ("next", LocatorOp::Next),
        ("prev", LocatorOp::Prev),
        ("filter", LocatorOp::Filter),
        ("not", LocatorOp::Not),
        ("focused", LocatorOp::Focused),
        ("wrap", LocatorOp::Wrap),
    ];

    pub fn needs_subject(self) -> bool {
        !matches!(
            self,
            LocatorOp::Get | LocatorOp::Contains | LocatorOp::Focused | LocatorOp::Wrap
        )
    }

    pub(super) fn apply<'a>(self, state: &mut ChainState, link: &ChainLink<'a>, cx: &Cx<'a>) -> Flow {
        let loc = &state.current_locator;
        let next = match self {
            LocatorOp::Get => {
                if let Some(alias) = cx.literal(link, 0).filter(|s| s.starts_with('@')) {
                    return ControlFlow::Break(format!(
                        "// TODO: Migrate cy.get('{alias}') - use the const variable directly"
                    ));
                }
                format!("page.locator({})", cx.arg(link, 0).unwrap_or("''"))
            }
            LocatorOp::Contains => contains(loc, link, cx),
            LocatorOp::First => format!("{loc}.first()"),
            LocatorOp::Last => format!("{loc}.last()"),
            LocatorOp::Eq => format!("{loc}.nth({})", cx.arg(link, 0).unwrap_or("0")),
            LocatorOp::Find => format!("{loc}.locator({})", cx.arg(link, 0).unwrap_or("''")),
            LocatorOp::Parent => format!("{loc}.locator('..')"),
            LocatorOp::Children => relative(loc, ">", link, cx),
            LocatorOp::Siblings => relative(loc, "~", link, cx),
            LocatorOp::Next => relative(loc, "+", link, cx),
            LocatorOp::Prev => format!("{loc}.locator('xpath=preceding-sibling::*[1]')"),
            LocatorOp::Filter => format!(
                "{loc}.filter({{ has: page.locator({}) }})",
                cx.arg(link, 0).unwrap_or("''")
            ),
            LocatorOp::Not => format!(
                "{loc}.filter({{ hasNot: page.locator({}) }})",
                cx.arg(link, 0).unwrap_or("''")
            ),
            LocatorOp::Focused => "page.locator(':focus')".to_string(),
            LocatorOp::Wrap => cx.arg(link, 0).unwrap_or_default().to_string(),
        };
        state.current_locator = next;
        ControlFlow::Continue(())
    }
}

/// `contains(text)` or `contains(selector, text)`, scoped to the current
/// locator when one exists
fn contains<'a>(loc: &str, link: &ChainLink<'a>, cx: &Cx<'a>) -> String {
    let scope = if loc.is_empty() { "page" } else { loc };
    match (cx.arg(link, 0), cx.arg(link, 1)) {
        (Some(selector), Some(text)) => {
            if loc.is_empty() {
                format!("page.locator({selector}).filter({{ hasText: {text} }})")
            } else {
                format!("{loc}.locator({selector}).filter({{ hasText: {text} }})")
            }
        }
        (Some(text), None) => format!("{scope}.getByText({text})"),
        _ => format!("{scope}.getByText('')"),
    }
}

/// Combinator-relative lookup: `> *`, `~ *`, `+ *`, or with a selector
fn relative<'a>(loc: &str, combinator: &str, link: &ChainLink<'a>, cx: &Cx<'a>) -> String {
    match (cx.literal(link, 0), cx.arg(link, 0)) {
        (Some(selector), _) => format!("{loc}.locator(`{combinator} {selector}`)"),
        (None, Some(expr)) => format!("{loc}.locator(`{combinator} ${{{expr}}}`)"),
        (None, None) => format!("{loc}.locator('{combinator} *')"),
    }
}
