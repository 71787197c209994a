//! `should` / `and`

use std::ops::ControlFlow;

use pwmigrate_ast::adapters::is_function_like;
use pwmigrate_ast::{node_text, Node};

use super::{ChainState, Cx, Flow};
use crate::core::chain::ChainLink;
use crate::core::literal::string_content;
use crate::core::mappings::{assertion_for, ArgTransform};

/// Characters with a meaning inside a JS regex literal
const REGEX_SPECIAL: &[char] = &[
    '\\', '^', '$', '.', '|', '?', '*', '+', '(', ')', '[', ']', '{', '}', '/',
];

/// Regex literal matching the string content literally
///
/// `content` is string source text, so its own escapes are read first:
/// control and code-point escapes carry over, any other escaped character
/// stands for itself.
pub(super) fn regex_literal(content: &str) -> String {
    let mut pattern = String::with_capacity(content.len() + 2);
    let mut chars = content.chars();
    while let Some(c) = chars.next() {
        let literal = match c {
            '\\' => match chars.next() {
                Some(e @ ('n' | 'r' | 't' | 'v' | 'f' | '0' | 'u' | 'x')) => {
                    pattern.push('\\');
                    pattern.push(e);
                    continue;
                }
                Some(e) => e,
                None => '\\',
            },
            '\n' => {
                pattern.push_str("\\n");
                continue;
            }
            c => c,
        };
        if REGEX_SPECIAL.contains(&literal) {
            pattern.push('\\');
        }
        pattern.push(literal);
    }
    format!("/{pattern}/")
}

/// Regex form of an argument: literal strings become `/…/`, anything else
/// (identifiers, interpolated templates) goes through `new RegExp(…)`
pub(super) fn regex_from(arg: &Node, source: &str) -> String {
    let interpolated = arg.kind() == "template_string"
        && pwmigrate_ast::named_children(arg)
            .iter()
            .any(|c| c.kind() == "template_substitution");
    match string_content(Some(arg), source) {
        Some(content) if !interpolated => regex_literal(content),
        _ => format!("new RegExp({})", node_text(arg, source)),
    }
}

/// Keyword of an assertion link and whether it is negated
pub(super) struct Keyword<'a> {
    /// Keyword as written, e.g. `not.be.visible`
    pub full: &'a str,
    /// Keyword without the `not.` prefix
    pub base: &'a str,
    pub negated: bool,
}

impl<'a> Keyword<'a> {
    pub fn read(link: &ChainLink<'a>, cx: &Cx<'a>) -> Keyword<'a> {
        let full = match (cx.literal(link, 0), link.args.first()) {
            (Some(keyword), _) => keyword,
            (None, Some(arg)) if is_function_like(arg) => "callback",
            (None, Some(arg)) => node_text(arg, cx.source),
            (None, None) => "",
        };
        let (base, negated) = match full.strip_prefix("not.") {
            Some(rest) => (rest, true),
            None => (full, false),
        };
        Keyword {
            full,
            base,
            negated,
        }
    }

    pub fn not(&self) -> &'static str {
        if self.negated {
            ".not"
        } else {
            ""
        }
    }
}

/// Build the `await expect(…)` statement for one assertion link
fn build<'a>(subject: &str, link: &ChainLink<'a>, cx: &Cx<'a>) -> String {
    let keyword = Keyword::read(link, cx);
    let Some(mapping) = assertion_for(keyword.base) else {
        return format!(
            "await expect({subject})./* TODO: migrate '{}' */ toPass()",
            keyword.full
        );
    };

    let rest = &link.args[1.min(link.args.len())..];
    let args: Vec<String> = rest
        .iter()
        .enumerate()
        .map(|(i, arg)| match (i, mapping.transform) {
            (0, ArgTransform::RegexFromString) => regex_from(arg, cx.source),
            _ => node_text(arg, cx.source).to_string(),
        })
        .collect();

    format!(
        "await expect({subject}){}.{}({})",
        keyword.not(),
        mapping.matcher,
        args.join(", ")
    )
}

/// `should` replaces the pending assertions; `and` appends to them
pub(super) fn apply<'a>(
    state: &mut ChainState,
    link: &ChainLink<'a>,
    cx: &Cx<'a>,
    chained: bool,
) -> Flow {
    let statement = build(&state.current_locator, link, cx);
    if !chained {
        state.assertions.clear();
    }
    state.assertions.push(statement);
    ControlFlow::Continue(())
}
