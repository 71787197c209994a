//! Page-level assertion chains
//!
//! `cy.url()`, `cy.title()`, `cy.location()` and `cy.hash()` followed by
//! assertions are not locators; Playwright asserts on them with page
//! matchers or plain value expectations instead.

use super::assertions::{regex_from, Keyword};
use super::Cx;
use crate::core::chain::ChainLink;
use crate::core::literal::one_line;

const ACCESSORS: &[&str] = &["url", "title", "location", "hash"];

/// First link is a page accessor and some later link asserts
pub(super) fn is_page_assertion_chain(chain: &[ChainLink]) -> bool {
    chain
        .first()
        .is_some_and(|first| ACCESSORS.contains(&first.method))
        && chain.iter().any(|link| link.method == "should")
}

/// Translate every `should`/`and` of the chain into page-level statements
pub(super) fn interpret<'a>(chain: &[ChainLink<'a>], cx: &Cx<'a>) -> String {
    let accessor = &chain[0];
    let statements: Vec<String> = chain
        .iter()
        .filter(|link| matches!(link.method, "should" | "and"))
        .map(|link| page_assertion(accessor, link, cx))
        .collect();
    cx.join(statements)
}

fn page_assertion<'a>(accessor: &ChainLink<'a>, link: &ChainLink<'a>, cx: &Cx<'a>) -> String {
    let keyword = Keyword::read(link, cx);
    let not = keyword.not();
    let value = link.args.get(1);
    let value_text = cx.arg(link, 1).unwrap_or("''");

    let translated = match (accessor.method, keyword.base) {
        ("url", "include" | "contain") => value.map(|v| {
            format!("await expect(page){not}.toHaveURL({})", regex_from(v, cx.source))
        }),
        ("url", "eq" | "equal" | "match") => {
            Some(format!("await expect(page){not}.toHaveURL({value_text})"))
        }
        ("title", "eq" | "equal") => {
            Some(format!("await expect(page){not}.toHaveTitle({value_text})"))
        }
        ("title", "include" | "contain") => value.map(|v| {
            format!("await expect(page){not}.toHaveTitle({})", regex_from(v, cx.source))
        }),
        ("location" | "hash", base) => {
            let part = if accessor.method == "hash" {
                Some("hash")
            } else {
                cx.literal(accessor, 0)
            };
            let matcher = match base {
                "eq" | "equal" => Some("toBe"),
                "include" | "contain" => Some("toContain"),
                _ => None,
            };
            part.zip(matcher).map(|(part, matcher)| {
                format!("expect(new URL(page.url()).{part}){not}.{matcher}({value_text})")
            })
        }
        _ => None,
    };

    translated.unwrap_or_else(|| {
        format!(
            "// TODO: Migrate {} - no Playwright page assertion for '{}'",
            one_line(cx.original),
            keyword.full
        )
    })
}
