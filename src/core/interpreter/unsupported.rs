//! Constructs with no mechanical translation
//!
//! These produce TODO comments that carry enough of the original code for a
//! person to finish the job.

use std::ops::ControlFlow;

use super::{ChainState, Cx, Flow};
use crate::core::chain::ChainLink;
use crate::core::literal::one_line;

const PREVIEW_LIMIT: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManualOp {
    Intercept,
    Alias,
    Then,
    Within,
    Each,
    Spread,
}

impl ManualOp {
    pub const METHODS: &'static [(&'static str, ManualOp)] = &[
        ("intercept", ManualOp::Intercept),
        ("as", ManualOp::Alias),
        ("then", ManualOp::Then),
        ("within", ManualOp::Within),
        ("each", ManualOp::Each),
        ("spread", ManualOp::Spread),
    ];

    pub fn needs_subject(self) -> bool {
        !matches!(self, ManualOp::Intercept)
    }

    pub(super) fn apply<'a>(self, state: &mut ChainState, link: &ChainLink<'a>, cx: &Cx<'a>) -> Flow {
        let loc = state.current_locator.clone();
        let statement = match self {
            ManualOp::Intercept => {
                return ControlFlow::Break(
                    "// TODO: Migrate cy.intercept - use page.route() in Playwright".to_string(),
                )
            }
            ManualOp::Alias => format!(
                "// TODO: Migrate {loc}.as({}) - Playwright uses const variables instead of aliases",
                cx.quoted(link, 0)
            ),
            ManualOp::Then => then_guide(&loc, link, cx),
            ManualOp::Within => with_preview(
                "// TODO: Migrate .within() - scope subsequent locators to this element",
                link,
                cx,
            ),
            ManualOp::Each => with_preview(
                "// TODO: Migrate .each() - use for loop with locator.all() in Playwright",
                link,
                cx,
            ),
            ManualOp::Spread => with_preview(
                "// TODO: Migrate .spread() - use destructuring in Playwright",
                link,
                cx,
            ),
        };
        state.emit(statement);
        ControlFlow::Continue(())
    }
}

/// One-line preview of the callback argument, bounded in length
fn callback_preview<'a>(link: &ChainLink<'a>, cx: &Cx<'a>) -> Option<String> {
    let text = one_line(cx.arg(link, 0)?);
    if text.chars().count() <= PREVIEW_LIMIT {
        return Some(text);
    }
    let cut: String = text.chars().take(PREVIEW_LIMIT).collect();
    Some(format!("{cut}..."))
}

fn with_preview<'a>(marker: &str, link: &ChainLink<'a>, cx: &Cx<'a>) -> String {
    match callback_preview(link, cx) {
        Some(preview) => format!("{marker}\n{}//       Callback preview: {preview}", cx.indent),
        None => marker.to_string(),
    }
}

/// Multi-line guide for `.then(callback)`
fn then_guide<'a>(loc: &str, link: &ChainLink<'a>, cx: &Cx<'a>) -> String {
    let indent = cx.indent;
    let mut lines = vec![
        format!(
            "// TODO: Migrate {loc}.then((callback) => {{...}}) - Element callback needs manual conversion."
        ),
        "//       Steps for manual migration:".to_string(),
        "//       1. Use locator.evaluate() to access element properties in Playwright".to_string(),
        "//       2. Extract the logic from the callback and convert to Playwright patterns"
            .to_string(),
        "//       3. Example: cy.get('.el').then(($el) => { const text = $el.text(); })"
            .to_string(),
        "//                becomes: const text = await page.locator('.el').textContent();"
            .to_string(),
    ];
    if let Some(preview) = callback_preview(link, cx) {
        lines.push(format!("//       Callback preview: {preview}"));
    }
    lines.join(&format!("\n{indent}"))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::t;

    #[test]
    fn test_intercept_short_circuits_alias() {
        assert_eq!(
            t("cy.intercept('GET', '/api/users').as('getUsers');"),
            "// TODO: Migrate cy.intercept - use page.route() in Playwright"
        );
    }

    #[test]
    fn test_alias_on_locator() {
        assert_eq!(
            t("cy.get('button').as('submitBtn');"),
            "// TODO: Migrate page.locator('button').as('submitBtn') - Playwright uses const variables instead of aliases"
        );
    }

    #[test]
    fn test_then_guide() {
        let source = "  cy.get('.data').then(($el) => {\n    cy.log($el.text());\n  });";
        let out = t(source);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(
            lines[0],
            "// TODO: Migrate page.locator('.data').then((callback) => {...}) - Element callback needs manual conversion."
        );
        assert!(lines[1..].iter().all(|l| l.starts_with("  //")));
        assert_eq!(
            lines[6],
            "  //       Callback preview: ($el) => {    cy.log($el.text());  }"
        );
    }

    #[test]
    fn test_within_keeps_preview() {
        let out = t("cy.get('form').within(() => { cy.get('input').type('x'); });");
        assert!(out.starts_with("// TODO: Migrate .within()"));
        assert!(out.contains("Callback preview: () => { cy.get('input').type('x'); }"));
    }

    #[test]
    fn test_long_preview_truncated() {
        let body = "x();".repeat(100);
        let out = t(&format!("cy.get('li').each(() => {{ {body} }});"));
        assert!(out.ends_with("..."));
    }
}
