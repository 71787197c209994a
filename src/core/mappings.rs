//! Keyword tables
//!
//! Static lookups from Cypress assertion keywords and element actions to
//! their Playwright counterparts. Only the class assertion carries an
//! argument transform: Playwright's `toHaveClass` wants a pattern when the
//! element may carry other classes.

use std::collections::HashMap;

use lazy_static::lazy_static;

/// How a mapped assertion rewrites its arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgTransform {
    /// Arguments pass through as written
    Verbatim,
    /// A string literal becomes a regex literal; other expressions are
    /// wrapped in `new RegExp(…)`
    RegexFromString,
}

/// A Cypress chainer keyword mapped onto a Playwright matcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssertionMapping {
    pub keyword: &'static str,
    pub matcher: &'static str,
    pub transform: ArgTransform,
}

const fn verbatim(keyword: &'static str, matcher: &'static str) -> AssertionMapping {
    AssertionMapping {
        keyword,
        matcher,
        transform: ArgTransform::Verbatim,
    }
}

const ASSERTIONS: &[AssertionMapping] = &[
    verbatim("be.visible", "toBeVisible"),
    verbatim("be.hidden", "toBeHidden"),
    verbatim("be.invisible", "toBeHidden"),
    verbatim("exist", "toBeAttached"),
    verbatim("be.exist", "toBeAttached"),
    verbatim("have.text", "toHaveText"),
    verbatim("contain", "toContainText"),
    verbatim("contain.text", "toContainText"),
    verbatim("include.text", "toContainText"),
    verbatim("have.value", "toHaveValue"),
    verbatim("be.disabled", "toBeDisabled"),
    verbatim("be.enabled", "toBeEnabled"),
    verbatim("be.checked", "toBeChecked"),
    verbatim("be.selected", "toBeChecked"),
    verbatim("be.focused", "toBeFocused"),
    verbatim("have.focus", "toBeFocused"),
    verbatim("be.empty", "toBeEmpty"),
    AssertionMapping {
        keyword: "have.class",
        matcher: "toHaveClass",
        transform: ArgTransform::RegexFromString,
    },
    verbatim("have.attr", "toHaveAttribute"),
    verbatim("have.id", "toHaveId"),
    verbatim("have.prop", "toHaveJSProperty"),
    verbatim("have.css", "toHaveCSS"),
    verbatim("have.length", "toHaveCount"),
    verbatim("eq", "toHaveText"),
    verbatim("equal", "toHaveText"),
    verbatim("match", "toHaveText"),
    verbatim("include", "toContainText"),
];

const ACTIONS: &[(&str, &str)] = &[
    ("type", "fill"),
    ("clear", "clear"),
    ("check", "check"),
    ("uncheck", "uncheck"),
    ("click", "click"),
    ("dblclick", "dblclick"),
    ("focus", "focus"),
    ("blur", "blur"),
    ("select", "selectOption"),
    ("scrollIntoView", "scrollIntoViewIfNeeded"),
];

lazy_static! {
    static ref ASSERTION_INDEX: HashMap<&'static str, &'static AssertionMapping> =
        ASSERTIONS.iter().map(|m| (m.keyword, m)).collect();
    static ref ACTION_INDEX: HashMap<&'static str, &'static str> =
        ACTIONS.iter().copied().collect();
}

/// Matcher for an assertion keyword, without any `not.` prefix
pub fn assertion_for(keyword: &str) -> Option<&'static AssertionMapping> {
    ASSERTION_INDEX.get(keyword).copied()
}

/// Playwright locator method for a Cypress element action
pub fn action_for(method: &str) -> Option<&'static str> {
    ACTION_INDEX.get(method).copied()
}

/// Every assertion keyword the engine maps
pub fn assertion_keywords() -> impl Iterator<Item = &'static str> {
    ASSERTIONS.iter().map(|m| m.keyword)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_family() {
        assert_eq!(assertion_for("be.visible").unwrap().matcher, "toBeVisible");
        assert_eq!(assertion_for("be.hidden").unwrap().matcher, "toBeHidden");
        assert_eq!(assertion_for("be.invisible").unwrap().matcher, "toBeHidden");
        assert_eq!(assertion_for("exist").unwrap().matcher, "toBeAttached");
    }

    #[test]
    fn test_only_class_uses_regex_transform() {
        let regex: Vec<_> = ASSERTIONS
            .iter()
            .filter(|m| m.transform == ArgTransform::RegexFromString)
            .map(|m| m.keyword)
            .collect();
        assert_eq!(regex, vec!["have.class"]);
    }

    #[test]
    fn test_negation_prefix_is_not_a_keyword() {
        assert!(assertion_for("not.be.visible").is_none());
    }

    #[test]
    fn test_ambiguous_length_comparisons_unmapped() {
        for keyword in ["have.length.gt", "have.length.gte", "have.length.lt", "have.length.lte"] {
            assert!(assertion_for(keyword).is_none(), "{keyword}");
        }
    }

    #[test]
    fn test_actions() {
        assert_eq!(action_for("type"), Some("fill"));
        assert_eq!(action_for("select"), Some("selectOption"));
        assert_eq!(action_for("scrollIntoView"), Some("scrollIntoViewIfNeeded"));
        assert_eq!(action_for("hover"), None);
    }

    #[test]
    fn test_keywords_unique() {
        let count = assertion_keywords().count();
        assert_eq!(count, ASSERTION_INDEX.len());
    }
}
