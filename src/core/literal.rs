//! String-literal extraction
//!
//! Turns `'x'`, `"x"` and `` `x` `` argument nodes into their raw content so
//! selectors, assertion keywords and aliases can be inspected without caring
//! which quote style the test author used.

use pwmigrate_ast::adapters::is_string_like;
use pwmigrate_ast::{node_text, Node};

/// Raw content of a string or template literal, `None` for anything else
///
/// Escape sequences are left as written; the result is only ever compared
/// against keywords or spliced back into generated source.
pub fn string_content<'s>(node: Option<&Node>, source: &'s str) -> Option<&'s str> {
    let node = node?;
    if !is_string_like(node) {
        return None;
    }
    let text = node_text(node, source);
    if text.len() >= 2 {
        Some(&text[1..text.len() - 1])
    } else {
        Some("")
    }
}

/// Remove one leading and one trailing quote character, each independently
pub fn strip_quotes(text: &str) -> &str {
    let text = text
        .strip_prefix(['\'', '"', '`'])
        .unwrap_or(text);
    text.strip_suffix(['\'', '"', '`']).unwrap_or(text)
}

/// Collapse a snippet of source onto one line
///
/// Used when original code is quoted inside a `//` comment, where a newline
/// would end the comment early.
pub fn one_line(text: &str) -> String {
    text.replace(['\r', '\n'], "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pwmigrate_ast::{find_all, named_args, AdapterRegistry, LanguageId, SourceTree};

    fn parse(source: &str) -> SourceTree {
        AdapterRegistry::new()
            .parse(source, LanguageId::TypeScript)
            .unwrap()
    }

    #[test]
    fn test_quote_styles_normalized() {
        let source = "f('single', \"double\", `tpl`, ident, 42);";
        let tree = parse(source);
        let call = find_all(tree.root_node(), |n| n.kind() == "call_expression")[0];
        let args = named_args(&call);
        assert_eq!(string_content(args.first(), source), Some("single"));
        assert_eq!(string_content(args.get(1), source), Some("double"));
        assert_eq!(string_content(args.get(2), source), Some("tpl"));
        assert_eq!(string_content(args.get(3), source), None);
        assert_eq!(string_content(args.get(4), source), None);
        assert_eq!(string_content(args.get(9), source), None);
    }

    #[test]
    fn test_empty_string_literal() {
        let source = "f('');";
        let tree = parse(source);
        let call = find_all(tree.root_node(), |n| n.kind() == "call_expression")[0];
        assert_eq!(string_content(named_args(&call).first(), source), Some(""));
    }

    #[test]
    fn test_escapes_kept_raw() {
        let source = r#"f('it\'s');"#;
        let tree = parse(source);
        let call = find_all(tree.root_node(), |n| n.kind() == "call_expression")[0];
        assert_eq!(
            string_content(named_args(&call).first(), source),
            Some(r"it\'s")
        );
    }

    #[test]
    fn test_strip_quotes() {
        assert_eq!(strip_quotes("'active'"), "active");
        assert_eq!(strip_quotes("\"x\""), "x");
        assert_eq!(strip_quotes("`y`"), "y");
        assert_eq!(strip_quotes("bare"), "bare");
        assert_eq!(strip_quotes("'half"), "half");
    }

    #[test]
    fn test_one_line() {
        assert_eq!(one_line("($el) => {\n  x();\r\n}"), "($el) => {  x();}");
    }
}
