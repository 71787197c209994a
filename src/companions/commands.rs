//! Custom command inventory
//!
//! Support files register commands with `Cypress.Commands.add(name, fn)`.
//! Playwright has no command registry; the usual replacement is a test
//! fixture. This module lists every registered command and prepends a
//! fixture skeleton to the original file.

use pwmigrate_ast::adapters::is_function_like;
use pwmigrate_ast::{find_all, named_args, node_text, AdapterRegistry, LanguageId, Node};
use tracing::debug;

use crate::core::error::Result;
use crate::core::literal::{one_line, string_content};

const PREVIEW_LIMIT: usize = 100;
const RULE: &str = "// ============================================";

/// One command registration found in a support file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomCommand {
    pub name: String,
    /// Registered with an options object (`prevSubject`, …)
    pub has_options: bool,
    /// Registered with `overwrite` rather than `add`
    pub overwrites_builtin: bool,
    /// Start of the callback body, newlines removed
    pub body_preview: String,
}

fn registration_kind(call: &Node, source: &str) -> Option<bool> {
    let callee = call.child_by_field_name("function")?;
    match node_text(&callee, source) {
        "Cypress.Commands.add" => Some(false),
        "Cypress.Commands.overwrite" => Some(true),
        _ => None,
    }
}

fn body_preview(callback: Option<&Node>, source: &str) -> String {
    let Some(body) = callback
        .filter(|cb| is_function_like(cb))
        .and_then(|cb| cb.child_by_field_name("body"))
    else {
        return String::new();
    };
    let text = node_text(&body, source);
    let mut preview: String = text.chars().take(PREVIEW_LIMIT).collect();
    if text.chars().count() > PREVIEW_LIMIT {
        preview.push_str("...");
    }
    one_line(&preview)
}

/// Every `Cypress.Commands.add|overwrite('name', …)` in the tree
pub fn extract_commands(root: Node, source: &str) -> Vec<CustomCommand> {
    find_all(root, |n| n.kind() == "call_expression")
        .into_iter()
        .filter_map(|call| {
            let overwrites_builtin = registration_kind(&call, source)?;
            let args = named_args(&call);
            let name_arg = args.first().filter(|a| a.kind() == "string")?;
            let name = string_content(Some(name_arg), source)?.to_string();
            let has_options = args.get(1).is_some_and(|a| a.kind() == "object");
            let callback = args.get(if has_options { 2 } else { 1 });
            Some(CustomCommand {
                name,
                has_options,
                overwrites_builtin,
                body_preview: body_preview(callback, source),
            })
        })
        .collect()
}

fn migration_guide(commands: &[CustomCommand]) -> String {
    if commands.is_empty() {
        return "// No custom Cypress commands found in this file.\n".to_string();
    }

    let mut lines: Vec<String> = [
        RULE,
        "// CUSTOM CYPRESS COMMANDS DETECTED",
        RULE,
        "//",
        "// The following custom commands were found and need manual migration.",
        "// In Playwright, custom commands are typically implemented as:",
        "//   1. Test fixtures (recommended for reusable functionality)",
        "//   2. Page Object Models (for page-specific helpers)",
        "//   3. Utility functions (for simple helpers)",
        "//",
        "// See: https://playwright.dev/docs/test-fixtures",
        "//",
        RULE,
        "",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    for cmd in commands {
        lines.push(format!("// Command: {}", cmd.name));
        if cmd.overwrites_builtin {
            lines.push("//   - Overwrites a built-in command".to_string());
        }
        if cmd.has_options {
            lines.push("//   - Has options (prevSubject, etc.) - may need special handling".to_string());
        }
        lines.push(format!("//   - Body preview: {}", cmd.body_preview));
        lines.push("//".to_string());
    }

    for line in [
        RULE,
        "// PLAYWRIGHT FIXTURE TEMPLATE",
        RULE,
        "",
        "/*",
        "// Create a file: tests/fixtures.ts",
        "",
        "import { test as base } from '@playwright/test';",
        "",
        "type CustomFixtures = {",
    ] {
        lines.push(line.to_string());
    }
    for cmd in commands {
        lines.push(format!("  {}: (/* params */) => Promise<void>;", cmd.name));
    }
    lines.push("};".to_string());
    lines.push(String::new());
    lines.push("export const test = base.extend<CustomFixtures>({".to_string());
    for cmd in commands {
        lines.push(format!("  {}: async ({{ page }}, use) => {{", cmd.name));
        lines.push("    await use(async (/* params */) => {".to_string());
        lines.push(format!("      // TODO: Migrate the '{}' command logic here", cmd.name));
        lines.push(format!("      // Original: Cypress.Commands.add('{}', ...)", cmd.name));
        lines.push("    });".to_string());
        lines.push("  },".to_string());
    }
    lines.push("});".to_string());
    lines.push(String::new());
    lines.push("export { expect } from '@playwright/test';".to_string());
    lines.push("*/".to_string());
    lines.push(String::new());
    lines.join("\n")
}

/// Prefix a support file with its command inventory and a fixture skeleton
///
/// `None` when the file never touches `Cypress.Commands`.
pub fn inventory_custom_commands(source: &str, language: LanguageId) -> Result<Option<String>> {
    let tree = AdapterRegistry::new().parse(source, language)?;
    let root = tree.root_node();
    let touches_commands = find_all(root, |n| {
        n.kind() == "member_expression" && node_text(n, source).contains("Cypress.Commands")
    });
    if touches_commands.is_empty() {
        return Ok(None);
    }

    let commands = extract_commands(root, source);
    debug!(count = commands.len(), "custom commands found");
    Ok(Some(format!(
        "{}\n{RULE}\n// ORIGINAL CYPRESS COMMANDS FILE:\n{RULE}\n\n{source}",
        migration_guide(&commands)
    )))
}
