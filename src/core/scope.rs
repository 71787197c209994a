//! Scope resolution for the `cy` entry point
//!
//! A usage of `cy` only counts as the real framework global when no
//! enclosing scope declares a binding of that name. Resolution runs in two
//! layers:
//!
//! 1. A binding walk over enclosing scopes (blocks, function parameters,
//!    catch clauses, loop heads, imports).
//! 2. A lexical fallback that rejects the usage if any `const|let|var cy = …`
//!    or `function cy(…)` inside an enclosing block starts before it.
//!
//! The fallback is approximate: the program node encloses every usage, so
//! any textually earlier declaration anywhere in the file disqualifies later
//! usages, even ones outside that declaration's scope.

use std::collections::HashMap;

use pwmigrate_ast::{ancestors, find_all, named_children, node_text, Node};
use tracing::debug;

/// Identifier of the framework's global command object
pub const ENTRY_POINT: &str = "cy";

/// Package an import must come from to keep the entry point genuine
pub const SOURCE_PACKAGE: &str = "cypress";

/// What a name resolved to in its enclosing scopes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding<'a> {
    /// Declared locally: variable, parameter, function or class
    Local(Node<'a>),
    /// Brought in by an import statement
    Import { source: String },
}

/// Answers "is this `cy` the global?" for one parsed file
///
/// Verdicts are cached per identifier node, so the detector and the
/// orchestrator can ask about the same usage without walking twice.
pub struct ScopeResolver<'a> {
    source: &'a str,
    shadowing_declarations: Vec<Node<'a>>,
    verdicts: HashMap<usize, bool>,
}

impl<'a> ScopeResolver<'a> {
    /// Build a resolver over a file, indexing every `cy` declaration up front
    pub fn new(root: Node<'a>, source: &'a str) -> Self {
        let shadowing_declarations = find_all(root, |n| declares_entry_point(n, source));
        if !shadowing_declarations.is_empty() {
            debug!(
                count = shadowing_declarations.len(),
                "local declarations of '{ENTRY_POINT}' found"
            );
        }
        Self {
            source,
            shadowing_declarations,
            verdicts: HashMap::new(),
        }
    }

    /// The source text the resolver was built over
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Whether `ident` (an identifier spelled `cy`) refers to the framework global
    pub fn is_entry_point_global(&mut self, ident: &Node<'a>) -> bool {
        if let Some(&verdict) = self.verdicts.get(&ident.id()) {
            return verdict;
        }
        let verdict = self.resolve_uncached(ident);
        self.verdicts.insert(ident.id(), verdict);
        verdict
    }

    fn resolve_uncached(&self, ident: &Node<'a>) -> bool {
        if ident.kind() != "identifier" || node_text(ident, self.source) != ENTRY_POINT {
            return false;
        }

        match self.resolve_binding(ident) {
            Some(Binding::Local(_)) => return false,
            Some(Binding::Import { source }) if !source.contains(SOURCE_PACKAGE) => {
                return false
            }
            _ => {}
        }

        !self.lexically_shadowed(ident)
    }

    /// Resolve the binding `ident` refers to, innermost scope first
    pub fn resolve_binding(&self, ident: &Node<'a>) -> Option<Binding<'a>> {
        let name = node_text(ident, self.source);
        ancestors(ident).find_map(|scope| self.binding_in_scope(&scope, name))
    }

    /// Bindings introduced directly by `scope`
    fn binding_in_scope(&self, scope: &Node<'a>, name: &str) -> Option<Binding<'a>> {
        match scope.kind() {
            "program" | "statement_block" | "switch_case" | "switch_default" => {
                named_children(scope)
                    .into_iter()
                    .find_map(|stmt| self.binding_in_statement(&stmt, name))
            }
            "function_declaration"
            | "function_expression"
            | "function"
            | "generator_function"
            | "generator_function_declaration"
            | "arrow_function"
            | "method_definition" => {
                // a named function expression sees its own name
                let is_expression = matches!(
                    scope.kind(),
                    "function_expression" | "function" | "generator_function"
                );
                if let Some(own) = scope.child_by_field_name("name") {
                    if is_expression && node_text(&own, self.source) == name {
                        return Some(Binding::Local(own));
                    }
                }
                let params = scope
                    .child_by_field_name("parameters")
                    .or_else(|| scope.child_by_field_name("parameter"))?;
                self.binding_in_pattern(&params, name)
            }
            "catch_clause" => scope
                .child_by_field_name("parameter")
                .and_then(|p| self.binding_in_pattern(&p, name)),
            "for_in_statement" => scope
                .child_by_field_name("left")
                .and_then(|p| self.binding_in_pattern(&p, name)),
            "for_statement" => scope
                .child_by_field_name("initializer")
                .and_then(|init| self.binding_in_statement(&init, name)),
            _ => None,
        }
    }

    fn binding_in_statement(&self, stmt: &Node<'a>, name: &str) -> Option<Binding<'a>> {
        match stmt.kind() {
            "lexical_declaration" | "variable_declaration" => named_children(stmt)
                .into_iter()
                .filter(|d| d.kind() == "variable_declarator")
                .find_map(|d| {
                    d.child_by_field_name("name")
                        .and_then(|p| self.binding_in_pattern(&p, name))
                }),
            "function_declaration"
            | "generator_function_declaration"
            | "class_declaration"
            | "abstract_class_declaration" => {
                let own = stmt.child_by_field_name("name")?;
                (node_text(&own, self.source) == name).then_some(Binding::Local(own))
            }
            "export_statement" => stmt
                .child_by_field_name("declaration")
                .and_then(|decl| self.binding_in_statement(&decl, name)),
            "import_statement" => self.binding_in_import(stmt, name),
            _ => None,
        }
    }

    fn binding_in_import(&self, stmt: &Node<'a>, name: &str) -> Option<Binding<'a>> {
        let imported = find_all(*stmt, |n| {
            matches!(n.kind(), "identifier") && node_text(n, self.source) == name
        });
        let local = imported.into_iter().find(|n| {
            // `import { cy as other }` binds `other`, not `cy`
            n.parent()
                .filter(|p| p.kind() == "import_specifier")
                .and_then(|p| p.child_by_field_name("alias"))
                .map_or(true, |alias| alias.id() == n.id())
        })?;
        debug!(line = local.start_position().row + 1, "'{name}' bound by import");
        let source = stmt
            .child_by_field_name("source")
            .map(|s| node_text(&s, self.source).to_string())
            .unwrap_or_default();
        Some(Binding::Import { source })
    }

    /// Find `name` among the identifiers a parameter list or pattern binds
    fn binding_in_pattern(&self, pattern: &Node<'a>, name: &str) -> Option<Binding<'a>> {
        match pattern.kind() {
            "identifier" | "shorthand_property_identifier_pattern" => {
                (node_text(pattern, self.source) == name).then_some(Binding::Local(*pattern))
            }
            "pair_pattern" => pattern
                .child_by_field_name("value")
                .and_then(|v| self.binding_in_pattern(&v, name)),
            "assignment_pattern" | "object_assignment_pattern" => pattern
                .child_by_field_name("left")
                .and_then(|l| self.binding_in_pattern(&l, name)),
            "required_parameter" | "optional_parameter" => pattern
                .child_by_field_name("pattern")
                .and_then(|p| self.binding_in_pattern(&p, name)),
            "formal_parameters" | "object_pattern" | "array_pattern" | "rest_pattern" => {
                named_children(pattern)
                    .into_iter()
                    .find_map(|child| self.binding_in_pattern(&child, name))
            }
            _ => None,
        }
    }

    /// Lexical fallback: an earlier declaration inside any enclosing block
    fn lexically_shadowed(&self, ident: &Node<'a>) -> bool {
        let usage = ident.start_byte();
        ancestors(ident)
            .filter(|scope| matches!(scope.kind(), "statement_block" | "program"))
            .any(|scope| {
                self.shadowing_declarations.iter().any(|decl| {
                    decl.start_byte() >= scope.start_byte()
                        && decl.end_byte() <= scope.end_byte()
                        && decl.start_byte() < usage
                })
            })
    }
}

/// `const|let|var cy = …` (with an initializer) or `function cy(…)`
fn declares_entry_point(node: &Node, source: &str) -> bool {
    match node.kind() {
        "lexical_declaration" | "variable_declaration" => named_children(node).iter().any(|d| {
            d.kind() == "variable_declarator"
                && d.child_by_field_name("value").is_some()
                && d.child_by_field_name("name")
                    .is_some_and(|n| n.kind() == "identifier" && node_text(&n, source) == ENTRY_POINT)
        }),
        "function_declaration" => node
            .child_by_field_name("name")
            .is_some_and(|n| node_text(&n, source) == ENTRY_POINT),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pwmigrate_ast::{AdapterRegistry, LanguageId, SourceTree};

    fn parse(source: &str) -> SourceTree {
        AdapterRegistry::new()
            .parse(source, LanguageId::TypeScript)
            .unwrap()
    }

    /// Verdicts for every `cy` identifier used as a member-expression object
    fn verdicts(source: &str) -> Vec<bool> {
        let tree = parse(source);
        let mut resolver = ScopeResolver::new(tree.root_node(), source);
        find_all(tree.root_node(), |n| n.kind() == "member_expression")
            .into_iter()
            .filter_map(|m| m.child_by_field_name("object"))
            .filter(|o| node_text(o, source) == ENTRY_POINT)
            .map(|o| resolver.is_entry_point_global(&o))
            .collect()
    }

    // ============================================================
    // Genuine global
    // ============================================================

    #[test]
    fn test_plain_global() {
        assert_eq!(verdicts("it('x', () => { cy.visit('/'); });"), vec![true]);
    }

    #[test]
    fn test_import_from_framework_keeps_global() {
        let source = "import { cy } from 'cypress';\ncy.get('a');";
        assert_eq!(verdicts(source), vec![true]);
    }

    #[test]
    fn test_unrelated_identifiers_ignored() {
        let source = "const cyx = 1; cy.get('a');";
        assert_eq!(verdicts(source), vec![true]);
    }

    // ============================================================
    // Shadowing
    // ============================================================

    #[test]
    fn test_local_const_shadows() {
        let source = "function setup() {\n  const cy = createMockCy();\n  cy.get('.x');\n}";
        assert_eq!(verdicts(source), vec![false]);
    }

    #[test]
    fn test_parameter_shadows() {
        assert_eq!(verdicts("function run(cy) { cy.get('a'); }"), vec![false]);
        assert_eq!(verdicts("const run = (cy) => cy.get('a');"), vec![false]);
        assert_eq!(verdicts("const run = cy => cy.get('a');"), vec![false]);
    }

    #[test]
    fn test_typed_and_destructured_parameters_shadow() {
        assert_eq!(verdicts("function run(cy: Api) { cy.get('a'); }"), vec![false]);
        assert_eq!(verdicts("function run({ cy }) { cy.get('a'); }"), vec![false]);
        assert_eq!(verdicts("function run([cy]) { cy.get('a'); }"), vec![false]);
    }

    #[test]
    fn test_catch_parameter_shadows() {
        let source = "try { go(); } catch (cy) { cy.get('a'); }";
        assert_eq!(verdicts(source), vec![false]);
    }

    #[test]
    fn test_for_of_variable_shadows() {
        let source = "for (const cy of mocks) { cy.get('a'); }";
        assert_eq!(verdicts(source), vec![false]);
    }

    #[test]
    fn test_import_from_elsewhere_shadows() {
        let source = "import { cy } from './fake';\ncy.get('a');";
        assert_eq!(verdicts(source), vec![false]);
    }

    #[test]
    fn test_aliased_import_does_not_bind_original_name() {
        let source = "import { cy as fake } from './fake';\ncy.get('a');";
        assert_eq!(verdicts(source), vec![true]);
    }

    #[test]
    fn test_hoisted_function_declaration_shadows_earlier_usage() {
        let source = "cy.get('a');\nfunction cy() {}";
        assert_eq!(verdicts(source), vec![false]);
    }

    // ============================================================
    // Lexical fallback approximation
    // ============================================================

    #[test]
    fn test_fallback_rejects_usage_after_unrelated_scope_declaration() {
        // The binding walk alone would accept the second usage; the
        // fallback sees the earlier declaration through the program node.
        let source = "function mock() {\n  const cy = fake();\n}\ncy.get('real');";
        assert_eq!(verdicts(source), vec![false]);
    }

    #[test]
    fn test_fallback_ignores_later_declarations_in_other_scopes() {
        let source = "cy.get('real');\nfunction mock() {\n  const cy = fake();\n}";
        assert_eq!(verdicts(source), vec![true]);
    }

    #[test]
    fn test_verdict_cached_per_node() {
        let source = "cy.get('a');";
        let tree = parse(source);
        let mut resolver = ScopeResolver::new(tree.root_node(), source);
        let ident = find_all(tree.root_node(), |n| n.kind() == "identifier")[0];
        assert!(resolver.is_entry_point_global(&ident));
        assert!(resolver.is_entry_point_global(&ident));
        assert_eq!(resolver.verdicts.len(), 1);
    }

    #[test]
    fn test_resolve_binding_reports_import_source() {
        let source = "import cy from 'cypress';\ncy.get('a');";
        let tree = parse(source);
        let resolver = ScopeResolver::new(tree.root_node(), source);
        let usage = find_all(tree.root_node(), |n| {
            n.kind() == "identifier" && node_text(n, source) == "cy"
        })
        .into_iter()
        .last()
        .unwrap();
        assert_eq!(
            resolver.resolve_binding(&usage),
            Some(Binding::Import {
                source: "'cypress'".to_string()
            })
        );
    }
}
