//! Migration Engine - Main orchestration for pwmigrate
//!
//! The MigrationEngine is the primary interface for migrating a spec file.
//! It parses the source, gates on genuine `cy` usage, rewrites test
//! structure, translates every outermost command chain, and commits all
//! edits in one pass.

use std::collections::HashSet;
use std::path::Path;

use lazy_static::lazy_static;
use pwmigrate_ast::{find_all, AdapterRegistry, EditSet, LanguageId, Node, SourceTree};
use regex::Regex;
use tracing::{debug, info, warn};

use crate::core::chain::{decompose, is_chain_root, is_entry_command};
use crate::core::detector::file_uses_framework;
use crate::core::error::{MigrateError, Result, ResultExt};
use crate::core::interpreter::interpret;
use crate::core::models::{ChainStats, EngineOptions, MigrationOutcome};
use crate::core::scope::ScopeResolver;
use crate::core::test_blocks::rewrite_test_blocks;

/// Import line prefixed to migrated files
pub const PLAYWRIGHT_IMPORT: &str = "import { test, expect } from '@playwright/test';";

lazy_static! {
    // `from '@playwright/test'` or `require("@playwright/test")`, either quote style
    static ref PLAYWRIGHT_MODULE: Regex =
        Regex::new(r#"(?:\bfrom\s*|\brequire\(\s*)['"]@playwright/test['"]"#).unwrap();
}

/// Per-file transformation state
struct TransformContext<'a> {
    source: &'a str,
    resolver: ScopeResolver<'a>,
    edits: EditSet,
    processed: HashSet<usize>,
    any_genuine_match: bool,
    stats: ChainStats,
}

impl<'a> TransformContext<'a> {
    fn new(root: Node<'a>, source: &'a str) -> Self {
        Self {
            source,
            resolver: ScopeResolver::new(root, source),
            edits: EditSet::new(),
            processed: HashSet::new(),
            any_genuine_match: false,
            stats: ChainStats::default(),
        }
    }

    /// Translate `call` if it is the outermost call of a genuine chain
    fn visit_call(&mut self, call: Node<'a>) {
        if self.processed.contains(&call.id()) {
            return;
        }
        // inside a chain that was already replaced, e.g. a `.then` callback
        if self.edits.covers(call.start_byte(), call.end_byte()) {
            return;
        }
        if !is_entry_command(&call, &mut self.resolver) || !is_chain_root(&call, &mut self.resolver) {
            return;
        }

        let chain = decompose(call, self.source);
        if chain.is_empty() {
            return;
        }
        let Some(text) = interpret(&chain, self.source) else {
            debug!(line = call.start_position().row + 1, "chain produced no output");
            return;
        };
        let todos = text.matches("TODO").count();

        match self.edits.replace(&call, text) {
            Ok(()) => {
                self.processed.extend(chain.iter().map(|link| link.node.id()));
                self.any_genuine_match = true;
                self.stats.chains_rewritten += 1;
                self.stats.todo_markers += todos;
            }
            Err(e) => warn!(
                line = call.start_position().row + 1,
                "skipping chain: {}", e
            ),
        }
    }
}

/// Prefix the Playwright import unless the file already has one
fn inject_import(output: String) -> String {
    if PLAYWRIGHT_MODULE.is_match(&output) {
        output
    } else {
        format!("{PLAYWRIGHT_IMPORT}\n\n{output}")
    }
}

/// Entry point for migrating Cypress sources
pub struct MigrationEngine {
    registry: AdapterRegistry,
    options: EngineOptions,
}

impl MigrationEngine {
    /// Create an engine with default options
    pub fn new() -> Self {
        Self::with_options(EngineOptions::default())
    }

    /// Create an engine with explicit options
    pub fn with_options(options: EngineOptions) -> Self {
        Self {
            registry: AdapterRegistry::new(),
            options,
        }
    }

    /// The options this engine runs with
    pub fn options(&self) -> EngineOptions {
        self.options
    }

    /// Parse and migrate a source text
    pub fn migrate_source(&self, source: &str, language: LanguageId) -> Result<MigrationOutcome> {
        let tree = self.registry.parse(source, language)?;
        self.migrate_tree(&tree)
    }

    /// Read, parse and migrate a file, enforcing a size limit
    pub fn migrate_file(&self, path: &Path, max_file_size: u64) -> Result<MigrationOutcome> {
        let language = LanguageId::from_path(path);
        if !language.is_supported() {
            return Err(MigrateError::UnsupportedFile {
                path: path.to_path_buf(),
            });
        }
        let metadata = std::fs::metadata(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => MigrateError::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => MigrateError::Io(e),
        })?;
        if metadata.len() > max_file_size {
            return Err(MigrateError::FileTooLarge {
                path: path.to_path_buf(),
                size: metadata.len(),
                limit: max_file_size,
            });
        }
        let bytes = std::fs::read(path)?;
        let source = String::from_utf8(bytes)
            .map_err(MigrateError::from)
            .context(path.display().to_string())?;
        self.migrate_source(&source, language)
            .context(path.display().to_string())
    }

    /// Migrate an already parsed tree
    pub fn migrate_tree(&self, tree: &SourceTree) -> Result<MigrationOutcome> {
        let source = tree.source();
        let root = tree.root_node();
        let mut cx = TransformContext::new(root, source);

        if !file_uses_framework(root, &mut cx.resolver) {
            debug!(language = %tree.language(), "no global cy usage, leaving file untouched");
            return Ok(MigrationOutcome::Unchanged);
        }

        cx.stats.test_blocks_rewritten = rewrite_test_blocks(root, source, &mut cx.edits);
        cx.any_genuine_match = cx.stats.test_blocks_rewritten > 0;

        for call in find_all(root, |n| n.kind() == "call_expression") {
            cx.visit_call(call);
        }

        if !cx.any_genuine_match || cx.edits.is_empty() {
            return Ok(MigrationOutcome::Unchanged);
        }

        let stats = cx.stats;
        let mut output = cx.edits.commit(source)?;
        if self.options.inject_import {
            output = inject_import(output);
        }

        info!(
            chains = stats.chains_rewritten,
            test_blocks = stats.test_blocks_rewritten,
            todos = stats.todo_markers,
            "migrated source"
        );
        Ok(MigrationOutcome::Migrated {
            source: output,
            stats,
        })
    }
}

impl Default for MigrationEngine {
    fn default() -> Self {
        Self::new()
    }
}
