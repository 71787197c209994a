//! pwmigrate - Cypress to Playwright test migration
//!
//! This library rewrites Cypress end-to-end specs into Playwright Test specs
//! by working on the syntax tree rather than on text: `cy` command chains are
//! decomposed, translated link by link, and spliced back as non-overlapping
//! edits. It is designed to be consumed by:
//! - The CLI binary (src/bin/pwmigrate.rs)
//! - Other tools embedding the engine
//!
//! # Architecture
//!
//! This crate follows the "Library-First" pattern:
//! - **lib.rs** (this file): Pure logic, no CLI concerns
//! - **bin/pwmigrate.rs**: Thin wrapper that calls the library
//!
//! # Example
//!
//! ```
//! use pwmigrate::{migrate_source, LanguageId};
//!
//! let out = migrate_source("cy.get('#go').click();\n", LanguageId::JavaScript).unwrap();
//! assert!(out.unwrap().contains("await page.locator('#go').click();"));
//! ```

pub mod companions;
pub mod core;

use std::path::Path;

pub use crate::companions::{inventory_custom_commands, migrate_config};
pub use crate::core::{
    ChainStats, EngineOptions, MigrateConfig, MigrateError, MigrationEngine, MigrationOutcome,
    Result,
};
pub use pwmigrate_ast::LanguageId;

/// Returns the version of the pwmigrate library
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Migrate one spec source with default options
///
/// Returns `None` when the source is not a Cypress spec or needs no change.
pub fn migrate_source(source: &str, language: LanguageId) -> Result<Option<String>> {
    let outcome = MigrationEngine::new().migrate_source(source, language)?;
    Ok(outcome.migrated_source().map(str::to_string))
}

/// Migrate one spec file on disk with a project config, without writing it
pub fn migrate_file(path: &Path, config: &MigrateConfig) -> Result<MigrationOutcome> {
    MigrationEngine::with_options(config.engine_options()).migrate_file(path, config.max_file_size)
}
