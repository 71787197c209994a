//! Core module for the pwmigrate engine
//!
//! This module provides the spec-file migration engine: from a parsed file to
//! a committed Playwright rewrite.
//!
//! # Architecture
//!
//! - `models`: Configuration, engine options and run reports
//! - `error`: Error types using thiserror
//! - `literal`: String-literal extraction
//! - `scope`: Scope resolution for the `cy` entry point
//! - `detector`: File-level gate
//! - `test_blocks`: describe/it/hook rewriting
//! - `chain`: Command chain decomposition
//! - `mappings`: Assertion and action keyword tables
//! - `interpreter`: Chain-to-Playwright translation
//! - `engine`: Main MigrationEngine orchestration
//! - `walker`: Spec discovery with SpecWalker trait + SpecFinder

pub mod chain;
pub mod detector;
pub mod engine;
pub mod error;
pub mod interpreter;
pub mod literal;
pub mod mappings;
pub mod models;
pub mod scope;
pub mod test_blocks;
pub mod walker;

// Re-export commonly used types
pub use engine::{MigrationEngine, PLAYWRIGHT_IMPORT};
pub use error::{MigrateError, Result, ResultExt};
pub use models::{
    ChainStats, EngineOptions, FileReport, FileStatus, MigrateConfig, MigrationOutcome, RunReport,
};
pub use walker::{collect_targets, SpecFinder, SpecWalker, WalkConfig};
