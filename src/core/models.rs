//! Core data models for pwmigrate
//!
//! Configuration, engine options, and the per-file and per-run results the
//! CLI reports.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::{MigrateError, Result, ResultExt};

/// Project-local config file name
pub const CONFIG_FILE_NAME: &str = ".pwmigrate.json";

/// Configuration loaded from .pwmigrate.json
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MigrateConfig {
    /// Patterns selecting spec files when a directory is walked (globs)
    #[serde(default = "default_include")]
    pub include: Vec<String>,
    /// Patterns to ignore (globs)
    #[serde(default)]
    pub ignore: Vec<String>,
    /// Maximum file size in bytes
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
    /// Prefix migrated files with the Playwright import
    #[serde(default = "default_true")]
    pub inject_import: bool,
    /// Follow symlinks while walking
    #[serde(default)]
    pub follow_symlinks: bool,
}

fn default_include() -> Vec<String> {
    vec![
        "**/*.cy.{js,jsx,ts,tsx}".to_string(),
        "**/cypress/e2e/**/*.{js,jsx,ts,tsx}".to_string(),
        "**/*.spec.{js,jsx,ts,tsx}".to_string(),
    ]
}

fn default_max_file_size() -> u64 {
    1_048_576 // 1MB
}

fn default_true() -> bool {
    true
}

impl Default for MigrateConfig {
    fn default() -> Self {
        Self {
            include: default_include(),
            ignore: Vec::new(),
            max_file_size: default_max_file_size(),
            inject_import: true,
            follow_symlinks: false,
        }
    }
}

impl MigrateConfig {
    /// Parse a config from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| MigrateError::invalid_config(e.to_string()))
    }

    /// Load a config file; a missing explicit path is an error
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(MigrateError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content).context(format!("loading {}", path.display()))
    }

    /// Load `.pwmigrate.json` from a project root, or defaults when absent
    pub fn discover(project_root: &Path) -> Result<Self> {
        let path = Self::default_path(project_root);
        if path.is_file() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Default config location for a project
    pub fn default_path(project_root: &Path) -> PathBuf {
        project_root.join(CONFIG_FILE_NAME)
    }

    /// The subset of settings the engine itself consumes
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            inject_import: self.inject_import,
        }
    }
}

/// Options that change what the engine emits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// Prefix output with `import { test, expect } from '@playwright/test'`
    pub inject_import: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            inject_import: true,
        }
    }
}

/// Counters for one migrated file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChainStats {
    pub chains_rewritten: usize,
    pub test_blocks_rewritten: usize,
    pub todo_markers: usize,
}

impl ChainStats {
    /// Fold another file's counters into this one
    pub fn absorb(&mut self, other: &ChainStats) {
        self.chains_rewritten += other.chains_rewritten;
        self.test_blocks_rewritten += other.test_blocks_rewritten;
        self.todo_markers += other.todo_markers;
    }
}

/// Result of running the engine over one source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// Not a Cypress file, or nothing to rewrite
    Unchanged,
    /// Rewritten source and what changed
    Migrated { source: String, stats: ChainStats },
}

impl MigrationOutcome {
    /// The migrated text, if any
    pub fn migrated_source(&self) -> Option<&str> {
        match self {
            MigrationOutcome::Unchanged => None,
            MigrationOutcome::Migrated { source, .. } => Some(source),
        }
    }

    /// Whether the engine produced new text
    pub fn is_migrated(&self) -> bool {
        matches!(self, MigrationOutcome::Migrated { .. })
    }
}

/// Status of one file in a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Migrated,
    Unchanged,
    Failed,
}

/// Report entry for one file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: String,
    pub status: FileStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<ChainStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Report for a whole run, serialized by `--json`
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub files: Vec<FileReport>,
    pub totals: ChainStats,
    pub migrated: usize,
    pub unchanged: usize,
    pub failed: usize,
}

impl RunReport {
    /// Record one file's result
    pub fn push(&mut self, report: FileReport) {
        match report.status {
            FileStatus::Migrated => self.migrated += 1,
            FileStatus::Unchanged => self.unchanged += 1,
            FileStatus::Failed => self.failed += 1,
        }
        if let Some(stats) = &report.stats {
            self.totals.absorb(stats);
        }
        self.files.push(report);
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
