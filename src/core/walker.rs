//! Spec file discovery for pwmigrate
//!
//! This module provides the SpecWalker trait and a gitignore-aware
//! implementation that finds Cypress spec files under a directory.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use tracing::{debug, warn};

use crate::core::error::{MigrateError, Result};
use crate::core::models::MigrateConfig;

#[cfg(test)]
use mockall::automock;

/// Normalize path separators for cross-platform compatibility.
/// - Converts Windows backslashes to forward slashes
/// - Strips Windows UNC prefix `\\?\` if present
pub fn normalize_path_separators(path: &str) -> String {
    let stripped = path
        .strip_prefix(r"\\?\")
        .or_else(|| path.strip_prefix(r"\\.\"))
        .unwrap_or(path);
    stripped.replace('\\', "/")
}

/// Directory names that are never searched for specs.
const HYGIENE_EXCLUSIONS: &[&str] = &[
    // Version control
    ".git",
    ".hg",
    ".svn",
    // Package managers / dependencies
    "node_modules",
    ".npm",
    ".yarn",
    ".pnpm-store",
    // Build artifacts
    "dist",
    "build",
    "out",
    "coverage",
    ".next",
    ".nuxt",
    ".cache",
    // IDE / Editor
    ".idea",
    ".vscode",
];

/// Trait for spec discovery
///
/// This trait allows for mocking in tests and alternative implementations.
#[cfg_attr(test, automock)]
pub trait SpecWalker: Send + Sync {
    /// All spec files under `root`, sorted
    fn discover(&self, root: &Path) -> Result<Vec<PathBuf>>;
}

/// Configuration for spec discovery
#[derive(Debug, Clone)]
pub struct WalkConfig {
    /// Globs a relative path must match
    pub include: Vec<String>,
    /// Globs that exclude a relative path
    pub ignore: Vec<String>,
    /// Follow symlinks (default: false for safety)
    pub follow_symlinks: bool,
    /// Respect .gitignore files (default: true)
    pub respect_gitignore: bool,
}

impl From<&MigrateConfig> for WalkConfig {
    fn from(config: &MigrateConfig) -> Self {
        Self {
            include: config.include.clone(),
            ignore: config.ignore.clone(),
            follow_symlinks: config.follow_symlinks,
            respect_gitignore: true,
        }
    }
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self::from(&MigrateConfig::default())
    }
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

/// Gitignore-aware spec finder with a hygiene layer
pub struct SpecFinder {
    config: WalkConfig,
    include: GlobSet,
    ignore: GlobSet,
}

impl SpecFinder {
    /// Compile the include/ignore globs; a bad pattern is a config error
    pub fn new(config: WalkConfig) -> Result<Self> {
        let include = build_globset(&config.include)?;
        let ignore = build_globset(&config.ignore)?;
        Ok(Self {
            config,
            include,
            ignore,
        })
    }

    /// Check if a path should be excluded by hygiene rules.
    pub fn is_hygiene_excluded(path: &Path) -> bool {
        path.components().any(|c| {
            let name = c.as_os_str().to_string_lossy();
            HYGIENE_EXCLUSIONS.iter().any(|&pattern| name == pattern)
        })
    }

    /// Whether a path relative to the walk root is a spec to migrate
    pub fn is_spec(&self, relative: &Path) -> bool {
        let relative = normalize_path_separators(&relative.to_string_lossy());
        self.include.is_match(&relative) && !self.ignore.is_match(&relative)
    }
}

impl SpecWalker for SpecFinder {
    fn discover(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if !root.is_dir() {
            return Err(MigrateError::FileNotFound {
                path: root.to_path_buf(),
            });
        }

        let mut builder = WalkBuilder::new(root);
        builder
            .follow_links(self.config.follow_symlinks)
            .git_ignore(self.config.respect_gitignore)
            .git_global(self.config.respect_gitignore)
            .git_exclude(self.config.respect_gitignore)
            .require_git(false)
            .hidden(true);

        let mut specs = Vec::new();
        for result in builder.build() {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("walk error: {}", e);
                    continue;
                }
            };
            let path = entry.path();
            let relative = path.strip_prefix(root).unwrap_or(path);
            if Self::is_hygiene_excluded(relative) {
                continue;
            }
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }
            if self.is_spec(relative) {
                specs.push(path.to_path_buf());
            }
        }

        specs.sort();
        debug!(root = %root.display(), count = specs.len(), "discovered specs");
        Ok(specs)
    }
}

/// Expand CLI path arguments into the files to migrate
///
/// Files are taken as given (even when they do not match the include globs);
/// directories are searched with `walker`. The result is sorted and free of
/// duplicates.
pub fn collect_targets(walker: &dyn SpecWalker, paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut targets = Vec::new();
    for path in paths {
        if path.is_dir() {
            targets.extend(walker.discover(path)?);
        } else if path.is_file() {
            targets.push(path.clone());
        } else {
            return Err(MigrateError::FileNotFound { path: path.clone() });
        }
    }
    targets.sort();
    targets.dedup();
    Ok(targets)
}
