//! Language identification for test source files

use serde::{Deserialize, Serialize};
use std::path::Path;

// ============================================================================
// Language Identification
// ============================================================================

/// Language identifier for test source files
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum LanguageId {
    TypeScript,
    Tsx,
    JavaScript,
    Jsx,
    Unknown,
}

impl LanguageId {
    /// Detect language from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "ts" | "mts" | "cts" => Self::TypeScript,
            "tsx" => Self::Tsx,
            "js" | "mjs" | "cjs" => Self::JavaScript,
            "jsx" => Self::Jsx,
            _ => Self::Unknown,
        }
    }

    /// Detect language from a path's extension
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .map(Self::from_extension)
            .unwrap_or(Self::Unknown)
    }

    /// Get canonical file extension
    pub fn extension(&self) -> &'static str {
        match self {
            Self::TypeScript => "ts",
            Self::Tsx => "tsx",
            Self::JavaScript => "js",
            Self::Jsx => "jsx",
            Self::Unknown => "",
        }
    }

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Self::TypeScript => "TypeScript",
            Self::Tsx => "TSX",
            Self::JavaScript => "JavaScript",
            Self::Jsx => "JSX",
            Self::Unknown => "Unknown",
        }
    }

    /// Whether a parser exists for this language
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl std::fmt::Display for LanguageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(LanguageId::from_extension("ts"), LanguageId::TypeScript);
        assert_eq!(LanguageId::from_extension("CTS"), LanguageId::TypeScript);
        assert_eq!(LanguageId::from_extension("tsx"), LanguageId::Tsx);
        assert_eq!(LanguageId::from_extension("mjs"), LanguageId::JavaScript);
        assert_eq!(LanguageId::from_extension("jsx"), LanguageId::Jsx);
        assert_eq!(LanguageId::from_extension("py"), LanguageId::Unknown);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(
            LanguageId::from_path(Path::new("cypress/e2e/login.cy.ts")),
            LanguageId::TypeScript
        );
        assert_eq!(LanguageId::from_path(Path::new("Makefile")), LanguageId::Unknown);
        assert!(!LanguageId::from_path(Path::new("a.rb")).is_supported());
    }

    #[test]
    fn test_extension_roundtrip() {
        for lang in [
            LanguageId::TypeScript,
            LanguageId::Tsx,
            LanguageId::JavaScript,
            LanguageId::Jsx,
        ] {
            assert_eq!(LanguageId::from_extension(lang.extension()), lang);
        }
    }
}
