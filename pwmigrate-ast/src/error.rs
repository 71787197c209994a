//! Error types for pwmigrate-ast
//!
//! Parsing is best-effort: Tree-sitter recovers from syntax errors and still
//! yields a tree, so `ParseError` only surfaces when no tree came back at all.

use crate::ir::LanguageId;
use thiserror::Error;

/// Errors from parsing and edit application
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AstError {
    /// Language not supported by any adapter
    #[error("Unsupported language: {0:?}")]
    UnsupportedLanguage(LanguageId),

    /// Parser produced no tree
    #[error("Parse error: {message}")]
    ParseError { message: String },

    /// Tree-sitter specific error (grammar/version mismatch)
    #[error("Tree-sitter error: {0}")]
    TreeSitterError(String),

    /// A new edit intersects an edit that was already queued
    #[error("Edit {start}..{end} overlaps queued edit {existing_start}..{existing_end}")]
    OverlappingEdit {
        start: usize,
        end: usize,
        existing_start: usize,
        existing_end: usize,
    },

    /// An edit range falls outside the text or splits a UTF-8 character
    #[error("Edit {start}..{end} is out of bounds for text of {len} bytes")]
    EditOutOfBounds { start: usize, end: usize, len: usize },
}

impl AstError {
    /// Create a parse error
    pub fn parse_error(message: impl Into<String>) -> Self {
        AstError::ParseError {
            message: message.into(),
        }
    }

    /// Check if this error came from the edit model rather than parsing
    pub fn is_edit_error(&self) -> bool {
        matches!(
            self,
            AstError::OverlappingEdit { .. } | AstError::EditOutOfBounds { .. }
        )
    }
}

/// Result type alias for AstError
pub type Result<T> = std::result::Result<T, AstError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AstError::UnsupportedLanguage(LanguageId::Unknown);
        assert!(err.to_string().contains("Unsupported language"));

        let err = AstError::parse_error("no tree");
        assert!(err.to_string().contains("Parse error"));
        assert!(err.to_string().contains("no tree"));
    }

    #[test]
    fn test_overlapping_edit_display() {
        let err = AstError::OverlappingEdit {
            start: 4,
            end: 10,
            existing_start: 0,
            existing_end: 6,
        };
        let msg = err.to_string();
        assert!(msg.contains("4..10"));
        assert!(msg.contains("0..6"));
    }

    // =========================================================================
    // Classification
    // =========================================================================

    #[test]
    fn test_is_edit_error() {
        assert!(AstError::EditOutOfBounds {
            start: 3,
            end: 99,
            len: 10
        }
        .is_edit_error());
        assert!(!AstError::TreeSitterError("abi".to_string()).is_edit_error());
        assert!(!AstError::parse_error("x").is_edit_error());
    }

    #[test]
    fn test_error_clone_eq() {
        let err = AstError::TreeSitterError("version".to_string());
        assert_eq!(err.clone(), err);
    }
}
