//! Ranged text edits
//!
//! Rewrites are collected as `(byte range, replacement)` pairs against the
//! original text and applied in a single pass. Ranges must not overlap;
//! `EditSet::push` enforces this at queue time, so `commit` never has to
//! guess which of two conflicting rewrites wins.

use crate::error::{AstError, Result};
use tree_sitter::Node;

/// One replacement of `start..end` in the original text
///
/// A zero-width range (`start == end`) is an insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub start: usize,
    pub end: usize,
    pub replacement: String,
}

impl Edit {
    /// Replace the full range of a node
    pub fn replace(node: &Node, replacement: impl Into<String>) -> Self {
        Self {
            start: node.start_byte(),
            end: node.end_byte(),
            replacement: replacement.into(),
        }
    }

    /// Insert text at a byte offset
    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self {
            start: at,
            end: at,
            replacement: text.into(),
        }
    }

    fn is_insertion(&self) -> bool {
        self.start == self.end
    }

    /// Whether two edits touch the same bytes
    ///
    /// An insertion only conflicts with a replacement that strictly contains
    /// its offset; insertions at a replacement's boundary are fine.
    fn overlaps(&self, other: &Edit) -> bool {
        match (self.is_insertion(), other.is_insertion()) {
            (true, true) => false,
            (true, false) => other.start < self.start && self.start < other.end,
            (false, true) => self.start < other.start && other.start < self.end,
            (false, false) => self.start < other.end && other.start < self.end,
        }
    }
}

/// Accumulated, non-overlapping edits for one file
#[derive(Debug, Default, Clone)]
pub struct EditSet {
    edits: Vec<Edit>,
}

impl EditSet {
    /// Create an empty edit set
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an edit, rejecting it if it overlaps one already queued
    pub fn push(&mut self, edit: Edit) -> Result<()> {
        if edit.start > edit.end {
            return Err(AstError::EditOutOfBounds {
                start: edit.start,
                end: edit.end,
                len: 0,
            });
        }
        if let Some(existing) = self.edits.iter().find(|e| e.overlaps(&edit)) {
            return Err(AstError::OverlappingEdit {
                start: edit.start,
                end: edit.end,
                existing_start: existing.start,
                existing_end: existing.end,
            });
        }
        self.edits.push(edit);
        Ok(())
    }

    /// Queue a replacement of a node's full range
    pub fn replace(&mut self, node: &Node, replacement: impl Into<String>) -> Result<()> {
        self.push(Edit::replace(node, replacement))
    }

    /// Queue an insertion
    pub fn insert(&mut self, at: usize, text: impl Into<String>) -> Result<()> {
        self.push(Edit::insert(at, text))
    }

    /// Whether `start..end` lies inside a queued replacement
    pub fn covers(&self, start: usize, end: usize) -> bool {
        self.edits
            .iter()
            .any(|e| !e.is_insertion() && e.start <= start && end <= e.end)
    }

    /// Number of queued edits
    pub fn len(&self) -> usize {
        self.edits.len()
    }

    /// Whether nothing is queued
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Queued edits in queue order
    pub fn edits(&self) -> &[Edit] {
        &self.edits
    }

    /// Apply every edit to `source` in one pass and return the new text
    pub fn commit(mut self, source: &str) -> Result<String> {
        // Stable sort keeps queue order for insertions at the same offset;
        // an insertion sorts ahead of a replacement starting there.
        self.edits.sort_by_key(|e| (e.start, e.end));

        let added: usize = self.edits.iter().map(|e| e.replacement.len()).sum();
        let mut out = String::with_capacity(source.len() + added);
        let mut cursor = 0;

        for edit in &self.edits {
            if edit.end > source.len()
                || !source.is_char_boundary(edit.start)
                || !source.is_char_boundary(edit.end)
            {
                return Err(AstError::EditOutOfBounds {
                    start: edit.start,
                    end: edit.end,
                    len: source.len(),
                });
            }
            out.push_str(&source[cursor..edit.start]);
            out.push_str(&edit.replacement);
            cursor = edit.end;
        }
        out.push_str(&source[cursor..]);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edit(start: usize, end: usize, text: &str) -> Edit {
        Edit {
            start,
            end,
            replacement: text.to_string(),
        }
    }

    // =========================================================================
    // Commit
    // =========================================================================

    #[test]
    fn test_commit_applies_in_source_order() {
        let source = "cy.visit('/'); cy.reload();";
        let mut set = EditSet::new();
        // queued out of order on purpose
        set.push(edit(15, 26, "await page.reload()")).unwrap();
        set.push(edit(0, 13, "await page.goto('/')")).unwrap();
        assert_eq!(
            set.commit(source).unwrap(),
            "await page.goto('/'); await page.reload();"
        );
    }

    #[test]
    fn test_commit_empty_set_is_identity() {
        let set = EditSet::new();
        assert!(set.is_empty());
        assert_eq!(set.commit("unchanged").unwrap(), "unchanged");
    }

    #[test]
    fn test_insertion_before_replacement_at_same_offset() {
        let mut set = EditSet::new();
        set.push(edit(0, 8, "()")).unwrap();
        set.insert(0, "async ").unwrap();
        assert_eq!(set.commit("function () {}").unwrap(), "async () () {}");
    }

    #[test]
    fn test_commit_out_of_bounds() {
        let mut set = EditSet::new();
        set.push(edit(2, 40, "x")).unwrap();
        let err = set.commit("short").unwrap_err();
        assert!(matches!(err, AstError::EditOutOfBounds { len: 5, .. }));
    }

    #[test]
    fn test_commit_rejects_split_utf8() {
        let mut set = EditSet::new();
        // 'é' is two bytes starting at offset 1
        set.push(edit(2, 3, "x")).unwrap();
        assert!(set.commit("aéb").is_err());
    }

    // =========================================================================
    // Overlap Rules
    // =========================================================================

    #[test]
    fn test_overlapping_replacements_rejected() {
        let mut set = EditSet::new();
        set.push(edit(0, 10, "a")).unwrap();
        let err = set.push(edit(5, 15, "b")).unwrap_err();
        assert_eq!(
            err,
            AstError::OverlappingEdit {
                start: 5,
                end: 15,
                existing_start: 0,
                existing_end: 10
            }
        );
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_nested_replacement_rejected() {
        let mut set = EditSet::new();
        set.push(edit(0, 30, "outer")).unwrap();
        assert!(set.push(edit(4, 8, "inner")).is_err());
    }

    #[test]
    fn test_adjacent_replacements_allowed() {
        let mut set = EditSet::new();
        set.push(edit(0, 5, "a")).unwrap();
        set.push(edit(5, 9, "b")).unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_insertion_inside_replacement_rejected() {
        let mut set = EditSet::new();
        set.push(edit(0, 10, "a")).unwrap();
        assert!(set.insert(4, "x").is_err());
        assert!(set.insert(10, "y").is_ok());
    }

    #[test]
    fn test_inverted_range_rejected() {
        let mut set = EditSet::new();
        assert!(set.push(edit(9, 3, "x")).is_err());
    }

    // =========================================================================
    // Coverage
    // =========================================================================

    #[test]
    fn test_covers() {
        let mut set = EditSet::new();
        set.push(edit(10, 40, "chain")).unwrap();
        set.insert(50, "async ").unwrap();
        assert!(set.covers(12, 20));
        assert!(set.covers(10, 40));
        assert!(!set.covers(5, 20));
        assert!(!set.covers(50, 50));
    }
}
