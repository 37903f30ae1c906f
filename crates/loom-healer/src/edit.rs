//! ---
//! loom_section: "06-healer"
//! loom_subsection: "edit"
//! loom_type: "source"
//! loom_scope: "code"
//! loom_description: "Region/replacement source edits, applied in reverse source order."
//! loom_version: "v0.1.0"
//! loom_owner: "tbd"
//! ---
use std::ops::Range;

/// A single textual edit over a byte span of the source. A zero-length span
/// at `start == end` is a pure insertion. Stands in for an AST rewrite: the
/// original system mutates a parsed tree and re-emits source, but since this
/// tooling never parses or executes the generated component text, fixes are
/// expressed as region replacements instead, per spec.md §9's redesign note.
#[derive(Debug, Clone)]
pub struct SourceEdit {
    pub span: Range<usize>,
    pub replacement: String,
}

impl SourceEdit {
    pub fn insert_at(offset: usize, text: impl Into<String>) -> Self {
        Self {
            span: offset..offset,
            replacement: text.into(),
        }
    }

    pub fn replace(span: Range<usize>, text: impl Into<String>) -> Self {
        Self {
            span,
            replacement: text.into(),
        }
    }
}

/// Apply a batch of edits to `source`, in descending span-start order so
/// earlier edits never invalidate the byte offsets recorded for later ones.
/// Edits within a batch must not overlap.
pub fn apply_edits(source: &str, mut edits: Vec<SourceEdit>) -> String {
    edits.sort_by(|a, b| b.span.start.cmp(&a.span.start));
    let mut result = source.to_owned();
    for edit in edits {
        let start = edit.span.start.min(result.len());
        let end = edit.span.end.min(result.len()).max(start);
        result.replace_range(start..end, &edit.replacement);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_edit_offsets_survive_earlier_insertion() {
        let source = "abcdef";
        let edits = vec![
            SourceEdit::insert_at(0, "XX"),
            SourceEdit::replace(3..4, "Y"),
        ];
        assert_eq!(apply_edits(source, edits), "XXabcYef");
    }
}
