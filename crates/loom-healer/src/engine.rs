//! ---
//! loom_section: "06-healer"
//! loom_subsection: "engine"
//! loom_type: "source"
//! loom_scope: "code"
//! loom_description: "Applies a fix set to source text in one offset-safe batch, group order as a tiebreak only."
//! loom_version: "v0.1.0"
//! loom_owner: "tbd"
//! ---
use tracing::{info, warn};

use crate::edit::apply_edits;
use crate::fixes::Fix;

/// Applies `fixes` to `source` in a single batch. Every `Fix.edit.span` is an
/// absolute offset into `source` as the analyzer produced it, so all edits
/// must go through one `apply_edits` call — `apply_edits`'s descending-offset
/// application keeps every span valid across the whole batch, whereas
/// applying groups as separate passes against a progressively-mutated string
/// would relocate any span still pending beneath an earlier group's rewrite.
/// Fixes are ordered by [`FixType::group`] first (async conversion, then
/// added methods, then everything else, then constructor-signature fixes
/// last) purely as a priority tiebreak for edits that land at the same
/// offset — e.g. two lifecycle-method insertions at the same class-body-end
/// point. Returns the rewritten source.
pub fn apply_fixes(component_name: &str, source: &str, fixes: &[Fix]) -> String {
    let mut ordered: Vec<&Fix> = fixes.iter().collect();
    ordered.sort_by_key(|f| f.fix_type.group());

    let edits = ordered.iter().map(|f| f.edit.clone()).collect();
    let current = apply_edits(source, edits);

    for fix in &ordered {
        info!(component = component_name, fix = fix.fix_type.as_str(), "applied fix: {}", fix.description);
    }
    if current == source {
        warn!(component = component_name, "healing produced no textual change");
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::SourceEdit;
    use crate::fixes::FixType;

    #[test]
    fn groups_apply_in_fixed_order() {
        let source = "class X(Transformer):\n    def transform(self, item):\n        pass\n";
        let fixes = vec![
            Fix::new(FixType::FixConstructorSignature, "ctor", 0.95, SourceEdit::insert_at(0, "# ctor\n")),
            Fix::new(FixType::ConvertSyncToAsync, "async", 0.95, SourceEdit::replace(27..30, "async def")),
        ];
        let healed = apply_fixes("x", source, &fixes);
        assert!(healed.starts_with("# ctor\n"));
        assert!(healed.contains("async def transform"));
    }

    #[test]
    fn no_op_when_fix_list_is_empty() {
        let source = "class X:\n    pass\n";
        assert_eq!(apply_fixes("x", source, &[]), source);
    }
}
