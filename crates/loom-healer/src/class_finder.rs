//! ---
//! loom_section: "06-healer"
//! loom_subsection: "class_finder"
//! loom_type: "source"
//! loom_scope: "code"
//! loom_description: "Class-identification fallback chain over generated component source."
//! loom_version: "v0.1.0"
//! loom_owner: "tbd"
//! ---
use once_cell::sync::Lazy;
use regex::Regex;

/// A `class Name(Base1, Base2):` header located in source text.
#[derive(Debug, Clone)]
pub struct ClassMatch {
    pub name: String,
    pub bases: Vec<String>,
    /// Byte offset of the start of the header line.
    pub header_start: usize,
    /// Byte offset one past the header's trailing `:`.
    pub header_end: usize,
}

static CLASS_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*class[ \t]+(\w+)[ \t]*(?:\(([^)]*)\))?[ \t]*:").unwrap());

/// Bases the original system treats as already component-compatible, per
/// ast_self_healing.py's `valid_bases` list.
pub const VALID_COMPONENT_BASES: &[&str] = &["Source", "Sink", "Transformer", "Model", "Store", "APIEndpoint"];

/// Every class header found in `source`, in source order.
pub fn all_classes(source: &str) -> Vec<ClassMatch> {
    CLASS_HEADER
        .captures_iter(source)
        .map(|caps| {
            let whole = caps.get(0).unwrap();
            let bases = caps
                .get(2)
                .map(|m| m.as_str().split(',').map(|b| b.trim().to_owned()).filter(|b| !b.is_empty()).collect())
                .unwrap_or_default();
            ClassMatch {
                name: caps[1].to_owned(),
                bases,
                header_start: whole.start(),
                header_end: whole.end(),
            }
        })
        .collect()
}

/// Locate the component class for `class_name` in `source`, walking the
/// same fallback chain as the original: exact name, case-insensitive,
/// `Generated`/`Component_`-prefix-stripped pattern match, fuzzy substring,
/// inheritance from a known component base, and finally — if exactly one
/// class exists in the file — that sole class.
pub fn find_component_class(source: &str, class_name: &str) -> Option<ClassMatch> {
    let classes = all_classes(source);
    if classes.is_empty() {
        return None;
    }

    if let Some(m) = classes.iter().find(|c| c.name == class_name) {
        return Some(m.clone());
    }

    if let Some(m) = classes.iter().find(|c| c.name.eq_ignore_ascii_case(class_name)) {
        return Some(m.clone());
    }

    if let Some(m) = classes.iter().find(|c| {
        let stripped = c.name.replacen("Generated", "", 1).replacen("Component_", "", 1);
        c.name.contains(class_name) || c.name.ends_with(class_name) || stripped == class_name
    }) {
        return Some(m.clone());
    }

    if let Some(m) = classes
        .iter()
        .filter(|c| fuzzy_overlap(&c.name, class_name) >= 0.5)
        .max_by(|a, b| fuzzy_overlap(&a.name, class_name).total_cmp(&fuzzy_overlap(&b.name, class_name)))
    {
        return Some(m.clone());
    }

    if let Some(m) = classes
        .iter()
        .find(|c| c.bases.iter().any(|b| VALID_COMPONENT_BASES.contains(&b.as_str())))
    {
        return Some(m.clone());
    }

    if classes.len() == 1 {
        return Some(classes[0].clone());
    }

    None
}

/// Cheap word-token overlap similarity in `[0,1]`, standing in for the
/// original's dedicated fuzzy name-matching utility. Splits on `_` and
/// camel-case boundaries so unrelated names sharing common letters don't
/// score as similar.
fn fuzzy_overlap(a: &str, b: &str) -> f64 {
    let a_tokens = tokenize(a);
    let b_tokens = tokenize(b);
    if a_tokens.is_empty() || b_tokens.is_empty() {
        return 0.0;
    }
    let intersection = a_tokens.intersection(&b_tokens).count() as f64;
    let union = a_tokens.union(&b_tokens).count() as f64;
    intersection / union
}

fn tokenize(name: &str) -> std::collections::HashSet<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    for ch in name.chars() {
        if ch == '_' {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            continue;
        }
        if ch.is_uppercase() && !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
        current.push(ch);
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens.into_iter().map(|t| t.to_lowercase()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_wins() {
        let source = "class GeneratedStore_orders(Store):\n    pass\n";
        let found = find_component_class(source, "GeneratedStore_orders").unwrap();
        assert_eq!(found.name, "GeneratedStore_orders");
    }

    #[test]
    fn sole_class_fallback() {
        let source = "class SomethingElse:\n    pass\n";
        let found = find_component_class(source, "GeneratedStore_orders").unwrap();
        assert_eq!(found.name, "SomethingElse");
    }

    #[test]
    fn inheritance_fallback_when_multiple_classes_present() {
        let source = "class Helper:\n    pass\n\nclass Worker(Store):\n    pass\n";
        let found = find_component_class(source, "GeneratedStore_orders").unwrap();
        assert_eq!(found.name, "Worker");
    }

    #[test]
    fn no_classes_returns_none() {
        assert!(find_component_class("x = 1\n", "Anything").is_none());
    }
}
