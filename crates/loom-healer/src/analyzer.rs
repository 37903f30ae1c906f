//! ---
//! loom_section: "06-healer"
//! loom_subsection: "analyzer"
//! loom_type: "source"
//! loom_scope: "code"
//! loom_description: "Turns a failing TestResult plus component source into a list of candidate fixes."
//! loom_version: "v0.1.0"
//! loom_owner: "tbd"
//! ---
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

use loom_validator::TestResult;

use crate::class_finder::{find_component_class, VALID_COMPONENT_BASES};
use crate::edit::SourceEdit;
use crate::fixes::{Fix, FixType};

/// Standard-library names the healer knows how to import, mirroring
/// ast_self_healing.py's `common_imports` table (trimmed to what generated
/// component skeletons actually reference).
static IMPORT_MAP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("List", "from typing import List"),
        ("Dict", "from typing import Dict"),
        ("Any", "from typing import Any"),
        ("Optional", "from typing import Optional"),
        ("Union", "from typing import Union"),
        ("Tuple", "from typing import Tuple"),
        ("datetime", "from datetime import datetime"),
        ("Path", "from pathlib import Path"),
        ("json", "import json"),
        ("asyncio", "import asyncio"),
        ("logging", "import logging"),
        ("time", "import time"),
        ("uuid", "import uuid"),
        ("re", "import re"),
        ("os", "import os"),
        ("sys", "import sys"),
        ("defaultdict", "from collections import defaultdict"),
        ("Counter", "from collections import Counter"),
        ("deque", "from collections import deque"),
    ])
});

static NAME_ERROR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"NameError: name '(\w+)' is not defined").unwrap());

/// Analyzes one component's generated source against its validation
/// failures and proposes a set of fixes. Does not apply anything; see
/// [`crate::engine::HealingEngine`].
#[derive(Debug, Default)]
pub struct ComponentAstAnalyzer;

impl ComponentAstAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// `primary_method` is the base-primitive-specific method name
    /// (`transform`, `generate`, `consume`, `split`, `merge`) the component
    /// is expected to expose.
    pub fn analyze(
        &self,
        class_name: &str,
        source: &str,
        primary_method: &str,
        test_result: &TestResult,
        fallback_skeleton: &str,
    ) -> Vec<Fix> {
        if looks_unparsable(source) {
            return vec![Fix::new(
                FixType::EmergencySkeleton,
                format!("source for {class_name} is not recoverable; substituting an emergency skeleton"),
                0.5,
                SourceEdit::replace(0..source.len(), fallback_skeleton.to_owned()),
            )];
        }

        let mut fixes = Vec::new();

        let found = find_component_class(source, class_name);
        let Some(class_match) = found else {
            if let Some(only) = crate::class_finder::all_classes(source).into_iter().next() {
                fixes.push(inheritance_fix(&only.name, only.header_start, only.header_end, &only.bases));
            }
            return fixes;
        };

        if !test_result.contract_ok {
            fixes.extend(self.contract_fixes(&class_match.name, source, primary_method, test_result));
        }
        if !test_result.functional_ok && test_result.contract_ok {
            fixes.extend(self.functional_fixes(&class_match.name, source, primary_method));
        }
        fixes.extend(self.import_fixes(source, test_result));
        fixes.extend(self.super_call_fix(&class_match, source));

        if fixes.is_empty() {
            fixes.push(constructor_fix(&class_match, source));
        }

        fixes
    }

    fn contract_fixes(
        &self,
        class_name: &str,
        source: &str,
        primary_method: &str,
        test_result: &TestResult,
    ) -> Vec<Fix> {
        let insertion_point = class_body_end(source, class_name).unwrap_or(source.len());
        let mut fixes = Vec::new();
        for error in &test_result.contract_errors {
            if error.contains("'setup'") {
                fixes.push(Fix::new(
                    FixType::AddMissingMethod,
                    "add missing setup lifecycle method",
                    0.85,
                    SourceEdit::insert_at(insertion_point, "\n    async def setup(self):\n        pass\n"),
                ));
            } else if error.contains("primary processing method") {
                fixes.push(Fix::new(
                    FixType::AddMissingMethod,
                    format!("add missing primary method '{primary_method}'"),
                    0.85,
                    SourceEdit::insert_at(
                        insertion_point,
                        format!("\n    async def {primary_method}(self, item):\n        raise ImplementationRequiredError(component='{class_name}', method='{primary_method}')\n"),
                    ),
                ));
            } else if error.contains("'cleanup'") {
                fixes.push(Fix::new(
                    FixType::AddMissingMethod,
                    "add missing cleanup lifecycle method",
                    0.85,
                    SourceEdit::insert_at(insertion_point, "\n    async def cleanup(self):\n        pass\n"),
                ));
            }
        }
        fixes
    }

    fn functional_fixes(&self, class_name: &str, source: &str, primary_method: &str) -> Vec<Fix> {
        let _ = class_name;
        let pattern = format!(r"(?m)^([ \t]*)def([ \t]+{}\()", regex::escape(primary_method));
        let Ok(re) = Regex::new(&pattern) else {
            return Vec::new();
        };
        let Some(caps) = re.captures(source) else {
            return Vec::new();
        };
        let def_span = caps.get(0).unwrap().start() + caps[1].len()..caps.get(0).unwrap().start() + caps[1].len() + 3;
        vec![Fix::new(
            FixType::ConvertSyncToAsync,
            format!("convert '{primary_method}' to an async method"),
            0.95,
            SourceEdit::replace(def_span, "async def"),
        )]
    }

    fn import_fixes(&self, source: &str, test_result: &TestResult) -> Vec<Fix> {
        let mut missing: Vec<&'static str> = Vec::new();

        for (name, _) in IMPORT_MAP.iter() {
            let used = Regex::new(&format!(r"\b{}\b", regex::escape(name)))
                .map(|re| re.is_match(source))
                .unwrap_or(false);
            let imported = source.contains(&format!("import {name}"));
            if used && !imported {
                missing.push(name);
            }
        }

        for error in test_result.all_errors() {
            for caps in NAME_ERROR_PATTERN.captures_iter(&error) {
                if let Some(name) = IMPORT_MAP.keys().find(|k| ***k == caps[1]) {
                    if !missing.contains(name) {
                        missing.push(name);
                    }
                }
            }
        }

        missing
            .into_iter()
            .map(|name| {
                let statement = IMPORT_MAP[name];
                Fix::new(
                    FixType::FixMissingImport,
                    format!("add missing import for {name}"),
                    0.9,
                    SourceEdit::insert_at(0, format!("{statement}\n")),
                )
            })
            .collect()
    }

    fn super_call_fix(&self, class_match: &crate::class_finder::ClassMatch, source: &str) -> Vec<Fix> {
        let has_valid_base = class_match
            .bases
            .iter()
            .any(|b| VALID_COMPONENT_BASES.contains(&b.as_str()));
        if !has_valid_base {
            return Vec::new();
        }
        let body = &source[class_match.header_end.min(source.len())..];
        if body.contains("def __init__") && !body.contains("super().__init__") {
            let insertion = class_match.header_end
                + body.find("def __init__").map(|idx| {
                    body[idx..]
                        .find(':')
                        .map(|rel| idx + rel + 1)
                        .unwrap_or(idx)
                }).unwrap_or(0);
            return vec![Fix::new(
                FixType::FixSuperCall,
                "call super().__init__ from the generated constructor",
                0.9,
                SourceEdit::insert_at(insertion, "\n        super().__init__(name, config)"),
            )];
        }
        Vec::new()
    }
}

fn inheritance_fix(class_name: &str, header_start: usize, header_end: usize, bases: &[String]) -> Fix {
    let _ = bases;
    Fix::new(
        FixType::AddInheritance,
        format!("add component inheritance to {class_name}"),
        0.7,
        SourceEdit::replace(header_start..header_end, format!("class {class_name}(Transformer):")),
    )
}

fn constructor_fix(class_match: &crate::class_finder::ClassMatch, source: &str) -> Fix {
    let body = &source[class_match.header_end.min(source.len())..];
    let offset = body
        .find("def __init__")
        .and_then(|idx| body[idx..].find('(').map(|rel| idx + rel))
        .map(|rel| class_match.header_end + rel)
        .unwrap_or(class_match.header_end);
    let span_end = body
        .find("def __init__")
        .and_then(|idx| body[idx..].find(')').map(|rel| idx + rel + 1))
        .map(|rel| class_match.header_end + rel)
        .unwrap_or(offset);
    Fix::new(
        FixType::FixConstructorSignature,
        "align constructor signature with (self, name, config)",
        0.95,
        SourceEdit::replace(offset..span_end.max(offset), "(self, name: str, config: dict)"),
    )
}

/// Offset to insert a new method at: just before the next top-level `class`
/// declaration, or end of file if this is the last class.
fn class_body_end(source: &str, class_name: &str) -> Option<usize> {
    let header = format!("class {class_name}");
    let class_start = source.find(&header)?;
    let after_header = class_start + header.len();
    match source[after_header..].find("\nclass ") {
        Some(rel) => Some(after_header + rel + 1),
        None => Some(source.len()),
    }
}

fn looks_unparsable(source: &str) -> bool {
    source.trim().is_empty() || !source.contains("class ")
}
