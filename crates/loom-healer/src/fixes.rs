//! ---
//! loom_section: "06-healer"
//! loom_subsection: "fixes"
//! loom_type: "source"
//! loom_scope: "code"
//! loom_description: "The fix taxonomy: type, confidence band, and application group."
//! loom_version: "v0.1.0"
//! loom_owner: "tbd"
//! ---
use crate::edit::SourceEdit;

/// One repair strategy the healer knows how to apply, with its confidence
/// band per spec.md §4.5's fix taxonomy table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixType {
    AddMissingImport,
    AddMissingMethod,
    ConvertSyncToAsync,
    AddInheritance,
    FixSuperCall,
    FixConstructorSignature,
    FixMissingImport,
    FixUndefinedName,
    EmergencySkeleton,
}

impl FixType {
    /// Which of the four application groups this fix type belongs to. The
    /// groups are applied in a fixed order — async conversion, then added
    /// methods, then everything else, then constructor fixes last, since a
    /// rewritten constructor is the fix most likely to interfere with the
    /// others.
    pub fn group(self) -> ApplicationGroup {
        match self {
            FixType::ConvertSyncToAsync => ApplicationGroup::AsyncConversion,
            FixType::AddMissingMethod => ApplicationGroup::AddMethods,
            FixType::FixConstructorSignature => ApplicationGroup::ConstructorFix,
            _ => ApplicationGroup::Other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FixType::AddMissingImport => "add_missing_import",
            FixType::AddMissingMethod => "add_missing_method",
            FixType::ConvertSyncToAsync => "convert_sync_to_async",
            FixType::AddInheritance => "add_inheritance",
            FixType::FixSuperCall => "fix_super_call",
            FixType::FixConstructorSignature => "fix_constructor_signature",
            FixType::FixMissingImport => "fix_missing_import",
            FixType::FixUndefinedName => "fix_undefined_name",
            FixType::EmergencySkeleton => "emergency_skeleton",
        }
    }
}

/// Application order grouping; see [`FixType::group`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ApplicationGroup {
    AsyncConversion,
    AddMethods,
    Other,
    ConstructorFix,
}

/// One proposed repair against a component's source.
#[derive(Debug, Clone)]
pub struct Fix {
    pub fix_type: FixType,
    pub description: String,
    pub confidence: f64,
    pub edit: SourceEdit,
}

impl Fix {
    pub fn new(fix_type: FixType, description: impl Into<String>, confidence: f64, edit: SourceEdit) -> Self {
        Self {
            fix_type,
            description: description.into(),
            confidence,
            edit,
        }
    }
}
