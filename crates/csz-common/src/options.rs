//! Compiler options consumed by the checking core.
//!
//! Options are read from a JSON document (`csz.json`) shaped like
//!
//! ```json
//! {
//!   "languageVersion": "11",
//!   "nullable": "enable",
//!   "runtime": { "covariantReturnsOfClasses": true },
//!   "noWarn": [108],
//!   "warningsAsErrors": "false"
//! }
//! ```
//!
//! The raw document is deserialized with serde and then resolved into
//! [`CompilerOptions`], where string-valued settings are validated.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Deserializer};
use std::path::Path;

fn deserialize_bool_or_string<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        String(String),
    }

    match Option::<BoolOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(BoolOrString::Bool(b)) => Ok(Some(b)),
        Some(BoolOrString::String(s)) => match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(Some(true)),
            "false" | "0" | "no" | "off" => Ok(Some(false)),
            _ => Err(Error::custom(format!(
                "invalid boolean value: '{}'. Expected true, false, 'true', or 'false'",
                s
            ))),
        },
    }
}

// =============================================================================
// Resolved options
// =============================================================================

/// Language version gates relevant to declaration checking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LanguageVersion {
    CSharp7_3,
    CSharp8,
    CSharp9,
    CSharp10,
    CSharp11,
    CSharp12,
    Preview,
}

impl LanguageVersion {
    pub const LATEST: LanguageVersion = LanguageVersion::CSharp12;

    pub fn display(self) -> &'static str {
        match self {
            LanguageVersion::CSharp7_3 => "7.3",
            LanguageVersion::CSharp8 => "8.0",
            LanguageVersion::CSharp9 => "9.0",
            LanguageVersion::CSharp10 => "10.0",
            LanguageVersion::CSharp11 => "11.0",
            LanguageVersion::CSharp12 => "12.0",
            LanguageVersion::Preview => "preview",
        }
    }

    pub fn supports_covariant_returns(self) -> bool {
        self >= LanguageVersion::CSharp9
    }

    pub fn supports_relaxed_shift_operator(self) -> bool {
        self >= LanguageVersion::CSharp11
    }

    pub fn uses_updated_ref_safety_rules(self) -> bool {
        self >= LanguageVersion::CSharp11
    }
}

impl Default for LanguageVersion {
    fn default() -> Self {
        LanguageVersion::LATEST
    }
}

/// Project-wide nullable context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum NullableContextOptions {
    #[default]
    Disable,
    Enable,
    Warnings,
    Annotations,
}

impl NullableContextOptions {
    pub fn annotations_enabled(self) -> bool {
        matches!(
            self,
            NullableContextOptions::Enable | NullableContextOptions::Annotations
        )
    }

    pub fn warnings_enabled(self) -> bool {
        matches!(
            self,
            NullableContextOptions::Enable | NullableContextOptions::Warnings
        )
    }
}

/// Features of the target runtime that change what the checker accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RuntimeCapabilities {
    pub covariant_returns_of_classes: bool,
    pub default_interface_implementation: bool,
    pub static_abstract_members_in_interfaces: bool,
}

impl Default for RuntimeCapabilities {
    fn default() -> Self {
        RuntimeCapabilities {
            covariant_returns_of_classes: true,
            default_interface_implementation: true,
            static_abstract_members_in_interfaces: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompilerOptions {
    pub language_version: LanguageVersion,
    pub nullable: NullableContextOptions,
    pub runtime: RuntimeCapabilities,
    /// Whether the compilation uses the updated ref-safety (scoped) rules.
    pub updated_ref_safety_rules: bool,
    pub no_warn: Vec<u32>,
    pub warnings_as_errors: bool,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        let language_version = LanguageVersion::default();
        CompilerOptions {
            language_version,
            nullable: NullableContextOptions::default(),
            runtime: RuntimeCapabilities::default(),
            updated_ref_safety_rules: language_version.uses_updated_ref_safety_rules(),
            no_warn: Vec::new(),
            warnings_as_errors: false,
        }
    }
}

impl CompilerOptions {
    /// Options with nullable annotations and warnings turned on.
    pub fn nullable_enabled() -> Self {
        CompilerOptions {
            nullable: NullableContextOptions::Enable,
            ..CompilerOptions::default()
        }
    }

    pub fn with_language_version(mut self, version: LanguageVersion) -> Self {
        self.language_version = version;
        self.updated_ref_safety_rules = version.uses_updated_ref_safety_rules();
        self
    }

    pub fn covariant_returns_enabled(&self) -> bool {
        self.language_version.supports_covariant_returns() && self.runtime.covariant_returns_of_classes
    }

    pub fn is_suppressed(&self, code: u32) -> bool {
        self.no_warn.contains(&code)
    }

    pub fn from_json_str(source: &str) -> Result<Self> {
        let raw: RawCompilerOptions =
            serde_json::from_str(source).context("failed to parse compiler options JSON")?;
        resolve_compiler_options(raw)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read compiler options: {}", path.display()))?;
        Self::from_json_str(&source)
            .with_context(|| format!("failed to load compiler options: {}", path.display()))
    }
}

// =============================================================================
// Raw document
// =============================================================================

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawCompilerOptions {
    #[serde(default)]
    pub language_version: Option<String>,
    #[serde(default)]
    pub nullable: Option<String>,
    #[serde(default)]
    pub runtime: Option<RuntimeCapabilities>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub updated_ref_safety_rules: Option<bool>,
    #[serde(default)]
    pub no_warn: Vec<u32>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub warnings_as_errors: Option<bool>,
}

pub fn resolve_compiler_options(raw: RawCompilerOptions) -> Result<CompilerOptions> {
    let language_version = match raw.language_version.as_deref() {
        Some(value) => parse_language_version(value)?,
        None => LanguageVersion::default(),
    };
    let nullable = match raw.nullable.as_deref() {
        Some(value) => parse_nullable_context(value)?,
        None => NullableContextOptions::default(),
    };

    Ok(CompilerOptions {
        language_version,
        nullable,
        runtime: raw.runtime.unwrap_or_default(),
        updated_ref_safety_rules: raw
            .updated_ref_safety_rules
            .unwrap_or_else(|| language_version.uses_updated_ref_safety_rules()),
        no_warn: raw.no_warn,
        warnings_as_errors: raw.warnings_as_errors.unwrap_or(false),
    })
}

fn parse_language_version(value: &str) -> Result<LanguageVersion> {
    let version = match value.trim().to_ascii_lowercase().as_str() {
        "7.3" => LanguageVersion::CSharp7_3,
        "8" | "8.0" => LanguageVersion::CSharp8,
        "9" | "9.0" => LanguageVersion::CSharp9,
        "10" | "10.0" => LanguageVersion::CSharp10,
        "11" | "11.0" => LanguageVersion::CSharp11,
        "12" | "12.0" | "latest" | "latestmajor" | "default" => LanguageVersion::CSharp12,
        "preview" => LanguageVersion::Preview,
        _ => bail!("unsupported languageVersion '{}'", value),
    };
    Ok(version)
}

fn parse_nullable_context(value: &str) -> Result<NullableContextOptions> {
    let context = match value.trim().to_ascii_lowercase().as_str() {
        "disable" => NullableContextOptions::Disable,
        "enable" => NullableContextOptions::Enable,
        "warnings" => NullableContextOptions::Warnings,
        "annotations" => NullableContextOptions::Annotations,
        _ => bail!("unsupported nullable context '{}'", value),
    };
    Ok(context)
}

#[cfg(test)]
#[path = "tests/options_tests.rs"]
mod tests;
