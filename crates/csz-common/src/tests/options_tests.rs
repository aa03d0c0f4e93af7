use super::*;
use std::io::Write;

#[test]
fn test_defaults() {
    let options = CompilerOptions::from_json_str("{}").expect("empty document parses");
    assert_eq!(options.language_version, LanguageVersion::LATEST);
    assert_eq!(options.nullable, NullableContextOptions::Disable);
    assert!(options.updated_ref_safety_rules);
    assert!(options.covariant_returns_enabled());
    assert!(!options.warnings_as_errors);
}

#[test]
fn test_language_version_gates_ref_safety_default() {
    let options = CompilerOptions::from_json_str(r#"{ "languageVersion": "10" }"#).expect("parses");
    assert_eq!(options.language_version, LanguageVersion::CSharp10);
    assert!(!options.updated_ref_safety_rules);
    assert!(!options.language_version.supports_relaxed_shift_operator());

    let explicit = CompilerOptions::from_json_str(
        r#"{ "languageVersion": "10", "updatedRefSafetyRules": "true" }"#,
    )
    .expect("parses");
    assert!(explicit.updated_ref_safety_rules);
}

#[test]
fn test_runtime_and_warnings() {
    let options = CompilerOptions::from_json_str(
        r#"{
            "nullable": "enable",
            "runtime": { "covariantReturnsOfClasses": false },
            "noWarn": [108, 8610],
            "warningsAsErrors": "yes"
        }"#,
    )
    .expect("parses");
    assert!(options.nullable.warnings_enabled());
    assert!(!options.runtime.covariant_returns_of_classes);
    assert!(options.runtime.static_abstract_members_in_interfaces);
    assert!(!options.covariant_returns_enabled());
    assert!(options.is_suppressed(108));
    assert!(options.warnings_as_errors);
}

#[test]
fn test_rejects_unknown_values() {
    let err = CompilerOptions::from_json_str(r#"{ "languageVersion": "42" }"#).unwrap_err();
    assert!(err.to_string().contains("unsupported languageVersion"));

    let err = CompilerOptions::from_json_str(r#"{ "warningsAsErrors": "maybe" }"#).unwrap_err();
    assert!(format!("{err:#}").contains("invalid boolean value"));
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, r#"{{ "languageVersion": "9", "nullable": "warnings" }}"#).expect("write");
    let options = CompilerOptions::load(file.path()).expect("loads");
    assert_eq!(options.language_version, LanguageVersion::CSharp9);
    assert!(options.nullable.warnings_enabled());
    assert!(!options.nullable.annotations_enabled());

    let missing = CompilerOptions::load(std::path::Path::new("/definitely/not/here.json"));
    assert!(missing.is_err());
}
