use super::*;
use crate::test_fixtures::{Fixture, codes, member, members};
use csz_common::{CompilerOptions, DiagnosticBag, LanguageVersion, diagnostic_codes};
use csz_symbols::syntax::{MethodDeclarationSyntax, ParameterSyntax, PropertyDeclarationSyntax, TypeDeclarationSyntax, TypeParameterSyntax};
use csz_symbols::syntax_factory::{attribute, generic, int, named, nullable, object, string, void};
use csz_symbols::{DeclarationModifiers, INDEXER_NAME, RefKind};

const VIRTUAL: DeclarationModifiers = DeclarationModifiers::VIRTUAL;
const OVERRIDE: DeclarationModifiers = DeclarationModifiers::OVERRIDE;

fn method(name: &str, modifiers: DeclarationModifiers) -> MethodDeclarationSyntax {
    MethodDeclarationSyntax::new(name, void()).public().with_modifiers(modifiers)
}

fn base_with(member: impl Into<csz_symbols::syntax::MemberDeclarationSyntax>) -> TypeDeclarationSyntax {
    TypeDeclarationSyntax::class("B").public().with_member(member)
}

fn derived_with(member: impl Into<csz_symbols::syntax::MemberDeclarationSyntax>) -> TypeDeclarationSyntax {
    TypeDeclarationSyntax::class("D").public().with_base(named("B")).with_member(member)
}

/// Declares every type, then checks member `name` of the last one.
fn check_with(
    options: CompilerOptions,
    declarations: Vec<TypeDeclarationSyntax>,
    name: &str,
) -> (Vec<u32>, OverrideCheckOutcome) {
    let mut fixture = Fixture::with_options(options);
    let mut last = None;
    for declaration in declarations {
        last = Some(fixture.declare(declaration));
    }
    let ty = last.expect("at least one declaration");
    let compilation = fixture.compile();
    let target = member(&compilation, ty, name);
    let mut diagnostics = DiagnosticBag::new();
    let outcome = compilation.check_override_or_hiding(target, &mut diagnostics);
    (codes(diagnostics.diagnostics()), outcome)
}

fn check(declarations: Vec<TypeDeclarationSyntax>, name: &str) -> Vec<u32> {
    check_with(CompilerOptions::nullable_enabled(), declarations, name).0
}

#[test]
fn test_override_resolves_to_base_member() {
    let mut fixture = Fixture::new();
    let a = fixture.declare(TypeDeclarationSyntax::class("A").with_member(method("M", VIRTUAL)));
    let b = fixture.declare(
        TypeDeclarationSyntax::class("B")
            .with_base(named("A"))
            .with_member(method("M", OVERRIDE)),
    );
    let c = fixture.declare(
        TypeDeclarationSyntax::class("C")
            .with_base(named("B"))
            .with_member(method("M", OVERRIDE)),
    );
    let compilation = fixture.compile();
    let (a_m, b_m, c_m) = (
        member(&compilation, a, "M"),
        member(&compilation, b, "M"),
        member(&compilation, c, "M"),
    );

    assert_eq!(compilation.overridden_member(c_m), Some(b_m));
    assert_eq!(compilation.overridden_member(b_m), Some(a_m));
    assert_eq!(compilation.least_overridden_member(c_m), a_m);
    assert_eq!(compilation.override_chain(c_m).as_slice(), &[c_m, b_m, a_m]);
    assert!(compilation.overridden_or_hidden_members(a_m).overridden.is_empty());
}

#[test]
fn test_hiding_needs_a_matching_signature() {
    let mut fixture = Fixture::new();
    fixture.declare(base_with(method("M", DeclarationModifiers::empty())));
    let d = fixture.declare(
        TypeDeclarationSyntax::class("D")
            .with_base(named("B"))
            .with_member(method("M", DeclarationModifiers::empty()))
            .with_member(method("M", DeclarationModifiers::empty()).with_parameter(ParameterSyntax::new("x", int()))),
    );
    let compilation = fixture.compile();
    let overloads = members(&compilation, d, "M");

    let same = compilation.overridden_or_hidden_members(overloads[0]);
    assert_eq!(same.hidden.len(), 1);
    assert!(same.overridden.is_empty());
    let different = compilation.overridden_or_hidden_members(overloads[1]);
    assert_eq!(**different, OverriddenOrHiddenMembersResult::empty());
}

#[test]
fn test_override_through_constructed_base() {
    let mut fixture = Fixture::new();
    let b = fixture.declare(
        TypeDeclarationSyntax::class("B")
            .with_type_parameter(TypeParameterSyntax::new("T"))
            .with_member(method("M", VIRTUAL).with_parameter(ParameterSyntax::new("t", named("T")))),
    );
    let d = fixture.declare(
        TypeDeclarationSyntax::class("D")
            .with_base(generic("B", vec![int()]))
            .with_member(method("M", OVERRIDE).with_parameter(ParameterSyntax::new("t", int()))),
    );
    let compilation = fixture.compile();
    let result = compilation.overridden_or_hidden_members(member(&compilation, d, "M"));
    let overridden = result.overridden_member().expect("one overridden member");
    assert_eq!(overridden.symbol, member(&compilation, b, "M"));
    assert_eq!(Some(overridden.through), compilation.base_type(d));
}

#[test]
fn test_ambiguous_override_is_reported_once() {
    let base = TypeDeclarationSyntax::class("B")
        .with_type_parameter(TypeParameterSyntax::new("T"))
        .with_member(method("M", VIRTUAL).with_parameter(ParameterSyntax::new("t", named("T"))))
        .with_member(method("M", VIRTUAL).with_parameter(ParameterSyntax::new("i", int())));
    let derived = TypeDeclarationSyntax::class("D")
        .with_base(generic("B", vec![int()]))
        .with_member(method("M", OVERRIDE).with_parameter(ParameterSyntax::new("x", int())));
    let (found, outcome) = check_with(CompilerOptions::nullable_enabled(), vec![base, derived], "M");
    assert_eq!(found, vec![diagnostic_codes::AMBIGUOUS_OVERRIDE]);
    assert!(outcome.reported_error);
    assert!(outcome.suppress_accessors);
}

#[test]
fn test_ambiguous_indexer_reports_no_accessor_errors() {
    let base = TypeDeclarationSyntax::class("B")
        .with_type_parameter(TypeParameterSyntax::new("T"))
        .with_member(
            PropertyDeclarationSyntax::indexer(int(), vec![ParameterSyntax::new("t", named("T"))])
                .public()
                .with_modifiers(VIRTUAL)
                .get(),
        )
        .with_member(
            PropertyDeclarationSyntax::indexer(int(), vec![ParameterSyntax::new("i", int())])
                .public()
                .with_modifiers(VIRTUAL)
                .get(),
        );
    let derived = TypeDeclarationSyntax::class("D").with_base(generic("B", vec![int()])).with_member(
        PropertyDeclarationSyntax::indexer(int(), vec![ParameterSyntax::new("x", int())])
            .public()
            .with_modifiers(OVERRIDE)
            .get()
            .set(),
    );
    assert_eq!(check(vec![base, derived], INDEXER_NAME), vec![diagnostic_codes::AMBIGUOUS_OVERRIDE]);
}

#[test]
fn test_nothing_to_override() {
    let declaration = TypeDeclarationSyntax::class("C").with_member(method("M", OVERRIDE));
    let (found, outcome) = check_with(CompilerOptions::nullable_enabled(), vec![declaration], "M");
    assert_eq!(found, vec![diagnostic_codes::OVERRIDE_NOT_EXPECTED]);
    assert!(outcome.suppress_accessors);

    // The unbound parameter type already explains why nothing matched.
    let declaration = TypeDeclarationSyntax::class("C")
        .with_member(method("M", OVERRIDE).with_parameter(ParameterSyntax::new("x", named("Missing"))));
    assert!(check(vec![declaration], "M").is_empty());
}

#[test]
fn test_overriding_a_member_of_another_kind() {
    let base = base_with(PropertyDeclarationSyntax::new("M", int()).public().get());
    assert_eq!(
        check(vec![base, derived_with(method("M", OVERRIDE))], "M"),
        vec![diagnostic_codes::CANT_OVERRIDE_NON_FUNCTION]
    );

    let base = base_with(method("P", DeclarationModifiers::empty()));
    let derived = derived_with(PropertyDeclarationSyntax::new("P", int()).public().with_modifiers(OVERRIDE).get());
    assert_eq!(check(vec![base, derived], "P"), vec![diagnostic_codes::CANT_OVERRIDE_NON_PROPERTY]);
}

#[test]
fn test_non_virtual_and_sealed_bases() {
    let base = base_with(method("M", DeclarationModifiers::empty()));
    assert_eq!(
        check(vec![base, derived_with(method("M", OVERRIDE))], "M"),
        vec![diagnostic_codes::CANT_OVERRIDE_NON_VIRTUAL]
    );

    let a = TypeDeclarationSyntax::class("A").with_member(method("M", VIRTUAL));
    let b = TypeDeclarationSyntax::class("B")
        .with_base(named("A"))
        .with_member(method("M", OVERRIDE | DeclarationModifiers::SEALED));
    let (found, outcome) = check_with(
        CompilerOptions::nullable_enabled(),
        vec![a, b, derived_with(method("M", OVERRIDE))],
        "M",
    );
    assert_eq!(found, vec![diagnostic_codes::CANT_OVERRIDE_SEALED]);
    assert!(outcome.reported_error);
}

#[test]
fn test_accessibility_must_match() {
    let base = base_with(
        MethodDeclarationSyntax::new("M", void())
            .with_accessibility(csz_symbols::Accessibility::Protected)
            .with_modifiers(VIRTUAL),
    );
    assert_eq!(
        check(vec![base, derived_with(method("M", OVERRIDE))], "M"),
        vec![diagnostic_codes::CANT_CHANGE_ACCESS_ON_OVERRIDE]
    );
}

#[test]
fn test_return_type_must_match() {
    let base = base_with(MethodDeclarationSyntax::new("M", int()).public().with_modifiers(VIRTUAL));
    let derived = derived_with(MethodDeclarationSyntax::new("M", string()).public().with_modifiers(OVERRIDE));
    let (found, outcome) = check_with(CompilerOptions::nullable_enabled(), vec![base, derived], "M");
    assert_eq!(found, vec![diagnostic_codes::CANT_CHANGE_RETURN_TYPE_ON_OVERRIDE]);
    assert!(outcome.suppress_accessors);
}

#[test]
fn test_ref_return_must_match() {
    let base = base_with(
        MethodDeclarationSyntax::new("M", int())
            .public()
            .with_modifiers(VIRTUAL)
            .with_ref_kind(RefKind::Ref),
    );
    let derived = derived_with(MethodDeclarationSyntax::new("M", int()).public().with_modifiers(OVERRIDE));
    assert_eq!(
        check(vec![base, derived], "M"),
        vec![diagnostic_codes::CANT_CHANGE_REF_RETURN_ON_OVERRIDE]
    );
}

fn covariant_pair() -> Vec<TypeDeclarationSyntax> {
    vec![
        base_with(MethodDeclarationSyntax::new("M", object()).public().with_modifiers(VIRTUAL)),
        derived_with(MethodDeclarationSyntax::new("M", string()).public().with_modifiers(OVERRIDE)),
    ]
}

#[test]
fn test_covariant_returns() {
    assert!(check(covariant_pair(), "M").is_empty());

    let old_language = CompilerOptions::nullable_enabled().with_language_version(LanguageVersion::CSharp8);
    assert_eq!(
        check_with(old_language, covariant_pair(), "M").0,
        vec![diagnostic_codes::FEATURE_NOT_AVAILABLE_COVARIANT_RETURNS]
    );

    let mut old_runtime = CompilerOptions::nullable_enabled();
    old_runtime.runtime.covariant_returns_of_classes = false;
    assert_eq!(
        check_with(old_runtime, covariant_pair(), "M").0,
        vec![diagnostic_codes::RUNTIME_DOES_NOT_SUPPORT_COVARIANT_RETURNS]
    );
}

#[test]
fn test_covariant_property_needs_to_be_read_only() {
    let base = base_with(PropertyDeclarationSyntax::new("P", object()).public().with_modifiers(VIRTUAL).get());
    let derived = derived_with(PropertyDeclarationSyntax::new("P", string()).public().with_modifiers(OVERRIDE).get());
    assert!(check(vec![base.clone(), derived], "P").is_empty());

    let derived = derived_with(
        PropertyDeclarationSyntax::new("P", string())
            .public()
            .with_modifiers(OVERRIDE)
            .get()
            .set(),
    );
    assert_eq!(check(vec![base, derived], "P"), vec![diagnostic_codes::CANT_CHANGE_TYPE_ON_OVERRIDE]);
}

#[test]
fn test_missing_accessor_to_override() {
    let base = base_with(PropertyDeclarationSyntax::new("P", int()).public().with_modifiers(VIRTUAL).get());
    let derived = derived_with(
        PropertyDeclarationSyntax::new("P", int())
            .public()
            .with_modifiers(OVERRIDE)
            .get()
            .set(),
    );
    assert_eq!(check(vec![base, derived], "P"), vec![diagnostic_codes::NO_SET_TO_OVERRIDE]);
}

fn nullability_pair(parameter: ParameterSyntax, return_type: csz_symbols::syntax::TypeSyntax) -> Vec<TypeDeclarationSyntax> {
    vec![
        base_with(
            MethodDeclarationSyntax::new("M", string())
                .public()
                .with_modifiers(VIRTUAL)
                .with_parameter(ParameterSyntax::new("s", string())),
        ),
        derived_with(
            MethodDeclarationSyntax::new("M", return_type)
                .public()
                .with_modifiers(OVERRIDE)
                .with_parameter(parameter),
        ),
    ]
}

#[test]
fn test_identical_nullability_is_clean() {
    assert!(check(nullability_pair(ParameterSyntax::new("s", string()), string()), "M").is_empty());
}

#[test]
fn test_flipped_parameter_nullability_is_one_warning() {
    let found = check(
        nullability_pair(ParameterSyntax::new("s", nullable(string())), string()),
        "M",
    );
    assert_eq!(found, vec![diagnostic_codes::NULLABILITY_MISMATCH_IN_PARAMETER_TYPE_ON_OVERRIDE]);
}

#[test]
fn test_nullable_return_on_override() {
    let found = check(
        nullability_pair(ParameterSyntax::new("s", string()), nullable(string())),
        "M",
    );
    assert_eq!(found, vec![diagnostic_codes::NULLABILITY_MISMATCH_IN_RETURN_TYPE_ON_OVERRIDE]);
}

#[test]
fn test_nullability_warnings_follow_the_context() {
    let found = check_with(
        CompilerOptions::default(),
        nullability_pair(ParameterSyntax::new("s", nullable(string())), string()),
        "M",
    )
    .0;
    assert!(!found.contains(&diagnostic_codes::NULLABILITY_MISMATCH_IN_PARAMETER_TYPE_ON_OVERRIDE));
}

#[test]
fn test_hiding_without_new() {
    let base = base_with(method("M", DeclarationModifiers::empty()));
    assert_eq!(
        check(vec![base, derived_with(method("M", DeclarationModifiers::empty()))], "M"),
        vec![diagnostic_codes::NEW_REQUIRED]
    );

    let base = base_with(method("M", VIRTUAL));
    assert_eq!(
        check(vec![base.clone(), derived_with(method("M", DeclarationModifiers::empty()))], "M"),
        vec![diagnostic_codes::NEW_OR_OVERRIDE_EXPECTED]
    );
    assert!(check(vec![base, derived_with(method("M", DeclarationModifiers::NEW))], "M").is_empty());
}

#[test]
fn test_new_without_anything_to_hide() {
    let declaration = TypeDeclarationSyntax::class("C").with_member(method("M", DeclarationModifiers::NEW));
    assert_eq!(check(vec![declaration], "M"), vec![diagnostic_codes::NEW_NOT_REQUIRED]);
}

#[test]
fn test_hiding_an_abstract_member() {
    let base = TypeDeclarationSyntax::class("B")
        .with_modifiers(DeclarationModifiers::ABSTRACT)
        .with_member(method("M", DeclarationModifiers::ABSTRACT).without_body());
    let derived = TypeDeclarationSyntax::class("D")
        .with_modifiers(DeclarationModifiers::ABSTRACT)
        .with_base(named("B"))
        .with_member(method("M", DeclarationModifiers::NEW));
    assert_eq!(check(vec![base, derived], "M"), vec![diagnostic_codes::HIDING_ABSTRACT_MEMBER]);
}

#[test]
fn test_obsolete_must_agree_with_the_original_member() {
    let obsolete = || attribute("Obsolete", vec![]);
    let base = base_with(method("M", VIRTUAL));
    let derived = derived_with(method("M", OVERRIDE).with_attribute(obsolete()));
    assert_eq!(
        check(vec![base, derived], "M"),
        vec![diagnostic_codes::OBSOLETE_OVERRIDING_NON_OBSOLETE]
    );

    let base = base_with(method("M", VIRTUAL).with_attribute(obsolete()));
    let derived = derived_with(method("M", OVERRIDE));
    assert_eq!(
        check(vec![base, derived], "M"),
        vec![diagnostic_codes::NON_OBSOLETE_OVERRIDING_OBSOLETE]
    );
}

fn scoped_pair() -> Vec<TypeDeclarationSyntax> {
    vec![
        base_with(method("M", VIRTUAL).with_parameter(ParameterSyntax::new("x", int()).with_ref_kind(RefKind::Ref).scoped())),
        derived_with(method("M", OVERRIDE).with_parameter(ParameterSyntax::new("x", int()).with_ref_kind(RefKind::Ref))),
    ]
}

#[test]
fn test_dropping_scoped_on_override() {
    assert_eq!(
        check(scoped_pair(), "M"),
        vec![diagnostic_codes::SCOPED_MISMATCH_IN_PARAMETER_OF_OVERRIDE]
    );

    let mut options = CompilerOptions::nullable_enabled();
    options.updated_ref_safety_rules = false;
    assert_eq!(
        check_with(options, scoped_pair(), "M").0,
        vec![diagnostic_codes::SCOPED_MISMATCH_IN_PARAMETER_OF_OVERRIDE_WARNING]
    );
}
