use super::*;
use crate::test_fixtures::{Fixture, at, check_all, codes, member};
use csz_common::{CompilerOptions, DiagnosticCategory, NullableContextOptions, diagnostic_codes};
use csz_symbols::syntax::{MethodDeclarationSyntax, ParameterSyntax, TypeDeclarationSyntax};
use csz_symbols::syntax_factory::{bool_, int, named, nullable, object, string};
use csz_symbols::DeclarationModifiers;

fn equals_without_hash_code(name: &str, offset: u32) -> TypeDeclarationSyntax {
    TypeDeclarationSyntax::class(name).at(at(offset)).with_member(
        MethodDeclarationSyntax::new("Equals", bool_())
            .public()
            .with_modifiers(DeclarationModifiers::OVERRIDE)
            .with_parameter(ParameterSyntax::new("obj", object()))
            .at(at(offset + 1)),
    )
}

fn unresolved_return(name: &str, offset: u32) -> TypeDeclarationSyntax {
    TypeDeclarationSyntax::class(name)
        .at(at(offset))
        .with_member(MethodDeclarationSyntax::new("M", named("Missing")).at(at(offset + 1)))
}

#[test]
fn test_diagnostics_are_in_location_order() {
    let mut fixture = Fixture::new();
    // Declared out of source order.
    fixture.declare(unresolved_return("Late", 200));
    fixture.declare(equals_without_hash_code("Early", 10));
    let compilation = fixture.compile();

    assert_eq!(
        check_all(&compilation),
        vec![
            diagnostic_codes::EQUALS_WITHOUT_GET_HASH_CODE,
            diagnostic_codes::TYPE_OR_NAMESPACE_NOT_FOUND
        ]
    );
    let starts: Vec<u32> = compilation
        .diagnostics()
        .iter()
        .map(|diagnostic| diagnostic.location.start)
        .collect();
    assert!(starts.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[test]
fn test_no_warn_suppresses_warnings_only() {
    let options = CompilerOptions {
        no_warn: vec![
            diagnostic_codes::EQUALS_WITHOUT_GET_HASH_CODE,
            diagnostic_codes::TYPE_OR_NAMESPACE_NOT_FOUND,
        ],
        ..CompilerOptions::nullable_enabled()
    };
    let mut fixture = Fixture::with_options(options);
    let ty = fixture.declare(equals_without_hash_code("C", 10));
    fixture.declare(unresolved_return("D", 100));
    let compilation = fixture.compile();

    // The error survives; the warning is filtered from the aggregate view.
    assert_eq!(check_all(&compilation), vec![diagnostic_codes::TYPE_OR_NAMESPACE_NOT_FOUND]);
    // Per-symbol diagnostics are kept as reported.
    assert_eq!(
        codes(&compilation.symbol_diagnostics(ty)),
        vec![diagnostic_codes::EQUALS_WITHOUT_GET_HASH_CODE]
    );
}

#[test]
fn test_warnings_as_errors() {
    let options = CompilerOptions {
        warnings_as_errors: true,
        ..CompilerOptions::nullable_enabled()
    };
    let mut fixture = Fixture::with_options(options);
    fixture.declare(equals_without_hash_code("C", 10));
    let compilation = fixture.compile();

    assert_eq!(check_all(&compilation), vec![diagnostic_codes::EQUALS_WITHOUT_GET_HASH_CODE]);
    let diagnostics = compilation.diagnostics();
    assert_eq!(diagnostics[0].category, DiagnosticCategory::Error);
}

#[test]
fn test_facets_are_idempotent() {
    let mut fixture = Fixture::new();
    let ty = fixture.declare(
        TypeDeclarationSyntax::class("C").with_member(
            MethodDeclarationSyntax::new("M", nullable(string())).with_parameter(ParameterSyntax::new("x", int())),
        ),
    );
    let compilation = fixture.compile();
    let method = member(&compilation, ty, "M");
    let parameter = compilation.arena().parameters_of(method)[0];

    assert!(std::ptr::eq(compilation.member_type(method), compilation.member_type(method)));
    assert!(std::ptr::eq(compilation.parameter_type(parameter), compilation.parameter_type(parameter)));
    assert!(std::ptr::eq(compilation.interfaces(ty), compilation.interfaces(ty)));
    assert!(std::ptr::eq(compilation.attributes(method), compilation.attributes(method)));
    assert_eq!(compilation.member_type(method), &TypeWithAnnotations::annotated(TypeId::STRING));
}

#[test]
fn test_nullable_context_follows_the_declaring_part() {
    let mut fixture = Fixture::with_options(CompilerOptions {
        nullable: NullableContextOptions::Disable,
        ..CompilerOptions::default()
    });
    let enabled = fixture.declare(
        TypeDeclarationSyntax::class("A")
            .with_nullable_annotations(true)
            .with_member(MethodDeclarationSyntax::new("M", string())),
    );
    let disabled = fixture.declare(TypeDeclarationSyntax::class("B").with_member(MethodDeclarationSyntax::new("M", string())));
    let compilation = fixture.compile();

    let in_enabled = member(&compilation, enabled, "M");
    let in_disabled = member(&compilation, disabled, "M");
    assert!(compilation.annotations_enabled(in_enabled));
    assert!(compilation.nullable_warnings_enabled(in_enabled));
    assert!(!compilation.annotations_enabled(in_disabled));
    assert_eq!(compilation.member_type(in_enabled), &TypeWithAnnotations::not_annotated(TypeId::STRING));
    assert_eq!(compilation.member_type(in_disabled), &TypeWithAnnotations::oblivious(TypeId::STRING));
}

#[test]
fn test_metadata_symbols_start_complete() {
    let compilation = Fixture::new().compile();
    let object = compilation.arena().object_symbol();
    assert!(compilation.completion_state(object).is_all_complete());
    assert!(compilation.symbol_diagnostics(object).is_empty());
}
