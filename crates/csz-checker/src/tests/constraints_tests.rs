use super::*;
use crate::test_fixtures::{Fixture, at, codes, member};
use csz_symbols::syntax::{MethodDeclarationSyntax, TypeDeclarationSyntax, TypeParameterSyntax};
use csz_symbols::syntax_factory::{named, nullable, void};
use csz_symbols::{DeclarationModifiers, NullableAnnotation};

fn partial_part(constraints: Vec<ConstraintSyntax>, annotations: bool) -> TypeDeclarationSyntax {
    TypeDeclarationSyntax::class("C")
        .with_modifiers(DeclarationModifiers::PARTIAL)
        .with_type_parameter(TypeParameterSyntax::new("T"))
        .with_constraint_clause(ConstraintClauseSyntax::new("T", constraints))
        .with_nullable_annotations(annotations)
        .at(at(1))
}

fn unconstrained_part() -> TypeDeclarationSyntax {
    TypeDeclarationSyntax::class("C")
        .with_modifiers(DeclarationModifiers::PARTIAL)
        .with_type_parameter(TypeParameterSyntax::new("T"))
}

#[test]
fn test_oblivious_class_constraint_defers_to_annotated() {
    let mut fixture = Fixture::new();
    let ty = fixture.declare_partial(vec![
        partial_part(vec![ConstraintSyntax::class()], false),
        partial_part(vec![ConstraintSyntax::class()], true),
    ]);
    let compilation = fixture.compile();

    let clauses = compilation.constraint_clauses(ty);
    assert_eq!(clauses.len(), 1);
    assert_eq!(
        clauses[0].kind,
        TypeParameterConstraintKind::REFERENCE_TYPE | TypeParameterConstraintKind::NOT_NULLABLE_REFERENCE_TYPE
    );
    assert!(compilation.symbol_diagnostics(ty).is_empty());
}

#[test]
fn test_nullable_and_non_nullable_class_constraints_disagree() {
    let mut fixture = Fixture::new();
    let ty = fixture.declare_partial(vec![
        partial_part(vec![ConstraintSyntax::nullable_class()], true),
        partial_part(vec![ConstraintSyntax::class()], true),
    ]);
    let compilation = fixture.compile();

    let clauses = compilation.constraint_clauses(ty);
    // The first part's clause is kept.
    assert!(clauses[0].kind.contains(TypeParameterConstraintKind::NULLABLE_REFERENCE_TYPE));
    assert_eq!(
        codes(&compilation.symbol_diagnostics(ty)),
        vec![diagnostic_codes::PARTIAL_WRONG_CONSTRAINTS]
    );
}

#[test]
fn test_different_constraint_kinds_are_one_mismatch() {
    let mut fixture = Fixture::new();
    let ty = fixture.declare_partial(vec![
        partial_part(vec![ConstraintSyntax::class()], true),
        partial_part(vec![ConstraintSyntax::struct_()], true),
        partial_part(vec![ConstraintSyntax::constructor()], true),
    ]);
    let compilation = fixture.compile();
    compilation.constraint_clauses(ty);
    assert_eq!(
        codes(&compilation.symbol_diagnostics(ty)),
        vec![diagnostic_codes::PARTIAL_WRONG_CONSTRAINTS]
    );
}

#[test]
fn test_constraint_types_merge_by_identity_ignoring_nullability() {
    let mut fixture = Fixture::new();
    fixture.declare(TypeDeclarationSyntax::interface("I"));
    let ty = fixture.declare_partial(vec![
        partial_part(vec![ConstraintSyntax::Type(named("I"))], false),
        partial_part(vec![ConstraintSyntax::Type(nullable(named("I")))], true),
    ]);
    let compilation = fixture.compile();

    let clauses = compilation.constraint_clauses(ty);
    assert_eq!(clauses[0].constraint_types.len(), 1);
    assert_eq!(clauses[0].constraint_types[0].annotation, NullableAnnotation::Annotated);
    assert!(compilation.symbol_diagnostics(ty).is_empty());
}

#[test]
fn test_constraint_type_missing_from_one_part() {
    let mut fixture = Fixture::new();
    fixture.declare(TypeDeclarationSyntax::interface("I"));
    fixture.declare(TypeDeclarationSyntax::interface("J"));
    let ty = fixture.declare_partial(vec![
        partial_part(vec![ConstraintSyntax::Type(named("I"))], true),
        partial_part(vec![ConstraintSyntax::Type(named("J"))], true),
    ]);
    let compilation = fixture.compile();
    compilation.constraint_clauses(ty);
    assert_eq!(
        codes(&compilation.symbol_diagnostics(ty)),
        vec![diagnostic_codes::PARTIAL_WRONG_CONSTRAINTS]
    );
}

#[test]
fn test_repeated_constraint_type_matches_once() {
    let mut fixture = Fixture::new();
    fixture.declare(TypeDeclarationSyntax::interface("I"));
    fixture.declare(TypeDeclarationSyntax::interface("J"));
    let ty = fixture.declare_partial(vec![
        partial_part(
            vec![ConstraintSyntax::Type(named("I")), ConstraintSyntax::Type(named("I"))],
            true,
        ),
        partial_part(
            vec![ConstraintSyntax::Type(named("I")), ConstraintSyntax::Type(named("J"))],
            true,
        ),
    ]);
    let compilation = fixture.compile();
    compilation.constraint_clauses(ty);
    assert!(codes(&compilation.symbol_diagnostics(ty)).contains(&diagnostic_codes::PARTIAL_WRONG_CONSTRAINTS));
}

#[test]
fn test_parts_without_clauses_do_not_participate() {
    let mut fixture = Fixture::new();
    let ty = fixture.declare_partial(vec![
        partial_part(vec![ConstraintSyntax::struct_()], true),
        unconstrained_part(),
    ]);
    let compilation = fixture.compile();

    let clauses = compilation.constraint_clauses(ty);
    assert_eq!(clauses[0].kind, TypeParameterConstraintKind::VALUE_TYPE);
    assert!(compilation.symbol_diagnostics(ty).is_empty());
}

#[test]
fn test_unconstrained_clauses_collapse() {
    let mut fixture = Fixture::new();
    let ty = fixture.declare_partial(vec![unconstrained_part(), unconstrained_part()]);
    let compilation = fixture.compile();
    assert!(compilation.constraint_clauses(ty).is_empty());
    let type_parameter = compilation.arena().type_parameters_of(ty)[0];
    assert!(compilation.type_parameter_constraints(type_parameter).is_none());
}

#[test]
fn test_unknown_and_repeated_type_parameters() {
    let mut fixture = Fixture::new();
    let ty = fixture.declare(
        TypeDeclarationSyntax::class("C")
            .with_type_parameter(TypeParameterSyntax::new("T"))
            .with_constraint_clause(ConstraintClauseSyntax::new("U", vec![ConstraintSyntax::class()]).at(at(1)))
            .with_constraint_clause(ConstraintClauseSyntax::new("T", vec![ConstraintSyntax::class()]).at(at(2)))
            .with_constraint_clause(ConstraintClauseSyntax::new("T", vec![ConstraintSyntax::struct_()]).at(at(3))),
    );
    let compilation = fixture.compile();

    let type_parameter = compilation.arena().type_parameters_of(ty)[0];
    let clause = compilation
        .type_parameter_constraints(type_parameter)
        .expect("T is constrained");
    assert!(clause.kind.contains(TypeParameterConstraintKind::REFERENCE_TYPE));
    assert!(!clause.kind.contains(TypeParameterConstraintKind::VALUE_TYPE));
    assert_eq!(
        codes(&compilation.symbol_diagnostics(ty)),
        vec![
            diagnostic_codes::TYPE_PARAMETER_NOT_FOUND_IN_CONSTRAINT,
            diagnostic_codes::DUPLICATE_CONSTRAINT_CLAUSE
        ]
    );
}

#[test]
fn test_method_constraints() {
    let mut fixture = Fixture::new();
    let ty = fixture.declare(
        TypeDeclarationSyntax::class("C").with_member(
            MethodDeclarationSyntax::new("M", void())
                .with_type_parameter(TypeParameterSyntax::new("U"))
                .with_constraint_clause(ConstraintClauseSyntax::new(
                    "U",
                    vec![ConstraintSyntax::struct_(), ConstraintSyntax::constructor()],
                )),
        ),
    );
    let compilation = fixture.compile();
    let method = member(&compilation, ty, "M");

    let clauses = compilation.constraint_clauses(method);
    assert_eq!(
        clauses[0].kind,
        TypeParameterConstraintKind::VALUE_TYPE | TypeParameterConstraintKind::CONSTRUCTOR
    );
    assert!(compilation.completion_state(method).has_complete(CompletionPart::CONSTRAINTS));
    assert!(compilation.constraint_clauses(ty).is_empty());
}
