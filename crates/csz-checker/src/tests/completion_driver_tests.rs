use super::*;
use crate::test_fixtures::{Fixture, at, check_all, codes, member};
use csz_common::{CompilerOptions, Diagnostic, diagnostic_codes};
use csz_symbols::syntax::{
    MethodDeclarationSyntax, OperatorToken, ParameterSyntax, PropertyDeclarationSyntax, TypeDeclarationSyntax,
};
use csz_symbols::syntax_factory::{bool_, int, named, void};
use csz_symbols::DeclarationModifiers;

/// A small program with something to report at every level: a missing
/// interface member, a bad override, an unpaired operator and an unresolved
/// parameter type.
fn declarations() -> Vec<TypeDeclarationSyntax> {
    vec![
        TypeDeclarationSyntax::interface("I")
            .public()
            .at(at(1))
            .with_member(MethodDeclarationSyntax::new("M", void()).without_body()),
        TypeDeclarationSyntax::class("B")
            .public()
            .at(at(20))
            .with_member(MethodDeclarationSyntax::new("W", void()).public().at(at(21))),
        TypeDeclarationSyntax::class("C")
            .public()
            .at(at(40))
            .with_base(named("B"))
            .with_base(named("I"))
            .with_member(
                MethodDeclarationSyntax::new("V", void())
                    .public()
                    .with_modifiers(DeclarationModifiers::OVERRIDE)
                    .at(at(41)),
            )
            .with_member(
                MethodDeclarationSyntax::operator(OperatorToken::True, bool_())
                    .with_parameter(ParameterSyntax::new("c", named("C")))
                    .at(at(42)),
            )
            .with_member(
                MethodDeclarationSyntax::new("P", int())
                    .public()
                    .with_parameter(ParameterSyntax::new("x", named("Missing")).at(at(43)))
                    .at(at(43)),
            )
            .with_member(PropertyDeclarationSyntax::new("Q", int()).public().at(at(44))),
    ]
}

fn compile(options: CompilerOptions) -> Compilation {
    let mut fixture = Fixture::with_options(options);
    for declaration in declarations() {
        fixture.declare(declaration);
    }
    fixture.compile()
}

fn sorted(mut diagnostics: Vec<Diagnostic>) -> Vec<(u32, u32)> {
    let mut keys: Vec<(u32, u32)> = diagnostics
        .drain(..)
        .map(|diagnostic| (diagnostic.location.start, diagnostic.code))
        .collect();
    keys.sort_unstable();
    keys
}

#[test]
fn test_force_complete_all_reports_every_level() {
    let compilation = compile(CompilerOptions::nullable_enabled());
    let reported = check_all(&compilation);
    for expected in [
        diagnostic_codes::UNIMPLEMENTED_INTERFACE_MEMBER,
        diagnostic_codes::OVERRIDE_NOT_EXPECTED,
        diagnostic_codes::OPERATOR_NEEDS_MATCH,
        diagnostic_codes::TYPE_OR_NAMESPACE_NOT_FOUND,
        diagnostic_codes::PROPERTY_WITH_NO_ACCESSORS,
    ] {
        assert!(reported.contains(&expected), "missing {expected} in {reported:?}");
    }
}

#[test]
fn test_every_source_symbol_ends_complete() {
    let compilation = compile(CompilerOptions::nullable_enabled());
    check_all(&compilation);
    let arena = compilation.arena();
    for id in arena.ids() {
        assert!(
            compilation.completion_state(id).is_all_complete(),
            "{:?} {} left incomplete",
            id,
            arena.name(id)
        );
    }
}

#[test]
fn test_parallel_and_sequential_completion_agree() {
    let parallel = compile(CompilerOptions::nullable_enabled());
    check_all(&parallel);

    let sequential = compile(CompilerOptions::nullable_enabled());
    let token = CancellationToken::new();
    // Reverse order so dependencies are pulled in from the other side.
    for &ty in sequential.arena().source_types().iter().rev() {
        sequential.force_complete(ty, &token).expect("not cancelled");
    }
    assert_eq!(sorted(parallel.diagnostics()), sorted(sequential.diagnostics()));
}

#[test]
fn test_racing_force_complete_reports_once() {
    let compilation = compile(CompilerOptions::nullable_enabled());
    let token = CancellationToken::new();
    let c = compilation.arena().source_types()[2];
    std::thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| compilation.force_complete(c, &token).expect("not cancelled"));
        }
    });

    let reference = compile(CompilerOptions::nullable_enabled());
    reference.force_complete(reference.arena().source_types()[2], &token).expect("not cancelled");
    assert_eq!(sorted(compilation.diagnostics()), sorted(reference.diagnostics()));
}

#[test]
fn test_member_completion_is_independent_of_its_type() {
    let compilation = compile(CompilerOptions::nullable_enabled());
    let c = compilation.arena().source_types()[2];
    let method = member(&compilation, c, "P");
    compilation.force_complete(method, &CancellationToken::new()).expect("not cancelled");

    assert!(compilation.completion_state(method).is_all_complete());
    assert!(!compilation.completion_state(c).has_complete(CompletionPart::MEMBER_CHECKS));
    assert_eq!(
        codes(&compilation.symbol_diagnostics(compilation.arena().parameters_of(method)[0])),
        vec![diagnostic_codes::TYPE_OR_NAMESPACE_NOT_FOUND]
    );
}

#[test]
fn test_cancelled_token_stops_completion() {
    let compilation = compile(CompilerOptions::nullable_enabled());
    let token = CancellationToken::new();
    token.cancel();
    assert_eq!(compilation.force_complete_all(&token), Err(OperationCancelled));
    let c = compilation.arena().source_types()[2];
    assert!(!compilation.completion_state(c).is_all_complete());
}
