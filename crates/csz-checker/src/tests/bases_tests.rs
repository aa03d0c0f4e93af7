use super::*;
use crate::test_fixtures::{Fixture, at, codes};
use csz_symbols::DeclarationModifiers;
use csz_symbols::syntax::{TypeDeclarationSyntax, TypeParameterSyntax};
use csz_symbols::syntax_factory::{generic, int, named};

fn display_all(compilation: &Compilation, types: &[TypeId]) -> Vec<String> {
    types
        .iter()
        .map(|ty| display_type_id(compilation.arena(), *ty))
        .collect()
}

#[test]
fn test_base_type_by_kind() {
    let mut fixture = Fixture::new();
    let b = fixture.declare(TypeDeclarationSyntax::class("B"));
    let d = fixture.declare(TypeDeclarationSyntax::class("D").with_base(named("B")));
    let s = fixture.declare(TypeDeclarationSyntax::struct_("S"));
    let i = fixture.declare(TypeDeclarationSyntax::interface("I"));
    let compilation = fixture.compile();
    let arena = compilation.arena();

    assert_eq!(compilation.base_type(b), Some(TypeId::OBJECT));
    assert_eq!(compilation.base_type(d), Some(arena.declared_type(b)));
    assert_eq!(compilation.base_type(s), Some(arena.declared_type(arena.core().value_type)));
    assert_eq!(compilation.base_type(i), None);
    assert_eq!(compilation.base_type(arena.object_symbol()), None);
}

#[test]
fn test_sealed_base_is_rejected() {
    let mut fixture = Fixture::new();
    fixture.declare(TypeDeclarationSyntax::class("B").with_modifiers(DeclarationModifiers::SEALED));
    let d = fixture.declare(TypeDeclarationSyntax::class("D").with_base(named("B").at(at(10))));
    let compilation = fixture.compile();

    assert_eq!(compilation.base_type(d), Some(TypeId::OBJECT));
    let diagnostics = compilation.symbol_diagnostics(d);
    assert_eq!(codes(&diagnostics), vec![diagnostic_codes::CANNOT_DERIVE_FROM_SEALED]);
    assert_eq!(diagnostics[0].location, at(10));
}

#[test]
fn test_circular_bases_report_on_each_type() {
    let mut fixture = Fixture::new();
    let a = fixture.declare(TypeDeclarationSyntax::class("A").with_base(named("B")));
    let b = fixture.declare(TypeDeclarationSyntax::class("B").with_base(named("A")));
    let c = fixture.declare(TypeDeclarationSyntax::class("C").with_base(named("A")));
    let compilation = fixture.compile();

    assert_eq!(compilation.base_type(a), Some(TypeId::OBJECT));
    assert_eq!(compilation.base_type(b), Some(TypeId::OBJECT));
    assert_eq!(codes(&compilation.symbol_diagnostics(a)), vec![diagnostic_codes::CIRCULAR_BASE]);
    assert_eq!(codes(&compilation.symbol_diagnostics(b)), vec![diagnostic_codes::CIRCULAR_BASE]);

    // Outside the cycle, the base is kept and the chain terminates.
    assert_eq!(compilation.base_type(c), Some(compilation.arena().declared_type(a)));
    let chain = compilation.base_types_of(compilation.arena().declared_type(c));
    assert_eq!(chain.last(), Some(&TypeId::OBJECT));
}

#[test]
fn test_interface_list_diagnostics() {
    let mut fixture = Fixture::new();
    fixture.declare(TypeDeclarationSyntax::class("B"));
    fixture.declare(TypeDeclarationSyntax::class("Other"));
    fixture.declare(TypeDeclarationSyntax::interface("I"));
    let c = fixture.declare(
        TypeDeclarationSyntax::class("C")
            .with_base(named("B"))
            .with_base(named("I"))
            .with_base(named("I"))
            .with_base(named("Other")),
    );
    let compilation = fixture.compile();

    assert_eq!(display_all(&compilation, compilation.interfaces(c)), vec!["I"]);
    assert_eq!(
        codes(&compilation.symbol_diagnostics(c)),
        vec![
            diagnostic_codes::DUPLICATE_INTERFACE_IN_BASE_LIST,
            diagnostic_codes::NOT_AN_INTERFACE
        ]
    );
}

#[test]
fn test_first_entry_interface_is_not_a_base_class() {
    let mut fixture = Fixture::new();
    fixture.declare(TypeDeclarationSyntax::interface("I"));
    let c = fixture.declare(TypeDeclarationSyntax::class("C").with_base(named("I")));
    let compilation = fixture.compile();
    assert_eq!(compilation.base_type(c), Some(TypeId::OBJECT));
    assert_eq!(display_all(&compilation, compilation.interfaces(c)), vec!["I"]);
    assert!(compilation.symbol_diagnostics(c).is_empty());
}

#[test]
fn test_unknown_base_is_reported_once() {
    let mut fixture = Fixture::new();
    let c = fixture.declare(TypeDeclarationSyntax::class("C").with_base(named("Missing")));
    let compilation = fixture.compile();
    compilation.base_type(c);
    compilation.interfaces(c);
    assert_eq!(
        codes(&compilation.symbol_diagnostics(c)),
        vec![diagnostic_codes::TYPE_OR_NAMESPACE_NOT_FOUND]
    );
}

#[test]
fn test_partial_parts_merge_interfaces_silently() {
    let mut fixture = Fixture::new();
    fixture.declare(TypeDeclarationSyntax::interface("I"));
    fixture.declare(TypeDeclarationSyntax::interface("J"));
    let c = fixture.declare_partial(vec![
        TypeDeclarationSyntax::class("C")
            .with_modifiers(DeclarationModifiers::PARTIAL)
            .with_base(named("I")),
        TypeDeclarationSyntax::class("C")
            .with_modifiers(DeclarationModifiers::PARTIAL)
            .with_base(named("I"))
            .with_base(named("J")),
    ]);
    let compilation = fixture.compile();
    assert_eq!(display_all(&compilation, compilation.interfaces(c)), vec!["I", "J"]);
    assert!(compilation.symbol_diagnostics(c).is_empty());
}

#[test]
fn test_circular_interfaces_are_dropped() {
    let mut fixture = Fixture::new();
    let i = fixture.declare(TypeDeclarationSyntax::interface("I").with_base(named("J")));
    let j = fixture.declare(TypeDeclarationSyntax::interface("J").with_base(named("I")));
    let compilation = fixture.compile();
    assert!(compilation.interfaces(i).is_empty());
    assert!(compilation.interfaces(j).is_empty());
    assert_eq!(codes(&compilation.symbol_diagnostics(i)), vec![diagnostic_codes::CIRCULAR_BASE]);
    assert!(compilation.all_interfaces(i).is_empty());
}

#[test]
fn test_all_interfaces_substitutes_through_constructions() {
    let mut fixture = Fixture::new();
    fixture.declare(TypeDeclarationSyntax::interface("IBase").with_type_parameter(TypeParameterSyntax::new("T")));
    fixture.declare(
        TypeDeclarationSyntax::interface("IDerived")
            .with_type_parameter(TypeParameterSyntax::new("U"))
            .with_base(generic("IBase", vec![named("U")])),
    );
    fixture.declare(TypeDeclarationSyntax::interface("IOther"));
    let b = fixture.declare(TypeDeclarationSyntax::class("B").with_base(named("IOther")));
    let c = fixture.declare(
        TypeDeclarationSyntax::class("C")
            .with_base(named("B"))
            .with_base(generic("IDerived", vec![int()])),
    );
    let compilation = fixture.compile();
    assert_eq!(
        display_all(&compilation, compilation.all_interfaces(c)),
        vec!["IDerived<int>", "IBase<int>", "IOther"]
    );
    assert_eq!(display_all(&compilation, compilation.all_interfaces(b)), vec!["IOther"]);
}
