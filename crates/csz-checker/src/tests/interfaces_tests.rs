use super::*;
use crate::test_fixtures::{Fixture, codes, member};
use csz_common::diagnostic_codes;
use csz_symbols::syntax::{MemberDeclarationSyntax, MethodDeclarationSyntax, ParameterSyntax, PropertyDeclarationSyntax, TypeDeclarationSyntax, TypeParameterSyntax};
use csz_symbols::syntax_factory::{generic, int, named, nullable, string, tuple, void};
use csz_symbols::{
    AssemblyInfo, DeclarationModifiers, MetadataMethod, RefKind, TypeKind, TypeWithAnnotations,
};

fn abstract_method(name: &str) -> MethodDeclarationSyntax {
    MethodDeclarationSyntax::new(name, void()).without_body()
}

fn public_method(name: &str) -> MethodDeclarationSyntax {
    MethodDeclarationSyntax::new(name, void()).public()
}

fn interface_with(member: impl Into<MemberDeclarationSyntax>) -> TypeDeclarationSyntax {
    TypeDeclarationSyntax::interface("I").public().with_member(member)
}

fn class_implementing_i() -> TypeDeclarationSyntax {
    TypeDeclarationSyntax::class("C").public().with_base(named("I"))
}

/// The only non-accessor method of `ty`.
fn only_method(compilation: &Compilation, ty: SymbolId) -> SymbolId {
    let arena = compilation.arena();
    arena
        .members(ty)
        .iter()
        .copied()
        .find(|&symbol| arena.symbol(symbol).as_method().is_some_and(|m| !m.kind.is_accessor()))
        .expect("a method")
}

/// Forces the synthesized implementations of `ty` and returns its codes.
fn synthesized_codes(compilation: &Compilation, ty: SymbolId) -> Vec<u32> {
    compilation.synthesized_explicit_implementations(ty);
    codes(&compilation.symbol_diagnostics(ty))
}

#[test]
fn test_implicit_implementation_is_found() {
    let mut fixture = Fixture::new();
    let i = fixture.declare(interface_with(abstract_method("M")));
    let c = fixture.declare(class_implementing_i().with_member(public_method("M")));
    let compilation = fixture.compile();
    let interface = compilation.arena().declared_type(i);
    let (i_m, c_m) = (member(&compilation, i, "M"), member(&compilation, c, "M"));

    assert_eq!(compilation.implementing_member(c, interface, i_m), Some(c_m));
    assert!(synthesized_codes(&compilation, c).is_empty());
}

#[test]
fn test_in_parameter_needs_exactly_one_forwarder() {
    let mut fixture = Fixture::new();
    let i = fixture.declare(interface_with(
        abstract_method("M").with_parameter(ParameterSyntax::new("x", int()).with_ref_kind(RefKind::In)),
    ));
    let c = fixture.declare(
        class_implementing_i()
            .with_member(public_method("M").with_parameter(ParameterSyntax::new("x", int()).with_ref_kind(RefKind::In))),
    );
    let compilation = fixture.compile();
    let interface = compilation.arena().declared_type(i);
    let (i_m, c_m) = (member(&compilation, i, "M"), member(&compilation, c, "M"));

    let synthesized = compilation.synthesized_explicit_implementations(c);
    assert_eq!(synthesized.forwarding_methods.len(), 1);
    let forwarder = &synthesized.forwarding_methods[0];
    assert_eq!(forwarder.interface_method, i_m);
    assert_eq!(forwarder.implementing_method, c_m);
    assert_eq!(forwarder.interface, interface);
    assert!(synthesized.made_virtual.is_empty());
    assert!(synthesized.method_impls.is_empty());
    assert_eq!(
        compilation.clr_implementation_action(c, interface, i_m, c_m),
        ClrImplementationAction::Forwarder
    );
    assert!(!compilation.is_metadata_virtual(c_m));
}

#[test]
fn test_non_virtual_source_implementation_is_made_virtual() {
    let mut fixture = Fixture::new();
    fixture.declare(interface_with(abstract_method("M")));
    let c = fixture.declare(class_implementing_i().with_member(public_method("M")));
    let compilation = fixture.compile();
    let c_m = member(&compilation, c, "M");

    assert!(!compilation.is_metadata_virtual(c_m));
    let synthesized = compilation.synthesized_explicit_implementations(c);
    assert_eq!(synthesized.made_virtual, vec![c_m]);
    assert!(synthesized.forwarding_methods.is_empty());
    assert!(compilation.is_metadata_virtual(c_m));
}

#[test]
fn test_virtual_implementation_needs_nothing() {
    let mut fixture = Fixture::new();
    fixture.declare(interface_with(
        abstract_method("M").with_parameter(ParameterSyntax::new("x", int()).with_ref_kind(RefKind::In)),
    ));
    let c = fixture.declare(
        class_implementing_i().with_member(
            public_method("M")
                .with_modifiers(DeclarationModifiers::VIRTUAL)
                .with_parameter(ParameterSyntax::new("x", int()).with_ref_kind(RefKind::In)),
        ),
    );
    let compilation = fixture.compile();

    assert!(compilation.synthesized_explicit_implementations(c).is_empty());
}

#[test]
fn test_static_member_gets_method_impl() {
    let mut fixture = Fixture::new();
    let i = fixture.declare(interface_with(
        abstract_method("M").with_modifiers(DeclarationModifiers::STATIC | DeclarationModifiers::ABSTRACT),
    ));
    let c = fixture.declare(
        class_implementing_i().with_member(public_method("M").with_modifiers(DeclarationModifiers::STATIC)),
    );
    let compilation = fixture.compile();
    let interface = compilation.arena().declared_type(i);
    let (i_m, c_m) = (member(&compilation, i, "M"), member(&compilation, c, "M"));

    let synthesized = compilation.synthesized_explicit_implementations(c);
    assert_eq!(
        synthesized.method_impls,
        vec![(c_m, ExplicitImplementation { interface, member: i_m })]
    );
    assert!(synthesized.made_virtual.is_empty());
    assert!(codes(&compilation.symbol_diagnostics(c)).is_empty());
}

#[test]
fn test_static_member_is_not_inherited() {
    let mut fixture = Fixture::new();
    let i = fixture.declare(interface_with(
        abstract_method("M").with_modifiers(DeclarationModifiers::STATIC | DeclarationModifiers::ABSTRACT),
    ));
    fixture.declare(
        TypeDeclarationSyntax::class("B")
            .public()
            .with_member(public_method("M").with_modifiers(DeclarationModifiers::STATIC)),
    );
    let c = fixture.declare(
        TypeDeclarationSyntax::class("C")
            .public()
            .with_base(named("B"))
            .with_base(named("I")),
    );
    let compilation = fixture.compile();
    let interface = compilation.arena().declared_type(i);
    let i_m = member(&compilation, i, "M");

    assert_eq!(compilation.implementing_member(c, interface, i_m), None);
    assert_eq!(
        synthesized_codes(&compilation, c),
        vec![diagnostic_codes::UNIMPLEMENTED_INTERFACE_MEMBER]
    );
}

#[test]
fn test_metadata_non_virtual_implementation_gets_forwarder() {
    let mut fixture = Fixture::new();
    let builder = fixture.builder();
    let lib = builder.add_assembly(AssemblyInfo::new("Lib"));
    let b = builder.reserve_metadata_type(lib, None, "B", TypeKind::Class, DeclarationModifiers::empty(), &[]);
    builder.set_metadata_base(b, Some(TypeId::OBJECT), Vec::new());
    let b_m = builder.add_metadata_method(b, MetadataMethod::new("M", TypeWithAnnotations::oblivious(TypeId::VOID)));
    let i = fixture.declare(interface_with(abstract_method("M")));
    let c = fixture.declare(
        TypeDeclarationSyntax::class("C")
            .public()
            .with_base(named("B"))
            .with_base(named("I")),
    );
    let compilation = fixture.compile();
    let interface = compilation.arena().declared_type(i);
    let i_m = member(&compilation, i, "M");

    assert_eq!(compilation.implementing_member(c, interface, i_m), Some(b_m));
    let synthesized = compilation.synthesized_explicit_implementations(c);
    assert_eq!(synthesized.forwarding_methods.len(), 1);
    assert_eq!(synthesized.forwarding_methods[0].implementing_method, b_m);
    assert!(synthesized.made_virtual.is_empty());
}

#[test]
fn test_default_interface_member_implements_itself() {
    let mut fixture = Fixture::new();
    let i = fixture.declare(interface_with(MethodDeclarationSyntax::new("M", void())));
    let c = fixture.declare(class_implementing_i());
    let compilation = fixture.compile();
    let interface = compilation.arena().declared_type(i);
    let i_m = member(&compilation, i, "M");

    assert_eq!(compilation.implementing_member(c, interface, i_m), Some(i_m));
    assert!(synthesized_codes(&compilation, c).is_empty());
    assert!(compilation.synthesized_explicit_implementations(c).is_empty());
}

#[test]
fn test_derived_member_does_not_reimplement_without_redeclaring() {
    let mut fixture = Fixture::new();
    let i = fixture.declare(interface_with(abstract_method("M")));
    let b = fixture.declare(
        TypeDeclarationSyntax::class("B")
            .public()
            .with_base(named("I"))
            .with_member(public_method("M")),
    );
    let d = fixture.declare(
        TypeDeclarationSyntax::class("D")
            .public()
            .with_base(named("B"))
            .with_member(public_method("M").with_modifiers(DeclarationModifiers::NEW)),
    );
    let compilation = fixture.compile();
    let interface = compilation.arena().declared_type(i);
    let i_m = member(&compilation, i, "M");

    assert_eq!(
        compilation.implementing_member(d, interface, i_m),
        Some(member(&compilation, b, "M"))
    );
    assert!(compilation.synthesized_explicit_implementations(d).is_empty());
}

#[test]
fn test_missing_implementation() {
    let mut fixture = Fixture::new();
    fixture.declare(interface_with(abstract_method("M")));
    let c = fixture.declare(class_implementing_i());
    let compilation = fixture.compile();

    assert_eq!(
        synthesized_codes(&compilation, c),
        vec![diagnostic_codes::UNIMPLEMENTED_INTERFACE_MEMBER]
    );
}

#[test]
fn test_close_candidates_name_the_reason() {
    let cases = [
        (
            MethodDeclarationSyntax::new("M", void()),
            diagnostic_codes::CLOSE_UNIMPLEMENTED_INTERFACE_MEMBER_NOT_PUBLIC,
        ),
        (
            MethodDeclarationSyntax::new("M", int()).public(),
            diagnostic_codes::CLOSE_UNIMPLEMENTED_INTERFACE_MEMBER_WRONG_RETURN_TYPE,
        ),
        (
            public_method("M").with_modifiers(DeclarationModifiers::STATIC),
            diagnostic_codes::CLOSE_UNIMPLEMENTED_INTERFACE_MEMBER_STATIC,
        ),
    ];
    for (candidate, expected) in cases {
        let mut fixture = Fixture::new();
        fixture.declare(interface_with(abstract_method("M")));
        let c = fixture.declare(class_implementing_i().with_member(candidate));
        let compilation = fixture.compile();
        assert_eq!(synthesized_codes(&compilation, c), vec![expected]);
    }
}

#[test]
fn test_implicit_parameter_nullability_mismatch() {
    let mut fixture = Fixture::new();
    fixture.declare(interface_with(
        abstract_method("M").with_parameter(ParameterSyntax::new("s", string())),
    ));
    let c = fixture.declare(
        class_implementing_i().with_member(public_method("M").with_parameter(ParameterSyntax::new("s", nullable(string())))),
    );
    let compilation = fixture.compile();

    assert_eq!(
        synthesized_codes(&compilation, c),
        vec![diagnostic_codes::NULLABILITY_MISMATCH_IN_PARAMETER_TYPE_ON_IMPLICIT_IMPLEMENTATION]
    );
}

#[test]
fn test_implicit_tuple_names_mismatch() {
    let mut fixture = Fixture::new();
    fixture.declare(interface_with(
        MethodDeclarationSyntax::new("M", tuple(vec![(int(), Some("a")), (int(), Some("b"))])).without_body(),
    ));
    let c = fixture.declare(class_implementing_i().with_member(
        MethodDeclarationSyntax::new("M", tuple(vec![(int(), Some("x")), (int(), Some("y"))])).public(),
    ));
    let compilation = fixture.compile();

    assert_eq!(
        synthesized_codes(&compilation, c),
        vec![diagnostic_codes::IMPLEMENTATION_TUPLE_NAMES_MISMATCH]
    );
}

#[test]
fn test_ref_and_out_overloads_are_ambiguous_at_runtime() {
    let mut fixture = Fixture::new();
    fixture.declare(interface_with(
        abstract_method("M").with_parameter(ParameterSyntax::new("x", int()).with_ref_kind(RefKind::Ref)),
    ));
    let c = fixture.declare(
        class_implementing_i()
            .with_member(public_method("M").with_parameter(ParameterSyntax::new("x", int()).with_ref_kind(RefKind::Ref)))
            .with_member(public_method("M").with_parameter(ParameterSyntax::new("x", int()).with_ref_kind(RefKind::Out))),
    );
    let compilation = fixture.compile();

    assert_eq!(
        synthesized_codes(&compilation, c),
        vec![diagnostic_codes::MULTIPLE_IMPLEMENTATION_MATCHES]
    );
}

#[test]
fn test_base_implementing_interface_with_other_nullability() {
    let mut fixture = Fixture::new();
    fixture.declare(
        TypeDeclarationSyntax::interface("I")
            .public()
            .with_type_parameter(TypeParameterSyntax::new("T"))
            .with_member(abstract_method("M").with_parameter(ParameterSyntax::new("x", named("T")))),
    );
    fixture.declare(
        TypeDeclarationSyntax::class("B")
            .public()
            .with_base(generic("I", vec![string()]))
            .with_member(public_method("M").with_parameter(ParameterSyntax::new("x", string()))),
    );
    let c = fixture.declare(
        TypeDeclarationSyntax::class("C")
            .public()
            .with_base(named("B"))
            .with_base(generic("I", vec![nullable(string())])),
    );
    let compilation = fixture.compile();

    assert_eq!(
        synthesized_codes(&compilation, c),
        vec![diagnostic_codes::NULLABILITY_MISMATCH_IN_INTERFACE_IMPLEMENTED_BY_BASE]
    );
}

#[test]
fn test_interface_implemented_by_base_is_not_rechecked() {
    let mut fixture = Fixture::new();
    fixture.declare(interface_with(abstract_method("M")));
    fixture.declare(TypeDeclarationSyntax::class("B").public().with_base(named("I")));
    let c = fixture.declare(
        TypeDeclarationSyntax::class("C")
            .public()
            .with_base(named("B"))
            .with_base(named("I")),
    );
    let compilation = fixture.compile();

    assert!(synthesized_codes(&compilation, c).is_empty());
}

// -----------------------------------------------------------------------------
// Explicit implementations
// -----------------------------------------------------------------------------

#[test]
fn test_explicit_implementation_wins_over_implicit() {
    let mut fixture = Fixture::new();
    let i = fixture.declare(interface_with(abstract_method("M")));
    let c = fixture.declare(
        class_implementing_i()
            .with_member(MethodDeclarationSyntax::new("M", void()).explicit(named("I")))
            .with_member(public_method("M")),
    );
    let compilation = fixture.compile();
    let interface = compilation.arena().declared_type(i);
    let i_m = member(&compilation, i, "M");
    let explicit = only_method(&compilation, c);

    assert_eq!(
        compilation.explicit_implementation(explicit),
        Some(ExplicitImplementation { interface, member: i_m })
    );
    assert_eq!(compilation.implementing_member(c, interface, i_m), Some(explicit));
    assert_eq!(
        compilation.clr_implementation_action(c, interface, i_m, explicit),
        ClrImplementationAction::NoOp
    );
    assert!(synthesized_codes(&compilation, c).is_empty());
}

#[test]
fn test_explicit_property_accessors_follow_the_property() {
    let mut fixture = Fixture::new();
    let i = fixture.declare(interface_with(PropertyDeclarationSyntax::new("P", int()).get()));
    let c = fixture.declare(class_implementing_i().with_member(PropertyDeclarationSyntax::new("P", int()).get().explicit(named("I"))));
    let compilation = fixture.compile();
    let arena = compilation.arena();
    let i_p = member(&compilation, i, "P");
    let c_p = arena
        .members(c)
        .iter()
        .copied()
        .find(|&symbol| arena.symbol(symbol).is_property())
        .expect("property");
    let getter = arena.property(c_p).getter.expect("getter");

    let implemented = compilation.explicit_implementation(getter).expect("implemented");
    assert_eq!(Some(implemented.member), arena.property(i_p).getter);
    assert_eq!(compilation.explicit_implementation(c_p).map(|e| e.member), Some(i_p));
}

fn explicit_codes(interface: TypeDeclarationSyntax, class: TypeDeclarationSyntax) -> Vec<u32> {
    let mut fixture = Fixture::new();
    fixture.declare(interface);
    fixture.declare(TypeDeclarationSyntax::class("K").public());
    let c = fixture.declare(class);
    let compilation = fixture.compile();
    let explicit = only_method(&compilation, c);
    compilation.explicit_implementation(explicit);
    codes(&compilation.symbol_diagnostics(explicit))
}

#[test]
fn test_explicit_member_not_found() {
    assert_eq!(
        explicit_codes(
            interface_with(abstract_method("M")),
            class_implementing_i().with_member(MethodDeclarationSyntax::new("N", void()).explicit(named("I"))),
        ),
        vec![diagnostic_codes::INTERFACE_MEMBER_NOT_FOUND]
    );
}

#[test]
fn test_explicit_name_is_not_an_interface() {
    assert_eq!(
        explicit_codes(
            interface_with(abstract_method("M")),
            class_implementing_i().with_member(MethodDeclarationSyntax::new("M", void()).explicit(named("K"))),
        ),
        vec![diagnostic_codes::EXPLICIT_INTERFACE_NOT_AN_INTERFACE]
    );
}

#[test]
fn test_explicit_interface_not_implemented_by_container() {
    assert_eq!(
        explicit_codes(
            interface_with(abstract_method("M")),
            TypeDeclarationSyntax::class("C")
                .public()
                .with_member(MethodDeclarationSyntax::new("M", void()).explicit(named("I"))),
        ),
        vec![diagnostic_codes::CLASS_DOESNT_IMPLEMENT_INTERFACE]
    );
}

#[test]
fn test_explicit_implementation_matching_two_members() {
    let interface = TypeDeclarationSyntax::interface("I")
        .public()
        .with_type_parameter(TypeParameterSyntax::new("T"))
        .with_member(abstract_method("M").with_parameter(ParameterSyntax::new("x", named("T"))))
        .with_member(abstract_method("M").with_parameter(ParameterSyntax::new("x", int())));
    let class = TypeDeclarationSyntax::class("C")
        .public()
        .with_base(generic("I", vec![int()]))
        .with_member(
            MethodDeclarationSyntax::new("M", void())
                .explicit(generic("I", vec![int()]))
                .with_parameter(ParameterSyntax::new("x", int())),
        );
    assert_eq!(
        explicit_codes(interface, class),
        vec![diagnostic_codes::EXPLICIT_IMPLEMENTATION_COLLISION]
    );
}

#[test]
fn test_explicit_parameter_nullability_mismatch() {
    assert_eq!(
        explicit_codes(
            interface_with(abstract_method("M").with_parameter(ParameterSyntax::new("s", string()))),
            class_implementing_i().with_member(
                MethodDeclarationSyntax::new("M", void())
                    .explicit(named("I"))
                    .with_parameter(ParameterSyntax::new("s", nullable(string()))),
            ),
        ),
        vec![diagnostic_codes::NULLABILITY_MISMATCH_IN_PARAMETER_TYPE_ON_EXPLICIT_IMPLEMENTATION]
    );
}

#[test]
fn test_explicit_scoped_mismatch() {
    let by_ref = || ParameterSyntax::new("x", int()).with_ref_kind(RefKind::Ref);
    assert_eq!(
        explicit_codes(
            interface_with(abstract_method("M").with_parameter(by_ref().scoped())),
            class_implementing_i()
                .with_member(MethodDeclarationSyntax::new("M", void()).explicit(named("I")).with_parameter(by_ref())),
        ),
        vec![diagnostic_codes::SCOPED_MISMATCH_IN_PARAMETER_OF_IMPLEMENTATION]
    );
}
