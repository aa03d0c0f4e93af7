use super::*;
use crate::test_fixtures::{Fixture, codes, member};
use csz_symbols::syntax::{AccessorKind, AccessorSyntax, MethodDeclarationSyntax, PropertyDeclarationSyntax, TypeDeclarationSyntax};
use csz_symbols::syntax_factory::{int, void};

fn member_codes(declaration: TypeDeclarationSyntax, name: &str) -> Vec<u32> {
    let mut fixture = Fixture::new();
    let ty = fixture.declare(declaration);
    let compilation = fixture.compile();
    let target = member(&compilation, ty, name);
    let mut diagnostics = DiagnosticBag::new();
    compilation.check_member_modifiers(target, &mut diagnostics);
    if compilation.arena().symbol(target).is_property() {
        compilation.check_property_accessors(target, &mut diagnostics);
    }
    codes(diagnostics.diagnostics())
}

fn method(modifiers: DeclarationModifiers) -> MethodDeclarationSyntax {
    MethodDeclarationSyntax::new("M", void()).public().with_modifiers(modifiers)
}

#[test]
fn test_plain_members_are_clean() {
    let declaration = TypeDeclarationSyntax::class("C")
        .with_modifiers(DeclarationModifiers::ABSTRACT)
        .with_member(method(DeclarationModifiers::ABSTRACT).without_body());
    assert!(member_codes(declaration, "M").is_empty());
    let declaration = TypeDeclarationSyntax::class("C").with_member(method(DeclarationModifiers::VIRTUAL));
    assert!(member_codes(declaration, "M").is_empty());
}

#[test]
fn test_virtual_private_member() {
    let declaration = TypeDeclarationSyntax::class("C").with_member(
        MethodDeclarationSyntax::new("M", void()).with_modifiers(DeclarationModifiers::VIRTUAL),
    );
    assert_eq!(member_codes(declaration, "M"), vec![diagnostic_codes::VIRTUAL_PRIVATE]);
}

#[test]
fn test_static_cannot_be_virtual() {
    let declaration = TypeDeclarationSyntax::class("C")
        .with_member(method(DeclarationModifiers::STATIC | DeclarationModifiers::VIRTUAL));
    assert_eq!(member_codes(declaration, "M"), vec![diagnostic_codes::STATIC_NOT_VIRTUAL]);
}

#[test]
fn test_override_with_new_and_sealed_without_override() {
    let declaration = TypeDeclarationSyntax::class("C")
        .with_member(method(DeclarationModifiers::OVERRIDE | DeclarationModifiers::NEW));
    assert_eq!(member_codes(declaration, "M"), vec![diagnostic_codes::OVERRIDE_NOT_NEW]);

    let declaration = TypeDeclarationSyntax::class("C").with_member(method(DeclarationModifiers::SEALED));
    assert_eq!(member_codes(declaration, "M"), vec![diagnostic_codes::SEALED_NON_OVERRIDE]);
}

#[test]
fn test_abstract_conflicts() {
    let declaration = TypeDeclarationSyntax::class("C")
        .with_modifiers(DeclarationModifiers::ABSTRACT)
        .with_member(method(DeclarationModifiers::ABSTRACT | DeclarationModifiers::VIRTUAL).without_body());
    assert_eq!(member_codes(declaration, "M"), vec![diagnostic_codes::ABSTRACT_NOT_VIRTUAL]);

    let declaration = TypeDeclarationSyntax::class("C")
        .with_modifiers(DeclarationModifiers::ABSTRACT)
        .with_member(method(DeclarationModifiers::ABSTRACT | DeclarationModifiers::EXTERN).without_body());
    assert_eq!(member_codes(declaration, "M"), vec![diagnostic_codes::ABSTRACT_AND_EXTERN]);

    let declaration = TypeDeclarationSyntax::class("C")
        .with_member(method(DeclarationModifiers::ABSTRACT).without_body());
    assert_eq!(member_codes(declaration, "M"), vec![diagnostic_codes::ABSTRACT_IN_CONCRETE_CLASS]);
}

#[test]
fn test_sealed_container_rules() {
    let declaration = TypeDeclarationSyntax::class("C")
        .with_modifiers(DeclarationModifiers::SEALED)
        .with_member(method(DeclarationModifiers::VIRTUAL));
    assert_eq!(member_codes(declaration, "M"), vec![diagnostic_codes::NEW_VIRTUAL_IN_SEALED]);

    let declaration = TypeDeclarationSyntax::class("C")
        .with_modifiers(DeclarationModifiers::SEALED)
        .with_member(MethodDeclarationSyntax::new("M", void()).with_accessibility(Accessibility::Protected));
    assert_eq!(member_codes(declaration, "M"), vec![diagnostic_codes::PROTECTED_IN_SEALED]);
}

#[test]
fn test_struct_and_static_class_rules() {
    let declaration = TypeDeclarationSyntax::struct_("S").with_member(method(DeclarationModifiers::VIRTUAL));
    assert_eq!(member_codes(declaration, "M"), vec![diagnostic_codes::BAD_MEMBER_FLAG]);

    let declaration = TypeDeclarationSyntax::struct_("S")
        .with_member(MethodDeclarationSyntax::new("M", void()).with_accessibility(Accessibility::Protected));
    assert_eq!(member_codes(declaration, "M"), vec![diagnostic_codes::PROTECTED_IN_STRUCT]);

    let declaration = TypeDeclarationSyntax::class("C")
        .with_modifiers(DeclarationModifiers::STATIC)
        .with_member(method(DeclarationModifiers::empty()));
    assert_eq!(member_codes(declaration, "M"), vec![diagnostic_codes::INSTANCE_MEMBER_IN_STATIC_CLASS]);
}

#[test]
fn test_interface_members_are_not_class_checked() {
    let declaration = TypeDeclarationSyntax::interface("I")
        .with_member(MethodDeclarationSyntax::new("M", void()).without_body());
    assert!(member_codes(declaration, "M").is_empty());
}

#[test]
fn test_property_without_accessors() {
    let declaration = TypeDeclarationSyntax::class("C").with_member(PropertyDeclarationSyntax::new("P", int()).public());
    assert_eq!(member_codes(declaration, "P"), vec![diagnostic_codes::PROPERTY_WITH_NO_ACCESSORS]);
}

#[test]
fn test_ref_property_accessors() {
    let declaration = TypeDeclarationSyntax::class("C").with_member(
        PropertyDeclarationSyntax::new("P", int())
            .public()
            .with_ref_kind(RefKind::Ref)
            .set(),
    );
    assert_eq!(
        member_codes(declaration, "P"),
        vec![
            diagnostic_codes::REF_PROPERTY_MUST_HAVE_GET,
            diagnostic_codes::REF_PROPERTY_CANNOT_HAVE_SET
        ]
    );
}

#[test]
fn test_accessor_accessibility_rules() {
    // Only one accessor may narrow, and it must actually narrow.
    let declaration = TypeDeclarationSyntax::class("C").with_member(
        PropertyDeclarationSyntax::new("P", int())
            .with_accessibility(Accessibility::Internal)
            .with_accessor(AccessorSyntax::new(AccessorKind::Get).with_accessibility(Accessibility::Public))
            .with_accessor(AccessorSyntax::new(AccessorKind::Set).with_accessibility(Accessibility::Private)),
    );
    assert_eq!(
        member_codes(declaration, "P"),
        vec![
            diagnostic_codes::DUPLICATE_PROPERTY_ACCESSOR_MODIFIERS,
            diagnostic_codes::INVALID_PROPERTY_ACCESSOR_MODIFIER
        ]
    );

    let declaration = TypeDeclarationSyntax::class("C").with_member(
        PropertyDeclarationSyntax::new("P", int())
            .public()
            .with_accessor(AccessorSyntax::new(AccessorKind::Get).with_accessibility(Accessibility::Protected)),
    );
    assert_eq!(
        member_codes(declaration, "P"),
        vec![diagnostic_codes::ACCESSOR_MODIFIER_REQUIRES_BOTH_ACCESSORS]
    );

    let declaration = TypeDeclarationSyntax::class("C").with_member(
        PropertyDeclarationSyntax::new("P", int())
            .public()
            .with_modifiers(DeclarationModifiers::VIRTUAL)
            .get()
            .with_accessor(AccessorSyntax::new(AccessorKind::Set).with_accessibility(Accessibility::Private)),
    );
    assert_eq!(member_codes(declaration, "P"), vec![diagnostic_codes::PRIVATE_ABSTRACT_ACCESSOR]);
}

#[test]
fn test_modifier_keyword_order() {
    assert_eq!(modifier_keyword(DeclarationModifiers::OVERRIDE | DeclarationModifiers::ABSTRACT), "abstract");
    assert_eq!(modifier_keyword(DeclarationModifiers::SEALED), "sealed");
    assert_eq!(modifier_keyword(DeclarationModifiers::empty()), "");
}
