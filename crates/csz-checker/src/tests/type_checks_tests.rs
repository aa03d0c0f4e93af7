use super::*;
use crate::test_fixtures::{Fixture, at, codes};
use csz_common::DiagnosticBag;
use csz_symbols::syntax::{
    MethodDeclarationSyntax, OperatorToken, ParameterSyntax, PropertyDeclarationSyntax, TypeDeclarationSyntax,
    TypeParameterSyntax, TypeSyntax,
};
use csz_symbols::syntax_factory::{attribute, bool_, int, literal, named, object, string, void};
use csz_symbols::{ConstantValue, DeclarationModifiers, VarianceKind};

const ABSTRACT: DeclarationModifiers = DeclarationModifiers::ABSTRACT;
const OVERRIDE: DeclarationModifiers = DeclarationModifiers::OVERRIDE;

fn operator(token: OperatorToken, ret: TypeSyntax, parameters: Vec<TypeSyntax>) -> MethodDeclarationSyntax {
    parameters.into_iter().enumerate().fold(
        MethodDeclarationSyntax::operator(token, ret)
            .public()
            .with_modifiers(DeclarationModifiers::STATIC),
        |method, (index, ty)| method.with_parameter(ParameterSyntax::new(&format!("p{index}"), ty)),
    )
}

fn equals_override() -> MethodDeclarationSyntax {
    MethodDeclarationSyntax::new("Equals", bool_())
        .public()
        .with_modifiers(OVERRIDE)
        .with_parameter(ParameterSyntax::new("obj", object()))
}

fn get_hash_code_override() -> MethodDeclarationSyntax {
    MethodDeclarationSyntax::new("GetHashCode", int())
        .public()
        .with_modifiers(OVERRIDE)
}

/// Declares every type and runs the type-level checks on the last one.
fn type_codes(declarations: Vec<TypeDeclarationSyntax>) -> Vec<u32> {
    let mut fixture = Fixture::new();
    let mut last = None;
    for declaration in declarations {
        last = Some(fixture.declare(declaration));
    }
    let ty = last.expect("at least one declaration");
    let compilation = fixture.compile();
    let mut diagnostics = DiagnosticBag::new();
    compilation.check_type_members(ty, &mut diagnostics);
    codes(diagnostics.diagnostics())
}

fn partial_codes(parts: Vec<TypeDeclarationSyntax>) -> Vec<u32> {
    let mut fixture = Fixture::new();
    let ty = fixture.declare_partial(parts);
    let compilation = fixture.compile();
    let mut diagnostics = DiagnosticBag::new();
    compilation.check_type_members(ty, &mut diagnostics);
    codes(diagnostics.diagnostics())
}

#[test]
fn test_unmatched_operator_pair() {
    let declaration = TypeDeclarationSyntax::class("C")
        .with_member(operator(OperatorToken::True, bool_(), vec![named("C")]))
        .with_member(operator(OperatorToken::LessThan, bool_(), vec![named("C"), named("C")]))
        .with_member(operator(OperatorToken::GreaterThan, bool_(), vec![named("C"), named("C")]));
    assert_eq!(type_codes(vec![declaration]), vec![diagnostic_codes::OPERATOR_NEEDS_MATCH]);
}

#[test]
fn test_operator_pair_must_agree_on_signature() {
    // `<` over (C, int) and `>` over (C, C) do not pair up.
    let declaration = TypeDeclarationSyntax::class("C")
        .with_member(operator(OperatorToken::LessThan, bool_(), vec![named("C"), int()]))
        .with_member(operator(OperatorToken::GreaterThan, bool_(), vec![named("C"), named("C")]));
    assert_eq!(
        type_codes(vec![declaration]),
        vec![diagnostic_codes::OPERATOR_NEEDS_MATCH, diagnostic_codes::OPERATOR_NEEDS_MATCH]
    );

    let declaration = TypeDeclarationSyntax::class("C")
        .with_member(operator(OperatorToken::LessThan, bool_(), vec![named("C"), named("C")]))
        .with_member(operator(OperatorToken::GreaterThan, int(), vec![named("C"), named("C")]));
    assert_eq!(
        type_codes(vec![declaration]),
        vec![diagnostic_codes::OPERATOR_NEEDS_MATCH, diagnostic_codes::OPERATOR_NEEDS_MATCH]
    );
}

#[test]
fn test_checked_operator_needs_regular_form() {
    let checked_plus = operator(OperatorToken::Plus, named("C"), vec![named("C"), named("C")]).checked();
    let alone = TypeDeclarationSyntax::class("C").with_member(checked_plus.clone());
    assert_eq!(
        type_codes(vec![alone]),
        vec![diagnostic_codes::CHECKED_OPERATOR_NEEDS_MATCH]
    );

    let paired = TypeDeclarationSyntax::class("C")
        .with_member(checked_plus)
        .with_member(operator(OperatorToken::Plus, named("C"), vec![named("C"), named("C")]));
    assert!(type_codes(vec![paired]).is_empty());
}

#[test]
fn test_equality_members() {
    let equals_only = TypeDeclarationSyntax::class("C").with_member(equals_override());
    assert_eq!(
        type_codes(vec![equals_only]),
        vec![diagnostic_codes::EQUALS_WITHOUT_GET_HASH_CODE]
    );

    let operators_only = TypeDeclarationSyntax::class("C")
        .with_member(operator(OperatorToken::EqualsEquals, bool_(), vec![named("C"), named("C")]))
        .with_member(operator(OperatorToken::ExclamationEquals, bool_(), vec![named("C"), named("C")]));
    assert_eq!(
        type_codes(vec![operators_only.clone()]),
        vec![
            diagnostic_codes::EQUALITY_OP_WITHOUT_EQUALS,
            diagnostic_codes::EQUALITY_OP_WITHOUT_GET_HASH_CODE
        ]
    );

    let complete = operators_only
        .with_member(equals_override())
        .with_member(get_hash_code_override());
    assert!(type_codes(vec![complete]).is_empty());
}

#[test]
fn test_equals_overload_is_not_an_override_of_object_equals() {
    let declaration = TypeDeclarationSyntax::struct_("S").with_member(
        MethodDeclarationSyntax::new("Equals", bool_())
            .public()
            .with_parameter(ParameterSyntax::new("other", named("S"))),
    );
    assert!(type_codes(vec![declaration]).is_empty());
}

#[test]
fn test_unimplemented_abstract_members() {
    let base = TypeDeclarationSyntax::class("B")
        .public()
        .with_modifiers(ABSTRACT)
        .with_member(MethodDeclarationSyntax::new("M", void()).public().with_modifiers(ABSTRACT).without_body())
        .with_member(PropertyDeclarationSyntax::new("P", int()).get().public().with_modifiers(ABSTRACT));
    let derived = TypeDeclarationSyntax::class("C")
        .public()
        .with_base(named("B"))
        .with_member(MethodDeclarationSyntax::new("M", void()).public().with_modifiers(OVERRIDE));
    assert_eq!(
        type_codes(vec![base.clone(), derived]),
        vec![diagnostic_codes::UNIMPLEMENTED_ABSTRACT_MEMBER]
    );

    let abstract_derived = TypeDeclarationSyntax::class("C")
        .public()
        .with_modifiers(ABSTRACT)
        .with_base(named("B"));
    assert!(type_codes(vec![base, abstract_derived]).is_empty());
}

#[test]
fn test_abstract_override_is_reported_once() {
    let root = TypeDeclarationSyntax::class("A")
        .public()
        .with_modifiers(ABSTRACT)
        .with_member(MethodDeclarationSyntax::new("M", void()).public().with_modifiers(ABSTRACT).without_body());
    let middle = TypeDeclarationSyntax::class("B")
        .public()
        .with_modifiers(ABSTRACT)
        .with_base(named("A"))
        .with_member(
            MethodDeclarationSyntax::new("M", void())
                .public()
                .with_modifiers(ABSTRACT | OVERRIDE)
                .without_body(),
        );
    let leaf = TypeDeclarationSyntax::class("C").public().with_base(named("B"));
    assert_eq!(
        type_codes(vec![root.clone(), middle.clone(), leaf]),
        vec![diagnostic_codes::UNIMPLEMENTED_ABSTRACT_MEMBER]
    );

    let implemented = TypeDeclarationSyntax::class("C")
        .public()
        .with_base(named("B"))
        .with_member(MethodDeclarationSyntax::new("M", void()).public().with_modifiers(OVERRIDE));
    assert!(type_codes(vec![root, middle, implemented]).is_empty());
}

#[test]
fn test_hiding_does_not_implement_abstract_member() {
    let base = TypeDeclarationSyntax::class("B")
        .public()
        .with_modifiers(ABSTRACT)
        .with_member(MethodDeclarationSyntax::new("M", void()).public().with_modifiers(ABSTRACT).without_body());
    let derived = TypeDeclarationSyntax::class("C")
        .public()
        .with_base(named("B"))
        .with_member(
            MethodDeclarationSyntax::new("M", void())
                .public()
                .with_modifiers(DeclarationModifiers::NEW),
        );
    assert_eq!(
        type_codes(vec![base, derived]),
        vec![diagnostic_codes::UNIMPLEMENTED_ABSTRACT_MEMBER]
    );
}

#[test]
fn test_inconsistent_indexer_names() {
    let indexer_name = |name: &str| attribute("IndexerName", vec![literal(ConstantValue::String(name.into()))]);
    let declaration = TypeDeclarationSyntax::class("C")
        .with_member(
            PropertyDeclarationSyntax::indexer(string(), vec![ParameterSyntax::new("i", int())])
                .get()
                .public(),
        )
        .with_member(
            PropertyDeclarationSyntax::indexer(string(), vec![ParameterSyntax::new("s", string())])
                .get()
                .public()
                .with_attribute(indexer_name("Chars")),
        );
    assert_eq!(
        type_codes(vec![declaration]),
        vec![diagnostic_codes::INCONSISTENT_INDEXER_NAMES]
    );

    let agreeing = TypeDeclarationSyntax::class("C")
        .with_member(
            PropertyDeclarationSyntax::indexer(string(), vec![ParameterSyntax::new("i", int())])
                .get()
                .public(),
        )
        .with_member(
            PropertyDeclarationSyntax::indexer(string(), vec![ParameterSyntax::new("s", string())])
                .get()
                .public()
                .with_attribute(indexer_name("Item")),
        );
    assert!(type_codes(vec![agreeing]).is_empty());
}

fn partial_interface(parameters: Vec<TypeParameterSyntax>, offset: u32) -> TypeDeclarationSyntax {
    parameters.into_iter().fold(
        TypeDeclarationSyntax::interface("I")
            .with_modifiers(DeclarationModifiers::PARTIAL)
            .at(at(offset)),
        TypeDeclarationSyntax::with_type_parameter,
    )
}

#[test]
fn test_partial_type_parameter_names() {
    let codes = partial_codes(vec![
        partial_interface(vec![TypeParameterSyntax::new("T"), TypeParameterSyntax::new("U")], 1),
        partial_interface(vec![TypeParameterSyntax::new("U"), TypeParameterSyntax::new("T")], 20),
    ]);
    assert_eq!(codes, vec![diagnostic_codes::PARTIAL_WRONG_TYPE_PARAMS]);
}

#[test]
fn test_partial_type_parameter_variance() {
    let codes = partial_codes(vec![
        partial_interface(vec![TypeParameterSyntax::new("T").with_variance(VarianceKind::Out)], 1),
        partial_interface(vec![TypeParameterSyntax::new("T")], 20),
        partial_interface(vec![TypeParameterSyntax::new("T").with_variance(VarianceKind::In)], 40),
    ]);
    assert_eq!(codes, vec![diagnostic_codes::PARTIAL_WRONG_TYPE_PARAMS_VARIANCE]);

    let consistent = partial_codes(vec![
        partial_interface(vec![TypeParameterSyntax::new("T").with_variance(VarianceKind::Out)], 1),
        partial_interface(vec![TypeParameterSyntax::new("T").with_variance(VarianceKind::Out)], 20),
    ]);
    assert!(consistent.is_empty());
}
