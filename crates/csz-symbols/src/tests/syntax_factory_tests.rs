use super::*;
use crate::syntax::{MethodSyntaxKind, OperatorKind};

#[test]
fn test_type_syntax_renders_as_source() {
    let ty = generic("Dictionary", vec![string(), nullable(named("T"))]);
    assert_eq!(ty.to_string(), "Dictionary<string, T?>");
    assert_eq!(array(int(), 3).to_string(), "int[,,]");
    assert_eq!(
        tuple(vec![(int(), Some("a")), (string(), None)]).to_string(),
        "(int a, string)"
    );
}

#[test]
fn test_operator_declaration_defaults() {
    let op = MethodDeclarationSyntax::operator(OperatorToken::Plus, named("C")).checked();
    assert!(matches!(
        op.kind,
        MethodSyntaxKind::Operator {
            token: OperatorToken::Plus,
            is_checked: true
        }
    ));
    assert_eq!(op.accessibility, Some(Accessibility::Public));
    assert!(op.modifiers.contains(DeclarationModifiers::STATIC));
    assert_eq!(OperatorKind::from_token(OperatorToken::Plus, 2), OperatorKind::Addition);
}

#[test]
fn test_property_accessor_lookup() {
    let property = PropertyDeclarationSyntax::new("P", int()).get().with_accessor(
        AccessorSyntax::new(AccessorKind::Init).with_accessibility(Accessibility::Private),
    );
    assert!(property.getter().is_some());
    assert_eq!(
        property.setter().map(|setter| setter.kind),
        Some(AccessorKind::Init)
    );
}

#[test]
fn test_attribute_arguments_split_positional_and_named() {
    let attribute = attribute("Obsolete", vec![literal(ConstantValue::String("old".into()))])
        .with_named_argument("DiagnosticId", literal(ConstantValue::String("X1".into())));
    assert_eq!(attribute.positional_arguments().count(), 1);
    assert_eq!(attribute.arguments.len(), 2);
}
