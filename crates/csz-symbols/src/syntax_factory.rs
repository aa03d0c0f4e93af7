//! Builders for declaration syntax.
//!
//! Front ends and tests construct declarations through these helpers rather
//! than spelling out every field. Nodes start without a location; `at`
//! attaches one.

use crate::constant::ConstantValue;
use crate::symbol::{Accessibility, DeclarationModifiers, TypeKind};
use crate::syntax::{
    AccessorKind, AccessorSyntax, AttributeArgumentSyntax, AttributeSyntax,
    AttributeTargetSpecifier, ConstraintClauseSyntax, ConstraintSyntax, ExpressionSyntax,
    MemberDeclarationSyntax, MethodDeclarationSyntax, MethodSyntaxKind, OperatorToken,
    ParameterSyntax, PropertyDeclarationSyntax, TupleElementSyntax, TypeDeclarationSyntax,
    TypeParameterSyntax, TypeSyntax,
};
use crate::types::{IntrinsicKind, RefKind, VarianceKind};
use csz_common::SourceLocation;
use std::sync::Arc;

// =============================================================================
// Types
// =============================================================================

pub fn predefined(kind: IntrinsicKind) -> TypeSyntax {
    TypeSyntax::Predefined {
        kind,
        location: SourceLocation::none(),
    }
}

pub fn int() -> TypeSyntax {
    predefined(IntrinsicKind::Int)
}

pub fn string() -> TypeSyntax {
    predefined(IntrinsicKind::String)
}

pub fn object() -> TypeSyntax {
    predefined(IntrinsicKind::Object)
}

pub fn void() -> TypeSyntax {
    predefined(IntrinsicKind::Void)
}

pub fn bool_() -> TypeSyntax {
    predefined(IntrinsicKind::Bool)
}

pub fn named(name: &str) -> TypeSyntax {
    generic(name, Vec::new())
}

pub fn generic(name: &str, type_args: Vec<TypeSyntax>) -> TypeSyntax {
    TypeSyntax::Named {
        name: Arc::from(name),
        type_args,
        location: SourceLocation::none(),
    }
}

pub fn nullable(element: TypeSyntax) -> TypeSyntax {
    TypeSyntax::Nullable {
        element: Box::new(element),
        location: SourceLocation::none(),
    }
}

pub fn array(element: TypeSyntax, rank: u8) -> TypeSyntax {
    TypeSyntax::Array {
        element: Box::new(element),
        rank,
        location: SourceLocation::none(),
    }
}

pub fn tuple(elements: Vec<(TypeSyntax, Option<&str>)>) -> TypeSyntax {
    TypeSyntax::Tuple {
        elements: elements
            .into_iter()
            .map(|(ty, name)| TupleElementSyntax {
                ty,
                name: name.map(Arc::from),
            })
            .collect(),
        location: SourceLocation::none(),
    }
}

impl TypeSyntax {
    pub fn at(mut self, at: SourceLocation) -> Self {
        match &mut self {
            TypeSyntax::Predefined { location, .. }
            | TypeSyntax::Named { location, .. }
            | TypeSyntax::Nullable { location, .. }
            | TypeSyntax::Array { location, .. }
            | TypeSyntax::Tuple { location, .. } => *location = at,
        }
        self
    }
}

// =============================================================================
// Expressions and attributes
// =============================================================================

pub fn literal(value: ConstantValue) -> ExpressionSyntax {
    ExpressionSyntax::Literal {
        value,
        location: SourceLocation::none(),
    }
}

pub fn null_literal() -> ExpressionSyntax {
    ExpressionSyntax::Null {
        location: SourceLocation::none(),
    }
}

pub fn default_literal(ty: Option<TypeSyntax>) -> ExpressionSyntax {
    ExpressionSyntax::Default {
        ty,
        location: SourceLocation::none(),
    }
}

pub fn name_of(name: &str) -> ExpressionSyntax {
    ExpressionSyntax::NameOf {
        name: Arc::from(name),
        location: SourceLocation::none(),
    }
}

pub fn type_of(ty: TypeSyntax) -> ExpressionSyntax {
    ExpressionSyntax::TypeOf {
        ty,
        location: SourceLocation::none(),
    }
}

/// An expression that never binds to a constant.
pub fn non_constant(text: &str) -> ExpressionSyntax {
    ExpressionSyntax::Other {
        text: Arc::from(text),
        location: SourceLocation::none(),
    }
}

pub fn attribute(name: &str, arguments: Vec<ExpressionSyntax>) -> AttributeSyntax {
    AttributeSyntax {
        name: Arc::from(name),
        arguments: arguments
            .into_iter()
            .map(|expression| AttributeArgumentSyntax {
                name: None,
                expression,
            })
            .collect(),
        target: None,
        location: SourceLocation::none(),
    }
}

impl AttributeSyntax {
    pub fn with_named_argument(mut self, name: &str, expression: ExpressionSyntax) -> Self {
        self.arguments.push(AttributeArgumentSyntax {
            name: Some(Arc::from(name)),
            expression,
        });
        self
    }

    pub fn with_target(mut self, target: AttributeTargetSpecifier) -> Self {
        self.target = Some(target);
        self
    }

    pub fn at(mut self, location: SourceLocation) -> Self {
        self.location = location;
        self
    }
}

// =============================================================================
// Parameters and constraints
// =============================================================================

impl ParameterSyntax {
    pub fn new(name: &str, ty: TypeSyntax) -> Self {
        ParameterSyntax {
            name: Arc::from(name),
            ty,
            ref_kind: RefKind::None,
            is_scoped: false,
            is_params: false,
            default_value: None,
            attributes: Vec::new(),
            location: SourceLocation::none(),
        }
    }

    pub fn with_ref_kind(mut self, ref_kind: RefKind) -> Self {
        self.ref_kind = ref_kind;
        self
    }

    pub fn scoped(mut self) -> Self {
        self.is_scoped = true;
        self
    }

    pub fn params(mut self) -> Self {
        self.is_params = true;
        self
    }

    pub fn with_default(mut self, value: ExpressionSyntax) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn with_attribute(mut self, attribute: AttributeSyntax) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn at(mut self, location: SourceLocation) -> Self {
        self.location = location;
        self
    }
}

impl TypeParameterSyntax {
    pub fn new(name: &str) -> Self {
        TypeParameterSyntax {
            name: Arc::from(name),
            variance: VarianceKind::None,
            attributes: Vec::new(),
            location: SourceLocation::none(),
        }
    }

    pub fn with_variance(mut self, variance: VarianceKind) -> Self {
        self.variance = variance;
        self
    }

    pub fn with_attribute(mut self, attribute: AttributeSyntax) -> Self {
        self.attributes.push(attribute);
        self
    }
}

impl ConstraintClauseSyntax {
    pub fn new(type_parameter: &str, constraints: Vec<ConstraintSyntax>) -> Self {
        ConstraintClauseSyntax {
            type_parameter: Arc::from(type_parameter),
            constraints,
            location: SourceLocation::none(),
        }
    }

    pub fn at(mut self, location: SourceLocation) -> Self {
        self.location = location;
        self
    }
}

impl ConstraintSyntax {
    pub fn class() -> Self {
        ConstraintSyntax::Class {
            nullable: false,
            location: SourceLocation::none(),
        }
    }

    pub fn nullable_class() -> Self {
        ConstraintSyntax::Class {
            nullable: true,
            location: SourceLocation::none(),
        }
    }

    pub fn struct_() -> Self {
        ConstraintSyntax::Struct {
            location: SourceLocation::none(),
        }
    }

    pub fn unmanaged() -> Self {
        ConstraintSyntax::Unmanaged {
            location: SourceLocation::none(),
        }
    }

    pub fn not_null() -> Self {
        ConstraintSyntax::NotNull {
            location: SourceLocation::none(),
        }
    }

    pub fn constructor() -> Self {
        ConstraintSyntax::Constructor {
            location: SourceLocation::none(),
        }
    }

    pub fn default_constraint() -> Self {
        ConstraintSyntax::Default {
            location: SourceLocation::none(),
        }
    }
}

// =============================================================================
// Members
// =============================================================================

impl MethodDeclarationSyntax {
    pub fn new(name: &str, return_type: TypeSyntax) -> Self {
        MethodDeclarationSyntax {
            kind: MethodSyntaxKind::Ordinary,
            name: Arc::from(name),
            modifiers: DeclarationModifiers::empty(),
            accessibility: None,
            explicit_interface: None,
            type_parameters: Vec::new(),
            constraint_clauses: Vec::new(),
            return_type,
            ref_kind: RefKind::None,
            parameters: Vec::new(),
            attributes: Vec::new(),
            has_body: true,
            location: SourceLocation::none(),
        }
    }

    /// `public static R operator <token>(...)`.
    pub fn operator(token: OperatorToken, return_type: TypeSyntax) -> Self {
        MethodDeclarationSyntax {
            kind: MethodSyntaxKind::Operator {
                token,
                is_checked: false,
            },
            accessibility: Some(Accessibility::Public),
            modifiers: DeclarationModifiers::STATIC,
            ..Self::new(token.text(), return_type)
        }
    }

    /// `public static implicit|explicit operator R(...)`.
    pub fn conversion(is_explicit: bool, return_type: TypeSyntax) -> Self {
        MethodDeclarationSyntax {
            kind: MethodSyntaxKind::Conversion {
                is_explicit,
                is_checked: false,
            },
            accessibility: Some(Accessibility::Public),
            modifiers: DeclarationModifiers::STATIC,
            ..Self::new(if is_explicit { "explicit" } else { "implicit" }, return_type)
        }
    }

    pub fn checked(mut self) -> Self {
        match &mut self.kind {
            MethodSyntaxKind::Operator { is_checked, .. }
            | MethodSyntaxKind::Conversion { is_checked, .. } => *is_checked = true,
            MethodSyntaxKind::Ordinary => {}
        }
        self
    }

    pub fn with_modifiers(mut self, modifiers: DeclarationModifiers) -> Self {
        self.modifiers |= modifiers;
        self
    }

    /// Replace the modifiers instead of adding to them.
    pub fn set_modifiers(mut self, modifiers: DeclarationModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = Some(accessibility);
        self
    }

    pub fn public(self) -> Self {
        self.with_accessibility(Accessibility::Public)
    }

    pub fn explicit(mut self, interface: TypeSyntax) -> Self {
        self.explicit_interface = Some(interface);
        self
    }

    pub fn with_type_parameter(mut self, parameter: TypeParameterSyntax) -> Self {
        self.type_parameters.push(parameter);
        self
    }

    pub fn with_constraint_clause(mut self, clause: ConstraintClauseSyntax) -> Self {
        self.constraint_clauses.push(clause);
        self
    }

    pub fn with_ref_kind(mut self, ref_kind: RefKind) -> Self {
        self.ref_kind = ref_kind;
        self
    }

    pub fn with_parameter(mut self, parameter: ParameterSyntax) -> Self {
        self.parameters.push(Arc::new(parameter));
        self
    }

    pub fn with_attribute(mut self, attribute: AttributeSyntax) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn without_body(mut self) -> Self {
        self.has_body = false;
        self
    }

    pub fn at(mut self, location: SourceLocation) -> Self {
        self.location = location;
        self
    }
}

impl AccessorSyntax {
    pub fn new(kind: AccessorKind) -> Self {
        AccessorSyntax {
            kind,
            accessibility: None,
            attributes: Vec::new(),
            has_body: false,
            location: SourceLocation::none(),
        }
    }

    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = Some(accessibility);
        self
    }

    pub fn with_body(mut self) -> Self {
        self.has_body = true;
        self
    }

    pub fn with_attribute(mut self, attribute: AttributeSyntax) -> Self {
        self.attributes.push(attribute);
        self
    }
}

impl PropertyDeclarationSyntax {
    /// A property with no accessors; add them with `get`, `set` or
    /// `with_accessor`.
    pub fn new(name: &str, ty: TypeSyntax) -> Self {
        PropertyDeclarationSyntax {
            name: Arc::from(name),
            is_indexer: false,
            modifiers: DeclarationModifiers::empty(),
            accessibility: None,
            explicit_interface: None,
            ty,
            ref_kind: RefKind::None,
            parameters: Vec::new(),
            accessors: Vec::new(),
            attributes: Vec::new(),
            location: SourceLocation::none(),
        }
    }

    pub fn indexer(ty: TypeSyntax, parameters: Vec<ParameterSyntax>) -> Self {
        PropertyDeclarationSyntax {
            is_indexer: true,
            parameters: parameters.into_iter().map(Arc::new).collect(),
            ..Self::new("this", ty)
        }
    }

    pub fn get(self) -> Self {
        self.with_accessor(AccessorSyntax::new(AccessorKind::Get))
    }

    pub fn set(self) -> Self {
        self.with_accessor(AccessorSyntax::new(AccessorKind::Set))
    }

    pub fn with_accessor(mut self, accessor: AccessorSyntax) -> Self {
        self.accessors.push(accessor);
        self
    }

    pub fn with_modifiers(mut self, modifiers: DeclarationModifiers) -> Self {
        self.modifiers |= modifiers;
        self
    }

    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = Some(accessibility);
        self
    }

    pub fn public(self) -> Self {
        self.with_accessibility(Accessibility::Public)
    }

    pub fn explicit(mut self, interface: TypeSyntax) -> Self {
        self.explicit_interface = Some(interface);
        self
    }

    pub fn with_ref_kind(mut self, ref_kind: RefKind) -> Self {
        self.ref_kind = ref_kind;
        self
    }

    pub fn with_attribute(mut self, attribute: AttributeSyntax) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn at(mut self, location: SourceLocation) -> Self {
        self.location = location;
        self
    }
}

impl From<MethodDeclarationSyntax> for MemberDeclarationSyntax {
    fn from(method: MethodDeclarationSyntax) -> Self {
        MemberDeclarationSyntax::Method(Arc::new(method))
    }
}

impl From<PropertyDeclarationSyntax> for MemberDeclarationSyntax {
    fn from(property: PropertyDeclarationSyntax) -> Self {
        MemberDeclarationSyntax::Property(Arc::new(property))
    }
}

// =============================================================================
// Types
// =============================================================================

impl TypeDeclarationSyntax {
    pub fn new(kind: TypeKind, name: &str) -> Self {
        TypeDeclarationSyntax {
            kind,
            name: Arc::from(name),
            namespace: None,
            modifiers: DeclarationModifiers::empty(),
            accessibility: None,
            type_parameters: Vec::new(),
            base_list: Vec::new(),
            constraint_clauses: Vec::new(),
            members: Vec::new(),
            attributes: Vec::new(),
            nullable_annotations: None,
            location: SourceLocation::none(),
        }
    }

    pub fn class(name: &str) -> Self {
        Self::new(TypeKind::Class, name)
    }

    pub fn struct_(name: &str) -> Self {
        Self::new(TypeKind::Struct, name)
    }

    pub fn interface(name: &str) -> Self {
        Self::new(TypeKind::Interface, name)
    }

    pub fn in_namespace(mut self, namespace: &str) -> Self {
        self.namespace = Some(Arc::from(namespace));
        self
    }

    pub fn with_modifiers(mut self, modifiers: DeclarationModifiers) -> Self {
        self.modifiers |= modifiers;
        self
    }

    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = Some(accessibility);
        self
    }

    pub fn public(self) -> Self {
        self.with_accessibility(Accessibility::Public)
    }

    pub fn with_type_parameter(mut self, parameter: TypeParameterSyntax) -> Self {
        self.type_parameters.push(parameter);
        self
    }

    pub fn with_base(mut self, base: TypeSyntax) -> Self {
        self.base_list.push(base);
        self
    }

    pub fn with_constraint_clause(mut self, clause: ConstraintClauseSyntax) -> Self {
        self.constraint_clauses.push(clause);
        self
    }

    pub fn with_member(mut self, member: impl Into<MemberDeclarationSyntax>) -> Self {
        self.members.push(member.into());
        self
    }

    pub fn with_attribute(mut self, attribute: AttributeSyntax) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_nullable_annotations(mut self, enabled: bool) -> Self {
        self.nullable_annotations = Some(enabled);
        self
    }

    pub fn at(mut self, location: SourceLocation) -> Self {
        self.location = location;
        self
    }
}

#[cfg(test)]
#[path = "tests/syntax_factory_tests.rs"]
mod tests;
