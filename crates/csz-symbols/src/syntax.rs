//! Declaration syntax consumed by the symbol layer.
//!
//! The parser produces these nodes; nothing here is mutated after
//! construction, so they are shared across threads behind `Arc`.

use crate::constant::ConstantValue;
use crate::symbol::{Accessibility, DeclarationModifiers, TypeKind};
use crate::types::{IntrinsicKind, RefKind, VarianceKind};
use csz_common::SourceLocation;
use std::fmt;
use std::sync::Arc;

// =============================================================================
// Types and expressions
// =============================================================================

#[derive(Clone, Debug, PartialEq)]
pub enum TypeSyntax {
    /// Keyword type: `int`, `string`, `object`, ...
    Predefined {
        kind: IntrinsicKind,
        location: SourceLocation,
    },
    /// Possibly qualified and possibly generic name: `List<T>`, `System.IDisposable`.
    Named {
        name: Arc<str>,
        type_args: Vec<TypeSyntax>,
        location: SourceLocation,
    },
    /// `T?`
    Nullable {
        element: Box<TypeSyntax>,
        location: SourceLocation,
    },
    Array {
        element: Box<TypeSyntax>,
        rank: u8,
        location: SourceLocation,
    },
    Tuple {
        elements: Vec<TupleElementSyntax>,
        location: SourceLocation,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct TupleElementSyntax {
    pub ty: TypeSyntax,
    pub name: Option<Arc<str>>,
}

impl TypeSyntax {
    pub fn location(&self) -> &SourceLocation {
        match self {
            TypeSyntax::Predefined { location, .. }
            | TypeSyntax::Named { location, .. }
            | TypeSyntax::Nullable { location, .. }
            | TypeSyntax::Array { location, .. }
            | TypeSyntax::Tuple { location, .. } => location,
        }
    }
}

impl fmt::Display for TypeSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSyntax::Predefined { kind, .. } => f.write_str(kind.keyword()),
            TypeSyntax::Named {
                name, type_args, ..
            } => {
                f.write_str(name)?;
                if !type_args.is_empty() {
                    f.write_str("<")?;
                    for (i, arg) in type_args.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    f.write_str(">")?;
                }
                Ok(())
            }
            TypeSyntax::Nullable { element, .. } => write!(f, "{element}?"),
            TypeSyntax::Array { element, rank, .. } => {
                let commas = ",".repeat(rank.saturating_sub(1) as usize);
                write!(f, "{element}[{commas}]")
            }
            TypeSyntax::Tuple { elements, .. } => {
                f.write_str("(")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", element.ty)?;
                    if let Some(name) = &element.name {
                        write!(f, " {name}")?;
                    }
                }
                f.write_str(")")
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExpressionSyntax {
    Literal {
        value: ConstantValue,
        location: SourceLocation,
    },
    Null {
        location: SourceLocation,
    },
    /// `default` or `default(T)`.
    Default {
        ty: Option<TypeSyntax>,
        location: SourceLocation,
    },
    /// `nameof(x)`.
    NameOf {
        name: Arc<str>,
        location: SourceLocation,
    },
    TypeOf {
        ty: TypeSyntax,
        location: SourceLocation,
    },
    /// Any expression that is not a compile-time constant for our purposes.
    Other {
        text: Arc<str>,
        location: SourceLocation,
    },
}

impl ExpressionSyntax {
    pub fn location(&self) -> &SourceLocation {
        match self {
            ExpressionSyntax::Literal { location, .. }
            | ExpressionSyntax::Null { location }
            | ExpressionSyntax::Default { location, .. }
            | ExpressionSyntax::NameOf { location, .. }
            | ExpressionSyntax::TypeOf { location, .. }
            | ExpressionSyntax::Other { location, .. } => location,
        }
    }
}

// =============================================================================
// Attributes
// =============================================================================

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AttributeTargetSpecifier {
    Assembly,
    Type,
    Method,
    Property,
    Field,
    Param,
    Return,
    TypeVar,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AttributeArgumentSyntax {
    /// `Name = value` for named arguments.
    pub name: Option<Arc<str>>,
    pub expression: ExpressionSyntax,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AttributeSyntax {
    /// Name as written, with or without the `Attribute` suffix.
    pub name: Arc<str>,
    pub arguments: Vec<AttributeArgumentSyntax>,
    pub target: Option<AttributeTargetSpecifier>,
    pub location: SourceLocation,
}

impl AttributeSyntax {
    pub fn positional_arguments(&self) -> impl Iterator<Item = &ExpressionSyntax> {
        self.arguments
            .iter()
            .filter(|argument| argument.name.is_none())
            .map(|argument| &argument.expression)
    }
}

// =============================================================================
// Members
// =============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct ParameterSyntax {
    pub name: Arc<str>,
    pub ty: TypeSyntax,
    pub ref_kind: RefKind,
    pub is_scoped: bool,
    pub is_params: bool,
    pub default_value: Option<ExpressionSyntax>,
    pub attributes: Vec<AttributeSyntax>,
    pub location: SourceLocation,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TypeParameterSyntax {
    pub name: Arc<str>,
    pub variance: VarianceKind,
    pub attributes: Vec<AttributeSyntax>,
    pub location: SourceLocation,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ConstraintSyntax {
    /// `class` or `class?`.
    Class {
        nullable: bool,
        location: SourceLocation,
    },
    Struct {
        location: SourceLocation,
    },
    Unmanaged {
        location: SourceLocation,
    },
    NotNull {
        location: SourceLocation,
    },
    /// `new()`.
    Constructor {
        location: SourceLocation,
    },
    Default {
        location: SourceLocation,
    },
    Type(TypeSyntax),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConstraintClauseSyntax {
    pub type_parameter: Arc<str>,
    pub constraints: Vec<ConstraintSyntax>,
    pub location: SourceLocation,
}

/// Operator token as written after the `operator` keyword.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OperatorToken {
    Plus,
    Minus,
    Bang,
    Tilde,
    PlusPlus,
    MinusMinus,
    True,
    False,
    Star,
    Slash,
    Percent,
    Ampersand,
    Bar,
    Caret,
    LessThanLessThan,
    GreaterThanGreaterThan,
    GreaterThanGreaterThanGreaterThan,
    EqualsEquals,
    ExclamationEquals,
    LessThan,
    GreaterThan,
    LessThanEquals,
    GreaterThanEquals,
}

impl OperatorToken {
    pub fn text(self) -> &'static str {
        match self {
            OperatorToken::Plus => "+",
            OperatorToken::Minus => "-",
            OperatorToken::Bang => "!",
            OperatorToken::Tilde => "~",
            OperatorToken::PlusPlus => "++",
            OperatorToken::MinusMinus => "--",
            OperatorToken::True => "true",
            OperatorToken::False => "false",
            OperatorToken::Star => "*",
            OperatorToken::Slash => "/",
            OperatorToken::Percent => "%",
            OperatorToken::Ampersand => "&",
            OperatorToken::Bar => "|",
            OperatorToken::Caret => "^",
            OperatorToken::LessThanLessThan => "<<",
            OperatorToken::GreaterThanGreaterThan => ">>",
            OperatorToken::GreaterThanGreaterThanGreaterThan => ">>>",
            OperatorToken::EqualsEquals => "==",
            OperatorToken::ExclamationEquals => "!=",
            OperatorToken::LessThan => "<",
            OperatorToken::GreaterThan => ">",
            OperatorToken::LessThanEquals => "<=",
            OperatorToken::GreaterThanEquals => ">=",
        }
    }
}

/// Operator identity after resolving the token against the declared
/// parameter count.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    UnaryPlus,
    UnaryNegation,
    LogicalNot,
    OnesComplement,
    Increment,
    Decrement,
    True,
    False,
    Addition,
    Subtraction,
    Multiply,
    Division,
    Modulus,
    BitwiseAnd,
    BitwiseOr,
    ExclusiveOr,
    LeftShift,
    RightShift,
    UnsignedRightShift,
    Equality,
    Inequality,
    LessThan,
    GreaterThan,
    LessThanOrEqual,
    GreaterThanOrEqual,
    Implicit,
    Explicit,
}

impl OperatorKind {
    /// Tokens that can be unary or binary resolve by parameter count; any
    /// count other than one picks the binary form.
    pub fn from_token(token: OperatorToken, parameter_count: usize) -> OperatorKind {
        let unary = parameter_count == 1;
        match token {
            OperatorToken::Plus if unary => OperatorKind::UnaryPlus,
            OperatorToken::Plus => OperatorKind::Addition,
            OperatorToken::Minus if unary => OperatorKind::UnaryNegation,
            OperatorToken::Minus => OperatorKind::Subtraction,
            OperatorToken::Bang => OperatorKind::LogicalNot,
            OperatorToken::Tilde => OperatorKind::OnesComplement,
            OperatorToken::PlusPlus => OperatorKind::Increment,
            OperatorToken::MinusMinus => OperatorKind::Decrement,
            OperatorToken::True => OperatorKind::True,
            OperatorToken::False => OperatorKind::False,
            OperatorToken::Star => OperatorKind::Multiply,
            OperatorToken::Slash => OperatorKind::Division,
            OperatorToken::Percent => OperatorKind::Modulus,
            OperatorToken::Ampersand => OperatorKind::BitwiseAnd,
            OperatorToken::Bar => OperatorKind::BitwiseOr,
            OperatorToken::Caret => OperatorKind::ExclusiveOr,
            OperatorToken::LessThanLessThan => OperatorKind::LeftShift,
            OperatorToken::GreaterThanGreaterThan => OperatorKind::RightShift,
            OperatorToken::GreaterThanGreaterThanGreaterThan => OperatorKind::UnsignedRightShift,
            OperatorToken::EqualsEquals => OperatorKind::Equality,
            OperatorToken::ExclamationEquals => OperatorKind::Inequality,
            OperatorToken::LessThan => OperatorKind::LessThan,
            OperatorToken::GreaterThan => OperatorKind::GreaterThan,
            OperatorToken::LessThanEquals => OperatorKind::LessThanOrEqual,
            OperatorToken::GreaterThanEquals => OperatorKind::GreaterThanOrEqual,
        }
    }

    pub fn metadata_name(self, is_checked: bool) -> &'static str {
        match (self, is_checked) {
            (OperatorKind::UnaryPlus, _) => "op_UnaryPlus",
            (OperatorKind::UnaryNegation, false) => "op_UnaryNegation",
            (OperatorKind::UnaryNegation, true) => "op_CheckedUnaryNegation",
            (OperatorKind::LogicalNot, _) => "op_LogicalNot",
            (OperatorKind::OnesComplement, _) => "op_OnesComplement",
            (OperatorKind::Increment, false) => "op_Increment",
            (OperatorKind::Increment, true) => "op_CheckedIncrement",
            (OperatorKind::Decrement, false) => "op_Decrement",
            (OperatorKind::Decrement, true) => "op_CheckedDecrement",
            (OperatorKind::True, _) => "op_True",
            (OperatorKind::False, _) => "op_False",
            (OperatorKind::Addition, false) => "op_Addition",
            (OperatorKind::Addition, true) => "op_CheckedAddition",
            (OperatorKind::Subtraction, false) => "op_Subtraction",
            (OperatorKind::Subtraction, true) => "op_CheckedSubtraction",
            (OperatorKind::Multiply, false) => "op_Multiply",
            (OperatorKind::Multiply, true) => "op_CheckedMultiply",
            (OperatorKind::Division, false) => "op_Division",
            (OperatorKind::Division, true) => "op_CheckedDivision",
            (OperatorKind::Modulus, _) => "op_Modulus",
            (OperatorKind::BitwiseAnd, _) => "op_BitwiseAnd",
            (OperatorKind::BitwiseOr, _) => "op_BitwiseOr",
            (OperatorKind::ExclusiveOr, _) => "op_ExclusiveOr",
            (OperatorKind::LeftShift, _) => "op_LeftShift",
            (OperatorKind::RightShift, _) => "op_RightShift",
            (OperatorKind::UnsignedRightShift, _) => "op_UnsignedRightShift",
            (OperatorKind::Equality, _) => "op_Equality",
            (OperatorKind::Inequality, _) => "op_Inequality",
            (OperatorKind::LessThan, _) => "op_LessThan",
            (OperatorKind::GreaterThan, _) => "op_GreaterThan",
            (OperatorKind::LessThanOrEqual, _) => "op_LessThanOrEqual",
            (OperatorKind::GreaterThanOrEqual, _) => "op_GreaterThanOrEqual",
            (OperatorKind::Implicit, _) => "op_Implicit",
            (OperatorKind::Explicit, false) => "op_Explicit",
            (OperatorKind::Explicit, true) => "op_CheckedExplicit",
        }
    }

    /// Required parameter count.
    pub fn arity(self) -> usize {
        if self.is_unary() || self.is_conversion() {
            1
        } else {
            2
        }
    }

    pub fn is_unary(self) -> bool {
        matches!(
            self,
            OperatorKind::UnaryPlus
                | OperatorKind::UnaryNegation
                | OperatorKind::LogicalNot
                | OperatorKind::OnesComplement
                | OperatorKind::Increment
                | OperatorKind::Decrement
                | OperatorKind::True
                | OperatorKind::False
        )
    }

    pub fn is_conversion(self) -> bool {
        matches!(self, OperatorKind::Implicit | OperatorKind::Explicit)
    }

    pub fn is_shift(self) -> bool {
        matches!(
            self,
            OperatorKind::LeftShift | OperatorKind::RightShift | OperatorKind::UnsignedRightShift
        )
    }

    pub fn is_equality(self) -> bool {
        matches!(self, OperatorKind::Equality | OperatorKind::Inequality)
    }

    /// Operators that have a `checked` form.
    pub fn supports_checked(self) -> bool {
        matches!(
            self,
            OperatorKind::UnaryNegation
                | OperatorKind::Increment
                | OperatorKind::Decrement
                | OperatorKind::Addition
                | OperatorKind::Subtraction
                | OperatorKind::Multiply
                | OperatorKind::Division
                | OperatorKind::Explicit
        )
    }

    /// Operators that must be declared in pairs.
    pub fn matching_operator(self) -> Option<OperatorKind> {
        match self {
            OperatorKind::True => Some(OperatorKind::False),
            OperatorKind::False => Some(OperatorKind::True),
            OperatorKind::Equality => Some(OperatorKind::Inequality),
            OperatorKind::Inequality => Some(OperatorKind::Equality),
            OperatorKind::LessThan => Some(OperatorKind::GreaterThan),
            OperatorKind::GreaterThan => Some(OperatorKind::LessThan),
            OperatorKind::LessThanOrEqual => Some(OperatorKind::GreaterThanOrEqual),
            OperatorKind::GreaterThanOrEqual => Some(OperatorKind::LessThanOrEqual),
            _ => None,
        }
    }

    pub fn display(self) -> &'static str {
        match self {
            OperatorKind::UnaryPlus | OperatorKind::Addition => "+",
            OperatorKind::UnaryNegation | OperatorKind::Subtraction => "-",
            OperatorKind::LogicalNot => "!",
            OperatorKind::OnesComplement => "~",
            OperatorKind::Increment => "++",
            OperatorKind::Decrement => "--",
            OperatorKind::True => "true",
            OperatorKind::False => "false",
            OperatorKind::Multiply => "*",
            OperatorKind::Division => "/",
            OperatorKind::Modulus => "%",
            OperatorKind::BitwiseAnd => "&",
            OperatorKind::BitwiseOr => "|",
            OperatorKind::ExclusiveOr => "^",
            OperatorKind::LeftShift => "<<",
            OperatorKind::RightShift => ">>",
            OperatorKind::UnsignedRightShift => ">>>",
            OperatorKind::Equality => "==",
            OperatorKind::Inequality => "!=",
            OperatorKind::LessThan => "<",
            OperatorKind::GreaterThan => ">",
            OperatorKind::LessThanOrEqual => "<=",
            OperatorKind::GreaterThanOrEqual => ">=",
            OperatorKind::Implicit => "implicit",
            OperatorKind::Explicit => "explicit",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MethodSyntaxKind {
    Ordinary,
    Operator { token: OperatorToken, is_checked: bool },
    Conversion { is_explicit: bool, is_checked: bool },
}

#[derive(Clone, Debug, PartialEq)]
pub struct MethodDeclarationSyntax {
    pub kind: MethodSyntaxKind,
    /// Identifier for ordinary methods; ignored for operators.
    pub name: Arc<str>,
    pub modifiers: DeclarationModifiers,
    pub accessibility: Option<Accessibility>,
    pub explicit_interface: Option<TypeSyntax>,
    pub type_parameters: Vec<TypeParameterSyntax>,
    pub constraint_clauses: Vec<ConstraintClauseSyntax>,
    pub return_type: TypeSyntax,
    pub ref_kind: RefKind,
    pub parameters: Vec<Arc<ParameterSyntax>>,
    pub attributes: Vec<AttributeSyntax>,
    pub has_body: bool,
    pub location: SourceLocation,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AccessorKind {
    Get,
    Set,
    Init,
}

impl AccessorKind {
    pub fn keyword(self) -> &'static str {
        match self {
            AccessorKind::Get => "get",
            AccessorKind::Set => "set",
            AccessorKind::Init => "init",
        }
    }

    pub fn is_setter(self) -> bool {
        matches!(self, AccessorKind::Set | AccessorKind::Init)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AccessorSyntax {
    pub kind: AccessorKind,
    pub accessibility: Option<Accessibility>,
    pub attributes: Vec<AttributeSyntax>,
    pub has_body: bool,
    pub location: SourceLocation,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PropertyDeclarationSyntax {
    /// `this` for indexers.
    pub name: Arc<str>,
    pub is_indexer: bool,
    pub modifiers: DeclarationModifiers,
    pub accessibility: Option<Accessibility>,
    pub explicit_interface: Option<TypeSyntax>,
    pub ty: TypeSyntax,
    pub ref_kind: RefKind,
    pub parameters: Vec<Arc<ParameterSyntax>>,
    pub accessors: Vec<AccessorSyntax>,
    pub attributes: Vec<AttributeSyntax>,
    pub location: SourceLocation,
}

impl PropertyDeclarationSyntax {
    pub fn accessor(&self, kind: AccessorKind) -> Option<&AccessorSyntax> {
        self.accessors.iter().find(|accessor| accessor.kind == kind)
    }

    pub fn getter(&self) -> Option<&AccessorSyntax> {
        self.accessor(AccessorKind::Get)
    }

    pub fn setter(&self) -> Option<&AccessorSyntax> {
        self.accessors.iter().find(|accessor| accessor.kind.is_setter())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum MemberDeclarationSyntax {
    Method(Arc<MethodDeclarationSyntax>),
    Property(Arc<PropertyDeclarationSyntax>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct TypeDeclarationSyntax {
    pub kind: TypeKind,
    pub name: Arc<str>,
    pub namespace: Option<Arc<str>>,
    pub modifiers: DeclarationModifiers,
    pub accessibility: Option<Accessibility>,
    pub type_parameters: Vec<TypeParameterSyntax>,
    pub base_list: Vec<TypeSyntax>,
    pub constraint_clauses: Vec<ConstraintClauseSyntax>,
    pub members: Vec<MemberDeclarationSyntax>,
    pub attributes: Vec<AttributeSyntax>,
    /// `#nullable` state at the declaration, when it differs from the
    /// project setting. `Some(true)` enables annotations.
    pub nullable_annotations: Option<bool>,
    pub location: SourceLocation,
}

impl TypeDeclarationSyntax {
    pub fn is_partial(&self) -> bool {
        self.modifiers.contains(DeclarationModifiers::PARTIAL)
    }
}
