//! Type representation.
//!
//! Types are interned into `TypeId` handles by [`crate::TypeInterner`].
//! Nullable reference annotations and custom modifiers are not part of a
//! type's identity at the top level; they ride along in
//! [`TypeWithAnnotations`], which is what signatures store.

use crate::symbol::SymbolId;
use csz_common::Atom;

/// Interned type handle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

impl TypeId {
    pub const ERROR: TypeId = TypeId(0);
    pub const VOID: TypeId = TypeId(1);
    pub const OBJECT: TypeId = TypeId(2);
    pub const STRING: TypeId = TypeId(3);
    pub const BOOL: TypeId = TypeId(4);
    pub const CHAR: TypeId = TypeId(5);
    pub const SBYTE: TypeId = TypeId(6);
    pub const BYTE: TypeId = TypeId(7);
    pub const SHORT: TypeId = TypeId(8);
    pub const USHORT: TypeId = TypeId(9);
    pub const INT: TypeId = TypeId(10);
    pub const UINT: TypeId = TypeId(11);
    pub const LONG: TypeId = TypeId(12);
    pub const ULONG: TypeId = TypeId(13);
    pub const NINT: TypeId = TypeId(14);
    pub const NUINT: TypeId = TypeId(15);
    pub const FLOAT: TypeId = TypeId(16);
    pub const DOUBLE: TypeId = TypeId(17);
    pub const DECIMAL: TypeId = TypeId(18);
    pub const DYNAMIC: TypeId = TypeId(19);
    pub const DATE_TIME: TypeId = TypeId(20);

    /// First id handed out for non-intrinsic types.
    pub const FIRST_USER: u32 = 21;

    #[inline]
    pub fn is_error(self) -> bool {
        self == TypeId::ERROR
    }

    #[inline]
    pub fn is_intrinsic(self) -> bool {
        self.0 < Self::FIRST_USER
    }
}

/// Built-in types with keyword syntax (plus the error type).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum IntrinsicKind {
    Error,
    Void,
    Object,
    String,
    Bool,
    Char,
    SByte,
    Byte,
    Short,
    UShort,
    Int,
    UInt,
    Long,
    ULong,
    NInt,
    NUInt,
    Float,
    Double,
    Decimal,
    Dynamic,
    DateTime,
}

impl IntrinsicKind {
    /// Registration order; index equals the fixed `TypeId`.
    pub const ALL: [IntrinsicKind; 21] = [
        IntrinsicKind::Error,
        IntrinsicKind::Void,
        IntrinsicKind::Object,
        IntrinsicKind::String,
        IntrinsicKind::Bool,
        IntrinsicKind::Char,
        IntrinsicKind::SByte,
        IntrinsicKind::Byte,
        IntrinsicKind::Short,
        IntrinsicKind::UShort,
        IntrinsicKind::Int,
        IntrinsicKind::UInt,
        IntrinsicKind::Long,
        IntrinsicKind::ULong,
        IntrinsicKind::NInt,
        IntrinsicKind::NUInt,
        IntrinsicKind::Float,
        IntrinsicKind::Double,
        IntrinsicKind::Decimal,
        IntrinsicKind::Dynamic,
        IntrinsicKind::DateTime,
    ];

    pub fn type_id(self) -> TypeId {
        TypeId(self as u32)
    }

    pub fn keyword(self) -> &'static str {
        match self {
            IntrinsicKind::Error => "?",
            IntrinsicKind::Void => "void",
            IntrinsicKind::Object => "object",
            IntrinsicKind::String => "string",
            IntrinsicKind::Bool => "bool",
            IntrinsicKind::Char => "char",
            IntrinsicKind::SByte => "sbyte",
            IntrinsicKind::Byte => "byte",
            IntrinsicKind::Short => "short",
            IntrinsicKind::UShort => "ushort",
            IntrinsicKind::Int => "int",
            IntrinsicKind::UInt => "uint",
            IntrinsicKind::Long => "long",
            IntrinsicKind::ULong => "ulong",
            IntrinsicKind::NInt => "nint",
            IntrinsicKind::NUInt => "nuint",
            IntrinsicKind::Float => "float",
            IntrinsicKind::Double => "double",
            IntrinsicKind::Decimal => "decimal",
            IntrinsicKind::Dynamic => "dynamic",
            IntrinsicKind::DateTime => "System.DateTime",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<IntrinsicKind> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| *kind != IntrinsicKind::Error && kind.keyword() == keyword)
    }

    pub fn is_value_type(self) -> bool {
        !matches!(
            self,
            IntrinsicKind::Error
                | IntrinsicKind::Void
                | IntrinsicKind::Object
                | IntrinsicKind::String
                | IntrinsicKind::Dynamic
        )
    }

    pub fn is_integral(self) -> bool {
        matches!(
            self,
            IntrinsicKind::SByte
                | IntrinsicKind::Byte
                | IntrinsicKind::Short
                | IntrinsicKind::UShort
                | IntrinsicKind::Int
                | IntrinsicKind::UInt
                | IntrinsicKind::Long
                | IntrinsicKind::ULong
                | IntrinsicKind::NInt
                | IntrinsicKind::NUInt
                | IntrinsicKind::Char
        )
    }

    pub fn is_numeric(self) -> bool {
        self.is_integral()
            || matches!(
                self,
                IntrinsicKind::Float | IntrinsicKind::Double | IntrinsicKind::Decimal
            )
    }
}

/// Nullable reference annotation carried by a type use.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum NullableAnnotation {
    /// Declared outside a nullable annotation context.
    #[default]
    Oblivious,
    NotAnnotated,
    Annotated,
}

impl NullableAnnotation {
    pub fn is_oblivious(self) -> bool {
        self == NullableAnnotation::Oblivious
    }

    pub fn is_annotated(self) -> bool {
        self == NullableAnnotation::Annotated
    }
}

/// A `modopt`/`modreq` attached to a type in a signature.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CustomModifier {
    pub is_optional: bool,
    pub modifier: TypeId,
}

impl CustomModifier {
    pub fn required(modifier: TypeId) -> Self {
        CustomModifier {
            is_optional: false,
            modifier,
        }
    }

    pub fn optional(modifier: TypeId) -> Self {
        CustomModifier {
            is_optional: true,
            modifier,
        }
    }
}

/// A type use: the type plus its nullable annotation and custom modifiers.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeWithAnnotations {
    pub ty: TypeId,
    pub annotation: NullableAnnotation,
    pub custom_modifiers: Vec<CustomModifier>,
}

impl TypeWithAnnotations {
    pub fn new(ty: TypeId, annotation: NullableAnnotation) -> Self {
        TypeWithAnnotations {
            ty,
            annotation,
            custom_modifiers: Vec::new(),
        }
    }

    pub fn oblivious(ty: TypeId) -> Self {
        Self::new(ty, NullableAnnotation::Oblivious)
    }

    pub fn not_annotated(ty: TypeId) -> Self {
        Self::new(ty, NullableAnnotation::NotAnnotated)
    }

    pub fn annotated(ty: TypeId) -> Self {
        Self::new(ty, NullableAnnotation::Annotated)
    }

    pub fn error() -> Self {
        Self::oblivious(TypeId::ERROR)
    }

    pub fn with_annotation(&self, annotation: NullableAnnotation) -> Self {
        TypeWithAnnotations {
            ty: self.ty,
            annotation,
            custom_modifiers: self.custom_modifiers.clone(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: Vec<CustomModifier>) -> Self {
        self.custom_modifiers = modifiers;
        self
    }
}

impl Default for TypeWithAnnotations {
    fn default() -> Self {
        TypeWithAnnotations::error()
    }
}

/// Structural description of an interned type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeData {
    Intrinsic(IntrinsicKind),
    /// A class, struct, interface, enum or delegate, possibly constructed.
    Named {
        symbol: SymbolId,
        type_args: Vec<TypeWithAnnotations>,
    },
    TypeParameter(SymbolId),
    /// `System.Nullable<T>` over a value type.
    Nullable(TypeId),
    Array {
        element: Box<TypeWithAnnotations>,
        rank: u8,
    },
    Tuple {
        elements: Vec<TypeWithAnnotations>,
        names: Option<Vec<Option<Atom>>>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum RefKind {
    #[default]
    None,
    Ref,
    Out,
    In,
    RefReadOnly,
}

impl RefKind {
    pub fn is_by_ref(self) -> bool {
        self != RefKind::None
    }

    pub fn keyword(self) -> &'static str {
        match self {
            RefKind::None => "",
            RefKind::Ref => "ref",
            RefKind::Out => "out",
            RefKind::In => "in",
            RefKind::RefReadOnly => "ref readonly",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum ScopedKind {
    #[default]
    None,
    ScopedRef,
    ScopedValue,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum VarianceKind {
    #[default]
    None,
    Out,
    In,
}
