//! Symbol records.
//!
//! A `Symbol` holds only the cheap facts known at declaration time: name,
//! container, locations, accessibility and modifiers. Everything that needs
//! binding (types, attributes, override results) is a lazily computed facet
//! kept outside the arena, keyed by `SymbolId`.

use crate::constant::ConstantValue;
use crate::syntax::{
    MethodDeclarationSyntax, OperatorKind, ParameterSyntax, PropertyDeclarationSyntax,
    TypeDeclarationSyntax, TypeSyntax,
};
use crate::types::{CustomModifier, RefKind, ScopedKind, TypeId, TypeWithAnnotations, VarianceKind};
use bitflags::bitflags;
use csz_common::{Atom, SourceLocation};
use smallvec::SmallVec;
use std::sync::Arc;

/// Index of a symbol in its arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(pub u32);

impl SymbolId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of a referenced assembly. Id 0 is the compilation being checked.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssemblyId(pub u32);

impl AssemblyId {
    pub const SOURCE: AssemblyId = AssemblyId(0);
}

#[derive(Clone, Debug)]
pub struct AssemblyInfo {
    pub name: Arc<str>,
    /// Whether members of this assembly were compiled with the updated
    /// ref-safety (`scoped`) rules.
    pub uses_updated_ref_safety_rules: bool,
    /// Assemblies granted access to this assembly's internal members.
    pub internals_visible_to: Vec<Arc<str>>,
}

impl AssemblyInfo {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        AssemblyInfo {
            name: name.into(),
            uses_updated_ref_safety_rules: true,
            internals_visible_to: Vec::new(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SymbolOrigin {
    Source,
    Metadata(AssemblyId),
}

impl SymbolOrigin {
    pub fn assembly(self) -> AssemblyId {
        match self {
            SymbolOrigin::Source => AssemblyId::SOURCE,
            SymbolOrigin::Metadata(assembly) => assembly,
        }
    }
}

/// Declared accessibility, ordered from least to most accessible.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Accessibility {
    #[default]
    NotApplicable,
    Private,
    ProtectedAndInternal,
    Protected,
    Internal,
    ProtectedOrInternal,
    Public,
}

impl Accessibility {
    pub fn display(self) -> &'static str {
        match self {
            Accessibility::NotApplicable => "",
            Accessibility::Private => "private",
            Accessibility::ProtectedAndInternal => "private protected",
            Accessibility::Protected => "protected",
            Accessibility::Internal => "internal",
            Accessibility::ProtectedOrInternal => "protected internal",
            Accessibility::Public => "public",
        }
    }

    pub fn includes_protected(self) -> bool {
        matches!(
            self,
            Accessibility::Protected
                | Accessibility::ProtectedOrInternal
                | Accessibility::ProtectedAndInternal
        )
    }

    /// Whether `self` is strictly more restrictive than `other`.
    ///
    /// `protected` and `internal` are unordered with respect to each other.
    pub fn is_more_restrictive_than(self, other: Accessibility) -> bool {
        match (self, other) {
            (Accessibility::Protected, Accessibility::Internal)
            | (Accessibility::Internal, Accessibility::Protected) => false,
            _ => self < other,
        }
    }
}

bitflags! {
    /// Modifiers as written on a declaration.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct DeclarationModifiers: u32 {
        const STATIC = 1 << 0;
        const VIRTUAL = 1 << 1;
        const ABSTRACT = 1 << 2;
        const OVERRIDE = 1 << 3;
        const SEALED = 1 << 4;
        const NEW = 1 << 5;
        const EXTERN = 1 << 6;
        const PARTIAL = 1 << 7;
        const READONLY = 1 << 8;
        const REQUIRED = 1 << 9;
        const UNSAFE = 1 << 10;
        const ASYNC = 1 << 11;
        const REF = 1 << 12;
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    Enum,
    Delegate,
}

impl TypeKind {
    pub fn display(self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Struct => "struct",
            TypeKind::Interface => "interface",
            TypeKind::Enum => "enum",
            TypeKind::Delegate => "delegate",
        }
    }

    pub fn is_value_type(self) -> bool {
        matches!(self, TypeKind::Struct | TypeKind::Enum)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MethodKind {
    Ordinary,
    PropertyGet,
    PropertySet,
    UserDefinedOperator,
    Conversion,
}

impl MethodKind {
    pub fn is_accessor(self) -> bool {
        matches!(self, MethodKind::PropertyGet | MethodKind::PropertySet)
    }

    pub fn is_operator(self) -> bool {
        matches!(self, MethodKind::UserDefinedOperator | MethodKind::Conversion)
    }
}

/// Data carried by an `[Obsolete]` attribute.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ObsoleteData {
    pub message: Option<Arc<str>>,
    pub is_error: bool,
}

// =============================================================================
// Symbol
// =============================================================================

#[derive(Clone, Debug)]
pub struct Symbol {
    pub name: Atom,
    pub containing: Option<SymbolId>,
    pub locations: SmallVec<[SourceLocation; 1]>,
    pub origin: SymbolOrigin,
    pub accessibility: Accessibility,
    pub modifiers: DeclarationModifiers,
    pub data: SymbolData,
}

/// Closed set of symbol categories.
#[derive(Clone, Debug)]
pub enum SymbolData {
    Type(TypeSymbol),
    Method(MethodSymbol),
    Property(PropertySymbol),
    Parameter(ParameterSymbol),
    TypeParameter(TypeParameterSymbol),
}

impl Symbol {
    pub fn location(&self) -> SourceLocation {
        self.locations
            .first()
            .cloned()
            .unwrap_or_else(SourceLocation::none)
    }

    pub fn is_source(&self) -> bool {
        self.origin == SymbolOrigin::Source
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.contains(DeclarationModifiers::STATIC)
    }

    pub fn is_virtual(&self) -> bool {
        self.modifiers.contains(DeclarationModifiers::VIRTUAL)
    }

    pub fn is_abstract(&self) -> bool {
        self.modifiers.contains(DeclarationModifiers::ABSTRACT)
    }

    pub fn is_override(&self) -> bool {
        self.modifiers.contains(DeclarationModifiers::OVERRIDE)
    }

    pub fn is_sealed(&self) -> bool {
        self.modifiers.contains(DeclarationModifiers::SEALED)
    }

    pub fn is_new(&self) -> bool {
        self.modifiers.contains(DeclarationModifiers::NEW)
    }

    pub fn is_extern(&self) -> bool {
        self.modifiers.contains(DeclarationModifiers::EXTERN)
    }

    /// Virtual, abstract or override: participates in virtual dispatch.
    pub fn is_overridable_kind(&self) -> bool {
        self.modifiers.intersects(
            DeclarationModifiers::VIRTUAL
                | DeclarationModifiers::ABSTRACT
                | DeclarationModifiers::OVERRIDE,
        )
    }

    pub fn kind_name(&self) -> &'static str {
        match &self.data {
            SymbolData::Type(ty) => ty.kind.display(),
            SymbolData::Method(method) if method.kind.is_operator() => "operator",
            SymbolData::Method(method) if method.kind.is_accessor() => "accessor",
            SymbolData::Method(_) => "method",
            SymbolData::Property(property) if property.is_indexer => "indexer",
            SymbolData::Property(_) => "property",
            SymbolData::Parameter(_) => "parameter",
            SymbolData::TypeParameter(_) => "type parameter",
        }
    }

    pub fn as_type(&self) -> Option<&TypeSymbol> {
        match &self.data {
            SymbolData::Type(ty) => Some(ty),
            _ => None,
        }
    }

    pub fn as_method(&self) -> Option<&MethodSymbol> {
        match &self.data {
            SymbolData::Method(method) => Some(method),
            _ => None,
        }
    }

    pub fn as_property(&self) -> Option<&PropertySymbol> {
        match &self.data {
            SymbolData::Property(property) => Some(property),
            _ => None,
        }
    }

    pub fn as_parameter(&self) -> Option<&ParameterSymbol> {
        match &self.data {
            SymbolData::Parameter(parameter) => Some(parameter),
            _ => None,
        }
    }

    pub fn as_type_parameter(&self) -> Option<&TypeParameterSymbol> {
        match &self.data {
            SymbolData::TypeParameter(type_parameter) => Some(type_parameter),
            _ => None,
        }
    }

    pub fn is_method(&self) -> bool {
        matches!(self.data, SymbolData::Method(_))
    }

    pub fn is_property(&self) -> bool {
        matches!(self.data, SymbolData::Property(_))
    }

    /// Methods and properties: the members that override, hide and implement.
    pub fn is_member(&self) -> bool {
        self.is_method() || self.is_property()
    }
}

// =============================================================================
// Types
// =============================================================================

#[derive(Clone, Debug)]
pub struct TypeSymbol {
    pub kind: TypeKind,
    pub namespace: Option<Arc<str>>,
    pub type_parameters: Vec<SymbolId>,
    /// `Named { self, [T1, T2, ..] }`: the type as seen from inside itself.
    pub declared_type: TypeId,
    pub members: Vec<SymbolId>,
    pub source: TypeSource,
}

#[derive(Clone, Debug)]
pub enum TypeSource {
    /// One declaration per partial part, in declaration order.
    Syntax(Vec<Arc<TypeDeclarationSyntax>>),
    Metadata(MetadataTypeInfo),
}

#[derive(Clone, Debug, Default)]
pub struct MetadataTypeInfo {
    pub base: Option<TypeId>,
    pub interfaces: Vec<TypeId>,
    pub obsolete: Option<ObsoleteData>,
}

impl TypeSymbol {
    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    pub fn declarations(&self) -> &[Arc<TypeDeclarationSyntax>] {
        match &self.source {
            TypeSource::Syntax(parts) => parts,
            TypeSource::Metadata(_) => &[],
        }
    }

    pub fn metadata(&self) -> Option<&MetadataTypeInfo> {
        match &self.source {
            TypeSource::Metadata(info) => Some(info),
            TypeSource::Syntax(_) => None,
        }
    }
}

// =============================================================================
// Methods
// =============================================================================

#[derive(Clone, Debug)]
pub struct MethodSymbol {
    pub kind: MethodKind,
    pub type_parameters: Vec<SymbolId>,
    pub parameters: Vec<SymbolId>,
    /// Owning property for accessors.
    pub associated_property: Option<SymbolId>,
    pub operator: Option<OperatorKind>,
    pub source: MethodSource,
}

#[derive(Clone, Debug)]
pub enum MethodSource {
    Syntax(Arc<MethodDeclarationSyntax>),
    /// Accessor `index` of a property declaration.
    Accessor {
        property: Arc<PropertyDeclarationSyntax>,
        index: usize,
    },
    Metadata(MetadataMethodInfo),
}

#[derive(Clone, Debug, Default)]
pub struct MetadataMethodInfo {
    pub return_type: TypeWithAnnotations,
    pub ref_kind: RefKind,
    pub ref_custom_modifiers: Vec<CustomModifier>,
    pub is_metadata_virtual: bool,
    pub is_metadata_final: bool,
    /// Signature the language cannot call through virtual dispatch.
    pub must_call_directly: bool,
    pub obsolete: Option<ObsoleteData>,
}

impl MethodSymbol {
    pub fn syntax(&self) -> Option<&Arc<MethodDeclarationSyntax>> {
        match &self.source {
            MethodSource::Syntax(syntax) => Some(syntax),
            _ => None,
        }
    }

    pub fn metadata(&self) -> Option<&MetadataMethodInfo> {
        match &self.source {
            MethodSource::Metadata(info) => Some(info),
            _ => None,
        }
    }

    pub fn explicit_interface_syntax(&self) -> Option<&TypeSyntax> {
        match &self.source {
            MethodSource::Syntax(syntax) => syntax.explicit_interface.as_ref(),
            MethodSource::Accessor { property, .. } => property.explicit_interface.as_ref(),
            MethodSource::Metadata(_) => None,
        }
    }

    pub fn is_explicit_interface_implementation(&self) -> bool {
        self.explicit_interface_syntax().is_some()
    }
}

// =============================================================================
// Properties
// =============================================================================

#[derive(Clone, Debug)]
pub struct PropertySymbol {
    pub is_indexer: bool,
    pub parameters: Vec<SymbolId>,
    pub getter: Option<SymbolId>,
    pub setter: Option<SymbolId>,
    pub source: PropertySource,
}

#[derive(Clone, Debug)]
pub enum PropertySource {
    Syntax(Arc<PropertyDeclarationSyntax>),
    Metadata(MetadataPropertyInfo),
}

#[derive(Clone, Debug, Default)]
pub struct MetadataPropertyInfo {
    pub ty: TypeWithAnnotations,
    pub ref_kind: RefKind,
    pub must_call_directly: bool,
    pub obsolete: Option<ObsoleteData>,
}

impl PropertySymbol {
    pub fn syntax(&self) -> Option<&Arc<PropertyDeclarationSyntax>> {
        match &self.source {
            PropertySource::Syntax(syntax) => Some(syntax),
            PropertySource::Metadata(_) => None,
        }
    }

    pub fn metadata(&self) -> Option<&MetadataPropertyInfo> {
        match &self.source {
            PropertySource::Metadata(info) => Some(info),
            PropertySource::Syntax(_) => None,
        }
    }

    pub fn explicit_interface_syntax(&self) -> Option<&TypeSyntax> {
        self.syntax().and_then(|syntax| syntax.explicit_interface.as_ref())
    }

    pub fn is_explicit_interface_implementation(&self) -> bool {
        self.explicit_interface_syntax().is_some()
    }
}

// =============================================================================
// Parameters
// =============================================================================

#[derive(Clone, Debug)]
pub struct ParameterSymbol {
    pub ordinal: u32,
    pub ref_kind: RefKind,
    pub scoped: ScopedKind,
    pub is_params: bool,
    pub source: ParameterSource,
}

#[derive(Clone, Debug)]
pub enum ParameterSource {
    Syntax(Arc<ParameterSyntax>),
    /// Indexer accessor parameter mirroring the indexer's own parameter.
    AccessorCopy { original: SymbolId },
    /// The implicit `value` parameter of a setter.
    AccessorValue { property: SymbolId },
    Metadata(MetadataParameterInfo),
}

#[derive(Clone, Debug, Default)]
pub struct MetadataParameterInfo {
    pub ty: TypeWithAnnotations,
    pub default_value: Option<ConstantValue>,
}

impl ParameterSymbol {
    pub fn syntax(&self) -> Option<&Arc<ParameterSyntax>> {
        match &self.source {
            ParameterSource::Syntax(syntax) => Some(syntax),
            _ => None,
        }
    }
}

// =============================================================================
// Type parameters
// =============================================================================

#[derive(Clone, Debug)]
pub struct TypeParameterSymbol {
    pub ordinal: u32,
    pub variance: VarianceKind,
    /// Declaring type or method.
    pub owner: SymbolId,
    pub is_method_type_parameter: bool,
}

#[cfg(test)]
#[path = "tests/symbol_tests.rs"]
mod tests;
