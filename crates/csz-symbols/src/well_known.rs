//! Well-known attribute identities.
//!
//! An attribute class is well-known when its namespace and metadata name
//! match one of the entries below. Classification is a pure function of the
//! resolved class identity; there is no global registry.

use bitflags::bitflags;
use csz_common::diagnostic_codes;

bitflags! {
    /// Declarations an attribute may be applied to.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct AttributeTargets: u32 {
        const ASSEMBLY = 1 << 0;
        const CLASS = 1 << 1;
        const STRUCT = 1 << 2;
        const ENUM = 1 << 3;
        const INTERFACE = 1 << 4;
        const DELEGATE = 1 << 5;
        const METHOD = 1 << 6;
        const PROPERTY = 1 << 7;
        const FIELD = 1 << 8;
        const PARAMETER = 1 << 9;
        const RETURN_VALUE = 1 << 10;
        const TYPE_PARAMETER = 1 << 11;

        const TYPES = Self::CLASS.bits()
            | Self::STRUCT.bits()
            | Self::ENUM.bits()
            | Self::INTERFACE.bits()
            | Self::DELEGATE.bits();
        const NULLABILITY = Self::PARAMETER.bits()
            | Self::PROPERTY.bits()
            | Self::FIELD.bits()
            | Self::RETURN_VALUE.bits();
    }
}

macro_rules! well_known_attributes {
    ($( $kind:ident => ($namespace:literal, $name:literal, $targets:expr) ),* $(,)?) => {
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
        pub enum WellKnownAttributeKind {
            $( $kind, )*
        }

        impl WellKnownAttributeKind {
            pub const ALL: &'static [WellKnownAttributeKind] = &[
                $( WellKnownAttributeKind::$kind, )*
            ];

            pub fn namespace(self) -> &'static str {
                match self {
                    $( WellKnownAttributeKind::$kind => $namespace, )*
                }
            }

            /// Metadata name, including the `Attribute` suffix.
            pub fn metadata_name(self) -> &'static str {
                match self {
                    $( WellKnownAttributeKind::$kind => $name, )*
                }
            }

            pub fn valid_targets(self) -> AttributeTargets {
                match self {
                    $( WellKnownAttributeKind::$kind => $targets, )*
                }
            }

            /// Identify an attribute class by namespace and metadata name.
            pub fn classify(namespace: &str, name: &str) -> Option<WellKnownAttributeKind> {
                match (namespace, name) {
                    $( ($namespace, $name) => Some(WellKnownAttributeKind::$kind), )*
                    _ => None,
                }
            }
        }
    };
}

const SYSTEM: &str = "System";
const COMPILER_SERVICES: &str = "System.Runtime.CompilerServices";
const INTEROP_SERVICES: &str = "System.Runtime.InteropServices";
const CODE_ANALYSIS: &str = "System.Diagnostics.CodeAnalysis";

well_known_attributes! {
    // Early: decodable from identity plus primitive arguments.
    Optional => ("System.Runtime.InteropServices", "OptionalAttribute", AttributeTargets::PARAMETER),
    DefaultParameterValue => ("System.Runtime.InteropServices", "DefaultParameterValueAttribute", AttributeTargets::PARAMETER),
    DecimalConstant => ("System.Runtime.CompilerServices", "DecimalConstantAttribute", AttributeTargets::PARAMETER.union(AttributeTargets::FIELD)),
    DateTimeConstant => ("System.Runtime.CompilerServices", "DateTimeConstantAttribute", AttributeTargets::PARAMETER.union(AttributeTargets::FIELD)),
    CallerLineNumber => ("System.Runtime.CompilerServices", "CallerLineNumberAttribute", AttributeTargets::PARAMETER),
    CallerFilePath => ("System.Runtime.CompilerServices", "CallerFilePathAttribute", AttributeTargets::PARAMETER),
    CallerMemberName => ("System.Runtime.CompilerServices", "CallerMemberNameAttribute", AttributeTargets::PARAMETER),
    CallerArgumentExpression => ("System.Runtime.CompilerServices", "CallerArgumentExpressionAttribute", AttributeTargets::PARAMETER),
    UnscopedRef => ("System.Diagnostics.CodeAnalysis", "UnscopedRefAttribute", AttributeTargets::METHOD.union(AttributeTargets::PROPERTY).union(AttributeTargets::PARAMETER)),
    InterpolatedStringHandlerArgument => ("System.Runtime.CompilerServices", "InterpolatedStringHandlerArgumentAttribute", AttributeTargets::PARAMETER),
    Obsolete => ("System", "ObsoleteAttribute", AttributeTargets::all()),
    IndexerName => ("System.Runtime.CompilerServices", "IndexerNameAttribute", AttributeTargets::PROPERTY),

    // Full: decoded after complete argument binding.
    AllowNull => ("System.Diagnostics.CodeAnalysis", "AllowNullAttribute", AttributeTargets::NULLABILITY),
    DisallowNull => ("System.Diagnostics.CodeAnalysis", "DisallowNullAttribute", AttributeTargets::NULLABILITY),
    MaybeNull => ("System.Diagnostics.CodeAnalysis", "MaybeNullAttribute", AttributeTargets::NULLABILITY),
    NotNull => ("System.Diagnostics.CodeAnalysis", "NotNullAttribute", AttributeTargets::NULLABILITY),
    MaybeNullWhen => ("System.Diagnostics.CodeAnalysis", "MaybeNullWhenAttribute", AttributeTargets::PARAMETER),
    NotNullWhen => ("System.Diagnostics.CodeAnalysis", "NotNullWhenAttribute", AttributeTargets::PARAMETER),
    NotNullIfNotNull => ("System.Diagnostics.CodeAnalysis", "NotNullIfNotNullAttribute", AttributeTargets::NULLABILITY),
    DoesNotReturn => ("System.Diagnostics.CodeAnalysis", "DoesNotReturnAttribute", AttributeTargets::METHOD),
    DoesNotReturnIf => ("System.Diagnostics.CodeAnalysis", "DoesNotReturnIfAttribute", AttributeTargets::PARAMETER),
    MemberNotNull => ("System.Diagnostics.CodeAnalysis", "MemberNotNullAttribute", AttributeTargets::METHOD.union(AttributeTargets::PROPERTY)),
    MemberNotNullWhen => ("System.Diagnostics.CodeAnalysis", "MemberNotNullWhenAttribute", AttributeTargets::METHOD.union(AttributeTargets::PROPERTY)),
    ExcludeFromCodeCoverage => ("System.Diagnostics.CodeAnalysis", "ExcludeFromCodeCoverageAttribute", AttributeTargets::TYPES.union(AttributeTargets::METHOD).union(AttributeTargets::PROPERTY)),
    EnumeratorCancellation => ("System.Runtime.CompilerServices", "EnumeratorCancellationAttribute", AttributeTargets::PARAMETER),
    IDispatchConstant => ("System.Runtime.CompilerServices", "IDispatchConstantAttribute", AttributeTargets::PARAMETER.union(AttributeTargets::FIELD)),
    IUnknownConstant => ("System.Runtime.CompilerServices", "IUnknownConstantAttribute", AttributeTargets::PARAMETER.union(AttributeTargets::FIELD)),
    SpecialName => ("System.Runtime.CompilerServices", "SpecialNameAttribute", AttributeTargets::TYPES.union(AttributeTargets::METHOD).union(AttributeTargets::PROPERTY)),
    MarshalAs => ("System.Runtime.InteropServices", "MarshalAsAttribute", AttributeTargets::PARAMETER.union(AttributeTargets::FIELD).union(AttributeTargets::RETURN_VALUE)),
    In => ("System.Runtime.InteropServices", "InAttribute", AttributeTargets::PARAMETER),
    Out => ("System.Runtime.InteropServices", "OutAttribute", AttributeTargets::PARAMETER),
    ParamArray => ("System", "ParamArrayAttribute", AttributeTargets::PARAMETER),
    DefaultMember => ("System.Reflection", "DefaultMemberAttribute", AttributeTargets::TYPES),
    Serializable => ("System", "SerializableAttribute", AttributeTargets::TYPES),
    ComImport => ("System.Runtime.InteropServices", "ComImportAttribute", AttributeTargets::CLASS.union(AttributeTargets::INTERFACE)),

    // Reserved: synthesized by the compiler, rejected when written.
    Dynamic => ("System.Runtime.CompilerServices", "DynamicAttribute", AttributeTargets::all()),
    TupleElementNames => ("System.Runtime.CompilerServices", "TupleElementNamesAttribute", AttributeTargets::all()),
    Nullable => ("System.Runtime.CompilerServices", "NullableAttribute", AttributeTargets::all()),
    NullableContext => ("System.Runtime.CompilerServices", "NullableContextAttribute", AttributeTargets::all()),
    NullablePublicOnly => ("System.Runtime.CompilerServices", "NullablePublicOnlyAttribute", AttributeTargets::all()),
    NativeInteger => ("System.Runtime.CompilerServices", "NativeIntegerAttribute", AttributeTargets::all()),
    IsReadOnly => ("System.Runtime.CompilerServices", "IsReadOnlyAttribute", AttributeTargets::all()),
    IsUnmanaged => ("System.Runtime.CompilerServices", "IsUnmanagedAttribute", AttributeTargets::all()),
    IsByRefLike => ("System.Runtime.CompilerServices", "IsByRefLikeAttribute", AttributeTargets::all()),
    ScopedRef => ("System.Runtime.CompilerServices", "ScopedRefAttribute", AttributeTargets::all()),
    RefSafetyRules => ("System.Runtime.CompilerServices", "RefSafetyRulesAttribute", AttributeTargets::all()),
    RequiresLocation => ("System.Runtime.CompilerServices", "RequiresLocationAttribute", AttributeTargets::all()),
    ParamCollection => ("System.Runtime.CompilerServices", "ParamCollectionAttribute", AttributeTargets::all()),
    Extension => ("System.Runtime.CompilerServices", "ExtensionAttribute", AttributeTargets::all()),
}

impl WellKnownAttributeKind {
    /// Attributes whose payload is extracted during early decoding.
    pub fn is_early(self) -> bool {
        matches!(
            self,
            WellKnownAttributeKind::Optional
                | WellKnownAttributeKind::DefaultParameterValue
                | WellKnownAttributeKind::DecimalConstant
                | WellKnownAttributeKind::DateTimeConstant
                | WellKnownAttributeKind::CallerLineNumber
                | WellKnownAttributeKind::CallerFilePath
                | WellKnownAttributeKind::CallerMemberName
                | WellKnownAttributeKind::CallerArgumentExpression
                | WellKnownAttributeKind::UnscopedRef
                | WellKnownAttributeKind::InterpolatedStringHandlerArgument
                | WellKnownAttributeKind::Obsolete
                | WellKnownAttributeKind::IndexerName
        )
    }

    /// Diagnostic reported when a reserved attribute is written explicitly.
    pub fn reserved_diagnostic(self) -> Option<u32> {
        use WellKnownAttributeKind as K;
        let code = match self {
            K::Dynamic => diagnostic_codes::EXPLICIT_DYNAMIC_ATTRIBUTE,
            K::TupleElementNames => diagnostic_codes::EXPLICIT_TUPLE_ELEMENT_NAMES_ATTRIBUTE,
            K::Nullable => diagnostic_codes::EXPLICIT_NULLABLE_ATTRIBUTE,
            K::Extension => diagnostic_codes::EXPLICIT_EXTENSION_ATTRIBUTE,
            K::ScopedRef => diagnostic_codes::EXPLICIT_SCOPED_REF_ATTRIBUTE,
            K::NullableContext
            | K::NullablePublicOnly
            | K::NativeInteger
            | K::IsReadOnly
            | K::IsUnmanaged
            | K::IsByRefLike
            | K::RefSafetyRules
            | K::RequiresLocation
            | K::ParamCollection => diagnostic_codes::EXPLICIT_RESERVED_ATTRIBUTE,
            _ => return None,
        };
        Some(code)
    }

    pub fn is_reserved(self) -> bool {
        self.reserved_diagnostic().is_some()
    }

    pub fn is_caller_info(self) -> bool {
        matches!(
            self,
            WellKnownAttributeKind::CallerLineNumber
                | WellKnownAttributeKind::CallerFilePath
                | WellKnownAttributeKind::CallerMemberName
                | WellKnownAttributeKind::CallerArgumentExpression
        )
    }

    /// Name without the `Attribute` suffix, as users usually write it.
    pub fn short_name(self) -> &'static str {
        let name = self.metadata_name();
        name.strip_suffix("Attribute").unwrap_or(name)
    }

    pub fn full_name(self) -> String {
        format!("{}.{}", self.namespace(), self.metadata_name())
    }
}

/// Namespaces that contain well-known attribute classes.
pub const WELL_KNOWN_NAMESPACES: &[&str] =
    &[SYSTEM, COMPILER_SERVICES, INTEROP_SERVICES, CODE_ANALYSIS, "System.Reflection"];

#[cfg(test)]
#[path = "tests/well_known_tests.rs"]
mod tests;
