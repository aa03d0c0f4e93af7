//! Attribute decoding.
//!
//! Attributes are decoded in two phases:
//! - early: identity plus primitive constructor arguments, for the handful
//!   of attributes other facets need (`[Optional]`, default-value and
//!   caller-info attributes, `[UnscopedRef]`, `[Obsolete]`, ...). Early
//!   decoding never asks for a facet that depends on attributes.
//! - full: every attribute bound completely, validated against the symbol
//!   it is applied to, and folded into [`WellKnownAttributeData`].
//!
//! The full bag is published once per symbol and never mutated afterwards.

mod early;
mod member;
mod parameter;

pub use early::EarlyWellKnownAttributeData;

use crate::compilation::Compilation;
use bitflags::bitflags;
use csz_common::{DiagnosticBag, diagnostic_codes};
use csz_symbols::symbol::{MethodSource, ParameterSource, SymbolData};
use csz_symbols::syntax::{AttributeSyntax, AttributeTargetSpecifier};
use csz_symbols::{
    AttributeBindingMode, AttributeData, AttributeTargets, CompletionPart, SymbolId, TypeKind,
    WellKnownAttributeKind,
};
use std::sync::Arc;
use tracing::trace;

bitflags! {
    /// Flow-analysis annotations from `System.Diagnostics.CodeAnalysis`.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct NullabilityFlags: u16 {
        const ALLOW_NULL = 1 << 0;
        const DISALLOW_NULL = 1 << 1;
        const MAYBE_NULL = 1 << 2;
        const NOT_NULL = 1 << 3;
        const MAYBE_NULL_WHEN_TRUE = 1 << 4;
        const MAYBE_NULL_WHEN_FALSE = 1 << 5;
        const NOT_NULL_WHEN_TRUE = 1 << 6;
        const NOT_NULL_WHEN_FALSE = 1 << 7;
        const DOES_NOT_RETURN_IF_TRUE = 1 << 8;
        const DOES_NOT_RETURN_IF_FALSE = 1 << 9;
    }
}

/// Facts decoded from fully bound well-known attributes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WellKnownAttributeData {
    pub nullability: NullabilityFlags,
    pub not_null_if_parameter_not_null: Vec<Arc<str>>,
    pub member_not_null: Vec<Arc<str>>,
    pub member_not_null_when_true: Vec<Arc<str>>,
    pub member_not_null_when_false: Vec<Arc<str>>,
    pub has_does_not_return: bool,
    pub has_special_name: bool,
    pub has_exclude_from_code_coverage: bool,
    pub has_serializable: bool,
    pub has_com_import: bool,
    pub has_enumerator_cancellation: bool,
    pub has_idispatch_constant: bool,
    pub has_iunknown_constant: bool,
    pub has_in: bool,
    pub has_out: bool,
    pub has_unscoped_ref: bool,
    /// `UnmanagedType` value of `[MarshalAs]`.
    pub marshal_as: Option<i64>,
    /// Parameter named by a valid `[CallerArgumentExpression]`.
    pub caller_argument_expression_parameter: Option<SymbolId>,
    /// Parameters named by `[InterpolatedStringHandlerArgument]`; `None`
    /// stands for the receiver.
    pub interpolated_handler_arguments: Vec<Option<SymbolId>>,
    /// Valid `[IndexerName]` on an indexer.
    pub indexer_name: Option<Arc<str>>,
    pub default_member_name: Option<Arc<str>>,
}

/// All attributes applied to one symbol, with their decoded data.
#[derive(Debug, Default)]
pub struct AttributeBag {
    pub attributes: Vec<AttributeData>,
    /// `[return: ...]` attributes of a method.
    pub return_attributes: Vec<AttributeData>,
    pub early: Arc<EarlyWellKnownAttributeData>,
    pub well_known: WellKnownAttributeData,
    pub return_well_known: WellKnownAttributeData,
}

impl AttributeBag {
    pub fn has(&self, kind: WellKnownAttributeKind) -> bool {
        self.attributes.iter().any(|attribute| attribute.is(kind))
    }

    pub fn find(&self, kind: WellKnownAttributeKind) -> Option<&AttributeData> {
        self.attributes.iter().find(|attribute| attribute.is(kind))
    }
}

impl Compilation {
    /// Attribute syntax written on `symbol`, in declaration order.
    pub(crate) fn attribute_syntax(&self, symbol: SymbolId) -> Vec<&AttributeSyntax> {
        let arena = self.arena();
        match &arena.symbol(symbol).data {
            SymbolData::Type(ty) => ty
                .declarations()
                .iter()
                .flat_map(|part| part.attributes.iter())
                .collect(),
            SymbolData::Method(method) => match &method.source {
                MethodSource::Syntax(syntax) => syntax.attributes.iter().collect(),
                MethodSource::Accessor { property, index } => property
                    .accessors
                    .get(*index)
                    .map(|accessor| accessor.attributes.iter().collect())
                    .unwrap_or_default(),
                MethodSource::Metadata(_) => Vec::new(),
            },
            SymbolData::Property(property) => property
                .syntax()
                .map(|syntax| syntax.attributes.iter().collect())
                .unwrap_or_default(),
            SymbolData::Parameter(parameter) => match &parameter.source {
                ParameterSource::Syntax(syntax) => syntax.attributes.iter().collect(),
                _ => Vec::new(),
            },
            SymbolData::TypeParameter(type_parameter) => {
                let ordinal = type_parameter.ordinal as usize;
                match &arena.symbol(type_parameter.owner).data {
                    SymbolData::Type(owner) => owner
                        .declarations()
                        .iter()
                        .filter_map(|part| part.type_parameters.get(ordinal))
                        .flat_map(|syntax| syntax.attributes.iter())
                        .collect(),
                    SymbolData::Method(owner) => owner
                        .syntax()
                        .and_then(|syntax| syntax.type_parameters.get(ordinal))
                        .map(|syntax| syntax.attributes.iter().collect())
                        .unwrap_or_default(),
                    _ => Vec::new(),
                }
            }
        }
    }

    /// Declaration kind `symbol` counts as for `AttributeUsage` checks.
    fn attribute_target(&self, symbol: SymbolId) -> AttributeTargets {
        let arena = self.arena();
        match &arena.symbol(symbol).data {
            SymbolData::Type(ty) => match ty.kind {
                TypeKind::Class => AttributeTargets::CLASS,
                TypeKind::Struct => AttributeTargets::STRUCT,
                TypeKind::Enum => AttributeTargets::ENUM,
                TypeKind::Interface => AttributeTargets::INTERFACE,
                TypeKind::Delegate => AttributeTargets::DELEGATE,
            },
            SymbolData::Method(_) => AttributeTargets::METHOD,
            SymbolData::Property(_) => AttributeTargets::PROPERTY,
            SymbolData::Parameter(_) => AttributeTargets::PARAMETER,
            SymbolData::TypeParameter(_) => AttributeTargets::TYPE_PARAMETER,
        }
    }

    /// Fully bound and validated attributes of `symbol`.
    ///
    /// Indexer accessor parameters share the bag of the indexer parameter
    /// they mirror; its diagnostics are reported there.
    pub fn attributes(&self, symbol: SymbolId) -> &Arc<AttributeBag> {
        let state = self.state(symbol);
        self.lazy_facet(symbol, &state.attributes, CompletionPart::ATTRIBUTES, |diagnostics| {
            if let SymbolData::Parameter(parameter) = &self.arena().symbol(symbol).data {
                if let ParameterSource::AccessorCopy { original } = parameter.source {
                    return Arc::clone(self.attributes(original));
                }
            }
            Arc::new(self.decode_attributes(symbol, diagnostics))
        })
    }

    fn decode_attributes(&self, symbol: SymbolId, diagnostics: &mut DiagnosticBag) -> AttributeBag {
        let cx = self.binding_context(symbol);
        let own_target = self.attribute_target(symbol);
        let mut bag = AttributeBag {
            early: Arc::clone(self.early_attributes(symbol)),
            ..AttributeBag::default()
        };
        for syntax in self.attribute_syntax(symbol) {
            let Some(class) = self.binder().resolve_attribute_class(&cx, syntax, diagnostics) else {
                continue;
            };
            let data = self
                .binder()
                .bind_attribute(&cx, syntax, class, AttributeBindingMode::Full, diagnostics);
            let on_return = syntax.target == Some(AttributeTargetSpecifier::Return);
            if let Some(kind) = data.kind {
                if !check_reserved(kind, &data, diagnostics) {
                    continue;
                }
                let target = if on_return {
                    AttributeTargets::RETURN_VALUE
                } else {
                    own_target
                };
                if !kind.valid_targets().intersects(target) {
                    diagnostics.report(
                        diagnostic_codes::ATTRIBUTE_NOT_VALID_ON_TARGET,
                        &data.location,
                        &[kind.short_name()],
                    );
                    continue;
                }
            }
            if on_return {
                bag.return_attributes.push(data);
            } else {
                bag.attributes.push(data);
            }
        }

        match &self.arena().symbol(symbol).data {
            SymbolData::Parameter(_) => self.decode_parameter_attributes(symbol, &mut bag, diagnostics),
            SymbolData::Method(_) | SymbolData::Property(_) => {
                self.decode_member_attributes(symbol, &mut bag, diagnostics)
            }
            SymbolData::Type(_) => self.decode_type_attributes(symbol, &mut bag, diagnostics),
            SymbolData::TypeParameter(_) => {}
        }
        let mut return_well_known = WellKnownAttributeData::default();
        for data in &bag.return_attributes {
            decode_nullability(data, &mut return_well_known);
        }
        bag.return_well_known = return_well_known;
        trace!(
            symbol = symbol.0,
            attributes = bag.attributes.len(),
            return_attributes = bag.return_attributes.len(),
            "decode_attributes"
        );
        bag
    }
}

/// Reject attributes the compiler reserves for itself. Returns whether the
/// attribute may be recorded.
pub(crate) fn check_reserved(
    kind: WellKnownAttributeKind,
    data: &AttributeData,
    diagnostics: &mut DiagnosticBag,
) -> bool {
    match kind.reserved_diagnostic() {
        Some(code) => {
            let name = kind.full_name();
            diagnostics.report(code, &data.location, &[&name]);
            false
        }
        None => true,
    }
}

/// Fold a nullability attribute into `well_known`. Returns whether `data`
/// was one.
pub(crate) fn decode_nullability(data: &AttributeData, well_known: &mut WellKnownAttributeData) -> bool {
    use WellKnownAttributeKind as K;
    let Some(kind) = data.kind else {
        return false;
    };
    let when = |when_true: NullabilityFlags, when_false: NullabilityFlags| {
        match data.argument(0).and_then(|value| value.as_bool()) {
            Some(true) => when_true,
            Some(false) => when_false,
            None => NullabilityFlags::empty(),
        }
    };
    let flags = match kind {
        K::AllowNull => NullabilityFlags::ALLOW_NULL,
        K::DisallowNull => NullabilityFlags::DISALLOW_NULL,
        K::MaybeNull => NullabilityFlags::MAYBE_NULL,
        K::NotNull => NullabilityFlags::NOT_NULL,
        K::MaybeNullWhen => when(
            NullabilityFlags::MAYBE_NULL_WHEN_TRUE,
            NullabilityFlags::MAYBE_NULL_WHEN_FALSE,
        ),
        K::NotNullWhen => when(
            NullabilityFlags::NOT_NULL_WHEN_TRUE,
            NullabilityFlags::NOT_NULL_WHEN_FALSE,
        ),
        K::DoesNotReturnIf => when(
            NullabilityFlags::DOES_NOT_RETURN_IF_TRUE,
            NullabilityFlags::DOES_NOT_RETURN_IF_FALSE,
        ),
        K::NotNullIfNotNull => {
            if let Some(name) = data.string_argument(0) {
                well_known.not_null_if_parameter_not_null.push(Arc::from(name));
            }
            return true;
        }
        _ => return false,
    };
    well_known.nullability |= flags;
    true
}

/// Whether `name` is a C# identifier.
pub(crate) fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first == '_' || first.is_alphabetic())
        && chars.all(|c| c == '_' || c.is_alphanumeric())
}

/// Every string constructor argument, in order.
pub(crate) fn string_arguments(data: &AttributeData) -> Vec<Arc<str>> {
    data.constructor_arguments
        .iter()
        .filter_map(|argument| argument.value.as_str().map(Arc::from))
        .collect()
}

#[cfg(test)]
#[path = "../tests/attributes_tests.rs"]
mod tests;
