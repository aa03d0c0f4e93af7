//! Declared types of members and parameters.

use crate::compilation::Compilation;
use csz_symbols::symbol::{MethodSource, ParameterSource, PropertySource, SymbolData};
use csz_symbols::{
    CompletionPart, CustomModifier, MethodKind, RefKind, ScopedKind, SymbolId, TypeId,
    TypeWithAnnotations,
};

impl Compilation {
    /// Return type of a method, or type of a property.
    pub fn member_type(&self, member: SymbolId) -> &TypeWithAnnotations {
        let facets = self.member_facets(member);
        self.lazy_facet(member, &facets.ty, CompletionPart::FINISH_TYPE, |diagnostics| {
            let arena = self.arena();
            match &arena.symbol(member).data {
                SymbolData::Method(method) => match &method.source {
                    MethodSource::Syntax(syntax) => self.binder().bind_type(
                        &self.binding_context(member),
                        &syntax.return_type,
                        diagnostics,
                    ),
                    MethodSource::Accessor { .. } => match (method.kind, method.associated_property) {
                        (MethodKind::PropertyGet, Some(property)) => self.member_type(property).clone(),
                        _ => TypeWithAnnotations::not_annotated(TypeId::VOID),
                    },
                    MethodSource::Metadata(info) => info.return_type.clone(),
                },
                SymbolData::Property(property) => match &property.source {
                    PropertySource::Syntax(syntax) => {
                        self.binder()
                            .bind_type(&self.binding_context(member), &syntax.ty, diagnostics)
                    }
                    PropertySource::Metadata(info) => info.ty.clone(),
                },
                _ => unreachable!("member_type of non-member {member:?}"),
            }
        })
    }

    pub fn parameter_type(&self, parameter: SymbolId) -> &TypeWithAnnotations {
        let facets = self.parameter_facets(parameter);
        self.lazy_facet(parameter, &facets.ty, CompletionPart::FINISH_TYPE, |diagnostics| {
            let arena = self.arena();
            let symbol = arena.parameter(parameter);
            match &symbol.source {
                ParameterSource::Syntax(syntax) => {
                    let bound = self.binder().bind_type(
                        &self.binding_context(parameter),
                        &syntax.ty,
                        diagnostics,
                    );
                    // `in` parameters of virtual signatures carry a modreq.
                    let overridable = arena
                        .containing_member(parameter)
                        .is_some_and(|member| arena.symbol(member).is_overridable_kind());
                    if symbol.ref_kind == RefKind::In && overridable {
                        let mut modifiers = vec![CustomModifier::required(arena.in_attribute_type())];
                        modifiers.extend(bound.custom_modifiers.iter().copied());
                        bound.with_modifiers(modifiers)
                    } else {
                        bound
                    }
                }
                ParameterSource::AccessorCopy { original } => self.parameter_type(*original).clone(),
                ParameterSource::AccessorValue { property } => self.member_type(*property).clone(),
                ParameterSource::Metadata(info) => info.ty.clone(),
            }
        })
    }

    /// Whether `symbol` follows the updated ref-safety rules: the compilation
    /// setting for source, the declaring assembly's flag for metadata.
    pub(crate) fn uses_updated_ref_safety_rules(&self, symbol: SymbolId) -> bool {
        let arena = self.arena();
        if arena.symbol(symbol).is_source() {
            self.options().updated_ref_safety_rules
        } else {
            arena
                .assembly(arena.assembly_of(symbol))
                .uses_updated_ref_safety_rules
        }
    }

    /// `scoped` as it applies to calls: declared, or implied for `out`
    /// parameters under the updated rules unless `[UnscopedRef]` says
    /// otherwise.
    pub fn effective_scope(&self, parameter: SymbolId) -> ScopedKind {
        let symbol = self.arena().parameter(parameter);
        if symbol.scoped != ScopedKind::None {
            return symbol.scoped;
        }
        if symbol.ref_kind == RefKind::Out
            && self.uses_updated_ref_safety_rules(parameter)
            && !self.early_attributes(parameter).has_unscoped_ref
        {
            return ScopedKind::ScopedRef;
        }
        ScopedKind::None
    }

    /// Declared ref kind of a member's return value.
    pub fn member_ref_kind(&self, member: SymbolId) -> RefKind {
        let arena = self.arena();
        match &arena.symbol(member).data {
            SymbolData::Method(method) => match &method.source {
                MethodSource::Syntax(syntax) => syntax.ref_kind,
                MethodSource::Accessor { property, .. } if method.kind == MethodKind::PropertyGet => {
                    property.ref_kind
                }
                MethodSource::Accessor { .. } => RefKind::None,
                MethodSource::Metadata(info) => info.ref_kind,
            },
            SymbolData::Property(property) => match &property.source {
                PropertySource::Syntax(syntax) => syntax.ref_kind,
                PropertySource::Metadata(info) => info.ref_kind,
            },
            _ => RefKind::None,
        }
    }
}

#[cfg(test)]
#[path = "tests/type_facets_tests.rs"]
mod tests;
