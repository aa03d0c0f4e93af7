//! The compilation: an immutable symbol arena plus the lazily completed
//! state of every symbol in it.
//!
//! State is kept outside the arena in a vector indexed by `SymbolId`, so the
//! arena stays shareable and every facet slot has a single owner.

use crate::attributes::{AttributeBag, EarlyWellKnownAttributeData};
use crate::constraints::TypeParameterConstraintClause;
use crate::declaration_binder::DeclarationBinder;
use crate::interfaces::{ExplicitImplementation, SynthesizedExplicitImplementations};
use crate::overrides::OverriddenOrHiddenMembersResult;
use csz_common::{CompilerOptions, Diagnostic, DiagnosticCategory, DiagnosticSink};
use csz_symbols::symbol::{MethodSource, PropertySource, SymbolData, SymbolOrigin};
use csz_symbols::syntax::{MemberDeclarationSyntax, TypeDeclarationSyntax};
use csz_symbols::{
    Binder, BindingContext, CompletionPart, CompletionState, ConstantValue, LazySlot, SymbolArena,
    SymbolId, TypeId, TypeWithAnnotations,
};
use dashmap::DashMap;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use tracing::debug;

/// (implementing type, constructed interface, interface member).
pub(crate) type ImplementationKey = (SymbolId, TypeId, SymbolId);

// =============================================================================
// Per-symbol state
// =============================================================================

pub(crate) struct SymbolState {
    pub(crate) completion: CompletionState,
    pub(crate) diagnostics: DiagnosticSink,
    pub(crate) early_attributes: LazySlot<Arc<EarlyWellKnownAttributeData>>,
    pub(crate) attributes: LazySlot<Arc<AttributeBag>>,
    pub(crate) facets: SymbolFacets,
}

pub(crate) enum SymbolFacets {
    Type(TypeFacets),
    Method(MemberFacets),
    Property(MemberFacets),
    Parameter(ParameterFacets),
    TypeParameter,
}

#[derive(Default)]
pub(crate) struct TypeFacets {
    pub(crate) base_type: LazySlot<Option<TypeId>>,
    pub(crate) interfaces: LazySlot<Arc<[TypeId]>>,
    pub(crate) all_interfaces: LazySlot<Arc<[TypeId]>>,
    pub(crate) constraint_clauses: LazySlot<Arc<[TypeParameterConstraintClause]>>,
    pub(crate) synthesized: LazySlot<Arc<SynthesizedExplicitImplementations>>,
}

#[derive(Default)]
pub(crate) struct MemberFacets {
    pub(crate) ty: LazySlot<TypeWithAnnotations>,
    pub(crate) constraint_clauses: LazySlot<Arc<[TypeParameterConstraintClause]>>,
    pub(crate) overridden: LazySlot<Arc<OverriddenOrHiddenMembersResult>>,
    pub(crate) explicit_implementation: LazySlot<Option<ExplicitImplementation>>,
    /// Set when an implicit interface implementation had to be made virtual
    /// in metadata.
    pub(crate) forced_metadata_virtual: AtomicBool,
}

#[derive(Default)]
pub(crate) struct ParameterFacets {
    pub(crate) ty: LazySlot<TypeWithAnnotations>,
    pub(crate) default_value: LazySlot<Option<ConstantValue>>,
}

impl SymbolState {
    fn for_symbol(arena: &SymbolArena, id: SymbolId) -> Self {
        let symbol = arena.symbol(id);
        let (parts, facets) = match &symbol.data {
            SymbolData::Type(_) => (
                CompletionPart::TYPE_SYMBOL_ALL,
                SymbolFacets::Type(TypeFacets::default()),
            ),
            SymbolData::Method(_) => (
                CompletionPart::METHOD_SYMBOL_ALL,
                SymbolFacets::Method(MemberFacets::default()),
            ),
            SymbolData::Property(_) => (
                CompletionPart::PROPERTY_SYMBOL_ALL,
                SymbolFacets::Property(MemberFacets::default()),
            ),
            SymbolData::Parameter(_) => (
                CompletionPart::PARAMETER_SYMBOL_ALL,
                SymbolFacets::Parameter(ParameterFacets::default()),
            ),
            SymbolData::TypeParameter(_) => (CompletionPart::ATTRIBUTES, SymbolFacets::TypeParameter),
        };
        // Metadata symbols have nothing to complete or report.
        let parts = match symbol.origin {
            SymbolOrigin::Source => parts,
            SymbolOrigin::Metadata(_) => CompletionPart::empty(),
        };
        SymbolState {
            completion: CompletionState::for_parts(parts),
            diagnostics: DiagnosticSink::new(),
            early_attributes: LazySlot::new(),
            attributes: LazySlot::new(),
            facets,
        }
    }
}

// =============================================================================
// Compilation
// =============================================================================

pub struct Compilation {
    arena: Arc<SymbolArena>,
    options: CompilerOptions,
    binder: Arc<dyn Binder>,
    states: Vec<SymbolState>,
    /// Memoized implementation lookups. Pure, so racing inserts agree.
    pub(crate) implementations: DashMap<ImplementationKey, Option<SymbolId>>,
}

impl Compilation {
    /// A compilation that binds declarations with [`DeclarationBinder`].
    pub fn new(arena: Arc<SymbolArena>, options: CompilerOptions) -> Self {
        Self::with_binder(arena, options, Arc::new(DeclarationBinder::new()))
    }

    pub fn with_binder(arena: Arc<SymbolArena>, options: CompilerOptions, binder: Arc<dyn Binder>) -> Self {
        let states = arena
            .ids()
            .map(|id| SymbolState::for_symbol(&arena, id))
            .collect::<Vec<_>>();
        debug!(
            symbols = states.len(),
            source_types = arena.source_types().len(),
            "Compilation::new"
        );
        Compilation {
            arena,
            options,
            binder,
            states,
            implementations: DashMap::new(),
        }
    }

    pub fn arena(&self) -> &SymbolArena {
        &self.arena
    }

    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    pub(crate) fn binder(&self) -> &dyn Binder {
        &*self.binder
    }

    // -------------------------------------------------------------------------
    // State access. Asking for facets of the wrong kind is a caller bug.
    // -------------------------------------------------------------------------

    pub(crate) fn state(&self, symbol: SymbolId) -> &SymbolState {
        &self.states[symbol.index()]
    }

    pub(crate) fn type_facets(&self, symbol: SymbolId) -> &TypeFacets {
        match &self.state(symbol).facets {
            SymbolFacets::Type(facets) => facets,
            _ => unreachable!("symbol {symbol:?} has no type facets"),
        }
    }

    pub(crate) fn member_facets(&self, symbol: SymbolId) -> &MemberFacets {
        match &self.state(symbol).facets {
            SymbolFacets::Method(facets) | SymbolFacets::Property(facets) => facets,
            _ => unreachable!("symbol {symbol:?} has no member facets"),
        }
    }

    pub(crate) fn parameter_facets(&self, symbol: SymbolId) -> &ParameterFacets {
        match &self.state(symbol).facets {
            SymbolFacets::Parameter(facets) => facets,
            _ => unreachable!("symbol {symbol:?} has no parameter facets"),
        }
    }

    pub fn completion_state(&self, symbol: SymbolId) -> &CompletionState {
        &self.state(symbol).completion
    }

    /// Diagnostics committed for one symbol so far.
    pub fn symbol_diagnostics(&self, symbol: SymbolId) -> Vec<Diagnostic> {
        self.state(symbol).diagnostics.snapshot()
    }

    /// Every committed diagnostic, in location order, after applying
    /// `noWarn` and `warningsAsErrors`.
    ///
    /// Only reports what has been computed; call
    /// [`Compilation::force_complete_all`] first for a full check.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut all: Vec<Diagnostic> = self
            .states
            .iter()
            .flat_map(|state| state.diagnostics.snapshot())
            .filter(|diagnostic| !(diagnostic.is_warning() && self.options.is_suppressed(diagnostic.code)))
            .map(|mut diagnostic| {
                if self.options.warnings_as_errors && diagnostic.is_warning() {
                    diagnostic.category = DiagnosticCategory::Error;
                }
                diagnostic
            })
            .collect();
        all.sort_by(|a, b| a.location.cmp(&b.location).then(a.code.cmp(&b.code)));
        all
    }

    // -------------------------------------------------------------------------
    // Binding scope
    // -------------------------------------------------------------------------

    /// The type declaration part that declares `symbol`.
    pub(crate) fn declaring_part(&self, symbol: SymbolId) -> Option<&Arc<TypeDeclarationSyntax>> {
        let arena = self.arena();
        match &arena.symbol(symbol).data {
            SymbolData::Type(ty) => ty.declarations().first(),
            SymbolData::Method(method) => {
                let parts = arena.type_symbol(arena.containing_type(symbol)?).declarations();
                match &method.source {
                    MethodSource::Syntax(syntax) => parts.iter().find(|part| {
                        part.members.iter().any(|member| {
                            matches!(member, MemberDeclarationSyntax::Method(m) if Arc::ptr_eq(m, syntax))
                        })
                    }),
                    MethodSource::Accessor { property, .. } => parts.iter().find(|part| {
                        part.members.iter().any(|member| {
                            matches!(member, MemberDeclarationSyntax::Property(p) if Arc::ptr_eq(p, property))
                        })
                    }),
                    MethodSource::Metadata(_) => None,
                }
            }
            SymbolData::Property(property) => {
                let PropertySource::Syntax(syntax) = &property.source else {
                    return None;
                };
                arena
                    .type_symbol(arena.containing_type(symbol)?)
                    .declarations()
                    .iter()
                    .find(|part| {
                        part.members.iter().any(|member| {
                            matches!(member, MemberDeclarationSyntax::Property(p) if Arc::ptr_eq(p, syntax))
                        })
                    })
            }
            SymbolData::Parameter(_) => self.declaring_part(arena.containing_member(symbol)?),
            SymbolData::TypeParameter(type_parameter) => self.declaring_part(type_parameter.owner),
        }
    }

    /// Whether `T?` on a reference type is an annotation where `symbol` is
    /// declared.
    pub(crate) fn annotations_enabled(&self, symbol: SymbolId) -> bool {
        self.declaring_part(symbol)
            .and_then(|part| part.nullable_annotations)
            .unwrap_or_else(|| self.options.nullable.annotations_enabled())
    }

    /// Whether nullability mismatches are reported where `symbol` is declared.
    pub(crate) fn nullable_warnings_enabled(&self, symbol: SymbolId) -> bool {
        self.declaring_part(symbol)
            .and_then(|part| part.nullable_annotations)
            .unwrap_or_else(|| self.options.nullable.warnings_enabled())
    }

    /// Innermost symbol whose type parameters are visible from `symbol`.
    fn binding_scope(&self, symbol: SymbolId) -> SymbolId {
        let arena = self.arena();
        match &arena.symbol(symbol).data {
            SymbolData::Type(_) => symbol,
            SymbolData::Method(method) if method.kind.is_accessor() => {
                arena.containing_type(symbol).unwrap_or(symbol)
            }
            SymbolData::Method(_) => symbol,
            SymbolData::Property(_) => arena.containing_type(symbol).unwrap_or(symbol),
            SymbolData::Parameter(_) => arena
                .containing_member(symbol)
                .map_or(symbol, |member| self.binding_scope(member)),
            SymbolData::TypeParameter(type_parameter) => type_parameter.owner,
        }
    }

    pub(crate) fn binding_context(&self, symbol: SymbolId) -> BindingContext<'_> {
        BindingContext::new(
            self.arena(),
            self.binding_scope(symbol),
            self.annotations_enabled(symbol),
        )
    }

    pub(crate) fn is_source(&self, symbol: SymbolId) -> bool {
        self.arena.symbol(symbol).is_source()
    }
}

impl std::fmt::Debug for Compilation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compilation")
            .field("arena", &self.arena)
            .field("options", &self.options)
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/compilation_tests.rs"]
mod tests;
