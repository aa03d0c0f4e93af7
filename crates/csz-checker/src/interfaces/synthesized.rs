//! Runtime bridging for interface implementations.
//!
//! The language accepts any public same-signature member as an implicit
//! implementation. The runtime only accepts a virtual method whose signature
//! matches including custom modifiers. For every implemented interface
//! method exactly one [`ClrImplementationAction`] closes the gap.

use super::ExplicitImplementation;
use super::checks::BaseDeclared;
use crate::compilation::Compilation;
use crate::signatures::MemberSignature;
use csz_common::{DiagnosticBag, diagnostic_codes};
use csz_symbols::{
    CompletionPart, MethodKind, SymbolData, SymbolId, TypeCompareKind, TypeId, TypeKind, TypeWithAnnotations,
    display_type_id, types_equal,
};
use std::sync::Arc;
use std::sync::atomic::Ordering;
use tracing::debug;

/// What emission must do so the runtime sees an implementation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClrImplementationAction {
    /// Already recognized.
    NoOp,
    /// Emit the source method as virtual (and final).
    FlipVirtual,
    /// Emit a virtual method with the interface's exact signature that calls
    /// the implementation.
    Forwarder,
    /// Emit a method-impl record mapping the interface method to the
    /// implementation.
    MethodImpl,
}

/// A method to synthesize: the interface's signature, delegating to
/// `implementing_method`.
#[derive(Clone, Debug)]
pub struct SynthesizedForwardingMethod {
    pub interface: TypeId,
    pub interface_method: SymbolId,
    pub implementing_method: SymbolId,
    /// Signature of `interface_method` through `interface`.
    pub signature: MemberSignature,
}

/// Everything a type needs emitted so the runtime agrees with the language
/// about its interface implementations.
#[derive(Clone, Debug, Default)]
pub struct SynthesizedExplicitImplementations {
    pub forwarding_methods: Vec<SynthesizedForwardingMethod>,
    /// (implementing method, interface method) records for static members.
    pub method_impls: Vec<(SymbolId, ExplicitImplementation)>,
    /// Source methods that must be emitted as virtual.
    pub made_virtual: Vec<SymbolId>,
}

impl SynthesizedExplicitImplementations {
    pub fn is_empty(&self) -> bool {
        self.forwarding_methods.is_empty() && self.method_impls.is_empty() && self.made_virtual.is_empty()
    }

    fn record(
        &mut self,
        action: ClrImplementationAction,
        interface: TypeId,
        interface_method: SymbolId,
        implementing_method: SymbolId,
        signature: impl FnOnce() -> MemberSignature,
    ) {
        match action {
            ClrImplementationAction::NoOp => {}
            ClrImplementationAction::FlipVirtual => {
                if !self.made_virtual.contains(&implementing_method) {
                    self.made_virtual.push(implementing_method);
                }
            }
            ClrImplementationAction::Forwarder => self.forwarding_methods.push(SynthesizedForwardingMethod {
                interface,
                interface_method,
                implementing_method,
                signature: signature(),
            }),
            ClrImplementationAction::MethodImpl => self.method_impls.push((
                implementing_method,
                ExplicitImplementation {
                    interface,
                    member: interface_method,
                },
            )),
        }
    }
}

impl Compilation {
    /// Forwarders, method-impl records and virtual flips for `ty`, together
    /// with the diagnostics for its interface implementations.
    pub fn synthesized_explicit_implementations(&self, ty: SymbolId) -> &Arc<SynthesizedExplicitImplementations> {
        let facets = self.type_facets(ty);
        self.lazy_facet_with(
            ty,
            &facets.synthesized,
            CompletionPart::FINISH_SYNTHESIZED_EXPLICIT_IMPLEMENTATIONS,
            |diagnostics| Arc::new(self.compute_synthesized(ty, diagnostics)),
            |result| {
                for &method in &result.made_virtual {
                    self.member_facets(method)
                        .forced_metadata_virtual
                        .store(true, Ordering::Release);
                }
            },
        )
    }

    /// The single corrective action for `implementing` as the implementation
    /// of `interface_method` on `ty`.
    pub fn clr_implementation_action(
        &self,
        ty: SymbolId,
        interface: TypeId,
        interface_method: SymbolId,
        implementing: SymbolId,
    ) -> ClrImplementationAction {
        let arena = self.arena();
        if self.explicit_implementation(implementing).is_some() || implementing == interface_method {
            return ClrImplementationAction::NoOp;
        }
        let own = self.implementation_signature(ty, interface, implementing, interface_method);
        let theirs = self.signature_through(interface_method, interface, None);
        let runtime_match = |left: &TypeWithAnnotations, right: &TypeWithAnnotations| {
            types_equal(arena, left, right, TypeCompareKind::RUNTIME_SIGNATURE_MATCH)
        };
        let modifiers_differ = !runtime_match(&own.ty, &theirs.ty)
            || own
                .parameter_types()
                .zip(theirs.parameter_types())
                .any(|(mine, expected)| !runtime_match(mine, expected));
        let action = if modifiers_differ {
            ClrImplementationAction::Forwarder
        } else if arena.symbol(interface_method).is_static() {
            ClrImplementationAction::MethodImpl
        } else if self.declared_metadata_virtual(implementing) {
            ClrImplementationAction::NoOp
        } else if arena.symbol(implementing).is_source() {
            ClrImplementationAction::FlipVirtual
        } else {
            ClrImplementationAction::Forwarder
        };
        debug!(
            ty = ty.0,
            interface_method = interface_method.0,
            implementing = implementing.0,
            ?action,
            "clr_implementation_action"
        );
        action
    }

    fn compute_synthesized(&self, ty: SymbolId, diagnostics: &mut DiagnosticBag) -> SynthesizedExplicitImplementations {
        let arena = self.arena();
        let mut result = SynthesizedExplicitImplementations::default();
        if !matches!(arena.type_symbol(ty).kind, TypeKind::Class | TypeKind::Struct) {
            return result;
        }
        let declared = arena.declared_type(ty);
        for &interface in self.all_interfaces(ty).iter() {
            // Interfaces only inherited from the base class were handled there.
            if !self.declares_interface(declared, interface) {
                continue;
            }
            let Some(definition) = arena.type_symbol_of(interface) else {
                continue;
            };
            for &member in arena.members(definition) {
                if !self.is_implementable(member) {
                    continue;
                }
                self.resolve_for_emission(ty, interface, member, &mut result, diagnostics);
            }
        }
        debug!(
            ty = ty.0,
            forwarders = result.forwarding_methods.len(),
            method_impls = result.method_impls.len(),
            made_virtual = result.made_virtual.len(),
            "synthesized_explicit_implementations"
        );
        result
    }

    /// Methods and properties an implementing type must supply or inherit.
    fn is_implementable(&self, member: SymbolId) -> bool {
        let symbol = self.arena().symbol(member);
        let kind_ok = match &symbol.data {
            SymbolData::Method(method) => !method.kind.is_accessor() && !method.is_explicit_interface_implementation(),
            SymbolData::Property(property) => !property.is_explicit_interface_implementation(),
            _ => false,
        };
        kind_ok && (symbol.is_abstract() || symbol.is_virtual())
    }

    fn resolve_for_emission(
        &self,
        ty: SymbolId,
        interface: TypeId,
        member: SymbolId,
        result: &mut SynthesizedExplicitImplementations,
        diagnostics: &mut DiagnosticBag,
    ) {
        let arena = self.arena();
        let Some(implementation) = self.implementing_member(ty, interface, member) else {
            if arena.symbol(member).is_abstract() {
                self.report_missing_in_type(ty, interface, member, diagnostics);
            }
            return;
        };
        if implementation == member {
            return;
        }
        if arena.containing_type(implementation) != Some(ty) {
            match self.base_declares(ty, interface) {
                BaseDeclared::Exact => return,
                BaseDeclared::IgnoringNullability => {
                    self.report_base_nullability(ty, member, diagnostics);
                    return;
                }
                BaseDeclared::No => {}
            }
        }
        if !self.is_explicit_member(implementation) {
            self.check_implicit_implementation(ty, interface, member, implementation, diagnostics);
        }

        let pairs: Vec<(SymbolId, SymbolId)> = match &arena.symbol(member).data {
            SymbolData::Property(_) => [MethodKind::PropertyGet, MethodKind::PropertySet]
                .into_iter()
                .filter_map(|kind| Some((self.accessor_of(member, kind)?, self.accessor_of(implementation, kind)?)))
                .collect(),
            _ => vec![(member, implementation)],
        };
        for (interface_method, implementing) in pairs {
            let action = self.clr_implementation_action(ty, interface, interface_method, implementing);
            result.record(action, interface, interface_method, implementing, || {
                self.signature_through(interface_method, interface, None)
            });
        }
    }

    fn report_missing_in_type(&self, ty: SymbolId, interface: TypeId, member: SymbolId, diagnostics: &mut DiagnosticBag) {
        match self.base_declares(ty, interface) {
            BaseDeclared::Exact => {}
            BaseDeclared::IgnoringNullability => self.report_base_nullability(ty, member, diagnostics),
            BaseDeclared::No => self.report_missing_implementation(ty, interface, member, diagnostics),
        }
    }

    fn report_base_nullability(&self, ty: SymbolId, member: SymbolId, diagnostics: &mut DiagnosticBag) {
        if !self.nullable_warnings_enabled(ty) {
            return;
        }
        let arena = self.arena();
        diagnostics.report(
            diagnostic_codes::NULLABILITY_MISMATCH_IN_INTERFACE_IMPLEMENTED_BY_BASE,
            &arena.symbol(ty).location(),
            &[&display_type_id(arena, arena.declared_type(ty)), &self.display_member(member)],
        );
    }
}
