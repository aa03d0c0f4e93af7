//! Explicit interface implementations (`void I.M()`).

use crate::compilation::Compilation;
use csz_common::{DiagnosticBag, SourceLocation, diagnostic_codes};
use csz_symbols::{CompletionPart, SymbolId, TypeCompareKind, TypeId, TypeSubstitution, display_type_id, types_equal};
use smallvec::SmallVec;
use tracing::debug;

/// The interface member an explicit implementation implements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ExplicitImplementation {
    /// As written, in terms of the implementing type's type parameters.
    pub interface: TypeId,
    pub member: SymbolId,
}

impl Compilation {
    /// The interface member `member` explicitly implements. Accessors follow
    /// their property.
    pub fn explicit_implementation(&self, member: SymbolId) -> Option<ExplicitImplementation> {
        let facets = self.member_facets(member);
        *self.lazy_facet(
            member,
            &facets.explicit_implementation,
            CompletionPart::FINISH_EXPLICIT_INTERFACE,
            |diagnostics| self.bind_explicit_implementation(member, diagnostics),
        )
    }

    fn bind_explicit_implementation(
        &self,
        member: SymbolId,
        diagnostics: &mut DiagnosticBag,
    ) -> Option<ExplicitImplementation> {
        let arena = self.arena();
        let symbol = arena.symbol(member);
        if let Some(method) = symbol.as_method().filter(|method| method.kind.is_accessor()) {
            let implemented = self.explicit_implementation(method.associated_property?)?;
            let accessor = self.accessor_of(implemented.member, method.kind)?;
            return Some(ExplicitImplementation {
                interface: implemented.interface,
                member: accessor,
            });
        }
        let syntax = match (symbol.as_method(), symbol.as_property()) {
            (Some(method), _) => method.explicit_interface_syntax()?,
            (_, Some(property)) => property.explicit_interface_syntax()?,
            _ => return None,
        };
        let location = symbol.location();
        let interface = self
            .binder()
            .bind_type(&self.binding_context(member), syntax, diagnostics)
            .ty;
        if arena.interner().contains_error(interface) {
            return None;
        }
        if !arena.is_interface_type(interface) {
            diagnostics.report(
                diagnostic_codes::EXPLICIT_INTERFACE_NOT_AN_INTERFACE,
                &location,
                &[&display_type_id(arena, interface)],
            );
            return None;
        }
        let container = arena.containing_type(member)?;
        if !self
            .all_interfaces(container)
            .iter()
            .any(|&implemented| self.same_type(implemented, interface))
        {
            diagnostics.report(
                diagnostic_codes::CLASS_DOESNT_IMPLEMENT_INTERFACE,
                &location,
                &[&self.display_member(member), &display_type_id(arena, interface)],
            );
            return None;
        }

        let candidates = self.explicit_candidates(member, interface);
        let Some(&implemented) = candidates.first() else {
            diagnostics.report(
                diagnostic_codes::INTERFACE_MEMBER_NOT_FOUND,
                &location,
                &[&self.display_member(member)],
            );
            return None;
        };
        if candidates.len() > 1 {
            diagnostics.report(
                diagnostic_codes::EXPLICIT_IMPLEMENTATION_COLLISION,
                &location,
                &[&self.display_member(member)],
            );
        }
        self.check_explicit_signature(member, interface, implemented, &location, diagnostics);
        debug!(member = member.0, implemented = implemented.0, "explicit_implementation");
        Some(ExplicitImplementation {
            interface,
            member: implemented,
        })
    }

    /// Members of `interface` that `member` matches by simple name, kind,
    /// static-ness and full signature.
    fn explicit_candidates(&self, member: SymbolId, interface: TypeId) -> SmallVec<[SymbolId; 1]> {
        let arena = self.arena();
        let Some(definition) = arena.type_symbol_of(interface) else {
            return SmallVec::new();
        };
        let full_name = arena.name(member);
        let simple_name = full_name.rsplit('.').next().unwrap_or_default();
        let Some(atom) = arena.atom(simple_name) else {
            return SmallVec::new();
        };
        let own = self.member_signature(member, &TypeSubstitution::new());
        let is_static = arena.symbol(member).is_static();
        arena
            .members_named(definition, atom)
            .iter()
            .copied()
            .filter(|&candidate| {
                let candidate_symbol = arena.symbol(candidate);
                if !self.same_member_kind(member, candidate)
                    || candidate_symbol.is_static() != is_static
                    || !(candidate_symbol.is_abstract() || candidate_symbol.is_virtual())
                {
                    return false;
                }
                let theirs = self.signature_through(candidate, interface, Some(member));
                self.parameters_match(&own, &theirs, TypeCompareKind::SIGNATURE_MATCH)
                    && own.ref_kind == theirs.ref_kind
                    && types_equal(arena, &own.ty, &theirs.ty, TypeCompareKind::SIGNATURE_MATCH)
            })
            .collect()
    }

    /// Nullability, tuple names and `scoped` of an explicit implementation
    /// against the member it implements.
    fn check_explicit_signature(
        &self,
        member: SymbolId,
        interface: TypeId,
        implemented: SymbolId,
        location: &SourceLocation,
        diagnostics: &mut DiagnosticBag,
    ) {
        let arena = self.arena();
        let own = self.member_signature(member, &TypeSubstitution::new());
        let theirs = self.signature_through(implemented, interface, Some(member));
        let implemented_name = self.display_member(implemented);

        if self.tuple_names_conflict(&own, &theirs) {
            diagnostics.report(
                diagnostic_codes::IMPLEMENTATION_TUPLE_NAMES_MISMATCH,
                location,
                &[&self.display_member(member), &implemented_name],
            );
        }
        if self.nullable_warnings_enabled(member) {
            let mismatch = self.nullability_mismatch(&own, &theirs);
            if mismatch.in_type {
                let code = if arena.symbol(member).is_method() {
                    diagnostic_codes::NULLABILITY_MISMATCH_IN_RETURN_TYPE_ON_EXPLICIT_IMPLEMENTATION
                } else {
                    diagnostic_codes::NULLABILITY_MISMATCH_IN_TYPE_ON_EXPLICIT_IMPLEMENTATION
                };
                diagnostics.report(code, location, &[&implemented_name]);
            }
            for parameter in mismatch.parameters {
                diagnostics.report(
                    diagnostic_codes::NULLABILITY_MISMATCH_IN_PARAMETER_TYPE_ON_EXPLICIT_IMPLEMENTATION,
                    &arena.symbol(parameter).location(),
                    &[&arena.name(parameter), &implemented_name],
                );
            }
        }
        self.report_scoped_mismatches(&own, &theirs, &implemented_name, diagnostics);
    }
}
