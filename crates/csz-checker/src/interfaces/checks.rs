//! Diagnostics for missing and implicit interface implementations.

use crate::compilation::Compilation;
use crate::signatures::MemberSignature;
use csz_common::{DiagnosticBag, SourceLocation, diagnostic_codes};
use csz_symbols::{
    Accessibility, SymbolId, TypeCompareKind, TypeId, TypeSubstitution, display_type, display_type_id,
    type_ids_equal, types_equal,
};

/// How the base class of a type already implements an interface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BaseDeclared {
    Exact,
    IgnoringNullability,
    No,
}

impl Compilation {
    pub(crate) fn base_declares(&self, ty: SymbolId, interface: TypeId) -> BaseDeclared {
        let Some(base) = self.base_type(ty) else {
            return BaseDeclared::No;
        };
        let inherited = self.all_interfaces_of(base);
        if inherited
            .iter()
            .any(|&candidate| type_ids_equal(self.arena(), candidate, interface, TypeCompareKind::CONSIDER_EVERYTHING))
        {
            BaseDeclared::Exact
        } else if inherited.iter().any(|&candidate| self.same_type(candidate, interface)) {
            BaseDeclared::IgnoringNullability
        } else {
            BaseDeclared::No
        }
    }

    /// Reports an abstract interface member nothing implements, naming the
    /// closest candidate when one has the right signature.
    pub(super) fn report_missing_implementation(
        &self,
        ty: SymbolId,
        interface: TypeId,
        member: SymbolId,
        diagnostics: &mut DiagnosticBag,
    ) {
        let arena = self.arena();
        let location = arena.symbol(ty).location();
        let type_name = display_type_id(arena, arena.declared_type(ty));
        let member_name = self.display_member(member);

        let levels = self.implementation_levels(ty, interface);
        let searched = if arena.symbol(member).is_static() {
            &levels[..levels.len().min(1)]
        } else {
            &levels[..]
        };
        let close = searched
            .iter()
            .find_map(|&level| self.implicit_lookup(level, interface, member).close_mismatch.map(|c| (c, level)));
        let Some((candidate, level)) = close else {
            diagnostics.report(
                diagnostic_codes::UNIMPLEMENTED_INTERFACE_MEMBER,
                &location,
                &[&type_name, &member_name],
            );
            return;
        };

        let (implementing, implemented) = (arena.symbol(candidate), arena.symbol(member));
        let candidate_name = self.display_member(candidate);
        let signature = self.signature_through(candidate, level, Some(member));
        let wanted = self.signature_through(member, interface, None);
        let code = if implemented.is_static() && !implementing.is_static() {
            diagnostic_codes::CLOSE_UNIMPLEMENTED_INTERFACE_MEMBER_NOT_STATIC
        } else if !implemented.is_static() && implementing.is_static() {
            diagnostic_codes::CLOSE_UNIMPLEMENTED_INTERFACE_MEMBER_STATIC
        } else if implementing.accessibility != Accessibility::Public {
            diagnostic_codes::CLOSE_UNIMPLEMENTED_INTERFACE_MEMBER_NOT_PUBLIC
        } else if signature.ref_kind != wanted.ref_kind {
            diagnostic_codes::CLOSE_UNIMPLEMENTED_INTERFACE_MEMBER_WRONG_REF_RETURN
        } else if !types_equal(arena, &signature.ty, &wanted.ty, TypeCompareKind::SIGNATURE_MATCH) {
            diagnostics.report(
                diagnostic_codes::CLOSE_UNIMPLEMENTED_INTERFACE_MEMBER_WRONG_RETURN_TYPE,
                &location,
                &[&type_name, &member_name, &candidate_name, &display_type(arena, &wanted.ty)],
            );
            return;
        } else {
            // Right shape but missing an accessor.
            diagnostics.report(
                diagnostic_codes::UNIMPLEMENTED_INTERFACE_MEMBER,
                &location,
                &[&type_name, &member_name],
            );
            return;
        };
        diagnostics.report(code, &location, &[&type_name, &member_name, &candidate_name]);
    }

    /// The construction of `implementation`'s containing type in the base
    /// chain searched for `interface` on `ty`.
    pub(super) fn implementation_level(&self, ty: SymbolId, interface: TypeId, implementation: SymbolId) -> Option<TypeId> {
        let arena = self.arena();
        let container = arena.containing_type(implementation);
        self.implementation_levels(ty, interface)
            .into_iter()
            .find(|&level| arena.type_symbol_of(level) == container)
    }

    /// Signature of `implementation` as seen from `ty`, with method type
    /// parameters aligned to `member`.
    pub(super) fn implementation_signature(
        &self,
        ty: SymbolId,
        interface: TypeId,
        implementation: SymbolId,
        member: SymbolId,
    ) -> MemberSignature {
        match self.implementation_level(ty, interface, implementation) {
            Some(level) => self.signature_through(implementation, level, Some(member)),
            None => self.member_signature(implementation, &TypeSubstitution::new()),
        }
    }

    /// Tuple names, nullability, `scoped` and runtime ambiguity of an
    /// implicit implementation.
    pub(super) fn check_implicit_implementation(
        &self,
        ty: SymbolId,
        interface: TypeId,
        member: SymbolId,
        implementation: SymbolId,
        diagnostics: &mut DiagnosticBag,
    ) {
        let arena = self.arena();
        let declared_here = arena.containing_type(implementation) == Some(ty);
        let location = if declared_here {
            arena.symbol(implementation).location()
        } else {
            arena.symbol(ty).location()
        };
        let own = self.implementation_signature(ty, interface, implementation, member);
        let theirs = self.signature_through(member, interface, None);
        let implementation_name = self.display_member(implementation);
        let member_name = self.display_member(member);

        if self.tuple_names_conflict(&own, &theirs) {
            diagnostics.report(
                diagnostic_codes::IMPLEMENTATION_TUPLE_NAMES_MISMATCH,
                &location,
                &[&implementation_name, &member_name],
            );
        }
        if self.nullable_warnings_enabled(ty) {
            self.report_implicit_nullability(&own, &theirs, &location, declared_here, diagnostics);
        }
        self.report_scoped_mismatches(&own, &theirs, &member_name, diagnostics);

        let runtime_ambiguous = self
            .implementation_level(ty, interface, implementation)
            .is_some_and(|level| !self.implicit_lookup(level, interface, member).runtime_ambiguous.is_empty());
        if runtime_ambiguous {
            diagnostics.report(
                diagnostic_codes::MULTIPLE_IMPLEMENTATION_MATCHES,
                &location,
                &[&implementation_name, &member_name, &display_type_id(arena, arena.declared_type(ty))],
            );
        }
    }

    fn report_implicit_nullability(
        &self,
        own: &MemberSignature,
        theirs: &MemberSignature,
        location: &SourceLocation,
        declared_here: bool,
        diagnostics: &mut DiagnosticBag,
    ) {
        let arena = self.arena();
        let mismatch = self.nullability_mismatch(own, theirs);
        if mismatch.is_empty() {
            return;
        }
        let implementation_name = self.display_member(own.member);
        let member_name = self.display_member(theirs.member);
        if mismatch.in_type {
            let code = if arena.symbol(own.member).is_method() {
                diagnostic_codes::NULLABILITY_MISMATCH_IN_RETURN_TYPE_ON_IMPLICIT_IMPLEMENTATION
            } else {
                diagnostic_codes::NULLABILITY_MISMATCH_IN_TYPE_ON_IMPLICIT_IMPLEMENTATION
            };
            diagnostics.report(code, location, &[&implementation_name, &member_name]);
        }
        for parameter in mismatch.parameters {
            let parameter_location = if declared_here {
                arena.symbol(parameter).location()
            } else {
                location.clone()
            };
            diagnostics.report(
                diagnostic_codes::NULLABILITY_MISMATCH_IN_PARAMETER_TYPE_ON_IMPLICIT_IMPLEMENTATION,
                &parameter_location,
                &[&arena.name(parameter), &implementation_name, &member_name],
            );
        }
    }

    /// `scoped` dropped by an implementation: an error under the updated
    /// ref-safety rules, a warning otherwise.
    pub(super) fn report_scoped_mismatches(
        &self,
        own: &MemberSignature,
        theirs: &MemberSignature,
        implemented_name: &str,
        diagnostics: &mut DiagnosticBag,
    ) {
        let arena = self.arena();
        let (parameters, updated) = self.scoped_mismatches(own, theirs);
        let code = if updated {
            diagnostic_codes::SCOPED_MISMATCH_IN_PARAMETER_OF_IMPLEMENTATION
        } else {
            diagnostic_codes::SCOPED_MISMATCH_IN_PARAMETER_OF_IMPLEMENTATION_WARNING
        };
        for parameter in parameters {
            diagnostics.report(
                code,
                &arena.symbol(parameter).location(),
                &[&arena.name(parameter), implemented_name],
            );
        }
    }
}
