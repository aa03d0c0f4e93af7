//! Diagnostics for overriding and hiding members.

use super::{InheritedMember, OverriddenOrHiddenMembersResult};
use crate::compilation::Compilation;
use crate::signatures::MemberSignature;
use csz_common::{DiagnosticBag, SourceLocation, diagnostic_codes};
use csz_symbols::{
    Accessibility, RefKind, SymbolData, SymbolId, TypeCompareKind, TypeKind, TypeSubstitution, TypeWithAnnotations,
    display_type, display_type_id, types_equal,
};
use tracing::debug;

/// Result of checking one overriding or hiding member.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OverrideCheckOutcome {
    /// An error was reported for the member itself.
    pub reported_error: bool,
    /// Accessor-level diagnostics would only repeat a member-level error.
    pub suppress_accessors: bool,
}

impl OverrideCheckOutcome {
    fn failed(&mut self) {
        self.reported_error = true;
        self.suppress_accessors = true;
    }
}

impl Compilation {
    /// Checks `member` against what it overrides or hides. Accessors are
    /// covered by their property.
    pub(crate) fn check_override_or_hiding(
        &self,
        member: SymbolId,
        diagnostics: &mut DiagnosticBag,
    ) -> OverrideCheckOutcome {
        let arena = self.arena();
        let symbol = arena.symbol(member);
        if !symbol.is_source() || !symbol.is_member() {
            return OverrideCheckOutcome::default();
        }
        if symbol.as_method().is_some_and(|method| method.kind.is_accessor()) {
            return OverrideCheckOutcome::default();
        }
        let result = self.overridden_or_hidden_members(member);
        let outcome = if symbol.is_override() {
            self.check_override(member, result, diagnostics)
        } else {
            self.check_hiding(member, result, diagnostics);
            OverrideCheckOutcome::default()
        };
        debug!(
            member = member.0,
            reported_error = outcome.reported_error,
            suppress_accessors = outcome.suppress_accessors,
            "check_override_or_hiding"
        );
        outcome
    }

    fn check_hiding(&self, member: SymbolId, result: &OverriddenOrHiddenMembersResult, diagnostics: &mut DiagnosticBag) {
        let arena = self.arena();
        let symbol = arena.symbol(member);
        let location = symbol.location();
        let name = self.display_member(member);
        let Some(container) = arena.containing_type(member) else {
            return;
        };
        let container_kind = arena.type_symbol(container).kind;

        let Some(first) = result.hidden.first() else {
            if symbol.is_new() {
                diagnostics.report(diagnostic_codes::NEW_NOT_REQUIRED, &location, &[&name]);
            }
            return;
        };
        if !symbol.is_new() {
            let hidden = arena.symbol(first.symbol);
            let code = if container_kind != TypeKind::Interface && hidden.is_overridable_kind() {
                diagnostic_codes::NEW_OR_OVERRIDE_EXPECTED
            } else {
                diagnostic_codes::NEW_REQUIRED
            };
            diagnostics.report(code, &location, &[&name, &self.display_member(first.symbol)]);
        }

        let container_is_abstract_class =
            container_kind == TypeKind::Class && arena.symbol(container).is_abstract();
        if !container_is_abstract_class {
            return;
        }
        for hidden in &result.hidden {
            let hidden_symbol = arena.symbol(hidden.symbol);
            if hidden_symbol.is_abstract() && hidden_symbol.accessibility != Accessibility::Private {
                diagnostics.report(
                    diagnostic_codes::HIDING_ABSTRACT_MEMBER,
                    &location,
                    &[&name, &self.display_member(hidden.symbol)],
                );
            }
        }
    }

    fn check_override(
        &self,
        member: SymbolId,
        result: &OverriddenOrHiddenMembersResult,
        diagnostics: &mut DiagnosticBag,
    ) -> OverrideCheckOutcome {
        let arena = self.arena();
        let location = arena.symbol(member).location();
        let name = self.display_member(member);
        let mut outcome = OverrideCheckOutcome::default();

        match result.overridden.as_slice() {
            [] => {
                outcome.suppress_accessors = true;
                // A parameter that failed to bind already explains the miss.
                let interner = arena.interner();
                if arena
                    .parameters_of(member)
                    .iter()
                    .any(|&parameter| interner.contains_error(self.parameter_type(parameter).ty))
                {
                    return outcome;
                }
                outcome.reported_error = true;
                match result.hidden.first() {
                    Some(hidden) => {
                        let code = if arena.symbol(member).is_method() {
                            diagnostic_codes::CANT_OVERRIDE_NON_FUNCTION
                        } else {
                            diagnostic_codes::CANT_OVERRIDE_NON_PROPERTY
                        };
                        diagnostics.report(code, &location, &[&name, &self.display_member(hidden.symbol)]);
                    }
                    None => diagnostics.report(diagnostic_codes::OVERRIDE_NOT_EXPECTED, &location, &[&name]),
                }
            }
            [first, second, ..] => {
                outcome.failed();
                diagnostics.report(
                    diagnostic_codes::AMBIGUOUS_OVERRIDE,
                    &location,
                    &[
                        &self.display_member(first.symbol),
                        &self.display_member(second.symbol),
                        &display_type_id(arena, first.through),
                    ],
                );
            }
            [overridden] => {
                outcome = self.check_override_compatibility(member, *overridden, &location, diagnostics);
                if !outcome.suppress_accessors && arena.symbol(member).is_property() {
                    self.check_overriding_accessors(member, overridden.symbol, diagnostics);
                }
            }
        }
        outcome
    }

    fn check_override_compatibility(
        &self,
        member: SymbolId,
        overridden: InheritedMember,
        location: &SourceLocation,
        diagnostics: &mut DiagnosticBag,
    ) -> OverrideCheckOutcome {
        let arena = self.arena();
        let symbol = arena.symbol(member);
        let base = arena.symbol(overridden.symbol);
        let name = self.display_member(member);
        let base_name = self.display_member(overridden.symbol);
        let mut outcome = OverrideCheckOutcome::default();

        if self.is_bogus(overridden.symbol) {
            diagnostics.report(diagnostic_codes::CANT_OVERRIDE_BOGUS, location, &[&name, &base_name]);
            outcome.failed();
            return outcome;
        }
        if !base.is_overridable_kind() {
            diagnostics.report(diagnostic_codes::CANT_OVERRIDE_NON_VIRTUAL, location, &[&name, &base_name]);
            outcome.failed();
            return outcome;
        }
        if base.is_sealed() {
            diagnostics.report(diagnostic_codes::CANT_OVERRIDE_SEALED, location, &[&name, &base_name]);
            outcome.failed();
            return outcome;
        }
        if !self.override_accessibility_matches(member, overridden.symbol) {
            diagnostics.report(
                diagnostic_codes::CANT_CHANGE_ACCESS_ON_OVERRIDE,
                location,
                &[&name, base.accessibility.display(), &base_name],
            );
            outcome.failed();
        }

        let own = self.member_signature(member, &TypeSubstitution::new());
        let inherited = self.signature_through(overridden.symbol, overridden.through, Some(member));
        if own.ref_kind != inherited.ref_kind {
            diagnostics.report(
                diagnostic_codes::CANT_CHANGE_REF_RETURN_ON_OVERRIDE,
                location,
                &[&name, &base_name],
            );
            outcome.failed();
        }

        let interner = arena.interner();
        if interner.contains_error(own.ty.ty) || interner.contains_error(inherited.ty.ty) {
            return outcome;
        }
        let mut types_compatible = true;
        if !types_equal(arena, &own.ty, &inherited.ty, TypeCompareKind::SIGNATURE_MATCH) {
            let may_be_covariant = own.ref_kind == RefKind::None
                && match &symbol.data {
                    SymbolData::Method(_) => true,
                    SymbolData::Property(property) => property.setter.is_none(),
                    _ => false,
                };
            if may_be_covariant && self.is_covariant_return_compatible(&own.ty, &inherited.ty) {
                self.check_covariant_return_support(member, &name, &base_name, &inherited.ty, location, diagnostics);
            } else {
                let code = if symbol.is_method() {
                    diagnostic_codes::CANT_CHANGE_RETURN_TYPE_ON_OVERRIDE
                } else {
                    diagnostic_codes::CANT_CHANGE_TYPE_ON_OVERRIDE
                };
                diagnostics.report(code, location, &[&name, &base_name, &display_type(arena, &inherited.ty)]);
                outcome.failed();
                types_compatible = false;
            }
        } else if self.tuple_names_conflict(&own, &inherited) {
            diagnostics.report(
                diagnostic_codes::CANT_CHANGE_TUPLE_NAMES_ON_OVERRIDE,
                location,
                &[&name, &base_name],
            );
        }

        if types_compatible && outcome == OverrideCheckOutcome::default() && self.nullable_warnings_enabled(member) {
            self.check_override_nullability(&own, &inherited, location, diagnostics);
        }
        self.check_override_scoped(&own, &inherited, diagnostics);
        self.check_override_obsolete(member, overridden.symbol, &name, location, diagnostics);
        outcome
    }

    fn check_covariant_return_support(
        &self,
        member: SymbolId,
        name: &str,
        base_name: &str,
        base_type: &TypeWithAnnotations,
        location: &SourceLocation,
        diagnostics: &mut DiagnosticBag,
    ) {
        let options = self.options();
        if !options.runtime.covariant_returns_of_classes {
            let code = if self.arena().symbol(member).is_method() {
                diagnostic_codes::RUNTIME_DOES_NOT_SUPPORT_COVARIANT_RETURNS
            } else {
                diagnostic_codes::RUNTIME_DOES_NOT_SUPPORT_COVARIANT_PROPERTIES
            };
            diagnostics.report(code, location, &[name, base_name, &display_type(self.arena(), base_type)]);
        } else if !options.language_version.supports_covariant_returns() {
            diagnostics.report(
                diagnostic_codes::FEATURE_NOT_AVAILABLE_COVARIANT_RETURNS,
                location,
                &[options.language_version.display()],
            );
        }
    }

    /// Accessibility must be the same, except that a `protected internal`
    /// member of an assembly whose internals are not visible is overridden
    /// as `protected`.
    fn override_accessibility_matches(&self, member: SymbolId, overridden: SymbolId) -> bool {
        let arena = self.arena();
        let (mine, theirs) = (arena.symbol(member).accessibility, arena.symbol(overridden).accessibility);
        if theirs == Accessibility::ProtectedOrInternal && !self.sees_internals_of(arena.assembly_of(overridden)) {
            mine == Accessibility::Protected
        } else {
            mine == theirs
        }
    }

    fn check_override_nullability(
        &self,
        own: &MemberSignature,
        inherited: &MemberSignature,
        location: &SourceLocation,
        diagnostics: &mut DiagnosticBag,
    ) {
        let arena = self.arena();
        let mismatch = self.nullability_mismatch(own, inherited);
        if mismatch.in_type {
            let code = if arena.symbol(own.member).is_method() {
                diagnostic_codes::NULLABILITY_MISMATCH_IN_RETURN_TYPE_ON_OVERRIDE
            } else {
                diagnostic_codes::NULLABILITY_MISMATCH_IN_TYPE_ON_OVERRIDE
            };
            diagnostics.report(code, location, &[]);
        }
        for parameter in mismatch.parameters {
            diagnostics.report(
                diagnostic_codes::NULLABILITY_MISMATCH_IN_PARAMETER_TYPE_ON_OVERRIDE,
                &arena.symbol(parameter).location(),
                &[&arena.name(parameter)],
            );
        }
    }

    fn check_override_scoped(&self, own: &MemberSignature, inherited: &MemberSignature, diagnostics: &mut DiagnosticBag) {
        let arena = self.arena();
        let (mismatched, updated) = self.scoped_mismatches(own, inherited);
        let code = if updated {
            diagnostic_codes::SCOPED_MISMATCH_IN_PARAMETER_OF_OVERRIDE
        } else {
            diagnostic_codes::SCOPED_MISMATCH_IN_PARAMETER_OF_OVERRIDE_WARNING
        };
        for parameter in mismatched {
            diagnostics.report(code, &arena.symbol(parameter).location(), &[&arena.name(parameter)]);
        }
    }

    /// Obsoleteness is compared with the member that introduced the slot.
    fn check_override_obsolete(
        &self,
        member: SymbolId,
        overridden: SymbolId,
        name: &str,
        location: &SourceLocation,
        diagnostics: &mut DiagnosticBag,
    ) {
        let least = self.least_overridden_member(overridden);
        let member_obsolete = self.early_attributes(member).obsolete.is_some();
        let least_obsolete = self.early_attributes(least).obsolete.is_some();
        let code = match (member_obsolete, least_obsolete) {
            (true, false) => diagnostic_codes::OBSOLETE_OVERRIDING_NON_OBSOLETE,
            (false, true) => diagnostic_codes::NON_OBSOLETE_OVERRIDING_OBSOLETE,
            _ => return,
        };
        diagnostics.report(code, location, &[name, &self.display_member(least)]);
    }

    fn check_overriding_accessors(&self, property: SymbolId, overridden: SymbolId, diagnostics: &mut DiagnosticBag) {
        let arena = self.arena();
        let Some(container) = arena.containing_type(property) else {
            return;
        };
        let base_name = self.display_member(overridden);
        let own = arena.property(property);
        for (accessor, code) in [
            (own.getter, diagnostic_codes::NO_GET_TO_OVERRIDE),
            (own.setter, diagnostic_codes::NO_SET_TO_OVERRIDE),
        ] {
            let Some(accessor) = accessor else {
                continue;
            };
            let location = arena.symbol(accessor).location();
            let accessor_name = self.display_member(accessor);
            let Some(base_accessor) = self
                .overridden_member(accessor)
                .filter(|&base| self.is_inherited_by(base, container))
            else {
                diagnostics.report(code, &location, &[&accessor_name, &base_name]);
                continue;
            };
            if !self.override_accessibility_matches(accessor, base_accessor) {
                diagnostics.report(
                    diagnostic_codes::CANT_CHANGE_ACCESS_ON_OVERRIDE,
                    &location,
                    &[
                        &accessor_name,
                        arena.symbol(base_accessor).accessibility.display(),
                        &self.display_member(base_accessor),
                    ],
                );
            }
        }
    }

    /// Metadata members the language cannot call or override.
    pub(crate) fn is_bogus(&self, member: SymbolId) -> bool {
        match &self.arena().symbol(member).data {
            SymbolData::Method(method) => method.metadata().is_some_and(|info| info.must_call_directly),
            SymbolData::Property(property) => property.metadata().is_some_and(|info| info.must_call_directly),
            _ => false,
        }
    }
}
