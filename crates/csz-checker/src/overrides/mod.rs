//! Override and hiding resolution.
//!
//! For every method and property the nearest base class that declares a
//! member of the same name decides what happens: a same-signature member
//! there is overridden (when the member says `override`) or hidden
//! (otherwise). Interface members hide same-signature members of every base
//! interface. Accessors take their result from the property they belong to.
//!
//! Resolution is a pure function of declarations and produces no
//! diagnostics; [`checks`] reports on the result.

mod checks;

pub use checks::OverrideCheckOutcome;

use crate::compilation::Compilation;
use crate::signatures::MemberSignature;
use csz_common::limits::MAX_BASE_CHAIN_DEPTH;
use csz_symbols::{
    Accessibility, AssemblyId, MethodKind, SymbolData, SymbolId, TypeCompareKind, TypeId, TypeKind,
    TypeSubstitution,
};
use smallvec::SmallVec;
use std::sync::Arc;
use tracing::trace;

/// A member of a base type together with the construction it was found
/// through (`Base<int>` for a member of `Base<T>`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InheritedMember {
    pub symbol: SymbolId,
    pub through: TypeId,
}

/// What one member overrides and hides.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OverriddenOrHiddenMembersResult {
    /// More than one entry means the override is ambiguous.
    pub overridden: SmallVec<[InheritedMember; 1]>,
    pub hidden: SmallVec<[InheritedMember; 2]>,
}

impl OverriddenOrHiddenMembersResult {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The overridden member when there is exactly one.
    pub fn overridden_member(&self) -> Option<InheritedMember> {
        match self.overridden.as_slice() {
            [single] => Some(*single),
            _ => None,
        }
    }

    pub fn is_ambiguous(&self) -> bool {
        self.overridden.len() > 1
    }
}

impl Compilation {
    /// Members overridden and hidden by `member`.
    pub fn overridden_or_hidden_members(&self, member: SymbolId) -> &Arc<OverriddenOrHiddenMembersResult> {
        let facets = self.member_facets(member);
        self.lazy_value(&facets.overridden, || Arc::new(self.resolve_overridden_or_hidden(member)))
    }

    /// The single member `member` overrides, if any.
    pub fn overridden_member(&self, member: SymbolId) -> Option<SymbolId> {
        self.overridden_or_hidden_members(member)
            .overridden_member()
            .map(|inherited| inherited.symbol)
    }

    /// End of the override chain starting at `member`: the virtual or
    /// abstract member that introduced the slot.
    pub fn least_overridden_member(&self, member: SymbolId) -> SymbolId {
        let mut current = member;
        for _ in 0..MAX_BASE_CHAIN_DEPTH {
            if !self.arena().symbol(current).is_override() {
                break;
            }
            match self.overridden_member(current) {
                Some(next) => current = next,
                None => break,
            }
        }
        current
    }

    /// `member` and everything it overrides, nearest first.
    pub(crate) fn override_chain(&self, member: SymbolId) -> SmallVec<[SymbolId; 4]> {
        let mut chain = SmallVec::new();
        let mut current = member;
        chain.push(current);
        while chain.len() <= MAX_BASE_CHAIN_DEPTH && self.arena().symbol(current).is_override() {
            match self.overridden_member(current) {
                Some(next) => {
                    chain.push(next);
                    current = next;
                }
                None => break,
            }
        }
        chain
    }

    fn resolve_overridden_or_hidden(&self, member: SymbolId) -> OverriddenOrHiddenMembersResult {
        let arena = self.arena();
        let symbol = arena.symbol(member);
        let Some(container) = arena.containing_type(member) else {
            return OverriddenOrHiddenMembersResult::empty();
        };
        if let Some(method) = symbol.as_method() {
            if method.kind.is_operator() || method.is_explicit_interface_implementation() {
                return OverriddenOrHiddenMembersResult::empty();
            }
            if method.kind.is_accessor() {
                return self.resolve_accessor(member, method.kind, method.associated_property);
            }
        }
        if symbol
            .as_property()
            .is_some_and(|property| property.is_explicit_interface_implementation())
        {
            return OverriddenOrHiddenMembersResult::empty();
        }

        let signature = self.member_signature(member, &TypeSubstitution::new());
        let result = if arena.type_symbol(container).kind == TypeKind::Interface {
            self.resolve_in_base_interfaces(member, container, &signature)
        } else {
            self.resolve_in_base_classes(member, container, &signature)
        };
        trace!(
            member = member.0,
            overridden = result.overridden.len(),
            hidden = result.hidden.len(),
            "overridden_or_hidden_members"
        );
        result
    }

    fn resolve_in_base_classes(
        &self,
        member: SymbolId,
        container: SymbolId,
        signature: &MemberSignature,
    ) -> OverriddenOrHiddenMembersResult {
        let arena = self.arena();
        let is_override = arena.symbol(member).is_override();
        let mut result = OverriddenOrHiddenMembersResult::empty();
        for through in self.base_types_of(arena.declared_type(container)) {
            let Some(base) = arena.type_symbol_of(through) else {
                break;
            };
            let same_name: SmallVec<[SymbolId; 4]> = arena
                .members_named(base, arena.symbol(member).name)
                .iter()
                .copied()
                .filter(|&candidate| self.is_inherited_by(candidate, container))
                .filter(|&candidate| !self.is_accessor_or_operator(candidate))
                .collect();
            if same_name.is_empty() {
                continue;
            }
            let matches: SmallVec<[InheritedMember; 2]> = same_name
                .iter()
                .copied()
                .filter(|&candidate| self.same_member_kind(member, candidate))
                .filter(|&candidate| {
                    let candidate_signature = self.signature_through(candidate, through, Some(member));
                    self.parameters_match(signature, &candidate_signature, TypeCompareKind::SIGNATURE_MATCH)
                })
                .map(|symbol| InheritedMember { symbol, through })
                .collect();
            if !matches.is_empty() {
                if is_override {
                    result.overridden.extend(matches);
                } else {
                    result.hidden.extend(matches);
                }
                return result;
            }
            // Overloads of a different signature do not hide; anything of
            // another kind does.
            let others: SmallVec<[InheritedMember; 2]> = same_name
                .iter()
                .copied()
                .filter(|&candidate| self.hides_by_name(member, candidate))
                .map(|symbol| InheritedMember { symbol, through })
                .collect();
            if !others.is_empty() {
                result.hidden.extend(others);
                return result;
            }
        }
        result
    }

    fn resolve_in_base_interfaces(
        &self,
        member: SymbolId,
        container: SymbolId,
        signature: &MemberSignature,
    ) -> OverriddenOrHiddenMembersResult {
        let arena = self.arena();
        let name = arena.symbol(member).name;
        let mut result = OverriddenOrHiddenMembersResult::empty();
        for through in self.all_interfaces_of(arena.declared_type(container)) {
            let Some(interface) = arena.type_symbol_of(through) else {
                continue;
            };
            for &candidate in arena.members_named(interface, name) {
                if self.is_accessor_or_operator(candidate) {
                    continue;
                }
                let hides = if self.same_member_kind(member, candidate) {
                    let candidate_signature = self.signature_through(candidate, through, Some(member));
                    self.parameters_match(signature, &candidate_signature, TypeCompareKind::SIGNATURE_MATCH)
                } else {
                    self.hides_by_name(member, candidate)
                };
                if hides {
                    result.hidden.push(InheritedMember { symbol: candidate, through });
                }
            }
        }
        result
    }

    /// Accessors override the same accessor of the property their property
    /// overrides, looking further up when that property lacks it.
    fn resolve_accessor(
        &self,
        accessor: SymbolId,
        kind: MethodKind,
        property: Option<SymbolId>,
    ) -> OverriddenOrHiddenMembersResult {
        let mut result = OverriddenOrHiddenMembersResult::empty();
        let Some(property) = property else {
            return result;
        };
        if !self.arena().symbol(accessor).is_override() && !self.arena().symbol(property).is_override() {
            return result;
        }
        let Some(mut overridden) = self.overridden_or_hidden_members(property).overridden_member() else {
            return result;
        };
        for _ in 0..MAX_BASE_CHAIN_DEPTH {
            if let Some(found) = self.accessor_of(overridden.symbol, kind) {
                result.overridden.push(InheritedMember {
                    symbol: found,
                    through: overridden.through,
                });
                break;
            }
            match self.overridden_or_hidden_members(overridden.symbol).overridden_member() {
                Some(next) => overridden = next,
                None => break,
            }
        }
        result
    }

    pub(crate) fn accessor_of(&self, property: SymbolId, kind: MethodKind) -> Option<SymbolId> {
        let property = self.arena().property(property);
        match kind {
            MethodKind::PropertyGet => property.getter,
            MethodKind::PropertySet => property.setter,
            _ => None,
        }
    }

    fn is_accessor_or_operator(&self, symbol: SymbolId) -> bool {
        match &self.arena().symbol(symbol).data {
            SymbolData::Method(method) => method.kind.is_accessor() || method.kind.is_operator(),
            SymbolData::Property(_) => false,
            _ => true,
        }
    }

    /// Whether a member of another kind, or a property of any signature,
    /// with the same name is hidden by `member`.
    fn hides_by_name(&self, member: SymbolId, candidate: SymbolId) -> bool {
        let arena = self.arena();
        match (&arena.symbol(member).data, &arena.symbol(candidate).data) {
            (SymbolData::Method(_), SymbolData::Method(_)) => false,
            (SymbolData::Property(mine), SymbolData::Property(theirs)) => !mine.is_indexer && !theirs.is_indexer,
            _ => true,
        }
    }

    /// Whether `candidate`, declared on a base of `derived`, is visible in
    /// `derived` at all.
    pub(crate) fn is_inherited_by(&self, candidate: SymbolId, derived: SymbolId) -> bool {
        let arena = self.arena();
        match arena.symbol(candidate).accessibility {
            Accessibility::Private => false,
            Accessibility::Internal | Accessibility::ProtectedAndInternal => {
                arena.has_internal_access(arena.assembly_of(derived), arena.assembly_of(candidate))
            }
            _ => true,
        }
    }

    /// Whether the compilation being checked sees internals of `assembly`.
    pub(crate) fn sees_internals_of(&self, assembly: AssemblyId) -> bool {
        self.arena().has_internal_access(AssemblyId::SOURCE, assembly)
    }
}

#[cfg(test)]
#[path = "../tests/overrides_tests.rs"]
mod tests;
