//! Interface implementation lookup.
//!
//! An interface member is implemented, on the most derived type in the base
//! chain that declares the interface or on one of its bases, by an explicit
//! implementation first and a public same-signature member otherwise. A
//! non-abstract interface member is its own (default) implementation.
//!
//! Static members are only looked up on that one declaring type; the runtime
//! has no inherited dispatch for them.
//!
//! [`explicit`] binds `I.M` declarations, [`synthesized`] reconciles the
//! results with what the runtime will accept and reports on them.

mod checks;
mod explicit;
mod synthesized;

pub use explicit::ExplicitImplementation;
pub use synthesized::{ClrImplementationAction, SynthesizedExplicitImplementations, SynthesizedForwardingMethod};

use crate::compilation::Compilation;
use crate::signatures::MemberSignature;
use csz_symbols::{Accessibility, RefKind, SymbolData, SymbolId, TypeCompareKind, TypeId, types_equal};
use smallvec::SmallVec;
use std::sync::atomic::Ordering;
use tracing::trace;

/// Same-signature members found on one type.
#[derive(Debug, Default)]
pub(crate) struct ImplicitLookup {
    pub(crate) implementation: Option<SymbolId>,
    /// Other members the runtime would also match, differing only in
    /// `ref`/`out`.
    pub(crate) runtime_ambiguous: SmallVec<[SymbolId; 1]>,
    /// First same-signature member rejected for accessibility, static-ness,
    /// return type or accessors.
    pub(crate) close_mismatch: Option<SymbolId>,
}

impl Compilation {
    /// Member of `ty` (or its bases) implementing `member` of the constructed
    /// `interface`.
    pub fn implementing_member(&self, ty: SymbolId, interface: TypeId, member: SymbolId) -> Option<SymbolId> {
        let key = (ty, interface, member);
        if let Some(found) = self.implementations.get(&key) {
            return *found;
        }
        let found = self.find_implementation(ty, interface, member);
        trace!(
            ty = ty.0,
            interface = interface.0,
            member = member.0,
            found = ?found.map(|symbol| symbol.0),
            "implementing_member"
        );
        *self.implementations.entry(key).or_insert(found)
    }

    fn find_implementation(&self, ty: SymbolId, interface: TypeId, member: SymbolId) -> Option<SymbolId> {
        let arena = self.arena();
        let levels = self.implementation_levels(ty, interface);
        let searched = if arena.symbol(member).is_static() {
            &levels[..levels.len().min(1)]
        } else {
            &levels[..]
        };
        for &level in searched {
            if let Some(explicit) = self.explicit_implementation_on(level, interface, member) {
                return Some(explicit);
            }
            if let Some(implicit) = self.implicit_lookup(level, interface, member).implementation {
                return Some(implicit);
            }
        }
        self.default_implementation(member)
    }

    /// `ty` and its constructed bases, starting at the most derived one that
    /// declares `interface` itself.
    pub(crate) fn implementation_levels(&self, ty: SymbolId, interface: TypeId) -> Vec<TypeId> {
        let declared = self.arena().declared_type(ty);
        let chain: Vec<TypeId> = std::iter::once(declared).chain(self.base_types_of(declared)).collect();
        let start = chain
            .iter()
            .position(|&level| self.declares_interface(level, interface))
            .unwrap_or(0);
        chain[start..].to_vec()
    }

    /// Whether the base list of `level` names `interface` or an interface
    /// deriving from it.
    pub(crate) fn declares_interface(&self, level: TypeId, interface: TypeId) -> bool {
        let Some(symbol) = self.arena().type_symbol_of(level) else {
            return false;
        };
        let substitution = self.construction_substitution(level);
        self.interfaces(symbol).iter().any(|&declared| {
            let declared = self.substitute_type_id(declared, &substitution);
            self.same_type(declared, interface) || self.implements_interface(declared, interface)
        })
    }

    fn explicit_implementation_on(&self, level: TypeId, interface: TypeId, member: SymbolId) -> Option<SymbolId> {
        let arena = self.arena();
        let symbol = arena.type_symbol_of(level)?;
        let substitution = self.construction_substitution(level);
        arena.members(symbol).iter().copied().find(|&candidate| {
            self.is_explicit_member(candidate)
                && self.explicit_implementation(candidate).is_some_and(|implemented| {
                    implemented.member == member
                        && self.same_type(self.substitute_type_id(implemented.interface, &substitution), interface)
                })
        })
    }

    /// Methods and properties written as `I.M`; accessors are not counted.
    pub(crate) fn is_explicit_member(&self, symbol: SymbolId) -> bool {
        match &self.arena().symbol(symbol).data {
            SymbolData::Method(method) => !method.kind.is_accessor() && method.is_explicit_interface_implementation(),
            SymbolData::Property(property) => property.is_explicit_interface_implementation(),
            _ => false,
        }
    }

    pub(crate) fn implicit_lookup(&self, level: TypeId, interface: TypeId, member: SymbolId) -> ImplicitLookup {
        let arena = self.arena();
        let mut lookup = ImplicitLookup::default();
        let Some(symbol) = arena.type_symbol_of(level) else {
            return lookup;
        };
        let wanted = self.signature_through(member, interface, None);
        let mut runtime_matches: SmallVec<[SymbolId; 2]> = SmallVec::new();
        for &candidate in arena.members_named(symbol, arena.symbol(member).name) {
            if !self.same_member_kind(candidate, member) || self.is_explicit_member(candidate) {
                continue;
            }
            let signature = self.signature_through(candidate, level, Some(member));
            if !self.parameters_match(&signature, &wanted, TypeCompareKind::SIGNATURE_MATCH) {
                if self.runtime_parameters_match(&signature, &wanted) {
                    runtime_matches.push(candidate);
                }
                continue;
            }
            if lookup.implementation.is_none() && self.is_valid_implementation(candidate, member, &signature, &wanted) {
                lookup.implementation = Some(candidate);
            } else if lookup.close_mismatch.is_none() {
                lookup.close_mismatch = Some(candidate);
            }
        }
        if lookup.implementation.is_some() {
            lookup.runtime_ambiguous = runtime_matches.into_iter().collect();
        }
        lookup
    }

    /// Parameter lists the runtime cannot tell apart: `ref` and `out` are the
    /// same by-reference type there.
    fn runtime_parameters_match(&self, left: &MemberSignature, right: &MemberSignature) -> bool {
        let by_ref = |kind: RefKind| kind != RefKind::None;
        left.type_parameters == right.type_parameters
            && left.parameters.len() == right.parameters.len()
            && left.parameters.iter().zip(&right.parameters).all(|(l, r)| {
                by_ref(l.ref_kind) == by_ref(r.ref_kind)
                    && types_equal(self.arena(), &l.ty, &r.ty, TypeCompareKind::SIGNATURE_MATCH)
            })
    }

    /// A same-signature member that can stand in for `member`: public, of the
    /// same static-ness, with the same return and the accessors it needs.
    fn is_valid_implementation(
        &self,
        candidate: SymbolId,
        member: SymbolId,
        signature: &MemberSignature,
        wanted: &MemberSignature,
    ) -> bool {
        let arena = self.arena();
        let (implementing, implemented) = (arena.symbol(candidate), arena.symbol(member));
        if implementing.accessibility != Accessibility::Public
            || implementing.is_static() != implemented.is_static()
            || signature.ref_kind != wanted.ref_kind
            || !types_equal(arena, &signature.ty, &wanted.ty, TypeCompareKind::SIGNATURE_MATCH)
        {
            return false;
        }
        match (implementing.as_property(), implemented.as_property()) {
            (Some(mine), Some(theirs)) => {
                (theirs.getter.is_none() || mine.getter.is_some()) && (theirs.setter.is_none() || mine.setter.is_some())
            }
            _ => true,
        }
    }

    /// A default interface member implements itself.
    fn default_implementation(&self, member: SymbolId) -> Option<SymbolId> {
        let symbol = self.arena().symbol(member);
        (!symbol.is_abstract() && symbol.is_virtual()).then_some(member)
    }

    /// Whether `method` is virtual in emitted metadata, including methods
    /// made virtual to implement an interface member.
    ///
    /// Flags are set as types complete; the answer is final once every
    /// source type has been completed.
    pub fn is_metadata_virtual(&self, method: SymbolId) -> bool {
        self.declared_metadata_virtual(method) || self.member_facets(method).forced_metadata_virtual.load(Ordering::Acquire)
    }

    pub(crate) fn declared_metadata_virtual(&self, method: SymbolId) -> bool {
        let symbol = self.arena().symbol(method);
        match symbol.as_method().and_then(|m| m.metadata()) {
            Some(info) => info.is_metadata_virtual,
            None => symbol.is_overridable_kind(),
        }
    }
}

#[cfg(test)]
#[path = "../tests/interfaces_tests.rs"]
mod tests;
