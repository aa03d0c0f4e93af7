//! Declared base types and interface lists.
//!
//! Both facets bind the base list of every partial part. The first entry of a
//! class declaration is either its base class or its first interface; each
//! facet binds it and keeps the diagnostics only when the entry is its own.

use crate::compilation::Compilation;
use csz_common::limits::MAX_BASE_CHAIN_DEPTH;
use csz_common::{DiagnosticBag, SourceLocation, diagnostic_codes};
use csz_symbols::syntax::TypeSyntax;
use csz_symbols::{
    CompletionPart, SymbolId, TypeId, TypeKind, TypeSubstitution, TypeWithAnnotations, display_type_id,
    instantiate_type,
};
use indexmap::IndexSet;
use rustc_hash::FxHashSet;
use std::sync::Arc;
use tracing::debug;

impl Compilation {
    /// Direct base class. `None` for interfaces and `System.Object`.
    pub fn base_type(&self, ty: SymbolId) -> Option<TypeId> {
        let facets = self.type_facets(ty);
        *self.lazy_facet(ty, &facets.base_type, CompletionPart::FINISH_BASE_TYPE, |diagnostics| {
            self.compute_base_type(ty, diagnostics)
        })
    }

    fn compute_base_type(&self, ty: SymbolId, diagnostics: &mut DiagnosticBag) -> Option<TypeId> {
        let arena = self.arena();
        let symbol = arena.type_symbol(ty);
        if let Some(info) = symbol.metadata() {
            return info.base;
        }
        let core = arena.core();
        match symbol.kind {
            TypeKind::Interface => return None,
            TypeKind::Struct => return Some(arena.declared_type(core.value_type)),
            TypeKind::Enum => return Some(arena.declared_type(core.enum_)),
            TypeKind::Delegate => return Some(TypeId::OBJECT),
            TypeKind::Class => {}
        }
        let Some((base, location, binding)) = self.class_base_entry(ty) else {
            return Some(TypeId::OBJECT);
        };
        diagnostics.extend(binding);
        if base.is_error() {
            return Some(TypeId::OBJECT);
        }

        let type_name = display_type_id(arena, symbol.declared_type);
        let base_name = display_type_id(arena, base);
        if let Some(base_symbol) = arena.type_symbol_of(base) {
            let sealed = arena.symbol(base_symbol).is_sealed()
                || matches!(
                    arena.type_symbol(base_symbol).kind,
                    TypeKind::Struct | TypeKind::Enum | TypeKind::Delegate
                );
            if sealed {
                diagnostics.report(
                    diagnostic_codes::CANNOT_DERIVE_FROM_SEALED,
                    &location,
                    &[&type_name, &base_name],
                );
                return Some(TypeId::OBJECT);
            }
        }
        if self.base_chain_reaches(base, ty) {
            debug!(ty = ty.0, base = %base_name, "base_type: circular base");
            diagnostics.report(diagnostic_codes::CIRCULAR_BASE, &location, &[&type_name, &base_name]);
            return Some(TypeId::OBJECT);
        }
        Some(base)
    }

    /// The first base-list entry of a class part that names a class, bound
    /// into its own bag. Error types count so their diagnostics have an owner.
    fn class_base_entry(&self, ty: SymbolId) -> Option<(TypeId, SourceLocation, DiagnosticBag)> {
        let arena = self.arena();
        let symbol = arena.type_symbol(ty);
        if symbol.kind != TypeKind::Class {
            return None;
        }
        symbol.declarations().iter().find_map(|part| {
            let first = part.base_list.first()?;
            let (bound, bag) = self.bind_base_entry(ty, first);
            self.is_base_class_candidate(bound)
                .then(|| (bound, first.location().clone(), bag))
        })
    }

    fn is_base_class_candidate(&self, ty: TypeId) -> bool {
        ty.is_error()
            || self
                .arena()
                .type_kind_of(ty)
                .is_some_and(|kind| kind != TypeKind::Interface)
    }

    fn bind_base_entry(&self, ty: SymbolId, syntax: &TypeSyntax) -> (TypeId, DiagnosticBag) {
        let mut bag = DiagnosticBag::new();
        let bound = self.binder().bind_type(&self.binding_context(ty), syntax, &mut bag);
        (bound.ty, bag)
    }

    /// Base named in syntax or metadata, without consulting any facet.
    fn raw_base_type(&self, ty: SymbolId) -> Option<TypeId> {
        match self.arena().type_symbol(ty).metadata() {
            Some(info) => info.base,
            None => self
                .class_base_entry(ty)
                .map(|(base, _, _)| base)
                .filter(|base| !base.is_error()),
        }
    }

    fn base_chain_reaches(&self, start: TypeId, target: SymbolId) -> bool {
        let arena = self.arena();
        let mut current = start;
        for _ in 0..MAX_BASE_CHAIN_DEPTH {
            let Some(symbol) = arena.type_symbol_of(current) else {
                return false;
            };
            if symbol == target {
                return true;
            }
            match self.raw_base_type(symbol) {
                Some(next) => current = next,
                None => return false,
            }
        }
        false
    }

    // -------------------------------------------------------------------------
    // Interfaces
    // -------------------------------------------------------------------------

    /// Interfaces named in the base lists of every part, deduplicated.
    pub fn interfaces(&self, ty: SymbolId) -> &Arc<[TypeId]> {
        let facets = self.type_facets(ty);
        self.lazy_facet(ty, &facets.interfaces, CompletionPart::FINISH_INTERFACES, |diagnostics| {
            self.compute_interfaces(ty, diagnostics)
        })
    }

    fn compute_interfaces(&self, ty: SymbolId, diagnostics: &mut DiagnosticBag) -> Arc<[TypeId]> {
        let arena = self.arena();
        let symbol = arena.type_symbol(ty);
        if let Some(info) = symbol.metadata() {
            return info.interfaces.iter().copied().collect();
        }
        let mut result: IndexSet<TypeId> = IndexSet::new();
        for part in symbol.declarations() {
            let mut in_part: FxHashSet<TypeId> = FxHashSet::default();
            for (index, entry) in part.base_list.iter().enumerate() {
                let (bound, bag) = self.bind_base_entry(ty, entry);
                if index == 0 && symbol.kind == TypeKind::Class && self.is_base_class_candidate(bound) {
                    continue;
                }
                diagnostics.extend(bag);
                if bound.is_error() {
                    continue;
                }
                let location = entry.location();
                if !arena.is_interface_type(bound) {
                    diagnostics.report(
                        diagnostic_codes::NOT_AN_INTERFACE,
                        location,
                        &[&display_type_id(arena, bound)],
                    );
                    continue;
                }
                if !in_part.insert(bound) {
                    diagnostics.report(
                        diagnostic_codes::DUPLICATE_INTERFACE_IN_BASE_LIST,
                        location,
                        &[&display_type_id(arena, bound)],
                    );
                    continue;
                }
                if symbol.kind == TypeKind::Interface
                    && self.interface_reaches(bound, ty, &mut FxHashSet::default(), 0)
                {
                    diagnostics.report(
                        diagnostic_codes::CIRCULAR_BASE,
                        location,
                        &[
                            &display_type_id(arena, symbol.declared_type),
                            &display_type_id(arena, bound),
                        ],
                    );
                    continue;
                }
                result.insert(bound);
            }
        }
        result.into_iter().collect()
    }

    /// Interfaces a type names, without consulting any facet.
    fn raw_interfaces(&self, ty: SymbolId) -> Vec<TypeId> {
        let arena = self.arena();
        let symbol = arena.type_symbol(ty);
        if let Some(info) = symbol.metadata() {
            return info.interfaces.clone();
        }
        symbol
            .declarations()
            .iter()
            .flat_map(|part| part.base_list.iter())
            .map(|entry| self.bind_base_entry(ty, entry).0)
            .filter(|bound| arena.is_interface_type(*bound))
            .collect()
    }

    fn interface_reaches(&self, from: TypeId, target: SymbolId, visited: &mut FxHashSet<SymbolId>, depth: usize) -> bool {
        let Some(symbol) = self.arena().type_symbol_of(from) else {
            return false;
        };
        if symbol == target {
            return true;
        }
        if depth >= MAX_BASE_CHAIN_DEPTH || !visited.insert(symbol) {
            return false;
        }
        self.raw_interfaces(symbol)
            .into_iter()
            .any(|next| self.interface_reaches(next, target, visited, depth + 1))
    }

    /// Every interface `ty` implements: its own declared interfaces with
    /// their bases, then those inherited from the base class.
    pub fn all_interfaces(&self, ty: SymbolId) -> &Arc<[TypeId]> {
        let facets = self.type_facets(ty);
        self.lazy_value(&facets.all_interfaces, || {
            let mut all: IndexSet<TypeId> = IndexSet::new();
            for &interface in self.interfaces(ty).iter() {
                all.insert(interface);
                all.extend(self.all_interfaces_of(interface));
            }
            if let Some(base) = self.base_type(ty) {
                all.extend(self.all_interfaces_of(base));
            }
            all.into_iter().collect()
        })
    }

    /// [`Compilation::all_interfaces`] of a constructed type.
    pub fn all_interfaces_of(&self, ty: TypeId) -> Vec<TypeId> {
        let Some(symbol) = self.arena().type_symbol_of(ty) else {
            return Vec::new();
        };
        let substitution = self.construction_substitution(ty);
        self.all_interfaces(symbol)
            .iter()
            .map(|interface| self.substitute_type_id(*interface, &substitution))
            .collect()
    }

    /// Substitution that views members of a type's definition through `ty`.
    pub fn construction_substitution(&self, ty: TypeId) -> TypeSubstitution {
        let arena = self.arena();
        match arena.type_symbol_of(ty) {
            Some(symbol) => TypeSubstitution::for_construction(
                arena.interner(),
                &arena.type_symbol(symbol).type_parameters,
                ty,
            ),
            None => TypeSubstitution::new(),
        }
    }

    pub(crate) fn substitute_type_id(&self, ty: TypeId, substitution: &TypeSubstitution) -> TypeId {
        if substitution.is_empty() {
            return ty;
        }
        instantiate_type(self.arena().interner(), &TypeWithAnnotations::oblivious(ty), substitution).ty
    }

    /// Constructed base classes of `ty`, nearest first.
    pub fn base_types_of(&self, ty: TypeId) -> Vec<TypeId> {
        let arena = self.arena();
        let mut chain = Vec::new();
        let mut current = ty;
        while chain.len() < MAX_BASE_CHAIN_DEPTH {
            let Some(symbol) = arena.type_symbol_of(current) else {
                break;
            };
            let Some(base) = self.base_type(symbol) else {
                break;
            };
            let base = self.substitute_type_id(base, &self.construction_substitution(current));
            chain.push(base);
            current = base;
        }
        chain
    }

    /// Whether `ty` or one of its base classes is `ancestor`'s definition.
    pub(crate) fn derives_from_symbol(&self, ty: TypeId, ancestor: SymbolId) -> bool {
        let arena = self.arena();
        std::iter::once(ty)
            .chain(self.base_types_of(ty))
            .any(|current| arena.type_symbol_of(current) == Some(ancestor))
    }
}

#[cfg(test)]
#[path = "tests/bases_tests.rs"]
mod tests;
