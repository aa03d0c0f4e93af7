//! Type interning for structural deduplication.
//!
//! Structurally equal types share one `TypeId`, so type identity checks are
//! integer comparisons. The interner is shared by every thread completing
//! symbols: lookups take a read lock on the id table, inserts go through the
//! `DashMap` entry API so two threads interning the same structure agree on
//! a single id.

use crate::symbol::SymbolId;
use crate::types::{IntrinsicKind, NullableAnnotation, TypeData, TypeId, TypeWithAnnotations};
use csz_common::{Atom, ShardedInterner};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use rustc_hash::FxBuildHasher;
use std::sync::{Arc, RwLock};
use tracing::trace;

pub struct TypeInterner {
    strings: ShardedInterner,
    ids: DashMap<TypeData, TypeId, FxBuildHasher>,
    types: RwLock<Vec<Arc<TypeData>>>,
}

impl TypeInterner {
    /// Create an interner with every intrinsic pre-registered at its fixed id.
    pub fn new() -> Self {
        let interner = TypeInterner {
            strings: ShardedInterner::new(),
            ids: DashMap::with_hasher(FxBuildHasher),
            types: RwLock::new(Vec::with_capacity(256)),
        };
        for kind in IntrinsicKind::ALL {
            let id = interner.intern(TypeData::Intrinsic(kind));
            debug_assert_eq!(id, kind.type_id());
        }
        interner
    }

    pub fn intern(&self, data: TypeData) -> TypeId {
        if let Some(id) = self.ids.get(&data) {
            return *id;
        }
        match self.ids.entry(data) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                let mut types = self.types.write().expect("type table lock poisoned");
                let id = TypeId(types.len() as u32);
                types.push(Arc::new(entry.key().clone()));
                trace!(type_id = id.0, "TypeInterner::intern");
                entry.insert(id);
                id
            }
        }
    }

    /// Structural data for `id`. Unknown ids read as the error type.
    pub fn lookup(&self, id: TypeId) -> Arc<TypeData> {
        let types = self.types.read().expect("type table lock poisoned");
        match types.get(id.0 as usize) {
            Some(data) => Arc::clone(data),
            None => Arc::clone(&types[TypeId::ERROR.0 as usize]),
        }
    }

    pub fn len(&self) -> usize {
        self.types.read().expect("type table lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // =========================================================================
    // Constructors
    // =========================================================================

    pub fn named(&self, symbol: SymbolId, type_args: Vec<TypeWithAnnotations>) -> TypeId {
        self.intern(TypeData::Named { symbol, type_args })
    }

    pub fn type_parameter(&self, symbol: SymbolId) -> TypeId {
        self.intern(TypeData::TypeParameter(symbol))
    }

    pub fn nullable_value_type(&self, underlying: TypeId) -> TypeId {
        self.intern(TypeData::Nullable(underlying))
    }

    pub fn array(&self, element: TypeWithAnnotations, rank: u8) -> TypeId {
        self.intern(TypeData::Array {
            element: Box::new(element),
            rank: rank.max(1),
        })
    }

    pub fn tuple(
        &self,
        elements: Vec<TypeWithAnnotations>,
        names: Option<Vec<Option<Atom>>>,
    ) -> TypeId {
        // A name list without any names is the same tuple as no list.
        let names = names.filter(|names| names.iter().any(Option::is_some));
        self.intern(TypeData::Tuple { elements, names })
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn intrinsic_kind(&self, id: TypeId) -> Option<IntrinsicKind> {
        match &*self.lookup(id) {
            TypeData::Intrinsic(kind) => Some(*kind),
            _ => None,
        }
    }

    pub fn named_symbol(&self, id: TypeId) -> Option<SymbolId> {
        match &*self.lookup(id) {
            TypeData::Named { symbol, .. } => Some(*symbol),
            _ => None,
        }
    }

    pub fn type_parameter_symbol(&self, id: TypeId) -> Option<SymbolId> {
        match &*self.lookup(id) {
            TypeData::TypeParameter(symbol) => Some(*symbol),
            _ => None,
        }
    }

    pub fn is_type_parameter(&self, id: TypeId) -> bool {
        matches!(&*self.lookup(id), TypeData::TypeParameter(_))
    }

    pub fn is_dynamic(&self, id: TypeId) -> bool {
        id == TypeId::DYNAMIC
    }

    /// `T?` over a value type unwraps to `T`; everything else is unchanged.
    pub fn strip_nullable(&self, id: TypeId) -> TypeId {
        match &*self.lookup(id) {
            TypeData::Nullable(underlying) => *underlying,
            _ => id,
        }
    }

    pub fn is_nullable_value_type(&self, id: TypeId) -> bool {
        matches!(&*self.lookup(id), TypeData::Nullable(_))
    }

    /// True if the error type appears anywhere inside `id`.
    pub fn contains_error(&self, id: TypeId) -> bool {
        if id.is_error() {
            return true;
        }
        match &*self.lookup(id) {
            TypeData::Intrinsic(_) | TypeData::TypeParameter(_) => false,
            TypeData::Named { type_args, .. } => {
                type_args.iter().any(|arg| self.contains_error(arg.ty))
            }
            TypeData::Nullable(underlying) => self.contains_error(*underlying),
            TypeData::Array { element, .. } => self.contains_error(element.ty),
            TypeData::Tuple { elements, .. } => {
                elements.iter().any(|element| self.contains_error(element.ty))
            }
        }
    }

    /// Drop tuple element names at every level.
    pub fn erase_tuple_names(&self, id: TypeId) -> TypeId {
        match &*self.lookup(id) {
            TypeData::Intrinsic(_) | TypeData::TypeParameter(_) => id,
            TypeData::Named { symbol, type_args } => {
                let args = type_args
                    .iter()
                    .map(|arg| self.erase_tuple_names_with_annotations(arg))
                    .collect();
                self.named(*symbol, args)
            }
            TypeData::Nullable(underlying) => {
                let underlying = self.erase_tuple_names(*underlying);
                self.nullable_value_type(underlying)
            }
            TypeData::Array { element, rank } => {
                self.array(self.erase_tuple_names_with_annotations(element), *rank)
            }
            TypeData::Tuple { elements, .. } => {
                let elements = elements
                    .iter()
                    .map(|element| self.erase_tuple_names_with_annotations(element))
                    .collect();
                self.tuple(elements, None)
            }
        }
    }

    pub fn erase_tuple_names_with_annotations(
        &self,
        ty: &TypeWithAnnotations,
    ) -> TypeWithAnnotations {
        TypeWithAnnotations {
            ty: self.erase_tuple_names(ty.ty),
            annotation: ty.annotation,
            custom_modifiers: ty.custom_modifiers.clone(),
        }
    }

    /// Rebuild `id` with every nested annotation set to `annotation` and
    /// every custom modifier removed. Two types are equal ignoring
    /// nullability and modifiers when their erasures are the same id.
    pub fn erase_annotations(&self, id: TypeId) -> TypeId {
        self.erase_annotations_to(id, NullableAnnotation::Oblivious)
    }

    fn erase_annotations_to(&self, id: TypeId, annotation: NullableAnnotation) -> TypeId {
        let erase = |arg: &TypeWithAnnotations| TypeWithAnnotations {
            ty: self.erase_annotations_to(arg.ty, annotation),
            annotation,
            custom_modifiers: Vec::new(),
        };
        match &*self.lookup(id) {
            TypeData::Intrinsic(_) | TypeData::TypeParameter(_) => id,
            TypeData::Named { symbol, type_args } => {
                self.named(*symbol, type_args.iter().map(erase).collect())
            }
            TypeData::Nullable(underlying) => {
                let underlying = self.erase_annotations_to(*underlying, annotation);
                self.nullable_value_type(underlying)
            }
            TypeData::Array { element, rank } => self.array(erase(element), *rank),
            TypeData::Tuple { elements, names } => {
                self.tuple(elements.iter().map(erase).collect(), names.clone())
            }
        }
    }

    // =========================================================================
    // Names
    // =========================================================================

    pub fn intern_string(&self, s: &str) -> Atom {
        self.strings.intern(s)
    }

    pub fn lookup_string(&self, s: &str) -> Option<Atom> {
        self.strings.lookup(s)
    }

    pub fn resolve_atom(&self, atom: Atom) -> Arc<str> {
        self.strings.resolve(atom)
    }

    pub fn strings(&self) -> &ShardedInterner {
        &self.strings
    }
}

impl Default for TypeInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TypeInterner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeInterner")
            .field("types", &self.len())
            .field("strings", &self.strings.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/intern_tests.rs"]
mod tests;
