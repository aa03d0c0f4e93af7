//! Structural type relations used by signature comparison.
//!
//! Two kinds of question are answered here:
//! - identity under a set of ignored differences ([`TypeCompareKind`]), used
//!   to match overrides and implementations against their targets;
//! - top-level and nested nullability compatibility, used to warn when an
//!   override or implementation changes nullability in an unsafe direction.

use crate::arena::SymbolArena;
use crate::types::{NullableAnnotation, TypeData, TypeId, TypeWithAnnotations, VarianceKind};
use bitflags::bitflags;
use csz_common::limits::MAX_TYPE_NESTING_DEPTH;

bitflags! {
    /// Differences to ignore when comparing types for identity.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct TypeCompareKind: u32 {
        const IGNORE_CUSTOM_MODIFIERS = 1 << 0;
        const IGNORE_NULLABILITY = 1 << 1;
        const IGNORE_TUPLE_NAMES = 1 << 2;
        /// `object` and `dynamic` compare equal.
        const IGNORE_DYNAMIC = 1 << 3;

        /// Differences that never make two signatures distinct members.
        const SIGNATURE_MATCH = Self::IGNORE_NULLABILITY.bits()
            | Self::IGNORE_TUPLE_NAMES.bits()
            | Self::IGNORE_DYNAMIC.bits()
            | Self::IGNORE_CUSTOM_MODIFIERS.bits();
        /// Signature match that still distinguishes custom modifiers.
        const RUNTIME_SIGNATURE_MATCH = Self::IGNORE_NULLABILITY.bits()
            | Self::IGNORE_TUPLE_NAMES.bits()
            | Self::IGNORE_DYNAMIC.bits();
    }
}

impl TypeCompareKind {
    pub const CONSIDER_EVERYTHING: TypeCompareKind = TypeCompareKind::empty();
}

/// Whether `ty` is a non-nullable value type, for which reference
/// nullability annotations carry no meaning.
pub fn is_value_type(arena: &SymbolArena, ty: TypeId) -> bool {
    let interner = arena.interner();
    match &*interner.lookup(ty) {
        TypeData::Intrinsic(kind) => kind.is_value_type(),
        TypeData::Nullable(_) | TypeData::Tuple { .. } => true,
        TypeData::Named { .. } => arena
            .type_kind_of(ty)
            .is_some_and(|kind| kind.is_value_type()),
        TypeData::Array { .. } | TypeData::TypeParameter(_) => false,
    }
}

/// Identity of two type uses under `compare`.
pub fn types_equal(
    arena: &SymbolArena,
    left: &TypeWithAnnotations,
    right: &TypeWithAnnotations,
    compare: TypeCompareKind,
) -> bool {
    TypeComparer { arena, compare }.equal_with_annotations(left, right, 0)
}

/// Identity of two type ids under `compare`.
pub fn type_ids_equal(arena: &SymbolArena, left: TypeId, right: TypeId, compare: TypeCompareKind) -> bool {
    TypeComparer { arena, compare }.equal(left, right, 0)
}

struct TypeComparer<'a> {
    arena: &'a SymbolArena,
    compare: TypeCompareKind,
}

impl TypeComparer<'_> {
    fn equal_with_annotations(
        &self,
        left: &TypeWithAnnotations,
        right: &TypeWithAnnotations,
        depth: u32,
    ) -> bool {
        if !self.compare.contains(TypeCompareKind::IGNORE_CUSTOM_MODIFIERS)
            && left.custom_modifiers != right.custom_modifiers
        {
            return false;
        }
        if !self.compare.contains(TypeCompareKind::IGNORE_NULLABILITY)
            && !annotations_match(left.annotation, right.annotation)
            && !is_value_type(self.arena, left.ty)
        {
            return false;
        }
        self.equal(left.ty, right.ty, depth + 1)
    }

    fn equal(&self, left: TypeId, right: TypeId, depth: u32) -> bool {
        if left == right {
            return true;
        }
        if depth > MAX_TYPE_NESTING_DEPTH {
            return false;
        }
        if self.compare.contains(TypeCompareKind::IGNORE_DYNAMIC) {
            let is_object_like = |ty| ty == TypeId::OBJECT || ty == TypeId::DYNAMIC;
            if is_object_like(left) && is_object_like(right) {
                return true;
            }
        }
        let interner = self.arena.interner();
        let (left_data, right_data) = (interner.lookup(left), interner.lookup(right));
        match (&*left_data, &*right_data) {
            (
                TypeData::Named {
                    symbol: left_symbol,
                    type_args: left_args,
                },
                TypeData::Named {
                    symbol: right_symbol,
                    type_args: right_args,
                },
            ) => {
                left_symbol == right_symbol
                    && left_args.len() == right_args.len()
                    && left_args
                        .iter()
                        .zip(right_args)
                        .all(|(l, r)| self.equal_with_annotations(l, r, depth))
            }
            (TypeData::Nullable(l), TypeData::Nullable(r)) => self.equal(*l, *r, depth + 1),
            (
                TypeData::Array {
                    element: left_element,
                    rank: left_rank,
                },
                TypeData::Array {
                    element: right_element,
                    rank: right_rank,
                },
            ) => left_rank == right_rank && self.equal_with_annotations(left_element, right_element, depth),
            (
                TypeData::Tuple {
                    elements: left_elements,
                    names: left_names,
                },
                TypeData::Tuple {
                    elements: right_elements,
                    names: right_names,
                },
            ) => {
                (self.compare.contains(TypeCompareKind::IGNORE_TUPLE_NAMES) || left_names == right_names)
                    && left_elements.len() == right_elements.len()
                    && left_elements
                        .iter()
                        .zip(right_elements)
                        .all(|(l, r)| self.equal_with_annotations(l, r, depth))
            }
            _ => false,
        }
    }
}

/// Oblivious matches anything; otherwise annotations must agree.
fn annotations_match(left: NullableAnnotation, right: NullableAnnotation) -> bool {
    left == right || left.is_oblivious() || right.is_oblivious()
}

/// Whether a value of type `source` may flow into `destination` without a
/// nullability warning. Both types are assumed identical apart from
/// annotations; nested type arguments follow the variance of their type
/// parameters.
pub fn nullability_convertible(
    arena: &SymbolArena,
    source: &TypeWithAnnotations,
    destination: &TypeWithAnnotations,
) -> bool {
    NullabilityWalker { arena }.convertible(source, destination, VarianceKind::Out, 0)
}

struct NullabilityWalker<'a> {
    arena: &'a SymbolArena,
}

impl NullabilityWalker<'_> {
    fn convertible(
        &self,
        source: &TypeWithAnnotations,
        destination: &TypeWithAnnotations,
        variance: VarianceKind,
        depth: u32,
    ) -> bool {
        if depth > MAX_TYPE_NESTING_DEPTH {
            return true;
        }
        if !is_value_type(self.arena, source.ty)
            && !top_level_convertible(source.annotation, destination.annotation, variance)
        {
            return false;
        }
        self.nested_convertible(source.ty, destination.ty, variance, depth + 1)
    }

    fn nested_convertible(&self, source: TypeId, destination: TypeId, variance: VarianceKind, depth: u32) -> bool {
        if source == destination {
            return true;
        }
        let interner = self.arena.interner();
        let (source_data, destination_data) = (interner.lookup(source), interner.lookup(destination));
        match (&*source_data, &*destination_data) {
            (
                TypeData::Named {
                    symbol,
                    type_args: source_args,
                },
                TypeData::Named {
                    symbol: destination_symbol,
                    type_args: destination_args,
                },
            ) if symbol == destination_symbol && source_args.len() == destination_args.len() => {
                let parameters = self.arena.type_parameters_of(*symbol);
                source_args
                    .iter()
                    .zip(destination_args)
                    .enumerate()
                    .all(|(i, (s, d))| {
                        let declared = parameters
                            .get(i)
                            .map_or(VarianceKind::None, |p| self.arena.type_parameter(*p).variance);
                        self.convertible(s, d, combine(variance, declared), depth)
                    })
            }
            (TypeData::Array { element: s, .. }, TypeData::Array { element: d, .. }) => {
                self.convertible(s, d, variance, depth)
            }
            (TypeData::Tuple { elements: s, .. }, TypeData::Tuple { elements: d, .. }) if s.len() == d.len() => s
                .iter()
                .zip(d)
                .all(|(s, d)| self.convertible(s, d, variance, depth)),
            _ => true,
        }
    }
}

/// Position variance of a type argument given the variance of its
/// enclosing position and of the declared type parameter.
fn combine(outer: VarianceKind, declared: VarianceKind) -> VarianceKind {
    match (outer, declared) {
        (_, VarianceKind::None) | (VarianceKind::None, _) => VarianceKind::None,
        (VarianceKind::Out, declared) => declared,
        (VarianceKind::In, VarianceKind::Out) => VarianceKind::In,
        (VarianceKind::In, VarianceKind::In) => VarianceKind::Out,
    }
}

fn top_level_convertible(
    source: NullableAnnotation,
    destination: NullableAnnotation,
    variance: VarianceKind,
) -> bool {
    use NullableAnnotation::{Annotated, NotAnnotated};
    match variance {
        VarianceKind::Out => !(source == Annotated && destination == NotAnnotated),
        VarianceKind::In => !(source == NotAnnotated && destination == Annotated),
        VarianceKind::None => annotations_match(source, destination),
    }
}

#[cfg(test)]
#[path = "tests/relations_tests.rs"]
mod tests;
