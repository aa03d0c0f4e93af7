//! Built-in conversions between types.
//!
//! Only the relations declaration checking needs: identity, implicit
//! reference conversions (base classes, implemented interfaces, variance,
//! arrays), boxing, nullable lifting and implicit numeric conversions.
//! User-defined conversions never participate.

use crate::compilation::Compilation;
use csz_symbols::relations::is_value_type;
use csz_symbols::{
    IntrinsicKind, TypeCompareKind, TypeData, TypeId, TypeKind, TypeWithAnnotations, VarianceKind, type_ids_equal,
};
use csz_common::limits::MAX_TYPE_NESTING_DEPTH;

/// Nullability and tuple names never change which conversions exist.
const CONVERSION_IDENTITY: TypeCompareKind = TypeCompareKind::IGNORE_NULLABILITY
    .union(TypeCompareKind::IGNORE_TUPLE_NAMES)
    .union(TypeCompareKind::IGNORE_CUSTOM_MODIFIERS);

/// Implicit numeric conversion from `source` to `destination`.
pub fn implicit_numeric_conversion_exists(source: IntrinsicKind, destination: IntrinsicKind) -> bool {
    use IntrinsicKind::*;
    if source == destination {
        return false;
    }
    match source {
        SByte => matches!(destination, Short | Int | Long | Float | Double | Decimal | NInt),
        Byte => matches!(
            destination,
            Short | UShort | Int | UInt | Long | ULong | Float | Double | Decimal | NInt | NUInt
        ),
        Short => matches!(destination, Int | Long | Float | Double | Decimal | NInt),
        UShort | Char => matches!(
            destination,
            UShort | Int | UInt | Long | ULong | Float | Double | Decimal | NInt | NUInt
        ),
        Int => matches!(destination, Long | Float | Double | Decimal | NInt),
        UInt => matches!(destination, Long | ULong | Float | Double | Decimal | NUInt),
        Long | ULong => matches!(destination, Float | Double | Decimal),
        NInt => matches!(destination, Long | Float | Double | Decimal),
        NUInt => matches!(destination, ULong | Float | Double | Decimal),
        Float => destination == Double,
        _ => false,
    }
}

impl Compilation {
    pub(crate) fn same_type(&self, left: TypeId, right: TypeId) -> bool {
        type_ids_equal(self.arena(), left, right, CONVERSION_IDENTITY)
    }

    /// Classes, interfaces, delegates, arrays, `string`, `object` and
    /// `dynamic`. Type parameters are not known to be either.
    pub fn is_reference_type(&self, ty: TypeId) -> bool {
        let arena = self.arena();
        match &*arena.interner().lookup(ty) {
            TypeData::Intrinsic(kind) => {
                matches!(kind, IntrinsicKind::Object | IntrinsicKind::String | IntrinsicKind::Dynamic)
            }
            TypeData::Named { .. } => arena
                .type_kind_of(ty)
                .is_some_and(|kind| matches!(kind, TypeKind::Class | TypeKind::Interface | TypeKind::Delegate)),
            TypeData::Array { .. } => true,
            TypeData::TypeParameter(_) | TypeData::Nullable(_) | TypeData::Tuple { .. } => false,
        }
    }

    /// Whether a base class of `ty` (not `ty` itself) is `base`.
    pub fn is_derived_from(&self, ty: TypeId, base: TypeId) -> bool {
        if self.arena().is_interface_type(ty) {
            return false;
        }
        self.base_types_of(ty)
            .into_iter()
            .any(|candidate| self.same_type(candidate, base))
    }

    /// Whether `ty` implements `interface` exactly, through itself, its
    /// base classes or its base interfaces.
    pub fn implements_interface(&self, ty: TypeId, interface: TypeId) -> bool {
        self.all_interfaces_of(ty)
            .into_iter()
            .any(|candidate| self.same_type(candidate, interface))
    }

    pub fn has_identity_or_implicit_reference_conversion(&self, source: TypeId, destination: TypeId) -> bool {
        self.same_type(source, destination) || self.has_implicit_reference_conversion(source, destination)
    }

    pub fn has_implicit_reference_conversion(&self, source: TypeId, destination: TypeId) -> bool {
        self.reference_conversion(source, destination, 0)
    }

    fn reference_conversion(&self, source: TypeId, destination: TypeId, depth: u32) -> bool {
        if depth > MAX_TYPE_NESTING_DEPTH || source.is_error() || destination.is_error() {
            return false;
        }
        if !self.is_reference_type(source) {
            return false;
        }
        if destination == TypeId::OBJECT || destination == TypeId::DYNAMIC {
            return source != TypeId::OBJECT && source != TypeId::DYNAMIC;
        }
        let interner = self.arena().interner();
        if let (
            TypeData::Array {
                element: source_element,
                rank: source_rank,
            },
            TypeData::Array {
                element: destination_element,
                rank: destination_rank,
            },
        ) = (&*interner.lookup(source), &*interner.lookup(destination))
        {
            return source_rank == destination_rank
                && self.is_reference_type(source_element.ty)
                && (self.same_type(source_element.ty, destination_element.ty)
                    || self.reference_conversion(source_element.ty, destination_element.ty, depth + 1));
        }
        if self.is_derived_from(source, destination) {
            return true;
        }
        if !self.arena().is_interface_type(destination) {
            return false;
        }
        let mut candidates = self.all_interfaces_of(source);
        if self.arena().is_interface_type(source) {
            candidates.insert(0, source);
        }
        candidates.into_iter().any(|candidate| {
            self.same_type(candidate, destination) || self.variance_convertible(candidate, destination, depth + 1)
        })
    }

    /// `I<Derived>` to `I<Base>` for `out` parameters, the reverse for `in`.
    fn variance_convertible(&self, source: TypeId, destination: TypeId, depth: u32) -> bool {
        let arena = self.arena();
        let interner = arena.interner();
        let (source_data, destination_data) = (interner.lookup(source), interner.lookup(destination));
        let (
            TypeData::Named {
                symbol,
                type_args: source_args,
            },
            TypeData::Named {
                symbol: destination_symbol,
                type_args: destination_args,
            },
        ) = (&*source_data, &*destination_data)
        else {
            return false;
        };
        if symbol != destination_symbol || source_args.is_empty() || source_args.len() != destination_args.len() {
            return false;
        }
        let parameters = arena.type_parameters_of(*symbol);
        source_args.iter().zip(destination_args).enumerate().all(|(i, (s, d))| {
            let variance = parameters
                .get(i)
                .map_or(VarianceKind::None, |parameter| arena.type_parameter(*parameter).variance);
            self.same_type(s.ty, d.ty)
                || match variance {
                    VarianceKind::Out => self.reference_conversion(s.ty, d.ty, depth + 1),
                    VarianceKind::In => self.reference_conversion(d.ty, s.ty, depth + 1),
                    VarianceKind::None => false,
                }
        })
    }

    /// Identity, implicit numeric, nullable, reference and boxing
    /// conversions, plus anything to `dynamic`.
    pub fn has_implicit_conversion(&self, source: TypeId, destination: TypeId) -> bool {
        if source.is_error() || destination.is_error() {
            return false;
        }
        if self.same_type(source, destination) || destination == TypeId::DYNAMIC {
            return true;
        }
        let arena = self.arena();
        let interner = arena.interner();
        if let (Some(from), Some(to)) = (interner.intrinsic_kind(source), interner.intrinsic_kind(destination)) {
            if implicit_numeric_conversion_exists(from, to) {
                return true;
            }
        }
        if interner.is_nullable_value_type(destination) {
            let underlying = interner.strip_nullable(destination);
            let source_underlying = interner.strip_nullable(source);
            return self.has_implicit_conversion(source_underlying, underlying)
                && is_value_type(arena, source_underlying);
        }
        if self.has_implicit_reference_conversion(source, destination) {
            return true;
        }
        self.has_boxing_conversion(source, destination)
    }

    fn has_boxing_conversion(&self, source: TypeId, destination: TypeId) -> bool {
        let arena = self.arena();
        if !is_value_type(arena, source) {
            return false;
        }
        let source = arena.interner().strip_nullable(source);
        if destination == TypeId::OBJECT {
            return true;
        }
        let value_type = arena.declared_type(arena.core().value_type);
        if self.same_type(destination, value_type) {
            return true;
        }
        arena.is_interface_type(destination)
            && self
                .all_interfaces_of(source)
                .into_iter()
                .any(|candidate| self.same_type(candidate, destination))
    }

    /// Conversion used by covariant returns: identity or implicit reference.
    pub(crate) fn is_covariant_return_compatible(
        &self,
        overriding: &TypeWithAnnotations,
        overridden: &TypeWithAnnotations,
    ) -> bool {
        self.has_identity_or_implicit_reference_conversion(overriding.ty, overridden.ty)
    }
}

#[cfg(test)]
#[path = "tests/conversions_tests.rs"]
mod tests;
