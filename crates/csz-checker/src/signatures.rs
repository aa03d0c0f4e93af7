//! Member signatures as seen through a constructed containing type.
//!
//! Override and implementation matching compare a member against a
//! candidate declared on a base type or interface. The candidate is viewed
//! through the construction of that type (`Base<int>.M(T)` is `M(int)`)
//! and, for generic methods, with its method type parameters renamed to the
//! ones of the member it is compared with.

use crate::compilation::Compilation;
use csz_symbols::{
    MethodKind, RefKind, ScopedKind, SymbolData, SymbolId, TypeCompareKind, TypeId, TypeSubstitution, TypeWithAnnotations,
    display_type, display_type_id, instantiate_type, nullability_convertible, types_equal,
};
use smallvec::SmallVec;

#[derive(Clone, Debug)]
pub struct SignatureParameter {
    pub symbol: SymbolId,
    pub ty: TypeWithAnnotations,
    pub ref_kind: RefKind,
    pub scoped: ScopedKind,
}

#[derive(Clone, Debug)]
pub struct MemberSignature {
    pub member: SymbolId,
    /// Method type parameter count; zero for properties.
    pub type_parameters: usize,
    /// Return type of a method, type of a property.
    pub ty: TypeWithAnnotations,
    pub ref_kind: RefKind,
    pub parameters: Vec<SignatureParameter>,
}

impl MemberSignature {
    pub fn parameter_types(&self) -> impl Iterator<Item = &TypeWithAnnotations> {
        self.parameters.iter().map(|parameter| &parameter.ty)
    }
}

/// Positions where a member's nullability does not fit the signature it
/// overrides or implements.
#[derive(Debug, Default)]
pub(crate) struct NullabilityMismatch {
    /// Return type of a method, type of a property.
    pub(crate) in_type: bool,
    /// Parameters of the member, not of the signature it is compared with.
    pub(crate) parameters: SmallVec<[SymbolId; 2]>,
}

impl NullabilityMismatch {
    pub(crate) fn is_empty(&self) -> bool {
        !self.in_type && self.parameters.is_empty()
    }
}

/// `in` and `ref readonly` are the same at the signature level.
pub(crate) fn ref_kinds_match(left: RefKind, right: RefKind) -> bool {
    let normalize = |kind| match kind {
        RefKind::RefReadOnly => RefKind::In,
        other => other,
    };
    normalize(left) == normalize(right)
}

impl Compilation {
    pub fn member_signature(&self, member: SymbolId, substitution: &TypeSubstitution) -> MemberSignature {
        let arena = self.arena();
        let interner = arena.interner();
        let parameters = arena
            .parameters_of(member)
            .iter()
            .map(|&parameter| SignatureParameter {
                symbol: parameter,
                ty: instantiate_type(interner, self.parameter_type(parameter), substitution),
                ref_kind: arena.parameter(parameter).ref_kind,
                scoped: self.effective_scope(parameter),
            })
            .collect();
        MemberSignature {
            member,
            type_parameters: arena.type_parameters_of(member).len(),
            ty: instantiate_type(interner, self.member_type(member), substitution),
            ref_kind: self.member_ref_kind(member),
            parameters,
        }
    }

    /// Signature of `candidate` viewed through `through` (a construction of
    /// its containing type), with method type parameters aligned to
    /// `align_with` when given.
    pub fn signature_through(
        &self,
        candidate: SymbolId,
        through: TypeId,
        align_with: Option<SymbolId>,
    ) -> MemberSignature {
        let arena = self.arena();
        let mut substitution = self.construction_substitution(through);
        if let Some(target) = align_with {
            let from = arena.type_parameters_of(candidate);
            let to = arena.type_parameters_of(target);
            if !from.is_empty() && from.len() == to.len() {
                substitution.extend(TypeSubstitution::align_type_parameters(arena.interner(), from, to));
            }
        }
        self.member_signature(candidate, &substitution)
    }

    /// Same arity, parameter count, ref kinds and parameter types under
    /// `compare`.
    pub fn parameters_match(&self, left: &MemberSignature, right: &MemberSignature, compare: TypeCompareKind) -> bool {
        left.type_parameters == right.type_parameters
            && left.parameters.len() == right.parameters.len()
            && left.parameters.iter().zip(&right.parameters).all(|(l, r)| {
                ref_kinds_match(l.ref_kind, r.ref_kind) && types_equal(self.arena(), &l.ty, &r.ty, compare)
            })
    }

    /// Whether two members are the same kind of thing for matching: methods
    /// with methods, properties with properties, indexers with indexers.
    pub(crate) fn same_member_kind(&self, left: SymbolId, right: SymbolId) -> bool {
        let arena = self.arena();
        match (&arena.symbol(left).data, &arena.symbol(right).data) {
            (SymbolData::Method(l), SymbolData::Method(r)) => l.kind.is_accessor() == r.kind.is_accessor(),
            (SymbolData::Property(l), SymbolData::Property(r)) => l.is_indexer == r.is_indexer,
            _ => false,
        }
    }

    /// Compares the nullability of `own` with `other`. The return type and
    /// plain parameters are covariant, `out` parameters contravariant and
    /// `ref` positions invariant. A property is read through its getter and
    /// written through its setter.
    pub(crate) fn nullability_mismatch(&self, own: &MemberSignature, other: &MemberSignature) -> NullabilityMismatch {
        let arena = self.arena();
        let convertible = |source: &TypeWithAnnotations, destination: &TypeWithAnnotations| {
            nullability_convertible(arena, source, destination)
        };
        let type_ok = match &arena.symbol(own.member).data {
            SymbolData::Property(property) if own.ref_kind == RefKind::None => {
                (property.getter.is_none() || convertible(&own.ty, &other.ty))
                    && (property.setter.is_none() || convertible(&other.ty, &own.ty))
            }
            _ if own.ref_kind == RefKind::None => convertible(&own.ty, &other.ty),
            _ => convertible(&own.ty, &other.ty) && convertible(&other.ty, &own.ty),
        };
        let parameters = own
            .parameters
            .iter()
            .zip(&other.parameters)
            .filter(|(mine, theirs)| {
                !match mine.ref_kind {
                    RefKind::Out => convertible(&theirs.ty, &mine.ty),
                    RefKind::Ref => convertible(&mine.ty, &theirs.ty) && convertible(&theirs.ty, &mine.ty),
                    _ => convertible(&mine.ty, &theirs.ty),
                }
            })
            .map(|(mine, _)| mine.symbol)
            .collect();
        NullabilityMismatch {
            in_type: !type_ok,
            parameters,
        }
    }

    /// Parameters of `own` that drop a `scoped` declared by `other`, and
    /// whether both members follow the updated ref-safety rules.
    pub(crate) fn scoped_mismatches(&self, own: &MemberSignature, other: &MemberSignature) -> (SmallVec<[SymbolId; 2]>, bool) {
        let updated = self.uses_updated_ref_safety_rules(own.member) && self.uses_updated_ref_safety_rules(other.member);
        let mismatched = own
            .parameters
            .iter()
            .zip(&other.parameters)
            .filter(|(mine, theirs)| theirs.scoped != ScopedKind::None && mine.scoped != theirs.scoped)
            .map(|(mine, _)| mine.symbol)
            .collect();
        (mismatched, updated)
    }

    /// Whether `own` changes tuple element names that `other` declares.
    /// Names added where `other` has none are accepted.
    pub(crate) fn tuple_names_conflict(&self, own: &MemberSignature, other: &MemberSignature) -> bool {
        let arena = self.arena();
        let interner = arena.interner();
        let other_has_names = std::iter::once(&other.ty)
            .chain(other.parameter_types())
            .any(|ty| interner.erase_tuple_names(ty.ty) != ty.ty);
        if !other_has_names {
            return false;
        }
        let strict = TypeCompareKind::SIGNATURE_MATCH.difference(TypeCompareKind::IGNORE_TUPLE_NAMES);
        let differs = |mine: &TypeWithAnnotations, theirs: &TypeWithAnnotations| !types_equal(arena, mine, theirs, strict);
        differs(&own.ty, &other.ty)
            || own
                .parameter_types()
                .zip(other.parameter_types())
                .any(|(mine, theirs)| differs(mine, theirs))
    }

    /// Name of `symbol` as it appears in diagnostics: `C.M(int)`,
    /// `C.operator +(C, C)`, `C.this[int]`, `C.P.get`.
    pub fn display_member(&self, symbol: SymbolId) -> String {
        let arena = self.arena();
        let entry = arena.symbol(symbol);
        let container = || {
            arena
                .containing_type(symbol)
                .map(|ty| display_type_id(arena, arena.declared_type(ty)))
                .unwrap_or_default()
        };
        let parameter_list = |member: SymbolId| {
            arena
                .parameters_of(member)
                .iter()
                .map(|&parameter| {
                    let ty = display_type(arena, self.parameter_type(parameter));
                    match arena.parameter(parameter).ref_kind {
                        RefKind::None => ty,
                        kind => format!("{} {ty}", kind.keyword()),
                    }
                })
                .collect::<Vec<_>>()
                .join(", ")
        };
        match &entry.data {
            SymbolData::Type(ty) => display_type_id(arena, ty.declared_type),
            SymbolData::Method(method) => {
                if let Some(property) = method.associated_property {
                    let keyword = if method.kind == MethodKind::PropertySet { "set" } else { "get" };
                    return format!("{}.{keyword}", self.display_member(property));
                }
                let name = match method.operator {
                    Some(operator) if operator.is_conversion() => format!(
                        "{} operator {}",
                        operator.display(),
                        display_type(arena, self.member_type(symbol))
                    ),
                    Some(operator) => format!("operator {}", operator.display()),
                    None => {
                        let type_parameters = arena.type_parameters_of(symbol);
                        if type_parameters.is_empty() {
                            arena.name(symbol).to_string()
                        } else {
                            let names: Vec<_> = type_parameters
                                .iter()
                                .map(|parameter| arena.name(*parameter).to_string())
                                .collect();
                            format!("{}<{}>", arena.name(symbol), names.join(", "))
                        }
                    }
                };
                format!("{}.{name}({})", container(), parameter_list(symbol))
            }
            SymbolData::Property(property) if property.is_indexer => {
                format!("{}.this[{}]", container(), parameter_list(symbol))
            }
            SymbolData::Property(_) => format!("{}.{}", container(), arena.name(symbol)),
            SymbolData::Parameter(_) | SymbolData::TypeParameter(_) => arena.name(symbol).to_string(),
        }
    }
}

#[cfg(test)]
#[path = "tests/signatures_tests.rs"]
mod tests;
