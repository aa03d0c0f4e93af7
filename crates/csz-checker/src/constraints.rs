//! Type parameter constraint clauses.
//!
//! Clauses are bound per declaration part. A partial type may repeat its
//! `where` clauses on several parts; those are merged into one clause per
//! type parameter. Nullability-only differences are reconciled (an oblivious
//! constraint defers to an annotated one) and any other difference is a
//! single type-level mismatch.

use crate::compilation::Compilation;
use bitflags::bitflags;
use csz_common::{DiagnosticBag, diagnostic_codes};
use csz_symbols::syntax::{ConstraintClauseSyntax, ConstraintSyntax};
use csz_symbols::{
    BindingContext, CompletionPart, SymbolData, SymbolId, TypeCompareKind, TypeWithAnnotations, display_type_id,
    types_equal,
};
use smallvec::{SmallVec, smallvec};
use std::sync::Arc;
use tracing::debug;

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct TypeParameterConstraintKind: u32 {
        /// `class` or `class?`.
        const REFERENCE_TYPE = 1 << 0;
        const VALUE_TYPE = 1 << 1;
        const UNMANAGED = 1 << 2;
        const NOT_NULL = 1 << 3;
        /// `new()`.
        const CONSTRUCTOR = 1 << 4;
        const DEFAULT = 1 << 5;
        /// `class?` in an annotations context.
        const NULLABLE_REFERENCE_TYPE = 1 << 6;
        /// `class` in an annotations context. Neither bit means oblivious.
        const NOT_NULLABLE_REFERENCE_TYPE = 1 << 7;

        const NULLABILITY = Self::NULLABLE_REFERENCE_TYPE.bits()
            | Self::NOT_NULLABLE_REFERENCE_TYPE.bits();
    }
}

/// Constraints of one type parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeParameterConstraintClause {
    pub type_parameter: SymbolId,
    pub kind: TypeParameterConstraintKind,
    pub constraint_types: SmallVec<[TypeWithAnnotations; 2]>,
}

impl TypeParameterConstraintClause {
    pub fn empty(type_parameter: SymbolId) -> Self {
        TypeParameterConstraintClause {
            type_parameter,
            kind: TypeParameterConstraintKind::empty(),
            constraint_types: SmallVec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.kind.is_empty() && self.constraint_types.is_empty()
    }
}

/// Clauses of one declaration part, indexed by type parameter ordinal.
/// `None` where the part has no clause for that parameter.
type PartClauses = Vec<Option<TypeParameterConstraintClause>>;

/// Outcome of merging two clauses for the same type parameter.
enum Merged {
    Agree(TypeParameterConstraintClause),
    Mismatch,
}

/// Nullability and tuple names are reconciled separately; custom modifiers
/// never appear on constraints.
const CONSTRAINT_IDENTITY: TypeCompareKind = TypeCompareKind::IGNORE_NULLABILITY
    .union(TypeCompareKind::IGNORE_TUPLE_NAMES)
    .union(TypeCompareKind::IGNORE_CUSTOM_MODIFIERS);

impl Compilation {
    /// One clause per type parameter of `owner` (a type or a generic
    /// method), in declaration order. Empty when nothing is constrained.
    pub fn constraint_clauses(&self, owner: SymbolId) -> &Arc<[TypeParameterConstraintClause]> {
        let slot = match &self.arena().symbol(owner).data {
            SymbolData::Type(_) => &self.type_facets(owner).constraint_clauses,
            SymbolData::Method(_) => &self.member_facets(owner).constraint_clauses,
            _ => unreachable!("constraint_clauses of {owner:?}, which declares no type parameters"),
        };
        self.lazy_facet(owner, slot, CompletionPart::FINISH_CONSTRAINTS, |diagnostics| {
            self.compute_constraint_clauses(owner, diagnostics)
        })
    }

    /// The merged clause of one type parameter, if it has any constraint.
    pub fn type_parameter_constraints(&self, type_parameter: SymbolId) -> Option<&TypeParameterConstraintClause> {
        let owner = self.arena().type_parameter(type_parameter).owner;
        self.constraint_clauses(owner)
            .iter()
            .find(|clause| clause.type_parameter == type_parameter && !clause.is_empty())
    }

    fn compute_constraint_clauses(
        &self,
        owner: SymbolId,
        diagnostics: &mut DiagnosticBag,
    ) -> Arc<[TypeParameterConstraintClause]> {
        let arena = self.arena();
        let type_parameters = arena.type_parameters_of(owner);
        if type_parameters.is_empty() {
            return Arc::from([]);
        }

        let mut parts: Vec<PartClauses> = Vec::new();
        match &arena.symbol(owner).data {
            SymbolData::Type(ty) => {
                for part in ty.declarations() {
                    // Parts without any `where` clause do not take part in merging.
                    if part.constraint_clauses.is_empty() {
                        continue;
                    }
                    let annotations = part
                        .nullable_annotations
                        .unwrap_or_else(|| self.options().nullable.annotations_enabled());
                    let cx = BindingContext::new(arena, owner, annotations);
                    parts.push(self.bind_part_clauses(owner, &cx, &part.constraint_clauses, diagnostics));
                }
            }
            SymbolData::Method(method) => {
                if let Some(syntax) = method.syntax() {
                    let cx = self.binding_context(owner);
                    parts.push(self.bind_part_clauses(owner, &cx, &syntax.constraint_clauses, diagnostics));
                }
            }
            _ => {}
        }

        let mut merged: Vec<TypeParameterConstraintClause> = Vec::with_capacity(type_parameters.len());
        for (ordinal, &type_parameter) in type_parameters.iter().enumerate() {
            let mut clauses = parts.iter().map(|part| {
                part[ordinal]
                    .clone()
                    .unwrap_or_else(|| TypeParameterConstraintClause::empty(type_parameter))
            });
            let Some(first) = clauses.next() else {
                merged.push(TypeParameterConstraintClause::empty(type_parameter));
                continue;
            };
            let mut result = first.clone();
            let mut mismatch = false;
            for clause in clauses {
                match self.merge_clauses(&result, &clause) {
                    Merged::Agree(next) => result = next,
                    Merged::Mismatch => {
                        mismatch = true;
                        break;
                    }
                }
            }
            if mismatch {
                let location = arena.symbol(owner).location();
                diagnostics.report(
                    diagnostic_codes::PARTIAL_WRONG_CONSTRAINTS,
                    &location,
                    &[
                        &display_type_id(arena, arena.declared_type(owner)),
                        &arena.name(type_parameter),
                    ],
                );
                result = first;
            }
            merged.push(result);
        }

        if merged.iter().all(TypeParameterConstraintClause::is_empty) {
            return Arc::from([]);
        }
        debug!(
            owner = owner.0,
            parts = parts.len(),
            constrained = merged.iter().filter(|clause| !clause.is_empty()).count(),
            "constraint_clauses: merged"
        );
        merged.into()
    }

    fn bind_part_clauses(
        &self,
        owner: SymbolId,
        cx: &BindingContext<'_>,
        syntax: &[ConstraintClauseSyntax],
        diagnostics: &mut DiagnosticBag,
    ) -> PartClauses {
        let arena = self.arena();
        let type_parameters = arena.type_parameters_of(owner);
        let mut clauses: PartClauses = vec![None; type_parameters.len()];
        for clause in syntax {
            let Some(ordinal) = type_parameters
                .iter()
                .position(|&parameter| *arena.name(parameter) == *clause.type_parameter)
            else {
                diagnostics.report(
                    diagnostic_codes::TYPE_PARAMETER_NOT_FOUND_IN_CONSTRAINT,
                    &clause.location,
                    &[&clause.type_parameter, &self.display_member(owner)],
                );
                continue;
            };
            if clauses[ordinal].is_some() {
                diagnostics.report(
                    diagnostic_codes::DUPLICATE_CONSTRAINT_CLAUSE,
                    &clause.location,
                    &[&clause.type_parameter],
                );
                continue;
            }
            clauses[ordinal] = Some(self.bind_clause(type_parameters[ordinal], cx, clause, diagnostics));
        }
        clauses
    }

    fn bind_clause(
        &self,
        type_parameter: SymbolId,
        cx: &BindingContext<'_>,
        syntax: &ConstraintClauseSyntax,
        diagnostics: &mut DiagnosticBag,
    ) -> TypeParameterConstraintClause {
        use TypeParameterConstraintKind as K;
        let mut clause = TypeParameterConstraintClause::empty(type_parameter);
        for constraint in &syntax.constraints {
            match constraint {
                ConstraintSyntax::Class { nullable, .. } => {
                    clause.kind |= K::REFERENCE_TYPE;
                    if cx.annotations_enabled {
                        clause.kind |= if *nullable {
                            K::NULLABLE_REFERENCE_TYPE
                        } else {
                            K::NOT_NULLABLE_REFERENCE_TYPE
                        };
                    }
                }
                ConstraintSyntax::Struct { .. } => clause.kind |= K::VALUE_TYPE,
                ConstraintSyntax::Unmanaged { .. } => clause.kind |= K::UNMANAGED,
                ConstraintSyntax::NotNull { .. } => clause.kind |= K::NOT_NULL,
                ConstraintSyntax::Constructor { .. } => clause.kind |= K::CONSTRUCTOR,
                ConstraintSyntax::Default { .. } => clause.kind |= K::DEFAULT,
                ConstraintSyntax::Type(ty) => {
                    let bound = self.binder().bind_type(cx, ty, diagnostics);
                    if !bound.ty.is_error() {
                        clause.constraint_types.push(bound);
                    }
                }
            }
        }
        clause
    }

    fn merge_clauses(&self, left: &TypeParameterConstraintClause, right: &TypeParameterConstraintClause) -> Merged {
        use TypeParameterConstraintKind as K;
        let nullability = K::NULLABILITY;
        if left.kind.difference(nullability) != right.kind.difference(nullability) {
            return Merged::Mismatch;
        }
        let (left_nullability, right_nullability) = (left.kind & nullability, right.kind & nullability);
        let kind = if left_nullability.is_empty() {
            right.kind
        } else if right_nullability.is_empty() || left_nullability == right_nullability {
            left.kind
        } else {
            return Merged::Mismatch;
        };

        if left.constraint_types.len() != right.constraint_types.len() {
            return Merged::Mismatch;
        }
        let arena = self.arena();
        let mut constraint_types = SmallVec::new();
        let mut matched: SmallVec<[bool; 2]> = smallvec![false; right.constraint_types.len()];
        for ty in &left.constraint_types {
            // Each constraint type on the right pairs with at most one on the left.
            let Some(index) = right
                .constraint_types
                .iter()
                .enumerate()
                .position(|(index, other)| !matched[index] && types_equal(arena, ty, other, CONSTRAINT_IDENTITY))
            else {
                return Merged::Mismatch;
            };
            matched[index] = true;
            let other = &right.constraint_types[index];
            // Oblivious positions match anything; explicit annotations must agree.
            let compare = TypeCompareKind::IGNORE_TUPLE_NAMES | TypeCompareKind::IGNORE_CUSTOM_MODIFIERS;
            if !types_equal(arena, ty, other, compare) {
                return Merged::Mismatch;
            }
            constraint_types.push(if ty.annotation.is_oblivious() {
                other.clone()
            } else {
                ty.clone()
            });
        }
        Merged::Agree(TypeParameterConstraintClause {
            type_parameter: left.type_parameter,
            kind,
            constraint_types,
        })
    }
}

#[cfg(test)]
#[path = "tests/constraints_tests.rs"]
mod tests;
