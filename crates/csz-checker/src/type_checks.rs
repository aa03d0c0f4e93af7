//! Checks that look at a type's members together.

use crate::compilation::Compilation;
use crate::signatures::MemberSignature;
use csz_common::{DiagnosticBag, diagnostic_codes};
use csz_symbols::syntax::OperatorKind;
use csz_symbols::{
    RefKind, SymbolData, SymbolId, TypeCompareKind, TypeId, TypeKind, TypeSubstitution, display_type_id, types_equal,
};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::trace;

const DEFAULT_INDEXER_NAME: &str = "Item";

impl Compilation {
    pub(crate) fn check_type_members(&self, ty: SymbolId, diagnostics: &mut DiagnosticBag) {
        if !self.is_source(ty) {
            return;
        }
        let before = diagnostics.len();
        self.check_operator_pairs(ty, diagnostics);
        self.check_equality_members(ty, diagnostics);
        self.check_abstract_members_implemented(ty, diagnostics);
        self.check_indexer_names(ty, diagnostics);
        self.check_partial_type_parameters(ty, diagnostics);
        trace!(ty = ty.0, reported = diagnostics.len() - before, "check_type_members");
    }

    fn operators_of(&self, ty: SymbolId) -> SmallVec<[(SymbolId, OperatorKind); 8]> {
        let arena = self.arena();
        arena
            .members(ty)
            .iter()
            .filter_map(|&member| Some((member, arena.symbol(member).as_method()?.operator?)))
            // A wrong parameter count is reported on the operator alone.
            .filter(|&(member, kind)| arena.parameters_of(member).len() == kind.arity())
            .collect()
    }

    /// `true`/`false`, `==`/`!=`, `<`/`>` and `<=`/`>=` come in pairs with
    /// the same parameter and return types. A `checked` operator needs its
    /// regular form.
    fn check_operator_pairs(&self, ty: SymbolId, diagnostics: &mut DiagnosticBag) {
        let arena = self.arena();
        let operators = self.operators_of(ty);
        if operators.is_empty() {
            return;
        }
        let signatures: Vec<MemberSignature> = operators
            .iter()
            .map(|&(method, _)| self.member_signature(method, &TypeSubstitution::new()))
            .collect();
        let same_shape = |left: &MemberSignature, right: &MemberSignature| {
            self.parameters_match(left, right, TypeCompareKind::SIGNATURE_MATCH)
                && types_equal(arena, &left.ty, &right.ty, TypeCompareKind::SIGNATURE_MATCH)
        };

        for (index, &(method, kind)) in operators.iter().enumerate() {
            let checked = self.is_checked_operator(method);
            if checked && kind.supports_checked() {
                let has_regular = operators.iter().enumerate().any(|(other, &(candidate, candidate_kind))| {
                    other != index
                        && candidate_kind == kind
                        && !self.is_checked_operator(candidate)
                        && same_shape(&signatures[index], &signatures[other])
                });
                if !has_regular {
                    diagnostics.report(
                        diagnostic_codes::CHECKED_OPERATOR_NEEDS_MATCH,
                        &arena.symbol(method).location(),
                        &[kind.display()],
                    );
                }
            }
            let Some(pair) = kind.matching_operator() else {
                continue;
            };
            let has_pair = operators.iter().enumerate().any(|(other, &(_, candidate_kind))| {
                candidate_kind == pair && same_shape(&signatures[index], &signatures[other])
            });
            if !has_pair {
                diagnostics.report(
                    diagnostic_codes::OPERATOR_NEEDS_MATCH,
                    &arena.symbol(method).location(),
                    &[kind.display(), pair.display()],
                );
            }
        }
    }

    /// Overriding `Equals(object)` or defining `==`/`!=` without the rest of
    /// the equality trio.
    fn check_equality_members(&self, ty: SymbolId, diagnostics: &mut DiagnosticBag) {
        let arena = self.arena();
        if !matches!(arena.type_symbol(ty).kind, TypeKind::Class | TypeKind::Struct) {
            return;
        }
        let mut overrides_equals = false;
        let mut overrides_get_hash_code = false;
        for &member in arena.members(ty) {
            let symbol = arena.symbol(member);
            if !symbol.is_method() || !symbol.is_override() {
                continue;
            }
            let parameters = arena.parameters_of(member);
            match &*arena.name(member) {
                "Equals" if parameters.len() == 1 => {
                    let parameter = parameters[0];
                    overrides_equals |= arena.parameter(parameter).ref_kind == RefKind::None
                        && self.parameter_type(parameter).ty == TypeId::OBJECT;
                }
                "GetHashCode" if parameters.is_empty() => overrides_get_hash_code = true,
                _ => {}
            }
        }
        let defines_equality = self.operators_of(ty).iter().any(|&(_, kind)| kind.is_equality());

        let location = arena.symbol(ty).location();
        let name = display_type_id(arena, arena.declared_type(ty));
        if overrides_equals && !overrides_get_hash_code {
            diagnostics.report(diagnostic_codes::EQUALS_WITHOUT_GET_HASH_CODE, &location, &[&name]);
        }
        if defines_equality {
            if !overrides_equals {
                diagnostics.report(diagnostic_codes::EQUALITY_OP_WITHOUT_EQUALS, &location, &[&name]);
            }
            if !overrides_get_hash_code {
                diagnostics.report(diagnostic_codes::EQUALITY_OP_WITHOUT_GET_HASH_CODE, &location, &[&name]);
            }
        }
    }

    /// A concrete class must override every abstract member of its base
    /// chain. Only the most derived abstract declaration of a slot is
    /// reported.
    fn check_abstract_members_implemented(&self, ty: SymbolId, diagnostics: &mut DiagnosticBag) {
        let arena = self.arena();
        let symbol = arena.symbol(ty);
        if arena.type_symbol(ty).kind != TypeKind::Class || symbol.is_abstract() {
            return;
        }
        let mut overridden: FxHashSet<SymbolId> = FxHashSet::default();
        let note_overrides = |level: SymbolId, overridden: &mut FxHashSet<SymbolId>| {
            for &member in arena.members(level) {
                if arena.symbol(member).is_override() {
                    overridden.extend(self.override_chain(member).into_iter().skip(1));
                }
            }
        };
        note_overrides(ty, &mut overridden);

        let type_name = display_type_id(arena, arena.declared_type(ty));
        for base in self.base_types_of(arena.declared_type(ty)) {
            let Some(level) = arena.type_symbol_of(base) else {
                continue;
            };
            for &member in arena.members(level) {
                let candidate = arena.symbol(member);
                let is_slot = match &candidate.data {
                    SymbolData::Method(method) => !method.kind.is_accessor(),
                    SymbolData::Property(_) => true,
                    _ => false,
                };
                if is_slot && candidate.is_abstract() && !overridden.contains(&member) {
                    diagnostics.report(
                        diagnostic_codes::UNIMPLEMENTED_ABSTRACT_MEMBER,
                        &symbol.location(),
                        &[&type_name, &self.display_member(member)],
                    );
                }
            }
            note_overrides(level, &mut overridden);
        }
    }

    /// Every indexer of a type is emitted under one name.
    fn check_indexer_names(&self, ty: SymbolId, diagnostics: &mut DiagnosticBag) {
        let arena = self.arena();
        let mut first: Option<String> = None;
        for &member in arena.members(ty) {
            let is_indexer = arena
                .symbol(member)
                .as_property()
                .is_some_and(|property| property.is_indexer && !property.is_explicit_interface_implementation());
            if !is_indexer {
                continue;
            }
            let name = self
                .attributes(member)
                .well_known
                .indexer_name
                .as_deref()
                .unwrap_or(DEFAULT_INDEXER_NAME)
                .to_string();
            match &first {
                None => first = Some(name),
                Some(expected) if *expected != name => {
                    diagnostics.report(
                        diagnostic_codes::INCONSISTENT_INDEXER_NAMES,
                        &arena.symbol(member).location(),
                        &[],
                    );
                }
                Some(_) => {}
            }
        }
    }

    /// Partial parts must declare the same type parameter names, in the same
    /// order, with the same variance. One report per type.
    fn check_partial_type_parameters(&self, ty: SymbolId, diagnostics: &mut DiagnosticBag) {
        let arena = self.arena();
        let parts = arena.type_symbol(ty).declarations();
        let Some((first, rest)) = parts.split_first() else {
            return;
        };
        for part in rest {
            let names_match = part.type_parameters.len() == first.type_parameters.len()
                && part
                    .type_parameters
                    .iter()
                    .zip(&first.type_parameters)
                    .all(|(mine, theirs)| mine.name == theirs.name);
            let code = if !names_match {
                diagnostic_codes::PARTIAL_WRONG_TYPE_PARAMS
            } else if part
                .type_parameters
                .iter()
                .zip(&first.type_parameters)
                .any(|(mine, theirs)| mine.variance != theirs.variance)
            {
                diagnostic_codes::PARTIAL_WRONG_TYPE_PARAMS_VARIANCE
            } else {
                continue;
            };
            diagnostics.report(
                code,
                &part.location,
                &[&display_type_id(arena, arena.declared_type(ty))],
            );
            return;
        }
    }
}

#[cfg(test)]
#[path = "tests/type_checks_tests.rs"]
mod tests;
