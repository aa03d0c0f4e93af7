//! Type parameter substitution.
//!
//! Used to view a base member through a constructed base type
//! (`Base<int>.M(T)` becomes `M(int)`) and to align the method type
//! parameters of two signatures by ordinal before comparing them.

use crate::intern::TypeInterner;
use crate::symbol::SymbolId;
use crate::types::{NullableAnnotation, TypeData, TypeId, TypeWithAnnotations};
use csz_common::limits::MAX_TYPE_NESTING_DEPTH;
use rustc_hash::FxHashMap;
use tracing::warn;

pub const MAX_INSTANTIATION_DEPTH: u32 = MAX_TYPE_NESTING_DEPTH;

/// Mapping from type parameter symbols to type arguments.
#[derive(Clone, Debug, Default)]
pub struct TypeSubstitution {
    map: FxHashMap<SymbolId, TypeWithAnnotations>,
}

impl TypeSubstitution {
    pub fn new() -> Self {
        TypeSubstitution::default()
    }

    /// Map `parameters[i]` to `arguments[i]`. Extra entries on either side
    /// are ignored.
    pub fn from_args(parameters: &[SymbolId], arguments: &[TypeWithAnnotations]) -> Self {
        let map = parameters
            .iter()
            .copied()
            .zip(arguments.iter().cloned())
            .collect();
        TypeSubstitution { map }
    }

    /// Map each of `from` to the type parameter at the same ordinal in `to`.
    pub fn align_type_parameters(
        interner: &TypeInterner,
        from: &[SymbolId],
        to: &[SymbolId],
    ) -> Self {
        let map = from
            .iter()
            .copied()
            .zip(to.iter().map(|parameter| {
                TypeWithAnnotations::oblivious(interner.type_parameter(*parameter))
            }))
            .collect();
        TypeSubstitution { map }
    }

    /// Substitution that views the members of `definition` through the
    /// constructed type `constructed`. Identity when `constructed` is not a
    /// construction of `definition`.
    pub fn for_construction(
        interner: &TypeInterner,
        definition_parameters: &[SymbolId],
        constructed: TypeId,
    ) -> Self {
        match &*interner.lookup(constructed) {
            TypeData::Named { type_args, .. } if type_args.len() == definition_parameters.len() => {
                Self::from_args(definition_parameters, type_args)
            }
            _ => Self::new(),
        }
    }

    pub fn insert(&mut self, parameter: SymbolId, argument: TypeWithAnnotations) {
        self.map.insert(parameter, argument);
    }

    /// Combine with `other`; entries of `other` win.
    pub fn extend(&mut self, other: TypeSubstitution) {
        self.map.extend(other.map);
    }

    pub fn get(&self, parameter: SymbolId) -> Option<&TypeWithAnnotations> {
        self.map.get(&parameter)
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether substituting through `self` leaves every type unchanged.
    pub fn is_identity(&self, interner: &TypeInterner) -> bool {
        self.map.iter().all(|(parameter, argument)| {
            argument.custom_modifiers.is_empty()
                && interner.type_parameter_symbol(argument.ty) == Some(*parameter)
        })
    }
}

/// Apply `substitution` to a type use.
///
/// A substituted type parameter keeps an explicit `?` from the use site;
/// otherwise the argument's own annotation is used. Custom modifiers of the
/// argument come first, then those of the use.
pub fn instantiate_type(
    interner: &TypeInterner,
    ty: &TypeWithAnnotations,
    substitution: &TypeSubstitution,
) -> TypeWithAnnotations {
    if substitution.is_empty() {
        return ty.clone();
    }
    Instantiator {
        interner,
        substitution,
        depth: 0,
    }
    .instantiate(ty)
}

struct Instantiator<'a> {
    interner: &'a TypeInterner,
    substitution: &'a TypeSubstitution,
    depth: u32,
}

impl Instantiator<'_> {
    fn instantiate(&mut self, ty: &TypeWithAnnotations) -> TypeWithAnnotations {
        if self.depth >= MAX_INSTANTIATION_DEPTH {
            warn!(depth = self.depth, "instantiate_type: nesting limit reached");
            return TypeWithAnnotations::error();
        }
        self.depth += 1;
        let result = self.instantiate_inner(ty);
        self.depth -= 1;
        result
    }

    fn instantiate_inner(&mut self, ty: &TypeWithAnnotations) -> TypeWithAnnotations {
        let data = self.interner.lookup(ty.ty);
        match &*data {
            TypeData::Intrinsic(_) => ty.clone(),
            TypeData::TypeParameter(parameter) => match self.substitution.get(*parameter) {
                Some(argument) => {
                    let annotation = match ty.annotation {
                        NullableAnnotation::Annotated => NullableAnnotation::Annotated,
                        _ if argument.annotation.is_oblivious() => ty.annotation,
                        _ => argument.annotation,
                    };
                    let mut custom_modifiers = argument.custom_modifiers.clone();
                    custom_modifiers.extend(ty.custom_modifiers.iter().copied());
                    TypeWithAnnotations {
                        ty: argument.ty,
                        annotation,
                        custom_modifiers,
                    }
                }
                None => ty.clone(),
            },
            TypeData::Named { symbol, type_args } => {
                let args = type_args.iter().map(|arg| self.instantiate(arg)).collect();
                self.rebuild(ty, self.interner.named(*symbol, args))
            }
            TypeData::Nullable(underlying) => {
                let underlying =
                    self.instantiate(&TypeWithAnnotations::oblivious(*underlying)).ty;
                self.rebuild(ty, self.interner.nullable_value_type(underlying))
            }
            TypeData::Array { element, rank } => {
                let element = self.instantiate(element);
                self.rebuild(ty, self.interner.array(element, *rank))
            }
            TypeData::Tuple { elements, names } => {
                let elements = elements.iter().map(|element| self.instantiate(element)).collect();
                self.rebuild(ty, self.interner.tuple(elements, names.clone()))
            }
        }
    }

    fn rebuild(&self, original: &TypeWithAnnotations, ty: TypeId) -> TypeWithAnnotations {
        TypeWithAnnotations {
            ty,
            annotation: original.annotation,
            custom_modifiers: original.custom_modifiers.clone(),
        }
    }
}

#[cfg(test)]
#[path = "tests/substitution_tests.rs"]
mod tests;
